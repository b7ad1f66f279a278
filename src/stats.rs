use crate::categories::{CATEGORIES, SLICE_COUNT};
use crate::dates::{
    current_week_dates, date_key, history_months_at, month_days, month_label, today, week_dates_at,
    weekday_label,
};
use crate::models::{
    HeatmapCell, HeatmapMonth, HistoryResponse, LogStore, TodayResponse, WeeklyRow, WeeklyTable,
};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

pub const HISTORY_MONTHS: u32 = 3;

pub fn logged_categories_on(logs: &LogStore, date: &str) -> BTreeSet<&'static str> {
    logs.day(date)
        .map(|day| day.logged_categories())
        .unwrap_or_default()
}

pub fn build_today(logs: &LogStore) -> TodayResponse {
    build_today_at(today(), logs)
}

pub fn build_today_at(today: NaiveDate, logs: &LogStore) -> TodayResponse {
    let date = date_key(today);
    let categories = logged_categories_on(logs, &date)
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    TodayResponse {
        completed: categories.len(),
        total: SLICE_COUNT,
        date,
        categories,
    }
}

pub fn build_weekly(logs: &LogStore) -> WeeklyTable {
    build_weekly_for(current_week_dates(), logs)
}

pub fn build_weekly_at(today: NaiveDate, logs: &LogStore) -> WeeklyTable {
    build_weekly_for(week_dates_at(today), logs)
}

/// Distinct orbitals logged per category for each of the given days.
fn build_weekly_for(week: [NaiveDate; 7], logs: &LogStore) -> WeeklyTable {
    let rows = week
        .into_iter()
        .map(|date| {
            let key = date_key(date);
            let counts: Vec<u32> = match logs.day(&key) {
                Some(day) => CATEGORIES
                    .iter()
                    .map(|category| day.orbital_count(category.id))
                    .collect(),
                None => vec![0; SLICE_COUNT],
            };
            WeeklyRow {
                weekday: weekday_label(date),
                total: counts.iter().sum(),
                date: key,
                counts,
            }
        })
        .collect();

    WeeklyTable {
        categories: CATEGORIES.iter().map(|category| category.id.to_string()).collect(),
        rows,
    }
}

pub fn build_history(logs: &LogStore) -> HistoryResponse {
    build_history_at(today(), logs)
}

/// Heatmap cells for the current month and the two before it.
pub fn build_history_at(today: NaiveDate, logs: &LogStore) -> HistoryResponse {
    let months = history_months_at(today, HISTORY_MONTHS)
        .into_iter()
        .map(|first| {
            let days = month_days(first.year(), first.month())
                .into_iter()
                .map(|date| {
                    let key = date_key(date);
                    let categories: Vec<String> = logged_categories_on(logs, &key)
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    HeatmapCell {
                        count: categories.len(),
                        date: key,
                        categories,
                    }
                })
                .collect();
            HeatmapMonth {
                year: first.year(),
                month: first.month(),
                label: month_label(first),
                first_weekday: first.weekday().num_days_from_monday(),
                days,
            }
        })
        .collect();

    HistoryResponse { months }
}
