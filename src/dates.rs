use chrono::{Datelike, Duration, Local, Months, NaiveDate};

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday through Sunday of the week containing `today`.
pub fn week_dates_at(today: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(today);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

pub fn current_week_dates() -> [NaiveDate; 7] {
    week_dates_at(today())
}

/// Every date of `month` in ascending order; empty for an invalid month.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|date| date.month() == month)
        .collect()
}

/// First day of the month holding `today` and of the `count - 1` months before it, oldest first.
pub fn history_months_at(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let Some(current) = today.with_day(1) else {
        return Vec::new();
    };
    (0..count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

pub fn month_label(first: NaiveDate) -> String {
    first.format("%B %Y").to_string()
}

pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}
