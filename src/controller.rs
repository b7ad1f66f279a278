//! Application root: the only owner of the log store and orbital configuration.
//!
//! Every input is handled synchronously and answered with a list of [`Effect`]s
//! that the runtime carries out (persisting a key, arming or cancelling a timer).
//! Haptic pulse requests queue up until the next snapshot drains them.

use crate::categories::{self, CATEGORIES, SLICE_COUNT};
use crate::config::{
    ACTIVATION_HAPTIC_MS, LOG_HAPTIC_MS, LONG_PRESS, NOTICE_TTL, SAVE_CONFIRMATION,
};
use crate::dates::{date_key, today};
use crate::errors::RitualError;
use crate::gesture::{self, GestureEffect, GestureEvent, GestureState};
use crate::models::{
    ActivityKey, CategoryView, GestureInput, LogStore, NoticeView, OrbitalConfig, PlacedOrbital,
    RitualSnapshot, SettingsResponse, ViewInput,
};
use crate::settings::SettingsEditor;
use crate::stats::logged_categories_on;
use crate::storage::StorageKey;
use crate::views::{View, ViewSwitcher};
use chrono::{DateTime, Local, NaiveDate};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    LongPress,
    Notice,
    SaveConfirmation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Persist(StorageKey),
    Schedule {
        timer: TimerKind,
        token: u64,
        after: Duration,
    },
    Cancel(TimerKind),
}

/// The transient "just logged" banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub category_id: String,
    pub orbital: String,
    token: u64,
}

#[derive(Debug)]
pub struct RitualController {
    logs: LogStore,
    orbitals: OrbitalConfig,
    gesture: GestureState,
    views: ViewSwitcher,
    settings: SettingsEditor,
    notice: Option<Notice>,
    haptics: Vec<u64>,
    next_token: u64,
}

impl RitualController {
    pub fn new(logs: LogStore, orbitals: OrbitalConfig) -> Self {
        Self {
            logs,
            orbitals: orbitals.sanitized(),
            gesture: GestureState::Idle,
            views: ViewSwitcher::default(),
            settings: SettingsEditor::default(),
            notice: None,
            haptics: Vec::new(),
            next_token: 0,
        }
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    pub fn orbitals(&self) -> &OrbitalConfig {
        &self.orbitals
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn view(&self) -> View {
        self.views.current()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    pub fn record_activity(&mut self, category_id: &str, orbital: &str) -> Vec<Effect> {
        self.record_activity_at(category_id, orbital, Local::now())
    }

    pub fn record_activity_at(
        &mut self,
        category_id: &str,
        orbital: &str,
        now: DateTime<Local>,
    ) -> Vec<Effect> {
        let date = date_key(now.date_naive());
        self.logs.upsert(
            &date,
            ActivityKey::new(category_id, orbital),
            now.timestamp_millis(),
        );
        info!(%date, category = category_id, orbital, "activity logged");

        self.haptics.push(LOG_HAPTIC_MS);
        let token = self.issue_token();
        self.notice = Some(Notice {
            category_id: category_id.to_string(),
            orbital: orbital.to_string(),
            token,
        });

        vec![
            Effect::Persist(StorageKey::Logs),
            Effect::Schedule {
                timer: TimerKind::Notice,
                token,
                after: NOTICE_TTL,
            },
        ]
    }

    /// Validated entry point for callers outside the gesture flow.
    pub fn log_orbital(&mut self, category_id: &str, orbital: &str) -> Result<Vec<Effect>, RitualError> {
        self.ensure_orbital(category_id, orbital)?;
        Ok(self.record_activity(category_id, orbital))
    }

    pub fn clear_all_logs(&mut self) -> Vec<Effect> {
        self.logs.clear();
        info!("all logs cleared");
        vec![Effect::Persist(StorageKey::Logs)]
    }

    /// Wholesale replacement; each category keeps its current orbital count.
    pub fn replace_orbital_config(&mut self, config: OrbitalConfig) -> Result<Vec<Effect>, RitualError> {
        for (category_id, names) in &config.orbitals {
            if !categories::is_registered(category_id) {
                return Err(RitualError::UnknownCategory(category_id.clone()));
            }
            let expected = self.orbitals.orbitals_for(category_id).len();
            if names.len() != expected {
                return Err(RitualError::OrbitalCountChanged {
                    category_id: category_id.clone(),
                    expected,
                });
            }
            if names.iter().any(|name| name.trim().is_empty()) {
                return Err(RitualError::EmptyOrbitalName);
            }
        }

        self.orbitals = config;
        info!("orbital configuration replaced");
        Ok(vec![Effect::Persist(StorageKey::Orbitals)])
    }

    pub fn handle_gesture(&mut self, input: GestureInput) -> Result<Vec<Effect>, RitualError> {
        self.handle_gesture_at(input, Local::now())
    }

    pub fn handle_gesture_at(
        &mut self,
        input: GestureInput,
        now: DateTime<Local>,
    ) -> Result<Vec<Effect>, RitualError> {
        let event = match input {
            GestureInput::PointerDown { slice } => {
                if slice >= SLICE_COUNT {
                    return Err(RitualError::UnknownSlice(slice));
                }
                GestureEvent::PointerDown {
                    slice,
                    token: self.issue_token(),
                }
            }
            GestureInput::PointerUp => GestureEvent::PointerUp,
            GestureInput::PointerLeave => GestureEvent::PointerLeave,
            GestureInput::PointerCancel => GestureEvent::PointerCancel,
            GestureInput::BackdropTap => GestureEvent::BackdropTap,
            GestureInput::SelectOrbital { orbital } => {
                if let Some(category) = self.gesture.active_slice().and_then(categories::by_slice) {
                    self.ensure_orbital(category.id, &orbital)?;
                }
                GestureEvent::SelectOrbital { orbital }
            }
        };
        Ok(self.advance_gesture(event, now))
    }

    pub fn on_timer(&mut self, timer: TimerKind, token: u64) -> Vec<Effect> {
        self.on_timer_at(timer, token, Local::now())
    }

    pub fn on_timer_at(&mut self, timer: TimerKind, token: u64, now: DateTime<Local>) -> Vec<Effect> {
        match timer {
            TimerKind::LongPress => self.advance_gesture(GestureEvent::LongPressElapsed { token }, now),
            TimerKind::Notice => {
                if self.notice.as_ref().is_some_and(|notice| notice.token == token) {
                    self.notice = None;
                }
                Vec::new()
            }
            TimerKind::SaveConfirmation => {
                self.settings.flash_elapsed(token);
                Vec::new()
            }
        }
    }

    fn advance_gesture(&mut self, event: GestureEvent, now: DateTime<Local>) -> Vec<Effect> {
        let orbitals = &self.orbitals;
        let transition = gesture::step(&self.gesture, event, |slice| {
            categories::by_slice(slice)
                .map(|category| orbitals.orbitals_for(category.id).len())
                .unwrap_or(0)
        });
        debug!(from = self.gesture.name(), to = transition.state.name(), "gesture");
        self.gesture = transition.state;

        let mut effects = Vec::new();
        for effect in transition.effects {
            match effect {
                GestureEffect::ArmLongPress { token } => effects.push(Effect::Schedule {
                    timer: TimerKind::LongPress,
                    token,
                    after: LONG_PRESS,
                }),
                GestureEffect::DisarmLongPress => effects.push(Effect::Cancel(TimerKind::LongPress)),
                GestureEffect::Activated { slice } => {
                    debug!(slice, "slice activated");
                    self.haptics.push(ACTIVATION_HAPTIC_MS);
                }
                GestureEffect::Commit { slice, orbital } => {
                    if let Some(category) = categories::by_slice(slice) {
                        effects.extend(self.record_activity_at(category.id, &orbital, now));
                    }
                }
            }
        }
        effects
    }

    /// Returns whether the visible view changed.
    pub fn handle_view(&mut self, input: ViewInput) -> Result<bool, RitualError> {
        match input {
            ViewInput::Tab { index } => {
                let view = View::from_index(index).ok_or(RitualError::UnknownView(index))?;
                let changed = view != self.views.current();
                self.views.select(view);
                Ok(changed)
            }
            ViewInput::Swipe { dx } => {
                let suppressed = !self.gesture.is_idle() || self.settings.is_open();
                Ok(self.views.swipe(dx, suppressed))
            }
        }
    }

    pub fn open_settings(&mut self) {
        self.settings.open(&self.orbitals);
    }

    pub fn close_settings(&mut self) {
        self.settings.close();
    }

    pub fn rename_draft(&mut self, category_id: &str, index: usize, name: &str) -> Result<(), RitualError> {
        self.settings.rename(category_id, index, name)
    }

    pub fn save_settings(&mut self) -> Result<Vec<Effect>, RitualError> {
        if !self.settings.is_open() {
            return Err(RitualError::SettingsClosed);
        }
        let draft = self.settings.draft().clone();
        let mut effects = self.replace_orbital_config(draft)?;
        let token = self.issue_token();
        self.settings.mark_saved(token)?;
        effects.push(Effect::Schedule {
            timer: TimerKind::SaveConfirmation,
            token,
            after: SAVE_CONFIRMATION,
        });
        Ok(effects)
    }

    pub fn request_clear(&mut self) -> Result<(), RitualError> {
        self.settings.request_clear()
    }

    pub fn cancel_clear(&mut self) {
        self.settings.cancel_clear();
    }

    pub fn confirm_clear(&mut self) -> Result<Vec<Effect>, RitualError> {
        self.settings.confirm_clear()?;
        Ok(self.clear_all_logs())
    }

    pub fn settings_view(&self) -> SettingsResponse {
        SettingsResponse {
            open: self.settings.is_open(),
            draft: self.settings.draft().clone(),
            saved_flash: self.settings.saved_flash(),
            clear_pending: self.settings.clear_pending(),
        }
    }

    pub fn snapshot(&mut self) -> RitualSnapshot {
        self.snapshot_at(today())
    }

    /// Drains pending haptic pulses into the snapshot.
    pub fn snapshot_at(&mut self, today: NaiveDate) -> RitualSnapshot {
        let date = date_key(today);
        let lit = logged_categories_on(&self.logs, &date);
        let categories: Vec<CategoryView> = CATEGORIES
            .iter()
            .map(|category| CategoryView {
                id: category.id,
                label: category.label,
                orbitals: self.orbitals.orbitals_for(category.id),
                lit: lit.contains(category.id),
            })
            .collect();

        let orbital_positions = match &self.gesture {
            GestureState::Active { slice, positions } => categories
                .get(*slice)
                .map(|category| {
                    category
                        .orbitals
                        .iter()
                        .zip(positions)
                        .map(|(name, point)| PlacedOrbital {
                            name: name.clone(),
                            x: point.x,
                            y: point.y,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        RitualSnapshot {
            date,
            completed: lit.len(),
            total: SLICE_COUNT,
            gesture: self.gesture.name(),
            pressing_slice: self.gesture.pressing_slice(),
            active_slice: self.gesture.active_slice(),
            orbital_positions,
            view: self.views.current().index(),
            notice: self.notice.as_ref().map(|notice| NoticeView {
                category_id: notice.category_id.clone(),
                orbital: notice.orbital.clone(),
            }),
            settings_open: self.settings.is_open(),
            haptics: std::mem::take(&mut self.haptics),
            categories,
        }
    }

    fn ensure_orbital(&self, category_id: &str, orbital: &str) -> Result<(), RitualError> {
        if !categories::is_registered(category_id) {
            return Err(RitualError::UnknownCategory(category_id.to_string()));
        }
        if !self.orbitals.contains(category_id, orbital) {
            return Err(RitualError::UnknownOrbital {
                category_id: category_id.to_string(),
                orbital: orbital.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RitualController {
    fn default() -> Self {
        Self::new(LogStore::default(), OrbitalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("unambiguous local time")
    }

    fn scheduled_token(effects: &[Effect], kind: TimerKind) -> u64 {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Schedule { timer, token, .. } if *timer == kind => Some(*token),
                _ => None,
            })
            .expect("timer scheduled")
    }

    fn activate(controller: &mut RitualController, slice: usize, now: DateTime<Local>) {
        let effects = controller
            .handle_gesture_at(GestureInput::PointerDown { slice }, now)
            .unwrap();
        let token = scheduled_token(&effects, TimerKind::LongPress);
        controller.on_timer_at(TimerKind::LongPress, token, now);
    }

    #[test]
    fn recording_twice_keeps_one_entry_with_latest_timestamp() {
        let mut controller = RitualController::default();
        let first = at(2024, 6, 10, 9);
        let second = at(2024, 6, 10, 18);
        controller.record_activity_at("finance", "Track", first);
        controller.record_activity_at("finance", "Track", second);

        let day = controller.logs().day("2024-06-10").unwrap();
        assert_eq!(day.entries.len(), 1);
        assert_eq!(
            day.entries[&ActivityKey::new("finance", "Track")],
            second.timestamp_millis()
        );
    }

    #[test]
    fn scenario_first_log_on_a_monday() {
        let mut controller = RitualController::default();
        let now = at(2024, 6, 10, 8);
        let effects = controller.record_activity_at("finance", "Track", now);
        assert_eq!(effects[0], Effect::Persist(StorageKey::Logs));

        let json = serde_json::to_value(controller.logs()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "2024-06-10": { "finance:Track": now.timestamp_millis() } })
        );

        let snapshot = controller.snapshot_at(now.date_naive());
        assert_eq!(snapshot.completed, 1);
        assert!(snapshot.categories[3].lit);
        assert_eq!(snapshot.haptics, [LOG_HAPTIC_MS]);
        assert_eq!(
            snapshot.notice,
            Some(NoticeView {
                category_id: "finance".into(),
                orbital: "Track".into()
            })
        );
    }

    #[test]
    fn newer_notice_survives_older_timer() {
        let mut controller = RitualController::default();
        let now = at(2024, 6, 10, 8);
        let first = scheduled_token(&controller.record_activity_at("body", "Move", now), TimerKind::Notice);
        let second = scheduled_token(&controller.record_activity_at("mind", "Read", now), TimerKind::Notice);

        controller.on_timer_at(TimerKind::Notice, first, now);
        assert_eq!(controller.notice().map(|n| n.orbital.as_str()), Some("Read"));
        controller.on_timer_at(TimerKind::Notice, second, now);
        assert!(controller.notice().is_none());
    }

    #[test]
    fn short_tap_never_logs() {
        let mut controller = RitualController::default();
        let now = at(2024, 6, 10, 8);
        let down = controller
            .handle_gesture_at(GestureInput::PointerDown { slice: 2 }, now)
            .unwrap();
        let token = scheduled_token(&down, TimerKind::LongPress);
        let up = controller.handle_gesture_at(GestureInput::PointerUp, now).unwrap();
        assert_eq!(up, [Effect::Cancel(TimerKind::LongPress)]);

        controller.on_timer_at(TimerKind::LongPress, token, now);
        assert!(controller.gesture().is_idle());
        assert!(controller.logs().is_empty());
    }

    #[test]
    fn long_press_then_select_logs_pressed_category() {
        let mut controller = RitualController::default();
        let now = at(2024, 6, 10, 8);
        activate(&mut controller, 3, now);
        assert_eq!(controller.gesture().active_slice(), Some(3));

        let snapshot = controller.snapshot_at(now.date_naive());
        assert_eq!(snapshot.haptics, [ACTIVATION_HAPTIC_MS]);
        let names: Vec<_> = snapshot.orbital_positions.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Track", "Save", "Review"]);

        let effects = controller
            .handle_gesture_at(GestureInput::SelectOrbital { orbital: "Save".into() }, now)
            .unwrap();
        assert!(effects.contains(&Effect::Persist(StorageKey::Logs)));
        assert!(controller.gesture().is_idle());
        assert!(controller
            .logs()
            .day("2024-06-10")
            .unwrap()
            .entries
            .contains_key(&ActivityKey::new("finance", "Save")));
    }

    #[test]
    fn selecting_a_foreign_orbital_is_rejected() {
        let mut controller = RitualController::default();
        let now = at(2024, 6, 10, 8);
        activate(&mut controller, 0, now);
        let err = controller
            .handle_gesture_at(GestureInput::SelectOrbital { orbital: "Track".into() }, now)
            .unwrap_err();
        assert!(matches!(err, RitualError::UnknownOrbital { .. }));
        assert_eq!(controller.gesture().active_slice(), Some(0));
    }

    #[test]
    fn swipe_is_suppressed_during_press_and_settings() {
        let mut controller = RitualController::default();
        let now = at(2024, 6, 10, 8);
        controller
            .handle_gesture_at(GestureInput::PointerDown { slice: 1 }, now)
            .unwrap();
        assert!(!controller.handle_view(ViewInput::Swipe { dx: -100.0 }).unwrap());
        controller.handle_gesture_at(GestureInput::PointerLeave, now).unwrap();

        controller.open_settings();
        assert!(!controller.handle_view(ViewInput::Swipe { dx: -100.0 }).unwrap());
        controller.close_settings();

        assert!(controller.handle_view(ViewInput::Swipe { dx: -100.0 }).unwrap());
        assert_eq!(controller.view(), View::Weekly);
        assert!(controller.handle_view(ViewInput::Tab { index: 9 }).is_err());
    }

    #[test]
    fn clearing_keeps_orbital_config() {
        let mut controller = RitualController::default();
        controller.open_settings();
        controller.rename_draft("body", 0, "Run").unwrap();
        controller.save_settings().unwrap();
        controller.record_activity_at("body", "Run", at(2024, 6, 10, 8));

        controller.request_clear().unwrap();
        let effects = controller.confirm_clear().unwrap();
        assert_eq!(effects, [Effect::Persist(StorageKey::Logs)]);
        assert!(controller.logs().is_empty());
        assert_eq!(controller.orbitals().orbitals_for("body")[0], "Run");
    }

    #[test]
    fn saved_names_appear_in_next_activation() {
        let mut controller = RitualController::default();
        controller.open_settings();
        controller.rename_draft("finance", 0, "Budget").unwrap();
        let effects = controller.save_settings().unwrap();
        assert_eq!(effects[0], Effect::Persist(StorageKey::Orbitals));
        let flash = scheduled_token(&effects, TimerKind::SaveConfirmation);
        assert!(controller.settings_view().saved_flash);
        controller.on_timer(TimerKind::SaveConfirmation, flash);
        assert!(!controller.settings_view().saved_flash);

        let now = at(2024, 6, 10, 8);
        activate(&mut controller, 3, now);
        let snapshot = controller.snapshot_at(now.date_naive());
        assert_eq!(snapshot.orbital_positions[0].name, "Budget");
        assert_eq!(controller.orbitals().orbitals_for("finance"), ["Budget", "Save", "Review"]);
    }

    #[test]
    fn replace_rejects_changed_counts_and_unknown_categories() {
        let mut controller = RitualController::default();
        let mut config = OrbitalConfig::default();
        config.orbitals.insert("body".into(), vec!["Run".into()]);
        assert!(matches!(
            controller.replace_orbital_config(config),
            Err(RitualError::OrbitalCountChanged { .. })
        ));

        let mut config = OrbitalConfig::default();
        config.orbitals.insert("chores".into(), vec!["Dishes".into()]);
        assert!(matches!(
            controller.replace_orbital_config(config),
            Err(RitualError::UnknownCategory(_))
        ));
        assert_eq!(controller.orbitals(), &OrbitalConfig::default());
    }

    #[test]
    fn direct_log_validates_input() {
        let mut controller = RitualController::default();
        assert!(controller.log_orbital("chores", "Dishes").is_err());
        assert!(controller.log_orbital("body", "Dishes").is_err());
        assert!(controller.log_orbital("body", "Move").is_ok());
    }

    #[test]
    fn stored_config_with_retired_category_still_saves() {
        let stored: OrbitalConfig = serde_json::from_str(
            r#"{ "body": ["Move", "Stretch", "Hydrate"], "chores": ["Dishes", "Laundry", "Trash"] }"#,
        )
        .unwrap();
        let mut controller = RitualController::new(LogStore::default(), stored);
        assert!(!controller.orbitals().orbitals.contains_key("chores"));

        controller.open_settings();
        controller.rename_draft("body", 0, "Run").unwrap();
        let effects = controller.save_settings().unwrap();
        let flash = scheduled_token(&effects, TimerKind::SaveConfirmation);
        assert!(controller.settings_view().saved_flash);
        assert_eq!(controller.orbitals().orbitals_for("body"), ["Run", "Stretch", "Hydrate"]);

        controller.on_timer(TimerKind::SaveConfirmation, flash);
        assert!(!controller.settings_view().saved_flash);
    }

    #[test]
    fn rejected_save_leaves_flash_off() {
        let mut controller = RitualController::default();
        assert!(matches!(controller.save_settings(), Err(RitualError::SettingsClosed)));
        assert!(!controller.settings_view().saved_flash);
    }
}
