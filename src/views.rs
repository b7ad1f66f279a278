use crate::config::SWIPE_THRESHOLD_PX;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Ritual,
    Weekly,
    History,
}

impl View {
    pub const ALL: [View; 3] = [View::Ritual, View::Weekly, View::History];

    pub fn index(self) -> usize {
        match self {
            View::Ritual => 0,
            View::Weekly => 1,
            View::History => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<View> {
        View::ALL.get(index).copied()
    }
}

/// Which of the three screens is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSwitcher {
    current: View,
}

impl ViewSwitcher {
    pub fn current(&self) -> View {
        self.current
    }

    pub fn select(&mut self, view: View) {
        self.current = view;
    }

    /// Negative `dx` (finger moving left) advances to the next view. Returns whether the view changed.
    pub fn swipe(&mut self, dx: f64, suppressed: bool) -> bool {
        if suppressed || !dx.is_finite() || dx.abs() <= SWIPE_THRESHOLD_PX {
            return false;
        }
        let index = self.current.index();
        let next = if dx < 0.0 {
            (index + 1).min(View::ALL.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        match View::from_index(next) {
            Some(view) if view != self.current => {
                self.current = view;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_ritual() {
        assert_eq!(ViewSwitcher::default().current(), View::Ritual);
    }

    #[test]
    fn swipe_moves_one_step_and_clamps() {
        let mut views = ViewSwitcher::default();
        assert!(!views.swipe(80.0, false));
        assert_eq!(views.current(), View::Ritual);

        assert!(views.swipe(-80.0, false));
        assert_eq!(views.current(), View::Weekly);
        assert!(views.swipe(-200.0, false));
        assert_eq!(views.current(), View::History);
        assert!(!views.swipe(-200.0, false));
        assert_eq!(views.current(), View::History);

        assert!(views.swipe(61.0, false));
        assert_eq!(views.current(), View::Weekly);
    }

    #[test]
    fn short_or_suppressed_swipes_are_ignored() {
        let mut views = ViewSwitcher::default();
        assert!(!views.swipe(-60.0, false));
        assert!(!views.swipe(-120.0, true));
        assert!(!views.swipe(f64::NAN, false));
        assert_eq!(views.current(), View::Ritual);
    }

    #[test]
    fn tab_selects_directly() {
        let mut views = ViewSwitcher::default();
        views.select(View::from_index(2).unwrap());
        assert_eq!(views.current().index(), 2);
        assert!(View::from_index(3).is_none());
    }
}
