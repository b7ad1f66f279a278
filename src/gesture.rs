//! Long-press activation of pie slices.
//!
//! The machine is a pure function of `(state, event)`. Timer expiry arrives as
//! an ordinary event carrying the token handed out when the press began, so a
//! stale expiry for an abandoned press is ignored rather than activating the
//! wrong slice.

use crate::categories::SLICE_COUNT;
use crate::config::ORBIT_RADIUS;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Pressing {
        slice: usize,
        token: u64,
    },
    Active {
        slice: usize,
        positions: Vec<Point>,
    },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Pressing { .. } => "pressing",
            GestureState::Active { .. } => "active",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn pressing_slice(&self) -> Option<usize> {
        match self {
            GestureState::Pressing { slice, .. } => Some(*slice),
            _ => None,
        }
    }

    pub fn active_slice(&self) -> Option<usize> {
        match self {
            GestureState::Active { slice, .. } => Some(*slice),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    PointerDown { slice: usize, token: u64 },
    PointerUp,
    PointerLeave,
    PointerCancel,
    LongPressElapsed { token: u64 },
    BackdropTap,
    SelectOrbital { orbital: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    ArmLongPress { token: u64 },
    DisarmLongPress,
    Activated { slice: usize },
    Commit { slice: usize, orbital: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GestureState,
    pub effects: Vec<GestureEffect>,
}

impl Transition {
    fn to(state: GestureState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: GestureEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Advances the machine. `orbital_count` reports how many orbitals a slice currently has.
pub fn step(
    state: &GestureState,
    event: GestureEvent,
    orbital_count: impl Fn(usize) -> usize,
) -> Transition {
    match (state, event) {
        (_, GestureEvent::PointerDown { slice, .. }) if slice >= SLICE_COUNT => {
            Transition::to(state.clone())
        }
        // A new press always wins; any pending deadline is replaced.
        (previous, GestureEvent::PointerDown { slice, token }) => {
            let transition = Transition::to(GestureState::Pressing { slice, token });
            let transition = if matches!(previous, GestureState::Pressing { .. }) {
                transition.with(GestureEffect::DisarmLongPress)
            } else {
                transition
            };
            transition.with(GestureEffect::ArmLongPress { token })
        }
        (
            GestureState::Pressing { .. },
            GestureEvent::PointerUp | GestureEvent::PointerLeave | GestureEvent::PointerCancel,
        ) => Transition::to(GestureState::Idle).with(GestureEffect::DisarmLongPress),
        (GestureState::Pressing { slice, token }, GestureEvent::LongPressElapsed { token: fired })
            if *token == fired =>
        {
            let positions = orbital_positions(*slice, orbital_count(*slice));
            Transition::to(GestureState::Active {
                slice: *slice,
                positions,
            })
            .with(GestureEffect::Activated { slice: *slice })
        }
        (GestureState::Active { .. }, GestureEvent::BackdropTap) => {
            Transition::to(GestureState::Idle)
        }
        (GestureState::Active { slice, .. }, GestureEvent::SelectOrbital { orbital }) => {
            Transition::to(GestureState::Idle).with(GestureEffect::Commit {
                slice: *slice,
                orbital,
            })
        }
        (current, _) => Transition::to(current.clone()),
    }
}

/// Middle of a slice in degrees, clockwise from the top.
pub fn slice_mid_angle(slice: usize) -> f64 {
    let span = 360.0 / SLICE_COUNT as f64;
    span * slice as f64 + span / 2.0
}

/// Angular offsets from the slice middle for `count` orbitals.
pub fn spread(count: usize) -> Vec<f64> {
    const WIDE: f64 = 50.0;

    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        3 => vec![-38.0, 0.0, 38.0],
        4 => vec![-55.0, -18.0, 18.0, 55.0],
        5 => vec![-50.0, -25.0, 0.0, 25.0, 50.0],
        n => {
            let step = 2.0 * WIDE / (n - 1) as f64;
            (0..n).map(|i| -WIDE + step * i as f64).collect()
        }
    }
}

/// Orbital centres relative to the pie centre, y growing downwards.
pub fn orbital_positions(slice: usize, count: usize) -> Vec<Point> {
    let mid = slice_mid_angle(slice);
    spread(count)
        .into_iter()
        .map(|offset| {
            let radians = (mid + offset - 90.0).to_radians();
            Point {
                x: ORBIT_RADIUS * radians.cos(),
                y: ORBIT_RADIUS * radians.sin(),
            }
        })
        .collect()
}
