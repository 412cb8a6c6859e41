#![forbid(unsafe_code)]

//! Presentation derived from counter state.
//!
//! [`Presentation::derive`] is a pure function of `(value, min, max)` and the
//! configured [`Thresholds`]. Threshold matches take priority over the
//! boundary check, so a bound that coincides with a threshold shows the
//! threshold tone.
//!
//! | value              | tone      |
//! |--------------------|-----------|
//! | `warning` (18)     | `Warning` |
//! | `celebration` (21) | `Success` |
//! | `min` or `max`     | `Limit`   |
//! | anything else      | `Normal`  |

use crate::counter::CounterState;

/// Values that trigger special presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Value shown in the warning tone.
    pub warning: i64,
    /// Value shown in the success tone and that fires the celebration.
    pub celebration: i64,
}

impl Thresholds {
    pub const DEFAULT_WARNING: i64 = 18;
    pub const DEFAULT_CELEBRATION: i64 = 21;
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: Self::DEFAULT_WARNING,
            celebration: Self::DEFAULT_CELEBRATION,
        }
    }
}

/// Display color class for the readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    /// Plain readout (white).
    #[default]
    Normal,
    /// The warning threshold (yellow).
    Warning,
    /// The celebration threshold (green).
    Success,
    /// Sitting on a bound (red).
    Limit,
}

impl Tone {
    /// Stable name used in logs and snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Limit => "limit",
        }
    }
}

/// Where the value sits relative to its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Neither,
    AtMin,
    AtMax,
    /// `min == max`: the value is on both bounds at once.
    Pinned,
}

impl Boundary {
    #[must_use]
    pub const fn of(state: &CounterState) -> Self {
        match (state.at_min(), state.at_max()) {
            (true, true) => Self::Pinned,
            (true, false) => Self::AtMin,
            (false, true) => Self::AtMax,
            (false, false) => Self::Neither,
        }
    }

    #[must_use]
    pub const fn is_edge(self) -> bool {
        !matches!(self, Self::Neither)
    }
}

/// Everything the view needs besides the number itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub tone: Tone,
    pub boundary: Boundary,
    pub increment_disabled: bool,
    pub decrement_disabled: bool,
}

impl Presentation {
    /// Derive presentation from state and thresholds.
    #[must_use]
    pub fn derive(state: &CounterState, thresholds: &Thresholds) -> Self {
        let value = state.value();
        let boundary = Boundary::of(state);
        let tone = if value == thresholds.warning {
            Tone::Warning
        } else if value == thresholds.celebration {
            Tone::Success
        } else if boundary.is_edge() {
            Tone::Limit
        } else {
            Tone::Normal
        };

        Self {
            tone,
            boundary,
            increment_disabled: state.at_max(),
            decrement_disabled: state.at_min(),
        }
    }
}
