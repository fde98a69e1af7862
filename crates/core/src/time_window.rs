//! Dashboard time window projection.
//!
//! Configuration can carry a relative range (`"-1h"`) or an explicit
//! start/end in epoch seconds. [`TimeWindow::from_spec`] reduces the raw
//! fields to one variant, with the relative range taking precedence, and
//! [`TimeFilter`] is the wire form.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::{EpochMillis, EpochSeconds};

/// End marker sent with a relative range.
pub const RELATIVE_END: &str = "Now";

/// Largest epoch-seconds magnitude whose millisecond value fits in `i64`.
pub const MAX_EPOCH_SECONDS: EpochSeconds = i64::MAX / 1000;

/// Relative range syntax: a negative count of minutes, hours, days or weeks.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[0-9]+[mhdw]$").expect("valid regex"));

/// Returns `true` if `value` is a relative range such as `-5m` or `-1h`.
pub fn is_valid_relative_time(value: &str) -> bool {
    RELATIVE_TIME_RE.is_match(value)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Time window fields as authored.
///
/// `time_range` conflicts with `start_time` and `end_time`; the acceptance
/// checks reject documents that set both, but projection tolerates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSpec {
    pub time_range: Option<String>,
    pub start_time: Option<EpochSeconds>,
    pub end_time: Option<EpochSeconds>,
}

impl TimeSpec {
    /// Whether the relative range and an explicit bound are both set.
    pub fn has_conflict(&self) -> bool {
        self.time_range.is_some() && (self.start_time.is_some() || self.end_time.is_some())
    }
}

/// The effective time window of a dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeWindow {
    /// Relative to now, e.g. `"-1h"`.
    Relative(String),
    /// Explicit bounds in epoch seconds. Either bound may be absent.
    Absolute {
        start: Option<EpochSeconds>,
        end: Option<EpochSeconds>,
    },
}

impl TimeWindow {
    /// Reduce raw fields to a single window. Returns `None` when nothing is set.
    pub fn from_spec(spec: &TimeSpec) -> Option<Self> {
        if let Some(range) = &spec.time_range {
            return Some(TimeWindow::Relative(range.clone()));
        }
        if spec.start_time.is_none() && spec.end_time.is_none() {
            return None;
        }
        Some(TimeWindow::Absolute {
            start: spec.start_time,
            end: spec.end_time,
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One end of the time filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TimeBound {
    Relative(String),
    EpochMillis(EpochMillis),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<TimeBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeBound>,
}

impl TimeFilter {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Out-of-range values clamp to the `i64` limits; acceptance rejects them
/// before they get here.
fn to_millis(seconds: EpochSeconds) -> TimeBound {
    TimeBound::EpochMillis(seconds.saturating_mul(1000))
}

impl From<&TimeWindow> for TimeFilter {
    fn from(window: &TimeWindow) -> Self {
        match window {
            TimeWindow::Relative(range) => TimeFilter {
                start: Some(TimeBound::Relative(range.clone())),
                end: Some(TimeBound::Relative(RELATIVE_END.to_string())),
            },
            TimeWindow::Absolute { start, end } => TimeFilter {
                start: start.map(to_millis),
                end: end.map(to_millis),
            },
        }
    }
}

/// Project raw time fields onto the wire filter. `None` means the `time`
/// key is left out of the payload.
pub fn project_time(spec: &TimeSpec) -> Option<TimeFilter> {
    TimeWindow::from_spec(spec)
        .map(|window| TimeFilter::from(&window))
        .filter(|filter| !filter.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
