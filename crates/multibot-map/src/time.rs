//! Safe and collision intervals on a per-cell timeline.

use std::fmt;
use std::time::Duration;

use multibot_geometry::Index;

/// Two instants closer than this compare equal (10 ns, i.e. 1e-8 s).
pub const TIME_EPSILON: Duration = Duration::from_nanos(10);

/// A half-open time window `[start, end)` that is either safe or colliding.
///
/// The default interval is unbounded on both ends (`Duration::MAX`) and unsafe.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeInterval {
    /// Inclusive start.
    pub start: Duration,
    /// Exclusive end; `Duration::MAX` leaves the interval open.
    pub end: Duration,
    /// Whether the cell may be occupied during the interval.
    pub is_safe: bool,
}

impl Default for TimeInterval {
    fn default() -> Self {
        Self {
            start: Duration::MAX,
            end: Duration::MAX,
            is_safe: false,
        }
    }
}

impl TimeInterval {
    /// Creates the interval `[start, end)`.
    pub const fn new(start: Duration, end: Duration, is_safe: bool) -> Self {
        Self { start, end, is_safe }
    }

    /// Returns `true` if `t` lies in `[start, end)`.
    pub fn contains(&self, t: Duration) -> bool {
        self.start <= t && t < self.end
    }
}

/// Starts must agree within [`TIME_EPSILON`]. Two unbounded ends are equal,
/// otherwise ends must agree within the same tolerance. The safety flag is not
/// compared.
impl PartialEq for TimeInterval {
    fn eq(&self, other: &Self) -> bool {
        if self.start.abs_diff(other.start) > TIME_EPSILON {
            return false;
        }
        if self.end == Duration::MAX && other.end == Duration::MAX {
            return true;
        }
        self.end.abs_diff(other.end) <= TIME_EPSILON
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}s, {}s)", self.start.as_secs_f64(), self.end.as_secs_f64())
    }
}

/// The ordered intervals describing when a single cell is free or taken.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeLine {
    /// The cell this timeline belongs to.
    pub idx: Index,
    /// Intervals in time order.
    pub intervals: Vec<TimeInterval>,
    /// Whether the cell is statically occupied.
    pub occupied: bool,
}

impl TimeLine {
    /// Creates a timeline with no intervals.
    pub fn new(idx: Index, occupied: bool) -> Self {
        Self {
            idx,
            intervals: Vec::new(),
            occupied,
        }
    }

    /// Safe intervals in timeline order.
    pub fn safe_intervals(&self) -> impl Iterator<Item = &TimeInterval> {
        self.intervals.iter().filter(|interval| interval.is_safe)
    }

    /// Returns `true` if the cell is free and `t` falls in a safe interval.
    pub fn is_safe_at(&self, t: Duration) -> bool {
        !self.occupied && self.safe_intervals().any(|interval| interval.contains(t))
    }
}

impl fmt::Display for TimeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TimeLine{}", self.idx)?;
        for interval in &self.intervals {
            if interval.is_safe {
                write!(f, "o Safe Interval     : ")?;
            } else {
                write!(f, "x Collision Interval: ")?;
            }
            writeln!(f, "{interval}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_default_interval() {
        let interval = TimeInterval::default();
        assert_eq!(interval.start, Duration::MAX);
        assert_eq!(interval.end, Duration::MAX);
        assert!(!interval.is_safe);
    }

    #[test]
    fn test_equality_tolerance() {
        let a = TimeInterval::new(secs(1.0), secs(2.0), true);
        let b = TimeInterval::new(secs(1.0) + Duration::from_nanos(5), secs(2.0), false);
        let c = TimeInterval::new(secs(1.0) + Duration::from_nanos(50), secs(2.0), true);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let d = TimeInterval::new(secs(1.0), secs(2.0) + Duration::from_micros(1), true);
        assert_ne!(a, d);
    }

    #[test]
    fn test_unbounded_ends_are_equal() {
        let a = TimeInterval::new(secs(3.0), Duration::MAX, true);
        let b = TimeInterval::new(secs(3.0), Duration::MAX, true);
        let c = TimeInterval::new(secs(3.0), secs(10.0), true);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(TimeInterval::default(), TimeInterval::default());
    }

    #[test]
    fn test_contains_is_half_open() {
        let interval = TimeInterval::new(secs(1.0), secs(2.0), true);
        assert!(interval.contains(secs(1.0)));
        assert!(interval.contains(secs(1.5)));
        assert!(!interval.contains(secs(2.0)));
        assert!(!interval.contains(secs(0.5)));
    }

    #[test]
    fn test_timeline_safety() {
        let mut timeline = TimeLine::new(Index::new(2, 3), false);
        timeline.intervals.push(TimeInterval::new(secs(0.0), secs(1.0), true));
        timeline.intervals.push(TimeInterval::new(secs(1.0), secs(2.5), false));
        timeline.intervals.push(TimeInterval::new(secs(2.5), Duration::MAX, true));

        assert_eq!(timeline.safe_intervals().count(), 2);
        assert!(timeline.is_safe_at(secs(0.5)));
        assert!(!timeline.is_safe_at(secs(1.2)));
        assert!(timeline.is_safe_at(secs(100.0)));

        timeline.occupied = true;
        assert!(!timeline.is_safe_at(secs(0.5)));
    }

    #[test]
    fn test_display() {
        let interval = TimeInterval::new(secs(0.5), secs(2.0), true);
        assert_eq!(format!("{}", interval), "[0.5s, 2s)");

        let mut timeline = TimeLine::new(Index::new(1, 0), false);
        timeline.intervals.push(interval);
        timeline.intervals.push(TimeInterval::new(secs(2.0), secs(3.0), false));
        assert_eq!(
            format!("{}", timeline),
            "TimeLine[1][0]\no Safe Interval     : [0.5s, 2s)\nx Collision Interval: [2s, 3s)\n"
        );
    }
}
