//! Reservation time windows and the overlap predicate.

use chrono::{DateTime, Utc};

use crate::shared::{DomainError, DomainResult};

/// A `[start, end)` time window. `start <= end` always holds for windows
/// built through [`TimeWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::Validation(format!(
                "window start {} is after its end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Window over stored reservation bounds. Stored bounds were validated
    /// on creation, so no check is repeated here.
    pub(crate) fn stored(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether the two windows share at least one instant. Windows that only
    /// touch (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Conflict test between a requested window and an existing one.
pub fn overlaps(
    request_start: DateTime<Utc>,
    request_end: DateTime<Utc>,
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
) -> bool {
    TimeWindow::stored(request_start, request_end)
        .overlaps(&TimeWindow::stored(existing_start, existing_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
    }

    fn window(from: (u32, u32), to: (u32, u32)) -> TimeWindow {
        TimeWindow::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
    }

    #[test]
    fn touching_boundaries_do_not_overlap() {
        let a = window((10, 0), (11, 0));
        let b = window((11, 0), (12, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_overlaps() {
        let outer = window((10, 0), (12, 0));
        let inner = window((10, 30), (11, 30));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn partial_overlap_on_either_side() {
        let existing = window((10, 30), (12, 0));
        assert!(window((10, 0), (11, 0)).overlaps(&existing));
        assert!(window((11, 0), (13, 0)).overlaps(&existing));
    }

    #[test]
    fn identical_windows_overlap() {
        let a = window((9, 0), (17, 0));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        assert!(!window((8, 0), (9, 0)).overlaps(&window((13, 0), (14, 0))));
    }

    #[test]
    fn overlap_is_symmetric() {
        let windows = [
            window((8, 0), (9, 0)),
            window((8, 30), (10, 0)),
            window((9, 0), (9, 30)),
            window((7, 0), (12, 0)),
            window((10, 0), (10, 0)),
            window((9, 59), (10, 1)),
        ];
        for a in &windows {
            for b in &windows {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn free_function_matches_window_method() {
        assert!(overlaps(at(10, 0), at(12, 0), at(10, 30), at(11, 30)));
        assert!(!overlaps(at(10, 0), at(11, 0), at(11, 0), at(12, 0)));
    }

    #[test]
    fn reversed_window_is_rejected() {
        assert!(matches!(
            TimeWindow::new(at(12, 0), at(10, 0)),
            Err(DomainError::Validation(_))
        ));
    }
}
