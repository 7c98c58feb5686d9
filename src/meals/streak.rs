//! Best in-diet streak over a user's meals in logged order.
//!
//! The scan is pure: the caller supplies the meal flags (ordered by meal id)
//! and the currently stored best, and decides whether to persist the result.

/// Outcome of scanning a meal history against a stored best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakScan {
    /// The larger of the stored best and the longest in-diet run seen.
    pub best: i32,
    /// True only when a run strictly exceeded the stored best.
    pub improved: bool,
}

/// Scans `in_diet` flags in order, starting from `stored_best`.
///
/// A run that only ties `stored_best` does not count as an improvement.
pub fn scan_best_streak<I>(in_diet: I, stored_best: i32) -> StreakScan
where
    I: IntoIterator<Item = bool>,
{
    let mut current = 0;
    let mut scan = StreakScan {
        best: stored_best.max(0),
        improved: false,
    };

    for flag in in_diet {
        if flag {
            current += 1;
            if current > scan.best {
                scan.best = current;
                scan.improved = true;
            }
        } else {
            current = 0;
        }
    }

    scan
}

/// Share of in-diet meals as a percentage rounded to two decimals; 0 with no meals.
pub fn diet_percentage(in_diet: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = in_diet as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
