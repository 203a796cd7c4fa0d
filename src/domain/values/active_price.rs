//! Active price selection.
//!
//! Used-market averages reflect what people actually pay today, so they win.
//! New-market prices are next best. Launch MSRP is a last resort, often
//! years stale but better than nothing for ranking.

/// Products whose active price lands at or below this are treated as
/// unpriced (broken/free-tier data) and excluded from value output.
pub const MIN_ACTIVE_PRICE: f64 = 50.0;

/// First-available waterfall: used average, else new average, else launch
/// MSRP, else no price at all. Pure; persistence is the caller's business.
pub fn active_price(
    used_avg: Option<f64>,
    new_avg: Option<f64>,
    launch_price: Option<f64>,
) -> Option<f64> {
    used_avg.or(new_avg).or(launch_price)
}

/// Whether an active price qualifies the product for tiering/value output.
pub fn is_priced(active: Option<f64>) -> bool {
    matches!(active, Some(p) if p > MIN_ACTIVE_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_wins_over_all() {
        assert_eq!(active_price(Some(430.0), Some(649.0), Some(699.0)), Some(430.0));
    }

    #[test]
    fn test_new_when_no_used() {
        assert_eq!(active_price(None, Some(250.0), Some(399.0)), Some(250.0));
    }

    #[test]
    fn test_launch_as_last_resort() {
        assert_eq!(active_price(None, None, Some(399.0)), Some(399.0));
    }

    #[test]
    fn test_all_absent() {
        assert_eq!(active_price(None, None, None), None);
    }

    #[test]
    fn test_floor_excludes_suspect_prices() {
        assert!(!is_priced(None));
        assert!(!is_priced(Some(0.0)));
        assert!(!is_priced(Some(50.0)));
        assert!(is_priced(Some(50.01)));
    }
}
