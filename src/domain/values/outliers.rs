//! Statistical rejection of implausible prices.
//!
//! Listings under the floor are almost always accessories, empty boxes, or
//! scams rather than working cards. The used market additionally sees
//! inflated collector/scalper listings that would drag the average up.

use crate::domain::values::channel::Channel;

#[derive(Debug, Clone)]
pub struct OutlierPolicy {
    /// Prices at or below this are treated as non-cards (cables, boxes,
    /// "for parts" leftovers that slipped past the text filter).
    pub price_floor: f64,
    /// Used-market only: prices above `ratio × mean` of the sample are
    /// rejected as outliers.
    pub used_ceiling_ratio: f64,
}

impl Default for OutlierPolicy {
    fn default() -> Self {
        Self {
            price_floor: 50.0,
            used_ceiling_ratio: 2.0,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Retain the prices plausible enough to average for `channel`.
///
/// The used-market ceiling is computed from the mean of the *unfiltered*
/// input sample, so extreme highs inflate their own cutoff. This matches
/// the upstream data pipeline's established behavior; revisiting the basis
/// would change stored averages.
///
/// Returns an empty vec when nothing survives; callers must treat that as
/// "no valid data", not as an average of zero.
pub fn retain_plausible(prices: &[f64], channel: Channel, policy: &OutlierPolicy) -> Vec<f64> {
    if prices.is_empty() {
        return Vec::new();
    }

    let ceiling = match channel {
        Channel::Used => Some(policy.used_ceiling_ratio * mean(prices)),
        _ => None,
    };

    prices
        .iter()
        .copied()
        .filter(|p| *p >= policy.price_floor)
        .filter(|p| ceiling.map_or(true, |c| *p <= c))
        .collect()
}

/// Average of the retained prices, rounded to cents, or `None` when no
/// valid data remains after rejection.
pub fn channel_average(prices: &[f64], channel: Channel, policy: &OutlierPolicy) -> Option<f64> {
    let retained = retain_plausible(prices, channel, policy);
    if retained.is_empty() {
        return None;
    }
    Some((mean(&retained) * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OutlierPolicy {
        OutlierPolicy::default()
    }

    #[test]
    fn test_floor_applies_to_all_channels() {
        let prices = [10.0, 300.0, 25.0, 310.0];
        let kept = retain_plausible(&prices, Channel::New, &policy());
        assert_eq!(kept, vec![300.0, 310.0]);
    }

    #[test]
    fn test_used_ceiling_rejects_scalper_listing() {
        // Mean of [300, 310, 290, 10000] is 2725; ceiling 5450.
        let prices = [300.0, 310.0, 290.0, 10000.0];
        let kept = retain_plausible(&prices, Channel::Used, &policy());
        assert_eq!(kept, vec![300.0, 310.0, 290.0]);
    }

    #[test]
    fn test_new_channel_has_no_ceiling() {
        let prices = [300.0, 310.0, 290.0, 10000.0];
        let kept = retain_plausible(&prices, Channel::New, &policy());
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_total_rejection_is_no_data() {
        let prices = [5.0, 12.0, 49.99];
        assert!(retain_plausible(&prices, Channel::Used, &policy()).is_empty());
        assert_eq!(channel_average(&prices, Channel::Used, &policy()), None);
    }

    #[test]
    fn test_average_rounds_to_cents() {
        let prices = [100.0, 100.0, 100.01];
        // Mean 100.003... rounds to 100.00
        assert_eq!(
            channel_average(&prices, Channel::New, &policy()),
            Some(100.0)
        );
    }

    #[test]
    fn test_ceiling_uses_unfiltered_mean() {
        // A sub-floor price still drags the mean (and therefore the
        // ceiling) down, because the ceiling is computed pre-rejection.
        let prices = [1.0, 100.0, 210.0];
        // Unfiltered mean ~103.67, ceiling ~207.3; the 210 is rejected
        // even though the mean of floor-filtered prices would admit it.
        let kept = retain_plausible(&prices, Channel::Used, &policy());
        assert_eq!(kept, vec![100.0]);
    }
}
