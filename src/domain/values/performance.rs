//! Frame-rate estimation and cost-per-frame math.

use crate::domain::values::resolution::{AnchorFps, Resolution};

/// Linear scale from the baseline device: a card at 100% relative
/// performance hits the anchor frame rate exactly.
pub fn estimated_fps(rel_performance: f64, resolution: Resolution, anchors: &AnchorFps) -> f64 {
    (rel_performance / 100.0) * resolution.anchor_fps(anchors)
}

/// Dollars per frame at a resolution; lower is better value. `None` when
/// the estimated frame rate is zero or the division is not a usable
/// number: an undefined value must never leak into ranking as 0 or
/// infinity.
pub fn cost_per_frame(active_price: f64, fps: f64) -> Option<f64> {
    if fps <= 0.0 {
        return None;
    }
    let value = active_price / fps;
    value.is_finite().then_some(value)
}
