use crate::numeric::clamp_score;

pub const LONGEVITY_WEIGHT: f64 = 0.35;
pub const DISSATISFACTION_WEIGHT: f64 = 0.35;
pub const MISALIGNMENT_WEIGHT: f64 = 0.30;
pub const SATURATION_PENALTY: f64 = 0.15;

/// Weighted combination of the component scores with saturation as a penalty.
pub fn opportunity_score(
    longevity: f64,
    dissatisfaction: f64,
    misalignment: f64,
    saturation: f64,
) -> f64 {
    let raw = LONGEVITY_WEIGHT * longevity
        + DISSATISFACTION_WEIGHT * dissatisfaction
        + MISALIGNMENT_WEIGHT * misalignment
        - SATURATION_PENALTY * saturation;
    clamp_score(raw)
}
