//! Quantity units and rounding

/// 1 nugget = 5 metal units
pub const METAL_UNITS_PER_NUGGET: f64 = 5.0;

/// 1 ingot = 20 nuggets
pub const NUGGETS_PER_INGOT: f64 = 20.0;

pub fn metal_units_to_nuggets(metal_units: f64) -> f64 {
    metal_units / METAL_UNITS_PER_NUGGET
}

pub fn nuggets_to_metal_units(nuggets: f64) -> f64 {
    nuggets * METAL_UNITS_PER_NUGGET
}

/// Rounds halves towards positive infinity, so `-2.5` becomes `-2`.
///
/// `f64::round` rounds halves away from zero, which would shift the
/// remainder absorbed by the last component whenever a share is negative.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Nugget count for a component holding `percent` of `total_nuggets`,
/// taken through metal units and back as the result display does
pub fn displayed_nuggets(total_nuggets: f64, percent: f64) -> i64 {
    let metal_units = nuggets_to_metal_units(total_nuggets) * (percent / 100.0);
    round_half_up(metal_units / METAL_UNITS_PER_NUGGET) as i64
}

/// Whole-ingot approximation of a nugget total
pub fn approx_ingots(total_nuggets: f64) -> i64 {
    round_half_up(total_nuggets / NUGGETS_PER_INGOT) as i64
}
