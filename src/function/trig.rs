use super::ScaleFunction;

/// Degrees per radian, fixed at the value engraved on historical rules.
/// Kept verbatim; never recomputed from π.
pub const DEG_PER_RAD: f64 = 57.29578;

/// Sine scale: `f(θ) = log10(10 · sin θ°)`.
///
/// Spans `[0, 1]` over the S domain `[5.74°, 90°]`; the factor of 10 lifts
/// `sin 5.74° ≈ 0.1` to the decade start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinLog;

impl ScaleFunction for SinLog {
    fn name(&self) -> &'static str {
        "sin-log"
    }

    fn transform(&self, value: f64) -> f64 {
        (10.0 * value.to_radians().sin()).log10()
    }

    fn inverse(&self, t: f64) -> f64 {
        (10f64.powf(t) / 10.0).asin().to_degrees()
    }
}

/// Tangent scale: `f(θ) = log10(10 · tan θ°)`.
///
/// Spans `[0, 1]` over the T domain `[5.71°, 45°]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TanLog;

impl ScaleFunction for TanLog {
    fn name(&self) -> &'static str {
        "tan-log"
    }

    fn transform(&self, value: f64) -> f64 {
        (10.0 * value.to_radians().tan()).log10()
    }

    fn inverse(&self, t: f64) -> f64 {
        (10f64.powf(t) / 10.0).atan().to_degrees()
    }
}

/// Small-angle scale: `f(θ) = log10(100 · θ° / 57.29578)`.
///
/// Below about 6° the sine and tangent agree with the radian measure to
/// better than a part in a thousand, so the ST scale reads both at once.
/// Uses the engraved [`DEG_PER_RAD`] constant rather than the trig
/// functions, matching the historical graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinTanLog;

impl ScaleFunction for SinTanLog {
    fn name(&self) -> &'static str {
        "sin-tan-log"
    }

    fn transform(&self, value: f64) -> f64 {
        (100.0 * value / DEG_PER_RAD).log10()
    }

    fn inverse(&self, t: f64) -> f64 {
        10f64.powf(t) * DEG_PER_RAD / 100.0
    }
}
