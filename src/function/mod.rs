//! Scale function families: the transform/inverse pairs behind every scale.
//!
//! A [`ScaleFunction`] maps a scale's values into an unnormalized transform
//! space; the position calculator on
//! [`ScaleDefinition`](crate::scale::ScaleDefinition) then rescales that
//! space so the declared domain spans `[0, 1]`. Each family implements the
//! trait as its own struct:
//!
//! - [`Log10`]: plain decimal logarithm (C/D and, via shifted or reversed
//!   domains, the folded and inverted companions)
//! - [`PowerLog`]: `log10(v)/n` for square and cube scales (A/B, K)
//! - [`LogLn`]: `log10(m·ln v)` for the log-log families
//! - [`SinLog`], [`TanLog`], [`SinTanLog`]: trigonometric scales in degrees
//! - [`Linear`]: identity, for the mantissa scale
//! - [`DecadeLog`], [`InvertedDecadeLog`]: multi-cycle electrical scales
//!
//! # Contract
//!
//! For every family, `inverse(transform(v))` recovers `v` within a
//! family-appropriate tolerance (1e-6 for the standard logarithmic families,
//! 1e-3 for the multi-cycle electrical ones), and `transform` is finite and
//! strictly monotonic over any domain a [`ScaleDefinition`] pairs it with.
//! Monotonicity may run in either direction; inverted families decrease.
//!
//! # Examples
//!
//! ```rust
//! use slipstick::function::{Log10, ScaleFunction};
//!
//! let f = Log10;
//! assert!((f.transform(10.0) - 1.0).abs() < 1e-12);
//! assert!((f.inverse(f.transform(3.7)) - 3.7).abs() < 1e-9);
//! ```

use std::fmt;

mod electrical;
mod linear;
mod log;
mod loglog;
mod trig;

pub use electrical::{DecadeLog, InvertedDecadeLog, RECIP_TWO_PI, TWO_PI};
pub use linear::Linear;
pub use log::{Log10, PowerLog};
pub use loglog::LogLn;
pub use trig::{SinLog, SinTanLog, TanLog, DEG_PER_RAD};

/// A scale family's transform/inverse pair.
///
/// Implementations are small value-like structs shared behind
/// `Arc<dyn ScaleFunction>` by scale definitions; all are stateless and
/// therefore trivially `Send + Sync`.
pub trait ScaleFunction: fmt::Debug + Send + Sync {
    /// Family name, used in diagnostics and definition validation errors.
    fn name(&self) -> &'static str;

    /// Map a scale value into transform space.
    fn transform(&self, value: f64) -> f64;

    /// Recover the scale value for a transform-space coordinate.
    fn inverse(&self, t: f64) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Families and a representative in-domain value range for each, used by
    // the shared round-trip and monotonicity checks below.
    fn families() -> Vec<(Box<dyn ScaleFunction>, f64, f64, f64)> {
        vec![
            (Box::new(Log10), 1.0, 10.0, 1e-6),
            (Box::new(PowerLog::new(2)), 1.0, 100.0, 1e-6),
            (Box::new(PowerLog::new(3)), 1.0, 1000.0, 1e-6),
            (Box::new(LogLn::new(1.0)), 2.8, 22026.0, 1e-6),
            (Box::new(LogLn::new(10.0)), 1.11, 2.71, 1e-6),
            (Box::new(LogLn::new(100.0)), 1.0101, 1.105, 1e-6),
            (Box::new(SinLog), 5.74, 90.0, 1e-6),
            (Box::new(TanLog), 5.71, 45.0, 1e-6),
            (Box::new(SinTanLog), 0.573, 5.73, 1e-6),
            (Box::new(Linear), 0.0, 10.0, 1e-9),
            (Box::new(DecadeLog::new(3, TWO_PI)), 0.159155, 159.155, 1e-3),
            (
                Box::new(InvertedDecadeLog::new(3, TWO_PI)),
                0.159155,
                159.155,
                1e-3,
            ),
        ]
    }

    #[test]
    fn test_round_trip_all_families() {
        for (f, lo, hi, tol) in families() {
            for i in 0..=200 {
                let v = lo + (hi - lo) * (i as f64) / 200.0;
                let back = f.inverse(f.transform(v));
                assert!(
                    (back - v).abs() <= tol * v.abs().max(1.0),
                    "{}: round trip of {} gave {}",
                    f.name(),
                    v,
                    back
                );
            }
        }
    }

    #[test]
    fn test_monotonic_all_families() {
        for (f, lo, hi, _) in families() {
            let mut prev = f.transform(lo);
            let increasing = f.transform(hi) > prev;
            for i in 1..=500 {
                let v = lo + (hi - lo) * (i as f64) / 500.0;
                let t = f.transform(v);
                assert!(t.is_finite(), "{}: transform({}) not finite", f.name(), v);
                if increasing {
                    assert!(t > prev, "{}: not increasing at {}", f.name(), v);
                } else {
                    assert!(t < prev, "{}: not decreasing at {}", f.name(), v);
                }
                prev = t;
            }
        }
    }
}
