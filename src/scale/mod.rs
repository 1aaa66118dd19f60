//! Scale definitions, validation, and the value↔position calculator.
//!
//! A [`ScaleDefinition`] declares everything the engine needs to know about
//! one scale: its [`ScaleFunction`], its domain (`begin_value` at normalized
//! position 0, `end_value` at position 1), its physical length, its layout,
//! and the [`Subsection`] list that drives tick generation.
//!
//! Definitions are immutable once constructed and validation is exhaustive:
//! a `ScaleDefinition` that exists is well-formed, and a
//! [`GeneratedScale`] built from it carries the complete tick sequence,
//! computed eagerly and never mutated.
//!
//! # Position Calculator
//!
//! [`ScaleDefinition::normalize`] maps a value to its normalized position;
//! [`ScaleDefinition::denormalize`] is the exact algebraic inverse. Both are
//! pure and O(1), and neither clamps: out-of-domain queries are legal
//! extrapolations that return positions outside `[0, 1]`.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use slipstick::function::Log10;
//! use slipstick::scale::{ScaleDefinition, Subsection};
//!
//! let def = ScaleDefinition::new(
//!     "C",
//!     "x",
//!     Arc::new(Log10),
//!     1.0,
//!     10.0,
//!     250.0,
//!     vec![Subsection::new(1.0, vec![Some(1.0), Some(0.1)])],
//! )
//! .unwrap();
//!
//! // The geometric midpoint of one decade sits at the physical middle.
//! assert!((def.normalize(10f64.sqrt()) - 0.5).abs() < 1e-12);
//! // Out-of-domain values extrapolate rather than clamp.
//! assert!(def.normalize(20.0) > 1.0);
//! ```

pub(crate) mod util;

mod generated;
mod ticks;

pub use generated::{GeneratedScale, PositionedConstant};
pub use ticks::{GeneratorConfig, TickMark};

use crate::function::ScaleFunction;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Physical arrangement of a scale.
///
/// Circular scales wrap: normalized position 1 coincides with position 0,
/// and the tick generator suppresses the seam tick so the mark is not drawn
/// twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// Straight scale on a linear rule.
    #[default]
    Linear,
    /// Closed scale on a circular rule; the two ends meet.
    Circular,
}

/// A labeled gauge mark (π, e, …) engraved on a scale outside the regular
/// tick lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConstant {
    /// Engraved label, e.g. `"π"`.
    pub label: String,
    /// The marked value.
    pub value: f64,
}

impl ScaleConstant {
    /// Creates a labeled constant.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A contiguous value sub-range with its own tick-interval hierarchy.
///
/// `tick_intervals` runs coarsest→finest; slot position encodes the
/// hierarchy level, so a skipped level is an explicit `None`, never an
/// omitted slot. A subsection's effective end is the next subsection's
/// start (exclusive) or, for the last subsection, the domain's upper bound
/// (inclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    start_value: f64,
    tick_intervals: Vec<Option<f64>>,
    label_precision: Option<u32>,
}

impl Subsection {
    /// Creates a subsection starting at `start_value` with the given
    /// interval hierarchy.
    pub fn new(start_value: f64, tick_intervals: Vec<Option<f64>>) -> Self {
        Self {
            start_value,
            tick_intervals,
            label_precision: None,
        }
    }

    /// Overrides the label decimal count for ticks in this subsection.
    pub fn with_label_precision(mut self, decimals: u32) -> Self {
        self.label_precision = Some(decimals);
        self
    }

    /// Inclusive start of the sub-range.
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    /// The interval hierarchy, coarsest→finest.
    pub fn tick_intervals(&self) -> &[Option<f64>] {
        &self.tick_intervals
    }

    /// Per-subsection label precision override, if any.
    pub fn label_precision(&self) -> Option<u32> {
        self.label_precision
    }

    /// Smallest declared interval, or `None` if every level is absent.
    pub fn finest_interval(&self) -> Option<f64> {
        self.tick_intervals
            .iter()
            .flatten()
            .copied()
            .fold(None, |acc: Option<f64>, iv| match acc {
                Some(best) if best <= iv => Some(best),
                _ => Some(iv),
            })
    }
}

/// Rejection raised while constructing a [`ScaleDefinition`] or generating
/// its ticks. A definition is never partially built: the first violation
/// aborts construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    /// `begin_value == end_value`.
    #[error("scale '{name}': begin and end values are both {value}")]
    DegenerateDomain { name: String, value: f64 },

    /// The function maps both domain ends to the same coordinate.
    #[error("scale '{name}': function '{function}' collapses the domain to a point")]
    DegenerateTransform { name: String, function: String },

    /// The function produced a non-finite coordinate inside the domain.
    #[error("scale '{name}': function '{function}' is not finite at {value}")]
    NonFiniteTransform {
        name: String,
        function: String,
        value: f64,
    },

    /// The function reverses direction inside the domain.
    #[error("scale '{name}': function '{function}' is not monotonic near {value}")]
    NonMonotonic {
        name: String,
        function: String,
        value: f64,
    },

    /// `scale_length <= 0`.
    #[error("scale '{name}': scale length must be positive, got {length}")]
    NonPositiveLength { name: String, length: f64 },

    /// The subsection list is empty.
    #[error("scale '{name}': subsection list is empty")]
    NoSubsections { name: String },

    /// A subsection starts outside the numeric domain.
    #[error("scale '{name}': subsection start {start} outside domain [{lo}, {hi}]")]
    SubsectionOutOfDomain {
        name: String,
        start: f64,
        lo: f64,
        hi: f64,
    },

    /// Two subsections share a start value.
    #[error("scale '{name}': duplicate subsection start {start}")]
    DuplicateSubsection { name: String, start: f64 },

    /// The first subsection starts after the domain's lower bound, leaving
    /// part of the domain uncovered.
    #[error("scale '{name}': domain uncovered below first subsection start {start}")]
    UncoveredDomain { name: String, start: f64 },

    /// A declared tick interval is zero or negative. Rejected here so the
    /// generator can never be handed a non-terminating sweep.
    #[error("scale '{name}': non-positive tick interval {interval}")]
    NonPositiveInterval { name: String, interval: f64 },

    /// Declared intervals do not run coarsest→finest.
    #[error("scale '{name}': interval {interval} is coarser than the level above it ({previous})")]
    MisorderedIntervals {
        name: String,
        previous: f64,
        interval: f64,
    },

    /// An interval does not land on an integer lattice coordinate under the
    /// configured precision factor.
    #[error("scale '{name}': interval {interval} not representable on the tick lattice")]
    UnrepresentableInterval { name: String, interval: f64 },
}

/// Immutable description of one scale.
///
/// See the [module docs](self) for the data model; construction via
/// [`ScaleDefinition::new`] validates every declared property and returns a
/// [`DefinitionError`] on the first violation.
#[derive(Debug, Clone)]
pub struct ScaleDefinition {
    name: String,
    formula: String,
    function: Arc<dyn ScaleFunction>,
    begin_value: f64,
    end_value: f64,
    scale_length: f64,
    layout: Layout,
    subsections: Vec<Subsection>,
    constants: Vec<ScaleConstant>,
    label_precision: Option<u32>,
    label_levels: u8,
}

/// Sample count for the construction-time monotonicity check.
const MONOTONICITY_SAMPLES: u32 = 256;

impl ScaleDefinition {
    /// Creates and validates a scale definition.
    ///
    /// `begin_value` is the value at normalized position 0 and `end_value`
    /// the value at position 1; an inverted scale simply declares
    /// `begin_value > end_value`. Subsections may be passed in any order
    /// (they are sorted ascending by start value) but must collectively
    /// cover the numeric domain from its lower bound.
    ///
    /// By default only level-0 ticks are labeled; adjust with
    /// [`with_label_levels`](Self::with_label_levels).
    pub fn new(
        name: impl Into<String>,
        formula: impl Into<String>,
        function: Arc<dyn ScaleFunction>,
        begin_value: f64,
        end_value: f64,
        scale_length: f64,
        mut subsections: Vec<Subsection>,
    ) -> Result<Self, DefinitionError> {
        subsections.sort_by(|a, b| {
            a.start_value
                .partial_cmp(&b.start_value)
                .expect("subsection starts are ordered floats")
        });
        let def = Self {
            name: name.into(),
            formula: formula.into(),
            function,
            begin_value,
            end_value,
            scale_length,
            layout: Layout::Linear,
            subsections,
            constants: Vec::new(),
            label_precision: None,
            label_levels: 1,
        };
        def.validate()?;
        Ok(def)
    }

    /// Sets the physical layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Adds a labeled gauge mark.
    pub fn with_constant(mut self, label: impl Into<String>, value: f64) -> Self {
        self.constants.push(ScaleConstant::new(label, value));
        self
    }

    /// Overrides the label decimal count for the whole scale.
    pub fn with_label_precision(mut self, decimals: u32) -> Self {
        self.label_precision = Some(decimals);
        self
    }

    /// Sets how many hierarchy levels receive labels (ticks with
    /// `level < label_levels` are labeled).
    pub fn with_label_levels(mut self, levels: u8) -> Self {
        self.label_levels = levels;
        self
    }

    /// Scale name as printed on the rule (`"C"`, `"LL3"`, …).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Formula label (`"x"`, `"x^2"`, `"sin x"`, …).
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// The scale's transform/inverse pair.
    pub fn function(&self) -> &Arc<dyn ScaleFunction> {
        &self.function
    }

    /// Value at normalized position 0.
    pub fn begin_value(&self) -> f64 {
        self.begin_value
    }

    /// Value at normalized position 1.
    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    /// Physical length, in the instrument's linear unit.
    pub fn scale_length(&self) -> f64 {
        self.scale_length
    }

    /// Physical layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Subsections, ascending by start value.
    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }

    /// Labeled gauge marks.
    pub fn constants(&self) -> &[ScaleConstant] {
        &self.constants
    }

    /// Scale-wide label precision override, if any.
    pub fn label_precision(&self) -> Option<u32> {
        self.label_precision
    }

    /// Number of hierarchy levels that receive labels.
    pub fn label_levels(&self) -> u8 {
        self.label_levels
    }

    /// Maps a value to its normalized position.
    ///
    /// `(f(value) - f(begin)) / (f(end) - f(begin))`.
    ///
    /// NOTE: Intentionally no clamping here; out-of-domain values map to
    /// positions below 0 or above 1 so the consumer can decide how to
    /// handle them.
    pub fn normalize(&self, value: f64) -> f64 {
        let (f0, f1) = self.transform_span();
        (self.function.transform(value) - f0) / (f1 - f0)
    }

    /// Maps a normalized position back to the value found there.
    ///
    /// Exact algebraic inverse of [`normalize`](Self::normalize) up to
    /// floating-point precision; like it, unclamped.
    pub fn denormalize(&self, position: f64) -> f64 {
        let (f0, f1) = self.transform_span();
        self.function.inverse(f0 + position * (f1 - f0))
    }

    fn transform_span(&self) -> (f64, f64) {
        (
            self.function.transform(self.begin_value),
            self.function.transform(self.end_value),
        )
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        let name = || self.name.clone();

        if self.scale_length <= 0.0 {
            return Err(DefinitionError::NonPositiveLength {
                name: name(),
                length: self.scale_length,
            });
        }
        if self.begin_value == self.end_value {
            return Err(DefinitionError::DegenerateDomain {
                name: name(),
                value: self.begin_value,
            });
        }

        let (f0, f1) = self.transform_span();
        for (bound, f) in [(self.begin_value, f0), (self.end_value, f1)] {
            if !f.is_finite() {
                return Err(DefinitionError::NonFiniteTransform {
                    name: name(),
                    function: self.function.name().to_string(),
                    value: bound,
                });
            }
        }
        if f0 == f1 {
            return Err(DefinitionError::DegenerateTransform {
                name: name(),
                function: self.function.name().to_string(),
            });
        }

        if self.subsections.is_empty() {
            return Err(DefinitionError::NoSubsections { name: name() });
        }

        let (lo, hi) = util::sorted_pair(self.begin_value, self.end_value);
        for (idx, sub) in self.subsections.iter().enumerate() {
            let start = sub.start_value;
            if !(lo..=hi).contains(&start) {
                return Err(DefinitionError::SubsectionOutOfDomain {
                    name: name(),
                    start,
                    lo,
                    hi,
                });
            }
            if idx > 0 && self.subsections[idx - 1].start_value == start {
                return Err(DefinitionError::DuplicateSubsection {
                    name: name(),
                    start,
                });
            }

            let mut previous: Option<f64> = None;
            for interval in sub.tick_intervals.iter().flatten() {
                if *interval <= 0.0 {
                    return Err(DefinitionError::NonPositiveInterval {
                        name: name(),
                        interval: *interval,
                    });
                }
                if let Some(prev) = previous {
                    if *interval > prev {
                        return Err(DefinitionError::MisorderedIntervals {
                            name: name(),
                            previous: prev,
                            interval: *interval,
                        });
                    }
                }
                previous = Some(*interval);
            }
        }
        // Coverage: the lower bound must belong to the first subsection.
        let first_start = self.subsections[0].start_value;
        if first_start != lo {
            return Err(DefinitionError::UncoveredDomain {
                name: name(),
                start: first_start,
            });
        }

        self.check_monotonic(lo, hi)
    }

    /// Sampled strict-monotonicity check across the numeric domain.
    fn check_monotonic(&self, lo: f64, hi: f64) -> Result<(), DefinitionError> {
        let mut prev = self.function.transform(lo);
        let increasing = self.function.transform(hi) > prev;
        for i in 1..=MONOTONICITY_SAMPLES {
            let v = lo + (hi - lo) * f64::from(i) / f64::from(MONOTONICITY_SAMPLES);
            let t = self.function.transform(v);
            if !t.is_finite() {
                return Err(DefinitionError::NonFiniteTransform {
                    name: self.name.clone(),
                    function: self.function.name().to_string(),
                    value: v,
                });
            }
            let ordered = if increasing { t > prev } else { t < prev };
            if !ordered {
                return Err(DefinitionError::NonMonotonic {
                    name: self.name.clone(),
                    function: self.function.name().to_string(),
                    value: v,
                });
            }
            prev = t;
        }
        Ok(())
    }
}
