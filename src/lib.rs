//! Slide rule calculation engine
//!
//! `slipstick` is the deterministic core of a slide rule instrument: it
//! maps each scale's mathematical function onto a normalized coordinate
//! space, generates complete leveled tick sequences, and parses a compact
//! rule notation into a ready-to-render instrument. Rendering, cursor
//! interaction, and persistence live entirely in consuming layers.
//!
//! # Core Concepts
//!
//! ## Scale Functions
//!
//! Every scale family is a [`function::ScaleFunction`]: a pure
//! transform/inverse pair, strictly monotonic over its domain. The library
//! covers the classic catalog: plain and fractional-power logarithms,
//! log-log, trigonometric, linear, and the multi-cycle and inverted
//! electrical families.
//!
//! ## Scale Definitions and Positions
//!
//! A [`scale::ScaleDefinition`] pairs a function with a domain, a physical
//! length, and the subsection hierarchy that drives tick generation.
//! [`ScaleDefinition::normalize`](scale::ScaleDefinition::normalize) maps a
//! value to its position in `[0, 1]` (out-of-domain values extrapolate
//! rather than clamp); `denormalize` is the exact inverse, which is how a
//! cursor reading becomes a value.
//!
//! ## Tick Generation
//!
//! [`scale::GeneratedScale`] computes the full tick sequence eagerly at
//! construction: ordered, deduplicated, leveled coarsest→finest, labeled
//! on the eligible levels. Iteration happens on an integer lattice so
//! subsection seams are exact, with no doubled and no missing marks.
//!
//! ## Rule Definitions
//!
//! [`rule::parse_rule`] turns the one-line rule notation into a
//! [`rule::SlideRule`]: scale names in order, the movable slide bracketed,
//! an optional second side after a colon. Names resolve through the
//! [`registry`], which carries the standard catalog.
//!
//! # Examples
//!
//! ## Reading positions off a scale
//!
//! ```rust
//! use slipstick::registry;
//! use slipstick::scale::GeneratedScale;
//!
//! let def = registry::lookup("C").unwrap()(250.0).unwrap();
//! let c = GeneratedScale::new(def).unwrap();
//!
//! // log10(2) of the way along the rule.
//! let position = c.normalize(2.0);
//! assert!((position - 0.30103).abs() < 1e-5);
//!
//! // And back again: the cursor sits at 2.0.
//! assert!((c.denormalize(position) - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Walking a generated tick sequence
//!
//! ```rust
//! use slipstick::registry;
//! use slipstick::scale::GeneratedScale;
//!
//! let def = registry::lookup("D").unwrap()(250.0).unwrap();
//! let d = GeneratedScale::new(def).unwrap();
//!
//! let units: Vec<f64> = d
//!     .ticks()
//!     .iter()
//!     .filter(|t| t.level == 0)
//!     .map(|t| t.value)
//!     .collect();
//! assert_eq!(units.first(), Some(&1.0));
//! assert_eq!(units.last(), Some(&10.0));
//! ```
//!
//! ## Parsing a complete instrument
//!
//! ```rust
//! use slipstick::rule::{parse_rule, RuleDimensions};
//!
//! let rule = parse_rule(
//!     "(DF [ CF CIF CI C ] D ST)",
//!     250.0,
//!     RuleDimensions::new(18.0, 16.0, 18.0),
//! )
//! .unwrap();
//!
//! assert_eq!(rule.front().top().scale_names(), ["DF"]);
//! assert_eq!(rule.front().bottom().scale_names(), ["D", "ST"]);
//! ```

pub mod function;
pub mod registry;
pub mod rule;
pub mod scale;

pub use function::ScaleFunction;
pub use rule::{parse_rule, ParseError, RuleDimensions, SlideRule};
pub use scale::{
    DefinitionError, GeneratedScale, GeneratorConfig, Layout, ScaleDefinition, Subsection,
    TickMark,
};
