//! Rule definitions: the instrument DSL and the assembled value.
//!
//! A complete instrument is described by a one-line notation (scale names
//! in order, the movable slide bracketed, an optional second side after a
//! colon) and parsed into a [`SlideRule`]: stator/slide/stator triples of
//! pre-generated scales, immutable and ready for the rendering layer.
//!
//! ```text
//! DF [ CF CIF CI C ] D ST          one-sided rule
//! A [ B ] C : D [ CI ] K          two-sided rule
//! ```
//!
//! See [`parse_rule`] for the entry point.

mod lexer;
mod parser;

pub use lexer::{tokenize, Token};
pub use parser::parse_rule;

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scale::{DefinitionError, GeneratedScale};

/// Which side of a two-sided instrument an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => write!(f, "front"),
            Side::Back => write!(f, "back"),
        }
    }
}

/// Rejection raised while parsing a rule definition.
///
/// Every variant carries the byte span of the offending input so callers
/// can point at the problem. Parsing halts at the first fatal error; there
/// is no partial assembly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A character no token rule matches.
    #[error("unexpected input '{fragment}' at {span:?}")]
    UnexpectedCharacter { fragment: String, span: Range<usize> },

    /// A name token the registry does not know.
    #[error("unknown scale '{name}' at {span:?}")]
    UnknownScale { name: String, span: Range<usize> },

    /// `[`/`]` misuse: unclosed, stray, or nested group delimiters.
    #[error("{side} side: unbalanced slide group delimiters at {span:?}")]
    UnbalancedGroup { side: Side, span: Range<usize> },

    /// A side with no slide group at all.
    #[error("{side} side has no slide group")]
    MissingGroup { side: Side, span: Range<usize> },

    /// A second slide group on one side.
    #[error("{side} side declares more than one slide group at {span:?}")]
    MultipleGroups { side: Side, span: Range<usize> },

    /// A side separator nested inside a slide group.
    #[error("side separator inside a slide group at {span:?}")]
    SeparatorInsideGroup { span: Range<usize> },

    /// A side with no tokens.
    #[error("{side} side is empty")]
    EmptySide { side: Side, span: Range<usize> },

    /// More than two sides.
    #[error("expected at most two sides, found {count}")]
    TooManySides { count: usize },

    /// A referenced scale failed definition validation or generation.
    #[error("scale '{name}' could not be realized")]
    Definition {
        name: String,
        #[source]
        source: DefinitionError,
    },
}

/// Component thicknesses of the instrument, in the same linear unit as the
/// scale length. Recorded on the assembly for the rendering layer; the
/// core itself does no layout with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleDimensions {
    /// Thickness of the fixed top stator.
    pub top_stator: f64,
    /// Thickness of the movable slide.
    pub slide: f64,
    /// Thickness of the fixed bottom stator.
    pub bottom_stator: f64,
}

impl RuleDimensions {
    /// Creates a dimension configuration.
    pub const fn new(top_stator: f64, slide: f64, bottom_stator: f64) -> Self {
        Self {
            top_stator,
            slide,
            bottom_stator,
        }
    }
}

/// Fixed portion of the instrument holding an ordered list of scales.
#[derive(Debug, Clone)]
pub struct Stator {
    scales: Vec<GeneratedScale>,
}

impl Stator {
    /// Creates a stator from its scales, top to bottom.
    pub fn new(scales: Vec<GeneratedScale>) -> Self {
        Self { scales }
    }

    /// The scales, in declared order.
    pub fn scales(&self) -> &[GeneratedScale] {
        &self.scales
    }

    /// Names of the scales, in declared order.
    pub fn scale_names(&self) -> Vec<&str> {
        self.scales.iter().map(GeneratedScale::name).collect()
    }
}

/// Movable portion of the instrument holding an ordered list of scales.
#[derive(Debug, Clone)]
pub struct Slide {
    scales: Vec<GeneratedScale>,
}

impl Slide {
    /// Creates a slide from its scales, top to bottom.
    pub fn new(scales: Vec<GeneratedScale>) -> Self {
        Self { scales }
    }

    /// The scales, in declared order.
    pub fn scales(&self) -> &[GeneratedScale] {
        &self.scales
    }

    /// Names of the scales, in declared order.
    pub fn scale_names(&self) -> Vec<&str> {
        self.scales.iter().map(GeneratedScale::name).collect()
    }
}

/// One face of the instrument: top stator, slide, bottom stator.
#[derive(Debug, Clone)]
pub struct RuleFace {
    top: Stator,
    slide: Slide,
    bottom: Stator,
}

impl RuleFace {
    /// Assembles a face from its three components.
    pub fn new(top: Stator, slide: Slide, bottom: Stator) -> Self {
        Self { top, slide, bottom }
    }

    /// The fixed top stator.
    pub fn top(&self) -> &Stator {
        &self.top
    }

    /// The movable slide.
    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    /// The fixed bottom stator.
    pub fn bottom(&self) -> &Stator {
        &self.bottom
    }

    /// All scales on this face, top stator first, slide, then bottom.
    pub fn scales(&self) -> impl Iterator<Item = &GeneratedScale> {
        self.top
            .scales()
            .iter()
            .chain(self.slide.scales())
            .chain(self.bottom.scales())
    }
}

/// A complete, immutable instrument.
///
/// Built once by [`parse_rule`] (or assembled programmatically); every
/// scale is pre-generated, so the value is ready to render or read from
/// with no further computation. Freely shareable across threads.
#[derive(Debug, Clone)]
pub struct SlideRule {
    front: RuleFace,
    back: Option<RuleFace>,
    scale_length: f64,
    dimensions: RuleDimensions,
}

impl SlideRule {
    /// Assembles an instrument from parsed or hand-built faces.
    pub fn new(
        front: RuleFace,
        back: Option<RuleFace>,
        scale_length: f64,
        dimensions: RuleDimensions,
    ) -> Self {
        Self {
            front,
            back,
            scale_length,
            dimensions,
        }
    }

    /// The front face.
    pub fn front(&self) -> &RuleFace {
        &self.front
    }

    /// The back face of a two-sided rule.
    pub fn back(&self) -> Option<&RuleFace> {
        self.back.as_ref()
    }

    /// Physical scale length, in the instrument's linear unit.
    pub fn scale_length(&self) -> f64 {
        self.scale_length
    }

    /// Component thicknesses.
    pub fn dimensions(&self) -> RuleDimensions {
        self.dimensions
    }

    /// Finds a scale by name, searching the front face then the back.
    pub fn find_scale(&self, name: &str) -> Option<&GeneratedScale> {
        self.front
            .scales()
            .chain(self.back.iter().flat_map(RuleFace::scales))
            .find(|scale| scale.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_scale_searches_both_faces() {
        let rule = parse_rule(
            "A [ B ] C : D [ CI ] K",
            250.0,
            RuleDimensions::new(18.0, 16.0, 18.0),
        )
        .unwrap();
        assert_eq!(rule.find_scale("B").unwrap().name(), "B");
        assert_eq!(rule.find_scale("K").unwrap().name(), "K");
        assert!(rule.find_scale("LL3").is_none());
    }

    #[test]
    fn test_slide_rule_is_send_and_sync() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<SlideRule>();
    }
}
