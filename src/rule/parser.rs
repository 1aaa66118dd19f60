//! Parser for the rule definition notation.
//!
//! A definition names every scale on the instrument, one or two sides
//! separated by `:`, the movable slide bracketed inside each side:
//!
//! ```text
//! (DF [ CF CIF CI C ] D ST)
//! ```
//!
//! Parsing runs an explicit state machine over each side (before-group,
//! inside-group, after-group), resolving every name against the registry
//! and generating the scale on the spot. Errors carry the offending byte
//! span; the first fatal error aborts with no partial assembly.

use std::ops::Range;

use tracing::debug;

use super::lexer::{self, Token};
use super::{ParseError, RuleDimensions, RuleFace, Side, SlideRule, Stator};
use crate::registry;
use crate::scale::GeneratedScale;

/// Parses a rule definition into a fully realized [`SlideRule`].
///
/// Every referenced scale is resolved via the [registry](crate::registry)
/// and tick-generated eagerly at `scale_length`; consumers never trigger
/// recomputation. `dimensions` records the component thicknesses for the
/// rendering layer.
///
/// # Examples
///
/// ```rust
/// use slipstick::rule::{parse_rule, RuleDimensions};
///
/// let rule = parse_rule(
///     "(DF [ CF CIF CI C ] D ST)",
///     250.0,
///     RuleDimensions::new(18.0, 16.0, 18.0),
/// )
/// .unwrap();
///
/// assert_eq!(rule.front().slide().scale_names(), ["CF", "CIF", "CI", "C"]);
/// assert!(rule.back().is_none());
/// ```
pub fn parse_rule(
    input: &str,
    scale_length: f64,
    dimensions: RuleDimensions,
) -> Result<SlideRule, ParseError> {
    let tokens = lexer::tokenize(input)?;

    // Split into sides at top-level separators; a separator nested in a
    // group is its own error.
    let mut sides: Vec<&[(Token, Range<usize>)]> = Vec::new();
    let mut side_start = 0;
    let mut depth = 0usize;
    for (idx, (token, span)) in tokens.iter().enumerate() {
        match token {
            Token::GroupOpen => depth += 1,
            Token::GroupClose => depth = depth.saturating_sub(1),
            Token::SideSeparator => {
                if depth > 0 {
                    return Err(ParseError::SeparatorInsideGroup { span: span.clone() });
                }
                sides.push(&tokens[side_start..idx]);
                side_start = idx + 1;
            }
            Token::Name(_) => {}
        }
    }
    sides.push(&tokens[side_start..]);

    if sides.len() > 2 {
        return Err(ParseError::TooManySides { count: sides.len() });
    }

    let front = parse_side(Side::Front, sides[0], input, scale_length)?;
    let back = match sides.get(1) {
        Some(tokens) => Some(parse_side(Side::Back, tokens, input, scale_length)?),
        None => None,
    };

    debug!(
        sides = sides.len(),
        scale_length, "parsed rule definition"
    );
    Ok(SlideRule::new(front, back, scale_length, dimensions))
}

/// Per-side parser state: which part of the stator/slide/stator triple the
/// next name belongs to.
enum SideState {
    BeforeGroup,
    InsideGroup { open_span: Range<usize> },
    AfterGroup,
}

fn parse_side(
    side: Side,
    tokens: &[(Token, Range<usize>)],
    input: &str,
    scale_length: f64,
) -> Result<RuleFace, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptySide {
            side,
            span: 0..input.len(),
        });
    }

    let mut state = SideState::BeforeGroup;
    let mut top: Vec<GeneratedScale> = Vec::new();
    let mut slide: Vec<GeneratedScale> = Vec::new();
    let mut bottom: Vec<GeneratedScale> = Vec::new();

    for (token, span) in tokens {
        match token {
            Token::Name(name) => {
                let scale = resolve(name, span, scale_length)?;
                match state {
                    SideState::BeforeGroup => top.push(scale),
                    SideState::InsideGroup { .. } => slide.push(scale),
                    SideState::AfterGroup => bottom.push(scale),
                }
            }
            Token::GroupOpen => match state {
                SideState::BeforeGroup => {
                    state = SideState::InsideGroup {
                        open_span: span.clone(),
                    };
                }
                SideState::InsideGroup { .. } => {
                    return Err(ParseError::UnbalancedGroup {
                        side,
                        span: span.clone(),
                    });
                }
                SideState::AfterGroup => {
                    return Err(ParseError::MultipleGroups {
                        side,
                        span: span.clone(),
                    });
                }
            },
            Token::GroupClose => match state {
                SideState::InsideGroup { .. } => state = SideState::AfterGroup,
                SideState::BeforeGroup | SideState::AfterGroup => {
                    return Err(ParseError::UnbalancedGroup {
                        side,
                        span: span.clone(),
                    });
                }
            },
            // Separators were consumed by the side split.
            Token::SideSeparator => unreachable!("separator inside side tokens"),
        }
    }

    match state {
        SideState::BeforeGroup => {
            let span = tokens.first().unwrap().1.start..tokens.last().unwrap().1.end;
            Err(ParseError::MissingGroup { side, span })
        }
        SideState::InsideGroup { open_span } => Err(ParseError::UnbalancedGroup {
            side,
            span: open_span,
        }),
        SideState::AfterGroup => Ok(RuleFace::new(
            Stator::new(top),
            super::Slide::new(slide),
            Stator::new(bottom),
        )),
    }
}

fn resolve(
    name: &str,
    span: &Range<usize>,
    scale_length: f64,
) -> Result<GeneratedScale, ParseError> {
    let factory = registry::lookup(name).ok_or_else(|| ParseError::UnknownScale {
        name: name.to_string(),
        span: span.clone(),
    })?;
    let definition = factory(scale_length).map_err(|source| ParseError::Definition {
        name: name.to_string(),
        source,
    })?;
    GeneratedScale::new(definition).map_err(|source| ParseError::Definition {
        name: name.to_string(),
        source,
    })
}
