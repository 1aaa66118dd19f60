//! Tick mark generation.
//!
//! The generator sweeps each subsection on an integer lattice: bounds and
//! intervals are scaled by a fixed precision factor so the iteration happens
//! in exact integer arithmetic, immune to floating-point drift. Levels are
//! assigned by a coarsest-first divisibility test on the absolute lattice
//! position, and a real-valued containment re-check against the subsection
//! bounds is the authoritative arbiter at the edges.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::util;
use super::{DefinitionError, Layout, ScaleDefinition, Subsection};

/// Tuning knobs for the tick generator.
///
/// Both values are empirically chosen for historical-instrument
/// readability rather than derived, which is why they are configuration:
/// `lattice_scale` must be large enough that every declared interval lands
/// on an integer, and `max_label_decimals` clamps derived label precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Precision factor mapping values onto the integer lattice.
    pub lattice_scale: f64,
    /// Upper bound on derived label decimal places.
    pub max_label_decimals: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            lattice_scale: 100_000.0,
            max_label_decimals: 3,
        }
    }
}

/// One generated tick mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    /// The value the tick marks.
    pub value: f64,
    /// Normalized position in `[0, 1]` (endpoints included).
    pub position: f64,
    /// Hierarchy level, 0 = coarsest.
    pub level: u8,
    /// Label text, present only on label-eligible levels.
    pub label: Option<String>,
}

/// Hard cap on lattice steps per subsection. The validator rejects
/// non-positive intervals, so this only guards against absurd
/// interval-to-span ratios.
const MAX_STEPS_PER_SUBSECTION: usize = 1_000_000;

/// Sweeps one subsection's lattice, yielding `(position, level)` pairs.
struct LatticeSweep {
    pos: i64,
    end: i64,
    finest: i64,
    steps: Vec<Option<i64>>,
    remaining: usize,
}

impl LatticeSweep {
    fn new(first: i64, end: i64, finest: i64, steps: Vec<Option<i64>>) -> Self {
        Self {
            pos: first,
            end,
            finest,
            steps,
            remaining: MAX_STEPS_PER_SUBSECTION,
        }
    }
}

impl Iterator for LatticeSweep {
    type Item = (i64, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 && self.pos <= self.end {
            let pos = self.pos;
            self.pos += self.finest;
            self.remaining -= 1;
            if let Some(level) = level_of(pos, &self.steps) {
                return Some((pos, level));
            }
            // No declared interval divides this position: skipped.
        }
        None
    }
}

/// Coarsest declared interval evenly dividing `pos`, if any.
fn level_of(pos: i64, steps: &[Option<i64>]) -> Option<u8> {
    steps.iter().enumerate().find_map(|(level, step)| match step {
        Some(step) if pos % step == 0 => Some(level as u8),
        _ => None,
    })
}

/// Scales an interval onto the lattice, requiring an exact integer image.
fn lattice_step(name: &str, interval: f64, lattice_scale: f64) -> Result<i64, DefinitionError> {
    let scaled = interval * lattice_scale;
    let rounded = scaled.round();
    if rounded < 1.0 || (scaled - rounded).abs() > 1e-6 * scaled {
        return Err(DefinitionError::UnrepresentableInterval {
            name: name.to_string(),
            interval,
        });
    }
    Ok(rounded as i64)
}

/// Generates the complete ordered tick sequence for a validated definition.
pub(crate) fn generate(
    def: &ScaleDefinition,
    config: &GeneratorConfig,
) -> Result<Vec<TickMark>, DefinitionError> {
    let (lo, hi) = util::sorted_pair(def.begin_value(), def.end_value());
    let subsections = def.subsections();
    let mut ticks: Vec<TickMark> = Vec::new();

    for (idx, sub) in subsections.iter().enumerate() {
        let is_last = idx + 1 == subsections.len();
        let start = sub.start_value();
        let end = if is_last {
            hi
        } else {
            subsections[idx + 1].start_value()
        };

        let mut steps = Vec::with_capacity(sub.tick_intervals().len());
        for interval in sub.tick_intervals() {
            steps.push(match interval {
                Some(iv) => Some(lattice_step(def.name(), *iv, config.lattice_scale)?),
                None => None,
            });
        }
        let Some(finest) = steps.iter().flatten().copied().min() else {
            // Every level absent: this subsection yields no ticks.
            continue;
        };

        let start_int = (start * config.lattice_scale).round() as i64;
        let end_int = (end * config.lattice_scale).round() as i64;
        let first = {
            let aligned = start_int.div_euclid(finest) * finest;
            if aligned < start_int {
                aligned + finest
            } else {
                aligned
            }
        };

        for (pos, level) in LatticeSweep::new(first, end_int, finest, steps) {
            let value = pos as f64 / config.lattice_scale;
            // Authoritative boundary check on the reconstructed value:
            // inclusive start, exclusive end except on the last subsection.
            let contained = if is_last {
                value >= start && value <= hi
            } else {
                value >= start && value < end
            };
            if !contained {
                continue;
            }
            if ticks.last().is_some_and(|t| t.value == value) {
                continue;
            }
            let label = lattice_label(def, sub, level, value, config);
            ticks.push(TickMark {
                value,
                position: def.normalize(value),
                level,
                label,
            });
        }
    }

    apply_endpoint_policy(def, config, lo, hi, &mut ticks);

    debug!(
        scale = def.name(),
        count = ticks.len(),
        "generated tick marks"
    );
    Ok(ticks)
}

/// Guarantee one tick at each numeric bound; suppress the wrap seam on
/// circular layouts.
fn apply_endpoint_policy(
    def: &ScaleDefinition,
    config: &GeneratorConfig,
    lo: f64,
    hi: f64,
    ticks: &mut Vec<TickMark>,
) {
    if !ticks.first().is_some_and(|t| values_close(t.value, lo)) {
        ticks.insert(0, endpoint_tick(def, config, lo));
    }
    if !ticks.last().is_some_and(|t| values_close(t.value, hi)) {
        ticks.push(endpoint_tick(def, config, hi));
    }
    if def.layout() == Layout::Circular {
        // Position 1 coincides with position 0 on a closed scale; drop the
        // seam tick so the mark is not doubled.
        ticks.retain(|t| (t.position - 1.0).abs() > 1e-9);
    }
}

/// Tick for a numeric bound that the lattice sweep could not reach (π folds,
/// powers of e). Labeled from a matching gauge-mark constant when one
/// exists.
fn endpoint_tick(def: &ScaleDefinition, config: &GeneratorConfig, value: f64) -> TickMark {
    let label = def
        .constants()
        .iter()
        .find(|c| values_close(c.value, value))
        .map(|c| c.label.clone())
        .or_else(|| {
            (def.label_levels() > 0).then(|| {
                format_value(
                    value,
                    def.label_precision().unwrap_or(config.max_label_decimals),
                )
            })
        });
    TickMark {
        value,
        position: def.normalize(value),
        level: 0,
        label,
    }
}

fn values_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

fn lattice_label(
    def: &ScaleDefinition,
    sub: &Subsection,
    level: u8,
    value: f64,
    config: &GeneratorConfig,
) -> Option<String> {
    if level >= def.label_levels() {
        return None;
    }
    let interval = sub.tick_intervals()[usize::from(level)]
        .expect("label level matched a declared interval");
    let decimals = sub
        .label_precision()
        .or(def.label_precision())
        .unwrap_or_else(|| derived_decimals(interval).min(config.max_label_decimals));
    Some(format_value(value, decimals))
}

/// Decimal places needed to print ticks of the given interval exactly.
/// The small bias keeps exact powers of ten from ceiling one place too far.
fn derived_decimals(interval: f64) -> u32 {
    if interval >= 1.0 {
        0
    } else {
        (-interval.log10() - 1e-9).ceil() as u32
    }
}

/// Fixed-precision formatting with trailing zeros (and a bare point)
/// trimmed.
pub(crate) fn format_value(value: f64, decimals: u32) -> String {
    let text = format!("{:.*}", decimals as usize, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{Linear, Log10};
    use crate::scale::{GeneratedScale, Subsection};
    use std::sync::Arc;

    fn c_scale() -> ScaleDefinition {
        ScaleDefinition::new(
            "C",
            "x",
            Arc::new(Log10),
            1.0,
            10.0,
            250.0,
            vec![
                Subsection::new(1.0, vec![Some(1.0), Some(0.1), Some(0.05), Some(0.01)]),
                Subsection::new(2.0, vec![Some(1.0), Some(0.1), Some(0.05), Some(0.02)]),
                Subsection::new(4.0, vec![Some(1.0), Some(0.5), Some(0.1), Some(0.05)]),
            ],
        )
        .unwrap()
        .with_constant("π", std::f64::consts::PI)
    }

    fn ticks_of(def: ScaleDefinition) -> Vec<TickMark> {
        generate(&def, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_level_zero_ticks_are_the_integers() {
        let ticks = ticks_of(c_scale());
        let units: Vec<f64> = ticks
            .iter()
            .filter(|t| t.level == 0)
            .map(|t| t.value)
            .collect();
        assert_eq!(units, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_no_duplicate_values() {
        let ticks = ticks_of(c_scale());
        for pair in ticks.windows(2) {
            assert!(
                pair[1].value > pair[0].value,
                "ticks out of order or duplicated at {}",
                pair[1].value
            );
        }
    }

    #[test]
    fn test_end_value_has_exactly_one_tick() {
        let ticks = ticks_of(c_scale());
        let at_end = ticks.iter().filter(|t| t.value == 10.0).count();
        assert_eq!(at_end, 1);
    }

    #[test]
    fn test_seam_value_appears_once() {
        // 2.0 closes the first subsection (exclusive) and opens the second
        // (inclusive): exactly one tick, leveled by the second's hierarchy.
        let ticks = ticks_of(c_scale());
        let at_seam: Vec<&TickMark> = ticks.iter().filter(|t| t.value == 2.0).collect();
        assert_eq!(at_seam.len(), 1);
        assert_eq!(at_seam[0].level, 0);
    }

    #[test]
    fn test_finest_level_spacing() {
        let ticks = ticks_of(c_scale());
        // Inside [1, 2) the finest interval is 0.01.
        let fine: Vec<&TickMark> = ticks
            .iter()
            .filter(|t| t.value >= 1.0 && t.value < 2.0)
            .collect();
        assert_eq!(fine.len(), 100);
        assert!((fine[1].value - fine[0].value - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_coarsest_count_in_single_subsection() {
        // floor((end - start) / coarsest) + 1 when the interval divides the
        // span evenly.
        let def = ScaleDefinition::new(
            "L",
            "lg x",
            Arc::new(Linear),
            0.0,
            10.0,
            250.0,
            vec![Subsection::new(0.0, vec![Some(1.0), Some(0.1)])],
        )
        .unwrap();
        let ticks = ticks_of(def);
        let coarse = ticks.iter().filter(|t| t.level == 0).count();
        assert_eq!(coarse, 11);
    }

    #[test]
    fn test_levels_assigned_coarsest_first() {
        let ticks = ticks_of(c_scale());
        let find = |v: f64| {
            ticks
                .iter()
                .find(|t| (t.value - v).abs() < 1e-9)
                .unwrap_or_else(|| panic!("no tick at {v}"))
        };
        assert_eq!(find(3.0).level, 0);
        assert_eq!(find(1.5).level, 1);
        assert_eq!(find(1.15).level, 2);
        assert_eq!(find(1.13).level, 3);
        assert_eq!(find(4.5).level, 1); // 0.5 level in the top subsection
        assert_eq!(find(4.3).level, 2);
    }

    #[test]
    fn test_absent_levels_never_match() {
        // The tenth slot is absent: values on the 0.1 lattice can only
        // claim a level from the slots that are actually declared.
        let def = ScaleDefinition::new(
            "G",
            "x",
            Arc::new(Log10),
            1.0,
            10.0,
            250.0,
            vec![Subsection::new(1.0, vec![Some(1.0), None, Some(0.05)])],
        )
        .unwrap();
        let ticks = ticks_of(def);
        assert!(ticks.iter().any(|t| (t.value - 1.15).abs() < 1e-9));
        let at_tenth = ticks
            .iter()
            .find(|t| (t.value - 1.1).abs() < 1e-9)
            .unwrap();
        // 1.1 is on the 0.05 lattice too, so it lands on the declared
        // finest level rather than the absent tenth level.
        assert_eq!(at_tenth.level, 2);
    }

    #[test]
    fn test_all_absent_subsection_yields_no_ticks() {
        let def = ScaleDefinition::new(
            "G",
            "x",
            Arc::new(Log10),
            1.0,
            10.0,
            250.0,
            vec![
                Subsection::new(1.0, vec![Some(1.0)]),
                Subsection::new(2.0, vec![None, None]),
                Subsection::new(4.0, vec![Some(1.0)]),
            ],
        )
        .unwrap();
        let ticks = ticks_of(def);
        // Nothing strictly inside (2, 4).
        assert!(!ticks.iter().any(|t| t.value > 2.0 && t.value < 4.0));
    }

    #[test]
    fn test_off_lattice_bounds_get_endpoint_ticks() {
        // CF-style fold: both bounds are irrational.
        let pi = std::f64::consts::PI;
        let def = ScaleDefinition::new(
            "CF",
            "πx",
            Arc::new(Log10),
            pi,
            10.0 * pi,
            250.0,
            vec![
                Subsection::new(pi, vec![Some(1.0), Some(0.1), Some(0.05)]),
                Subsection::new(10.0, vec![Some(10.0), Some(1.0), Some(0.1)]),
            ],
        )
        .unwrap()
        .with_constant("π", pi);
        let ticks = ticks_of(def);
        assert_eq!(ticks.first().unwrap().value, pi);
        assert_eq!(ticks.first().unwrap().label.as_deref(), Some("π"));
        assert_eq!(ticks.last().unwrap().value, 10.0 * pi);
        assert!((ticks.last().unwrap().position - 1.0).abs() < 1e-12);
        // The guaranteed endpoints stay unique.
        assert!(ticks.windows(2).all(|p| p[1].value > p[0].value));
    }

    #[test]
    fn test_circular_layout_suppresses_seam_tick() {
        let def = ScaleDefinition::new(
            "C",
            "x",
            Arc::new(Log10),
            1.0,
            10.0,
            250.0,
            vec![Subsection::new(1.0, vec![Some(1.0), Some(0.1)])],
        )
        .unwrap()
        .with_layout(Layout::Circular);
        let ticks = ticks_of(def);
        assert!(ticks.iter().any(|t| t.value == 1.0));
        assert!(!ticks.iter().any(|t| t.value == 10.0));
    }

    #[test]
    fn test_inverted_scale_positions_descend() {
        let def = ScaleDefinition::new(
            "CI",
            "1/x",
            Arc::new(Log10),
            10.0,
            1.0,
            250.0,
            vec![Subsection::new(1.0, vec![Some(1.0), Some(0.1)])],
        )
        .unwrap();
        let ticks = ticks_of(def);
        // Values ascend, positions descend from 1 toward 0.
        assert!(ticks.windows(2).all(|p| p[1].value > p[0].value));
        assert!(ticks.windows(2).all(|p| p[1].position < p[0].position));
        assert!((ticks.first().unwrap().position - 1.0).abs() < 1e-12);
        assert!(ticks.last().unwrap().position.abs() < 1e-12);
    }

    #[test]
    fn test_labels_only_on_eligible_levels() {
        let ticks = ticks_of(c_scale());
        for tick in &ticks {
            if tick.level == 0 {
                assert!(tick.label.is_some(), "unit tick {} unlabeled", tick.value);
            } else {
                assert!(tick.label.is_none(), "minor tick {} labeled", tick.value);
            }
        }
    }

    #[test]
    fn test_label_precision_override() {
        let def = ScaleDefinition::new(
            "LL1",
            "e^0.01x",
            Arc::new(Log10),
            1.0,
            10.0,
            250.0,
            vec![Subsection::new(1.0, vec![Some(1.0)]).with_label_precision(2)],
        )
        .unwrap();
        let ticks = ticks_of(def);
        // Trailing zeros trimmed after the fixed-precision format.
        assert_eq!(ticks[0].label.as_deref(), Some("1"));
    }

    #[test]
    fn test_unrepresentable_interval_rejected() {
        let def = ScaleDefinition::new(
            "G",
            "x",
            Arc::new(Log10),
            1.0,
            10.0,
            250.0,
            vec![Subsection::new(1.0, vec![Some(1.0), Some(1e-7)])],
        )
        .unwrap();
        let err = generate(&def, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, DefinitionError::UnrepresentableInterval { .. }));
    }

    #[test]
    fn test_generated_scale_is_eager_and_immutable() {
        let scale = GeneratedScale::new(c_scale()).unwrap();
        let first_pass = scale.ticks().to_vec();
        // Re-reading never recomputes or reorders.
        assert_eq!(scale.ticks(), first_pass.as_slice());
    }

    #[test]
    fn test_format_value_trims_trailing_zeros() {
        assert_eq!(format_value(2.0, 2), "2");
        assert_eq!(format_value(1.5, 2), "1.5");
        assert_eq!(format_value(1.05, 2), "1.05");
        assert_eq!(format_value(31.4159, 3), "31.416");
        assert_eq!(format_value(7.0, 0), "7");
    }

    #[test]
    fn test_derived_decimals() {
        assert_eq!(derived_decimals(1.0), 0);
        assert_eq!(derived_decimals(10.0), 0);
        assert_eq!(derived_decimals(0.5), 1);
        assert_eq!(derived_decimals(0.1), 1);
        assert_eq!(derived_decimals(0.05), 2);
        assert_eq!(derived_decimals(0.001), 3);
    }
}
