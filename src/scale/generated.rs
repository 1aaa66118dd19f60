use super::ticks::{self, GeneratorConfig, TickMark};
use super::{DefinitionError, ScaleDefinition};

/// A gauge-mark constant with its resolved normalized position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedConstant {
    /// Engraved label.
    pub label: String,
    /// Marked value.
    pub value: f64,
    /// Normalized position of the mark.
    pub position: f64,
}

/// A scale definition together with its complete tick sequence.
///
/// Generation happens once, here, at construction; downstream consumers
/// only ever read. The value is immutable and `Send + Sync`, so any number
/// of renderers or cursor readers may share one instance.
///
/// # Examples
///
/// ```rust
/// use slipstick::registry;
/// use slipstick::scale::GeneratedScale;
///
/// let def = registry::lookup("C").unwrap()(250.0).unwrap();
/// let scale = GeneratedScale::new(def).unwrap();
/// assert!(!scale.ticks().is_empty());
/// // The decade's end carries exactly one tick at position 1.
/// let last = scale.ticks().last().unwrap();
/// assert_eq!(last.value, 10.0);
/// assert!((last.position - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratedScale {
    definition: ScaleDefinition,
    ticks: Vec<TickMark>,
    constants: Vec<PositionedConstant>,
}

impl GeneratedScale {
    /// Generates a scale with the default [`GeneratorConfig`].
    pub fn new(definition: ScaleDefinition) -> Result<Self, DefinitionError> {
        Self::with_config(definition, &GeneratorConfig::default())
    }

    /// Generates a scale with an explicit generator configuration.
    pub fn with_config(
        definition: ScaleDefinition,
        config: &GeneratorConfig,
    ) -> Result<Self, DefinitionError> {
        let ticks = ticks::generate(&definition, config)?;
        let constants = definition
            .constants()
            .iter()
            .map(|c| PositionedConstant {
                label: c.label.clone(),
                value: c.value,
                position: definition.normalize(c.value),
            })
            .collect();
        Ok(Self {
            definition,
            ticks,
            constants,
        })
    }

    /// The validated definition this scale was generated from.
    pub fn definition(&self) -> &ScaleDefinition {
        &self.definition
    }

    /// Scale name as printed on the rule.
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Formula label.
    pub fn formula(&self) -> &str {
        self.definition.formula()
    }

    /// The complete ordered tick sequence.
    pub fn ticks(&self) -> &[TickMark] {
        &self.ticks
    }

    /// Gauge marks with resolved positions.
    pub fn constants(&self) -> &[PositionedConstant] {
        &self.constants
    }

    /// Value → normalized position (unclamped); see
    /// [`ScaleDefinition::normalize`].
    pub fn normalize(&self, value: f64) -> f64 {
        self.definition.normalize(value)
    }

    /// Normalized position → value; see [`ScaleDefinition::denormalize`].
    pub fn denormalize(&self, position: f64) -> f64 {
        self.definition.denormalize(position)
    }
}
