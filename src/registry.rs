//! The standard scale catalog: a static name→factory registry.
//!
//! The rule definition parser resolves scale-name tokens here, but the
//! registry is equally usable on its own to build individual scales. The
//! map is populated once on first access and read-only thereafter.
//!
//! # Catalog
//!
//! | Name | Reads | Domain |
//! |------|-------|--------|
//! | `C`, `D` | x | 1 → 10 |
//! | `CF`, `DF` | πx | π → 10π |
//! | `CI`, `DI` | 1/x | 10 → 1 |
//! | `CIF` | 1/(πx) | 10π → π |
//! | `A`, `B` | x² | 1 → 100 |
//! | `K` | x³ | 1 → 1000 |
//! | `L` | lg x | 0 → 10 |
//! | `S` | sin x | 5.74° → 90° |
//! | `T` | tan x | 5.71° → 45° |
//! | `ST` | sin x ≈ tan x | 0.573° → 5.73° |
//! | `LL1`-`LL3` | e^0.01x, e^0.1x, e^x | e^0.01 → e^10 |
//! | `XL` | 2πx | 1/2π → 10³/2π |
//! | `XC` | 1/(2πx) | 10³/2π → 1/2π |
//!
//! # Examples
//!
//! ```rust
//! use slipstick::registry;
//!
//! let factory = registry::lookup("C").expect("C is cataloged");
//! let def = factory(250.0).unwrap();
//! assert_eq!(def.name(), "C");
//! assert_eq!(def.begin_value(), 1.0);
//! ```

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::function::{
    DecadeLog, InvertedDecadeLog, Linear, Log10, LogLn, PowerLog, SinLog, SinTanLog, TanLog,
    RECIP_TWO_PI, TWO_PI,
};
use crate::scale::{DefinitionError, ScaleDefinition, Subsection};

/// A cataloged scale constructor: takes the physical scale length and
/// returns the validated definition.
pub type ScaleFactory = fn(f64) -> Result<ScaleDefinition, DefinitionError>;

static REGISTRY: Lazy<HashMap<&'static str, ScaleFactory>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, ScaleFactory> = HashMap::new();
    map.insert("C", c);
    map.insert("D", d);
    map.insert("CF", cf);
    map.insert("DF", df);
    map.insert("CI", ci);
    map.insert("DI", di);
    map.insert("CIF", cif);
    map.insert("A", a);
    map.insert("B", b);
    map.insert("K", k);
    map.insert("L", l);
    map.insert("S", s);
    map.insert("T", t);
    map.insert("ST", st);
    map.insert("LL1", ll1);
    map.insert("LL2", ll2);
    map.insert("LL3", ll3);
    map.insert("XL", xl);
    map.insert("XC", xc);
    map
});

/// Looks up a scale factory by its catalog name (case-sensitive).
pub fn lookup(name: &str) -> Option<ScaleFactory> {
    REGISTRY.get(name).copied()
}

/// All catalog names, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

// Shared subsection patterns. Interval hierarchies follow the classic
// graduation of each scale family; every interval is exact on the default
// tick lattice.

fn decade_sections() -> Vec<Subsection> {
    vec![
        Subsection::new(1.0, vec![Some(1.0), Some(0.1), Some(0.05), Some(0.01)]),
        Subsection::new(2.0, vec![Some(1.0), Some(0.1), Some(0.05), Some(0.02)]),
        Subsection::new(4.0, vec![Some(1.0), Some(0.5), Some(0.1), Some(0.05)]),
    ]
}

fn folded_sections() -> Vec<Subsection> {
    vec![
        Subsection::new(PI, vec![Some(1.0), Some(0.1), Some(0.05), Some(0.02)]),
        Subsection::new(10.0, vec![Some(10.0), Some(1.0), Some(0.5), Some(0.1)]),
    ]
}

fn square_sections() -> Vec<Subsection> {
    vec![
        Subsection::new(1.0, vec![Some(1.0), Some(0.1), Some(0.02)]),
        Subsection::new(2.0, vec![Some(1.0), Some(0.1), Some(0.05)]),
        Subsection::new(5.0, vec![Some(1.0), Some(0.5), Some(0.1)]),
        Subsection::new(10.0, vec![Some(10.0), Some(1.0), Some(0.2)]),
        Subsection::new(20.0, vec![Some(10.0), Some(1.0), Some(0.5)]),
        Subsection::new(50.0, vec![Some(10.0), Some(5.0), Some(1.0)]),
    ]
}

fn cube_sections() -> Vec<Subsection> {
    vec![
        Subsection::new(1.0, vec![Some(1.0), Some(0.5), Some(0.05)]),
        Subsection::new(3.0, vec![Some(1.0), Some(0.5), Some(0.1)]),
        Subsection::new(10.0, vec![Some(10.0), Some(5.0), Some(0.5)]),
        Subsection::new(30.0, vec![Some(10.0), Some(5.0), Some(1.0)]),
        Subsection::new(100.0, vec![Some(100.0), Some(50.0), Some(5.0)]),
        Subsection::new(300.0, vec![Some(100.0), Some(50.0), Some(10.0)]),
    ]
}

fn reactance_sections() -> Vec<Subsection> {
    vec![
        Subsection::new(RECIP_TWO_PI, vec![Some(0.1), Some(0.05), Some(0.01)]),
        Subsection::new(1.0, vec![Some(1.0), Some(0.5), Some(0.1)]),
        Subsection::new(10.0, vec![Some(10.0), Some(5.0), Some(1.0)]),
    ]
}

// Factories. Each produces the classic graduation for its name at the
// requested physical length.

fn c(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(
        ScaleDefinition::new("C", "x", Arc::new(Log10), 1.0, 10.0, scale_length, decade_sections())?
            .with_constant("π", PI),
    )
}

fn d(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(
        ScaleDefinition::new("D", "x", Arc::new(Log10), 1.0, 10.0, scale_length, decade_sections())?
            .with_constant("π", PI),
    )
}

fn cf(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "CF",
        "πx",
        Arc::new(Log10),
        PI,
        10.0 * PI,
        scale_length,
        folded_sections(),
    )?
    .with_constant("π", PI))
}

fn df(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "DF",
        "πx",
        Arc::new(Log10),
        PI,
        10.0 * PI,
        scale_length,
        folded_sections(),
    )?
    .with_constant("π", PI))
}

fn ci(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "CI",
        "1/x",
        Arc::new(Log10),
        10.0,
        1.0,
        scale_length,
        decade_sections(),
    )
}

fn di(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "DI",
        "1/x",
        Arc::new(Log10),
        10.0,
        1.0,
        scale_length,
        decade_sections(),
    )
}

fn cif(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "CIF",
        "1/(πx)",
        Arc::new(Log10),
        10.0 * PI,
        PI,
        scale_length,
        folded_sections(),
    )?
    .with_constant("π", PI))
}

fn a(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "A",
        "x²",
        Arc::new(PowerLog::new(2)),
        1.0,
        100.0,
        scale_length,
        square_sections(),
    )
}

fn b(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "B",
        "x²",
        Arc::new(PowerLog::new(2)),
        1.0,
        100.0,
        scale_length,
        square_sections(),
    )
}

fn k(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "K",
        "x³",
        Arc::new(PowerLog::new(3)),
        1.0,
        1000.0,
        scale_length,
        cube_sections(),
    )
}

fn l(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "L",
        "lg x",
        Arc::new(Linear),
        0.0,
        10.0,
        scale_length,
        vec![Subsection::new(
            0.0,
            vec![Some(1.0), Some(0.5), Some(0.1), Some(0.02)],
        )],
    )
}

fn s(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "S",
        "sin x",
        Arc::new(SinLog),
        5.74,
        90.0,
        scale_length,
        vec![
            Subsection::new(5.74, vec![Some(1.0), Some(0.5), Some(0.1)]),
            Subsection::new(10.0, vec![Some(10.0), Some(1.0), Some(0.2)]),
            Subsection::new(20.0, vec![Some(10.0), Some(5.0), Some(0.5)]),
            Subsection::new(40.0, vec![Some(10.0), Some(5.0), Some(1.0)]),
            Subsection::new(60.0, vec![Some(10.0), Some(5.0), Some(2.0)]),
            Subsection::new(80.0, vec![Some(10.0), Some(5.0)]),
        ],
    )?
    .with_label_levels(2))
}

fn t(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "T",
        "tan x",
        Arc::new(TanLog),
        5.71,
        45.0,
        scale_length,
        vec![
            Subsection::new(5.71, vec![Some(1.0), Some(0.5), Some(0.1)]),
            Subsection::new(10.0, vec![Some(10.0), Some(1.0), Some(0.2)]),
            Subsection::new(20.0, vec![Some(10.0), Some(5.0), Some(0.5)]),
        ],
    )?
    .with_label_levels(2))
}

fn st(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "ST",
        "sin x ≈ tan x",
        Arc::new(SinTanLog),
        0.573,
        5.73,
        scale_length,
        vec![
            Subsection::new(0.573, vec![Some(0.1), Some(0.05), Some(0.01)]),
            Subsection::new(1.0, vec![Some(1.0), Some(0.1), Some(0.02)]),
            Subsection::new(2.0, vec![Some(1.0), Some(0.1), Some(0.05)]),
            Subsection::new(4.0, vec![Some(1.0), Some(0.5), Some(0.05)]),
        ],
    )
}

fn ll1(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    ScaleDefinition::new(
        "LL1",
        "e^0.01x",
        Arc::new(LogLn::new(100.0)),
        E.powf(0.01),
        E.powf(0.1),
        scale_length,
        vec![Subsection::new(
            E.powf(0.01),
            vec![Some(0.01), Some(0.005), Some(0.001)],
        )],
    )
}

fn ll2(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "LL2",
        "e^0.1x",
        Arc::new(LogLn::new(10.0)),
        E.powf(0.1),
        E,
        scale_length,
        vec![
            Subsection::new(E.powf(0.1), vec![Some(0.1), Some(0.05), Some(0.01)]),
            Subsection::new(2.0, vec![Some(1.0), Some(0.1), Some(0.02)]),
        ],
    )?
    .with_constant("e", E))
}

fn ll3(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "LL3",
        "e^x",
        Arc::new(LogLn::new(1.0)),
        E,
        E.powi(10),
        scale_length,
        vec![
            Subsection::new(E, vec![Some(1.0), Some(0.5), Some(0.1)]),
            Subsection::new(10.0, vec![Some(10.0), Some(5.0), Some(1.0)]),
            Subsection::new(100.0, vec![Some(100.0), Some(50.0), Some(10.0)]),
            Subsection::new(1000.0, vec![Some(1000.0), Some(500.0), Some(100.0)]),
            Subsection::new(10000.0, vec![Some(10000.0), Some(5000.0), Some(1000.0)]),
        ],
    )?
    .with_constant("e", E)
    .with_constant("e^10", E.powi(10)))
}

fn xl(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "XL",
        "2πx",
        Arc::new(DecadeLog::new(3, TWO_PI)),
        RECIP_TWO_PI,
        RECIP_TWO_PI * 1000.0,
        scale_length,
        reactance_sections(),
    )?
    .with_constant("1/2π", RECIP_TWO_PI))
}

fn xc(scale_length: f64) -> Result<ScaleDefinition, DefinitionError> {
    Ok(ScaleDefinition::new(
        "XC",
        "1/(2πx)",
        Arc::new(InvertedDecadeLog::new(3, TWO_PI)),
        RECIP_TWO_PI * 1000.0,
        RECIP_TWO_PI,
        scale_length,
        reactance_sections(),
    )?
    .with_constant("1/2π", RECIP_TWO_PI))
}
