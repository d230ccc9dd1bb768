//! Chemistry calculators: molar mass and pH

pub mod elements;
pub mod formula;
pub mod ph;

pub use formula::{molar_mass, parse_formula, ElementCount, ElementMass, MolarMass};
pub use ph::{Acidity, PhInput, PhResult};
