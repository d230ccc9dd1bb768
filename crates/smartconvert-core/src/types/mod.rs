//! Unit catalogs and the dimension registry

pub mod dimension;
pub mod unit;

pub use dimension::{Dimension, DimensionDef, Method, QuickExample, DIMENSIONS};
pub use unit::UnitDef;
