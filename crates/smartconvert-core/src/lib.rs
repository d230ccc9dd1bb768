//! smartconvert-core: calculation engine for smartconvert
//!
//! Unit conversion across thirteen dimensions, chemistry and electrical
//! formulas, and financial projections. Everything here is synchronous and
//! UI-free; the only asynchronous piece is the optional exchange-rate
//! fetch behind the `fetch` feature.
//!
//! # Example
//!
//! ```
//! use smartconvert_core::{Conversion, Dimension, RateBook};
//!
//! let rates = RateBook::new();
//!
//! // Linear units
//! let miles = Dimension::Distance.convert(5.0, "km", "mi", &rates).unwrap();
//! assert!((miles.as_f64().unwrap() - 3.106856).abs() < 1e-6);
//!
//! // Currency waits for rates
//! let pending = Dimension::Currency.convert(1.0, "USD", "EUR", &rates).unwrap();
//! assert_eq!(pending, Conversion::Loading);
//!
//! // Molar mass
//! let water = smartconvert_core::chem::molar_mass("H2O").unwrap();
//! assert_eq!(water.total, 18.015);
//! ```

pub mod chem;
pub mod convert;
pub mod electrical;
pub mod error;
pub mod finance;
pub mod format;
pub mod history;
pub mod preferences;
pub mod query;
pub mod rates;
pub mod session;
pub mod types;

mod clock;

#[cfg(all(feature = "fetch", not(target_arch = "wasm32")))]
pub mod fetch;

#[cfg(not(target_arch = "wasm32"))]
pub mod storage;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use convert::Conversion;
pub use error::{CalcError, FormulaError};
pub use format::format_value;
pub use history::{HistoryEntry, HistorySink, NoHistory};
pub use preferences::Preferences;
pub use query::{parse_query, Query};
pub use rates::{RateBook, RateProvider, RateStatus, Rates};
pub use session::{Converter, Output};
pub use types::{Dimension, DimensionDef, QuickExample, UnitDef, DIMENSIONS};

#[cfg(not(target_arch = "wasm32"))]
pub use history::FileHistory;
