//! Quick-query parser for one-line conversions like "100 km to mi"
//!
//! The dimension is not named in the query; it is the first dimension
//! whose catalog holds both units. Unit ids match exactly first, then
//! case-insensitively ("KM" finds "km").

use pest::Parser;
use pest_derive::Parser;
use serde::Serialize;
use tracing::debug;

use crate::convert::Conversion;
use crate::error::CalcError;
use crate::rates::RateBook;
use crate::types::{Dimension, UnitDef};

#[derive(Parser)]
#[grammar = "query/grammar.pest"]
struct QueryParser;

/// A parsed query with its units resolved against the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub dimension: Dimension,
    pub value: f64,
    pub from_unit: &'static str,
    pub to_unit: &'static str,
}

impl Query {
    pub fn convert(&self, rates: &RateBook) -> Result<Conversion, CalcError> {
        self.dimension
            .convert(self.value, self.from_unit, self.to_unit, rates)
    }
}

fn find_unit(dimension: Dimension, id: &str) -> Option<&'static UnitDef> {
    dimension
        .unit(id)
        .or_else(|| dimension.units().iter().find(|u| u.id.eq_ignore_ascii_case(id)))
}

fn resolve(from: &str, to: &str) -> Result<(Dimension, &'static str, &'static str), CalcError> {
    let pair = |exact: bool| {
        Dimension::all().find_map(|d| {
            let (f, t) = if exact {
                (d.unit(from)?, d.unit(to)?)
            } else {
                (find_unit(d, from)?, find_unit(d, to)?)
            };
            Some((d, f.id, t.id))
        })
    };
    if let Some(found) = pair(true).or_else(|| pair(false)) {
        return Ok(found);
    }

    // Report against the dimension of whichever unit is known
    match Dimension::all().find(|d| find_unit(*d, from).is_some()) {
        Some(dimension) => Err(CalcError::UnknownUnit {
            dimension: dimension.to_string(),
            unit: to.to_string(),
        }),
        None => Err(CalcError::UnknownUnit {
            dimension: "any converter".to_string(),
            unit: from.to_string(),
        }),
    }
}

/// Parse "<number> <unit> (to|in|as|->) <unit>"
pub fn parse_query(input: &str) -> Result<Query, CalcError> {
    let mut pairs = QueryParser::parse(Rule::query, input.trim())
        .map_err(|_| CalcError::InvalidInput(format!("cannot parse query '{}'", input.trim())))?;

    let mut tokens = pairs
        .next()
        .into_iter()
        .flat_map(|query| query.into_inner())
        .filter(|p| p.as_rule() != Rule::EOI);
    let (Some(number), Some(from), Some(to)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(CalcError::InvalidInput(input.trim().to_string()));
    };

    let value: f64 = number
        .as_str()
        .parse()
        .map_err(|_| CalcError::InvalidInput(number.as_str().to_string()))?;
    if !value.is_finite() {
        return Err(CalcError::InvalidInput(number.as_str().to_string()));
    }

    let (dimension, from_unit, to_unit) = resolve(from.as_str(), to.as_str())?;
    debug!(%dimension, value, from_unit, to_unit, "parsed query");
    Ok(Query {
        dimension,
        value,
        from_unit,
        to_unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_query() {
        assert_eq!(
            parse_query("100 km to mi"),
            Ok(Query {
                dimension: Dimension::Distance,
                value: 100.0,
                from_unit: "km",
                to_unit: "mi",
            })
        );
    }

    #[test]
    fn test_keywords_and_spacing() {
        let q = parse_query("-40 F in C").unwrap();
        assert_eq!((q.dimension, q.value), (Dimension::Temperature, -40.0));
        let q = parse_query("1.5e3 W as hp_e").unwrap();
        assert_eq!((q.dimension, q.value, q.to_unit), (Dimension::Power, 1500.0, "hp_e"));
        let q = parse_query("  60mph -> km/h ").unwrap();
        assert_eq!((q.from_unit, q.to_unit), ("mph", "km/h"));
        let q = parse_query("12 in TO cm").unwrap();
        assert_eq!(q.dimension, Dimension::Distance);
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let q = parse_query("5 KM to MI").unwrap();
        assert_eq!((q.from_unit, q.to_unit), ("km", "mi"));
        let q = parse_query("1 gb to mb").unwrap();
        assert_eq!((q.dimension, q.from_unit, q.to_unit), (Dimension::DataStorage, "GB", "MB"));
    }

    #[test]
    fn test_convert() {
        let q = parse_query("0 C to F").unwrap();
        assert_eq!(q.convert(&RateBook::new()), Ok(Conversion::Value(32.0)));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_query("km to mi"), Err(CalcError::InvalidInput(_))));
        assert!(matches!(parse_query("5 km"), Err(CalcError::InvalidInput(_))));
        assert_eq!(
            parse_query("5 km to kg"),
            Err(CalcError::UnknownUnit {
                dimension: "distance".into(),
                unit: "kg".into()
            })
        );
        assert!(matches!(parse_query("5 furlong to m"), Err(CalcError::UnknownUnit { .. })));
    }
}
