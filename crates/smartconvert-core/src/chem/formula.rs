//! Chemical formula parsing and molar mass
//!
//! Grammar, after whitespace is stripped:
//!
//! ```text
//! formula  = segment (("·" | "*") segment)*
//! segment  = digits? group+
//! group    = element digits? | "(" group* ")" digits?
//! element  = [A-Z] [a-z]?
//! ```
//!
//! Each hydrate segment is parsed on its own and scaled by its leading
//! multiplier, so `CuSO4·5H2O` adds five waters to copper sulfate.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::elements::atomic_mass;
use crate::error::FormulaError;

/// Element symbol -> number of atoms, ordered by symbol
pub type ElementCount = BTreeMap<String, u32>;

const HYDRATE_SEPARATORS: [char; 2] = ['·', '*'];

/// One element's share of a molar mass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementMass {
    pub element: String,
    pub count: u32,
    pub atomic_mass: f64,
    /// `count * atomic_mass`, rounded to 3 decimals
    pub mass: f64,
}

/// Molar mass (g/mol) with a per-element breakdown sorted by symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MolarMass {
    pub total: f64,
    pub breakdown: Vec<ElementMass>,
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Cursor over the characters of one segment, tracking absolute positions
struct Scanner<'a> {
    chars: &'a [char],
    pos: usize,
    /// Position of `chars[0]` in the normalized formula
    offset: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn position(&self) -> usize {
        self.offset + self.pos
    }

    /// Read an optional digit run. Absent means 1; zero is rejected.
    fn count(&mut self) -> Result<u32, FormulaError> {
        let start = self.position();
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.pos += 1;
        }
        if digits.is_empty() {
            return Ok(1);
        }
        match digits.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(FormulaError::InvalidCount { position: start }),
        }
    }
}

fn add(map: &mut ElementCount, element: &str, count: u32, position: usize) -> Result<(), FormulaError> {
    let entry = map.entry(element.to_string()).or_insert(0);
    *entry = entry
        .checked_add(count)
        .ok_or(FormulaError::InvalidCount { position })?;
    Ok(())
}

fn merge_scaled(
    into: &mut ElementCount,
    from: ElementCount,
    multiplier: u32,
    position: usize,
) -> Result<(), FormulaError> {
    for (element, count) in from {
        let scaled = count
            .checked_mul(multiplier)
            .ok_or(FormulaError::InvalidCount { position })?;
        add(into, &element, scaled, position)?;
    }
    Ok(())
}

/// Parse one hydrate segment (without its leading multiplier)
fn parse_segment(scanner: &mut Scanner<'_>) -> Result<ElementCount, FormulaError> {
    let mut stack: Vec<ElementCount> = vec![ElementCount::new()];
    let mut open_positions: Vec<usize> = Vec::new();

    while let Some(c) = scanner.peek() {
        let position = scanner.position();
        match c {
            '(' => {
                scanner.pos += 1;
                stack.push(ElementCount::new());
                open_positions.push(position);
            }
            ')' => {
                scanner.pos += 1;
                if stack.len() == 1 {
                    return Err(FormulaError::UnbalancedParens { position });
                }
                let group = stack.pop().unwrap_or_default();
                open_positions.pop();
                let multiplier = scanner.count()?;
                let top = stack.last_mut().ok_or(FormulaError::UnbalancedParens { position })?;
                merge_scaled(top, group, multiplier, position)?;
            }
            c if c.is_ascii_uppercase() => {
                scanner.pos += 1;
                let mut symbol = c.to_string();
                if let Some(lower) = scanner.peek().filter(char::is_ascii_lowercase) {
                    symbol.push(lower);
                    scanner.pos += 1;
                }
                if atomic_mass(&symbol).is_none() {
                    return Err(FormulaError::UnknownElement(symbol));
                }
                let count = scanner.count()?;
                let top = stack.last_mut().ok_or(FormulaError::UnbalancedParens { position })?;
                add(top, &symbol, count, position)?;
            }
            found => return Err(FormulaError::UnexpectedChar { found, position }),
        }
    }

    if stack.len() != 1 {
        let position = open_positions.last().copied().unwrap_or(scanner.position());
        return Err(FormulaError::UnbalancedParens { position });
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Parse a formula into element counts.
///
/// Whitespace is ignored. Fails on unknown elements, unbalanced
/// parentheses, stray characters, and on input that names no element.
pub fn parse_formula(formula: &str) -> Result<ElementCount, FormulaError> {
    let normalized: Vec<char> = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if normalized.is_empty() {
        return Err(FormulaError::Empty);
    }

    let mut total = ElementCount::new();
    let mut start = 0;
    for segment in normalized.split(|c| HYDRATE_SEPARATORS.contains(c)) {
        let mut scanner = Scanner {
            chars: segment,
            pos: 0,
            offset: start,
        };
        if segment.is_empty() {
            // Points at the separator next to the empty segment
            let position = start.min(normalized.len() - 1);
            return Err(FormulaError::UnexpectedChar {
                found: normalized[position],
                position,
            });
        }
        let multiplier = scanner.count()?;
        let counts = parse_segment(&mut scanner)?;
        merge_scaled(&mut total, counts, multiplier, start)?;
        start += segment.len() + 1;
    }

    if total.is_empty() {
        return Err(FormulaError::Empty);
    }
    Ok(total)
}

/// Compute the molar mass of a formula in g/mol.
///
/// Each element's contribution is rounded to 3 decimals and the total is
/// the sum of the rounded contributions.
pub fn molar_mass(formula: &str) -> Result<MolarMass, FormulaError> {
    let counts = parse_formula(formula)?;

    let mut breakdown = Vec::with_capacity(counts.len());
    for (element, count) in counts {
        let atomic = atomic_mass(&element).ok_or_else(|| FormulaError::UnknownElement(element.clone()))?;
        breakdown.push(ElementMass {
            mass: round3(atomic * f64::from(count)),
            element,
            count,
            atomic_mass: atomic,
        });
    }
    let total = round3(breakdown.iter().map(|e| e.mass).sum());

    debug!(formula, total, "molar mass");
    Ok(MolarMass { total, breakdown })
}
