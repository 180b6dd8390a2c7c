//! # Ingredient Parser
//!
//! This module extracts an amount, a unit token and a name from raw ingredient
//! entries, either free text lines or structured name/amount/unit triples.
//!
//! ## Features
//!
//! - Integers and decimals (`2`, `1.5`, `.5`)
//! - Fractions and mixed numbers (`1/2`, `1 1/2`, `1½`)
//! - Unicode fraction glyphs (½, ⅓, ⅔, ¼, ¾)
//! - Ranges (`2-3`, `1 to 2`), resolved to the upper bound
//! - Unit tokens directly after the amount (`2 cups`, `500g`)
//!
//! Parsing never fails: anything unreadable degrades to an amount of 1, no
//! unit, and the original text as the name.
//!
//! ## Usage
//!
//! ```rust
//! use grocery::ingredient_parser::parse_ingredient_text;
//!
//! let parsed = parse_ingredient_text("1 1/2 cups sugar");
//! assert_eq!(parsed.amount, 1.5);
//! assert_eq!(parsed.unit, "cups");
//! assert_eq!(parsed.name, "sugar");
//! ```

use crate::ingredient_model::{AmountValue, ParsedIngredient, RawIngredient, StructuredIngredient};
use crate::measurement_patterns::INGREDIENT_LINE_REGEX;
use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

/// Regex patterns for parsing different quantity formats
static QUANTITY_PATTERNS: LazyLock<QuantityPatterns> = LazyLock::new(QuantityPatterns::new);

/// Compiled regex patterns for amount tokens
struct QuantityPatterns {
    /// Matches exact amounts: "2", "1.5", ".25"
    exact: Regex,
    /// Matches fractions: "1/2", "2 1/4"
    fraction: Regex,
    /// Matches a whole number followed by a glyph: "1½", "2 ¼"
    glyph: Regex,
    /// Matches ranges: "2-3", "1 to 2"
    range: Regex,
}

impl QuantityPatterns {
    fn new() -> Self {
        Self {
            exact: Regex::new(r"^(?:\d+(?:\.\d+)?|\.\d+)$").expect("exact amount pattern"),
            fraction: Regex::new(r"^(?:(\d+)\s+)?(\d+)/(\d+)$").expect("fraction pattern"),
            glyph: Regex::new(r"^(?:(\d+)\s*)?([½⅓⅔¼¾])$").expect("glyph pattern"),
            range: Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:-|–|to)\s*(\d+(?:\.\d+)?)$")
                .expect("range pattern"),
        }
    }
}

/// Errors that can occur while reading an amount token
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    InvalidNumber(String),
    DivisionByZero,
    NoAmount,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidNumber(token) => write!(f, "Invalid number format: {}", token),
            ParseError::DivisionByZero => write!(f, "Division by zero in fraction"),
            ParseError::NoAmount => write!(f, "No amount found"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a raw ingredient entry, free text or structured
pub fn parse_raw_ingredient(raw: &RawIngredient) -> ParsedIngredient {
    match raw {
        RawIngredient::Text(line) => parse_ingredient_text(line),
        RawIngredient::Structured(structured) => parse_structured(structured),
    }
}

/// Parse a free-text ingredient line such as `"2 cups all-purpose flour"`
///
/// The amount defaults to 1 and the unit to empty when they cannot be read.
pub fn parse_ingredient_text(line: &str) -> ParsedIngredient {
    let line = line.trim();
    let fallback = || ParsedIngredient {
        name: line.to_string(),
        amount: 1.0,
        unit: String::new(),
    };

    let Some(captures) = INGREDIENT_LINE_REGEX.captures(line) else {
        trace!("No leading amount in '{}'", line);
        return fallback();
    };

    let qty_str = captures.name("qty").map(|m| m.as_str()).unwrap_or("");
    match parse_amount(qty_str) {
        Ok(amount) => {
            let parsed = ParsedIngredient {
                name: captures
                    .name("name")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                amount,
                unit: captures
                    .name("unit")
                    .map(|m| m.as_str().trim().to_lowercase())
                    .unwrap_or_default(),
            };
            trace!("Parsed '{}' -> {:?}", line, parsed);
            parsed
        }
        Err(err) => {
            debug!("Could not read amount '{}' in '{}': {}", qty_str, line, err);
            fallback()
        }
    }
}

/// Parse a structured entry. A missing amount yields 0 so the entry is skipped downstream.
fn parse_structured(structured: &StructuredIngredient) -> ParsedIngredient {
    if structured.name.trim().is_empty() {
        if let Some(original) = structured.original.as_deref() {
            return parse_ingredient_text(original);
        }
    }

    let amount = match &structured.amount {
        Some(AmountValue::Number(value)) => *value,
        Some(AmountValue::Text(text)) => parse_amount(text).unwrap_or_else(|err| {
            debug!(
                "Unreadable amount '{}' for '{}' ({}), defaulting to 1",
                text, structured.name, err
            );
            1.0
        }),
        None => 0.0,
    };

    ParsedIngredient {
        name: structured.name.trim().to_string(),
        amount,
        unit: structured
            .unit
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase(),
    }
}

/// Parse an amount token into a number
///
/// Ranges resolve to their upper bound so the list covers the larger need.
pub fn parse_amount(qty_str: &str) -> Result<f64, ParseError> {
    let qty_str = qty_str.trim();
    if qty_str.is_empty() {
        return Err(ParseError::NoAmount);
    }

    // Try range pattern
    if let Some(captures) = QUANTITY_PATTERNS.range.captures(qty_str) {
        let min = parse_decimal(&captures[1])?;
        let max = parse_decimal(&captures[2])?;
        return Ok(min.max(max));
    }

    // Try fraction pattern
    if let Some(captures) = QUANTITY_PATTERNS.fraction.captures(qty_str) {
        let whole = match captures.get(1) {
            Some(m) => parse_decimal(m.as_str())?,
            None => 0.0,
        };
        let numerator = parse_decimal(&captures[2])?;
        let denominator = parse_decimal(&captures[3])?;

        if denominator == 0.0 {
            return Err(ParseError::DivisionByZero);
        }

        return Ok(whole + numerator / denominator);
    }

    // Try glyph pattern
    if let Some(captures) = QUANTITY_PATTERNS.glyph.captures(qty_str) {
        let whole = match captures.get(1) {
            Some(m) => parse_decimal(m.as_str())?,
            None => 0.0,
        };
        let glyph = captures[2].chars().next().and_then(glyph_value);
        return glyph
            .map(|value| whole + value)
            .ok_or_else(|| ParseError::InvalidNumber(qty_str.to_string()));
    }

    // Try exact number
    if QUANTITY_PATTERNS.exact.is_match(qty_str) {
        return parse_decimal(qty_str);
    }

    Err(ParseError::InvalidNumber(qty_str.to_string()))
}

fn parse_decimal(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

fn glyph_value(glyph: char) -> Option<f64> {
    match glyph {
        '½' => Some(0.5),
        '⅓' => Some(1.0 / 3.0),
        '⅔' => Some(2.0 / 3.0),
        '¼' => Some(0.25),
        '¾' => Some(0.75),
        _ => None,
    }
}
