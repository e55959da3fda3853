//! # Validation Module
//!
//! The two per-row validation phases.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Phases                                  │
//! │                                                                         │
//! │  Phase 1: Row schema  (validate_row_schema)                            │
//! │  ├── Required columns present and non-empty                            │
//! │  └── Produces a CsvRecord of raw strings                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Phase 2: Business rules  (check_business_rules)                       │
//! │  ├── price / discount_price are numbers > 0                            │
//! │  ├── allergens and spice_level within their vocabularies               │
//! │  └── Advisory warnings (short description, stray whitespace, ...)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ValidatedRow handed to the aggregator                                 │
//! │                                                                         │
//! │  Every phase returns its diagnostics; nothing is threaded by &mut.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A row that fails phase 1 never reaches phase 2, but every row of the file
//! goes through phase 1, so one pass reports every broken row.

use crate::error::RuleViolation;
use crate::headers::HeaderLayout;
use crate::types::{Allergen, Column, CsvRecord, RawRow, SpiceLevel, ValidationError};
use crate::MIN_DESCRIPTION_CHARS;

/// Tokens of `is_featured` that mark an item as featured.
pub const FEATURED_TOKENS: [&str; 3] = ["true", "TRUE", "1"];

/// Tokens of `is_featured` that are understood as "not featured".
const NOT_FEATURED_TOKENS: [&str; 3] = ["false", "FALSE", "0"];

// =============================================================================
// Row Alignment
// =============================================================================

/// Pads (or truncates) tokenized cells to the header width.
///
/// Returns the aligned row and, when the line had more cells than the header,
/// a warning saying the extras are ignored.
pub fn align_row(line: usize, mut cells: Vec<String>, width: usize) -> (RawRow, Option<String>) {
    let warning = if cells.len() > width {
        let extra = cells.len() - width;
        cells.truncate(width);
        Some(format!(
            "Row {}: {} extra cell(s) beyond the header row will be ignored",
            line, extra
        ))
    } else {
        cells.resize(width, String::new());
        None
    };

    (RawRow { line, cells }, warning)
}

// =============================================================================
// Phase 1: Row Schema
// =============================================================================

/// Converts a raw row into a [`CsvRecord`], or reports every empty required field.
pub fn validate_row_schema(
    row: &RawRow,
    layout: &HeaderLayout,
) -> Result<CsvRecord, Vec<ValidationError>> {
    let cell = |column: Column| layout.cell(&row.cells, column);

    let errors: Vec<ValidationError> = Column::REQUIRED
        .iter()
        .filter(|column| cell(**column).trim().is_empty())
        .map(|column| {
            let violation = RuleViolation::Required {
                field: column.name().to_string(),
                value: cell(*column).to_string(),
            };
            ValidationError::from_violation(row.line, &violation)
        })
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    let optional = |column: Column| {
        let value = cell(column).trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    Ok(CsvRecord {
        category_name: cell(Column::CategoryName).to_string(),
        item_name: cell(Column::ItemName).to_string(),
        description: cell(Column::Description).to_string(),
        price: cell(Column::Price).to_string(),
        long_description: optional(Column::LongDescription),
        discount_price: optional(Column::DiscountPrice),
        ingredients: optional(Column::Ingredients),
        allergens: optional(Column::Allergens),
        spice_level: optional(Column::SpiceLevel),
        preparation_time: optional(Column::PreparationTime),
        serving_size: optional(Column::ServingSize),
        is_featured: optional(Column::IsFeatured),
        category_description: optional(Column::CategoryDescription),
        sort_order: optional(Column::SortOrder),
    })
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses a price-like cell into a finite number greater than zero.
///
/// ## Example
/// ```rust
/// use menu_import_core::validation::parse_positive_number;
///
/// assert_eq!(parse_positive_number("price", " 12.50 ").unwrap(), 12.5);
/// assert!(parse_positive_number("price", "0").is_err());
/// assert!(parse_positive_number("price", "twelve").is_err());
/// ```
pub fn parse_positive_number(field: &str, raw: &str) -> Result<f64, RuleViolation> {
    let value: f64 = raw
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| RuleViolation::NotANumber {
            field: field.to_string(),
            value: raw.to_string(),
        })?;

    if value <= 0.0 {
        return Err(RuleViolation::MustBePositive {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }

    Ok(value)
}

/// Splits an allergen cell into a deduplicated list, in first-listed order.
///
/// Every unknown token is collected so a single error can name them all.
pub fn parse_allergens(raw: &str) -> Result<Vec<Allergen>, RuleViolation> {
    let mut allergens = Vec::new();
    let mut unknown = Vec::new();

    for token in raw.split(',').map(|t| t.trim().to_lowercase()) {
        if token.is_empty() {
            continue;
        }
        match Allergen::parse(&token) {
            Some(allergen) if !allergens.contains(&allergen) => allergens.push(allergen),
            Some(_) => {}
            None if !unknown.contains(&token) => unknown.push(token),
            None => {}
        }
    }

    if !unknown.is_empty() {
        return Err(RuleViolation::UnknownAllergens {
            unknown,
            value: raw.to_string(),
        });
    }

    Ok(allergens)
}

/// Parses a non-empty spice level cell.
pub fn parse_spice_level(raw: &str) -> Result<SpiceLevel, RuleViolation> {
    SpiceLevel::parse(raw).ok_or_else(|| RuleViolation::InvalidSpiceLevel {
        value: raw.to_string(),
    })
}

/// `sort_order` as an integer, `None` when it is not a whole number.
pub fn parse_sort_order(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Whether an `is_featured` cell marks the item as featured.
#[inline]
pub fn is_featured_token(raw: &str) -> bool {
    FEATURED_TOKENS.contains(&raw)
}

// =============================================================================
// Phase 2: Business Rules
// =============================================================================

/// A record that passed both phases, with its checked values already typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRow {
    /// 1-based source line number, kept for traceability.
    pub line: usize,
    pub record: CsvRecord,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub allergens: Vec<Allergen>,
    pub spice_level: Option<SpiceLevel>,
}

/// Diagnostics of the business rule phase for one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleCheck {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    /// Edge-whitespace warning for `category_name`, kept apart from
    /// `warnings` so the assembler can report it once per category.
    pub category_whitespace: Option<String>,
    /// Present exactly when `errors` is empty.
    pub row: Option<ValidatedRow>,
}

/// Applies the cross-field and vocabulary rules to one schema-valid record.
pub fn check_business_rules(line: usize, record: CsvRecord) -> RuleCheck {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    let allergens = match record.allergens.as_deref().map(parse_allergens) {
        Some(Ok(list)) => list,
        Some(Err(v)) => {
            violations.push(v);
            Vec::new()
        }
        None => Vec::new(),
    };

    let spice_level = match record.spice_level.as_deref().map(parse_spice_level) {
        Some(Ok(level)) => Some(level),
        Some(Err(v)) => {
            violations.push(v);
            None
        }
        None => None,
    };

    let price = parse_positive_number(Column::Price.name(), &record.price)
        .map_err(|v| violations.push(v))
        .ok();

    let discount_price = match record.discount_price.as_deref() {
        Some(raw) => parse_positive_number(Column::DiscountPrice.name(), raw)
            .map_err(|v| violations.push(v))
            .ok(),
        None => None,
    };

    if let (Some(price), Some(discount)) = (price, discount_price) {
        if discount >= price {
            warnings.push(format!(
                "Row {}: discount price ({}) for \"{}\" is not lower than the regular price ({})",
                line,
                record.discount_price.as_deref().unwrap_or_default(),
                record.item_name.trim(),
                record.price.trim()
            ));
        }
    }

    if record.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        warnings.push(format!(
            "Row {}: description for \"{}\" is shorter than {} characters",
            line,
            record.item_name.trim(),
            MIN_DESCRIPTION_CHARS
        ));
    }

    let category_whitespace = (record.category_name.trim() != record.category_name).then(|| {
        format!(
            "Row {}: category_name \"{}\" has leading or trailing whitespace and will be trimmed",
            line, record.category_name
        )
    });

    if let Some(raw) = record.sort_order.as_deref() {
        if parse_sort_order(raw).is_none() {
            warnings.push(format!(
                "Row {}: sort_order \"{}\" is not a whole number; 0 will be used",
                line, raw
            ));
        }
    }

    if let Some(raw) = record.is_featured.as_deref() {
        if !is_featured_token(raw) && !NOT_FEATURED_TOKENS.contains(&raw) {
            warnings.push(format!(
                "Row {}: is_featured \"{}\" is not recognised (use true, TRUE or 1); the item will not be featured",
                line, raw
            ));
        }
    }

    let errors: Vec<ValidationError> = violations
        .iter()
        .map(|v| ValidationError::from_violation(line, v))
        .collect();

    let row = match price {
        Some(price) if errors.is_empty() => Some(ValidatedRow {
            line,
            record,
            price,
            discount_price,
            allergens,
            spice_level,
        }),
        _ => None,
    };

    RuleCheck {
        errors,
        warnings,
        category_whitespace,
        row,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
