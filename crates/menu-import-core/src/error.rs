//! # Error Types
//!
//! Domain-specific error types for menu-import-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  menu-import-core errors (this file)                                    │
//! │  ├── TokenizeError  - A single line could not be split into fields     │
//! │  ├── FatalError     - The file as a whole is unusable (short-circuit)  │
//! │  └── RuleViolation  - One field of one row breaks one rule             │
//! │                                                                         │
//! │  Diagnostics (types.rs)                                                │
//! │  └── ValidationError - What the upload dialog renders per row/field    │
//! │                                                                         │
//! │  Flow: RuleViolation ──► ValidationError ──► ImportValidationResult    │
//! │        FatalError ─────► ImportValidationResult (row 0, "file")        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `Display` text of a [`RuleViolation`] IS the user-facing message
//! 3. Every violation knows which field it belongs to and which raw value caused it

use thiserror::Error;

use crate::types::{Allergen, SpiceLevel};

// =============================================================================
// Tokenize Error
// =============================================================================

/// A line of text could not be split into fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A quoted field was opened but never closed before end of line.
    ///
    /// Multi-line quoted fields are not supported, so this is always an
    /// error rather than a continuation.
    #[error("unterminated quoted field starting at column {column}")]
    UnterminatedQuote {
        /// 1-based character column of the opening quote.
        column: usize,
    },
}

// =============================================================================
// Fatal Error
// =============================================================================

/// File-level failures that stop validation before any row is looked at.
///
/// ## When This Occurs
/// - The upload is empty or holds only a header row
/// - The header line itself cannot be tokenized
///
/// Callers that want a uniform result shape convert this with
/// `ImportValidationResult::from(err)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// Fewer than two non-blank lines (header + at least one row).
    #[error("File must contain a header row and at least one data row (found {found} non-blank line(s))")]
    TooFewLines { found: usize },

    /// The header row could not be parsed.
    #[error("Header row on line {line} could not be parsed: {source}")]
    UnreadableHeader {
        line: usize,
        #[source]
        source: TokenizeError,
    },
}

// =============================================================================
// Rule Violation
// =============================================================================

/// A single rule broken by a single field of a single row.
///
/// The header check, the row schema check and the business rules all report
/// through this type, so the wording of every blocking message lives here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// A required column is absent from the header row.
    #[error("Missing required header: {header}")]
    MissingHeader { header: String },

    /// The line could not be tokenized.
    #[error("Row could not be parsed: {source}")]
    UnreadableRow {
        value: String,
        #[source]
        source: TokenizeError,
    },

    /// A required field is empty.
    #[error("{field} is required (got \"{value}\")")]
    Required { field: String, value: String },

    /// A numeric field does not parse as a number.
    #[error("{field} must be a number (got \"{value}\")")]
    NotANumber { field: String, value: String },

    /// A numeric field parsed but is zero or negative.
    #[error("{field} must be greater than 0 (got \"{value}\")")]
    MustBePositive { field: String, value: String },

    /// One or more allergen tokens are outside the fixed vocabulary.
    #[error(
        "allergens contains unknown value(s): {}. Valid options: {}",
        .unknown.join(", "),
        Allergen::valid_options()
    )]
    UnknownAllergens { unknown: Vec<String>, value: String },

    /// The spice level is outside the fixed vocabulary.
    #[error(
        "spice_level \"{value}\" is not valid. Valid options: {}",
        SpiceLevel::valid_options()
    )]
    InvalidSpiceLevel { value: String },
}

impl RuleViolation {
    /// The field path this violation is reported against.
    pub fn field(&self) -> &str {
        match self {
            RuleViolation::MissingHeader { .. } => "headers",
            RuleViolation::UnreadableRow { .. } => "row",
            RuleViolation::Required { field, .. }
            | RuleViolation::NotANumber { field, .. }
            | RuleViolation::MustBePositive { field, .. } => field,
            RuleViolation::UnknownAllergens { .. } => "allergens",
            RuleViolation::InvalidSpiceLevel { .. } => "spice_level",
        }
    }

    /// The raw cell value (or header name) that triggered the violation.
    pub fn value(&self) -> &str {
        match self {
            RuleViolation::MissingHeader { header } => header,
            RuleViolation::UnreadableRow { value, .. }
            | RuleViolation::Required { value, .. }
            | RuleViolation::NotANumber { value, .. }
            | RuleViolation::MustBePositive { value, .. }
            | RuleViolation::UnknownAllergens { value, .. }
            | RuleViolation::InvalidSpiceLevel { value } => value,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_error_messages() {
        let err = FatalError::TooFewLines { found: 1 };
        assert_eq!(
            err.to_string(),
            "File must contain a header row and at least one data row (found 1 non-blank line(s))"
        );

        let err = FatalError::UnreadableHeader {
            line: 1,
            source: TokenizeError::UnterminatedQuote { column: 5 },
        };
        assert_eq!(
            err.to_string(),
            "Header row on line 1 could not be parsed: unterminated quoted field starting at column 5"
        );
    }

    #[test]
    fn test_violation_messages_carry_field_and_value() {
        let err = RuleViolation::Required {
            field: "price".to_string(),
            value: "".to_string(),
        };
        assert_eq!(err.to_string(), "price is required (got \"\")");
        assert_eq!(err.field(), "price");

        let err = RuleViolation::MustBePositive {
            field: "discount_price".to_string(),
            value: "0".to_string(),
        };
        assert_eq!(err.to_string(), "discount_price must be greater than 0 (got \"0\")");
        assert_eq!(err.value(), "0");
    }

    #[test]
    fn test_unknown_allergens_lists_offenders_and_valid_set() {
        let err = RuleViolation::UnknownAllergens {
            unknown: vec!["bogus".to_string(), "pollen".to_string()],
            value: "dairy,bogus,pollen".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("bogus, pollen"));
        assert!(message.contains("dairy, gluten, nuts, eggs, soy, shellfish, fish, sesame"));
        assert_eq!(err.field(), "allergens");
    }

    #[test]
    fn test_missing_header_reports_against_headers_field() {
        let err = RuleViolation::MissingHeader {
            header: "price".to_string(),
        };
        assert_eq!(err.field(), "headers");
        assert_eq!(err.value(), "price");
        assert_eq!(err.to_string(), "Missing required header: price");
    }
}
