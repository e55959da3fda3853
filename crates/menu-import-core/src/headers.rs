//! # Header Validator
//!
//! Checks the header row against the fixed column vocabulary and records
//! where each known column sits.
//!
//! - Missing required column → blocking error on the header row, field `headers`
//! - Unknown column → warning, the column is ignored
//! - Repeated known column → warning, only the first occurrence is read

use std::collections::HashMap;

use tracing::debug;

use crate::error::RuleViolation;
use crate::types::{Column, ValidationError};

/// Position of every known column in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    positions: HashMap<Column, usize>,
    width: usize,
}

impl HeaderLayout {
    /// Number of header cells, known or not.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of `column` in each row, if the file declares it.
    #[inline]
    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    /// The cell of `cells` holding `column`, or `""` when absent.
    pub fn cell<'a>(&self, cells: &'a [String], column: Column) -> &'a str {
        self.position(column)
            .and_then(|idx| cells.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Outcome of the header check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCheck {
    pub layout: HeaderLayout,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl HeaderCheck {
    /// Body validation may only run when this is true.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates a tokenized header row found on source line `line`.
///
/// ## Example
/// ```rust
/// use menu_import_core::headers::validate_headers;
///
/// let headers: Vec<String> = ["category_name", "item_name", "description"]
///     .iter()
///     .map(|h| h.to_string())
///     .collect();
/// let check = validate_headers(&headers, 1);
/// assert!(!check.is_usable());
/// assert_eq!(check.errors[0].field, "headers");
/// ```
pub fn validate_headers(headers: &[String], line: usize) -> HeaderCheck {
    let mut positions = HashMap::new();
    let mut warnings = Vec::new();

    for (idx, raw) in headers.iter().enumerate() {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            warnings.push(format!(
                "Column {} has an empty header and will be ignored",
                idx + 1
            ));
            continue;
        }

        match Column::from_name(&name) {
            Some(column) if positions.contains_key(&column) => {
                warnings.push(format!(
                    "Duplicate column \"{}\" will be ignored; the first occurrence is used",
                    name
                ));
            }
            Some(column) => {
                positions.insert(column, idx);
            }
            None => {
                warnings.push(format!("Unknown column \"{}\" will be ignored", raw.trim()));
            }
        }
    }

    let errors: Vec<ValidationError> = Column::REQUIRED
        .iter()
        .filter(|column| !positions.contains_key(*column))
        .map(|column| {
            let violation = RuleViolation::MissingHeader {
                header: column.name().to_string(),
            };
            ValidationError::from_violation(line, &violation)
        })
        .collect();

    debug!(
        columns = headers.len(),
        known = positions.len(),
        missing = errors.len(),
        "header row checked"
    );

    HeaderCheck {
        layout: HeaderLayout {
            positions,
            width: headers.len(),
        },
        errors,
        warnings,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_required_headers_accepted() {
        let check = validate_headers(
            &headers(&["category_name", "item_name", "description", "price"]),
            1,
        );
        assert!(check.is_usable());
        assert!(check.warnings.is_empty());
        assert_eq!(check.layout.position(Column::Price), Some(3));
        assert_eq!(check.layout.position(Column::Allergens), None);
        assert_eq!(check.layout.width(), 4);
    }

    #[test]
    fn test_every_missing_required_header_reported() {
        let check = validate_headers(&headers(&["item_name", "description"]), 1);
        assert!(!check.is_usable());
        let missing: Vec<&str> = check.errors.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(missing, vec!["category_name", "price"]);
        assert!(check.errors.iter().all(|e| e.row == 1 && e.field == "headers"));
    }

    #[test]
    fn test_unknown_header_is_only_a_warning() {
        let check = validate_headers(
            &headers(&["category_name", "item_name", "description", "price", "calories"]),
            1,
        );
        assert!(check.is_usable());
        assert_eq!(check.warnings, vec!["Unknown column \"calories\" will be ignored"]);
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let check = validate_headers(
            &headers(&["Category_Name", "ITEM_NAME", " description ", "Price"]),
            1,
        );
        assert!(check.is_usable());
    }

    #[test]
    fn test_duplicate_and_empty_headers_warn() {
        let check = validate_headers(
            &headers(&["category_name", "item_name", "description", "price", "price", ""]),
            1,
        );
        assert!(check.is_usable());
        assert_eq!(check.layout.position(Column::Price), Some(3));
        assert_eq!(check.warnings.len(), 2);
    }

    #[test]
    fn test_cell_lookup_tolerates_short_rows() {
        let check = validate_headers(
            &headers(&["category_name", "item_name", "description", "price"]),
            1,
        );
        let cells = headers(&["Mains", "Burger"]);
        assert_eq!(check.layout.cell(&cells, Column::ItemName), "Burger");
        assert_eq!(check.layout.cell(&cells, Column::Price), "");
        assert_eq!(check.layout.cell(&cells, Column::Allergens), "");
    }
}
