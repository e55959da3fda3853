//! # Domain Types
//!
//! Types shared by every stage of the import pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Import Types                                    │
//! │                                                                         │
//! │  Transient (one validate call)        Handed to the caller              │
//! │  ─────────────────────────────        ─────────────────────────         │
//! │  ┌─────────────────┐                  ┌───────────────────────┐         │
//! │  │     RawRow      │                  │ ImportValidationResult│         │
//! │  │  line, cells    │                  │  is_valid             │         │
//! │  └────────┬────────┘                  │  errors ──► ValidationError     │
//! │           ▼                           │  warnings             │         │
//! │  ┌─────────────────┐                  │  data ──► ImportData  │         │
//! │  │    CsvRecord    │ ── aggregate ──► │    └► ProcessedCategory         │
//! │  │  typed strings  │                  │         └► ProcessedMenuItem    │
//! │  └─────────────────┘                  └───────────────────────┘         │
//! │                                                                         │
//! │  Vocabularies: Column, Allergen, SpiceLevel (compile-time tables)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{FatalError, RuleViolation};

// =============================================================================
// Column Vocabulary
// =============================================================================

/// A known column of the import file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    CategoryName,
    ItemName,
    Description,
    Price,
    LongDescription,
    DiscountPrice,
    Ingredients,
    Allergens,
    SpiceLevel,
    PreparationTime,
    ServingSize,
    IsFeatured,
    CategoryDescription,
    SortOrder,
}

impl Column {
    /// Columns every file must declare.
    pub const REQUIRED: [Column; 4] = [
        Column::CategoryName,
        Column::ItemName,
        Column::Description,
        Column::Price,
    ];

    /// Every known column, in the order the sample template writes them.
    pub const ALL: [Column; 14] = [
        Column::CategoryName,
        Column::ItemName,
        Column::Description,
        Column::Price,
        Column::LongDescription,
        Column::DiscountPrice,
        Column::Ingredients,
        Column::Allergens,
        Column::SpiceLevel,
        Column::PreparationTime,
        Column::ServingSize,
        Column::IsFeatured,
        Column::CategoryDescription,
        Column::SortOrder,
    ];

    /// The header spelling of this column.
    pub const fn name(self) -> &'static str {
        match self {
            Column::CategoryName => "category_name",
            Column::ItemName => "item_name",
            Column::Description => "description",
            Column::Price => "price",
            Column::LongDescription => "long_description",
            Column::DiscountPrice => "discount_price",
            Column::Ingredients => "ingredients",
            Column::Allergens => "allergens",
            Column::SpiceLevel => "spice_level",
            Column::PreparationTime => "preparation_time",
            Column::ServingSize => "serving_size",
            Column::IsFeatured => "is_featured",
            Column::CategoryDescription => "category_description",
            Column::SortOrder => "sort_order",
        }
    }

    /// Looks up a column by its (already normalized) header name.
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|c| c.name() == name)
    }

    #[inline]
    pub fn is_required(self) -> bool {
        Column::REQUIRED.contains(&self)
    }
}

// =============================================================================
// Allergen
// =============================================================================

/// The fixed allergen vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Allergen {
    Dairy,
    Gluten,
    Nuts,
    Eggs,
    Soy,
    Shellfish,
    Fish,
    Sesame,
}

impl Allergen {
    pub const ALL: [Allergen; 8] = [
        Allergen::Dairy,
        Allergen::Gluten,
        Allergen::Nuts,
        Allergen::Eggs,
        Allergen::Soy,
        Allergen::Shellfish,
        Allergen::Fish,
        Allergen::Sesame,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Allergen::Dairy => "dairy",
            Allergen::Gluten => "gluten",
            Allergen::Nuts => "nuts",
            Allergen::Eggs => "eggs",
            Allergen::Soy => "soy",
            Allergen::Shellfish => "shellfish",
            Allergen::Fish => "fish",
            Allergen::Sesame => "sesame",
        }
    }

    /// Parses an already trimmed, lowercased token.
    pub fn parse(token: &str) -> Option<Allergen> {
        Allergen::ALL.iter().copied().find(|a| a.as_str() == token)
    }

    /// Comma separated list used in error messages.
    pub fn valid_options() -> String {
        Allergen::ALL.map(Allergen::as_str).join(", ")
    }
}

// =============================================================================
// Spice Level
// =============================================================================

/// How hot an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
    VeryHot,
}

impl SpiceLevel {
    pub const ALL: [SpiceLevel; 4] = [
        SpiceLevel::Mild,
        SpiceLevel::Medium,
        SpiceLevel::Hot,
        SpiceLevel::VeryHot,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
            SpiceLevel::VeryHot => "very-hot",
        }
    }

    /// Parses a raw cell, ignoring surrounding whitespace and case.
    pub fn parse(raw: &str) -> Option<SpiceLevel> {
        let token = raw.trim().to_lowercase();
        SpiceLevel::ALL.iter().copied().find(|s| s.as_str() == token)
    }

    pub fn valid_options() -> String {
        SpiceLevel::ALL.map(SpiceLevel::as_str).join(", ")
    }
}

// =============================================================================
// Rows and Records
// =============================================================================

/// One tokenized data line, padded to the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based source line number.
    pub line: usize,
    pub cells: Vec<String>,
}

/// A row that passed the schema check.
///
/// Every value is still the raw text from the file; empty optional cells are
/// `None`. Numbers and vocabularies are checked by the business rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    pub category_name: String,
    pub item_name: String,
    pub description: String,
    pub price: String,
    pub long_description: Option<String>,
    pub discount_price: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub spice_level: Option<String>,
    pub preparation_time: Option<String>,
    pub serving_size: Option<String>,
    pub is_featured: Option<String>,
    pub category_description: Option<String>,
    pub sort_order: Option<String>,
}

// =============================================================================
// Diagnostics
// =============================================================================

/// A blocking problem attached to one row and one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationError {
    /// 1-based source line number (0 for file-level failures).
    pub row: usize,
    pub field: String,
    pub message: String,
    pub value: String,
}

impl ValidationError {
    pub fn new(
        row: usize,
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ValidationError {
            row,
            field: field.into(),
            message: message.into(),
            value: value.into(),
        }
    }

    /// Builds the diagnostic for a rule violation found on `row`.
    pub fn from_violation(row: usize, violation: &RuleViolation) -> Self {
        ValidationError::new(
            row,
            violation.field(),
            violation.to_string(),
            violation.value(),
        )
    }
}

// =============================================================================
// Processed Output
// =============================================================================

/// An item ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessedMenuItem {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub long_description: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub ingredients: Option<String>,
    /// Deduplicated, in the order first listed.
    pub allergens: Vec<Allergen>,
    pub spice_level: Option<SpiceLevel>,
    pub preparation_time: Option<String>,
    pub serving_size: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// A category with its items in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessedCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub is_featured: bool,
    pub items: Vec<ProcessedMenuItem>,
}

/// The aggregated tree plus its totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ImportData {
    pub categories: Vec<ProcessedCategory>,
    pub total_items: usize,
    pub total_categories: usize,
}

/// Everything the upload dialog needs to render after a validation run.
///
/// ## Serialization
/// ```json
/// {
///   "isValid": false,
///   "errors": [{ "row": 3, "field": "price", "message": "...", "value": "abc" }],
///   "warnings": ["Row 2: description for \"Tea\" is shorter than 10 characters"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ImportValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub data: Option<ImportData>,
}

impl ImportValidationResult {
    /// A failed run. `data` is never present on failure.
    pub fn invalid(errors: Vec<ValidationError>, warnings: Vec<String>) -> Self {
        ImportValidationResult {
            is_valid: false,
            errors,
            warnings,
            data: None,
        }
    }

    /// A successful run carrying the aggregated tree.
    pub fn valid(data: ImportData, warnings: Vec<String>) -> Self {
        ImportValidationResult {
            is_valid: true,
            errors: Vec::new(),
            warnings,
            data: Some(data),
        }
    }
}

impl From<FatalError> for ImportValidationResult {
    /// Collapses a file-level failure into a single row 0 `file` error.
    fn from(err: FatalError) -> Self {
        ImportValidationResult::invalid(
            vec![ValidationError::new(0, "file", err.to_string(), "")],
            Vec::new(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup() {
        assert_eq!(Column::from_name("price"), Some(Column::Price));
        assert_eq!(Column::from_name("sort_order"), Some(Column::SortOrder));
        assert_eq!(Column::from_name("Price"), None);
        assert!(Column::Price.is_required());
        assert!(!Column::Allergens.is_required());
    }

    #[test]
    fn test_allergen_parse() {
        assert_eq!(Allergen::parse("dairy"), Some(Allergen::Dairy));
        assert_eq!(Allergen::parse("shellfish"), Some(Allergen::Shellfish));
        assert_eq!(Allergen::parse("peanuts"), None);
        assert_eq!(
            Allergen::valid_options(),
            "dairy, gluten, nuts, eggs, soy, shellfish, fish, sesame"
        );
    }

    #[test]
    fn test_spice_level_parse_is_case_insensitive() {
        assert_eq!(SpiceLevel::parse("Very-Hot"), Some(SpiceLevel::VeryHot));
        assert_eq!(SpiceLevel::parse(" mild "), Some(SpiceLevel::Mild));
        assert_eq!(SpiceLevel::parse("volcanic"), None);
    }

    #[test]
    fn test_enums_serialize_as_tokens() {
        assert_eq!(serde_json::to_string(&SpiceLevel::VeryHot).unwrap(), "\"very-hot\"");
        assert_eq!(serde_json::to_string(&Allergen::Sesame).unwrap(), "\"sesame\"");
    }

    #[test]
    fn test_fatal_error_becomes_file_error() {
        let result = ImportValidationResult::from(FatalError::TooFewLines { found: 0 });
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 0);
        assert_eq!(result.errors[0].field, "file");
        assert!(result.data.is_none());
    }

    #[test]
    fn test_result_serializes_camel_case_envelope() {
        let data = ImportData {
            categories: Vec::new(),
            total_items: 0,
            total_categories: 0,
        };
        let json = serde_json::to_value(ImportValidationResult::valid(data, Vec::new())).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["data"]["totalItems"], 0);
        assert_eq!(json["data"]["totalCategories"], 0);

        let json = serde_json::to_value(ImportValidationResult::invalid(Vec::new(), Vec::new()))
            .unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_result_without_data_deserializes() {
        let result: ImportValidationResult =
            serde_json::from_str(r#"{"isValid":false,"errors":[],"warnings":["w"]}"#).unwrap();
        assert_eq!(result, ImportValidationResult::invalid(Vec::new(), vec!["w".to_string()]));

        let json = r#"{"isValid":true,"errors":[],"warnings":[],
            "data":{"categories":[],"totalItems":0,"totalCategories":0}}"#;
        let result: ImportValidationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.data.map(|d| d.total_items), Some(0));
    }
}
