//! # Result Assembler
//!
//! Runs the whole pipeline over the text of one uploaded file.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  text                                                                   │
//! │    │                                                                    │
//! │    ├── < 2 non-blank lines ──────────────────────► Err(FatalError)     │
//! │    ▼                                                                    │
//! │  tokenize header ── unterminated quote ──────────► Err(FatalError)     │
//! │    ▼                                                                    │
//! │  validate_headers ── missing required ───────────► isValid = false     │
//! │    ▼                                                                    │
//! │  for each non-blank line:                                              │
//! │    tokenize → align → row schema → business rules                      │
//! │    (errors and warnings collected from every line)                     │
//! │    ▼                                                                    │
//! │  any error? ─── yes ─────────────────────────────► isValid = false     │
//! │    │ no                                                                 │
//! │    ▼                                                                    │
//! │  aggregate ──────────────────────────────────────► isValid = true      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::aggregator::{aggregate, category_key};
use crate::error::{FatalError, RuleViolation};
use crate::headers::{validate_headers, HeaderLayout};
use crate::tokenizer::tokenize_line;
use crate::types::{ImportValidationResult, ValidationError};
use crate::validation::{align_row, check_business_rules, validate_row_schema, ValidatedRow};

/// Diagnostics and (when clean) the validated row for one data line.
#[derive(Debug, Default)]
struct LineOutcome {
    errors: Vec<ValidationError>,
    warnings: Vec<String>,
    /// Category key and warning for a category name with edge whitespace.
    category_whitespace: Option<(String, String)>,
    row: Option<ValidatedRow>,
}

fn validate_line(line: usize, text: &str, layout: &HeaderLayout) -> LineOutcome {
    let cells = match tokenize_line(text) {
        Ok(cells) => cells,
        Err(source) => {
            let violation = RuleViolation::UnreadableRow {
                value: text.to_string(),
                source,
            };
            return LineOutcome {
                errors: vec![ValidationError::from_violation(line, &violation)],
                ..LineOutcome::default()
            };
        }
    };

    let (raw, width_warning) = align_row(line, cells, layout.width());
    let warnings: Vec<String> = width_warning.into_iter().collect();

    let record = match validate_row_schema(&raw, layout) {
        Ok(record) => record,
        Err(errors) => {
            return LineOutcome {
                errors,
                warnings,
                ..LineOutcome::default()
            }
        }
    };

    let key = category_key(&record.category_name);
    let check = check_business_rules(line, record);
    LineOutcome {
        errors: check.errors,
        warnings: warnings.into_iter().chain(check.warnings).collect(),
        category_whitespace: check.category_whitespace.map(|warning| (key, warning)),
        row: check.row,
    }
}

/// Validates the full text of an import file.
///
/// Blank lines are skipped everywhere; row numbers in diagnostics are the
/// 1-based line numbers of the original text.
///
/// ## Example
/// ```rust
/// use menu_import_core::validate_import;
///
/// let csv = "category_name,item_name,description,price\n\
///            Desserts,Cheesecake,New York style baked cheesecake,7.50\n";
/// let result = validate_import(csv).unwrap();
/// assert!(result.is_valid);
/// assert_eq!(result.data.unwrap().total_items, 1);
/// ```
///
/// ## Errors
/// [`FatalError`] when the file has fewer than two non-blank lines or the
/// header row cannot be tokenized. Every other problem is reported inside
/// the returned [`ImportValidationResult`].
pub fn validate_import(text: &str) -> Result<ImportValidationResult, FatalError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(FatalError::TooFewLines { found: lines.len() });
    }

    let (header_line, header_text) = lines[0];
    let headers = tokenize_line(header_text).map_err(|source| FatalError::UnreadableHeader {
        line: header_line,
        source,
    })?;

    let header_check = validate_headers(&headers, header_line);
    let mut warnings = header_check.warnings;
    if !header_check.errors.is_empty() {
        debug!(missing = header_check.errors.len(), "required headers missing");
        return Ok(ImportValidationResult::invalid(header_check.errors, warnings));
    }

    let layout = header_check.layout;
    let mut errors = Vec::new();
    let mut rows = Vec::with_capacity(lines.len() - 1);
    let mut trimmed_categories = HashSet::new();

    for &(line, row_text) in &lines[1..] {
        let outcome = validate_line(line, row_text, &layout);
        errors.extend(outcome.errors);
        warnings.extend(outcome.warnings);
        if let Some((key, warning)) = outcome.category_whitespace {
            // Reported once per category, on the first offending row.
            if trimmed_categories.insert(key) {
                warnings.push(warning);
            }
        }
        rows.extend(outcome.row);
    }

    debug!(
        rows = lines.len() - 1,
        valid = rows.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "rows validated"
    );

    if !errors.is_empty() {
        return Ok(ImportValidationResult::invalid(errors, warnings));
    }

    let (data, merge_warnings) = aggregate(rows);
    warnings.extend(merge_warnings);

    debug!(
        items = data.total_items,
        categories = data.total_categories,
        "import data assembled"
    );

    Ok(ImportValidationResult::valid(data, warnings))
}

/// Like [`validate_import`], with a fatal error folded into the result as a
/// single row 0 `file` error.
pub fn validate_import_report(text: &str) -> ImportValidationResult {
    validate_import(text).unwrap_or_else(ImportValidationResult::from)
}

// =============================================================================
// Unit Tests
// =============================================================================
