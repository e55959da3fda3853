//! # Sample Generator
//!
//! Produces the fill-in-the-blank template offered for download next to the
//! upload button. It shares nothing with the validation pipeline; the only
//! contract is that its output validates cleanly.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::types::Column;

/// Two illustrative rows, one cell per entry of [`Column::ALL`].
const SAMPLE_ROWS: [[&str; 14]; 2] = [
    [
        "Appetizers",
        "Garlic Bread",
        "Toasted bread with garlic butter and herbs",
        "6.99",
        "Freshly baked baguette, brushed with roasted garlic butter and finished with parsley",
        "5.99",
        "Baguette, garlic, butter, parsley",
        "gluten,dairy",
        "mild",
        "10 minutes",
        "4 pieces",
        "true",
        "Small plates to start your meal",
        "1",
    ],
    [
        "Main Courses",
        "Chicken Tikka Masala",
        "Grilled chicken in a rich, spiced tomato cream sauce",
        "14.99",
        "Our chef's \"signature\" curry, slow cooked and served with basmati rice",
        "",
        "Chicken, tomato, cream, garam masala, rice",
        "dairy",
        "medium",
        "25 minutes",
        "1 bowl",
        "false",
        "Hearty dishes from the kitchen",
        "2",
    ],
];

/// Builds the sample import file: the full header row plus two example rows.
///
/// Cells are written by a `csv` writer that quotes only when a cell holds a
/// comma, a quote or a line break, and ends every record with `\n`.
///
/// ## Example
/// ```rust
/// use menu_import_core::{generate_sample_csv, validate_import};
///
/// let result = validate_import(&generate_sample_csv().unwrap()).unwrap();
/// assert!(result.is_valid);
/// ```
///
/// ## Errors
/// Only if the in-memory writer fails to flush.
pub fn generate_sample_csv() -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(Column::ALL.map(Column::name))?;
    for row in SAMPLE_ROWS.iter() {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;

    // Every cell came from a `&str`, so the bytes are UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// =============================================================================
// Unit Tests
// =============================================================================
