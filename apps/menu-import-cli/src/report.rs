//! Rendering of an `ImportValidationResult` for the terminal.

use menu_import_core::ImportValidationResult;

use crate::config::OutputFormat;

/// Renders `result` in the requested format.
pub fn render(result: &ImportValidationResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result),
        OutputFormat::Text => Ok(render_text(result)),
    }
}

/// Summary line, then errors, then warnings.
///
/// ```text
/// Import is invalid: 2 error(s), 1 warning(s)
///
/// Errors:
///   Row 3 [price]: price must be a number (got "abc")
///   Row 5 [allergens]: allergens contains unknown value(s): bogus. ...
///
/// Warnings:
///   Row 4: description for "Tea" is shorter than 10 characters
/// ```
pub fn render_text(result: &ImportValidationResult) -> String {
    let mut out = String::new();

    match &result.data {
        Some(data) if result.is_valid => {
            out.push_str(&format!(
                "Import is valid: {} item(s) in {} categor{}, {} warning(s)\n",
                data.total_items,
                data.total_categories,
                if data.total_categories == 1 { "y" } else { "ies" },
                result.warnings.len()
            ));
            for category in &data.categories {
                out.push_str(&format!(
                    "  {} ({}): {} item(s)\n",
                    category.name,
                    category.slug,
                    category.items.len()
                ));
            }
        }
        _ => {
            out.push_str(&format!(
                "Import is invalid: {} error(s), {} warning(s)\n",
                result.errors.len(),
                result.warnings.len()
            ));
        }
    }

    if !result.errors.is_empty() {
        out.push_str("\nErrors:\n");
        for error in &result.errors {
            out.push_str(&format!(
                "  Row {} [{}]: {}\n",
                error.row, error.field, error.message
            ));
        }
    }

    if !result.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &result.warnings {
            out.push_str(&format!("  {}\n", warning));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_import_core::validate_import_report;

    #[test]
    fn test_valid_summary_lists_categories() {
        let result = validate_import_report(
            "category_name,item_name,description,price\n\
             Mains,Burger,Beef patty with aged cheddar,12\n\
             Desserts,Sorbet,Three scoops of lemon sorbet,5\n",
        );
        let text = render_text(&result);
        assert!(text.starts_with("Import is valid: 2 item(s) in 2 categories, 0 warning(s)"));
        assert!(text.contains("  Mains (mains): 1 item(s)"));
        assert!(!text.contains("Errors:"));
    }

    #[test]
    fn test_invalid_summary_lists_errors_and_warnings() {
        let result = validate_import_report(
            "category_name,item_name,description,price\n\
             Mains,Burger,Beef patty with aged cheddar,abc\n\
             Drinks,Tea,Hot,2\n",
        );
        let text = render_text(&result);
        assert!(text.starts_with("Import is invalid: 1 error(s), 1 warning(s)"));
        assert!(text.contains("  Row 2 [price]: price must be a number (got \"abc\")"));
        assert!(text.contains("Warnings:\n  Row 3: description for \"Tea\""));
    }

    #[test]
    fn test_text_layout_is_line_per_entry() {
        let result = validate_import_report("only a header\n");
        let expected = format!(
            "Import is invalid: 1 error(s), 0 warning(s)\n\nErrors:\n  Row 0 [file]: {}\n",
            result.errors[0].message
        );
        assert_eq!(render_text(&result), expected);
        assert_eq!(render(&result, OutputFormat::Text).unwrap(), expected);
    }

    #[test]
    fn test_json_render_uses_camel_case_envelope() {
        let result = validate_import_report("only a header\n");
        let json = render(&result, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["isValid"], false);
        assert_eq!(value["errors"][0]["field"], "file");
        assert_eq!(value["errors"][0]["row"], 0);
    }
}
