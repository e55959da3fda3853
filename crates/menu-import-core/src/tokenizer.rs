//! # Tokenizer
//!
//! Splits one line of the import file into its field strings.
//!
//! ## Dialect
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input line                          Fields                             │
//! │  ──────────────────────────────────  ────────────────────────────────   │
//! │  Mains, Burger ,12.50                ["Mains", "Burger", "12.50"]       │
//! │  "a, ""b"", c",x                     ["a, \"b\", c", "x"]               │
//! │  " padded ",x                        [" padded ", "x"]                  │
//! │  a,b,                                ["a", "b", ""]                     │
//! │  "never closed                       Err(UnterminatedQuote)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - `"` toggles quoting; `""` inside quotes is one literal quote
//! - `,` only delimits outside quotes
//! - Whitespace is trimmed from unquoted content only
//!
//! Each call is independent; no state carries over between lines.

use crate::error::TokenizeError;

/// Accumulates one field while remembering which part of it was quoted.
#[derive(Default)]
struct FieldBuf {
    text: String,
    /// Byte range of `text` that came from inside quotes (first open .. last close).
    quoted: Option<(usize, usize)>,
}

impl FieldBuf {
    fn open_quote(&mut self) {
        let at = self.text.len();
        match self.quoted {
            Some((start, _)) => self.quoted = Some((start, at)),
            None => self.quoted = Some((at, at)),
        }
    }

    fn close_quote(&mut self) {
        if let Some((start, _)) = self.quoted {
            self.quoted = Some((start, self.text.len()));
        }
    }

    fn finish(self) -> String {
        match self.quoted {
            None => self.text.trim().to_string(),
            Some((start, end)) => {
                let mut field = String::with_capacity(self.text.len());
                field.push_str(self.text[..start].trim_start());
                field.push_str(&self.text[start..end]);
                field.push_str(self.text[end..].trim_end());
                field
            }
        }
    }
}

/// Splits a single line into fields.
///
/// ## Example
/// ```rust
/// use menu_import_core::tokenizer::tokenize_line;
///
/// let fields = tokenize_line(r#"Desserts,"Cake, chocolate",6.50"#).unwrap();
/// assert_eq!(fields, vec!["Desserts", "Cake, chocolate", "6.50"]);
/// ```
///
/// ## Errors
/// [`TokenizeError::UnterminatedQuote`] when a quote is still open at end of
/// line.
pub fn tokenize_line(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut fields = Vec::new();
    let mut field = FieldBuf::default();
    let mut in_quotes = false;
    let mut open_column = 0;

    let mut chars = line.chars().enumerate().peekable();
    while let Some((column, ch)) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some((_, '"'))) {
                    field.text.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                    field.close_quote();
                }
            }
            '"' => {
                in_quotes = true;
                open_column = column + 1;
                field.open_quote();
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field).finish());
            }
            _ => field.text.push(ch),
        }
    }

    if in_quotes {
        return Err(TokenizeError::UnterminatedQuote {
            column: open_column,
        });
    }

    fields.push(field.finish());
    Ok(fields)
}

// =============================================================================
// Unit Tests
// =============================================================================
