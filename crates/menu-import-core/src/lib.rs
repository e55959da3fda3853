//! # menu-import-core: Bulk Menu Import Pipeline
//!
//! Turns the text of an uploaded menu CSV into either a complete list of
//! problems or a normalized category → item tree ready to persist.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Menu Import Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Caller (upload dialog, menu-import CLI, ...)          │   │
//! │  │         reads the file ──► text          data ──► persistence   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &str                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ menu-import-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   tokenizer ──► headers ──► validation ──► aggregator           │   │
//! │  │                                   │             │               │   │
//! │  │                                   └──► import ◄─┘   sample      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tokenizer`] - Splits one line into fields (quote-aware)
//! - [`headers`] - Header row vocabulary check
//! - [`validation`] - Row schema and business rule phases
//! - [`aggregator`] - Category grouping and item assembly
//! - [`slug`] - URL-safe identifiers from display names
//! - [`import`] - The full pipeline over one file
//! - [`sample`] - Downloadable template file
//! - [`types`] - Records, diagnostics and output types
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same text in, same result out; no state between calls
//! 2. **Exhaustive Diagnostics**: every broken row is reported in one pass
//! 3. **Errors vs Warnings**: errors block the import, warnings never do
//! 4. **One Fatal Path**: only an unusable file returns `Err`
//!
//! ## Example Usage
//!
//! ```rust
//! use menu_import_core::validate_import;
//!
//! let csv = "category_name,item_name,description,price,allergens\n\
//!            Mains,Burger,Beef patty with aged cheddar,12.50,\"gluten, dairy\"\n\
//!            mains,Salad,Seasonal greens and vinaigrette,8,\n";
//!
//! let result = validate_import(csv).unwrap();
//! assert!(result.is_valid);
//!
//! let data = result.data.unwrap();
//! assert_eq!(data.total_categories, 1);
//! assert_eq!(data.categories[0].slug, "mains");
//! assert_eq!(data.categories[0].items.len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod error;
pub mod headers;
pub mod import;
pub mod sample;
pub mod slug;
pub mod tokenizer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{FatalError, RuleViolation, TokenizeError};
pub use import::{validate_import, validate_import_report};
pub use sample::generate_sample_csv;
pub use slug::slugify;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Descriptions shorter than this (in characters) draw a warning.
///
/// ## Business Reason
/// One-word descriptions make for a poor public menu, but they are not wrong
/// enough to reject the upload.
pub const MIN_DESCRIPTION_CHARS: usize = 10;
