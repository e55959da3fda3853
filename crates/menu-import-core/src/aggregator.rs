//! # Aggregator
//!
//! Folds validated rows into the category → item tree.
//!
//! ## Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rows (file order)                 Categories (first-seen order)       │
//! │                                                                         │
//! │  2: Desserts   │ Cake       ──┐    ┌─ Desserts (slug "desserts")       │
//! │  3: Mains      │ Burger     ──┼──► │    ├─ Cake                        │
//! │  4: " desserts"│ Sorbet     ──┘    │    └─ Sorbet                      │
//! │                                    └─ Mains (slug "mains")             │
//! │                                         └─ Burger                      │
//! │                                                                         │
//! │  key = category_name.trim().to_lowercase()                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first row of a category fixes its name, description and sort order.
//! Later rows only append items.

use std::collections::HashMap;

use tracing::trace;

use crate::slug::slugify;
use crate::types::{ImportData, ProcessedCategory, ProcessedMenuItem};
use crate::validation::{is_featured_token, parse_sort_order, ValidatedRow};

/// Grouping key of a category name.
#[inline]
pub fn category_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Insertion-ordered category map.
#[derive(Debug, Default)]
struct CategoryIndex {
    slots: HashMap<String, usize>,
    categories: Vec<ProcessedCategory>,
}

impl CategoryIndex {
    /// Returns the category for `row`, creating it on first sight.
    ///
    /// The bool is true when the category already existed.
    fn entry(&mut self, row: &ValidatedRow) -> (&mut ProcessedCategory, bool) {
        let key = category_key(&row.record.category_name);
        if let Some(&slot) = self.slots.get(&key) {
            return (&mut self.categories[slot], true);
        }

        let record = &row.record;
        let name = record.category_name.trim().to_string();
        let category = ProcessedCategory {
            slug: slugify(&name),
            name,
            description: record.category_description.clone(),
            sort_order: record
                .sort_order
                .as_deref()
                .and_then(parse_sort_order)
                .unwrap_or(0),
            is_active: true,
            is_featured: false,
            items: Vec::new(),
        };

        trace!(line = row.line, slug = %category.slug, "new category");
        let slot = self.categories.len();
        self.slots.insert(key, slot);
        self.categories.push(category);
        (&mut self.categories[slot], false)
    }
}

fn build_item(row: &ValidatedRow) -> ProcessedMenuItem {
    let record = &row.record;
    let name = record.item_name.trim().to_string();

    ProcessedMenuItem {
        slug: slugify(&name),
        name,
        description: record.description.trim().to_string(),
        long_description: record.long_description.clone(),
        price: row.price,
        discount_price: row.discount_price,
        ingredients: record.ingredients.clone(),
        allergens: row.allergens.clone(),
        spice_level: row.spice_level,
        preparation_time: record.preparation_time.clone(),
        serving_size: record.serving_size.clone(),
        is_active: true,
        is_featured: record.is_featured.as_deref().is_some_and(is_featured_token),
    }
}

/// Warnings for category metadata a later row tried to change.
fn metadata_conflicts(category: &ProcessedCategory, row: &ValidatedRow) -> Vec<String> {
    let mut warnings = Vec::new();
    let record = &row.record;

    if let Some(description) = record.category_description.as_deref() {
        if category.description.as_deref() != Some(description) {
            warnings.push(format!(
                "Row {}: category_description for \"{}\" differs from its first row and will be ignored",
                row.line, category.name
            ));
        }
    }

    if let Some(sort_order) = record.sort_order.as_deref().and_then(parse_sort_order) {
        if sort_order != category.sort_order {
            warnings.push(format!(
                "Row {}: sort_order {} for \"{}\" differs from its first row ({}) and will be ignored",
                row.line, sort_order, category.name, category.sort_order
            ));
        }
    }

    warnings
}

/// Groups validated rows into categories.
///
/// Returns the tree together with any merge warnings.
pub fn aggregate(rows: Vec<ValidatedRow>) -> (ImportData, Vec<String>) {
    let mut index = CategoryIndex::default();
    let mut warnings = Vec::new();
    let total_items = rows.len();

    for row in &rows {
        let (category, existed) = index.entry(row);
        if existed {
            warnings.extend(metadata_conflicts(category, row));
        }
        category.items.push(build_item(row));
    }

    let categories = index.categories;
    let data = ImportData {
        total_categories: categories.len(),
        total_items,
        categories,
    };

    (data, warnings)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Allergen, CsvRecord};

    fn row(line: usize, category: &str, item: &str) -> ValidatedRow {
        ValidatedRow {
            line,
            record: CsvRecord {
                category_name: category.to_string(),
                item_name: item.to_string(),
                description: "A perfectly fine dish".to_string(),
                price: "9.5".to_string(),
                ..CsvRecord::default()
            },
            price: 9.5,
            discount_price: None,
            allergens: Vec::new(),
            spice_level: None,
        }
    }

    #[test]
    fn test_groups_case_insensitively_in_first_seen_order() {
        let rows = vec![
            row(2, "Desserts", "Cake"),
            row(3, "Mains", "Burger"),
            row(4, " desserts ", "Sorbet"),
        ];
        let (data, warnings) = aggregate(rows);

        assert!(warnings.is_empty());
        assert_eq!(data.total_items, 3);
        assert_eq!(data.total_categories, 2);

        let desserts = &data.categories[0];
        assert_eq!(desserts.name, "Desserts");
        assert_eq!(desserts.slug, "desserts");
        let items: Vec<&str> = desserts.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(items, vec!["Cake", "Sorbet"]);
        assert_eq!(data.categories[1].slug, "mains");
    }

    #[test]
    fn test_first_row_fixes_category_metadata() {
        let mut first = row(2, "Drinks", "Tea");
        first.record.category_description = Some("Hot and cold".to_string());
        first.record.sort_order = Some("3".to_string());
        let mut second = row(3, "drinks", "Coffee");
        second.record.category_description = Some("Something else".to_string());
        second.record.sort_order = Some("3".to_string());

        let (data, warnings) = aggregate(vec![first, second]);
        let drinks = &data.categories[0];
        assert_eq!(drinks.description.as_deref(), Some("Hot and cold"));
        assert_eq!(drinks.sort_order, 3);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Row 3: category_description"));
    }

    #[test]
    fn test_unparseable_sort_order_defaults_to_zero() {
        let mut first = row(2, "Sides", "Fries");
        first.record.sort_order = Some("soon".to_string());
        let (data, _) = aggregate(vec![first]);
        assert_eq!(data.categories[0].sort_order, 0);
    }

    #[test]
    fn test_item_fields() {
        let mut r = row(2, "Mains", "  Pad Thai ");
        r.record.is_featured = Some("TRUE".to_string());
        r.allergens = vec![Allergen::Nuts, Allergen::Eggs];
        r.discount_price = Some(8.0);

        let (data, _) = aggregate(vec![r]);
        let item = &data.categories[0].items[0];
        assert_eq!(item.name, "Pad Thai");
        assert_eq!(item.slug, "pad-thai");
        assert!(item.is_featured);
        assert!(item.is_active);
        assert_eq!(item.allergens, vec![Allergen::Nuts, Allergen::Eggs]);
        assert_eq!(item.discount_price, Some(8.0));

        let category = &data.categories[0];
        assert!(category.is_active);
        assert!(!category.is_featured);
    }

    #[test]
    fn test_empty_input() {
        let (data, warnings) = aggregate(Vec::new());
        assert_eq!(data.total_items, 0);
        assert_eq!(data.total_categories, 0);
        assert!(warnings.is_empty());
    }
}
