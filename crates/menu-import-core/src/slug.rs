//! # Slug Derivation
//!
//! URL-safe identifiers derived from display names.
//!
//! ```text
//!   "Chef's Specials!"   ──► "chefs-specials"
//!   "  Soups -- & Stews" ──► "soups-stews"
//!   "寿司"               ──► "slug-<8 hex chars>"   (nothing ASCII survives)
//! ```
//!
//! Slugs are not checked for uniqueness here; two names that reduce to the
//! same slug get the same slug.

use sha2::{Digest, Sha256};

/// Prefix of the hash-derived slug used when a name has no slug-safe content.
pub const FALLBACK_PREFIX: &str = "slug";

/// Derives the slug of a display name.
///
/// 1. Lowercase
/// 2. Drop everything except `a-z`, `0-9`, whitespace and `-`
/// 3. Collapse each run of whitespace and hyphens into one `-`
/// 4. Strip hyphens from both ends
///
/// When nothing is left, the slug is `slug-` followed by the first eight hex
/// digits of the SHA-256 of the original name, so it is still stable.
///
/// ## Example
/// ```rust
/// use menu_import_core::slug::slugify;
///
/// assert_eq!(slugify("Chef's Specials!"), "chefs-specials");
/// assert_eq!(slugify("  Desserts "), "desserts");
/// assert!(slugify("寿司").starts_with("slug-"));
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        return fallback_slug(name);
    }
    slug
}

fn fallback_slug(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    let hex: String = digest[..4].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}", FALLBACK_PREFIX, hex)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_names() {
        assert_eq!(slugify("Desserts"), "desserts");
        assert_eq!(slugify("Main Courses"), "main-courses");
        assert_eq!(slugify("Fish & Chips"), "fish-chips");
        assert_eq!(slugify("Pizza #1"), "pizza-1");
    }

    #[test]
    fn test_collapses_runs_and_trims_edges() {
        assert_eq!(slugify("  Soups -- & Stews  "), "soups-stews");
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
        assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
    }

    #[test]
    fn test_removed_characters_do_not_split_words() {
        assert_eq!(slugify("Chef's"), "chefs");
        assert_eq!(slugify("Crème brûlée"), "crme-brle");
    }

    #[test]
    fn test_case_variants_share_a_slug() {
        assert_eq!(slugify("Desserts"), slugify(" desserts "));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = slugify("寿司");
        let b = slugify("寿司");
        assert_eq!(a, b);
        assert_eq!(a.len(), "slug-".len() + 8);
        assert_ne!(a, slugify("ラーメン"));
        assert!(slugify("!!!").starts_with("slug-"));
    }
}
