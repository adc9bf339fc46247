//! Locator derivation for discovered elements.
//!
//! A locator is a best-effort CSS selector used to find an element again in
//! later queries. It is not guaranteed to be unique or stable: two elements
//! sharing their first class names yield the same locator, and the first
//! match wins on re-resolution. A locator that no longer resolves means the
//! element is gone, not that something failed.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The structural facts about one element needed to build its locator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementDescriptor {
    /// Lower-case tag name.
    pub tag: String,
    pub id: String,
    pub classes: Vec<String>,
    pub has_parent: bool,
    /// One-based position among same-tag siblings under the same parent.
    pub same_tag_index: usize,
    pub same_tag_count: usize,
}

/// How much of an element's identity goes into its locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorStyle {
    pub max_classes: usize,
    /// Append `:nth-of-type(k)` to bare tags with same-tag siblings.
    pub nth_of_type: bool,
}

impl LocatorStyle {
    /// Used for interactive candidates.
    pub const COMPONENT: LocatorStyle = LocatorStyle {
        max_classes: 3,
        nth_of_type: true,
    };

    /// Used for reveal candidates.
    pub const SECTION: LocatorStyle = LocatorStyle {
        max_classes: 2,
        nth_of_type: false,
    };
}

/// Builds `tag#id`, else `tag.c1.c2.c3`, else `tag:nth-of-type(k)` (or bare
/// `tag` when the element has no same-tag siblings).
pub fn derive_locator(el: &ElementDescriptor, style: LocatorStyle) -> Option<String> {
    let tag = el.tag.trim().to_ascii_lowercase();
    if tag.is_empty() {
        return None;
    }

    if !el.id.is_empty() {
        return Some(format!("{tag}#{}", el.id));
    }

    let classes: Vec<String> = el
        .classes
        .iter()
        .map(|c| c.split_whitespace().collect::<String>())
        .filter(|c| !c.is_empty())
        .take(style.max_classes)
        .collect();
    if !classes.is_empty() {
        return Some(format!("{tag}.{}", classes.join(".")));
    }

    if style.nth_of_type && el.has_parent && el.same_tag_count > 1 && el.same_tag_index > 0 {
        return Some(format!("{tag}:nth-of-type({})", el.same_tag_index));
    }
    Some(tag)
}

/// Derives locators, drops duplicates (first occurrence wins) and caps the
/// list.
pub fn locators_for(elements: &[ElementDescriptor], style: LocatorStyle, cap: usize) -> Vec<String> {
    let distinct: IndexSet<String> = elements
        .iter()
        .filter_map(|el| derive_locator(el, style))
        .collect();
    distinct.into_iter().take(cap).collect()
}
