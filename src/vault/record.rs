//! Plaintext credential types and browsing helpers.
//!
//! `CredentialRecord` exists only in memory, after decryption.  The
//! repository hands records out wrapped in a `CredentialEntry` that also
//! carries the stored id and timestamps.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One credential as the user sees it.
///
/// `website`, `username` and `password` are required by the input layer;
/// the rest may be empty.  Unknown fields (such as a stray `id`) are
/// ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
}

impl CredentialRecord {
    /// Build a record from the three required fields.
    pub fn new(website: &str, username: &str, password: &str) -> Self {
        Self {
            website: website.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }

    /// Returns `true` if website, username and password are all non-blank.
    pub fn has_required_fields(&self) -> bool {
        [&self.website, &self.username, &self.password]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Case-insensitive match on the `(website, username)` identity pair.
    pub fn same_identity(&self, website: &str, username: &str) -> bool {
        self.website.to_lowercase() == website.to_lowercase()
            && self.username.to_lowercase() == username.to_lowercase()
    }
}

/// A decrypted record together with its storage metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub record: CredentialRecord,
}

/// Category selector for `CredentialFilter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Exact, case-sensitive category name.
    Named(String),
    /// Entries whose category is empty.
    Uncategorized,
}

/// Search and category filter applied to a listing.
#[derive(Debug, Clone, Default)]
pub struct CredentialFilter {
    /// Substring matched case-insensitively against website, username,
    /// notes and category.
    pub search: Option<String>,
    pub category: Option<CategoryFilter>,
}

impl CredentialFilter {
    /// Returns `true` if `entry` passes both the category and search parts.
    pub fn matches(&self, entry: &CredentialEntry) -> bool {
        let record = &entry.record;

        let category_ok = match &self.category {
            None => true,
            Some(CategoryFilter::Uncategorized) => record.category.trim().is_empty(),
            Some(CategoryFilter::Named(name)) => record.category == *name,
        };
        if !category_ok {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                [
                    &record.website,
                    &record.username,
                    &record.notes,
                    &record.category,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    /// Keep only the entries that match.
    pub fn apply<'a>(&self, entries: &'a [CredentialEntry]) -> Vec<&'a CredentialEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Sorted, distinct, non-empty categories used by `entries`.
pub fn categories(entries: &[CredentialEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.record.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
