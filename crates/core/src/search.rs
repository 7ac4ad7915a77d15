//! Listing filters and pagination for notes.
//!
//! A [`NoteFilter`] is a conjunctive list of [`NoteCondition`]s plus a
//! [`Pagination`] window. The SQL store translates conditions into bound
//! `WHERE` clauses; the in-memory store evaluates them directly.

use crate::note::Category;

/// Default page when the client supplies none.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size when the client supplies none.
pub const DEFAULT_LIMIT: i64 = 10;

/* --------------------------------------------------------------------------
   Pagination
   -------------------------------------------------------------------------- */

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_LIMIT),
        }
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Clamp a user-provided page number to `>= 1`.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// Clamp a user-provided limit to `>= 1`. There is no upper bound.
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).max(1)
}

/* --------------------------------------------------------------------------
   Conditions
   -------------------------------------------------------------------------- */

/// A single listing constraint. A note must satisfy every condition in a
/// filter to be included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteCondition {
    /// Title contains the given text (ASCII case-insensitive, like SQLite `LIKE`).
    TitleContains(String),
    /// Category equals the given value.
    CategoryIs(Category),
}

impl NoteCondition {
    pub fn matches(&self, title: &str, category: Category) -> bool {
        match self {
            NoteCondition::TitleContains(needle) => title
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
            NoteCondition::CategoryIs(expected) => category == *expected,
        }
    }
}

/// Conditions plus the page window for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub conditions: Vec<NoteCondition>,
    pub page: Pagination,
}

impl NoteFilter {
    /// Build a filter from optional query inputs. An empty search string
    /// adds no condition.
    pub fn new(
        search: Option<&str>,
        category: Option<Category>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Self {
        let mut conditions = Vec::new();
        if let Some(text) = search.filter(|s| !s.is_empty()) {
            conditions.push(NoteCondition::TitleContains(text.to_string()));
        }
        if let Some(category) = category {
            conditions.push(NoteCondition::CategoryIs(category));
        }
        Self {
            conditions,
            page: Pagination::new(page, limit),
        }
    }

    pub fn matches(&self, title: &str, category: Category) -> bool {
        self.conditions.iter().all(|c| c.matches(title, category))
    }
}

/// Escape `LIKE` metacharacters so the text matches literally.
///
/// The result is intended for a pattern declared with `ESCAPE '\'`.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
