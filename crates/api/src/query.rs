//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /notes` (`?search=&category=&page=&limit=`).
///
/// Page and limit are clamped in `notebox_core::search::Pagination`.
#[derive(Debug, Default, Deserialize)]
pub struct ListNotesParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
