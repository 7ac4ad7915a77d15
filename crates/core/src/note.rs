//! Note vocabulary and the write-path validator.
//!
//! Every payload that reaches the store passes through [`validate_note`],
//! which turns a loosely-shaped [`NoteInput`] into a [`ValidNote`] with the
//! category resolved (defaulting to [`Category::Others`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Category
   -------------------------------------------------------------------------- */

/// The closed set of note categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    #[default]
    Others,
}

impl Category {
    /// All categories, in the order they are presented to clients.
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Others];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known category names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Category names are matched exactly; `"work"` is not `Work`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/* --------------------------------------------------------------------------
   Inbound payload
   -------------------------------------------------------------------------- */

const MSG_TITLE_REQUIRED: &str = "\"title\" is required";
const MSG_TITLE_EMPTY: &str = "\"title\" is not allowed to be empty";
const MSG_DESCRIPTION_REQUIRED: &str = "\"description\" is required";
const MSG_DESCRIPTION_EMPTY: &str = "\"description\" is not allowed to be empty";
const MSG_CATEGORY_INVALID: &str = "\"category\" must be one of [Work, Personal, Others]";

/// Fields are reported in this order when more than one is invalid.
const FIELD_ORDER: [&str; 2] = ["title", "description"];

/// Body of `POST /notes` and `PUT /notes/{id}`.
///
/// Every field is optional at the type level so that a missing field is a
/// validation failure with a precise message rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NoteInput {
    #[validate(
        required(message = "\"title\" is required"),
        length(min = 1, message = "\"title\" is not allowed to be empty")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "\"description\" is required"),
        length(min = 1, message = "\"description\" is not allowed to be empty")
    )]
    pub description: Option<String>,

    /// Outer `None`: key omitted. `Some(None)`: key present as `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category: Option<Option<String>>,
}

/// Wrap any present value (including `null`) in `Some`, so an explicit
/// `null` stays distinguishable from an omitted key.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A payload that passed validation, with the category resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidNote {
    pub title: String,
    pub description: String,
    pub category: Category,
}

/// The first constraint a payload violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub field: &'static str,
    pub message: String,
}

impl From<ValidationFailure> for CoreError {
    fn from(failure: ValidationFailure) -> Self {
        CoreError::Validation(failure.message)
    }
}

/// Validate a note payload.
///
/// Checks title, then description, then category, and reports only the
/// first violation. An omitted category resolves to [`Category::Others`];
/// an explicit `null` is rejected like any other unknown name.
pub fn validate_note(input: &NoteInput) -> Result<ValidNote, ValidationFailure> {
    if let Err(errors) = input.validate() {
        return Err(first_failure(&errors));
    }

    // Already enforced by the derive above.
    let title = input.title.clone().ok_or_else(|| failure("title", MSG_TITLE_REQUIRED))?;
    let description = input
        .description
        .clone()
        .ok_or_else(|| failure("description", MSG_DESCRIPTION_REQUIRED))?;
    let category = match &input.category {
        None => Category::default(),
        Some(Some(name)) => name
            .parse()
            .map_err(|_| failure("category", MSG_CATEGORY_INVALID))?,
        Some(None) => return Err(failure("category", MSG_CATEGORY_INVALID)),
    };

    Ok(ValidNote {
        title,
        description,
        category,
    })
}

fn failure(field: &'static str, message: &str) -> ValidationFailure {
    ValidationFailure {
        field,
        message: message.to_string(),
    }
}

/// Pick the first failing field in [`FIELD_ORDER`] from the unordered map
/// produced by the derive.
fn first_failure(errors: &ValidationErrors) -> ValidationFailure {
    let field_errors = errors.field_errors();
    for field in FIELD_ORDER {
        let Some(first) = field_errors.get(field).and_then(|errs| errs.first()) else {
            continue;
        };
        let message = first
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| fallback_message(field, &first.code));
        return ValidationFailure { field, message };
    }
    failure("payload", "payload is invalid")
}

fn fallback_message(field: &str, code: &str) -> String {
    match (field, code) {
        ("title", "required") => MSG_TITLE_REQUIRED.to_string(),
        ("title", _) => MSG_TITLE_EMPTY.to_string(),
        ("description", "required") => MSG_DESCRIPTION_REQUIRED.to_string(),
        _ => MSG_DESCRIPTION_EMPTY.to_string(),
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
