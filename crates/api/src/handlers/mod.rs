//! Request handlers.
//!
//! Handlers delegate persistence to the [`notebox_db::NoteStore`] held in
//! application state and map errors via [`crate::error::AppError`].

pub mod notes;
