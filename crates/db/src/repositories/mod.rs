//! Repository layer: one struct per table, static async methods over a pool.

pub mod note_repo;

pub use note_repo::NoteRepo;
