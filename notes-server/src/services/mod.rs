//! Services module
//!
//! Business logic services that sit between the HTTP routes and the store.

pub mod notes;

pub use notes::NotesService;
