//! In-memory representation of editor documents.
//!
//! This module defines the document tree the editor works with, its JSON wire
//! shape, and an explicit structural validator.

pub mod nodes;
pub mod validate;
pub mod wire;
