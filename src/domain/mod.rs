//! Core domain types and the document-index access trait.

pub mod entities;
pub mod repositories;
