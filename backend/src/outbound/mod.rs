//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: flat-file credential and survey stores.
//! - **spreadsheet**: `.xlsx` encoding shared by the survey store and the
//!   admin export.
//!
//! Adapters convert between domain types and file formats. They contain no
//! business logic.

pub mod persistence;
pub mod spreadsheet;
