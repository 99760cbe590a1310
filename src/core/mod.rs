//! Core data model and errors.
//!
//! Typed projections replace the source system's loosely-typed record
//! access: the record-store collaborator returns these structs, and the
//! export status is a closed enumeration with explicit transition rules.

mod error;
mod types;

pub use error::*;
pub use types::*;
