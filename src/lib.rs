//! # saftao
//!
//! Angolan SAF-T (AO) tax audit file generation, schema validation, and
//! AGT submission lifecycle.
//!
//! The crate assembles the hierarchical audit document from typed
//! customer/product projections, serializes it to canonical XML under the
//! fixed SAF-T namespace, persists it compressed+encoded, structurally
//! validates it against the bundled `SAFTAO1.01_01.xsd`, and tracks each
//! export through `Processing → {Success, Failed}` and
//! `Success → ValidationError`, up to (mocked) authority submission.
//!
//! ## Quick Start
//!
//! ```rust
//! use saftao::core::TaxConfiguration;
//! use saftao::lifecycle::{ExportService, GenerateRequest, MockAgtClient};
//! use saftao::store::{MemoryFileStore, MemoryRecordStore};
//!
//! let store = MemoryRecordStore::new();
//! store.add_configuration("cfg-1", TaxConfiguration {
//!     tax_registration_number: "123456789".into(),
//!     company_name: "Acme AO".into(),
//!     fiscal_year: 2024,
//!     currency_code: "AOA".into(),
//!     address_detail: "Rua Principal 1".into(),
//!     city: "Luanda".into(),
//!     postal_code: None,
//!     region: "Luanda".into(),
//!     country_code: "AO".into(),
//!     software_name: "AcmeERP".into(),
//!     software_version: "1.0".into(),
//! });
//! let files = MemoryFileStore::new();
//! let service = ExportService::new(&store, &files, MockAgtClient);
//!
//! let outcome = service.generate(&GenerateRequest {
//!     config_id: "cfg-1".into(),
//!     period_start: "2024-01-01".into(),
//!     period_end: "2024-01-31".into(),
//!     name: "Janeiro 2024".into(),
//! }).unwrap();
//! assert!(outcome.success);
//! assert!(service.validate(&outcome.id).unwrap().success);
//! ```

pub mod codec;
pub mod core;
pub mod document;
pub mod lifecycle;
pub mod schema;
pub mod store;

// Re-export the error type at crate root for convenience
pub use crate::core::{SaftError, SchemaDiagnostic};
