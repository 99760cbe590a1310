//! Audit document assembly and canonical XML serialization.
//!
//! [`build_document`] turns a tax configuration, a reporting period, and the
//! customer/product records selected for it into the hierarchical SAF-T
//! document; [`to_xml`] serializes it to the canonical pretty-printed form.
//!
//! GeneralLedger and the four SourceDocuments subsections are emitted with
//! zeroed aggregates and no line entries — a known completeness gap carried
//! over from the source system, not an error.

mod builder;
pub(crate) mod tables;
mod types;
mod xml;

pub use builder::{ANONYMOUS_TAX_ID, DEFAULT_COUNTRY, DEFAULT_PRODUCT_GROUP, build_document};
pub use tables::{CHART_OF_ACCOUNTS, CUSTOMER_ACCOUNT_ID, TAX_TABLE, chart_of_accounts};
pub use types::*;
pub use xml::to_xml;

/// Fixed SAF-T namespace on the AuditFile root.
pub const SAFT_NAMESPACE: &str = "urn:OECD:StandardAuditFile-Tax:PT_1.01_01";

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Name of the bundled XSD the schemaLocation hint points at.
pub const XSD_FILE_NAME: &str = "SAFTAO1.01_01.xsd";

/// xsi:schemaLocation value: namespace plus the XSD file name.
pub const SCHEMA_LOCATION: &str = "urn:OECD:StandardAuditFile-Tax:PT_1.01_01 SAFTAO1.01_01.xsd";
