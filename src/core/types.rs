use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::SaftError;

/// One compliance profile — the company whose audit file is being produced.
///
/// Read-only from this crate's perspective; owned and persisted by the
/// record-store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfiguration {
    /// NIF — Angolan tax registration number.
    pub tax_registration_number: String,
    /// Legal company name.
    pub company_name: String,
    /// Fiscal year covered by exports under this profile.
    pub fiscal_year: i32,
    /// ISO 4217 currency code (e.g. "AOA").
    pub currency_code: String,
    /// Street-level address line.
    pub address_detail: String,
    /// City.
    pub city: String,
    /// Postal code, if any.
    pub postal_code: Option<String>,
    /// Province / region.
    pub region: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "AO").
    pub country_code: String,
    /// Name of the producing software (Header ProductID).
    pub software_name: String,
    /// Version of the producing software (Header ProductVersion).
    pub software_version: String,
}

/// Typed projection of a customer record returned by the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerView {
    /// Record id, used as the SAF-T CustomerID.
    pub id: String,
    /// Customer name.
    pub name: String,
    /// Customer NIF, if known.
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub billing_street: Option<String>,
    pub billing_city: Option<String>,
    pub billing_postal_code: Option<String>,
    pub billing_region: Option<String>,
    /// Billing country code; defaults to "AO" in the document when absent.
    pub billing_country: Option<String>,
    /// Record creation time; customer selection is cumulative up to the
    /// period end, never period-scoped.
    pub created_at: DateTime<Utc>,
}

/// Typed projection of a product record returned by the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    /// Record id; doubles as the product code when no external code is set.
    pub id: String,
    /// Product name (SAF-T ProductDescription).
    pub name: String,
    /// External product code, if any.
    pub code: Option<String>,
    /// Category (SAF-T ProductGroup); defaults to "Outros".
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status of an export record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportStatus {
    /// Created, generation not yet finished. The periodic sweep picks these up.
    Processing,
    /// Generated, artifact and counts persisted.
    Success,
    /// Generation failed; error text persisted, never auto-retried.
    Failed,
    /// Schema validation rejected the stored artifact.
    ValidationError,
}

impl ExportStatus {
    /// Whether moving from `self` to `to` is a legal transition.
    ///
    /// Legal moves: Processing → {Success, Failed}, Success → ValidationError,
    /// and the identity (submission re-persists a Success record without
    /// changing its generation status).
    pub fn can_transition(self, to: ExportStatus) -> bool {
        matches!(
            (self, to),
            (Self::Processing, Self::Success)
                | (Self::Processing, Self::Failed)
                | (Self::Success, Self::ValidationError)
        ) || self == to
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::ValidationError => "ValidationError",
        }
    }
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit-file generation attempt and everything persisted against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: String,
    /// Display name chosen by the requester.
    pub name: String,
    /// Reference to the [`TaxConfiguration`] used for generation.
    pub config_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: ExportStatus,
    /// Byte length of the uncompressed canonical XML. Set iff Success.
    pub file_size: Option<u64>,
    /// Invoice count over the period, queried from the store — not derived
    /// from the document body (which carries zeroed totals).
    pub total_invoices: Option<u64>,
    pub total_accounts: Option<u64>,
    pub total_products: Option<u64>,
    /// Storage path of the written XML file. Set iff Success.
    pub file_path: Option<String>,
    /// Compressed + base64 artifact payload. Set iff Success.
    pub artifact: Option<String>,
    /// Generation error or joined schema diagnostics.
    pub validation_errors: Option<String>,
    pub submitted: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    /// Authority reference, format `AGT<YYYYMMDDHHMMSS><4 digits>`.
    pub submission_reference: Option<String>,
}

impl ExportRecord {
    /// A fresh record in Processing, before generation has run.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        config_id: impl Into<String>,
        period: &Period,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config_id: config_id.into(),
            period_start: period.start,
            period_end: period.end,
            created_at,
            status: ExportStatus::Processing,
            file_size: None,
            total_invoices: None,
            total_accounts: None,
            total_products: None,
            file_path: None,
            artifact: None,
            validation_errors: None,
            submitted: false,
            submitted_at: None,
            submission_reference: None,
        }
    }
}

/// A validated reporting period with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SaftError> {
        if start > end {
            return Err(SaftError::InvalidInput(
                "period start must not be after period end".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parse a period from strict `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, SaftError> {
        Self::new(parse_strict_date(start)?, parse_strict_date(end)?)
    }
}

/// Strict `YYYY-MM-DD` parse: the date must round-trip to the exact input,
/// so `2024-1-1` or trailing garbage is rejected.
pub fn parse_strict_date(input: &str) -> Result<NaiveDate, SaftError> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| SaftError::InvalidInput(format!("invalid date: {input:?}, use YYYY-MM-DD")))?;
    if date.format("%Y-%m-%d").to_string() != input {
        return Err(SaftError::InvalidInput(format!(
            "invalid date: {input:?}, use YYYY-MM-DD"
        )));
    }
    Ok(date)
}
