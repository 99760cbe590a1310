//! Collaborator seams: record storage and file storage.
//!
//! The real platform owns these; the service only consumes the interfaces
//! and receives implementations through its constructor.

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::{
    CustomerView, ExportRecord, ExportStatus, Period, ProductView, SaftError, TaxConfiguration,
};

/// Typed record storage. Queries mirror the source system's
/// `whereClause`/`orderBy` shapes: created-at cutoffs for master data,
/// a status filter ordered by creation time for the sweep.
pub trait RecordStore {
    fn create_export(&self, record: &ExportRecord) -> Result<(), SaftError>;

    fn get_export(&self, id: &str) -> Result<Option<ExportRecord>, SaftError>;

    /// Apply one atomic field update to an export record. Every status
    /// transition goes through a single call here to keep the (accepted)
    /// race window between concurrent operations minimal.
    fn update_export(&self, id: &str, update: &ExportUpdate) -> Result<(), SaftError>;

    /// All exports in the given status, ordered by creation time ascending.
    fn exports_with_status(&self, status: ExportStatus) -> Result<Vec<ExportRecord>, SaftError>;

    fn get_configuration(&self, id: &str) -> Result<Option<TaxConfiguration>, SaftError>;

    /// Customer-type records created on or before the cutoff — cumulative,
    /// no lower bound.
    fn customers_created_until(&self, cutoff: NaiveDate) -> Result<Vec<CustomerView>, SaftError>;

    /// Product records created on or before the cutoff.
    fn products_created_until(&self, cutoff: NaiveDate) -> Result<Vec<ProductView>, SaftError>;

    /// Closed invoices within the period. Queried directly — the value is
    /// not derived from the document body, which carries zeroed totals.
    fn count_invoices(&self, period: &Period) -> Result<u64, SaftError>;

    /// All customer accounts, unscoped (the source system counts every
    /// account here, not just those selected into the document).
    fn count_accounts(&self) -> Result<u64, SaftError>;

    fn count_products(&self) -> Result<u64, SaftError>;
}

/// File storage for the generated XML artifacts.
pub trait FileStore {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), SaftError>;
    fn read(&self, path: &str) -> Result<Vec<u8>, SaftError>;
    fn exists(&self, path: &str) -> Result<bool, SaftError>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn create_export(&self, record: &ExportRecord) -> Result<(), SaftError> {
        (**self).create_export(record)
    }
    fn get_export(&self, id: &str) -> Result<Option<ExportRecord>, SaftError> {
        (**self).get_export(id)
    }
    fn update_export(&self, id: &str, update: &ExportUpdate) -> Result<(), SaftError> {
        (**self).update_export(id, update)
    }
    fn exports_with_status(&self, status: ExportStatus) -> Result<Vec<ExportRecord>, SaftError> {
        (**self).exports_with_status(status)
    }
    fn get_configuration(&self, id: &str) -> Result<Option<TaxConfiguration>, SaftError> {
        (**self).get_configuration(id)
    }
    fn customers_created_until(&self, cutoff: NaiveDate) -> Result<Vec<CustomerView>, SaftError> {
        (**self).customers_created_until(cutoff)
    }
    fn products_created_until(&self, cutoff: NaiveDate) -> Result<Vec<ProductView>, SaftError> {
        (**self).products_created_until(cutoff)
    }
    fn count_invoices(&self, period: &Period) -> Result<u64, SaftError> {
        (**self).count_invoices(period)
    }
    fn count_accounts(&self) -> Result<u64, SaftError> {
        (**self).count_accounts()
    }
    fn count_products(&self) -> Result<u64, SaftError> {
        (**self).count_products()
    }
}

impl<T: FileStore + ?Sized> FileStore for &T {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), SaftError> {
        (**self).write(path, bytes)
    }
    fn read(&self, path: &str) -> Result<Vec<u8>, SaftError> {
        (**self).read(path)
    }
    fn exists(&self, path: &str) -> Result<bool, SaftError> {
        (**self).exists(path)
    }
}

/// Field update applied to an export record in one store call.
///
/// `None` leaves a field untouched. `validation_errors` is doubly wrapped so
/// a successful validation can clear previously stored text
/// (`Some(None)`) without every other update touching it.
#[derive(Debug, Clone, Default)]
pub struct ExportUpdate {
    pub status: Option<ExportStatus>,
    pub file_size: Option<u64>,
    pub total_invoices: Option<u64>,
    pub total_accounts: Option<u64>,
    pub total_products: Option<u64>,
    pub file_path: Option<String>,
    pub artifact: Option<String>,
    pub validation_errors: Option<Option<String>>,
    pub submitted: Option<bool>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub submission_reference: Option<String>,
}

impl ExportUpdate {
    /// Transition to Failed with the given error text.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Some(ExportStatus::Failed),
            validation_errors: Some(Some(message.into())),
            ..Self::default()
        }
    }

    /// Transition to ValidationError with the joined diagnostics.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self {
            status: Some(ExportStatus::ValidationError),
            validation_errors: Some(Some(message.into())),
            ..Self::default()
        }
    }

    /// Apply this update to a record in place.
    pub fn apply_to(&self, record: &mut ExportRecord) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(size) = self.file_size {
            record.file_size = Some(size);
        }
        if let Some(n) = self.total_invoices {
            record.total_invoices = Some(n);
        }
        if let Some(n) = self.total_accounts {
            record.total_accounts = Some(n);
        }
        if let Some(n) = self.total_products {
            record.total_products = Some(n);
        }
        if let Some(path) = &self.file_path {
            record.file_path = Some(path.clone());
        }
        if let Some(artifact) = &self.artifact {
            record.artifact = Some(artifact.clone());
        }
        if let Some(errors) = &self.validation_errors {
            record.validation_errors = errors.clone();
        }
        if let Some(submitted) = self.submitted {
            record.submitted = submitted;
        }
        if let Some(at) = self.submitted_at {
            record.submitted_at = Some(at);
        }
        if let Some(reference) = &self.submission_reference {
            record.submission_reference = Some(reference.clone());
        }
    }
}
