use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use super::agt::SubmissionClient;
use super::stores::{ExportUpdate, FileStore, RecordStore};
use crate::codec;
use crate::core::{
    ExportRecord, ExportStatus, Period, SaftError, SchemaDiagnostic, parse_strict_date,
};
use crate::document;
use crate::schema;

/// Default storage directory for generated XML files.
pub const DEFAULT_EXPORT_DIR: &str = "data/saft_exports";

/// Content type of downloaded artifacts.
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Transport-independent generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub config_id: String,
    /// Strict `YYYY-MM-DD`.
    pub period_start: String,
    /// Strict `YYYY-MM-DD`.
    pub period_end: String,
    /// Display name for the export record.
    pub name: String,
}

/// Outcome of a generation call. `success: false` means the record was
/// created but generation failed and the record now sits in Failed.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub success: bool,
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    pub success: bool,
    pub message: String,
    pub errors: Vec<SchemaDiagnostic>,
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub success: bool,
    pub message: String,
    pub submission_reference: Option<String>,
}

/// Download response shape: the transport layer turns this into headers
/// (`Content-Disposition: attachment`, exact `Content-Length`) and a body.
#[derive(Debug, Clone)]
pub struct DownloadPayload {
    pub file_name: String,
    pub content_type: &'static str,
    pub content_length: u64,
    pub bytes: Vec<u8>,
}

/// Per-record result of a sweep iteration.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub id: String,
    pub status: ExportStatus,
    pub message: Option<String>,
}

/// Orchestrates the export lifecycle: Build → Persist → Validate → Submit,
/// enforcing the status state machine at every transition.
///
/// All collaborators are constructor-injected. Operations run synchronously
/// within one call; there is no locking across concurrent operations on the
/// same record (accepted design gap — two overlapping calls can race).
pub struct ExportService<S, F, C> {
    store: S,
    files: F,
    agt: C,
    export_dir: String,
}

impl<S: RecordStore, F: FileStore, C: SubmissionClient> ExportService<S, F, C> {
    pub fn new(store: S, files: F, agt: C) -> Self {
        Self {
            store,
            files,
            agt,
            export_dir: DEFAULT_EXPORT_DIR.into(),
        }
    }

    pub fn with_export_dir(mut self, dir: impl Into<String>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Create an export record and synchronously run generation for it.
    ///
    /// Input problems (missing fields, malformed dates, start after end)
    /// return `InvalidInput` before anything is persisted. Generation
    /// failures are captured into the record as Failed and reported through
    /// the outcome, not raised.
    ///
    /// The file write and the final record update are not transactional: a
    /// crash in between can leave an orphan file (accepted gap).
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, SaftError> {
        for (field, value) in [
            ("saftConfigId", &request.config_id),
            ("periodStart", &request.period_start),
            ("periodEnd", &request.period_end),
            ("name", &request.name),
        ] {
            if value.trim().is_empty() {
                return Err(SaftError::InvalidInput(format!(
                    "missing required parameter: {field}"
                )));
            }
        }
        let period = Period::new(
            parse_strict_date(&request.period_start)?,
            parse_strict_date(&request.period_end)?,
        )?;

        let record = ExportRecord::new(
            new_record_id(),
            &request.name,
            &request.config_id,
            &period,
            Utc::now(),
        );
        self.store.create_export(&record)?;
        info!(id = %record.id, config = %record.config_id, "export record created");

        match self.run_generation(&record) {
            Ok(()) => Ok(GenerateOutcome {
                success: true,
                id: record.id,
                message: "SAFT export generated successfully".into(),
            }),
            Err(e) => {
                warn!(id = %record.id, error = %e, "export generation failed");
                self.apply_transition(&record, &ExportUpdate::failed(e.to_string()))?;
                Ok(GenerateOutcome {
                    success: false,
                    id: record.id,
                    message: format!("Export failed: {e}"),
                })
            }
        }
    }

    /// Build, serialize, persist the file, and move the record to Success
    /// with counts and artifact — all derived fields in one atomic update.
    ///
    /// Shared by [`generate`](Self::generate) and the sweep. Any error here
    /// is a generation failure the caller records as a Failed transition.
    fn run_generation(&self, record: &ExportRecord) -> Result<(), SaftError> {
        let config = self
            .store
            .get_configuration(&record.config_id)?
            .ok_or_else(|| SaftError::Generation("SAFT configuration not found".into()))?;
        let period = Period::new(record.period_start, record.period_end)
            .map_err(|e| SaftError::Generation(e.to_string()))?;

        let customers = self.store.customers_created_until(period.end)?;
        let products = self.store.products_created_until(period.end)?;

        let now = Utc::now();
        let doc = document::build_document(&config, &period, &customers, &products, now.date_naive());
        let xml = document::to_xml(&doc)?;

        let path = format!(
            "{}/{}",
            self.export_dir,
            codec::file_name(&config.tax_registration_number, period.start, now)
        );
        self.files.write(&path, xml.as_bytes())?;
        let artifact = codec::encode(&xml)?;

        // Counts are store queries, independent of the document body — the
        // body's SalesInvoices totals stay zero. Preserved inconsistency.
        let update = ExportUpdate {
            status: Some(ExportStatus::Success),
            file_size: Some(xml.len() as u64),
            total_invoices: Some(self.store.count_invoices(&period)?),
            total_accounts: Some(self.store.count_accounts()?),
            total_products: Some(self.store.count_products()?),
            file_path: Some(path.clone()),
            artifact: Some(artifact),
            validation_errors: Some(None),
            ..ExportUpdate::default()
        };
        self.apply_transition(record, &update)?;
        info!(id = %record.id, path = %path, bytes = xml.len(), "export generated");
        Ok(())
    }

    /// Validate the stored artifact against the SAF-T schema.
    ///
    /// Not read-only: success clears any previously stored error text
    /// (status stays Success); failure transitions the record to
    /// ValidationError and stores the joined diagnostics.
    pub fn validate(&self, id: &str) -> Result<ValidateOutcome, SaftError> {
        let record = self.require_success(id, "validation")?;
        let artifact = record
            .artifact
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                SaftError::PreconditionFailed("export has no stored artifact to validate".into())
            })?;

        let xml = match codec::decode(artifact) {
            Ok(xml) => xml,
            Err(e) => {
                // Decode failure is one synthetic diagnostic, not a schema error.
                let diagnostic =
                    SchemaDiagnostic::new(0, format!("failed to decode stored artifact: {e}"));
                self.apply_transition(
                    &record,
                    &ExportUpdate::validation_error(diagnostic.to_string()),
                )?;
                warn!(id, error = %e, "artifact decode failed during validation");
                return Ok(ValidateOutcome {
                    success: false,
                    message: "Validation failed: stored artifact could not be decoded".into(),
                    errors: vec![diagnostic],
                });
            }
        };

        let errors = schema::validate_xml(&xml);
        if errors.is_empty() {
            self.apply_transition(
                &record,
                &ExportUpdate {
                    validation_errors: Some(None),
                    ..ExportUpdate::default()
                },
            )?;
            info!(id, "schema validation passed");
            Ok(ValidateOutcome {
                success: true,
                message: "XML is valid according to SAFT-AO schema".into(),
                errors: Vec::new(),
            })
        } else {
            self.apply_transition(
                &record,
                &ExportUpdate::validation_error(SchemaDiagnostic::join(&errors)),
            )?;
            warn!(id, count = errors.len(), "schema validation failed");
            Ok(ValidateOutcome {
                success: false,
                message: "XML validation failed".into(),
                errors,
            })
        }
    }

    /// Submit a successfully generated export to the authority.
    ///
    /// Repeat calls re-submit and overwrite the timestamp/reference; the
    /// submitted flag stays true and the generation status is unchanged.
    /// No idempotency is guaranteed.
    pub fn submit(&self, id: &str) -> Result<SubmitOutcome, SaftError> {
        let record = self.require_success(id, "submission")?;
        let reference = self.agt.submit(&record)?;
        self.apply_transition(
            &record,
            &ExportUpdate {
                submitted: Some(true),
                submitted_at: Some(Utc::now()),
                submission_reference: Some(reference.clone()),
                ..ExportUpdate::default()
            },
        )?;
        info!(id, reference = %reference, "export submitted to AGT");
        Ok(SubmitOutcome {
            success: true,
            message: "Successfully submitted to AGT".into(),
            submission_reference: Some(reference),
        })
    }

    /// Fetch the stored XML file for a successful export.
    pub fn download(&self, id: &str) -> Result<DownloadPayload, SaftError> {
        let record = self.require_success(id, "download")?;
        let path = record
            .file_path
            .as_deref()
            .ok_or_else(|| SaftError::NotFound("export file not found".into()))?;
        if !self.files.exists(path)? {
            return Err(SaftError::NotFound("export file not found".into()));
        }
        let bytes = self.files.read(path)?;
        let file_name = path.rsplit('/').next().unwrap_or(path).to_string();
        Ok(DownloadPayload {
            file_name,
            content_type: XML_CONTENT_TYPE,
            content_length: bytes.len() as u64,
            bytes,
        })
    }

    /// Re-process everything still in Processing, oldest first.
    ///
    /// Intended for the periodic scheduler. Each record is handled in
    /// isolation: a failure becomes a Failed transition for that record
    /// only and never aborts the sweep.
    pub fn process_pending(&self) -> Result<Vec<SweepOutcome>, SaftError> {
        let pending = self.store.exports_with_status(ExportStatus::Processing)?;
        info!(count = pending.len(), "sweeping pending exports");
        let mut outcomes = Vec::with_capacity(pending.len());
        for record in pending {
            let outcome = match self.run_generation(&record) {
                Ok(()) => SweepOutcome {
                    id: record.id,
                    status: ExportStatus::Success,
                    message: None,
                },
                Err(e) => {
                    warn!(id = %record.id, error = %e, "sweep: generation failed");
                    if let Err(update_err) =
                        self.apply_transition(&record, &ExportUpdate::failed(e.to_string()))
                    {
                        warn!(id = %record.id, error = %update_err, "sweep: failed to record failure");
                    }
                    SweepOutcome {
                        id: record.id,
                        status: ExportStatus::Failed,
                        message: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn require_success(&self, id: &str, operation: &str) -> Result<ExportRecord, SaftError> {
        let record = self
            .store
            .get_export(id)?
            .ok_or_else(|| SaftError::NotFound(format!("SAFT export {id} not found")))?;
        if record.status != ExportStatus::Success {
            return Err(SaftError::PreconditionFailed(format!(
                "export is not ready for {operation} (status: {})",
                record.status
            )));
        }
        Ok(record)
    }

    /// Single atomic update per transition, rejecting illegal status moves
    /// before they reach the store.
    fn apply_transition(
        &self,
        record: &ExportRecord,
        update: &ExportUpdate,
    ) -> Result<(), SaftError> {
        if let Some(to) = update.status {
            if !record.status.can_transition(to) {
                return Err(SaftError::PreconditionFailed(format!(
                    "illegal status transition {} -> {to}",
                    record.status
                )));
            }
        }
        self.store.update_export(&record.id, update)
    }
}

/// 17-character lowercase alphanumeric record id, the id shape of the
/// source platform.
fn new_record_id() -> String {
    let mut rng = rand::thread_rng();
    (0..17)
        .map(|_| {
            let c = rng.sample(rand::distributions::Alphanumeric) as char;
            c.to_ascii_lowercase()
        })
        .collect()
}
