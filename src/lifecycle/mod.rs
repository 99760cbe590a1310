//! Export lifecycle orchestration.
//!
//! [`ExportService`] drives Build → Persist → Validate → Submit over the
//! status state machine (`Processing → {Success, Failed}`,
//! `Success → ValidationError`), with the record store, file store, and
//! submission client injected as trait implementations.

mod agt;
mod service;
mod stores;

pub use agt::{MockAgtClient, SubmissionClient};
pub use service::{
    DEFAULT_EXPORT_DIR, DownloadPayload, ExportService, GenerateOutcome, GenerateRequest,
    SubmitOutcome, SweepOutcome, ValidateOutcome, XML_CONTENT_TYPE,
};
pub use stores::{ExportUpdate, FileStore, RecordStore};
