//! Submission boundary to the tax authority (AGT).
//!
//! Modeled as a pluggable interface so a real client can replace the mock
//! without touching the state machine. No genuine network integration
//! exists in this design.

use chrono::Utc;
use rand::Rng;

use crate::core::{ExportRecord, SaftError};

/// Issues a submission reference for a successfully generated export.
pub trait SubmissionClient {
    fn submit(&self, record: &ExportRecord) -> Result<String, SaftError>;
}

impl<T: SubmissionClient + ?Sized> SubmissionClient for &T {
    fn submit(&self, record: &ExportRecord) -> Result<String, SaftError> {
        (**self).submit(record)
    }
}

/// Stub client: issues `AGT<YYYYMMDDHHMMSS><4-digit random>` references
/// without contacting anything. References are unique per call in practice
/// but carry no idempotency guarantee.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAgtClient;

impl SubmissionClient for MockAgtClient {
    fn submit(&self, _record: &ExportRecord) -> Result<String, SaftError> {
        let suffix: u32 = rand::thread_rng().gen_range(1000..=9999);
        Ok(format!("AGT{}{suffix}", Utc::now().format("%Y%m%d%H%M%S")))
    }
}
