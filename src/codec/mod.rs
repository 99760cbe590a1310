//! Artifact codec: compress-then-encode for storage, and the inverse for
//! validation and download.
//!
//! The persisted artifact is zlib-compressed XML wrapped in base64, so it
//! can live in a plain text column of the record store. `decode(encode(x))`
//! is byte-for-byte `x` for any generated XML.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, Utc};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::io::{Read, Write};

use crate::core::SaftError;

/// Compress and encode XML text into the opaque storage payload.
pub fn encode(xml: &str) -> Result<String, SaftError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(xml.as_bytes())
        .and_then(|_| encoder.finish())
        .map(|compressed| STANDARD.encode(compressed))
        .map_err(|e| SaftError::Generation(format!("artifact compression failed: {e}")))
}

/// Decode a stored payload back into XML text.
///
/// Fails with [`SaftError::Decode`] when the payload is not valid base64,
/// not valid zlib, or not UTF-8 — callers surface this as a validation
/// failure, never a crash.
pub fn decode(payload: &str) -> Result<String, SaftError> {
    let compressed = STANDARD
        .decode(payload)
        .map_err(|e| SaftError::Decode(format!("invalid base64 payload: {e}")))?;
    let mut xml = String::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_string(&mut xml)
        .map_err(|e| SaftError::Decode(format!("invalid compressed payload: {e}")))?;
    Ok(xml)
}

/// Storage file name for a successful generation:
/// `SAFT_AO_<taxRegistrationNumber>_<periodStartYear>_<generationTimestamp>.xml`.
pub fn file_name(
    tax_registration_number: &str,
    period_start: NaiveDate,
    generated_at: DateTime<Utc>,
) -> String {
    format!(
        "SAFT_AO_{}_{}_{}.xml",
        tax_registration_number,
        period_start.format("%Y"),
        generated_at.format("%Y%m%d%H%M%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn round_trip() {
        let xml = "<?xml version=\"1.0\"?><AuditFile><Header/></AuditFile>";
        let payload = encode(xml).unwrap();
        assert_ne!(payload, xml);
        assert_eq!(decode(&payload).unwrap(), xml);
    }

    #[test]
    fn round_trip_preserves_non_ascii() {
        let xml = "<CompanyName>Depósitos & Çãoñ</CompanyName>";
        assert_eq!(decode(&encode(xml).unwrap()).unwrap(), xml);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("not base64!!"), Err(SaftError::Decode(_))));
        // Valid base64, but not zlib.
        let payload = STANDARD.encode(b"plain text");
        assert!(matches!(decode(&payload), Err(SaftError::Decode(_))));
    }

    #[test]
    fn file_name_format() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        assert_eq!(
            file_name("123456789", start, at),
            "SAFT_AO_123456789_2024_20240203040506.xml"
        );
    }
}
