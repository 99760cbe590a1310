//! Property-based tests for the saftao crate.
//!
//! Run with: `cargo test --test proptest_tests`

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use saftao::codec;
use saftao::core::{parse_strict_date, CustomerView, Period, ProductView, TaxConfiguration};
use saftao::document::{build_document, to_xml};
use saftao::schema;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config() -> TaxConfiguration {
    TaxConfiguration {
        tax_registration_number: "500123456".into(),
        company_name: "Sociedade Exemplo Lda".into(),
        fiscal_year: 2024,
        currency_code: "AOA".into(),
        address_detail: "Rua da Missão 45".into(),
        city: "Luanda".into(),
        postal_code: None,
        region: "Luanda".into(),
        country_code: "AO".into(),
        software_name: "ExemploERP".into(),
        software_version: "1.0".into(),
    }
}

/// A date strategy covering the whole plausible reporting range,
/// leap days included.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..=2099, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
}

/// Free-form text as it appears in CRM records: names with markup
/// characters, accents, and stray whitespace.
fn record_text() -> impl Strategy<Value = String> {
    "[a-zA-ZÀ-ÿ0-9 &<>'\"./-]{1,40}"
}

proptest! {
    /// The storage codec is lossless for any text, not just XML.
    #[test]
    fn codec_round_trips_any_text(text in ".*") {
        let payload = codec::encode(&text).unwrap();
        prop_assert_eq!(codec::decode(&payload).unwrap(), text);
    }

    /// Every payload the codec emits is plain single-line base64, safe for
    /// a text column.
    #[test]
    fn encoded_payload_is_single_line_base64(text in ".{0,500}") {
        let payload = codec::encode(&text).unwrap();
        let all_base64 = payload.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='
        });
        prop_assert!(all_base64);
    }

    /// Strict date parsing accepts exactly the canonical rendering of a
    /// date and nothing else.
    #[test]
    fn strict_date_round_trip(d in any_date()) {
        let rendered = d.format("%Y-%m-%d").to_string();
        prop_assert_eq!(parse_strict_date(&rendered).unwrap(), d);
        // Any leading/trailing noise must be rejected.
        let leading_noise = format!(" {rendered}");
        let trailing_noise = format!("{rendered} ");
        prop_assert!(parse_strict_date(&leading_noise).is_err());
        prop_assert!(parse_strict_date(&trailing_noise).is_err());
    }

    /// The generated document stays schema-valid no matter what text the
    /// master-data records carry — escaping must hold for markup
    /// characters in names, addresses, and codes.
    #[test]
    fn document_is_schema_valid_for_arbitrary_master_data(
        customer_name in record_text(),
        street in record_text(),
        product_name in record_text(),
        category in proptest::option::of(record_text()),
    ) {
        let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let customers = vec![CustomerView {
            id: "c1".into(),
            name: customer_name,
            tax_id: None,
            phone: None,
            email: None,
            website: None,
            billing_street: Some(street),
            billing_city: None,
            billing_postal_code: None,
            billing_region: None,
            billing_country: None,
            created_at: created,
        }];
        let products = vec![ProductView {
            id: "p1".into(),
            name: product_name,
            code: None,
            category,
            created_at: created,
        }];
        let period = Period::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let doc = build_document(&config(), &period, &customers, &products, date(2025, 1, 15));
        let xml = to_xml(&doc).unwrap();
        let errors = schema::validate_xml(&xml);
        prop_assert!(errors.is_empty(), "diagnostics: {:?}", errors);
    }

    /// File names depend only on the NIF, the period start year, and the
    /// generation timestamp, and always follow the fixed pattern.
    #[test]
    fn file_name_shape(start in any_date(), nif in "[0-9]{9}") {
        let at = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();
        let name = codec::file_name(&nif, start, at);
        prop_assert_eq!(
            name,
            format!("SAFT_AO_{}_{}_20250630235959.xml", nif, start.format("%Y"))
        );
    }

    /// Period construction is order-sensitive: a range is valid exactly
    /// when start <= end.
    #[test]
    fn period_accepts_exactly_ordered_ranges(a in any_date(), b in any_date()) {
        prop_assert_eq!(Period::new(a, b).is_ok(), a <= b);
    }
}
