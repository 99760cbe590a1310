use chrono::{TimeZone, Utc};
use saftao::core::{ExportRecord, Period, TaxConfiguration};
use saftao::lifecycle::{ExportService, MockAgtClient, RecordStore};
use saftao::store::{MemoryFileStore, MemoryRecordStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = MemoryRecordStore::new();
    store.add_configuration(
        "cfg-1",
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
        },
    );

    // Three records stuck in Processing, as left behind by interrupted
    // interactive calls. One points at a configuration that no longer exists.
    let period = Period::parse("2024-01-01", "2024-03-31").unwrap();
    for (id, name, config_id, hour) in [
        ("exp-a", "Q1 2024", "cfg-1", 8),
        ("exp-b", "Q1 2024 (retry)", "cfg-1", 9),
        ("exp-c", "Q1 2024 (old profile)", "cfg-gone", 10),
    ] {
        let record = ExportRecord::new(
            id,
            name,
            config_id,
            &period,
            Utc.with_ymd_and_hms(2024, 4, 1, hour, 0, 0).unwrap(),
        );
        store.create_export(&record).unwrap();
    }

    let files = MemoryFileStore::new();
    let service = ExportService::new(&store, &files, MockAgtClient);

    let outcomes = service.process_pending().unwrap();
    println!("Swept {} pending exports:", outcomes.len());
    for outcome in &outcomes {
        match &outcome.message {
            None => println!("  {} -> {}", outcome.id, outcome.status),
            Some(message) => println!("  {} -> {} ({})", outcome.id, outcome.status, message),
        }
    }

    // A second sweep finds nothing: Failed records are never retried.
    let again = service.process_pending().unwrap();
    println!("Second sweep picked up {} records", again.len());
}
