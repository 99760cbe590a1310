use chrono::{TimeZone, Utc};
use saftao::codec;
use saftao::core::{CustomerView, ProductView, TaxConfiguration};
use saftao::lifecycle::{ExportService, GenerateRequest, MockAgtClient, RecordStore};
use saftao::store::{MemoryFileStore, MemoryRecordStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Seed a company profile and some master data
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
    let created = Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 0).unwrap();
    store.add_customer(CustomerView {
        id: "cust-1".into(),
        name: "Construções do Sul Lda".into(),
        tax_id: Some("541200987".into()),
        phone: Some("+244 923 000 111".into()),
        email: Some("geral@construsul.ao".into()),
        website: None,
        billing_street: Some("Avenida 4 de Fevereiro 100".into()),
        billing_city: Some("Luanda".into()),
        billing_postal_code: None,
        billing_region: Some("Luanda".into()),
        billing_country: Some("AO".into()),
        created_at: created,
    });
    store.add_product(ProductView {
        id: "prod-1".into(),
        name: "Cimento 50kg".into(),
        code: Some("CIM-50".into()),
        category: Some("Materiais".into()),
        created_at: created,
    });
    store.set_invoice_count(128);

    let files = MemoryFileStore::new();
    let service = ExportService::new(&store, &files, MockAgtClient);

    // Generate an export for January 2024
    let outcome = service
        .generate(&GenerateRequest {
            config_id: "cfg-1".into(),
            period_start: "2024-01-01".into(),
            period_end: "2024-01-31".into(),
            name: "Janeiro 2024".into(),
        })
        .expect("request should be well-formed");
    println!("Generate: {} ({})", outcome.message, outcome.id);

    let record = store.get_export(&outcome.id).unwrap().unwrap();
    println!("Status:   {}", record.status);
    println!("File:     {}", record.file_path.as_deref().unwrap());
    println!(
        "Counts:   {} invoices, {} accounts, {} products",
        record.total_invoices.unwrap(),
        record.total_accounts.unwrap(),
        record.total_products.unwrap()
    );

    // Validate the stored artifact against the SAFT-AO schema
    let validated = service.validate(&outcome.id).unwrap();
    println!("Validate: {}", validated.message);
    for error in &validated.errors {
        println!("  {}", error);
    }

    // Submit to the (mock) AGT endpoint
    let submitted = service.submit(&outcome.id).unwrap();
    println!(
        "Submit:   {} (reference {})",
        submitted.message,
        submitted.submission_reference.unwrap()
    );

    // Download and show the first lines of the XML
    let payload = service.download(&outcome.id).unwrap();
    println!(
        "Download: {} ({} bytes, {})",
        payload.file_name, payload.content_length, payload.content_type
    );
    let xml = String::from_utf8(payload.bytes).unwrap();
    for line in xml.lines().take(12) {
        println!("  {}", line);
    }

    // The stored artifact round-trips to the same XML
    let artifact = record.artifact.as_deref().unwrap();
    assert_eq!(codec::decode(artifact).unwrap(), xml);
    println!(
        "Artifact: {} base64 chars, decodes to {} XML bytes",
        artifact.len(),
        xml.len()
    );
}
