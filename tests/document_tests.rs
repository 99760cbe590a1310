use chrono::{NaiveDate, TimeZone, Utc};
use saftao::core::{CustomerView, Period, ProductView, TaxConfiguration};
use saftao::document::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config() -> TaxConfiguration {
    TaxConfiguration {
        tax_registration_number: "123456789".into(),
        company_name: "Acme AO".into(),
        fiscal_year: 2024,
        currency_code: "AOA".into(),
        address_detail: "Rua Rainha Ginga 12".into(),
        city: "Luanda".into(),
        postal_code: None,
        region: "Luanda".into(),
        country_code: "AO".into(),
        software_name: "AcmeERP".into(),
        software_version: "2.1".into(),
    }
}

fn period() -> Period {
    Period::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap()
}

fn customer(id: &str, name: &str) -> CustomerView {
    CustomerView {
        id: id.into(),
        name: name.into(),
        tax_id: None,
        phone: None,
        email: None,
        website: None,
        billing_street: None,
        billing_city: None,
        billing_postal_code: None,
        billing_region: None,
        billing_country: None,
        created_at: Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap(),
    }
}

fn product(id: &str, name: &str) -> ProductView {
    ProductView {
        id: id.into(),
        name: name.into(),
        code: None,
        category: None,
        created_at: Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn header_carries_configuration_and_period() {
    let doc = build_document(&config(), &period(), &[], &[], date(2024, 2, 1));
    let xml = to_xml(&doc).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<AuditFile xmlns=\"urn:OECD:StandardAuditFile-Tax:PT_1.01_01\""));
    assert!(xml.contains("SAFTAO1.01_01.xsd"));
    assert!(xml.contains("<AuditFileVersion>1.01_01</AuditFileVersion>"));
    assert!(xml.contains("<CompanyID>123456789</CompanyID>"));
    assert!(xml.contains("<TaxRegistrationNumber>123456789</TaxRegistrationNumber>"));
    assert!(xml.contains("<TaxAccountingBasis>F</TaxAccountingBasis>"));
    assert!(xml.contains("<TaxEntity>0</TaxEntity>"));
    assert!(xml.contains("<SoftwareValidationNumber>0</SoftwareValidationNumber>"));
    assert!(xml.contains("<FiscalYear>2024</FiscalYear>"));
    assert!(xml.contains("<StartDate>2024-01-01</StartDate>"));
    assert!(xml.contains("<EndDate>2024-01-31</EndDate>"));
    assert!(xml.contains("<CurrencyCode>AOA</CurrencyCode>"));
    assert!(xml.contains("<DateCreated>2024-02-01</DateCreated>"));
    assert!(xml.contains("<ProductID>AcmeERP</ProductID>"));
    assert!(xml.contains("<ProductVersion>2.1</ProductVersion>"));
    assert!(xml.contains("Ficheiro SAFT-AO gerado automaticamente pelo AcmeERP"));
}

#[test]
fn free_text_fields_are_escaped() {
    let mut cfg = config();
    cfg.company_name = "Silva & Filhos <Lda>".into();
    let doc = build_document(&cfg, &period(), &[], &[], date(2024, 2, 1));
    let xml = to_xml(&doc).unwrap();

    assert!(xml.contains("Silva &amp; Filhos &lt;Lda&gt;"));
    assert!(!xml.contains("Silva & Filhos <Lda>"));
}

#[test]
fn fixed_chart_of_accounts_is_emitted() {
    let doc = build_document(&config(), &period(), &[], &[], date(2024, 2, 1));
    assert_eq!(doc.master_files.accounts.len(), 7);
    let xml = to_xml(&doc).unwrap();

    assert_eq!(xml.matches("<Account>").count(), 7);
    assert!(xml.contains("<AccountID>111</AccountID>"));
    assert!(xml.contains("<AccountDescription>Caixa</AccountDescription>"));
    assert!(xml.contains("<GroupingCategory>Sales</GroupingCategory>"));
    // GroupingCode is the leading digit of the account id.
    assert!(xml.contains("<GroupingCode>7</GroupingCode>"));
}

#[test]
fn tax_table_has_three_angola_rates() {
    let doc = build_document(&config(), &period(), &[], &[], date(2024, 2, 1));
    let xml = to_xml(&doc).unwrap();

    assert_eq!(xml.matches("<TaxTableEntry>").count(), 3);
    assert!(xml.contains("<TaxPercentage>14.00</TaxPercentage>"));
    assert!(xml.contains("<TaxPercentage>7.00</TaxPercentage>"));
    assert!(xml.contains("<TaxPercentage>0.00</TaxPercentage>"));
    assert_eq!(xml.matches("<TaxCountryRegion>AO</TaxCountryRegion>").count(), 3);
}

#[test]
fn customer_defaults_applied() {
    let minimal = customer("cust-1", "Cliente Sem Dados");
    let doc = build_document(&config(), &period(), &[minimal], &[], date(2024, 2, 1));

    let entry = &doc.master_files.customers[0];
    assert_eq!(entry.tax_id, "999999999");
    assert_eq!(entry.billing_address.country, "AO");
    assert_eq!(entry.billing_address.city, "");

    let xml = to_xml(&doc).unwrap();
    assert!(xml.contains("<CustomerTaxID>999999999</CustomerTaxID>"));
    // Every customer references the fixed receivables account.
    assert!(xml.contains("<AccountID>121</AccountID>"));
    assert!(xml.contains("<SelfBillingIndicator>0</SelfBillingIndicator>"));
}

#[test]
fn customer_with_full_address() {
    let mut full = customer("cust-2", "Cliente Completo");
    full.tax_id = Some("500123456".into());
    full.billing_street = Some("Av. 4 de Fevereiro 100".into());
    full.billing_city = Some("Benguela".into());
    full.billing_country = Some("PT".into());
    full.email = Some("geral@cliente.ao".into());

    let doc = build_document(&config(), &period(), &[full], &[], date(2024, 2, 1));
    let entry = &doc.master_files.customers[0];
    assert_eq!(entry.tax_id, "500123456");
    assert_eq!(entry.billing_address.country, "PT");
    assert_eq!(entry.billing_address.address_detail, "Av. 4 de Fevereiro 100");
    assert_eq!(entry.email, "geral@cliente.ao");
}

#[test]
fn product_code_falls_back_to_internal_id() {
    let no_code = product("prod-internal-1", "Cimento 50kg");
    let mut with_code = product("prod-internal-2", "Tinta 5L");
    with_code.code = Some("TIN-5L".into());
    with_code.category = Some("Tintas".into());

    let doc = build_document(
        &config(),
        &period(),
        &[],
        &[no_code, with_code],
        date(2024, 2, 1),
    );
    let products = &doc.master_files.products;
    assert_eq!(products[0].code, "prod-internal-1");
    assert_eq!(products[0].number_code, "prod-internal-1");
    assert_eq!(products[0].group, "Outros");
    assert_eq!(products[1].code, "TIN-5L");
    assert_eq!(products[1].group, "Tintas");

    let xml = to_xml(&doc).unwrap();
    // No service classification exists; every product is type P.
    assert_eq!(xml.matches("<ProductType>P</ProductType>").count(), 2);
}

#[test]
fn suppliers_section_is_present_and_empty() {
    let doc = build_document(&config(), &period(), &[], &[], date(2024, 2, 1));
    assert!(doc.master_files.suppliers.is_empty());

    let xml = to_xml(&doc).unwrap();
    assert!(xml.contains("<Suppliers>") || xml.contains("<Suppliers/>"));
    assert!(!xml.contains("<Supplier>"));
}

#[test]
fn ledger_and_source_documents_are_zeroed() {
    let doc = build_document(&config(), &period(), &[], &[], date(2024, 2, 1));
    let xml = to_xml(&doc).unwrap();

    // GeneralLedger + SalesInvoices + WorkingDocuments + Payments.
    assert_eq!(xml.matches("<NumberOfEntries>0</NumberOfEntries>").count(), 4);
    assert_eq!(xml.matches("<TotalDebit>0.00</TotalDebit>").count(), 4);
    assert_eq!(xml.matches("<TotalCredit>0.00</TotalCredit>").count(), 4);
    assert!(xml.contains("<NumberOfMovementLines>0</NumberOfMovementLines>"));
    assert!(xml.contains("<TotalQuantityIssued>0.00</TotalQuantityIssued>"));
}

#[test]
fn serialization_is_deterministic() {
    let customers = [customer("cust-1", "Alfa"), customer("cust-2", "Beta")];
    let products = [product("prod-1", "Gama")];
    let a = to_xml(&build_document(
        &config(),
        &period(),
        &customers,
        &products,
        date(2024, 2, 1),
    ))
    .unwrap();
    let b = to_xml(&build_document(
        &config(),
        &period(),
        &customers,
        &products,
        date(2024, 2, 1),
    ))
    .unwrap();
    assert_eq!(a, b);
}
