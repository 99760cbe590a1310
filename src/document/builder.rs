use chrono::NaiveDate;

use super::tables;
use super::types::*;
use crate::core::{CustomerView, Period, ProductView, TaxConfiguration};

/// Generic taxpayer number used when a customer's NIF is unknown
/// (consumidor final).
pub const ANONYMOUS_TAX_ID: &str = "999999999";

/// Country code applied when a billing address carries none.
pub const DEFAULT_COUNTRY: &str = "AO";

/// Product group applied when a product has no category.
pub const DEFAULT_PRODUCT_GROUP: &str = "Outros";

/// Assemble the full audit document from a configuration, a reporting
/// period, and the customer/product records selected by the caller.
///
/// The caller is responsible for the selection rule (records created on or
/// before the period end); any lookup failure must abort before this point
/// so that no partial document is ever produced.
pub fn build_document(
    config: &TaxConfiguration,
    period: &Period,
    customers: &[CustomerView],
    products: &[ProductView],
    generated_on: NaiveDate,
) -> AuditDocument {
    AuditDocument {
        header: build_header(config, period, generated_on),
        master_files: MasterFiles {
            accounts: tables::chart_of_accounts(),
            customers: customers.iter().map(build_customer).collect(),
            suppliers: Vec::new(),
            products: products.iter().map(build_product).collect(),
            tax_table: tables::TAX_TABLE.to_vec(),
        },
        general_ledger: GeneralLedger::default(),
        source_documents: SourceDocuments::default(),
    }
}

fn build_header(config: &TaxConfiguration, period: &Period, generated_on: NaiveDate) -> Header {
    Header {
        tax_registration_number: config.tax_registration_number.clone(),
        company_name: config.company_name.clone(),
        company_address: Address {
            building_number: String::new(),
            street_name: String::new(),
            address_detail: config.address_detail.clone(),
            city: config.city.clone(),
            postal_code: config.postal_code.clone().unwrap_or_default(),
            region: config.region.clone(),
            country: config.country_code.clone(),
        },
        fiscal_year: config.fiscal_year,
        start_date: period.start,
        end_date: period.end,
        currency_code: config.currency_code.clone(),
        date_created: generated_on,
        product_id: config.software_name.clone(),
        product_version: config.software_version.clone(),
        header_comment: format!(
            "Ficheiro SAFT-AO gerado automaticamente pelo {}",
            config.software_name
        ),
    }
}

fn build_customer(view: &CustomerView) -> Customer {
    Customer {
        customer_id: view.id.clone(),
        tax_id: view
            .tax_id
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| ANONYMOUS_TAX_ID.into()),
        company_name: view.name.clone(),
        billing_address: Address {
            building_number: String::new(),
            street_name: String::new(),
            address_detail: view.billing_street.clone().unwrap_or_default(),
            city: view.billing_city.clone().unwrap_or_default(),
            postal_code: view.billing_postal_code.clone().unwrap_or_default(),
            region: view.billing_region.clone().unwrap_or_default(),
            country: view
                .billing_country
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COUNTRY.into()),
        },
        telephone: view.phone.clone().unwrap_or_default(),
        email: view.email.clone().unwrap_or_default(),
        website: view.website.clone().unwrap_or_default(),
    }
}

fn build_product(view: &ProductView) -> Product {
    // Code falls back to the record's internal id when no external code is set.
    let code = view
        .code
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| view.id.clone());
    Product {
        code: code.clone(),
        group: view
            .category
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_GROUP.into()),
        description: view.name.clone(),
        number_code: code,
    }
}
