use chrono::NaiveDate;
use serde::Serialize;

/// The in-memory audit document tree. Built fresh for every generation,
/// serialized once, then discarded — it has no identity beyond the build.
#[derive(Debug, Clone, Serialize)]
pub struct AuditDocument {
    pub header: Header,
    pub master_files: MasterFiles,
    pub general_ledger: GeneralLedger,
    pub source_documents: SourceDocuments,
}

/// Header section: configuration and period metadata.
///
/// Fixed header codes (accounting basis `F`, tax entity `0`, self billing
/// `0`, software validation number `0`) are emitted by the serializer and
/// not carried here.
#[derive(Debug, Clone, Serialize)]
pub struct Header {
    /// CompanyID, TaxRegistrationNumber, and ProductCompanyTaxID all carry
    /// the configuration's NIF.
    pub tax_registration_number: String,
    /// CompanyName; BusinessName repeats it.
    pub company_name: String,
    pub company_address: Address,
    pub fiscal_year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub currency_code: String,
    /// DateCreated — the generation date.
    pub date_created: NaiveDate,
    /// ProductID — name of the producing software.
    pub product_id: String,
    pub product_version: String,
    pub header_comment: String,
}

/// A SAF-T address block (CompanyAddress / BillingAddress).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Address {
    pub building_number: String,
    pub street_name: String,
    pub address_detail: String,
    pub city: String,
    pub postal_code: String,
    pub region: String,
    pub country: String,
}

/// MasterFiles section.
#[derive(Debug, Clone, Serialize)]
pub struct MasterFiles {
    pub accounts: Vec<Account>,
    pub customers: Vec<Customer>,
    /// Always empty — no supplier data source is modeled. The serializer
    /// still emits a well-formed empty Suppliers section.
    pub suppliers: Vec<Supplier>,
    pub products: Vec<Product>,
    pub tax_table: Vec<TaxTableEntry>,
}

/// One general-ledger account row.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub account_id: String,
    pub description: String,
    /// SAF-T grouping category (Cash, Bank, Receivables, ...).
    pub grouping_category: String,
}

impl Account {
    /// GroupingCode is the leading digit of the account id. Empty for ids
    /// without a leading ASCII character.
    pub fn grouping_code(&self) -> &str {
        self.account_id.get(..1).unwrap_or("")
    }
}

/// One customer entry in MasterFiles.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub customer_id: String,
    /// Customer NIF; the jurisdiction's generic taxpayer number when unknown.
    pub tax_id: String,
    pub company_name: String,
    pub billing_address: Address,
    pub telephone: String,
    pub email: String,
    pub website: String,
}

/// Placeholder supplier entry. The section is structurally present but the
/// source system never populates it.
#[derive(Debug, Clone, Serialize)]
pub struct Supplier {
    pub supplier_id: String,
}

/// One product entry in MasterFiles. ProductType is always `P` — the source
/// system has no service classification.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub code: String,
    pub group: String,
    pub description: String,
    pub number_code: String,
}

/// One VAT table entry.
#[derive(Debug, Clone, Serialize)]
pub struct TaxTableEntry {
    pub tax_type: &'static str,
    pub country_region: &'static str,
    pub tax_code: &'static str,
    pub description: &'static str,
    /// Fixed-point literal, e.g. "14.00".
    pub percentage: &'static str,
}

/// GeneralLedger section — aggregate totals only, currently always zero.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneralLedger {
    pub totals: SectionTotals,
}

/// SourceDocuments section: four subsections carrying entry counts and
/// debit/credit totals, all zero — schema-valid but without transactional
/// detail, exactly as the source system emits them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceDocuments {
    pub sales_invoices: SectionTotals,
    pub movement_of_goods: MovementTotals,
    pub working_documents: SectionTotals,
    pub payments: SectionTotals,
}

/// NumberOfEntries / TotalDebit / TotalCredit triple.
#[derive(Debug, Clone, Serialize)]
pub struct SectionTotals {
    pub number_of_entries: u64,
    pub total_debit: String,
    pub total_credit: String,
}

impl Default for SectionTotals {
    fn default() -> Self {
        Self {
            number_of_entries: 0,
            total_debit: "0.00".into(),
            total_credit: "0.00".into(),
        }
    }
}

/// MovementOfGoods carries line/quantity counters instead of debit/credit.
#[derive(Debug, Clone, Serialize)]
pub struct MovementTotals {
    pub number_of_movement_lines: u64,
    pub total_quantity_issued: String,
}

impl Default for MovementTotals {
    fn default() -> Self {
        Self {
            number_of_movement_lines: 0,
            total_quantity_issued: "0.00".into(),
        }
    }
}
