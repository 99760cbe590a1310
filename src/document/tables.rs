//! Compiled-in reference tables.
//!
//! The chart of accounts and the VAT table are fixed data, not derived from
//! input records. A fuller accounting integration would source the chart
//! from a ledger module; this mirrors the source system, which ships these
//! rows verbatim.

use super::types::{Account, TaxTableEntry};

/// Fixed chart of accounts: (AccountID, AccountDescription, GroupingCategory).
pub const CHART_OF_ACCOUNTS: &[(&str, &str, &str)] = &[
    ("111", "Caixa", "Cash"),
    ("112", "Depósitos à Ordem", "Bank"),
    ("121", "Clientes", "Receivables"),
    ("221", "Fornecedores", "Payables"),
    ("261", "Capital", "Equity"),
    ("311", "Compras", "Purchases"),
    ("711", "Vendas", "Sales"),
];

/// Ledger account every customer entry references (121 — Clientes).
pub const CUSTOMER_ACCOUNT_ID: &str = "121";

/// Angolan VAT table: standard 14%, intermediate 7%, exempt 0%.
pub const TAX_TABLE: &[TaxTableEntry] = &[
    TaxTableEntry {
        tax_type: "IVA",
        country_region: "AO",
        tax_code: "P",
        description: "VAT",
        percentage: "14.00",
    },
    TaxTableEntry {
        tax_type: "IVA",
        country_region: "AO",
        tax_code: "I",
        description: "VAT",
        percentage: "7.00",
    },
    TaxTableEntry {
        tax_type: "IVA",
        country_region: "AO",
        tax_code: "E",
        description: "VAT",
        percentage: "0.00",
    },
];

/// Materialize the fixed chart as account rows.
pub fn chart_of_accounts() -> Vec<Account> {
    CHART_OF_ACCOUNTS
        .iter()
        .map(|(id, description, category)| Account {
            account_id: (*id).into(),
            description: (*description).into(),
            grouping_category: (*category).into(),
        })
        .collect()
}
