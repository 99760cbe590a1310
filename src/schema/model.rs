//! Structural model of the bundled XSD.
//!
//! Each entry lists the ordered child sequence of one complex element.
//! Elements with no entry are leaves: text content only, element children
//! are rejected. The tables must stay in sync with `SAFTAO1.01_01.xsd`.

pub(crate) struct ElementRule {
    pub name: &'static str,
    pub children: &'static [ChildRule],
}

pub(crate) struct ChildRule {
    pub name: &'static str,
    pub min: u32,
    pub unbounded: bool,
}

const fn req(name: &'static str) -> ChildRule {
    ChildRule {
        name,
        min: 1,
        unbounded: false,
    }
}

const fn opt(name: &'static str) -> ChildRule {
    ChildRule {
        name,
        min: 0,
        unbounded: false,
    }
}

const fn many(name: &'static str, min: u32) -> ChildRule {
    ChildRule {
        name,
        min,
        unbounded: true,
    }
}

const ADDRESS: &[ChildRule] = &[
    opt("BuildingNumber"),
    opt("StreetName"),
    req("AddressDetail"),
    req("City"),
    opt("PostalCode"),
    opt("Region"),
    req("Country"),
];

const DOCUMENT_TOTALS: &[ChildRule] = &[req("NumberOfEntries"), req("TotalDebit"), req("TotalCredit")];

pub(crate) const RULES: &[ElementRule] = &[
    ElementRule {
        name: "AuditFile",
        children: &[
            req("Header"),
            req("MasterFiles"),
            req("GeneralLedger"),
            req("SourceDocuments"),
        ],
    },
    ElementRule {
        name: "Header",
        children: &[
            req("AuditFileVersion"),
            req("CompanyID"),
            req("TaxRegistrationNumber"),
            req("TaxAccountingBasis"),
            req("CompanyName"),
            req("BusinessName"),
            req("CompanyAddress"),
            req("FiscalYear"),
            req("StartDate"),
            req("EndDate"),
            req("CurrencyCode"),
            req("DateCreated"),
            req("TaxEntity"),
            req("ProductCompanyTaxID"),
            req("SoftwareValidationNumber"),
            req("ProductID"),
            req("ProductVersion"),
            req("HeaderComment"),
            opt("Telephone"),
            opt("Fax"),
            opt("Email"),
            opt("Website"),
        ],
    },
    ElementRule {
        name: "CompanyAddress",
        children: ADDRESS,
    },
    ElementRule {
        name: "BillingAddress",
        children: ADDRESS,
    },
    ElementRule {
        name: "MasterFiles",
        children: &[
            req("GeneralLedgerAccounts"),
            req("Customers"),
            req("Suppliers"),
            req("Products"),
            req("TaxTable"),
        ],
    },
    ElementRule {
        name: "GeneralLedgerAccounts",
        children: &[many("Account", 0)],
    },
    ElementRule {
        name: "Account",
        children: &[
            req("AccountID"),
            req("AccountDescription"),
            req("StandardAccountID"),
            req("GroupingCategory"),
            req("GroupingCode"),
            opt("TaxonomyCode"),
        ],
    },
    ElementRule {
        name: "Customers",
        children: &[many("Customer", 0)],
    },
    ElementRule {
        name: "Customer",
        children: &[
            req("CustomerID"),
            req("AccountID"),
            req("CustomerTaxID"),
            req("CompanyName"),
            req("BillingAddress"),
            opt("Telephone"),
            opt("Fax"),
            opt("Email"),
            opt("Website"),
            req("SelfBillingIndicator"),
        ],
    },
    ElementRule {
        name: "Suppliers",
        children: &[many("Supplier", 0)],
    },
    ElementRule {
        name: "Supplier",
        children: &[req("SupplierID")],
    },
    ElementRule {
        name: "Products",
        children: &[many("Product", 0)],
    },
    ElementRule {
        name: "Product",
        children: &[
            req("ProductType"),
            req("ProductCode"),
            opt("ProductGroup"),
            req("ProductDescription"),
            req("ProductNumberCode"),
        ],
    },
    ElementRule {
        name: "TaxTable",
        children: &[many("TaxTableEntry", 1)],
    },
    ElementRule {
        name: "TaxTableEntry",
        children: &[
            req("TaxType"),
            req("TaxCountryRegion"),
            req("TaxCode"),
            req("Description"),
            req("TaxPercentage"),
        ],
    },
    ElementRule {
        name: "GeneralLedger",
        children: DOCUMENT_TOTALS,
    },
    ElementRule {
        name: "SourceDocuments",
        children: &[
            req("SalesInvoices"),
            req("MovementOfGoods"),
            req("WorkingDocuments"),
            req("Payments"),
        ],
    },
    ElementRule {
        name: "SalesInvoices",
        children: DOCUMENT_TOTALS,
    },
    ElementRule {
        name: "MovementOfGoods",
        children: &[req("NumberOfMovementLines"), req("TotalQuantityIssued")],
    },
    ElementRule {
        name: "WorkingDocuments",
        children: DOCUMENT_TOTALS,
    },
    ElementRule {
        name: "Payments",
        children: DOCUMENT_TOTALS,
    },
];

pub(crate) fn rule_for(name: &str) -> Option<&'static ElementRule> {
    RULES.iter().find(|r| r.name == name)
}
