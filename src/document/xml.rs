//! Canonical XML serialization of the audit document using quick-xml.
//!
//! Output is pretty-printed (2-space indent) UTF-8 with the fixed SAF-T
//! namespace on the root element. quick-xml escapes text nodes, so free-text
//! configuration fields are safe without further handling.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use super::types::*;
use super::{SAFT_NAMESPACE, SCHEMA_LOCATION, XSI_NAMESPACE};
use crate::core::SaftError;

/// Header TaxAccountingBasis — F = Faturação (invoicing basis).
const TAX_ACCOUNTING_BASIS: &str = "F";
/// Header TaxEntity — 0 = Sede (head office).
const TAX_ENTITY: &str = "0";
/// Header SoftwareValidationNumber — no certification number assigned.
const SOFTWARE_VALIDATION_NUMBER: &str = "0";
/// Header AuditFileVersion.
const AUDIT_FILE_VERSION: &str = "1.01_01";
/// Customer SelfBillingIndicator — self-billing agreements not supported.
const SELF_BILLING_INDICATOR: &str = "0";
/// Product ProductType — always physical product, no service branch exists.
const PRODUCT_TYPE: &str = "P";

fn xml_io(e: std::io::Error) -> SaftError {
    SaftError::Xml(format!("XML write error: {e}"))
}

struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    fn new() -> Result<Self, SaftError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    fn into_string(self) -> Result<String, SaftError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SaftError::Xml(format!("XML UTF-8 error: {e}")))
    }

    fn start(&mut self, name: &str) -> Result<&mut Self, SaftError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn start_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SaftError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn end(&mut self, name: &str) -> Result<&mut Self, SaftError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, SaftError> {
        self.start(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end(name)
    }
}

/// Serialize the document to canonical pretty-printed XML.
pub fn to_xml(doc: &AuditDocument) -> Result<String, SaftError> {
    let mut w = XmlWriter::new()?;

    w.start_with_attrs(
        "AuditFile",
        &[
            ("xmlns", SAFT_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", SCHEMA_LOCATION),
        ],
    )?;

    write_header(&mut w, &doc.header)?;
    write_master_files(&mut w, &doc.master_files)?;
    write_general_ledger(&mut w, &doc.general_ledger)?;
    write_source_documents(&mut w, &doc.source_documents)?;

    w.end("AuditFile")?;
    w.into_string()
}

fn write_header(w: &mut XmlWriter, header: &Header) -> Result<(), SaftError> {
    w.start("Header")?;
    w.text_element("AuditFileVersion", AUDIT_FILE_VERSION)?;
    w.text_element("CompanyID", &header.tax_registration_number)?;
    w.text_element("TaxRegistrationNumber", &header.tax_registration_number)?;
    w.text_element("TaxAccountingBasis", TAX_ACCOUNTING_BASIS)?;
    w.text_element("CompanyName", &header.company_name)?;
    // BusinessName repeats the legal name; no separate trading name is kept.
    w.text_element("BusinessName", &header.company_name)?;
    write_address(w, "CompanyAddress", &header.company_address)?;
    w.text_element("FiscalYear", &header.fiscal_year.to_string())?;
    w.text_element("StartDate", &header.start_date.to_string())?;
    w.text_element("EndDate", &header.end_date.to_string())?;
    w.text_element("CurrencyCode", &header.currency_code)?;
    w.text_element("DateCreated", &header.date_created.to_string())?;
    w.text_element("TaxEntity", TAX_ENTITY)?;
    w.text_element("ProductCompanyTaxID", &header.tax_registration_number)?;
    w.text_element("SoftwareValidationNumber", SOFTWARE_VALIDATION_NUMBER)?;
    w.text_element("ProductID", &header.product_id)?;
    w.text_element("ProductVersion", &header.product_version)?;
    w.text_element("HeaderComment", &header.header_comment)?;
    w.text_element("Telephone", "")?;
    w.text_element("Fax", "")?;
    w.text_element("Email", "")?;
    w.text_element("Website", "")?;
    w.end("Header")?;
    Ok(())
}

fn write_address(w: &mut XmlWriter, tag: &str, address: &Address) -> Result<(), SaftError> {
    w.start(tag)?;
    w.text_element("BuildingNumber", &address.building_number)?;
    w.text_element("StreetName", &address.street_name)?;
    w.text_element("AddressDetail", &address.address_detail)?;
    w.text_element("City", &address.city)?;
    w.text_element("PostalCode", &address.postal_code)?;
    w.text_element("Region", &address.region)?;
    w.text_element("Country", &address.country)?;
    w.end(tag)?;
    Ok(())
}

fn write_master_files(w: &mut XmlWriter, master: &MasterFiles) -> Result<(), SaftError> {
    w.start("MasterFiles")?;

    w.start("GeneralLedgerAccounts")?;
    for account in &master.accounts {
        w.start("Account")?;
        w.text_element("AccountID", &account.account_id)?;
        w.text_element("AccountDescription", &account.description)?;
        w.text_element("StandardAccountID", &account.account_id)?;
        w.text_element("GroupingCategory", &account.grouping_category)?;
        w.text_element("GroupingCode", account.grouping_code())?;
        w.text_element("TaxonomyCode", "")?;
        w.end("Account")?;
    }
    w.end("GeneralLedgerAccounts")?;

    w.start("Customers")?;
    for customer in &master.customers {
        w.start("Customer")?;
        w.text_element("CustomerID", &customer.customer_id)?;
        w.text_element("AccountID", super::tables::CUSTOMER_ACCOUNT_ID)?;
        w.text_element("CustomerTaxID", &customer.tax_id)?;
        w.text_element("CompanyName", &customer.company_name)?;
        write_address(w, "BillingAddress", &customer.billing_address)?;
        w.text_element("Telephone", &customer.telephone)?;
        w.text_element("Fax", "")?;
        w.text_element("Email", &customer.email)?;
        w.text_element("Website", &customer.website)?;
        w.text_element("SelfBillingIndicator", SELF_BILLING_INDICATOR)?;
        w.end("Customer")?;
    }
    w.end("Customers")?;

    // Structurally present, always empty.
    w.start("Suppliers")?;
    w.end("Suppliers")?;

    w.start("Products")?;
    for product in &master.products {
        w.start("Product")?;
        w.text_element("ProductType", PRODUCT_TYPE)?;
        w.text_element("ProductCode", &product.code)?;
        w.text_element("ProductGroup", &product.group)?;
        w.text_element("ProductDescription", &product.description)?;
        w.text_element("ProductNumberCode", &product.number_code)?;
        w.end("Product")?;
    }
    w.end("Products")?;

    w.start("TaxTable")?;
    for entry in &master.tax_table {
        w.start("TaxTableEntry")?;
        w.text_element("TaxType", entry.tax_type)?;
        w.text_element("TaxCountryRegion", entry.country_region)?;
        w.text_element("TaxCode", entry.tax_code)?;
        w.text_element("Description", entry.description)?;
        w.text_element("TaxPercentage", entry.percentage)?;
        w.end("TaxTableEntry")?;
    }
    w.end("TaxTable")?;

    w.end("MasterFiles")?;
    Ok(())
}

fn write_general_ledger(w: &mut XmlWriter, ledger: &GeneralLedger) -> Result<(), SaftError> {
    w.start("GeneralLedger")?;
    write_section_totals(w, &ledger.totals)?;
    w.end("GeneralLedger")?;
    Ok(())
}

fn write_source_documents(w: &mut XmlWriter, docs: &SourceDocuments) -> Result<(), SaftError> {
    w.start("SourceDocuments")?;

    w.start("SalesInvoices")?;
    write_section_totals(w, &docs.sales_invoices)?;
    w.end("SalesInvoices")?;

    w.start("MovementOfGoods")?;
    w.text_element(
        "NumberOfMovementLines",
        &docs.movement_of_goods.number_of_movement_lines.to_string(),
    )?;
    w.text_element(
        "TotalQuantityIssued",
        &docs.movement_of_goods.total_quantity_issued,
    )?;
    w.end("MovementOfGoods")?;

    w.start("WorkingDocuments")?;
    write_section_totals(w, &docs.working_documents)?;
    w.end("WorkingDocuments")?;

    w.start("Payments")?;
    write_section_totals(w, &docs.payments)?;
    w.end("Payments")?;

    w.end("SourceDocuments")?;
    Ok(())
}

fn write_section_totals(w: &mut XmlWriter, totals: &SectionTotals) -> Result<(), SaftError> {
    w.text_element("NumberOfEntries", &totals.number_of_entries.to_string())?;
    w.text_element("TotalDebit", &totals.total_debit)?;
    w.text_element("TotalCredit", &totals.total_credit)?;
    Ok(())
}
