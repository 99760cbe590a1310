use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::{
    CustomerView, ExportRecord, ExportStatus, Period, ProductView, SaftError, TaxConfiguration,
};
use crate::lifecycle::{ExportUpdate, FileStore, RecordStore};

/// In-memory record store, seedable with configurations and master data.
///
/// The invoice count can be pinned with [`set_invoice_count`] to model the
/// period-scoped invoice query without modeling invoices themselves.
///
/// [`set_invoice_count`]: MemoryRecordStore::set_invoice_count
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    exports: HashMap<String, ExportRecord>,
    configurations: HashMap<String, TaxConfiguration>,
    customers: Vec<CustomerView>,
    products: Vec<ProductView>,
    invoice_count: u64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_configuration(&self, id: impl Into<String>, config: TaxConfiguration) {
        self.inner
            .lock()
            .unwrap()
            .configurations
            .insert(id.into(), config);
    }

    pub fn add_customer(&self, customer: CustomerView) {
        self.inner.lock().unwrap().customers.push(customer);
    }

    pub fn add_product(&self, product: ProductView) {
        self.inner.lock().unwrap().products.push(product);
    }

    pub fn set_invoice_count(&self, count: u64) {
        self.inner.lock().unwrap().invoice_count = count;
    }
}

impl RecordStore for MemoryRecordStore {
    fn create_export(&self, record: &ExportRecord) -> Result<(), SaftError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.exports.contains_key(&record.id) {
            return Err(SaftError::Store(format!(
                "duplicate export id {}",
                record.id
            )));
        }
        inner.exports.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn get_export(&self, id: &str) -> Result<Option<ExportRecord>, SaftError> {
        Ok(self.inner.lock().unwrap().exports.get(id).cloned())
    }

    fn update_export(&self, id: &str, update: &ExportUpdate) -> Result<(), SaftError> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .exports
            .get_mut(id)
            .ok_or_else(|| SaftError::Store(format!("no export record {id}")))?;
        update.apply_to(record);
        Ok(())
    }

    fn exports_with_status(&self, status: ExportStatus) -> Result<Vec<ExportRecord>, SaftError> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<ExportRecord> = inner
            .exports
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    fn get_configuration(&self, id: &str) -> Result<Option<TaxConfiguration>, SaftError> {
        Ok(self.inner.lock().unwrap().configurations.get(id).cloned())
    }

    fn customers_created_until(&self, cutoff: NaiveDate) -> Result<Vec<CustomerView>, SaftError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .customers
            .iter()
            .filter(|c| c.created_at.date_naive() <= cutoff)
            .cloned()
            .collect())
    }

    fn products_created_until(&self, cutoff: NaiveDate) -> Result<Vec<ProductView>, SaftError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .products
            .iter()
            .filter(|p| p.created_at.date_naive() <= cutoff)
            .cloned()
            .collect())
    }

    fn count_invoices(&self, _period: &Period) -> Result<u64, SaftError> {
        Ok(self.inner.lock().unwrap().invoice_count)
    }

    fn count_accounts(&self) -> Result<u64, SaftError> {
        Ok(self.inner.lock().unwrap().customers.len() as u64)
    }

    fn count_products(&self) -> Result<u64, SaftError> {
        Ok(self.inner.lock().unwrap().products.len() as u64)
    }
}

/// In-memory file store keyed by path.
#[derive(Default)]
pub struct MemoryFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths written so far, unordered.
    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    /// Drop a stored file, for tests exercising the missing-file path.
    pub fn remove(&self, path: &str) {
        self.files.lock().unwrap().remove(path);
    }
}

impl FileStore for MemoryFileStore {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), SaftError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, SaftError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| SaftError::NotFound(format!("no file at {path}")))
    }

    fn exists(&self, path: &str) -> Result<bool, SaftError> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }
}
