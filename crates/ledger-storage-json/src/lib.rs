//! Filesystem-backed JSON sales provider: one `<identity>.json` file per identity, holding the
//! identity's sale records as a JSON array.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use ledger_core::{CoreError, CoreResult, SalesProvider, SalesRecorder};
use ledger_domain::{Identity, SaleRecord};
use tracing::debug;

const SALES_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug)]
pub struct JsonSalesStore {
    sales_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSalesStore {
    pub fn new(sales_dir: PathBuf) -> CoreResult<Self> {
        fs::create_dir_all(&sales_dir)?;
        Ok(Self {
            sales_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn sales_dir(&self) -> &Path {
        &self.sales_dir
    }

    pub fn sales_path(&self, identity: &Identity) -> PathBuf {
        self.sales_dir
            .join(format!("{}.{}", identity.storage_key(), SALES_EXTENSION))
    }

    /// Reads every stored record for `identity`; a missing file means no sales yet.
    pub fn load_sales(&self, identity: &Identity) -> CoreResult<Vec<SaleRecord>> {
        let path = self.sales_path(identity);
        if !path.exists() {
            return Ok(Vec::new());
        }
        load_sales_from_path(&path)
    }

    /// Replaces the stored records for `identity`.
    pub fn save_sales(&self, identity: &Identity, records: &[SaleRecord]) -> CoreResult<()> {
        save_sales_to_path(records, &self.sales_path(identity))
    }
}

impl SalesProvider for JsonSalesStore {
    fn fetch_sales(&self, identity: &Identity) -> CoreResult<Vec<SaleRecord>> {
        let records = self
            .load_sales(identity)
            .map_err(|err| CoreError::FetchFailure(err.to_string()))?;
        debug!(%identity, count = records.len(), "sales loaded from disk");
        Ok(records)
    }
}

impl SalesRecorder for JsonSalesStore {
    fn record_sale(&self, identity: &Identity, record: SaleRecord) -> CoreResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CoreError::Storage("sales store lock poisoned".into()))?;
        let mut records = self.load_sales(identity)?;
        records.push(record);
        self.save_sales(identity, &records)
    }
}

/// Saves records to an arbitrary path on disk.
pub fn save_sales_to_path(records: &[SaleRecord], path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(records).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads records from the provided filesystem path.
pub fn load_sales_from_path(path: &Path) -> CoreResult<Vec<SaleRecord>> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> CoreResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
