use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::{
    common::{contains_folded, fold, parse_benchmark, same_name},
    error::LoadError,
    modules::source::{csv_reader, require_columns, RawTable, TableRead, TableSource},
    schemas::component::{Category, ComponentRecord},
};

const REQUIRED_COLUMNS: [&str; 3] = ["Type", "Model", "Benchmark"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading,
    Ready,
}

/// A table that contributed nothing to the catalog, and why.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TableFailure {
    pub table: String,
    pub reason: String,
}

/// What happened while the catalog was loaded.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub accepted_rows: usize,
    pub dropped_rows: usize,
    pub failed_tables: Vec<TableFailure>,
}

#[derive(Deserialize)]
struct RawComponentRow {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Benchmark")]
    benchmark: String,
    #[serde(rename = "URL", default)]
    url: Option<String>,
}

impl TryFrom<RawComponentRow> for ComponentRecord {
    type Error = anyhow::Error;
    fn try_from(row: RawComponentRow) -> anyhow::Result<Self> {
        let category = Category::from_label(&row.kind)
            .ok_or_else(|| anyhow::anyhow!("unknown type {:?}", row.kind))?;
        if row.model.is_empty() {
            anyhow::bail!("empty model");
        }
        let benchmark = parse_benchmark(&row.benchmark)
            .ok_or_else(|| anyhow::anyhow!("unusable benchmark {:?}", row.benchmark))?;
        Ok(Self {
            category,
            model: row.model,
            benchmark,
            reference_url: row.url.filter(|url| !url.is_empty()),
        })
    }
}

#[derive(Default)]
struct Contents {
    cpu: Vec<ComponentRecord>,
    gpu: Vec<ComponentRecord>,
    ram: Vec<ComponentRecord>,
    report: LoadReport,
}

impl Contents {
    fn shelf(&self, category: Category) -> &[ComponentRecord] {
        match category {
            Category::CPU => &self.cpu,
            Category::GPU => &self.gpu,
            Category::RAM => &self.ram,
        }
    }

    fn push(&mut self, record: ComponentRecord) {
        match record.category {
            Category::CPU => self.cpu.push(record),
            Category::GPU => self.gpu.push(record),
            Category::RAM => self.ram.push(record),
        }
    }

    fn ingest(tables: Vec<TableRead>) -> Self {
        let mut contents = Self::default();
        for table in tables {
            let outcome = table.and_then(|raw| contents.ingest_table(&raw));
            if let Err(e) = outcome {
                warn!(error = %e, "skipping catalog table");
                contents.report.failed_tables.push(TableFailure {
                    table: failed_table_name(&e),
                    reason: e.to_string(),
                });
            }
        }
        contents
    }

    fn ingest_table(&mut self, table: &RawTable) -> Result<(), LoadError> {
        let mut reader = csv_reader(table);
        require_columns(table, &mut reader, &REQUIRED_COLUMNS)?;

        for (line, row) in reader.deserialize::<RawComponentRow>().enumerate() {
            let record = row
                .map_err(anyhow::Error::from)
                .and_then(ComponentRecord::try_from);
            match record {
                Ok(record) => {
                    self.report.accepted_rows += 1;
                    self.push(record);
                }
                Err(e) => {
                    debug!(table = %table.name, row = line + 1, error = %e, "dropping row");
                    self.report.dropped_rows += 1;
                }
            }
        }
        Ok(())
    }
}

fn failed_table_name(e: &LoadError) -> String {
    match e {
        LoadError::Unreadable { source_name, .. } => source_name.clone(),
        LoadError::MissingColumn { table, .. } | LoadError::Csv { table, .. } => table.clone(),
    }
}

/// Benchmark records for every [`Category`], filled once and read-only afterwards.
///
/// Loading is single-flight: concurrent callers of [`Catalog::load`] wait for the first one,
/// and only the first one reads the source. Reads never lock.
pub struct Catalog {
    state: Mutex<LoadState>,
    contents: OnceCell<Contents>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoadState::Empty),
            contents: OnceCell::new(),
        }
    }

    /// Fill the catalog from `source`. Does nothing if it is already loaded.
    ///
    /// # Errors
    /// Errors only if the source as a whole is unreadable. The catalog then stays empty
    /// and a later call may try again. Malformed rows and broken tables are skipped and
    /// show up in [`Catalog::report`].
    pub async fn load<S: TableSource + ?Sized>(&self, source: &S) -> Result<(), LoadError> {
        let mut state = self.state.lock().await;
        if *state == LoadState::Ready {
            debug!(source = %source.name(), "catalog already loaded");
            return Ok(());
        }
        *state = LoadState::Loading;

        let tables = match source.read().await {
            Ok(tables) => tables,
            Err(e) => {
                *state = LoadState::Empty;
                return Err(e);
            }
        };
        let contents = Contents::ingest(tables);
        info!(
            source = %source.name(),
            cpus = contents.cpu.len(),
            gpus = contents.gpu.len(),
            rams = contents.ram.len(),
            dropped = contents.report.dropped_rows,
            failed_tables = contents.report.failed_tables.len(),
            "catalog loaded"
        );

        /* the state lock is held, so the cell is still empty */
        let _ = self.contents.set(contents);
        *state = LoadState::Ready;
        Ok(())
    }

    pub fn state(&self) -> LoadState {
        if self.contents.initialized() {
            return LoadState::Ready;
        }
        match self.state.try_lock() {
            Ok(state) => *state,
            Err(_) => LoadState::Loading,
        }
    }

    pub fn report(&self) -> Option<&LoadReport> {
        self.contents.get().map(|c| &c.report)
    }

    /// Every record of `category`, in the order they were read.
    pub fn list(&self, category: Category) -> &[ComponentRecord] {
        self.contents
            .get()
            .map(|c| c.shelf(category))
            .unwrap_or(&[])
    }

    /// Case-insensitive exact lookup by model name. The first record wins if a name repeats.
    pub fn get(&self, category: Category, model: &str) -> Option<&ComponentRecord> {
        self.list(category)
            .iter()
            .find(|record| same_name(&record.model, model))
    }

    /// Case-insensitive substring search over model names, in catalog order.
    ///
    /// The text is also matched against the category label, so searching `"cpu"` among
    /// CPUs returns all of them. Empty text matches everything.
    pub fn search(&self, category: Category, text: &str) -> Vec<&ComponentRecord> {
        let needle = fold(text);
        self.list(category)
            .iter()
            .filter(|record| {
                contains_folded(&record.model, &needle)
                    || contains_folded(record.category.label(), &needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::{Catalog, LoadState};
    use crate::{
        error::LoadError,
        modules::source::{testdata, CsvDirectory, TableRead, TableSource, TextTables},
        schemas::component::Category,
    };

    async fn fixture() -> Catalog {
        let catalog = Catalog::new();
        catalog
            .load(&CsvDirectory::new(testdata("catalog")))
            .await
            .unwrap();
        catalog
    }

    fn models(records: Vec<&crate::schemas::component::ComponentRecord>) -> Vec<&str> {
        records.into_iter().map(|r| r.model.as_str()).collect()
    }

    #[tokio::test]
    async fn test_load_directory() {
        let catalog = fixture().await;
        assert_eq!(catalog.state(), LoadState::Ready);

        assert_eq!(
            models(catalog.list(Category::CPU).iter().collect()),
            vec!["AMD Ryzen 5 2600", "Intel Core i5-9400F", "amd ryzen 5 2600"]
        );
        assert_eq!(
            models(catalog.list(Category::GPU).iter().collect()),
            vec!["GeForce RTX 3060", "Radeon RX 580"]
        );
        assert_eq!(
            models(catalog.list(Category::RAM).iter().collect()),
            vec!["DDR4-3200 16GB", "DDR5-6000 32GB"]
        );

        let report = catalog.report().unwrap();
        assert_eq!(report.accepted_rows, 7);
        assert_eq!(report.dropped_rows, 4);
        assert_eq!(report.failed_tables.len(), 1);
        assert!(report.failed_tables[0].table.ends_with("c_headless.csv"));
    }

    #[tokio::test]
    async fn test_record_fields() {
        let catalog = fixture().await;
        let ryzen = catalog.get(Category::CPU, "AMD Ryzen 5 2600").unwrap();
        assert_eq!(ryzen.benchmark, 13096.0);
        assert_eq!(
            ryzen.reference_url.as_deref(),
            Some("https://www.cpubenchmark.net/cpu.php?cpu=AMD+Ryzen+5+2600")
        );

        let intel = catalog.get(Category::CPU, "Intel Core i5-9400F").unwrap();
        assert_eq!(intel.reference_url, None);
    }

    #[tokio::test]
    async fn test_get_is_case_insensitive_and_first_wins() {
        let catalog = fixture().await;
        let a = catalog.get(Category::CPU, "amd ryzen 5 2600").unwrap();
        let b = catalog.get(Category::CPU, "AMD RYZEN 5 2600").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.benchmark, 13096.0);

        assert!(catalog.get(Category::CPU, "Intel Core i3-10100").is_none());
        assert!(catalog.get(Category::GPU, "AMD Ryzen 5 2600").is_none());
    }

    #[tokio::test]
    async fn test_search() {
        let catalog = fixture().await;
        assert_eq!(
            catalog.search(Category::GPU, ""),
            catalog.list(Category::GPU).iter().collect::<Vec<_>>()
        );
        assert_eq!(
            models(catalog.search(Category::CPU, "RYZEN")),
            vec!["AMD Ryzen 5 2600", "amd ryzen 5 2600"]
        );
        assert_eq!(catalog.search(Category::CPU, "cpu").len(), 3);
        assert!(catalog.search(Category::RAM, "ddr3").is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert_eq!(catalog.state(), LoadState::Empty);
        assert!(catalog.report().is_none());
        assert!(catalog.list(Category::CPU).is_empty());
        assert!(catalog.search(Category::CPU, "").is_empty());
        assert!(catalog.get(Category::CPU, "anything").is_none());
    }

    #[tokio::test]
    async fn test_one_bad_byte_only_drops_its_row() {
        let catalog = Catalog::new();
        catalog
            .load(&CsvDirectory::new(testdata("latin1")))
            .await
            .unwrap();
        assert_eq!(models(catalog.list(Category::CPU).iter().collect()), vec!["Good One"]);
        assert_eq!(models(catalog.list(Category::RAM).iter().collect()), vec!["DDR4"]);
        assert!(catalog.list(Category::GPU).is_empty());

        let report = catalog.report().unwrap();
        assert_eq!(report.accepted_rows, 2);
        assert_eq!(report.dropped_rows, 1);
        assert!(report.failed_tables.is_empty());
    }

    #[tokio::test]
    async fn test_second_load_is_noop() {
        let catalog = fixture().await;
        let before = catalog.list(Category::CPU).to_vec();

        catalog
            .load(&TextTables::new().table("more", "Type,Model,Benchmark\nCPU,Other,5\n"))
            .await
            .unwrap();
        assert_eq!(catalog.list(Category::CPU), before.as_slice());
    }

    #[tokio::test]
    async fn test_unreadable_source_leaves_catalog_empty() {
        let catalog = Catalog::new();
        let result = catalog
            .load(&CsvDirectory::new(testdata("no-such-dir")))
            .await;
        assert!(matches!(result, Err(LoadError::Unreadable { .. })));
        assert_eq!(catalog.state(), LoadState::Empty);

        catalog
            .load(&TextTables::new().table("retry", "Type,Model,Benchmark\nram,DDR4,9\n"))
            .await
            .unwrap();
        assert_eq!(catalog.list(Category::RAM).len(), 1);
    }

    struct CountingSource {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl TableSource for CountingSource {
        fn name(&self) -> String {
            "counting".to_string()
        }

        async fn read(&self) -> Result<Vec<TableRead>, LoadError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            TextTables::new()
                .table("t", "Type,Model,Benchmark\ngpu,RX 6600,11000\n")
                .read()
                .await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_loads_read_once() {
        let catalog = Arc::new(Catalog::new());
        let source = Arc::new(CountingSource {
            reads: AtomicUsize::new(0),
        });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = catalog.clone();
                let source = source.clone();
                tokio::spawn(async move {
                    catalog.load(source.as_ref()).await.unwrap();
                    assert_eq!(catalog.state(), LoadState::Ready);
                    catalog.list(Category::GPU).len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 1);
        }
        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    }
}
