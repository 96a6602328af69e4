use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::LoadError;

/// The bytes of one table, before any parsing. Encoding is checked per row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub data: Vec<u8>,
}

impl RawTable {
    pub fn new<N: Into<String>, D: Into<Vec<u8>>>(name: N, data: D) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Result of reading a single table out of a source.
pub type TableRead = Result<RawTable, LoadError>;

/// Somewhere tables of CSV text come from.
#[async_trait]
pub trait TableSource: Send + Sync {
    fn name(&self) -> String;

    /// Read every table of the source.
    ///
    /// # Errors
    /// Errors only if the source as a whole cannot be read. A table that fails on its own
    /// is returned as an `Err` element so its siblings can still be used.
    async fn read(&self) -> Result<Vec<TableRead>, LoadError>;
}

/// Every `*.csv` file directly inside a directory, in file name order.
pub struct CsvDirectory {
    path: PathBuf,
}

impl CsvDirectory {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TableSource for CsvDirectory {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Vec<TableRead>, LoadError> {
        let mut entries = tokio::fs::read_dir(&self.path)
            .await
            .map_err(|e| LoadError::unreadable(self.name(), e))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LoadError::unreadable(self.name(), e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            /* follows symlinks, unlike DirEntry::file_type */
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => paths.push(path),
                _ => debug!(path = %path.display(), "skipping non-file entry"),
            }
        }
        paths.sort();

        let mut tables = Vec::with_capacity(paths.len());
        for path in paths {
            tables.push(read_file(&path).await);
        }
        Ok(tables)
    }
}

/// A single CSV file.
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TableSource for CsvFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Vec<TableRead>, LoadError> {
        Ok(vec![Ok(read_file(&self.path).await?)])
    }
}

/// Tables held in memory, mostly for embedding data and for tests.
#[derive(Default)]
pub struct TextTables {
    tables: Vec<RawTable>,
}

impl TextTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table<N: Into<String>, D: Into<Vec<u8>>>(mut self, name: N, data: D) -> Self {
        self.tables.push(RawTable::new(name, data));
        self
    }
}

#[async_trait]
impl TableSource for TextTables {
    fn name(&self) -> String {
        "<memory>".to_string()
    }

    async fn read(&self) -> Result<Vec<TableRead>, LoadError> {
        Ok(self.tables.iter().cloned().map(Ok).collect())
    }
}

async fn read_file(path: &Path) -> TableRead {
    let name = path.display().to_string();
    match tokio::fs::read(path).await {
        Ok(data) => Ok(RawTable { name, data }),
        Err(e) => Err(LoadError::unreadable(name, e)),
    }
}

/// A CSV reader over a table's bytes, with whitespace trimmed and ragged rows allowed.
pub(crate) fn csv_reader(table: &RawTable) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(table.data.as_slice())
}

/// Finds every column of `columns` in the header row of `reader`, returning their positions
/// in the same order.
pub(crate) fn require_columns<R: std::io::Read>(
    table: &RawTable,
    reader: &mut csv::Reader<R>,
    columns: &[&'static str],
) -> Result<Vec<usize>, LoadError> {
    let headers = reader.headers().map_err(|source| LoadError::Csv {
        table: table.name.clone(),
        source,
    })?;
    columns
        .iter()
        .copied()
        .map(|column| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    table: table.name.clone(),
                    column,
                })
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn testdata<P: AsRef<Path>>(rel: P) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(rel)
}

#[cfg(test)]
mod tests {
    use super::{
        csv_reader, require_columns, testdata, CsvDirectory, CsvFile, RawTable, TableSource,
        TextTables,
    };
    use crate::error::LoadError;

    #[tokio::test]
    async fn test_directory_reads_csv_files_in_name_order() {
        let tables = CsvDirectory::new(testdata("catalog")).read().await.unwrap();
        let names: Vec<String> = tables
            .into_iter()
            .map(|t| t.unwrap().name)
            .map(|name| {
                std::path::Path::new(&name)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["a_components.csv", "b_extra.csv", "c_headless.csv"]);
    }

    #[tokio::test]
    async fn test_missing_sources() {
        assert!(matches!(
            CsvDirectory::new(testdata("no-such-dir")).read().await,
            Err(LoadError::Unreadable { .. })
        ));
        assert!(matches!(
            CsvFile::new(testdata("no-such-file.csv")).read().await,
            Err(LoadError::Unreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_text_tables() {
        let tables = TextTables::new()
            .table("one", "Type,Model\n")
            .table("two", "")
            .read()
            .await
            .unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].as_ref().unwrap().name, "one");
    }

    #[test]
    fn test_require_columns() {
        let table = RawTable::new("t", "Type, Model ,Benchmark\ncpu,x,1\n");
        let mut reader = csv_reader(&table);
        assert_eq!(
            require_columns(&table, &mut reader, &["Benchmark", "Type"]).unwrap(),
            vec![2, 0]
        );

        let mut reader = csv_reader(&table);
        match require_columns(&table, &mut reader, &["Type", "URL"]) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "URL"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
