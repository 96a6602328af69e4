use futures::future::join_all;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use crate::{
    common::{contains_folded, fold},
    error::LoadError,
    modules::source::{csv_reader, require_columns, RawTable, TableSource},
    schemas::options::Axis,
};

/// How many names [`OptionLists::capped`] hands out per axis.
pub const OPTION_LIST_CAP: usize = 300;

/// Plain name lists for each [`Axis`], with no benchmark data attached.
///
/// Every axis is loaded on its own; one that fails to load is empty and remembers why.
pub struct OptionLists {
    axes: HashMap<Axis, Result<Vec<String>, LoadError>>,
    cap: usize,
}

impl OptionLists {
    /// Load every given axis from its source, concurrently.
    pub async fn load<S, I>(sources: I) -> Self
    where
        S: TableSource,
        I: IntoIterator<Item = (Axis, S)>,
    {
        let sources: Vec<(Axis, S)> = sources.into_iter().collect();
        let loaded = join_all(
            sources
                .iter()
                .map(|(axis, source)| async move { (*axis, load_axis(*axis, source).await) }),
        )
        .await;

        let mut axes = HashMap::new();
        for (axis, names) in loaded {
            match &names {
                Ok(names) => info!(%axis, count = names.len(), "option list loaded"),
                Err(e) => warn!(%axis, error = %e, "option list failed to load"),
            }
            axes.insert(axis, names);
        }
        Self {
            axes,
            cap: OPTION_LIST_CAP,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Every name of `axis`, in file order. Empty if the axis was not loaded.
    pub fn list(&self, axis: Axis) -> &[String] {
        match self.axes.get(&axis) {
            Some(Ok(names)) => names.as_slice(),
            _ => &[],
        }
    }

    /// The first names of `axis`, at most the configured cap.
    pub fn capped(&self, axis: Axis) -> &[String] {
        let names = self.list(axis);
        &names[..names.len().min(self.cap)]
    }

    /// Capped lists of every axis that loaded.
    pub fn capped_all(&self) -> BTreeMap<Axis, &[String]> {
        Axis::ALL
            .iter()
            .filter(|axis| self.is_loaded(**axis))
            .map(|axis| (*axis, self.capped(*axis)))
            .collect()
    }

    /// Case-insensitive substring search. Empty text matches everything.
    pub fn search(&self, axis: Axis, text: &str) -> Vec<&str> {
        let needle = fold(text);
        self.list(axis)
            .iter()
            .filter(|name| contains_folded(name, &needle))
            .map(String::as_str)
            .collect()
    }

    pub fn is_loaded(&self, axis: Axis) -> bool {
        matches!(self.axes.get(&axis), Some(Ok(_)))
    }

    /// Why `axis` failed to load, if it did.
    pub fn failure(&self, axis: Axis) -> Option<&LoadError> {
        match self.axes.get(&axis) {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }
}

async fn load_axis<S: TableSource>(axis: Axis, source: &S) -> Result<Vec<String>, LoadError> {
    let mut names = Vec::new();
    for table in source.read().await? {
        names.extend(read_names(&table?, axis.column())?);
    }
    Ok(names)
}

fn read_names(table: &RawTable, column: &'static str) -> Result<Vec<String>, LoadError> {
    let mut reader = csv_reader(table);
    let index = require_columns(table, &mut reader, &[column])?[0];

    let mut names = Vec::new();
    let mut dropped_rows = 0;
    for (line, record) in reader.records().enumerate() {
        match record {
            Ok(record) => names.extend(
                record
                    .get(index)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            ),
            Err(e) => {
                debug!(table = %table.name, row = line + 1, error = %e, "dropping option row");
                dropped_rows += 1;
            }
        }
    }
    if dropped_rows > 0 {
        debug!(table = %table.name, dropped_rows, "option rows dropped");
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::OptionLists;
    use crate::{
        error::LoadError,
        modules::source::{testdata, CsvFile, TextTables},
        schemas::options::Axis,
    };

    async fn fixture() -> OptionLists {
        let dir = testdata("options");
        OptionLists::load(
            Axis::ALL
                .iter()
                .map(|axis| (*axis, CsvFile::new(dir.join(axis.default_file_name())))),
        )
        .await
    }

    #[tokio::test]
    async fn test_load_axes_independently() {
        let options = fixture().await;

        assert_eq!(
            options.list(Axis::Cpu),
            ["AMD Ryzen 5 2600", "Intel Core i5-9400F", "AMD Ryzen 7 5800X3D"]
        );
        assert_eq!(options.list(Axis::Gpu).len(), 3);
        assert_eq!(options.list(Axis::Resolution)[2], "3840x2160");

        /* there is no hdd.csv in the fixtures */
        assert!(!options.is_loaded(Axis::Storage));
        assert!(options.list(Axis::Storage).is_empty());
        assert!(matches!(
            options.failure(Axis::Storage),
            Some(LoadError::Unreadable { .. })
        ));
        assert!(options.failure(Axis::Ram).is_none());

        let all = options.capped_all();
        assert_eq!(all.len(), 4);
        assert!(!all.contains_key(&Axis::Storage));
    }

    #[tokio::test]
    async fn test_search() {
        let options = fixture().await;
        assert_eq!(
            options.search(Axis::Cpu, "ryzen"),
            vec!["AMD Ryzen 5 2600", "AMD Ryzen 7 5800X3D"]
        );
        assert_eq!(options.search(Axis::Resolution, "1440"), vec!["2560x1440"]);
        assert_eq!(options.search(Axis::Gpu, "").len(), 3);
        assert!(options.search(Axis::Storage, "").is_empty());
    }

    #[tokio::test]
    async fn test_cap() {
        let mut text = String::from("HDD Name\n");
        for i in 0..350 {
            text.push_str(&format!("Disk {}\n", i));
        }
        let options =
            OptionLists::load(vec![(Axis::Storage, TextTables::new().table("hdd", text))]).await;
        assert_eq!(options.list(Axis::Storage).len(), 350);
        assert_eq!(options.capped(Axis::Storage).len(), 300);
        assert_eq!(options.capped(Axis::Storage)[299], "Disk 299");

        let options = options.with_cap(2);
        assert_eq!(options.capped(Axis::Storage), ["Disk 0", "Disk 1"]);
    }

    #[tokio::test]
    async fn test_wrong_column() {
        let options = OptionLists::load(vec![(
            Axis::Gpu,
            TextTables::new().table("gpus", "CPU Name\nRyzen\n"),
        )])
        .await;
        assert!(matches!(
            options.failure(Axis::Gpu),
            Some(LoadError::MissingColumn { column: "GPU Name", .. })
        ));
    }

    #[tokio::test]
    async fn test_one_bad_byte_only_drops_its_row() {
        let mut data = b"GPU Name\nRadeon RX 6600\nRadeon ".to_vec();
        data.push(0xe9);
        data.extend_from_slice(b"dition\nGeForce RTX 3060\n");
        let options =
            OptionLists::load(vec![(Axis::Gpu, TextTables::new().table("gpus", data))]).await;
        assert!(options.is_loaded(Axis::Gpu));
        assert_eq!(
            options.list(Axis::Gpu),
            ["Radeon RX 6600", "GeForce RTX 3060"]
        );
    }
}
