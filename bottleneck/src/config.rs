use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    modules::{options::OPTION_LIST_CAP, source::CsvFile},
    schemas::options::Axis,
};

/// Where the option tables live. A file name is resolved against `dir`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OptionFiles {
    pub dir: PathBuf,
    pub cpu: PathBuf,
    pub gpu: PathBuf,
    pub ram: PathBuf,
    pub storage: PathBuf,
    pub resolution: PathBuf,
}

impl Default for OptionFiles {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/options"),
            cpu: Axis::Cpu.default_file_name().into(),
            gpu: Axis::Gpu.default_file_name().into(),
            ram: Axis::Ram.default_file_name().into(),
            storage: Axis::Storage.default_file_name().into(),
            resolution: Axis::Resolution.default_file_name().into(),
        }
    }
}

impl OptionFiles {
    pub fn path(&self, axis: Axis) -> PathBuf {
        let file = match axis {
            Axis::Cpu => &self.cpu,
            Axis::Gpu => &self.gpu,
            Axis::Ram => &self.ram,
            Axis::Storage => &self.storage,
            Axis::Resolution => &self.resolution,
        };
        self.dir.join(file)
    }

    pub fn sources(&self) -> Vec<(Axis, CsvFile)> {
        Axis::ALL
            .iter()
            .map(|axis| (*axis, CsvFile::new(self.path(*axis))))
            .collect()
    }
}

/// Settings for loading the catalog and option lists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory whose `*.csv` files make up the catalog.
    pub catalog_dir: PathBuf,
    pub options: OptionFiles,
    pub option_list_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("data"),
            options: OptionFiles::default(),
            option_list_cap: OPTION_LIST_CAP,
        }
    }
}

impl Settings {
    /// Read settings from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Point both the catalog and the option tables at `dir` and `dir/options`.
    pub fn with_data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        let dir = dir.into();
        self.options.dir = dir.join("options");
        self.catalog_dir = dir;
        self
    }
}
