use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{fmt::Display, str::FromStr};

/// One of the name-only option lists.
#[derive(
    SerializeDisplay, DeserializeFromStr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Axis {
    Cpu,
    Gpu,
    Ram,
    Storage,
    Resolution,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Self::Cpu,
        Self::Gpu,
        Self::Ram,
        Self::Storage,
        Self::Resolution,
    ];

    /// Accepts singular, plural and alias spellings in any case,
    /// e.g. `cpu`, `CPUs`, `hdds`, `storage`, `resolutions`.
    pub fn from_name<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref().trim().to_ascii_lowercase().as_str() {
            "cpu" | "cpus" => Some(Self::Cpu),
            "gpu" | "gpus" => Some(Self::Gpu),
            "ram" | "rams" => Some(Self::Ram),
            "hdd" | "hdds" | "storage" => Some(Self::Storage),
            "resolution" | "resolutions" => Some(Self::Resolution),
            _ => None,
        }
    }

    /// The column holding the names in this axis' table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Cpu => "CPU Name",
            Self::Gpu => "GPU Name",
            Self::Ram => "RAM Name",
            Self::Storage => "HDD Name",
            Self::Resolution => "Resolution Name",
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Cpu => "cpu.csv",
            Self::Gpu => "gpus.csv",
            Self::Ram => "ram.csv",
            Self::Storage => "hdd.csv",
            Self::Resolution => "resolutions.csv",
        }
    }

    /// Key used in serialized option maps.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Cpu => "cpus",
            Self::Gpu => "gpus",
            Self::Ram => "rams",
            Self::Storage => "hdds",
            Self::Resolution => "resolutions",
        }
    }
}

impl FromStr for Axis {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_name(s) {
            Some(axis) => Ok(axis),
            None => anyhow::bail!(
                "unknown option type {:?}, expected cpus, gpus, rams, hdds or resolutions",
                s
            ),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.plural())
    }
}
