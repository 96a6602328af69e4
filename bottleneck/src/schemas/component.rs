use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{fmt::Display, str::FromStr};

/// The kind of part a benchmark score belongs to.
#[derive(SerializeDisplay, DeserializeFromStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CPU,
    GPU,
    RAM,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::CPU, Self::GPU, Self::RAM];

    /// Given a type label in any letter case, try to return the corresponding [`Category`].
    /// Surrounding whitespace is ignored.
    pub fn from_label<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref().trim().to_ascii_lowercase().as_str() {
            "cpu" => Some(Self::CPU),
            "gpu" => Some(Self::GPU),
            "ram" => Some(Self::RAM),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CPU => "CPU",
            Self::GPU => "GPU",
            Self::RAM => "RAM",
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_label(s) {
            Some(category) => Ok(category),
            None => anyhow::bail!("unknown component type {:?}, expected cpu, gpu or ram", s),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One hardware part and its benchmark score.
///
/// Scores are only meaningful relative to other scores from the same catalog.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    #[serde(rename = "type")]
    pub category: Category,
    pub model: String,
    pub benchmark: f64,
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

impl ComponentRecord {
    pub fn new<S: Into<String>>(category: Category, model: S, benchmark: f64) -> Self {
        Self {
            category,
            model: model.into(),
            benchmark,
            reference_url: None,
        }
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.reference_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, ComponentRecord};

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::from_label("CPU"), Some(Category::CPU));
        assert_eq!(Category::from_label("cpu"), Some(Category::CPU));
        assert_eq!(Category::from_label(" Gpu "), Some(Category::GPU));
        assert_eq!(Category::from_label("rAm"), Some(Category::RAM));
        assert_eq!(Category::from_label("ssd"), None);
        assert!("psu".parse::<Category>().is_err());
        assert_eq!(Category::RAM.to_string(), "RAM");
    }

    #[test]
    fn test_record_json() {
        let plain = ComponentRecord::new(Category::GPU, "RTX 3060", 17000.0);
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            serde_json::json!({ "type": "GPU", "model": "RTX 3060", "benchmark": 17000.0 })
        );

        let linked = plain.with_url("https://example.com/rtx3060");
        assert_eq!(
            serde_json::to_value(&linked).unwrap()["url"],
            "https://example.com/rtx3060"
        );
    }
}
