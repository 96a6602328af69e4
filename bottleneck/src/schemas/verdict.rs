use serde::Serialize;

use crate::schemas::component::{Category, ComponentRecord};

pub const NO_BOTTLENECK: &str = "No significant bottleneck detected";

/// The part found to limit the build, and by how much.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Bottleneck {
    #[serde(rename = "bottleneck")]
    pub category: Category,
    pub details: ComponentRecord,
    /// Gap to the stronger reference score, in percent of that score. Always within 0..=100.
    #[serde(rename = "bottleneckPercentage")]
    pub severity_percent: f64,
}

/// Outcome of a bottleneck analysis.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum BottleneckVerdict {
    Limited(Bottleneck),
    Balanced { message: &'static str },
}

impl BottleneckVerdict {
    pub fn balanced() -> Self {
        Self::Balanced {
            message: NO_BOTTLENECK,
        }
    }

    pub fn limited(category: Category, details: &ComponentRecord, severity_percent: f64) -> Self {
        Self::Limited(Bottleneck {
            category,
            details: details.clone(),
            severity_percent,
        })
    }

    /// The limiting category, or `None` when nothing stands out.
    pub fn category(&self) -> Option<Category> {
        self.bottleneck().map(|b| b.category)
    }

    pub fn bottleneck(&self) -> Option<&Bottleneck> {
        match self {
            Self::Limited(b) => Some(b),
            Self::Balanced { .. } => None,
        }
    }

    pub fn severity_percent(&self) -> Option<f64> {
        self.bottleneck().map(|b| b.severity_percent)
    }
}
