use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::ParseError;

/// A full PC spec to be assessed by a language model, with the purpose of the build.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AssessmentRequest {
    pub purpose: Option<String>,
    pub cpu: Option<String>,
    pub gpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub resolution: Option<String>,
}

impl AssessmentRequest {
    /// The instruction text to send. Fields left empty are shown as empty strings and the
    /// model is told to skip them.
    pub fn prompt(&self) -> String {
        let purpose = self
            .purpose
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or("general use");

        let mut prompt = format!(
            "Assess the PC specification below for bottlenecks in each component category \
             (CPU, GPU, RAM, storage and resolution) and in overall system balance. \
             The PC is mainly meant for {}, so judge every part against that purpose.\n\n\
             If a field has no value, do not report a bottleneck or give recommendations for it.\n\n\
             Answer with a single JSON object using exactly these fields:\n",
            purpose
        );
        prompt.push_str(
            "{\n  \"cpu_bottleneck\": \"yes/no\",\n  \"gpu_bottleneck\": \"yes/no\",\n  \
             \"ram_bottleneck\": \"yes/no\",\n  \"storage_bottleneck\": \"yes/no\",\n  \
             \"resolution_bottleneck\": \"yes/no\",\n  \"overall_bottleneck\": \"yes/no\",\n  \
             \"recommendations\": [\"suggestion 1\", \"suggestion 2\"]\n}\n\n",
        );

        prompt.push_str("PC specification:\n{\n");
        let fields = [
            ("cpu", &self.cpu),
            ("gpu", &self.gpu),
            ("ram", &self.ram),
            ("storage", &self.storage),
            ("resolution", &self.resolution),
        ];
        for (i, (name, value)) in fields.iter().enumerate() {
            let value = serde_json::to_string(value.as_deref().unwrap_or(""))
                .unwrap_or_else(|_| "\"\"".to_string());
            let comma = if i + 1 < fields.len() { "," } else { "" };
            /* writing to a String cannot fail */
            let _ = writeln!(prompt, "  \"{}\": {}{}", name, value, comma);
        }
        prompt.push('}');
        prompt
    }
}

/// A validated assessment. `None` means the reply left that category out.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Assessment {
    pub cpu_bottleneck: Option<bool>,
    pub gpu_bottleneck: Option<bool>,
    pub ram_bottleneck: Option<bool>,
    pub storage_bottleneck: Option<bool>,
    pub resolution_bottleneck: Option<bool>,
    pub overall_bottleneck: Option<bool>,
    pub recommendations: Vec<String>,
}

#[derive(Deserialize)]
struct RawAssessment {
    cpu_bottleneck: Option<String>,
    gpu_bottleneck: Option<String>,
    ram_bottleneck: Option<String>,
    storage_bottleneck: Option<String>,
    resolution_bottleneck: Option<String>,
    overall_bottleneck: Option<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

fn flag(field: &'static str, value: Option<String>) -> Result<Option<bool>, ParseError> {
    let value = match value {
        Some(value) => value,
        None => return Ok(None),
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" => Ok(Some(true)),
        "no" => Ok(Some(false)),
        "" => Ok(None),
        _ => Err(ParseError::InvalidFlag { field, value }),
    }
}

/// The outermost `{ ... }` of `text`, ignoring prose and code fences around it.
fn json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

impl Assessment {
    /// Validate a free-text reply.
    ///
    /// # Errors
    /// Errors if the reply holds no JSON object, the object does not have the expected
    /// shape, or a flag is anything but `"yes"` or `"no"`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let object = json_object(text).ok_or(ParseError::NoJsonObject)?;
        let raw: RawAssessment = serde_json::from_str(object)?;
        Ok(Self {
            cpu_bottleneck: flag("cpu_bottleneck", raw.cpu_bottleneck)?,
            gpu_bottleneck: flag("gpu_bottleneck", raw.gpu_bottleneck)?,
            ram_bottleneck: flag("ram_bottleneck", raw.ram_bottleneck)?,
            storage_bottleneck: flag("storage_bottleneck", raw.storage_bottleneck)?,
            resolution_bottleneck: flag("resolution_bottleneck", raw.resolution_bottleneck)?,
            overall_bottleneck: flag("overall_bottleneck", raw.overall_bottleneck)?,
            recommendations: raw
                .recommendations
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        })
    }
}
