use tracing::debug;

use crate::{
    error::{AnalyzeError, NotFound},
    modules::{catalog::Catalog, engine},
    schemas::{component::Category, verdict::BottleneckVerdict},
};

/// Model names picked for a build, as a request carries them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildQuery {
    pub cpu: Option<String>,
    pub gpu: Option<String>,
    pub ram: Option<String>,
}

fn given(name: &Option<String>) -> Option<&str> {
    name.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve the names in `query` against `catalog` and analyze the build.
///
/// # Errors
/// [`AnalyzeError::InvalidInput`] if no CPU or GPU name is given, and
/// [`AnalyzeError::NotFound`] if one of them is not in the catalog.
/// An unknown RAM name is not an error; the build is analyzed without RAM.
pub fn analyze_models(
    catalog: &Catalog,
    query: &BuildQuery,
) -> Result<BottleneckVerdict, AnalyzeError> {
    let (cpu_name, gpu_name) = match (given(&query.cpu), given(&query.gpu)) {
        (Some(cpu), Some(gpu)) => (cpu, gpu),
        _ => {
            return Err(AnalyzeError::InvalidInput(
                "please provide CPU and GPU models".to_string(),
            ))
        }
    };

    let resolve = |category: Category, model: &str| {
        catalog.get(category, model).ok_or_else(|| NotFound {
            category,
            model: model.to_string(),
        })
    };
    let cpu = resolve(Category::CPU, cpu_name)?;
    let gpu = resolve(Category::GPU, gpu_name)?;
    let ram = given(&query.ram).and_then(|name| {
        let ram = catalog.get(Category::RAM, name);
        if ram.is_none() {
            debug!(model = name, "RAM model not in catalog, analyzing without it");
        }
        ram
    });

    engine::try_analyze(Some(cpu), Some(gpu), ram)
}
