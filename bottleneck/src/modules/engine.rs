use crate::{
    error::AnalyzeError,
    schemas::{
        component::{Category, ComponentRecord},
        verdict::BottleneckVerdict,
    },
};

/// How much weaker one of CPU and GPU may be than the other before it throttles it.
pub const IMBALANCE_THRESHOLD: f64 = 0.35;

/// RAM is blamed when it scores below this share of CPU and GPU combined.
pub const RAM_SHARE: f64 = 0.8;

/// Decide which part limits a CPU + GPU (+ RAM) build.
///
/// Rules are tried in order and the first match wins:
/// 1. CPU below 65% of the GPU: CPU, by the gap relative to the GPU.
/// 2. GPU below 65% of the CPU: GPU, by the gap relative to the CPU.
/// 3. RAM below 80% of CPU + GPU: RAM, by the gap relative to that sum.
/// 4. Otherwise balanced.
///
/// A zero reference score can never trigger its rule, so no division by zero happens.
pub fn analyze(
    cpu: &ComponentRecord,
    gpu: &ComponentRecord,
    ram: Option<&ComponentRecord>,
) -> BottleneckVerdict {
    let (c, g) = (cpu.benchmark, gpu.benchmark);

    if g > 0.0 && c < g * (1.0 - IMBALANCE_THRESHOLD) {
        return limited(Category::CPU, cpu, (g - c) / g);
    }
    if c > 0.0 && g < c * (1.0 - IMBALANCE_THRESHOLD) {
        return limited(Category::GPU, gpu, (c - g) / c);
    }
    if let Some(ram) = ram {
        let compute = c + g;
        if compute > 0.0 && ram.benchmark < compute * RAM_SHARE {
            return limited(Category::RAM, ram, (compute - ram.benchmark) / compute);
        }
    }
    BottleneckVerdict::balanced()
}

/// [`analyze`], for callers that may not have resolved a CPU or GPU.
///
/// # Errors
/// [`AnalyzeError::InvalidInput`] if the CPU or GPU is missing, or if a record sits in the
/// wrong slot (e.g. a GPU passed as the CPU).
pub fn try_analyze(
    cpu: Option<&ComponentRecord>,
    gpu: Option<&ComponentRecord>,
    ram: Option<&ComponentRecord>,
) -> Result<BottleneckVerdict, AnalyzeError> {
    let cpu = cpu.ok_or_else(|| AnalyzeError::InvalidInput("a CPU is required".to_string()))?;
    let gpu = gpu.ok_or_else(|| AnalyzeError::InvalidInput("a GPU is required".to_string()))?;

    check_slot(Category::CPU, cpu)?;
    check_slot(Category::GPU, gpu)?;
    if let Some(ram) = ram {
        check_slot(Category::RAM, ram)?;
    }
    Ok(analyze(cpu, gpu, ram))
}

fn check_slot(slot: Category, record: &ComponentRecord) -> Result<(), AnalyzeError> {
    if record.category == slot {
        Ok(())
    } else {
        Err(AnalyzeError::InvalidInput(format!(
            "{:?} is a {}, not a {}",
            record.model, record.category, slot
        )))
    }
}

fn limited(category: Category, record: &ComponentRecord, gap: f64) -> BottleneckVerdict {
    let severity = gap * 100.0;
    if severity.is_finite() {
        BottleneckVerdict::limited(category, record, severity.max(0.0).min(100.0))
    } else {
        BottleneckVerdict::balanced()
    }
}
