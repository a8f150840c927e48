//! Resolves the analysis configuration: preset, then TOML file, then flags.

use std::path::Path;

use anyhow::{Context, Result};
use lexis_types::AnalysisConfig;
use serde::Deserialize;
use tracing::debug;

use crate::AnalysisArgs;

/// Every field optional so a file can override just part of the preset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    mode: Option<lexis_types::TokenMode>,
    top_n: Option<usize>,
    min_count: Option<u32>,
    order: Option<lexis_types::FilterOrder>,
}

fn load_file(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub(crate) fn resolve(args: &AnalysisArgs, preset: AnalysisConfig) -> Result<AnalysisConfig> {
    let mut cfg = preset;

    if let Some(path) = &args.config {
        let file = load_file(path)?;
        cfg.mode = file.mode.unwrap_or(cfg.mode);
        cfg.top_n = file.top_n.unwrap_or(cfg.top_n);
        cfg.min_count = file.min_count.unwrap_or(cfg.min_count);
        cfg.order = file.order.unwrap_or(cfg.order);
    }

    if let Some(mode) = &args.mode {
        cfg.mode = mode.parse()?;
    }
    if let Some(top_n) = args.top_n {
        cfg.top_n = top_n;
    }
    if let Some(min_count) = args.min_count {
        cfg.min_count = min_count;
    }
    if let Some(order) = &args.order {
        cfg.order = order.parse()?;
    }

    cfg.validate()?;
    debug!(?cfg, "resolved configuration");
    Ok(cfg)
}
