//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use pnad_core::{NeetRun, PipelineConfig, RunReport, run_extract, run_label, run_neet};
use pnad_sidra::SidraClient;
use pnad_standards::{DICTIONARIES, dictionary};

use crate::cli::{DictionariesArgs, ExtractArgs, LabelArgs, NeetArgs};
use crate::summary::{dictionary_table, entries_table};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pnad.toml";

/// Loads the explicit config file, else `pnad.toml` when present, else the
/// built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(PipelineConfig::default());
            }
            fallback
        }
    };
    PipelineConfig::load(&path).with_context(|| format!("load config {}", path.display()))
}

/// Applies NEET flags on top of the loaded configuration.
pub fn apply_neet_args(config: &mut PipelineConfig, args: &NeetArgs) {
    let neet = &mut config.neet;
    if let Some(period) = &args.period {
        neet.period.clone_from(period);
    }
    if let Some(scale) = args.scale {
        neet.scale = scale;
    }
    if let Some(api_url) = &args.api_url {
        neet.api_url.clone_from(api_url);
    }
    if let Some(output) = &args.output {
        neet.output.clone_from(output);
    }
}

pub fn apply_label_args(config: &mut PipelineConfig, args: &LabelArgs) {
    let label = &mut config.label;
    if let Some(input) = &args.input {
        label.input.clone_from(input);
    }
    if let Some(output) = &args.output {
        label.output.clone_from(output);
    }
    label.write_suppression_flags |= args.suppression_flags;
}

/// Applies extract flags and re-validates the age band.
pub fn apply_extract_args(config: &mut PipelineConfig, args: &ExtractArgs) -> Result<()> {
    let extract = &mut config.extract;
    if !args.inputs.is_empty() {
        extract.inputs.clone_from(&args.inputs);
    }
    if let Some(output) = &args.output {
        extract.output.clone_from(output);
    }
    if let Some(age_min) = args.age_min {
        extract.age_min = age_min;
    }
    if let Some(age_max) = args.age_max {
        extract.age_max = age_max;
    }
    extract.write_suppression_flags |= args.suppression_flags;
    config.validate().context("invalid extract options")?;
    Ok(())
}

pub fn run_neet_command(config: &PipelineConfig) -> Result<NeetRun> {
    let client = SidraClient::with_base_url(config.neet.api_url.as_str())
        .context("create SIDRA client")?;
    info!(url = %client.url(&config.neet.query()), "fetching SIDRA table");
    Ok(run_neet(&config.neet, &client)?)
}

pub fn run_label_command(config: &PipelineConfig) -> Result<RunReport> {
    Ok(run_label(&config.label)?)
}

pub fn run_extract_command(config: &PipelineConfig) -> Result<RunReport> {
    Ok(run_extract(&config.extract)?)
}

pub fn run_dictionaries(args: &DictionariesArgs) -> Result<()> {
    let table = match &args.name {
        None => dictionary_table(DICTIONARIES),
        Some(name) => {
            let dictionary = dictionary(name).ok_or_else(|| {
                let known: Vec<&str> = DICTIONARIES.iter().map(|d| d.name).collect();
                anyhow!("unknown dictionary '{name}' (known: {})", known.join(", "))
            })?;
            entries_table(dictionary)
        }
    };
    println!("{table}");
    Ok(())
}

pub fn run_show_config(config: &PipelineConfig) -> Result<()> {
    let rendered = config.to_toml_string().context("render config")?;
    print!("{rendered}");
    Ok(())
}
