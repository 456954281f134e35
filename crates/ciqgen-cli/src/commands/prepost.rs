//! `ciqgen prepost` - migration health-check script generation

use anyhow::{Context, Result};
use ciqgen_core::bundle::{generation_stamp, write_text, Artifact};
use ciqgen_core::config::{ConfigSource, LayeredConfig};
use ciqgen_core::scripts::prepost::{generate_health_check, migration_rows, HealthCheckPhase};
use ciqgen_core::workbook::Workbook;
use tracing::info;

use crate::cli::{PhaseArg, PrepostArgs};
use crate::config_loader::override_output_dir;
use crate::output::OutputWriter;
use crate::output_types::PrepostOutput;

impl From<PhaseArg> for HealthCheckPhase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::PostNew => HealthCheckPhase::PostNew,
            PhaseArg::PreNew => HealthCheckPhase::PreNew,
            PhaseArg::PreLegacy => HealthCheckPhase::PreLegacy,
        }
    }
}

pub fn execute(args: PrepostArgs, mut config: LayeredConfig, writer: &OutputWriter) -> Result<()> {
    override_output_dir(&mut config, args.output.clone());
    if let Some(prefix) = args.log_prefix.clone() {
        config.prepost_log_prefix.update(prefix, ConfigSource::Cli);
    }
    let output_dir = config.output_dir.value.clone();
    let log_prefix = config.prepost_log_prefix.value.clone();

    let mut workbook = Workbook::open(&args.workbook)
        .with_context(|| format!("Failed to open workbook {}", args.workbook.display()))?;
    let sheet = workbook.migration_sheet()?;
    let rows = migration_rows(&sheet);
    info!(rows = rows.len(), "loaded migration template");

    let phase = HealthCheckPhase::from(args.phase);
    let script = generate_health_check(&rows, phase, &log_prefix)?;

    let stamp = generation_stamp();
    let artifact = Artifact::new(format!("{}_{}.txt", phase.label(), stamp), script);
    let path = write_text(&artifact, &output_dir)?;

    writer.success(format!(
        "Generated {} script for {} row(s): {}",
        phase.label(),
        rows.len(),
        path.display()
    ));
    writer.result(PrepostOutput {
        output_path: path.display().to_string(),
        phase: phase.label().to_string(),
        row_count: rows.len(),
    })
}
