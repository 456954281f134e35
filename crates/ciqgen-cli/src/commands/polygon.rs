//! `ciqgen polygon` - polygon and coverage MO command generation

use anyhow::{Context, Result};
use ciqgen_core::bundle::{write_text, Artifact};
use ciqgen_core::config::LayeredConfig;
use ciqgen_core::scripts::polygon::{
    combine_commands, generate_coverage_commands, generate_polygon_commands, COVERAGE_SHEET,
    POLYGON_SHEET,
};
use ciqgen_core::workbook::Workbook;
use tracing::info;

use crate::cli::PolygonArgs;
use crate::config_loader::override_output_dir;
use crate::output::OutputWriter;
use crate::output_types::PolygonOutput;

const OUTPUT_NAME: &str = "polygon_coverage_commands.txt";

pub fn execute(args: PolygonArgs, mut config: LayeredConfig, writer: &OutputWriter) -> Result<()> {
    override_output_dir(&mut config, args.output.clone());
    let output_dir = config.output_dir.value.clone();

    let mut workbook = Workbook::open(&args.workbook)
        .with_context(|| format!("Failed to open workbook {}", args.workbook.display()))?;

    let polygon_sheet = workbook.sheet(POLYGON_SHEET)?;
    let polygon = generate_polygon_commands(&polygon_sheet)?;
    info!(commands = polygon.len(), "generated polygon commands");

    let coverage = if args.skip_coverage || !workbook.has_sheet(COVERAGE_SHEET) {
        if !args.skip_coverage {
            writer.warning(format!(
                "Sheet '{}' not found; coverage commands skipped",
                COVERAGE_SHEET
            ));
        }
        Vec::new()
    } else {
        let coverage_sheet = workbook.sheet(COVERAGE_SHEET)?;
        generate_coverage_commands(&coverage_sheet)?
    };

    let combined = combine_commands(&polygon, &coverage);
    let artifact = Artifact::new(OUTPUT_NAME, combined);
    let path = write_text(&artifact, &output_dir)?;

    writer.success(format!(
        "Generated {} polygon and {} coverage command(s): {}",
        polygon.len(),
        coverage.len(),
        path.display()
    ));
    writer.result(PolygonOutput {
        output_path: path.display().to_string(),
        polygon_commands: polygon.len(),
        coverage_commands: coverage.len(),
    })
}
