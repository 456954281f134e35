//! `ciqgen g2l` - GSM-to-LTE RATPRIO script generation

use anyhow::{bail, Context, Result};
use ciqgen_core::bundle::{generation_stamp, write_text, write_zip, Artifact};
use ciqgen_core::config::LayeredConfig;
use ciqgen_core::scripts::g2l::{
    generate_grouped, generate_single, relation_entries, selectable_cells,
};
use ciqgen_core::workbook::Workbook;
use std::fs;
use tracing::info;

use crate::cli::G2lArgs;
use crate::config_loader::override_output_dir;
use crate::output::OutputWriter;
use crate::output_types::G2lOutput;

pub fn execute(args: G2lArgs, mut config: LayeredConfig, writer: &OutputWriter) -> Result<()> {
    override_output_dir(&mut config, args.output.clone());
    let output_dir = config.output_dir.value.clone();

    let mut workbook = Workbook::open(&args.workbook)
        .with_context(|| format!("Failed to open workbook {}", args.workbook.display()))?;
    let sheet = workbook.relation_sheet()?;
    let entries = relation_entries(&sheet);
    info!(rows = entries.len(), "loaded relation sheet");

    let selected = if args.all {
        selectable_cells(&entries)
    } else if args.cells.is_empty() {
        bail!("No cells selected; pass --cells <name,...> or --all");
    } else {
        args.cells.clone()
    };

    let stamp = generation_stamp();
    fs::create_dir_all(&output_dir)?;

    let (output_path, artifacts) = if args.single {
        let script = generate_single(&entries, &selected)?;
        let artifact = Artifact::new(format!("G2L_Script_{}.txt", stamp), script);
        let path = write_text(&artifact, &output_dir)?;
        (path, vec![artifact])
    } else {
        let artifacts = generate_grouped(&entries, &selected, &stamp)?;
        let path = output_dir.join(format!("G2L_scripts_{}.zip", stamp));
        write_zip(&artifacts, &path)?;
        (path, artifacts)
    };

    let cell_count = selected.len();
    let group_count = artifacts.len();
    writer.success(format!(
        "Generated {} script file(s) for {} cell(s): {}",
        group_count,
        cell_count,
        output_path.display()
    ));
    writer.result(G2lOutput {
        output_path: output_path.display().to_string(),
        files: artifacts.into_iter().map(|a| a.name).collect(),
        cell_count,
        group_count,
    })
}
