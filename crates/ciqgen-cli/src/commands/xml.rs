//! `ciqgen xml` - five-file eNB XML bundle generation

use anyhow::{Context, Result};
use ciqgen_core::bundle::write_zip;
use ciqgen_core::config::{ConfigSource, LayeredConfig};
use ciqgen_core::scripts::xml::{
    generate_xml_bundle, XmlTemplates, CLUSTER_SHEET, ENB_INFO_SHEET, PARAMS_SHEET, PCI_SHEET,
};
use ciqgen_core::workbook::Workbook;
use std::fs;
use tracing::info;

use crate::cli::XmlArgs;
use crate::config_loader::override_output_dir;
use crate::output::OutputWriter;
use crate::output_types::XmlOutput;

pub fn execute(args: XmlArgs, mut config: LayeredConfig, writer: &OutputWriter) -> Result<()> {
    override_output_dir(&mut config, args.output.clone());
    if let Some(dir) = args.templates.clone() {
        config.template_dir.update(dir, ConfigSource::Cli);
    }
    let output_dir = config.output_dir.value.clone();
    let template_dir = config.template_dir.value.clone();

    let templates = XmlTemplates::load(&template_dir)
        .with_context(|| format!("Failed to load templates from {}", template_dir.display()))?;

    let mut workbook = Workbook::open(&args.workbook)
        .with_context(|| format!("Failed to open workbook {}", args.workbook.display()))?;
    let params = workbook.sheet(PARAMS_SHEET)?;
    let pci = workbook.sheet(PCI_SHEET)?;
    let enb_info = workbook.sheet(ENB_INFO_SHEET)?;
    let cluster = workbook.sheet(CLUSTER_SHEET)?;
    info!(enb = %args.enb, "loaded parameter workbook");

    let artifacts = generate_xml_bundle(&params, &pci, &enb_info, &cluster, &args.enb, &templates)?;

    fs::create_dir_all(&output_dir)?;
    let path = output_dir.join(format!("{}_XML_Files.zip", args.enb));
    write_zip(&artifacts, &path)?;

    writer.success(format!(
        "Generated {} XML file(s) for {}: {}",
        artifacts.len(),
        args.enb,
        path.display()
    ));
    writer.result(XmlOutput {
        output_path: path.display().to_string(),
        enb: args.enb,
        files: artifacts.into_iter().map(|a| a.name).collect(),
    })
}
