//! LTE eNB XML configuration bundle generator
//!
//! Produces the five rollout XML artifacts for one eNB from a parameter
//! workbook and a directory of `{name}`-token templates. Two templates pass
//! through untouched; the other three are filled from the `eUtran
//! Parameters`, `PCI`, `eNB Info`, and `Cluster` sheets. Reference-lookup
//! misses embed a delimited `#ERR[...]` marker instead of aborting, so one
//! bad reference does not sink the whole bundle.

use std::path::Path;

use crate::bundle::Artifact;
use crate::coord::{convert_degree_to_decimal, format_coordinate_for_polygon};
use crate::error::Result;
use crate::template::{load_template, lookup_miss, substitute, Substitutions};
use crate::workbook::{Row, Sheet};

pub const PARAMS_SHEET: &str = "eUtran Parameters";
pub const PCI_SHEET: &str = "PCI";
pub const ENB_INFO_SHEET: &str = "eNB Info";
pub const CLUSTER_SHEET: &str = "Cluster";

/// PCI columns joined onto the cell rows by `EutranCellFDDId`.
const PCI_COLUMNS: [&str; 5] = [
    "rachRootSequence",
    "cellId",
    "sectorId",
    "PhysicalLayerCellIdGroup",
    "physicalLayerSubCellId",
];

/// The five templates of an eNB bundle, as shipped in the template
/// directory.
#[derive(Debug)]
pub struct XmlTemplates {
    pub mo_function: String,
    pub lnr_function: String,
    pub feature_activation: String,
    pub lte_cells: String,
    pub cell_add_mo: String,
}

impl XmlTemplates {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            mo_function: load_template(dir, "03_MO_Function.xml")?,
            lnr_function: load_template(dir, "04_LNR_Function.xml")?,
            feature_activation: load_template(dir, "08_FeatureActivation.xml")?,
            lte_cells: load_template(dir, "LTE_Cells_Template.xml")?,
            cell_add_mo: load_template(dir, "05_Cell_Add_MO_Template.xml")?,
        })
    }
}

/// Generate the full five-file bundle for `enb`. A parameter sheet missing
/// the `eNBName` column is an error, not an empty bundle.
pub fn generate_xml_bundle(
    params: &Sheet,
    pci: &Sheet,
    enb_info: &Sheet,
    cluster: &Sheet,
    enb: &str,
    templates: &XmlTemplates,
) -> Result<Vec<Artifact>> {
    Ok(vec![
        Artifact::new(
            format!("09_{}_MO_Function.xml", enb),
            templates.mo_function.clone(),
        ),
        Artifact::new(
            format!("08_{}_LNR_Function.xml", enb),
            generate_lnr_function(params, cluster, enb, &templates.lnr_function)?,
        ),
        Artifact::new(
            format!("12_{}_FeatureActivation.xml", enb),
            templates.feature_activation.clone(),
        ),
        Artifact::new(
            format!("10_{}_LTE_Cells.xml", enb),
            generate_lte_cells(params, pci, enb_info, enb, &templates.lte_cells)?,
        ),
        Artifact::new(
            format!("11_{}_Cell_Add_MO.xml", enb),
            generate_cell_add_mo(params, enb, &templates.cell_add_mo)?,
        ),
    ])
}

/// LNR function fragment: `{enbid}` from the parameter sheet, `{FDN}` from
/// the cluster sheet with every `ManagedElement=` component stripped.
pub fn generate_lnr_function(
    params: &Sheet,
    cluster: &Sheet,
    enb: &str,
    template: &str,
) -> Result<String> {
    params.require_column("eNBName")?;
    let enb_id = find_by(params, "eNBName", enb)
        .and_then(|row| row.text("eNBId"))
        .unwrap_or_else(|| lookup_miss(enb, PARAMS_SHEET));

    let fdn = find_by(cluster, "eNodeB Name", enb)
        .and_then(|row| row.text("FDN"))
        .map(|fdn| strip_managed_element(&fdn))
        .unwrap_or_else(|| lookup_miss(enb, CLUSTER_SHEET));

    let mut values = Substitutions::new();
    values.insert("enbid".to_string(), enb_id);
    values.insert("FDN".to_string(), fdn);
    Ok(substitute(template, &values))
}

/// Drop `ManagedElement=...` components from a comma-separated FDN and trim
/// the rest.
fn strip_managed_element(fdn: &str) -> String {
    fdn.split(',')
        .map(str::trim)
        .filter(|part| !part.starts_with("ManagedElement="))
        .collect::<Vec<_>>()
        .join(",")
}

/// Per-cell fragments for the LTE cells file, joined by newlines.
///
/// Cell rows are the parameter rows matching the eNB; PCI parameters join
/// by `EutranCellFDDId` and the TAC comes from the eNB info sheet. Values
/// that fail to resolve leave their token verbatim in the fragment, except
/// reference-lookup misses which embed the `#ERR` marker.
pub fn generate_lte_cells(
    params: &Sheet,
    pci: &Sheet,
    enb_info: &Sheet,
    enb: &str,
    template: &str,
) -> Result<String> {
    params.require_column("eNBName")?;
    let tac = find_by(enb_info, "eNodeB Name", enb)
        .and_then(|row| row.text("tac"))
        .unwrap_or_else(|| lookup_miss(enb, ENB_INFO_SHEET));

    let fragments: Vec<String> = params
        .rows()
        .filter(|row| row.text("eNBName").as_deref() == Some(enb))
        .map(|row| {
            let mut values = Substitutions::new();
            let cell_id = row.text("EutranCellFDDId").unwrap_or_default();
            values.insert("EutranCellFDDId".to_string(), cell_id.clone());

            for column in [
                "configuredMaxTxPower",
                "cellRange",
                "earfcnDl",
                "earfcnUl",
                "dlChannelBandwidth",
                "qRxLevMin",
            ] {
                if let Some(value) = row.text(column) {
                    values.insert(column.to_string(), value);
                }
            }

            for column in ["latitude", "longitude"] {
                let fixed = row
                    .text(column)
                    .and_then(|text| convert_degree_to_decimal(&text))
                    .and_then(|decimal| format_coordinate_for_polygon(Some(decimal)));
                if let Some(fixed) = fixed {
                    values.insert(column.to_string(), fixed.to_string());
                }
            }

            if let Some(pci_row) = find_by(pci, "EutranCellFDDId", &cell_id) {
                for column in PCI_COLUMNS {
                    if let Some(value) = pci_row.text(column) {
                        values.insert(column.to_string(), value);
                    }
                }
                // The sector id doubles as the antenna unit group token.
                if let Some(sector) = pci_row.text("sectorId") {
                    values.insert("AUG".to_string(), sector);
                }
            } else {
                // Every PCI-sourced token carries the marker; leaving some
                // verbatim would hide the miss in the emitted XML.
                let miss = lookup_miss(&cell_id, PCI_SHEET);
                for column in PCI_COLUMNS {
                    values.insert(column.to_string(), miss.clone());
                }
                values.insert("AUG".to_string(), miss);
            }

            values.insert("tac".to_string(), tac.clone());
            substitute(template, &values)
        })
        .collect();

    Ok(fragments.join("\n"))
}

/// Per-cell `{EutranCellFDDId}` substitution, one fragment per matching
/// row.
pub fn generate_cell_add_mo(params: &Sheet, enb: &str, template: &str) -> Result<String> {
    params.require_column("eNBName")?;
    let fragments: Vec<String> = params
        .rows()
        .filter(|row| row.text("eNBName").as_deref() == Some(enb))
        .filter_map(|row| {
            let mut values = Substitutions::new();
            values.insert("EutranCellFDDId".to_string(), row.text("EutranCellFDDId")?);
            Some(substitute(template, &values))
        })
        .collect();

    Ok(fragments.join("\n"))
}

/// First row whose `column` displays as `value`.
fn find_by<'a>(sheet: &'a Sheet, column: &str, value: &str) -> Option<Row<'a>> {
    sheet
        .rows()
        .find(|row| row.text(column).as_deref() == Some(value))
}
