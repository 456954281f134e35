use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ciqgen - CIQ workbook to vendor script generator
#[derive(Parser, Debug)]
#[command(name = "ciqgen")]
#[command(about = "Generate vendor command scripts and XML bundles from CIQ workbooks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a ciqgen.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate GSM-to-LTE RATPRIO scripts grouped by BSC
    G2l(G2lArgs),

    /// Generate polygon and coverage MO commands from a CIQ LTE workbook
    Polygon(PolygonArgs),

    /// Generate the five-file XML configuration bundle for one eNB
    Xml(XmlArgs),

    /// Generate pre/post migration health-check scripts
    Prepost(PrepostArgs),

    /// List the selectable cells of a relation workbook
    Cells(CellsArgs),

    /// Browse and clean the generated-script folder
    Files(FilesArgs),
}

#[derive(Parser, Debug)]
pub struct G2lArgs {
    /// Workbook with a "GSM-LTE-Relation" sheet
    pub workbook: PathBuf,

    /// Comma-separated cell names to include
    #[arg(long, value_delimiter = ',', conflicts_with = "all")]
    pub cells: Vec<String>,

    /// Include every cell in the sheet
    #[arg(long)]
    pub all: bool,

    /// Emit one concatenated script instead of a per-BSC ZIP bundle
    #[arg(long)]
    pub single: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct PolygonArgs {
    /// Workbook with eUtranCellPolygon / eUtranCellCoverage sheets
    pub workbook: PathBuf,

    /// Skip the coverage sheet even when it is present
    #[arg(long)]
    pub skip_coverage: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct XmlArgs {
    /// Workbook with eUtran Parameters, PCI, eNB Info, and Cluster sheets
    pub workbook: PathBuf,

    /// eNB name to generate the bundle for
    #[arg(long)]
    pub enb: String,

    /// Template directory (overrides config)
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Which health-check script to build
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum PhaseArg {
    /// Post-check on the new BSC (per cell)
    PostNew,
    /// Pre-check on the new BSC (per cell)
    PreNew,
    /// Pre-check on the legacy BSC (per RSITE)
    PreLegacy,
}

#[derive(Parser, Debug)]
pub struct PrepostArgs {
    /// Workbook with a "target_cells" migration template sheet
    pub workbook: PathBuf,

    /// Health-check phase
    #[arg(long, value_enum)]
    pub phase: PhaseArg,

    /// WinFiol log prefix embedded in the script (overrides config)
    #[arg(long)]
    pub log_prefix: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CellsArgs {
    /// Workbook with a "GSM-LTE-Relation" sheet
    pub workbook: PathBuf,
}

#[derive(Parser, Debug)]
pub struct FilesArgs {
    #[command(subcommand)]
    pub command: FilesCommand,
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// List generated files with sizes and modification times
    List {
        /// Directory to list (defaults to the configured log dir)
        dir: Option<PathBuf>,
    },
    /// Delete one generated file
    Delete {
        /// Bare file name inside the managed directory
        name: String,

        /// Directory holding the file (defaults to the configured log dir)
        dir: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
