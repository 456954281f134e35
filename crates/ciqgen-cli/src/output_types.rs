use serde::Serialize;
use tabled::Tabled;

/// Output for the g2l command
#[derive(Debug, Serialize)]
pub struct G2lOutput {
    pub output_path: String,
    pub files: Vec<String>,
    pub cell_count: usize,
    pub group_count: usize,
}

/// Output for the polygon command
#[derive(Debug, Serialize)]
pub struct PolygonOutput {
    pub output_path: String,
    pub polygon_commands: usize,
    pub coverage_commands: usize,
}

/// Output for the xml command
#[derive(Debug, Serialize)]
pub struct XmlOutput {
    pub output_path: String,
    pub enb: String,
    pub files: Vec<String>,
}

/// Output for the prepost command
#[derive(Debug, Serialize)]
pub struct PrepostOutput {
    pub output_path: String,
    pub phase: String,
    pub row_count: usize,
}

/// One row of the `cells` listing
#[derive(Debug, Serialize, Tabled)]
pub struct CellRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Cell")]
    pub cell: String,
    #[tabled(rename = "BSC")]
    pub bsc: String,
}

/// One row of the `files list` table
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    #[tabled(rename = "File Name")]
    pub name: String,
    #[tabled(rename = "Size")]
    pub size: String,
    #[tabled(rename = "Modified")]
    pub modified: String,
}
