use flams::core::models::ptm::PtmType;
use flams::engine::config::FilterConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum QuerySource {
    File(PathBuf),
    /// A normalized UniProt accession.
    Uniprot(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlastSettings {
    pub executable: String,
    pub num_threads: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub query: QuerySource,
    pub output_path: PathBuf,
    pub modifications: Vec<PtmType>,
    pub blast: BlastSettings,
    pub filter: FilterConfig,
}
