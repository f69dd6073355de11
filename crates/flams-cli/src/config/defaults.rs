use flams::core::models::ptm::PtmType;
use flams::engine::config::{DEFAULT_EVALUE_THRESHOLD, DEFAULT_TOLERANCE};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub range: usize,
    pub evalue: f64,
    pub modifications: Vec<PtmType>,
    pub blast_executable: String,
    pub num_threads: usize,
    pub output_path: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_TOLERANCE,
            evalue: DEFAULT_EVALUE_THRESHOLD,
            modifications: PtmType::ALL.to_vec(),
            blast_executable: "blastp".to_string(),
            num_threads: 1,
            output_path: PathBuf::from("out.tsv"),
        }
    }
}
