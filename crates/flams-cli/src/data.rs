use crate::error::{CliError, Result};
use directories::ProjectDirs;
use flams::core::models::ptm::PtmType;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Files whose presence marks a finished `makeblastdb` run for a database.
const BLASTDB_MARKERS: [&str; 3] = ["pdb", "pin", "pal"];

#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn with_custom_path(path: PathBuf) -> Self {
        Self { base_path: path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).map_err(CliError::from)
    }

    /// Database prefix handed to `-db`/`-out`, relative to the data directory.
    pub fn blastdb_name(&self, modification: PtmType) -> String {
        modification.blastdb_name()
    }

    pub fn blastdb_path(&self, modification: PtmType) -> PathBuf {
        self.base_path.join(modification.blastdb_name())
    }

    pub fn has_blastdb(&self, modification: PtmType) -> bool {
        let name = modification.blastdb_name();
        BLASTDB_MARKERS
            .iter()
            .any(|ext| self.base_path.join(format!("{}.{}", name, ext)).exists())
    }

    /// Where a query fetched from UniProt is stored for the duration of a run.
    pub fn downloaded_query_path(&self, accession: &str) -> PathBuf {
        self.base_path.join(format!("{}.fasta.tmp", accession))
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        if !path.is_absolute() {
            return Err(CliError::Data(format!(
                "The data path must be absolute, got {:?}.",
                path
            )));
        }
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path.to_string_lossy().as_bytes()).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                let custom_path_str = fs::read_to_string(&config_path)?.trim().to_string();
                if custom_path_str.is_empty() {
                    warn!("Custom path config file is empty, falling back to default path.");
                    Self::get_default_data_path()
                } else {
                    Ok(PathBuf::from(custom_path_str))
                }
            }
            _ => Self::get_default_data_path(),
        }
    }

    fn get_path_config_file() -> Result<PathBuf> {
        ProjectDirs::from("org", "flams", "flams")
            .map(|dirs| dirs.config_dir().join("path.conf"))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "flams", "flams")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
