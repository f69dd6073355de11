use crate::blast;
use crate::cli::{DataArgs, DataCommands};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use bio::io::fasta;
use flams::core::models::modification::ModificationRecord;
use flams::core::models::ptm::PtmType;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub async fn run(args: DataArgs) -> Result<()> {
    match args.command {
        DataCommands::Path => {
            handle_path()?;
        }
        DataCommands::SetPath { path } => {
            handle_set_path(path)?;
        }
        DataCommands::ResetPath => {
            handle_reset_path()?;
        }
        DataCommands::Build {
            modification,
            fasta,
            makeblastdb,
            force,
        } => {
            let manager = DataManager::new()?;
            handle_build(&manager, modification, &fasta, &makeblastdb, force).await?;
        }
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    println!("{}", manager.get_data_path().display());
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    DataManager::set_custom_path(&path)?;
    println!("✓ Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    DataManager::reset_path()?;
    let manager = DataManager::new()?;
    println!(
        "✓ Data path reset to default: {}",
        manager.get_data_path().display()
    );
    Ok(())
}

async fn handle_build(
    manager: &DataManager,
    modification: PtmType,
    fasta: &Path,
    makeblastdb: &str,
    force: bool,
) -> Result<()> {
    if manager.has_blastdb(modification) && !force {
        return Err(CliError::Data(format!(
            "A {} database already exists in {:?}. Use --force to rebuild it.",
            modification,
            manager.get_data_path()
        )));
    }

    let records = check_site_titles(fasta, modification)?;
    info!("{:?} holds {} site record(s).", fasta, records);

    manager.ensure_exists()?;
    let fasta = std::path::absolute(fasta)?;
    let database = manager.blastdb_name(modification);

    println!(
        "Building {} from {} site record(s)...",
        database, records
    );
    blast::run_makeblastdb(makeblastdb, &fasta, &database, manager.get_data_path()).await?;
    println!(
        "✓ Database written to: {}",
        manager.blastdb_path(modification).display()
    );
    Ok(())
}

/// Ensures every FASTA title can be decoded at search time and counts the
/// records. Titles naming another modification are only warned about.
fn check_site_titles(path: &Path, modification: PtmType) -> Result<usize> {
    let reader = fasta::Reader::from_file(path).map_err(|e| CliError::parsing(path, e))?;
    let mut records = 0;
    let mut foreign = 0;

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CliError::parsing(path, e))?;
        let title = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };
        let site = ModificationRecord::parse(&title).map_err(|e| {
            CliError::parsing(
                path,
                anyhow::Error::new(e).context(format!("record {}", index + 1)),
            )
        })?;
        if !site
            .modification()
            .eq_ignore_ascii_case(modification.descriptor())
        {
            foreign += 1;
        }
        records += 1;
    }

    if records == 0 {
        return Err(CliError::Data(format!(
            "{:?} contains no FASTA records.",
            path
        )));
    }
    if foreign > 0 {
        warn!(
            "{} of {} record(s) in {:?} are not labelled {}.",
            foreign,
            records,
            path,
            modification.descriptor()
        );
    }
    Ok(records)
}
