use crate::blast::BlastpJob;
use crate::cli::SearchArgs;
use crate::config::{self, AppConfig, QuerySource};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::query;
use crate::utils::progress::CliProgressHandler;
use flams::core::io::report::SiteReport;
use flams::core::io::tabular::BlastTabular;
use flams::core::io::traits::SearchResultFile;
use flams::core::models::ptm::PtmType;
use flams::core::models::site::SiteMatch;
use flams::engine::progress::ProgressReporter;
use flams::workflows::annotate::{self, ModificationSearch};
use futures_util::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub async fn run(args: SearchArgs) -> Result<()> {
    info!("Initializing data manager...");
    let data_manager = DataManager::new()?;

    info!("Merging configuration from file and CLI arguments...");
    let config = config::build_config(&args)?;

    let (query_path, downloaded) = match &config.query {
        QuerySource::File(path) => (path.clone(), false),
        QuerySource::Uniprot(accession) => {
            data_manager.ensure_exists()?;
            let destination = data_manager.downloaded_query_path(accession);
            query::fetch_uniprot(accession, &destination).await?;
            (destination, true)
        }
    };

    let outcome = search(&config, &data_manager, &query_path).await;

    if downloaded {
        if let Err(e) = tokio::fs::remove_file(&query_path).await {
            warn!("Could not remove downloaded query {:?}: {}", query_path, e);
        }
    }

    let matches = outcome?;
    print_summary(&config, &matches);
    Ok(())
}

async fn search(
    config: &AppConfig,
    data_manager: &DataManager,
    query_path: &Path,
) -> Result<Vec<SiteMatch>> {
    info!("Loading query protein from {:?}", query_path);
    let protein = query::load_query(query_path)?;
    query::check_residue(&protein, config.filter.query_position)?;

    let missing: Vec<PtmType> = config
        .modifications
        .iter()
        .copied()
        .filter(|m| !data_manager.has_blastdb(*m))
        .collect();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|m| m.name()).collect();
        return Err(CliError::Data(format!(
            "No BLAST database for {} in {:?}.\nHint: Run 'flams data build -m <NAME> --fasta <PATH>' first.",
            names.join(", "),
            data_manager.get_data_path()
        )));
    }

    let progress_handler = CliProgressHandler::new();
    let searches = {
        let scratch = tempfile::tempdir()?;
        let query_path = std::path::absolute(query_path)?;
        progress_handler.start_phase(format!(
            "Running blastp against {} database(s)...",
            config.modifications.len()
        ));
        let outputs = run_searches(config, data_manager, &query_path, scratch.path()).await;
        progress_handler.finish_phase();
        read_searches(outputs?)?
    };

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    info!("Invoking the core annotation workflow...");
    let matches = tokio::task::block_in_place(|| {
        annotate::run(&searches, &config.filter, &reporter)
    })?;

    info!(
        "Writing {} row(s) to {:?}",
        matches.len(),
        &config.output_path
    );
    SiteReport::write_to_path(&matches, &config.output_path)?;
    Ok(matches)
}

async fn run_searches(
    config: &AppConfig,
    data_manager: &DataManager,
    query_path: &Path,
    scratch: &Path,
) -> Result<Vec<(PtmType, PathBuf)>> {
    let runs = config.modifications.iter().map(|&modification| async move {
        let database = data_manager.blastdb_name(modification);
        let output = scratch.join(format!("{}.tsv", database));
        let job = BlastpJob {
            executable: &config.blast.executable,
            query: query_path,
            database: &database,
            evalue: config.filter.evalue_threshold,
            num_threads: config.blast.num_threads,
            output: &output,
        };
        job.run(data_manager.get_data_path()).await?;
        Ok::<_, CliError>((modification, output))
    });
    try_join_all(runs).await
}

fn read_searches(outputs: Vec<(PtmType, PathBuf)>) -> Result<Vec<ModificationSearch>> {
    outputs
        .into_iter()
        .map(|(modification, path)| {
            let result = BlastTabular::read_from_path(&path)?;
            info!(
                "{}: {} hit(s), {} segment(s)",
                modification,
                result.len(),
                result.segment_count()
            );
            Ok(ModificationSearch::new(modification, result))
        })
        .collect()
}

fn print_summary(config: &AppConfig, matches: &[SiteMatch]) {
    if matches.is_empty() {
        println!(
            "No known modification site corresponds to residue {} (range {}).",
            config.filter.query_position, config.filter.tolerance
        );
    } else {
        println!(
            "✓ Found {} known modification site(s) at residue {}:",
            matches.len(),
            config.filter.query_position
        );
        for m in matches {
            println!(
                "  {} {} at {} in {} [{}] (e-value {:e})",
                m.modification, m.collection_id, m.position, m.protein_id, m.species, m.evalue
            );
        }
    }
    println!("Report written to: {}", config.output_path.display());
}
