use crate::error::{CliError, Result};
use flams::core::io::fasta::ProteinSequence;
use std::path::Path;
use tracing::{debug, info};

pub const UNIPROT_REST_URL: &str = "https://rest.uniprot.org/uniprotkb";

/// The only residue whose modification sites are catalogued.
pub const SUPPORTED_RESIDUE: char = 'K';

pub fn uniprot_fasta_url(accession: &str) -> String {
    format!("{}/{}.fasta", UNIPROT_REST_URL, accession)
}

/// Downloads the FASTA record of `accession` to `destination`.
pub async fn fetch_uniprot(accession: &str, destination: &Path) -> Result<()> {
    let url = uniprot_fasta_url(accession);
    info!("Fetching query protein from {}", url);

    let client = reqwest::Client::new();
    let response = client.get(&url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    if body.is_empty() {
        return Err(CliError::Query(format!(
            "UniProt returned no sequence for '{}'.",
            accession
        )));
    }

    tokio::fs::write(destination, &body).await?;
    debug!("Stored {} byte(s) at {:?}", body.len(), destination);
    Ok(())
}

pub fn load_query(path: &Path) -> Result<ProteinSequence> {
    if !path.is_file() {
        return Err(CliError::Query(format!(
            "Input file {:?} does not exist or is not a file.",
            path
        )));
    }
    ProteinSequence::read_from_path(path).map_err(|e| CliError::parsing(path, e))
}

/// Checks that `position` addresses a lysine of `protein`.
pub fn check_residue(protein: &ProteinSequence, position: usize) -> Result<()> {
    let residue = protein.residue_at(position).ok_or_else(|| {
        CliError::Query(format!(
            "Position {} is outside of '{}', which is {} residue(s) long.",
            position,
            protein.id,
            protein.len()
        ))
    })?;

    if residue != SUPPORTED_RESIDUE {
        return Err(CliError::Query(format!(
            "Residue {} of '{}' is '{}', not a lysine ('{}').",
            position, protein.id, residue, SUPPORTED_RESIDUE
        )));
    }
    Ok(())
}
