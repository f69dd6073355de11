//! Thin wrappers around the BLAST+ executables.
//!
//! Both tools run with the data directory as working directory and receive
//! database names relative to it, since BLAST+ splits `-db` values on spaces.

use crate::error::{CliError, Result};
use flams::core::io::tabular::BLAST_OUTFMT;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, instrument};

const INSTALL_HINT: &str =
    "executable not found. Install BLAST+ and make sure it is on your PATH, or point to it explicitly.";

/// One `blastp` invocation against a modification database.
#[derive(Debug, Clone)]
pub struct BlastpJob<'a> {
    pub executable: &'a str,
    pub query: &'a Path,
    pub database: &'a str,
    pub evalue: f64,
    pub num_threads: usize,
    pub output: &'a Path,
}

impl BlastpJob<'_> {
    pub fn arguments(&self) -> Vec<OsString> {
        vec![
            "-query".into(),
            self.query.into(),
            "-db".into(),
            self.database.into(),
            "-evalue".into(),
            self.evalue.to_string().into(),
            "-outfmt".into(),
            BLAST_OUTFMT.into(),
            "-out".into(),
            self.output.into(),
            "-num_threads".into(),
            self.num_threads.to_string().into(),
        ]
    }

    #[instrument(skip_all, fields(db = self.database))]
    pub async fn run(&self, working_dir: &Path) -> Result<()> {
        let mut command = Command::new(self.executable);
        command.args(self.arguments()).current_dir(working_dir);
        run_tool("blastp", command).await
    }
}

pub fn makeblastdb_arguments(fasta: &Path, database: &str) -> Vec<OsString> {
    vec![
        "-in".into(),
        fasta.into(),
        "-dbtype".into(),
        "prot".into(),
        "-input_type".into(),
        "fasta".into(),
        "-parse_seqids".into(),
        "-out".into(),
        database.into(),
    ]
}

#[instrument(skip(executable, fasta))]
pub async fn run_makeblastdb(
    executable: &str,
    fasta: &Path,
    database: &str,
    working_dir: &Path,
) -> Result<()> {
    let mut command = Command::new(executable);
    command
        .args(makeblastdb_arguments(fasta, database))
        .current_dir(working_dir);
    run_tool("makeblastdb", command).await
}

async fn run_tool(tool: &str, mut command: Command) -> Result<()> {
    debug!("Running {:?}", command.as_std());
    let output = command.output().await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => CliError::ExternalTool {
            tool: tool.to_string(),
            message: INSTALL_HINT.to_string(),
        },
        _ => CliError::Io(e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CliError::ExternalTool {
            tool: tool.to_string(),
            message: format!("exited with {}: {}", output.status, stderr.trim()),
        });
    }
    Ok(())
}
