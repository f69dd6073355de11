use clap::{Args, Parser, Subcommand};
use flams::core::models::ptm::PtmType;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "flams",
    version,
    about = "FLAMS - Find Lysine Acylations & other Modification Sites. Searches a protein against curated databases of known modification sites and reports the sites that correspond to a residue of interest.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to filter alignment results.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a protein for known modification sites at a residue of interest.
    Search(SearchArgs),
    /// Manage the local data directory holding the modification site databases.
    Data(DataArgs),
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    // --- Core Arguments ---
    /// 1-based position of the lysine of interest in the query protein.
    #[arg(value_name = "POSITION")]
    pub position: usize,

    #[command(flatten)]
    pub query: QueryInput,

    /// Path for the tab-separated report [default: out.tsv].
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Filter Overrides ---
    /// Allowed distance, in residues, between the queried lysine and a known site
    /// in the local alignment frame.
    #[arg(short, long, value_name = "INT")]
    pub range: Option<usize>,

    /// E-value cut-off for alignments.
    #[arg(short, long, value_name = "FLOAT")]
    pub evalue: Option<f64>,

    /// Modification database to search. Can be repeated or comma-separated.
    /// Defaults to all available modifications.
    #[arg(
        short,
        long = "modification",
        value_name = "NAME",
        value_delimiter = ','
    )]
    pub modifications: Vec<PtmType>,

    // --- BLAST Overrides ---
    /// Number of threads handed to each blastp process.
    #[arg(short = 't', long, value_name = "NUM")]
    pub num_threads: Option<usize>,

    /// Path or name of the blastp executable.
    #[arg(long, value_name = "PATH")]
    pub blastp: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.range=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// The query protein, read from a FASTA file or fetched from UniProt.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct QueryInput {
    /// Path to a FASTA file holding the query protein.
    #[arg(short, long, visible_alias = "in", value_name = "FASTA")]
    pub input: Option<PathBuf>,

    /// UniProt accession of the query protein, fetched from the UniProt REST API.
    #[arg(long, value_name = "UNIPROT_ID")]
    pub id: Option<String>,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing the databases.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
    /// Build the BLAST database of a modification from a FASTA file of known sites.
    Build {
        /// Modification the FASTA file describes.
        #[arg(short, long, value_name = "NAME")]
        modification: PtmType,

        /// FASTA file whose record titles follow 'collection|protein|position Type [species]'.
        #[arg(long, value_name = "PATH")]
        fasta: PathBuf,

        /// Path or name of the makeblastdb executable.
        #[arg(long, value_name = "PATH", default_value = "makeblastdb")]
        makeblastdb: String,

        /// Rebuild even if the database already exists.
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("flams").chain(args.iter().copied()))
    }

    #[test]
    fn search_accepts_fasta_or_uniprot_id() {
        assert!(parse(&["search", "--in", "file.fasta", "2"]).is_ok());
        assert!(
            parse(&[
                "search", "--id", "P57703", "2", "--range", "3", "-o", "file.out", "-t", "3"
            ])
            .is_ok()
        );
    }

    #[test]
    fn search_requires_exactly_one_query_source() {
        assert!(parse(&["search", "2"]).is_err());
        assert!(parse(&["search", "--in", "file.fasta", "--id", "P57703", "2"]).is_err());
    }

    #[test]
    fn position_and_range_must_be_integers() {
        assert!(parse(&["search", "--in", "file.fa", "2.5"]).is_err());
        assert!(parse(&["search", "--in", "file.fa", "abc"]).is_err());
        assert!(parse(&["search", "--in", "file.fa", "2", "--range", "2.5"]).is_err());
        assert!(parse(&["search", "--in", "file.fa", "2", "--range", "abc"]).is_err());
    }

    #[test]
    fn modifications_accept_repeats_and_commas() {
        let cli = parse(&[
            "search",
            "--in",
            "q.fa",
            "5",
            "-m",
            "acetylation,succinylation",
            "-m",
            "HMGylation",
        ])
        .unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("Expected 'search' subcommand");
        };
        assert_eq!(
            args.modifications,
            vec![
                PtmType::Acetylation,
                PtmType::Succinylation,
                PtmType::Hmgylation
            ]
        );
        assert!(parse(&["search", "--in", "q.fa", "5", "-m", "phosphorylation"]).is_err());
    }

    #[test]
    fn data_build_parses_modification_and_defaults_executable() {
        let cli = parse(&["data", "build", "-m", "lactylation", "--fasta", "sites.fasta"]).unwrap();
        let Commands::Data(DataArgs {
            command:
                DataCommands::Build {
                    modification,
                    makeblastdb,
                    force,
                    ..
                },
        }) = cli.command
        else {
            panic!("Expected 'data build' subcommand");
        };
        assert_eq!(modification, PtmType::Lactylation);
        assert_eq!(makeblastdb, "makeblastdb");
        assert!(!force);
    }
}
