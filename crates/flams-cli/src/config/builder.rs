use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, BlastSettings, QuerySource};
use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use flams::engine::config::FilterConfigBuilder;
use std::path::{Path, PathBuf};

pub fn build_config(args: &SearchArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let search_file = file_config.search.take().unwrap_or_default();
    let range = args.range.or(search_file.range).unwrap_or(defaults.range);
    let evalue = args.evalue.or(search_file.evalue).unwrap_or(defaults.evalue);

    let modifications = if !args.modifications.is_empty() {
        args.modifications.clone()
    } else {
        search_file
            .modifications
            .unwrap_or(defaults.modifications)
    };
    if modifications.is_empty() {
        return Err(CliError::Config(
            "At least one modification must be searched.".to_string(),
        ));
    }
    let mut modifications_deduped = Vec::with_capacity(modifications.len());
    for m in modifications {
        if !modifications_deduped.contains(&m) {
            modifications_deduped.push(m);
        }
    }

    let blast_file = file_config.blast.take().unwrap_or_default();
    let executable = args
        .blastp
        .clone()
        .or(blast_file.executable)
        .unwrap_or(defaults.blast_executable);
    let num_threads = args
        .num_threads
        .or(blast_file.num_threads)
        .unwrap_or(defaults.num_threads);
    if num_threads == 0 {
        return Err(CliError::Config(
            "`blast.num-threads` must be at least 1.".to_string(),
        ));
    }

    let query = resolve_query_source(args)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or(defaults.output_path);
    validate_output_path(&output_path)?;

    let filter = FilterConfigBuilder::new()
        .query_position(args.position)
        .tolerance(range)
        .evalue_threshold(evalue)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        query,
        output_path,
        modifications: modifications_deduped,
        blast: BlastSettings {
            executable,
            num_threads,
        },
        filter,
    })
}

fn resolve_query_source(args: &SearchArgs) -> Result<QuerySource> {
    match (&args.query.input, &args.query.id) {
        (Some(path), None) => {
            if !path.is_file() {
                return Err(CliError::Query(format!(
                    "Input file {:?} does not exist or is not a file.",
                    path
                )));
            }
            Ok(QuerySource::File(path.clone()))
        }
        (None, Some(id)) => parser::parse_uniprot_id(id)
            .map(QuerySource::Uniprot)
            .map_err(|e| CliError::Argument(e.to_string())),
        _ => Err(CliError::Argument(
            "Exactly one of --input or --id must be given.".to_string(),
        )),
    }
}

fn validate_output_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(CliError::Argument(format!(
            "Output {:?} is a directory. Please provide a file path.",
            path
        )));
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.is_dir() {
        return Err(CliError::Argument(format!(
            "Output directory {:?} does not exist.",
            parent
        )));
    }
    Ok(())
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "search.range" => {
                config.search.get_or_insert_with(Default::default).range =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            "search.evalue" => {
                config.search.get_or_insert_with(Default::default).evalue =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
            }
            "blast.executable" => {
                config.blast.get_or_insert_with(Default::default).executable =
                    Some(value_str.to_string());
            }
            "blast.num-threads" => {
                config.blast.get_or_insert_with(Default::default).num_threads =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::QueryInput;
    use flams::core::models::ptm::PtmType;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    struct Fixture {
        dir: TempDir,
        input: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().expect("create temp dir");
        let input = dir.path().join("query.fasta");
        fs::write(&input, ">q\nMAKTE\n").unwrap();
        Fixture { dir, input }
    }

    fn base_search_args(fx: &Fixture) -> SearchArgs {
        SearchArgs {
            position: 3,
            query: QueryInput {
                input: Some(fx.input.clone()),
                id: None,
            },
            output: Some(fx.dir.path().join("out.tsv")),
            config: None,
            range: None,
            evalue: None,
            modifications: vec![],
            num_threads: None,
            blastp: None,
            set_values: vec![],
        }
    }

    fn write_config(fx: &Fixture, content: &str) -> PathBuf {
        let path = fx.dir.path().join("flams.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_fill_every_unset_value() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.output = None;

        let app = build_config(&args).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(app.query, QuerySource::File(fx.input.clone()));
        assert_eq!(app.output_path, PathBuf::from("out.tsv"));
        assert_eq!(app.modifications, PtmType::ALL.to_vec());
        assert_eq!(app.blast.executable, "blastp");
        assert_eq!(app.blast.num_threads, 1);
        assert_eq!(app.filter.query_position, 3);
        assert_eq!(app.filter.tolerance, defaults.range);
        assert_eq!(app.filter.evalue_threshold, defaults.evalue);
    }

    #[test]
    fn file_values_are_used_when_cli_is_silent() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.config = Some(write_config(
            &fx,
            r#"
            [search]
            range = 4
            evalue = 0.001
            modifications = ["succinylation"]

            [blast]
            executable = "/opt/blast/blastp"
            num-threads = 6
            "#,
        ));

        let app = build_config(&args).expect("build ok");
        assert_eq!(app.filter.tolerance, 4);
        assert_eq!(app.filter.evalue_threshold, 0.001);
        assert_eq!(app.modifications, vec![PtmType::Succinylation]);
        assert_eq!(app.blast.executable, "/opt/blast/blastp");
        assert_eq!(app.blast.num_threads, 6);
    }

    #[test]
    fn cli_overrides_file_values() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.config = Some(write_config(
            &fx,
            "[search]\nrange = 4\nmodifications = ['succinylation']\n[blast]\nnum-threads = 6\n",
        ));
        args.range = Some(1);
        args.num_threads = Some(2);
        args.modifications = vec![PtmType::Lactylation, PtmType::Acetylation];

        let app = build_config(&args).expect("build ok");
        assert_eq!(app.filter.tolerance, 1);
        assert_eq!(app.blast.num_threads, 2);
        assert_eq!(
            app.modifications,
            vec![PtmType::Lactylation, PtmType::Acetylation]
        );
    }

    #[test]
    fn set_values_override_file_but_not_flags() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.config = Some(write_config(&fx, "[search]\nrange = 4\nevalue = 0.5\n"));
        args.set_values = vec![
            "search.range=2".to_string(),
            "search.evalue=1e-5".to_string(),
            "blast.executable=/usr/local/bin/blastp".to_string(),
            "blast.num-threads=3".to_string(),
        ];
        args.num_threads = Some(9);

        let app = build_config(&args).expect("build ok");
        assert_eq!(app.filter.tolerance, 2);
        assert!((app.filter.evalue_threshold - 1e-5).abs() < 1e-18);
        assert_eq!(app.blast.executable, "/usr/local/bin/blastp");
        assert_eq!(app.blast.num_threads, 9);
    }

    #[test]
    fn invalid_set_values_are_config_errors() {
        let fx = fixture();
        for bad in ["search.range", "search.range=abc", "search.lysine=3"] {
            let mut args = base_search_args(&fx);
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "expected config error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn repeated_modifications_are_searched_once() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.modifications = vec![
            PtmType::Formylation,
            PtmType::Acetylation,
            PtmType::Formylation,
        ];

        let app = build_config(&args).expect("build ok");
        assert_eq!(
            app.modifications,
            vec![PtmType::Formylation, PtmType::Acetylation]
        );
    }

    #[test]
    fn invalid_filter_values_are_rejected() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.evalue = Some(0.0);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_search_args(&fx);
        args.position = 0;
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_search_args(&fx);
        args.num_threads = Some(0);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_input_file_is_rejected() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.query.input = Some(fx.dir.path().join("file.fa"));
        assert!(matches!(build_config(&args), Err(CliError::Query(_))));
    }

    #[test]
    fn uniprot_ids_are_validated_and_normalized() {
        let fx = fixture();
        let mut args = base_search_args(&fx);
        args.query = QueryInput {
            input: None,
            id: Some("p57703".to_string()),
        };
        let app = build_config(&args).expect("build ok");
        assert_eq!(app.query, QuerySource::Uniprot("P57703".to_string()));

        args.query.id = Some("hahahah".to_string());
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }

    #[test]
    fn output_must_be_a_file_in_an_existing_directory() {
        let fx = fixture();

        let mut args = base_search_args(&fx);
        args.output = Some(fx.dir.path().to_path_buf());
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));

        let mut args = base_search_args(&fx);
        args.output = Some(fx.dir.path().join("missing/out.tsv"));
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }
}
