use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static UNIPROT_ACCESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[OPQ][0-9][A-Z0-9]{3}[0-9]|[A-NR-Z][0-9](?:[A-Z][A-Z0-9]{2}[0-9]){1,2})$")
        .expect("UniProt accession pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error(
        "'{0}' is not a valid UniProt accession (e.g., 'P57703'). Isoform suffixes are not supported."
    )]
    InvalidUniprotId(String),
}

/// Splits `KEY=VALUE` at the first `=`; the value may itself contain `=`.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    Ok((key, value.trim()))
}

/// Normalizes a UniProt accession to uppercase and checks its shape.
pub fn parse_uniprot_id(input: &str) -> Result<String, ParseError> {
    let id = input.trim().to_ascii_uppercase();
    if id.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "accession",
            input: input.to_string(),
        });
    }
    if !UNIPROT_ACCESSION.is_match(&id) {
        return Err(ParseError::InvalidUniprotId(input.to_string()));
    }
    Ok(id)
}
