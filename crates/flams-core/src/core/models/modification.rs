use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

// {collection}|{protein}|{position} {modification} [{species}]
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\|(\S+)\|(\d+) ([A-Za-z]+) \[(.+)\]")
        .expect("title pattern is a valid regular expression")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TitleParseError {
    #[error(
        "Title '{0}' does not match the expected structure '{{collection}}|{{protein}}|{{position}} {{modification}} [{{species}}]'"
    )]
    Malformed(String),

    #[error("Invalid modification position '{value}' in title '{title}'")]
    InvalidPosition { title: String, value: String },
}

/// A known modification site, decoded from the title of a database record.
///
/// Positions refer to the ungapped reference protein and are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModificationRecord {
    collection_id: String,
    protein_id: String,
    position: usize,
    modification: String,
    species: String,
}

impl ModificationRecord {
    /// Decodes a record title of the form
    /// `PLMD-7244|P25665|304 Acetylation [Escherichia coli (strain K12)]`.
    ///
    /// Matching is anchored at the start of the title and anything after the
    /// closing bracket is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TitleParseError::Malformed`] if the title does not follow the
    /// structure, or [`TitleParseError::InvalidPosition`] if the position is
    /// zero or too large to represent.
    pub fn parse(title: &str) -> Result<Self, TitleParseError> {
        let captures = TITLE_PATTERN
            .captures(title)
            .ok_or_else(|| TitleParseError::Malformed(title.to_string()))?;

        let position_str = &captures[3];
        let position = position_str
            .parse::<usize>()
            .ok()
            .filter(|&p| p > 0)
            .ok_or_else(|| TitleParseError::InvalidPosition {
                title: title.to_string(),
                value: position_str.to_string(),
            })?;

        Ok(Self {
            collection_id: captures[1].to_string(),
            protein_id: captures[2].to_string(),
            position,
            modification: captures[4].to_string(),
            species: captures[5].to_string(),
        })
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn protein_id(&self) -> &str {
        &self.protein_id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn modification(&self) -> &str {
        &self.modification
    }

    pub fn species(&self) -> &str {
        &self.species
    }
}

impl FromStr for ModificationRecord {
    type Err = TitleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModificationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{} {} [{}]",
            self.collection_id, self.protein_id, self.position, self.modification, self.species
        )
    }
}
