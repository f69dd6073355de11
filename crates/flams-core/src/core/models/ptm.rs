use phf::{Map, phf_map};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown modification '{0}'. Expected one of: acetylation, lactylation, formylation, succinylation, hmgylation")]
pub struct UnknownModification(pub String);

/// Modification types for which a curated site database is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PtmType {
    Acetylation,
    Lactylation,
    Formylation,
    Succinylation,
    Hmgylation,
}

static PTM_NAMES: Map<&'static str, PtmType> = phf_map! {
    "acetylation" => PtmType::Acetylation,
    "lactylation" => PtmType::Lactylation,
    "formylation" => PtmType::Formylation,
    "succinylation" => PtmType::Succinylation,
    "hmgylation" => PtmType::Hmgylation,
};

impl PtmType {
    pub const ALL: [PtmType; 5] = [
        PtmType::Acetylation,
        PtmType::Lactylation,
        PtmType::Formylation,
        PtmType::Succinylation,
        PtmType::Hmgylation,
    ];

    /// Lowercase name used on the command line, in config files and in
    /// database file names.
    pub fn name(self) -> &'static str {
        match self {
            PtmType::Acetylation => "acetylation",
            PtmType::Lactylation => "lactylation",
            PtmType::Formylation => "formylation",
            PtmType::Succinylation => "succinylation",
            PtmType::Hmgylation => "hmgylation",
        }
    }

    /// Label as it appears in database record titles.
    pub fn descriptor(self) -> &'static str {
        match self {
            PtmType::Acetylation => "Acetylation",
            PtmType::Lactylation => "Lactylation",
            PtmType::Formylation => "Formylation",
            PtmType::Succinylation => "Succinylation",
            PtmType::Hmgylation => "HMGylation",
        }
    }

    pub fn database_version(self) -> &'static str {
        "1.0"
    }

    /// Name of the BLAST database holding this modification's sites,
    /// e.g. `acetylation-1.0`.
    pub fn blastdb_name(self) -> String {
        format!("{}-{}", self.name(), self.database_version())
    }
}

impl FromStr for PtmType {
    type Err = UnknownModification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PTM_NAMES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnknownModification(s.to_string()))
    }
}

impl fmt::Display for PtmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PtmType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
