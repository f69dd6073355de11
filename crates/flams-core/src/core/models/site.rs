use super::alignment::Segment;
use super::modification::ModificationRecord;
use serde::Serialize;

/// One reported correspondence between the queried residue and a known
/// modification site.
///
/// Field order is the column order of the written report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMatch {
    pub collection_id: String,
    pub protein_id: String,
    pub species: String,
    pub modification: String,
    pub position: usize,
    pub query_start: usize,
    pub query_end: usize,
    pub subject_start: usize,
    pub subject_end: usize,
    pub evalue: f64,
    pub bit_score: f64,
    pub percent_identity: f64,
    pub alignment_length: usize,
}

impl SiteMatch {
    pub fn new(record: &ModificationRecord, segment: &Segment) -> Self {
        Self {
            collection_id: record.collection_id().to_string(),
            protein_id: record.protein_id().to_string(),
            species: record.species().to_string(),
            modification: record.modification().to_string(),
            position: record.position(),
            query_start: segment.query_start,
            query_end: segment.query_end,
            subject_start: segment.subject_start,
            subject_end: segment.subject_end,
            evalue: segment.evalue,
            bit_score: segment.stats.bit_score,
            percent_identity: segment.stats.percent_identity,
            alignment_length: segment.stats.alignment_length,
        }
    }
}
