use std::ops::RangeInclusive;

/// Alignment statistics reported by the aligner alongside a segment.
///
/// These are carried through filtering for reporting only; matching never
/// looks at them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlignmentStats {
    pub bit_score: f64,
    pub percent_identity: f64,
    pub alignment_length: usize,
}

/// One local alignment region (HSP) between the query and a database record.
///
/// All coordinates are 1-based and inclusive, with `start <= end` on both
/// sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub query_start: usize,
    pub query_end: usize,
    pub subject_start: usize,
    pub subject_end: usize,
    pub evalue: f64,
    pub stats: AlignmentStats,
}

impl Segment {
    pub fn new(
        query_start: usize,
        query_end: usize,
        subject_start: usize,
        subject_end: usize,
        evalue: f64,
    ) -> Self {
        Self {
            query_start,
            query_end,
            subject_start,
            subject_end,
            evalue,
            stats: AlignmentStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: AlignmentStats) -> Self {
        self.stats = stats;
        self
    }

    #[inline]
    pub fn query_range(&self) -> RangeInclusive<usize> {
        self.query_start..=self.query_end
    }

    #[inline]
    pub fn subject_range(&self) -> RangeInclusive<usize> {
        self.subject_start..=self.subject_end
    }
}

/// A database record matched against the query, with its alignment segments
/// in the order the aligner reported them.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub title: String,
    pub segments: Vec<Segment>,
}

impl Hit {
    pub fn new(title: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            title: title.into(),
            segments,
        }
    }
}

/// The hits of one aligner invocation, in reported order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub hits: Vec<Hit>,
}

impl SearchResult {
    pub fn new(hits: Vec<Hit>) -> Self {
        Self { hits }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn segment_count(&self) -> usize {
        self.hits.iter().map(|h| h.segments.len()).sum()
    }
}

impl FromIterator<Hit> for SearchResult {
    fn from_iter<I: IntoIterator<Item = Hit>>(iter: I) -> Self {
        Self {
            hits: iter.into_iter().collect(),
        }
    }
}
