use crate::core::models::alignment::{Hit, SearchResult, Segment};
use crate::core::models::modification::{ModificationRecord, TitleParseError};
use crate::engine::config::FilterConfig;
use crate::engine::error::EngineError;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A hit that kept at least one segment, together with its decoded title.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedHit {
    pub record: ModificationRecord,
    pub hit: Hit,
}

/// Builds a new search result holding only the hits, and within them only the
/// segments, whose known modification site corresponds to the queried residue.
///
/// Hits without any passing segment are dropped. Retained hits and segments keep
/// their input order and titles are carried through unchanged. An empty return
/// value means no match was found.
///
/// # Errors
///
/// Returns [`EngineError::Title`] for the first hit (in input order) whose title
/// cannot be decoded. No partial result is produced in that case.
pub fn filter_search_result(
    result: &SearchResult,
    config: &FilterConfig,
) -> Result<SearchResult, EngineError> {
    let retained = filter_retained_hits(result, config)?;
    Ok(SearchResult::new(
        retained.into_iter().map(|retained| retained.hit).collect(),
    ))
}

/// Same selection as [`filter_search_result`], keeping each hit's decoded
/// [`ModificationRecord`] alongside it.
#[instrument(skip_all, name = "alignment_filter", fields(hits = result.hits.len()))]
pub fn filter_retained_hits(
    result: &SearchResult,
    config: &FilterConfig,
) -> Result<Vec<RetainedHit>, EngineError> {
    #[cfg(not(feature = "parallel"))]
    let iterator = result.hits.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = result.hits.par_iter().enumerate();

    let outcomes: Vec<Result<Option<RetainedHit>, EngineError>> = iterator
        .map(|(index, hit)| {
            filter_hit(hit, config).map_err(|source| EngineError::Title { index, source })
        })
        .collect();

    let mut retained = Vec::new();
    for outcome in outcomes {
        if let Some(hit) = outcome? {
            retained.push(hit);
        }
    }

    debug!(
        "Retained {} of {} hit(s) for query position {} (tolerance {}, e-value < {}).",
        retained.len(),
        result.hits.len(),
        config.query_position,
        config.tolerance,
        config.evalue_threshold
    );
    Ok(retained)
}

/// Filters the segments of a single hit, returning `None` when none pass.
pub fn filter_hit(
    hit: &Hit,
    config: &FilterConfig,
) -> Result<Option<RetainedHit>, TitleParseError> {
    let record = ModificationRecord::parse(&hit.title)?;

    let segments: Vec<Segment> = hit
        .segments
        .iter()
        .filter(|segment| config.matches(segment, &record))
        .cloned()
        .collect();

    if segments.is_empty() {
        return Ok(None);
    }
    Ok(Some(RetainedHit {
        record,
        hit: Hit::new(hit.title.clone(), segments),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE_304: &str = "PLMD-7244|P25665|304 Acetylation [E. coli]";
    const TITLE_12: &str = "PLMD-11|Q00001|12 Succinylation [Homo sapiens]";

    fn config(query_position: usize, tolerance: usize) -> FilterConfig {
        FilterConfig {
            query_position,
            tolerance,
            evalue_threshold: 0.01,
        }
    }

    #[test]
    fn empty_result_filters_to_empty_result() {
        let filtered = filter_search_result(&SearchResult::default(), &config(1, 0)).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn keeps_only_passing_segments_and_drops_hits_without_any() {
        let result = SearchResult::new(vec![
            Hit::new(
                TITLE_304,
                vec![
                    Segment::new(10, 40, 290, 320, 0.001),
                    Segment::new(10, 40, 290, 320, 0.5),
                    Segment::new(1, 30, 281, 310, 0.002),
                ],
            ),
            Hit::new(TITLE_12, vec![Segment::new(100, 120, 1, 21, 0.001)]),
        ]);

        // local site 304 - 289 = 15 = 24 - 9, and 304 - 280 = 24 = 24 - 0
        let filtered = filter_search_result(&result, &config(24, 0)).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.hits[0].title, TITLE_304);
        assert_eq!(
            filtered.hits[0].segments,
            vec![
                Segment::new(10, 40, 290, 320, 0.001),
                Segment::new(1, 30, 281, 310, 0.002),
            ]
        );
    }

    #[test]
    fn preserves_hit_order_across_many_hits() {
        let hits: Vec<Hit> = (1..=50)
            .map(|i| {
                let title = format!("PLMD-{}|P{:05}|{} Acetylation [E. coli]", i, i, 100 + i);
                // only even hits cover the site
                let subject_start = if i % 2 == 0 { 100 } else { 200 };
                Hit::new(title, vec![Segment::new(1, 60, subject_start, subject_start + 59, 1e-5)])
            })
            .collect();
        let result = SearchResult::new(hits);

        let filtered = filter_search_result(&result, &config(30, 30)).unwrap();

        let titles: Vec<&str> = filtered.hits.iter().map(|h| h.title.as_str()).collect();
        let expected: Vec<String> = (1..=50)
            .filter(|i| i % 2 == 0)
            .map(|i| format!("PLMD-{}|P{:05}|{} Acetylation [E. coli]", i, i, 100 + i))
            .collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn input_result_is_left_untouched() {
        let result = SearchResult::new(vec![Hit::new(
            TITLE_304,
            vec![
                Segment::new(10, 40, 290, 320, 0.001),
                Segment::new(10, 40, 290, 320, 0.5),
            ],
        )]);
        let before = result.clone();

        let _ = filter_search_result(&result, &config(24, 0)).unwrap();
        assert_eq!(result, before);
    }

    #[test]
    fn malformed_title_is_propagated_with_its_index() {
        let result = SearchResult::new(vec![
            Hit::new(TITLE_304, vec![Segment::new(10, 40, 290, 320, 0.001)]),
            Hit::new("garbage-no-structure", vec![Segment::new(1, 2, 1, 2, 0.001)]),
            Hit::new("also garbage", vec![]),
        ]);

        let error = filter_search_result(&result, &config(24, 0)).unwrap_err();
        assert!(matches!(
            error,
            EngineError::Title {
                index: 1,
                source: TitleParseError::Malformed(ref title),
            } if title == "garbage-no-structure"
        ));
    }

    #[test]
    fn malformed_title_fails_even_without_segments() {
        let result = SearchResult::new(vec![Hit::new("garbage-no-structure", vec![])]);
        assert!(filter_search_result(&result, &config(1, 0)).is_err());
    }

    #[test]
    fn filter_hit_returns_none_when_nothing_passes() {
        let hit = Hit::new(TITLE_304, vec![Segment::new(10, 40, 290, 320, 0.001)]);
        assert_eq!(filter_hit(&hit, &config(18, 0)), Ok(None));
    }

    #[test]
    fn filter_hit_keeps_the_decoded_title_with_the_retained_segments() {
        let hit = Hit::new(
            TITLE_304,
            vec![
                Segment::new(10, 40, 290, 320, 0.001),
                Segment::new(10, 40, 290, 320, 0.5),
            ],
        );

        let retained = filter_hit(&hit, &config(24, 0)).unwrap().unwrap();

        assert_eq!(retained.record, ModificationRecord::parse(TITLE_304).unwrap());
        assert_eq!(retained.record.position(), 304);
        assert_eq!(retained.hit.title, TITLE_304);
        assert_eq!(retained.hit.segments, vec![Segment::new(10, 40, 290, 320, 0.001)]);
    }

    #[test]
    fn retained_hits_pair_each_record_with_its_own_hit() {
        let result = SearchResult::new(vec![
            Hit::new(TITLE_12, vec![Segment::new(100, 120, 1, 21, 0.001)]),
            Hit::new(TITLE_304, vec![Segment::new(10, 40, 290, 320, 0.001)]),
            Hit::new(
                "PLMD-2|P00002|24 Formylation [Mus musculus]",
                vec![Segment::new(1, 30, 1, 30, 1e-6)],
            ),
        ]);

        let retained = filter_retained_hits(&result, &config(24, 0)).unwrap();

        let pairs: Vec<(&str, &str)> = retained
            .iter()
            .map(|r| (r.record.collection_id(), r.hit.title.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("PLMD-7244", TITLE_304),
                ("PLMD-2", "PLMD-2|P00002|24 Formylation [Mus musculus]"),
            ]
        );
    }
}
