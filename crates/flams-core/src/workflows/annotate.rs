use crate::core::models::alignment::SearchResult;
use crate::core::models::ptm::PtmType;
use crate::core::models::site::SiteMatch;
use crate::engine::config::FilterConfig;
use crate::engine::error::EngineError;
use crate::engine::filter::filter_retained_hits;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The search result obtained against one modification's site database.
#[derive(Debug, Clone, PartialEq)]
pub struct ModificationSearch {
    pub modification: PtmType,
    pub result: SearchResult,
}

impl ModificationSearch {
    pub fn new(modification: PtmType, result: SearchResult) -> Self {
        Self {
            modification,
            result,
        }
    }
}

/// Filters every search with the same configuration and flattens the retained
/// segments into report rows.
///
/// Rows follow the order of `searches`, then hit order, then segment order.
#[instrument(skip_all, name = "annotate_workflow", fields(searches = searches.len()))]
pub fn run(
    searches: &[ModificationSearch],
    config: &FilterConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<SiteMatch>, EngineError> {
    info!(
        "Filtering {} search result(s) for residue {} (tolerance {}, e-value < {}).",
        searches.len(),
        config.query_position,
        config.tolerance,
        config.evalue_threshold
    );
    reporter.report(Progress::TaskStart {
        total_steps: searches.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = searches.iter();

    #[cfg(feature = "parallel")]
    let iterator = searches.par_iter();

    let per_search: Vec<Result<Vec<SiteMatch>, EngineError>> = iterator
        .map(|search| {
            annotate_search(search, config, reporter).map_err(|source| {
                EngineError::Modification {
                    modification: search.modification,
                    source: Box::new(source),
                }
            })
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let mut matches = Vec::new();
    for rows in per_search {
        matches.extend(rows?);
    }

    info!("Found {} matching modification site(s).", matches.len());
    Ok(matches)
}

fn annotate_search(
    search: &ModificationSearch,
    config: &FilterConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<SiteMatch>, EngineError> {
    let retained = filter_retained_hits(&search.result, config)?;

    let rows: Vec<SiteMatch> = retained
        .iter()
        .flat_map(|retained| {
            retained
                .hit
                .segments
                .iter()
                .map(|segment| SiteMatch::new(&retained.record, segment))
        })
        .collect();

    reporter.report(Progress::ModificationFiltered {
        modification: search.modification,
        hits: search.result.len(),
        retained: retained.len(),
    });
    Ok(rows)
}
