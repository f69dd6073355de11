use thiserror::Error;

use crate::core::models::modification::TitleParseError;
use crate::core::models::ptm::PtmType;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Hit at index {index} has an unparsable title: {source}")]
    Title {
        index: usize,
        #[source]
        source: TitleParseError,
    },

    #[error("Filtering {modification} results failed: {source}")]
    Modification {
        modification: PtmType,
        #[source]
        source: Box<EngineError>,
    },
}
