use crate::core::models::alignment::Segment;
use crate::core::models::modification::ModificationRecord;
use crate::engine::config::FilterConfig;

/// Decides whether a known modification site, as aligned by `segment`,
/// plausibly corresponds to the queried residue.
///
/// The checks run in order and stop at the first failure:
///
/// 1. the segment's e-value is strictly below `evalue_threshold`;
/// 2. the modification lies inside the segment's subject range;
/// 3. the queried residue lies inside the segment's query range;
/// 4. after shifting both positions into the segment's local frame, they
///    are at most `tolerance` residues apart.
pub fn segment_matches(
    segment: &Segment,
    modification: &ModificationRecord,
    query_position: usize,
    tolerance: usize,
    evalue_threshold: f64,
) -> bool {
    is_significant(segment, evalue_threshold)
        && is_modification_within_segment(segment, modification.position())
        && is_query_within_segment(segment, query_position)
        && is_within_tolerated_offset(segment, modification.position(), query_position, tolerance)
}

impl FilterConfig {
    #[inline]
    pub fn matches(&self, segment: &Segment, modification: &ModificationRecord) -> bool {
        segment_matches(
            segment,
            modification,
            self.query_position,
            self.tolerance,
            self.evalue_threshold,
        )
    }
}

#[inline]
fn is_significant(segment: &Segment, evalue_threshold: f64) -> bool {
    segment.evalue < evalue_threshold
}

#[inline]
fn is_modification_within_segment(segment: &Segment, modification_position: usize) -> bool {
    segment.subject_range().contains(&modification_position)
}

#[inline]
fn is_query_within_segment(segment: &Segment, query_position: usize) -> bool {
    segment.query_range().contains(&query_position)
}

// Both positions must already lie inside their range.
fn is_within_tolerated_offset(
    segment: &Segment,
    modification_position: usize,
    query_position: usize,
    tolerance: usize,
) -> bool {
    let local_modification = to_local_frame(modification_position, segment.subject_start);
    let local_query = to_local_frame(query_position, segment.query_start);
    local_modification.abs_diff(local_query) <= tolerance
}

/// `position - (start - 1)`, the 1-based offset of `position` from `start`.
#[inline]
fn to_local_frame(position: usize, start: usize) -> usize {
    position - start + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 0.01;

    fn acetylation_at_304() -> ModificationRecord {
        ModificationRecord::parse("PLMD-7244|P25665|304 Acetylation [E. coli]").unwrap()
    }

    fn reference_segment() -> Segment {
        Segment::new(10, 40, 290, 320, 0.001)
    }

    #[test]
    fn query_too_far_from_site_in_local_frame_is_rejected() {
        // local site 304 - 289 = 15, local query 18 - 9 = 9
        assert!(!segment_matches(
            &reference_segment(),
            &acetylation_at_304(),
            18,
            0,
            THRESHOLD
        ));
    }

    #[test]
    fn off_by_one_is_rejected_without_tolerance_and_accepted_with_it() {
        // local site 15, local query 25 - 9 = 16
        let segment = reference_segment();
        let modification = acetylation_at_304();
        assert!(!segment_matches(&segment, &modification, 25, 0, THRESHOLD));
        assert!(segment_matches(&segment, &modification, 25, 1, THRESHOLD));
    }

    #[test]
    fn exact_local_correspondence_matches_with_zero_tolerance() {
        assert!(segment_matches(
            &reference_segment(),
            &acetylation_at_304(),
            24,
            0,
            THRESHOLD
        ));
    }

    #[test]
    fn tolerance_applies_symmetrically() {
        let segment = reference_segment();
        let modification = acetylation_at_304();
        assert!(segment_matches(&segment, &modification, 22, 2, THRESHOLD));
        assert!(segment_matches(&segment, &modification, 26, 2, THRESHOLD));
        assert!(!segment_matches(&segment, &modification, 21, 2, THRESHOLD));
        assert!(!segment_matches(&segment, &modification, 27, 2, THRESHOLD));
    }

    #[test]
    fn insignificant_segment_is_rejected_regardless_of_positions() {
        let modification = acetylation_at_304();
        let weak = Segment::new(10, 40, 290, 320, 0.05);
        assert!(!segment_matches(&weak, &modification, 24, 100, THRESHOLD));

        let at_threshold = Segment::new(10, 40, 290, 320, THRESHOLD);
        assert!(!segment_matches(&at_threshold, &modification, 24, 100, THRESHOLD));

        let nan = Segment::new(10, 40, 290, 320, f64::NAN);
        assert!(!segment_matches(&nan, &modification, 24, 100, THRESHOLD));
    }

    #[test]
    fn site_outside_subject_range_is_rejected_even_with_large_tolerance() {
        let modification = acetylation_at_304();
        let before = Segment::new(10, 40, 305, 335, 0.001);
        let after = Segment::new(10, 40, 270, 303, 0.001);
        assert!(!segment_matches(&before, &modification, 24, 1000, THRESHOLD));
        assert!(!segment_matches(&after, &modification, 24, 1000, THRESHOLD));
    }

    #[test]
    fn query_outside_query_range_is_rejected_even_with_large_tolerance() {
        let segment = reference_segment();
        let modification = acetylation_at_304();
        assert!(!segment_matches(&segment, &modification, 9, 1000, THRESHOLD));
        assert!(!segment_matches(&segment, &modification, 41, 1000, THRESHOLD));
        assert!(segment_matches(&segment, &modification, 10, 1000, THRESHOLD));
        assert!(segment_matches(&segment, &modification, 40, 1000, THRESHOLD));
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        let modification = acetylation_at_304();
        let starts_at_site = Segment::new(50, 60, 304, 314, 0.001);
        assert!(segment_matches(&starts_at_site, &modification, 50, 0, THRESHOLD));

        let ends_at_site = Segment::new(50, 60, 294, 304, 0.001);
        assert!(segment_matches(&ends_at_site, &modification, 60, 0, THRESHOLD));
    }

    #[test]
    fn larger_tolerance_never_turns_a_match_into_a_rejection() {
        let modification = acetylation_at_304();
        let segments = [
            reference_segment(),
            Segment::new(1, 100, 250, 350, 1e-10),
            Segment::new(5, 15, 300, 310, 0.009),
        ];
        for segment in &segments {
            for query_position in 1..=110 {
                let mut matched = false;
                for tolerance in 0..=60 {
                    let now = segment_matches(
                        segment,
                        &modification,
                        query_position,
                        tolerance,
                        THRESHOLD,
                    );
                    assert!(
                        !matched || now,
                        "match lost at tolerance {} for query {} in {:?}",
                        tolerance,
                        query_position,
                        segment
                    );
                    matched = now;
                }
            }
        }
    }

    #[test]
    fn filter_config_matches_delegates_with_its_parameters() {
        let config = FilterConfig {
            query_position: 25,
            tolerance: 1,
            evalue_threshold: THRESHOLD,
        };
        assert!(config.matches(&reference_segment(), &acetylation_at_304()));
    }
}
