//! Candidate producers for each search strategy.
//!
//! Every producer is a lazy, single-pass iterator of face sequences that
//! starts from scratch on each call, together with an upper bound on how
//! many sequences it yields.

mod exhaustive;
mod jiggle;
mod templated;

pub use exhaustive::ExhaustiveSearch;
pub use jiggle::JiggleSearch;
pub use templated::TemplatedSearch;

use super::config::SearchStrategy;
use crate::core::sequence::FaceSequence;

/// Candidate sequences of one search, in the order they should be tried.
pub struct CandidateStream {
    /// Upper bound on the number of sequences, saturating at `u64::MAX`.
    pub estimate: u64,
    pub iter: Box<dyn Iterator<Item = FaceSequence> + Send>,
}

impl Iterator for CandidateStream {
    type Item = FaceSequence;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

/// Builds the candidate stream for a strategy.
pub fn candidates(strategy: &SearchStrategy) -> CandidateStream {
    match strategy {
        SearchStrategy::Exhaustive {
            pentagons,
            hexagons,
            max_adjacent_pentagons,
        } => {
            let search = ExhaustiveSearch {
                pentagons: *pentagons,
                hexagons: *hexagons,
                max_adjacent_pentagons: *max_adjacent_pentagons,
            };
            CandidateStream {
                estimate: search.estimate(),
                iter: Box::new(search.candidates()),
            }
        }
        SearchStrategy::Templated {
            family,
            tip_hexagons,
            body_length,
            base_hexagons,
        } => {
            let search = TemplatedSearch {
                family: *family,
                tip_hexagons: *tip_hexagons,
                body_length: *body_length,
                base_hexagons: *base_hexagons,
            };
            CandidateStream {
                estimate: search.estimate(),
                iter: Box::new(search.candidates()),
            }
        }
        SearchStrategy::Jiggle { baseline } => {
            let search = JiggleSearch {
                baseline: baseline.clone(),
            };
            CandidateStream {
                estimate: search.estimate(),
                iter: Box::new(search.candidates()),
            }
        }
        SearchStrategy::Explicit { sequences } => CandidateStream {
            estimate: sequences.len() as u64,
            iter: Box::new(sequences.clone().into_iter()),
        },
    }
}
