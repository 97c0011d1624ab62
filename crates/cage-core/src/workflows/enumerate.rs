use crate::engine::candidate::{AcceptedCage, CandidateEvaluator, CandidateOutcome};
use crate::engine::config::EnumerationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::session::{DEFAULT_TABLE_CAPACITY, SearchSession, SessionStats};
use crate::engine::strategies::{self, CandidateStream};
use std::iter::Peekable;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
const PARALLEL_BATCH_SIZE: usize = 256;

#[derive(Debug, Clone)]
pub struct EnumerationResult {
    /// Accepted cages in acceptance order.
    pub accepted: Vec<AcceptedCage>,
    pub stats: SessionStats,
    /// `true` when the acceptance bound stopped the search with candidates left.
    pub stopped_early: bool,
}

#[instrument(skip_all, name = "enumeration_workflow", fields(strategy = config.strategy.name()))]
pub fn run(
    config: &EnumerationConfig,
    reporter: &ProgressReporter,
) -> Result<EnumerationResult, EngineError> {
    // === Phase 0: Preparation ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let stream = strategies::candidates(&config.strategy);
    let estimate = stream.estimate;
    let capacity = table_capacity(config, estimate);
    let mut session =
        SearchSession::new(capacity, config.signature.tolerance, config.max_accepted)?;
    let evaluator = CandidateEvaluator::new(config);
    info!(
        estimate,
        capacity,
        max_accepted = ?config.max_accepted,
        "Search prepared."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Candidate evaluation ===
    reporter.report(Progress::PhaseStart { name: "Enumeration" });
    reporter.report(Progress::TaskStart {
        total_steps: estimate,
    });
    let mut accepted = Vec::new();
    let mut candidates = stream.peekable();
    if search(&evaluator, &mut candidates, &mut session, &mut accepted, reporter) {
        session.mark_stopped_early();
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let stats = *session.stats();
    info!(
        candidates = stats.candidates,
        invalid = stats.invalid,
        duplicates = stats.duplicates,
        accepted = stats.accepted,
        enantiomorphs = stats.enantiomorphs,
        stopped_early = session.stopped_early(),
        "Enumeration complete."
    );
    Ok(EnumerationResult {
        accepted,
        stats,
        stopped_early: session.stopped_early(),
    })
}

fn table_capacity(config: &EnumerationConfig, estimate: u64) -> usize {
    config.signature.table_capacity.unwrap_or_else(|| {
        let bound = config
            .max_accepted
            .map_or(estimate, |limit| estimate.min(limit as u64));
        usize::try_from(bound)
            .unwrap_or(usize::MAX)
            .min(DEFAULT_TABLE_CAPACITY)
    })
}

/// Returns `true` if the session filled up before the stream ran dry.
#[cfg(not(feature = "parallel"))]
fn search(
    evaluator: &CandidateEvaluator,
    candidates: &mut Peekable<CandidateStream>,
    session: &mut SearchSession,
    accepted: &mut Vec<AcceptedCage>,
    reporter: &ProgressReporter,
) -> bool {
    loop {
        if session.is_full() {
            return candidates.peek().is_some();
        }
        let Some(sequence) = candidates.next() else {
            return false;
        };
        record(evaluator.evaluate(sequence, session), accepted, reporter);
    }
}

/// Returns `true` if the session filled up before the stream ran dry.
///
/// Candidates are prepared in parallel batches and registered one by one in
/// stream order, so the accepted cages match the sequential search exactly.
#[cfg(feature = "parallel")]
fn search(
    evaluator: &CandidateEvaluator,
    candidates: &mut Peekable<CandidateStream>,
    session: &mut SearchSession,
    accepted: &mut Vec<AcceptedCage>,
    reporter: &ProgressReporter,
) -> bool {
    use crate::core::sequence::FaceSequence;
    use crate::engine::candidate::PreparedCandidate;
    use rayon::prelude::*;

    loop {
        if session.is_full() {
            return candidates.peek().is_some();
        }
        let batch: Vec<FaceSequence> = candidates.by_ref().take(PARALLEL_BATCH_SIZE).collect();
        if batch.is_empty() {
            return false;
        }
        let prepared: Vec<PreparedCandidate> = batch
            .into_par_iter()
            .map(|sequence| evaluator.prepare(sequence))
            .collect();
        let mut prepared = prepared.into_iter();
        for candidate in prepared.by_ref() {
            record(evaluator.finish(candidate, session), accepted, reporter);
            if session.is_full() {
                break;
            }
        }
        if prepared.len() > 0 {
            return true;
        }
    }
}

fn record(outcome: CandidateOutcome, accepted: &mut Vec<AcceptedCage>, reporter: &ProgressReporter) {
    reporter.report(Progress::TaskIncrement);
    if let CandidateOutcome::Accepted(cage) = outcome {
        reporter.report(Progress::CageAccepted {
            id: cage.id.clone(),
            sequence: cage.sequence.to_string(),
        });
        accepted.push(*cage);
    }
}
