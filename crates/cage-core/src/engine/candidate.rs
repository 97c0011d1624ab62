use super::config::EnumerationConfig;
use super::session::SearchSession;
use crate::core::canonical::{Registration, Signature, SignatureKind, signature};
use crate::core::enantiomorph;
use crate::core::geometry::{Convergence, Regularizer, SphericalRelaxation};
use crate::core::models::graph::{DEFAULT_VALENCE, Graph};
use crate::core::sequence::FaceSequence;
use crate::core::spiral::add_face;
use crate::core::symmetry::{MapAutomorphismDetector, PointGroup, SymmetryDetector};
use crate::core::topology::check;
use tracing::{debug, warn};

/// A cage that passed every check and was not seen before in its session.
#[derive(Debug, Clone)]
pub struct AcceptedCage {
    pub id: String,
    pub sequence: FaceSequence,
    pub graph: Graph,
    /// `None` when the detector could not classify the cage.
    pub point_group: Option<PointGroup>,
    pub signature: Signature,
    pub convergence: Option<Convergence>,
    pub enantiomorph: Option<Graph>,
}

/// Terminal state of one candidate sequence.
#[derive(Debug, Clone)]
pub enum CandidateOutcome {
    /// Winding failed or the result is not a closed cage.
    Invalid { sequence: FaceSequence, reason: String },
    /// Matches the accepted cage at `duplicate_of` in the session table.
    Duplicate {
        sequence: FaceSequence,
        duplicate_of: usize,
    },
    Accepted(Box<AcceptedCage>),
}

impl CandidateOutcome {
    pub fn sequence(&self) -> &FaceSequence {
        match self {
            CandidateOutcome::Invalid { sequence, .. }
            | CandidateOutcome::Duplicate { sequence, .. } => sequence,
            CandidateOutcome::Accepted(cage) => &cage.sequence,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, CandidateOutcome::Accepted(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, CandidateOutcome::Duplicate { .. })
    }
}

/// A candidate taken through building, checking, regularization and
/// signature computation, but not yet compared against a session.
///
/// Preparation needs no shared state, so candidates can be prepared in
/// parallel and registered afterwards in their original order.
#[derive(Debug)]
pub struct PreparedCandidate {
    sequence: FaceSequence,
    state: Result<Complete, String>,
}

#[derive(Debug)]
struct Complete {
    graph: Graph,
    signature: Signature,
    convergence: Option<Convergence>,
}

/// Drives candidate sequences through their life cycle:
/// `Building -> {Invalid, Complete}`, `Complete -> {Duplicate, Accepted}`.
pub struct CandidateEvaluator {
    valence: usize,
    regularizer: Option<Box<dyn Regularizer>>,
    detector: Box<dyn SymmetryDetector>,
    signature_kind: SignatureKind,
    generate_enantiomorphs: bool,
    id_prefix: String,
}

impl CandidateEvaluator {
    pub fn new(config: &EnumerationConfig) -> Self {
        let regularizer: Option<Box<dyn Regularizer>> = config
            .regularization
            .enabled
            .then(|| Box::new(config.regularization.relaxation()) as Box<dyn Regularizer>);
        Self {
            valence: config.valence,
            regularizer,
            detector: Box::new(MapAutomorphismDetector::new()),
            signature_kind: config.signature.kind,
            generate_enantiomorphs: config.generate_enantiomorphs,
            id_prefix: config.id_prefix.clone(),
        }
    }

    pub fn with_regularizer(mut self, regularizer: Box<dyn Regularizer>) -> Self {
        self.regularizer = Some(regularizer);
        self
    }

    pub fn with_detector(mut self, detector: Box<dyn SymmetryDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn prepare(&self, sequence: FaceSequence) -> PreparedCandidate {
        let state = self.complete(&sequence);
        PreparedCandidate { sequence, state }
    }

    /// Compares a prepared candidate against the session and, when it is
    /// new, assigns its identifier, symmetry and mirror image.
    pub fn finish(&self, prepared: PreparedCandidate, session: &mut SearchSession) -> CandidateOutcome {
        session.stats_mut().candidates += 1;
        let PreparedCandidate { sequence, state } = prepared;
        let complete = match state {
            Ok(complete) => complete,
            Err(reason) => {
                debug!(%sequence, %reason, "Discarding invalid candidate");
                session.stats_mut().invalid += 1;
                return CandidateOutcome::Invalid { sequence, reason };
            }
        };

        if let Registration::Duplicate { index } = session.register(complete.signature.clone()) {
            debug!(%sequence, duplicate_of = index, "Discarding duplicate candidate");
            session.stats_mut().duplicates += 1;
            return CandidateOutcome::Duplicate {
                sequence,
                duplicate_of: index,
            };
        }

        let stats = session.stats_mut();
        stats.accepted += 1;
        let id = format!("{}_{}", self.id_prefix, stats.accepted);
        let mut graph = complete.graph;
        graph.set_id(&id);

        let point_group = match self.detector.find_symmetry(&graph) {
            Ok(group) => Some(group),
            Err(e) => {
                warn!(%id, error = %e, "Symmetry detection failed; no enantiomorph generated");
                None
            }
        };
        let enantiomorph = match (&point_group, self.generate_enantiomorphs) {
            (Some(group), true) => enantiomorph::generate(&graph, group),
            _ => None,
        };
        if enantiomorph.is_some() {
            session.stats_mut().enantiomorphs += 1;
        }

        debug!(
            %id,
            %sequence,
            group = point_group.as_ref().map(|g| g.symbol()).unwrap_or("?"),
            "Accepted cage"
        );
        CandidateOutcome::Accepted(Box::new(AcceptedCage {
            id,
            sequence,
            graph,
            point_group,
            signature: complete.signature,
            convergence: complete.convergence,
            enantiomorph,
        }))
    }

    pub fn evaluate(&self, sequence: FaceSequence, session: &mut SearchSession) -> CandidateOutcome {
        let prepared = self.prepare(sequence);
        self.finish(prepared, session)
    }

    fn complete(&self, sequence: &FaceSequence) -> Result<Complete, String> {
        let mut graph = Graph::new(self.valence);
        let total = sequence.len();
        for (index, &size) in sequence.sizes().iter().enumerate() {
            let added = add_face(&mut graph, size as usize)
                .map_err(|e| format!("face {} (size {size}): {e}", index + 1))?;
            if added.cage_closed && index + 1 < total {
                return Err(format!(
                    "cage closed after face {} of {total} with {} vertices saturated",
                    index + 1,
                    added.saturated
                ));
            }
        }

        let report = check(&graph);
        if !report.is_valid() {
            return Err(report.summary());
        }

        let convergence = self.regularizer.as_ref().map(|r| r.regularize(&mut graph));
        if let Some(c) = convergence.filter(|c| !c.converged) {
            debug!(
                %sequence,
                iterations = c.iterations,
                displacement = c.displacement,
                "Regularization did not converge"
            );
        }
        let signature = signature(&graph, self.signature_kind);
        Ok(Complete {
            graph,
            signature,
            convergence,
        })
    }
}

impl Default for CandidateEvaluator {
    fn default() -> Self {
        Self {
            valence: DEFAULT_VALENCE,
            regularizer: Some(Box::new(SphericalRelaxation::default())),
            detector: Box::new(MapAutomorphismDetector::new()),
            signature_kind: SignatureKind::default(),
            generate_enantiomorphs: true,
            id_prefix: "cage".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symmetry::SymmetryError;
    use crate::engine::config::{EnumerationConfigBuilder, SearchStrategy, SignatureConfig};

    fn session() -> SearchSession {
        SearchSession::new(16, 1e-6, None).unwrap()
    }

    fn seq(s: &str) -> FaceSequence {
        s.parse().unwrap()
    }

    #[test]
    fn same_sequence_twice_is_accepted_then_duplicate() {
        let evaluator = CandidateEvaluator::default();
        let mut session = session();

        let first = evaluator.evaluate(seq("555555555555"), &mut session);
        let second = evaluator.evaluate(seq("555555555555"), &mut session);

        assert!(first.is_accepted());
        assert!(second.is_duplicate());
        assert_eq!(session.stats().accepted, 1);
        assert_eq!(session.stats().duplicates, 1);
        assert_eq!(session.stats().candidates, 2);
    }

    #[test]
    fn accepted_cage_carries_id_symmetry_and_valid_graph() {
        let evaluator = CandidateEvaluator::default();
        let mut session = session();
        let CandidateOutcome::Accepted(cage) = evaluator.evaluate(seq("65555555555556"), &mut session)
        else {
            panic!("C24 should be accepted");
        };
        assert_eq!(cage.id, "cage_1");
        assert_eq!(cage.graph.id(), "cage_1");
        assert_eq!(cage.point_group.as_ref().map(|g| g.symbol()), Some("D6d"));
        assert!(cage.enantiomorph.is_none());
        assert_eq!(cage.signature.len(), 24);
        assert!(check(&cage.graph).is_valid());
    }

    #[test]
    fn unwindable_sequences_are_invalid() {
        let evaluator = CandidateEvaluator::default();
        let mut session = session();

        let premature = evaluator.evaluate(seq("5555555555556"), &mut session);
        assert!(matches!(premature, CandidateOutcome::Invalid { .. }));

        let open = evaluator.evaluate(seq("55555"), &mut session);
        let CandidateOutcome::Invalid { reason, .. } = open else {
            panic!("an open cage must be invalid");
        };
        assert!(reason.contains("Euler"));
        assert_eq!(session.stats().invalid, 2);
        assert!(session.table().is_empty());
    }

    #[test]
    fn chiral_cages_get_a_mirror_image() {
        struct Chiral;
        impl SymmetryDetector for Chiral {
            fn find_symmetry(&self, _: &Graph) -> Result<PointGroup, SymmetryError> {
                Ok(PointGroup::from("D3"))
            }
        }
        let evaluator = CandidateEvaluator::default().with_detector(Box::new(Chiral));
        let mut session = session();
        let CandidateOutcome::Accepted(cage) = evaluator.evaluate(seq("555555555555"), &mut session)
        else {
            panic!("dodecahedron should be accepted");
        };
        let mirror = cage.enantiomorph.expect("chiral cage should have a mirror");
        assert_eq!(mirror.id(), "cage_1_mirror");
        assert_eq!(session.stats().enantiomorphs, 1);
    }

    #[test]
    fn topological_signatures_tell_cages_apart() {
        let config = EnumerationConfigBuilder::new()
            .strategy(SearchStrategy::Explicit {
                sequences: vec![seq("65555555555556")],
            })
            .signature(SignatureConfig {
                kind: SignatureKind::Topological,
                ..Default::default()
            })
            .build()
            .unwrap();
        let evaluator = CandidateEvaluator::new(&config);
        let mut session = session();

        assert!(evaluator.evaluate(seq("65555555555556"), &mut session).is_accepted());
        assert!(evaluator.evaluate(seq("555555555555"), &mut session).is_accepted());
        assert!(evaluator.evaluate(seq("65555555555556"), &mut session).is_duplicate());
        assert_eq!(session.table().len(), 2);
    }
}
