use tracing::debug;

use crate::field::FieldElement;
use crate::merkle::{
    Blake2sMerkleHasher, Blake3MerkleHasher, MerkleHasher, MerkleProof, MerkleRoot, MerkleScheme,
};
use crate::params::{FailureMode, HashKind, VerifierParams};

use super::folding::{fold_pair, LayerDomain};
use super::proof::{FriProof, FriQueryProof, FriRoundOpening};
use super::types::{
    FriError, FriRejection, FriSetupError, Malformation, OpeningSide, FRI_PROOF_VERSION,
};

/// Checks FRI query openings against a fixed set of round roots and fold
/// challenges.
///
/// Every per-query check is a pure function of the verifier and the proof,
/// so queries are fanned out over the rayon pool when parallelism is enabled
/// and reduced in query order afterwards.
#[derive(Debug, Clone)]
pub struct FriVerifier<'a, H: MerkleHasher> {
    scheme: MerkleScheme<H>,
    roots: &'a [MerkleRoot],
    betas: &'a [FieldElement],
    domains: Vec<LayerDomain>,
    failure_mode: FailureMode,
}

impl<'a, H: MerkleHasher> FriVerifier<'a, H> {
    /// Binds the verifier to the CP roots and fold challenges of a session.
    ///
    /// `H` must be the backend `params` selects, and there must be one root
    /// and one challenge per round.
    pub fn new(
        params: &VerifierParams,
        roots: &'a [MerkleRoot],
        betas: &'a [FieldElement],
    ) -> Result<Self, FriError> {
        if H::kind() != params.hash() {
            return Err(FriSetupError::HashBackend {
                backend: H::kind(),
                configured: params.hash(),
            }
            .into());
        }
        let expected = params.num_rounds();
        if roots.len() != expected || betas.len() != expected {
            return Err(FriSetupError::RoundInputs {
                expected,
                roots: roots.len(),
                betas: betas.len(),
            }
            .into());
        }
        let log_domain_size = params.fri().log_domain_size();
        let domains = (0..expected)
            .map(|round| LayerDomain::new(log_domain_size, round))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            scheme: MerkleScheme::from_params(params),
            roots,
            betas,
            domains,
            failure_mode: params.fri().failure_mode,
        })
    }

    /// Verifies `proof` at the derived `query_points`.
    ///
    /// Structural defects of the proof as a whole reject immediately; per
    /// query failures are aggregated according to the failure mode.
    pub fn verify(&self, proof: &FriProof, query_points: &[usize]) -> Result<(), FriRejection> {
        if proof.version != FRI_PROOF_VERSION {
            return Err(FriError::from(Malformation::Version { got: proof.version }).into());
        }
        if proof.queries.len() != query_points.len() {
            return Err(FriError::from(Malformation::QueryCount {
                expected: query_points.len(),
                got: proof.queries.len(),
            })
            .into());
        }
        debug!(
            queries = query_points.len(),
            rounds = self.domains.len(),
            mode = ?self.failure_mode,
            "checking fri queries"
        );

        let failures = match self.failure_mode {
            FailureMode::FailFast => self.first_failure(proof, query_points).into_iter().collect(),
            FailureMode::CollectAll => self.all_failures(proof, query_points),
        };
        if failures.is_empty() {
            Ok(())
        } else {
            Err(FriRejection::new(failures))
        }
    }

    fn first_failure(&self, proof: &FriProof, query_points: &[usize]) -> Option<FriError> {
        #[cfg(feature = "parallel")]
        if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            return proof
                .queries
                .par_iter()
                .zip(query_points.par_iter())
                .enumerate()
                .find_map_first(|(query, (opening, &point))| {
                    self.check_query(query, point, opening, proof.final_value).err()
                });
        }
        proof
            .queries
            .iter()
            .zip(query_points)
            .enumerate()
            .find_map(|(query, (opening, &point))| {
                self.check_query(query, point, opening, proof.final_value).err()
            })
    }

    fn all_failures(&self, proof: &FriProof, query_points: &[usize]) -> Vec<FriError> {
        #[cfg(feature = "parallel")]
        if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            return proof
                .queries
                .par_iter()
                .zip(query_points.par_iter())
                .enumerate()
                .filter_map(|(query, (opening, &point))| {
                    self.check_query(query, point, opening, proof.final_value).err()
                })
                .collect();
        }
        proof
            .queries
            .iter()
            .zip(query_points)
            .enumerate()
            .filter_map(|(query, (opening, &point))| {
                self.check_query(query, point, opening, proof.final_value).err()
            })
            .collect()
    }

    /// Checks one query: every opening authenticates, every fold matches the
    /// next round, and the last fold equals the final constant.
    pub fn check_query(
        &self,
        query: usize,
        point: usize,
        proof: &FriQueryProof,
        final_value: FieldElement,
    ) -> Result<(), FriError> {
        if proof.index as usize != point {
            return Err(Malformation::IndexMismatch {
                query,
                expected: point,
                got: proof.index,
            }
            .into());
        }
        if proof.rounds.len() != self.domains.len() {
            return Err(Malformation::RoundCount {
                query,
                expected: self.domains.len(),
                got: proof.rounds.len(),
            }
            .into());
        }

        let mut position = point % self.domains[0].size();
        let mut positions = Vec::with_capacity(self.domains.len());
        for (round, (domain, opening)) in self.domains.iter().zip(&proof.rounds).enumerate() {
            self.authenticate(query, round, domain, position, opening)?;
            positions.push(position);
            position = domain.folded_position(position);
        }

        for (round, opening) in proof.rounds.iter().enumerate() {
            let domain = &self.domains[round];
            let x = domain.point(positions[round]);
            let folded = fold_pair(opening.value, opening.conjugate_value, x, self.betas[round])?;
            match proof.rounds.get(round + 1) {
                Some(next) if folded != next.value => {
                    return Err(FriError::FoldingInconsistency { query, round });
                }
                None if folded != final_value => {
                    return Err(FriError::DegreeBoundViolation { query });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn authenticate(
        &self,
        query: usize,
        round: usize,
        domain: &LayerDomain,
        position: usize,
        opening: &FriRoundOpening,
    ) -> Result<(), FriError> {
        let root = &self.roots[round];
        let depth = domain.log_size() as usize;
        let sides = [
            (OpeningSide::Value, position, &opening.value, &opening.path),
            (
                OpeningSide::Conjugate,
                domain.conjugate(position),
                &opening.conjugate_value,
                &opening.conjugate_path,
            ),
        ];
        for (side, expected, leaf, path) in sides {
            self.authenticate_side(query, round, side, expected, depth, root, leaf, path)?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn authenticate_side(
        &self,
        query: usize,
        round: usize,
        side: OpeningSide,
        expected: usize,
        depth: usize,
        root: &MerkleRoot,
        leaf: &FieldElement,
        path: &MerkleProof,
    ) -> Result<(), FriError> {
        if path.index as usize != expected {
            return Err(Malformation::PathIndex {
                query,
                round,
                side,
                expected,
                got: path.index,
            }
            .into());
        }
        match self.scheme.verify_at_depth(root, leaf, path, depth) {
            Ok(true) => Ok(()),
            Ok(false) => Err(FriError::InvalidInclusionProof { query, round, side }),
            Err(reason) => Err(Malformation::Path {
                query,
                round,
                side,
                reason,
            }
            .into()),
        }
    }
}

/// Runs [`FriVerifier`] with the commitment hash selected by `params`.
pub fn verify_fri(
    params: &VerifierParams,
    roots: &[MerkleRoot],
    betas: &[FieldElement],
    proof: &FriProof,
    query_points: &[usize],
) -> Result<(), FriRejection> {
    match params.hash() {
        HashKind::Blake2s => {
            FriVerifier::<Blake2sMerkleHasher>::new(params, roots, betas)?
                .verify(proof, query_points)
        }
        HashKind::Blake3 => {
            FriVerifier::<Blake3MerkleHasher>::new(params, roots, betas)?
                .verify(proof, query_points)
        }
    }
}
