//! Whole-state consistency checks.
//!
//! These never run on the operation path; tests, property checks, the fuzz
//! target and [`BallotEngine::load_state`] call them to confirm a state is
//! one the operations could have produced.

use crate::delegation;
use crate::engine::BallotEngine;
use crate::error::InvariantViolation;
use ballot_types::Weight;

impl BallotEngine {
    /// Verify every state invariant, returning the first violation found.
    ///
    /// Checked:
    /// - every tracked principal holds rights, the chairperson included;
    /// - a voted principal has exactly one outcome (a vote or a delegate),
    ///   and an unvoted one has neither;
    /// - votes point at existing proposals, delegates at rights holders;
    /// - every delegation chain terminates within `voter_count` hops;
    /// - weight is conserved: tallies plus weight still held by voters who
    ///   have not voted equals one unit per rights holder.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if !self
            .voters
            .get(&self.chairperson)
            .is_some_and(|v| v.has_right_to_vote)
        {
            return Err(InvariantViolation::ChairpersonWithoutRights(
                self.chairperson.clone(),
            ));
        }

        let mut pending: Weight = 0;
        for (principal, voter) in &self.voters {
            if !voter.has_right_to_vote {
                return Err(InvariantViolation::StateWithoutRights(principal.clone()));
            }
            match (voter.voted, voter.vote, &voter.delegate) {
                (false, None, None) => pending = pending.saturating_add(voter.weight),
                (false, _, _) => {
                    return Err(InvariantViolation::OutcomeWithoutBallot(principal.clone()))
                }
                (true, None, None) => {
                    return Err(InvariantViolation::BallotWithoutOutcome(principal.clone()))
                }
                (true, Some(_), Some(_)) => {
                    return Err(InvariantViolation::VotedAndDelegated(principal.clone()))
                }
                (true, Some(index), None) => {
                    if index >= self.proposals.len() {
                        return Err(InvariantViolation::VoteOutOfRange {
                            voter: principal.clone(),
                            index,
                        });
                    }
                }
                (true, None, Some(delegate)) => {
                    if !self
                        .voters
                        .get(delegate)
                        .is_some_and(|v| v.has_right_to_vote)
                    {
                        return Err(InvariantViolation::DelegateWithoutRights {
                            voter: principal.clone(),
                            delegate: delegate.clone(),
                        });
                    }
                    if delegation::chain_length(&self.voters, principal).is_err() {
                        return Err(InvariantViolation::CyclicDelegation(principal.clone()));
                    }
                }
            }
        }

        let counted = self
            .proposals
            .iter()
            .fold(0 as Weight, |acc, p| acc.saturating_add(p.vote_count));
        let holders = self.voters.len() as Weight;
        if counted.checked_add(pending) != Some(holders) {
            return Err(InvariantViolation::WeightNotConserved {
                counted,
                pending,
                holders,
            });
        }
        Ok(())
    }
}
