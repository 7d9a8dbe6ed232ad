//! Core ballot engine: rights, delegation, votes, and the tally.

use crate::delegation;
use crate::error::BallotError;
use crate::proposal::Proposal;
use crate::spans;
use crate::voter::{Voter, VoterStatus};
use ballot_types::{Principal, ProposalIndex, ProposalName, Weight};
use std::collections::BTreeMap;

/// A single election: a fixed slate of proposals and the ballots cast on it.
///
/// All mutation goes through [`grant_right`](Self::grant_right),
/// [`delegate`](Self::delegate) and [`vote`](Self::vote). Each either
/// commits its whole effect or returns an error having changed nothing;
/// every precondition, including delegation-chain resolution, is checked
/// before the first write.
///
/// Only principals holding the right to vote have an entry in `voters`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BallotEngine {
    pub(crate) chairperson: Principal,
    pub(crate) proposals: Vec<Proposal>,
    pub(crate) voters: BTreeMap<Principal, Voter>,
}

impl BallotEngine {
    /// Open a ballot over `names`, in order, run by `chairperson`.
    ///
    /// The chairperson holds the right to vote from the start.
    pub fn new(
        names: impl IntoIterator<Item = ProposalName>,
        chairperson: Principal,
    ) -> Result<Self, BallotError> {
        let proposals: Vec<Proposal> = names.into_iter().map(Proposal::new).collect();
        if proposals.is_empty() {
            return Err(BallotError::NoProposals);
        }
        let mut voters = BTreeMap::new();
        voters.insert(chairperson.clone(), Voter::enfranchised());
        tracing::info!(
            chairperson = %chairperson,
            proposals = proposals.len(),
            "ballot opened"
        );
        Ok(Self {
            chairperson,
            proposals,
            voters,
        })
    }

    /// Give `target` the right to vote. Chairperson only.
    pub fn grant_right(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), BallotError> {
        let _span = spans::grant_span(caller, target).entered();
        self.check_grant(caller, target)
            .inspect_err(|e| tracing::debug!(error = %e, "grant rejected"))?;

        self.voters.insert(target.clone(), Voter::enfranchised());
        tracing::info!(voters = self.voters.len(), "right to vote granted");
        Ok(())
    }

    fn check_grant(&self, caller: &Principal, target: &Principal) -> Result<(), BallotError> {
        if caller != &self.chairperson {
            return Err(BallotError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if let Some(existing) = self.voters.get(target) {
            if existing.voted {
                return Err(BallotError::AlreadyVoted(target.clone()));
            }
            if existing.has_right_to_vote {
                return Err(BallotError::AlreadyHasRights(target.clone()));
            }
        }
        Ok(())
    }

    /// Hand the caller's weight to `to`, or to whoever `to` has delegated to.
    ///
    /// The chain is resolved now. If its terminal delegate has already voted
    /// the weight lands on that proposal immediately; otherwise it is added to
    /// the terminal delegate's weight and counted when they vote.
    pub fn delegate(&mut self, caller: &Principal, to: &Principal) -> Result<(), BallotError> {
        let _span = spans::delegate_span(caller, to).entered();
        let plan = self
            .plan_delegation(caller, to)
            .inspect_err(|e| tracing::debug!(error = %e, "delegation rejected"))?;

        if let Some(sender) = self.voters.get_mut(caller) {
            sender.voted = true;
            sender.delegate = Some(plan.target.clone());
        }
        match plan.settled_vote {
            Some(index) => {
                self.proposals[index].vote_count += plan.weight;
                tracing::info!(
                    delegate = %plan.target,
                    proposal = index,
                    weight = plan.weight,
                    "delegated weight counted"
                );
            }
            None => {
                if let Some(delegate) = self.voters.get_mut(&plan.target) {
                    delegate.weight += plan.weight;
                }
                tracing::info!(
                    delegate = %plan.target,
                    weight = plan.weight,
                    "delegated weight pending"
                );
            }
        }
        Ok(())
    }

    fn plan_delegation(
        &self,
        caller: &Principal,
        to: &Principal,
    ) -> Result<DelegationPlan, BallotError> {
        let sender = self.voters.get(caller);
        if sender.is_some_and(|v| v.voted) {
            return Err(BallotError::AlreadyVoted(caller.clone()));
        }
        if to == caller {
            return Err(BallotError::SelfDelegation);
        }
        let weight = match sender {
            Some(v) if v.has_right_to_vote => v.weight,
            _ => return Err(BallotError::NoRightToVote(caller.clone())),
        };

        let target = delegation::resolve_terminal(&self.voters, to, Some(caller))
            .map_err(|e| {
                tracing::debug!(reason = %e, "delegation chain rejected");
                BallotError::DelegationCycle {
                    from: caller.clone(),
                    to: to.clone(),
                }
            })?
            .clone();

        let delegate = self
            .voters
            .get(&target)
            .filter(|v| v.has_right_to_vote)
            .ok_or_else(|| BallotError::DelegateHasNoRight(target.clone()))?;

        // A terminal delegate never delegated, so if it voted it voted directly.
        let settled_vote = delegate.vote;
        Ok(DelegationPlan {
            target,
            weight,
            settled_vote,
        })
    }

    /// Cast the caller's full weight for proposal `proposal`.
    pub fn vote(&mut self, caller: &Principal, proposal: ProposalIndex) -> Result<(), BallotError> {
        let _span = spans::vote_span(caller, proposal).entered();
        let weight = self
            .check_vote(caller, proposal)
            .inspect_err(|e| tracing::debug!(error = %e, "vote rejected"))?;

        if let Some(voter) = self.voters.get_mut(caller) {
            voter.voted = true;
            voter.vote = Some(proposal);
        }
        self.proposals[proposal].vote_count += weight;
        tracing::info!(
            weight,
            tally = self.proposals[proposal].vote_count,
            "vote cast"
        );
        Ok(())
    }

    fn check_vote(&self, caller: &Principal, proposal: ProposalIndex) -> Result<Weight, BallotError> {
        let voter = self
            .voters
            .get(caller)
            .filter(|v| v.has_right_to_vote)
            .ok_or_else(|| BallotError::NoRightToVote(caller.clone()))?;
        if voter.voted {
            return Err(BallotError::AlreadyVoted(caller.clone()));
        }
        if proposal >= self.proposals.len() {
            return Err(BallotError::InvalidProposal {
                index: proposal,
                count: self.proposals.len(),
            });
        }
        Ok(voter.weight)
    }

    /// Index of the proposal with the most weight. Ties go to the lowest index.
    pub fn winning_proposal(&self) -> ProposalIndex {
        let mut winning = 0;
        let mut winning_count = 0;
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_count > winning_count {
                winning_count = proposal.vote_count;
                winning = index;
            }
        }
        winning
    }

    /// Label of the [`winning_proposal`](Self::winning_proposal).
    pub fn winner_name(&self) -> ProposalName {
        self.proposals[self.winning_proposal()].name
    }

    // ── Read accessors ─────────────────────────────────────────────────

    pub fn chairperson(&self) -> &Principal {
        &self.chairperson
    }

    pub fn proposal(&self, index: ProposalIndex) -> Option<&Proposal> {
        self.proposals.get(index)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Ballot state of `principal`; principals without rights read as empty.
    pub fn voter(&self, principal: &Principal) -> Voter {
        self.voters.get(principal).cloned().unwrap_or_default()
    }

    pub fn voter_status(&self, principal: &Principal) -> VoterStatus {
        self.voters
            .get(principal)
            .map_or(VoterStatus::NoRights, Voter::status)
    }

    /// Number of principals holding the right to vote, chairperson included.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Whether `principal` resolved its ballot by delegating.
    pub fn delegated(&self, principal: &Principal) -> bool {
        self.voters
            .get(principal)
            .is_some_and(|v| v.delegate.is_some())
    }

    /// Whether `principal` cast a vote itself.
    pub fn directly_voted(&self, principal: &Principal) -> bool {
        self.voters
            .get(principal)
            .is_some_and(|v| v.voted && v.vote.is_some())
    }
}

/// Everything `delegate` needs to commit, gathered before the first write.
struct DelegationPlan {
    target: Principal,
    weight: Weight,
    settled_vote: Option<ProposalIndex>,
}
