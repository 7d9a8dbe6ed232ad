//! End-to-end ballot scenarios: a chairperson opens the ballot, grants
//! rights, and voters vote or delegate until a winner emerges.
//!
//! Every rejected call is checked against the encoded state before and
//! after, so "rejected" always means "nothing changed".

use ballot_engine::{BallotEngine, BallotError, VoterStatus};
use ballot_types::{Principal, ProposalName};
use ballot_utils::LogFormat;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PROPOSALS: [u64; 3] = [1007, 1014, 1021];

fn account(index: u8) -> Principal {
    Principal::new(format!("account-{index}"))
}

fn open_ballot() -> BallotEngine {
    BallotEngine::new(PROPOSALS.map(ProposalName::from), account(0)).expect("ballot opens")
}

fn grant(engine: &mut BallotEngine, accounts: &[u8]) {
    for &index in accounts {
        engine
            .grant_right(&account(0), &account(index))
            .expect("chairperson grants rights");
    }
}

/// Run `op` and assert it fails with `expected` without changing state.
fn assert_rejected(
    engine: &mut BallotEngine,
    expected: BallotError,
    op: impl FnOnce(&mut BallotEngine) -> Result<(), BallotError>,
) {
    let before = engine.save_state().expect("encodes");
    assert_eq!(op(engine), Err(expected));
    assert_eq!(engine.save_state().expect("encodes"), before);
    engine.check_invariants().expect("state stays consistent");
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn chairperson_is_the_deployer() {
    let engine = open_ballot();
    assert_eq!(engine.chairperson(), &account(0));
    assert_eq!(engine.voter_status(&account(0)), VoterStatus::Eligible);
}

#[test]
fn proposals_keep_their_labels() {
    let engine = open_ballot();
    for (index, label) in PROPOSALS.iter().enumerate() {
        assert_eq!(engine.proposal(index).unwrap().name.as_u64(), Some(*label));
    }
    assert!(engine.proposal(PROPOSALS.len()).is_none());
}

// ---------------------------------------------------------------------------
// Rights
// ---------------------------------------------------------------------------

#[test]
fn chairperson_grants_unit_weight() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1]);
    assert_eq!(engine.voter(&account(1)).weight, 1);
}

#[test]
fn non_chairperson_cannot_grant() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1]);
    assert_rejected(
        &mut engine,
        BallotError::Unauthorized { caller: account(1) },
        |e| e.grant_right(&account(1), &account(2)),
    );
    assert_eq!(engine.voter(&account(2)).weight, 0);
    assert_eq!(engine.voter_status(&account(2)), VoterStatus::NoRights);
}

#[test]
fn cannot_grant_to_someone_who_voted() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1]);
    engine.vote(&account(1), 0).unwrap();
    assert_rejected(&mut engine, BallotError::AlreadyVoted(account(1)), |e| {
        e.grant_right(&account(0), &account(1))
    });
}

#[test]
fn cannot_grant_twice() {
    let mut engine = open_ballot();
    assert_rejected(&mut engine, BallotError::AlreadyHasRights(account(0)), |e| {
        e.grant_right(&account(0), &account(0))
    });
    grant(&mut engine, &[1]);
    assert_rejected(&mut engine, BallotError::AlreadyHasRights(account(1)), |e| {
        e.grant_right(&account(0), &account(1))
    });
}

// ---------------------------------------------------------------------------
// Delegation
// ---------------------------------------------------------------------------

#[test]
fn voter_who_voted_cannot_delegate() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 5]);
    engine.vote(&account(1), 0).unwrap();
    assert_rejected(&mut engine, BallotError::AlreadyVoted(account(1)), |e| {
        e.delegate(&account(1), &account(5))
    });
}

#[test]
fn delegating_to_self_is_rejected_even_with_rights() {
    let mut engine = open_ballot();
    assert_rejected(&mut engine, BallotError::SelfDelegation, |e| {
        e.delegate(&account(0), &account(0))
    });
}

#[test]
fn delegation_loop_is_rejected() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 2]);
    engine.delegate(&account(1), &account(2)).unwrap();
    assert_rejected(
        &mut engine,
        BallotError::DelegationCycle {
            from: account(2),
            to: account(1),
        },
        |e| e.delegate(&account(2), &account(1)),
    );
    assert_eq!(engine.voter_status(&account(2)), VoterStatus::Eligible);
    assert_eq!(engine.voter(&account(2)).weight, 2);
}

#[test]
fn delegating_to_principal_without_rights_is_rejected() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1]);
    assert_rejected(
        &mut engine,
        BallotError::DelegateHasNoRight(account(2)),
        |e| e.delegate(&account(1), &account(2)),
    );
}

#[test]
fn delegating_marks_sender_voted_with_delegate() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 2]);
    engine.delegate(&account(1), &account(2)).unwrap();
    let sender = engine.voter(&account(1));
    assert!(sender.voted);
    assert_eq!(sender.delegate, Some(account(2)));
}

#[test]
fn delegations_to_unvoted_delegate_accumulate() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 2, 3]);
    engine.delegate(&account(1), &account(3)).unwrap();
    engine.delegate(&account(2), &account(3)).unwrap();
    assert_eq!(engine.voter(&account(3)).weight, 3);
}

#[test]
fn delegations_to_voted_delegate_count_immediately() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 2, 3]);
    engine.vote(&account(2), 0).unwrap();
    engine.delegate(&account(1), &account(2)).unwrap();
    engine.delegate(&account(3), &account(2)).unwrap();
    assert_eq!(engine.proposal(0).unwrap().vote_count, 3);
}

#[test]
fn delegation_chain_resolves_transitively() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 2, 3]);
    let (a, b, c) = (account(1), account(2), account(3));

    engine.delegate(&a, &b).unwrap();
    assert!(engine.voter(&a).voted, "A is settled when it delegates");
    engine.delegate(&b, &c).unwrap();
    assert!(engine.voter(&b).voted);
    assert_eq!(engine.voter(&c).weight, 3);

    engine.vote(&c, 2).unwrap();
    assert!(engine.voter(&c).voted);
    assert_eq!(engine.proposal(2).unwrap().vote_count, 3);
    assert!(engine.delegated(&a));
    assert!(engine.delegated(&b));
    assert!(engine.directly_voted(&c));
    engine.check_invariants().unwrap();
}

#[test]
fn late_delegation_through_settled_chain_lands_on_proposal() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 2, 3]);
    engine.delegate(&account(1), &account(2)).unwrap();
    engine.vote(&account(2), 1).unwrap();
    // account-3 names account-1, whose chain ends at account-2's vote.
    engine.delegate(&account(3), &account(1)).unwrap();
    assert_eq!(engine.voter(&account(3)).delegate, Some(account(2)));
    assert_eq!(engine.proposal(1).unwrap().vote_count, 3);
}

// ---------------------------------------------------------------------------
// Voting & result
// ---------------------------------------------------------------------------

#[test]
fn cannot_vote_twice() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1]);
    engine.vote(&account(1), 0).unwrap();
    assert_rejected(&mut engine, BallotError::AlreadyVoted(account(1)), |e| {
        e.vote(&account(1), 0)
    });
}

#[test]
fn cannot_vote_for_missing_proposal() {
    let mut engine = open_ballot();
    assert_rejected(
        &mut engine,
        BallotError::InvalidProposal { index: 3, count: 3 },
        |e| e.vote(&account(0), 3),
    );
}

#[test]
fn majority_wins() {
    let mut engine = open_ballot();
    grant(&mut engine, &[1, 2, 3]);
    for voter in [0, 1, 2] {
        engine.vote(&account(voter), 0).unwrap();
    }
    assert_eq!(engine.winning_proposal(), 0);
    assert_eq!(engine.winner_name().as_u64(), Some(1007));
}

#[test]
fn delegate_then_vote_end_to_end() {
    // RUST_LOG=ballot_engine=debug shows the operation spans.
    ballot_utils::init_logging(LogFormat::Human, "warn");

    let chair = Principal::new("chair");
    let (v1, v2) = (Principal::new("v1"), Principal::new("v2"));
    let names = ["P0", "P1", "P2"].map(|n| ProposalName::from_label(n).unwrap());
    let mut engine = BallotEngine::new(names, chair.clone()).unwrap();

    engine.grant_right(&chair, &v1).unwrap();
    engine.grant_right(&chair, &v2).unwrap();
    engine.delegate(&v1, &v2).unwrap();
    engine.vote(&v2, 0).unwrap();

    assert_eq!(engine.proposal(0).unwrap().vote_count, 2);
    assert!(engine.voter(&v1).voted);
    assert_eq!(engine.winning_proposal(), 0);
    assert_eq!(engine.winner_name().as_text(), Some("P0"));
    engine.check_invariants().unwrap();
}
