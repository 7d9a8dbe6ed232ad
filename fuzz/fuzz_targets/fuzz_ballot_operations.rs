#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ballot_engine::BallotEngine;
use ballot_types::{Principal, ProposalName};

#[derive(Arbitrary, Debug)]
enum Op {
    Grant { caller: u8, target: u8 },
    Delegate { caller: u8, to: u8 },
    Vote { caller: u8, proposal: u8 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    proposals: u8,
    ops: Vec<Op>,
}

fn principal(id: u8) -> Principal {
    // Fold onto a small population so chains and cycles actually form.
    Principal::new(format!("p{}", id % 16))
}

// Drive the engine with arbitrary operation sequences. It must never panic,
// and every state it passes through must satisfy the invariants.
fuzz_target!(|input: Input| {
    let count = (input.proposals % 8) as u64 + 1;
    let Ok(mut engine) = BallotEngine::new((0..count).map(ProposalName::from), principal(0)) else {
        return;
    };

    for op in &input.ops {
        let before = engine.clone();
        let result = match *op {
            Op::Grant { caller, target } => engine.grant_right(&principal(caller), &principal(target)),
            Op::Delegate { caller, to } => engine.delegate(&principal(caller), &principal(to)),
            Op::Vote { caller, proposal } => engine.vote(&principal(caller), proposal as usize),
        };
        if result.is_err() {
            assert_eq!(engine, before, "rejected {:?} mutated state", op);
        }
        if let Err(violation) = engine.check_invariants() {
            panic!("{:?} broke an invariant: {}", op, violation);
        }
    }

    let _ = engine.winning_proposal();
    let _ = engine.winner_name();
});
