#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_engine::BallotEngine;

// Restoring from arbitrary bytes must either fail cleanly or yield an engine
// that passes its own invariant check and re-encodes to a loadable state.
fuzz_target!(|data: &[u8]| {
    if let Ok(engine) = BallotEngine::load_state(data) {
        assert!(engine.check_invariants().is_ok());
        let bytes = engine.save_state().expect("restored engine encodes");
        let again = BallotEngine::load_state(&bytes).expect("re-encoded state loads");
        assert_eq!(again, engine);
        let _ = engine.winning_proposal();
    }
});
