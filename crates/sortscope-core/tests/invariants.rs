//! Invariants for the interpreter, observers and trace replay.
//!
//! These tests treat:
//! - the **interpreter** as authoritative for application order and index
//!   validation, and
//! - a **recorded trace** as a complete description of the transformation:
//!   replaying it on a fresh copy must reproduce the interpreted result.

use proptest::prelude::*;
use sortscope_core::{
    run, Effect, EffectKind, Focus, Recorder, Scripted, Span, StepCounter, Tee, Trace,
};

/// Build a script of valid effects over a sequence of length `len` from raw picks.
#[track_caller]
fn mk_script(len: usize, picks: &[(u8, usize, usize, i32)]) -> Vec<Effect<i32>> {
    assert!(len > 0, "scripts need a non-empty sequence");
    picks
        .iter()
        .map(|&(kind, a, b, v)| {
            let (i, j) = (a % len, b % len);
            match kind % 6 {
                0 => Effect::Cmp { i, j },
                1 => Effect::Swap { i, j },
                2 => Effect::Set { i, value: v },
                3 => Effect::Focus { indices: Focus::Pair(i, j) },
                4 => Effect::Subdivide { span: Span::new(i.min(j), i.max(j)) },
                _ => Effect::label(format!("pick {v}")),
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, // good CI/runtime balance
        .. ProptestConfig::default()
    })]

    // Property: recording then replaying reproduces the interpreted sequence.
    #[test]
    fn replay_reproduces_run(
        data in prop::collection::vec(-50i32..50, 1..24),
        picks in prop::collection::vec((any::<u8>(), any::<usize>(), any::<usize>(), -50i32..50), 0..64),
    ) {
        let script = mk_script(data.len(), &picks);

        let mut interpreted = data.clone();
        let mut rec = Recorder::new();
        run(Scripted::new(script.clone()), &mut interpreted, Some(&mut rec)).unwrap();
        let trace = rec.into_trace();
        prop_assert_eq!(trace.effects(), script.as_slice());

        let mut replayed = data;
        trace.replay(&mut replayed).unwrap();
        prop_assert_eq!(replayed, interpreted);
    }

    // Property: attaching observers never changes the step count.
    #[test]
    fn steps_independent_of_observer(
        data in prop::collection::vec(-50i32..50, 1..24),
        picks in prop::collection::vec((any::<u8>(), any::<usize>(), any::<usize>(), -50i32..50), 0..64),
    ) {
        let script = mk_script(data.len(), &picks);
        let expected = script.iter().filter(|e| e.counts_as_step()).count() as u64;

        let bare = run(Scripted::new(script.clone()), &mut data.clone(), None).unwrap();

        let mut tee = Tee::new(StepCounter::new(), Recorder::new());
        let observed = run(Scripted::new(script), &mut data.clone(), Some(&mut tee)).unwrap();
        let (counter, rec) = tee.into_parts();

        prop_assert_eq!(bare.steps, expected);
        prop_assert_eq!(observed.steps, expected);
        prop_assert_eq!(counter.steps(), expected);
        prop_assert_eq!(rec.into_trace().stats().steps(), expected);
    }
}

/// Negative test: a merge announcement whose runs are not adjacent is rejected.
#[test]
fn rejects_non_adjacent_merge() {
    let script = Scripted::new(vec![Effect::<i32>::Merge {
        left: Span::new(0, 1),
        right: Span::new(2, 3),
    }]);
    let mut data = vec![1, 2, 3];
    let err = run(script, &mut data, None).unwrap_err();
    assert!(format!("{err:#}").contains("merge 0 1 2 3"));
}

/// Effects serialize as tagged JSON objects.
#[test]
fn effects_serialize_tagged() {
    let trace = Trace::from(vec![
        Effect::Swap { i: 0, j: 2 },
        Effect::Set { i: 1, value: 4 },
        Effect::Compare { pair: None },
    ]);
    let json = serde_json::to_string(&trace).unwrap();
    assert!(json.contains(r#"{"kind":"swap","i":0,"j":2}"#));
    assert!(json.contains(r#"{"kind":"set","i":1,"value":4}"#));
    let back: Trace<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, trace);
    assert_eq!(back.stats().get(EffectKind::Compare), 1);
}
