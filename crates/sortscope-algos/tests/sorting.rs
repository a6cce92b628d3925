//! End-to-end properties of the instrumented sorts.
//!
//! Every algorithm is driven through the interpreter only, so these tests also
//! cover the producer/interpreter alternation: a producer that read stale data
//! or emitted a bad index would fail here rather than in a unit test.

use proptest::prelude::*;
use sortscope_algos::{count_steps, record, run, Algorithm, MergeSort, QuickSort, SelectionSort};
use sortscope_core::{Effect, EffectKind, Recorder, Span, StepCounter, Tee};
use std::cmp::Ordering;

fn sorted(mut v: Vec<i64>) -> Vec<i64> {
    v.sort_unstable();
    v
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    // Property: every algorithm leaves the sequence in ascending order.
    #[test]
    fn every_algorithm_sorts(data in prop::collection::vec(-40i64..40, 0..48)) {
        for algo in Algorithm::ALL {
            let mut v = data.clone();
            run(algo, &mut v, None).unwrap();
            prop_assert_eq!(&v, &sorted(data.clone()), "{} failed", algo);
        }
    }

    // Property: step counts are deterministic and unaffected by extra observers.
    #[test]
    fn steps_are_deterministic(data in prop::collection::vec(-10i64..10, 0..40)) {
        for algo in Algorithm::ALL {
            let a = count_steps(algo, &mut data.clone()).unwrap();
            let b = count_steps(algo, &mut data.clone()).unwrap();
            prop_assert_eq!(a, b);

            let mut tee = Tee::new(StepCounter::new(), Recorder::new());
            let summary = run(algo, &mut data.clone(), Some(&mut tee)).unwrap();
            let (counter, _) = tee.into_parts();
            prop_assert_eq!(counter.steps(), a);
            prop_assert_eq!(summary.steps, a);
        }
    }

    // Property: selection sort always costs n(n-1)/2 comparisons plus n-1 swaps.
    #[test]
    fn selection_step_formula(data in prop::collection::vec(any::<i64>(), 0..40)) {
        let n = data.len() as u64;
        let expected = if n == 0 { 0 } else { n * (n - 1) / 2 + (n - 1) };
        prop_assert_eq!(count_steps(Algorithm::Selection, &mut data.clone()).unwrap(), expected);
    }

    // Property: a recorded trace replayed on the original input reproduces the result.
    #[test]
    fn replay_reproduces_sort(data in prop::collection::vec(-20i64..20, 0..40)) {
        for algo in Algorithm::ALL {
            let mut live = data.clone();
            let trace = record(algo, &mut live).unwrap();
            let mut replayed = data.clone();
            trace.replay(&mut replayed).unwrap();
            prop_assert_eq!(replayed, live);
        }
    }

    // Property: quicksort terminates and sorts on duplicate-heavy inputs.
    #[test]
    fn quicksort_handles_heavy_duplicates(data in prop::collection::vec(0i64..3, 0..64)) {
        let mut v = data.clone();
        run(Algorithm::Quick, &mut v, None).unwrap();
        prop_assert_eq!(v, sorted(data));
    }

    // Property: bounded producers only touch their range.
    #[test]
    fn bounded_sorts_leave_outside_untouched(
        data in prop::collection::vec(-20i64..20, 2..32),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (x, y) = (a.index(data.len() + 1), b.index(data.len() + 1));
        let span = Span::new(x.min(y), x.max(y));
        for algo in Algorithm::ALL {
            let mut v = data.clone();
            sortscope_core::run(algo.source_in::<i64>(span), &mut v, None).unwrap();
            prop_assert_eq!(&v[..span.start], &data[..span.start]);
            prop_assert_eq!(&v[span.end..], &data[span.end..]);
            prop_assert_eq!(
                v[span.start..span.end].to_vec(),
                sorted(data[span.start..span.end].to_vec())
            );
        }
    }
}

#[test]
fn selection_scenario() {
    let mut data = vec![5, 11, 2, 3, 9];
    let trace = record(Algorithm::Selection, &mut data).unwrap();
    assert_eq!(data, vec![2, 3, 5, 9, 11]);
    let first_swap = trace.iter().find(|e| e.kind() == EffectKind::Swap);
    assert_eq!(first_swap, Some(&Effect::Swap { i: 0, j: 2 }));
}

#[test]
fn quicksort_equal_pair_scenario() {
    let mut data = vec![-2, -2];
    run(Algorithm::Quick, &mut data, None).unwrap();
    assert_eq!(data, vec![-2, -2]);
}

#[test]
fn quicksort_alternating_scenario() {
    let mut data = vec![0, 1, 0, 1];
    run(Algorithm::Quick, &mut data, None).unwrap();
    assert_eq!(data, vec![0, 0, 1, 1]);
}

#[test]
fn merge_trivial_scenarios_emit_nothing() {
    for input in [vec![], vec![7i64]] {
        let mut data = input.clone();
        let trace = record(Algorithm::Merge, &mut data).unwrap();
        assert!(trace.is_empty());
        assert_eq!(data, input);
    }
}

#[test]
fn trivial_inputs_emit_no_structural_effects() {
    for algo in Algorithm::ALL {
        for input in [vec![], vec![3i64]] {
            let trace = record(algo, &mut input.clone()).unwrap();
            assert!(trace.iter().all(|e| !e.is_structural()), "{algo}");
        }
    }
}

#[test]
fn quicksort_sorted_reverse_and_constant_inputs() {
    let ascending: Vec<i64> = (0..200).collect();
    let descending: Vec<i64> = (0..200).rev().collect();
    let constant = vec![9i64; 200];
    for input in [ascending, descending, constant] {
        let mut v = input.clone();
        let steps = count_steps(Algorithm::Quick, &mut v).unwrap();
        assert_eq!(v, sorted(input));
        // Lower-middle pivots keep these inputs far from the quadratic bound.
        assert!(steps < 200 * 200, "{steps} steps");
    }
}

/// Orders by `key` only, so `tag` exposes whether equal keys kept input order.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Keyed {
    key: u8,
    tag: usize,
}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[test]
fn merge_sort_is_stable() {
    let keys = [3u8, 1, 3, 0, 1, 3, 0, 2, 1, 3, 2, 0];
    let mut data: Vec<Keyed> = keys
        .iter()
        .enumerate()
        .map(|(tag, &key)| Keyed { key, tag })
        .collect();
    run(Algorithm::Merge, &mut data, None).unwrap();
    for w in data.windows(2) {
        assert!(w[0].key <= w[1].key);
        if w[0].key == w[1].key {
            assert!(w[0].tag < w[1].tag, "equal keys reordered: {w:?}");
        }
    }
}

#[test]
fn concrete_producers_match_selector() {
    let input = vec![4i64, -1, 7, 0, 7, 3];
    let expected = sorted(input.clone());

    let mut a = input.clone();
    sortscope_core::run(SelectionSort::new(), &mut a, None).unwrap();
    let mut b = input.clone();
    sortscope_core::run(MergeSort::new(), &mut b, None).unwrap();
    let mut c = input;
    sortscope_core::run(QuickSort::new(), &mut c, None).unwrap();

    assert_eq!(a, expected);
    assert_eq!(b, expected);
    assert_eq!(c, expected);
}

#[test]
fn observer_errors_propagate() {
    let mut seen = 0u32;
    let mut failing = |_: &Effect<i64>| -> anyhow::Result<()> {
        seen += 1;
        anyhow::ensure!(seen < 3, "observer gave up");
        Ok(())
    };
    let mut data = vec![3, 2, 1];
    let err = run(Algorithm::Selection, &mut data, Some(&mut failing)).unwrap_err();
    assert!(format!("{err:#}").contains("observer gave up"));
}
