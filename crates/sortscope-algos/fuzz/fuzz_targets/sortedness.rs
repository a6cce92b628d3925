#![no_main]
use libfuzzer_sys::fuzz_target;
use sortscope_algos::{record, Algorithm};

fuzz_target!(|data: &[u8]| {
    let Some((&pick, rest)) = data.split_first() else {
        return;
    };
    let algo = Algorithm::ALL[usize::from(pick) % Algorithm::ALL.len()];
    let input: Vec<i8> = rest.iter().map(|&b| b as i8).collect();

    let mut live = input.clone();
    let trace = record(algo, &mut live).expect("instrumented sort failed");
    assert!(live.windows(2).all(|w| w[0] <= w[1]), "{algo} left {live:?}");

    let mut replayed = input;
    trace.replay(&mut replayed).expect("replay failed");
    assert_eq!(replayed, live);
});
