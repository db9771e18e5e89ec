//! Search hot-path benchmarks
//!
//! - seed_hashing: SHA-1 seed derivation over one day's parameter grid
//! - frame_expansion: PRNG frame generation and filtering per seed
//!
//! Together these dominate a real search: every candidate seed costs one
//! hash plus one frame-window expansion.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gen5seed_engine::app::criteria::{Criteria, FrameChecker, IvCriteria, PidCriteria, Shininess};
use gen5seed_engine::domain::frame::{FrameGenerator, FrameRange, FrameSequence};
use gen5seed_engine::domain::hashed_seed::{GameDate, HashedSeed, SeedParameters, Version};
use gen5seed_engine::domain::ivs::Ivs;
use gen5seed_engine::domain::nature::{Nature, NatureSet};
use gen5seed_engine::domain::pid::GameFamily;
use rayon::prelude::*;

const FRAMES_PER_SEED: u32 = 100;
const SEEDS_PER_ITER: usize = 256;

fn search_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(10))
}

fn seed_parameters() -> SeedParameters {
    SeedParameters {
        version: Version::BlackEnglish,
        mac_address: 0x0009_BF12_3456,
        timer0_min: 0xC79,
        timer0_max: 0xC7A,
        vcount_min: 0x60,
        vcount_max: 0x60,
        date_min: GameDate::new(2011, 3, 6),
        date_max: GameDate::new(2011, 3, 6),
        second_min: 0,
        second_max: 86_399,
        key_combos: vec![0],
    }
}

fn criteria() -> Criteria {
    Criteria {
        seed_parameters: seed_parameters(),
        frame_range: FrameRange::new(1, FRAMES_PER_SEED),
        family: GameFamily::Gen5,
        pid: PidCriteria {
            natures: NatureSet::single(Nature::Timid),
            ..PidCriteria::default()
        },
        ivs: IvCriteria {
            min: Ivs::new(25, 0, 25, 25, 25, 25),
            ..IvCriteria::default()
        },
        shiny_only: false,
        shininess: Shininess::MayBeShiny,
        tid: 12345,
        sid: 54321,
        num_threads: 0,
    }
}

fn hash_one_day(parameters: &SeedParameters) -> u64 {
    let date = parameters.date_min;
    let mut accumulator = 0u64;
    for second in 0..3600 {
        for timer0 in parameters.timer0_min..=parameters.timer0_max {
            let seed = HashedSeed::compute(
                parameters,
                date,
                second,
                parameters.key_combos[0],
                timer0,
                parameters.vcount_min,
            );
            accumulator ^= seed.raw;
        }
    }
    accumulator
}

fn expand_and_check(raw_seeds: &[u64], criteria: &Criteria) -> usize {
    let checker = FrameChecker::new(criteria);
    let parameters = criteria.frame_parameters();
    raw_seeds
        .par_iter()
        .map(|&raw| {
            let mut frames = FrameGenerator::new(raw, parameters);
            let mut hits = 0usize;
            for _ in 0..FRAMES_PER_SEED {
                let frame = frames.advance();
                if checker.test(&frame) {
                    hits += 1;
                }
            }
            hits
        })
        .sum()
}

fn bench_seed_hashing(c: &mut Criterion) {
    let parameters = seed_parameters();
    let mut group = c.benchmark_group("seed_hashing_7200");

    group.bench_function("sha1_parameter_grid", |b| {
        b.iter(|| black_box(hash_one_day(black_box(&parameters))))
    });

    group.finish();
}

fn bench_frame_expansion(c: &mut Criterion) {
    let criteria = criteria();
    let raw_seeds: Vec<u64> = (0..SEEDS_PER_ITER as u64)
        .map(|i| 0x9B3E_7C4B_C185_AE31u64.wrapping_add(i.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
        .collect();
    let mut group = c.benchmark_group("frame_expansion_256x100");

    group.bench_function("generate_and_filter", |b| {
        b.iter(|| black_box(expand_and_check(black_box(&raw_seeds), &criteria)))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = search_criterion();
    targets = bench_seed_hashing, bench_frame_expansion,
}

criterion_main!(benches);
