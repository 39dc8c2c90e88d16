use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use std::hint::black_box;

use perudo::{
    Bid, GameConfig, GameEngine, GamePhase, GameState, PlayerId,
    game::{dice, validator},
};

/// Helper to create a bidding-phase state with N players of 5 dice each
fn setup_game_with_players(n_players: usize) -> GameState {
    let mut engine = GameEngine::with_rng(StdRng::seed_from_u64(99));
    let names: Vec<String> = (0..n_players).map(|i| format!("player{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let config = GameConfig {
        max_players: n_players.max(6),
        ..GameConfig::default()
    };
    engine.start_new_game(&names, config).unwrap()
}

/// Benchmark wild-ace counting across the whole table
fn bench_count_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_matching");

    for n_players in [2, 6, 12].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_players}_players")),
            n_players,
            |b, &n| {
                let state = setup_game_with_players(n);
                b.iter(|| dice::count_matching(black_box(&state.players), 5, true, false));
            },
        );
    }

    group.finish();
}

/// Benchmark bid validation for the four escalation cases
fn bench_validate(c: &mut Criterion) {
    let previous = Bid::new(PlayerId::new("p"), 5, 3);
    let previous_ace = Bid::new(PlayerId::new("p"), 3, 1);
    let cases = [
        ("normal_to_normal", Bid::new(PlayerId::new("p"), 5, 4), &previous),
        ("normal_to_ace", Bid::new(PlayerId::new("p"), 3, 1), &previous),
        ("ace_to_normal", Bid::new(PlayerId::new("p"), 7, 2), &previous_ace),
        ("ace_to_ace", Bid::new(PlayerId::new("p"), 4, 1), &previous_ace),
    ];

    for (name, new_bid, prev) in cases {
        c.bench_function(&format!("validate_{name}"), |b| {
            b.iter(|| validator::validate(black_box(&new_bid), Some(prev), false, 25));
        });
    }
}

/// Benchmark a full place-bid transition (validation + snapshot build)
fn bench_place_bid(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_bid");

    for n_players in [2, 6].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_players}_players")),
            n_players,
            |b, &n| {
                let engine = GameEngine::new();
                let state = setup_game_with_players(n);
                b.iter(|| engine.place_bid(black_box(&state), 1, 2).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark a full round: bid, challenge, close, reroll
fn bench_full_round(c: &mut Criterion) {
    c.bench_function("full_round_6_players", |b| {
        let mut engine = GameEngine::with_rng(StdRng::seed_from_u64(7));
        let state = setup_game_with_players(6);
        b.iter(|| {
            let s = engine.place_bid(&state, 1, 2).unwrap();
            let s = engine.call_dudo(&s).unwrap();
            let s = engine.end_round(&s);
            let s = engine.start_new_round(&s);
            assert_eq!(s.phase, GamePhase::Bidding);
            s
        });
    });
}

criterion_group!(
    rule_checks,
    bench_count_matching,
    bench_validate,
);

criterion_group!(
    game_operations,
    bench_place_bid,
    bench_full_round,
);

criterion_main!(rule_checks, game_operations);
