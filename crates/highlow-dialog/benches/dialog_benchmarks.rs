//! Benchmarks for a full dialog turn.
//!
//! Measures `handle_turn` for the hot paths of a game: the welcome prompt on
//! empty attributes, starting a round, and evaluating a guess.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use highlow_dialog::{handle_turn, FsmState, IntentEvent, IntentName, SessionAttributes};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn guessing(target: i64) -> SessionAttributes {
    SessionAttributes {
        state: Some(FsmState::Guess),
        games_played: Some(3),
        ended_session_count: Some(1),
        guess_number: Some(target),
        ..Default::default()
    }
}

fn bench_turns(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    let launch = IntentEvent::new(IntentName::LaunchOrNewSession).with_new_session(true);
    c.bench_function("launch_empty_attributes", |b| {
        b.iter(|| handle_turn(black_box(&launch), SessionAttributes::default(), &mut rng))
    });

    let yes = IntentEvent::new(IntentName::Yes);
    let start = SessionAttributes {
        state: Some(FsmState::Start),
        games_played: Some(3),
        ended_session_count: Some(1),
        ..Default::default()
    };
    c.bench_function("start_round", |b| {
        b.iter(|| handle_turn(black_box(&yes), start.clone(), &mut rng))
    });

    let guess = IntentEvent::number_guess("41");
    let attrs = guessing(42);
    c.bench_function("evaluate_guess", |b| {
        b.iter(|| handle_turn(black_box(&guess), attrs.clone(), &mut rng))
    });

    let garbage = IntentEvent::number_guess("forty two");
    c.bench_function("evaluate_unparsable_guess", |b| {
        b.iter(|| handle_turn(black_box(&garbage), attrs.clone(), &mut rng))
    });
}

criterion_group!(benches, bench_turns);
criterion_main!(benches);
