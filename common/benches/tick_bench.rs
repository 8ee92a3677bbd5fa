use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::collections::HashSet;
use std::hint::black_box;
use std::time::Duration;
use snake_common::games::SessionRng;
use snake_common::games::snake::{place_food, BoardSize, Cell, Difficulty, Direction, GameSession, TickOutcome};

fn bench_random_play(board_size: u32) {
    let mut session = GameSession::new(board_size, Difficulty::Hard, 42).unwrap();
    let mut steering = SessionRng::new(7);
    for _ in 0..1000 {
        let steer = Direction::ALL[steering.random_range(0..4usize)];
        if let TickOutcome::GameOver(_) = session.tick(Some(steer)) {
            break;
        }
    }
}

fn crowded_board(board_size: BoardSize) -> HashSet<Cell> {
    let size = board_size.get() as i32;
    let mut occupied = HashSet::new();
    for y in 0..size - 1 {
        for x in 0..size {
            occupied.insert(Cell::new(x, y));
        }
    }
    occupied
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(10));

    group.bench_function("random_play_25", |b| {
        b.iter(|| bench_random_play(black_box(25)))
    });

    group.bench_function("random_play_100", |b| {
        b.iter(|| bench_random_play(black_box(100)))
    });

    let board_size = BoardSize::new(50).unwrap();
    let occupied = crowded_board(board_size);
    group.bench_function("place_food_crowded_50", |b| {
        let mut rng = SessionRng::new(3);
        b.iter(|| place_food(black_box(&occupied), board_size, &mut rng))
    });

    let board_size = BoardSize::new(10).unwrap();
    let mut full: HashSet<Cell> = crowded_board(board_size);
    for x in 0..10 {
        full.insert(Cell::new(x, 9));
    }
    group.bench_function("place_food_full_fallback", |b| {
        let mut rng = SessionRng::new(3);
        b.iter(|| place_food(black_box(&full), board_size, &mut rng))
    });

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
