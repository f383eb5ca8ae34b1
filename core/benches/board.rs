use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sweeper_core::{Board, Difficulty, MineLayout};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.game_config();
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &config,
            |b, &config| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    black_box(Board::new_game(config, seed))
                })
            },
        );
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // single mine in the corner, so one reveal opens the whole board
    let layout = MineLayout::from_mine_coords((255, 255), &[(254, 254)]).unwrap();
    let board = Board::new(layout);

    c.bench_function("flood_fill/255x255", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(board.reveal((0, 0))),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_save(c: &mut Criterion) {
    let mut board = Board::new_game(Difficulty::Expert.game_config(), 7).unwrap();
    let _ = board.reveal((15, 8));
    let json = board.to_json().unwrap();

    c.bench_function("save/serialize", |b| b.iter(|| black_box(board.to_json())));
    c.bench_function("save/deserialize", |b| {
        b.iter(|| black_box(Board::from_json(&json)))
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill, bench_save);
criterion_main!(benches);
