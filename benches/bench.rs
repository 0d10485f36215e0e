use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use varsudoku::{KillerCage, Puzzle};

const CLASSIC: [[u8; 9]; 9] = [
    [0, 2, 0, 0, 0, 6, 0, 8, 0],
    [0, 9, 6, 0, 1, 5, 0, 0, 2],
    [5, 0, 7, 0, 3, 0, 4, 0, 0],
    [0, 3, 0, 5, 0, 0, 0, 0, 4],
    [2, 0, 1, 4, 0, 8, 9, 0, 3],
    [8, 0, 0, 0, 0, 9, 0, 1, 0],
    [0, 0, 5, 0, 9, 0, 2, 0, 8],
    [9, 0, 0, 1, 8, 0, 3, 5, 0],
    [0, 6, 0, 2, 0, 0, 0, 9, 0],
];

fn with_givens(givens: &[[u8; 9]; 9]) -> Puzzle {
    let mut puzzle = Puzzle::new();
    for (i, row) in givens.iter().enumerate() {
        for (j, &digit) in row.iter().enumerate() {
            if digit != 0 {
                puzzle
                    .set_digit(i as u8 + 1, j as u8 + 1, digit)
                    .expect("givens are consistent");
            }
        }
    }
    puzzle
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function("puzzle_new", |b| b.iter(|| black_box(Puzzle::new())));
}

fn bench_givens_entry(c: &mut Criterion) {
    c.bench_function("enter_givens_classic", |b| {
        b.iter(|| black_box(with_givens(&CLASSIC)));
    });
}

fn bench_propagation(c: &mut Criterion) {
    c.bench_function("propagate_classic", |b| {
        b.iter_batched(
            || with_givens(&CLASSIC),
            |mut puzzle| {
                puzzle.propagate().expect("classic givens propagate cleanly");
                puzzle
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_solve_classic(c: &mut Criterion) {
    c.bench_function("solve_classic", |b| {
        b.iter_batched(
            || with_givens(&CLASSIC),
            |mut puzzle| {
                puzzle.solve();
                puzzle
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_solve_cage_variant(c: &mut Criterion) {
    c.bench_function("solve_crossed_cages", |b| {
        b.iter_batched(
            || {
                let mut puzzle = Puzzle::new();
                puzzle
                    .add_constraint(Box::new(KillerCage::new(vec![(1, 1), (2, 2)], 3)))
                    .expect("cage is consistent on a blank grid");
                puzzle
                    .add_constraint(Box::new(KillerCage::new(vec![(1, 2), (2, 1)], 3)))
                    .expect("cage is consistent on a blank grid");
                puzzle
            },
            |mut puzzle| {
                puzzle.solve();
                puzzle
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_givens_entry,
    bench_propagation,
    bench_solve_classic,
    bench_solve_cage_variant
);
criterion_main!(benches);
