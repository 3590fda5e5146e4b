use std::hint::black_box;
use std::time::Instant;

use lifegrid_kernel::Grid;

fn bench_construct(side: usize, iterations: usize) {
    let start = Instant::now();
    for seed in 0..iterations as u64 {
        let _ = black_box(Grid::new(side, side, 0.3, black_box(seed)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  construct ({side}x{side}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_advance(side: usize, iterations: usize) {
    let Ok(mut grid) = Grid::new(side, side, 0.3, 42) else {
        return;
    };

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(&mut grid).advance();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  advance ({side}x{side}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}, population {}",
        grid.population()
    );
}

fn bench_live_cells(side: usize, iterations: usize) {
    let Ok(grid) = Grid::new(side, side, 0.3, 7) else {
        return;
    };

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(black_box(&grid).live_cells().count());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  live cells ({side}x{side}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Grid Kernel Benchmarks ===\n");

    println!("Construction:");
    bench_construct(10, 10000);
    bench_construct(100, 1000);
    bench_construct(1000, 10);

    println!("\nGeneration advance:");
    bench_advance(10, 100000);
    bench_advance(100, 1000);
    bench_advance(1000, 10);

    println!("\nLive cell collection:");
    bench_live_cells(100, 10000);
    bench_live_cells(1000, 100);

    println!("\n=== Done ===");
}
