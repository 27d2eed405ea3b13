//! Quick search performance test

use methuselah::{GeneticSearch, schema::SearchConfig};
use std::time::Instant;

fn main() {
    println!("=== Search Performance Test ===\n");

    // Test different grid sizes
    for grid_size in [10, 20, 40] {
        println!("Grid size: {}x{}", grid_size + 1, grid_size + 1);

        let config = SearchConfig {
            pop_size: 20,
            grid_size,
            gen_limit: 10,
            threshold_fit: usize::MAX,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut search = GeneticSearch::new(config).expect("valid config");
        let outcome = search.find_methuselah();
        let elapsed = start.elapsed();

        let sims = outcome.stats.simulations;
        let sims_per_sec = sims as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", outcome.stats.generations);
        println!("  Simulations:    {}", sims);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Sims/sec:       {:.1}", sims_per_sec);
        println!("  Best fitness:   {}", outcome.stats.best_fitness);
        println!();
    }

    println!("=== Memoization (fixed 21x21 grid) ===\n");

    for memoize_fitness in [false, true] {
        let config = SearchConfig {
            pop_size: 40,
            gen_limit: 10,
            threshold_fit: usize::MAX,
            memoize_fitness,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut search = GeneticSearch::new(config).expect("valid config");
        let outcome = search.find_methuselah();
        let elapsed = start.elapsed();

        println!(
            "memoize={}: {} simulations in {:.2}s (best fitness {})",
            memoize_fitness,
            outcome.stats.simulations,
            elapsed.as_secs_f64(),
            outcome.stats.best_fitness
        );
    }
}
