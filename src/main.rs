//! Methuselah CLI - Run searches from JSON configuration and inspect results.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;

use methuselah::{
    compute::{
        Simulation,
        evolution::{GeneticSearch, PatternArchive, PatternSink},
    },
    schema::SearchConfig,
};

const DEFAULT_ARCHIVE: &str = "patterns.json";

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--example") => print_example_config(),
        Some("search") => run_search(&args[2..]),
        Some("show") => run_show(&args[2..]),
        _ => {
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} search [config.json] [--archive FILE]");
    eprintln!("  {program} show <archive.json> <label> [grid_size]");
    eprintln!("  {program} --example");
    eprintln!();
    eprintln!("Search for Game of Life Methuselahs with a genetic algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Search configuration (defaults used if omitted)");
    eprintln!("  --archive    Where found patterns are stored (default: {DEFAULT_ARCHIVE})");
    eprintln!("  label        Stored pattern key, e.g. 9:131");
    eprintln!("  grid_size    Largest row/column index (default: 20)");
}

fn run_search(args: &[String]) {
    let mut config_path: Option<PathBuf> = None;
    let mut archive_path = PathBuf::from(DEFAULT_ARCHIVE);

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--archive" {
            let Some(path) = iter.next() else {
                eprintln!("--archive requires a file name");
                std::process::exit(1);
            };
            archive_path = PathBuf::from(path);
        } else {
            config_path = Some(PathBuf::from(arg));
        }
    }

    let config: SearchConfig = match config_path {
        Some(path) => {
            let config_str = fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => SearchConfig::default(),
    };

    let mut search = GeneticSearch::new(config.clone()).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    println!("Methuselah Search");
    println!("=================");
    println!(
        "Population: {}  Grid: {}x{}  Cells: {}-{}",
        config.pop_size,
        config.grid_size + 1,
        config.grid_size + 1,
        config.min_cells,
        config.max_cells
    );
    println!(
        "Generations: {}  Threshold: {}",
        config.gen_limit, config.threshold_fit
    );
    println!();

    let outcome = search.find_methuselah_with_callback(|progress| {
        if progress.generation % 10 == 0 {
            println!(
                "  Generation {}/{}: best={} avg={:.1}",
                progress.generation,
                progress.total_generations,
                progress.best_fitness,
                progress.avg_fitness
            );
        }
    });

    println!();
    println!(
        "Stopped after {} generations ({:?}), {} simulations in {:.2}s",
        outcome.stats.generations,
        outcome.stats.stop_reason,
        outcome.stats.simulations,
        outcome.stats.elapsed_seconds
    );

    let Some(found) = outcome.methuselah else {
        println!("No Methuselah pattern found within generation limit.");
        return;
    };

    println!(
        "Found Methuselah pattern with fitness {} in generation {}!",
        found.fitness, found.generation
    );
    println!();
    print!("{}", found.grid);

    let saved = PatternArchive::open(&archive_path)
        .and_then(|mut archive| archive.save(found.grid.pattern(), found.fitness));
    match saved {
        Ok(label) => println!("Saved as {} in {}", label, archive_path.display()),
        Err(e) => {
            eprintln!("Error saving pattern: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_show(args: &[String]) {
    let (Some(archive_path), Some(label)) = (args.first(), args.get(1)) else {
        print_usage("methuselah");
        std::process::exit(1);
    };
    let grid_size: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);

    let archive = PatternArchive::open(archive_path).unwrap_or_else(|e| {
        eprintln!("Error opening archive: {}", e);
        std::process::exit(1);
    });

    let life = match archive.load_grid(label, grid_size) {
        Ok(Some(life)) => life,
        Ok(None) => {
            eprintln!("Pattern {} not found in {}", label, archive_path);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading pattern: {}", e);
            std::process::exit(1);
        }
    };

    println!("Pattern {} ({} cells)", label, life.size());
    println!();
    print!("{}", life);
    println!();

    let mut simulation = Simulation::new(&life, methuselah::compute::DEFAULT_GENERATION_LIMIT);
    println!("{}", simulation.simulate().summary());
}

fn print_example_config() {
    let config = SearchConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
