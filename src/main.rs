//! Life Forge CLI - Run the evolutionary search from the command line.

use life_forge::{SearchConfig, SearchEngine};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = SearchConfig::default();
    if let Some(arg) = args.get(1) {
        match arg.parse::<usize>() {
            Ok(size) => config.population_size = size,
            Err(_) => {
                eprintln!("Usage: {} [population-size]", args[0]);
                eprintln!();
                eprintln!("Evolve Game of Life seed patterns toward long non-repeating runs.");
                eprintln!();
                eprintln!("Arguments:");
                eprintln!(
                    "  population-size  Constructs per generation (default: {})",
                    SearchConfig::default().population_size
                );
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    log::debug!(
        "active configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    println!("Life Forge");
    println!("==========");
    println!(
        "Construct: {}x{}, board: {}x{}, budget: {} iterations",
        config.construct_width,
        config.construct_height,
        config.board_width,
        config.board_height,
        config.iteration_budget
    );
    println!(
        "Population: {} constructs, {} generations",
        config.population_size, config.generations
    );
    println!();

    let mut engine = match SearchEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to start search: {e}");
            std::process::exit(1);
        }
    };

    engine.run_with_callback(|report| {
        println!(
            "Generation {}: avg fitness {:.2}, bar {:.2}, child avg {:.2}, random avg {:.2}, \
             {} above bar, {:.3}s",
            report.generation,
            report.avg_fitness,
            report.bar,
            report.avg_child_fitness,
            report.avg_random_fitness,
            report.num_parents,
            report.elapsed.as_secs_f64()
        );
        if let Some(best) = &report.improved_best {
            println!(
                "New best construct with fitness {} ({} a child):",
                report.generation_best,
                if best.is_child { "is" } else { "is not" }
            );
            print!("{}", best.grid);
        }
    });

    if let Some(best) = engine.best_fitness() {
        println!();
        println!("Best fitness over the run: {best}");
    }
}
