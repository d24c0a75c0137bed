//! Basic example of using the savings heuristic on a random Euclidean instance.

use clap::Parser;
use cws::config::Config;
use cws::instance::{random_instance, Instance};
use cws::utils::{format_duration, print_solution};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Clarke & Wright Savings with biased-randomised restarts")]
struct Args {
    /// JSON instance file; a random instance is generated when omitted
    #[arg(long)]
    instance: Option<PathBuf>,
    /// Number of customers of the random instance
    #[arg(long, default_value_t = 20)]
    customers: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 0.3)]
    beta: f64,
    /// Biased-randomised savings selection
    #[arg(long)]
    biased: bool,
    /// Also try reversed orientations when merging
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    reverse: bool,
    /// Restart loop warm-started from the greedy pass
    #[arg(long)]
    metaheuristic: bool,
    #[arg(long, default_value_t = 1000)]
    maxiter: u32,
    #[arg(long, default_value_t = 500)]
    maxnoimp: u32,
    #[arg(long, default_value_t = f64::INFINITY)]
    maxcost: f64,
    #[arg(long, default_value_t = 5.0)]
    minroutes: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let instance = match &args.instance {
        Some(path) => {
            println!("Loading instance from: {}", path.display());
            Instance::from_file(path)?
        }
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
            random_instance(args.customers, &mut rng)
        }
    };
    println!(
        "Instance with {} customers and {} edges",
        instance.nodes.len(),
        instance.edges.len()
    );

    let mut solver = instance.solver()?;

    let greedy = Config::new()
        .with_reverse(args.reverse)
        .with_max_cost(args.maxcost)
        .with_min_routes(args.minroutes)
        .with_seed(args.seed);

    let (_, greedy_cost) = solver.solve(&greedy)?;
    println!("Greedy pass cost: {:.2}", greedy_cost);

    if args.biased || args.metaheuristic {
        let mut config = greedy
            .with_biased(args.biased)
            .with_beta(args.beta)
            .with_metaheuristic(args.metaheuristic)
            .with_max_iterations(args.maxiter)
            .with_max_iterations_without_improvement(args.maxnoimp);
        if args.metaheuristic {
            config = config.with_start(solver.best_solution.clone().unwrap_or_default());
        }

        let (_, cost) = solver.solve(&config)?;
        let stats = solver.statistics();
        println!("Search completed in {}", format_duration(stats.runtime));
        println!("Best cost: {:.2}", cost);
        println!("{}", stats.format());
    }

    if let Some(best) = &solver.best_solution {
        print_solution(best, &solver.problem);
    }

    Ok(())
}
