use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use u_routine::encoding::{decode, gene_space};
use u_routine::fitness::{evaluate_breakdown, FitnessBreakdown};
use u_routine::models::Weekday;
use u_routine::settings::{RoutineConfig, SearchConfig};
use u_routine::{run_search, SearchOutcome};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Weekly training-split optimizer", long_about = None)]
struct CommandArgs {
    /// Routine configuration (groups, availability, weights, preferences)
    #[arg(short, long, global = true, default_value = "configs/routine.yaml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a genetic search with an experiment file
    Run {
        /// Experiment file (population, generations, rates, selection, seed)
        experiment: PathBuf,
        /// Override the experiment's random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the legal groups for each weekday
    GeneSpace,
    /// Score a genome given as comma-separated catalog indices
    Evaluate {
        /// Seven indices, Monday first, e.g. 0,1,0,1,0,1,2
        #[arg(value_delimiter = ',', num_args = 1..)]
        genome: Vec<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logger(args.verbose);

    let routine = RoutineConfig::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    match args.mode {
        Mode::Run {
            experiment,
            seed,
            format,
        } => {
            let mut search = SearchConfig::load(&experiment)
                .with_context(|| format!("failed to load {}", experiment.display()))?;
            if let Some(seed) = seed {
                search = search.with_seed(seed);
            }
            let outcome = run_search(&routine, &search).context("search failed")?;
            match format {
                Format::Text => print_outcome(&outcome),
                Format::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            }
        }
        Mode::GeneSpace => {
            let space = gene_space(&routine)?;
            for (day, choices) in space.iter() {
                let names: Vec<&str> = choices
                    .iter()
                    .filter_map(|i| routine.catalog.name(*i))
                    .collect();
                println!("{day}: {}", names.join(", "));
            }
            println!("{} candidate weeks", space.size());
        }
        Mode::Evaluate { genome, format } => {
            if genome.len() != Weekday::ALL.len() {
                bail!("expected {} genes, got {}", Weekday::ALL.len(), genome.len());
            }
            let schedule = decode(&genome, &routine)?;
            let breakdown = evaluate_breakdown(&genome, &routine)?;
            if let Err(err) = gene_space(&routine)?.check(&genome) {
                log::warn!("{err}");
            }
            match format {
                Format::Text => {
                    print!("{schedule}");
                    print_breakdown(&breakdown);
                }
                Format::Json => {
                    let report = serde_json::json!({
                        "schedule": schedule,
                        "breakdown": breakdown,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
    }
    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_outcome(outcome: &SearchOutcome) {
    println!("=== BEST SOLUTION ===");
    println!("Fitness: {:.4}", outcome.best_score);
    print!("{}", outcome.schedule);
    print_breakdown(&outcome.breakdown);
    println!("Generations: {}", outcome.generations);
    if let Some(average) = outcome.average_history.last() {
        println!("Final population average: {average:.4}");
    }
    log::debug!("best per generation: {:.4?}", outcome.score_history);
    log::debug!("average per generation: {:.4?}", outcome.average_history);
    if let Some(generation) = outcome.generation_reaching(outcome.best_score) {
        println!("Best reached at generation {generation}");
    }
}

fn print_breakdown(b: &FitnessBreakdown) {
    println!(
        "diversity {:.3} | rest spacing {:.3} | availability {:.3} | user prefs {:.3} | total {:.4}",
        b.diversity, b.rest_spacing, b.availability, b.user_prefs, b.total
    );
}
