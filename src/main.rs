use clap::{Parser, Subcommand};
use env_logger::Builder;
use rand::{SeedableRng, rngs::StdRng};
use searchbench::{
    search::SearchAlgorithm,
    tasks::{
        bench::{self, BenchRunArgs, DemoArgs},
        generate,
        plot::{self, PlotArgs},
    },
};
use std::path::PathBuf;

#[derive(Parser)]
struct Cli {
    // The name of the task to execute
    #[clap(subcommand)]
    task: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the benchmarked algorithms and their result-file indices
    Algorithms {},
    /// Time the search algorithms and write averageTimes-*.csv files
    Bench {
        #[command(subcommand)]
        bench_command: BenchCommand,
    },
    /// Generate random texts and word lists
    Generate {
        #[command(subcommand)]
        generate_command: GenerateCommand,
    },
    /// Plot average search times against alphabet size and word length
    Plot(PlotArgs),
}

#[derive(Debug, Subcommand)]
enum BenchCommand {
    /// Run the full benchmark grid
    Run(BenchRunArgs),
    /// Time every algorithm over a single text and word list
    Demo(DemoArgs),
}

#[derive(Debug, Subcommand)]
enum GenerateCommand {
    /// Generate a random text
    Text {
        length: usize,
        alphabet_size: usize,
        file: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a random word list, one word per line
    Words {
        count: usize,
        word_length: usize,
        alphabet_size: usize,
        file: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger.
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);
    builder.init();

    let cli = Cli::parse();
    match &cli.task {
        Command::Algorithms {} => {
            for algorithm in SearchAlgorithm::iter_variants() {
                println!(
                    "{:>2} {:<24} {}",
                    algorithm.index(),
                    algorithm.to_string(),
                    algorithm.title()
                );
            }
        }
        Command::Bench { bench_command } => match bench_command {
            BenchCommand::Run(args) => {
                bench::run(args)?;
            }
            BenchCommand::Demo(args) => {
                bench::demo(args)?;
            }
        },
        Command::Generate { generate_command } => match generate_command {
            GenerateCommand::Text {
                length,
                alphabet_size,
                file,
                seed,
            } => {
                let mut rng = rng_from_seed(*seed);
                let text = generate::random_text(&mut rng, *length, *alphabet_size)?;
                generate::write_text(file, &text)?;
            }
            GenerateCommand::Words {
                count,
                word_length,
                alphabet_size,
                file,
                seed,
            } => {
                let mut rng = rng_from_seed(*seed);
                let words = generate::random_words(&mut rng, *count, *word_length, *alphabet_size)?;
                generate::write_word_list(file, &words)?;
            }
        },
        Command::Plot(args) => {
            let config = plot::resolve_config(args)?;
            plot::plot(&config, (args.width, args.height))?;
        }
    }

    Ok(())
}
