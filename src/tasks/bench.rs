use crate::{
    config::DEFAULT_ALPHABET_SIZES,
    env::Env,
    search::{Haystack, SearchAlgorithm},
    tasks::{
        generate,
        results::{BenchmarkRecord, ResultWriter},
    },
};
use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    collections::HashSet,
    fs,
    hint::black_box,
    path::{Path, PathBuf},
    time::Instant,
};

const DEFAULT_SEED: u64 = 1337;

#[derive(Debug, Args)]
pub struct BenchRunArgs {
    /// Algorithm to benchmark, can be repeated (default: all of them)
    #[arg(long = "algorithm", value_enum)]
    pub algorithms: Vec<SearchAlgorithm>,
    #[arg(long = "alphabet-size", default_values_t = DEFAULT_ALPHABET_SIZES.to_vec())]
    pub alphabet_sizes: Vec<usize>,
    #[arg(long = "word-length", default_values_t = vec![4, 5, 6, 8, 10, 15, 20, 30, 40, 50])]
    pub word_lengths: Vec<usize>,
    #[arg(long, default_value_t = 500_000)]
    pub text_length: usize,
    #[arg(long, default_value_t = 100)]
    pub word_list_length: usize,
    /// Untimed searches over the word list before each measurement
    #[arg(long, default_value_t = 1)]
    pub num_warmup_repeats: u32,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Directory to write the averageTimes-*.csv files to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    pub text_length: usize,
    pub alphabet_size: usize,
    pub word_length: usize,
    pub word_list_length: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Directory to write the demo text and word list to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Average time, in milliseconds, to find every occurrence of each word.
/// Building the algorithm's tables is part of the measured time.
pub fn measure_average_ms(
    algorithm: SearchAlgorithm,
    haystack: &mut Haystack,
    words: &[Vec<u8>],
) -> Result<f64> {
    if words.is_empty() {
        error!("cannot measure over an empty word list (algorithm={algorithm})");
        anyhow::bail!("empty word list (algorithm={algorithm})");
    }

    let mut total_ms = 0.0;
    for word in words {
        let start = Instant::now();
        let pattern = algorithm.compile(word)?;
        black_box(pattern.count(haystack));
        total_ms += start.elapsed().as_secs_f64() * 1000.0;
    }

    Ok(total_ms / words.len() as f64)
}

fn warm_up(
    algorithm: SearchAlgorithm,
    haystack: &mut Haystack,
    words: &[Vec<u8>],
    num_repeats: u32,
) -> Result<()> {
    for _ in 0..num_repeats {
        for word in words {
            black_box(algorithm.compile(word)?.count(haystack));
        }
    }

    Ok(())
}

fn output_dir(dir: Option<&Path>) -> PathBuf {
    dir.map(Env::resolve_path).unwrap_or_else(Env::output_root)
}

fn selected_algorithms(algorithms: &[SearchAlgorithm]) -> Vec<SearchAlgorithm> {
    let mut selected: Vec<SearchAlgorithm> = if algorithms.is_empty() {
        SearchAlgorithm::iter_variants().copied().collect()
    } else {
        algorithms.to_vec()
    };
    selected.sort();
    selected.dedup();
    selected
}

/// Alphabet sizes in first-seen order, without repeats. Each size owns one
/// result file per algorithm.
fn unique_alphabet_sizes(alphabet_sizes: &[usize]) -> Vec<usize> {
    let mut seen = HashSet::new();
    let unique: Vec<usize> = alphabet_sizes
        .iter()
        .copied()
        .filter(|&size| seen.insert(size))
        .collect();
    if unique.len() < alphabet_sizes.len() {
        warn!("ignoring repeated alphabet sizes (alphabet_sizes={alphabet_sizes:?})");
    }
    unique
}

/// Runs the full benchmark grid and writes one result file per (algorithm,
/// alphabet size) pair. Returns the paths of the written files.
pub fn run(args: &BenchRunArgs) -> Result<Vec<PathBuf>> {
    let algorithms = selected_algorithms(&args.algorithms);
    let alphabet_sizes = unique_alphabet_sizes(&args.alphabet_sizes);
    let output_dir = output_dir(args.output_dir.as_deref());

    generate::check_bound("text length", args.text_length, generate::MAX_TEXT_LENGTH)?;
    generate::check_bound(
        "word list length",
        args.word_list_length,
        generate::MAX_WORD_LIST_LENGTH,
    )?;
    for &alphabet_size in &alphabet_sizes {
        generate::check_bound("alphabet size", alphabet_size, generate::MAX_ALPHABET_SIZE)?;
    }
    for &word_length in &args.word_lengths {
        generate::check_bound("word length", word_length, generate::MAX_WORD_LENGTH)?;
    }

    let total_iters = (alphabet_sizes.len() * args.word_lengths.len() * algorithms.len()) as u64;
    let pb = ProgressBar::new(total_iters).with_message("searchbench");
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut result_paths = Vec::new();
    for &alphabet_size in &alphabet_sizes {
        let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(alphabet_size as u64));
        let mut haystack =
            Haystack::from(generate::random_text(&mut rng, args.text_length, alphabet_size)?);

        let mut writers = algorithms
            .iter()
            .map(|algorithm| ResultWriter::create(&output_dir, algorithm.index(), alphabet_size))
            .collect::<Result<Vec<_>>>()?;

        for &word_length in &args.word_lengths {
            let words = generate::random_words(
                &mut rng,
                args.word_list_length,
                word_length,
                alphabet_size,
            )?;

            for (algorithm, writer) in algorithms.iter().zip(writers.iter_mut()) {
                pb.set_message(format!("{algorithm}/{alphabet_size}/{word_length}"));
                warm_up(*algorithm, &mut haystack, &words, args.num_warmup_repeats)?;
                let average_time = measure_average_ms(*algorithm, &mut haystack, &words)?;
                debug!(
                    "{algorithm}: alphabet_size={alphabet_size}, word_length={word_length}, average_time={average_time:.6}"
                );

                writer.write(&BenchmarkRecord {
                    alphabet_size,
                    word_length,
                    average_time,
                })?;
                pb.inc(1);
            }
        }

        for writer in writers {
            result_paths.push(writer.finish()?);
        }
    }
    pb.finish_and_clear();

    info!(
        "wrote {} result files to {}",
        result_paths.len(),
        output_dir.display()
    );

    Ok(result_paths)
}

/// Generates one text and one word list, stores them next to the results,
/// and prints the average search time of every algorithm over them.
pub fn demo(args: &DemoArgs) -> Result<Vec<(SearchAlgorithm, f64)>> {
    let output_dir = output_dir(args.output_dir.as_deref());
    fs::create_dir_all(&output_dir).map_err(|e| {
        let reason = format!(
            "error creating directory (path={}, error={e:?})",
            output_dir.display()
        );
        error!("{reason}");
        anyhow::anyhow!(reason)
    })?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let text_path = output_dir.join("demo-text.txt");
    let words_path = output_dir.join("demo-words.txt");
    generate::write_text(
        &text_path,
        &generate::random_text(&mut rng, args.text_length, args.alphabet_size)?,
    )?;
    generate::write_word_list(
        &words_path,
        &generate::random_words(
            &mut rng,
            args.word_list_length,
            args.word_length,
            args.alphabet_size,
        )?,
    )?;
    info!(
        "generated demo inputs at: {} and {}",
        text_path.display(),
        words_path.display()
    );

    let mut haystack = Haystack::from(generate::read_text(&text_path)?);
    let words = generate::read_word_list(&words_path)?;

    let mut averages = Vec::new();
    for algorithm in SearchAlgorithm::iter_variants() {
        let average_time = measure_average_ms(*algorithm, &mut haystack, &words)?;
        println!(
            "{:>2} {:<36} {average_time:.6} ms",
            algorithm.index(),
            algorithm.title()
        );
        averages.push((*algorithm, average_time));
    }

    Ok(averages)
}
