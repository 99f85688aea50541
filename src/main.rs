use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use pagerank_corpus::{
    crawl::crawl,
    page_rank::{iterated, sampled, PageRank, PageRankResult, DEFAULT_DAMPING, DEFAULT_SAMPLES},
    report::{format_ranks, write_csv, Comparison},
    topic::{parse_prefixes, topic_teleport},
    uniform_distribution, Corpus, Distribution,
};
use std::{fs::File, io::BufWriter, path::PathBuf};

/// Compute PageRank for a corpus of HTML files.
#[derive(Parser, Debug)]
#[command(name = "pagerank", version)]
struct Args {
    /// Directory containing the corpus HTML files
    corpus: PathBuf,

    /// Output CSV file to save ranks (page,sampling_rank,iterate_rank)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Compare Sampling vs Iteration ranks and show differences
    #[arg(long)]
    compare: bool,

    /// When using --compare, only show pages with abs(sampling-iterate) >= threshold
    #[arg(long, default_value_t = 0.0)]
    diff_threshold: f64,

    /// Comma-separated prefixes to build a personalized teleport vector (case-insensitive)
    #[arg(long)]
    topic_prefix: Option<String>,

    /// Probability of following a link rather than jumping
    #[arg(long, default_value_t = DEFAULT_DAMPING)]
    damping: f64,

    /// Number of steps of the random-surfer walk
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Seed of the random-surfer walk
    #[arg(long)]
    seed: Option<u64>,

    /// Give up iterating after this many rounds
    #[arg(long)]
    max_iterations: Option<usize>,
}

fn estimate<P: PageRank>(
    corpus: &Corpus,
    estimator: &P,
    start: &Distribution,
    label: &str,
) -> Result<Distribution> {
    let res = estimator.calc(start)?;
    log::debug!("{label} estimate:\n{:?}", res.debug(corpus));
    Ok(res.page_rank().clone())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
    let args = Args::parse();

    let corpus = crawl(&args.corpus)
        .with_context(|| format!("reading corpus {}", args.corpus.display()))?;
    let start = uniform_distribution(&corpus);

    let spr = sampled::SampledPageRank::new(
        &corpus,
        &sampled::Config {
            damping: args.damping,
            samples: args.samples,
            seed: args.seed,
        },
    )?;
    let sampling_ranks = estimate(&corpus, &spr, &start, "sampling")?;
    print!(
        "{}",
        format_ranks(
            &format!("PageRank Results from Sampling (n = {})", args.samples),
            &sampling_ranks
        )
    );

    let iterated_config = iterated::Config {
        damping: args.damping,
        max_iterations: args.max_iterations,
        ..iterated::Config::default()
    };
    let ipr = iterated::IteratedPageRank::new(&corpus, &iterated_config)?;
    let iterate_ranks = estimate(&corpus, &ipr, &start, "iteration")?;
    print!(
        "{}",
        format_ranks("PageRank Results from Iteration", &iterate_ranks)
    );

    if let Some(path) = args.csv.as_ref() {
        let file = File::create(path)
            .with_context(|| format!("creating CSV file {}", path.display()))?;
        write_csv(
            BufWriter::new(file),
            corpus.pages(),
            &sampling_ranks,
            &iterate_ranks,
        )
        .with_context(|| format!("writing CSV file {}", path.display()))?;
        println!("Ranks written to CSV: {}", path.display());
    }

    if args.compare {
        println!("\nComparison: Sampling vs Iteration");
        let cmp = Comparison::new(
            corpus.pages(),
            &sampling_ranks,
            &iterate_ranks,
            args.diff_threshold,
        );
        println!("{cmp}");
    }

    if let Some(raw) = args.topic_prefix.as_deref() {
        let prefixes = parse_prefixes(raw);
        let (ranks, note) = match topic_teleport(&corpus, &prefixes) {
            Some(t) => (
                estimate(&corpus, &ipr.with_teleport(&t)?, &start, "personalized")?,
                "",
            ),
            None => (
                iterate_ranks.clone(),
                " (no page matched; teleporting uniformly)",
            ),
        };
        print!(
            "{}",
            format_ranks(
                &format!("Personalized PageRank (prefixes: {raw}){note}"),
                &ranks
            )
        );
    }

    Ok(())
}
