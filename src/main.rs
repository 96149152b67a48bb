//main.rs
use anyhow::Context;
use clap::{Parser, ValueEnum};
use overkmeans::{Chebyshev, DataSet, Euclidean, KMeans, Manhattan, RandomPartition, SquaredEuclidean};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    SquaredEuclidean,
    Euclidean,
    Manhattan,
    Chebyshev,
}

#[derive(Parser)]
#[clap(version = "0.3.0", author = "Stefan L. <stefan.lang@med.lu.se>")]
struct Opts {
    #[clap(short, long)]
    file: String,

    #[clap(short, long)]
    k: usize,

    #[clap(short, long)]
    outfile: String,

    /// 0 iterates until the assignments stop changing
    #[clap(long, default_value_t = 1000)]
    max_iterations: usize,

    #[clap(long, default_value_t = 1.0)]
    overclustering: f64,

    #[clap(long, value_enum, default_value_t = MetricArg::SquaredEuclidean)]
    metric: MetricArg,

    /// Use the ball tree accelerated iterations
    #[clap(long)]
    fast: bool,

    #[clap(long)]
    seed: Option<u64>,

    /// Cluster on the first N columns only
    #[clap(long)]
    columns: Option<usize>,

    #[clap(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let level = if opts.verbose { "overkmeans=debug" } else { "overkmeans=info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    let ds = DataSet::from_tsv(&opts.file).with_context(|| format!("loading {}", opts.file))?;
    println!(
        "Loaded {} rows × {} columns",
        ds.data.nrows(),
        ds.data.ncols()
    );

    let mut kmeans = KMeans::new()
        .with_max_iterations(opts.max_iterations)
        .with_overclustering_factor(opts.overclustering)
        .with_partitioner(RandomPartition { seed: opts.seed });
    match opts.metric {
        MetricArg::SquaredEuclidean => kmeans.set_metric(SquaredEuclidean),
        MetricArg::Euclidean => kmeans.set_metric(Euclidean),
        MetricArg::Manhattan => kmeans.set_metric(Manhattan),
        MetricArg::Chebyshev => kmeans.set_metric(Chebyshev),
    }

    let data = match opts.columns {
        Some(n) => ds.numeric_view(n),
        None => ds.data.clone(),
    };

    let mut clusters = Vec::new();
    let report = if opts.fast {
        kmeans.fast_cluster(data.view(), opts.k, &mut clusters)?
    } else {
        kmeans.cluster(data.view(), opts.k, &mut clusters)?
    };
    println!(
        "Assigned {} points into {} clusters ({} iterations, converged: {})",
        clusters.len(),
        opts.k,
        report.iterations,
        report.converged
    );

    std::fs::write(&opts.outfile, clusters.iter().map(|c| c.to_string()).collect::<Vec<_>>().join("\n"))
        .with_context(|| format!("writing {}", opts.outfile))?;

    Ok(())
}
