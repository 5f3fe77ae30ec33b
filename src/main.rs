use clap::Parser;
use l2kernel::{
    error::{KernelError, Result},
    fs::{load_vectors_npy, peek_npy_dim},
    numerics::{ACTIVE_BACKEND, Backend, reference::sq_euclidean_scalar, sq_euclidean},
    statistics::Stats,
    workload::Workload,
};
use serde::Serialize;
use std::{
    hint::black_box,
    path::PathBuf,
    process::ExitCode,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Instant,
};
use tqdm::tqdm;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Throughput and accuracy sweep for the squared L2 kernel
#[derive(Parser, Debug)]
#[command(name = "l2kernel")]
#[command(about = "Throughput and accuracy sweep for the squared L2 kernel", long_about = None)]
struct Args {
    /// Dimensions to sweep (comma-separated list, e.g., "16,100,768")
    #[arg(short, long, value_delimiter = ',', default_value = "128")]
    dims: Vec<usize>,

    /// Number of vectors in each generated workload
    #[arg(short, long, default_value_t = 4096)]
    vectors: usize,

    /// How many times every pair is measured in the timed phase
    #[arg(short, long, default_value_t = 64)]
    rounds: usize,

    /// Seed for the generated vectors
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of threads to use (comma-separated list, e.g., "1,2,4,8")
    #[arg(short, long, value_delimiter = ',', default_value = "1")]
    threads: Vec<usize>,

    /// Floats between the start of the allocation and the first vector
    #[arg(long, default_value_t = 1)]
    offset: usize,

    /// Stored vectors (numpy format) to use instead of generated ones. Their dimension replaces --dims
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print one JSON report per job on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JobReport {
    dim: usize,
    threads: usize,
    backend: Backend,
    vectors: usize,
    rounds: usize,
    elapsed_secs: f64,
    pairs_per_sec: f64,
    gflops: f64,
    stats: Stats,
}

const BATCH_SIZE: usize = 256;

/// Every dimension the binary carries a kernel for.
macro_rules! dispatch_dim {
    ($dim:expr, $args:expr; $($d:literal),+ $(,)?) => {
        match $dim {
            $($d => run_dim::<$d>($args),)+
            other => Err(KernelError::UnsupportedDimension(other)),
        }
    };
}

fn run_for_dim(dim: usize, args: &Args) -> Result<Vec<JobReport>> {
    dispatch_dim!(
        dim, args;
        1, 2, 3, 4, 5, 7, 8, 9, 12, 15, 16, 17, 31, 32, 33,
        64, 96, 100, 128, 384, 768, 960, 1024,
    )
}

/// Builds the workload for `DIM` once, then runs every thread count on it.
fn run_dim<const DIM: usize>(args: &Args) -> Result<Vec<JobReport>> {
    let workload = Arc::new(prepare_workload::<DIM>(args)?);
    Ok(run_sweep(&workload, args))
}

fn prepare_workload<const DIM: usize>(args: &Args) -> Result<Workload<DIM>> {
    let workload = match &args.input {
        Some(path) => Workload::from_vectors(&load_vectors_npy::<DIM>(path)?, args.offset),
        None => Workload::gaussian(args.vectors, args.offset, args.seed),
    };
    if workload.is_empty() {
        return Err(KernelError::Shape(vec![0, DIM as u64]));
    }
    Ok(workload)
}

fn run_sweep<const DIM: usize>(workload: &Arc<Workload<DIM>>, args: &Args) -> Vec<JobReport> {
    args.threads
        .iter()
        .filter_map(|&threads| {
            if threads == 0 {
                warn!(dim = DIM, "skipping job with zero threads");
                return None;
            }
            Some(run_job(workload, threads, args.rounds))
        })
        .collect()
}

fn run_job<const DIM: usize>(
    workload: &Arc<Workload<DIM>>,
    num_threads: usize,
    rounds: usize,
) -> JobReport {
    let num_pairs = workload.len();

    info!(dim = DIM, threads = num_threads, pairs = num_pairs, rounds, "starting job");

    // timed phase: the kernel alone
    let start_time = Instant::now();
    let next_batch = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..num_threads)
        .map(|_thread_id| {
            let workload = Arc::clone(workload);
            let next_batch = Arc::clone(&next_batch);

            thread::spawn(move || {
                let mut checksum = 0.0f64;
                loop {
                    let batch_start = next_batch.fetch_add(BATCH_SIZE, Ordering::Relaxed);
                    if batch_start >= num_pairs {
                        break;
                    }
                    let batch_end = std::cmp::min(batch_start + BATCH_SIZE, num_pairs);

                    for i in batch_start..batch_end {
                        let (x, y) = workload.pair(i);
                        for _ in 0..rounds {
                            let d = unsafe {
                                sq_euclidean::<DIM>(
                                    black_box(workload.as_ptr(x)),
                                    black_box(workload.as_ptr(y)),
                                )
                            };
                            checksum += black_box(d) as f64;
                        }
                    }
                }
                checksum
            })
        })
        .collect();

    let mut checksum = 0.0;
    for handle in handles {
        checksum += handle.join().expect("Thread panicked");
    }
    let elapsed = start_time.elapsed().as_secs_f64();
    black_box(checksum);

    // verification phase: one kernel call per pair against the scalar reference
    let mut stats = Stats::new();
    for i in 0..num_pairs {
        let (x, y) = workload.pair(i);
        let (a, b) = (workload.vector(x), workload.vector(y));
        let kernel = unsafe { sq_euclidean::<DIM>(a.as_ptr(), b.as_ptr()) };
        stats.record(kernel, sq_euclidean_scalar(a, b), DIM);
    }

    let evaluations = (num_pairs * rounds) as f64;
    let pairs_per_sec = evaluations / elapsed;
    // sub, mul, add per element
    let gflops = pairs_per_sec * (3 * DIM) as f64 / 1e9;

    JobReport {
        dim: DIM,
        threads: num_threads,
        backend: ACTIVE_BACKEND,
        vectors: num_pairs,
        rounds,
        elapsed_secs: elapsed,
        pairs_per_sec,
        gflops,
        stats,
    }
}

fn log_report(report: &JobReport) {
    info!(
        dim = report.dim,
        threads = report.threads,
        "{:.2}M dists/s ({:.2} GFLOP/s) in {:.3}s",
        report.pairs_per_sec / 1e6,
        report.gflops,
        report.elapsed_secs
    );
    info!(
        "  accuracy: {}/{} pairs off tolerance, max abs err {:e}, max rel err {:e}",
        report.stats.get_mismatches(),
        report.stats.get_pairs(),
        report.stats.get_max_abs_error(),
        report.stats.get_max_rel_error()
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let dims = match &args.input {
        Some(path) => match peek_npy_dim(path) {
            Ok(dim) => vec![dim],
            Err(e) => {
                error!("cannot read {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => args.dims.clone(),
    };

    info!(backend = ACTIVE_BACKEND.name(), "kernel backend");
    info!("  Dims: {:?}", dims);
    info!("  Threads: {:?}", args.threads);

    let dims: Box<dyn Iterator<Item = usize>> = if args.json {
        Box::new(dims.into_iter())
    } else {
        Box::new(tqdm(dims.into_iter()))
    };

    let mut failed = false;
    for dim in dims {
        match run_for_dim(dim, &args) {
            Ok(reports) => {
                for report in reports {
                    failed |= report.stats.get_mismatches() > 0;
                    if args.json {
                        match serde_json::to_string(&report) {
                            Ok(line) => println!("{line}"),
                            Err(e) => error!("cannot serialize report: {e}"),
                        }
                    } else {
                        log_report(&report);
                    }
                }
            }
            Err(e) => {
                error!(dim, "job failed: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
