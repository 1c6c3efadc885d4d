use bzip2::read::BzDecoder;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, LevelFilter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use kpop_name_parser::batch::{process_line, BatchContext, Mode};
use kpop_name_parser::names::SplitOptions;
use kpop_name_parser::terms::init_terms;
use kpop_name_parser::wiki::ArtistContext;

mod parallel;
use parallel::{process_batch_parallel, write_record, ParallelConfig};

/// Processing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// One line at a time
    Sequential,
    /// Batches of lines split across a thread pool
    BatchParallel,
}

#[derive(Parser)]
#[command(name = "kpop-name-parser")]
#[command(about = "Parse bilingual K-pop names, titles and track lists - outputs one JSON record per input line")]
struct Args {
    /// Input text file, one entry per line (.txt or .txt.bz2; `-` for stdin)
    input: PathBuf,

    /// Output JSONL file (`-` for stdout)
    output: PathBuf,

    /// What each input line contains
    #[arg(short, long, value_enum, default_value_t = Mode::Name)]
    mode: Mode,

    /// Processing strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::BatchParallel)]
    strategy: Strategy,

    /// Number of threads (0 = auto-detect)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Lines per batch for batch-parallel strategy
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Limit number of records to write (for testing)
    #[arg(long)]
    limit: Option<usize>,

    /// Path to a term schema YAML file replacing the built-in one
    #[arg(long)]
    schema: Option<PathBuf>,

    /// English name of the artist whose discography is being parsed
    #[arg(long, default_value = "")]
    artist: String,

    /// Native name of that artist
    #[arg(long, default_value = "")]
    artist_native: String,

    /// Wiki page of that artist
    #[arg(long)]
    artist_uri: Option<String>,

    /// Discography section type, e.g. `mini_albums` or `singles_2`
    #[arg(long)]
    album_type: Option<String>,

    /// Accept same-script name pairs when splitting names
    #[arg(long)]
    permissive: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Default)]
pub struct Stats {
    pub lines_processed: usize,
    pub parsed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub records_written: usize,
    pub elapsed: Duration,
}

impl Stats {
    pub fn progress_message(&self, start_time: Instant) -> String {
        let rate = self.lines_processed as f64 / start_time.elapsed().as_secs_f64().max(1e-9);
        format!(
            "Lines: {} | Parsed: {} | Failed: {} | Rate: {:.0} lines/s",
            self.lines_processed, self.parsed, self.failed, rate
        )
    }
}

fn print_stats(stats: &Stats, strategy_name: &str, mode: Mode) {
    eprintln!();
    eprintln!("============================================================");
    eprintln!("Strategy: {}", strategy_name);
    eprintln!("Mode: {:?}", mode);
    eprintln!("Lines processed: {}", stats.lines_processed);
    eprintln!("Parsed: {}", stats.parsed);
    eprintln!("Failed: {}", stats.failed);
    eprintln!("Blank lines skipped: {}", stats.skipped);
    eprintln!("Records written: {}", stats.records_written);
    eprintln!("------------------------------------------------------------");
    eprintln!(
        "Success rate: {:.1}%",
        100.0 * stats.parsed as f64 / stats.lines_processed.max(1) as f64
    );
    eprintln!("Time: {}m {}s", stats.elapsed.as_secs() / 60, stats.elapsed.as_secs() % 60);
    eprintln!(
        "Rate: {:.0} lines/sec",
        stats.lines_processed as f64 / stats.elapsed.as_secs_f64().max(1e-9)
    );
    eprintln!("============================================================");
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    let mut clog = colog::default_builder();
    clog.filter(None, level);
    clog.init();
}

fn open_input(path: &PathBuf) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)?;
    Ok(if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    })
}

fn open_output(path: &PathBuf) -> io::Result<BufWriter<Box<dyn Write>>> {
    let out: Box<dyn Write> = if path.as_os_str() == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(File::create(path)?)
    };
    Ok(BufWriter::with_capacity(256 * 1024, out))
}

/// Run sequential processing
fn run_sequential<W: Write>(
    reader: impl BufRead,
    writer: &mut BufWriter<W>,
    ctx: &BatchContext,
    limit: Option<usize>,
    pb: &ProgressBar,
) -> io::Result<Stats> {
    let start_time = Instant::now();
    let mut stats = Stats::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            stats.skipped += 1;
            continue;
        }
        let record = process_line(ctx, i + 1, &line);
        if write_record(writer, &mut stats, &record, limit)? {
            break;
        }
        if stats.lines_processed % 1000 == 0 {
            pb.set_message(stats.progress_message(start_time));
        }
    }

    writer.flush()?;
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    // Install the term schema before any worker touches it
    if let Err(e) = init_terms(args.schema.as_deref()) {
        error!("Error loading term schema: {}", e);
        std::process::exit(1);
    }

    let mut ctx = BatchContext::new(args.mode);
    ctx.split = SplitOptions {
        permissive: args.permissive,
        ..SplitOptions::default()
    };
    ctx.artist = ArtistContext {
        english_name: args.artist.clone(),
        native_name: args.artist_native.clone(),
        uri_path: args.artist_uri.clone(),
    };
    ctx.album_type = args.album_type.clone();

    let mut config = ParallelConfig::default();
    if args.threads > 0 {
        config.num_threads = args.threads;
    }
    config.batch_size = args.batch_size.max(1);

    info!("Parsing: {}", args.input.display());
    info!("Output: {}", args.output.display());
    info!("Mode: {:?} | Strategy: {:?}", args.mode, args.strategy);

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap()
        );
        pb
    };

    let reader = open_input(&args.input)?;
    let mut writer = open_output(&args.output)?;
    let stats = match args.strategy {
        Strategy::Sequential => run_sequential(reader, &mut writer, &ctx, args.limit, &pb)?,
        Strategy::BatchParallel => {
            process_batch_parallel(reader, &mut writer, &ctx, &config, args.limit, &pb)?
        }
    };
    pb.finish_and_clear();

    if !args.quiet {
        print_stats(&stats, &format!("{:?}", args.strategy), args.mode);
    }

    Ok(())
}
