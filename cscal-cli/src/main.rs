use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cscal::{Complex32, DataType, Memory, MemoryConfigBuilder, Module, PAGE_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// cscal - scale a complex single-precision vector held in linear memory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "cscal")]
struct Cli {
    /// Number of complex elements to scale
    #[arg(short = 'n', long = "len", default_value_t = 5)]
    len: usize,

    /// Step between logical elements, in complex elements
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    stride: isize,

    /// Index of the first logical element, in complex elements
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Pages (64 KiB each) allocated up front
    #[arg(long, default_value_t = 10)]
    initial_pages: u32,

    /// Upper bound on pages if the vector does not fit
    #[arg(long, default_value_t = 100)]
    maximum_pages: u32,

    /// Lower bound of the discrete uniform fill
    #[arg(long, default_value_t = -10, allow_negative_numbers = true)]
    low: i32,

    /// Upper bound of the discrete uniform fill
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    high: i32,

    /// Fixed scalar as "re,im" (drawn at random if not given)
    #[arg(long, value_parser = parse_complex, allow_hyphen_values = true)]
    alpha: Option<Complex32>,

    /// Seed for reproducible fills
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON report instead of the plain listing
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Result of one scaling run
#[derive(Debug, Serialize)]
struct Report {
    n: usize,
    stride: isize,
    offset: usize,
    alpha: [f32; 2],
    memory_pages: u32,
    before: Vec<f32>,
    after: Vec<f32>,
}

/// Parse "re,im" into a complex scalar
fn parse_complex(s: &str) -> std::result::Result<Complex32, String> {
    let (re, im) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"re,im\", got \"{s}\""))?;
    let re: f32 = re
        .trim()
        .parse()
        .map_err(|e| format!("invalid real part \"{re}\": {e}"))?;
    let im: f32 = im
        .trim()
        .parse()
        .map_err(|e| format!("invalid imaginary part \"{im}\": {e}"))?;
    Ok(Complex32::new(re, im))
}

/// Complex elements that must exist after the vector pointer for the access pattern
fn vector_capacity(n: usize, stride: isize, offset: usize) -> Result<usize> {
    if n == 0 {
        return Ok(0);
    }
    (n - 1)
        .checked_mul(stride.unsigned_abs())
        .and_then(|span| span.checked_add(offset))
        .and_then(|last| last.checked_add(1))
        .ok_or_else(|| anyhow!("vector of {n} elements with stride {stride} is too large"))
}

fn run(args: &Cli) -> Result<Report> {
    if args.low > args.high {
        return Err(anyhow!(
            "fill range is empty: low {} > high {}",
            args.low,
            args.high
        ));
    }

    let config = MemoryConfigBuilder::default()
        .initial(args.initial_pages)
        .maximum(args.maximum_pages)
        .build()?;
    let mut module = Module::new(Memory::new(config)?);
    module.initialize()?;

    // x at the start of memory, the scalar right after the vector
    let capacity = vector_capacity(args.len, args.stride, args.offset)?;
    let too_large = || anyhow!("vector of {capacity} complex elements is too large");
    let n_floats = capacity.checked_mul(2).ok_or_else(too_large)?;
    let x_ptr = 0;
    let z_ptr = capacity
        .checked_mul(DataType::Complex64.bytes_per_element())
        .ok_or_else(too_large)?;
    let required = z_ptr
        .checked_add(DataType::Complex64.bytes_per_element())
        .ok_or_else(too_large)?;

    let memory = module.memory_mut();
    if required > memory.byte_length() {
        let pages = u32::try_from(required.div_ceil(PAGE_SIZE))
            .context("vector does not fit in the configured memory")?;
        let delta = pages.saturating_sub(memory.pages());
        info!(delta, "growing memory to fit the vector");
        memory
            .grow(delta)
            .context("vector does not fit in the configured memory")?;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let (low, high) = (args.low, args.high);
    memory
        .view_mut(x_ptr, n_floats)?
        .fill_with(|| rng.random_range(low..=high) as f32);
    let alpha = args.alpha.unwrap_or_else(|| {
        Complex32::new(
            rng.random_range(low..=high) as f32,
            rng.random_range(low..=high) as f32,
        )
    });
    memory.write_f32s(z_ptr, &[alpha.re, alpha.im])?;
    let before = memory.read_f32s(x_ptr, n_floats)?;

    debug!(
        n = args.len,
        stride = args.stride,
        offset = args.offset,
        x_ptr,
        z_ptr,
        "scaling"
    );
    module.ndarray(args.len, z_ptr, x_ptr, args.stride, args.offset)?;

    Ok(Report {
        n: args.len,
        stride: args.stride,
        offset: args.offset,
        alpha: [alpha.re, alpha.im],
        memory_pages: module.memory().pages(),
        before,
        after: module.memory().read_f32s(x_ptr, n_floats)?,
    })
}

fn format_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing subscriber with environment filter
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let report = run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("z = ({}, {})", report.alpha[0], report.alpha[1]);
        println!("x[:] = [{}]", format_floats(&report.after));
    }
    Ok(())
}
