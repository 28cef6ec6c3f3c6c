use std::fmt;
use std::time::Duration;

use backend::repository::{QuizBackend, RoadmapBackend};
use backend::{BackendConfig, HttpBackend};

#[derive(Debug, Clone)]
struct Args {
    config: BackendConfig,
    skip_health: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut config = BackendConfig::from_env();
        let mut skip_health = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(&mut args, "--api-url")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    config = BackendConfig::new(value).with_timeout(config.timeout);
                }
                "--timeout-secs" => {
                    let value = require_value(&mut args, "--timeout-secs")?;
                    let secs = value
                        .parse::<u64>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or_else(|| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    config = config.with_timeout(Duration::from_secs(secs));
                }
                "--skip-health" => skip_health = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            config,
            skip_health,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p backend --bin init-data -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url <url>           Backend base URL (default: http://localhost:8001/api)");
    eprintln!("  --timeout-secs <n>        HTTP timeout in seconds (default: 15)");
    eprintln!("  --skip-health             Do not ping the API root first");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  CAREER_API_URL, CAREER_HTTP_TIMEOUT_SECS");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let client = HttpBackend::new(&args.config)?;
    if !args.skip_health {
        let message = client.health().await?;
        println!("API: {message}");
    }

    let message = client.init_data().await?;
    let questions = client.load_questions().await?;
    let roadmaps = client.list_roadmaps().await?;

    println!(
        "{message}: {} quiz questions and {} roadmaps available at {}",
        questions.len(),
        roadmaps.len(),
        args.config.base_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
