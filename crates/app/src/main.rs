use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use backend::BackendConfig;
use career_core::model::UserId;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, NewUser, ProgressService, QuizService, RoadmapService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidUserId { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw:?}"),
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

struct DesktopApp {
    services: AppServices,
    link_opener: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn user_id(&self) -> UserId {
        self.services.user_id().clone()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn roadmaps(&self) -> Arc<RoadmapService> {
        self.services.roadmaps()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

struct Args {
    backend: BackendConfig,
    user_id: Option<UserId>,
    profile: NewUser,
    offline_demo: bool,
    shuffle: bool,
    verbose: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [options]");
    eprintln!("  cargo run -p app -- status [options]  # print level and points, then exit");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url <url>         backend base url (default http://localhost:8001/api)");
    eprintln!("  --timeout-secs <n>      HTTP timeout in seconds (default 15)");
    eprintln!("  --user-id <id>          reuse an existing backend user");
    eprintln!("  --name <name>           name used when a user has to be created");
    eprintln!("  --email <email>         email used when a user has to be created");
    eprintln!("  --offline-demo          use the built-in sample data instead of the backend");
    eprintln!("  --shuffle               shuffle quiz questions");
    eprintln!("  --verbose               debug logging (RUST_LOG overrides)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CAREER_API_URL, CAREER_HTTP_TIMEOUT_SECS, CAREER_USER_ID,");
    eprintln!("  CAREER_USER_NAME, CAREER_USER_EMAIL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Status,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend = BackendConfig::from_env();
        let mut user_id = std::env::var("CAREER_USER_ID")
            .ok()
            .and_then(|value| value.parse::<UserId>().ok());
        let mut profile = NewUser::default();
        if let Ok(name) = std::env::var("CAREER_USER_NAME") {
            profile.name = name;
        }
        if let Ok(email) = std::env::var("CAREER_USER_EMAIL") {
            profile.email = email;
        }
        let mut offline_demo = false;
        let mut shuffle = false;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if !(value.starts_with("http://") || value.starts_with("https://")) {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    backend = BackendConfig::new(value).with_timeout(backend.timeout);
                }
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    let secs: u64 = value
                        .parse()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or_else(|| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    backend = backend.with_timeout(Duration::from_secs(secs));
                }
                "--user-id" => {
                    let value = require_value(args, "--user-id")?;
                    let parsed = value
                        .parse::<UserId>()
                        .map_err(|_| ArgsError::InvalidUserId { raw: value.clone() })?;
                    user_id = Some(parsed);
                }
                "--name" => profile.name = require_value(args, "--name")?,
                "--email" => profile.email = require_value(args, "--email")?,
                "--offline-demo" => offline_demo = true,
                "--shuffle" => shuffle = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            backend,
            user_id,
            profile,
            offline_demo,
            shuffle,
            verbose,
        })
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

async fn build_services(args: &Args) -> Result<AppServices, Box<dyn std::error::Error>> {
    let services = if args.offline_demo {
        info!("using built-in sample data");
        AppServices::in_memory(&args.profile).await?
    } else {
        info!(api = %args.backend.base_url, "connecting to career backend");
        AppServices::http(&args.backend, args.user_id.clone(), &args.profile).await?
    };
    Ok(services.with_shuffle(args.shuffle))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(parsed.verbose);
    let services = build_services(&parsed).await?;
    info!(user = %services.user_id(), "user ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                link_opener: Arc::new(DesktopLinkOpener),
            });
            let context = build_app_context(&app);

            // Some dev setups default the window to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Career Quest")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => {
            let dashboard = services.progress().dashboard(services.user_id()).await?;
            let status = &dashboard.status;
            println!("{} ({})", dashboard.user.name, dashboard.user.id);
            println!(
                "Level {} {}: {} points",
                status.tier.level, status.tier.title, status.total_points
            );
            match (&status.next_tier, status.points_to_next) {
                (Some(next), Some(points)) => println!("{points} points to {}", next.title),
                _ => println!("Max level reached"),
            }
            let badges: Vec<&str> = dashboard.badges().collect();
            if !badges.is_empty() {
                println!("Badges: {}", badges.join(", "));
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
