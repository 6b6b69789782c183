//! Binary entrypoint for the terminal slideshow.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use shuffle_slideshow::config::Configuration;
use shuffle_slideshow::slideshow::{Action, SlideshowState};
use shuffle_slideshow::tasks::controller::{self, ControllerOptions};
use shuffle_slideshow::tasks::{input, presenter};
use shuffle_slideshow::{display, scan};
use tokio::io::BufReader;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(
    name = "slideshow",
    version,
    about = "Timed, shuffled slideshow of a photo directory"
)]
struct Args {
    /// Photo directory (overrides photo-library-path)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Path to YAML config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Deterministic RNG seed for the start shuffle
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Keep slides in path order instead of shuffling
    #[arg(long)]
    no_shuffle: bool,
    /// Start the show as soon as images are loaded
    #[arg(long)]
    autostart: bool,
    /// Print the order a start would produce without running the show
    #[arg(long)]
    dry_run: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(format!("shuffle_slideshow={level}").parse()?)
        .add_directive(format!("slideshow={level}").parse()?);
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    Ok(())
}

fn load_configuration(args: &Args) -> Result<Configuration> {
    let mut cfg = match &args.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(dir) = &args.dir {
        cfg.photo_library_path = dir.clone();
    }
    if args.seed.is_some() {
        cfg.shuffle_seed = args.seed;
    }
    if args.no_shuffle {
        cfg.shuffle = false;
    }
    if args.autostart {
        cfg.autostart = true;
    }
    cfg.validated().context("invalid configuration values")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let cfg = load_configuration(&args)?;
    tracing::debug!("configuration:\n{:#?}", cfg);

    let images = scan::scan_images(&cfg.photo_library_path, &cfg.scan_options())
        .with_context(|| format!("failed to scan {}", cfg.photo_library_path.display()))?;
    info!(
        count = images.len(),
        root = %cfg.photo_library_path.display(),
        "scanned images"
    );
    if images.is_empty() {
        warn!("no images found; the show cannot start");
    }

    let initial = cfg.initial_state(images)?;

    if args.dry_run {
        run_dry_run(&cfg, initial);
        return Ok(());
    }

    let (action_tx, action_rx) = mpsc::channel::<Action>(32); // Input -> Controller
    let (state_tx, state_rx) = watch::channel(initial); // Controller -> Presenter/Input

    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    // Controller
    tasks.spawn({
        let cancel = cancel.clone();
        let options = ControllerOptions {
            tick_interval: cfg.tick_interval,
            order: cfg.slide_order(),
        };
        async move {
            controller::run(action_rx, state_tx, options, cancel)
                .await
                .context("controller task failed")
        }
    });

    // Presenter
    tasks.spawn({
        let cancel = cancel.clone();
        let updates = state_rx.clone();
        async move {
            presenter::run(updates, tokio::io::stdout(), cancel)
                .await
                .context("presenter task failed")
        }
    });

    if cfg.autostart {
        action_tx
            .send(Action::Start)
            .await
            .context("controller stopped before autostart")?;
    } else {
        info!("{}", input::HELP);
    }

    // Input (`quit` cancels the pipeline). A terminal's Ctrl-D ends the show;
    // a piped script runs detached and the show outlives its end of input.
    let _idle_sender = action_tx.clone();
    let input = {
        let cancel = cancel.clone();
        async move {
            input::run(BufReader::new(tokio::io::stdin()), action_tx, state_rx, cancel)
                .await
                .context("input task failed")
        }
    };
    if std::io::stdin().is_terminal() {
        tasks.spawn(input);
    } else {
        tracing::debug!("stdin is not a terminal; reading piped commands");
        tokio::spawn(async move {
            if let Err(err) = input.await {
                warn!("{err:#}");
            }
        });
    }

    // The first task to finish ends the show.
    if let Some(res) = tasks.join_next().await {
        log_task_result(res);
    }
    cancel.cancel();

    while let Some(res) = tasks.join_next().await {
        log_task_result(res);
    }

    Ok(())
}

fn log_task_result(res: Result<Result<()>, tokio::task::JoinError>) {
    match res {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("task error: {e:?}"),
        Err(e) => tracing::error!("join error: {e}"),
    }
}

fn run_dry_run(cfg: &Configuration, initial: SlideshowState) {
    println!(
        "# slideshow dry run\n# photos: {}\n# shuffle: {}\n# seed: {}\n",
        initial.len(),
        cfg.shuffle,
        cfg.shuffle_seed
            .map_or_else(|| "(random)".to_string(), |s| s.to_string())
    );

    let mut order = cfg.slide_order();
    let started = initial.apply(Action::Start, &mut order);
    if !started.is_started() {
        println!(
            "(no photos discovered under {})",
            cfg.photo_library_path.display()
        );
        return;
    }

    let total: u64 = started
        .slides()
        .iter()
        .map(|s| u64::from(s.duration.as_secs()))
        .sum();
    println!("# planned order:");
    for line in display::slide_listing(&started) {
        println!("{line}");
    }
    println!(
        "\n# total running time: {}",
        humantime::format_duration(std::time::Duration::from_secs(total))
    );
}
