use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use widget_studio::{bundle, widgets, Shell, SharedSession, StudioSettings, TickDriver};
use widget_studio_core::{global_registry, Session};

/// widget-studio - An interactive studio for small configurable widgets
#[derive(Parser, Debug, Clone)]
#[command(name = "widget-studio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Widget bundle to load at startup (repeat for several bundles)
    #[arg(short = 'b', long = "bundle", value_name = "FILE")]
    bundle: Vec<PathBuf>,

    /// Debug verbosity level (-d=info, -dd=debug, -ddd=trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    debug: u8,

    /// Run commands from a script file instead of stdin
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the effective settings back to disk before starting
    #[arg(long = "save-settings")]
    save_settings: bool,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Settings are needed before the logger exists (they carry the default
    // filter), so hold any load error until logging is up.
    let (settings, settings_error) = match StudioSettings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (StudioSettings::default(), Some(e)),
    };

    // Initialize logger with verbosity based on -d/--debug flag
    // Level 0 (default): the configured filter, warn unless changed
    // Level 1: info (normal verbosity)
    // Level 2: debug (detailed)
    // Level 3+: trace (very detailed)
    let log_level = match cli.debug {
        0 => settings.log_filter.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting widget-studio v{}", env!("CARGO_PKG_VERSION"));

    if let Some(e) = settings_error {
        warn!("Failed to load settings, using defaults: {}", e);
    }

    // Register all built-in widgets
    let registry = global_registry();
    widgets::register_all(&registry).context("Failed to register built-in widgets")?;

    // Bundles on the command line replace the configured list
    let bundles = if cli.bundle.is_empty() {
        settings.bundles.clone()
    } else {
        cli.bundle.clone()
    };

    if cli.save_settings {
        let mut merged = settings.clone();
        merged.bundles = bundles.clone();
        match merged.save() {
            Ok(()) => info!("Settings saved"),
            Err(e) => warn!("Failed to save settings: {}", e),
        }
    }

    let session: SharedSession = Arc::new(RwLock::new(Session::new(Arc::clone(&registry))));

    let driver = TickDriver::new(
        Arc::clone(&session),
        Duration::from_millis(settings.tick_interval_ms),
    );
    let stop = driver.stop_handle();

    // Spawn tokio runtime for bundle loading and the tick loop. The
    // ready signal fires once every bundle has been registered.
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<()>();
    let session_for_loop = Arc::clone(&session);
    let runtime_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {}", e);
                let _ = ready_tx.send(());
                return;
            }
        };
        rt.block_on(async {
            bundle::load_bundles(&bundles, &registry, &session_for_loop).await;
            let _ = ready_tx.send(());

            info!("Starting tick loop");
            driver.run().await;
        });
    });

    let shell = Shell::new(session);
    if let Some(ref script) = cli.script {
        // Scripts expect a settled registry, so wait for the bundle
        // loads to finish before the first command runs.
        let _ = ready_rx.recv();
        let file = File::open(script)
            .with_context(|| format!("Failed to open script file: {}", script.display()))?;
        shell.run(BufReader::new(file), false);
    } else {
        shell.run(std::io::stdin().lock(), true);
    }

    stop.store(true, Ordering::Relaxed);
    let _ = runtime_thread.join();

    Ok(())
}
