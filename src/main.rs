#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use prompt_architect::app::config::AppConfig;
use tracing_subscriber::prelude::*;

const DEFAULT_LOG_FILTER: &str =
    "prompt_architect=info,eframe=info,egui=warn,wgpu=warn,naga=warn,winit=warn,reqwest=warn,hyper=warn";

fn log_dir() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "", "prompt-architect")
        .map(|proj_dirs| proj_dirs.data_dir().join("logs"))
}

fn init_logging() -> anyhow::Result<()> {
    let Some(log_dir) = log_dir() else {
        eprintln!("No data directory available, file logging disabled");
        return Ok(());
    };
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("prompt-architect.log");
    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)?;

    // Set restrictive permissions (owner read/write only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = file.metadata() {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            if let Err(e) = std::fs::set_permissions(&log_path, perms) {
                eprintln!("[SECURITY] Failed to set log file permissions: {}", e);
            }
        }
    }

    // RUST_LOG wins over the built-in levels
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::builder().parse(DEFAULT_LOG_FILTER))?;

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false), // No ANSI colors in file
    );
    tracing::subscriber::set_global_default(subscriber)?;

    // Bridge log crate events (eframe, egui, wgpu) to tracing
    tracing_log::LogTracer::init()?;

    tracing::info!("Logging initialized to: {:?}", log_path);
    Ok(())
}

fn setup_panic_handler() {
    // Writes even if logging never came up
    std::panic::set_hook(Box::new(|panic_info| {
        let crash_msg = format!(
            "Prompt Architect crashed!\n\
             Panic occurred at: {}\n\
             Details: {}\n\
             Backtrace:\n{:?}\n",
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
            std::backtrace::Backtrace::force_capture()
        );

        eprintln!("\n{}", crash_msg);

        if let Some(log_dir) = log_dir() {
            let _ = std::fs::create_dir_all(&log_dir);
            let crash_log_path = log_dir.join("crash.log");

            if let Ok(mut file) = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&crash_log_path)
            {
                use std::io::Write;
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "\n=== CRASH at {} ===\n{}", timestamp, crash_msg);
                eprintln!("Crash log written to: {:?}", crash_log_path);
            }
        }
    }));
}

fn main() -> anyhow::Result<()> {
    setup_panic_handler();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::info!(
        "prompt-architect {} starting ({}@{})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_BRANCH"),
        env!("GIT_COMMIT")
    );

    // A missing .env is the normal case
    match dotenv::dotenv() {
        Ok(path) => tracing::info!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env loaded: {}", e),
    }

    let config = AppConfig::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Prompt Architect")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prompt Architect",
        native_options,
        Box::new(move |cc| Ok(Box::new(prompt_architect::PromptApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
