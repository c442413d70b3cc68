//! Command-line interface for inspecting delegate library resolution.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use webnn_delegate::prelude::*;
use webnn_delegate::{config, coral, platform, webnn};

/// Delegate info - show which native delegate library a host would load.
#[derive(Parser, Debug)]
#[command(name = "delegate-info")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a delegate and print its host record as JSON.
    Resolve(DelegateArgs),
    /// Resolve a delegate and verify its native library is present.
    Check(DelegateArgs),
    /// List the platform to library table.
    Platforms {
        /// Directory holding per-platform library directories.
        #[arg(long)]
        lib_root: Option<PathBuf>,
        /// Show the Coral Edge TPU table instead.
        #[arg(long)]
        coral: bool,
    },
    /// Print the detected platform identifier.
    Detect,
}

/// Delegate construction flags.
#[derive(ClapArgs, Debug)]
struct DelegateArgs {
    /// Platform override, e.g. linux_x64.
    #[arg(short, long)]
    platform: Option<String>,
    /// Directory holding per-platform library directories.
    #[arg(long)]
    lib_root: Option<PathBuf>,
    /// Explicit native library path; skips platform lookup.
    #[arg(long)]
    library_path: Option<PathBuf>,
    /// Delegate option as key=value. Repeatable, order is kept.
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,
    /// WebNN device (default, gpu, cpu), appended as webnn_device.
    #[arg(long)]
    device: Option<String>,
    /// Resolve the Coral Edge TPU delegate instead of WebNN.
    #[arg(long)]
    coral: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Resolve(delegate_args) => {
            let delegate = build_delegate(&delegate_args)?;
            let record = delegate.to_record();
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Check(delegate_args) => {
            let delegate = build_delegate(&delegate_args)?;
            check_library(delegate.native_path())?;
            println!(
                "{} native library found: {}",
                delegate.name(),
                delegate.native_path().display()
            );
        }
        Command::Platforms { lib_root, coral } => {
            let table = if coral {
                coral::library_table()
            } else {
                webnn::library_table(lib_root.unwrap_or_else(config::default_lib_root))
            };
            for (platform, path) in table.iter() {
                println!("{:<14}{}", platform.as_str(), path.display());
            }
        }
        Command::Detect => {
            println!("{}", platform::detect());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "webnn_delegate=debug,delegate_info=debug"
    } else {
        "webnn_delegate=warn,delegate_info=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    // JSON logs for log collectors
    let json_logging = std::env::var("DELEGATE_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

fn build_delegate(args: &DelegateArgs) -> Result<Box<dyn DelegatePlugin>> {
    let mut cfg = DelegateConfig::new().with_options(parse_options(&args.options)?);

    if let Some(device) = &args.device {
        let device = WebNnDevice::parse(device)
            .with_context(|| format!("Unknown WebNN device: {}", device))?;
        cfg = cfg.with_device(device);
    }
    if let Some(platform) = &args.platform {
        cfg = cfg.with_platform_str(platform)?;
    }
    if let Some(path) = &args.library_path {
        cfg = cfg.with_library_path(path);
    }

    tracing::debug!("Delegate config: {:?}", cfg);

    let delegate: Box<dyn DelegatePlugin> = if args.coral {
        Box::new(CoralDelegate::with_config(cfg)?)
    } else {
        match &args.lib_root {
            Some(root) => Box::new(WebNnDelegate::with_config_in(cfg, root)?),
            None => Box::new(WebNnDelegate::with_config(cfg)?),
        }
    };

    Ok(delegate)
}

/// Split `key=value` arguments at the first `=`.
fn parse_options(raw: &[String]) -> Result<Vec<OptionPair>> {
    raw.iter()
        .map(|option| match option.split_once('=') {
            Some((key, value)) => Ok((key.to_string(), value.to_string())),
            None => bail!("Invalid option {:?}, expected KEY=VALUE", option),
        })
        .collect()
}

/// Check that `path` names an existing native library file.
fn check_library(path: &Path) -> Result<()> {
    if !is_native_library(path) {
        bail!("Not a native library file: {}", path.display());
    }
    if !path.is_file() {
        bail!("Native library not found: {}", path.display());
    }
    Ok(())
}

fn is_native_library(path: &Path) -> bool {
    let versioned_so = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains(".so."));

    versioned_so
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| matches!(ext, "so" | "dylib" | "dll"))
}
