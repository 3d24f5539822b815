use std::env;
use std::path::Path;

use anyhow::Result;
use clap::Parser;

use gop_setup::config;
use gop_setup::git::Git2Remote;
use gop_setup::output;
use gop_setup::resolver::{self, Resolver};
use gop_setup::toolchain::GopToolchain;
use gop_setup::ui;
use gop_setup::workflow;

#[derive(clap::Parser)]
#[command(
    name = "gop-setup",
    about = "Resolve, build, and install a gop toolchain version"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Version specification (exact version, range, or branch name)")]
    gop_version: Option<String>,

    #[arg(long, help = "File to read the version specification from")]
    gop_version_file: Option<String>,

    #[arg(long, help = "Resolve the checkout reference and exit without installing")]
    resolve_only: bool,

    #[arg(long, help = "List valid upstream versions and exit")]
    list: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("gop-setup {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration, then layer CI environment inputs and CLI flags on
    // top (flags win).
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    config.apply_env();
    if let Some(version) = args.gop_version {
        config.inputs.version = Some(version);
    }
    if let Some(version_file) = args.gop_version_file {
        config.inputs.version_file = Some(version_file);
    }

    let remote = Git2Remote::new(config.repo.url.clone());

    if args.list {
        let versions = match Resolver::new(&remote).available_versions() {
            Ok(versions) => versions,
            Err(e) => {
                ui::display_error(&format!("Failed to list upstream versions: {}", e));
                std::process::exit(1);
            }
        };
        for version in &versions {
            println!("{}", version);
        }
        return Ok(());
    }

    if args.resolve_only {
        let spec = match resolver::resolve_version_input(&config) {
            Ok(spec) => spec,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        match Resolver::new(&remote).resolve(&spec) {
            Ok(resolution) => {
                let shown_spec = if spec.is_empty() { "latest" } else { spec.as_str() };
                ui::display_success(&format!(
                    "Resolved '{}' to {}",
                    shown_spec,
                    resolution.checkout_ref()
                ));
                return Ok(());
            }
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        }
    }

    let toolchain = GopToolchain::new(config.install.bin_dir.clone());
    let report = match workflow::run_setup(&config, &remote, &toolchain) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Publishing is the caller's job: write CI output and path files when
    // the pipeline provides them.
    if let Ok(output_file) = env::var("GITHUB_OUTPUT") {
        if !output_file.is_empty() {
            output::append_outputs(Path::new(&output_file), &report.outputs())?;
        }
    }
    if let Ok(path_file) = env::var("GITHUB_PATH") {
        if !path_file.is_empty() {
            output::append_path(Path::new(&path_file), &config.install.bin_dir)?;
        }
    }

    ui::display_success(&format!(
        "Installed gop version {}",
        report.installed_version
    ));
    Ok(())
}
