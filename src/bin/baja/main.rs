use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use spdlog::{critical, info, warn};

use baja::logger::configure_logger;
use baja::site::Site;
use baja::site_builder::build_site;

use crate::config::open_config;
use crate::init::init_cmd;
use crate::new_node::new_cmd;

mod config;
mod init;
mod new_node;

const CFG_FILE_NAME: &str = "baja.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Compile the content tree into the public directory
    Build(BuildArgs),
    /// Scaffold a new site
    Init(InitArgs),
    /// Create a new document
    New(NewArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BuildArgs {
    /// Project root. Defaults to the current directory
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Config path. Defaults to baja.toml in the project root
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct InitArgs {
    /// Directory of the new site
    name: PathBuf,

    /// Name of the default theme
    #[arg(short, long, default_value_t = String::from("baja"))]
    theme: String,

    /// Site author. If empty, OS user real name is being used
    #[arg(short, long)]
    author: Option<String>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct NewArgs {
    /// Title of the document
    #[arg(short, long)]
    title: String,

    /// Directory under the content root, e.g. blog/2024
    #[arg(short, long, default_value_t = String::new())]
    section: String,

    /// Create a page instead of a post
    #[arg(short, long)]
    page: bool,

    /// Project root. Defaults to the current directory
    #[arg(short, long)]
    root: Option<PathBuf>,
}

fn build_cmd(args: BuildArgs) -> Result<ExitCode> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config = open_config(&root, args.config)?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Building {} with theme {}", root.display(), config.theme);
    let site = Site::new(&root, config);
    match build_site(&site) {
        Ok((_, report)) if report.skipped.is_empty() => Ok(ExitCode::SUCCESS),
        Ok((_, report)) => {
            warn!("Build finished with {} skipped entries", report.skipped.len());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            critical!("Build aborted: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    match args {
        Args::Build(args) => build_cmd(args),
        Args::Init(args) => init_cmd(args).map(|_| ExitCode::SUCCESS),
        Args::New(args) => new_cmd(args).map(|_| ExitCode::SUCCESS),
    }
}
