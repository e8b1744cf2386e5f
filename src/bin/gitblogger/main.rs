use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use spdlog::{debug, warn};

use gitblogger::logger::configure_logger;

use crate::config::{generate_cfg, open_config};
use crate::editor_cmd::{preview_cmd, publish_cmd};
use crate::manager_cmd::{create_cmd, list_cmd, show_cmd};

mod config;
mod config_data;
mod editor_cmd;
mod manager_cmd;

const CFG_FILE_NAME: &str = "gitblogger.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new, empty blog index
    Create(CreateArgs),
    /// List the published posts, newest first
    List(ListArgs),
    /// Show the details and content of a published post
    Show(ShowArgs),
    /// Render a markdown draft
    Preview(PreviewArgs),
    /// Publish a markdown draft as the next post of a blog index
    Publish(PublishArgs),
    /// Write a sample configuration file
    SampleConfig(SampleConfigArgs),
}

#[derive(Parser, Debug)]
struct CreateArgs {
    /// Index file to create. Posts are stored next to it
    index: PathBuf,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Blog index file
    index: PathBuf,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Blog index file
    index: PathBuf,

    /// Position of the post in the index
    position: usize,

    /// Print the content as HTML instead of markdown
    #[arg(long)]
    html: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Markdown draft. The first line is the title
    markdown: PathBuf,

    /// Show the markdown source instead of rendering it
    #[arg(short, long)]
    raw: bool,

    /// Write a standalone HTML page instead of printing
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PublishArgs {
    /// Blog index file
    index: PathBuf,

    /// Markdown draft. The first line is the title
    markdown: PathBuf,

    /// Extra file to copy with the post. Can be repeated
    #[arg(short, long)]
    attach: Vec<PathBuf>,

    /// Topics of the post
    #[arg(short, long)]
    topics: Option<String>,
}

#[derive(Parser, Debug)]
struct SampleConfigArgs {
    /// Where to write it. Defaults to the user config directory
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if let Command::SampleConfig(ref cmd_args) = args.command {
        let path = generate_cfg(cmd_args.out.clone().or(config_path)).map_err(|e| anyhow!(e))?;
        println!("Sample config written to {}", path.display());
        return Ok(());
    }

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run gitblogger --help");
            return Err(anyhow!("Invalid configuration"));
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    debug!("Running {:?}", args.command);

    match args.command {
        Command::Create(cmd_args) => create_cmd(&cmd_args.index),
        Command::List(cmd_args) => list_cmd(&cmd_args.index),
        Command::Show(cmd_args) => show_cmd(&cmd_args.index, cmd_args.position, cmd_args.html),
        Command::Preview(cmd_args) => preview_cmd(&config, cmd_args),
        Command::Publish(cmd_args) => publish_cmd(cmd_args),
        Command::SampleConfig(_) => Ok(()),
    }
}
