use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::error::IoError;

#[derive(Parser, Debug)]
#[command(name = "ros-node-audit")]
#[command(about = "Find ROS packages that define ROS 2 nodes (or lack a README) and index or link them", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Extra detection patterns (JSON or YAML with `python` / `cpp` lists)
    #[arg(long, value_name = "FILE", global = true)]
    pub rules: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a JSON index of packages containing node definitions
    Index {
        /// Root directory to search for ROS packages
        search_dir: PathBuf,

        /// JSON file to write (`.json` is appended if missing)
        output_json: PathBuf,

        #[command(flatten)]
        limit: Limit,
    },

    /// Symlink every package containing a node definition into LINKS_DIR
    LinkNodes {
        /// Root directory to search for ROS packages
        search_dir: PathBuf,

        /// Directory in which to place the links
        links_dir: PathBuf,

        #[command(flatten)]
        limit: Limit,
    },

    /// Symlink every package without a README into LINKS_DIR
    MissingReadme {
        /// Root directory to search for ROS packages
        search_dir: PathBuf,

        /// Directory in which to place the links
        links_dir: PathBuf,

        #[command(flatten)]
        limit: Limit,
    },
}

#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct Limit {
    /// Stop after finding N packages
    #[arg(long = "max", value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max: Option<usize>,
}

impl Command {
    pub fn search_dir(&self) -> &Path {
        match self {
            Command::Index { search_dir, .. }
            | Command::LinkNodes { search_dir, .. }
            | Command::MissingReadme { search_dir, .. } => search_dir,
        }
    }

    /// The link writers refuse to run without an existing search directory;
    /// the index writer just reports that nothing was found.
    pub fn validate(&self) -> Result<(), IoError> {
        match self {
            Command::Index { .. } => Ok(()),
            Command::LinkNodes { search_dir, .. } | Command::MissingReadme { search_dir, .. } => {
                validate_search_dir(search_dir)
            }
        }
    }
}

pub fn validate_search_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        return Err(IoError::directory_not_found(path));
    }
    Ok(())
}
