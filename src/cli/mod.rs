//! Command-line surface of the `id1fs` binary.

pub mod responses;

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::operations::{CountMode, DisplayMode, ListOptions};
use crate::storage::ItemKind;

#[derive(Parser, Debug)]
#[command(name = "id1fs", author, version, about = "Sandboxed home tree with metadata, login gate and backups", long_about = None)]
pub struct Args {
    /// ID1FS base directory (overrides config and ID1FS__ROOT)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file to use instead of ./id1fs.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Create a file or directory in the sandbox.
    Create(TargetArgs),

    /// Delete a file (after backing it up) or a directory tree.
    Delete(TargetArgs),

    /// List a sandbox directory.
    #[command(alias = "ls")]
    List {
        /// Directory to list, relative to the sandbox root.
        #[arg(default_value = ".")]
        path: String,

        /// Show files only.
        #[arg(short = 'f', long)]
        files: bool,

        /// Show directories only.
        #[arg(short = 'd', long)]
        dirs: bool,

        /// Show hidden entries only.
        #[arg(short = 'a', long)]
        hidden: bool,

        /// Show mode, links, owner, group, size and modification time.
        #[arg(short = 'l', long)]
        long: bool,

        /// Print the number of listed entries.
        #[arg(short = 'n', long)]
        count: bool,

        /// Also print file contents and the children of each directory.
        #[arg(long)]
        show_content: bool,
    },

    /// Display a sandbox file.
    #[command(alias = "cat")]
    Display {
        /// File to display, relative to the sandbox root.
        file: String,

        /// Number each line.
        #[arg(short = 'a', long, conflicts_with_all = ["lines", "chars"])]
        numbered: bool,

        /// Print the number of lines.
        #[arg(short = 'b', long, conflicts_with = "chars")]
        lines: bool,

        /// Print the number of characters.
        #[arg(short = 'r', long)]
        chars: bool,
    },

    /// Count lines (default), words or characters of a sandbox file.
    Count {
        file: String,

        #[arg(short = 'c', long, conflicts_with_all = ["words", "lines"])]
        characters: bool,

        #[arg(short = 'w', long, conflicts_with = "lines")]
        words: bool,

        #[arg(short = 'l', long)]
        lines: bool,
    },

    /// Open the session.
    Login,

    /// Close the session.
    Logout,

    /// Show whether the session is open.
    Status,
}

/// `-f NAME` or `-d NAME`, exactly one
#[derive(ClapArgs, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Target a file.
    #[arg(short = 'f', long = "file", value_name = "NAME")]
    pub file: Option<String>,

    /// Target a directory.
    #[arg(short = 'd', long = "dir", value_name = "NAME")]
    pub dir: Option<String>,
}

impl TargetArgs {
    pub fn target(&self) -> Option<(&str, ItemKind)> {
        match (&self.file, &self.dir) {
            (Some(file), _) => Some((file, ItemKind::File)),
            (None, Some(dir)) => Some((dir, ItemKind::Directory)),
            (None, None) => None,
        }
    }
}

pub fn display_mode(numbered: bool, lines: bool, chars: bool) -> DisplayMode {
    if numbered {
        DisplayMode::Numbered
    } else if lines {
        DisplayMode::LineCount
    } else if chars {
        DisplayMode::CharCount
    } else {
        DisplayMode::Raw
    }
}

pub fn count_mode(characters: bool, words: bool) -> CountMode {
    if characters {
        CountMode::Characters
    } else if words {
        CountMode::Words
    } else {
        CountMode::Lines
    }
}

pub fn list_options(
    files: bool,
    dirs: bool,
    hidden: bool,
    long: bool,
    count: bool,
    show_content: bool,
) -> ListOptions {
    ListOptions {
        files_only: files,
        dirs_only: dirs,
        hidden_only: hidden,
        long,
        count,
        show_file_content: show_content,
    }
}
