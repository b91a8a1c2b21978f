// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Directory holding notes and pictures (overrides the config file)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes with position, caption and date
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a note from a picture file
    Add {
        /// Picture to attach
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Caption for the note
        #[arg(long)]
        caption: String,
    },

    /// Change the caption and/or picture of a note
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: Uuid,

        /// New caption
        #[arg(long)]
        caption: Option<String>,

        /// New picture
        #[arg(long, value_name = "IMAGE")]
        image: Option<PathBuf>,
    },

    /// Delete notes by list position
    Delete {
        /// Positions as shown by `list`
        #[arg(value_name = "POSITION", required = true)]
        positions: Vec<usize>,
    },

    /// Show a single note
    Show {
        /// Note ID to show
        #[arg(value_name = "NOTE_ID")]
        note_id: Uuid,

        /// Output note as JSON
        #[arg(long)]
        json: bool,

        /// Open the picture in the image viewer
        #[arg(long)]
        open: bool,
    },

    /// Add sample notes to an empty collection
    Sample,
}
