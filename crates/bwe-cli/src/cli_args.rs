//! CLI argument definitions for the `bwe` command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// BWE - Bandwidth-enhanced partial synthesis and morphing
#[derive(Parser)]
#[command(name = "bwe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synthesize the partials of a render document to a WAV file
    Render {
        /// Path to the render document (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output WAV file path
        #[arg(short, long)]
        output: String,
    },

    /// Morph two partial collections named by a morph document
    Morph {
        /// Path to the morph document (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output partials document path
        #[arg(short, long)]
        output: String,
    },

    /// Validate a document without using it
    Validate {
        /// Path to the document (JSON)
        #[arg(short, long)]
        spec: String,

        /// Document kind
        #[arg(long, default_value = "render", value_parser = ["render", "morph", "partials"])]
        kind: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Summarize a partials document
    Info {
        /// Path to the partials document (JSON)
        #[arg(short, long)]
        partials: String,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
