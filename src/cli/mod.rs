//! Command line interface

pub mod serve;

use clap::{Parser, Subcommand};

/// Users Service - CRUD API for user records
#[derive(Parser)]
#[command(name = "users-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}
