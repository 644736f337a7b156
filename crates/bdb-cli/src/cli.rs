use std::path::PathBuf;

use bdb_store::Severity;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bdb",
    about = "bdb -- a file-per-record JSON document store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Database root directory (overrides the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// fatal, error, warn, info, debug or trace (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<Severity>,

    /// TOML file with `root` and `log_level`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a JSON object as a new record and print its id
    Write(WriteArgs),
    /// Print a stored record
    Read(ReadArgs),
    /// Print every record of a collection
    ReadAll(ReadAllArgs),
    /// Merge a JSON object into a stored record
    Update(UpdateArgs),
    /// Remove a record (or a nested directory) from a collection
    Delete(DeleteArgs),
    /// Seed an `employees` collection and walk through read and update
    Demo,
}

#[derive(Args)]
pub struct WriteArgs {
    pub collection: String,
    /// JSON object, e.g. '{"name": "John"}'
    pub json: String,
}

#[derive(Args)]
pub struct ReadArgs {
    pub collection: String,
    pub id: String,
}

#[derive(Args)]
pub struct ReadAllArgs {
    pub collection: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub collection: String,
    pub id: String,
    /// JSON object with the fields to change
    pub json: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub collection: String,
    pub resource: String,
}
