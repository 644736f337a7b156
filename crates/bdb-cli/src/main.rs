use clap::Parser;

mod cli;
mod commands;
mod config;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::CliConfig::resolve(&cli)?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level.tracing_level())
        .init();
    commands::run_command(cli, &config)
}
