use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod config;
mod cube;
mod datetime;
mod error;
mod export;
mod fetcher;
mod logger;
mod period;
mod report;
mod rounding;
mod time_entry;
mod toggl;
mod weekly_command;

use config::Config;
use toggl::TogglClient;
use weekly_command::{WeeklyArgs, WeeklyCommand};

/// Togglのtime entryを週毎に集計してレポートを出力するCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- weekly
/// $ cargo run -- weekly --date 2024-01-03 --format clock
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(short, long, global = true, help = "Show debug logs")]
    verbose: bool,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    Weekly(WeeklyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init(args.verbose)?;
    // .envがなくても環境変数から読み込めれば良い
    dotenv::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;
    let client = TogglClient::new(&config);

    match args.subcommand {
        SubCommands::Weekly(weekly) => {
            WeeklyCommand::new(&client).run(weekly).await?;
        }
    }

    Ok(())
}
