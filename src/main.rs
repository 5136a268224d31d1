use clap::Parser;

use yt_views::config::{Config, load_env};
use yt_views::error::Result;
use yt_views::report;
use yt_views::youtube::DateWindow;

#[derive(Parser)]
#[command(name = "yt-views")]
#[command(about = "Export a YouTube channel's videos sorted by view count as CSV")]
#[command(version)]
struct Cli {
    /// YouTube channel ID (e.g. UC_x5XG1OV2P6uZZ5FSM9Ttw)
    #[arg(long)]
    channel: String,

    /// Only include videos published after this time, e.g. 2019-12-03T00:00:00Z
    #[arg(long)]
    after: Option<String>,

    /// Only include videos published before this time, e.g. 2019-12-04T00:00:00Z
    #[arg(long)]
    before: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    load_env();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let window = DateWindow {
        published_after: cli.after,
        published_before: cli.before,
    };

    report::run(&config, &cli.channel, &window).await
}
