use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Operator entrypoint for the shelf service
#[derive(Debug, Parser)]
#[command(name = "shelfctl", version, about)]
struct Cli {
    /// Override the database connection string
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations and serve HTTP until Ctrl-C
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    if let Some(url) = cli.database_url {
        settings.database.url = url;
    }

    match cli.command {
        Command::Serve => {
            shelf_telemetry::init(&settings.telemetry)?;
            shelf_app::serve(&settings).await
        }
        Command::Migrate => {
            shelf_telemetry::init(&settings.telemetry)?;
            let applied = shelf_app::migrate(&settings).await?;
            println!("applied {applied} migrations");
            Ok(())
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render configuration")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
