use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use migrate_source_yaml::cli::{self, ExtractOptions};
use migrate_source_yaml::fetch::AuthType;
use owo_colors::OwoColorize;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Extract migration rows from YAML documents
#[derive(Parser)]
#[command(name = "yamlsrc", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Authentication type for HTTP fetches (detected from the environment by default)
    #[arg(long, global = true, value_enum)]
    auth: Option<AuthType>,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract rows as NDJSON
    Extract {
        /// Source configuration file
        #[arg(default_value = "source.yml")]
        config: String,

        /// Read this URL instead of the configured ones (repeatable)
        #[arg(short, long)]
        url: Vec<String>,

        /// Write NDJSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Skip rows whose fields do not resolve instead of failing
        #[arg(long)]
        skip_failed_rows: bool,

        /// Include the row identifier under `_id`
        #[arg(long)]
        with_ids: bool,
    },

    /// Count the items the source would produce
    Count {
        /// Source configuration file
        #[arg(default_value = "source.yml")]
        config: String,

        /// Read this URL instead of the configured ones (repeatable)
        #[arg(short, long)]
        url: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = dotenvy::from_filename(&cli.env)
        && !e.not_found()
    {
        return Err(e.into());
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Extract {
            config,
            url,
            output,
            skip_failed_rows,
            with_ids,
        } => {
            log::info!(
                "Extracting rows with {} to {}",
                config.bright_black(),
                output.as_deref().unwrap_or("stdout").bright_black()
            );
            let options = ExtractOptions {
                urls: url,
                output,
                skip_failed_rows,
                with_ids,
                auth: cli.auth,
            };
            let count = cli::extract_rows(&config, options).await?;
            log::info!("✓ Extracted {} row(s)", count.cyan());
        }
        Commands::Count { config, url } => {
            log::info!("Counting items with {}", config.bright_black());
            let count = cli::count_items(&config, &url, cli.auth.as_ref()).await?;
            println!("{}", count);
        }
    }

    Ok(())
}
