use clap::{Parser, Subcommand};
use std::process::ExitCode;

use storefront::commands::{
    ShowOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_product, cmd_show,
};
use storefront::logging;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse storefront products from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive product page
    #[command(visible_alias = "p")]
    Product {
        /// Product slug
        slug: String,
    },

    /// Print a product with its reviews and questions
    #[command(visible_alias = "s")]
    Show {
        /// Product slug
        slug: String,

        /// Reviews page to show
        #[arg(long, value_name = "N")]
        reviews_page: Option<u32>,

        /// Questions page to show
        #[arg(long, value_name = "N")]
        questions_page: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Key: api.url, app.url, auth.token, page_size, rating_colors.<1-5>
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Key: api.url, app.url, auth.token, page_size, rating_colors.<1-5>
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The TUI sets up file logging itself
    if !matches!(cli.command, Commands::Product { .. }) {
        logging::init_stderr();
    }

    let result = match cli.command {
        Commands::Product { slug } => cmd_product(&slug).await,
        Commands::Show {
            slug,
            reviews_page,
            questions_page,
            json,
        } => {
            cmd_show(
                &slug,
                ShowOptions {
                    reviews_page,
                    questions_page,
                    json,
                },
            )
            .await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(json),
            ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
            ConfigAction::Get { key, json } => cmd_config_get(&key, json),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
