use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use pawfinder_core::config::AppConfig;
use pawfinder_core::search::SortOrder;
use pawfinder_infrastructure::ConfigService;

mod app;
mod commands;
mod logging;
mod render;
mod shell;

use app::App;
use commands::search::SearchArgs;

#[derive(Parser)]
#[command(name = "pawfinder")]
#[command(about = "Pawfinder - browse adoptable dogs and find your match", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/pawfinder/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog service base URL (overrides the config file and PAWFINDER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct LoginArgs {
    /// Name to log in with
    #[arg(long, env = "PAWFINDER_NAME")]
    name: String,

    /// Email to log in with
    #[arg(long, env = "PAWFINDER_EMAIL")]
    email: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive browsing shell (default)
    Shell,
    /// List breed names
    Breeds {
        #[command(flatten)]
        login: LoginArgs,
        /// Only breeds containing this text
        query: Option<String>,
    },
    /// Search dogs and print one page
    Search {
        #[command(flatten)]
        login: LoginArgs,
        /// Breed to include (repeatable)
        #[arg(long = "breed")]
        breeds: Vec<String>,
        /// Zip code to include (repeatable)
        #[arg(long = "zip")]
        zip_codes: Vec<String>,
        #[arg(long)]
        age_min: Option<u32>,
        #[arg(long)]
        age_max: Option<u32>,
        /// <breed|name|age>:<asc|desc>
        #[arg(long)]
        sort: Option<SortOrder>,
        /// Dogs per page
        #[arg(long)]
        size: Option<u32>,
        /// Page to show, reached by following next cursors
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Find a match among the given dog ids
    Match {
        #[command(flatten)]
        login: LoginArgs,
        /// Dog ids to consider
        ids: Vec<String>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new(cli.config.as_deref())?;
    let mut config = match &cli.command {
        // Config commands must work even when the file is broken.
        Some(Commands::Config { .. }) => AppConfig::default(),
        _ => config_service.load()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    logging::init(&config.logging, cli.verbose, cli.log_json);

    let result = match cli.command {
        None | Some(Commands::Shell) => shell::Shell::new(App::from_config(&config)?).run().await,
        Some(Commands::Breeds { login, query }) => {
            let app = login_app(&config, &login).await?;
            commands::breeds::run(&app, query.as_deref()).await
        }
        Some(Commands::Search {
            login,
            breeds,
            zip_codes,
            age_min,
            age_max,
            sort,
            size,
            page,
        }) => {
            if let Some(sort) = sort {
                config.search.sort = sort.to_string();
            }
            if let Some(size) = size {
                config.search.page_size = size;
            }
            let app = login_app(&config, &login).await?;
            let args = SearchArgs {
                breeds,
                zip_codes,
                age_min,
                age_max,
                page,
            };
            commands::search::run(&app, args).await
        }
        Some(Commands::Match { login, ids }) => {
            let app = login_app(&config, &login).await?;
            commands::matching::run(&app, ids).await
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(&config_service, force),
            ConfigAction::Show => commands::config::show(&config_service),
            ConfigAction::Path => {
                println!("{}", config_service.path().display());
                Ok(())
            }
        },
    };

    if let Err(e) = &result {
        tracing::debug!("command failed: {:?}", e);
    }
    result
}

async fn login_app(config: &AppConfig, login: &LoginArgs) -> Result<App> {
    let app = App::from_config(config)?;
    app.auth.login(&login.name, &login.email).await?;
    Ok(app)
}
