use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use up_sdk::endpoints::{accounts, auth, configurations, controlplanes, login, repositories, spaces};
use up_sdk::http::{format_error, with_page, with_size};
use up_sdk::kube::ListOptions;
use up_sdk::profile::Profile;
use up_sdk::Config;

/// Command-line front-end for the Upbound API
#[derive(Parser, Debug)]
#[command(name = "up", version = up_sdk::VERSION, about, long_about = None)]
struct Args {
    /// API endpoint
    #[arg(long, env = "UP_ENDPOINT")]
    endpoint: Option<String>,

    /// Account to operate on (defaults to the profile's account)
    #[arg(short, long, global = true)]
    account: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: Output,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a session (password read from UP_PASSWORD)
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(long, env = "UP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Inspect accounts
    #[command(subcommand)]
    Account(AccountCommand),
    /// Manage control planes
    #[command(subcommand)]
    Controlplane(ControlPlaneCommand),
    /// List configurations of the account
    #[command(subcommand)]
    Configuration(ConfigurationCommand),
    /// List repositories of the account
    #[command(subcommand)]
    Repository(RepositoryCommand),
    /// List spaces in a namespace
    #[command(subcommand)]
    Space(SpaceCommand),
    /// Org-scoped access tokens
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    List,
    Get { name: String },
}

#[derive(Subcommand, Debug)]
enum ControlPlaneCommand {
    List,
    Get { id: Uuid },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
enum ConfigurationCommand {
    List,
}

#[derive(Subcommand, Debug)]
enum RepositoryCommand {
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum SpaceCommand {
    List {
        namespace: String,
        /// Field selector, e.g. metadata.name=my-space
        #[arg(long)]
        field_selector: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Exchange an identity token for an org-scoped access token
    Exchange {
        #[arg(long)]
        org: String,
        #[arg(long, env = "UP_ID_TOKEN", hide_env_values = true)]
        token: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) {
    let filter = match level.to_tracing_level() {
        Some(level) => EnvFilter::new(format!("up={0},up_sdk={0}", level)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

fn print<T: Serialize>(output: Output, value: &T) -> Result<()> {
    let rendered = match output {
        Output::Json => serde_json::to_string_pretty(value)?,
        Output::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        let message = match err.downcast_ref::<up_sdk::Error>() {
            Some(api_err) => format_error(api_err),
            None => format!("{:#}", err),
        };
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut profile = Profile::load();
    let endpoint = profile.effective_endpoint(args.endpoint.as_deref());
    tracing::info!("Using endpoint: {}", endpoint);

    let cfg = Config::with_endpoint(&endpoint, []).context("Failed to create API client")?;
    if let Some(session) = profile.session_for(&endpoint) {
        cfg.client().restore_session(session);
    }
    let account = profile.effective_account(args.account.as_deref());
    let require_account = || {
        account
            .clone()
            .context("No account configured. Use --account or log in with an account")
    };

    match args.command {
        Command::Login { username, password } => {
            login::Client::new(&cfg)
                .login(&login::LoginParameters {
                    id: username.clone(),
                    password,
                })
                .await?;
            profile.set_session(&endpoint, cfg.client().session_cookies())?;
            if let Some(account) = args.account.as_deref() {
                profile.set_account(account)?;
            }
            eprintln!("Logged in as {}", username);
        }
        Command::Account(AccountCommand::List) => {
            print(args.output, &accounts::Client::new(&cfg).list().await?)?;
        }
        Command::Account(AccountCommand::Get { name }) => {
            print(args.output, &accounts::Client::new(&cfg).get(&name).await?)?;
        }
        Command::Controlplane(cmd) => {
            let client = controlplanes::Client::new(&cfg);
            match cmd {
                ControlPlaneCommand::List => {
                    print(args.output, &client.list(&require_account()?).await?)?
                }
                ControlPlaneCommand::Get { id } => print(args.output, &client.get(id).await?)?,
                ControlPlaneCommand::Delete { id } => {
                    client.delete(id).await?;
                    eprintln!("Deleted control plane {}", id);
                }
            }
        }
        Command::Configuration(ConfigurationCommand::List) => {
            let all = configurations::Client::new(&cfg)
                .list(&require_account()?)
                .await?;
            print(args.output, &all)?;
        }
        Command::Repository(RepositoryCommand::List { page, size }) => {
            let mut options = vec![with_page(page)];
            options.extend(size.map(with_size));
            let repos = repositories::Client::new(&cfg)
                .list(&require_account()?, &options)
                .await?;
            print(args.output, &repos)?;
        }
        Command::Space(SpaceCommand::List {
            namespace,
            field_selector,
        }) => {
            let options = ListOptions {
                field_selector,
                ..ListOptions::default()
            };
            let list = spaces::Client::new(&cfg).list(&namespace, &options).await?;
            print(args.output, &list)?;
        }
        Command::Token(TokenCommand::Exchange { org, token }) => {
            let resp = auth::Client::new(&cfg)
                .get_org_scoped_token(&org, &token)
                .await?;
            print(args.output, &resp)?;
        }
    }

    Ok(())
}
