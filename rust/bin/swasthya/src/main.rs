//! `swasthya`: the Swasthya Setu command-line client.
//!
//! Drives the same flows the mobile screens do (register, login,
//! dashboard, password reset) against the configured auth provider and
//! GraphQL backend, or against in-memory collaborators with `demo`.

mod commands;

use clap::{Parser, Subcommand};
use swasthya_setu::ClientConfig;

/// Swasthya Setu CLI tool.
#[derive(Parser, Debug)]
#[command(name = "swasthya", about = "Swasthya Setu CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.swasthya/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account and its profile.
    Register(commands::account::RegisterArgs),

    /// Sign in and show where the app would go next.
    Login {
        #[arg(long)]
        email: String,
        /// Password (not recommended, use the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in and show the dashboard.
    Dashboard {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Send a password reset email.
    #[command(name = "reset-password")]
    ResetPassword {
        #[arg(long)]
        email: String,
    },

    /// Show or change the client config.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Register, sign in and show a dashboard using in-memory services.
    Demo,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective config (file plus environment).
    Show,
    /// Set a config value.
    Set {
        /// One of graphql_endpoint, admin_secret, firebase_api_key.
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let json_output = match cli.output.as_str() {
        "json" => true,
        "table" => false,
        other => anyhow::bail!("Unknown output format \"{}\". Use table or json.", other),
    };

    match cli.command {
        Commands::Register(args) => {
            let password = password_or_prompt(args.password.clone(), true)?;
            let app = commands::connect(&config_path)?;
            commands::account::register(&app, &args, password).await?;
        }

        Commands::Login { email, password } => {
            let password = password_or_prompt(password, false)?;
            let app = commands::connect(&config_path)?;
            commands::account::login(&app, &email, &password).await?;
        }

        Commands::Dashboard { email, password } => {
            let password = password_or_prompt(password, false)?;
            let app = commands::connect(&config_path)?;
            commands::account::login(&app, &email, &password).await?;
            commands::account::dashboard(&app, json_output)?;
        }

        Commands::ResetPassword { email } => {
            let app = commands::connect(&config_path)?;
            commands::account::reset_password(&app, &email).await?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config_path, json_output)?,
            ConfigAction::Set { key, value } => commands::config::set(&config_path, &key, &value)?,
        },

        Commands::Demo => {
            commands::demo::run(json_output).await?;
        }

        Commands::Version => {
            println!("swasthya cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Use the given password, or prompt for it (twice when `confirm`).
fn password_or_prompt(password: Option<String>, confirm: bool) -> anyhow::Result<String> {
    if let Some(p) = password {
        if p.is_empty() {
            anyhow::bail!("Password cannot be empty.");
        }
        return Ok(p);
    }
    let pw = rpassword::prompt_password("Password: ")?;
    if confirm {
        let again = rpassword::prompt_password("Confirm password: ")?;
        if pw != again {
            anyhow::bail!("Passwords do not match.");
        }
    }
    if pw.is_empty() {
        anyhow::bail!("Password cannot be empty.");
    }
    Ok(pw)
}
