//! Shopdesk CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! shopdesk migrate
//!
//! # Create an administrator account (password from SHOPDESK_ADMIN_PASSWORD)
//! shopdesk admin create -e admin@example.com -n "Admin Name" -p 555-0100
//! ```
//!
//! Both commands read the same `DATABASE_URL` / `DB_*` variables as the
//! server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(author, version, about = "Shopdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage administrator accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new administrator account
    Create {
        /// Administrator email address
        #[arg(short, long)]
        email: String,

        /// Administrator display name
        #[arg(short, long)]
        name: String,

        /// Administrator phone number
        #[arg(short, long)]
        phone: String,

        /// Password (prefer the environment variable over the command line)
        #[arg(long, env = "SHOPDESK_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::error!("Failed to install rustls crypto provider");
        std::process::exit(1);
    }

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                phone,
                password,
            } => {
                let password = SecretString::from(password);
                commands::admin::create_user(&email, &name, &phone, &password).await?;
            }
        },
    }
    Ok(())
}
