//! Operational CLI: bootstrap an admin account and check database health.

use clap::{Parser, Subcommand};

use parking_api::auth;
use parking_api::database::repos::users;
use parking_api::database::DatabaseManager;
use parking_api::types::Role;

#[derive(Parser)]
#[command(name = "parking-admin", about = "Parking API admin tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an admin user account
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Ping the database
    Health,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::CreateAdmin { username, email, password } => {
            create_admin(&username, &email, &password).await
        }
        Command::Health => health().await,
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn create_admin(username: &str, email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = DatabaseManager::pool().await?;

    let salt = auth::generate_salt();
    let hash = auth::hash_password(password, &salt);
    let user = users::create(&pool, username, email, &hash, &salt, Role::Admin).await?;

    println!("Created admin user '{}' ({})", user.username, user.id);
    Ok(())
}

async fn health() -> Result<(), Box<dyn std::error::Error>> {
    DatabaseManager::health_check().await?;
    println!("database: ok");
    Ok(())
}
