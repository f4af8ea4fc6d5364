use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_planner_lib::user::{UserEmail, UserId};
use trip_planner_data_management::{TripStore, config::StoreConfig};

/// CLI for manual data operations against the trip store.
#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database file and schema if missing
    Init,
    /// Look up a user by email, creating it if absent
    User { email: String },
    /// List all trips for a user, newest first
    Trips { email: String },
    /// Count trips for a numeric user id
    Count { user_id: i64 },
    /// Delete one trip by name
    Delete { user_id: i64, trip_name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let store = TripStore::connect(StoreConfig::from_env()?).await?;

    match cli.command {
        Command::Init => {
            tracing::info!("database initialized");
        }
        Command::User { email } => {
            let user = store.get_or_create_user(&UserEmail(email)).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Command::Trips { email } => {
            let trips = store.get_trips_for_user(&UserEmail(email)).await?;
            println!("{}", serde_json::to_string_pretty(&trips)?);
        }
        Command::Count { user_id } => {
            println!("{}", store.get_total_trips(UserId(user_id)).await?);
        }
        Command::Delete { user_id, trip_name } => {
            println!("{}", store.delete_trip(UserId(user_id), &trip_name).await?);
        }
    }

    Ok(())
}
