use std::error::Error;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use salescope_rs::{DEFAULT_SEED_URL, SQLiteTransactionStore, initialize_db, seed_store};

/// A utility for filling the salescope_rs database from the upstream product feed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. Created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// The URL of the feed to download transactions from.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    seed_url: String,
}

/// Fill a database with freshly dated transactions from the seed feed.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Opening database at {}", args.db_path);
    let conn = Connection::open(&args.db_path)?;

    initialize_db(&conn)?;

    println!("Downloading the seed feed from {}", args.seed_url);
    let mut store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
    let count = seed_store(&mut store, &args.seed_url).await?;

    println!("Database seeded successfully with {count} transactions.");

    Ok(())
}
