//! docstore CLI
//!
//! Command-line interface for a local docstore directory.

use std::process;

use clap::{Parser, Subcommand};
use docstore::{Config, Serializer, Store, StoreError, WriteMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// docstore CLI
#[derive(Parser, Debug)]
#[command(name = "docstore")]
#[command(about = "CLI for the docstore embedded document store")]
#[command(version)]
struct Args {
    /// Store root directory
    #[arg(short, long, default_value = "./db")]
    root: String,

    /// Stage writes in a temp file and rename into place
    #[arg(long)]
    atomic: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a JSON value under a key
    Write {
        collection: String,
        key: String,
        /// The value, as JSON
        value: String,
    },

    /// Read the value stored under a key
    Read { collection: String, key: String },

    /// Print every record of a collection
    ReadAll { collection: String },

    /// List the keys of a collection
    Keys { collection: String },

    /// Delete a key
    Del { collection: String, key: String },

    /// Write, list, read and delete two sample users
    Demo,
}

#[derive(Debug, Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,docstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let write_mode = if args.atomic {
        WriteMode::Atomic
    } else {
        WriteMode::Direct
    };
    let config = Config::builder()
        .root_dir(&args.root)
        .write_mode(write_mode)
        .build();

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(store: &Store, command: Commands) -> docstore::Result<()> {
    match command {
        Commands::Write { collection, key, value } => {
            let value: Value = serde_json::from_str(&value)
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            store.collection(collection).write(&key, &value)?;
        }
        Commands::Read { collection, key } => {
            let value: Value = store.collection(collection).read(&key)?;
            println!("{}", value);
        }
        Commands::ReadAll { collection } => {
            for record in store.collection(collection).read_all()? {
                println!("{}", String::from_utf8_lossy(record.as_bytes()));
            }
        }
        Commands::Keys { collection } => {
            for key in store.collection(collection).keys()? {
                println!("{}", key);
            }
        }
        Commands::Del { collection, key } => {
            store.collection(collection).delete(&key)?;
        }
        Commands::Demo => demo(store)?,
    }
    Ok(())
}

fn demo(store: &Store) -> docstore::Result<()> {
    let users = store.collection("users");

    for user in [
        User { name: "A".to_string(), age: 1 },
        User { name: "B".to_string(), age: 2 },
    ] {
        users.write(&user.name, &user)?;
    }

    for record in users.read_all()? {
        let user: User = store.serializer().deserialize(record.as_bytes())?;
        println!("{:?}", user);
    }

    let user: User = users.read("A")?;
    println!("{:?}", user);

    users.delete("A")?;
    Ok(())
}
