pub mod config;

use clap::{Parser, Subcommand};
use relay_pagination::{
    memory::MemorySource, CollectionName, ConnectionResult, Cursor, CursorPolicy, PaginationArgs,
    PaginationConfig, Paginator,
};

use std::path::PathBuf;

use self::config::Config;
use crate::records::*;

#[derive(Parser)]
#[clap(long_about = None)]
struct Cli {
    #[clap(short, long, env = "RELAY_PAGINATION_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one page of a JSON array of records
    Page {
        #[clap(long, env = "RELAY_PAGINATION_RECORDS", value_name = "FILE")]
        records: PathBuf,
        /// Collection label carried in cursors
        #[clap(long)]
        collection: String,
        #[clap(long, allow_negative_numbers = true)]
        first: Option<i32>,
        #[clap(long, allow_negative_numbers = true)]
        last: Option<i32>,
        #[clap(long)]
        after: Option<String>,
        #[clap(long)]
        before: Option<String>,
        /// `field=value`, `field<value` or `field>value`, may be repeated
        #[clap(long = "where", value_name = "CONDITION")]
        conditions: Vec<String>,
        /// Reject malformed cursors instead of ignoring them
        #[clap(long)]
        strict: bool,
    },
    /// Encode or decode cursors
    Cursor {
        #[clap(subcommand)]
        command: CursorCommand,
    },
}

#[derive(Subcommand)]
enum CursorCommand {
    Encode {
        collection: String,
        key: String,
    },
    Decode {
        cursor: String,
        #[clap(long)]
        strict: bool,
    },
}

pub struct PageRequest {
    pub collection: String,
    pub args: PaginationArgs,
    pub conditions: Vec<String>,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_config(cli.config)?;
    relay_pagination_tracing::init_tracer(config.tracing.clone())?;

    match cli.command {
        Command::Page {
            records,
            collection,
            first,
            last,
            after,
            before,
            conditions,
            strict,
        } => {
            if strict {
                config.pagination.cursor_policy = CursorPolicy::Strict;
            }
            let records = load_records(records, &config.records.key_field)?;
            tracing::info!(records = records.len(), collection = %collection, "loaded records");
            let request = PageRequest {
                collection,
                args: PaginationArgs {
                    first,
                    last,
                    before: before.map(Cursor::from),
                    after: after.map(Cursor::from),
                },
                conditions,
            };
            let connection = page(records, config.pagination, request).await?;
            println!("{}", serde_json::to_string_pretty(&connection)?);
        }
        Command::Cursor { command } => println!("{}", run_cursor_cmd(command)?),
    }

    Ok(())
}

pub async fn page(
    records: Vec<JsonRecord>,
    config: PaginationConfig,
    request: PageRequest,
) -> anyhow::Result<ConnectionResult<JsonRecord>> {
    let paginator = Paginator::new(CollectionName::new(request.collection)?, config);
    let filter = build_filter(&request.conditions)?;
    let source = MemorySource::new(records);
    let connection = paginator
        .find_connections(&source, filter, request.args, None)
        .await?;
    Ok(connection)
}

fn run_cursor_cmd(command: CursorCommand) -> anyhow::Result<String> {
    match command {
        CursorCommand::Encode { collection, key } => {
            Ok(Cursor::encode(&CollectionName::new(collection)?, &key).into_inner())
        }
        CursorCommand::Decode { cursor, strict } => {
            let policy = if strict {
                CursorPolicy::Strict
            } else {
                CursorPolicy::Lenient
            };
            let decoded = Cursor::from(cursor).decode(policy)?;
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "collection": decoded.collection,
                "key": decoded.key,
            }))?)
        }
    }
}
