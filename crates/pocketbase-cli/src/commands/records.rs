//! Records subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use pocketbase::ListParams;

use crate::cli::ServerArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RecordsCommand {
    /// Collection name
    #[arg(long, short)]
    pub collection: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: RecordsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordsSubcommand {
    /// List records, one JSON document per line
    List(ListArgs),

    /// Fetch a single record
    Get(GetArgs),

    /// Create a record from JSON data
    Create(DataArgs),

    /// Update a record with JSON data
    Update(UpdateArgs),

    /// Delete a record
    Delete(IdArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Records per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Sort expression, e.g. -created
    #[arg(long)]
    pub sort: Option<String>,

    /// Filter expression
    #[arg(long)]
    pub filter: Option<String>,

    /// Relations to expand
    #[arg(long)]
    pub expand: Option<String>,

    /// Fields to return
    #[arg(long)]
    pub fields: Option<String>,

    /// Fetch every page instead of one
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
}

impl ListArgs {
    fn params(&self) -> ListParams {
        ListParams {
            page: self.page,
            per_page: self.per_page,
            sort: self.sort.clone(),
            filter: self.filter.clone(),
            expand: self.expand.clone(),
            fields: self.fields.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Record ID
    pub id: String,

    /// Relations to expand
    #[arg(long)]
    pub expand: Option<String>,

    /// Fields to return
    #[arg(long)]
    pub fields: Option<String>,
}

#[derive(Args, Debug)]
pub struct DataArgs {
    /// Record data as a JSON object
    #[arg(long)]
    pub data: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Record ID
    pub id: String,

    /// Fields to change as a JSON object
    #[arg(long)]
    pub data: String,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Record ID
    pub id: String,
}

fn parse_data(data: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(data).context("Invalid JSON data")?;
    anyhow::ensure!(value.is_object(), "Record data must be a JSON object");
    Ok(value)
}

pub async fn handle(server: &ServerArgs, cmd: RecordsCommand) -> Result<()> {
    let client = session::connect(server)?;
    let records = client.collection::<Value>(cmd.collection);
    let pretty = cmd.pretty;

    match cmd.command {
        RecordsSubcommand::List(args) => {
            let params = args.params();
            let items = if args.all {
                records
                    .full_list(&params)
                    .await
                    .context("Failed to list records")?
            } else {
                let page = records
                    .list(&params)
                    .await
                    .context("Failed to list records")?;
                if page.total_pages > 0 {
                    output::note(&format!(
                        "Page {} of {} ({} records)",
                        page.page, page.total_pages, page.total_items
                    ));
                }
                page.items
            };

            if items.is_empty() {
                output::note("No records found.");
            }
            for item in &items {
                output::json(item, pretty)?;
            }
        }
        RecordsSubcommand::Get(args) => {
            let params = ListParams {
                expand: args.expand,
                fields: args.fields,
                ..ListParams::default()
            };
            let record = records
                .one_with_params(&args.id, &params)
                .await
                .context("Failed to get record")?;
            output::json(&record, pretty)?;
        }
        RecordsSubcommand::Create(args) => {
            let data = parse_data(&args.data)?;
            let meta = records
                .create(&data)
                .await
                .context("Failed to create record")?;
            output::success("Record created");
            output::field("ID", &meta.id);
            output::field("Created", &meta.created);
        }
        RecordsSubcommand::Update(args) => {
            let data = parse_data(&args.data)?;
            records
                .update(&args.id, &data)
                .await
                .context("Failed to update record")?;
            output::success("Record updated");
        }
        RecordsSubcommand::Delete(args) => {
            records
                .delete(&args.id)
                .await
                .context("Failed to delete record")?;
            output::success("Record deleted");
        }
    }

    Ok(())
}
