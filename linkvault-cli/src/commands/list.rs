//! List command implementation.
//!
//! This module implements the `list` command, which displays every link with
//! its live state in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{format_timestamp, open_store, shorten_path, GlobalOptions};
use clap::{Args, ValueEnum};
use linkvault::{LinkEngine, LinkState, LinkStatus};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 7] = [
    "name",
    "state",
    "kind",
    "type",
    "original_path",
    "synced_path",
    "created_at",
];

/// List managed links.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "LINKVAULT_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Only show links in this state
    #[arg(long, value_enum)]
    pub state: Option<StateFilter>,

    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

/// State filter for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StateFilter {
    /// Healthy links
    Linked,
    /// Links whose artifact is missing or broken
    Broken,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Open the store
        let store = open_store(global)?;

        // 2. Probe every link
        let mut links = LinkEngine::new(&store).list();

        // 3. Apply filters
        if let Some(filter) = self.state {
            let wanted = match filter {
                StateFilter::Linked => LinkState::Linked,
                StateFilter::Broken => LinkState::Broken,
            };
            links.retain(|link| link.state == wanted);
        }

        // 4. Format and output to stdout
        match self.format {
            OutputFormat::Table => format_as_table(&links, self.show_full_paths)?,
            OutputFormat::Json => format_as_json(&links)?,
            OutputFormat::Csv => format_as_csv(&links)?,
            OutputFormat::Tsv => format_as_tsv(&links)?,
        }

        Ok(())
    }
}

/// The column values of one link, in [`COLUMN_HEADERS`] order.
fn row(link: &LinkStatus, display_path: impl Fn(&std::path::Path) -> String) -> [String; 7] {
    match link.record {
        Some(ref record) => [
            link.name.clone(),
            link.state.to_string(),
            record.artifact_kind().to_string(),
            (if record.is_directory() { "dir" } else { "file" }).to_string(),
            display_path(record.original_path()),
            display_path(record.synced_path()),
            format_timestamp(record.created_at()),
        ],
        None => [
            link.name.clone(),
            link.state.to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ],
    }
}

/// Format links as a human-readable table.
fn format_as_table(links: &[LinkStatus], show_full: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for link in links {
        let fields = row(link, |path| {
            if show_full {
                path.display().to_string()
            } else {
                shorten_path(path)
            }
        });
        writeln!(handle, "{}", fields.join("\t"))?;
    }

    Ok(())
}

/// Format links as JSON.
fn format_as_json(links: &[LinkStatus]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Build a JSON array of link objects
    let json_data: Vec<serde_json::Value> = links
        .iter()
        .filter_map(|link| {
            link.record.as_ref().map(|record| {
                serde_json::json!({
                    "name": link.name,
                    "state": link.state,
                    "kind": record.artifact_kind(),
                    "is_directory": record.is_directory(),
                    "original_path": record.original_path().display().to_string(),
                    "synced_path": record.synced_path().display().to_string(),
                    "created_at": record.created_at().to_rfc3339(),
                })
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format links as delimited output (CSV or TSV).
fn format_as_delimited(links: &[LinkStatus], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for link in links {
        writer
            .write_record(row(link, |path| path.display().to_string()))
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}

/// Format links as CSV.
fn format_as_csv(links: &[LinkStatus]) -> Result<(), CliError> {
    format_as_delimited(links, b',')
}

/// Format links as TSV (tab-separated values).
fn format_as_tsv(links: &[LinkStatus]) -> Result<(), CliError> {
    format_as_delimited(links, b'\t')
}
