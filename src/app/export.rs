use crate::domain::model::{BoardView, Listing, Scope};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{Result, RotationError};
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(RotationError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid values: table, json, csv".to_string(),
            }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    section: &'a str,
    position: usize,
    tier: &'a str,
    id: &'a str,
    name: &'a str,
    category: &'a str,
    website: &'a str,
    presentation_key: String,
}

impl<'a> CsvRow<'a> {
    fn new(section: &'a str, position: usize, listing: &'a Listing, key: String) -> Self {
        Self {
            section,
            position,
            tier: listing.tier.as_str(),
            id: &listing.id,
            name: &listing.name,
            category: &listing.category,
            website: &listing.website,
            presentation_key: key,
        }
    }
}

fn render_csv(view: &BoardView) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (position, listing) in view.premium.iter().enumerate() {
        writer.serialize(CsvRow::new("premium", position + 1, listing, format!("premium-{}", listing.id)))?;
    }
    for scope in [Scope::Weekly, Scope::All] {
        for (position, entry) in view.scope(scope).iter().enumerate() {
            writer.serialize(CsvRow::new(
                scope.as_str(),
                position + 1,
                &entry.listing,
                entry.presentation_key.clone(),
            ))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RotationError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RotationError::ConfigValidationError {
        field: "csv".to_string(),
        message: e.to_string(),
    })
}

fn display_name(listing: &Listing) -> &str {
    if listing.name.is_empty() {
        &listing.id
    } else {
        &listing.name
    }
}

fn write_table(out: &mut String, view: &BoardView) -> std::fmt::Result {
    let c = view.countdown;

    writeln!(
        out,
        "🔄 Rotation bucket {} (next at {})",
        view.bucket_start.format("%Y-%m-%d %H:%M UTC"),
        view.next_rotation.format("%H:%M UTC")
    )?;
    writeln!(
        out,
        "⏳ Next launch in {}d {:02}h {:02}m {:02}s",
        c.days, c.hours, c.minutes, c.seconds
    )?;

    writeln!(out, "\n⭐ Premium")?;
    if view.premium.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (i, listing) in view.premium.iter().enumerate() {
        writeln!(out, "  {:>2}. {}  {}", i + 1, display_name(listing), listing.website)?;
    }

    for (title, scope) in [("📅 Weekly", Scope::Weekly), ("📋 All", Scope::All)] {
        writeln!(out, "\n{}", title)?;
        let entries = view.scope(scope);
        if entries.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for (i, entry) in entries.iter().enumerate() {
            writeln!(
                out,
                "  {:>2}. {:<8} {}  {}",
                i + 1,
                entry.tier().as_str(),
                display_name(&entry.listing),
                entry.listing.website
            )?;
        }
    }

    Ok(())
}

fn render_table(view: &BoardView) -> Result<String> {
    let mut out = String::new();
    write_table(&mut out, view)?;
    Ok(out)
}

pub fn render(view: &BoardView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => render_table(view),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Csv => render_csv(view),
    }
}

/// Writes rendered boards through a [`Storage`] backend.
pub struct BoardExporter<S: Storage> {
    storage: S,
    format: OutputFormat,
}

impl<S: Storage> BoardExporter<S> {
    pub fn new(storage: S, format: OutputFormat) -> Self {
        Self { storage, format }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Result<Self> {
        Ok(Self::new(storage, config.output_format().parse()?))
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub async fn export(&self, view: &BoardView, path: &str) -> Result<()> {
        let body = render(view, self.format)?;
        self.storage.write_file(path, body.as_bytes()).await?;
        tracing::info!(path, entries = view.all.len() + view.weekly.len(), "board written");
        Ok(())
    }
}
