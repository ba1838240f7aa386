//! Downloadable CSV and JSON exports.
//!
//! Records are flattened into ordered `(column, value)` pairs first, so the
//! CSV header and the JSON key order both follow the column order below.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{AccessRole, Country, Entity, Error, Mineral, RecordId};

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// MIME type sent with the download.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    /// Parse `csv` or `json`; matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(Error::unsupported_format("Invalid export format selected.")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A single exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ExportValue {
    fn to_csv_field(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => format_float(*value),
            Self::Text(value) => value.clone(),
        }
    }
}

/// Whole numbers keep a trailing `.0` so float columns read as floats.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl Serialize for ExportValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<i64> for ExportValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<RecordId> for ExportValue {
    fn from(value: RecordId) -> Self {
        Self::Integer(i64::from(value.get()))
    }
}

impl From<f64> for ExportValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ExportValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One flat row of named values, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRecord {
    fields: Vec<(String, ExportValue)>,
}

impl ExportRecord {
    /// Start an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<ExportValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for ExportRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Rows that can be exported.
pub trait Exportable {
    /// Entity whose label names the download.
    const ENTITY: Entity;

    /// Flatten into the export columns.
    fn export_record(&self) -> ExportRecord;

    /// Primary key, used to select rows.
    fn export_id(&self) -> RecordId;
}

impl Exportable for Country {
    const ENTITY: Entity = Entity::Country;

    fn export_record(&self) -> ExportRecord {
        ExportRecord::new()
            .field("CountryID", self.id)
            .field("CountryName", self.name.as_str())
            .field("GDP_BillionUSD", self.gdp_billion_usd)
            .field("MiningRevenue_BillionUSD", self.mining_revenue_billion_usd)
            .field("KeyProjects", self.key_projects.as_str())
    }

    fn export_id(&self) -> RecordId {
        self.id
    }
}

impl Exportable for Mineral {
    const ENTITY: Entity = Entity::Mineral;

    fn export_record(&self) -> ExportRecord {
        ExportRecord::new()
            .field("MineralID", self.id)
            .field("MineralName", self.name.as_str())
            .field("Description", self.description.as_str())
            .field("MarketPriceUSD_per_tonne", self.market_price_usd_per_tonne)
    }

    fn export_id(&self) -> RecordId {
        self.id
    }
}

/// Encoded bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

/// A download ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub filename: String,
}

/// Encode `records` as `format` (`csv` or `json`).
///
/// CSV output has a header taken from the first record and `\n` line
/// endings; no records give an empty buffer. JSON output is an array of
/// objects pretty-printed with two-space indentation.
///
/// # Errors
/// `UnsupportedFormat` for any other format string.
///
/// # Examples
/// ```
/// use mining_insights::domain::{export_rows, ExportRecord};
///
/// let rows = [ExportRecord::new().field("a", 1_i64).field("b", 2_i64)];
/// let payload = export_rows(&rows, "csv").unwrap();
/// assert_eq!(payload.bytes, b"a,b\n1,2\n");
/// assert_eq!(payload.mime, "text/csv");
/// ```
pub fn export_rows(records: &[ExportRecord], format: &str) -> Result<ExportPayload, Error> {
    let format: ExportFormat = format.parse()?;
    let bytes = encode(records, format)?;
    Ok(ExportPayload {
        bytes,
        mime: format.mime(),
    })
}

fn encode(records: &[ExportRecord], format: ExportFormat) -> Result<Vec<u8>, Error> {
    match format {
        ExportFormat::Csv => encode_csv(records),
        ExportFormat::Json => serde_json::to_vec_pretty(records)
            .map_err(|err| Error::internal(format!("failed to encode JSON export: {err}"))),
    }
}

fn encode_csv(records: &[ExportRecord]) -> Result<Vec<u8>, Error> {
    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };
    let csv_error = |err: csv::Error| Error::internal(format!("failed to encode CSV export: {err}"));

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(first.names()).map_err(csv_error)?;
    for record in records {
        writer
            .write_record(record.fields.iter().map(|(_, value)| value.to_csv_field()))
            .map_err(csv_error)?;
    }
    writer
        .into_inner()
        .map_err(|err| Error::internal(format!("failed to flush CSV export: {err}")))
}

/// `<role>_<entity>_export.<ext>`, e.g. `investor_country_export.csv`.
#[must_use]
pub fn export_filename(role: AccessRole, entity: Entity, format: ExportFormat) -> String {
    format!(
        "{}_{}_export.{}",
        role.path_segment(),
        entity.label(),
        format.extension()
    )
}

/// Rows whose id appears in `ids`, in store order. Unknown ids are ignored.
#[must_use]
pub fn select_by_ids<'a, T: Exportable>(rows: &'a [T], ids: &[RecordId]) -> Vec<&'a T> {
    rows.iter()
        .filter(|row| ids.contains(&row.export_id()))
        .collect()
}

/// Export the selected rows of one table for `role`.
///
/// # Errors
/// `UnsupportedFormat` for unknown formats; `InternalError` if encoding fails.
pub fn export_selection<T: Exportable>(
    role: AccessRole,
    rows: &[&T],
    format: &str,
) -> Result<ExportFile, Error> {
    let parsed: ExportFormat = format.parse()?;
    let records: Vec<ExportRecord> = rows.iter().map(|row| row.export_record()).collect();
    let ExportPayload { bytes, mime } = export_rows(&records, format)?;
    Ok(ExportFile {
        bytes,
        mime,
        filename: export_filename(role, T::ENTITY, parsed),
    })
}
