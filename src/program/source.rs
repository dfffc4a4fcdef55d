use super::ProgramTable;
use crate::config::DEFAULT_HTTP_TIMEOUT;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_RANGE: &str = "Sheet1!A:Z";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0} from program source")]
    Status(StatusCode),
    #[error("invalid source url '{0}'")]
    InvalidUrl(String),
}

/// Supplier of the raw program values: header row first, then data rows.
#[async_trait]
pub trait ProgramSource: Send + Sync {
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>, SourceError>;

    /// Never fails: any fetch or header problem yields an empty table.
    async fn fetch_table(&self) -> ProgramTable {
        let values = match self.fetch_values().await {
            Ok(values) => values,
            Err(err) => {
                warn!(error = %err, "program fetch failed, using empty table");
                return ProgramTable::empty();
            }
        };
        if values.is_empty() {
            debug!("program source returned no rows");
            return ProgramTable::empty();
        }
        match ProgramTable::from_values(values) {
            Ok(table) => {
                debug!(rows = table.rows().len(), "program table fetched");
                table
            }
            Err(err) => {
                warn!(error = %err, "program table malformed, using empty table");
                ProgramTable::empty()
            }
        }
    }
}

/// Fixed values held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    values: Vec<Vec<String>>,
}

impl StaticSource {
    pub fn new(values: Vec<Vec<String>>) -> Self {
        Self { values }
    }

    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

#[async_trait]
impl ProgramSource for StaticSource {
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>, SourceError> {
        Ok(self.values.clone())
    }
}

/// A local CSV export of the program sheet. Rows may have differing widths.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ProgramSource for CsvFileSource {
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_csv_values(&bytes)
    }
}

pub fn parse_csv_values(bytes: &[u8]) -> Result<Vec<Vec<String>>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        values.push(record.iter().map(str::to_string).collect());
    }
    Ok(values)
}

/// Reads a range through the spreadsheet values endpoint
/// (`GET {base}/v4/spreadsheets/{id}/values/{range}`).
#[derive(Debug, Clone)]
pub struct SheetsValuesSource {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsValuesSource {
    pub fn new(spreadsheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            client: default_client(),
            base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            api_key: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SourceError> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn values_url(&self) -> Result<Url, SourceError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| SourceError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                self.range.as_str(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl ProgramSource for SheetsValuesSource {
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>, SourceError> {
        let url = self.values_url()?;
        debug!(%url, "fetching program range");
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }
        let body: ValueRange = response.json().await?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

pub(crate) fn default_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "http client build failed, using reqwest defaults");
            Client::new()
        })
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
