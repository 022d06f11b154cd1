//! Snowflake-backed station store.
//!
//! Talks to the Snowflake SQL REST API (`POST /api/v2/statements`) with a
//! bearer token and positional `?` bindings. Result sets come back as a
//! string matrix plus column metadata; rows are decoded by column name.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};

use crate::domain::Station;

use super::error::StoreError;
use super::{NearbyRow, StationStore};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Snowflake store.
#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    /// Account identifier (e.g. "myorg-myaccount")
    pub account: String,
    /// OAuth / programmatic access token
    pub token: String,
    /// Warehouse to run statements on
    pub warehouse: String,
    /// Database containing the stations table
    pub database: String,
    /// Schema containing the stations table
    pub schema: String,
    /// Base URL override (defaults to the account's snowflakecomputing.com host)
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SnowflakeConfig {
    /// Create a new config with the given account and token.
    pub fn new(account: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            token: token.into(),
            warehouse: String::new(),
            database: String::new(),
            schema: String::new(),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the warehouse, database and schema to run statements against.
    pub fn with_context(
        mut self,
        warehouse: impl Into<String>,
        database: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        self.warehouse = warehouse.into();
        self.database = database.into();
        self.schema = schema.into();
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.snowflakecomputing.com", self.account))
    }
}

/// A positional statement binding.
#[derive(Debug, Serialize)]
struct Binding {
    #[serde(rename = "type")]
    kind: &'static str,
    value: String,
}

impl Binding {
    fn real(v: f64) -> Self {
        Self {
            kind: "REAL",
            value: v.to_string(),
        }
    }

    fn fixed(v: i64) -> Self {
        Self {
            kind: "FIXED",
            value: v.to_string(),
        }
    }

    fn text(v: impl Into<String>) -> Self {
        Self {
            kind: "TEXT",
            value: v.into(),
        }
    }
}

/// Request body for the statements endpoint.
#[derive(Debug, Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    warehouse: &'a str,
    database: &'a str,
    schema: &'a str,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    bindings: HashMap<String, Binding>,
}

/// Successful response from the statements endpoint.
#[derive(Debug, Deserialize)]
struct StatementResponse {
    #[serde(rename = "resultSetMetaData")]
    metadata: ResultSetMetaData,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Deserialize)]
struct ResultSetMetaData {
    #[serde(rename = "rowType")]
    row_type: Vec<ColumnType>,
}

#[derive(Debug, Deserialize)]
struct ColumnType {
    name: String,
}

/// Snowflake SQL API client for the stations table.
#[derive(Debug, Clone)]
pub struct SnowflakeStore {
    http: reqwest::Client,
    base_url: String,
    warehouse: String,
    database: String,
    schema: String,
    configured: bool,
}

impl SnowflakeStore {
    /// Create a new store client.
    ///
    /// Missing credentials are tolerated here (the server still starts);
    /// queries then fail with [`StoreError::NotConfigured`].
    pub fn new(config: SnowflakeConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let bearer = format!("Bearer {}", config.token);
        let auth = HeaderValue::from_str(&bearer).map_err(|_| StoreError::Response {
            message: "invalid token format".to_string(),
        })?;
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let configured = !config.account.is_empty() && !config.token.is_empty();

        Ok(Self {
            http,
            base_url: config.resolved_base_url(),
            warehouse: config.warehouse,
            database: config.database,
            schema: config.schema,
            configured,
        })
    }

    /// Execute a statement and return the parsed result set.
    async fn execute(
        &self,
        statement: &str,
        bindings: Vec<Binding>,
    ) -> Result<StatementResponse, StoreError> {
        if !self.configured {
            return Err(StoreError::NotConfigured(
                "SNOWFLAKE_ACCOUNT / SNOWFLAKE_TOKEN not set".to_string(),
            ));
        }

        let bindings: HashMap<String, Binding> = bindings
            .into_iter()
            .enumerate()
            .map(|(i, b)| ((i + 1).to_string(), b))
            .collect();

        let body = StatementRequest {
            statement,
            warehouse: &self.warehouse,
            database: &self.database,
            schema: &self.schema,
            bindings,
        };

        let url = format!("{}/api/v2/statements", self.base_url);
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| StoreError::Response {
            message: e.to_string(),
        })
    }
}

impl StationStore for SnowflakeStore {
    async fn query_by_radius(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<NearbyRow>, StoreError> {
        // Haversine in SQL; the alias is filtered via a subselect. This is
        // the authoritative distance, the resolver does not recompute it.
        let statement = "\
            SELECT id, name, latitude, longitude, energy_type, available, distance_km \
            FROM ( \
                SELECT id, name, latitude, longitude, energy_type, available, \
                       (6371 * ACOS(COS(RADIANS(?)) * COS(RADIANS(latitude)) * \
                        COS(RADIANS(longitude) - RADIANS(?)) + \
                        SIN(RADIANS(?)) * SIN(RADIANS(latitude)))) AS distance_km \
                FROM stations \
            ) \
            WHERE distance_km <= ? \
            ORDER BY distance_km";

        let response = self
            .execute(
                statement,
                vec![
                    Binding::real(lat),
                    Binding::real(lon),
                    Binding::real(lat),
                    Binding::real(radius_km),
                ],
            )
            .await?;

        parse_nearby_rows(&response)
    }

    async fn list(&self, limit: usize) -> Result<Vec<Station>, StoreError> {
        let statement = "\
            SELECT id, name, latitude, longitude, energy_type, available \
            FROM stations \
            ORDER BY created_at DESC \
            LIMIT ?";

        let response = self
            .execute(statement, vec![Binding::fixed(limit as i64)])
            .await?;

        parse_stations(&response)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let statement = "SELECT COUNT(*) AS count FROM stations";
        let response = self.execute(statement, Vec::new()).await?;

        let rows = Rows::new(&response);
        let row = response.data.first().ok_or_else(|| StoreError::Response {
            message: "count query returned no rows".to_string(),
        })?;

        Ok(rows.get_i64(row, "count")? as u64)
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Station>, StoreError> {
        let statement = "\
            SELECT id, name, latitude, longitude, energy_type, available \
            FROM stations \
            WHERE LOWER(name) LIKE LOWER(?) \
               OR LOWER(town) LIKE LOWER(?) \
               OR LOWER(state) LIKE LOWER(?) \
            ORDER BY name \
            LIMIT ?";

        let pattern = format!("%{term}%");
        let response = self
            .execute(
                statement,
                vec![
                    Binding::text(pattern.clone()),
                    Binding::text(pattern.clone()),
                    Binding::text(pattern),
                    Binding::fixed(limit as i64),
                ],
            )
            .await?;

        parse_stations(&response)
    }
}

/// Column-name → index lookup over a result set.
///
/// Snowflake uppercases unquoted identifiers, so lookups are
/// case-insensitive.
struct Rows {
    columns: HashMap<String, usize>,
}

impl Rows {
    fn new(response: &StatementResponse) -> Self {
        let columns = response
            .metadata
            .row_type
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.to_lowercase(), i))
            .collect();
        Self { columns }
    }

    fn get_str<'a>(&self, row: &'a [Option<String>], name: &str) -> Result<&'a str, StoreError> {
        let idx = *self.columns.get(name).ok_or_else(|| StoreError::Response {
            message: format!("missing column: {name}"),
        })?;
        row.get(idx)
            .and_then(|v| v.as_deref())
            .ok_or_else(|| StoreError::Response {
                message: format!("null value in column: {name}"),
            })
    }

    fn get_f64(&self, row: &[Option<String>], name: &str) -> Result<f64, StoreError> {
        let raw = self.get_str(row, name)?;
        raw.parse().map_err(|_| StoreError::Response {
            message: format!("non-numeric value in column {name}: {raw}"),
        })
    }

    fn get_i64(&self, row: &[Option<String>], name: &str) -> Result<i64, StoreError> {
        let raw = self.get_str(row, name)?;
        raw.parse().map_err(|_| StoreError::Response {
            message: format!("non-integer value in column {name}: {raw}"),
        })
    }

    fn get_bool(&self, row: &[Option<String>], name: &str) -> Result<bool, StoreError> {
        let raw = self.get_str(row, name)?;
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(StoreError::Response {
                message: format!("non-boolean value in column {name}: {other}"),
            }),
        }
    }

    fn station(&self, row: &[Option<String>]) -> Result<Station, StoreError> {
        Ok(Station {
            id: self.get_i64(row, "id")?,
            name: self.get_str(row, "name")?.to_string(),
            latitude: self.get_f64(row, "latitude")?,
            longitude: self.get_f64(row, "longitude")?,
            energy_type: self.get_str(row, "energy_type")?.to_string(),
            available: self.get_bool(row, "available")?,
        })
    }
}

fn parse_stations(response: &StatementResponse) -> Result<Vec<Station>, StoreError> {
    let rows = Rows::new(response);
    response.data.iter().map(|row| rows.station(row)).collect()
}

fn parse_nearby_rows(response: &StatementResponse) -> Result<Vec<NearbyRow>, StoreError> {
    let rows = Rows::new(response);
    response
        .data
        .iter()
        .map(|row| {
            Ok(NearbyRow {
                station: rows.station(row)?,
                distance_km: rows.get_f64(row, "distance_km")?,
            })
        })
        .collect()
}
