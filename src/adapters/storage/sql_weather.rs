use crate::domain::model::WeatherRecord;
use crate::domain::ports::WeatherSink;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};

pub const WEATHER_TABLE: &str = "weather_data";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS weather_data (
    city TEXT NOT NULL,
    temperature DOUBLE PRECISION NOT NULL,
    humidity BIGINT NOT NULL,
    wind_speed DOUBLE PRECISION NOT NULL,
    timestamp TEXT NOT NULL
)";

const INSERT_ROW: &str = "INSERT INTO weather_data (city, temperature, humidity, wind_speed, timestamp)
     VALUES ($1, $2, $3, $4, $5)";

/// Append-only `weather_data` table behind any sqlx-supported connection string
/// (`sqlite:` or `postgres://`). Timestamps are stored as RFC 3339 text.
pub struct SqlWeatherSink {
    pool: AnyPool,
}

impl SqlWeatherSink {
    /// A missing connection string is a configuration problem and is reported before any
    /// connection is attempted; everything after that is a persistence problem.
    pub async fn connect(database_uri: Option<&str>) -> Result<Self> {
        let uri = match database_uri.map(str::trim) {
            Some(uri) if !uri.is_empty() => uri,
            _ => {
                return Err(EtlError::MissingConfigError {
                    field: "DATABASE_URI".to_string(),
                })
            }
        };

        sqlx::any::install_default_drivers();
        // 單一連線：每次執行只寫入一筆，且 sqlite::memory: 需要共用同一條連線
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect(uri)
            .await?;

        let sink = Self { pool };
        sink.ensure_table().await?;
        Ok(sink)
    }

    async fn ensure_table(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Every stored row, oldest first.
    pub async fn load_all(&self) -> Result<Vec<WeatherRecord>> {
        let rows = sqlx::query(
            "SELECT city, temperature, humidity, wind_speed, timestamp FROM weather_data",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &AnyRow) -> Result<WeatherRecord> {
    let timestamp: String = row.try_get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(EtlError::persistence)?
        .with_timezone(&Utc);

    Ok(WeatherRecord {
        city: row.try_get("city")?,
        temperature: row.try_get("temperature")?,
        humidity: row.try_get("humidity")?,
        wind_speed: row.try_get("wind_speed")?,
        timestamp,
    })
}

#[async_trait]
impl WeatherSink for SqlWeatherSink {
    fn target(&self) -> &str {
        WEATHER_TABLE
    }

    async fn append(&self, record: &WeatherRecord) -> Result<()> {
        sqlx::query(INSERT_ROW)
            .bind(record.city.clone())
            .bind(record.temperature)
            .bind(record.humidity)
            .bind(record.wind_speed)
            .bind(record.timestamp.to_rfc3339())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Appended weather row for {}", record.city);
        Ok(())
    }
}
