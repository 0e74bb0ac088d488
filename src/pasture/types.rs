//! Backend DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default number of readings requested per time series
pub const DEFAULT_PERIODS: u32 = 48;

/// A pasture field document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "_id")]
    pub id: String,
    pub farm_id: String,
    pub name: String,
    /// GeoJSON geometry of the field boundary
    pub boundary: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establishment_date: Option<String>,
    /// Latest value per metric, e.g. `ndvi`, `soil_moisture`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_metrics: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Value>,
}

/// One sensor reading
///
/// Rows read back from the sensor store may have any column but
/// `field_id` missing or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub field_id: String,
    /// ISO 8601 timestamp
    #[serde(default)]
    pub sensor_ts: Option<String>,
    #[serde(default)]
    pub sensor_id: Option<String>,
    #[serde(default)]
    pub metric_type: Option<String>,
    #[serde(default)]
    pub metric_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_flag: Option<i32>,
}

/// Acknowledgement returned by ingest endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub status: String,
    /// Whether the field document was persisted
    #[serde(default)]
    pub stored: Option<bool>,
    /// Number of sensor rows accepted
    #[serde(default)]
    pub rows: Option<usize>,
}

impl IngestReceipt {
    pub fn is_accepted(&self) -> bool {
        self.status == "accepted"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Parameters for a field time-series request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeseriesQuery {
    /// Restrict to one metric type
    pub metric: Option<String>,
    pub periods: u32,
}

impl Default for TimeseriesQuery {
    fn default() -> Self {
        Self {
            metric: None,
            periods: DEFAULT_PERIODS,
        }
    }
}

impl TimeseriesQuery {
    pub fn metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub fn periods(mut self, periods: u32) -> Self {
        self.periods = periods;
        self
    }
}
