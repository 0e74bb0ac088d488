//! Pasture Backend API
//!
//! Typed endpoints of the pasture backend, built on the shared
//! [`ApiClient`]. Calls go through the client, so they share its payload
//! unwrapping and error observers.
//!
//! # Endpoints
//!
//! - `GET /health` - Backend status
//! - `GET /api/fields` - List fields
//! - `GET /api/fields/{id}` - Single field
//! - `GET /api/fields/{id}/timeseries` - Sensor series (`metric`, `periods`)
//! - `POST /api/fields` - Ingest or upsert a field document
//! - `POST /api/fields/{id}/ingest-sensors` - Ingest sensor rows

mod types;

pub use types::{Field, HealthStatus, IngestReceipt, SensorReading, TimeseriesQuery, DEFAULT_PERIODS};

use reqwest::Method;

use crate::client::{ApiClient, ApiResult, RequestOptions};

/// Typed facade over the shared client
#[derive(Debug, Clone, Copy)]
pub struct PastureApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PastureApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.client.get("/health").await
    }

    pub async fn list_fields(&self) -> ApiResult<Vec<Field>> {
        self.client.get("/api/fields").await
    }

    pub async fn get_field(&self, field_id: &str) -> ApiResult<Field> {
        self.client.get(&field_path(field_id)).await
    }

    /// Sensor readings for a field, in the order the backend returns them
    pub async fn field_timeseries(
        &self,
        field_id: &str,
        query: &TimeseriesQuery,
    ) -> ApiResult<Vec<SensorReading>> {
        let mut options = RequestOptions::new().query("periods", query.periods);
        if let Some(metric) = &query.metric {
            options = options.query("metric", metric);
        }

        let path = format!("{}/timeseries", field_path(field_id));
        self.client.send(Method::GET, &path, options).await
    }

    pub async fn ingest_field(&self, field: &Field) -> ApiResult<IngestReceipt> {
        let receipt: IngestReceipt = self.client.post("/api/fields", field).await?;
        tracing::debug!(field_id = %field.id, stored = ?receipt.stored, "Field ingested");
        Ok(receipt)
    }

    pub async fn ingest_sensors(
        &self,
        field_id: &str,
        readings: &[SensorReading],
    ) -> ApiResult<IngestReceipt> {
        let path = format!("{}/ingest-sensors", field_path(field_id));
        let receipt: IngestReceipt = self.client.post(&path, readings).await?;
        tracing::debug!(field_id, rows = ?receipt.rows, "Sensor rows ingested");
        Ok(receipt)
    }
}

fn field_path(field_id: &str) -> String {
    format!("/api/fields/{}", urlencoding::encode(field_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{test_server::spawn, ApiError, RequestInfo};
    use crate::config::ClientConfig;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample_field(id: &str) -> Value {
        json!({
            "_id": id,
            "farm_id": "farm_1",
            "name": format!("Pasture {id}"),
            "boundary": {"type": "Polygon", "coordinates": []},
            "soil_type": "clay",
        })
    }

    fn reading(field_id: &str, metric: &str, value: f64) -> SensorReading {
        SensorReading {
            field_id: field_id.to_string(),
            sensor_ts: Some("2024-05-01T10:00:00".to_string()),
            sensor_id: Some(format!("sensor_{metric}")),
            metric_type: Some(metric.to_string()),
            metric_value: Some(value),
            quality_flag: Some(0),
        }
    }

    fn mock_backend() -> Router {
        Router::new()
            .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
            .route(
                "/api/fields",
                get(|| async { Json(json!([sample_field("field_1"), sample_field("field_2")])) })
                    .post(|Json(field): Json<Value>| async move {
                        assert!(field.get("_id").is_some());
                        (
                            StatusCode::CREATED,
                            Json(json!({"status": "accepted", "stored": false})),
                        )
                    }),
            )
            .route(
                "/api/fields/:id",
                get(|Path(id): Path<String>| async move {
                    if id == "missing" {
                        Err((StatusCode::NOT_FOUND, Json(json!({"detail": "not found"}))))
                    } else {
                        Ok(Json(sample_field(&id)))
                    }
                }),
            )
            .route(
                "/api/fields/:id/timeseries",
                get(
                    |Path(id): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                        if id == "sparse" {
                            return Json(json!([{
                                "field_id": id,
                                "sensor_ts": null,
                                "sensor_id": "sensor_ndvi",
                                "metric_type": "ndvi",
                                "metric_value": null
                            }]));
                        }
                        let periods: usize = params["periods"].parse().unwrap();
                        let metric = params
                            .get("metric")
                            .cloned()
                            .unwrap_or_else(|| "ndvi".to_string());
                        let rows: Vec<Value> = (0..periods)
                            .map(|i| {
                                json!({
                                    "field_id": id,
                                    "sensor_ts": "2024-05-01T10:00:00",
                                    "sensor_id": format!("sensor_{metric}"),
                                    "metric_type": metric,
                                    "metric_value": i as f64,
                                    "quality_flag": 0
                                })
                            })
                            .collect();
                        Json(Value::Array(rows))
                    },
                ),
            )
            .route(
                "/api/fields/:id/ingest-sensors",
                axum::routing::post(|Json(rows): Json<Vec<Value>>| async move {
                    if rows.is_empty() {
                        Err((
                            StatusCode::SERVICE_UNAVAILABLE,
                            Json(json!({"detail": "No database clients available to ingest data"})),
                        ))
                    } else {
                        Ok(Json(json!({"status": "accepted", "rows": rows.len()})))
                    }
                }),
            )
    }

    async fn setup() -> (ApiClient, Arc<AtomicUsize>) {
        let base_url = spawn(mock_backend()).await;
        let observed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&observed);

        let client = ApiClient::builder(ClientConfig::new(base_url))
            .observer(move |_: &RequestInfo, _: &ApiError| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        (client, observed)
    }

    #[test]
    fn test_field_path_encoding() {
        assert_eq!(field_path("field_1"), "/api/fields/field_1");
        assert_eq!(field_path("north/east 2"), "/api/fields/north%2Feast%202");
    }

    #[tokio::test]
    async fn test_health_and_fields() {
        let (client, observed) = setup().await;
        let api = PastureApi::new(&client);

        assert!(api.health().await.unwrap().is_ok());

        let fields = api.list_fields().await.unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].id, "field_2");

        let field = api.get_field("field_7").await.unwrap();
        assert_eq!(field.name, "Pasture field_7");
        assert_eq!(field.soil_type.as_deref(), Some("clay"));

        assert_eq!(observed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_field_goes_through_observer() {
        let (client, observed) = setup().await;
        let api = PastureApi::new(&client);

        let err = api.get_field("missing").await.unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeseries_query() {
        let (client, _) = setup().await;
        let api = PastureApi::new(&client);

        let rows = api
            .field_timeseries("field_1", &TimeseriesQuery::default().metric("soil_moisture").periods(3))
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.metric_type.as_deref() == Some("soil_moisture")));
        assert_eq!(rows[2].metric_value, Some(2.0));

        let rows = api
            .field_timeseries("field_1", &TimeseriesQuery::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), DEFAULT_PERIODS as usize);
        assert_eq!(rows[0].metric_type.as_deref(), Some("ndvi"));
    }

    #[tokio::test]
    async fn test_timeseries_with_null_columns() {
        let (client, observed) = setup().await;
        let api = PastureApi::new(&client);

        let rows = api
            .field_timeseries("sparse", &TimeseriesQuery::default())
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field_id, "sparse");
        assert!(rows[0].sensor_ts.is_none());
        assert!(rows[0].metric_value.is_none());
        assert_eq!(observed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ingest() {
        let (client, observed) = setup().await;
        let api = PastureApi::new(&client);

        let field: Field = serde_json::from_value(sample_field("field_9")).unwrap();
        let receipt = api.ingest_field(&field).await.unwrap();
        assert!(receipt.is_accepted());
        assert_eq!(receipt.stored, Some(false));

        let readings = vec![
            reading("field_9", "soil_moisture", 12.5),
            reading("field_9", "ndvi", 0.52),
        ];
        let receipt = api.ingest_sensors("field_9", &readings).await.unwrap();
        assert_eq!(receipt.rows, Some(2));

        let err = api.ingest_sensors("field_9", &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }
}
