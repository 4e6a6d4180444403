// Ingestion service - Fetch, decode and publish a fresh time-series store
use crate::application::sensor_transport::SensorTransport;
use crate::domain::schema::{UnknownSensorKind, schema_for};
use crate::domain::store::{StoreSource, TimeSeriesStore};
use crate::domain::time_frame::TimeFrame;
use crate::infrastructure::sensor_payload::{PayloadError, decode_store};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestionError {
    #[error(transparent)]
    UnknownSensorKind(#[from] UnknownSensorKind),
    #[error("failed to fetch {kind} data: {message}")]
    TransportFailure { kind: String, message: String },
    #[error("malformed {kind} payload: {reason}")]
    DecodeFailure { kind: String, reason: String },
    #[error("malformed {kind} payload: record {record}, field `{field}` is not a number: {value}")]
    MalformedValue {
        kind: String,
        record: usize,
        field: String,
        value: String,
    },
}

impl IngestionError {
    fn from_payload(kind: &str, err: PayloadError) -> Self {
        match err {
            PayloadError::Decode(reason) => Self::DecodeFailure {
                kind: kind.to_string(),
                reason,
            },
            PayloadError::MalformedValue {
                record,
                field,
                value,
            } => Self::MalformedValue {
                kind: kind.to_string(),
                record,
                field,
                value,
            },
        }
    }
}

/// A fetch that has been issued but not yet run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionRequest {
    pub sequence: u64,
    pub kind: String,
    pub time_frame: TimeFrame,
}

/// A finished fetch, tagged with the request it answers
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub request: IngestionRequest,
    pub result: Result<TimeSeriesStore, IngestionError>,
}

pub struct IngestionPipeline {
    transport: Arc<dyn SensorTransport>,
    base_url: String,
    api_key: String,
    last_sequence: AtomicU64,
}

impl IngestionPipeline {
    pub fn new(transport: Arc<dyn SensorTransport>, base_url: String, api_key: String) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{}/", base_url)
        };
        Self {
            transport,
            base_url,
            api_key,
            last_sequence: AtomicU64::new(0),
        }
    }

    /// `{base_url}{kind}/{api_key}/{time_frame}`
    pub fn request_url(&self, kind: &str, time_frame: TimeFrame) -> String {
        format!(
            "{}{}/{}/{}",
            self.base_url,
            urlencoding::encode(kind),
            urlencoding::encode(&self.api_key),
            time_frame
        )
    }

    /// Fetch and decode one batch. Fails as a whole; never returns a partial store.
    pub async fn ingest(
        &self,
        kind: &str,
        time_frame: TimeFrame,
    ) -> Result<TimeSeriesStore, IngestionError> {
        let schema = schema_for(kind)?;
        let url = self.request_url(kind, time_frame);

        tracing::debug!("Fetching {} data for {}", kind, time_frame);
        let body = self.transport.fetch(&url).await.map_err(|e| {
            tracing::error!("Fetching {} data failed: {:#}", kind, e);
            IngestionError::TransportFailure {
                kind: kind.to_string(),
                message: format!("{:#}", e),
            }
        })?;

        let source = StoreSource {
            kind: kind.to_string(),
            time_frame,
        };
        let store = decode_store(schema, source, &body).map_err(|e| {
            tracing::error!("Decoding {} payload failed: {}", kind, e);
            IngestionError::from_payload(kind, e)
        })?;

        tracing::debug!("Decoded {} {} records for {}", store.len(), kind, time_frame);
        Ok(store)
    }

    /// Tag a new fetch with the next sequence number
    pub fn issue(&self, kind: &str, time_frame: TimeFrame) -> IngestionRequest {
        let sequence = self.last_sequence.fetch_add(1, Ordering::Relaxed) + 1;
        IngestionRequest {
            sequence,
            kind: kind.to_string(),
            time_frame,
        }
    }

    pub async fn run(&self, request: IngestionRequest) -> Ingestion {
        let result = self.ingest(&request.kind, request.time_frame).await;
        Ingestion { request, result }
    }
}

/// Outcome of offering a finished fetch to a [`StoreSlot`]
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Replaced { kind: String, time_frame: TimeFrame, points: usize },
    Failed { kind: String, error: IngestionError },
    /// A newer request has already settled; this one was dropped
    Stale { sequence: u64 },
}

/// Holds the published store and the newest request that has settled.
///
/// Stores are swapped whole. A response older than the newest settled request,
/// successful or not, is discarded so a slow reply cannot overwrite a newer selection.
#[derive(Debug, Default)]
pub struct StoreSlot {
    current: Arc<TimeSeriesStore>,
    settled: u64,
}

impl StoreSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Arc<TimeSeriesStore> {
        Arc::clone(&self.current)
    }

    pub fn apply(&mut self, ingestion: Ingestion) -> Applied {
        let Ingestion { request, result } = ingestion;

        if request.sequence <= self.settled {
            tracing::warn!(
                "Discarding stale {} response (request {}, settled {})",
                request.kind,
                request.sequence,
                self.settled
            );
            return Applied::Stale {
                sequence: request.sequence,
            };
        }
        self.settled = request.sequence;

        match result {
            Ok(store) => {
                let points = store.len();
                self.current = Arc::new(store);
                tracing::info!("Replaced store with {} {} points", points, request.kind);
                Applied::Replaced {
                    kind: request.kind,
                    time_frame: request.time_frame,
                    points,
                }
            }
            Err(error) => Applied::Failed {
                kind: request.kind,
                error,
            },
        }
    }
}
