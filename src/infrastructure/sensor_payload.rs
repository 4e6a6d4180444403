// Sensor payload decoding - `{ "data": [ {...}, ... ] }` documents into a column store
use crate::domain::schema::{FieldSpec, SensorSchema};
use crate::domain::store::{StoreBuilder, StoreSource, TimeSeriesStore};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("{0}")]
    Decode(String),
    #[error("record {record}: field `{field}` is not a number: {value}")]
    MalformedValue {
        record: usize,
        field: String,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
struct SensorResponse {
    // `null` means no readings for the period; a missing key is a malformed document
    #[serde(deserialize_with = "records_or_null")]
    data: Vec<RawRecord>,
}

fn records_or_null<'de, D>(deserializer: D) -> Result<Vec<RawRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the `data` array, kept as raw JSON until checked against a schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn id(&self) -> Option<i64> {
        self.fields.get("id").and_then(Value::as_i64)
    }

    fn timestamp(&self, record: usize, field: &FieldSpec) -> Result<String, PayloadError> {
        match self.fields.get(field.name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Null) | None => Err(missing_field(record, field)),
            Some(other) => Err(PayloadError::Decode(format!(
                "record {}: timestamp `{}` must be a string, got {}",
                record, field.name, other
            ))),
        }
    }

    /// Numeric fields accept JSON numbers and decimal strings alike
    fn numeric(&self, record: usize, field: &FieldSpec) -> Result<f64, PayloadError> {
        let malformed = |value: String| PayloadError::MalformedValue {
            record,
            field: field.name.to_string(),
            value,
        };

        match self.fields.get(field.name) {
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| malformed(n.to_string())),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| malformed(format!("{:?}", s))),
            Some(Value::Null) | None => Err(missing_field(record, field)),
            Some(other) => Err(PayloadError::Decode(format!(
                "record {}: field `{}` has unexpected type: {}",
                record, field.name, other
            ))),
        }
    }
}

fn missing_field(record: usize, field: &FieldSpec) -> PayloadError {
    PayloadError::Decode(format!("record {} is missing field `{}`", record, field.name))
}

/// Parse the response envelope into raw records
pub fn decode_records(text: &str) -> Result<Vec<RawRecord>, PayloadError> {
    serde_json::from_str::<SensorResponse>(text)
        .map(|response| response.data)
        .map_err(|e| PayloadError::Decode(format!("invalid sensor response: {}", e)))
}

/// Decode a full payload for `schema`. Any bad record fails the whole document.
pub fn decode_store(
    schema: &SensorSchema,
    source: StoreSource,
    text: &str,
) -> Result<TimeSeriesStore, PayloadError> {
    let records = decode_records(text)?;
    let timestamp_field = schema.timestamp_field();
    let numeric_fields: Vec<&FieldSpec> = schema.numeric_fields().collect();

    let mut builder = StoreBuilder::new(source, schema.parameters()).with_capacity(records.len());
    let mut row = Vec::with_capacity(numeric_fields.len());

    for (index, record) in records.iter().enumerate() {
        let timestamp = record.timestamp(index, timestamp_field)?;
        row.clear();
        for field in &numeric_fields {
            row.push(record.numeric(index, field)?);
        }
        builder.push_row(timestamp, &row);
    }

    Ok(builder.build())
}
