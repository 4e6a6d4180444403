// Sensor schema catalog - Static description of every supported sensor kind
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// JSON number
    Numeric,
    /// Decimal number encoded as a JSON string (e.g. `"61.3"`)
    StringNumeric,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the payload record
    pub name: &'static str,
    pub field_type: FieldType,
    /// Chart parameter name; equal to `name` unless the payload uses a short key
    pub parameter: &'static str,
}

impl FieldSpec {
    const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Numeric,
            parameter: name,
        }
    }

    const fn string_numeric(name: &'static str, parameter: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::StringNumeric,
            parameter,
        }
    }

    const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Timestamp,
            parameter: name,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.field_type, FieldType::Numeric | FieldType::StringNumeric)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSchema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
}

impl SensorSchema {
    pub fn timestamp_field(&self) -> &'static FieldSpec {
        // Every catalog entry carries exactly one timestamp field
        self.fields
            .iter()
            .find(|f| f.field_type == FieldType::Timestamp)
            .unwrap_or(&UPDATED_AT)
    }

    pub fn numeric_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().filter(|f| f.is_numeric())
    }

    /// Chart parameters in field order
    pub fn parameters(&self) -> Vec<&'static str> {
        self.numeric_fields().map(|f| f.parameter).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sensor kind: {0}")]
pub struct UnknownSensorKind(pub String);

const UPDATED_AT: FieldSpec = FieldSpec::timestamp("updated_at");

static CATALOG: &[SensorSchema] = &[
    SensorSchema {
        kind: "dht21",
        fields: &[
            FieldSpec::string_numeric("hum", "humidity"),
            FieldSpec::string_numeric("temp", "temperature"),
            UPDATED_AT,
        ],
    },
    SensorSchema {
        kind: "ccs811",
        fields: &[FieldSpec::numeric("eco2"), FieldSpec::numeric("tvoc"), UPDATED_AT],
    },
    SensorSchema {
        kind: "flowrate",
        fields: &[
            FieldSpec::numeric("flowrate"),
            FieldSpec::numeric("totalVolume"),
            UPDATED_AT,
        ],
    },
    SensorSchema {
        kind: "irradiance",
        fields: &[
            FieldSpec::numeric("irradiance"),
            FieldSpec::numeric("power_irr"),
            UPDATED_AT,
        ],
    },
    SensorSchema {
        kind: "pzem017",
        fields: &[
            FieldSpec::numeric("voltage"),
            FieldSpec::numeric("current"),
            FieldSpec::numeric("power"),
            FieldSpec::numeric("energy"),
            UPDATED_AT,
        ],
    },
    SensorSchema {
        kind: "tds",
        fields: &[
            FieldSpec::numeric("suhu"),
            FieldSpec::numeric("v_tds"),
            FieldSpec::numeric("tds"),
            FieldSpec::numeric("ec"),
            UPDATED_AT,
        ],
    },
    SensorSchema {
        kind: "ph",
        fields: &[FieldSpec::numeric("v_ph"), FieldSpec::numeric("ph"), UPDATED_AT],
    },
];

/// Look up the schema registered for `kind`
pub fn schema_for(kind: &str) -> Result<&'static SensorSchema, UnknownSensorKind> {
    CATALOG
        .iter()
        .find(|s| s.kind == kind)
        .ok_or_else(|| UnknownSensorKind(kind.to_string()))
}

/// All registered kinds in catalog order
pub fn sensor_kinds() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|s| s.kind)
}

/// Every chart parameter across the catalog, in catalog order
pub fn all_parameters() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().flat_map(|s| s.numeric_fields().map(|f| f.parameter))
}
