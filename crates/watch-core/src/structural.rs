//! Typed resource <-> structural JSON conversion.
//!
//! Each resource type declares an ordered field table (`Structural::FIELDS`).
//! Encoding walks the table and emits one member per present field; decoding
//! walks the same table, ignores unknown members and fails on the first member
//! whose JSON type does not match the declared kind.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value};
use thiserror::Error;

/// JSON shape a field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Integer,
    String,
    /// Binary payload carried as standard (padded) base64 text.
    Base64,
}

impl JsonKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            JsonKind::Integer => "integer",
            JsonKind::String => "string",
            JsonKind::Base64 => "base64 string",
        }
    }
}

/// One entry of a resource's field table.
pub struct Field<T> {
    pub name: &'static str,
    pub kind: JsonKind,
    /// Returns `None` when the field is absent on the resource.
    pub encode: fn(&T) -> Option<Value>,
    /// Called only when the member is present in the document (including `null`).
    pub decode: fn(&mut T, &Value) -> Result<(), ConversionError>,
}

/// A resource with a statically declared structural form.
///
/// `Default` must produce the all-absent value; decoding starts from it.
pub trait Structural: Default + Sized + 'static {
    const FIELDS: &'static [Field<Self>];

    fn field(name: &str) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }
}

/// The merged document could not be decoded into the typed resource.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("field '{field}': expected {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field '{field}': value {value} is out of range")]
    OutOfRange { field: &'static str, value: String },

    #[error("field '{field}': invalid base64 payload: {source}")]
    InvalidBase64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },
}

impl ConversionError {
    /// The offending field, when the failure concerns a single member.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConversionError::WrongType { field, .. }
            | ConversionError::OutOfRange { field, .. }
            | ConversionError::InvalidBase64 { field, .. } => Some(field),
            ConversionError::InvalidJson(_) | ConversionError::NotAnObject { .. } => None,
        }
    }
}

/// Encode a resource as a JSON object keyed by its field names.
pub fn to_structural<T: Structural>(resource: &T) -> Value {
    let mut map = Map::with_capacity(T::FIELDS.len());
    for field in T::FIELDS {
        if let Some(v) = (field.encode)(resource) {
            map.insert(field.name.to_string(), v);
        }
    }
    Value::Object(map)
}

/// Decode a JSON object into a resource.
///
/// Missing members (and explicit `null`s) leave the field absent; they are not
/// an error here, validation decides whether absence is acceptable.
pub fn from_structural<T: Structural>(doc: &Value) -> Result<T, ConversionError> {
    let obj = doc
        .as_object()
        .ok_or(ConversionError::NotAnObject { found: kind_of(doc) })?;

    let mut out = T::default();
    for field in T::FIELDS {
        if let Some(v) = obj.get(field.name) {
            (field.decode)(&mut out, v)?;
        }
    }
    Ok(out)
}

/// Parse JSON text and decode it.
pub fn from_structural_str<T: Structural>(s: &str) -> Result<T, ConversionError> {
    let v: Value = serde_json::from_str(s).map_err(ConversionError::InvalidJson)?;
    from_structural(&v)
}

/// Human name of a value's JSON type, used in diagnostics.
pub fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode an integer member into any integer type that fits.
pub fn decode_integer<I>(field: &'static str, v: &Value) -> Result<Option<I>, ConversionError>
where
    I: TryFrom<i64>,
{
    let n = match v {
        Value::Null => return Ok(None),
        Value::Number(n) => n,
        other => {
            return Err(ConversionError::WrongType {
                field,
                expected: JsonKind::Integer.as_str(),
                found: kind_of(other),
            });
        }
    };

    let out_of_range = || ConversionError::OutOfRange {
        field,
        value: n.to_string(),
    };

    let wide = if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        i64::try_from(u).map_err(|_| out_of_range())?
    } else {
        let f = n.as_f64().ok_or_else(out_of_range)?;
        if f.fract() != 0.0 {
            return Err(ConversionError::WrongType {
                field,
                expected: JsonKind::Integer.as_str(),
                found: "fractional number",
            });
        }
        // Integral floats such as `250.0` are accepted only while exact.
        if !(-MAX_EXACT_FLOAT_INTEGER..=MAX_EXACT_FLOAT_INTEGER).contains(&f) {
            return Err(out_of_range());
        }
        f as i64
    };

    I::try_from(wide).map(Some).map_err(|_| out_of_range())
}

/// 2^53: beyond this an f64 no longer represents every integer.
const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub fn decode_text(field: &'static str, v: &Value) -> Result<Option<String>, ConversionError> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(ConversionError::WrongType {
            field,
            expected: JsonKind::String.as_str(),
            found: kind_of(other),
        }),
    }
}

pub fn decode_base64(field: &'static str, v: &Value) -> Result<Option<Vec<u8>>, ConversionError> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => STANDARD
            .decode(s)
            .map(Some)
            .map_err(|source| ConversionError::InvalidBase64 { field, source }),
        other => Err(ConversionError::WrongType {
            field,
            expected: JsonKind::Base64.as_str(),
            found: kind_of(other),
        }),
    }
}

pub fn encode_base64(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}
