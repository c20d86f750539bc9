//! Lookup references to rows of another table.

use serde::Serialize;
use serde_json::Value;

/// A lookup column value as returned by the backend.
///
/// Depending on the query the backend either returns the bare id of the
/// referenced row or an expanded `{Id, Name}` object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupRef {
    Bare(i32),
    Expanded { id: i32, name: Option<String> },
}

impl LookupRef {
    /// Normalizes any accepted lookup shape. Returns `None` for null, empty,
    /// non-positive or otherwise unusable values.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let id = map.get("Id").and_then(positive_id)?;
                let name = map
                    .get("Name")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                Some(Self::Expanded { id, name })
            }
            other => positive_id(other).map(Self::Bare),
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            Self::Bare(id) | Self::Expanded { id, .. } => *id,
        }
    }

    /// Denormalized display name of the referenced row, when expanded.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Bare(_) => None,
            Self::Expanded { name, .. } => name.as_deref(),
        }
    }
}

fn positive_id(value: &Value) -> Option<i32> {
    let id = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    i32::try_from(id).ok().filter(|id| *id > 0)
}
