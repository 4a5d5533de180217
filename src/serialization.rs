use crate::value::Json;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

impl Serialize for Json {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Json::Null => serializer.serialize_unit(),
            Json::Boolean(value) => serializer.serialize_bool(*value),
            Json::Number(value) => serializer.serialize_f64(*value),
            Json::String(text) => serializer.serialize_str(text),
            Json::Array(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Json::Object(properties) => {
                // Entries are emitted in insertion order, duplicates
                // included; what a duplicate-name pair becomes is up to
                // the receiving format.
                let mut map = serializer.serialize_map(Some(properties.len()))?;
                for property in properties {
                    map.serialize_entry(property.name(), property.value())?;
                }
                map.end()
            }
        }
    }
}

/// Converts a [`Json`] tree into a `serde_json::Value`.
///
/// Non-finite numbers have no JSON representation and become `Null`, and a
/// duplicate property name keeps only its shadow-most value, since
/// `serde_json` objects are real maps.
pub fn to_serde_value(value: &Json) -> serde_json::Value {
    match value {
        Json::Null => serde_json::Value::Null,
        Json::Boolean(value) => serde_json::Value::Bool(*value),
        Json::Number(value) => serde_json::Number::from_f64(*value)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Json::String(text) => serde_json::Value::String(text.clone()),
        Json::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(to_serde_value).collect())
        }
        Json::Object(properties) => {
            let mut map = serde_json::Map::new();
            for property in properties {
                map.insert(property.name().to_string(), to_serde_value(property.value()));
            }
            serde_json::Value::Object(map)
        }
    }
}
