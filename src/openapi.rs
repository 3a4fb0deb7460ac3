use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Number, Value};
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Keys of a path item that name an operation.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

const VERSION_KEY: &str = "openapi";
const VERSION_PREFIX: &str = "3.";
const PATHS_KEY: &str = "paths";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub num_paths: usize,
    pub num_operations: usize,
}

/// Why a document did not produce [`Stats`].
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("not a valid YAML document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("document root is not a mapping")]
    NotAMapping,
    #[error("`openapi` is missing or not a 3.x version string")]
    UnsupportedVersion,
    #[error("`paths` is present but is not a mapping")]
    PathsNotAMapping,
    #[error("path item has a non-string key: {0:?}")]
    NonStringOperationKey(Value),
}

/// Parses `text` and counts paths and operations if it is an OpenAPI 3.x
/// document.
///
/// A missing `paths` key is treated as an empty collection, while a `paths`
/// value of any non-mapping type rejects the document. Repeated keys keep the
/// last value, at any depth.
pub fn inspect_document(text: &str) -> Result<Stats, Rejection> {
    let LastWins(mut doc) = serde_yaml::from_str(text)?;
    doc.apply_merge()?;

    let Value::Mapping(root) = doc else {
        return Err(Rejection::NotAMapping);
    };

    match root.get(VERSION_KEY) {
        Some(Value::String(version)) if version.starts_with(VERSION_PREFIX) => {}
        _ => return Err(Rejection::UnsupportedVersion),
    }

    match root.get(PATHS_KEY) {
        None => Ok(Stats::default()),
        Some(Value::Mapping(paths)) => count_paths(paths),
        Some(_) => Err(Rejection::PathsNotAMapping),
    }
}

/// The transform applied to every located file: `Some` only for qualifying
/// OpenAPI 3.x documents.
pub fn extract_openapi_stats(text: &str) -> Option<Stats> {
    match inspect_document(text) {
        Ok(stats) => Some(stats),
        Err(rejection) => {
            trace!(reason = %rejection, "Document rejected");
            None
        }
    }
}

fn count_paths(paths: &Mapping) -> Result<Stats, Rejection> {
    let mut num_operations = 0;
    for item in paths.values() {
        // Non-mapping path items contribute nothing.
        let Value::Mapping(operations) = item else {
            continue;
        };
        for key in operations.keys() {
            let Some(key) = key.as_str() else {
                return Err(Rejection::NonStringOperationKey(key.clone()));
            };
            if is_http_method(key) {
                num_operations += 1;
            }
        }
    }

    Ok(Stats {
        num_paths: paths.len(),
        num_operations,
    })
}

fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.iter().any(|m| m.eq_ignore_ascii_case(key))
}

/// A YAML value whose mappings keep the last entry for a repeated key,
/// where `serde_yaml::Value` would refuse the whole document.
struct LastWins(Value);

impl<'de> Deserialize<'de> for LastWins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LastWinsVisitor)
    }
}

struct LastWinsVisitor;

impl<'de> Visitor<'de> for LastWinsVisitor {
    type Value = LastWins;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<LastWins, E> {
        Ok(LastWins(Value::Bool(b)))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<LastWins, E> {
        Ok(LastWins(Value::Number(Number::from(i))))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<LastWins, E> {
        Ok(LastWins(Value::Number(Number::from(u))))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<LastWins, E> {
        Ok(LastWins(Value::Number(Number::from(f))))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<LastWins, E> {
        Ok(LastWins(Value::String(s.to_owned())))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<LastWins, E> {
        Ok(LastWins(Value::String(s)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<LastWins, E> {
        Ok(LastWins(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<LastWins, E> {
        Ok(LastWins(Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<LastWins, D::Error> {
        LastWins::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LastWins, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(LastWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(LastWins(Value::Sequence(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LastWins, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((LastWins(key), LastWins(value))) = map.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(LastWins(Value::Mapping(mapping)))
    }
}
