use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

/// Terraform state parsed into a fixed schema.
///
/// Decoding is permissive: unknown keys are dropped and a known field holding
/// an unexpected JSON type decodes as absent rather than rejecting the
/// document. Anything outside the schema is read through [`super::RawState`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TerraformState {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub resources: Vec<StateResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StateResource {
    #[serde(default, deserialize_with = "lenient")]
    pub module: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub mode: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub provider: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub instances: Vec<Instance>,
}

impl StateResource {
    pub fn is(&self, resource_type: &str, mode: &str) -> bool {
        self.resource_type.as_deref() == Some(resource_type) && self.mode.as_deref() == Some(mode)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Instance {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub attributes: Attributes,
    #[serde(default, deserialize_with = "lenient")]
    pub index_key: Option<IndexKey>,
}

/// Attributes promoted out of an instance's attribute map.
///
/// These stay weakly typed because providers disagree on them (numeric ids,
/// null locations). Use the raw view for any other attribute.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<Map<String, Value>>,
}

impl Attributes {
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }

    pub fn tag(&self, key: &str) -> Option<&Value> {
        self.tags.as_ref().and_then(|tags| tags.get(key))
    }
}

/// Instance key of a replicated resource: a string for `for_each`, a number
/// for `count`. Absence is modelled by the surrounding `Option`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IndexKey {
    String(String),
    Number(Number),
}

impl IndexKey {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            IndexKey::String(key) => Some(key),
            IndexKey::Number(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            IndexKey::String(_) => None,
            IndexKey::Number(index) => index.as_u64(),
        }
    }
}

// Rendered the way Terraform writes instance addresses: `["blue"]` / `[2]`.
impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::String(key) => write!(f, "[\"{key}\"]"),
            IndexKey::Number(index) => write!(f, "[{index}]"),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

// Entries that fail to decode are dropped one at a time so the rest of the
// sequence survives.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries: Vec<Value> = lenient_or_default(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(position, error = %err, "skipping malformed state entry");
                None
            }
        })
        .collect())
}
