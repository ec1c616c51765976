use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::raw::RawState;
use super::state::TerraformState;
use crate::error::TfProbeError;

/// One state snapshot held as both a typed and a raw view.
///
/// Both views are built from the same decoded document and are never
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: TerraformState,
    raw: RawState,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, TfProbeError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, TfProbeError> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, TfProbeError> {
        let file = File::open(path)?;
        let snapshot = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), "state snapshot loaded from file");
        Ok(snapshot)
    }

    pub fn from_value(mut value: Value) -> Result<Self, TfProbeError> {
        if !value.is_object() {
            return Err(TfProbeError::NotAnObject);
        }
        normalize_modules(&mut value);

        let state = TerraformState::deserialize(&value)?;
        tracing::debug!(resources = state.resources.len(), "state snapshot decoded");

        Ok(Self {
            state,
            raw: RawState::new(value),
        })
    }

    pub fn state(&self) -> &TerraformState {
        &self.state
    }

    pub fn raw(&self) -> &RawState {
        &self.raw
    }
}

/// Strips the quotes from `for_each` module keys: `module.app["blue"]`
/// becomes `module.app[blue]`.
pub fn normalize_module_address(module: &str) -> String {
    module.replace("[\"", "[").replace("\"]", "]")
}

// Runs before either view exists so both see the same module strings.
fn normalize_modules(document: &mut Value) {
    let Some(resources) = document.get_mut("resources").and_then(Value::as_array_mut) else {
        return;
    };

    for resource in resources {
        if let Some(Value::String(module)) = resource.get_mut("module") {
            *module = normalize_module_address(module);
        }
    }
}
