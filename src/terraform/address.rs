use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::raw::{RawError, RawMapExt, expect_object};
use super::state::StateResource;

const ADDRESS_PATTERN: &str =
    r"^(?P<module>.+)\.(?P<resource_type>[A-Za-z0-9_]+)\.(?P<name>[A-Za-z0-9_-]+)$";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    #[error("resource `{component}` is missing or not a string")]
    Component { component: &'static str },

    #[error(transparent)]
    Raw(#[from] RawError),
}

/// Either view of one resource, as accepted by [`Address::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum AddressSource<'a> {
    Typed(&'a StateResource),
    Raw(&'a Value),
}

impl<'a> From<&'a StateResource> for AddressSource<'a> {
    fn from(resource: &'a StateResource) -> Self {
        AddressSource::Typed(resource)
    }
}

impl<'a> From<&'a Value> for AddressSource<'a> {
    fn from(resource: &'a Value) -> Self {
        AddressSource::Raw(resource)
    }
}

/// Canonical `module.type.name` address of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub module: String,
    pub resource_type: String,
    pub name: String,
}

impl Address {
    /// Builds the address from either view.
    ///
    /// Top-level resources get no special treatment: `module` must be present
    /// in the snapshot, whatever convention the producer used for it.
    pub fn resolve(source: AddressSource<'_>) -> Result<Self, AddressError> {
        match source {
            AddressSource::Typed(resource) => Ok(Self {
                module: typed_component(&resource.module, "module")?,
                resource_type: typed_component(&resource.resource_type, "type")?,
                name: typed_component(&resource.name, "name")?,
            }),
            AddressSource::Raw(resource) => {
                let resource = expect_object(resource, "resource")?;
                Ok(Self {
                    module: resource.require_str("module")?.to_string(),
                    resource_type: resource.require_str("type")?.to_string(),
                    name: resource.require_str("name")?.to_string(),
                })
            }
        }
    }

    /// Splits a canonical address back into its parts.
    ///
    /// The module part may itself contain dots (`module.app.module.db`); the
    /// last two segments are always the type and the name.
    pub fn parse(address: &str) -> Option<Self> {
        let mut groups = crate::pattern::capture_named_groups(ADDRESS_PATTERN, address);
        Some(Self {
            module: groups.remove("module")?,
            resource_type: groups.remove("resource_type")?,
            name: groups.remove("name")?,
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.module, self.resource_type, self.name)
    }
}

pub fn resolve_address<'a>(source: impl Into<AddressSource<'a>>) -> Result<String, AddressError> {
    Address::resolve(source.into()).map(|address| address.to_string())
}

fn typed_component(
    value: &Option<String>,
    component: &'static str,
) -> Result<String, AddressError> {
    value
        .clone()
        .ok_or(AddressError::Component { component })
}
