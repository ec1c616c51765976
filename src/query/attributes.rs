use serde_json::Value;
use thiserror::Error;

use super::QueryError;
use crate::terraform::{
    Address, AddressSource, RawError, RawMapExt, RawState, expect_object, str_field,
};

/// A single data point that could not be read. Extraction carries on past it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionFailure {
    #[error("Unable to find {attribute} on {instance}")]
    MissingAttribute { attribute: String, instance: String },

    #[error("Unable to read instances of {address}: {source}")]
    Malformed { address: String, source: RawError },
}

#[derive(Debug, Default, PartialEq)]
pub struct Extraction<'s> {
    pub values: Vec<&'s Value>,
    pub failures: Vec<ExtractionFailure>,
}

/// Collects `attribute` from every instance of every managed resource whose
/// type or name is `identifier`, in snapshot order.
///
/// Matching on name has the same ambiguity as [`super::index::by_name`].
pub fn extract<'s>(
    raw: &'s RawState,
    identifier: &str,
    attribute: &str,
) -> Result<Extraction<'s>, QueryError> {
    let mut extraction = Extraction::default();

    for resource in raw.resources()? {
        // Non-object entries cannot match an identifier and are absent from the
        // typed view as well.
        let Some(fields) = resource.as_object() else {
            tracing::warn!(found = %resource, "skipping malformed state entry");
            continue;
        };
        let matches_identifier = str_field(fields, "type") == Some(identifier)
            || str_field(fields, "name") == Some(identifier);
        if str_field(fields, "mode") != Some("managed") || !matches_identifier {
            continue;
        }

        let address = Address::resolve(AddressSource::Raw(resource))?.to_string();

        let instances = match fields.require_array("instances") {
            Ok(instances) => instances,
            Err(source) => {
                extraction.failures.push(ExtractionFailure::Malformed { address, source });
                continue;
            }
        };

        for instance in instances {
            let attributes = match expect_object(instance, "instance")
                .and_then(|instance| instance.require_object("attributes"))
            {
                Ok(attributes) => attributes,
                Err(source) => {
                    extraction.failures.push(ExtractionFailure::Malformed {
                        address: address.clone(),
                        source,
                    });
                    continue;
                }
            };

            match attributes.get(attribute) {
                Some(value) => extraction.values.push(value),
                None => {
                    let instance = match str_field(attributes, "name") {
                        Some(name) => format!("{address}.{name}"),
                        None => address.clone(),
                    };
                    extraction.failures.push(ExtractionFailure::MissingAttribute {
                        attribute: attribute.to_string(),
                        instance,
                    });
                }
            }
        }
    }

    tracing::debug!(
        identifier,
        attribute,
        values = extraction.values.len(),
        failures = extraction.failures.len(),
        "attribute values extracted"
    );
    Ok(extraction)
}
