//! Queries over a [`Snapshot`] on behalf of a test.
//!
//! The functions in [`index`] and [`attributes`] return `Result`s. [`Query`]
//! wraps them for use inside tests: errors that make the snapshot unusable end
//! the test through [`Reporter::fail_now`], while per-instance problems are
//! reported through [`Reporter::fail`] and the query carries on.

pub mod attributes;
pub mod index;

use serde_json::Value;
use thiserror::Error;

use crate::report::Reporter;
use crate::terraform::{AddressError, AddressSource, RawError, Snapshot, resolve_address};

pub use attributes::{Extraction, ExtractionFailure};
pub use index::ResourceMap;

pub const MANAGED: &str = "managed";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("instance {position} of {address} has no string `name` attribute")]
    InstanceName { address: String, position: usize },

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Raw(#[from] RawError),
}

/// A snapshot bound to the test that is asserting against it.
pub struct Query<'s, R: Reporter> {
    snapshot: &'s Snapshot,
    reporter: &'s R,
}

impl<'s, R: Reporter> Query<'s, R> {
    pub fn new(snapshot: &'s Snapshot, reporter: &'s R) -> Self {
        Self { snapshot, reporter }
    }

    pub fn snapshot(&self) -> &'s Snapshot {
        self.snapshot
    }

    /// Managed resources of `resource_type`. Data sources are left out.
    pub fn find_all_by_type(&self, resource_type: &str) -> ResourceMap<'s> {
        self.find_all_by_type_and_mode(resource_type, MANAGED)
    }

    pub fn find_all_by_type_and_mode(&self, resource_type: &str, mode: &str) -> ResourceMap<'s> {
        self.or_fail_now(index::by_type_and_mode(
            self.snapshot.state(),
            resource_type,
            mode,
        ))
    }

    /// Resources named `name` across all types and modes. See [`index::by_name`].
    pub fn find_by_name(&self, name: &str) -> ResourceMap<'s> {
        self.or_fail_now(index::by_name(self.snapshot.state(), name))
    }

    /// The `name` attribute of each instance, which is how naming conventions
    /// of the deployed objects are checked. Not the Terraform resource name.
    pub fn get_instance_names(&self, resources: &ResourceMap<'s>) -> Vec<&'s str> {
        self.or_fail_now(index::instance_names(resources))
    }

    /// Values of `attribute` across managed resources matching `identifier`
    /// by type or name. Each instance missing the attribute fails the test
    /// without stopping it.
    pub fn get_attribute_values(&self, identifier: &str, attribute: &str) -> Vec<&'s Value> {
        let extraction = self.or_fail_now(attributes::extract(
            self.snapshot.raw(),
            identifier,
            attribute,
        ));

        for failure in &extraction.failures {
            self.reporter.fail(&failure.to_string());
        }
        extraction.values
    }

    pub fn resolve_address<'a>(&self, resource: impl Into<AddressSource<'a>>) -> String {
        self.or_fail_now(resolve_address(resource))
    }

    fn or_fail_now<T, E>(&self, result: Result<T, E>) -> T
    where
        E: Into<QueryError>,
    {
        result.unwrap_or_else(|err| {
            let err: QueryError = err.into();
            self.reporter
                .fail_now(&format!("state snapshot cannot be queried: {err}"))
        })
    }
}
