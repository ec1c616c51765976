//! tfprobe - Terraform state queries for infrastructure tests
//!
//! Loads a state snapshot once and answers the lookups tests need: resources by
//! type, mode or name keyed by their `module.type.name` address, instance names,
//! arbitrary attribute values, and named-group regex captures.

pub mod pattern;
pub mod query;
pub mod report;
pub mod terraform;

mod error;

pub use error::TfProbeError;
pub use pattern::capture_named_groups;
pub use query::{Extraction, ExtractionFailure, MANAGED, Query, QueryError, ResourceMap};
pub use report::{Assertions, Reporter};
pub use terraform::{
    Address, AddressError, AddressSource, Attributes, IndexKey, Instance, RawError, RawState,
    Snapshot, StateResource, TerraformState, resolve_address,
};
