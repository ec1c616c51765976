//! Terraform state snapshots and the two views over them.

mod address;
mod raw;
mod snapshot;
mod state;

pub use address::{Address, AddressError, AddressSource, resolve_address};
pub use raw::{RawError, RawMapExt, RawState, expect_object, str_field};
pub use snapshot::{Snapshot, normalize_module_address};
pub use state::{Attributes, IndexKey, Instance, StateResource, TerraformState};
