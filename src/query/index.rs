use indexmap::IndexMap;

use super::QueryError;
use crate::terraform::{Address, AddressError, AddressSource, StateResource, TerraformState};

/// Resources keyed by canonical address, in snapshot order.
///
/// A later resource with an already-seen address replaces the earlier one.
pub type ResourceMap<'s> = IndexMap<String, &'s StateResource>;

pub fn by_type_and_mode<'s>(
    state: &'s TerraformState,
    resource_type: &str,
    mode: &str,
) -> Result<ResourceMap<'s>, AddressError> {
    let resources = keyed(
        state
            .resources
            .iter()
            .filter(|resource| resource.is(resource_type, mode)),
    )?;
    tracing::debug!(resource_type, mode, count = resources.len(), "resources found by type");
    Ok(resources)
}

/// Every resource called `name`, whatever its type or mode.
///
/// Names such as `this` or `main` are usually reused across resource types,
/// in which case the result mixes them; use [`by_type_and_mode`] instead.
pub fn by_name<'s>(state: &'s TerraformState, name: &str) -> Result<ResourceMap<'s>, AddressError> {
    let resources = keyed(state.resources.iter().filter(|resource| resource.is_named(name)))?;
    tracing::debug!(name, count = resources.len(), "resources found by name");
    Ok(resources)
}

/// The `name` attribute of every instance of every resource in `resources`.
pub fn instance_names<'s>(resources: &ResourceMap<'s>) -> Result<Vec<&'s str>, QueryError> {
    let mut names = Vec::new();
    for (address, resource) in resources {
        for (position, instance) in resource.instances.iter().enumerate() {
            let name = instance
                .attributes
                .name_str()
                .ok_or_else(|| QueryError::InstanceName {
                    address: address.clone(),
                    position,
                })?;
            names.push(name);
        }
    }
    Ok(names)
}

fn keyed<'s>(
    resources: impl Iterator<Item = &'s StateResource>,
) -> Result<ResourceMap<'s>, AddressError> {
    let mut output = ResourceMap::new();
    for resource in resources {
        let address = Address::resolve(AddressSource::Typed(resource))?;
        output.insert(address.to_string(), resource);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terraform::{Attributes, Instance};
    use serde_json::json;

    const TYPE_ONE: &str = "azurerm_storage_account";
    const MODULE: &str = "module.storage";

    fn instance(name: &str) -> Instance {
        Instance {
            attributes: Attributes {
                name: Some(json!(name)),
                ..Default::default()
            },
            index_key: None,
        }
    }

    fn resource(
        resource_type: &str,
        mode: &str,
        name: &str,
        instances: Vec<Instance>,
    ) -> StateResource {
        StateResource {
            module: Some(MODULE.to_string()),
            mode: Some(mode.to_string()),
            resource_type: Some(resource_type.to_string()),
            name: Some(name.to_string()),
            provider: Some("provider[\"registry.terraform.io/hashicorp/azurerm\"]".to_string()),
            instances,
        }
    }

    fn state() -> TerraformState {
        TerraformState {
            resources: vec![
                resource(TYPE_ONE, "managed", "logs", vec![instance("stlogs001")]),
                resource(
                    TYPE_ONE,
                    "managed",
                    "this",
                    vec![instance("stapp001"), instance("stapp002")],
                ),
                resource(TYPE_ONE, "data", "existing", vec![instance("stshared")]),
                resource("azurerm_resource_group", "managed", "this", vec![instance("rg-app")]),
            ],
        }
    }

    #[test]
    fn test_by_type_and_mode_finds_the_appropriate_resources() {
        let state = state();
        let found = by_type_and_mode(&state, TYPE_ONE, "managed").unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.values().all(|r| r.is(TYPE_ONE, "managed")));
    }

    #[test]
    fn test_by_type_and_mode_builds_keys_from_resource_data() {
        let state = state();
        let found = by_type_and_mode(&state, TYPE_ONE, "managed").unwrap();

        let keys: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "module.storage.azurerm_storage_account.logs",
                "module.storage.azurerm_storage_account.this",
            ]
        );
    }

    #[test]
    fn test_by_type_and_mode_data() {
        let state = state();
        let found = by_type_and_mode(&state, TYPE_ONE, "data").unwrap();

        assert_eq!(found.len(), 1);
        assert!(found.contains_key("module.storage.azurerm_storage_account.existing"));
    }

    #[test]
    fn test_by_type_and_mode_no_match_is_empty() {
        let state = state();
        assert!(by_type_and_mode(&state, "azurerm_key_vault", "managed").unwrap().is_empty());
    }

    #[test]
    fn test_by_name_mixes_types() {
        let state = state();
        let found = by_name(&state, "this").unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.contains_key("module.storage.azurerm_storage_account.this"));
        assert!(found.contains_key("module.storage.azurerm_resource_group.this"));
    }

    #[test]
    fn test_by_name_includes_data_resources() {
        let state = state();
        let found = by_name(&state, "existing").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_duplicate_addresses_shadow_earlier_entries() {
        let mut state = state();
        state
            .resources
            .push(resource(TYPE_ONE, "managed", "logs", vec![instance("stlogs999")]));

        let found = by_type_and_mode(&state, TYPE_ONE, "managed").unwrap();
        assert_eq!(found.len(), 2);

        let logs = found["module.storage.azurerm_storage_account.logs"];
        assert_eq!(logs.instances[0].attributes.name_str(), Some("stlogs999"));
    }

    #[test]
    fn test_missing_module_fails_address_resolution() {
        let mut state = state();
        state.resources[0].module = None;

        let err = by_type_and_mode(&state, TYPE_ONE, "managed").unwrap_err();
        assert_eq!(err, AddressError::Component { component: "module" });
    }

    #[test]
    fn test_instance_names_one_per_instance() {
        let state = state();
        let found = by_type_and_mode(&state, TYPE_ONE, "managed").unwrap();

        let names = instance_names(&found).unwrap();
        let instance_count: usize = found.values().map(|r| r.instances.len()).sum();
        assert_eq!(names.len(), instance_count);
        assert_eq!(names, vec!["stlogs001", "stapp001", "stapp002"]);
    }

    #[test]
    fn test_instance_names_rejects_non_string_name() {
        let mut state = state();
        state.resources[1].instances[1].attributes.name = Some(json!(12));

        let found = by_type_and_mode(&state, TYPE_ONE, "managed").unwrap();
        let err = instance_names(&found).unwrap_err();
        assert!(matches!(
            err,
            QueryError::InstanceName { ref address, position: 1 }
                if address == "module.storage.azurerm_storage_account.this"
        ));
    }
}
