use std::collections::HashMap;

use indexmap::IndexMap;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use tfprobe::{Instance, ResourceMap, StateResource, TerraformState};

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Instances")]
    instances: usize,
}

#[derive(Tabled)]
struct CaptureRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn resource_table(resources: &ResourceMap<'_>) -> String {
    let rows = resources.iter().map(|(address, resource)| ResourceRow {
        address: address.clone(),
        mode: resource.mode.clone().unwrap_or_default(),
        provider: resource.provider.clone().unwrap_or_default(),
        instances: resource.instances.len(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn capture_table(groups: &HashMap<String, String>) -> String {
    let mut rows: Vec<CaptureRow> = groups
        .iter()
        .map(|(group, value)| CaptureRow {
            group: group.clone(),
            value: value.clone(),
        })
        .collect();
    rows.sort_by(|a, b| a.group.cmp(&b.group));
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Groups resources under their module, with one leaf per instance.
pub fn snapshot_tree(state: &TerraformState) -> Tree<String> {
    let mut modules: IndexMap<&str, Tree<String>> = IndexMap::new();

    for resource in &state.resources {
        let module = resource.module.as_deref().unwrap_or("(no module)");
        let leaves = resource.instances.iter().map(instance_label);
        modules
            .entry(module)
            .or_insert_with(|| Tree::new(module.to_string()))
            .push(Tree::new(resource_label(resource)).with_leaves(leaves));
    }

    Tree::new("state".to_string()).with_leaves(modules.into_values())
}

fn resource_label(resource: &StateResource) -> String {
    let resource_type = resource.resource_type.as_deref().unwrap_or("?");
    let name = resource.name.as_deref().unwrap_or("?");
    match resource.mode.as_deref() {
        Some(tfprobe::MANAGED) => format!("{resource_type}.{name}"),
        Some(mode) => format!("{mode}.{resource_type}.{name}"),
        None => format!("?.{resource_type}.{name}"),
    }
}

fn instance_label(instance: &Instance) -> String {
    let key = instance
        .index_key
        .as_ref()
        .map_or_else(|| "(no key)".to_string(), ToString::to_string);
    match instance.attributes.name_str() {
        Some(name) => format!("{key} {name}"),
        None => key,
    }
}
