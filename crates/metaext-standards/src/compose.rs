//! Standards/study composition and host-tree flattening.

use std::collections::BTreeSet;

use metaext_model::{HostMap, HostTypeNode};
use tracing::warn;

use crate::merge::combine_host;

/// Overlays the flat study layer onto every matching host of the nested
/// standards tree, at every depth.
///
/// Hosts are only ever taken from the standards; a study entry for a host the
/// tree never mentions is dropped with a warning.
pub fn compose(study: &HostMap, standards: &HostMap) -> HostMap {
    let known = host_names(standards);
    for host in study.keys() {
        if !known.contains(host.as_str()) {
            warn!(host = %host, "study overrides a host type absent from the standards; ignoring it");
        }
    }
    compose_level(study, standards)
}

fn compose_level(study: &HostMap, level: &HostMap) -> HostMap {
    level
        .iter()
        .map(|(name, node)| {
            let mut composed = match study.get(name) {
                Some(overrides) => combine_host(node, overrides),
                None => node.clone(),
            };
            composed.host_type_specific_metadata =
                compose_level(study, &node.host_type_specific_metadata);
            (name.clone(), composed)
        })
        .collect()
}

/// Every host name anywhere in the tree.
pub fn host_names(tree: &HostMap) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    collect_host_names(tree, &mut names);
    names
}

fn collect_host_names<'a>(tree: &'a HostMap, names: &mut BTreeSet<&'a str>) {
    for (name, node) in tree {
        names.insert(name.as_str());
        collect_host_names(&node.host_type_specific_metadata, names);
    }
}

/// Flattens the nested tree so every host carries its ancestors' rules,
/// overridden by its own. The result is one level deep.
pub fn flatten(nested: &HostMap) -> HostMap {
    let mut flat = HostMap::new();
    flatten_into(nested, &HostTypeNode::default(), &mut flat);
    flat
}

fn flatten_into(level: &HostMap, parent: &HostTypeNode, flat: &mut HostMap) {
    for (name, node) in level {
        let mut full = combine_host(parent, node);
        full.host_type_specific_metadata.clear();
        if flat.contains_key(name) {
            warn!(host = %name, "host type appears more than once in the standards; keeping the later definition");
        }
        flat.insert(name.clone(), full.clone());
        flatten_into(&node.host_type_specific_metadata, &full, flat);
    }
}
