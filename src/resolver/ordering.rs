//! Canonical ordering of module references

use std::collections::HashMap;

use crate::manifest::SortedDependency;
use crate::resolver::ModuleRef;

/// Collapse duplicate names
///
/// A repeated name keeps the position of its first occurrence and the
/// reference of its last.
pub fn unique_by_name<I>(modules: I) -> Vec<ModuleRef>
where
    I: IntoIterator<Item = ModuleRef>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ModuleRef> = Vec::new();
    for module in modules {
        match positions.get(module.name()) {
            Some(&i) => unique[i] = module,
            None => {
                positions.insert(module.name().to_string(), unique.len());
                unique.push(module);
            }
        }
    }
    unique
}

/// Put name-unique candidates into canonical manifest order
///
/// Returns the candidates found in the canonical list, in that order and with
/// their versions replaced by the manifest's current versions, followed by
/// the candidates absent from it in their original relative order.
pub fn canonical_order(
    sorted: &[SortedDependency<'_>],
    candidates: Vec<ModuleRef>,
) -> (Vec<ModuleRef>, Vec<ModuleRef>) {
    let positions: HashMap<String, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, module)| (module.name().to_string(), i))
        .collect();
    let mut slots: Vec<Option<ModuleRef>> = candidates.into_iter().map(Some).collect();

    let mut ordered = Vec::with_capacity(slots.len());
    for dep in sorted {
        let Some(&i) = positions.get(dep.name) else {
            continue;
        };
        if let Some(mut module) = slots[i].take() {
            module.set_version(dep.version);
            ordered.push(module);
        }
    }

    let leftovers = slots.into_iter().flatten().collect();
    (ordered, leftovers)
}
