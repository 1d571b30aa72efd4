//! Topological sort for dependencies-first manifest order
//!
//! A manifest section declared with `order: dependencies-first` has its
//! canonical order derived here, so that every module appears after the
//! modules it depends on.
//!
//! ## Algorithm
//!
//! Uses DFS with three-color marking to detect cycles and produce ordering:
//!
//! 1. **WHITE** (unvisited): Node hasn't been processed
//! 2. **GRAY** (temporarily visited): Node is in current recursion stack
//! 3. **BLACK** (permanently visited): Node has been fully processed
//!
//! Cycles are detected when we encounter a GRAY node (already in current path).

use std::collections::{HashMap, HashSet};

use crate::error::{Result, circular_dependency};

/// Context for topological sort operations
struct TopoSortContext<'a> {
    /// Dependency map (adjacency list)
    deps: &'a HashMap<String, Vec<String>>,
    /// Visited modules (BLACK)
    visited: HashSet<String>,
    /// Current DFS path (GRAY), in visiting order for cycle reporting
    path: Vec<String>,
    /// Module names in dependency order
    result: Vec<String>,
}

/// Order module names so dependencies come before their dependents
///
/// Independent modules keep their relative position from `declared_order`;
/// a module is pulled forward only as far as one of its dependents needs it.
///
/// # Errors
///
/// Returns error if a circular dependency is detected.
///
/// # Example
///
/// ```text
/// Declared order: [app, dom, util]
///   app depends on util
///
/// Result: [util, app, dom]
/// ```
pub fn topological_sort(
    deps: &HashMap<String, Vec<String>>,
    declared_order: &[String],
) -> Result<Vec<String>> {
    crate::manifest::graph::validate_dependencies(deps)?;

    let mut ctx = TopoSortContext {
        deps,
        visited: HashSet::new(),
        path: Vec::new(),
        result: Vec::with_capacity(declared_order.len()),
    };

    for name in declared_order {
        if !ctx.visited.contains(name) {
            topo_dfs(&mut ctx, name)?;
        }
    }

    Ok(ctx.result)
}

/// DFS helper for topological sort with cycle detection
///
/// Post-order adds nodes to result after all dependencies are processed.
fn topo_dfs(ctx: &mut TopoSortContext, name: &str) -> Result<()> {
    if let Some(start) = ctx.path.iter().position(|n| n == name) {
        let mut chain: Vec<&str> = ctx.path[start..].iter().map(String::as_str).collect();
        chain.push(name);
        return Err(circular_dependency(chain.join(" -> ")));
    }

    if ctx.visited.contains(name) {
        return Ok(());
    }

    ctx.path.push(name.to_string());

    if let Some(module_deps) = ctx.deps.get(name) {
        for dep_name in module_deps {
            topo_dfs(ctx, dep_name)?;
        }
    }

    ctx.path.pop();
    ctx.visited.insert(name.to_string());
    ctx.result.push(name.to_string());

    Ok(())
}
