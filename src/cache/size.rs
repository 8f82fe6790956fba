//! Size Estimation Module
//!
//! Computes an approximate deep in-memory byte size for cached values.
//!
//! Values are classified through their serialized shape: scalars, sequences,
//! mappings and records are walked recursively; anything that cannot be
//! represented falls back to a fixed pointer-sized estimate. Estimates are
//! deterministic within a process run and approximate across platforms.

use std::collections::HashSet;
use std::mem;

use serde::Serialize;
use serde_json::Value;

// == Sizing Constants ==
/// Per-node overhead charged for every value in the graph.
pub const NODE_OVERHEAD: u64 = mem::size_of::<Value>() as u64;

/// Heap overhead charged for every owned string (container header).
pub const STRING_OVERHEAD: u64 = mem::size_of::<String>() as u64;

/// Fallback estimate for opaque values that cannot be traversed.
pub const OPAQUE_FALLBACK: u64 = mem::size_of::<usize>() as u64;

// == Estimate ==
/// Returns the approximate in-memory size of a value in bytes.
///
/// Never fails: values whose shape cannot be captured (non-string map keys,
/// foreign handles) are charged the [`OPAQUE_FALLBACK`] instead.
pub fn estimate<T: Serialize>(value: &T) -> u64 {
    match serde_json::to_value(value) {
        Ok(shape) => estimate_value(&shape),
        Err(_) => OPAQUE_FALLBACK,
    }
}

/// Returns the approximate in-memory size of an already-shaped value.
///
/// Traversal is iterative and keeps a visited set of container identities, so
/// an aliased subtree is counted once and a self-referential graph cannot
/// recurse forever.
pub fn estimate_value(value: &Value) -> u64 {
    let mut total: u64 = 0;
    let mut visited: HashSet<usize> = HashSet::new();
    let mut stack: Vec<&Value> = vec![value];

    while let Some(node) = stack.pop() {
        match node {
            Value::Null | Value::Bool(_) | Value::Number(_) => {
                total += NODE_OVERHEAD;
            }
            Value::String(s) => {
                total += NODE_OVERHEAD + s.len() as u64;
            }
            Value::Array(items) => {
                if !visited.insert(items as *const _ as usize) {
                    continue;
                }
                total += NODE_OVERHEAD;
                stack.extend(items.iter());
            }
            Value::Object(map) => {
                if !visited.insert(map as *const _ as usize) {
                    continue;
                }
                total += NODE_OVERHEAD;
                for (key, child) in map {
                    total += STRING_OVERHEAD + key.len() as u64;
                    stack.push(child);
                }
            }
        }
    }

    total
}
