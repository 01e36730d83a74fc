//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde_json::{json, Value};

/// A leaf call node
pub fn leaf(name: &str, source: &str, count: u64, total: u64) -> Value {
    json!({
        "function_name": name,
        "function_source": source,
        "count": count,
        "total_time": total,
        "self_time": total,
        "children_time": 0
    })
}

/// An inner call node; `total_time` is derived from the children
pub fn call(name: &str, source: &str, self_time: u64, children: Vec<Value>) -> Value {
    let children_time: u64 = children.iter().map(|c| c["total_time"].as_u64().unwrap()).sum();
    json!({
        "function_name": name,
        "function_source": source,
        "count": 1,
        "total_time": self_time + children_time,
        "self_time": self_time,
        "children_time": children_time,
        "children": children
    })
}

/// Root pseudo-node with no identity
pub fn root(children: Vec<Value>) -> Value {
    let total: u64 = children.iter().map(|c| c["total_time"].as_u64().unwrap()).sum();
    json!({
        "function_name": "root",
        "function_source": "",
        "count": 0,
        "total_time": total,
        "self_time": 0,
        "children_time": total,
        "children": children
    })
}

/// Random call tree with `nodes` nodes below the root. Sources repeat so
/// aggregation has something to merge; some names are `?` placeholders.
pub fn random_tree(seed: u64, nodes: usize) -> Value {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut doc = root(Vec::new());

    for i in 0..nodes {
        // walk down a random existing path and attach there
        let mut pointer = String::new();
        loop {
            let here = doc.pointer(&pointer).unwrap();
            let len = here
                .get("children")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            if len == 0 || rng.random_ratio(1, 3) {
                break;
            }
            pointer = format!("{}/children/{}", pointer, rng.random_range(0..len));
        }

        let source_id: u64 = rng.random_range(0..7);
        let name = if rng.random_ratio(1, 4) {
            format!("?fn{}", source_id)
        } else {
            format!("fn{}", source_id)
        };
        let node = leaf(&name, &format!("lua:m.lua:{}", source_id), rng.random_range(1..=5), 1 + (i as u64 % 13));

        let parent = doc.pointer_mut(&pointer).unwrap();
        match parent.get_mut("children").and_then(Value::as_array_mut) {
            Some(children) => children.push(node),
            None => parent["children"] = json!([node]),
        }
    }

    doc
}

/// Reverse sibling order everywhere, keeping the multiset of nodes
pub fn reverse_siblings(mut value: Value) -> Value {
    let mut stack = vec![&mut value];
    while let Some(node) = stack.pop() {
        if let Some(children) = node.get_mut("children").and_then(Value::as_array_mut) {
            children.reverse();
            stack.extend(children.iter_mut());
        }
    }
    value
}
