//
// toposort.rs
// The MGSDL Compiler
//

//! Dependency ordering for embeddable schemas. A schema that embeds
//! another schema must be constructed after it, so code generation
//! consumes schemas in topological order of their reference graph.
//! Only schema-to-schema references form edges; references from a
//! schema to itself are excluded entirely (recursion is handled at
//! emission time and is never an ordering dependency). A reference
//! cycle between two or more distinct schemas is unsatisfiable and
//! is rejected.

use std::collections::{ BTreeMap, BTreeSet, VecDeque };
use crate::error::{ Error, Result };
use crate::sdir::Schema;


/// Orders the given schemas so that every schema referenced by
/// another schema appears before its referrer.
///
/// The result is deterministic for any fixed input: schemas with no
/// outstanding dependencies are seeded in name order, and a schema
/// freed by the removal of its last dependency is pushed to the
/// front of the work queue, so the last-freed schema is processed
/// first. The tie-break is part of the output contract.
///
/// # Arguments
///
/// * `schemas`: the resolved schema map.
///
/// # Return value
///
/// * `Ok(order)` with one `(name, schema)` pair per input schema.
/// * `Err(Error::CycleDetected)` if a cycle of two or more distinct
///   schemas exists; no partial order is returned.
pub fn sort_schemas(schemas: &BTreeMap<String, Schema>) -> Result<Vec<(&str, &Schema)>> {
    // Outbound dependency sets; self-references excluded.
    let mut deps: BTreeMap<&str, BTreeSet<&str>> = schemas.iter()
        .map(|(name, schema)| {
            let destinations = schema.values()
                .filter_map(|field| field.data_type.schema_ref())
                .filter(|destination| *destination != name.as_str())
                .collect();

            (name.as_str(), destinations)
        })
        .collect();

    let mut queue: VecDeque<&str> = deps.iter()
        .filter(|&(_, destinations)| destinations.is_empty())
        .map(|(name, _)| *name)
        .collect();

    let mut sorted = Vec::with_capacity(schemas.len());

    while let Some(name) = queue.pop_front() {
        sorted.push((name, &schemas[name]));

        for (other, remaining) in &mut deps {
            if remaining.remove(name) && remaining.is_empty() {
                queue.push_front(*other);
            }
        }
    }

    if sorted.len() == schemas.len() {
        Ok(sorted)
    } else {
        Err(Error::CycleDetected)
    }
}
