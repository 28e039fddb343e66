//! Shared test helpers for `partnerhub-core` integration tests.
//!
//! In-memory ports and a scriptable list source so tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod ports;
pub mod source;

use partnerhub_domain::{Organization, Sale};
use serde_json::json;

pub fn organization(id: &str) -> Organization {
    serde_json::from_value(json!({ "id": id, "name": format!("Partner {id}") }))
        .expect("organization fixture")
}

pub fn sale(id: &str, state: &str, quantity: u32) -> Sale {
    serde_json::from_value(json!({
        "id": id,
        "state": state,
        "quantity": quantity,
        "organization_id": "org-1"
    }))
    .expect("sale fixture")
}
