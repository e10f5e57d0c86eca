//! HTTP plumbing shared by every accessor.
//!
//! This module owns the reqwest client, attaches bearer tokens, and turns
//! responses into typed values or classified errors.

mod client;
mod endpoints;

pub(crate) use client::{ApiClient, json_body};
pub(crate) use endpoints::*;
