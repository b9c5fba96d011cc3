//! Route tables: resource routes under /api and the service routes at the root.

mod common;
mod resources;

pub use common::common_routes;
pub use resources::resource_routes;
