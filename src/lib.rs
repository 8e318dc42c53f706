//! RouteMind: pricing, shipment lifecycle, billing and complaint rules for a
//! small delivery operation, plus a client for the RouteMind backend.

pub mod domain;
pub mod infra;
pub mod util;
