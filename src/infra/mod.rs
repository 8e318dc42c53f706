//! Backend access and on-disk caches.

pub mod api;
pub mod cache;
