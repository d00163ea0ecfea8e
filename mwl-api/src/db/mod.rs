//! Database access layer for mwl-api
//!
//! One module per entity. Every function takes the pool explicitly.

pub mod logs;
pub mod settings;
pub mod sightings;
pub mod species;
pub mod userlogs;
pub mod users;
