//! Catalog database contract

pub mod schema;

pub use schema::*;
