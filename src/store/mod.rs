//! Remote content store module
//!
//! The hosted backend exposes its tables through a PostgREST-style REST
//! interface. Only two logical operations are needed:
//!
//! - `count(table, filter)` - number of matching rows
//! - `select(table, query)` - matching rows, ordered and range-limited
//!
//! `RestStore` speaks to the hosted backend; `MemoryStore` serves rows held
//! in process (fixtures, tests).

mod memory;
mod rest;
mod types;

pub use memory::{MemoryStore, StoreCall, StoreOp};
pub use rest::{RestStore, RestStoreConfig};
pub use types::{ContentStore, Filter, SelectQuery};

#[cfg(test)]
mod tests;
