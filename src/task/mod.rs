//! Nursing task board core.
//!
//! Classifies nursing tasks into board buckets and drives their lifecycle
//! through validated transitions. The module follows hexagonal architecture:
//!
//! - Domain types, the status machine, and the classifier in [`domain`]
//! - Port contracts for the persistence collaborator in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and the board poller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
