//! Wardboard: nursing task board core for in-patient wards.
//!
//! This crate classifies nursing tasks into the buckets a ward task board
//! shows (pending, due, overdue, in progress, completed) and enforces the
//! lifecycle rules for starting, completing, deferring, missing, refusing,
//! and cancelling tasks. Persistence is delegated to a collaborator behind a
//! port.
//!
//! # Architecture
//!
//! Wardboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task classification, lifecycle transitions, and board polling

pub mod task;
