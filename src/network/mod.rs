//! Network layer - the removal service and local file I/O
//!
//! The Network actor receives commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::RemovalClient;
