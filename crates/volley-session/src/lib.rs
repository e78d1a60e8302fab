//! Client session layer
//!
//! Ties the deterministic simulation, the input log and the wire protocol
//! together behind one driver, [`SessionCoordinator`]. The coordinator owns
//! a [`Connection`] and walks the full lifecycle:
//!
//! ```text
//! Disconnected -> AwaitingConnectResponse -> Connected
//!              -> Starting -> Running -> GameOver
//! ```
//!
//! Transports are pluggable through the [`Connection`] trait:
//! [`TcpConnection`] for real peers, [`MemoryConnection`] for tests.

mod coordinator;
mod error;
mod memory;
mod tcp;
mod transport;

pub use coordinator::{SessionCoordinator, SessionState};
pub use error::{Error, Result};
pub use memory::MemoryConnection;
pub use tcp::TcpConnection;
pub use transport::Connection;
