//! Domain layer
//!
//! Value objects, the connection handle, the session state machine and the repository
//! traits the use cases depend on. Concrete implementations live in `infrastructure`.

pub mod connection;
pub mod error;
pub mod repository;
pub mod session;
pub mod value_object;

pub use connection::{Connection, EncodedMessage, Outbox};
pub use error::DeliveryError;
pub use repository::{ConnectionRegistry, HistoryRepository};
pub use session::{Session, SessionState};
pub use value_object::{ConnectionId, Timestamp};
