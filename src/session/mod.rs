//! The control-dialogue session: state machine, media sink interface, and connection driver.
//!
//! Defined by:
//! - spec.md section 4.5 "Session state machine"
//! - spec.md section 6 "External interfaces"

mod error;
mod handler;
mod server;
mod state;

pub use self::error::SessionError;
pub use self::handler::{MediaKind, PublishEndReason, SessionHandler};
pub use self::server::ServerSession;
pub use self::state::{Phase, SessionState, StreamState};
