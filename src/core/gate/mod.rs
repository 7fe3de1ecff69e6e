//! Call gate for outbound model requests
//!
//! Every request to the remote completion endpoint passes through a single
//! [`CallGate`], which bounds how many calls run at once, keeps a rolling
//! per-window usage budget, and retries rate-limited calls after a cool-down.

mod budget;
mod error;
mod gate;
mod transport;
mod types;


// Re-export public types
pub use error::GateError;
pub use gate::CallGate;
pub use transport::{FragmentStream, HttpTransport, Transport};
pub use types::{GateRequest, GateStats};
