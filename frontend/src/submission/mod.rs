//! Validation and submission of the TOPSIS form, independent of the DOM.
//!
//! - `ports`: the UI operations the handler is allowed to perform.
//! - `transport`: the HTTP seam and its browser implementation.
//! - `handler`: the submit flow composing both.

pub mod handler;
pub mod ports;
pub mod transport;

pub use handler::{handle_submit, FormInput, SubmitOutcome};
pub use ports::FormPorts;
pub use transport::{BrowserTransport, SubmitTransport};
