//! Payment event handler adapters.
//!
//! - `LoggingEventHandler` - Default handler, logs each event
//! - `MockPaymentEventHandler` - Call-recording handler for tests

mod logging_event_handler;
mod mock_event_handler;

pub use logging_event_handler::LoggingEventHandler;
pub use mock_event_handler::{HandlerCall, MockPaymentEventHandler};
