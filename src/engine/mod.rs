pub mod error;
pub mod handler;

pub use error::DispatchError;
pub use handler::{RequestEngine, RouteInvoker};
