pub mod error;
pub mod raw;
pub mod request;
pub mod writer;

pub use error::AdapterError;
pub use raw::{RawRequest, RawResponse, RawUpload};
pub use request::adapt_request;
pub use writer::write_response;
