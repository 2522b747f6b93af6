pub mod cookie;
pub mod files;
pub mod form;
pub mod headers;
pub mod request;
pub mod response;

pub use cookie::Cookie;
pub use files::{PostedFile, PostedFileCollection};
pub use form::FormFields;
pub use headers::Headers;
pub use request::{empty_body, BodyStream, Request};
pub use response::Response;
