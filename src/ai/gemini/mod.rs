pub mod client;
pub mod request;
pub mod response;
pub mod types;

pub use client::GeminiHttpClient;
pub use request::build_request;
pub use response::parse_reply;
pub use types::{Content, GenerateContentRequest, Part};
