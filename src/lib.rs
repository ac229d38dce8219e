pub mod args;
pub mod clipboard;
pub mod config;
pub mod delimit;
pub mod generate;
pub mod lint;
pub mod log;
pub mod output;
pub mod request;
pub mod sanitize;
pub mod template;

pub use generate::{generate, Generated};
pub use request::GenerationRequest;
