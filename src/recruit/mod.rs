/// HTTP client for job openings
mod client;
/// Response flattening into `JobRecord`
mod extract;
/// Token store, OAuth grants and one-shot 401 recovery
mod token;

pub use client::*;
pub use extract::*;
pub use token::*;
