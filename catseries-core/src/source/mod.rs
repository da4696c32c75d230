//! Source acquisition: provider trait, HTTP and file providers, and the
//! all-or-nothing fetch barrier.

pub mod acquire;
pub mod file;
pub mod http;
pub mod provider;

pub use acquire::acquire;
pub use file::FileProvider;
pub use http::HttpProvider;
pub use provider::{FetchError, RawPayloads, SourceProvider};
