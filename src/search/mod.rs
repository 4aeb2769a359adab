//! Search layer facade.
//!
//! - **[`client`]**: HTTP client for the external full-text search service.
//! - **[`adapter`]**: Reshapes search hits into listing items.

pub mod adapter;
pub mod client;

pub use adapter::{to_list_item, to_node_array};
pub use client::{SearchClient, SearchError};
