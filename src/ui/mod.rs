//! Terminal presentation of search results.

pub mod data;
