pub mod edges;
pub mod types;
