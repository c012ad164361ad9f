//! mini-apis: the quotemaster HTTP API and administration tooling for the
//! quotemaster and myPlanner documents.

pub mod config;
pub mod server;
