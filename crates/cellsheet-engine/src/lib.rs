//! cellsheet_engine - Formula language and dependency graph.

pub mod engine;
