//! Data models used throughout the application
//!
//! This module contains the data structures and serialization/deserialization
//! logic for the relay proxy.

// JSON-RPC protocol data structures
pub mod jsonrpc;
