//! Domains module containing business logic organized by bounded contexts.
//!
//! - **catalog**: live listing of the data directory
//! - **storage**: confined reads, writes and deletes of package bytes
//! - **notify**: one-shot TCP notifications asking a device to download

pub mod catalog;
pub mod notify;
pub mod storage;
