//! Background Tasks Module
//!
//! # Tasks
//! - Sweeper: Removes expired entries from the in-memory store at a fixed interval

mod sweeper;

pub use sweeper::spawn_sweeper;
