//! Background Tasks Module
//!
//! # Tasks
//! - Cache purge: removes expired item cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
