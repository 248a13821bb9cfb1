// src/lib.rs

pub mod config;
pub mod content;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::core::catalog::TopicCatalog;
pub use crate::core::session::{FetchTicket, Resolution, SessionPhase, TopicSession};
