//! Route modules.

pub mod crawl;
pub mod draw;
pub mod health;
