//! # Domain Models
//!
//! Plain data shared by every crate of the workspace: configuration sections and the
//! view and tag names the pages are built from. Only `serde` is allowed here.

pub mod config;
pub mod constants;
