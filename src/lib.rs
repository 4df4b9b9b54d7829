//! owner-merge: auto-merge pull requests whose submitter owns every changed file
//!
//! The core lives in [`policy`]: a gitignore-style pattern matcher, a
//! CODEOWNERS parser, and the authorization evaluator. Everything else is the
//! thin layer that fetches inputs from GitHub and performs the merge.

pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod gate;
pub mod platform;
pub mod policy;
pub mod types;
