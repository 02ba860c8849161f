//! # codeownerizer-github
//!
//! Blocking GitHub REST implementation of
//! [`codeownerizer_core::PlatformApi`].
//!
//! Build a [`GitHubClient`] from [`ClientOptions`] (usually via
//! [`ClientOptions::from_settings`]) and hand it to the reconciliation engine.

pub mod client;
pub mod pagination;

pub use client::{ClientOptions, GitHubClient};
