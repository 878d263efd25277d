//! `pa-domain` — shared types for PortalAuth.
//!
//! Holds the crate-wide [`error::Error`] type and the [`config::Config`]
//! structures every other crate in the workspace depends on.

pub mod config;
pub mod error;
