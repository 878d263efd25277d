//! `pa-cli` — the `portalauth` command-line client.
//!
//! Thin presentation layer over [`pa_session::SessionManager`]: it builds
//! the manager from config, drives the lifecycle operations, and renders
//! outcomes. No session logic lives here.

pub mod cli;
