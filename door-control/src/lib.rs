//! Send Up/Down commands to a remote door-control endpoint.
//!
//! The [`sender::DoorCommandSender`] is the core: it posts one command per
//! invocation through an [`api_client::DoorEndpoint`] and publishes a
//! loading flag and status line for a frontend to display. The `door-tui`
//! and `door-cli` binaries are the two frontends.

pub mod api_client;
pub mod cli;
pub mod config;
pub mod error;
pub mod sender;
pub mod tracing;
pub mod tui;
