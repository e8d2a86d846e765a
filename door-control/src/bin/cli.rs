//! Command-line interface for door-control.
//!
//! Sends a single command and prints the resulting status line. Exits
//! non-zero if the endpoint did not accept the command.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use door_control::api_client::HttpDoorClient;
use door_control::cli::SendCli;
use door_control::sender::{DoorCommandSender, SendOutcome};
use door_control::tracing::{self, prelude::*};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing::init_journald_or_stderr();

    let cli = SendCli::parse();
    let config = cli.endpoint.resolve()?;
    let client = HttpDoorClient::new(&config.endpoint)?;
    debug!(url = %client.url(), "Using door endpoint");

    let sender = DoorCommandSender::new(Arc::new(client));
    let outcome = sender.send(cli.direction).await;

    println!("{}", sender.state().status_text());

    Ok(match outcome {
        SendOutcome::Sent => ExitCode::SUCCESS,
        SendOutcome::Failed(_) | SendOutcome::Rejected => ExitCode::FAILURE,
    })
}
