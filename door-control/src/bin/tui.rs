//! Terminal user interface for door-control.
//!
//! Shows the Up and Down buttons and the outcome of the last command. Built
//! with ratatui; key events arrive on crossterm's async event stream so the
//! screen keeps redrawing while a command is in flight.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;

use door_control::api_client::HttpDoorClient;
use door_control::cli::EndpointArgs;
use door_control::sender::DoorCommandSender;
use door_control::tracing::{self, prelude::*};
use door_control::tui::App;

#[derive(Parser)]
#[command(version, about = "Interactive door control")]
struct Cli {
    #[command(flatten)]
    endpoint: EndpointArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing::init_journald_only();

    let cli = Cli::parse();
    let config = cli.endpoint.resolve()?;
    let client = HttpDoorClient::new(&config.endpoint)?;
    info!(url = %client.url(), "Started.");

    let app = App::new(DoorCommandSender::new(Arc::new(client)));

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, app).await;
    ratatui::restore();

    info!("Exiting.");
    result
}

async fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    let mut state_rx = app.sender().subscribe();

    while !app.should_exit() {
        let state = state_rx.borrow_and_update().clone();
        terminal.draw(|frame| app.draw(frame, &state))?;

        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(command) = app.handle_key(key) {
                        app.activate(command);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    Ok(())
}
