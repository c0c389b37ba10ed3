//! Event loop.
//!
//! Terminal input, background results and a redraw tick are multiplexed on
//! one task; every state change happens here.

use std::io;
use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use kubejob_ui::event::convert_event;
use kubejob_ui::terminal::Terminal;
use log::debug;
use log::info;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

use crate::app::App;
use crate::message::Message;

/// Redraw cadence when nothing else happens (keeps relative labels fresh).
const TICK: Duration = Duration::from_millis(250);

pub async fn run(mut app: App, mut messages: UnboundedReceiver<Message>) -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("event loop started");
    terminal.draw(|buf| app.render(buf))?;

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => {
                    if let Some(input) = convert_event(event) {
                        app.handle_input(input).await;
                    }
                }
                Some(Err(err)) => return Err(err),
                None => break,
            },
            Some(message) = messages.recv() => app.handle_message(message).await,
            _ = tick.tick() => {}
        }

        if app.should_quit() {
            break;
        }
        terminal.draw(|buf| app.render(buf))?;
    }

    debug!("event loop finished");
    Ok(())
}
