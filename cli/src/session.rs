//! The interactive command loop.
//!
//! Lines arrive over a channel fed by a stdin reader thread. While a search
//! is waiting out its debounce delay the loop waits on the channel with a
//! timeout, so the search fires even if the user types nothing else.

use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;

use product_core::{Command, ProductListClient, Transport};
use tracing::debug;

use crate::input::{parse_line, Input, HELP};
use crate::terminal::{Console, TerminalView};

pub type TerminalClient<T, W> = ProductListClient<T, TerminalView<W>>;

/// Run commands from `lines` until `quit` or end of input.
///
/// Prompts are written to `prompt_out`. At end of input a search that is
/// still pending is allowed to run before returning.
pub fn run<T, W, P>(client: &mut TerminalClient<T, W>, lines: &Receiver<String>, mut prompt_out: P)
where
    T: Transport,
    W: Write,
    P: Write,
{
    loop {
        let next = match client.next_wakeup() {
            Some(at) => match lines.recv_timeout(at.saturating_duration_since(Instant::now())) {
                Ok(line) => Some(line),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match lines.recv() {
                Ok(line) => Some(line),
                Err(_) => break,
            },
        };

        if let Some(line) = next {
            if !handle_line(client, &line, lines, &mut prompt_out) {
                return;
            }
        }
        // Failures were already reported through the view.
        let _ = client.poll(Instant::now());
    }

    if let Some(at) = client.next_wakeup() {
        std::thread::sleep(at.saturating_duration_since(Instant::now()));
        let _ = client.poll(Instant::now());
    }
}

/// Returns `false` when the session should end.
fn handle_line<T, W, P>(
    client: &mut TerminalClient<T, W>,
    line: &str,
    lines: &Receiver<String>,
    prompt_out: &mut P,
) -> bool
where
    T: Transport,
    W: Write,
    P: Write,
{
    let input = match parse_line(line) {
        Ok(input) => input,
        Err(err) => {
            client.view_mut().line(&err.to_string());
            return true;
        }
    };

    let command = match input {
        Input::Quit => return false,
        Input::Nothing => return true,
        Input::Help => {
            client.view_mut().line(HELP);
            return true;
        }
        Input::List => {
            client.view_mut().print_all();
            return true;
        }
        Input::Load => Command::Load,
        Input::More => Command::LoadMore,
        Input::Add { title, body } => Command::Create { title, body },
        Input::Delete(id) => Command::Delete(id),
        Input::Search(text) => Command::SearchInput(text),
        Input::Edit(id) => match client.view().find(id) {
            Some(product) => Command::Edit(product.clone()),
            None => {
                client.view_mut().line(&format!("product #{id} is not shown"));
                return true;
            }
        },
    };

    let mut console = Console::new(lines, &mut *prompt_out);
    match client.dispatch(command, &mut console, Instant::now()) {
        Ok(outcome) => debug!(?outcome, "command finished"),
        Err(err) => debug!(error = %err, "command failed"),
    }
    true
}
