use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::sync::{mpsc::Sender, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::display;
use crate::error::Error;
use crate::slideshow::{Action, SlideDuration, SlideshowState};

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Submit(Action),
    List,
    Help,
    Quit,
}

pub const HELP: &str = "commands: start|s, restart, next|n, prev|p, stop|pause|x, resume|r, \
duration <slide> <seconds>, list|l, help|h, quit|q";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<InputCommand>, Error> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "start" | "s" | "restart" => InputCommand::Submit(Action::Start),
        "next" | "n" => InputCommand::Submit(Action::Next),
        "prev" | "previous" | "p" => InputCommand::Submit(Action::Previous),
        "stop" | "pause" | "x" => InputCommand::Submit(Action::StopTimer),
        "resume" | "r" => InputCommand::Submit(Action::RestartTimer),
        "duration" | "d" => {
            let slide = parse_number(words.next(), "duration", "slide number")?;
            let seconds = parse_number(words.next(), "duration", "seconds")?;
            let index = usize::try_from(slide)
                .ok()
                .and_then(|s| s.checked_sub(1))
                .ok_or_else(|| Error::InvalidArgument {
                    command: "duration",
                    reason: "slide numbers start at 1".to_string(),
                })?;
            let duration = SlideDuration::from_secs(seconds).ok_or_else(|| Error::InvalidArgument {
                command: "duration",
                reason: "seconds must be greater than zero".to_string(),
            })?;
            InputCommand::Submit(Action::SetDuration { index, duration })
        }
        "list" | "l" => InputCommand::List,
        "help" | "h" | "?" => InputCommand::Help,
        "quit" | "q" | "exit" => InputCommand::Quit,
        other => return Err(Error::UnknownCommand(other.to_string())),
    };
    if let Some(extra) = words.next() {
        return Err(Error::InvalidArgument {
            command: "input",
            reason: format!("unexpected trailing argument '{extra}'"),
        });
    }
    Ok(Some(command))
}

fn parse_number(word: Option<&str>, command: &'static str, what: &str) -> Result<u32, Error> {
    let word = word.ok_or_else(|| Error::InvalidArgument {
        command,
        reason: format!("missing {what}"),
    })?;
    word.parse().map_err(|_| Error::InvalidArgument {
        command,
        reason: format!("'{word}' is not a valid {what}"),
    })
}

/// Read commands from `reader` and forward the resulting actions.
///
/// `quit` cancels the whole pipeline. End of input only stops reading, so a
/// piped script leaves the show running until it finishes or is interrupted.
pub async fn run<R>(
    reader: R,
    to_controller: Sender<Action>,
    state: watch::Receiver<SlideshowState>,
    cancel: CancellationToken,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line.context("failed to read command input")?,
        };
        let Some(line) = line else {
            info!("input closed; no further commands");
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!("{err}; type 'help' for commands");
                continue;
            }
        };

        match command {
            InputCommand::Submit(action) => {
                if let Err(err) = action.check(&state.borrow()) {
                    warn!(action = action.kind(), "{err}");
                    continue;
                }
                debug!(action = action.kind(), "submitting");
                if to_controller.send(action).await.is_err() {
                    warn!("controller channel closed");
                    break;
                }
            }
            InputCommand::List => {
                let snapshot = state.borrow().clone();
                if snapshot.is_empty() {
                    info!("no images loaded");
                }
                for line in display::slide_listing(&snapshot) {
                    info!("{line}");
                }
            }
            InputCommand::Help => info!("{HELP}"),
            InputCommand::Quit => {
                info!("quit requested; initiating shutdown");
                cancel.cancel();
                break;
            }
        }
    }

    Ok(())
}
