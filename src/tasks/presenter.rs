use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::select;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::display;
use crate::slideshow::SlideshowState;

/// Write a status line to `out` whenever the visible status changes.
pub async fn run<W>(
    mut updates: watch::Receiver<SlideshowState>,
    mut out: W,
    cancel: CancellationToken,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut last: Option<String> = None;

    loop {
        let line = display::status_line(&updates.borrow_and_update());
        if last.as_deref() != Some(line.as_str()) {
            out.write_all(line.as_bytes())
                .await
                .context("failed to write status")?;
            out.write_all(b"\n").await.context("failed to write status")?;
            out.flush().await.context("failed to flush status")?;
            last = Some(line);
        }

        select! {
            _ = cancel.cancelled() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    debug!("state publisher closed");
                    break;
                }
            }
        }
    }

    Ok(())
}
