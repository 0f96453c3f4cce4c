use anyhow::{Context, bail};
use kanal::AsyncSender;
use mosaic_types::{AppEvent, Category, UiEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Watch stdin for interactive commands
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Starting stdin command watcher");
    read_commands(BufReader::new(tokio::io::stdin()), cancel, event_tx).await
}

/// Forward one [`UiEvent`] per recognised line. End of input closes the window.
pub async fn read_commands<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Command watcher stopping");
                return Ok(());
            }
            line = lines.next_line() => line.context("reading command input")?,
        };

        let Some(line) = line else {
            tracing::info!("Input closed, closing window");
            event_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
            return Ok(());
        };

        match parse_command(&line) {
            Ok(Some(event)) => {
                let close = event == UiEvent::Close;
                event_tx.send(AppEvent::UiEvent(event)).await?;
                if close {
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("{e:#}"),
        }
    }
}

/// Parse one command line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<UiEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "search" | "s" => parse_search(rest),
        "play" | "pause" | "toggle" | "p" => UiEvent::TogglePlayback,
        "show" | "r" => UiEvent::Render,
        "quit" | "exit" | "q" => UiEvent::Close,
        other => bail!("unknown command: {other}"),
    };

    Ok(Some(event))
}

fn parse_search(args: &str) -> UiEvent {
    // optional `<category>:` prefix, anything else is part of the term
    if let Some((prefix, term)) = args.split_once(':') {
        match prefix.trim().parse::<Category>() {
            Ok(category) => {
                return UiEvent::Search {
                    term: term.trim().to_string(),
                    category: Some(category),
                };
            }
            Err(e) => tracing::debug!("no category prefix: {e}"),
        }
    }

    UiEvent::Search {
        term: args.to_string(),
        category: None,
    }
}
