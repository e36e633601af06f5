//! Line-oriented chat host.
//!
//! Each input line is one chat command. Commands run concurrently and every
//! reply is written as soon as its command finishes, so a slow command never
//! holds back a fast one or waits for more input.

use crate::bot::Bot;
use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;
use tracing::debug;

async fn write_reply<W>(output: &mut W, lines: &[String]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for line in lines {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}

/// Answer every line of `input` on `output` until the input ends and all
/// pending commands have replied
pub async fn listen<R, W>(bot: Arc<Bot>, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut pending = JoinSet::new();
    let mut input_open = true;

    while input_open || !pending.is_empty() {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    Some(line) => {
                        let bot = Arc::clone(&bot);
                        pending.spawn(async move { bot.handle(&line).await });
                    }
                    None => {
                        debug!("Input closed, {} command(s) still running", pending.len());
                        input_open = false;
                    }
                }
            }
            Some(done) = pending.join_next(), if !pending.is_empty() => {
                write_reply(&mut output, &done.context("Command task failed")?).await?;
            }
            else => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dev::mock_client::MockProvider;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, BufReader};

    fn bot() -> Arc<Bot> {
        let config = Config {
            irc_formatting: false,
            playoff_season: Some(20162017),
            ..Config::default()
        };
        let provider = Arc::new(MockProvider::with_fixtures());
        Arc::new(Bot::with_provider(&config, provider))
    }

    #[tokio::test]
    async fn test_reply_written_while_input_still_open() {
        let (mut input_tx, input_rx) = tokio::io::duplex(1024);
        let (output_tx, output_rx) = tokio::io::duplex(4096);
        let host = tokio::spawn(listen(bot(), BufReader::new(input_rx), output_tx));

        input_tx.write_all(b"!nhlplayoffs\n").await.unwrap();
        let mut replies = BufReader::new(output_rx).lines();
        let first = tokio::time::timeout(Duration::from_secs(5), replies.next_line())
            .await
            .expect("reply before the next input line")
            .unwrap();
        assert_eq!(first.as_deref(), Some("Second Round"));

        drop(input_tx);
        host.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_pending_replies_flushed_after_input_ends() {
        let (mut input_tx, input_rx) = tokio::io::duplex(1024);
        let (output_tx, mut output_rx) = tokio::io::duplex(4096);
        let host = tokio::spawn(listen(bot(), BufReader::new(input_rx), output_tx));

        input_tx
            .write_all(b"!standings\nsummary ZZZ 2017-04-23\n")
            .await
            .unwrap();
        drop(input_tx);
        host.await.unwrap().unwrap();

        let mut written = String::new();
        output_rx.read_to_string(&mut written).await.unwrap();
        assert_eq!(written, "No game found for ZZZ on 2017-04-23.\n");
    }
}
