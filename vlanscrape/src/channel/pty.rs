//! PTY shell channel with prompt-terminated reads.

use std::time::Duration;

use log::{debug, trace};
use regex::bytes::Regex;
use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::buffer::PatternBuffer;
use crate::error::{ChannelError, Result};

/// Interactive shell channel on an open SSH session.
///
/// Wraps the russh channel and accumulates everything the device prints
/// into a [`PatternBuffer`] until the prompt shows up.
pub struct PtyChannel {
    channel: Channel<Msg>,
    buffer: PatternBuffer,
}

impl PtyChannel {
    pub fn new(channel: Channel<Msg>, search_depth: usize) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(search_depth),
        }
    }

    /// Send one line of input, terminated with a newline.
    pub async fn send(&mut self, input: &str) -> Result<()> {
        let line = format!("{input}\n");
        self.channel
            .data(line.as_bytes())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Discard output left over from an earlier command.
    ///
    /// A stale buffer is left alone; see [`PtyChannel::resync`].
    pub fn discard_pending(&mut self) {
        if !self.buffer.is_stale() && !self.buffer.is_empty() {
            trace!("discarding {} stale bytes", self.buffer.len());
            self.buffer.clear();
        }
    }

    /// Read until `pattern` matches the buffer tail, returning everything read.
    ///
    /// The whole read shares a single deadline of `timeout`. On timeout the
    /// buffer is marked stale and the partial output stays in it.
    pub async fn read_until_pattern(&mut self, pattern: &Regex, timeout: Duration) -> Result<Vec<u8>> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.buffer.tail_contains(pattern) {
                return Ok(self.buffer.take());
            }
            if let Err(e) = self.receive(deadline, timeout).await {
                if matches!(e, ChannelError::PatternTimeout(_)) {
                    self.buffer.mark_stale();
                }
                return Err(e.into());
            }
        }
    }

    /// Wait out the tail of a read that timed out earlier.
    ///
    /// Reads until that command's prompt shows up and drops it all. Does
    /// nothing if no read is outstanding.
    pub async fn resync(&mut self, pattern: &Regex, timeout: Duration) -> Result<()> {
        if !self.buffer.is_stale() {
            return Ok(());
        }
        debug!("draining output of an abandoned command");

        let deadline = tokio::time::Instant::now() + timeout;
        while !self.buffer.settle(pattern) {
            self.receive(deadline, timeout).await?;
        }
        Ok(())
    }

    /// Wait for the next channel message and add any output to the buffer.
    async fn receive(
        &mut self,
        deadline: tokio::time::Instant,
        timeout: Duration,
    ) -> std::result::Result<(), ChannelError> {
        let msg = tokio::time::timeout_at(deadline, self.channel.wait())
            .await
            .map_err(|_| ChannelError::PatternTimeout(timeout))?;

        match msg {
            Some(ChannelMsg::Data { data }) => {
                trace!("received {} bytes", data.len());
                self.buffer.extend(&data);
            }
            Some(ChannelMsg::ExtendedData { data, .. }) => {
                self.buffer.extend(&data);
            }
            Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                return Err(ChannelError::Closed);
            }
            Some(_) => {}
        }
        Ok(())
    }

    /// Close the channel.
    pub async fn close(&self) -> Result<()> {
        self.channel.close().await.map_err(ChannelError::Ssh)?;
        Ok(())
    }
}
