//! Frame source: turns the serial byte stream into whole frames.
//!
//! The meter terminates every frame with a line feed, so the reader splits on
//! `\n` and insists that each line is exactly one frame long. Waits are
//! bounded by a poll timeout so a stop request is noticed within one period.

use crate::constants::{FRAME_SIZE, POLL_TIMEOUT};
use crate::error::Error;
use crate::frame::Frame;
use bytes::BytesMut;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, trace};

pub struct FrameReader<R> {
    source: R,
    buffer: BytesMut,
    poll_timeout: Duration,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: BytesMut::with_capacity(FRAME_SIZE * 4),
            poll_timeout: POLL_TIMEOUT,
        }
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Wait for the next complete frame.
    ///
    /// Returns `Ok(None)` once `stop` is set or the source reaches a clean EOF.
    /// A line of the wrong length is fatal.
    pub async fn next_frame(&mut self, stop: &AtomicBool) -> Result<Option<Frame>, Error> {
        loop {
            if stop.load(Ordering::Relaxed) {
                debug!("Stop requested, leaving poll loop");
                return Ok(None);
            }

            if let Some(frame) = self.take_frame()? {
                return Ok(Some(frame));
            }

            match timeout(self.poll_timeout, self.source.read_buf(&mut self.buffer)).await {
                // Nothing arrived this period
                Err(_) => continue,
                Ok(Ok(0)) => {
                    if self.buffer.is_empty() {
                        debug!("Frame source reached EOF");
                        return Ok(None);
                    }
                    return Err(Error::InvalidFrameLength {
                        expected: FRAME_SIZE,
                        actual: self.buffer.len(),
                    });
                }
                Ok(Ok(n)) => trace!(bytes = n, buffered = self.buffer.len(), "Read from source"),
                Ok(Err(e)) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                    continue;
                }
                Ok(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Split one terminated line off the buffer, if there is one.
    fn take_frame(&mut self) -> Result<Option<Frame>, Error> {
        match self.buffer.iter().position(|&b| b == b'\n') {
            Some(end) => {
                let line = self.buffer.split_to(end + 1);
                debug!(raw = %hex::encode(&line), "Frame received");
                Frame::try_from(&line[..]).map(Some)
            }
            None if self.buffer.len() >= FRAME_SIZE => Err(Error::InvalidFrameLength {
                expected: FRAME_SIZE,
                actual: self.buffer.len(),
            }),
            None => Ok(None),
        }
    }

    /// Forward frames into `tx` until stopped, EOF, or a read error.
    ///
    /// Returns the number of frames forwarded.
    pub async fn run(mut self, tx: mpsc::Sender<Frame>, stop: Arc<AtomicBool>) -> Result<u64, Error> {
        let mut count = 0u64;
        while let Some(frame) = self.next_frame(&stop).await? {
            tx.send(frame).await.map_err(|_| Error::ChannelClosed)?;
            count += 1;
        }
        info!(frames = count, "Frame reader finished");
        Ok(count)
    }
}

impl<R: AsyncRead + Unpin + Send + 'static> FrameReader<R> {
    /// Run the reader on its own task, handing frames out through a channel.
    pub fn spawn(
        self,
        capacity: usize,
        stop: Arc<AtomicBool>,
    ) -> (mpsc::Receiver<Frame>, JoinHandle<Result<u64, Error>>) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = tokio::spawn(self.run(tx, stop));
        (rx, handle)
    }
}
