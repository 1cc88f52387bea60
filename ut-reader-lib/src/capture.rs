//! The decode and print loop driven by a [`FrameReader`].

use crate::decode::decode;
use crate::error::Error;
use crate::output::Renderer;
use crate::reader::FrameReader;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tokio::io::AsyncRead;
use tracing::debug;

/// Frames buffered between the reader task and the decoder.
pub const FRAME_QUEUE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Lines written to the measurement stream
    pub measurements: u64,
    /// Frames with an unknown message type
    pub dropped: u64,
}

/// Decode every frame the reader yields and print one line per measurement.
///
/// Unknown message types produce a single diagnostic line and the loop
/// carries on. Only a reader failure or a failed write ends it with an error.
pub async fn capture<R, W, D>(
    reader: FrameReader<R>,
    renderer: Renderer<'_>,
    out: &mut W,
    diagnostics: &mut D,
    stop: Arc<AtomicBool>,
) -> Result<CaptureStats, Error>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: Write,
    D: Write,
{
    let (mut frames, handle) = reader.spawn(FRAME_QUEUE_DEPTH, stop);
    let mut stats = CaptureStats::default();

    while let Some(frame) = frames.recv().await {
        match decode(&frame) {
            Ok(measurement) => {
                debug!(%measurement, "Decoded");
                renderer.write_line(out, &measurement)?;
                stats.measurements += 1;
            }
            Err(e) => {
                debug!(raw = %hex::encode(frame.as_bytes()), "Dropping frame");
                writeln!(diagnostics, "{}", e)?;
                stats.dropped += 1;
            }
        }
    }

    // A panicked reader task leaves nothing to report but the panic itself
    let forwarded = handle.await.map_err(|e| Error::Io(std::io::Error::other(e)))??;
    debug!(forwarded, ?stats, "Capture finished");
    Ok(stats)
}
