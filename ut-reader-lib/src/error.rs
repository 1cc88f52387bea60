use std::io;
use thiserror::Error;

/// The primary error type for the `ut-reader-lib` library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    #[error("Unsupported baud rate: {0}")]
    UnsupportedBaudRate(u32),

    #[error("Invalid frame length: expected {expected} bytes, got {actual}")]
    InvalidFrameLength { expected: usize, actual: usize },

    #[error("Unknown message type 0x{0:02x}")]
    UnknownMessageType(u8),

    #[error("Invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    #[error("Frame channel closed")]
    ChannelClosed,
}
