pub mod capture;
pub mod constants;
pub mod decode;
pub mod error;
pub mod frame;
pub mod message;
pub mod output;
pub mod reader;
pub mod serial;

pub use capture::{CaptureStats, capture};
pub use decode::decode;
pub use error::Error;
pub use frame::Frame;
pub use message::{Measurement, MessageType, Reading, Unit};
pub use output::{OutputConfig, Renderer};
pub use reader::FrameReader;
pub use serial::SerialSettings;
