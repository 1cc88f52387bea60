//! Common test utilities and shared imports

// Shared across test files; not every helper is used by every file
#[allow(unused_imports)]
pub use ut_reader_lib::error::Error;
#[allow(unused_imports)]
pub use ut_reader_lib::frame::Frame;
#[allow(unused_imports)]
pub use ut_reader_lib::message::{Measurement, MessageType, Reading, Unit};
#[allow(unused_imports)]
pub use ut_reader_lib::{OutputConfig, Renderer, decode};

/// Encode field values the way the meter puts them on the wire
#[allow(dead_code)]
pub fn encode_frame(digits: [u8; 5], range: u8, kind: u8, sign: u8) -> [u8; 11] {
    let mut bytes = [b'0'; 11];
    for (slot, digit) in bytes.iter_mut().zip(digits) {
        *slot = b'0' + digit;
    }
    bytes[5] = b'0' + range;
    bytes[6] = b'0' + kind;
    bytes[8] = b'0' + sign;
    bytes[9] = b'\r';
    bytes[10] = b'\n';
    bytes
}

#[allow(dead_code)]
pub fn frame(digits: [u8; 5], range: u8, kind: u8, sign: u8) -> Frame {
    Frame::from(encode_frame(digits, range, kind, sign))
}

/// Decode and return the (value, unit) pair as printed
#[allow(dead_code)]
pub fn decode_pair(digits: [u8; 5], range: u8, kind: u8, sign: u8) -> (String, String) {
    let measurement = decode(&frame(digits, range, kind, sign)).expect("Known message type");
    (measurement.value(), measurement.unit())
}

/// DC volts frame: digits 12345, range 2, sign flag 5, CR LF terminator
#[allow(dead_code)]
pub const DC_VOLTS_NEGATIVE_LINE: &str = "3132333435323130350d0a";
