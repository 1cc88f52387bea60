// Protocol constants for the UNI-T serial telemetry frame

use std::time::Duration;

/// Size of one frame on the wire, line terminator included (11 bytes)
pub const FRAME_SIZE: usize = 11;

/// Every field byte is an ASCII offset from '0'
pub const DIGIT_BASE: u8 = 0x30;

/// Number of mantissa digits in a frame
pub const DIGIT_COUNT: usize = 5;

/// Offset of the most significant mantissa digit
pub const DIGITS_OFFSET: usize = 0;

/// Offset of the range / decimal point selector
pub const RANGE_OFFSET: usize = 5;

/// Offset of the message type selector
pub const TYPE_OFFSET: usize = 6;

/// Offset of the sign flag
pub const SIGN_OFFSET: usize = 8;

/// Offsets the decoder never consults
pub const RESERVED_OFFSETS: [usize; 3] = [7, 9, 10];

/// Sign flag value meaning "negative" for DC volts
pub const DC_VOLTS_NEGATIVE: u8 = 5;

/// Sign flag value meaning "negative" for millivolts and the current ranges
pub const CURRENT_NEGATIVE: u8 = 4;

/// Digit value the meter sends instead of a reading (open circuit / overload)
pub const NO_READING: u8 = 0xA;

/// Line speed used by the meter's optical cable
pub const DEFAULT_BAUD_RATE: u32 = 2400;

/// Upper bound on a single wait for serial data before the stop flag is checked again
pub const POLL_TIMEOUT: Duration = Duration::from_millis(1000);

/// Timestamp template used unless overridden
pub const DEFAULT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Baud rates accepted for the serial device
pub const SUPPORTED_BAUD_RATES: &[u32] = &[
    50, 75, 110, 134, 150, 200, 300, 600, 1200, 1800, 2400, 4800, 9600, 19200, 38400, 57600, 115200, 230400,
    460800, 500000, 576000, 921600, 1000000, 1152000, 1500000,
];
