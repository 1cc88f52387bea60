use crate::constants::{DIGIT_BASE, DIGIT_COUNT, FRAME_SIZE};
use crate::error::Error;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Wire layout of one meter frame. Every byte is an ASCII-offset nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct FrameRaw {
    pub digits: [u8; DIGIT_COUNT], // Mantissa, most significant first
    pub range: u8,                 // Decimal point / multiplier selector
    pub kind: u8,                  // Message type selector
    pub reserved0: u8,
    pub sign: u8, // Sign flag, meaning depends on message type
    pub reserved1: [u8; 2],
}

/// Convert a raw frame byte to its integer value. No range check.
pub fn nibble(byte: u8) -> u8 {
    byte.wrapping_sub(DIGIT_BASE)
}

/// One complete frame, copied out of the reader's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    raw: FrameRaw,
}

impl Frame {
    /// Mantissa digit values, most significant first
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        self.raw.digits.map(nibble)
    }

    pub fn range(&self) -> u8 {
        nibble(self.raw.range)
    }

    pub fn message_type_raw(&self) -> u8 {
        nibble(self.raw.kind)
    }

    pub fn sign(&self) -> u8 {
        nibble(self.raw.sign)
    }

    /// Raw bytes at offsets 7, 9 and 10. Carried along but not interpreted.
    pub fn reserved(&self) -> [u8; 3] {
        [self.raw.reserved0, self.raw.reserved1[0], self.raw.reserved1[1]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.raw.as_bytes()
    }
}

impl From<FrameRaw> for Frame {
    fn from(raw: FrameRaw) -> Self {
        Frame { raw }
    }
}

impl From<[u8; FRAME_SIZE]> for Frame {
    fn from(bytes: [u8; FRAME_SIZE]) -> Self {
        Frame {
            raw: zerocopy::transmute!(bytes),
        }
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw = FrameRaw::read_from_bytes(bytes).map_err(|_| Error::InvalidFrameLength {
            expected: FRAME_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Frame { raw })
    }
}
