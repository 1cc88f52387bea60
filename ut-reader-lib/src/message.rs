use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;
use strum_macros::Display;

/// Physical quantity reported by a frame, selected by byte 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MessageType {
    #[strum(to_string = "DC volts")]
    DcVolts = 0x1,
    #[strum(to_string = "AC volts")]
    AcVolts = 0x2,
    #[strum(to_string = "millivolts")]
    Millivolts = 0x3,
    #[strum(to_string = "resistance")]
    Ohms = 0x4,
    #[strum(to_string = "capacitance")]
    Capacitance = 0x5,
    #[strum(to_string = "temperature (C)")]
    TempCelsius = 0x6,
    #[strum(to_string = "microamps")]
    Microamps = 0x7,
    #[strum(to_string = "milliamps")]
    Milliamps = 0x8,
    #[strum(to_string = "amps")]
    Amps = 0x9,
    #[strum(to_string = "continuity")]
    Beep = 0xA,
    #[strum(to_string = "diode")]
    Diode = 0xB,
    #[strum(to_string = "frequency")]
    Frequency = 0xC,
    #[strum(to_string = "temperature (F)")]
    TempFahrenheit = 0xD,
}

/// Unit label printed next to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Unit {
    #[default]
    #[strum(to_string = "")]
    None,
    #[strum(to_string = "V")]
    Volts,
    #[strum(to_string = "mV")]
    Millivolts,
    #[strum(to_string = "ohm")]
    Ohms,
    #[strum(to_string = "kohm")]
    Kiloohms,
    #[strum(to_string = "mohm")]
    Megaohms,
    #[strum(to_string = "nF")]
    Nanofarads,
    #[strum(to_string = "uF")]
    Microfarads,
    #[strum(to_string = "mF")]
    Millifarads,
    #[strum(to_string = "C")]
    Celsius,
    #[strum(to_string = "F")]
    Fahrenheit,
    #[strum(to_string = "uA")]
    Microamps,
    #[strum(to_string = "mA")]
    Milliamps,
    #[strum(to_string = "A")]
    Amps,
    #[strum(to_string = "Hz")]
    Hertz,
    #[strum(to_string = "kHz")]
    Kilohertz,
    #[strum(to_string = "MHz")]
    Megahertz,
}

/// Value part of a measurement: either rendered digits or a meter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    /// Five digits with one decimal point and an optional leading '-'
    Value(String),
    /// Range selector the message type does not define
    Error,
    OutOfRange,
    Open,
    HighResistance,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(text) => f.write_str(text),
            Reading::Error => f.write_str("error"),
            Reading::OutOfRange => f.write_str("out of range"),
            Reading::Open => f.write_str("open"),
            Reading::HighResistance => f.write_str("high resistance"),
        }
    }
}

/// One decoded frame, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub message_type: MessageType,
    pub reading: Reading,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(message_type: MessageType, reading: Reading, unit: Unit) -> Self {
        Measurement {
            message_type,
            reading,
            unit,
        }
    }

    /// The "error" measurement emitted for an unmapped range selector
    pub fn error(message_type: MessageType) -> Self {
        Measurement::new(message_type, Reading::Error, Unit::None)
    }

    pub fn value(&self) -> String {
        self.reading.to_string()
    }

    pub fn unit(&self) -> String {
        self.unit.to_string()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.reading, Reading::Value(_))
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::None => write!(f, "{}", self.reading),
            unit => write!(f, "{} {}", self.reading, unit),
        }
    }
}
