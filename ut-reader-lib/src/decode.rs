use crate::constants::{CURRENT_NEGATIVE, DC_VOLTS_NEGATIVE, DIGIT_COUNT, NO_READING};
use crate::error::Error;
use crate::frame::Frame;
use crate::message::{Measurement, MessageType, Reading, Unit};
use tracing::trace;

/// Range selector value, integer digits before the decimal point, unit.
type RangeTable = &'static [(u8, usize, Unit)];

/// What a ranged type reports for a selector missing from its table.
#[derive(Debug, Clone, Copy)]
enum Unmapped {
    /// The "error" reading
    Error,
    /// An empty value with this unit; volts and frequency have no error case
    Blank(Unit),
}

const VOLTS_RANGES: RangeTable = &[
    (1, 1, Unit::Volts),
    (2, 2, Unit::Volts),
    (3, 3, Unit::Volts),
    (4, 4, Unit::Volts),
];

const OHMS_RANGES: RangeTable = &[
    (1, 3, Unit::Ohms),
    (2, 1, Unit::Kiloohms),
    (3, 2, Unit::Kiloohms),
    (4, 3, Unit::Kiloohms),
    (5, 1, Unit::Megaohms),
    (6, 2, Unit::Megaohms),
];

const CAPACITANCE_RANGES: RangeTable = &[
    (1, 2, Unit::Nanofarads),
    (2, 3, Unit::Nanofarads),
    (3, 1, Unit::Microfarads),
    (4, 2, Unit::Microfarads),
    (5, 3, Unit::Microfarads),
    (6, 1, Unit::Millifarads),
];

const MICROAMPS_RANGES: RangeTable = &[(0, 3, Unit::Microamps), (1, 4, Unit::Microamps)];

const MILLIAMPS_RANGES: RangeTable = &[(0, 2, Unit::Milliamps), (1, 3, Unit::Milliamps)];

// Every selector the meter can send for frequency is mapped
const FREQUENCY_RANGES: RangeTable = &[
    (0, 2, Unit::Hertz),
    (1, 3, Unit::Hertz),
    (2, 1, Unit::Kilohertz),
    (3, 2, Unit::Kilohertz),
    (4, 3, Unit::Kilohertz),
    (5, 1, Unit::Megahertz),
    (6, 2, Unit::Megahertz),
    (7, 3, Unit::Megahertz),
];

/// Decode one frame into a measurement.
///
/// Range selectors a message type does not define never produce an `Err`:
/// most types report an "error" reading, volts and frequency an empty value.
/// The only failure is a message type outside 1..=13.
pub fn decode(frame: &Frame) -> Result<Measurement, Error> {
    let raw_type = frame.message_type_raw();
    let message_type = MessageType::try_from(raw_type).map_err(|_| Error::UnknownMessageType(raw_type))?;
    trace!(%message_type, range = frame.range(), sign = frame.sign(), "Decoding frame");

    let measurement = match message_type {
        MessageType::DcVolts => ranged_or(
            frame,
            message_type,
            VOLTS_RANGES,
            Some(DC_VOLTS_NEGATIVE),
            Unmapped::Blank(Unit::Volts),
        ),
        MessageType::AcVolts => ranged_or(frame, message_type, VOLTS_RANGES, None, Unmapped::Blank(Unit::Volts)),
        MessageType::Millivolts => fixed(frame, message_type, 3, Unit::Millivolts, Some(CURRENT_NEGATIVE)),
        MessageType::Ohms => guarded(frame, message_type, Unit::None, |f, t| ranged(f, t, OHMS_RANGES, None)),
        MessageType::Capacitance => guarded(frame, message_type, Unit::None, |f, t| {
            ranged(f, t, CAPACITANCE_RANGES, None)
        }),
        MessageType::TempCelsius => guarded(frame, message_type, Unit::Celsius, |f, t| {
            fixed(f, t, 4, Unit::Celsius, None)
        }),
        MessageType::TempFahrenheit => guarded(frame, message_type, Unit::Fahrenheit, |f, t| {
            fixed(f, t, 4, Unit::Fahrenheit, None)
        }),
        MessageType::Microamps => ranged(frame, message_type, MICROAMPS_RANGES, Some(CURRENT_NEGATIVE)),
        MessageType::Milliamps => ranged(frame, message_type, MILLIAMPS_RANGES, Some(CURRENT_NEGATIVE)),
        MessageType::Amps => fixed(frame, message_type, 2, Unit::Amps, Some(CURRENT_NEGATIVE)),
        MessageType::Beep => beep(frame),
        MessageType::Diode => diode(frame),
        MessageType::Frequency => {
            ranged_or(frame, message_type, FREQUENCY_RANGES, None, Unmapped::Blank(Unit::None))
        }
    };

    Ok(measurement)
}

/// Render five digits with the decimal point after `int_digits` of them.
pub fn format_digits(digits: [u8; DIGIT_COUNT], int_digits: usize, negative: bool) -> String {
    // sign + 5 digits + point
    let mut text = String::with_capacity(DIGIT_COUNT + 2);
    if negative {
        text.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i == int_digits {
            text.push('.');
        }
        text.push_str(&format!("{digit:X}"));
    }
    text
}

fn is_negative(frame: &Frame, negative_flag: Option<u8>) -> bool {
    negative_flag.is_some_and(|flag| frame.sign() == flag)
}

fn lookup(table: RangeTable, selector: u8) -> Option<(usize, Unit)> {
    table
        .iter()
        .find(|(range, _, _)| *range == selector)
        .map(|&(_, int_digits, unit)| (int_digits, unit))
}

fn fixed(
    frame: &Frame,
    message_type: MessageType,
    int_digits: usize,
    unit: Unit,
    negative_flag: Option<u8>,
) -> Measurement {
    let text = format_digits(frame.digits(), int_digits, is_negative(frame, negative_flag));
    Measurement::new(message_type, Reading::Value(text), unit)
}

fn ranged(frame: &Frame, message_type: MessageType, table: RangeTable, negative_flag: Option<u8>) -> Measurement {
    ranged_or(frame, message_type, table, negative_flag, Unmapped::Error)
}

fn ranged_or(
    frame: &Frame,
    message_type: MessageType,
    table: RangeTable,
    negative_flag: Option<u8>,
    unmapped: Unmapped,
) -> Measurement {
    match lookup(table, frame.range()) {
        Some((int_digits, unit)) => fixed(frame, message_type, int_digits, unit, negative_flag),
        None => {
            trace!(%message_type, range = frame.range(), "Unmapped range selector");
            match unmapped {
                Unmapped::Error => Measurement::error(message_type),
                Unmapped::Blank(unit) => Measurement::new(message_type, Reading::Value(String::new()), unit),
            }
        }
    }
}

/// Short-circuit to "out of range" when the leading digit is not a decimal digit.
fn guarded(
    frame: &Frame,
    message_type: MessageType,
    overload_unit: Unit,
    decode: impl FnOnce(&Frame, MessageType) -> Measurement,
) -> Measurement {
    if frame.digits()[0] > 9 {
        Measurement::new(message_type, Reading::OutOfRange, overload_unit)
    } else {
        decode(frame, message_type)
    }
}

fn beep(frame: &Frame) -> Measurement {
    if frame.digits()[0] == NO_READING {
        Measurement::new(MessageType::Beep, Reading::Open, Unit::None)
    } else if frame.range() == 0 {
        fixed(frame, MessageType::Beep, 3, Unit::Ohms, None)
    } else {
        Measurement::new(MessageType::Beep, Reading::HighResistance, Unit::None)
    }
}

fn diode(frame: &Frame) -> Measurement {
    if frame.digits()[0] == NO_READING {
        Measurement::new(MessageType::Diode, Reading::Open, Unit::None)
    } else {
        fixed(frame, MessageType::Diode, 1, Unit::Millivolts, None)
    }
}
