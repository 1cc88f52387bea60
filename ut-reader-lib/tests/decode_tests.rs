//! Tests for frame classification and per-type decoding

mod common;

use common::*;

fn pair(value: &str, unit: &str) -> (String, String) {
    (value.to_string(), unit.to_string())
}

#[test]
fn test_dc_volts_from_wire_bytes() {
    let bytes = hex::decode(DC_VOLTS_NEGATIVE_LINE).expect("Failed to decode hex");
    let frame = Frame::try_from(bytes.as_slice()).unwrap();
    let measurement = decode(&frame).unwrap();

    assert_eq!(measurement.message_type, MessageType::DcVolts);
    assert_eq!(measurement.value(), "-12.345");
    assert_eq!(measurement.unit(), "V");
}

#[test]
fn test_dc_volts_decimal_positions() {
    let expected = ["1.2345", "12.345", "123.45", "1234.5"];
    for (range, value) in (1..=4).zip(expected) {
        assert_eq!(decode_pair([1, 2, 3, 4, 5], range, 1, 0), pair(value, "V"), "range {}", range);
        assert_eq!(
            decode_pair([1, 2, 3, 4, 5], range, 1, 5),
            pair(&format!("-{}", value), "V"),
            "negative range {}",
            range
        );
    }
}

#[test]
fn test_dc_volts_only_flag_five_is_negative() {
    for sign in (0..=15).filter(|s| *s != 5) {
        let (value, _) = decode_pair([0, 0, 1, 0, 0], 2, 1, sign);
        assert!(!value.starts_with('-'), "sign {} produced {}", sign, value);
    }
}

#[test]
fn test_ac_volts_never_signed() {
    for sign in 0..=15 {
        let (value, unit) = decode_pair([2, 3, 0, 1, 5], 3, 2, sign);
        assert_eq!(value, "230.15");
        assert_eq!(unit, "V");
    }
}

#[test]
fn test_volts_unmapped_selector_is_blank() {
    assert_eq!(decode_pair([1, 2, 3, 4, 5], 0, 1, 5), pair("", "V"));
    assert_eq!(decode_pair([1, 2, 3, 4, 5], 5, 2, 0), pair("", "V"));
}

#[test]
fn test_ohms_ranges() {
    let cases = [
        (1, "005.00", "ohm"),
        (2, "0.0500", "kohm"),
        (3, "00.500", "kohm"),
        (4, "005.00", "kohm"),
        (5, "0.0500", "mohm"),
        (6, "00.500", "mohm"),
    ];
    for (range, value, unit) in cases {
        assert_eq!(decode_pair([0, 0, 5, 0, 0], range, 4, 0), pair(value, unit), "range {}", range);
    }
}

#[test]
fn test_ohms_unmapped_selectors() {
    for range in [0, 7, 8, 9, 10, 15] {
        assert_eq!(decode_pair([0, 0, 5, 0, 0], range, 4, 0), pair("error", ""), "range {}", range);
    }
}

#[test]
fn test_ohms_and_capacitance_out_of_range() {
    for kind in [4, 5] {
        for range in [0, 1, 6, 9] {
            let measurement = decode(&frame([10, 0, 0, 0, 0], range, kind, 4)).unwrap();
            assert_eq!(measurement.reading, Reading::OutOfRange);
            assert_eq!(measurement.unit(), "");
        }
    }
}

#[test]
fn test_capacitance_ranges() {
    let cases = [
        (1, "47.000", "nF"),
        (2, "470.00", "nF"),
        (3, "4.7000", "uF"),
        (4, "47.000", "uF"),
        (5, "470.00", "uF"),
        (6, "4.7000", "mF"),
    ];
    for (range, value, unit) in cases {
        assert_eq!(decode_pair([4, 7, 0, 0, 0], range, 5, 0), pair(value, unit), "range {}", range);
    }
    assert_eq!(decode_pair([4, 7, 0, 0, 0], 0, 5, 0), pair("error", ""));
}

#[test]
fn test_capacitance_overload() {
    assert_eq!(decode_pair([10, 0, 0, 0, 0], 3, 5, 0), pair("out of range", ""));
}

#[test]
fn test_current_ranges() {
    assert_eq!(decode_pair([1, 2, 3, 4, 5], 0, 7, 4), pair("-123.45", "uA"));
    assert_eq!(decode_pair([1, 2, 3, 4, 5], 1, 7, 0), pair("1234.5", "uA"));
    assert_eq!(decode_pair([1, 2, 3, 4, 5], 0, 8, 0), pair("12.345", "mA"));
    assert_eq!(decode_pair([1, 2, 3, 4, 5], 1, 8, 4), pair("-123.45", "mA"));
    assert_eq!(decode_pair([0, 2, 3, 4, 5], 3, 9, 5), pair("02.345", "A"));
}

#[test]
fn test_frequency_selectors_zero_to_seven_mapped() {
    let units = ["Hz", "Hz", "kHz", "kHz", "kHz", "MHz", "MHz", "MHz"];
    for (range, unit) in (0..=7).zip(units) {
        let measurement = decode(&frame([5, 0, 0, 0, 0], range, 0xC, 0)).unwrap();
        assert!(measurement.is_numeric(), "range {}", range);
        assert_eq!(measurement.unit(), unit);
    }
    assert_eq!(decode_pair([5, 0, 0, 0, 0], 2, 0xC, 4), pair("5.0000", "kHz"));
}

#[test]
fn test_frequency_selector_past_table_is_blank() {
    for range in [8, 9, 15] {
        assert_eq!(decode_pair([5, 0, 0, 0, 0], range, 0xC, 0), pair("", ""), "range {}", range);
    }
}

#[test]
fn test_beep_states() {
    assert_eq!(decode_pair([10, 0, 0, 0, 0], 0, 0xA, 0), pair("open", ""));
    assert_eq!(decode_pair([10, 0, 0, 0, 0], 3, 0xA, 0), pair("open", ""));
    assert_eq!(decode_pair([0, 1, 2, 3, 4], 0, 0xA, 0), pair("012.34", "ohm"));
    assert_eq!(decode_pair([0, 1, 2, 3, 4], 1, 0xA, 0), pair("high resistance", ""));
}

#[test]
fn test_reserved_bytes_ignored() {
    let mut bytes = encode_frame([1, 2, 3, 4, 5], 2, 1, 5);
    bytes[7] = b'?';
    bytes[9] = 0x00;
    let measurement = decode(&Frame::from(bytes)).unwrap();
    assert_eq!(measurement.value(), "-12.345");
}

#[test]
fn test_unknown_message_types() {
    for kind in [0u8, 14, 15] {
        let err = decode(&frame([0, 0, 0, 0, 0], 0, kind, 0)).unwrap_err();
        assert_eq!(err.to_string(), format!("Unknown message type 0x{:02x}", kind));
    }
}
