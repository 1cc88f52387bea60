//! Line rendering for decoded measurements.
//!
//! Each frame becomes one line: `<timestamp><delim><value>[<delim><unit>]`.
//! The configuration is built once before capture starts and only borrowed
//! afterwards.

use crate::constants::DEFAULT_TIME_FORMAT;
use crate::error::Error;
use crate::message::Measurement;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::io::{self, Write};

/// Field separator between timestamp, value and unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Tab => "\t",
            Delimiter::Comma => ",",
        }
    }
}

/// How the leading timestamp field is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampMode<'a> {
    /// Local wall-clock time through a strftime-style template
    Formatted(&'a str),
    /// Seconds since the Unix epoch
    EpochSeconds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    time_format: String,
    epoch_seconds: bool,
    delimiter: Delimiter,
    show_units: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            epoch_seconds: false,
            delimiter: Delimiter::Tab,
            show_units: true,
        }
    }
}

impl OutputConfig {
    /// Print Unix timestamps instead of formatted local time
    pub fn epoch_seconds(mut self) -> Self {
        self.epoch_seconds = true;
        self
    }

    /// Separate fields with commas instead of tabs
    pub fn csv(mut self) -> Self {
        self.delimiter = Delimiter::Comma;
        self
    }

    /// Leave the unit field out entirely
    pub fn no_units(mut self) -> Self {
        self.show_units = false;
        self
    }

    /// Replace the timestamp template. `None` or an empty template keeps the current one.
    pub fn time_format(mut self, format: Option<&str>) -> Result<Self, Error> {
        let Some(format) = format.filter(|f| !f.is_empty()) else {
            return Ok(self);
        };
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidTimeFormat(format.to_string()));
        }
        self.time_format = format.to_string();
        Ok(self)
    }

    pub fn timestamp_mode(&self) -> TimestampMode<'_> {
        if self.epoch_seconds {
            TimestampMode::EpochSeconds
        } else {
            TimestampMode::Formatted(&self.time_format)
        }
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn show_units(&self) -> bool {
        self.show_units
    }
}

/// Writes measurement lines according to a borrowed [`OutputConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a OutputConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a OutputConfig) -> Self {
        Renderer { config }
    }

    /// Write one line stamped with the current local time.
    pub fn write_line<W: Write>(&self, out: &mut W, measurement: &Measurement) -> io::Result<()> {
        self.write_line_at(out, measurement, &Local::now())
    }

    pub fn write_line_at<W, Tz>(&self, out: &mut W, measurement: &Measurement, now: &DateTime<Tz>) -> io::Result<()>
    where
        W: Write,
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let delimiter = self.config.delimiter.as_str();
        match self.config.timestamp_mode() {
            TimestampMode::EpochSeconds => write!(out, "{}", now.timestamp())?,
            TimestampMode::Formatted(template) => write!(out, "{}", now.format(template))?,
        }
        write!(out, "{}{}", delimiter, measurement.reading)?;
        if self.config.show_units {
            write!(out, "{}{}", delimiter, measurement.unit)?;
        }
        writeln!(out)
    }

    /// Render a line to a string, newline included.
    pub fn format_line<Tz>(&self, measurement: &Measurement, now: &DateTime<Tz>) -> io::Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut buf = Vec::new();
        self.write_line_at(&mut buf, measurement, now)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
