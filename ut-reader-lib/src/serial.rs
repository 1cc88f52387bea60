use crate::constants::{DEFAULT_BAUD_RATE, SUPPORTED_BAUD_RATES};
use crate::error::Error;
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{debug, info};

/// Serial line settings for the meter's interface cable.
///
/// Only the device path and speed vary; the framing is fixed by the meter:
/// 7 data bits, odd parity, 1 stop bit, no flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub device: String,
    pub baud_rate: u32,
}

impl SerialSettings {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if SUPPORTED_BAUD_RATES.contains(&self.baud_rate) {
            Ok(())
        } else {
            Err(Error::UnsupportedBaudRate(self.baud_rate))
        }
    }

    /// Open and configure the device
    pub fn open(&self) -> Result<SerialStream, Error> {
        self.validate()?;
        debug!(device = %self.device, baud = self.baud_rate, "Opening serial device");

        #[allow(unused_mut)]
        let mut port = tokio_serial::new(&self.device, self.baud_rate)
            .data_bits(DataBits::Seven)
            .parity(Parity::Odd)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .open_native_async()?;

        #[cfg(unix)]
        port.set_exclusive(false)?;

        info!(device = %self.device, baud = self.baud_rate, "Serial device opened");
        Ok(port)
    }
}
