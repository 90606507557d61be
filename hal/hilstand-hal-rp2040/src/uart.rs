//! Blocking UART transport
//!
//! The stand talks over UART0 in blocking mode: one byte in, at most one
//! line out. The PL011 baud divisor is checked against clk_peri before
//! the peripheral is opened so an unreachable rate fails at startup
//! instead of producing garbage on the wire.

use embassy_rp::uart::{self, Blocking, Uart};
use hilstand_hal::uart::{DataBits, Parity, StopBits};
use hilstand_hal::{UartConfig, UartRx, UartTx};

/// Largest PL011 integer divisor
const MAX_INTEGER_DIVISOR: u64 = 0xFFFF;

/// Line faults reported by the UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    Overrun,
    Break,
    Parity,
    Framing,
    Other,
}

impl From<uart::Error> for UartBusError {
    fn from(e: uart::Error) -> Self {
        match e {
            uart::Error::Overrun => Self::Overrun,
            uart::Error::Break => Self::Break,
            uart::Error::Parity => Self::Parity,
            uart::Error::Framing => Self::Framing,
            #[allow(unreachable_patterns)]
            _ => Self::Other,
        }
    }
}

/// Serial settings the hardware cannot honour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// clk_peri is not running
    ClockStopped,
    /// Baud rate needs a divisor below 1
    BaudTooHigh,
    /// Baud rate needs a divisor above 65535
    BaudTooLow,
}

/// PL011 baud rate divisor (16.6 fixed point)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudDivisor {
    pub integer: u16,
    pub fraction: u8,
}

impl BaudDivisor {
    /// Divisor for `baudrate` from a `clk_peri_hz` reference
    ///
    /// Rounds the same way the peripheral driver programs IBRD/FBRD.
    pub fn solve(clk_peri_hz: u32, baudrate: u32) -> Result<Self, TransportError> {
        if clk_peri_hz == 0 {
            return Err(TransportError::ClockStopped);
        }
        if baudrate == 0 {
            return Err(TransportError::BaudTooLow);
        }

        let div = 8 * clk_peri_hz as u64 / baudrate as u64 + 1;
        let integer = div >> 7;
        let fraction = (div & 0x7f) >> 1;

        match integer {
            0 => Err(TransportError::BaudTooHigh),
            i if i > MAX_INTEGER_DIVISOR => Err(TransportError::BaudTooLow),
            MAX_INTEGER_DIVISOR => Ok(Self {
                integer: u16::MAX,
                fraction: 0,
            }),
            i => Ok(Self {
                integer: i as u16,
                fraction: fraction as u8,
            }),
        }
    }

    /// Baud rate this divisor actually produces
    pub fn actual_baudrate(&self, clk_peri_hz: u32) -> u32 {
        let sixty_fourths = 64 * self.integer as u64 + self.fraction as u64;
        (4 * clk_peri_hz as u64 / sixty_fourths) as u32
    }

    /// Deviation from `baudrate`, in parts per million
    pub fn error_ppm(&self, clk_peri_hz: u32, baudrate: u32) -> u32 {
        if baudrate == 0 {
            return u32::MAX;
        }
        let actual = self.actual_baudrate(clk_peri_hz) as u64;
        (actual.abs_diff(baudrate as u64) * 1_000_000 / baudrate as u64) as u32
    }
}

/// Translate the board-agnostic settings into the driver's
pub fn driver_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}

/// Blocking serial transport
pub struct SerialPort<'d> {
    uart: Uart<'d, Blocking>,
}

impl<'d> SerialPort<'d> {
    /// Wrap an opened blocking UART
    pub fn new(uart: Uart<'d, Blocking>) -> Self {
        Self { uart }
    }
}

impl UartRx for SerialPort<'_> {
    type Error = UartBusError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, UartBusError> {
        self.uart.blocking_read(buf)?;
        Ok(buf.len())
    }
}

impl UartTx for SerialPort<'_> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartBusError> {
        self.uart.blocking_write(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), UartBusError> {
        self.uart.blocking_flush()?;
        Ok(())
    }
}
