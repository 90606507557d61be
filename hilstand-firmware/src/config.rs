//! Board configuration
//!
//! Constants come from board.toml, validated and generated by build.rs.

use hilstand_hal::UartConfig;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

// board.toml cannot move the tick away from the protocol's millisecond unit
const _: () = assert!(TICK_HZ == hilstand_core::TICK_HZ);

/// Command transport settings (8N1)
pub fn uart_config() -> UartConfig {
    UartConfig::with_baudrate(BAUDRATE)
}
