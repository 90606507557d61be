//! Hilstand - HIL GPIO Stand Firmware
//!
//! Firmware binary for RP2040 boards acting as a hardware-in-the-loop
//! GPIO stand. An external test controller sends single-byte commands
//! over UART0; the stand drives the stimulus pin, samples the
//! measurement pin, and reports uptime and command counts.
//!
//! Pin assignments:
//! - GPIO0 / GPIO1: UART0 TX / RX (command transport)
//! - GPIO2: stimulus output
//! - GPIO3: measurement input (pull-down)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::clocks;
use embassy_rp::uart::Uart;
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use hilstand_core::{PinPair, Service, ServiceError, Step};
use hilstand_hal_rp2040::uart::driver_config;
use hilstand_hal_rp2040::{BaudDivisor, MeasurementInput, SerialPort, StimulusOutput};

mod config;
mod tick;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Hilstand firmware starting...");

    let p = embassy_rp::init(Default::default());

    let Some(core) = cortex_m::Peripherals::take() else {
        error!("Core peripherals already taken");
        halt();
    };

    // Uptime tick
    let core_hz = clocks::clk_sys_freq();
    match tick::start(core.SYST, core_hz) {
        Ok(divider) => info!(
            "Tick: {} Hz from {} Hz clk_sys (reload {})",
            config::TICK_HZ,
            core_hz,
            divider.reload
        ),
        Err(e) => {
            error!("No SysTick divider for {} Hz: {:?}", core_hz, e);
            halt();
        }
    }

    // Command transport
    let serial = config::uart_config();
    let clk_peri = clocks::clk_peri_freq();
    let divisor = match BaudDivisor::solve(clk_peri, serial.baudrate) {
        Ok(divisor) => divisor,
        Err(e) => {
            error!(
                "Transport unavailable: {} baud from {} Hz clk_peri: {:?}",
                serial.baudrate, clk_peri, e
            );
            halt();
        }
    };
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, driver_config(&serial));
    info!(
        "UART0 at {} baud ({} ppm)",
        divisor.actual_baudrate(clk_peri),
        divisor.error_ppm(clk_peri, serial.baudrate)
    );

    // Stimulus starts low; measurement is pulled down
    let pins = PinPair::new(StimulusOutput::new(p.PIN_2), MeasurementInput::new(p.PIN_3));

    let mut service = Service::new(pins, SerialPort::new(uart), &tick::UPTIME);

    if let Err(e) = service.announce(config::PRODUCT) {
        warn!("Banner not sent: {:?}", e);
    }
    info!(
        "{} ready after {} ms",
        config::PRODUCT,
        Instant::now().as_millis()
    );

    service.run(|outcome| match outcome {
        Ok(Step::Replied(command, response)) => trace!("{:?} -> {:?}", command, response),
        Ok(Step::Ignored) => {}
        Err(ServiceError::Read(e)) => warn!("UART read fault: {:?}", e),
        Err(ServiceError::Write(e)) => warn!("UART write fault: {:?}", e),
        Err(e) => error!("Service fault: {:?}", e),
    })
}

/// Park the core after a fatal startup fault
///
/// Interrupts stay enabled so the uptime tick and the debug probe keep
/// working.
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
