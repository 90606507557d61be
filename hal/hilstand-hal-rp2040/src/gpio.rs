//! Stimulus and measurement pins
//!
//! Thin wrappers that fix the electrical configuration at construction:
//! the stimulus starts driven low, the measurement input is pulled down
//! so an unconnected line reads low.

use embassy_rp::gpio::{Input, Level as RpLevel, Output, Pin, Pull};
use embassy_rp::Peri;
use hilstand_hal::{InputPin, OutputPin};

/// Push-pull stimulus output
pub struct StimulusOutput<'d> {
    pin: Output<'d>,
}

impl<'d> StimulusOutput<'d> {
    /// Configure `pin` as an output, driven low
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Output::new(pin, RpLevel::Low),
        }
    }
}

impl OutputPin for StimulusOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Measurement input with internal pull-down
pub struct MeasurementInput<'d> {
    pin: Input<'d>,
}

impl<'d> MeasurementInput<'d> {
    /// Configure `pin` as an input with pull-down enabled
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Down),
        }
    }
}

impl InputPin for MeasurementInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
