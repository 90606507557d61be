//! Stimulus/measurement pin pair

use hilstand_hal::{InputPin, Level, OutputPin};

/// The two pins the controller can reach
pub trait PinController {
    /// Drive the stimulus pin
    fn set_output(&mut self, level: Level);

    /// Point-sample the measurement pin
    fn read_input(&self) -> bool;
}

/// One stimulus output and one measurement input
///
/// The measurement pin must be biased low (pull-down) by whoever
/// configures it; a floating line then reads `false`.
pub struct PinPair<O, I> {
    stimulus: O,
    measurement: I,
}

impl<O: OutputPin, I: InputPin> PinPair<O, I> {
    /// Take ownership of both pins, driving the stimulus low
    pub fn new(mut stimulus: O, measurement: I) -> Self {
        stimulus.set_low();
        Self {
            stimulus,
            measurement,
        }
    }

    /// Stimulus output, for inspection
    pub fn stimulus(&self) -> &O {
        &self.stimulus
    }

    /// Measurement input, for inspection
    pub fn measurement(&self) -> &I {
        &self.measurement
    }
}

impl<O: OutputPin, I: InputPin> PinController for PinPair<O, I> {
    fn set_output(&mut self, level: Level) {
        self.stimulus.set_level(level);
    }

    fn read_input(&self) -> bool {
        self.measurement.is_high()
    }
}
