// This file is part of admittance_controller.
//
// Developed for the mobile manipulation platform.
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use log::{info, warn};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::config::Config;

pub struct Controller {
    // Validated configuration of the node.
    pub config: Config,
    // Number of the executed control cycles.
    pub num_cycles: u64,
    // An Arc instance that holds the AtomicBool instance to stop the control
    // loop.
    pub stop: Arc<AtomicBool>,
    // Control frequency in Hz.
    _frequency: f64,
}

impl Controller {
    /// Create a new controller.
    ///
    /// # Arguments
    /// * `config` - Validated configuration. The controller takes ownership;
    /// nothing re-validates the parameters afterwards.
    /// * `frequency` - Control frequency in Hz.
    ///
    /// # Returns
    /// A new controller.
    pub fn new(config: Config, frequency: f64) -> Self {
        Self {
            config,
            num_cycles: 0,
            stop: Arc::new(AtomicBool::new(false)),
            _frequency: frequency,
        }
    }

    /// Run the control loop until the stop flag is raised.
    ///
    /// Each cycle is timed and the loop sleeps for the remaining part of the
    /// period. A cycle that takes longer than the period is logged.
    pub fn run(&mut self) {
        info!(
            "Running the admittance controller at {} Hz.",
            self._frequency
        );

        let period = Duration::from_secs_f64(1.0 / self._frequency);
        while !self.stop.load(Ordering::Relaxed) {
            // Time the control cycle
            let now = Instant::now();

            self.step();

            // Sleep with the remaining time
            let cycle_time = now.elapsed();
            if period > cycle_time {
                sleep(period - cycle_time);
            } else {
                warn!("Control cycle is out of time: {:?}.", cycle_time);
            }
        }

        info!("Admittance controller is stopped.");
    }

    /// Run a single control cycle.
    fn step(&mut self) {
        self.num_cycles += 1;
    }
}
