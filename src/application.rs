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

use log::info;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    flag::register,
};
use std::path::Path;

use crate::config::Config;
use crate::constants::CONTROL_FREQUENCY;
use crate::controller::Controller;
use crate::parameter_source::{ParameterError, YamlParameterSource};

/// Run the node.
///
/// Loads and validates the full parameter set, constructs the controller
/// with it, and blocks in the control loop until SIGINT or SIGTERM is
/// received.
///
/// # Arguments
/// * `filepath` - Path to the YAML parameter file.
///
/// # Returns
/// Ok when the control loop stopped normally, or the first configuration
/// error. No controller is ever constructed from a partial parameter set.
pub fn run(filepath: &Path) -> Result<(), ParameterError> {
    let source = YamlParameterSource::new(filepath)?;
    let config = Config::load(&source)?;

    info!("Loaded the admittance parameters from {:?}.", filepath);

    // The configuration is handed over to the controller as a whole.
    let mut controller = Controller::new(config, CONTROL_FREQUENCY);

    // Register the signals that stop the control loop
    for signal in [SIGTERM, SIGINT].iter() {
        let _ = register(*signal, controller.stop.clone());
    }

    controller.run();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use crate::constants::DEFAULT_PARAMETER_FILE;

    #[test]
    fn test_run_unreadable_parameter_file() {
        let result = run(Path::new("wrong.yaml"));

        assert_eq!(
            result.err(),
            Some(ParameterError::UnreadableFile(String::from("wrong.yaml")))
        );
    }

    #[test]
    fn test_run_missing_parameter() {
        // A parameter file that holds the first topic name only. The load
        // stops at the second key and the node never starts.
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Should create a temporary file");
        writeln!(file, "topic_arm_state: \"/arm/state\"").unwrap();

        let result = run(file.path());

        assert_eq!(
            result.err(),
            Some(ParameterError::MissingParameter(String::from(
                "topic_arm_command"
            )))
        );
    }

    #[test]
    fn test_load_shipped_parameter_file() {
        let source = YamlParameterSource::new(Path::new(DEFAULT_PARAMETER_FILE))
            .expect("Should read the default parameter file");

        assert!(Config::load(&source).is_ok());
    }
}
