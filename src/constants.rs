// Frequency of the admittance control loop in Hz. The dynamic model is tuned
// against this rate, so it is compiled in instead of being read from the
// parameter file.
pub const CONTROL_FREQUENCY: f64 = 100.0;

pub const DEFAULT_PARAMETER_FILE: &str = "config/admittance_params.yaml";
