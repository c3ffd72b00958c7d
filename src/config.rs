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

use serde::{Deserialize, Serialize};

use crate::parameter_source::{ParameterError, ParameterSource};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TopicNames {
    // State of the arm.
    pub arm_state: String,
    // Command to the arm.
    pub arm_command: String,
    // State of the platform.
    pub platform_state: String,
    // Command to the platform.
    pub platform_command: String,
    // Measured external wrench from the force/torque sensor.
    pub external_wrench: String,
    // Control wrench.
    pub control_wrench: String,
    // Equilibrium point of the coupling spring.
    pub equilibrium: String,
    // External wrench expressed in the arm frame.
    pub external_wrench_arm_frame: String,
    // Control wrench expressed in the arm frame.
    pub control_external_arm_frame: String,
    // End-effector pose in the world frame.
    pub arm_pose_world: String,
    // End-effector twist in the world frame.
    pub arm_twist_world: String,
    // Front laser scanner.
    pub laser_front: String,
    // Rear laser scanner.
    pub laser_rear: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct AdmittanceModel {
    // Desired mass of the platform.
    pub mass_platform: Vec<f64>,
    // Desired mass of the arm.
    pub mass_arm: Vec<f64>,
    // Damping of the coupling between the platform and the arm.
    pub damping_coupling: Vec<f64>,
    // Damping of the platform.
    pub damping_platform: Vec<f64>,
    // Damping of the arm.
    pub damping_arm: Vec<f64>,
    // Stiffness of the coupling between the platform and the arm.
    pub stiffness_coupling: Vec<f64>,
    // Equilibrium point of the coupling spring.
    pub equilibrium_point_spring: Vec<f64>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SafetyThresholds {
    // Reachable workspace bounds, interleaved as the minimum and maximum per
    // axis.
    pub workspace_limits: Vec<f64>,
    // Low-pass filter factor of the measured wrench.
    pub wrench_filter_factor: f64,
    // Sensed forces below this magnitude are treated as zero.
    pub force_dead_zone_thres: f64,
    // Sensed torques below this magnitude are treated as zero.
    pub torque_dead_zone_thres: f64,
    // Distance below which an obstacle triggers avoidance.
    pub obs_distance_thres: f64,
    // Range readings closer than this are the robot seeing itself.
    pub self_detect_thres: f64,
    // Disable the avoidance of obstacles in front of the platform.
    pub dont_avoid_front: bool,
}

/// The validated parameter set of the node.
///
/// Constructed exactly once at startup by [Config::load] and handed to the
/// controller by value. Never mutated afterwards. The lengths of the
/// dynamic-model vectors are not checked here; the controller owns their
/// meaning and their relation to the controlled degrees of freedom.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Config {
    // Topic names of the communication channels.
    pub topics: TopicNames,
    // Coefficients of the coupled platform-arm dynamic model.
    pub admittance: AdmittanceModel,
    // Safety and sensor-filter thresholds.
    pub safety: SafetyThresholds,
}

impl Config {
    /// Load and validate the full parameter set.
    ///
    /// The keys are queried in a fixed order: the topic names, the
    /// dynamic-model coefficients, the workspace limits, and the safety and
    /// filter scalars. The first key that is absent or has the wrong shape
    /// aborts the load. No later key is queried and no partial configuration
    /// is ever produced, so the controller can never start with unset
    /// dynamic coefficients.
    ///
    /// # Arguments
    /// * `source` - Parameter source.
    ///
    /// # Returns
    /// The validated configuration, or the error naming the first key that
    /// could not be retrieved.
    pub fn load(source: &dyn ParameterSource) -> Result<Self, ParameterError> {
        Ok(Self {
            topics: Self::load_topic_names(source)?,
            admittance: Self::load_admittance_model(source)?,
            safety: Self::load_safety_thresholds(source)?,
        })
    }

    fn load_topic_names(source: &dyn ParameterSource) -> Result<TopicNames, ParameterError> {
        Ok(TopicNames {
            arm_state: require_string(source, "topic_arm_state")?,
            arm_command: require_string(source, "topic_arm_command")?,
            platform_state: require_string(source, "topic_platform_state")?,
            platform_command: require_string(source, "topic_platform_command")?,
            external_wrench: require_string(source, "topic_external_wrench")?,
            control_wrench: require_string(source, "topic_control_wrench")?,
            equilibrium: require_string(source, "topic_equilibrium")?,
            external_wrench_arm_frame: require_string(
                source,
                "topic_external_wrench_arm_frame",
            )?,
            control_external_arm_frame: require_string(
                source,
                "topic_control_external_arm_frame",
            )?,
            arm_pose_world: require_string(source, "topic_arm_pose_world")?,
            arm_twist_world: require_string(source, "topic_arm_twist_world")?,
            laser_front: require_string(source, "topic_laser_front")?,
            laser_rear: require_string(source, "topic_laser_rear")?,
        })
    }

    fn load_admittance_model(
        source: &dyn ParameterSource,
    ) -> Result<AdmittanceModel, ParameterError> {
        Ok(AdmittanceModel {
            mass_platform: require_double_array(source, "mass_platform")?,
            mass_arm: require_double_array(source, "mass_arm")?,
            damping_coupling: require_double_array(source, "damping_coupling")?,
            damping_platform: require_double_array(source, "damping_platform")?,
            damping_arm: require_double_array(source, "damping_arm")?,
            stiffness_coupling: require_double_array(source, "stiffness_coupling")?,
            equilibrium_point_spring: require_double_array(source, "equilibrium_point_spring")?,
        })
    }

    fn load_safety_thresholds(
        source: &dyn ParameterSource,
    ) -> Result<SafetyThresholds, ParameterError> {
        Ok(SafetyThresholds {
            workspace_limits: require_double_array(source, "workspace_limits")?,
            wrench_filter_factor: require_double(source, "wrench_filter_factor")?,
            force_dead_zone_thres: require_double(source, "force_dead_zone_thres")?,
            torque_dead_zone_thres: require_double(source, "torque_dead_zone_thres")?,
            obs_distance_thres: require_double(source, "obs_distance_thres")?,
            self_detect_thres: require_double(source, "self_detect_thres")?,
            dont_avoid_front: require_bool(source, "dont_avoid_front")?,
        })
    }
}

fn require_string(source: &dyn ParameterSource, key: &str) -> Result<String, ParameterError> {
    source
        .get_string(key)
        .ok_or_else(|| ParameterError::MissingParameter(String::from(key)))
}

fn require_double(source: &dyn ParameterSource, key: &str) -> Result<f64, ParameterError> {
    source
        .get_double(key)
        .ok_or_else(|| ParameterError::MissingParameter(String::from(key)))
}

fn require_bool(source: &dyn ParameterSource, key: &str) -> Result<bool, ParameterError> {
    source
        .get_bool(key)
        .ok_or_else(|| ParameterError::MissingParameter(String::from(key)))
}

fn require_double_array(
    source: &dyn ParameterSource,
    key: &str,
) -> Result<Vec<f64>, ParameterError> {
    source
        .get_double_array(key)
        .ok_or_else(|| ParameterError::MissingParameter(String::from(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::mock::mock_parameter_source::{MockParameterSource, ParameterValue};

    // All the required keys in the order they are queried.
    const REQUIRED_KEYS: [&str; 27] = [
        "topic_arm_state",
        "topic_arm_command",
        "topic_platform_state",
        "topic_platform_command",
        "topic_external_wrench",
        "topic_control_wrench",
        "topic_equilibrium",
        "topic_external_wrench_arm_frame",
        "topic_control_external_arm_frame",
        "topic_arm_pose_world",
        "topic_arm_twist_world",
        "topic_laser_front",
        "topic_laser_rear",
        "mass_platform",
        "mass_arm",
        "damping_coupling",
        "damping_platform",
        "damping_arm",
        "stiffness_coupling",
        "equilibrium_point_spring",
        "workspace_limits",
        "wrench_filter_factor",
        "force_dead_zone_thres",
        "torque_dead_zone_thres",
        "obs_distance_thres",
        "self_detect_thres",
        "dont_avoid_front",
    ];

    fn create_parameter_source() -> MockParameterSource {
        let mut source = MockParameterSource::new();

        for key in &REQUIRED_KEYS[0..13] {
            source.set(key, ParameterValue::Str(format!("/admittance_control/{key}")));
        }

        source.set(
            "mass_platform",
            ParameterValue::DoubleArray(vec![10.0, 10.0, 10.0, 1.0, 1.0, 1.0]),
        );
        source.set(
            "mass_arm",
            ParameterValue::DoubleArray(vec![1.5, 1.5, 1.5, 0.1, 0.1, 0.1]),
        );
        source.set(
            "damping_coupling",
            ParameterValue::DoubleArray(vec![15.0, 15.0, 15.0, 1.5, 1.5, 1.5]),
        );
        source.set(
            "damping_platform",
            ParameterValue::DoubleArray(vec![20.0, 20.0, 20.0, 3.0, 3.0, 3.0]),
        );
        source.set(
            "damping_arm",
            ParameterValue::DoubleArray(vec![3.0, 3.0, 3.0, 0.2, 0.2, 0.2]),
        );
        source.set(
            "stiffness_coupling",
            ParameterValue::DoubleArray(vec![100.0, 100.0, 100.0, 10.0, 10.0, 10.0]),
        );
        source.set(
            "equilibrium_point_spring",
            ParameterValue::DoubleArray(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        );

        source.set(
            "workspace_limits",
            ParameterValue::DoubleArray(vec![-0.5, 0.5, -0.5, 0.5, 0.2, 1.1]),
        );
        source.set("wrench_filter_factor", ParameterValue::Double(0.1));
        source.set("force_dead_zone_thres", ParameterValue::Double(3.0));
        source.set("torque_dead_zone_thres", ParameterValue::Double(0.5));
        source.set("obs_distance_thres", ParameterValue::Double(0.3));
        source.set("self_detect_thres", ParameterValue::Double(0.8));
        source.set("dont_avoid_front", ParameterValue::Bool(false));

        source
    }

    #[test]
    fn test_load() {
        let source = create_parameter_source();

        let config = Config::load(&source).expect("Should load the full parameter set");

        // The values are taken over untouched.
        assert_eq!(config.topics.arm_state, "/admittance_control/topic_arm_state");
        assert_eq!(config.topics.laser_rear, "/admittance_control/topic_laser_rear");
        assert_eq!(
            config.admittance.mass_platform,
            vec![10.0, 10.0, 10.0, 1.0, 1.0, 1.0]
        );
        assert_eq!(
            config.admittance.equilibrium_point_spring,
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(
            config.safety.workspace_limits,
            vec![-0.5, 0.5, -0.5, 0.5, 0.2, 1.1]
        );
        assert_eq!(config.safety.wrench_filter_factor, 0.1);
        assert_eq!(config.safety.self_detect_thres, 0.8);
        assert!(!config.safety.dont_avoid_front);
    }

    #[test]
    fn test_load_queries_in_documented_order() {
        let source = create_parameter_source();

        let _ = Config::load(&source).unwrap();

        assert_eq!(source.queried_keys(), REQUIRED_KEYS);
    }

    #[test]
    fn test_load_each_key_is_required() {
        for key in REQUIRED_KEYS {
            let mut source = create_parameter_source();
            source.remove(key);

            let result = Config::load(&source);

            assert_eq!(
                result.err(),
                Some(ParameterError::MissingParameter(String::from(key))),
                "The load should fail on the absent key `{key}`"
            );
        }
    }

    #[test]
    fn test_load_missing_laser_rear_topic() {
        let mut source = create_parameter_source();
        source.remove("topic_laser_rear");

        assert_eq!(
            Config::load(&source).err(),
            Some(ParameterError::MissingParameter(String::from(
                "topic_laser_rear"
            )))
        );
    }

    #[test]
    fn test_load_reports_first_missing_key() {
        // Keys #3 and #9 are both absent. Only the first one in the
        // documented order is reported.
        let mut source = create_parameter_source();
        source.remove("topic_platform_state");
        source.remove("topic_control_external_arm_frame");

        assert_eq!(
            Config::load(&source).err(),
            Some(ParameterError::MissingParameter(String::from(
                "topic_platform_state"
            )))
        );
    }

    #[test]
    fn test_load_short_circuits_on_first_failure() {
        let mut source = create_parameter_source();
        source.remove("topic_platform_state");

        let _ = Config::load(&source);

        // The third query fails, so exactly three queries are issued.
        assert_eq!(source.queried_keys(), &REQUIRED_KEYS[0..3]);
    }

    #[test]
    fn test_load_wrong_shape() {
        // A scalar where a sequence of doubles is expected is as fatal as an
        // absent key.
        let mut source = create_parameter_source();
        source.set("workspace_limits", ParameterValue::Double(1.0));

        assert_eq!(
            Config::load(&source).err(),
            Some(ParameterError::MissingParameter(String::from(
                "workspace_limits"
            )))
        );
    }
}
