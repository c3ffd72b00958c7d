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

use config::{Config, File};
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParameterError {
    // The file could not be opened or parsed at all.
    #[error("couldn't read the parameter file `{0}`")]
    UnreadableFile(String),
    // Covers both an absent key and a value of an unexpected shape. The
    // caller decides the expected shape, so the two are indistinguishable
    // beyond the key name.
    #[error("couldn't retrieve the parameter `{0}`")]
    MissingParameter(String),
}

/// Source of the node parameters, queried by key.
///
/// The expected shape of a value (string, double, boolean, or sequence of
/// doubles) is decided by the caller. A key is either fully present with the
/// requested shape or absent; there are no defaults and no partial matches.
pub trait ParameterSource {
    /// Get a string parameter.
    ///
    /// # Arguments
    /// * `key` - Key of the parameter.
    ///
    /// # Returns
    /// The value, or None if the key is absent or not a string.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Get a double parameter.
    ///
    /// # Arguments
    /// * `key` - Key of the parameter.
    ///
    /// # Returns
    /// The value, or None if the key is absent or not a double.
    fn get_double(&self, key: &str) -> Option<f64>;

    /// Get a boolean parameter.
    ///
    /// # Arguments
    /// * `key` - Key of the parameter.
    ///
    /// # Returns
    /// The value, or None if the key is absent or not a boolean.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Get a parameter that is a sequence of doubles.
    ///
    /// # Arguments
    /// * `key` - Key of the parameter.
    ///
    /// # Returns
    /// The values in the order of the sequence, or None if the key is absent,
    /// not a sequence, or any element is not a double.
    fn get_double_array(&self, key: &str) -> Option<Vec<f64>>;
}

pub struct YamlParameterSource {
    // Parsed parameter store.
    _store: Config,
}

impl YamlParameterSource {
    /// Create a new parameter source from a YAML parameter file.
    ///
    /// # Arguments
    /// * `filepath` - Path to the parameter file.
    ///
    /// # Returns
    /// A new parameter source, or the error if the file cannot be read.
    pub fn new(filepath: &Path) -> Result<Self, ParameterError> {
        let name = filepath
            .to_str()
            .ok_or_else(|| ParameterError::UnreadableFile(format!("{filepath:?}")))?;

        let store = Config::builder()
            .add_source(File::with_name(name))
            .build()
            .map_err(|_| ParameterError::UnreadableFile(String::from(name)))?;

        Ok(Self { _store: store })
    }
}

impl ParameterSource for YamlParameterSource {
    fn get_string(&self, key: &str) -> Option<String> {
        self._store.get_string(key).ok()
    }

    fn get_double(&self, key: &str) -> Option<f64> {
        self._store.get_float(key).ok()
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self._store.get_bool(key).ok()
    }

    fn get_double_array(&self, key: &str) -> Option<Vec<f64>> {
        let values = self._store.get_array(key).ok()?;

        values
            .into_iter()
            .map(|value| value.into_float().ok())
            .collect()
    }
}
