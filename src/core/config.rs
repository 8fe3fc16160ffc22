// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Runner configuration
//!
//! Settings are layered: a TOML file provides the base, `PSXCORE_*`
//! environment variables override it, and command-line flags override both.
//!
//! ```toml
//! bios = "bios/SCPH1001.BIN"
//! instructions = 100000
//! trace = "trace.log"
//! breakpoints = [0x80030000, 0xBFC00180]
//! log_level = "debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::{EmulatorError, Result};

/// Environment variable naming the BIOS image
pub const ENV_BIOS: &str = "PSXCORE_BIOS";
/// Environment variable naming the trace file
pub const ENV_TRACE: &str = "PSXCORE_TRACE";
/// Environment variable limiting the number of executed instructions
pub const ENV_INSTRUCTIONS: &str = "PSXCORE_INSTRUCTIONS";

/// Configuration of the command-line runner
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// BIOS image to load
    pub bios: Option<PathBuf>,
    /// Stop after this many instructions (unbounded when absent)
    pub instructions: Option<u64>,
    /// Execution trace output file
    pub trace: Option<PathBuf>,
    /// Stop when PC reaches any of these addresses
    pub breakpoints: Vec<u32>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: Option<String>,
}

impl RunnerConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Example
    /// ```
    /// use psxcore::core::config::RunnerConfig;
    ///
    /// let text = "instructions = 10\nbreakpoints = [0xBFC00010]";
    /// let config = RunnerConfig::from_toml(text).unwrap();
    /// assert_eq!(config.instructions, Some(10));
    /// assert_eq!(config.breakpoints, vec![0xBFC00010]);
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - `Config` if it is not valid TOML for this structure
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// `Config` if `PSXCORE_INSTRUCTIONS` is not a number
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(bios) = get(ENV_BIOS) {
            self.bios = Some(PathBuf::from(bios));
        }
        if let Some(trace) = get(ENV_TRACE) {
            self.trace = Some(PathBuf::from(trace));
        }
        if let Some(count) = get(ENV_INSTRUCTIONS) {
            let count = count.trim().parse().map_err(|_| {
                EmulatorError::Config(format!(
                    "{} must be a number, got {:?}",
                    ENV_INSTRUCTIONS, count
                ))
            })?;
            self.instructions = Some(count);
        }
        Ok(())
    }
}

/// Parse a hexadecimal address, with or without a `0x` prefix
///
/// # Example
/// ```
/// use psxcore::core::config::parse_address;
///
/// assert_eq!(parse_address("0xBFC00000").unwrap(), 0xBFC00000);
/// assert_eq!(parse_address("80010000").unwrap(), 0x80010000);
/// assert!(parse_address("xyz").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<u32> {
    let digits = text
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16)
        .map_err(|_| EmulatorError::Config(format!("invalid address: {:?}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_empty() {
        let config = RunnerConfig::from_toml("").unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert!(config.breakpoints.is_empty());
    }

    #[test]
    fn test_full_file() {
        let text = r#"
            bios = "bios/SCPH1001.BIN"
            instructions = 5000
            trace = "out/trace.log"
            breakpoints = [0x80030000, 0xBFC00180]
            log_level = "trace"
        "#;

        let config = RunnerConfig::from_toml(text).unwrap();

        assert_eq!(config.bios, Some(PathBuf::from("bios/SCPH1001.BIN")));
        assert_eq!(config.instructions, Some(5000));
        assert_eq!(config.trace, Some(PathBuf::from("out/trace.log")));
        assert_eq!(config.breakpoints, vec![0x80030000, 0xBFC00180]);
        assert_eq!(config.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RunnerConfig::from_toml("bois = \"typo.bin\"").unwrap_err();
        assert!(matches!(err, EmulatorError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = RunnerConfig::from_toml("bios = \"a.bin\"\ninstructions = 1").unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_BIOS, "b.bin"),
            (ENV_INSTRUCTIONS, " 42 "),
            (ENV_TRACE, ""),
        ]
        .into_iter()
        .collect();

        config
            .apply_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bios, Some(PathBuf::from("b.bin")));
        assert_eq!(config.instructions, Some(42));
        assert_eq!(config.trace, None);
    }

    #[test]
    fn test_env_bad_number() {
        let mut config = RunnerConfig::default();
        let err = config
            .apply_env_from(|key| (key == ENV_INSTRUCTIONS).then(|| "many".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_INSTRUCTIONS));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("psxcore.toml");
        fs::write(&path, "trace = \"t.log\"").unwrap();

        let config = RunnerConfig::load(&path).unwrap();
        assert_eq!(config.trace, Some(PathBuf::from("t.log")));

        let missing = RunnerConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, EmulatorError::Io(_)));
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0XbFc00000").unwrap(), 0xBFC00000);
        assert!(parse_address("").is_err());
        assert!(parse_address("0x1_0000_0000").is_err());
    }
}
