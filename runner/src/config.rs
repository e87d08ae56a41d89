use std::env;
use std::str::FromStr;

use thiserror::Error;

/// The dispatch policy requested through `POLICY`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    RoundRobin,
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "round-robin" | "rr" => Ok(Policy::RoundRobin),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown policy {0:?}, expected fcfs or round-robin")]
    UnknownPolicy(String),

    #[error("{name} must be an integer, got {value:?}")]
    NotAnInteger { name: &'static str, value: String },
}

/// Runner settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub policy: Policy,
    /// Kept signed so that the scheduler, not the parser, rejects quanta below 1.
    pub quantum: i64,
    pub precision: usize,
    pub sweep: Option<Vec<i64>>,
    pub timeline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            policy: Policy::RoundRobin,
            quantum: 2,
            precision: 2,
            sweep: None,
            timeline: false,
        }
    }
}

impl Config {
    /// Reads `POLICY`, `QUANTUM`, `PRECISION`, `SWEEP` and `TIMELINE`.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let policy = match lookup("POLICY") {
            Some(policy) => policy.parse()?,
            None => defaults.policy,
        };
        let quantum = match lookup("QUANTUM") {
            Some(quantum) => parse_integer("QUANTUM", &quantum)?,
            None => defaults.quantum,
        };
        let precision = match lookup("PRECISION") {
            Some(precision) => parse_integer("PRECISION", &precision)?,
            None => defaults.precision,
        };
        let sweep = lookup("SWEEP")
            .map(|sweep| {
                sweep
                    .split(',')
                    .filter(|quantum| !quantum.trim().is_empty())
                    .map(|quantum| parse_integer("SWEEP", quantum))
                    .collect::<Result<Vec<i64>, _>>()
            })
            .transpose()?;
        let timeline = lookup("TIMELINE").is_some();

        Ok(Config {
            policy,
            quantum,
            precision,
            sweep,
            timeline,
        })
    }
}

/// Parses one integer setting or command line value.
pub fn parse_integer<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotAnInteger {
            name,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(config(&[]), Ok(Config::default()));
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("POLICY", "FCFS"),
            ("QUANTUM", "4"),
            ("PRECISION", "3"),
            ("SWEEP", "1, 2,8"),
            ("TIMELINE", "1"),
        ])
        .unwrap();

        assert_eq!(
            config,
            Config {
                policy: Policy::Fcfs,
                quantum: 4,
                precision: 3,
                sweep: Some(vec![1, 2, 8]),
                timeline: true,
            }
        );
    }

    #[test]
    fn negative_quantum_is_left_to_the_scheduler() {
        assert_eq!(config(&[("QUANTUM", "-3")]).unwrap().quantum, -3);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            config(&[("POLICY", "lottery")]),
            Err(ConfigError::UnknownPolicy("lottery".to_string()))
        );
        assert_eq!(
            config(&[("PRECISION", "-1")]),
            Err(ConfigError::NotAnInteger {
                name: "PRECISION",
                value: "-1".to_string()
            })
        );
    }
}
