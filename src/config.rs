//! Runtime configuration read from the environment.

use crate::engine::DEFAULT_WORKDAY_HOURS;
use crate::validate::HOURS_PER_DAY_MAX;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "WORKTIME_BIND_ADDR";
pub const WORKDAY_HOURS_VAR: &str = "WORKTIME_DEFAULT_WORKDAY_HOURS";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    BindAddr { var: &'static str, value: String },

    #[error("{var} must be a number of hours in (0, 24], got {value}")]
    WorkdayHours { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Workday length used when a request does not carry one.
    pub default_workday_hours: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::BindAddr {
                var: BIND_ADDR_VAR,
                value,
            })?,
            None => DEFAULT_BIND_ADDR,
        };

        let default_workday_hours = match lookup(WORKDAY_HOURS_VAR) {
            Some(value) => match value.trim().parse::<f64>() {
                Ok(hours) if hours > 0.0 && hours <= HOURS_PER_DAY_MAX => hours,
                _ => {
                    return Err(ConfigError::WorkdayHours {
                        var: WORKDAY_HOURS_VAR,
                        value,
                    })
                }
            },
            None => DEFAULT_WORKDAY_HOURS,
        };

        Ok(Config {
            bind_addr,
            default_workday_hours,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR,
            default_workday_hours: DEFAULT_WORKDAY_HOURS,
        }
    }
}
