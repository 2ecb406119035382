use std::env::{var, VarError};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_ADDR: IpAddr = IpAddr::V6(Ipv6Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 8080;

const DEFAULT_REPORT: ReportMode = ReportMode::Log;

const IP_VAR: &str = "PROBLEM_IP";
const PORT_VAR: &str = "PROBLEM_PORT";
const REPORT_VAR: &str = "PROBLEM_REPORT";

/// Errors while loading the configuration.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    #[error("unknown report mode {0:?}, expected \"log\" or \"return\"")]
    UnknownReportMode(String),
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
}

/// Responder configuration. The address is only used by the example server.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_addr")]
    pub ip: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_report")]
    pub report: ReportMode,
}

/// Where failures to write a problem end up.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Log failures with `tracing` and don't return them.
    Log,
    /// Return failures to the caller.
    Return,
}

impl Config {
    /// Read the configuration from the environment, falling back to the
    /// defaults for anything that isn't set.
    pub fn try_env() -> Result<Self, Error> {
        Self::try_vars(|name| var(name))
    }

    /// Read the configuration from variables returned by `lookup`.
    pub fn try_vars<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
    {
        let get = |name: &'static str| match lookup(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(Error::NotUnicode(name)),
        };

        let ip = match get(IP_VAR)? {
            Some(ip) => ip.parse().map_err(|_| Error::InvalidValue(IP_VAR))?,
            None => default_addr(),
        };
        let port = match get(PORT_VAR)? {
            Some(port) => port.parse().map_err(|_| Error::InvalidValue(PORT_VAR))?,
            None => default_port(),
        };
        let report = match get(REPORT_VAR)? {
            Some(mode) => mode.parse()?,
            None => default_report(),
        };

        Ok(Self { ip, port, report })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: default_addr(),
            port: default_port(),
            report: default_report(),
        }
    }
}

impl FromStr for ReportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "return" => Ok(Self::Return),
            _ => Err(Error::UnknownReportMode(s.to_string())),
        }
    }
}

const fn default_addr() -> IpAddr {
    DEFAULT_ADDR
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

const fn default_report() -> ReportMode {
    DEFAULT_REPORT
}
