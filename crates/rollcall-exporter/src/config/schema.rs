use std::net::SocketAddr;

use serde::Deserialize;
use rollcall_core::error::{Result, RollcallError};

use crate::obs::metrics::is_valid_prefix;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub collectors: CollectorsSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RollcallError::UnsupportedVersion);
        }
        self.exporter.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Prepended to every metric name this process exports.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            prefix: default_prefix(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !is_valid_prefix(&self.prefix) {
            return Err(RollcallError::InvalidConfig(format!(
                "exporter.prefix must match [a-zA-Z_:][a-zA-Z0-9_:]* (got {:?})",
                self.prefix
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            RollcallError::InvalidConfig(format!(
                "exporter.listen must be a valid SocketAddr (got {:?})",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9464".into()
}
fn default_prefix() -> String {
    "rollcall_".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorsSection {
    #[serde(default = "default_true")]
    pub connected_players: bool,
}

impl Default for CollectorsSection {
    fn default() -> Self {
        Self { connected_players: default_true() }
    }
}

fn default_true() -> bool {
    true
}
