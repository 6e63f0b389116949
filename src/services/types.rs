//! Server kinds selectable through the discriminator property

use serde::{Deserialize, Serialize};
use std::fmt::Formatter;

use crate::properties::Properties;
use crate::services::ServiceError;

/// Property holding the server kind to scaffold
pub const SERVER_TYPE_KEY: &str = "sc-alone-radio";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerKind {
    /// Eureka service registry
    Registry,
    /// Zuul edge gateway
    Gateway,
    /// Spring Cloud Config server
    Config,
}

impl ServerKind {
    pub fn all() -> &'static [ServerKind] {
        &[ServerKind::Registry, ServerKind::Gateway, ServerKind::Config]
    }

    /// Canonical discriminator value
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerKind::Registry => "registry-server",
            ServerKind::Gateway => "gateway-server",
            ServerKind::Config => "config-server",
        }
    }

    /// Other discriminator values accepted for this kind
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ServerKind::Registry => &["eureka-server"],
            ServerKind::Gateway => &["zuul-server"],
            ServerKind::Config => &[],
        }
    }

    /// Project type of the generated project; also its template anchor
    pub fn project_type(&self) -> &'static str {
        match self {
            ServerKind::Registry => "eureka",
            ServerKind::Gateway => "zuul",
            ServerKind::Config => "config",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServerKind::Registry => "Eureka Registry Server",
            ServerKind::Gateway => "Zuul Gateway Server",
            ServerKind::Config => "Config Server",
        }
    }

    /// `server.port` used when the properties do not set one
    pub fn default_port(&self) -> i64 {
        match self {
            ServerKind::Registry => 8761,
            ServerKind::Gateway => 8080,
            ServerKind::Config => 8888,
        }
    }

    /// Read the discriminator from `properties`
    pub fn from_properties(properties: &Properties) -> Result<Self, ServiceError> {
        properties.get_string(SERVER_TYPE_KEY)?.parse()
    }
}

impl std::fmt::Display for ServerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServerKind {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        ServerKind::all()
            .iter()
            .find(|kind| kind.as_str() == value || kind.aliases().contains(&value))
            .copied()
            .ok_or_else(|| ServiceError::UnknownServer {
                key: SERVER_TYPE_KEY.to_string(),
                value: value.to_string(),
                expected: ServerKind::all()
                    .iter()
                    .map(ServerKind::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
