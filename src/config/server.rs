//! Server configuration

use http::HeaderValue;
use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind both listeners to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the HTTP listener (health endpoint)
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Port of the WebSocket listener (relay)
    #[serde(default = "default_ws_port")]
    pub ws_port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// CORS allowed origins (comma-separated)
    pub cors_origins: Option<String>,

    /// Public URL of the control/display frontend, allowed as an origin
    pub frontend_url: Option<String>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Socket address of the HTTP listener
    pub fn http_addr(&self) -> Result<SocketAddr, ValidationError> {
        self.socket_addr(self.http_port)
    }

    /// Socket address of the WebSocket listener
    pub fn ws_addr(&self) -> Result<SocketAddr, ValidationError> {
        self.socket_addr(self.ws_port)
    }

    fn socket_addr(&self, port: u16) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get CORS origins as a vector, including the frontend URL
    pub fn cors_origins_list(&self) -> Vec<String> {
        let mut origins: Vec<String> = match &self.cors_origins {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => default_cors_origins(),
        };

        if let Some(frontend) = &self.frontend_url {
            let frontend = frontend.trim().trim_end_matches('/').to_string();
            if !frontend.is_empty() && !origins.contains(&frontend) {
                origins.push(frontend);
            }
        }

        origins
    }

    /// CORS origins as header values, ready for the CORS layer
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>, ValidationError> {
        self.cors_origins_list()
            .into_iter()
            .map(|origin| {
                if origin == "*" {
                    return Err(ValidationError::WildcardOrigin);
                }
                HeaderValue::from_str(&origin).map_err(|_| ValidationError::InvalidOrigin(origin))
            })
            .collect()
    }

    /// Validate server configuration
    ///
    /// Port 0 (ephemeral) is accepted only when both listeners use it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.http_port, self.ws_port) {
            (0, 0) => {}
            (0, _) | (_, 0) => return Err(ValidationError::InvalidPort),
            (http, ws) if http == ws => return Err(ValidationError::PortConflict(http)),
            _ => {}
        }
        self.http_addr()?;
        self.allowed_origins()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            ws_port: default_ws_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            cors_origins: None,
            frontend_url: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    3001
}

fn default_ws_port() -> u16 {
    3002
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,scene_relay=debug,tower_http=info".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
    ]
}
