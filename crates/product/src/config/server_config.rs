use crate::config::myconfig::Config;
use anyhow::{Context, Result};
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub grpc_addr: SocketAddr,
    pub http_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let grpc_addr = format!("0.0.0.0:{}", config.product.grpc_port)
            .parse()
            .context("Invalid gRPC address")?;

        let http_addr = format!("0.0.0.0:{}", config.product.http_port)
            .parse()
            .context("Invalid HTTP address")?;

        Ok(Self {
            database_url: config.database_url.clone(),
            grpc_addr,
            http_addr,
        })
    }
}
