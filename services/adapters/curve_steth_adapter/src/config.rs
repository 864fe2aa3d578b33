//! Configuration for the Curve stETH adapter
//!
//! Loaded from an optional TOML file with `CURVE_STETH_*` environment
//! overrides on top. Defaults point at Ethereum mainnet.

use config_rs::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use web3::types::Address;

use crate::constants::{
    CURVE_POOL_ADDRESS, LIDO_ORACLE_ADDRESS, PRICE_FEED_ADDRESS, WSTETH_ADDRESS,
};
use crate::error::{BridgeDataError, Result};
use crate::rpc_client::parse_address;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "CURVE_STETH";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveStethConfig {
    /// Ethereum JSON-RPC endpoint, `${VAR}` references are expanded
    pub rpc_url: String,

    /// Bridge identifier assigned by the registry
    pub bridge_address_id: u64,

    /// wstETH token contract
    pub wsteth_address: String,

    /// Lido rebase oracle
    pub lido_oracle_address: String,

    /// Curve ETH/stETH pool
    pub curve_pool_address: String,

    /// Chainlink stETH/ETH feed
    pub price_feed_address: String,
}

impl Default for CurveStethConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            bridge_address_id: 0,
            wsteth_address: format!("0x{}", hex::encode(WSTETH_ADDRESS)),
            lido_oracle_address: LIDO_ORACLE_ADDRESS.to_string(),
            curve_pool_address: CURVE_POOL_ADDRESS.to_string(),
            price_feed_address: PRICE_FEED_ADDRESS.to_string(),
        }
    }
}

/// Parsed collaborator addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub wsteth: Address,
    pub lido_oracle: Address,
    pub curve_pool: Address,
    pub price_feed: Address,
}

impl CurveStethConfig {
    /// Load configuration from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading adapter config: {:?}", path);
            builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let mut config: CurveStethConfig = builder.build()?.try_deserialize()?;
        config.expand_env_vars()?;
        debug!("Adapter config: {:?}", config);
        Ok(config)
    }

    /// Expand environment variables in the RPC URL
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let expanded = shellexpand::env(&self.rpc_url)
            .map_err(|e| BridgeDataError::Config(format!("Failed to expand RPC URL: {}", e)))?;
        self.rpc_url = expanded.to_string();
        Ok(())
    }

    /// Parse every collaborator address
    pub fn addresses(&self) -> Result<ContractAddresses> {
        Ok(ContractAddresses {
            wsteth: parse_address(&self.wsteth_address)?,
            lido_oracle: parse_address(&self.lido_oracle_address)?,
            curve_pool: parse_address(&self.curve_pool_address)?,
            price_feed: parse_address(&self.price_feed_address)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::{const_mutex, Mutex};
    use std::{env, fs};
    use tempfile::tempdir;

    // Process environment is shared by every test thread
    static ENV_LOCK: Mutex<()> = const_mutex(());

    #[test]
    fn test_default_addresses_parse() {
        let addresses = CurveStethConfig::default().addresses().unwrap();
        assert_eq!(addresses.wsteth.as_bytes(), &WSTETH_ADDRESS);
    }

    #[test]
    fn test_load_from_file() {
        let _env = ENV_LOCK.lock();
        let dir = tempdir().unwrap();
        let path = dir.path().join("curve_steth.toml");
        fs::write(
            &path,
            r#"
rpc_url = "https://eth.example.org"
bridge_address_id = 7
curve_pool_address = "0x0000000000000000000000000000000000000001"
"#,
        )
        .unwrap();

        let config = CurveStethConfig::load(Some(&path)).unwrap();
        assert_eq!(config.rpc_url, "https://eth.example.org");
        assert_eq!(config.bridge_address_id, 7);
        assert_eq!(
            config.addresses().unwrap().curve_pool,
            Address::from_low_u64_be(1)
        );
        // Unset keys keep mainnet defaults
        assert_eq!(config.lido_oracle_address, LIDO_ORACLE_ADDRESS);
    }

    #[test]
    fn test_environment_overrides() {
        let _env = ENV_LOCK.lock();
        env::set_var("CURVE_STETH_RPC_URL", "http://node.internal:8545");
        env::set_var("CURVE_STETH_BRIDGE_ADDRESS_ID", "12");
        env::set_var(
            "CURVE_STETH_CURVE_POOL_ADDRESS",
            "0x0000000000000000000000000000000000000002",
        );

        let loaded = CurveStethConfig::load(None);

        env::remove_var("CURVE_STETH_RPC_URL");
        env::remove_var("CURVE_STETH_BRIDGE_ADDRESS_ID");
        env::remove_var("CURVE_STETH_CURVE_POOL_ADDRESS");

        let config = loaded.unwrap();
        assert_eq!(config.rpc_url, "http://node.internal:8545");
        assert_eq!(config.bridge_address_id, 12);
        assert_eq!(
            config.addresses().unwrap().curve_pool,
            Address::from_low_u64_be(2)
        );
        assert_eq!(config.price_feed_address, PRICE_FEED_ADDRESS);
    }

    #[test]
    fn test_rpc_url_expands_env_vars() {
        let _env = ENV_LOCK.lock();
        let dir = tempdir().unwrap();
        let path = dir.path().join("curve_steth.toml");
        fs::write(&path, "rpc_url = \"${STETH_NODE_HOST}/x\"\n").unwrap();
        env::set_var("STETH_NODE_HOST", "https://mainnet.example.org");

        let loaded = CurveStethConfig::load(Some(&path));

        env::remove_var("STETH_NODE_HOST");
        assert_eq!(loaded.unwrap().rpc_url, "https://mainnet.example.org/x");
    }

    #[test]
    fn test_unset_rpc_url_variable_is_config_error() {
        let _env = ENV_LOCK.lock();
        env::remove_var("STETH_NODE_HOST");
        let mut config = CurveStethConfig {
            rpc_url: "${STETH_NODE_HOST}/x".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.expand_env_vars(),
            Err(BridgeDataError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_address_rejected() {
        let config = CurveStethConfig {
            price_feed_address: "0xdeadbeef".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.addresses(),
            Err(BridgeDataError::InvalidAddress(_))
        ));
    }
}
