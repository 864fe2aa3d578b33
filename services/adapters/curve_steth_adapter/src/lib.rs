//! Curve stETH Adapter
//!
//! Read-only pricing and yield queries for the ETH / wstETH pair, composed
//! from three on-chain sources:
//! - the Curve ETH/stETH pool for swap quotes
//! - the wstETH contract for the wstETH <-> stETH ratio
//! - the Lido oracle for the last rebase report
//!
//! No trades are executed and nothing is cached; every query re-reads
//! live state.

pub mod adapter;
pub mod assets;
pub mod config;
pub mod constants;
pub mod error;
pub mod rate;
pub mod rpc_client;

pub use adapter::CurveStethAdapter;
pub use assets::{
    AssetKind, AssetValue, AuxDataConfig, BridgeAsset, ReportDelta, SolidityType, UnderlyingAsset,
};
pub use config::{ContractAddresses, CurveStethConfig};
pub use error::{BridgeDataError, Result};
pub use rpc_client::{CurvePool, LidoOracle, PriceFeed, WrappedStEth};
