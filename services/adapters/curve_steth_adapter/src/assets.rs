//! Asset descriptors and query result types
//!
//! Everything here is constructed fresh per query; nothing is persisted.

use serde::{Deserialize, Serialize};
use web3::types::{Address, U256};

use crate::error::{BridgeDataError, Result};

/// Variant of an asset slot in a bridge interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    /// Native ETH
    Eth,
    /// ERC20 token identified by its contract address
    Erc20(Address),
    /// Slot not used by the interaction
    NotUsed,
}

/// Asset slot passed into every query
///
/// Not `PartialEq`: two ERC20 slots refer to the same token when their
/// addresses match, whatever their ids. Compare with [`BridgeAsset::is_token`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BridgeAsset {
    pub id: u64,
    pub kind: AssetKind,
}

impl BridgeAsset {
    pub fn eth(id: u64) -> Self {
        Self {
            id,
            kind: AssetKind::Eth,
        }
    }

    pub fn erc20(id: u64, address: Address) -> Self {
        Self {
            id,
            kind: AssetKind::Erc20(address),
        }
    }

    pub fn not_used() -> Self {
        Self {
            id: 0,
            kind: AssetKind::NotUsed,
        }
    }

    pub fn is_eth(&self) -> bool {
        matches!(self.kind, AssetKind::Eth)
    }

    pub fn is_not_used(&self) -> bool {
        matches!(self.kind, AssetKind::NotUsed)
    }

    /// Token address, only for the ERC20 variant
    pub fn erc20_address(&self) -> Option<Address> {
        match self.kind {
            AssetKind::Erc20(address) => Some(address),
            _ => None,
        }
    }

    /// True when this is the ERC20 at `address`
    pub fn is_token(&self, address: Address) -> bool {
        self.erc20_address() == Some(address)
    }
}

/// Amount of a given asset, used for market size and present value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetValue {
    pub asset_id: u64,
    pub value: i128,
}

impl AssetValue {
    /// Build from an on-chain unsigned amount, rejecting values above `i128::MAX`
    pub fn from_u256(asset_id: u64, amount: U256) -> Result<Self> {
        if amount > U256::from(i128::MAX as u128) {
            return Err(BridgeDataError::ValueOutOfRange(format!(
                "{} does not fit a signed 128-bit asset value",
                amount
            )));
        }
        Ok(Self {
            asset_id,
            value: amount.as_u128() as i128,
        })
    }
}

/// Description of what underlies a wrapped token balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderlyingAsset {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub amount: U256,
}

/// Solidity type of an auxiliary data slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidityType {
    Uint8,
    Uint16,
    Uint24,
    Uint32,
    Uint64,
    Uint256,
    Bool,
}

/// Bit range of the auxiliary data word and what it encodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxDataConfig {
    pub start: u32,
    pub length: u32,
    pub solidity_type: SolidityType,
    pub description: String,
}

/// Last completed Lido rebase report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportDelta {
    pub pre_total_pooled_ether: U256,
    pub post_total_pooled_ether: U256,
    /// Seconds between the two reports
    pub time_elapsed: U256,
}
