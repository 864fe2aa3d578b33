//! Curve stETH Adapter Implementation
//!
//! Stateless query façade over the Curve ETH/stETH pool, the wstETH
//! conversion ratio and the Lido rebase oracle. Every query re-reads live
//! state through the bound read handles.

use std::sync::Arc;
use tracing::{debug, info, warn};
use web3::transports::Http;
use web3::types::{Address, U256};
use web3::Web3;

use crate::assets::{AssetValue, AuxDataConfig, BridgeAsset, SolidityType, UnderlyingAsset};
use crate::config::ContractAddresses;
use crate::constants::{
    CURVE_ETH_INDEX, CURVE_STETH_INDEX, STETH_ADDRESS, STETH_DECIMALS, STETH_NAME, STETH_SYMBOL,
    WSTETH_ADDRESS,
};
use crate::error::{BridgeDataError, Result};
use crate::rate::annualized_rate;
use crate::rpc_client::{
    parse_address, CurvePool, LidoOracle, PriceFeed, RpcCurvePool, RpcLidoOracle, RpcPriceFeed,
    RpcWrappedStEth, WrappedStEth,
};

/// Curve stETH Adapter
///
/// Holds no mutable state after construction and can be shared across
/// tasks behind an `Arc`.
pub struct CurveStethAdapter {
    bridge_address_id: u64,
    wsteth_address: Address,
    wsteth: Arc<dyn WrappedStEth>,
    lido_oracle: Arc<dyn LidoOracle>,
    curve_pool: Arc<dyn CurvePool>,
    // Bound for the lifetime of the adapter, no query reads it
    #[allow(dead_code)]
    price_feed: Arc<dyn PriceFeed>,
}

impl CurveStethAdapter {
    /// Bind the adapter to live contracts over `web3`
    ///
    /// Performs no reads. Fails only on a malformed address.
    pub fn create(
        bridge_address_id: u64,
        web3: &Web3<Http>,
        wsteth_address: &str,
        lido_oracle_address: &str,
        curve_pool_address: &str,
        price_feed_address: &str,
    ) -> Result<Self> {
        let addresses = ContractAddresses {
            wsteth: parse_address(wsteth_address)?,
            lido_oracle: parse_address(lido_oracle_address)?,
            curve_pool: parse_address(curve_pool_address)?,
            price_feed: parse_address(price_feed_address)?,
        };
        Self::connect(bridge_address_id, web3, &addresses)
    }

    /// Bind the adapter to already-parsed addresses
    pub fn connect(
        bridge_address_id: u64,
        web3: &Web3<Http>,
        addresses: &ContractAddresses,
    ) -> Result<Self> {
        let adapter = Self::from_readers(
            bridge_address_id,
            Arc::new(RpcWrappedStEth::connect(web3, addresses.wsteth)?),
            Arc::new(RpcLidoOracle::connect(web3, addresses.lido_oracle)?),
            Arc::new(RpcCurvePool::connect(web3, addresses.curve_pool)?),
            Arc::new(RpcPriceFeed::connect(web3, addresses.price_feed)?),
        );

        info!(
            "Curve stETH adapter {} bound: wstETH 0x{}, oracle 0x{}, pool 0x{}, feed 0x{}",
            bridge_address_id,
            hex::encode(addresses.wsteth),
            hex::encode(addresses.lido_oracle),
            hex::encode(addresses.curve_pool),
            hex::encode(addresses.price_feed),
        );

        Ok(adapter)
    }

    /// Assemble the adapter from arbitrary read handles
    pub fn from_readers(
        bridge_address_id: u64,
        wsteth: Arc<dyn WrappedStEth>,
        lido_oracle: Arc<dyn LidoOracle>,
        curve_pool: Arc<dyn CurvePool>,
        price_feed: Arc<dyn PriceFeed>,
    ) -> Self {
        Self {
            bridge_address_id,
            wsteth_address: Address::from(WSTETH_ADDRESS),
            wsteth,
            lido_oracle,
            curve_pool,
            price_feed,
        }
    }

    pub fn bridge_address_id(&self) -> u64 {
        self.bridge_address_id
    }

    /// The fixed wstETH token address
    pub fn wsteth_address(&self) -> Address {
        self.wsteth_address
    }

    /// Auxiliary data layout: a single unused 64-bit slot
    pub fn aux_data_config(&self) -> Vec<AuxDataConfig> {
        vec![AuxDataConfig {
            start: 0,
            length: 64,
            solidity_type: SolidityType::Uint64,
            description: "Not Used".to_string(),
        }]
    }

    /// No position is held across interactions, so nothing is ever open
    pub async fn get_interaction_present_value(
        &self,
        _interaction_nonce: u64,
    ) -> Result<Vec<AssetValue>> {
        Ok(Vec::new())
    }

    /// Validate the full asset combination
    ///
    /// Only ETH -> wstETH and wstETH -> ETH are accepted, each with both
    /// secondary slots unused. Both encode as a single `0`.
    pub async fn get_aux_data(
        &self,
        input_asset_a: &BridgeAsset,
        input_asset_b: &BridgeAsset,
        output_asset_a: &BridgeAsset,
        output_asset_b: &BridgeAsset,
    ) -> Result<Vec<u64>> {
        let secondary_unused = input_asset_b.is_not_used() && output_asset_b.is_not_used();

        let buying = input_asset_a.is_eth() && output_asset_a.is_token(self.wsteth_address);
        let selling = input_asset_a.is_token(self.wsteth_address) && output_asset_a.is_eth();

        if secondary_unused && (buying || selling) {
            return Ok(vec![0]);
        }

        warn!(
            "Rejected asset combination: {:?}, {:?} -> {:?}, {:?}",
            input_asset_a.kind, input_asset_b.kind, output_asset_a.kind, output_asset_b.kind
        );
        Err(BridgeDataError::InvalidAssetCombination(
            "Incorrect combination of input/output assets.".to_string(),
        ))
    }

    /// Quote the output of a swap, routed solely on `input_asset_a`
    ///
    /// ETH in goes Curve (ETH -> stETH) then wraps; any ERC20 in unwraps then
    /// goes Curve (stETH -> ETH). Anything else quotes zero. The other slots
    /// and `aux_data` are not checked here.
    pub async fn get_expected_output(
        &self,
        input_asset_a: &BridgeAsset,
        _input_asset_b: &BridgeAsset,
        _output_asset_a: &BridgeAsset,
        _output_asset_b: &BridgeAsset,
        _aux_data: u64,
        input_value: U256,
    ) -> Result<Vec<U256>> {
        if input_asset_a.is_eth() {
            let steth = self
                .curve_pool
                .get_dy(CURVE_ETH_INDEX, CURVE_STETH_INDEX, input_value)
                .await?;
            let wsteth = self.wsteth.get_wsteth_by_steth(steth).await?;
            debug!("ETH {} -> stETH {} -> wstETH {}", input_value, steth, wsteth);
            return Ok(vec![wsteth]);
        }

        if input_asset_a.erc20_address().is_some() {
            let steth = self.wsteth.get_steth_by_wsteth(input_value).await?;
            let eth = self
                .curve_pool
                .get_dy(CURVE_STETH_INDEX, CURVE_ETH_INDEX, steth)
                .await?;
            debug!("wstETH {} -> stETH {} -> ETH {}", input_value, steth, eth);
            return Ok(vec![eth]);
        }

        Ok(vec![U256::zero()])
    }

    /// Annualized stETH yield in percent from the last Lido report
    pub async fn get_apr(&self, _yield_asset: &BridgeAsset) -> Result<f64> {
        let delta = self.lido_oracle.last_completed_report_delta().await?;
        let apr = annualized_rate(&delta)?;
        debug!("stETH APR {}% from report {:?}", apr, delta);
        Ok(apr)
    }

    /// Total pooled ether after the last report, attributed to `input_asset_a`
    pub async fn get_market_size(
        &self,
        input_asset_a: &BridgeAsset,
        _input_asset_b: &BridgeAsset,
        _output_asset_a: &BridgeAsset,
        _output_asset_b: &BridgeAsset,
        _aux_data: u64,
    ) -> Result<Vec<AssetValue>> {
        let delta = self.lido_oracle.last_completed_report_delta().await?;
        Ok(vec![AssetValue::from_u256(
            input_asset_a.id,
            delta.post_total_pooled_ether,
        )?])
    }

    /// stETH backing `amount` of wstETH
    pub async fn get_underlying_amount(
        &self,
        asset: &BridgeAsset,
        amount: U256,
    ) -> Result<UnderlyingAsset> {
        if !asset.is_token(self.wsteth_address) {
            return Err(BridgeDataError::UnsupportedAsset(format!(
                "{:?} has no underlying",
                asset.kind
            )));
        }

        let steth = self.wsteth.get_steth_by_wsteth(amount).await?;
        Ok(UnderlyingAsset {
            address: Address::from(STETH_ADDRESS),
            name: STETH_NAME.to_string(),
            symbol: STETH_SYMBOL.to_string(),
            decimals: STETH_DECIMALS,
            amount: steth,
        })
    }
}
