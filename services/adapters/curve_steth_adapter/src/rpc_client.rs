//! Read interfaces for the external contracts and their live RPC bindings
//!
//! Each collaborator sits behind a narrow async trait so the adapter never
//! depends on the transport. The live implementations bind a `web3`
//! contract handle to an inline ABI fragment and issue one `eth_call`
//! per read, with no retries or caching.

use async_trait::async_trait;
use tracing::debug;
use web3::contract::{Contract, Options};
use web3::ethabi::Token;
use web3::transports::Http;
use web3::types::{Address, U256};
use web3::Web3;

use crate::assets::ReportDelta;
use crate::error::{BridgeDataError, Result};

/// Curve StableSwap get_dy(int128,int128,uint256)
const CURVE_POOL_ABI: &str = r#"[
    {"name":"get_dy","type":"function","stateMutability":"view",
     "inputs":[
        {"name":"i","type":"int128"},
        {"name":"j","type":"int128"},
        {"name":"dx","type":"uint256"}],
     "outputs":[{"name":"","type":"uint256"}]}
]"#;

/// wstETH conversion getters
const WSTETH_ABI: &str = r#"[
    {"name":"getStETHByWstETH","type":"function","stateMutability":"view",
     "inputs":[{"name":"_wstETHAmount","type":"uint256"}],
     "outputs":[{"name":"","type":"uint256"}]},
    {"name":"getWstETHByStETH","type":"function","stateMutability":"view",
     "inputs":[{"name":"_stETHAmount","type":"uint256"}],
     "outputs":[{"name":"","type":"uint256"}]}
]"#;

/// Lido oracle getLastCompletedReportDelta()
const LIDO_ORACLE_ABI: &str = r#"[
    {"name":"getLastCompletedReportDelta","type":"function","stateMutability":"view",
     "inputs":[],
     "outputs":[
        {"name":"postTotalPooledEther","type":"uint256"},
        {"name":"preTotalPooledEther","type":"uint256"},
        {"name":"timeElapsed","type":"uint256"}]}
]"#;

/// Chainlink aggregator latestAnswer()
const PRICE_FEED_ABI: &str = r#"[
    {"name":"latestAnswer","type":"function","stateMutability":"view",
     "inputs":[],
     "outputs":[{"name":"","type":"int256"}]}
]"#;

/// Curve ETH/stETH pool quotes
#[async_trait]
pub trait CurvePool: Send + Sync {
    /// Output amount of coin `j` for `dx` of coin `i`
    async fn get_dy(&self, i: i128, j: i128, dx: U256) -> Result<U256>;
}

/// wstETH <-> stETH conversion ratio
#[async_trait]
pub trait WrappedStEth: Send + Sync {
    async fn get_steth_by_wsteth(&self, wsteth_amount: U256) -> Result<U256>;
    async fn get_wsteth_by_steth(&self, steth_amount: U256) -> Result<U256>;
}

/// Lido rebase oracle
#[async_trait]
pub trait LidoOracle: Send + Sync {
    async fn last_completed_report_delta(&self) -> Result<ReportDelta>;
}

/// Secondary stETH/ETH price feed
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Latest answer as a raw two's-complement int256 word
    async fn latest_answer(&self) -> Result<U256>;
}

/// Parse a 0x-prefixed (or bare) 40-digit hex string into an address
pub fn parse_address(value: &str) -> Result<Address> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|e| BridgeDataError::InvalidAddress(format!("{}: {}", value, e)))
}

/// Encode a signed index as an ABI int word
fn int_token(value: i128) -> Token {
    if value >= 0 {
        Token::Int(U256::from(value as u128))
    } else {
        Token::Int(U256::MAX - U256::from(value.unsigned_abs() - 1))
    }
}

fn bind(web3: &Web3<Http>, address: Address, abi: &str) -> Result<Contract<Http>> {
    Ok(Contract::from_json(web3.eth(), address, abi.as_bytes())?)
}

pub struct RpcCurvePool {
    contract: Contract<Http>,
}

impl RpcCurvePool {
    pub fn connect(web3: &Web3<Http>, address: Address) -> Result<Self> {
        Ok(Self {
            contract: bind(web3, address, CURVE_POOL_ABI)?,
        })
    }
}

#[async_trait]
impl CurvePool for RpcCurvePool {
    async fn get_dy(&self, i: i128, j: i128, dx: U256) -> Result<U256> {
        let dy: U256 = self
            .contract
            .query(
                "get_dy",
                (int_token(i), int_token(j), Token::Uint(dx)),
                None,
                Options::default(),
                None,
            )
            .await?;
        debug!("curve get_dy({}, {}, {}) = {}", i, j, dx, dy);
        Ok(dy)
    }
}

pub struct RpcWrappedStEth {
    contract: Contract<Http>,
}

impl RpcWrappedStEth {
    pub fn connect(web3: &Web3<Http>, address: Address) -> Result<Self> {
        Ok(Self {
            contract: bind(web3, address, WSTETH_ABI)?,
        })
    }

    async fn convert(&self, function: &str, amount: U256) -> Result<U256> {
        let converted: U256 = self
            .contract
            .query(function, (amount,), None, Options::default(), None)
            .await?;
        debug!("wstETH {}({}) = {}", function, amount, converted);
        Ok(converted)
    }
}

#[async_trait]
impl WrappedStEth for RpcWrappedStEth {
    async fn get_steth_by_wsteth(&self, wsteth_amount: U256) -> Result<U256> {
        self.convert("getStETHByWstETH", wsteth_amount).await
    }

    async fn get_wsteth_by_steth(&self, steth_amount: U256) -> Result<U256> {
        self.convert("getWstETHByStETH", steth_amount).await
    }
}

pub struct RpcLidoOracle {
    contract: Contract<Http>,
}

impl RpcLidoOracle {
    pub fn connect(web3: &Web3<Http>, address: Address) -> Result<Self> {
        Ok(Self {
            contract: bind(web3, address, LIDO_ORACLE_ABI)?,
        })
    }
}

#[async_trait]
impl LidoOracle for RpcLidoOracle {
    async fn last_completed_report_delta(&self) -> Result<ReportDelta> {
        let (post, pre, elapsed): (U256, U256, U256) = self
            .contract
            .query("getLastCompletedReportDelta", (), None, Options::default(), None)
            .await?;
        debug!(
            "lido report delta: pre={} post={} elapsed={}s",
            pre, post, elapsed
        );
        Ok(ReportDelta {
            pre_total_pooled_ether: pre,
            post_total_pooled_ether: post,
            time_elapsed: elapsed,
        })
    }
}

pub struct RpcPriceFeed {
    contract: Contract<Http>,
}

impl RpcPriceFeed {
    pub fn connect(web3: &Web3<Http>, address: Address) -> Result<Self> {
        Ok(Self {
            contract: bind(web3, address, PRICE_FEED_ABI)?,
        })
    }
}

#[async_trait]
impl PriceFeed for RpcPriceFeed {
    async fn latest_answer(&self) -> Result<U256> {
        let answer: Token = self
            .contract
            .query("latestAnswer", (), None, Options::default(), None)
            .await?;
        match answer {
            Token::Int(raw) | Token::Uint(raw) => Ok(raw),
            other => Err(BridgeDataError::ValueOutOfRange(format!(
                "unexpected latestAnswer token {:?}",
                other
            ))),
        }
    }
}
