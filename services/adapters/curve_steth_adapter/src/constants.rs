//! Fixed addresses and fixed-point constants for the stETH/ETH pair

use hex_literal::hex;

/// Fixed-point unit used for ratio and percentage arithmetic (10^18)
pub const SCALING_FACTOR: u128 = 1_000_000_000_000_000_000;

/// 60 * 60 * 24 * 365
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Basis points in one unit of the scaling factor (SCALING_FACTOR / 10_000)
pub const BASIS_POINT_DIVISOR: u128 = SCALING_FACTOR / 10_000;

/// Wrapped stETH (wstETH) token contract on Ethereum mainnet
pub const WSTETH_ADDRESS: [u8; 20] = hex!("7f39C581F595B53c5cb19bD0b3f8dA6c935E2Ca0");

/// Lido stETH token contract on Ethereum mainnet
pub const STETH_ADDRESS: [u8; 20] = hex!("ae7ab96520DE3A18E5e111B5EaAb095312D7fE84");

/// Lido oracle exposing the last completed rebase report
pub const LIDO_ORACLE_ADDRESS: &str = "0x442af784A788A5bd6F42A01Ebe9F287a871243fb";

/// Curve ETH/stETH pool
pub const CURVE_POOL_ADDRESS: &str = "0xDC24316b9AE028F1497c275EB9192a3Ea0f67022";

/// Chainlink stETH/ETH price feed
pub const PRICE_FEED_ADDRESS: &str = "0x86392dC19c0b719886221c78AB11eb8Cf5c52812";

/// Curve pool coin index for ETH
pub const CURVE_ETH_INDEX: i128 = 0;

/// Curve pool coin index for stETH
pub const CURVE_STETH_INDEX: i128 = 1;

pub const STETH_NAME: &str = "Liquid staked Ether 2.0";
pub const STETH_SYMBOL: &str = "stETH";
pub const STETH_DECIMALS: u8 = 18;
