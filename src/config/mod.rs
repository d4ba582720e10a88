/*
 * Configuration management for the Hermes service
 */

use crate::models::{Result, SwapError, TokenDescriptor};
use ethers::types::Address;
use std::env;

pub const DEFAULT_NETWORK_ID: u64 = 137;

// Polygon mainnet defaults matching the reference USDC -> WETH trade
pub const DEFAULT_SELL_TOKEN: &str = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174";
pub const DEFAULT_SELL_TOKEN_DECIMALS: u8 = 6;
pub const DEFAULT_BUY_TOKEN: &str = "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619";
pub const DEFAULT_BUY_TOKEN_DECIMALS: u8 = 18;

#[derive(Debug, Clone)]
pub struct Config {
    pub chain: ChainConfig,
    pub aggregator: AggregatorConfig,
    pub wallet: WalletConfig,
    pub trade: TradeConfig,
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub network_id: u64,
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub private_key: String,
}

#[derive(Debug, Clone)]
pub struct TradeConfig {
    pub sell_token: TokenDescriptor,
    pub buy_token: TokenDescriptor,
    pub sell_amount: String,
    pub slippage_percent: u8,
    pub receiver: Option<Address>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            chain: ChainConfig {
                rpc_url: env::var("RPC_URL")
                    .map_err(|_| SwapError::ConfigError("RPC_URL not set".to_string()))?,
                network_id: env::var("NETWORK_ID")
                    .unwrap_or_else(|_| DEFAULT_NETWORK_ID.to_string())
                    .parse()
                    .map_err(|e| SwapError::ConfigError(format!("Invalid network id: {e}")))?,
            },
            aggregator: AggregatorConfig {
                api_url: env::var("AGGREGATOR_API_URL")
                    .unwrap_or_else(|_| crate::aggregator::DEFAULT_API_URL.to_string()),
            },
            wallet: WalletConfig {
                private_key: env::var("PRIVATE_KEY")
                    .map_err(|_| SwapError::ConfigError("PRIVATE_KEY not set".to_string()))?,
            },
            trade: TradeConfig {
                sell_token: TokenDescriptor::new(
                    parse_address(
                        &env::var("SELL_TOKEN_ADDRESS")
                            .unwrap_or_else(|_| DEFAULT_SELL_TOKEN.to_string()),
                    )?,
                    parse_decimals("SELL_TOKEN_DECIMALS", DEFAULT_SELL_TOKEN_DECIMALS)?,
                ),
                buy_token: TokenDescriptor::new(
                    parse_address(
                        &env::var("BUY_TOKEN_ADDRESS")
                            .unwrap_or_else(|_| DEFAULT_BUY_TOKEN.to_string()),
                    )?,
                    parse_decimals("BUY_TOKEN_DECIMALS", DEFAULT_BUY_TOKEN_DECIMALS)?,
                ),
                sell_amount: env::var("SELL_AMOUNT").unwrap_or_else(|_| "100".to_string()),
                slippage_percent: env::var("SLIPPAGE_PERCENT")
                    .unwrap_or_else(|_| crate::swap::DEFAULT_SLIPPAGE_PERCENT.to_string())
                    .parse()
                    .map_err(|e| SwapError::ConfigError(format!("Invalid slippage: {e}")))?,
                receiver: match env::var("RECEIVER_ADDRESS") {
                    Ok(raw) => Some(parse_address(&raw)?),
                    Err(_) => None,
                },
            },
        })
    }
}

fn parse_address(raw: &str) -> Result<Address> {
    raw.parse()
        .map_err(|e| SwapError::ConfigError(format!("Invalid address {raw}: {e}")))
}

fn parse_decimals(var: &str, default: u8) -> Result<u8> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| SwapError::ConfigError(format!("Invalid {var}: {e}"))),
        Err(_) => Ok(default),
    }
}
