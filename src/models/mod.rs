/*
 * Data models and types for the swap execution service
 */

use chrono::{DateTime, Utc};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub address: Address,
    pub decimals: u8,
}

impl TokenDescriptor {
    #[must_use]
    pub fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRoute {
    #[serde(with = "amount_string")]
    pub src_amount: U256,
    #[serde(with = "amount_string")]
    pub dest_amount: U256,
    // Aggregator-defined route internals, carried back into the build
    // request unmodified.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub to: Address,
    pub data: Bytes,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_amount_string"
    )]
    pub value: Option<U256>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_amount_string"
    )]
    pub gas_price: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct SwapOptions {
    pub receiver: Option<Address>,
    pub partner: Option<String>,
    pub partner_address: Option<Address>,
    pub partner_fee_bps: Option<u16>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapSummary {
    pub timestamp_utc: DateTime<Utc>,
    pub network_id: u64,
    pub sell_token: Address,
    pub buy_token: Address,
    #[serde(with = "amount_string")]
    pub sell_amount: U256,
    #[serde(with = "amount_string")]
    pub quoted_amount: U256,
    #[serde(with = "amount_string")]
    pub minimum_amount: U256,
    pub target_contract: Address,
}

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Quote error: {0}")]
    QuoteError(String),

    #[error("Build error: {0}")]
    BuildError(String),

    #[error("Invalid slippage tolerance: {0}% (expected 0-99)")]
    InvalidSlippage(u8),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwapError>;

/// Serde adapter for amounts the aggregator encodes as decimal strings.
pub mod amount_string {
    use ethers::types::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        amount: &U256,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(&raw).map_err(de::Error::custom)
    }
}

pub mod optional_amount_string {
    use ethers::types::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        amount: &Option<U256>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match amount {
            Some(amount) => serializer.serialize_str(&amount.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<U256>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => U256::from_dec_str(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
