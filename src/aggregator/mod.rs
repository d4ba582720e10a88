/*
 * Aggregator client module for rate quoting and transaction building
 */

mod paraswap;

use async_trait::async_trait;
use ethers::types::{Address, U256};
use serde::Serialize;

use crate::models::{PriceRoute, Result, SwapOptions, TokenDescriptor, TransactionRequest};

pub use paraswap::ParaSwapClient;

pub const DEFAULT_API_URL: &str = "https://apiv5.paraswap.io";

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Sell,
    Buy,
}

#[async_trait]
pub trait AggregatorClient: Send + Sync {
    async fn fetch_rate(
        &self,
        sell_token: &TokenDescriptor,
        buy_token: &TokenDescriptor,
        sell_amount: U256,
        user_address: Address,
    ) -> Result<PriceRoute>;

    async fn build_transaction(
        &self,
        sell_token: &TokenDescriptor,
        buy_token: &TokenDescriptor,
        sell_amount: U256,
        minimum_amount: U256,
        price_route: &PriceRoute,
        user_address: Address,
        options: &SwapOptions,
    ) -> Result<TransactionRequest>;
}
