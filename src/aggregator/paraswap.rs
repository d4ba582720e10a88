/*
 * ParaSwap aggregator client implementation
 */

use async_trait::async_trait;
use ethers::types::{Address, U256};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::aggregator::{AggregatorClient, TradeSide, DEFAULT_API_URL};
use crate::models::{
    amount_string, PriceRoute, Result, SwapError, SwapOptions, TokenDescriptor, TransactionRequest,
};

pub struct ParaSwapClient {
    client: Client,
    base_url: String,
    network_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PricesQuery {
    src_token: Address,
    dest_token: Address,
    #[serde(with = "amount_string")]
    amount: U256,
    src_decimals: u8,
    dest_decimals: u8,
    side: TradeSide,
    network: u64,
    user_address: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricesResponse {
    price_route: PriceRoute,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionsRequest<'a> {
    src_token: Address,
    dest_token: Address,
    src_decimals: u8,
    dest_decimals: u8,
    #[serde(with = "amount_string")]
    src_amount: U256,
    #[serde(with = "amount_string")]
    dest_amount: U256,
    price_route: &'a PriceRoute,
    user_address: Address,
    receiver: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    partner: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partner_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partner_fee_bps: Option<u16>,
}

// The aggregator signals failure through the payload shape: a reply carrying
// a `message` field is an error, anything else must match the success shape.
#[derive(Debug, Deserialize)]
struct ErrorReply {
    message: String,
}

fn decode_reply<T: DeserializeOwned>(body: &str) -> Result<std::result::Result<T, String>> {
    if let Ok(error) = serde_json::from_str::<ErrorReply>(body) {
        return Ok(Err(error.message));
    }
    Ok(Ok(serde_json::from_str::<T>(body)?))
}

impl ParaSwapClient {
    #[must_use]
    pub fn new(network_id: u64) -> Self {
        Self::with_base_url(network_id, DEFAULT_API_URL)
    }

    #[must_use]
    pub fn with_base_url(network_id: u64, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            network_id,
        }
    }

    #[must_use]
    pub fn network_id(&self) -> u64 {
        self.network_id
    }
}

#[async_trait]
impl AggregatorClient for ParaSwapClient {
    async fn fetch_rate(
        &self,
        sell_token: &TokenDescriptor,
        buy_token: &TokenDescriptor,
        sell_amount: U256,
        user_address: Address,
    ) -> Result<PriceRoute> {
        let url = format!("{}/prices", self.base_url);
        let query = PricesQuery {
            src_token: sell_token.address,
            dest_token: buy_token.address,
            amount: sell_amount,
            src_decimals: sell_token.decimals,
            dest_decimals: buy_token.decimals,
            side: TradeSide::Sell,
            network: self.network_id,
            user_address,
        };

        let body = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .text()
            .await?;

        match decode_reply::<PricesResponse>(&body)? {
            Ok(response) => Ok(response.price_route),
            Err(message) => Err(SwapError::QuoteError(message)),
        }
    }

    async fn build_transaction(
        &self,
        sell_token: &TokenDescriptor,
        buy_token: &TokenDescriptor,
        sell_amount: U256,
        minimum_amount: U256,
        price_route: &PriceRoute,
        user_address: Address,
        options: &SwapOptions,
    ) -> Result<TransactionRequest> {
        let url = format!("{}/transactions/{}", self.base_url, self.network_id);
        let request = TransactionsRequest {
            src_token: sell_token.address,
            dest_token: buy_token.address,
            src_decimals: sell_token.decimals,
            dest_decimals: buy_token.decimals,
            src_amount: sell_amount,
            dest_amount: minimum_amount,
            price_route,
            user_address,
            receiver: options.receiver.unwrap_or(user_address),
            partner: options.partner.as_deref(),
            partner_address: options.partner_address,
            partner_fee_bps: options.partner_fee_bps,
        };

        let body = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .text()
            .await?;

        match decode_reply::<TransactionRequest>(&body)? {
            Ok(transaction) => Ok(transaction),
            Err(message) => Err(SwapError::BuildError(message)),
        }
    }
}
