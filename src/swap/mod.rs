/*
 * Swap orchestration: quote, slippage bound, transaction build
 */

use chrono::Utc;
use ethers::types::{Address, U256};
use std::sync::Arc;
use tracing::{error, info};

use crate::aggregator::AggregatorClient;
use crate::models::{
    Result, SwapError, SwapOptions, SwapSummary, TokenDescriptor, TransactionRequest,
};
use crate::utils::compute_minimum_output;

pub const DEFAULT_SLIPPAGE_PERCENT: u8 = 3;

pub struct SwapService {
    aggregator: Arc<dyn AggregatorClient>,
    network_id: u64,
}

impl SwapService {
    #[must_use]
    pub fn new(aggregator: Arc<dyn AggregatorClient>, network_id: u64) -> Self {
        Self {
            aggregator,
            network_id,
        }
    }

    pub async fn get_swap_transaction(
        &self,
        sell_token: &TokenDescriptor,
        buy_token: &TokenDescriptor,
        sell_amount: U256,
        slippage_percent: u8,
        user_address: Address,
        options: &SwapOptions,
    ) -> Result<TransactionRequest> {
        if slippage_percent >= 100 {
            return Err(SwapError::InvalidSlippage(slippage_percent));
        }

        info!(
            "Requesting rate: {:?} -> {:?}, amount {} (network {})",
            sell_token.address, buy_token.address, sell_amount, self.network_id
        );

        let price_route = self
            .aggregator
            .fetch_rate(sell_token, buy_token, sell_amount, user_address)
            .await
            .map_err(|e| {
                error!("Rate fetch failed: {e}");
                e
            })?;

        info!("Price route: {:?}", price_route);

        let minimum_amount = compute_minimum_output(price_route.dest_amount, slippage_percent)?;

        let transaction = self
            .aggregator
            .build_transaction(
                sell_token,
                buy_token,
                sell_amount,
                minimum_amount,
                &price_route,
                user_address,
                options,
            )
            .await
            .map_err(|e| {
                error!("Transaction build failed: {e}");
                e
            })?;

        info!("Transaction request: {:?}", transaction);

        let summary = SwapSummary {
            timestamp_utc: Utc::now(),
            network_id: self.network_id,
            sell_token: sell_token.address,
            buy_token: buy_token.address,
            sell_amount,
            quoted_amount: price_route.dest_amount,
            minimum_amount,
            target_contract: transaction.to,
        };
        info!("Swap prepared: {}", serde_json::to_string(&summary)?);

        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceRoute;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedAggregator {
        rate: std::result::Result<PriceRoute, String>,
        transaction: TransactionRequest,
        build_minimums: Mutex<Vec<U256>>,
    }

    impl ScriptedAggregator {
        fn quoting(dest_amount: U256) -> Self {
            Self {
                rate: Ok(PriceRoute {
                    src_amount: U256::from(100_000_000u64),
                    dest_amount,
                    details: serde_json::Map::new(),
                }),
                transaction: sample_transaction(),
                build_minimums: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                rate: Err(message.to_string()),
                transaction: sample_transaction(),
                build_minimums: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AggregatorClient for ScriptedAggregator {
        async fn fetch_rate(
            &self,
            _sell_token: &TokenDescriptor,
            _buy_token: &TokenDescriptor,
            _sell_amount: U256,
            _user_address: Address,
        ) -> Result<PriceRoute> {
            match &self.rate {
                Ok(route) => Ok(route.clone()),
                Err(message) => Err(SwapError::QuoteError(message.clone())),
            }
        }

        async fn build_transaction(
            &self,
            _sell_token: &TokenDescriptor,
            _buy_token: &TokenDescriptor,
            _sell_amount: U256,
            minimum_amount: U256,
            _price_route: &PriceRoute,
            _user_address: Address,
            _options: &SwapOptions,
        ) -> Result<TransactionRequest> {
            self.build_minimums.lock().unwrap().push(minimum_amount);
            Ok(self.transaction.clone())
        }
    }

    fn sample_transaction() -> TransactionRequest {
        TransactionRequest {
            to: "0xdef171fe48cf0115b1d80b88dc8eab59176fee57".parse().unwrap(),
            data: "0xdeadbeef".parse().unwrap(),
            value: Some(U256::zero()),
            gas_price: None,
            chain_id: Some(137),
        }
    }

    fn usdc() -> TokenDescriptor {
        TokenDescriptor::new(
            "0x2791bca1f2de4661ed88a30c99a7a9449aa84174".parse().unwrap(),
            6,
        )
    }

    fn weth() -> TokenDescriptor {
        TokenDescriptor::new(
            "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619".parse().unwrap(),
            18,
        )
    }

    fn user() -> Address {
        "0x947d711c25220d8301c087b25ba111fe8cbf6672".parse().unwrap()
    }

    #[tokio::test]
    async fn passes_the_slippage_bounded_minimum_to_the_builder() {
        // Sell 100 USDC for WETH at 2% slippage against a 0.05 WETH quote
        let aggregator = Arc::new(ScriptedAggregator::quoting(U256::from(
            50_000_000_000_000_000u64,
        )));
        let service = SwapService::new(aggregator.clone(), 137);

        let transaction = service
            .get_swap_transaction(
                &usdc(),
                &weth(),
                U256::from(100_000_000u64),
                2,
                user(),
                &SwapOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(transaction, sample_transaction());
        assert_eq!(
            *aggregator.build_minimums.lock().unwrap(),
            vec![U256::from(49_000_000_000_000_000u64)]
        );
    }

    #[tokio::test]
    async fn quote_failure_short_circuits_the_build() {
        let aggregator = Arc::new(ScriptedAggregator::failing("no route found"));
        let service = SwapService::new(aggregator.clone(), 137);

        let result = service
            .get_swap_transaction(
                &usdc(),
                &weth(),
                U256::from(100_000_000u64),
                3,
                user(),
                &SwapOptions::default(),
            )
            .await;

        match result {
            Err(SwapError::QuoteError(message)) => assert_eq!(message, "no route found"),
            other => panic!("expected QuoteError, got {other:?}"),
        }
        assert!(aggregator.build_minimums.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_out_of_range_slippage_before_any_call() {
        let aggregator = Arc::new(ScriptedAggregator::quoting(U256::from(1u64)));
        let service = SwapService::new(aggregator.clone(), 137);

        let result = service
            .get_swap_transaction(
                &usdc(),
                &weth(),
                U256::from(100_000_000u64),
                100,
                user(),
                &SwapOptions::default(),
            )
            .await;

        assert!(matches!(result, Err(SwapError::InvalidSlippage(100))));
        assert!(aggregator.build_minimums.lock().unwrap().is_empty());
    }
}
