/*
 * RPC client module for chain access and transaction submission
 */

use crate::models::{Result, SwapError, TransactionRequest};
use ethers::abi::{encode, Token};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Bytes, TransactionReceipt, U256};
use ethers::utils::keccak256;
use std::sync::Arc;

pub struct RpcClient {
    provider: Arc<Provider<Http>>,
    chain_id: u64,
}

impl RpcClient {
    pub async fn new(rpc_url: &str, chain_id: u64) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| SwapError::RpcError(format!("Failed to create provider: {e}")))?;

        let chain = provider
            .get_chainid()
            .await
            .map_err(|e| SwapError::RpcError(format!("Failed to get chain ID: {e}")))?;

        if chain.as_u64() != chain_id {
            return Err(SwapError::RpcError(format!(
                "Chain ID mismatch: expected {}, got {}",
                chain_id,
                chain.as_u64()
            )));
        }

        Ok(Self {
            provider: Arc::new(provider),
            chain_id,
        })
    }

    #[must_use]
    pub fn provider(&self) -> Arc<Provider<Http>> {
        self.provider.clone()
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub async fn erc20_balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let selector = &keccak256(b"balanceOf(address)")[0..4];
        let encoded_params = encode(&[Token::Address(owner)]);
        let mut call_data = Vec::from(selector);
        call_data.extend_from_slice(&encoded_params);

        let tx = ethers::types::TransactionRequest::new()
            .to(token)
            .data(Bytes::from(call_data));

        let result = self
            .provider
            .call(&tx.into(), None)
            .await
            .map_err(|e| SwapError::RpcError(format!("Failed to call balanceOf: {e}")))?;

        if result.len() < 32 {
            return Err(SwapError::RpcError("Invalid balanceOf response".to_string()));
        }

        Ok(U256::from_big_endian(&result[0..32]))
    }

    pub async fn submit(
        &self,
        wallet: LocalWallet,
        transaction: &TransactionRequest,
    ) -> Result<TransactionReceipt> {
        let wallet = wallet.with_chain_id(self.chain_id);
        let sender = SignerMiddleware::new(self.provider.as_ref().clone(), wallet);

        let mut request = ethers::types::TransactionRequest::new()
            .to(transaction.to)
            .data(transaction.data.clone());
        if let Some(value) = transaction.value {
            request = request.value(value);
        }
        if let Some(gas_price) = transaction.gas_price {
            request = request.gas_price(gas_price);
        }

        let pending = sender
            .send_transaction(request, None)
            .await
            .map_err(|e| SwapError::RpcError(format!("Failed to submit transaction: {e}")))?;

        pending
            .await
            .map_err(|e| SwapError::RpcError(format!("Failed to confirm transaction: {e}")))?
            .ok_or_else(|| SwapError::RpcError("Transaction dropped from the mempool".to_string()))
    }
}
