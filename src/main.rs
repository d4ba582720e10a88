/*
 * Hermes - ParaSwap Swap Execution Service
 * Run-once entry point: quote, build, submit
 */

use anyhow::Context;
use ethers::signers::{LocalWallet, Signer};
use hermes::{
    aggregator::ParaSwapClient, config::Config, models::SwapOptions, rpc::RpcClient,
    swap::SwapService, utils::to_base_units,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Hermes swap execution service");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    let wallet: LocalWallet = config
        .wallet
        .private_key
        .parse()
        .context("Invalid private key")?;
    let user_address = wallet.address();

    let rpc = RpcClient::new(&config.chain.rpc_url, config.chain.network_id).await?;
    info!("Connected to RPC (network {})", config.chain.network_id);

    let aggregator = Arc::new(ParaSwapClient::with_base_url(
        config.chain.network_id,
        &config.aggregator.api_url,
    ));
    let service = SwapService::new(aggregator, config.chain.network_id);

    let sell_token = config.trade.sell_token;
    let buy_token = config.trade.buy_token;
    let sell_amount = to_base_units(&config.trade.sell_amount, sell_token.decimals)?;

    let sell_before = rpc.erc20_balance_of(sell_token.address, user_address).await?;
    let buy_before = rpc.erc20_balance_of(buy_token.address, user_address).await?;

    let options = SwapOptions {
        receiver: config.trade.receiver,
        ..SwapOptions::default()
    };

    let transaction = service
        .get_swap_transaction(
            &sell_token,
            &buy_token,
            sell_amount,
            config.trade.slippage_percent,
            user_address,
            &options,
        )
        .await?;

    let receipt = rpc.submit(wallet, &transaction).await?;
    info!(
        "Swap submitted: tx {:?} in block {:?}",
        receipt.transaction_hash, receipt.block_number
    );

    let sell_after = rpc.erc20_balance_of(sell_token.address, user_address).await?;
    let buy_after = rpc.erc20_balance_of(buy_token.address, user_address).await?;

    info!(
        "Balance change: sold {} (raw), received {} (raw)",
        sell_before.saturating_sub(sell_after),
        buy_after.saturating_sub(buy_before)
    );

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hermes=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
