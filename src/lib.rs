/*
 * Hermes - ParaSwap Swap Execution Service
 * Core library exports and module declarations
 */

pub mod aggregator;
pub mod config;
pub mod models;
pub mod rpc;
pub mod swap;
pub mod utils;

pub use config::Config;
pub use models::*;
pub use swap::SwapService;
