/*
 * Exact integer arithmetic helpers for token amounts
 */

use crate::models::{Result, SwapError};
use ethers::types::U256;
use num_bigint::BigUint;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn compute_minimum_output(expected_amount: U256, slippage_percent: u8) -> Result<U256> {
    if slippage_percent >= 100 {
        return Err(SwapError::InvalidSlippage(slippage_percent));
    }
    if slippage_percent == 0 || expected_amount.is_zero() {
        return Ok(expected_amount);
    }

    let mut raw = [0u8; 32];
    expected_amount.to_big_endian(&mut raw);
    let expected = BigUint::from_bytes_be(&raw);

    // floor(expected * (100 - slippage) / 100) without intermediate overflow
    let minimum = expected * BigUint::from(100 - slippage_percent) / BigUint::from(100u8);

    Ok(U256::from_big_endian(&minimum.to_bytes_be()))
}

pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256> {
    let amount = Decimal::from_str(amount)
        .map_err(|e| SwapError::CalculationError(format!("Invalid amount: {e}")))?;

    if amount.is_sign_negative() {
        return Err(SwapError::CalculationError(format!(
            "Amount must not be negative: {amount}"
        )));
    }
    if decimals > 28 {
        return Err(SwapError::CalculationError(format!(
            "Unsupported decimal precision: {decimals}"
        )));
    }

    let scale = Decimal::from_i128_with_scale(10i128.pow(u32::from(decimals)), 0);
    let scaled = amount
        .checked_mul(scale)
        .ok_or_else(|| SwapError::CalculationError(format!("Amount out of range: {amount}")))?;

    if !scaled.fract().is_zero() {
        return Err(SwapError::CalculationError(format!(
            "Amount {amount} has sub-unit precision at {decimals} decimals"
        )));
    }

    U256::from_dec_str(&scaled.trunc().normalize().to_string())
        .map_err(|e| SwapError::CalculationError(format!("Amount conversion failed: {e}")))
}
