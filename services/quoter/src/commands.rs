//! Quote commands over a pool snapshot

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;
use stableswap_amm::{
    calculate_estimated_mint_amount, calculate_estimated_swap_output_amount,
    calculate_estimated_withdraw_amount, calculate_estimated_withdraw_one_amount,
    calculate_swap_price, calculate_virtual_price,
};
use stableswap_types::{ExchangeInfo, Fraction, Price, Token, TokenAmount};
use tracing::info;

/// Digits shown for virtual prices
const VIRTUAL_PRICE_PLACES: u32 = 12;

/// All amounts are raw integer units of the respective token
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quote the output of swapping into the other reserve
    Swap {
        /// Mint of the input token
        #[arg(long)]
        from: String,
        #[arg(long)]
        amount: u64,
    },
    /// Quote LP tokens minted for a deposit
    Deposit {
        #[arg(long, default_value_t = 0)]
        amount_a: u64,
        #[arg(long, default_value_t = 0)]
        amount_b: u64,
    },
    /// Quote both reserves received for burning LP tokens
    Withdraw {
        #[arg(long)]
        pool_tokens: u64,
    },
    /// Quote a single reserve received for burning LP tokens
    WithdrawOne {
        #[arg(long)]
        pool_tokens: u64,
        /// Mint of the token to receive
        #[arg(long)]
        token: String,
    },
    /// Marginal price of the first reserve token in the second
    Price {
        /// Quote the second reserve token in the first instead
        #[arg(long)]
        invert: bool,
    },
    /// Invariant per LP token
    VirtualPrice,
}

#[derive(Debug, Serialize)]
struct PriceReport {
    #[serde(flatten)]
    price: Price,
    display: String,
}

#[derive(Debug, Serialize)]
struct VirtualPriceReport {
    virtual_price: Option<Fraction>,
    display: Option<String>,
}

fn reserve_token(exchange: &ExchangeInfo, mint: &str) -> Result<Token> {
    match exchange.reserves.iter().find(|reserve| reserve.token().mint == mint) {
        Some(reserve) => Ok(reserve.token().clone()),
        None => bail!(
            "Token {} is not held by this pool (reserves: {}, {})",
            mint,
            exchange.reserves[0].token(),
            exchange.reserves[1].token()
        ),
    }
}

impl Command {
    /// Run the quote and render it as JSON
    pub fn run(&self, exchange: &ExchangeInfo) -> Result<Value> {
        let report = match self {
            Command::Swap { from, amount } => {
                let from_token = reserve_token(exchange, from)?;
                let quote = calculate_estimated_swap_output_amount(
                    exchange,
                    &TokenAmount::new(from_token, *amount),
                )?;
                info!(input = amount, output = %quote.output_amount, "Swap quoted");
                serde_json::to_value(quote)?
            }
            Command::Deposit { amount_a, amount_b } => {
                let quote = calculate_estimated_mint_amount(
                    exchange,
                    &TokenAmount::new(exchange.reserves[0].token().clone(), *amount_a),
                    &TokenAmount::new(exchange.reserves[1].token().clone(), *amount_b),
                )?;
                info!(mint = %quote.mint_amount, "Deposit quoted");
                serde_json::to_value(quote)?
            }
            Command::Withdraw { pool_tokens } => {
                let quote = calculate_estimated_withdraw_amount(
                    exchange,
                    &TokenAmount::new(exchange.lp_token().clone(), *pool_tokens),
                )?;
                info!(
                    amount_a = %quote.withdraw_amounts[0],
                    amount_b = %quote.withdraw_amounts[1],
                    "Withdrawal quoted"
                );
                serde_json::to_value(quote)?
            }
            Command::WithdrawOne { pool_tokens, token } => {
                let withdraw_token = reserve_token(exchange, token)?;
                let quote = calculate_estimated_withdraw_one_amount(
                    exchange,
                    &TokenAmount::new(exchange.lp_token().clone(), *pool_tokens),
                    &withdraw_token,
                )?;
                info!(withdraw = %quote.withdraw_amount, "Single-asset withdrawal quoted");
                serde_json::to_value(quote)?
            }
            Command::Price { invert } => {
                let price = calculate_swap_price(exchange)?;
                let price = if *invert { price.invert()? } else { price };
                info!(price = %price, "Price quoted");
                serde_json::to_value(PriceReport {
                    display: price.to_string(),
                    price,
                })?
            }
            Command::VirtualPrice => {
                let virtual_price = calculate_virtual_price(exchange)?;
                serde_json::to_value(VirtualPriceReport {
                    display: virtual_price
                        .as_ref()
                        .map(|price| price.to_fixed(VIRTUAL_PRICE_PLACES)),
                    virtual_price,
                })?
            }
        };
        Ok(report)
    }
}
