//! Pool lifecycle scenarios
//!
//! Chains calculator results through pool state the way the pool program
//! would apply them, checking that quotes stay consistent across operations.

use stableswap_amm::{
    calculate_estimated_mint_amount, calculate_estimated_swap_output_amount,
    calculate_estimated_withdraw_amount, calculate_estimated_withdraw_one_amount,
    calculate_swap_price, calculate_virtual_price, compute_amp_factor, AmpRamp,
};
use stableswap_types::{
    ExchangeInfo, Fees, Fraction, Network, Reserve, Token, TokenAmount,
};

fn usdc() -> Token {
    Token::new("usdc", 6, Network::Localnet).with_symbol("USDC")
}

fn usdt() -> Token {
    Token::new("usdt", 6, Network::Localnet).with_symbol("USDT")
}

fn lp() -> Token {
    Token::new("usdc-usdt-lp", 6, Network::Localnet)
}

fn ratio(numerator: u64, denominator: u64) -> Fraction {
    Fraction::new(numerator, denominator).unwrap()
}

fn standard_fees() -> Fees {
    Fees::new(ratio(4, 10_000), ratio(1, 2), ratio(5, 1_000), ratio(1, 2)).unwrap()
}

fn pool(amp_factor: u64, reserve_a: u64, reserve_b: u64, lp_supply: u64) -> ExchangeInfo {
    ExchangeInfo {
        amp_factor,
        fees: standard_fees(),
        lp_total_supply: TokenAmount::new(lp(), lp_supply),
        reserves: [
            Reserve::new(TokenAmount::new(usdc(), reserve_a), "usdc-reserve", "usdc-admin"),
            Reserve::new(TokenAmount::new(usdt(), reserve_b), "usdt-reserve", "usdt-admin"),
        ],
    }
}

#[test]
fn test_balanced_pool_small_swap_is_one_to_one() {
    let mut exchange = pool(100, 1_000_000_000, 1_000_000_000, 2_000_000_000);
    exchange.fees = Fees::zero();

    let quote =
        calculate_estimated_swap_output_amount(&exchange, &TokenAmount::new(usdc(), 10_000))
            .unwrap();

    assert_eq!(quote.output_amount_before_fees.raw(), 10_000);
    assert_eq!(quote.output_amount.raw(), 10_000);
}

#[test]
fn test_swap_fees_raise_virtual_price() {
    let exchange = pool(100, 1_000_000_000, 1_000_000_000, 2_000_000_000);
    assert_eq!(
        calculate_virtual_price(&exchange).unwrap(),
        Some(Fraction::one())
    );

    let quote =
        calculate_estimated_swap_output_amount(&exchange, &TokenAmount::new(usdc(), 1_000_000))
            .unwrap();
    assert_eq!(quote.output_amount.raw(), 999_592);

    // Admin fees leave the reserve, LP fees stay in it
    let mut after = exchange.clone();
    after.reserves[0].amount = TokenAmount::new(usdc(), 1_001_000_000);
    after.reserves[1].amount = exchange.reserves[1]
        .amount
        .checked_sub(&quote.output_amount)
        .and_then(|amount| amount.checked_sub(&quote.admin_fee))
        .unwrap();
    assert_eq!(after.reserves[1].amount.raw(), 999_000_209);

    assert_eq!(
        calculate_virtual_price(&after).unwrap(),
        Some(ratio(2_000_000_199, 2_000_000_000))
    );

    // Swapping the proceeds straight back cannot be profitable
    let back = calculate_estimated_swap_output_amount(&after, &quote.output_amount).unwrap();
    assert_eq!(back.output_amount.token, usdc());
    assert_eq!(back.output_amount_before_fees.raw(), 999_602);
    assert_eq!(back.output_amount.raw(), 999_203);
    assert!(back.output_amount.raw() < 1_000_000);
}

#[test]
fn test_balanced_deposit_then_withdraw() {
    let exchange = pool(100, 1_000_000_000, 1_000_000_000, 2_000_000_000);
    let minted = calculate_estimated_mint_amount(
        &exchange,
        &TokenAmount::new(usdc(), 100_000_000),
        &TokenAmount::new(usdt(), 100_000_000),
    )
    .unwrap();
    assert_eq!(minted.mint_amount.raw(), 200_000_000);

    let after = pool(100, 1_100_000_000, 1_100_000_000, 2_200_000_000);
    let withdrawn = calculate_estimated_withdraw_amount(&after, &minted.mint_amount).unwrap();

    for i in 0..2 {
        assert_eq!(withdrawn.withdraw_amounts_before_fees[i].raw(), 100_000_000);
        assert_eq!(withdrawn.withdraw_amounts[i].raw(), 99_500_000);
        assert_eq!(withdrawn.fees[i].raw(), 500_000);
    }
    assert_eq!(withdrawn.withdraw_amounts[0].token, usdc());
    assert_eq!(withdrawn.withdraw_amounts[1].token, usdt());
}

#[test]
fn test_one_sided_deposit_then_single_asset_withdraw() {
    let exchange = pool(100, 1_000_000_000, 1_000_000_000, 2_000_000_000);
    let minted = calculate_estimated_mint_amount(
        &exchange,
        &TokenAmount::new(usdc(), 10_000_000),
        &TokenAmount::zero(usdt()),
    )
    .unwrap();
    assert_eq!(minted.mint_amount.raw(), 9_997_754);
    assert_eq!(minted.mint_amount_before_fees.raw(), 9_999_753);
    assert_eq!(minted.fees.raw(), 1_999);

    let after = pool(100, 1_010_000_000, 1_000_000_000, 2_009_997_754);
    let withdrawn =
        calculate_estimated_withdraw_one_amount(&after, &minted.mint_amount, &usdc()).unwrap();

    assert_eq!(withdrawn.withdraw_amount.raw(), 9_944_050);
    assert_eq!(withdrawn.withdraw_amount_before_fees.raw(), 9_996_020);
    assert_eq!(withdrawn.swap_fee.raw(), 1_989);
    assert_eq!(withdrawn.lp_swap_fee.raw(), 995);
    assert_eq!(withdrawn.admin_swap_fee.raw(), 994);
    assert_eq!(withdrawn.withdraw_fee.raw(), 49_980);
    assert_eq!(withdrawn.lp_withdraw_fee.raw(), 24_990);
    assert_eq!(withdrawn.admin_withdraw_fee.raw(), 24_990);

    // Round trip through fees returns less than was deposited
    assert!(withdrawn.withdraw_amount.raw() < 10_000_000);
}

#[test]
fn test_swap_price_chain() {
    let exchange = pool(100, 1_000_000_000, 1_000_000_000, 2_000_000_000);
    let price = calculate_swap_price(&exchange).unwrap();
    assert_eq!(price.raw(), &ratio(999_991, 1_000_000));
    assert_eq!(price.to_fixed(6), "0.999991");

    // USDC -> USDT -> USDC is the identity
    let round_trip = price.multiply(&price.invert().unwrap()).unwrap();
    assert_eq!(round_trip.raw(), &Fraction::one());
    assert_eq!(round_trip.base, usdc());
    assert_eq!(round_trip.quote, usdc());

    let quoted = price.quote(&TokenAmount::new(usdc(), 5_000_000)).unwrap();
    assert_eq!(quoted.token, usdt());
    assert_eq!(quoted.raw(), 4_999_955);
}

#[test]
fn test_ramping_amp_changes_virtual_price() {
    let ramp = AmpRamp {
        initial_amp_factor: 100,
        target_amp_factor: 200,
        start_ramp_ts: 1_700_000_000,
        stop_ramp_ts: 1_700_086_400,
    };

    let mut exchange = pool(100, 1_500_000_000, 700_000_000, 2_000_000_000);
    assert_eq!(
        calculate_virtual_price(&exchange).unwrap(),
        Some(ratio(2_198_344_131, 2_000_000_000))
    );

    exchange.amp_factor = compute_amp_factor(&ramp, 1_700_043_200).unwrap();
    assert_eq!(exchange.amp_factor, 150);
    assert_eq!(
        calculate_virtual_price(&exchange).unwrap(),
        Some(ratio(2_198_891_611, 2_000_000_000))
    );
}
