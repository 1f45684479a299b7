//! # End-to-End Scenarios
//!
//! Walkthroughs of the main user journeys: taxed trading against the pair,
//! tax administration, reflection conversion and voucher redemption.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use champ_token::prelude::*;

    // =========================================================================
    // TAXES
    // =========================================================================

    #[test]
    fn test_custom_rates_apply_to_buys_and_sells() {
        let mut h = Harness::new();
        h.token.set_taxes(&h.admin(), 6, 4).unwrap();

        let bought = h.send(PAIR, addr(10), units(1_000));
        assert_eq!(bought.direction, TransferDirection::Buy);
        assert_eq!(bought.rate_percent, 6);
        assert_eq!(h.token.balance_of(addr(10)), units(940));

        let pair_before = h.token.balance_of(PAIR);
        let sold = h.send(addr(10), PAIR, units(100));
        assert_eq!(sold.direction, TransferDirection::Sell);
        assert_eq!(sold.net_amount, units(96));
        assert_eq!(h.token.balance_of(PAIR), pair_before + units(96));
        h.token.verify_invariants().unwrap();
    }

    #[test]
    fn test_tax_above_limit_keeps_previous_rates() {
        let mut h = Harness::new();
        h.token.set_taxes(&h.admin(), 6, 4).unwrap();
        h.token.take_events();

        let err = h.token.set_taxes(&h.admin(), 11, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("exceed 10%"));
        assert_eq!(h.token.buy_tax(), 6);
        assert_eq!(h.token.sell_tax(), 4);
        assert!(h.token.events().is_empty());
    }

    #[test]
    fn test_wallet_transfer_routes_reflection_tax() {
        let mut h = Harness::new();
        h.fund(addr(10), units(10_000));

        let breakdown = h.send(addr(10), addr(11), units(5_000));
        assert_eq!(breakdown.reflection_tax, units(150));
        assert_eq!(breakdown.liquidity_tax, units(100));
        assert_eq!(h.token.balance_of(h.token.reflection_treasury()), units(150));
        assert_eq!(h.token.balance_of(h.token.liquidity_treasury()), units(100));
        assert_eq!(h.token.balance_of(addr(11)), units(4_750));
    }

    #[test]
    fn test_excluded_account_moves_untaxed() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.token.exclude_from_fees(&h.admin(), addr(10), true).unwrap();

        let breakdown = h.send(addr(10), PAIR, units(1_000));
        assert_eq!(breakdown.net_amount, units(1_000));
        assert!(breakdown.total_tax().is_zero());
        assert!(h.token.balance_of(h.token.reflection_treasury()).is_zero());
    }

    #[test]
    fn test_allocation_change_shifts_split() {
        let mut h = Harness::new();
        h.token.set_tax_allocations(&h.admin(), 1, 0).unwrap();
        h.fund(addr(10), units(1_000));
        let breakdown = h.send(addr(10), addr(11), units(1_000));
        assert_eq!(breakdown.liquidity_tax, units(50));
        assert!(breakdown.reflection_tax.is_zero());

        assert!(matches!(
            h.token.set_tax_allocations(&h.admin(), 0, 0),
            Err(TokenError::InvalidConfiguration(ConfigError::InvalidAllocation { .. }))
        ));
    }

    // =========================================================================
    // REFLECTIONS
    // =========================================================================

    #[test]
    fn test_conversion_makes_accrual_visible_proportionally() {
        let mut h = Harness::new();
        h.fund(addr(10), units(10_000));
        h.send(addr(10), addr(11), units(5_000));
        assert!(h.token.calculate_claimable(addr(11)).unwrap().is_zero());

        let receipt = h.token.process_reflections(&h.admin()).unwrap();
        assert_eq!(receipt.tokens_in, units(150));
        assert_eq!(h.asset.balance_of(HOLDER), receipt.settlement_out);

        let c10 = h.token.calculate_claimable(addr(10)).unwrap();
        let c11 = h.token.calculate_claimable(addr(11)).unwrap();
        assert!(!c11.is_zero());
        // 5000 vs 4750 whole tokens
        assert_eq!(c10 * U256::from(4_750u64), c11 * U256::from(5_000u64));

        let paid = h.token.claim_reflections(&h.ctx(addr(11)), addr(11)).unwrap();
        assert_eq!(paid, c11);
        assert_eq!(h.asset.balance_of(addr(11)), c11);
        assert!(h.token.calculate_claimable(addr(11)).unwrap().is_zero());
        assert_eq!(h.token.account(addr(11)).total_claimed, c11);
    }

    #[test]
    fn test_liquidity_processing_mints_lp_to_recipient() {
        let mut h = Harness::new();
        h.token.set_liquidity_recipient(&h.admin(), addr(0x42)).unwrap();
        h.fund(addr(10), units(10_000));
        h.send(addr(10), addr(11), units(10_000));

        let receipt = h.token.process_liquidity(&h.admin()).unwrap();
        assert_eq!(receipt.token_amount, units(100));
        assert_eq!(h.exchange.lp_balance_of(addr(0x42)), receipt.liquidity);
        assert!(h.asset.balance_of(LEDGER).is_zero());
        assert_eq!(h.asset.balance_of(PAIR), units(POOL_SETTLEMENT));
        h.token.verify_invariants().unwrap();
    }

    // =========================================================================
    // VOUCHERS
    // =========================================================================

    #[test]
    fn test_voucher_redeems_once() {
        let mut h = Harness::new();
        h.fund(LEDGER, units(1_000));
        let recipient = addr(10);
        let (message, signature) = h.voucher(recipient, U256::from(100u64), h.now + 60, U256::zero());

        let payout = h
            .token
            .claim_reward_points_with_chp(&h.ctx(recipient), &message, &signature)
            .unwrap();
        assert_eq!(payout.nonce, Some(U256::zero()));
        assert_eq!(h.token.balance_of(recipient), payout.received);
        assert_eq!(h.token.user_nonce(recipient), U256::one());

        let replay = h
            .token
            .claim_reward_points_with_chp(&h.ctx(recipient), &message, &signature)
            .unwrap_err();
        assert!(replay.to_string().starts_with("Wrong Nonces"));
        assert_eq!(h.token.user_nonce(recipient), U256::one());
    }

    #[test]
    fn test_stale_voucher_times_out() {
        let mut h = Harness::new();
        h.fund(LEDGER, units(1_000));
        let (message, signature) = h.voucher(addr(10), U256::from(100u64), h.now - 240, U256::zero());

        let err = h
            .token
            .claim_reward_points_with_chp(&h.ctx(addr(10)), &message, &signature)
            .unwrap_err();
        assert!(err.to_string().starts_with("Session time out"));
        assert_eq!(err.kind(), ErrorKind::Temporal);
        assert!(h.token.user_nonce(addr(10)).is_zero());
    }

    #[test]
    fn test_voucher_valid_through_expiry_second() {
        let mut h = Harness::new();
        h.fund(LEDGER, units(1_000));
        let (message, signature) = h.voucher(addr(10), U256::from(100u64), h.now + 60, U256::zero());
        h.advance(60);
        assert!(h
            .token
            .claim_reward_points_with_chp(&h.ctx(addr(10)), &message, &signature)
            .is_ok());
    }

    #[test]
    fn test_consecutive_vouchers_follow_nonce() {
        let mut h = Harness::new();
        h.fund(LEDGER, units(1_000));
        h.token.exclude_from_fees(&h.admin(), addr(10), true).unwrap();

        for nonce in 0..3u64 {
            let (message, signature) =
                h.voucher(addr(10), U256::from(10u64), h.now + 60, U256::from(nonce));
            h.token
                .claim_reward_points_with_chp(&h.ctx(addr(10)), &message, &signature)
                .unwrap();
        }
        assert_eq!(h.token.user_nonce(addr(10)), U256::from(3u64));
        assert_eq!(h.token.balance_of(addr(10)), U256::from(30u64));
    }

    #[test]
    fn test_settlement_voucher_pays_from_free_reserve() {
        let mut h = Harness::new();
        h.fund_holder(units(2));
        let (message, signature) = h.voucher(addr(10), units(1), h.now + 60, U256::zero());

        let payout = h
            .token
            .claim_reward_points_with_eth(&h.ctx(addr(10)), &message, &signature)
            .unwrap();
        assert_eq!(payout.asset, PayoutAsset::Settlement);
        assert_eq!(h.asset.balance_of(addr(10)), units(1));
        assert_eq!(h.token.free_settlement_reserve(), units(1));
    }

    #[test]
    fn test_rotated_signer_invalidates_old_key() {
        let mut h = Harness::new();
        h.fund(LEDGER, units(1_000));
        let (message, signature) = h.voucher(addr(10), U256::from(100u64), h.now + 60, U256::zero());
        h.token.set_voucher_signer(&h.admin(), addr(0x99)).unwrap();

        assert_eq!(
            h.token
                .claim_reward_points_with_chp(&h.ctx(addr(10)), &message, &signature),
            Err(TokenError::InvalidSignature)
        );
    }
}
