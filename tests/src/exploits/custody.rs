//! # Custody Attacks
//!
//! Attempts to pull settlement asset that belongs to reflection claimants,
//! or to take control of the settlement holder.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use champ_token::prelude::*;

    const ATTACKER: Address = Address::new([0x66; 20]);

    #[test]
    fn test_settlement_voucher_cannot_touch_reflection_funds() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        let receipt = h.accrue_round(units(100_000));
        assert_eq!(h.asset.balance_of(HOLDER), receipt.settlement_out);

        let (message, signature) = h.voucher(ATTACKER, U256::one(), h.now + 60, U256::zero());
        assert_eq!(
            h.token
                .claim_reward_points_with_eth(&h.ctx(ATTACKER), &message, &signature),
            Err(TokenError::InsufficientSettlementReserve {
                required: U256::one(),
                available: U256::zero(),
            })
        );

        let owed = h.token.calculate_claimable(addr(10)).unwrap();
        assert_eq!(
            h.token.claim_reflections(&h.ctx(addr(10)), addr(10)).unwrap(),
            owed
        );
    }

    #[test]
    fn test_grant_cannot_touch_reflection_funds() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.accrue_round(units(100_000));
        h.fund_holder(U256::from(500u64));

        assert_eq!(h.token.free_settlement_reserve(), U256::from(500u64));
        assert!(matches!(
            h.token
                .grant_reward_points_with_eth(&h.admin(), ATTACKER, U256::from(501u64)),
            Err(TokenError::InsufficientSettlementReserve { .. })
        ));
        h.token
            .grant_reward_points_with_eth(&h.admin(), addr(11), U256::from(500u64))
            .unwrap();
        assert!(h.token.free_settlement_reserve().is_zero());
    }

    #[test]
    fn test_non_owner_grants_rejected() {
        let mut h = Harness::new();
        h.fund(LEDGER, units(100));
        h.fund_holder(units(1));
        assert_eq!(
            h.token
                .grant_reward_points_with_chp(&h.ctx(ATTACKER), ATTACKER, units(1)),
            Err(TokenError::Unauthorized { caller: ATTACKER })
        );
        assert_eq!(
            h.token
                .grant_reward_points_with_eth(&h.ctx(ATTACKER), ATTACKER, units(1)),
            Err(TokenError::Unauthorized { caller: ATTACKER })
        );
    }

    #[test]
    fn test_holder_cannot_be_hijacked() {
        let mut h = Harness::new();
        assert!(matches!(
            h.token.transfer_holder_ownership(&h.ctx(ATTACKER), ATTACKER),
            Err(TokenError::Holder(_))
        ));
        // the deployer handed custody over and no longer controls it
        assert!(h
            .token
            .transfer_holder_ownership(&h.admin(), OWNER)
            .is_err());
        assert_eq!(h.token.settlement_holder().owner(), LEDGER);
    }

    #[test]
    fn test_claim_for_other_holder_pays_that_holder() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.accrue_round(units(100_000));

        let paid = h
            .token
            .claim_reflections(&h.ctx(ATTACKER), addr(10))
            .unwrap();
        assert_eq!(h.asset.balance_of(addr(10)), paid);
        assert!(h.asset.balance_of(ATTACKER).is_zero());
    }
}
