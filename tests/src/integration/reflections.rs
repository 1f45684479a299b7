//! # Reflection Accounting
//!
//! Fairness between equal holders, checkpoint ordering across transfers,
//! the minimum-holding threshold, exclusion, carry-forward of accruals made
//! while nobody is eligible, and the liability counter.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use champ_token::prelude::*;

    #[test]
    fn test_equal_holders_earn_equally() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.fund(addr(11), units(1_000));

        h.accrue_round(units(100_000));
        h.accrue_round(units(40_000));

        let a = h.token.calculate_claimable(addr(10)).unwrap();
        let b = h.token.calculate_claimable(addr(11)).unwrap();
        assert!(!a.is_zero());
        assert_eq!(a, b);
    }

    #[test]
    fn test_late_joiner_earns_only_later_accruals() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.accrue_round(units(100_000));
        let first = h.token.calculate_claimable(addr(10)).unwrap();

        h.fund(addr(11), units(1_000));
        assert!(h.token.calculate_claimable(addr(11)).unwrap().is_zero());

        h.accrue_round(units(100_000));
        let a = h.token.calculate_claimable(addr(10)).unwrap();
        let b = h.token.calculate_claimable(addr(11)).unwrap();
        assert_eq!(a - first, b);
    }

    #[test]
    fn test_transfers_never_reduce_claimable() {
        let mut h = Harness::new();
        h.fund(addr(10), units(10_000));
        h.accrue_round(units(100_000));
        let earned = h.token.calculate_claimable(addr(10)).unwrap();
        assert!(!earned.is_zero());

        // drop below the threshold, then come back above it
        h.send(addr(10), addr(11), units(9_900));
        assert_eq!(h.token.calculate_claimable(addr(10)).unwrap(), earned);
        assert!(h.token.account(addr(10)).reflective_balance.is_zero());

        h.send(addr(11), addr(10), units(1_000));
        assert_eq!(h.token.calculate_claimable(addr(10)).unwrap(), earned);

        h.accrue_round(units(100_000));
        assert!(h.token.calculate_claimable(addr(10)).unwrap() > earned);
        h.token.verify_invariants().unwrap();
    }

    #[test]
    fn test_recipient_does_not_inherit_past_rewards() {
        let mut h = Harness::new();
        h.fund(addr(10), units(10_000));
        h.accrue_round(units(100_000));

        h.send(addr(10), addr(12), units(5_000));
        assert!(h.token.calculate_claimable(addr(12)).unwrap().is_zero());
    }

    #[test]
    fn test_below_minimum_earns_nothing() {
        let mut h = Harness::new();
        h.fund(addr(10), units(249));
        h.fund(addr(11), units(250));
        h.accrue_round(units(100_000));

        assert!(h.token.calculate_claimable(addr(10)).unwrap().is_zero());
        assert!(!h.token.calculate_claimable(addr(11)).unwrap().is_zero());
    }

    #[test]
    fn test_excluded_holder_keeps_settled_rewards() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.accrue_round(units(100_000));
        let earned = h.token.calculate_claimable(addr(10)).unwrap();

        h.token
            .exclude_from_reflections(&h.admin(), addr(10), true)
            .unwrap();
        h.accrue_round(units(100_000));
        assert_eq!(h.token.calculate_claimable(addr(10)).unwrap(), earned);
        assert!(h.token.is_excluded_from_reflections(addr(10)));

        let paid = h.token.claim_reflections(&h.ctx(addr(10)), addr(10)).unwrap();
        assert_eq!(paid, earned);
    }

    #[test]
    fn test_accrual_without_eligible_holders_is_carried_forward() {
        let mut h = Harness::new();
        let admin = h.admin();
        h.token.exclude_from_reflections(&admin, OWNER, true).unwrap();
        h.token
            .change_minimum_holding_for_reflection(&admin, U256::MAX)
            .unwrap();
        assert!(h.token.reflection_pool().total_reflectable_supply().is_zero());

        h.token.transfer(&admin, addr(20), units(5_000)).unwrap();
        let first = h.token.process_reflections(&admin).unwrap();
        assert!(first.deferred);
        assert_eq!(h.token.reflection_pool().pending_accrual(), first.settlement_out);

        h.token
            .change_minimum_holding_for_reflection(&admin, units(250))
            .unwrap();
        h.token
            .refresh_reflection_eligibility(&h.ctx(addr(99)), &[addr(20)])
            .unwrap();

        h.token.transfer(&admin, addr(20), units(5_000)).unwrap();
        let second = h.token.process_reflections(&admin).unwrap();
        assert!(!second.deferred);
        assert!(h.token.reflection_pool().pending_accrual().is_zero());

        // a single 9500-token holder receives everything, floored per whole token
        let funds = first.settlement_out + second.settlement_out;
        let claimable = h.token.calculate_claimable(addr(20)).unwrap();
        assert!(claimable <= funds);
        assert!(claimable + U256::from(9_500u64) > funds);
    }

    #[test]
    fn test_liability_tracks_unclaimed_reflections() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        let receipt = h.accrue_round(units(100_000));
        let pool = h.token.reflection_pool();
        assert_eq!(pool.outstanding_liability(), receipt.settlement_out);
        assert_eq!(pool.total_accrued(), receipt.settlement_out);
        assert!(h.token.free_settlement_reserve().is_zero());

        let paid = h.token.claim_reflections(&h.ctx(addr(10)), addr(10)).unwrap();
        assert_eq!(
            h.token.reflection_pool().outstanding_liability(),
            receipt.settlement_out - paid
        );
    }

    #[test]
    fn test_claim_requires_ledger_custody() {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.accrue_round(units(100_000));
        h.token
            .transfer_holder_ownership(&h.ctx(LEDGER), OWNER)
            .unwrap();

        assert_eq!(
            h.token.claim_reflections(&h.ctx(addr(10)), addr(10)),
            Err(TokenError::SettlementHolderNotControlled { owner: OWNER })
        );
        assert!(!h.token.calculate_claimable(addr(10)).unwrap().is_zero());
    }
}
