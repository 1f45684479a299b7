//! # Randomised Properties
//!
//! Random sequences of transfers, conversions and claims between a small
//! set of holders. After every step: balances sum to the total supply, the
//! reflectable supply matches its parts, custody covers the liability, and
//! no holder's claimable amount went down unless it just claimed.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use champ_token::prelude::*;
    use proptest::prelude::*;

    const HOLDERS: [Address; 4] = [
        Address::new([10; 20]),
        Address::new([11; 20]),
        Address::new([12; 20]),
        Address::new([13; 20]),
    ];

    #[derive(Debug, Clone)]
    enum Op {
        Transfer { from: usize, to: usize, whole: u64 },
        Convert,
        Claim { holder: usize },
        RaiseThreshold { whole: u64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0..HOLDERS.len(), 0..HOLDERS.len(), 1u64..8_000)
                .prop_map(|(from, to, whole)| Op::Transfer { from, to, whole }),
            2 => Just(Op::Convert),
            1 => (0..HOLDERS.len()).prop_map(|holder| Op::Claim { holder }),
            1 => (100u64..3_000).prop_map(|whole| Op::RaiseThreshold { whole }),
        ]
    }

    fn claimables(h: &Harness) -> Vec<U256> {
        HOLDERS
            .iter()
            .map(|a| h.token.calculate_claimable(*a).unwrap())
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_ledger_invariants_hold(ops in prop::collection::vec(op(), 1..30)) {
            let mut h = Harness::new();
            for holder in HOLDERS {
                h.fund(holder, units(10_000));
            }

            for op in ops {
                let before = claimables(&h);
                let mut claimed = None;
                match op {
                    Op::Transfer { from, to, whole } => {
                        let _ = h.token.transfer(&h.ctx(HOLDERS[from]), HOLDERS[to], units(whole));
                    }
                    Op::Convert => {
                        let _ = h.token.process_reflections(&h.admin());
                    }
                    Op::Claim { holder } => {
                        claimed = Some(holder);
                        let _ = h.token.claim_reflections(&h.ctx(HOLDERS[holder]), HOLDERS[holder]);
                    }
                    Op::RaiseThreshold { whole } => {
                        let _ = h.token.change_minimum_holding_for_reflection(&h.admin(), units(whole));
                    }
                }

                h.token
                    .verify_invariants()
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;

                let after = claimables(&h);
                for (i, (old, new)) in before.iter().zip(&after).enumerate() {
                    if claimed != Some(i) {
                        prop_assert!(new >= old, "holder {} claimable fell", i);
                    }
                }

                let liability = h.token.reflection_pool().outstanding_liability();
                let owed = after.iter().fold(U256::zero(), |acc, c| acc + *c);
                prop_assert!(owed <= liability);
                prop_assert!(h.asset.balance_of(HOLDER) >= liability);
            }
        }

        #[test]
        fn prop_tax_never_exceeds_rate(rate in 0u8..=10, whole in 1u64..1_000_000) {
            let mut h = Harness::new();
            h.token.set_taxes(&h.admin(), rate, rate).unwrap();
            h.fund(addr(20), units(whole));

            let breakdown = h.send(addr(20), addr(21), units(whole));
            let cap = units(whole) * U256::from(rate) / U256::from(100u64);
            prop_assert_eq!(breakdown.total_tax(), cap);
            prop_assert_eq!(breakdown.net_amount + breakdown.total_tax(), units(whole));
        }
    }
}
