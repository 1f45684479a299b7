//! # Pause State Machine
//!
//! Liveness around the maximum pause duration, cooldown between pauses and
//! the owner's administrative bypass.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use champ_token::domain::pause::{DEFAULT_MAX_PAUSE_DURATION_SECS, DEFAULT_PAUSE_COOLDOWN_SECS};
    use champ_token::prelude::*;

    const MAX: u64 = DEFAULT_MAX_PAUSE_DURATION_SECS;

    fn paused_harness() -> Harness {
        let mut h = Harness::new();
        h.fund(addr(10), units(1_000));
        h.token.pause(&h.admin()).unwrap();
        h
    }

    #[test]
    fn test_transfer_blocked_before_limit() {
        let mut h = paused_harness();
        h.advance(MAX - 1);
        let err = h
            .token
            .transfer(&h.ctx(addr(10)), addr(11), units(1))
            .unwrap_err();
        assert_eq!(
            err,
            TokenError::PausedAndTimeLimitNotReached {
                resumes_after: GENESIS + MAX
            }
        );
        assert_eq!(err.kind(), ErrorKind::Temporal);
        assert!(h.token.paused(h.now));
    }

    #[test]
    fn test_transfer_blocked_at_exact_limit() {
        let mut h = paused_harness();
        h.advance(MAX);
        assert!(h
            .token
            .transfer(&h.ctx(addr(10)), addr(11), units(1))
            .is_err());
    }

    #[test]
    fn test_transfer_after_limit_resumes_ledger() {
        let mut h = paused_harness();
        h.advance(MAX + 1);
        assert!(!h.token.paused(h.now));
        assert!(h.token.pause_state().is_paused_flag());

        h.send(addr(10), addr(11), units(1));
        assert!(!h.token.pause_state().is_paused_flag());
        assert!(h.token.events().contains(&LedgerEvent::Unpaused {
            at: h.now,
            automatic: true
        }));
        h.send(addr(11), addr(12), U256::from(1u64));
    }

    #[test]
    fn test_failed_transfer_after_limit_keeps_pause_flag() {
        let mut h = paused_harness();
        h.advance(MAX + 1);
        assert!(h
            .token
            .transfer(&h.ctx(addr(10)), addr(11), units(5_000))
            .is_err());
        assert!(h.token.pause_state().is_paused_flag());
    }

    #[test]
    fn test_transfer_from_is_gated() {
        let mut h = paused_harness();
        h.token
            .approve(&h.ctx(addr(10)), addr(30), units(10))
            .unwrap();
        assert!(matches!(
            h.token
                .transfer_from(&h.ctx(addr(30)), addr(10), addr(11), units(1)),
            Err(TokenError::PausedAndTimeLimitNotReached { .. })
        ));
        assert_eq!(h.token.allowance(addr(10), addr(30)), units(10));
    }

    #[test]
    fn test_owner_moves_untaxed_while_paused() {
        let mut h = paused_harness();
        let breakdown = h.send(OWNER, addr(11), units(100));
        assert_eq!(breakdown.net_amount, units(100));
        assert!(h.token.paused(h.now));
    }

    #[test]
    fn test_cooldown_between_pauses() {
        let mut h = paused_harness();
        h.advance(60);
        h.token.unpause(&h.admin()).unwrap();
        assert!(!h.token.paused(h.now));

        let err = h.token.pause(&h.admin()).unwrap_err();
        assert_eq!(
            err,
            TokenError::CooldownActive {
                remaining: DEFAULT_PAUSE_COOLDOWN_SECS - 60
            }
        );

        h.advance(DEFAULT_PAUSE_COOLDOWN_SECS - 60);
        h.token.pause(&h.admin()).unwrap();
        assert!(h.token.paused(h.now));
    }

    #[test]
    fn test_pause_ordering_errors() {
        let mut h = paused_harness();
        assert_eq!(h.token.pause(&h.admin()), Err(TokenError::AlreadyPaused));
        h.token.unpause(&h.admin()).unwrap();
        assert_eq!(h.token.unpause(&h.admin()), Err(TokenError::NotPaused));
        assert_eq!(
            h.token.pause(&h.ctx(addr(10))),
            Err(TokenError::Unauthorized { caller: addr(10) })
        );
    }

    #[test]
    fn test_explicit_unpause_clears_expired_pause() {
        let mut h = paused_harness();
        h.advance(MAX + 10);
        h.token.unpause(&h.admin()).unwrap();
        assert!(!h.token.pause_state().is_paused_flag());
    }
}
