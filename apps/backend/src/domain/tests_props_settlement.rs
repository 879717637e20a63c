//! Property tests for the settlement engine (pure domain, no DB).
//!
//! Properties tested:
//! - Deltas of every settled game sum to zero
//! - Balances move by exactly the delta
//! - Settling is deterministic
//! - Without a WIN event, loss multipliers never change the result
//! - Reversing a settlement restores the starting balances

use proptest::prelude::*;

use crate::domain::settlement::{reverse, settle, EventType, ReversalInput};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_deltas_sum_to_zero(roles in test_gens::table(), events in test_gens::events()) {
        let out = settle(&roles, &events).unwrap();
        prop_assert_eq!(out.len(), roles.len());
        prop_assert_eq!(out.iter().map(|s| s.new_point_delta).sum::<i64>(), 0);
    }

    #[test]
    fn prop_balance_moves_by_delta(roles in test_gens::table(), events in test_gens::events()) {
        let out = settle(&roles, &events).unwrap();
        for (role, s) in roles.iter().zip(&out) {
            prop_assert_eq!(s.new_balance - role.current_balance, s.new_point_delta);
            prop_assert_eq!(s.role_id, role.role_id);
        }
    }

    #[test]
    fn prop_settle_is_deterministic(roles in test_gens::table(), events in test_gens::events()) {
        prop_assert_eq!(settle(&roles, &events).unwrap(), settle(&roles, &events).unwrap());
    }

    #[test]
    fn prop_no_win_means_multipliers_are_inert(
        roles in test_gens::table(),
        events in test_gens::events(),
    ) {
        let without_win: Vec<_> = events
            .into_iter()
            .filter(|e| e.event_type != EventType::Win)
            .collect();
        let without_multipliers: Vec<_> = without_win
            .iter()
            .filter(|e| e.event_type != EventType::LossMultiplier)
            .cloned()
            .collect();
        prop_assert_eq!(
            settle(&roles, &without_win).unwrap(),
            settle(&roles, &without_multipliers).unwrap()
        );
    }

    #[test]
    fn prop_reverse_undoes_settle(roles in test_gens::table(), events in test_gens::events()) {
        let settled = settle(&roles, &events).unwrap();
        let entries: Vec<ReversalInput> = settled
            .iter()
            .map(|s| ReversalInput {
                player_id: s.player_id,
                point_delta: s.new_point_delta,
                current_balance: s.new_balance,
            })
            .collect();
        let restored = reverse(&entries).unwrap();
        for (role, r) in roles.iter().zip(&restored) {
            prop_assert_eq!(r.player_id, role.player_id);
            prop_assert_eq!(r.new_balance, role.current_balance);
        }
    }
}
