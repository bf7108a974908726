//! Budget movements.
//!
//! Every credit and debit is mirrored into `total_earned` / `total_spent` so
//! `budget == initial_budget + total_earned - total_spent` always holds.

use crate::GameState;

pub(crate) fn can_afford(state: &GameState, cost: i64) -> bool {
    state.budget >= cost
}

pub(crate) fn debit(state: &mut GameState, amount: i64) {
    let amount = amount.abs();
    state.budget -= amount;
    state.stats.total_spent += amount;
}

pub(crate) fn credit(state: &mut GameState, amount: i64) {
    let amount = amount.abs();
    state.budget += amount;
    state.stats.total_earned += amount;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{base_content, base_state};

    #[test]
    fn movements_keep_ledger_balanced() {
        let content = base_content();
        let mut state = base_state(&content);
        debit(&mut state, 1_500);
        credit(&mut state, 700);
        debit(&mut state, -300);
        assert_eq!(state.budget, state.ledger_balance());
        assert_eq!(state.stats.total_spent, 1_800);
        assert_eq!(state.stats.total_earned, 700);
    }

    #[test]
    fn debit_may_take_budget_negative() {
        let content = base_content();
        let mut state = base_state(&content);
        let start = state.budget;
        debit(&mut state, start + 10);
        assert_eq!(state.budget, -10);
        assert!(!can_afford(&state, 0));
    }
}
