//! The ledger reducer
//!
//! A pure, synchronous, total transition function `(AppState, Action) ->
//! AppState`. It performs no I/O and never panics for reachable inputs.
//! Every handler checks all of its preconditions before touching the state,
//! so an ignored action returns the input unchanged.

use std::collections::HashSet;

use crate::models::participant::{canonical_name, is_shared, SHARED_PARTICIPANT};
use crate::models::{AppState, Category, CategoryId, Money, Transaction, TransactionId, TransactionType};

use super::action::{Action, Outcome, Rejection};

/// Apply an action, discarding the outcome
pub fn reduce(state: AppState, action: Action) -> AppState {
    apply(state, action).0
}

/// Apply an action and report whether it changed anything
pub fn apply(mut state: AppState, action: Action) -> (AppState, Outcome) {
    let result = match action {
        Action::AddTransaction(txn) => add_transaction(&mut state, txn),
        Action::DeleteTransaction(id) => delete_transaction(&mut state, &id),
        Action::UpdateCategoryBalance {
            category_id,
            balance,
        } => update_category_balance(&mut state, &category_id, balance),
        Action::ReorderCategories(order) => reorder_categories(&mut state, order),
        Action::AddCategory(category) => add_category(&mut state, category),
        Action::UpdateCategory(category) => update_category(&mut state, category),
        Action::DeleteCategory(id) => delete_category(&mut state, &id),
        Action::AddParticipant(name) => add_participant(&mut state, name),
        Action::UpdateParticipant { old_name, new_name } => {
            update_participant(&mut state, &old_name, new_name)
        }
        Action::DeleteParticipant(name) => delete_participant(&mut state, &name),
        Action::SetTheme(theme) => {
            state.theme = theme;
            Ok(())
        }
        Action::SetBottomNavOpacity(opacity) => set_bottom_nav_opacity(&mut state, opacity),
        Action::ResetState => {
            let theme = state.theme;
            state = AppState::seed();
            state.theme = theme;
            Ok(())
        }
        Action::ReplaceState(validated) => {
            state = validated.into_inner();
            Ok(())
        }
    };

    let outcome = match result {
        Ok(()) => Outcome::Applied,
        Err(rejection) => Outcome::Ignored(rejection),
    };
    (state, outcome)
}

type Step = Result<(), Rejection>;

fn add_transaction(state: &mut AppState, mut txn: Transaction) -> Step {
    if state.has_transaction(&txn.id) {
        return Err(Rejection::DuplicateTransaction(txn.id));
    }
    if is_shared(&txn.participant) {
        txn.participant = SHARED_PARTICIPANT.to_string();
    }

    let source = state
        .category(&txn.category_id)
        .ok_or_else(|| Rejection::UnknownCategory(txn.category_id.clone()))?;
    let new_source = source
        .balance
        .checked_sub(txn.amount)
        .ok_or_else(|| Rejection::BalanceOverflow(txn.category_id.clone()))?;

    let destination = match (txn.kind, &txn.to_category_id) {
        (TransactionType::Transfer, Some(to)) if to != &txn.category_id => {
            let dest = state
                .category(to)
                .ok_or_else(|| Rejection::UnknownCategory(to.clone()))?;
            let new_dest = dest
                .balance
                .checked_add(txn.amount)
                .ok_or_else(|| Rejection::BalanceOverflow(to.clone()))?;
            Some((to.clone(), new_dest))
        }
        (TransactionType::Expense | TransactionType::Income, None) => None,
        _ => return Err(Rejection::MalformedTransfer(txn.id)),
    };

    set_balance(state, &txn.category_id, new_source);
    if let Some((to, balance)) = destination {
        set_balance(state, &to, balance);
    }
    state.transactions.push(txn);
    Ok(())
}

fn delete_transaction(state: &mut AppState, id: &TransactionId) -> Step {
    let index = state
        .transactions
        .iter()
        .position(|t| &t.id == id)
        .ok_or_else(|| Rejection::UnknownTransaction(id.clone()))?;
    let txn = &state.transactions[index];

    // Both categories outlive their transactions, since deleting a category
    // cascades; a missing side is skipped rather than treated as an error.
    let mut updates: Vec<(CategoryId, Money)> = Vec::with_capacity(2);
    if let Some(source) = state.category(&txn.category_id) {
        let restored = source
            .balance
            .checked_add(txn.amount)
            .ok_or_else(|| Rejection::BalanceOverflow(source.id.clone()))?;
        updates.push((source.id.clone(), restored));
    }
    if txn.is_transfer() {
        if let Some(dest) = txn.to_category_id.as_ref().and_then(|to| state.category(to)) {
            let restored = dest
                .balance
                .checked_sub(txn.amount)
                .ok_or_else(|| Rejection::BalanceOverflow(dest.id.clone()))?;
            updates.push((dest.id.clone(), restored));
        }
    }

    for (category_id, balance) in updates {
        set_balance(state, &category_id, balance);
    }
    state.transactions.remove(index);
    Ok(())
}

fn update_category_balance(state: &mut AppState, id: &CategoryId, balance: Money) -> Step {
    let category = state
        .category_mut(id)
        .ok_or_else(|| Rejection::UnknownCategory(id.clone()))?;
    if !balance.is_representable() {
        return Err(Rejection::BalanceOverflow(id.clone()));
    }
    category.balance = balance;
    Ok(())
}

fn reorder_categories(state: &mut AppState, order: Vec<CategoryId>) -> Step {
    let current: HashSet<&CategoryId> = state.categories.iter().map(|c| &c.id).collect();
    let proposed: HashSet<&CategoryId> = order.iter().collect();

    let is_permutation = current.len() == state.categories.len()
        && proposed.len() == order.len()
        && current == proposed;
    if !is_permutation {
        return Err(Rejection::NotAPermutation);
    }

    let mut slots: Vec<Option<Category>> = std::mem::take(&mut state.categories)
        .into_iter()
        .map(Some)
        .collect();
    for id in &order {
        let taken = slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|c| &c.id == id))
            .and_then(Option::take);
        if let Some(category) = taken {
            state.categories.push(category);
        }
    }
    Ok(())
}

fn add_category(state: &mut AppState, category: Category) -> Step {
    if state.has_category(&category.id) {
        return Err(Rejection::DuplicateCategory(category.id));
    }
    if !category.balance.is_representable() {
        return Err(Rejection::BalanceOverflow(category.id));
    }
    state.categories.push(category);
    Ok(())
}

fn update_category(state: &mut AppState, category: Category) -> Step {
    if !category.balance.is_representable() && state.has_category(&category.id) {
        return Err(Rejection::BalanceOverflow(category.id));
    }
    match state.category_mut(&category.id) {
        Some(existing) => {
            *existing = category;
            Ok(())
        }
        None => Err(Rejection::UnknownCategory(category.id)),
    }
}

fn delete_category(state: &mut AppState, id: &CategoryId) -> Step {
    if !state.has_category(id) {
        return Err(Rejection::UnknownCategory(id.clone()));
    }
    state.categories.retain(|c| &c.id != id);
    state.transactions.retain(|t| !t.references_category(id));
    Ok(())
}

fn add_participant(state: &mut AppState, name: String) -> Step {
    let name = canonical_name(&name).to_string();
    if state.participants.contains(&name) {
        return Err(Rejection::ParticipantExists(name));
    }
    state.participants.push(name);
    Ok(())
}

fn update_participant(state: &mut AppState, old_name: &str, new_name: String) -> Step {
    if is_shared(old_name) {
        return Err(Rejection::ProtectedParticipant(old_name.to_string()));
    }
    let index = state
        .participants
        .iter()
        .position(|p| p == old_name)
        .ok_or_else(|| Rejection::UnknownParticipant(old_name.to_string()))?;

    let new_name = canonical_name(&new_name).to_string();
    if old_name == new_name {
        return Ok(());
    }

    if state.participants.contains(&new_name) {
        // Renaming onto an existing name merges the two participants.
        state.participants.remove(index);
    } else {
        state.participants[index] = new_name.clone();
    }

    for txn in state
        .transactions
        .iter_mut()
        .filter(|t| t.participant == old_name)
    {
        txn.participant = new_name.clone();
    }
    Ok(())
}

fn delete_participant(state: &mut AppState, name: &str) -> Step {
    if is_shared(name) {
        return Err(Rejection::ProtectedParticipant(name.to_string()));
    }
    if !state.participants.iter().any(|p| p == name) {
        return Err(Rejection::UnknownParticipant(name.to_string()));
    }

    state.participants.retain(|p| p != name);
    for txn in state.transactions.iter_mut().filter(|t| t.participant == name) {
        txn.participant = SHARED_PARTICIPANT.to_string();
    }
    Ok(())
}

fn set_bottom_nav_opacity(state: &mut AppState, opacity: f64) -> Step {
    if opacity.is_nan() {
        return Err(Rejection::InvalidOpacity);
    }
    state.bottom_nav_opacity = opacity.clamp(0.0, 1.0);
    Ok(())
}

fn set_balance(state: &mut AppState, id: &CategoryId, balance: Money) {
    if let Some(category) = state.category_mut(id) {
        category.balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::validate_state;
    use crate::models::state::DEFAULT_BOTTOM_NAV_OPACITY;
    use crate::models::Theme;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn two_accounts() -> AppState {
        let mut state = AppState::empty();
        state.categories = vec![
            Category::with_id("A", "Alpha").with_balance(cents(10000)),
            Category::with_id("B", "Beta").with_balance(cents(5000)),
        ];
        state.participants = vec![SHARED_PARTICIPANT.to_string(), "Me".to_string()];
        state
    }

    fn balance(state: &AppState, id: &str) -> i64 {
        state.category(&id.into()).unwrap().balance.cents()
    }

    fn add(state: AppState, txn: Transaction) -> AppState {
        let (next, outcome) = apply(state, Action::AddTransaction(txn));
        assert_eq!(outcome, Outcome::Applied);
        next
    }

    #[test]
    fn test_expense_transfer_and_reversal_scenario() {
        let state = two_accounts();

        let state = add(state, Transaction::expense("A".into(), cents(3000)));
        assert_eq!(balance(&state, "A"), 7000);
        assert_eq!(balance(&state, "B"), 5000);

        let transfer = Transaction::transfer("A".into(), "B".into(), cents(2000)).with_id("t-1");
        let state = add(state, transfer);
        assert_eq!(balance(&state, "A"), 5000);
        assert_eq!(balance(&state, "B"), 7000);

        let state = reduce(state, Action::DeleteTransaction("t-1".into()));
        assert_eq!(balance(&state, "A"), 7000);
        assert_eq!(balance(&state, "B"), 5000);
        assert_eq!(state.transactions.len(), 1);
    }

    #[test]
    fn test_income_increases_balance() {
        let state = add(two_accounts(), Transaction::income("A".into(), cents(4000)));
        assert_eq!(state.transactions[0].amount.cents(), -4000);
        assert_eq!(balance(&state, "A"), 14000);
    }

    #[test]
    fn test_add_then_delete_is_identity() {
        let before = add(two_accounts(), Transaction::expense("B".into(), cents(125)));

        for txn in [
            Transaction::expense("A".into(), cents(999)),
            Transaction::income("B".into(), cents(31)),
            Transaction::transfer("B".into(), "A".into(), cents(7777)),
        ] {
            let id = txn.id.clone();
            let after = reduce(before.clone(), Action::AddTransaction(txn));
            let restored = reduce(after, Action::DeleteTransaction(id));
            assert_eq!(restored, before);
        }
    }

    #[test]
    fn test_conservation_over_random_sequence() {
        let mut state = two_accounts();
        state
            .categories
            .push(Category::with_id("C", "Gamma").with_balance(cents(0)));
        let initial_total = state.total_balance();
        let ids = ["A", "B", "C"];

        // Small deterministic LCG, enough to mix adds and deletes.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |modulo: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) % modulo
        };

        for _ in 0..500 {
            if next(4) == 0 && !state.transactions.is_empty() {
                let index = next(state.transactions.len() as u64) as usize;
                let id = state.transactions[index].id.clone();
                state = reduce(state, Action::DeleteTransaction(id));
            } else {
                let amount = cents(next(100_000) as i64 + 1);
                let from = CategoryId::from(ids[next(3) as usize]);
                let txn = match next(3) {
                    0 => Transaction::expense(from, amount),
                    1 => Transaction::income(from, amount),
                    _ => {
                        let to = CategoryId::from(ids[next(3) as usize]);
                        Transaction::transfer(from, to, amount)
                    }
                };
                state = reduce(state, Action::AddTransaction(txn));
            }

            let applied: Money = state.transactions.iter().map(|t| t.net_effect()).sum();
            assert_eq!(state.total_balance(), initial_total + applied);
        }
    }

    #[test]
    fn test_add_transaction_rejections() {
        let state = add(
            two_accounts(),
            Transaction::expense("A".into(), cents(100)).with_id("dup"),
        );

        let cases = [
            (
                Transaction::expense("A".into(), cents(1)).with_id("dup"),
                Rejection::DuplicateTransaction("dup".into()),
            ),
            (
                Transaction::expense("Z".into(), cents(1)).with_id("x1"),
                Rejection::UnknownCategory("Z".into()),
            ),
            (
                Transaction::transfer("A".into(), "Z".into(), cents(1)).with_id("x2"),
                Rejection::UnknownCategory("Z".into()),
            ),
            (
                Transaction::transfer("A".into(), "A".into(), cents(1)).with_id("x3"),
                Rejection::MalformedTransfer("x3".into()),
            ),
        ];

        for (txn, expected) in cases {
            let (next, outcome) = apply(state.clone(), Action::AddTransaction(txn));
            assert_eq!(outcome, Outcome::Ignored(expected));
            assert_eq!(next, state);
        }

        let mut stray = Transaction::expense("A".into(), cents(1)).with_id("x4");
        stray.to_category_id = Some("B".into());
        let (next, outcome) = apply(state.clone(), Action::AddTransaction(stray));
        assert_eq!(outcome, Outcome::Ignored(Rejection::MalformedTransfer("x4".into())));
        assert_eq!(next, state);
    }

    #[test]
    fn test_delete_missing_transaction_is_noop() {
        let state = two_accounts();
        let (next, outcome) = apply(state.clone(), Action::DeleteTransaction("nope".into()));
        assert!(!outcome.is_applied());
        assert_eq!(next, state);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut state = two_accounts();
        state.categories[1].balance = Money::from_cents(Money::MAX_CENTS - 5);
        let txn = Transaction::transfer("A".into(), "B".into(), cents(10));
        let (next, outcome) = apply(state.clone(), Action::AddTransaction(txn));
        assert_eq!(outcome, Outcome::Ignored(Rejection::BalanceOverflow("B".into())));
        assert_eq!(next, state);

        let txn = Transaction::income("B".into(), cents(10));
        let (next, outcome) = apply(state.clone(), Action::AddTransaction(txn));
        assert_eq!(outcome, Outcome::Ignored(Rejection::BalanceOverflow("B".into())));
        assert_eq!(next, state);
    }

    #[test]
    fn test_balances_beyond_exact_range_are_rejected() {
        let state = two_accounts();
        let too_big = Money::from_cents(Money::MAX_CENTS + 1);

        let (next, outcome) = apply(
            state.clone(),
            Action::UpdateCategoryBalance {
                category_id: "A".into(),
                balance: too_big,
            },
        );
        assert_eq!(outcome, Outcome::Ignored(Rejection::BalanceOverflow("A".into())));
        assert_eq!(next, state);

        let (_, outcome) = apply(
            state.clone(),
            Action::AddCategory(Category::with_id("C", "Gamma").with_balance(-too_big)),
        );
        assert_eq!(outcome, Outcome::Ignored(Rejection::BalanceOverflow("C".into())));

        let (_, outcome) = apply(
            state.clone(),
            Action::UpdateCategory(Category::with_id("B", "Beta").with_balance(too_big)),
        );
        assert_eq!(outcome, Outcome::Ignored(Rejection::BalanceOverflow("B".into())));

        let at_cap = reduce(
            state,
            Action::UpdateCategoryBalance {
                category_id: "A".into(),
                balance: Money::from_cents(Money::MAX_CENTS),
            },
        );
        assert_eq!(balance(&at_cap, "A"), Money::MAX_CENTS);
    }

    #[test]
    fn test_balance_correction_breaks_conservation() {
        let state = two_accounts();
        let action = Action::UpdateCategoryBalance {
            category_id: "A".into(),
            balance: cents(123),
        };
        assert!(action.is_correction());
        assert!(!action.is_ledger_event());

        let next = reduce(state, action);
        assert_eq!(balance(&next, "A"), 123);
        assert!(next.transactions.is_empty());

        let (_, outcome) = apply(
            next,
            Action::UpdateCategoryBalance {
                category_id: "Z".into(),
                balance: cents(1),
            },
        );
        assert_eq!(outcome, Outcome::Ignored(Rejection::UnknownCategory("Z".into())));
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let mut state = two_accounts();
        state.categories.push(Category::with_id("C", "Gamma"));

        let next = reduce(
            state.clone(),
            Action::ReorderCategories(vec!["C".into(), "A".into(), "B".into()]),
        );
        assert_eq!(next.category_ids(), vec!["C".into(), "A".into(), "B".into()]);
        assert_eq!(next.total_balance(), state.total_balance());
        assert_eq!(balance(&next, "A"), 10000);

        for bad in [
            vec!["A".into(), "B".into()],
            vec!["A".into(), "A".into(), "B".into()],
            vec!["A".into(), "B".into(), "Z".into()],
            vec!["A".into(), "B".into(), "C".into(), "C".into()],
        ] {
            let (unchanged, outcome) = apply(state.clone(), Action::ReorderCategories(bad));
            assert_eq!(outcome, Outcome::Ignored(Rejection::NotAPermutation));
            assert_eq!(unchanged, state);
        }
    }

    #[test]
    fn test_add_and_update_category() {
        let state = two_accounts();

        let (state, outcome) = apply(state, Action::AddCategory(Category::with_id("C", "Gamma")));
        assert!(outcome.is_applied());
        assert_eq!(balance(&state, "C"), 0);

        let (state, outcome) =
            apply(state, Action::AddCategory(Category::with_id("C", "Other")));
        assert_eq!(outcome, Outcome::Ignored(Rejection::DuplicateCategory("C".into())));
        assert_eq!(state.category(&"C".into()).unwrap().name, "Gamma");

        let renamed = Category::with_id("A", "Renamed")
            .with_balance(cents(10000))
            .with_style("Plane", "text-blue-400");
        let state = reduce(state, Action::UpdateCategory(renamed.clone()));
        assert_eq!(state.category(&"A".into()), Some(&renamed));
        assert_eq!(state.categories[0].id.as_str(), "A");

        let (_, outcome) = apply(state, Action::UpdateCategory(Category::with_id("Z", "Ghost")));
        assert_eq!(outcome, Outcome::Ignored(Rejection::UnknownCategory("Z".into())));
    }

    #[test]
    fn test_delete_category_cascades() {
        let mut state = two_accounts();
        state.categories.push(Category::with_id("C", "Gamma"));
        let state = add(state, Transaction::expense("A".into(), cents(10)));
        let state = add(state, Transaction::transfer("B".into(), "A".into(), cents(20)));
        let state = add(state, Transaction::transfer("A".into(), "C".into(), cents(30)));
        let state = add(state, Transaction::income("C".into(), cents(40)).with_id("keep"));
        let b_before = balance(&state, "B");

        let state = reduce(state, Action::DeleteCategory("A".into()));
        assert!(!state.has_category(&"A".into()));
        assert!(state
            .transactions
            .iter()
            .all(|t| !t.references_category(&"A".into())));
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transactions[0].id.as_str(), "keep");
        // Counterpart balances keep the effects of the removed history.
        assert_eq!(balance(&state, "B"), b_before);
    }

    #[test]
    fn test_participant_add_is_idempotent() {
        let state = two_accounts();
        let state = reduce(state, Action::AddParticipant("Nadia".into()));
        let (next, outcome) = apply(state.clone(), Action::AddParticipant("Nadia".into()));
        assert_eq!(outcome, Outcome::Ignored(Rejection::ParticipantExists("Nadia".into())));
        assert_eq!(next, state);
        assert_eq!(next.participants.iter().filter(|p| *p == "Nadia").count(), 1);
    }

    #[test]
    fn test_legacy_sentinel_spelling_is_not_a_new_participant() {
        let state = two_accounts();
        let (next, outcome) = apply(state.clone(), Action::AddParticipant("Общие".into()));
        assert_eq!(outcome, Outcome::Ignored(Rejection::ParticipantExists("Shared".into())));
        assert_eq!(next, state);

        let state = add(
            state,
            Transaction::expense("A".into(), cents(5)).with_participant("Общие"),
        );
        assert_eq!(state.transactions[0].participant, SHARED_PARTICIPANT);

        let state = reduce(
            state,
            Action::UpdateParticipant {
                old_name: "Me".into(),
                new_name: "Общие".into(),
            },
        );
        assert_eq!(state.participants, vec![SHARED_PARTICIPANT.to_string()]);

        let (_, outcome) = apply(state, Action::DeleteParticipant("Общие".into()));
        assert_eq!(
            outcome,
            Outcome::Ignored(Rejection::ProtectedParticipant("Общие".into()))
        );
    }

    #[test]
    fn test_participant_rename_cascades() {
        let state = two_accounts();
        let state = add(state, Transaction::expense("A".into(), cents(1)).with_participant("Me"));
        let state = add(state, Transaction::expense("A".into(), cents(2)).with_participant("Me"));
        let state = add(state, Transaction::expense("B".into(), cents(3)));

        let old_count = state.participant_usage("Me");
        let new_before = state.participant_usage("Andrew");

        let state = reduce(
            state,
            Action::UpdateParticipant {
                old_name: "Me".into(),
                new_name: "Andrew".into(),
            },
        );
        assert_eq!(state.participant_usage("Me"), 0);
        assert_eq!(state.participant_usage("Andrew"), new_before + old_count);
        assert_eq!(state.transactions.len(), 3);
        assert_eq!(state.participants, vec!["Shared".to_string(), "Andrew".to_string()]);
    }

    #[test]
    fn test_participant_rename_onto_existing_merges() {
        let mut state = two_accounts();
        state.participants.push("Nadia".into());
        let state = add(state, Transaction::expense("A".into(), cents(1)).with_participant("Me"));

        let state = reduce(
            state,
            Action::UpdateParticipant {
                old_name: "Me".into(),
                new_name: "Nadia".into(),
            },
        );
        assert_eq!(state.participants, vec!["Shared".to_string(), "Nadia".to_string()]);
        assert_eq!(state.participant_usage("Nadia"), 1);
    }

    #[test]
    fn test_participant_rename_rejections() {
        let state = two_accounts();
        let (next, outcome) = apply(
            state.clone(),
            Action::UpdateParticipant {
                old_name: SHARED_PARTICIPANT.into(),
                new_name: "Everyone".into(),
            },
        );
        assert_eq!(
            outcome,
            Outcome::Ignored(Rejection::ProtectedParticipant("Shared".into()))
        );
        assert_eq!(next, state);

        let (_, outcome) = apply(
            state,
            Action::UpdateParticipant {
                old_name: "Ghost".into(),
                new_name: "Other".into(),
            },
        );
        assert_eq!(outcome, Outcome::Ignored(Rejection::UnknownParticipant("Ghost".into())));
    }

    #[test]
    fn test_participant_delete_absorbs_orphans() {
        let state = two_accounts();
        let state = add(state, Transaction::expense("A".into(), cents(1)).with_participant("Me"));
        let state = add(state, Transaction::income("B".into(), cents(2)).with_participant("Me"));
        let referencing: Vec<TransactionId> = state
            .transactions
            .iter()
            .filter(|t| t.participant == "Me")
            .map(|t| t.id.clone())
            .collect();

        let state = reduce(state, Action::DeleteParticipant("Me".into()));
        assert!(!state.participants.contains(&"Me".to_string()));
        for id in &referencing {
            assert_eq!(state.transaction(id).unwrap().participant, SHARED_PARTICIPANT);
        }

        let (next, outcome) = apply(state.clone(), Action::DeleteParticipant("Shared".into()));
        assert_eq!(
            outcome,
            Outcome::Ignored(Rejection::ProtectedParticipant("Shared".into()))
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_preferences() {
        let state = reduce(two_accounts(), Action::SetTheme(Theme::Mint));
        assert_eq!(state.theme, Theme::Mint);

        let state = reduce(state, Action::SetBottomNavOpacity(1.7));
        assert_eq!(state.bottom_nav_opacity, 1.0);

        let (state, outcome) = apply(state, Action::SetBottomNavOpacity(f64::NAN));
        assert_eq!(outcome, Outcome::Ignored(Rejection::InvalidOpacity));
        assert_eq!(state.bottom_nav_opacity, 1.0);
    }

    #[test]
    fn test_reset_keeps_theme() {
        let state = reduce(two_accounts(), Action::SetTheme(Theme::Paper));
        let state = add(state, Transaction::expense("A".into(), cents(5)));

        let state = reduce(state, Action::ResetState);
        let mut expected = AppState::seed();
        expected.theme = Theme::Paper;
        assert_eq!(state, expected);
        assert_eq!(state.bottom_nav_opacity, DEFAULT_BOTTOM_NAV_OPACITY);
    }

    #[test]
    fn test_replace_state_overwrites() {
        let state = add(two_accounts(), Transaction::expense("A".into(), cents(5)));
        let replacement = validate_state(AppState::seed()).unwrap();

        let next = reduce(state, Action::ReplaceState(replacement));
        assert_eq!(next, AppState::seed());
    }
}
