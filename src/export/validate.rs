//! Import validation
//!
//! External payloads are checked all-or-nothing before they may replace the
//! ledger. The only way to obtain a [`ValidatedState`] is through the
//! functions in this module, so `Action::ReplaceState` can never carry an
//! unchecked snapshot.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{BudgetResult, HomeBudgetError};
use crate::models::participant::{canonical_name, is_shared};
use crate::models::state::DEFAULT_BOTTOM_NAV_OPACITY;
use crate::models::{AppState, Theme};

/// A snapshot that passed every shape and integrity check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedState(AppState);

impl ValidatedState {
    /// Borrow the validated snapshot
    pub fn as_state(&self) -> &AppState {
        &self.0
    }

    /// Take the validated snapshot
    pub fn into_inner(self) -> AppState {
        self.0
    }
}

/// Validate a JSON document
pub fn validate_json(text: &str) -> BudgetResult<ValidatedState> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| reject(format!("payload is not valid JSON: {}", e)))?;
    validate_value(value)
}

/// Validate a YAML document with the same shape as the JSON export
pub fn validate_yaml(text: &str) -> BudgetResult<ValidatedState> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)
        .map_err(|e| reject(format!("payload is not valid YAML: {}", e)))?;
    let value = serde_json::to_value(yaml)
        .map_err(|e| reject(format!("payload cannot be read as a snapshot: {}", e)))?;
    validate_value(value)
}

/// Validate an already parsed JSON value
pub fn validate_value(value: Value) -> BudgetResult<ValidatedState> {
    let Value::Object(mut object) = value else {
        return Err(reject("payload must be an object"));
    };

    let categories = take_array(&mut object, "categories")?;
    let transactions = take_array(&mut object, "transactions")?;
    let participants = take_array(&mut object, "participants")?;

    let theme = match object.remove("theme") {
        Some(Value::String(name)) => Theme::from(name),
        Some(_) => return Err(reject("`theme` must be a string")),
        None => return Err(reject("missing field `theme`")),
    };

    let bottom_nav_opacity = match object.remove("bottomNavOpacity") {
        None | Some(Value::Null) => DEFAULT_BOTTOM_NAV_OPACITY,
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| reject("`bottomNavOpacity` must be a number"))?,
        Some(_) => return Err(reject("`bottomNavOpacity` must be a number")),
    };

    let state = AppState {
        categories: decode_elements("categories", categories)?,
        transactions: decode_elements("transactions", transactions)?,
        participants: decode_elements("participants", participants)?,
        theme,
        bottom_nav_opacity,
    };

    validate_state(state)
}

/// Check the integrity of a typed snapshot
///
/// Legacy spellings of the sentinel participant are canonicalized first, and
/// a sentinel listed under both spellings collapses into one entry.
pub fn validate_state(mut state: AppState) -> BudgetResult<ValidatedState> {
    for name in state.participants.iter_mut() {
        *name = canonical_name(name).to_string();
    }
    let mut sentinel_seen = false;
    state
        .participants
        .retain(|name| !is_shared(name) || !std::mem::replace(&mut sentinel_seen, true));
    for txn in state.transactions.iter_mut() {
        txn.participant = canonical_name(&txn.participant).to_string();
    }

    check_categories(&state)?;
    check_participants(&state)?;
    check_transactions(&state)?;

    if !(0.0..=1.0).contains(&state.bottom_nav_opacity) {
        return Err(reject(format!(
            "`bottomNavOpacity` must be between 0 and 1, got {}",
            state.bottom_nav_opacity
        )));
    }

    Ok(ValidatedState(state))
}

fn check_categories(state: &AppState) -> BudgetResult<()> {
    let mut seen = HashSet::new();
    for (index, category) in state.categories.iter().enumerate() {
        category
            .validate()
            .map_err(|e| reject(format!("categories[{}]: {}", index, e)))?;
        if !category.balance.is_representable() {
            return Err(reject(format!(
                "categories[{}]: balance {} is out of range",
                index, category.balance
            )));
        }
        if !seen.insert(&category.id) {
            return Err(reject(format!("duplicate category id {}", category.id)));
        }
    }
    Ok(())
}

fn check_participants(state: &AppState) -> BudgetResult<()> {
    let mut seen = HashSet::new();
    for (index, name) in state.participants.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(reject(format!("participants[{}]: name cannot be empty", index)));
        }
        if !seen.insert(name.as_str()) {
            return Err(reject(format!("duplicate participant {}", name)));
        }
    }
    Ok(())
}

fn check_transactions(state: &AppState) -> BudgetResult<()> {
    let mut seen = HashSet::new();
    for (index, txn) in state.transactions.iter().enumerate() {
        txn.validate()
            .map_err(|e| reject(format!("transactions[{}]: {}", index, e)))?;

        if !txn.amount.is_representable() {
            return Err(reject(format!(
                "transactions[{}]: amount {} is out of range",
                index, txn.amount
            )));
        }
        if !seen.insert(&txn.id) {
            return Err(reject(format!("duplicate transaction id {}", txn.id)));
        }

        if !state.has_category(&txn.category_id) {
            return Err(reject(format!(
                "transaction {} references unknown category {}",
                txn.id, txn.category_id
            )));
        }

        if let Some(to) = &txn.to_category_id {
            if !state.has_category(to) {
                return Err(reject(format!(
                    "transaction {} references unknown category {}",
                    txn.id, to
                )));
            }
        }

        if !state.has_participant(&txn.participant) {
            return Err(reject(format!(
                "transaction {} references unknown participant {}",
                txn.id, txn.participant
            )));
        }
    }
    Ok(())
}

fn take_array(object: &mut Map<String, Value>, field: &str) -> BudgetResult<Vec<Value>> {
    match object.remove(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(reject(format!("`{}` must be an array", field))),
        None => Err(reject(format!("missing field `{}`", field))),
    }
}

fn decode_elements<T: DeserializeOwned>(field: &str, items: Vec<Value>) -> BudgetResult<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| reject(format!("{}[{}]: {}", field, index, e)))
        })
        .collect()
}

fn reject(reason: impl Into<String>) -> HomeBudgetError {
    HomeBudgetError::Import(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, SHARED_PARTICIPANT};
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "categories": [
                { "id": "1", "name": "Cash", "balance": 100.5, "icon": "Banknote", "color": "text-green-500", "type": "Personal" },
                { "id": "2", "name": "Groceries", "balance": 0, "icon": "ShoppingCart", "color": "", "type": "Expenses" }
            ],
            "transactions": [
                { "id": "t1", "categoryId": "1", "toCategoryId": "2", "amount": 10, "type": "Transfer",
                  "participant": "Me", "note": "", "date": "2025-01-15T10:00:00.000Z" },
                { "id": "t2", "categoryId": "1", "amount": -5.25, "type": "Income",
                  "participant": "Shared", "note": "refund", "date": "2025-01-16T10:00:00Z" }
            ],
            "participants": ["Shared", "Me"],
            "theme": "Ocean",
            "bottomNavOpacity": 0.5
        })
    }

    fn reason(result: BudgetResult<ValidatedState>) -> String {
        match result {
            Err(HomeBudgetError::Import(reason)) => reason,
            other => panic!("expected an import rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_valid_payload() {
        let validated = validate_value(valid_payload()).unwrap();
        let state = validated.as_state();
        assert_eq!(state.categories.len(), 2);
        assert_eq!(state.categories[0].balance, Money::from_cents(10050));
        assert_eq!(state.transactions[1].amount, Money::from_cents(-525));
        assert_eq!(state.theme, Theme::Ocean);
        assert_eq!(state.bottom_nav_opacity, 0.5);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(reason(validate_json("[1, 2]")).contains("object"));
        assert!(reason(validate_json("not json")).contains("not valid JSON"));
    }

    #[test]
    fn test_rejects_wrong_container_types() {
        let mut payload = valid_payload();
        payload["categories"] = json!({});
        assert!(reason(validate_value(payload)).contains("`categories` must be an array"));

        let mut payload = valid_payload();
        payload["theme"] = json!(3);
        assert!(reason(validate_value(payload)).contains("`theme` must be a string"));

        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("participants");
        assert!(reason(validate_value(payload)).contains("missing field `participants`"));
    }

    #[test]
    fn test_rejection_names_failing_element() {
        let mut payload = valid_payload();
        payload["transactions"][1]["amount"] = json!("lots");
        assert!(reason(validate_value(payload)).starts_with("transactions[1]"));

        let mut payload = valid_payload();
        payload["participants"][1] = json!(42);
        assert!(reason(validate_value(payload)).starts_with("participants[1]"));
    }

    #[test]
    fn test_rejects_dangling_references() {
        let mut payload = valid_payload();
        payload["transactions"][0]["toCategoryId"] = json!("404");
        assert!(reason(validate_value(payload)).contains("unknown category 404"));

        let mut payload = valid_payload();
        payload["transactions"][0]["participant"] = json!("Stranger");
        assert!(reason(validate_value(payload)).contains("unknown participant Stranger"));
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut payload = valid_payload();
        payload["categories"][1]["id"] = json!("1");
        assert!(reason(validate_value(payload)).contains("duplicate category id 1"));

        let mut payload = valid_payload();
        payload["transactions"][1]["id"] = json!("t1");
        assert!(reason(validate_value(payload)).contains("duplicate transaction id t1"));

        let mut payload = valid_payload();
        payload["participants"] = json!(["Shared", "Me", "Me"]);
        assert!(reason(validate_value(payload)).contains("duplicate participant Me"));
    }

    #[test]
    fn test_rejects_wrong_sign_and_bad_transfers() {
        let mut payload = valid_payload();
        payload["transactions"][1]["amount"] = json!(5.25);
        assert!(reason(validate_value(payload)).contains("wrong sign"));

        let mut payload = valid_payload();
        payload["transactions"][0]["toCategoryId"] = json!("1");
        assert!(reason(validate_value(payload)).contains("must differ"));

        let mut payload = valid_payload();
        payload["transactions"][1]["toCategoryId"] = json!("2");
        assert!(reason(validate_value(payload)).contains("Only transfers"));
    }

    #[test]
    fn test_canonicalizes_legacy_sentinel() {
        let mut payload = valid_payload();
        payload["participants"] = json!(["Общие", "Me"]);
        payload["transactions"][1]["participant"] = json!("Общие");

        let state = validate_value(payload).unwrap().into_inner();
        assert_eq!(state.participants[0], SHARED_PARTICIPANT);
        assert_eq!(state.transactions[1].participant, SHARED_PARTICIPANT);
    }

    #[test]
    fn test_both_sentinel_spellings_merge() {
        let mut payload = valid_payload();
        payload["participants"] = json!(["Shared", "Me", "Общие"]);
        payload["transactions"][1]["participant"] = json!("Общие");

        let state = validate_value(payload).unwrap().into_inner();
        assert_eq!(state.participants, vec![SHARED_PARTICIPANT.to_string(), "Me".to_string()]);
        assert_eq!(state.transactions[1].participant, SHARED_PARTICIPANT);

        let mut payload = valid_payload();
        payload["participants"] = json!(["Shared", "Me", "Me"]);
        assert!(reason(validate_value(payload)).contains("duplicate participant Me"));
    }

    #[test]
    fn test_out_of_range_balance_is_rejected() {
        let mut state = AppState::seed();
        state.categories[0].balance = Money::from_cents(Money::MAX_CENTS + 1);
        let error = validate_state(state).unwrap_err();
        assert!(error.to_string().contains("out of range"));
    }

    #[test]
    fn test_missing_opacity_gets_default() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("bottomNavOpacity");
        let state = validate_value(payload).unwrap().into_inner();
        assert_eq!(state.bottom_nav_opacity, DEFAULT_BOTTOM_NAV_OPACITY);

        let mut payload = valid_payload();
        payload["bottomNavOpacity"] = json!(3.0);
        assert!(reason(validate_value(payload)).contains("bottomNavOpacity"));
    }

    #[test]
    fn test_yaml_input() {
        let yaml = r#"
categories:
  - id: "1"
    name: Cash
    balance: 12.5
transactions: []
participants: [Shared]
theme: Mint
"#;
        let state = validate_yaml(yaml).unwrap().into_inner();
        assert_eq!(state.categories[0].balance, Money::from_cents(1250));
        assert_eq!(state.theme, Theme::Mint);

        assert!(reason(validate_yaml("- just\n- a list\n")).contains("object"));
    }

    #[test]
    fn test_seed_is_valid() {
        assert_eq!(
            validate_state(AppState::seed()).unwrap().into_inner(),
            AppState::seed()
        );
    }
}
