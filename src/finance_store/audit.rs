//! Category drift report.
//!
//! Category totals are computed by the client and stored verbatim. This
//! module recomputes them from the stored transactions so an operator can see
//! where the two disagree. It never writes anything back.

use std::collections::BTreeMap;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use super::models::FinanceSnapshot;

/// Amounts are compared at cent precision.
const CURRENCY_SCALE: i64 = 2;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryDrift {
    pub name: String,
    pub stored_total: Option<BigDecimal>,
    pub stored_count: Option<i32>,
    pub computed_total: BigDecimal,
    pub computed_count: i32,
}

impl CategoryDrift {
    pub fn total_difference(&self) -> BigDecimal {
        let stored = self.stored_total.clone().unwrap_or_else(BigDecimal::zero);
        &stored - &self.computed_total
    }
}

/// Compares every stored category against the sum of matching transactions.
/// `kind` restricts the recomputation to one transaction type (e.g.
/// `"expense"`); `None` counts every transaction.
pub fn audit_categories(snapshot: &FinanceSnapshot, kind: Option<&str>) -> Vec<CategoryDrift> {
    let mut computed: BTreeMap<&str, (BigDecimal, i32)> = BTreeMap::new();

    for transaction in &snapshot.transactions {
        if kind.is_some_and(|wanted| transaction.kind != wanted) {
            continue;
        }
        let entry = computed
            .entry(transaction.category.as_str())
            .or_insert_with(|| (BigDecimal::zero(), 0));
        entry.0 += to_currency(transaction.amount);
        entry.1 += 1;
    }

    let mut names = snapshot
        .categories
        .keys()
        .map(String::as_str)
        .chain(computed.keys().copied())
        .collect::<Vec<_>>();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .filter_map(|name| {
            let stored = snapshot.categories.get(name);
            let (computed_total, computed_count) = computed
                .get(name)
                .cloned()
                .unwrap_or_else(|| (BigDecimal::zero(), 0));
            let stored_total = stored.map(|totals| to_currency(totals.total));
            let stored_count = stored.map(|totals| totals.count);

            let matches = stored_total.as_ref() == Some(&computed_total.round(CURRENCY_SCALE))
                && stored_count == Some(computed_count);
            if matches {
                return None;
            }

            Some(CategoryDrift {
                name: name.to_string(),
                stored_total,
                stored_count,
                computed_total: computed_total.round(CURRENCY_SCALE),
                computed_count,
            })
        })
        .collect()
}

/// Goes through the shortest decimal rendering of the float so `0.1` stays
/// `0.1` instead of its binary expansion.
fn to_currency(amount: f64) -> BigDecimal {
    BigDecimal::from_str(&amount.to_string())
        .unwrap_or_else(|_| BigDecimal::zero())
        .round(CURRENCY_SCALE)
}
