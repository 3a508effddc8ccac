//! Wire-facing shapes of the finance snapshot.
//!
//! [`FinanceSnapshot`] is what the store returns and accepts. Requests are
//! first decoded into the permissive `*Payload` types, where every optional
//! field may be missing or `null`, and then normalised with the documented
//! defaults before reaching the store.

use serde::{Deserialize, Serialize};

use super::category_map::CategoryMap;
use super::config::TenantContext;
use super::db_types::{
    AchievementRecord, CategoryRecord, CreateAchievement, CreateCategory, CreateGoal,
    CreateTransaction, GoalRecord, TransactionRecord,
};

pub const DEFAULT_EMOJI: &str = "💳";
pub const DEFAULT_SAVINGS_GOAL: i32 = 20;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSnapshot {
    pub balance: f64,
    pub initial_balance: f64,
    pub monthly_budget: f64,
    pub savings_goal: i32,
    pub transactions: Vec<TransactionEntry>,
    pub categories: CategoryMap<CategoryTotals>,
    pub goals: Vec<GoalEntry>,
    pub achievements: Vec<AchievementEntry>,
}

impl Default for FinanceSnapshot {
    fn default() -> Self {
        Self {
            balance: 0.0,
            initial_balance: 0.0,
            monthly_budget: 0.0,
            savings_goal: DEFAULT_SAVINGS_GOAL,
            transactions: Vec::new(),
            categories: CategoryMap::new(),
            goals: Vec::new(),
            achievements: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub emoji: String,
    pub description: String,
    pub date: String,
    pub original_text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    pub total: f64,
    pub count: i32,
    pub emoji: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalEntry {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementEntry {
    pub id: String,
    pub unlocked_at: Option<String>,
}

/// Counts of the rows written by a replace.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaceSummary {
    pub transactions: usize,
    pub categories: usize,
    pub goals: usize,
    pub achievements: usize,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    pub balance: Option<f64>,
    pub initial_balance: Option<f64>,
    pub monthly_budget: Option<f64>,
    pub savings_goal: Option<i32>,
    pub transactions: Option<Vec<TransactionPayload>>,
    pub categories: Option<CategoryMap<CategoryPayload>>,
    pub goals: Option<Vec<GoalPayload>>,
    pub achievements: Option<Vec<AchievementPayload>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub original_text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CategoryPayload {
    pub total: Option<f64>,
    pub count: Option<i32>,
    pub emoji: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GoalPayload {
    pub id: i64,
    pub name: String,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub deadline: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AchievementPayload {
    pub id: AchievementKey,
    pub unlocked_at: Option<String>,
}

/// Achievement ids are labels; clients sometimes send them as bare numbers.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum AchievementKey {
    Text(String),
    Number(serde_json::Number),
}

impl From<AchievementKey> for String {
    fn from(key: AchievementKey) -> Self {
        match key {
            AchievementKey::Text(text) => text,
            AchievementKey::Number(number) => number.to_string(),
        }
    }
}

impl From<SnapshotPayload> for FinanceSnapshot {
    fn from(payload: SnapshotPayload) -> Self {
        Self {
            balance: payload.balance.unwrap_or(0.0),
            initial_balance: payload.initial_balance.unwrap_or(0.0),
            monthly_budget: payload.monthly_budget.unwrap_or(0.0),
            savings_goal: payload.savings_goal.unwrap_or(DEFAULT_SAVINGS_GOAL),
            transactions: payload
                .transactions
                .unwrap_or_default()
                .into_iter()
                .map(TransactionEntry::from)
                .collect(),
            categories: payload
                .categories
                .unwrap_or_default()
                .into_iter()
                .map(|(name, totals)| (name, CategoryTotals::from(totals)))
                .collect(),
            goals: payload
                .goals
                .unwrap_or_default()
                .into_iter()
                .map(GoalEntry::from)
                .collect(),
            achievements: payload
                .achievements
                .unwrap_or_default()
                .into_iter()
                .map(AchievementEntry::from)
                .collect(),
        }
    }
}

impl From<TransactionPayload> for TransactionEntry {
    fn from(payload: TransactionPayload) -> Self {
        Self {
            id: payload.id,
            kind: payload.kind,
            amount: payload.amount,
            category: payload.category,
            emoji: payload.emoji.unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            description: payload.description.unwrap_or_default(),
            date: payload.date.unwrap_or_default(),
            original_text: payload.original_text.unwrap_or_default(),
        }
    }
}

impl From<CategoryPayload> for CategoryTotals {
    fn from(payload: CategoryPayload) -> Self {
        Self {
            total: payload.total.unwrap_or(0.0),
            count: payload.count.unwrap_or(0),
            emoji: payload.emoji.unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
        }
    }
}

impl From<GoalPayload> for GoalEntry {
    fn from(payload: GoalPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            target_amount: payload.target_amount.unwrap_or(0.0),
            current_amount: payload.current_amount.unwrap_or(0.0),
            deadline: payload.deadline,
        }
    }
}

impl From<AchievementPayload> for AchievementEntry {
    fn from(payload: AchievementPayload) -> Self {
        Self {
            id: payload.id.into(),
            unlocked_at: payload.unlocked_at,
        }
    }
}

impl From<TransactionRecord> for TransactionEntry {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            amount: record.amount,
            category: record.category,
            emoji: record.emoji,
            description: record.description,
            date: record.date,
            original_text: record.original_text,
        }
    }
}

impl From<CategoryRecord> for (String, CategoryTotals) {
    fn from(record: CategoryRecord) -> Self {
        (
            record.name,
            CategoryTotals {
                total: record.total,
                count: record.count,
                emoji: record.emoji,
            },
        )
    }
}

impl From<GoalRecord> for GoalEntry {
    fn from(record: GoalRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            target_amount: record.target_amount,
            current_amount: record.current_amount,
            deadline: record.deadline,
        }
    }
}

impl From<AchievementRecord> for AchievementEntry {
    fn from(record: AchievementRecord) -> Self {
        Self {
            id: record.achievement_id,
            unlocked_at: record.unlocked_at,
        }
    }
}

impl TransactionEntry {
    pub fn to_insertable(&self, tenant: TenantContext) -> CreateTransaction {
        CreateTransaction {
            user_id: tenant.user_id,
            id: self.id,
            kind: self.kind.clone(),
            amount: self.amount,
            category: self.category.clone(),
            emoji: self.emoji.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            original_text: self.original_text.clone(),
        }
    }
}

impl CategoryTotals {
    pub fn to_insertable(&self, tenant: TenantContext, name: &str) -> CreateCategory {
        CreateCategory {
            user_id: tenant.user_id,
            name: name.to_string(),
            total: self.total,
            count: self.count,
            emoji: self.emoji.clone(),
        }
    }
}

impl GoalEntry {
    pub fn to_insertable(&self, tenant: TenantContext) -> CreateGoal {
        CreateGoal {
            user_id: tenant.user_id,
            id: self.id,
            name: self.name.clone(),
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            deadline: self.deadline.clone(),
        }
    }
}

impl AchievementEntry {
    pub fn to_insertable(&self, tenant: TenantContext) -> CreateAchievement {
        CreateAchievement {
            user_id: tenant.user_id,
            achievement_id: self.id.clone(),
            unlocked_at: self.unlocked_at.clone(),
        }
    }
}
