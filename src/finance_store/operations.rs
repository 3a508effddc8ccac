use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::finance_store::config::TenantContext;
use crate::finance_store::db_types::{
    AchievementRecord, CategoryRecord, CreateAchievement, CreateCategory, CreateGoal,
    CreateTransaction, CreateUserProfile, GoalRecord, TransactionRecord, UpdateUserProfile,
    UserProfileRecord,
};
use crate::finance_store::error::StoreError;
use crate::finance_store::models::{
    AchievementEntry, CategoryTotals, DEFAULT_SAVINGS_GOAL, FinanceSnapshot, GoalEntry,
    ReplaceSummary, TransactionEntry,
};
use crate::schema::achievements::table as AchievementsTable;
use crate::schema::categories::table as CategoriesTable;
use crate::schema::goals::table as GoalsTable;
use crate::schema::transactions::table as TransactionsTable;
use crate::schema::users::table as UsersTable;
use crate::utils::db::run_migrations;

/// Creates the schema if needed and makes sure the tenant's profile row
/// exists. Running it against an already initialized database changes nothing.
pub fn initialize(conn: &mut SqliteConnection, tenant: TenantContext) -> Result<(), StoreError> {
    run_migrations(conn)?;

    let inserted = diesel::insert_or_ignore_into(UsersTable)
        .values(&zeroed_profile(tenant))
        .execute(conn)?;

    if inserted > 0 {
        tracing::info!(tenant = tenant.user_id, "Created default user profile");
    }

    Ok(())
}

pub fn fetch_all(
    conn: &mut SqliteConnection,
    tenant: TenantContext,
) -> Result<FinanceSnapshot, StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let profile = get_profile(conn, tenant)?;

        let transactions = {
            use crate::schema::transactions::dsl::*;

            TransactionsTable
                .filter(user_id.eq(tenant.user_id))
                .order(id.desc())
                .select(TransactionRecord::as_select())
                .load::<TransactionRecord>(conn)?
        };

        let categories = {
            use crate::schema::categories::dsl::*;

            CategoriesTable
                .filter(user_id.eq(tenant.user_id))
                .order(id.asc())
                .select(CategoryRecord::as_select())
                .load::<CategoryRecord>(conn)?
        };

        let goals = {
            use crate::schema::goals::dsl::*;

            GoalsTable
                .filter(user_id.eq(tenant.user_id))
                .order(row_id.asc())
                .select(GoalRecord::as_select())
                .load::<GoalRecord>(conn)?
        };

        let achievements = {
            use crate::schema::achievements::dsl::*;

            AchievementsTable
                .filter(user_id.eq(tenant.user_id))
                .order(id.asc())
                .select(AchievementRecord::as_select())
                .load::<AchievementRecord>(conn)?
        };

        let mut snapshot = FinanceSnapshot::default();
        if let Some(profile) = profile {
            snapshot.balance = profile.balance;
            snapshot.initial_balance = profile.initial_balance;
            snapshot.monthly_budget = profile.monthly_budget;
            snapshot.savings_goal = profile.savings_goal;
        }
        snapshot.transactions = transactions.into_iter().map(TransactionEntry::from).collect();
        snapshot.categories = categories.into_iter().map(<(String, CategoryTotals)>::from).collect();
        snapshot.goals = goals.into_iter().map(GoalEntry::from).collect();
        snapshot.achievements = achievements.into_iter().map(AchievementEntry::from).collect();

        Ok(snapshot)
    })
}

/// Makes `snapshot` the tenant's entire state. Every collection is cleared
/// and re-inserted inside one write transaction; on any error nothing changes.
pub fn replace_all(
    conn: &mut SqliteConnection,
    tenant: TenantContext,
    snapshot: &FinanceSnapshot,
) -> Result<ReplaceSummary, StoreError> {
    conn.immediate_transaction::<_, StoreError, _>(|conn| {
        write_profile(
            conn,
            tenant,
            UpdateUserProfile {
                balance: snapshot.balance,
                initial_balance: snapshot.initial_balance,
                monthly_budget: snapshot.monthly_budget,
                savings_goal: snapshot.savings_goal,
                updated_at: now_timestamp(),
            },
        )?;

        clear_collections(conn, tenant)?;

        let new_transactions = snapshot
            .transactions
            .iter()
            .map(|entry| entry.to_insertable(tenant))
            .collect::<Vec<CreateTransaction>>();
        let new_categories = snapshot
            .categories
            .iter()
            .map(|(name, totals)| totals.to_insertable(tenant, name))
            .collect::<Vec<CreateCategory>>();
        let new_goals = snapshot
            .goals
            .iter()
            .map(|entry| entry.to_insertable(tenant))
            .collect::<Vec<CreateGoal>>();
        let new_achievements = snapshot
            .achievements
            .iter()
            .map(|entry| entry.to_insertable(tenant))
            .collect::<Vec<CreateAchievement>>();

        // An empty batch runs no statement, and its reported row count would
        // be whatever the previous insert changed.
        let mut summary = ReplaceSummary::default();
        if !new_transactions.is_empty() {
            summary.transactions = diesel::insert_into(TransactionsTable)
                .values(&new_transactions)
                .execute(conn)?;
        }
        if !new_categories.is_empty() {
            summary.categories = diesel::insert_into(CategoriesTable)
                .values(&new_categories)
                .execute(conn)?;
        }
        if !new_goals.is_empty() {
            summary.goals = diesel::insert_into(GoalsTable)
                .values(&new_goals)
                .execute(conn)?;
        }
        if !new_achievements.is_empty() {
            summary.achievements = diesel::insert_into(AchievementsTable)
                .values(&new_achievements)
                .execute(conn)?;
        }

        Ok(summary)
    })
}

pub fn reset_all(conn: &mut SqliteConnection, tenant: TenantContext) -> Result<(), StoreError> {
    conn.immediate_transaction::<_, StoreError, _>(|conn| {
        clear_collections(conn, tenant)?;

        write_profile(
            conn,
            tenant,
            UpdateUserProfile {
                balance: 0.0,
                initial_balance: 0.0,
                monthly_budget: 0.0,
                savings_goal: DEFAULT_SAVINGS_GOAL,
                updated_at: now_timestamp(),
            },
        )?;

        Ok(())
    })
}

pub fn get_profile(
    conn: &mut SqliteConnection,
    tenant: TenantContext,
) -> Result<Option<UserProfileRecord>, StoreError> {
    let profile = UsersTable
        .find(tenant.user_id)
        .select(UserProfileRecord::as_select())
        .first::<UserProfileRecord>(conn)
        .optional()?;

    Ok(profile)
}

fn write_profile(
    conn: &mut SqliteConnection,
    tenant: TenantContext,
    changes: UpdateUserProfile,
) -> Result<(), StoreError> {
    let updated = diesel::update(UsersTable.find(tenant.user_id))
        .set(&changes)
        .execute(conn)?;

    // The profile only goes missing if the row was removed behind the store's back.
    if updated == 0 {
        tracing::warn!(tenant = tenant.user_id, "User profile missing, recreating it");
        diesel::insert_into(UsersTable)
            .values(&CreateUserProfile {
                id: tenant.user_id,
                balance: changes.balance,
                initial_balance: changes.initial_balance,
                monthly_budget: changes.monthly_budget,
                savings_goal: changes.savings_goal,
            })
            .execute(conn)?;
    }

    Ok(())
}

fn clear_collections(conn: &mut SqliteConnection, tenant: TenantContext) -> Result<(), StoreError> {
    {
        use crate::schema::transactions::dsl::*;
        diesel::delete(TransactionsTable.filter(user_id.eq(tenant.user_id))).execute(conn)?;
    }
    {
        use crate::schema::categories::dsl::*;
        diesel::delete(CategoriesTable.filter(user_id.eq(tenant.user_id))).execute(conn)?;
    }
    {
        use crate::schema::goals::dsl::*;
        diesel::delete(GoalsTable.filter(user_id.eq(tenant.user_id))).execute(conn)?;
    }
    {
        use crate::schema::achievements::dsl::*;
        diesel::delete(AchievementsTable.filter(user_id.eq(tenant.user_id))).execute(conn)?;
    }

    Ok(())
}

fn zeroed_profile(tenant: TenantContext) -> CreateUserProfile {
    CreateUserProfile {
        id: tenant.user_id,
        balance: 0.0,
        initial_balance: 0.0,
        monthly_budget: 0.0,
        savings_goal: DEFAULT_SAVINGS_GOAL,
    }
}

fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::Connection;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, SqliteConnection) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finance.db");
        let mut conn = SqliteConnection::establish(path.to_str().unwrap()).unwrap();
        initialize(&mut conn, TenantContext::default()).unwrap();
        (dir, conn)
    }

    fn transaction(id: i64, kind: &str, amount: f64, category: &str) -> TransactionEntry {
        TransactionEntry {
            id,
            kind: kind.to_string(),
            amount,
            category: category.to_string(),
            emoji: "💳".to_string(),
            description: String::new(),
            date: "2024-05-01".to_string(),
            original_text: String::new(),
        }
    }

    fn sample_snapshot() -> FinanceSnapshot {
        let mut snapshot = FinanceSnapshot {
            balance: 1250.5,
            initial_balance: 1000.0,
            monthly_budget: 800.0,
            savings_goal: 25,
            ..FinanceSnapshot::default()
        };
        snapshot.transactions = vec![
            transaction(1714600000002, "expense", 49.5, "Food"),
            transaction(1714600000001, "income", 300.0, "Salary"),
        ];
        snapshot.categories.insert(
            "Food".to_string(),
            CategoryTotals { total: 49.5, count: 1, emoji: "🍔".to_string() },
        );
        snapshot.goals = vec![
            GoalEntry {
                id: 20,
                name: "Laptop".to_string(),
                target_amount: 1500.0,
                current_amount: 200.0,
                deadline: Some("2024-12-31".to_string()),
            },
            GoalEntry {
                id: 10,
                name: "Trip".to_string(),
                target_amount: 900.0,
                current_amount: 0.0,
                deadline: None,
            },
        ];
        snapshot.achievements = vec![AchievementEntry {
            id: "first_transaction".to_string(),
            unlocked_at: Some("2024-05-01T09:00:00Z".to_string()),
        }];
        snapshot
    }

    #[test]
    fn test_fresh_store_returns_defaults() {
        let (_dir, mut conn) = open_store();
        let snapshot = fetch_all(&mut conn, TenantContext::default()).unwrap();
        assert_eq!(snapshot, FinanceSnapshot::default());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();
        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();

        initialize(&mut conn, tenant).unwrap();
        initialize(&mut conn, tenant).unwrap();

        assert_eq!(fetch_all(&mut conn, tenant).unwrap(), sample_snapshot());
    }

    #[test]
    fn test_replace_then_fetch_round_trips() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();

        let summary = replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();
        assert_eq!(summary.transactions, 2);
        assert_eq!(summary.categories, 1);
        assert_eq!(summary.goals, 2);
        assert_eq!(summary.achievements, 1);

        assert_eq!(fetch_all(&mut conn, tenant).unwrap(), sample_snapshot());
    }

    #[test]
    fn test_transactions_are_returned_newest_id_first() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();
        let snapshot = FinanceSnapshot {
            transactions: vec![
                transaction(3, "expense", 1.0, "A"),
                transaction(9, "expense", 2.0, "B"),
                transaction(5, "income", 3.0, "C"),
            ],
            ..FinanceSnapshot::default()
        };

        replace_all(&mut conn, tenant, &snapshot).unwrap();
        let ids = fetch_all(&mut conn, tenant)
            .unwrap()
            .transactions
            .iter()
            .map(|t| t.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![9, 5, 3]);
    }

    #[test]
    fn test_replace_does_not_merge() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();

        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();

        let second = FinanceSnapshot {
            transactions: vec![transaction(77, "expense", 12.0, "Transport")],
            ..FinanceSnapshot::default()
        };
        replace_all(&mut conn, tenant, &second).unwrap();

        let stored = fetch_all(&mut conn, tenant).unwrap();
        assert_eq!(stored.transactions, second.transactions);
        assert!(stored.categories.is_empty());
        assert!(stored.goals.is_empty());
        assert!(stored.achievements.is_empty());
    }

    #[test]
    fn test_failed_replace_keeps_previous_state() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();
        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();

        // The second row violates the (user_id, id) key after the old rows were deleted.
        let broken = FinanceSnapshot {
            balance: 5.0,
            transactions: vec![
                transaction(1, "expense", 1.0, "A"),
                transaction(1, "expense", 2.0, "B"),
            ],
            ..FinanceSnapshot::default()
        };
        let err = replace_all(&mut conn, tenant, &broken).unwrap_err();
        assert!(err.to_string().contains("UNIQUE"));

        assert_eq!(fetch_all(&mut conn, tenant).unwrap(), sample_snapshot());
    }

    #[test]
    fn test_duplicate_achievement_rejected() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();
        let unlocked = AchievementEntry { id: "streak".to_string(), unlocked_at: None };
        let snapshot = FinanceSnapshot {
            achievements: vec![unlocked.clone(), unlocked],
            ..FinanceSnapshot::default()
        };

        assert!(replace_all(&mut conn, tenant, &snapshot).is_err());
        assert!(fetch_all(&mut conn, tenant).unwrap().achievements.is_empty());
    }

    #[test]
    fn test_category_rows_are_unique_per_name() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();
        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();
        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();

        use crate::schema::categories::dsl::*;
        let rows = CategoriesTable
            .filter(user_id.eq(tenant.user_id))
            .filter(name.eq("Food"))
            .count()
            .get_result::<i64>(&mut conn)
            .unwrap();
        assert_eq!(rows, 1);

        let duplicate = diesel::insert_into(CategoriesTable)
            .values(&CreateCategory {
                user_id: tenant.user_id,
                name: "Food".to_string(),
                total: 1.0,
                count: 1,
                emoji: "🍔".to_string(),
            })
            .execute(&mut conn);
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_reset_twice_yields_zeroed_state() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();
        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();

        reset_all(&mut conn, tenant).unwrap();
        let first = fetch_all(&mut conn, tenant).unwrap();
        reset_all(&mut conn, tenant).unwrap();
        let second = fetch_all(&mut conn, tenant).unwrap();

        assert_eq!(first, FinanceSnapshot::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_profile_defaults_on_read_and_is_recreated_on_save() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::new(2);

        let snapshot = fetch_all(&mut conn, tenant).unwrap();
        assert_eq!(snapshot.savings_goal, DEFAULT_SAVINGS_GOAL);
        assert_eq!(snapshot.balance, 0.0);

        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();
        assert!(get_profile(&mut conn, tenant).unwrap().is_some());
        assert_eq!(fetch_all(&mut conn, tenant).unwrap(), sample_snapshot());
    }

    #[test]
    fn test_tenants_are_isolated() {
        let (_dir, mut conn) = open_store();
        let first = TenantContext::default();
        let second = TenantContext::new(2);
        initialize(&mut conn, second).unwrap();

        replace_all(&mut conn, first, &sample_snapshot()).unwrap();
        reset_all(&mut conn, second).unwrap();

        assert_eq!(fetch_all(&mut conn, first).unwrap(), sample_snapshot());
        assert_eq!(fetch_all(&mut conn, second).unwrap(), FinanceSnapshot::default());
    }

    #[test]
    fn test_replace_refreshes_profile_timestamp() {
        use crate::schema::users::dsl::*;

        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();
        diesel::update(UsersTable.find(tenant.user_id))
            .set(updated_at.eq("2000-01-01 00:00:00"))
            .execute(&mut conn)
            .unwrap();
        let before = get_profile(&mut conn, tenant).unwrap().unwrap();

        replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();

        let after = get_profile(&mut conn, tenant).unwrap().unwrap();
        assert_eq!(after.created_at, before.created_at);
        assert_ne!(after.updated_at, "2000-01-01 00:00:00");
    }

    #[test]
    fn test_summary_counts_only_submitted_rows() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();

        let mut snapshot = FinanceSnapshot::default();
        for (name, total) in [("Rent", 800.0), ("Food", 120.0), ("Bills", 60.0)] {
            snapshot.categories.insert(
                name.to_string(),
                CategoryTotals { total, count: 1, emoji: "💳".to_string() },
            );
        }

        let summary = replace_all(&mut conn, tenant, &snapshot).unwrap();
        assert_eq!(
            summary,
            ReplaceSummary { transactions: 0, categories: 3, goals: 0, achievements: 0 }
        );

        let summary = replace_all(&mut conn, tenant, &sample_snapshot()).unwrap();
        assert_eq!(
            summary,
            ReplaceSummary { transactions: 2, categories: 1, goals: 2, achievements: 1 }
        );
    }

    #[test]
    fn test_categories_come_back_in_submitted_order() {
        let (_dir, mut conn) = open_store();
        let tenant = TenantContext::default();

        let mut snapshot = FinanceSnapshot::default();
        for name in ["Transport", "Food", "Bills"] {
            snapshot.categories.insert(
                name.to_string(),
                CategoryTotals { total: 1.0, count: 1, emoji: "💳".to_string() },
            );
        }
        replace_all(&mut conn, tenant, &snapshot).unwrap();

        let stored = fetch_all(&mut conn, tenant).unwrap();
        assert_eq!(
            stored.categories.keys().collect::<Vec<_>>(),
            vec!["Transport", "Food", "Bills"]
        );
    }
}
