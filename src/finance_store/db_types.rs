use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use crate::schema::achievements as AchievementsTable;
use crate::schema::categories as CategoriesTable;
use crate::schema::goals as GoalsTable;
use crate::schema::transactions as TransactionsTable;
use crate::schema::users as UsersTable;

#[derive(Serialize, Deserialize, Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = UsersTable)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserProfileRecord {
    pub id: i32,
    pub balance: f64,
    pub initial_balance: f64,
    pub monthly_budget: f64,
    pub savings_goal: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Insertable, Debug, Clone)]
#[diesel(table_name = UsersTable)]
pub struct CreateUserProfile {
    pub id: i32,
    pub balance: f64,
    pub initial_balance: f64,
    pub monthly_budget: f64,
    pub savings_goal: i32,
}

#[derive(Serialize, Deserialize, AsChangeset, Debug, Clone)]
#[diesel(table_name = UsersTable)]
pub struct UpdateUserProfile {
    pub balance: f64,
    pub initial_balance: f64,
    pub monthly_budget: f64,
    pub savings_goal: i32,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = TransactionsTable)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRecord {
    pub user_id: i32,
    pub id: i64,
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub emoji: String,
    pub description: String,
    pub date: String,
    pub original_text: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Insertable, Debug, Clone)]
#[diesel(table_name = TransactionsTable)]
pub struct CreateTransaction {
    pub user_id: i32,
    pub id: i64,
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub emoji: String,
    pub description: String,
    pub date: String,
    pub original_text: String,
}

#[derive(Serialize, Deserialize, Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = CategoriesTable)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryRecord {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub total: f64,
    pub count: i32,
    pub emoji: String,
}

#[derive(Serialize, Deserialize, Insertable, Debug, Clone)]
#[diesel(table_name = CategoriesTable)]
pub struct CreateCategory {
    pub user_id: i32,
    pub name: String,
    pub total: f64,
    pub count: i32,
    pub emoji: String,
}

#[derive(Serialize, Deserialize, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = GoalsTable)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalRecord {
    pub row_id: i32,
    pub user_id: i32,
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<String>,
    pub created_at: String,
}

// `None` deadlines are written as NULL rather than falling back to the column default.
#[derive(Serialize, Deserialize, Insertable, Debug, Clone)]
#[diesel(table_name = GoalsTable)]
#[diesel(treat_none_as_default_value = false)]
pub struct CreateGoal {
    pub user_id: i32,
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<String>,
}

#[derive(Serialize, Deserialize, Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = AchievementsTable)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AchievementRecord {
    pub id: i32,
    pub user_id: i32,
    pub achievement_id: String,
    pub unlocked_at: Option<String>,
}

#[derive(Serialize, Deserialize, Insertable, Debug, Clone)]
#[diesel(table_name = AchievementsTable)]
#[diesel(treat_none_as_default_value = false)]
pub struct CreateAchievement {
    pub user_id: i32,
    pub achievement_id: String,
    pub unlocked_at: Option<String>,
}
