use serde::{Deserialize, Serialize};

/// Identifies the profile row a store operation is scoped to. The tracker is
/// single-user, so every process works against one tenant for its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub user_id: i32,
}

impl TenantContext {
    pub const DEFAULT_USER_ID: i32 = 1;

    pub fn new(user_id: i32) -> Self {
        Self { user_id }
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_USER_ID)
    }
}
