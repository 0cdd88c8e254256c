use serde::{Deserialize, Serialize};

pub mod date;
pub mod token;

pub use date::Timestamp;
pub use token::{Claims, MalformedTokenError};

// =========================================================
// Roles
// =========================================================

/// Admin role hierarchy: `Viewer < Admin < SuperAdmin`.
///
/// Roles gate destructive actions in the console UI only; the server
/// re-enforces every rule independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Viewer,
    Admin,
    SuperAdmin,
    /// Any role string this build does not know about.
    #[serde(other)]
    Unknown,
}

impl Default for AdminRole {
    fn default() -> Self {
        AdminRole::Unknown
    }
}

impl AdminRole {
    /// Position in the hierarchy. `Unknown` ranks below everything.
    pub fn rank(&self) -> u8 {
        match self {
            AdminRole::Unknown => 0,
            AdminRole::Viewer => 1,
            AdminRole::Admin => 2,
            AdminRole::SuperAdmin => 3,
        }
    }

    pub fn can_delete_users(&self) -> bool {
        self.rank() >= AdminRole::Admin.rank()
    }

    pub fn can_manage_admins(&self) -> bool {
        self.rank() >= AdminRole::Admin.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Viewer => "viewer",
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Unknown => "unknown",
        }
    }
}

// =========================================================
// Wire models (owned by the server, read-only here)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: AdminRole,
    /// RFC 3339 string, absent when the admin never logged in.
    #[serde(default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub field: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub username: String,
    #[serde(default)]
    pub role: AdminRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListResponse {
    pub admins: Vec<AdminRecord>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    pub role: AdminRole,
}

// =========================================================
// Dashboard statistics
// =========================================================

/// Activity counters over the trailing 24h / 7d / 30d windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBuckets {
    #[serde(default)]
    pub last_24h: u64,
    #[serde(default)]
    pub last_7d: u64,
    #[serde(default)]
    pub last_30d: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStat {
    pub field_name: String,
    #[serde(default)]
    pub user_count: u64,
    #[serde(default)]
    pub cv_count: u64,
    /// 0.0..=1.0, rendered as a percentage.
    #[serde(default)]
    pub average_match_score: f64,
}

/// Precomputed statistics from `GET /auth/admin/dashboard`.
///
/// Every field defaults so a partial payload still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users_24h: u64,
    #[serde(default)]
    pub total_cvs_analyzed: u64,
    #[serde(default)]
    pub successful_analyses: u64,
    #[serde(default)]
    pub failed_analyses: u64,
    /// Seconds.
    #[serde(default)]
    pub average_processing_time: f64,
    #[serde(default)]
    pub cv_analyses_over_time: TimeBuckets,
    #[serde(default)]
    pub user_registrations_over_time: TimeBuckets,
    #[serde(default)]
    pub top_fields: Vec<FieldStat>,
    #[serde(default)]
    pub recent_errors: Vec<String>,
}

impl DashboardStats {
    /// Share of successful analyses, formatted for display.
    ///
    /// A service with no analyses yet reports `0%`, never NaN.
    pub fn success_rate(&self) -> String {
        if self.total_cvs_analyzed == 0 {
            return "0%".to_string();
        }
        let pct = self.successful_analyses as f64 / self.total_cvs_analyzed as f64 * 100.0;
        format!("{:.1}%", pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_guards_zero_denominator() {
        let stats = DashboardStats {
            total_cvs_analyzed: 0,
            successful_analyses: 0,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), "0%");
    }

    #[test]
    fn success_rate_one_decimal() {
        let stats = DashboardStats {
            total_cvs_analyzed: 200,
            successful_analyses: 150,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), "75.0%");
    }

    #[test]
    fn role_hierarchy_orders_destructive_rights() {
        assert!(AdminRole::SuperAdmin.rank() > AdminRole::Admin.rank());
        assert!(AdminRole::Admin.rank() > AdminRole::Viewer.rank());
        assert!(!AdminRole::Viewer.can_delete_users());
        assert!(AdminRole::Admin.can_delete_users());
    }

    #[test]
    fn unknown_role_string_parses_to_unknown() {
        let role: AdminRole = serde_json::from_str("\"auditor\"").unwrap();
        assert_eq!(role, AdminRole::Unknown);
        let role: AdminRole = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, AdminRole::SuperAdmin);
    }

    #[test]
    fn stats_deserialize_with_missing_fields() {
        let stats: DashboardStats = serde_json::from_str(r#"{"total_users": 42}"#).unwrap();
        assert_eq!(stats.total_users, 42);
        assert_eq!(stats.top_fields.len(), 0);
        assert_eq!(stats.success_rate(), "0%");
    }
}
