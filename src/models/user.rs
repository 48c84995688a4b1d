use serde::{Deserialize, Serialize};

use crate::filter::Filterable;

/// read/write/delete grants for one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub read: bool,
    pub write: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    pub patient_records: Permission,
    pub medical_records: Permission,
    pub prescriptions: Permission,
    pub appointments: Permission,
    pub lab_results: Permission,
    pub reports: Permission,
    pub user_management: Permission,
    pub system_settings: Permission,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub permissions: RolePermissions,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A staff account. The wire shape carries a password field; it is dropped
/// during boundary translation and never reaches view state.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub username: String,
    pub role: String,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub status: String,
    pub last_login: Option<String>,
    pub last_activity: Option<String>,
    pub is_active: bool,
    pub profile_picture_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Filterable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.username,
            &self.role,
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.role)
    }
}

/// Server-computed administration counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u32,
    pub active_users: u32,
    pub inactive_users: u32,
    pub roles: u32,
}

/// Administration screen data: stats, users, and roles fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdministrationData {
    pub stats: AdminStats,
    pub users: Vec<User>,
    pub roles: Vec<Role>,
}

#[cfg(test)]
pub(crate) fn test_user(id: &str, first: &str, last: &str, role: &str, status: &str) -> User {
    User {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@atlascare.example", first.to_lowercase(), last.to_lowercase()),
        phone_number: None,
        username: first.to_lowercase(),
        role: role.to_string(),
        department: None,
        specialization: None,
        license_number: None,
        status: status.to_string(),
        last_login: None,
        last_activity: None,
        is_active: status == "active",
        profile_picture_url: None,
        created_at: None,
        updated_at: None,
    }
}
