use std::fmt;

use serde::{Deserialize, Serialize};

use super::fields::{self, FieldDescriptor};

/// The five role tables a profile can live in.
///
/// Declaration order is resolution priority: when one identity is linked
/// from several tables, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    HospitalAdmin,
    MedicalShopAdmin,
    Citizen,
    Volunteer,
    #[serde(rename = "admin_user")]
    SystemAdministrator,
}

impl Role {
    /// Every role, in resolution priority order.
    pub const PRIORITY: [Role; 5] = [
        Role::HospitalAdmin,
        Role::MedicalShopAdmin,
        Role::Citizen,
        Role::Volunteer,
        Role::SystemAdministrator,
    ];

    /// Backend table holding this role's records.
    pub fn table(self) -> &'static str {
        match self {
            Role::HospitalAdmin => "hospital_admins",
            Role::MedicalShopAdmin => "medical_shop_admins",
            Role::Citizen => "citizens",
            Role::Volunteer => "volunteers",
            Role::SystemAdministrator => "admin_users",
        }
    }

    /// Role key used by the registration form and the dashboard.
    pub fn key(self) -> &'static str {
        match self {
            Role::HospitalAdmin => "hospital_admin",
            Role::MedicalShopAdmin => "medical_shop_admin",
            Role::Citizen => "citizen",
            Role::Volunteer => "volunteer",
            Role::SystemAdministrator => "admin_user",
        }
    }

    pub fn from_key(key: &str) -> Option<Role> {
        Role::PRIORITY.into_iter().find(|r| r.key() == key)
    }

    pub fn from_table(table: &str) -> Option<Role> {
        Role::PRIORITY.into_iter().find(|r| r.table() == table)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::HospitalAdmin => "Hospital Administrator",
            Role::MedicalShopAdmin => "Medical Shop Administrator",
            Role::Citizen => "Citizen",
            Role::Volunteer => "Volunteer",
            Role::SystemAdministrator => "System Administrator",
        }
    }

    /// Columns of this role's table, in display order.
    pub fn fields(self) -> &'static [FieldDescriptor] {
        match self {
            Role::HospitalAdmin => fields::HOSPITAL_ADMIN,
            Role::MedicalShopAdmin => fields::MEDICAL_SHOP_ADMIN,
            Role::Citizen => fields::CITIZEN,
            Role::Volunteer => fields::VOLUNTEER,
            Role::SystemAdministrator => fields::ADMIN_USER,
        }
    }

    /// GraphQL operation name of the single-row insert for this role.
    pub fn insert_operation(self) -> &'static str {
        match self {
            Role::HospitalAdmin => "InsertHospitalAdmin",
            Role::MedicalShopAdmin => "InsertMedicalShopAdmin",
            Role::Citizen => "InsertCitizen",
            Role::Volunteer => "InsertVolunteer",
            Role::SystemAdministrator => "InsertAdminUser",
        }
    }

    pub fn from_insert_operation(operation: &str) -> Option<Role> {
        Role::PRIORITY.into_iter().find(|r| r.insert_operation() == operation)
    }

    /// Root field of the insert mutation, e.g. `insert_citizens_one`.
    pub fn insert_field(self) -> String {
        format!("insert_{}_one", self.table())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_fixed() {
        let tables: Vec<&str> = Role::PRIORITY.iter().map(|r| r.table()).collect();
        assert_eq!(
            tables,
            vec!["hospital_admins", "medical_shop_admins", "citizens", "volunteers", "admin_users"]
        );
    }

    #[test]
    fn keys_round_trip() {
        for role in Role::PRIORITY {
            assert_eq!(Role::from_key(role.key()), Some(role));
            assert_eq!(Role::from_table(role.table()), Some(role));
            assert_eq!(Role::from_insert_operation(role.insert_operation()), Some(role));
        }
        assert_eq!(Role::from_key("pilot"), None);
        assert_eq!(Role::from_key(""), None);
    }

    #[test]
    fn serde_uses_role_keys() {
        assert_eq!(serde_json::to_string(&Role::Citizen).unwrap(), "\"citizen\"");
        assert_eq!(
            serde_json::to_string(&Role::SystemAdministrator).unwrap(),
            "\"admin_user\""
        );
        let r: Role = serde_json::from_str("\"medical_shop_admin\"").unwrap();
        assert_eq!(r, Role::MedicalShopAdmin);
    }

    #[test]
    fn insert_field_names() {
        assert_eq!(Role::Citizen.insert_field(), "insert_citizens_one");
        assert_eq!(Role::SystemAdministrator.insert_field(), "insert_admin_users_one");
    }
}
