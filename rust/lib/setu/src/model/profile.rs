use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Role;
use crate::error::ApiError;

/// Everything the registration screen collects. Which fields are used
/// depends on the selected role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub username: String,
    pub full_name: String,
    pub address: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub emergency_contact: String,
    pub medical_history: String,
    pub vaccination_record: String,
    pub skills: String,
    pub availability: String,
    pub admin_role: String,
}

/// Columns shared by every role table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonFields {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub address: String,
    pub firebase_uid: String,
}

/// Hospital and medical shop administrators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffProfile {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitizenProfile {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccination_record: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolunteerProfile {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminProfile {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A profile about to be inserted, tagged by the table it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum NewProfile {
    HospitalAdmin(StaffProfile),
    MedicalShopAdmin(StaffProfile),
    Citizen(CitizenProfile),
    Volunteer(VolunteerProfile),
    SystemAdministrator(AdminProfile),
}

impl NewProfile {
    /// Select the role's fields from the form and link them to `firebase_uid`.
    pub fn build(role: Role, form: &RegistrationForm, firebase_uid: &str) -> Self {
        let common = CommonFields {
            username: form.username.clone(),
            email: form.email.clone(),
            full_name: form.full_name.clone(),
            address: form.address.clone(),
            firebase_uid: firebase_uid.to_string(),
        };
        match role {
            Role::HospitalAdmin => NewProfile::HospitalAdmin(StaffProfile {
                common,
                contact_number: non_empty(&form.phone_number),
            }),
            Role::MedicalShopAdmin => NewProfile::MedicalShopAdmin(StaffProfile {
                common,
                contact_number: non_empty(&form.phone_number),
            }),
            Role::Citizen => NewProfile::Citizen(CitizenProfile {
                common,
                date_of_birth: non_empty(&form.date_of_birth),
                phone_number: non_empty(&form.phone_number),
                emergency_contact: non_empty(&form.emergency_contact),
                medical_history: non_empty(&form.medical_history),
                vaccination_record: non_empty(&form.vaccination_record),
            }),
            Role::Volunteer => NewProfile::Volunteer(VolunteerProfile {
                common,
                date_of_birth: non_empty(&form.date_of_birth),
                phone_number: non_empty(&form.phone_number),
                skills: non_empty(&form.skills),
                availability: non_empty(&form.availability),
            }),
            Role::SystemAdministrator => NewProfile::SystemAdministrator(AdminProfile {
                common,
                role: non_empty(&form.admin_role),
            }),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            NewProfile::HospitalAdmin(_) => Role::HospitalAdmin,
            NewProfile::MedicalShopAdmin(_) => Role::MedicalShopAdmin,
            NewProfile::Citizen(_) => Role::Citizen,
            NewProfile::Volunteer(_) => Role::Volunteer,
            NewProfile::SystemAdministrator(_) => Role::SystemAdministrator,
        }
    }

    /// The insert object for this profile's table.
    pub fn to_object(&self) -> Result<Value, ApiError> {
        let value = match self {
            NewProfile::HospitalAdmin(p) | NewProfile::MedicalShopAdmin(p) => serde_json::to_value(p),
            NewProfile::Citizen(p) => serde_json::to_value(p),
            NewProfile::Volunteer(p) => serde_json::to_value(p),
            NewProfile::SystemAdministrator(p) => serde_json::to_value(p),
        };
        value.map_err(|e| ApiError::Decode(format!("encode {}: {}", self.role().table(), e)))
    }
}

/// Optional columns are sent as typed, or left out when blank.
fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}
