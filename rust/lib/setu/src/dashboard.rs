//! Dashboard composition: the profile card and the role's panel.

use serde::Serialize;

use crate::backend::DataBackend;
use crate::error::ApiError;
use crate::model::{Role, RoleRecord};
use crate::resolver::{resolve_role, Resolution};

pub const NOT_AVAILABLE: &str = "N/A";

/// One labelled line of the profile card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
}

impl FieldRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A titled dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub placeholder: &'static str,
}

/// Shown under every role panel.
pub const BLOOD_DONATION: Section = Section {
    title: "Blood Donation Management",
    placeholder: "Blood donation management features coming soon...",
};

/// Role-specific dashboard content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    HospitalPanel,
    MedicalShopPanel,
    CitizenPanel,
    VolunteerPanel,
    AdminPanel,
    NoContent,
}

impl Panel {
    pub fn section(self) -> Section {
        let (title, placeholder) = match self {
            Panel::HospitalPanel => (
                "Hospital Management",
                "Hospital management features coming soon...",
            ),
            Panel::MedicalShopPanel => (
                "Medical Shop Management",
                "Medical shop management features coming soon...",
            ),
            Panel::CitizenPanel => ("Citizen Services", "Citizen services features coming soon..."),
            Panel::VolunteerPanel => (
                "Volunteer Assignments",
                "Volunteer assignment features coming soon...",
            ),
            Panel::AdminPanel => (
                "System Administration",
                "System administration features coming soon...",
            ),
            Panel::NoContent => ("", "No specific dashboard content available."),
        };
        Section { title, placeholder }
    }
}

/// Everything the dashboard shows for a resolved profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub role: Role,
    pub label: String,
    pub role_display: &'static str,
    pub greeting: String,
    pub fields: Vec<FieldRow>,
    /// Rows appended after the projected fields.
    pub extra_rows: Vec<FieldRow>,
    pub panel: Panel,
    pub record: RoleRecord,
}

impl ProfileView {
    pub fn from_resolution(resolution: Resolution) -> Self {
        let record = resolution.record;
        let role = resolution.role;

        let mut extra_rows = Vec::new();
        if role == Role::HospitalAdmin {
            let reg_no = record
                .get("hospital_id")
                .and_then(crate::model::fields::display)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            extra_rows.push(FieldRow::new("Hospital Reg No", reg_no));
        }

        Self {
            role,
            label: resolution.label,
            role_display: role.display_name(),
            greeting: format!("Welcome, {}", record.full_name().unwrap_or_default()),
            fields: project_fields(&record),
            extra_rows,
            panel: select_panel(role.key()),
            record,
        }
    }

    /// The role panel followed by the shared sections.
    pub fn sections(&self) -> Vec<Section> {
        vec![self.panel.section(), BLOOD_DONATION]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardView {
    /// Signed in, but no table holds a profile for this identity.
    NoProfile,
    Profile(ProfileView),
}

/// Resolve the identity's profile and build its view.
pub async fn compose_view(
    backend: &dyn DataBackend,
    identity_token: &str,
) -> Result<DashboardView, ApiError> {
    Ok(match resolve_role(backend, identity_token).await? {
        Some(resolution) => DashboardView::Profile(ProfileView::from_resolution(resolution)),
        None => DashboardView::NoProfile,
    })
}

/// Labelled rows for the record's displayable columns, in descriptor
/// order. Excluded columns and columns the row does not have are skipped.
pub fn project_fields(record: &RoleRecord) -> Vec<FieldRow> {
    record
        .role()
        .fields()
        .iter()
        .filter(|f| !f.is_excluded())
        .filter_map(|f| {
            let value = record.get(f.column)?;
            let shown = f.render(value).unwrap_or_else(|| NOT_AVAILABLE.to_string());
            Some(FieldRow::new(f.label(), shown))
        })
        .collect()
}

pub fn select_panel(role_key: &str) -> Panel {
    match Role::from_key(role_key) {
        Some(Role::HospitalAdmin) => Panel::HospitalPanel,
        Some(Role::MedicalShopAdmin) => Panel::MedicalShopPanel,
        Some(Role::Citizen) => Panel::CitizenPanel,
        Some(Role::Volunteer) => Panel::VolunteerPanel,
        Some(Role::SystemAdministrator) => Panel::AdminPanel,
        None => Panel::NoContent,
    }
}
