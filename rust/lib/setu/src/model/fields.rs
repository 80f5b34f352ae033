//! Static column descriptors for every role table.
//!
//! The dashboard fetches exactly these columns and renders them in this
//! order. Columns in [`EXCLUDED`] are fetched but never displayed.

use serde_json::Value;

/// Internal id, identity token, and the hospital / medical shop foreign keys.
pub const EXCLUDED: [&str; 4] = ["id", "firebase_uid", "hospital_id", "medical_shop_id"];

/// Renders a non-null column value; `None` means "no value".
pub type Formatter = fn(&Value) -> Option<String>;

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub column: &'static str,
    pub format: Formatter,
}

impl FieldDescriptor {
    const fn text(column: &'static str) -> Self {
        Self {
            column,
            format: display,
        }
    }

    /// Human label derived from the column name: `date_of_birth` → `Date Of Birth`.
    pub fn label(&self) -> String {
        humanize(self.column)
    }

    pub fn is_excluded(&self) -> bool {
        EXCLUDED.contains(&self.column)
    }

    pub fn render(&self, value: &Value) -> Option<String> {
        (self.format)(value)
    }
}

pub const HOSPITAL_ADMIN: &[FieldDescriptor] = &[
    FieldDescriptor::text("id"),
    FieldDescriptor::text("firebase_uid"),
    FieldDescriptor::text("username"),
    FieldDescriptor::text("email"),
    FieldDescriptor::text("full_name"),
    FieldDescriptor::text("address"),
    FieldDescriptor::text("contact_number"),
    FieldDescriptor::text("hospital_id"),
];

pub const MEDICAL_SHOP_ADMIN: &[FieldDescriptor] = &[
    FieldDescriptor::text("id"),
    FieldDescriptor::text("firebase_uid"),
    FieldDescriptor::text("username"),
    FieldDescriptor::text("email"),
    FieldDescriptor::text("full_name"),
    FieldDescriptor::text("address"),
    FieldDescriptor::text("contact_number"),
    FieldDescriptor::text("medical_shop_id"),
];

pub const CITIZEN: &[FieldDescriptor] = &[
    FieldDescriptor::text("id"),
    FieldDescriptor::text("firebase_uid"),
    FieldDescriptor::text("username"),
    FieldDescriptor::text("email"),
    FieldDescriptor::text("full_name"),
    FieldDescriptor::text("date_of_birth"),
    FieldDescriptor::text("address"),
    FieldDescriptor::text("phone_number"),
    FieldDescriptor::text("emergency_contact"),
    FieldDescriptor::text("medical_history"),
    FieldDescriptor::text("vaccination_record"),
];

pub const VOLUNTEER: &[FieldDescriptor] = &[
    FieldDescriptor::text("id"),
    FieldDescriptor::text("firebase_uid"),
    FieldDescriptor::text("username"),
    FieldDescriptor::text("email"),
    FieldDescriptor::text("full_name"),
    FieldDescriptor::text("date_of_birth"),
    FieldDescriptor::text("address"),
    FieldDescriptor::text("phone_number"),
    FieldDescriptor::text("skills"),
    FieldDescriptor::text("availability"),
];

pub const ADMIN_USER: &[FieldDescriptor] = &[
    FieldDescriptor::text("id"),
    FieldDescriptor::text("firebase_uid"),
    FieldDescriptor::text("username"),
    FieldDescriptor::text("email"),
    FieldDescriptor::text("full_name"),
    FieldDescriptor::text("role"),
    FieldDescriptor::text("address"),
];

/// Display string for a JSON column value. Strings are shown verbatim,
/// scalars via their JSON text, null as no value.
pub fn display(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Replace `_` with spaces and upper-case the first letter of each word.
pub fn humanize(column: &str) -> String {
    column
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
