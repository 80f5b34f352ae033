//! Role tables, their records, and the registration payloads.

pub mod fields;
mod profile;
mod record;
mod role;

pub use fields::{FieldDescriptor, EXCLUDED};
pub use profile::{
    AdminProfile, CitizenProfile, CommonFields, NewProfile, RegistrationForm, StaffProfile,
    VolunteerProfile,
};
pub use record::{RoleRecord, Row};
pub use role::Role;
