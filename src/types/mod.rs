// src/types/mod.rs
pub mod profile;
pub mod role;

pub use profile::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeProfile};
pub use role::{RoleCatalogFile, RoleRecord};
