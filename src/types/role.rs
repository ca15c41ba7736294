// src/types/role.rs
//! Career role records from the role catalog

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub objective_template: String,
}

/// On-disk shape of the catalog resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleCatalogFile {
    pub roles: Vec<RoleRecord>,
}
