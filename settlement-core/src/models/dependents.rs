use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependentInfo {
    pub has_spouse: bool,
    pub number_of_children: u32,

    /// Lineal ascendants and other qualifying dependents.
    pub number_of_other_dependents: u32,
}

impl DependentInfo {
    /// Number of people eligible for the basic exemption, the filer included.
    pub fn head_count(&self) -> u32 {
        1 + u32::from(self.has_spouse) + self.number_of_children + self.number_of_other_dependents
    }
}
