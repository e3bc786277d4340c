//! Department Memberships
//!
//! A leader belongs to exactly one department. A worker belongs to one or
//! more at signup; rows read back from storage are taken as they are.

use kernel::department::Department;
use kernel::error::app_error::{AppError, AppResult};
use kernel::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentSet(Vec<Department>);

impl DepartmentSet {
    /// Validate the memberships requested at signup for `role`
    pub fn for_signup(role: Role, raw: Option<Vec<String>>) -> AppResult<Self> {
        let raw = raw.unwrap_or_default();
        let mut departments = raw
            .iter()
            .map(|name| name.parse::<Department>())
            .collect::<AppResult<Vec<_>>>()?;
        departments.sort();
        departments.dedup();

        match role {
            Role::Leader if departments.len() != 1 => Err(AppError::bad_request(
                "Leaders must select exactly one department",
            )),
            Role::Worker if departments.is_empty() => Err(AppError::bad_request(
                "Please select at least one department",
            )),
            _ => Ok(Self(departments)),
        }
    }

    /// Rebuild from stored slugs, skipping any that are no longer known
    pub fn from_slugs<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut departments: Vec<_> = slugs
            .into_iter()
            .filter_map(|slug| Department::from_slug(slug.as_ref()))
            .collect();
        departments.sort();
        departments.dedup();
        Self(departments)
    }

    pub fn slugs(&self) -> Vec<String> {
        self.0.iter().map(|d| d.slug().to_string()).collect()
    }

    /// The membership, when there is exactly one
    pub fn single(&self) -> Option<Department> {
        match self.0.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn contains(&self, department: Department) -> bool {
        self.0.contains(&department)
    }

    pub fn as_slice(&self) -> &[Department] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
