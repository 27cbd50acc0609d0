//! Console modules and which roles may open them

use serde::{Deserialize, Serialize};
use std::fmt;

/// A functional area of the console, shown as one tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Module {
    Budget,
    Disbursements,
    Collections,
}

impl Module {
    pub fn all() -> Vec<Module> {
        vec![Module::Budget, Module::Disbursements, Module::Collections]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Module::Budget => "Budget",
            Module::Disbursements => "Disbursements",
            Module::Collections => "Collections",
        }
    }

    /// Dataset file inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Module::Budget => "budget.json",
            Module::Disbursements => "disbursements.json",
            Module::Collections => "collections.csv",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Role of the signed-in operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Admin,
    Treasurer,
    BudgetOfficer,
    Viewer,
}

/// Whether `role` may open `module`
pub fn is_module_permitted(module: Module, role: Role) -> bool {
    match role {
        Role::Admin => true,
        Role::Treasurer => matches!(module, Module::Disbursements | Module::Collections),
        Role::BudgetOfficer => module == Module::Budget,
        Role::Viewer => matches!(module, Module::Budget | Module::Collections),
    }
}

/// Modules visible to `role`, in tab order
pub fn permitted_modules(role: Role) -> Vec<Module> {
    Module::all()
        .into_iter()
        .filter(|m| is_module_permitted(*m, role))
        .collect()
}
