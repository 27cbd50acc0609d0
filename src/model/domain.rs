//! Domain state - dataset bookkeeping separate from UI concerns

use super::navigation::{Module, Role};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::path::PathBuf;

/// Load status of one module's dataset
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetStatus {
    Loading,
    Loaded { at: DateTime<Local>, count: usize },
    Failed(String),
}

impl DatasetStatus {
    /// Short status-bar text
    pub fn describe(&self) -> String {
        match self {
            DatasetStatus::Loading => "loading…".to_string(),
            DatasetStatus::Loaded { at, count } => {
                format!("{} records, loaded {}", count, at.format("%H:%M:%S"))
            }
            DatasetStatus::Failed(err) => format!("load failed: {}", err),
        }
    }
}

/// Domain state containing dataset locations and load progress
pub struct DomainState {
    /// Directory holding the dataset files
    pub data_dir: PathBuf,

    /// Role of the operator, decides which modules are shown
    pub role: Role,

    /// Per-module load status
    pub datasets: HashMap<Module, DatasetStatus>,
}

impl DomainState {
    pub fn new(data_dir: PathBuf, role: Role) -> Self {
        Self {
            data_dir,
            role,
            datasets: HashMap::new(),
        }
    }

    /// Path of a module's dataset file
    pub fn dataset_path(&self, module: Module) -> PathBuf {
        self.data_dir.join(module.file_name())
    }

    pub fn status(&self, module: Module) -> Option<&DatasetStatus> {
        self.datasets.get(&module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_path() {
        let domain = DomainState::new(PathBuf::from("data"), Role::Admin);
        assert_eq!(
            domain.dataset_path(Module::Collections),
            PathBuf::from("data").join("collections.csv")
        );
    }

    #[test]
    fn test_status_description() {
        assert_eq!(DatasetStatus::Loading.describe(), "loading…");
        assert_eq!(
            DatasetStatus::Failed("missing file".to_string()).describe(),
            "load failed: missing file"
        );
    }
}
