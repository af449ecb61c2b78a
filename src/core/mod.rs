pub mod compare;
pub mod details;
pub mod loader;
pub mod query;
pub mod search;

pub use crate::domain::model::{
    Allocation, Branch, CategoryCutoff, Dataset, DatasetIssue, EligibleBranch, EligibleInstitute,
    Institute, InstituteSummary,
};
pub use crate::domain::ports::{ConfigProvider, DatasetSource};
pub use crate::utils::error::Result;
