use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Allocation type key to allocation, in file order.
pub type SeatAllocations = IndexMap<String, Allocation>;

/// Category code to cutoff, in file order.
pub type CategoryCutoffs = IndexMap<String, CategoryCutoff>;

/// The whole college dataset, in file order.
///
/// On disk every institute is wrapped in a single-key object:
/// `{"institutes": [{"institute": {...}}, ...]}`. The wrapper is flattened
/// away on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(with = "wrapped_institutes")]
    pub institutes: Vec<Institute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institute {
    pub code: String,
    pub name: String,
    pub university: String,
    pub status: String,
    pub admission_type: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub seat_allocations: SeatAllocations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Display label, e.g. "Home State".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub categories: CategoryCutoffs,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryCutoff {
    /// Closing rank: the worst rank still admitted.
    pub rank: u32,
    pub percentile: f64,
}

/// An institute with only the branches a search matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibleInstitute {
    pub code: String,
    pub name: String,
    pub university: String,
    pub status: String,
    pub admission_type: String,
    pub eligible_branches: Vec<EligibleBranch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibleBranch {
    pub code: String,
    pub name: String,
    pub cutoffs: SeatAllocations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstituteSummary {
    pub code: String,
    pub name: String,
}

/// A data-quality problem found by [`Dataset::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetIssue {
    DuplicateInstitute { code: String },
    DuplicateBranch { institute: String, branch: String },
    ZeroRank { institute: String, branch: String, category: String },
    PercentileOutOfRange { institute: String, branch: String, category: String, percentile: f64 },
}

impl DatasetIssue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateInstitute { .. } => "duplicate_institute",
            Self::DuplicateBranch { .. } => "duplicate_branch",
            Self::ZeroRank { .. } => "zero_rank",
            Self::PercentileOutOfRange { .. } => "percentile_out_of_range",
        }
    }
}

impl std::fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateInstitute { code } => write!(f, "duplicate institute code {}", code),
            Self::DuplicateBranch { institute, branch } => {
                write!(f, "duplicate branch code {} in institute {}", branch, institute)
            }
            Self::ZeroRank { institute, branch, category } => {
                write!(f, "rank 0 for {} in {}/{}", category, institute, branch)
            }
            Self::PercentileOutOfRange { institute, branch, category, percentile } => write!(
                f,
                "percentile {} outside 0..=100 for {} in {}/{}",
                percentile, category, institute, branch
            ),
        }
    }
}

impl Dataset {
    pub fn new(institutes: Vec<Institute>) -> Self {
        Self { institutes }
    }

    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn len(&self) -> usize {
        self.institutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.institutes.is_empty()
    }

    pub fn branch_count(&self) -> usize {
        self.institutes.iter().map(|i| i.branches.len()).sum()
    }

    /// Checks the uniqueness and range invariants the queries rely on.
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        let mut institute_codes = HashSet::new();

        for institute in &self.institutes {
            if !institute_codes.insert(institute.code.as_str()) {
                issues.push(DatasetIssue::DuplicateInstitute {
                    code: institute.code.clone(),
                });
            }

            let mut branch_codes = HashSet::new();
            for branch in &institute.branches {
                if !branch_codes.insert(branch.code.as_str()) {
                    issues.push(DatasetIssue::DuplicateBranch {
                        institute: institute.code.clone(),
                        branch: branch.code.clone(),
                    });
                }

                for allocation in branch.seat_allocations.values() {
                    for (category, cutoff) in &allocation.categories {
                        if cutoff.rank == 0 {
                            issues.push(DatasetIssue::ZeroRank {
                                institute: institute.code.clone(),
                                branch: branch.code.clone(),
                                category: category.clone(),
                            });
                        }
                        if !(0.0..=100.0).contains(&cutoff.percentile) {
                            issues.push(DatasetIssue::PercentileOutOfRange {
                                institute: institute.code.clone(),
                                branch: branch.code.clone(),
                                category: category.clone(),
                                percentile: cutoff.percentile,
                            });
                        }
                    }
                }
            }
        }

        issues
    }
}

impl Allocation {
    /// Every `(category, cutoff)` pair under this allocation.
    pub fn cutoffs(&self) -> impl Iterator<Item = (&str, &CategoryCutoff)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Branch {
    /// Cutoffs for one category across all allocation types of this branch.
    pub fn cutoffs_for<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CategoryCutoff> + 'a {
        self.seat_allocations
            .values()
            .filter_map(move |allocation| allocation.categories.get(category))
    }
}

impl From<&Institute> for InstituteSummary {
    fn from(institute: &Institute) -> Self {
        Self {
            code: institute.code.clone(),
            name: institute.name.clone(),
        }
    }
}

mod wrapped_institutes {
    use super::Institute;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    struct Owned {
        institute: Institute,
    }

    #[derive(Serialize)]
    struct Borrowed<'a> {
        institute: &'a Institute,
    }

    pub fn serialize<S: Serializer>(institutes: &[Institute], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(institutes.iter().map(|institute| Borrowed { institute }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Institute>, D::Error> {
        let wrapped = Vec::<Owned>::deserialize(deserializer)?;
        Ok(wrapped.into_iter().map(|w| w.institute).collect())
    }
}
