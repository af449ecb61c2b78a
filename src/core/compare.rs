use crate::core::{query, Branch, Dataset, Institute};
use crate::utils::error::{FinderError, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// Category shown in a comparison cell when the allocation publishes it.
pub const PREFERRED_CATEGORY: &str = "GOPENS";

/// Splits a `C1,C2,...` navigation parameter into codes.
pub fn parse_codes(param: &str) -> Vec<String> {
    param
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// The colleges currently being compared, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet<'a> {
    colleges: Vec<&'a Institute>,
}

impl<'a> ComparisonSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from a navigation parameter. Unknown codes are dropped.
    pub fn from_param(dataset: &'a Dataset, param: &str) -> Self {
        let colleges = parse_codes(param)
            .iter()
            .filter_map(|code| {
                let found = query::lookup(dataset, code);
                if found.is_none() {
                    tracing::debug!("Skipping unknown college code {}", code);
                }
                found
            })
            .collect();
        Self { colleges }
    }

    pub fn add(&mut self, dataset: &'a Dataset, code: &str) -> Result<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(FinderError::invalid_input("Please select a college to add"));
        }
        if self.contains(code) {
            return Err(FinderError::invalid_input(
                "This college is already in the comparison",
            ));
        }
        let college =
            query::lookup(dataset, code).ok_or_else(|| FinderError::not_found("College not found"))?;
        self.colleges.push(college);
        Ok(())
    }

    pub fn remove(&mut self, code: &str) {
        self.colleges.retain(|c| c.code != code);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.colleges.iter().any(|c| c.code == code)
    }

    pub fn colleges(&self) -> &[&'a Institute] {
        &self.colleges
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    /// The navigation parameter for this set; `None` once it is empty.
    pub fn to_param(&self) -> Option<String> {
        if self.colleges.is_empty() {
            return None;
        }
        Some(
            self.colleges
                .iter()
                .map(|c| c.code.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffCell {
    pub allocation: String,
    pub category: String,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchRow {
    pub branch: String,
    /// One entry per compared college; `None` when it does not offer the branch.
    pub cells: Vec<Option<Vec<CutoffCell>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMatrix {
    pub colleges: Vec<String>,
    pub codes: Vec<String>,
    pub university: Vec<String>,
    pub status: Vec<String>,
    pub admission_type: Vec<String>,
    pub branch_count: Vec<usize>,
    pub branches: Vec<BranchRow>,
}

impl ComparisonMatrix {
    pub fn build(set: &ComparisonSet<'_>) -> Self {
        let colleges = set.colleges();
        let column = |f: fn(&Institute) -> String| -> Vec<String> {
            colleges.iter().map(|&c| f(c)).collect()
        };

        let names: BTreeSet<&str> = colleges
            .iter()
            .flat_map(|c| c.branches.iter().map(|b| b.name.as_str()))
            .collect();

        let branches = names
            .into_iter()
            .map(|name| BranchRow {
                branch: name.to_string(),
                cells: colleges
                    .iter()
                    .map(|college| {
                        college
                            .branches
                            .iter()
                            .find(|b| b.name == name)
                            .map(representative_cutoffs)
                    })
                    .collect(),
            })
            .collect();

        Self {
            colleges: column(|c| c.name.clone()),
            codes: column(|c| c.code.clone()),
            university: column(|c| c.university.clone()),
            status: column(|c| c.status.clone()),
            admission_type: column(|c| c.admission_type.clone()),
            branch_count: colleges.iter().map(|c| c.branches.len()).collect(),
            branches,
        }
    }
}

/// One cutoff per allocation: the preferred category if published, else the first one.
pub fn representative_cutoffs(branch: &Branch) -> Vec<CutoffCell> {
    branch
        .seat_allocations
        .values()
        .filter_map(|allocation| {
            let (category, cutoff) = allocation
                .categories
                .get_key_value(PREFERRED_CATEGORY)
                .or_else(|| allocation.categories.iter().next())?;
            Some(CutoffCell {
                allocation: allocation.kind.clone(),
                category: category.clone(),
                rank: cutoff.rank,
            })
        })
        .collect()
}
