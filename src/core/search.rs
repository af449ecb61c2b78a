use crate::core::{query, Dataset, EligibleInstitute};
use crate::utils::error::{FinderError, Result};
use serde::Serialize;

pub const MISSING_FIELDS: &str = "Please enter both rank and category";
pub const INVALID_RANK: &str = "Please enter a valid rank";

/// How many branch names a result card lists before collapsing the rest.
pub const DEFAULT_BRANCH_PREVIEW: usize = 3;

/// A validated eligibility search. Only constructible through [`SearchRequest::parse`]
/// or [`SearchRequest::new`], so the query layer never sees a zero rank or empty category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    rank: u32,
    category: String,
}

impl SearchRequest {
    pub fn new(rank: u32, category: impl Into<String>) -> Result<Self> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(FinderError::invalid_input(MISSING_FIELDS));
        }
        if rank == 0 {
            return Err(FinderError::invalid_input(INVALID_RANK));
        }
        Ok(Self {
            rank,
            category: category.trim().to_string(),
        })
    }

    /// Validates raw form input.
    pub fn parse(rank: &str, category: &str) -> Result<Self> {
        let rank = rank.trim();
        if rank.is_empty() || category.trim().is_empty() {
            return Err(FinderError::invalid_input(MISSING_FIELDS));
        }

        let rank: i64 = rank
            .parse()
            .map_err(|_| FinderError::invalid_input(INVALID_RANK))?;
        let rank = u32::try_from(rank)
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| FinderError::invalid_input(INVALID_RANK))?;

        Self::new(rank, category)
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn run(&self, dataset: &Dataset) -> SearchOutcome {
        let results = query::eligible(dataset, self.rank, &self.category);
        tracing::debug!(
            "Search rank={} category={} matched {} colleges",
            self.rank,
            self.category,
            results.len()
        );
        SearchOutcome {
            request: self.clone(),
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub request: SearchRequest,
    pub results: Vec<EligibleInstitute>,
}

impl SearchOutcome {
    pub fn summary(&self) -> String {
        if self.results.is_empty() {
            "No colleges found matching your criteria. Try a higher rank or different category."
                .to_string()
        } else {
            format!(
                "Found {} colleges where you are eligible for admission with rank {} in category {}.",
                self.results.len(),
                self.request.rank,
                self.request.category
            )
        }
    }
}

/// Branch names shown on a result card, plus how many were left out.
pub fn branch_preview(college: &EligibleInstitute, limit: usize) -> (Vec<&str>, usize) {
    let shown: Vec<&str> = college
        .eligible_branches
        .iter()
        .take(limit)
        .map(|b| b.name.as_str())
        .collect();
    let hidden = college.eligible_branches.len().saturating_sub(limit);
    (shown, hidden)
}
