use crate::core::{Dataset, EligibleBranch, EligibleInstitute, Institute, InstituteSummary};
use std::collections::BTreeSet;

/// Every category code used anywhere in the dataset, sorted and deduplicated.
pub fn categories(dataset: &Dataset) -> Vec<String> {
    let mut codes = BTreeSet::new();

    for institute in &dataset.institutes {
        for branch in &institute.branches {
            for allocation in branch.seat_allocations.values() {
                codes.extend(allocation.categories.keys().map(String::as_str));
            }
        }
    }

    codes.into_iter().map(str::to_string).collect()
}

/// Institutes with at least one branch whose closing rank for `category`
/// is at or above `rank` under some allocation.
///
/// Callers must reject a zero rank or an empty category first.
pub fn eligible(dataset: &Dataset, rank: u32, category: &str) -> Vec<EligibleInstitute> {
    dataset
        .institutes
        .iter()
        .filter_map(|institute| {
            let eligible_branches: Vec<EligibleBranch> = institute
                .branches
                .iter()
                .filter(|branch| branch.cutoffs_for(category).any(|cutoff| rank <= cutoff.rank))
                .map(|branch| EligibleBranch {
                    code: branch.code.clone(),
                    name: branch.name.clone(),
                    cutoffs: branch.seat_allocations.clone(),
                })
                .collect();

            if eligible_branches.is_empty() {
                return None;
            }

            Some(EligibleInstitute {
                code: institute.code.clone(),
                name: institute.name.clone(),
                university: institute.university.clone(),
                status: institute.status.clone(),
                admission_type: institute.admission_type.clone(),
                eligible_branches,
            })
        })
        .collect()
}

/// First institute with the given code.
pub fn lookup<'a>(dataset: &'a Dataset, code: &str) -> Option<&'a Institute> {
    dataset.institutes.iter().find(|institute| institute.code == code)
}

/// Best (numerically smallest) closing rank recorded for `category`.
pub fn min_rank(dataset: &Dataset, category: &str) -> Option<u32> {
    dataset
        .institutes
        .iter()
        .flat_map(|institute| institute.branches.iter())
        .flat_map(|branch| branch.cutoffs_for(category))
        .map(|cutoff| cutoff.rank)
        .min()
}

pub fn institutes(dataset: &Dataset) -> Vec<InstituteSummary> {
    dataset.institutes.iter().map(InstituteSummary::from).collect()
}
