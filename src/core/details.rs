use crate::core::{query, Dataset, Institute};
use crate::utils::error::{FinderError, Result};
use serde::Serialize;

/// Resolves a college for the details view.
pub fn details<'a>(dataset: &'a Dataset, code: &str) -> Result<&'a Institute> {
    query::lookup(dataset, code)
        .ok_or_else(|| FinderError::not_found(format!("College with code {} not found", code)))
}

/// One line of a college's cutoff table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffRow<'a> {
    pub branch_code: &'a str,
    pub branch: &'a str,
    pub allocation: &'a str,
    pub category: &'a str,
    pub closing_rank: u32,
    pub percentile: f64,
}

/// Flattens branch → allocation → category into rows, in display order.
pub fn cutoff_rows(institute: &Institute) -> Vec<CutoffRow<'_>> {
    institute
        .branches
        .iter()
        .flat_map(|branch| {
            branch.seat_allocations.values().flat_map(move |allocation| {
                allocation.cutoffs().map(move |(category, cutoff)| CutoffRow {
                    branch_code: &branch.code,
                    branch: &branch.name,
                    allocation: &allocation.kind,
                    category,
                    closing_rank: cutoff.rank,
                    percentile: cutoff.percentile,
                })
            })
        })
        .collect()
}

pub fn format_percentile(percentile: f64) -> String {
    format!("{:.2}", percentile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        serde_json::from_value(serde_json::json!({
            "institutes": [{"institute": {
                "code": "C1", "name": "Alpha", "university": "U1",
                "status": "Autonomous", "admission_type": "CAP",
                "branches": [
                    {"code": "CS", "name": "Computer", "seat_allocations": {
                        "HOME": {"type": "Home State", "categories": {
                            "GOPENS": {"rank": 500, "percentile": 98.5},
                            "GSCS": {"rank": 900, "percentile": 95.123}
                        }},
                        "OTHER": {"type": "Other State", "categories": {
                            "GOPENS": {"rank": 300, "percentile": 99.0}
                        }}
                    }}
                ]
            }}]
        }))
        .unwrap()
    }

    #[test]
    fn test_details_not_found_message() {
        let d = dataset();
        assert_eq!(details(&d, "C1").unwrap().name, "Alpha");
        let err = details(&d, "ZZ").unwrap_err();
        assert_eq!(err.user_friendly_message(), "College with code ZZ not found");
    }

    #[test]
    fn test_cutoff_rows_cover_every_category() {
        let d = dataset();
        let rows = cutoff_rows(&d.institutes[0]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].allocation, "Home State");
        assert_eq!(rows[0].category, "GOPENS");
        assert_eq!(rows[1].category, "GSCS");
        assert_eq!(rows[2].allocation, "Other State");
        assert_eq!(rows[2].closing_rank, 300);
    }

    #[test]
    fn test_cutoff_rows_follow_file_order() {
        let institute: Institute = serde_json::from_value(serde_json::json!({
            "code": "C2", "name": "Beta", "university": "U2",
            "status": "Government", "admission_type": "CAP",
            "branches": [
                {"code": "EE", "name": "Electrical", "seat_allocations": {
                    "STATE": {"type": "State Level", "categories": {
                        "LOPENS": {"rank": 7000, "percentile": 80.0},
                        "AIOPEN": {"rank": 6000, "percentile": 82.0}
                    }},
                    "HOME": {"type": "Home", "categories": {
                        "GSCH": {"rank": 1, "percentile": 99.9}
                    }}
                }}
            ]
        }))
        .unwrap();

        let order: Vec<(&str, &str)> = cutoff_rows(&institute)
            .iter()
            .map(|r| (r.allocation, r.category))
            .collect();
        assert_eq!(
            order,
            vec![("State Level", "LOPENS"), ("State Level", "AIOPEN"), ("Home", "GSCH")]
        );
    }

    #[test]
    fn test_format_percentile() {
        assert_eq!(format_percentile(95.123), "95.12");
        assert_eq!(format_percentile(98.5), "98.50");
    }
}
