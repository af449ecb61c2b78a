use crate::config::OutputFormat;
use crate::core::compare::ComparisonMatrix;
use crate::core::details::{cutoff_rows, format_percentile};
use crate::core::search::{branch_preview, SearchOutcome};
use crate::core::{DatasetIssue, Institute, InstituteSummary};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write, T: Serialize>(out: &mut W, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn render_categories<W: Write>(out: &mut W, format: OutputFormat, categories: &[String]) -> Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        category: &'a str,
    }

    match format {
        OutputFormat::Json => write_json(out, categories),
        OutputFormat::Csv => write_csv(out, categories.iter().map(|c| Row { category: c })),
        OutputFormat::Table => {
            for category in categories {
                writeln!(out, "{}", category)?;
            }
            Ok(())
        }
    }
}

pub fn render_institutes<W: Write>(
    out: &mut W,
    format: OutputFormat,
    institutes: &[InstituteSummary],
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, institutes),
        OutputFormat::Csv => write_csv(out, institutes),
        OutputFormat::Table => {
            for institute in institutes {
                writeln!(out, "{:<10} {}", institute.code, institute.name)?;
            }
            Ok(())
        }
    }
}

pub fn render_search<W: Write>(
    out: &mut W,
    format: OutputFormat,
    outcome: &SearchOutcome,
    preview: usize,
) -> Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        college_code: &'a str,
        college: &'a str,
        university: &'a str,
        status: &'a str,
        admission_type: &'a str,
        branch_code: &'a str,
        branch: &'a str,
    }

    match format {
        OutputFormat::Json => write_json(out, outcome),
        OutputFormat::Csv => write_csv(
            out,
            outcome.results.iter().flat_map(|college| {
                college.eligible_branches.iter().map(move |branch| Row {
                    college_code: &college.code,
                    college: &college.name,
                    university: &college.university,
                    status: &college.status,
                    admission_type: &college.admission_type,
                    branch_code: &branch.code,
                    branch: &branch.name,
                })
            }),
        ),
        OutputFormat::Table => {
            writeln!(out, "{}", outcome.summary())?;
            for college in &outcome.results {
                writeln!(out)?;
                writeln!(out, "{} [{}]", college.name, college.code)?;
                writeln!(out, "  {}", college.university)?;
                writeln!(out, "  {} | {}", college.status, college.admission_type)?;
                writeln!(out, "  Eligible Branches ({}):", college.eligible_branches.len())?;

                let (shown, hidden) = branch_preview(college, preview);
                for name in shown {
                    writeln!(out, "    - {}", name)?;
                }
                if hidden > 0 {
                    writeln!(out, "    +{} more branches", hidden)?;
                }
            }
            Ok(())
        }
    }
}

pub fn render_details<W: Write>(out: &mut W, format: OutputFormat, institute: &Institute) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, institute),
        OutputFormat::Csv => write_csv(out, cutoff_rows(institute)),
        OutputFormat::Table => {
            writeln!(out, "{}", institute.name)?;
            writeln!(out, "{}", institute.university)?;
            writeln!(
                out,
                "{} | {} | Code: {}",
                institute.status, institute.admission_type, institute.code
            )?;
            writeln!(out)?;
            writeln!(out, "Branches and Cutoff Ranks")?;

            for branch in &institute.branches {
                writeln!(out)?;
                writeln!(out, "{} (Branch Code: {})", branch.name, branch.code)?;
                for allocation in branch.seat_allocations.values() {
                    writeln!(out, "  {}", allocation.kind)?;
                    writeln!(out, "    {:<12} {:>12} {:>10}", "Category", "Closing Rank", "Percentile")?;
                    for (category, cutoff) in allocation.cutoffs() {
                        writeln!(
                            out,
                            "    {:<12} {:>12} {:>10}",
                            category,
                            cutoff.rank,
                            format_percentile(cutoff.percentile)
                        )?;
                    }
                }
            }
            Ok(())
        }
    }
}

pub fn render_comparison<W: Write>(
    out: &mut W,
    format: OutputFormat,
    matrix: &ComparisonMatrix,
) -> Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        branch: &'a str,
        college_code: &'a str,
        allocation: Option<&'a str>,
        category: Option<&'a str>,
        rank: Option<u32>,
    }

    if matrix.colleges.is_empty() && format == OutputFormat::Table {
        writeln!(out, "No colleges selected for comparison.")?;
        return Ok(());
    }

    match format {
        OutputFormat::Json => write_json(out, matrix),
        OutputFormat::Csv => {
            let mut rows = Vec::new();
            for row in &matrix.branches {
                for (code, cell) in matrix.codes.iter().zip(&row.cells) {
                    match cell {
                        Some(cutoffs) => rows.extend(cutoffs.iter().map(|c| Row {
                            branch: &row.branch,
                            college_code: code,
                            allocation: Some(&c.allocation),
                            category: Some(&c.category),
                            rank: Some(c.rank),
                        })),
                        None => rows.push(Row {
                            branch: &row.branch,
                            college_code: code,
                            allocation: None,
                            category: None,
                            rank: None,
                        }),
                    }
                }
            }
            write_csv(out, rows)
        }
        OutputFormat::Table => {
            let header = |label: &str, values: Vec<String>, out: &mut W| -> Result<()> {
                writeln!(out, "{:<24} {}", label, values.join(" | "))?;
                Ok(())
            };

            header("College Details", matrix.colleges.clone(), out)?;
            header("University", matrix.university.clone(), out)?;
            header("Status", matrix.status.clone(), out)?;
            header("Admission Type", matrix.admission_type.clone(), out)?;
            header(
                "Number of Branches",
                matrix.branch_count.iter().map(|n| n.to_string()).collect(),
                out,
            )?;
            writeln!(out)?;
            writeln!(out, "Branches & Cutoffs")?;

            for row in &matrix.branches {
                let cells = row
                    .cells
                    .iter()
                    .map(|cell| match cell {
                        None => "N/A".to_string(),
                        Some(cutoffs) => cutoffs
                            .iter()
                            .map(|c| format!("{}: Rank {} ({})", c.allocation, c.rank, c.category))
                            .collect::<Vec<_>>()
                            .join("; "),
                    })
                    .collect();
                header(&row.branch, cells, out)?;
            }
            Ok(())
        }
    }
}

pub fn render_min_rank<W: Write>(
    out: &mut W,
    format: OutputFormat,
    category: &str,
    rank: Option<u32>,
) -> Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        category: &'a str,
        min_rank: Option<u32>,
    }

    let row = Row {
        category,
        min_rank: rank,
    };

    match format {
        OutputFormat::Json => write_json(out, &row),
        OutputFormat::Csv => write_csv(out, [row]),
        OutputFormat::Table => {
            match rank {
                Some(rank) => writeln!(out, "Best closing rank for {}: {}", category, rank)?,
                None => writeln!(out, "No cutoffs recorded for category {}", category)?,
            }
            Ok(())
        }
    }
}

pub fn render_issues<W: Write>(out: &mut W, format: OutputFormat, issues: &[DatasetIssue]) -> Result<()> {
    #[derive(Serialize)]
    struct Row {
        kind: &'static str,
        message: String,
    }

    match format {
        OutputFormat::Json => write_json(out, issues),
        OutputFormat::Csv => write_csv(
            out,
            issues.iter().map(|issue| Row {
                kind: issue.kind(),
                message: issue.to_string(),
            }),
        ),
        OutputFormat::Table => {
            if issues.is_empty() {
                writeln!(out, "Dataset OK")?;
            }
            for issue in issues {
                writeln!(out, "{}", issue)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compare::ComparisonSet;
    use crate::core::search::SearchRequest;
    use crate::core::Dataset;

    fn dataset() -> Dataset {
        serde_json::from_value(serde_json::json!({
            "institutes": [
                {"institute": {
                    "code": "C1", "name": "Alpha", "university": "U1",
                    "status": "Autonomous", "admission_type": "CAP",
                    "branches": [
                        {"code": "CS", "name": "Computer", "seat_allocations": {
                            "HOME": {"type": "Home State", "categories": {
                                "GOPENS": {"rank": 500, "percentile": 98.5}
                            }}
                        }}
                    ]
                }},
                {"institute": {
                    "code": "C2", "name": "Beta", "university": "U2",
                    "status": "Government", "admission_type": "Direct",
                    "branches": [
                        {"code": "CE", "name": "Civil", "seat_allocations": {
                            "HOME": {"type": "Home State", "categories": {
                                "GOPENS": {"rank": 9000, "percentile": 70.0}
                            }}
                        }}
                    ]
                }}
            ]
        }))
        .unwrap()
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_search_table_and_csv() {
        let d = dataset();
        let outcome = SearchRequest::new(600, "GOPENS").unwrap().run(&d);

        let table = render(|out| render_search(out, OutputFormat::Table, &outcome, 3));
        assert!(table.starts_with("Found 1 colleges where you are eligible"));
        assert!(table.contains("Beta [C2]"));
        assert!(table.contains("    - Civil"));

        let csv = render(|out| render_search(out, OutputFormat::Csv, &outcome, 3));
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("college_code,college,university,status,admission_type,branch_code,branch")
        );
        assert_eq!(lines.next(), Some("C2,Beta,U2,Government,Direct,CE,Civil"));
    }

    #[test]
    fn test_details_table_formats_percentile() {
        let d = dataset();
        let table = render(|out| render_details(out, OutputFormat::Table, &d.institutes[0]));
        assert!(table.contains("Computer (Branch Code: CS)"));
        assert!(table.contains("Home State"));
        assert!(table.contains("98.50"));
    }

    #[test]
    fn test_details_json_round_trips_institute() {
        let d = dataset();
        let json = render(|out| render_details(out, OutputFormat::Json, &d.institutes[1]));
        let parsed: Institute = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d.institutes[1]);
    }

    #[test]
    fn test_comparison_table_marks_missing_branches() {
        let d = dataset();
        let set = ComparisonSet::from_param(&d, "C1,C2");
        let matrix = ComparisonMatrix::build(&set);
        let table = render(|out| render_comparison(out, OutputFormat::Table, &matrix));
        assert!(table.contains("Alpha | Beta"));
        assert!(table.contains("Home State: Rank 500 (GOPENS) | N/A"));

        let empty = ComparisonMatrix::build(&ComparisonSet::new());
        let table = render(|out| render_comparison(out, OutputFormat::Table, &empty));
        assert_eq!(table.trim(), "No colleges selected for comparison.");
    }

    #[test]
    fn test_issues_follow_output_format() {
        let issues = vec![
            DatasetIssue::DuplicateInstitute { code: "C1".into() },
            DatasetIssue::ZeroRank {
                institute: "C2".into(),
                branch: "CE".into(),
                category: "GOPENS".into(),
            },
        ];

        let json = render(|out| render_issues(out, OutputFormat::Json, &issues));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "duplicate_institute");
        assert_eq!(value[0]["code"], "C1");
        assert_eq!(value[1]["kind"], "zero_rank");
        assert_eq!(value[1]["category"], "GOPENS");

        let csv = render(|out| render_issues(out, OutputFormat::Csv, &issues));
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("kind,message"));
        assert_eq!(lines.next(), Some("duplicate_institute,duplicate institute code C1"));
        assert_eq!(lines.next(), Some("zero_rank,rank 0 for GOPENS in C2/CE"));

        let table = render(|out| render_issues(out, OutputFormat::Table, &[]));
        assert_eq!(table.trim(), "Dataset OK");
        let empty_json = render(|out| render_issues(out, OutputFormat::Json, &[]));
        assert_eq!(empty_json.trim(), "[]");
    }

    #[test]
    fn test_min_rank_outputs() {
        let table = render(|out| render_min_rank(out, OutputFormat::Table, "GOPENS", Some(500)));
        assert_eq!(table.trim(), "Best closing rank for GOPENS: 500");

        let missing = render(|out| render_min_rank(out, OutputFormat::Table, "NOPE", None));
        assert_eq!(missing.trim(), "No cutoffs recorded for category NOPE");

        let json = render(|out| render_min_rank(out, OutputFormat::Json, "GOPENS", Some(500)));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["min_rank"], 500);
    }
}
