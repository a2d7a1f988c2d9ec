//! Standings export as CSV and printable HTML.
//!
//! Both renderers are pure: the export date is formatted from a time the
//! caller passes in, so the same input always renders the same bytes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::standings::{ClassTally, DepartmentTally, Standings};

/// Everything an export needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub title: String,
    pub classes: Vec<ClassTally>,
    pub departments: Vec<DepartmentTally>,
    pub total_winners: usize,
    pub export_date: String,
}

impl ExportData {
    /// Build export data from computed standings.
    #[must_use]
    pub fn from_standings(standings: Standings, council_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            title: format!("{council_name} - Medal Standings"),
            classes: standings.classes,
            departments: standings.departments,
            total_winners: standings.total_winners,
            export_date: format_export_date(now),
        }
    }
}

/// Long US-style timestamp, e.g. `October 16, 2026 at 09:30 AM`.
#[must_use]
pub fn format_export_date(now: DateTime<Utc>) -> String {
    now.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// Download filename for a CSV export made on `date`.
#[must_use]
pub fn csv_filename(date: NaiveDate) -> String {
    format!("standings-{}.csv", date.format("%Y-%m-%d"))
}

/// Quote a CSV field only when it needs it.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render the standings as CSV.
#[must_use]
pub fn to_csv(data: &ExportData) -> String {
    let mut lines: Vec<String> = vec![
        csv_field(&data.title),
        csv_field(&format!("Export Date: {}", data.export_date)),
        String::new(),
        "CLASS STANDINGS".to_string(),
        "Rank,Class,Department,Gold,Silver,Bronze,Total".to_string(),
    ];

    for (i, class) in data.classes.iter().enumerate() {
        let m = &class.medals;
        lines.push(format!(
            "{},{},{},{},{},{},{}",
            i + 1,
            csv_field(&class.class_name),
            csv_field(&class.department),
            m.gold,
            m.silver,
            m.bronze,
            m.total
        ));
    }

    lines.push(String::new());
    lines.push("DEPARTMENT STANDINGS".to_string());
    lines.push("Rank,Department,Gold,Silver,Bronze,Total".to_string());

    for (i, dept) in data.departments.iter().enumerate() {
        let m = &dept.medals;
        lines.push(format!(
            "{},{},{},{},{},{}",
            i + 1,
            csv_field(&dept.department),
            m.gold,
            m.silver,
            m.bronze,
            m.total
        ));
    }

    lines.push(String::new());
    lines.push("SUMMARY".to_string());
    lines.push(format!("Total Winners: {}", data.total_winners));
    lines.push(format!("Total Classes: {}", data.classes.len()));
    lines.push(format!("Total Departments: {}", data.departments.len()));

    lines.join("\n")
}

/// Escape text for use in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PRINT_STYLES: &str = "\
    body { font-family: Arial, sans-serif; margin: 20px; }
    h1 { color: #333; text-align: center; }
    h2 { color: #666; border-bottom: 2px solid #ddd; padding-bottom: 5px; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; }
    th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
    th { background-color: #f2f2f2; font-weight: bold; }
    .gold { color: #FFD700; font-weight: bold; }
    .silver { color: #C0C0C0; font-weight: bold; }
    .bronze { color: #CD7F32; font-weight: bold; }
    .summary { background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin: 20px 0; }";

/// Render the standings as a printable HTML document.
#[must_use]
pub fn to_printable_html(data: &ExportData) -> String {
    let title = escape_html(&data.title);

    let class_rows: String = data
        .classes
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"gold\">{}</td>\
                 <td class=\"silver\">{}</td><td class=\"bronze\">{}</td>\
                 <td><strong>{}</strong></td></tr>\n",
                i + 1,
                escape_html(&c.class_name),
                escape_html(&c.department),
                c.medals.gold,
                c.medals.silver,
                c.medals.bronze,
                c.medals.total
            )
        })
        .collect();

    let dept_rows: String = data
        .departments
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td class=\"gold\">{}</td>\
                 <td class=\"silver\">{}</td><td class=\"bronze\">{}</td>\
                 <td><strong>{}</strong></td></tr>\n",
                i + 1,
                escape_html(&d.department),
                d.medals.gold,
                d.medals.silver,
                d.medals.bronze,
                d.medals.total
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
{PRINT_STYLES}
</style>
</head>
<body>
<h1>{title}</h1>
<p style="text-align: center; color: #666;">Export Date: {date}</p>
<h2>Class Standings</h2>
<table>
<thead>
<tr><th>Rank</th><th>Class</th><th>Department</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>
</thead>
<tbody>
{class_rows}</tbody>
</table>
<h2>Department Standings</h2>
<table>
<thead>
<tr><th>Rank</th><th>Department</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>
</thead>
<tbody>
{dept_rows}</tbody>
</table>
<div class="summary">
<h3>Summary</h3>
<p><strong>Total Winners:</strong> {winners}</p>
<p><strong>Total Classes:</strong> {classes}</p>
<p><strong>Total Departments:</strong> {departments}</p>
</div>
</body>
</html>
"#,
        date = escape_html(&data.export_date),
        winners = data.total_winners,
        classes = data.classes.len(),
        departments = data.departments.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::standings::{
        StandingsQuery, WinnerRecord, build_standings, tally_by_class,
    };
    use chrono::TimeZone;
    use council_db::entities::winner::Medal;

    fn record(class: &str, dept: &str, medal: Medal) -> WinnerRecord {
        WinnerRecord {
            student_name: "Student".to_string(),
            class_name: class.to_string(),
            department: dept.to_string(),
            medal,
            event_name: Some("Quiz".to_string()),
            fest_name: Some("Aurora".to_string()),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    fn sample() -> ExportData {
        let winners = vec![
            record("CSE-A", "CS", Medal::Gold),
            record("CSE-A", "CS", Medal::Silver),
            record("IT-B", "IT", Medal::Gold),
        ];
        let standings = build_standings(&winners, &StandingsQuery::default());
        ExportData::from_standings(standings, "XIE Student Council", fixed_now())
    }

    #[test]
    fn test_export_date_format() {
        assert_eq!(format_export_date(fixed_now()), "October 16, 2026 at 09:30 AM");
    }

    #[test]
    fn test_csv_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(csv_filename(date), "standings-2026-03-07.csv");
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "XIE Student Council - Medal Standings");
        assert_eq!(lines[1], "Export Date: October 16, 2026 at 09:30 AM");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "CLASS STANDINGS");
        assert_eq!(lines[4], "Rank,Class,Department,Gold,Silver,Bronze,Total");
        assert_eq!(lines[5], "1,CSE-A,CS,1,1,0,2");
        assert_eq!(lines[6], "2,IT-B,IT,1,0,0,1");
        assert_eq!(lines[8], "DEPARTMENT STANDINGS");
        assert_eq!(lines[10], "1,CS,1,1,0,2");
        assert_eq!(lines[13], "SUMMARY");
        assert_eq!(lines[14], "Total Winners: 3");
        assert_eq!(lines[15], "Total Classes: 2");
        assert_eq!(lines[16], "Total Departments: 2");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_csv_class_section_parses_back_in_order() {
        let winners = vec![
            record("A", "X", Medal::Bronze),
            record("B", "Y", Medal::Gold),
            record("C", "X", Medal::Silver),
            record("B", "Y", Medal::Bronze),
        ];
        let standings = build_standings(&winners, &StandingsQuery::default());
        let expected = tally_by_class(&winners);
        let data = ExportData::from_standings(standings, "Council", fixed_now());

        let csv = to_csv(&data);
        let parsed: Vec<(String, String, u32, u32, u32, u32)> = csv
            .lines()
            .skip_while(|l| *l != "Rank,Class,Department,Gold,Silver,Bronze,Total")
            .skip(1)
            .take_while(|l| !l.is_empty())
            .map(|l| {
                let f: Vec<&str> = l.split(',').collect();
                (
                    f[1].to_string(),
                    f[2].to_string(),
                    f[3].parse().unwrap(),
                    f[4].parse().unwrap(),
                    f[5].parse().unwrap(),
                    f[6].parse().unwrap(),
                )
            })
            .collect();

        let want: Vec<(String, String, u32, u32, u32, u32)> = expected
            .iter()
            .map(|t| {
                (
                    t.class_name.clone(),
                    t.department.clone(),
                    t.medals.gold,
                    t.medals.silver,
                    t.medals.bronze,
                    t.medals.total,
                )
            })
            .collect();
        assert_eq!(parsed, want);
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        let winners = vec![record("SE, A", "Comp \"Eng\"", Medal::Gold)];
        let standings = build_standings(&winners, &StandingsQuery::default());
        let data = ExportData::from_standings(standings, "Council", fixed_now());

        let csv = to_csv(&data);

        assert!(csv.contains("1,\"SE, A\",\"Comp \"\"Eng\"\"\",1,0,0,1"));
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(to_csv(&sample()), to_csv(&sample()));
        assert_eq!(to_printable_html(&sample()), to_printable_html(&sample()));
    }

    #[test]
    fn test_html_contains_tables_and_summary() {
        let html = to_printable_html(&sample());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>XIE Student Council - Medal Standings</title>"));
        assert_eq!(html.matches("<table>").count(), 2);
        assert!(html.contains("<td class=\"gold\">1</td>"));
        assert!(html.contains("<div class=\"summary\">"));
        assert!(html.contains("<strong>Total Winners:</strong> 3"));
    }

    #[test]
    fn test_html_escapes_names() {
        let winners = vec![record("<script>", "R&D", Medal::Gold)];
        let standings = build_standings(&winners, &StandingsQuery::default());
        let data = ExportData::from_standings(standings, "Council", fixed_now());

        let html = to_printable_html(&data);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("R&amp;D"));
    }
}
