//! Medal standings aggregation.
//!
//! Winners are grouped by class, department or fest and ranked by medal
//! counts. Class and department tallies rank gold first, then silver, then
//! bronze; fest rows rank by total only. Grouping keys are compared verbatim.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use council_common::AppResult;
use council_db::entities::{fest::FestType, winner::Medal};
use council_db::repositories::{KeyedMedal, WinnerRepository, WinnerWithEvent};
use serde::{Deserialize, Serialize};

use super::export::ExportData;

/// Label used when a winner's event row is missing.
pub const UNKNOWN_EVENT: &str = "Unknown Event";

/// Label used when a winner's fest row is missing.
pub const UNKNOWN_FEST: &str = "Unknown Fest";

/// Filter value that keeps every fest.
pub const ALL_FESTS: &str = "all";

/// Gold, silver and bronze counts plus their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MedalCount {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

impl MedalCount {
    /// Count one more medal.
    pub const fn add(&mut self, medal: Medal) {
        match medal {
            Medal::Gold => self.gold += 1,
            Medal::Silver => self.silver += 1,
            Medal::Bronze => self.bronze += 1,
        }
        self.total += 1;
    }

    /// Whether at least one medal of this kind was won.
    #[must_use]
    pub const fn has(&self, medal: Medal) -> bool {
        match medal {
            Medal::Gold => self.gold > 0,
            Medal::Silver => self.silver > 0,
            Medal::Bronze => self.bronze > 0,
        }
    }

    fn rank_order(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.gold
            .cmp(&a.gold)
            .then(b.silver.cmp(&a.silver))
            .then(b.bronze.cmp(&a.bronze))
    }
}

/// A winner flattened with its event and fest names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRecord {
    pub student_name: String,
    pub class_name: String,
    pub department: String,
    pub medal: Medal,
    pub event_name: Option<String>,
    pub fest_name: Option<String>,
}

impl From<&WinnerWithEvent> for WinnerRecord {
    fn from(row: &WinnerWithEvent) -> Self {
        Self {
            student_name: row.winner.student_name.clone(),
            class_name: row.winner.class_name.clone(),
            department: row.winner.department.clone(),
            medal: row.winner.medal,
            event_name: Some(
                row.event
                    .as_ref()
                    .map_or_else(|| UNKNOWN_EVENT.to_string(), |e| e.name.clone()),
            ),
            fest_name: Some(
                row.fest
                    .as_ref()
                    .map_or_else(|| UNKNOWN_FEST.to_string(), |f| f.name.clone()),
            ),
        }
    }
}

/// Medal tally for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTally {
    pub class_name: String,
    /// Department of the first winner seen for this class.
    pub department: String,
    pub medals: MedalCount,
    pub rank: usize,
    pub events: Vec<String>,
}

/// Medal tally for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentTally {
    pub department: String,
    pub medals: MedalCount,
    pub rank: usize,
    pub classes: Vec<String>,
    pub events: Vec<String>,
}

/// One bar of a medal chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FestChartRow {
    pub name: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

/// Totals and shares across a set of tallies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedalDistribution {
    pub total: u32,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub gold_percentage: f64,
    pub silver_percentage: f64,
    pub bronze_percentage: f64,
}

/// Anything with a display label and a medal count.
pub trait MedalTally {
    fn label(&self) -> &str;
    fn medals(&self) -> &MedalCount;
}

impl MedalTally for ClassTally {
    fn label(&self) -> &str {
        &self.class_name
    }

    fn medals(&self) -> &MedalCount {
        &self.medals
    }
}

impl MedalTally for DepartmentTally {
    fn label(&self) -> &str {
        &self.department
    }

    fn medals(&self) -> &MedalCount {
        &self.medals
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Group winners by class name and rank them.
#[must_use]
pub fn tally_by_class(winners: &[WinnerRecord]) -> Vec<ClassTally> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<ClassTally> = Vec::new();

    for winner in winners {
        let slot = *index.entry(winner.class_name.as_str()).or_insert_with(|| {
            tallies.push(ClassTally {
                class_name: winner.class_name.clone(),
                department: winner.department.clone(),
                medals: MedalCount::default(),
                rank: 0,
                events: Vec::new(),
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.medals.add(winner.medal);
        if let Some(event) = winner.event_name.as_deref().filter(|e| !e.is_empty()) {
            push_unique(&mut tally.events, event);
        }
    }

    // Stable: equal medal counts keep first-seen order.
    tallies.sort_by(|a, b| MedalCount::rank_order(&a.medals, &b.medals));
    for (i, tally) in tallies.iter_mut().enumerate() {
        tally.rank = i + 1;
    }

    tallies
}

/// Group winners by department and rank them.
#[must_use]
pub fn tally_by_department(winners: &[WinnerRecord]) -> Vec<DepartmentTally> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<DepartmentTally> = Vec::new();

    for winner in winners {
        let slot = *index.entry(winner.department.as_str()).or_insert_with(|| {
            tallies.push(DepartmentTally {
                department: winner.department.clone(),
                medals: MedalCount::default(),
                rank: 0,
                classes: Vec::new(),
                events: Vec::new(),
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.medals.add(winner.medal);
        push_unique(&mut tally.classes, &winner.class_name);
        if let Some(event) = winner.event_name.as_deref().filter(|e| !e.is_empty()) {
            push_unique(&mut tally.events, event);
        }
    }

    tallies.sort_by(|a, b| MedalCount::rank_order(&a.medals, &b.medals));
    for (i, tally) in tallies.iter_mut().enumerate() {
        tally.rank = i + 1;
    }

    tallies
}

/// Medal counts per fest name, largest total first.
#[must_use]
pub fn tally_by_fest(winners: &[WinnerRecord]) -> Vec<FestChartRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<FestChartRow> = Vec::new();

    for winner in winners {
        let name = winner
            .fest_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_FEST);

        let slot = *index.entry(name).or_insert_with(|| {
            rows.push(FestChartRow {
                name: name.to_string(),
                gold: 0,
                silver: 0,
                bronze: 0,
                total: 0,
            });
            rows.len() - 1
        });

        let row = &mut rows[slot];
        match winner.medal {
            Medal::Gold => row.gold += 1,
            Medal::Silver => row.silver += 1,
            Medal::Bronze => row.bronze += 1,
        }
        row.total += 1;
    }

    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Convert tallies into chart rows, keeping their order.
#[must_use]
pub fn chart_rows<T: MedalTally>(tallies: &[T]) -> Vec<FestChartRow> {
    tallies
        .iter()
        .map(|t| {
            let m = t.medals();
            FestChartRow {
                name: t.label().to_string(),
                gold: m.gold,
                silver: m.silver,
                bronze: m.bronze,
                total: m.total,
            }
        })
        .collect()
}

/// Sum medal counts across tallies.
#[must_use]
pub fn medal_distribution<T: MedalTally>(tallies: &[T]) -> MedalDistribution {
    let mut sum = MedalCount::default();
    for t in tallies {
        let m = t.medals();
        sum.gold += m.gold;
        sum.silver += m.silver;
        sum.bronze += m.bronze;
        sum.total += m.total;
    }

    let pct = |n: u32| {
        if sum.total == 0 {
            0.0
        } else {
            f64::from(n) / f64::from(sum.total) * 100.0
        }
    };

    MedalDistribution {
        total: sum.total,
        gold: sum.gold,
        silver: sum.silver,
        bronze: sum.bronze,
        gold_percentage: pct(sum.gold),
        silver_percentage: pct(sum.silver),
        bronze_percentage: pct(sum.bronze),
    }
}

/// Keep winners of one fest (by exact name). `"all"` keeps everything.
#[must_use]
pub fn filter_by_fest(winners: &[WinnerRecord], fest: &str) -> Vec<WinnerRecord> {
    if fest == ALL_FESTS {
        return winners.to_vec();
    }
    winners
        .iter()
        .filter(|w| w.fest_name.as_deref() == Some(fest))
        .cloned()
        .collect()
}

/// The first `count` tallies.
#[must_use]
pub fn top_performers<T: Clone>(tallies: &[T], count: usize) -> Vec<T> {
    tallies.iter().take(count).cloned().collect()
}

/// Winners of one fest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FestWinners {
    pub fest_id: Option<String>,
    pub fest_name: String,
    pub fest_type: Option<FestType>,
    pub winners: Vec<WinnerRecord>,
}

/// Group joined winner rows per fest, in first-seen order.
#[must_use]
pub fn group_by_fest(rows: &[WinnerWithEvent]) -> Vec<FestWinners> {
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<FestWinners> = Vec::new();

    for row in rows {
        let key = row.fest.as_ref().map(|f| f.id.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(FestWinners {
                fest_id: row.fest.as_ref().map(|f| f.id.clone()),
                fest_name: row
                    .fest
                    .as_ref()
                    .map_or_else(|| UNKNOWN_FEST.to_string(), |f| f.name.clone()),
                fest_type: row.fest.as_ref().map(|f| f.fest_type),
                winners: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].winners.push(WinnerRecord::from(row));
    }

    groups
}

/// Medal count for one grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyedMedalCount {
    pub key: String,
    pub medals: MedalCount,
}

/// Fold `(key, medal)` rows into per-key counts, in first-seen order.
#[must_use]
pub fn fold_medal_counts(rows: &[KeyedMedal]) -> Vec<KeyedMedalCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeyedMedalCount> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.key.as_str()).or_insert_with(|| {
            counts.push(KeyedMedalCount {
                key: row.key.clone(),
                medals: MedalCount::default(),
            });
            counts.len() - 1
        });
        counts[slot].medals.add(row.medal);
    }

    counts
}

/// Optional filters for the standings view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsQuery {
    /// Fest name, or `"all"`.
    #[serde(default)]
    pub fest: Option<String>,
    /// Case-insensitive substring of class or department.
    #[serde(default)]
    pub search: Option<String>,
    /// Keep only tallies with at least one medal of this kind.
    #[serde(default)]
    pub medal: Option<Medal>,
}

/// Everything the standings page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    pub classes: Vec<ClassTally>,
    pub departments: Vec<DepartmentTally>,
    pub fests: Vec<FestChartRow>,
    pub distribution: MedalDistribution,
    pub total_winners: usize,
}

/// Build standings from winner records.
///
/// The fest filter narrows the winners before tallying. Search and medal
/// filters only hide tallies; ranks stay as computed.
#[must_use]
pub fn build_standings(records: &[WinnerRecord], query: &StandingsQuery) -> Standings {
    let fest = query.fest.as_deref().unwrap_or(ALL_FESTS);
    let winners = filter_by_fest(records, fest);

    let classes = tally_by_class(&winners);
    let departments = tally_by_department(&winners);
    let fests = tally_by_fest(&winners);
    let distribution = medal_distribution(&classes);

    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let matches = |text: &str| {
        needle
            .as_deref()
            .is_none_or(|n| text.to_lowercase().contains(n))
    };
    let has_medal = |m: &MedalCount| query.medal.is_none_or(|medal| m.has(medal));

    Standings {
        classes: classes
            .into_iter()
            .filter(|c| (matches(&c.class_name) || matches(&c.department)) && has_medal(&c.medals))
            .collect(),
        departments: departments
            .into_iter()
            .filter(|d| matches(&d.department) && has_medal(&d.medals))
            .collect(),
        fests,
        distribution,
        total_winners: winners.len(),
    }
}

/// Service that loads winners and aggregates standings.
#[derive(Clone)]
pub struct StandingsService {
    winner_repo: WinnerRepository,
}

impl StandingsService {
    /// Create a new standings service.
    #[must_use]
    pub const fn new(winner_repo: WinnerRepository) -> Self {
        Self { winner_repo }
    }

    /// All winners as flat records.
    pub async fn records(&self) -> AppResult<Vec<WinnerRecord>> {
        let rows = self.winner_repo.find_all_with_event().await?;
        Ok(rows.iter().map(WinnerRecord::from).collect())
    }

    /// Standings with optional filters.
    pub async fn standings(&self, query: &StandingsQuery) -> AppResult<Standings> {
        let records = self.records().await?;
        Ok(build_standings(&records, query))
    }

    /// Winners grouped per fest.
    pub async fn winners_by_fest(&self) -> AppResult<Vec<FestWinners>> {
        let rows = self.winner_repo.find_all_with_event().await?;
        Ok(group_by_fest(&rows))
    }

    /// Medal counts per department.
    pub async fn department_medal_counts(&self) -> AppResult<Vec<KeyedMedalCount>> {
        let rows = self.winner_repo.department_medals().await?;
        Ok(fold_medal_counts(&rows))
    }

    /// Medal counts per class.
    pub async fn class_medal_counts(&self) -> AppResult<Vec<KeyedMedalCount>> {
        let rows = self.winner_repo.class_medals().await?;
        Ok(fold_medal_counts(&rows))
    }

    /// Unfiltered standings packaged for export.
    pub async fn export_data(
        &self,
        council_name: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ExportData> {
        let standings = self.standings(&StandingsQuery::default()).await?;
        Ok(ExportData::from_standings(standings, council_name, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn in_fest(mut r: WinnerRecord, fest: &str, event: &str) -> WinnerRecord {
        r.fest_name = Some(fest.to_string());
        r.event_name = Some(event.to_string());
        r
    }

    #[test]
    fn test_class_tally_ranks_silver_as_tiebreak() {
        let winners = vec![
            record("CSE-A", "CS", Medal::Gold),
            record("CSE-A", "CS", Medal::Silver),
            record("IT-B", "IT", Medal::Gold),
        ];

        let tally = tally_by_class(&winners);

        assert_eq!(tally.len(), 2);
        assert_eq!(tally[0].class_name, "CSE-A");
        assert_eq!(
            tally[0].medals,
            MedalCount {
                gold: 1,
                silver: 1,
                bronze: 0,
                total: 2
            }
        );
        assert_eq!(tally[0].rank, 1);
        assert_eq!(tally[1].class_name, "IT-B");
        assert_eq!(tally[1].medals.total, 1);
        assert_eq!(tally[1].rank, 2);
    }

    #[test]
    fn test_class_tally_totals_match_winner_count() {
        let winners = vec![
            record("A", "X", Medal::Gold),
            record("B", "X", Medal::Bronze),
            record("A", "X", Medal::Bronze),
            record("C", "Y", Medal::Silver),
            record("B", "X", Medal::Bronze),
        ];

        let tally = tally_by_class(&winners);
        let sum: u32 = tally.iter().map(|t| t.medals.total).sum();

        assert_eq!(sum as usize, winners.len());
    }

    #[test]
    fn test_class_tally_sorted_gold_silver_bronze() {
        let winners = vec![
            record("A", "X", Medal::Bronze),
            record("A", "X", Medal::Bronze),
            record("A", "X", Medal::Bronze),
            record("B", "X", Medal::Silver),
            record("C", "Y", Medal::Gold),
            record("D", "Y", Medal::Silver),
            record("D", "Y", Medal::Bronze),
        ];

        let tally = tally_by_class(&winners);
        let names: Vec<&str> = tally.iter().map(|t| t.class_name.as_str()).collect();
        assert_eq!(names, vec!["C", "D", "B", "A"]);

        for pair in tally.windows(2) {
            let (a, b) = (&pair[0].medals, &pair[1].medals);
            assert!(a.gold >= b.gold);
            if a.gold == b.gold {
                assert!(a.silver >= b.silver);
                if a.silver == b.silver {
                    assert!(a.bronze >= b.bronze);
                }
            }
        }
    }

    #[test]
    fn test_class_tally_ties_keep_first_seen_order() {
        let winners = vec![
            record("Second", "X", Medal::Gold),
            record("First", "X", Medal::Gold),
        ];

        let tally = tally_by_class(&winners);

        assert_eq!(tally[0].class_name, "Second");
        assert_eq!(tally[1].class_name, "First");
        assert_eq!(tally[1].rank, 2);
    }

    #[test]
    fn test_class_tally_uses_first_department_and_distinct_events() {
        let winners = vec![
            in_fest(record("A", "CS", Medal::Gold), "Aurora", "Quiz"),
            in_fest(record("A", "IT", Medal::Gold), "Aurora", "Quiz"),
            in_fest(record("A", "IT", Medal::Silver), "Aurora", "Debate"),
        ];

        let tally = tally_by_class(&winners);

        assert_eq!(tally[0].department, "CS");
        assert_eq!(tally[0].events, vec!["Quiz", "Debate"]);
    }

    #[test]
    fn test_class_names_are_not_normalized() {
        let winners = vec![
            record("CSE-A", "CS", Medal::Gold),
            record("cse-a", "CS", Medal::Gold),
            record("CSE-A ", "CS", Medal::Gold),
        ];

        assert_eq!(tally_by_class(&winners).len(), 3);
    }

    #[test]
    fn test_department_tally_collects_classes() {
        let winners = vec![
            record("SE-A", "Computer", Medal::Bronze),
            record("TE-A", "Computer", Medal::Gold),
            record("SE-A", "Computer", Medal::Silver),
            record("SE-B", "IT", Medal::Gold),
            record("SE-B", "IT", Medal::Gold),
        ];

        let tally = tally_by_department(&winners);

        assert_eq!(tally[0].department, "IT");
        assert_eq!(tally[0].medals.gold, 2);
        assert_eq!(tally[1].department, "Computer");
        assert_eq!(tally[1].classes, vec!["SE-A", "TE-A"]);
        assert_eq!(tally[1].medals.total, 3);
        assert_eq!(tally[1].rank, 2);
    }

    #[test]
    fn test_fest_tally_sorted_by_total_only() {
        let winners = vec![
            in_fest(record("A", "X", Medal::Gold), "Techfiesta", "Hackathon"),
            in_fest(record("A", "X", Medal::Bronze), "Spandan", "Dance"),
            in_fest(record("B", "X", Medal::Bronze), "Spandan", "Dance"),
        ];

        let rows = tally_by_fest(&winners);

        // Techfiesta has the only gold but fewer medals overall.
        assert_eq!(rows[0].name, "Spandan");
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[1].name, "Techfiesta");
        for pair in rows.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn test_fest_tally_falls_back_to_unknown() {
        let mut orphan = record("A", "X", Medal::Gold);
        orphan.fest_name = None;

        let rows = tally_by_fest(&[orphan]);

        assert_eq!(rows[0].name, UNKNOWN_FEST);
    }

    #[test]
    fn test_empty_input_yields_empty_tallies_and_zero_distribution() {
        let classes = tally_by_class(&[]);
        assert!(classes.is_empty());
        assert!(tally_by_department(&[]).is_empty());
        assert!(tally_by_fest(&[]).is_empty());

        let dist = medal_distribution(&classes);
        assert_eq!(dist.total, 0);
        assert_eq!(dist.gold, 0);
        assert!(dist.gold_percentage.abs() < f64::EPSILON);
        assert!(dist.silver_percentage.abs() < f64::EPSILON);
        assert!(dist.bronze_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_medal_distribution_percentages() {
        let winners = vec![
            record("A", "X", Medal::Gold),
            record("A", "X", Medal::Silver),
            record("B", "X", Medal::Silver),
            record("B", "X", Medal::Bronze),
        ];

        let dist = medal_distribution(&tally_by_class(&winners));

        assert_eq!(dist.total, 4);
        assert!((dist.gold_percentage - 25.0).abs() < 1e-9);
        assert!((dist.silver_percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_chart_rows_follow_tally_order() {
        let winners = vec![record("A", "X", Medal::Bronze), record("B", "Y", Medal::Gold)];
        let rows = chart_rows(&tally_by_class(&winners));

        assert_eq!(rows[0].name, "B");
        assert_eq!(rows[0].gold, 1);
        assert_eq!(rows[1].name, "A");
    }

    #[test]
    fn test_filter_by_fest() {
        let winners = vec![
            in_fest(record("A", "X", Medal::Gold), "Spandan", "Dance"),
            in_fest(record("B", "X", Medal::Gold), "Sparx", "Relay"),
        ];

        assert_eq!(filter_by_fest(&winners, ALL_FESTS).len(), 2);
        let spandan = filter_by_fest(&winners, "Spandan");
        assert_eq!(spandan.len(), 1);
        assert_eq!(spandan[0].class_name, "A");
    }

    #[test]
    fn test_top_performers_takes_prefix() {
        let winners = vec![
            record("A", "X", Medal::Gold),
            record("B", "X", Medal::Silver),
            record("C", "X", Medal::Bronze),
        ];
        let tally = tally_by_class(&winners);

        let top = top_performers(&tally, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].class_name, "B");
        assert_eq!(top_performers(&tally, 10).len(), 3);
    }

    #[test]
    fn test_fold_medal_counts() {
        let rows = vec![
            KeyedMedal {
                key: "Computer".to_string(),
                medal: Medal::Gold,
            },
            KeyedMedal {
                key: "IT".to_string(),
                medal: Medal::Silver,
            },
            KeyedMedal {
                key: "Computer".to_string(),
                medal: Medal::Bronze,
            },
        ];

        let counts = fold_medal_counts(&rows);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].key, "Computer");
        assert_eq!(counts[0].medals.total, 2);
        assert_eq!(counts[0].medals.bronze, 1);
        assert_eq!(counts[1].medals.silver, 1);
    }

    #[test]
    fn test_build_standings_filters_without_reranking() {
        let winners = vec![
            record("CSE-A", "CS", Medal::Gold),
            record("IT-B", "IT", Medal::Silver),
            record("MECH-C", "Mech", Medal::Bronze),
        ];

        let query = StandingsQuery {
            fest: None,
            search: Some("it".to_string()),
            medal: None,
        };
        let standings = build_standings(&winners, &query);

        assert_eq!(standings.classes.len(), 1);
        assert_eq!(standings.classes[0].class_name, "IT-B");
        assert_eq!(standings.classes[0].rank, 2);
        assert_eq!(standings.total_winners, 3);
        assert_eq!(standings.distribution.total, 3);

        let query = StandingsQuery {
            medal: Some(Medal::Bronze),
            ..StandingsQuery::default()
        };
        let standings = build_standings(&winners, &query);
        assert_eq!(standings.departments.len(), 1);
        assert_eq!(standings.departments[0].department, "Mech");
    }
}
