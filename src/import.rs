// 📥 CSV Import - seed the rosters from a `team,name` file
//
// Rows go through `RosterStore::add`, so blank names are dropped the same
// way as interactive input. An unknown team aborts the import.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{Result, ShuffleError};
use crate::roster::{RosterId, RosterStore};

#[derive(Debug, Deserialize)]
struct MemberRow {
    team: String,
    name: String,
}

/// Summary of one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped_blank: usize,
}

/// Read `team,name` rows (header required) into `store`.
///
/// Errors carry the file line: the header is line 1, the first row line 2.
pub fn read_csv<R: Read>(reader: R, store: &mut RosterStore) -> Result<ImportSummary> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut summary = ImportSummary::default();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize);
        let row: MemberRow = record.deserialize(Some(&headers))?;

        let team: RosterId = row.team.parse().map_err(|_| ShuffleError::InvalidRoster {
            value: row.team.clone(),
            line,
        })?;

        match store.add(team, &row.name) {
            Some(_) => summary.added += 1,
            None => summary.skipped_blank += 1,
        }
    }

    info!(
        added = summary.added,
        skipped = summary.skipped_blank,
        "roster import finished"
    );
    Ok(summary)
}

/// Load a CSV file into `store`
pub fn load_csv<P: AsRef<Path>>(path: P, store: &mut RosterStore) -> Result<ImportSummary> {
    let file = File::open(path.as_ref())?;
    read_csv(file, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(store: &RosterStore, id: RosterId) -> Vec<String> {
        store
            .roster(id)
            .members()
            .iter()
            .map(|m| m.name.clone())
            .collect()
    }

    #[test]
    fn test_import_both_teams() {
        let data = "team,name\nA,Alice\nb, Bob \nA,Carol\n";
        let mut store = RosterStore::new();

        let summary = read_csv(data.as_bytes(), &mut store).unwrap();

        assert_eq!(summary, ImportSummary { added: 3, skipped_blank: 0 });
        assert_eq!(names(&store, RosterId::A), vec!["Alice", "Carol"]);
        assert_eq!(names(&store, RosterId::B), vec!["Bob"]);
    }

    #[test]
    fn test_import_skips_blank_names() {
        let data = "team,name\nA,\nA,\"   \"\nB,Dana\n";
        let mut store = RosterStore::new();

        let summary = read_csv(data.as_bytes(), &mut store).unwrap();

        assert_eq!(summary.added, 1);
        assert_eq!(summary.skipped_blank, 2);
        assert_eq!(store.total_len(), 1);
    }

    #[test]
    fn test_import_unknown_team_reports_line() {
        let data = "team,name\nA,Alice\nC,Eve\n";
        let mut store = RosterStore::new();

        let err = read_csv(data.as_bytes(), &mut store).unwrap_err();
        match err {
            ShuffleError::InvalidRoster { value, line } => {
                assert_eq!(value, "C");
                assert_eq!(line, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_import_missing_column_is_csv_error() {
        let data = "team\nA\n";
        let mut store = RosterStore::new();

        let err = read_csv(data.as_bytes(), &mut store).unwrap_err();
        assert!(matches!(err, ShuffleError::Csv(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let mut store = RosterStore::new();
        let err = load_csv("/nonexistent/members.csv", &mut store).unwrap_err();
        assert!(matches!(err, ShuffleError::Io(_)));
    }
}
