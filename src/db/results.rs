use rusqlite::{Connection, Result};

/// A finished quiz as stored in the result log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResult<'a> {
    pub user_name: &'a str,
    pub deck_name: &'a str,
    pub finished_at: i64,
    pub answers: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seconds: u64,
    pub export_file: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub id: i64,
    pub user_name: String,
    pub deck_name: String,
    pub finished_at: i64,
    pub answers: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seconds: u64,
    pub export_file: String,
}

pub fn record_result(conn: &Connection, result: &NewResult<'_>) -> Result<i64> {
    let total_seconds = i64::try_from(result.total_seconds).unwrap_or(i64::MAX);
    conn.execute(
        "INSERT INTO results (user_name, deck_name, finished_at, answers, correct, incorrect, total_seconds, export_file)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            result.user_name,
            result.deck_name,
            result.finished_at,
            result.answers,
            result.correct,
            result.incorrect,
            total_seconds,
            result.export_file
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Newest first.
pub fn list_recent_results(conn: &Connection, limit: usize) -> Result<Vec<ResultSummary>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(
        "SELECT id, user_name, deck_name, finished_at, answers, correct, incorrect, total_seconds, export_file
         FROM results ORDER BY finished_at DESC, id DESC LIMIT ?",
    )?;

    let rows = stmt.query_map([limit], |row| {
        let total_seconds: i64 = row.get(7)?;
        Ok(ResultSummary {
            id: row.get(0)?,
            user_name: row.get(1)?,
            deck_name: row.get(2)?,
            finished_at: row.get(3)?,
            answers: row.get(4)?,
            correct: row.get(5)?,
            incorrect: row.get(6)?,
            total_seconds: u64::try_from(total_seconds).unwrap_or(0),
            export_file: row.get(8)?,
        })
    })?;

    let results = rows.collect::<Result<Vec<_>>>()?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;

    fn sample(user_name: &'static str, finished_at: i64) -> NewResult<'static> {
        NewResult {
            user_name,
            deck_name: "animals",
            finished_at,
            answers: 3,
            correct: 2,
            incorrect: 1,
            total_seconds: 70,
            export_file: "taro_20250901_120000.csv",
        }
    }

    #[test]
    fn test_record_and_list() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let id = record_result(&conn, &sample("taro", 100)).unwrap();
        assert_eq!(id, 1);

        let results = list_recent_results(&conn, 10).unwrap();
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.user_name, "taro");
        assert_eq!(r.deck_name, "animals");
        assert_eq!((r.answers, r.correct, r.incorrect), (3, 2, 1));
        assert_eq!(r.total_seconds, 70);
        assert_eq!(r.export_file, "taro_20250901_120000.csv");
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        record_result(&conn, &sample("first", 100)).unwrap();
        record_result(&conn, &sample("third", 300)).unwrap();
        record_result(&conn, &sample("second", 200)).unwrap();

        let names: Vec<String> = list_recent_results(&conn, 2)
            .unwrap()
            .into_iter()
            .map(|r| r.user_name)
            .collect();
        assert_eq!(names, vec!["third", "second"]);
    }

    #[test]
    fn test_list_empty() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert!(list_recent_results(&conn, 5).unwrap().is_empty());
    }
}
