//! Static log corpora used across harnesses.

use rlogs::loaders::InMemoryStore;

pub const REGION: &str = "some-region";
pub const BUCKET: &str = "some-bucket";

/// Layout matching the `ts` fields below.
pub const TS_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// `magic/history.json`: five records, `{ts, name, number}`.
pub const HISTORY_LINES: &[&str] = &[
    r#"{"ts":"1902-10-10T10:00:00","name":"?","number":1}"#,
    r#"{"ts":"1929-10-10T10:00:00","name":"Parallel Worlds","number":2}"#,
    r#"{"ts":"1954-10-10T10:00:00","name":"Heaven's Feel","number":3}"#,
    r#"{"ts":"1983-10-10T10:00:00","name":"?","number":4}"#,
    r#"{"ts":"1991-10-10T10:00:00","name":"Blue","number":5}"#,
];

/// `http/log.json`: two access-log records, `{ts, src, port, path}`.
pub const HTTP_LINES: &[&str] = &[
    r#"{"ts":"2019-10-10T10:00:00","src":"10.1.2.3","port":34567,"path":"/hello"}"#,
    r#"{"ts":"2019-10-10T10:00:02","src":"10.2.3.4","port":45678,"path":"/world"}"#,
];

/// Lines interleaving valid records with each parse failure kind.
pub const MIXED_LINES: &[&str] = &[
    r#"{"ts":"2019-10-10T10:00:00","seq":0}"#,
    r#"{"ts":"2019-10-10T10:00:01","seq":1"#,
    r#"{"ts":"2019-10-10T10:00:02","seq":2}"#,
    r#"{"seq":3}"#,
    r#"{"ts":"2019/10/10 10:00:04","seq":4}"#,
    r#"{"ts":1570701605,"seq":5}"#,
    r#"{"ts":"2019-10-10T10:00:06","seq":6}"#,
];

/// Object body for a set of lines, newline-joined without a final newline.
pub fn body(lines: &[&str]) -> String {
    lines.join("\n")
}

/// A store holding the history, http and mixed objects under [`BUCKET`].
pub fn fixture_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_object(BUCKET, "magic/history.json", body(HISTORY_LINES))
        .with_object(BUCKET, "http/log.json", body(HTTP_LINES))
        .with_object(BUCKET, "mixed/log.json", body(MIXED_LINES))
}
