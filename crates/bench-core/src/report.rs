//! Console text for benchmark runs.

use std::time::Duration;

use bench_store::CollectionHandle;

use crate::metrics::ProgressSnapshot;

const RULE: &str = "--------------------------------------------------------------------- ";

/// Header printed before inserts start, one tab-aligned field per line.
pub fn format_banner(
    endpoint: &str,
    collection: &CollectionHandle,
    worker_count: usize,
    total_documents: u64,
) -> String {
    let mut banner = String::new();
    banner.push_str("Summary:\n");
    banner.push_str(RULE);
    banner.push('\n');
    banner.push_str(&format!("Endpoint:\t\t{endpoint}\n"));
    banner.push_str(&format!("Database\t\t{}\n", collection.database));
    banner.push_str(&format!("Collection\t\t{}\n", collection.id));
    banner.push_str(&format!(
        "Partition Key:\t\t{}\n",
        collection.partition_keys.join(", ")
    ));
    banner.push_str(&format!(
        "Throughput:\t\t{} Request Units per Second (RU/s)\n",
        collection.throughput
    ));
    banner.push_str(&format!(
        "Insert Operation:\t{worker_count} Tasks Inserting {total_documents} Documents Total\n"
    ));
    banner.push_str(RULE);
    banner.push_str("\n\n");
    banner
}

/// One periodic progress line, without a trailing newline.
pub fn format_progress_line(snapshot: &ProgressSnapshot) -> String {
    format!(
        "Inserted {} docs @ {} writes/s, {} RU/s ({}B max monthly 1KB reads)",
        snapshot.total_inserted,
        snapshot.writes_per_second().round(),
        snapshot.cost_per_second().round(),
        (snapshot.projected_monthly_capacity() / 1_000_000_000.0).round()
    )
}

/// Final block printed once every worker has finished.
pub fn format_summary(snapshot: &ProgressSnapshot) -> String {
    let mut summary = String::new();
    summary.push('\n');
    summary.push_str("Summary:\n");
    summary.push_str(RULE);
    summary.push('\n');
    summary.push_str(&format!(
        "Total Time Elapsed:\t{}\n",
        format_elapsed(snapshot.elapsed)
    ));
    summary.push_str(&format_progress_line(snapshot));
    summary.push('\n');
    summary.push_str(RULE);
    summary.push('\n');
    summary
}

/// `HH:MM:SS.mmm`
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        elapsed.subsec_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(secs: u64, inserted: u64, cost: f64) -> ProgressSnapshot {
        ProgressSnapshot {
            elapsed: Duration::from_secs(secs),
            total_inserted: inserted,
            total_cost: cost,
        }
    }

    #[test]
    fn test_progress_line() {
        let line = format_progress_line(&snapshot(2, 1000, 5000.0));
        assert_eq!(
            line,
            "Inserted 1000 docs @ 500 writes/s, 2500 RU/s (6B max monthly 1KB reads)"
        );
    }

    #[test]
    fn test_progress_line_zero_elapsed() {
        let line = format_progress_line(&snapshot(0, 0, 0.0));
        assert_eq!(
            line,
            "Inserted 0 docs @ 0 writes/s, 0 RU/s (0B max monthly 1KB reads)"
        );
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00:00.000");
        assert_eq!(format_elapsed(Duration::from_millis(3_723_456)), "01:02:03.456");
    }

    #[test]
    fn test_summary_block() {
        let summary = format_summary(&snapshot(10, 100, 500.0));
        assert!(summary.contains("Summary:"));
        assert!(summary.contains("Total Time Elapsed:\t00:00:10.000"));
        assert!(summary.contains("Inserted 100 docs @ 10 writes/s, 50 RU/s"));
    }

    #[test]
    fn test_banner() {
        let collection = CollectionHandle {
            database: "db".to_string(),
            id: "data".to_string(),
            partition_keys: vec!["/deviceId".to_string()],
            throughput: 400,
        };
        let banner = format_banner("simulated://in-process", &collection, 4, 1000);
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Summary:",
                RULE,
                "Endpoint:\t\tsimulated://in-process",
                "Database\t\tdb",
                "Collection\t\tdata",
                "Partition Key:\t\t/deviceId",
                "Throughput:\t\t400 Request Units per Second (RU/s)",
                "Insert Operation:\t4 Tasks Inserting 1000 Documents Total",
                RULE,
                "",
            ]
        );
    }
}
