use crate::error::{QrScanError, Result};
use crate::record::ScanRecord;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const EMPTY_HISTORY_MESSAGE: &str = "No QR codes scanned";

/// Bounded scan history, newest record first
pub struct ScanHistory {
    /// Records ordered newest first
    records: RwLock<VecDeque<ScanRecord>>,
    /// Maximum number of records retained
    capacity: usize,
    /// Counter for issuing record IDs
    record_counter: AtomicU64,
    /// Statistics
    stats: HistoryStats,
}

/// Counters for history activity
#[derive(Debug)]
pub struct HistoryStats {
    /// Total records inserted
    pub records_added: AtomicU64,
    /// Records dropped off the tail to respect the capacity
    pub records_evicted: AtomicU64,
    /// Number of times the history was cleared
    pub clears: AtomicU64,
}

impl HistoryStats {
    fn new() -> Self {
        Self {
            records_added: AtomicU64::new(0),
            records_evicted: AtomicU64::new(0),
            clears: AtomicU64::new(0),
        }
    }

    /// Get current statistics as a snapshot
    pub fn snapshot(&self) -> HistoryStatsSnapshot {
        HistoryStatsSnapshot {
            records_added: self.records_added.load(Ordering::Relaxed),
            records_evicted: self.records_evicted.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStatsSnapshot {
    pub records_added: u64,
    pub records_evicted: u64,
    pub clears: u64,
}

impl ScanHistory {
    /// Create a history holding at most `capacity` records.
    ///
    /// # Example
    /// ```
    /// use qrscan::history::ScanHistory;
    ///
    /// let history = ScanHistory::new(10);
    /// assert!(history.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("History capacity must be greater than 0");
        }

        debug!("Created scan history with capacity {}", capacity);

        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
            record_counter: AtomicU64::new(1),
            stats: HistoryStats::new(),
        }
    }

    /// Insert a record at the head, evicting the oldest one when full
    pub fn record(&self, record: ScanRecord) {
        let mut records = self.records.write();

        trace!(
            "Recording scan {} ({}) at history head",
            record.id,
            record.content_type().as_str()
        );

        records.push_front(record);
        while records.len() > self.capacity {
            if let Some(evicted) = records.pop_back() {
                self.stats.records_evicted.fetch_add(1, Ordering::Relaxed);
                trace!("Evicted scan {} from history tail", evicted.id);
            }
        }

        self.stats.records_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of the history, newest first
    pub fn list(&self) -> Vec<ScanRecord> {
        self.records.read().iter().cloned().collect()
    }

    /// Remove every record, returning how many were dropped
    pub fn clear(&self) -> usize {
        let mut records = self.records.write();
        let removed = records.len();
        records.clear();
        self.stats.clears.fetch_add(1, Ordering::Relaxed);

        debug!("Scan history cleared ({} records removed)", removed);
        removed
    }

    /// Most recent record, if any
    pub fn latest(&self) -> Option<ScanRecord> {
        self.records.read().front().cloned()
    }

    pub fn get(&self, id: u64) -> Option<ScanRecord> {
        self.records.read().iter().find(|record| record.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the next record ID for new scans
    pub fn next_record_id(&self) -> u64 {
        self.record_counter.fetch_add(1, Ordering::Relaxed)
    }

    pub fn stats(&self) -> HistoryStatsSnapshot {
        self.stats.snapshot()
    }

    /// Numbered text listing of the history for display
    pub fn render_listing(&self, preview_chars: usize) -> String {
        let records = self.records.read();
        if records.is_empty() {
            return EMPTY_HISTORY_MESSAGE.to_string();
        }

        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                format!(
                    "{}. [{}] {}\n   {}",
                    index + 1,
                    record.content_type().label(),
                    record.preview(preview_chars),
                    record.local_time()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Builder for creating a history with custom configuration
pub struct HistoryBuilder {
    capacity: Option<usize>,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self { capacity: None }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn build(self) -> Result<ScanHistory> {
        let capacity = self.capacity.unwrap_or(DEFAULT_HISTORY_CAPACITY);

        if capacity == 0 {
            return Err(QrScanError::system("History capacity must be greater than 0"));
        }

        Ok(ScanHistory::new(capacity))
    }
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodedCode;
    use std::sync::Arc;

    fn create_test_record(history: &ScanHistory, payload: &str) -> ScanRecord {
        ScanRecord::from_decoded(history.next_record_id(), &DecodedCode::qr(payload))
    }

    #[test]
    fn test_history_creation() {
        let history = ScanHistory::new(10);
        assert_eq!(history.capacity(), 10);
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_record_and_list_newest_first() {
        let history = ScanHistory::new(10);
        for payload in ["first", "second", "third"] {
            let record = create_test_record(&history, payload);
            history.record(record);
        }

        let payloads: Vec<String> = history
            .list()
            .iter()
            .map(|r| r.raw_payload().to_string())
            .collect();
        assert_eq!(payloads, vec!["third", "second", "first"]);
        assert_eq!(history.latest().unwrap().raw_payload(), "third");
    }

    #[test]
    fn test_eleventh_record_evicts_oldest() {
        let history = ScanHistory::new(10);
        for i in 0..11 {
            let record = create_test_record(&history, &format!("payload {}", i));
            history.record(record);
        }

        let records = history.list();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].raw_payload(), "payload 10");
        assert_eq!(records[9].raw_payload(), "payload 1");
        assert!(records.iter().all(|r| r.raw_payload() != "payload 0"));

        let stats = history.stats();
        assert_eq!(stats.records_added, 11);
        assert_eq!(stats.records_evicted, 1);
    }

    #[test]
    fn test_record_ids_are_unique_and_increasing() {
        let history = ScanHistory::new(3);
        let ids: Vec<u64> = (0..5).map(|_| history.next_record_id()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_clear() {
        let history = ScanHistory::new(5);
        for i in 0..3 {
            let record = create_test_record(&history, &format!("{}", i));
            history.record(record);
        }

        assert_eq!(history.clear(), 3);
        assert!(history.is_empty());
        assert_eq!(history.clear(), 0);
        assert_eq!(history.stats().clears, 2);
    }

    #[test]
    fn test_get_by_id() {
        let history = ScanHistory::new(5);
        let record = create_test_record(&history, "find me");
        let id = record.id;
        history.record(record);

        assert_eq!(history.get(id).unwrap().raw_payload(), "find me");
        assert!(history.get(id + 100).is_none());
    }

    #[test]
    fn test_render_listing() {
        let history = ScanHistory::new(5);
        assert_eq!(history.render_listing(30), EMPTY_HISTORY_MESSAGE);

        let record = create_test_record(&history, "example.com");
        history.record(record);
        let record = create_test_record(&history, &"a".repeat(40));
        history.record(record);

        let listing = history.render_listing(30);
        let entries: Vec<&str> = listing.split("\n\n").collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with(&format!("1. [Text] {}...", "a".repeat(30))));
        assert!(entries[1].starts_with("2. [URL] example.com\n   "));
    }

    #[test]
    fn test_builder_validation() {
        let history = HistoryBuilder::new().build().unwrap();
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);

        let history = HistoryBuilder::new().capacity(3).build().unwrap();
        assert_eq!(history.capacity(), 3);

        assert!(HistoryBuilder::new().capacity(0).build().is_err());
    }

    #[test]
    fn test_concurrent_recording_respects_capacity() {
        let history = Arc::new(ScanHistory::new(10));
        let mut handles = Vec::new();

        for worker in 0..4 {
            let history = Arc::clone(&history);
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    let record = ScanRecord::from_decoded(
                        history.next_record_id(),
                        &DecodedCode::qr(format!("{}-{}", worker, i)),
                    );
                    history.record(record);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.stats().records_added, 100);
        assert_eq!(history.stats().records_evicted, 90);
    }
}
