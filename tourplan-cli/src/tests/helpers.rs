//! Test helpers for building temporary workspaces, requests and cost stores.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tourplan_core::{LocationId, SolveRequest, TransportMode, TravelCostRecord};

/// A temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

/// Fast hotel–zoo=10, hotel–museum=20, zoo–museum=5, each costing 6.
///
/// Buses take twice as long for 1; walking takes eight times as long.
#[expect(
    clippy::float_arithmetic,
    reason = "bus and walk entries scale with the fast time"
)]
pub(super) fn sample_records() -> Vec<TravelCostRecord> {
    [("hotel", "zoo", 10.0), ("hotel", "museum", 20.0), ("zoo", "museum", 5.0)]
        .into_iter()
        .flat_map(|(a, b, time)| {
            [
                TravelCostRecord::new(a, b, TransportMode::Fast, time, 6.0),
                TravelCostRecord::new(a, b, TransportMode::Bus, time * 2.0, 1.0),
                TravelCostRecord::new(a, b, TransportMode::Walk, time * 8.0, 0.0),
            ]
        })
        .collect()
}

pub(super) fn write_records(path: &Utf8Path, records: &[TravelCostRecord]) {
    let payload = serde_json::to_string_pretty(records).expect("serialise records");
    write_utf8(path, payload.as_bytes());
}

pub(super) fn seed_cost_store(path: &Utf8Path) {
    tourplan_core::persist_travel_costs(path, &sample_records()).expect("seed cost store");
}

pub(super) fn request(stops: &[&str], budget: f64) -> SolveRequest {
    SolveRequest {
        origin: "hotel".into(),
        stops: stops.iter().copied().map(LocationId::from).collect(),
        budget,
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &SolveRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
