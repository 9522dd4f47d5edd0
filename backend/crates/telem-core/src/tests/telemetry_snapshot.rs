use crate::{Sample, TelemetrySnapshot};

#[test]
fn given_snapshot_when_serialized_then_matches_pull_contract() {
    let snapshot = TelemetrySnapshot {
        data: vec![Sample::new(1, 10.0), Sample::new(2, 20.5)],
        mpm: 120,
        dropped: 3,
    };

    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "data": [{"t": 1, "v": 10.0}, {"t": 2, "v": 20.5}],
            "mpm": 120,
            "dropped": 3
        })
    );
}
