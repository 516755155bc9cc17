use l4sim::{
    analysis::{compare, Measure, Tolerances},
    systems::standard_suite,
    telemetry::{read_records, write_records, AxisConvention, ReferenceTrace, TelemetryRecord},
    Axis, PhysicsProfile,
};
use tempfile::tempdir;

use crate::common::DT;

#[test]
fn test_written_trace_loads_as_reference() {
    let params = PhysicsProfile::Headless.parameters();
    let scenario = &standard_suite()[0];
    let trace = scenario.run(&params, DT).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("pitch_nodar.csv");
    trace.write_csv_file(&path).unwrap();

    let reference = ReferenceTrace::from_path(&path, AxisConvention::Simulator).unwrap();
    assert_eq!(reference.len(), trace.len());

    let report = compare(
        &trace.response(),
        &reference.response(),
        Measure::Axis(Axis::Pitch),
        &Tolerances::default(),
    );
    assert!(report.passed(), "{:?}", report);
}

#[test]
fn test_game_axis_convention() {
    let params = PhysicsProfile::Reference.parameters();
    let scenario = &standard_suite()[2];
    assert_eq!(scenario.axis, Axis::Yaw);
    let trace = scenario.run(&params, DT).unwrap();

    // Game telemetry stores roll in wx, pitch in wy and yaw in wz.
    let game_rows: Vec<TelemetryRecord> = trace
        .records()
        .into_iter()
        .map(|r| TelemetryRecord {
            wx: r.wz,
            wy: r.wx,
            wz: r.wy,
            ..r
        })
        .collect();
    let mut buffer = Vec::new();
    write_records(&game_rows, &mut buffer).unwrap();

    let reference = ReferenceTrace::from_reader(buffer.as_slice(), AxisConvention::Game).unwrap();
    let report = compare(
        &trace.response(),
        &reference.response(),
        Measure::Axis(Axis::Yaw),
        &Tolerances::default(),
    );
    assert!(report.passed());
    assert_eq!(
        report.check("peak_velocity").unwrap().relative_error,
        Some(0.0)
    );

    let rows = read_records(buffer.as_slice()).unwrap();
    assert_eq!(rows.len(), trace.len());
}
