/*!
 * Workload Loading Tests
 * JSON files, form rows and rejection of invalid input
 */

use pretty_assertions::assert_eq;
use rr_scheduler::{Quantum, Scheduler, SimulationError, Workload};
use std::io::Write;
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
}

#[test]
fn test_demo_workloads_load() {
    let three = Workload::from_path(demo("three_processes.json")).unwrap();
    assert_eq!(three, Workload::sample());

    let idle = Workload::from_path(demo("idle_gap.json")).unwrap();
    assert_eq!(idle.quantum().ticks(), 3);
    assert_eq!(idle.len(), 4);
    assert_eq!(idle.processes()[0].arrival(), 0);
}

#[test]
fn test_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"quantum": 4, "processes": [{{"burst": 6, "arrival": 0}}, {{"burst": 2, "arrival": 3}}]}}"#
    )
    .unwrap();

    let workload = Workload::from_path(file.path()).unwrap();
    assert_eq!(workload.quantum(), Quantum::new(4).unwrap());

    let mut scheduler = Scheduler::with_workload(&workload);
    while !scheduler.step().is_terminal() {}
    assert_eq!(scheduler.current_time(), 8);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Workload::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimulationError::Io(_)));
}

#[test]
fn test_invalid_rows_rejected_before_engine() {
    let quantum = Quantum::default();
    assert!(matches!(
        Workload::from_rows(quantum, &[("3", "0"), ("abc", "0")]),
        Err(SimulationError::NotAnInteger { index: 2, .. })
    ));
    assert_eq!(
        Workload::from_pairs(quantum, &[(0, 0)]).unwrap_err(),
        SimulationError::InvalidBurst { index: 1, burst: 0 }
    );
    assert_eq!(
        Workload::from_pairs(quantum, &[(2, -3)]).unwrap_err(),
        SimulationError::InvalidArrival {
            index: 1,
            arrival: -3
        }
    );
    assert_eq!(
        Workload::from_pairs(quantum, &[]).unwrap_err(),
        SimulationError::InvalidProcessCount(0)
    );
    assert!(matches!(
        Workload::from_json(r#"{"quantum": 2, "processes": [{"burst": -1}]}"#),
        Err(SimulationError::InvalidBurst { index: 1, burst: -1 })
    ));
    assert!(matches!(
        Workload::from_json("not json"),
        Err(SimulationError::Parse(_))
    ));
}

#[test]
fn test_values_beyond_tick_limit_rejected() {
    let quantum = Quantum::new(i64::MAX).unwrap();
    assert!(matches!(
        Workload::from_pairs(
            quantum,
            &[(i64::MAX, i64::MAX), (i64::MAX, i64::MAX), (1, i64::MAX)]
        ),
        Err(SimulationError::ValueTooLarge { index: 1, .. })
    ));
    assert!(matches!(
        Workload::from_pairs(quantum, &[(1, 0), (1, u32::MAX as i64 + 1)]),
        Err(SimulationError::ValueTooLarge { index: 2, .. })
    ));
}
