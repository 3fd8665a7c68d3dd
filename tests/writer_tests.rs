use mmwave_sched_trace::sched::{SchedTraceInfo, SfnSf, TddMode, TtiAllocInfo, TtiType};
use mmwave_sched_trace::trace::{read_trace, MacTrace, SchedAllocTraceFile};
use mmwave_sched_trace::utils::config::TRACE_HEADER;
use mmwave_sched_trace::utils::error::TraceError;
use pretty_assertions::assert_eq;
use std::fs;

const DL: SfnSf = SfnSf { frame_num: 3, sf_num: 5, slot_num: 1 };
const UL: SfnSf = SfnSf { frame_num: 3, sf_num: 7, slot_num: 0 };

fn report(ttis: Vec<TtiAllocInfo>) -> SchedTraceInfo {
    SchedTraceInfo::new(DL, UL, ttis)
}

#[test]
fn test_report_writes_header_and_one_line_per_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sched.txt");

    let mut trace = MacTrace::default();
    trace.set_output_filename(&path);
    trace
        .report_sched_info(&report(vec![
            TtiAllocInfo::new(TtiType::Ctrl, TddMode::Dl, 0, 0, 1),
            TtiAllocInfo::new(TtiType::Data, TddMode::Dl, 1, 1, 6),
            TtiAllocInfo::new(TtiType::Data, TddMode::Ul, 2, 7, 6),
        ]))
        .unwrap();
    drop(trace);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines,
        vec![
            TRACE_HEADER,
            "3\t5\t1\t0\t0\t1\t2\t1",
            "3\t5\t1\t1\t1\t6\t1\t1",
            "3\t7\t0\t2\t7\t6\t1\t2",
        ]
    );
}

#[test]
fn test_dl_control_example_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ctrl.txt");

    let mut trace = MacTrace::new(&path);
    trace
        .report_sched_info(&report(vec![TtiAllocInfo::new(TtiType::Ctrl, TddMode::Dl, 42, 0, 2)]))
        .unwrap();
    drop(trace);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().nth(1), Some("3\t5\t1\t42\t0\t2\t2\t1"));
}

#[test]
fn test_ul_control_uses_dl_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ulctrl.txt");

    let mut trace = MacTrace::new(&path);
    trace
        .report_sched_info(&report(vec![TtiAllocInfo::new(TtiType::Ctrl, TddMode::Ul, 9, 13, 1)]))
        .unwrap();
    drop(trace);

    let records = read_trace(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sfn_sf, DL);
}

#[test]
fn test_data_without_direction_uses_dl_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("na.txt");

    let mut trace = MacTrace::new(&path);
    trace
        .report_sched_info(&report(vec![TtiAllocInfo::new(TtiType::Data, TddMode::Na, 11, 3, 8)]))
        .unwrap();
    drop(trace);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().nth(1), Some("3\t5\t1\t11\t3\t8\t1\t0"));
}

#[test]
fn test_reports_append_with_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("many.txt");

    let mut trace = MacTrace::new(&path);
    for frame in 0..5u16 {
        let info = SchedTraceInfo::new(
            SfnSf::new(frame, 0, 0),
            SfnSf::new(frame, 2, 0),
            vec![
                TtiAllocInfo::new(TtiType::Data, TddMode::Dl, 1, 1, 12),
                TtiAllocInfo::new(TtiType::Data, TddMode::Ul, 1, 1, 12),
            ],
        );
        trace.report_sched_info(&info).unwrap();
    }
    assert_eq!(trace.lines_written(), 10);
    drop(trace);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.matches(TRACE_HEADER).count(), 1);
    assert_eq!(content.lines().count(), 11);

    let records = read_trace(&path).unwrap();
    assert_eq!(records[9].sfn_sf, SfnSf::new(4, 2, 0));
}

#[test]
fn test_empty_report_opens_file_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");

    let mut trace = MacTrace::new(&path);
    trace.report_sched_info(&report(vec![])).unwrap();
    drop(trace);

    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", TRACE_HEADER));
}

#[test]
fn test_unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing/dir/sched.txt");

    let mut trace = MacTrace::new(&path);
    let result = trace.report_sched_info(&report(vec![]));

    match result {
        Err(TraceError::Open { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected open error, got {:?}", other),
    }
    assert!(!trace.is_open());
}

#[test]
fn test_constructor_surfaces_open_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        SchedAllocTraceFile::create(dir.path()),
        Err(TraceError::Open { .. })
    ));
}

#[test]
fn test_independent_writers() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    let mut trace_a = MacTrace::new(&a);
    let mut trace_b = MacTrace::new(&b);
    trace_a
        .report_sched_info(&report(vec![TtiAllocInfo::new(TtiType::Data, TddMode::Dl, 1, 0, 4)]))
        .unwrap();
    trace_b.report_sched_info(&report(vec![])).unwrap();
    drop(trace_a);
    drop(trace_b);

    assert_eq!(read_trace(&a).unwrap().len(), 1);
    assert_eq!(read_trace(&b).unwrap().len(), 0);
}
