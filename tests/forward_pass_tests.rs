use construction_schedule::calculations::ForwardPass;
use construction_schedule::{ActivityRecord, GraphBuilder, Schedule};

fn rec(id: &str, duration: i64, preds: &[&str]) -> ActivityRecord {
    ActivityRecord::new(id, id, duration).with_predecessors(preds.iter().copied())
}

#[test]
fn forward_pass_computes_early_dates_across_dag() {
    // T1(2) -> {T2(3), T3(1)} -> T4(2)
    let records = vec![
        rec("T1", 2, &[]),
        rec("T2", 3, &["T1"]),
        rec("T3", 1, &["T1"]),
        rec("T4", 2, &["T2", "T3"]),
    ];
    let schedule = Schedule::from_records(&records).unwrap();

    let early = |id: &str| {
        let a = schedule.activity(id).unwrap();
        (a.earliest_start, a.earliest_finish)
    };
    assert_eq!(early("T1"), (0, 2));
    assert_eq!(early("T2"), (2, 5));
    assert_eq!(early("T3"), (2, 3));
    assert_eq!(early("T4"), (5, 7));
    assert_eq!(schedule.project_duration(), 7);
}

#[test]
fn independent_activities_all_start_at_zero() {
    let records = vec![rec("A", 4, &[]), rec("B", 9, &[]), rec("C", 1, &[])];
    let graph = GraphBuilder::new(&records).build().unwrap();
    let early = ForwardPass::new(&graph).execute().unwrap();
    assert!(early.starts.iter().all(|&es| es == 0));
    assert_eq!(early.project_duration(), 9);
}

#[test]
fn milestone_finishes_where_it_starts() {
    let records = vec![rec("A", 3, &[]), rec("M", 0, &["A"]), rec("B", 2, &["M"])];
    let schedule = Schedule::from_records(&records).unwrap();
    let m = schedule.activity("M").unwrap();
    assert_eq!((m.earliest_start, m.earliest_finish), (3, 3));
    assert_eq!(schedule.activity("B").unwrap().earliest_start, 3);
}

#[test]
fn input_order_does_not_change_early_dates() {
    let forward = vec![rec("A", 2, &[]), rec("B", 3, &["A"]), rec("C", 4, &["B"])];
    let reversed: Vec<ActivityRecord> = forward.iter().rev().cloned().collect();
    let s1 = Schedule::from_records(&forward).unwrap();
    let s2 = Schedule::from_records(&reversed).unwrap();
    for id in ["A", "B", "C"] {
        assert_eq!(
            s1.activity(id).unwrap().earliest_start,
            s2.activity(id).unwrap().earliest_start
        );
    }
}

#[test]
fn overflowing_chain_is_an_error_not_a_panic() {
    use construction_schedule::ScheduleError;

    let records = vec![rec("A", i64::MAX, &[]), rec("B", 1, &["A"])];
    assert_eq!(
        Schedule::from_records(&records).unwrap_err(),
        ScheduleError::InvalidDuration {
            activity: "B".into(),
            duration_days: 1
        }
    );
}
