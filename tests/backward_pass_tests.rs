use construction_schedule::calculations::{BackwardPass, ForwardPass};
use construction_schedule::{ActivityRecord, GraphBuilder, Schedule};

fn rec(id: &str, duration: i64, preds: &[&str]) -> ActivityRecord {
    ActivityRecord::new(id, id, duration).with_predecessors(preds.iter().copied())
}

fn diamond() -> Vec<ActivityRecord> {
    vec![
        rec("A", 2, &[]),
        rec("B", 3, &["A"]),
        rec("C", 5, &["A"]),
        rec("D", 1, &["B", "C"]),
    ]
}

#[test]
fn backward_pass_computes_late_dates() {
    let schedule = Schedule::from_records(&diamond()).unwrap();
    let late = |id: &str| {
        let a = schedule.activity(id).unwrap();
        (a.latest_start, a.latest_finish)
    };
    assert_eq!(late("D"), (7, 8));
    assert_eq!(late("C"), (2, 7));
    assert_eq!(late("B"), (4, 7));
    assert_eq!(late("A"), (0, 2));
}

#[test]
fn terminal_activities_finish_at_project_duration() {
    // Two chains of different length; the short one ends early but may finish late.
    let records = vec![rec("A", 10, &[]), rec("B", 4, &[])];
    let graph = GraphBuilder::new(&records).build().unwrap();
    let early = ForwardPass::new(&graph).execute().unwrap();
    let late = BackwardPass::new(&graph).execute(early.project_duration());
    let b = graph.index_of("B").unwrap().index();
    assert_eq!(late.finishes[b], 10);
    assert_eq!(late.starts[b], 6);
}

#[test]
fn late_dates_never_precede_early_dates() {
    let schedule = Schedule::from_records(&diamond()).unwrap();
    for a in schedule.activities() {
        assert!(a.latest_start >= a.earliest_start, "{}", a.id);
        assert!(a.latest_finish >= a.earliest_finish, "{}", a.id);
    }
}
