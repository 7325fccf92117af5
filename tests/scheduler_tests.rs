use vizkit::anim::{AnimProperty, AnimationTask, Easing, TransitionScheduler};
use vizkit::error::VizError;

fn task(element_id: &str, from: f64, to: f64, delay_ms: f64, duration_ms: f64) -> AnimationTask {
    AnimationTask {
        element_id: element_id.to_owned(),
        property: AnimProperty::Progress,
        from,
        to,
        delay_ms,
        duration_ms,
        easing: Easing::Linear,
    }
}

#[test]
fn delay_window_gates_the_first_application() {
    let mut scheduler = TransitionScheduler::new();
    scheduler
        .schedule(task("a", 0.0, 1.0, 200.0, 1000.0), 0.0)
        .expect("schedule");

    let mut applications: Vec<(f64, f64)> = Vec::new();
    for now in [0.0, 100.0, 199.9] {
        scheduler.tick(now, |_, _, value| applications.push((now, value)));
    }
    assert!(applications.is_empty(), "applied inside the delay window");

    scheduler.tick(200.0, |_, _, value| applications.push((200.0, value)));
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].1, 0.0);

    scheduler.tick(700.0, |_, _, value| applications.push((700.0, value)));
    let halfway = applications[1].1;
    assert!((halfway - 0.5).abs() <= 1e-9);

    scheduler.tick(1199.0, |_, _, value| applications.push((1199.0, value)));
    assert!(applications[2].1 < 1.0);

    scheduler.tick(1200.0, |_, _, value| applications.push((1200.0, value)));
    assert_eq!(applications[3].1, 1.0);
}

#[test]
fn final_value_is_applied_exactly_once() {
    let mut scheduler = TransitionScheduler::new();
    scheduler
        .schedule(task("a", 0.0, 10.0, 0.0, 100.0), 0.0)
        .expect("schedule");

    let mut final_applications = 0;
    for now in [50.0, 100.0, 150.0, 10_000.0] {
        scheduler.tick(now, |_, _, value| {
            if value == 10.0 {
                final_applications += 1;
            }
        });
    }
    assert_eq!(final_applications, 1);
    assert!(scheduler.is_idle());
}

#[test]
fn late_first_tick_still_applies_the_final_value_once() {
    let mut scheduler = TransitionScheduler::new();
    scheduler
        .schedule(task("a", 0.0, 1.0, 200.0, 1000.0), 0.0)
        .expect("schedule");

    let mut applications = Vec::new();
    scheduler.tick(5000.0, |_, _, value| applications.push(value));
    assert_eq!(applications, vec![1.0]);
    assert!(scheduler.is_idle());
}

#[test]
fn rescheduling_a_pair_replaces_without_another_application() {
    let mut scheduler = TransitionScheduler::new();
    scheduler
        .schedule(task("a", 0.0, 1.0, 0.0, 1000.0), 0.0)
        .expect("schedule");

    let mut applications = Vec::new();
    scheduler.tick(500.0, |_, _, value| applications.push(value));
    assert_eq!(applications.len(), 1);

    // Replacement: the old task must never fire again.
    scheduler
        .schedule(task("a", 5.0, 6.0, 0.0, 100.0), 500.0)
        .expect("reschedule");
    assert_eq!(scheduler.pending(), 1);

    scheduler.tick(600.0, |_, _, value| applications.push(value));
    assert_eq!(applications.len(), 2);
    assert_eq!(applications[1], 6.0);
}

#[test]
fn tasks_for_different_properties_coexist() {
    let mut scheduler = TransitionScheduler::new();
    scheduler
        .schedule(task("a", 0.0, 1.0, 0.0, 100.0), 0.0)
        .expect("schedule progress");
    let mut opacity_task = task("a", 0.0, 1.0, 0.0, 100.0);
    opacity_task.property = AnimProperty::Opacity;
    scheduler.schedule(opacity_task, 0.0).expect("schedule opacity");

    assert_eq!(scheduler.pending(), 2);
}

#[test]
fn zero_duration_applies_the_final_value_on_the_first_eligible_tick() {
    let mut scheduler = TransitionScheduler::new();
    scheduler
        .schedule(task("a", 0.0, 7.0, 50.0, 0.0), 0.0)
        .expect("schedule");

    let mut applications = Vec::new();
    scheduler.tick(25.0, |_, _, value| applications.push(value));
    assert!(applications.is_empty());
    scheduler.tick(50.0, |_, _, value| applications.push(value));
    assert_eq!(applications, vec![7.0]);
    assert!(scheduler.is_idle());
}

#[test]
fn cancel_element_drops_tasks_without_application() {
    let mut scheduler = TransitionScheduler::new();
    scheduler
        .schedule(task("a", 0.0, 1.0, 0.0, 100.0), 0.0)
        .expect("schedule a");
    scheduler
        .schedule(task("b", 0.0, 1.0, 0.0, 100.0), 0.0)
        .expect("schedule b");

    scheduler.cancel_element("a");
    let mut seen = Vec::new();
    scheduler.tick(200.0, |id, _, _| seen.push(id.to_owned()));
    assert_eq!(seen, vec!["b".to_owned()]);
}

#[test]
fn easing_reshapes_progress_between_the_endpoints() {
    let mut scheduler = TransitionScheduler::new();
    let mut eased = task("a", 0.0, 1.0, 0.0, 100.0);
    eased.easing = Easing::CubicOut;
    scheduler.schedule(eased, 0.0).expect("schedule");

    let mut applications = Vec::new();
    scheduler.tick(50.0, |_, _, value| applications.push(value));
    // Cubic-out front-loads progress: past the linear halfway mark.
    assert!(applications[0] > 0.5);
    assert!(applications[0] < 1.0);
}

#[test]
fn invalid_tasks_are_rejected_at_schedule_time() {
    let mut scheduler = TransitionScheduler::new();
    let err = scheduler
        .schedule(task("a", 0.0, 1.0, -5.0, 100.0), 0.0)
        .expect_err("negative delay must fail");
    assert!(matches!(err, VizError::InvalidConfig(_)));
    assert!(scheduler.is_idle());
}
