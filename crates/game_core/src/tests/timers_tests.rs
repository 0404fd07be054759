use super::*;

fn id(kind: TimerKind) -> TimerId {
    TimerId { kind, round: 1 }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn one_shot_fires_once_at_its_deadline() {
    let mut queue = TimerQueue::new();
    queue.after(ms(700), id(TimerKind::Mismatch));

    assert!(queue.advance_to(ms(699)).is_empty());
    assert_eq!(queue.advance_to(ms(700)), vec![id(TimerKind::Mismatch)]);
    assert!(queue.advance_to(ms(5000)).is_empty());
    assert!(!queue.is_armed(TimerKind::Mismatch));
}

#[test]
fn repeating_timer_catches_up_on_missed_intervals() {
    let mut queue = TimerQueue::new();
    queue.every(ms(1000), id(TimerKind::Elapsed));

    let fired = queue.advance_to(ms(3500));
    assert_eq!(fired.len(), 3);
    assert_eq!(queue.next_deadline(), Some(ms(4000)));
    assert!(queue.is_armed(TimerKind::Elapsed));
}

#[test]
fn cancelled_timers_never_fire() {
    let mut queue = TimerQueue::new();
    queue.after(ms(3000), id(TimerKind::Preview));
    queue.every(ms(1000), id(TimerKind::Elapsed));
    queue.cancel(id(TimerKind::Preview));
    queue.cancel(id(TimerKind::Elapsed));

    assert!(queue.advance_to(ms(10_000)).is_empty());
    assert_eq!(queue.next_deadline(), None);
}

#[test]
fn fires_in_deadline_order() {
    let mut queue = TimerQueue::new();
    queue.every(ms(1000), id(TimerKind::Elapsed));
    queue.after(ms(700), id(TimerKind::Mismatch));

    let fired = queue.advance_to(ms(2000));
    assert_eq!(
        fired,
        vec![
            id(TimerKind::Mismatch),
            id(TimerKind::Elapsed),
            id(TimerKind::Elapsed)
        ]
    );
}

#[test]
fn rearming_replaces_the_previous_deadline() {
    let mut queue = TimerQueue::new();
    queue.after(ms(700), id(TimerKind::Mismatch));
    queue.advance_to(ms(500));
    queue.after(ms(700), id(TimerKind::Mismatch));

    assert!(queue.advance_to(ms(1000)).is_empty());
    assert_eq!(queue.advance_to(ms(1200)), vec![id(TimerKind::Mismatch)]);
}

#[test]
fn clock_never_moves_backwards() {
    let mut queue = TimerQueue::new();
    queue.advance_to(ms(2000));
    queue.advance_to(ms(1000));
    assert_eq!(queue.now(), ms(2000));
}
