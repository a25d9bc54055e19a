//! Signal controller behavior: congestion counting, adaptive green and preemption

use intersection_sim::simulation::{
    Direction, IntersectionLayout, LightColor, Position, SignalController, SignalEvent,
    SignalPhase, SignalTiming, Vehicle, VehicleId, VehicleParams,
};

fn layout() -> IntersectionLayout {
    IntersectionLayout::default()
}

fn controller() -> SignalController {
    SignalController::new(layout().center(), SignalTiming::default())
}

fn vehicle(id: usize, direction: Direction, is_emergency: bool) -> Vehicle {
    Vehicle::new(
        VehicleId(id),
        direction,
        is_emergency,
        2.5,
        &VehicleParams::default(),
        &layout(),
    )
    .unwrap()
}

/// A vehicle that has already cleared the far side of the box
fn crossed_vehicle(id: usize, direction: Direction, is_emergency: bool) -> Vehicle {
    let layout = layout();
    let center = layout.center();
    let half = layout.half_road();
    let start = match direction {
        Direction::North => Position::new(center.x - 40.0, center.y + half),
        Direction::South => Position::new(center.x + 40.0, center.y - half),
        Direction::East => Position::new(center.x - half, center.y - 40.0),
        Direction::West => Position::new(center.x + half, center.y + 40.0),
    };
    let mut v = vehicle(id, direction, is_emergency).with_position(start);
    v.move_forward(&layout);
    assert!(v.crossed());
    v
}

/// Drive an empty intersection until the next regular transition
fn run_until_transition(signal: &mut SignalController, vehicles: &[Vehicle]) -> (u32, SignalEvent) {
    for n in 1..=10_000 {
        let event = signal.update(vehicles);
        if matches!(event, SignalEvent::Yellow(_) | SignalEvent::Green(_)) {
            return (n, event);
        }
    }
    panic!("signal never changed phase");
}

#[test]
fn test_initial_state() {
    let signal = controller();
    assert_eq!(signal.current(), Direction::North);
    assert_eq!(signal.phase(), SignalPhase::Green);
    assert_eq!(signal.timer(), 0);
    assert_eq!(signal.green_duration(), 120);
    assert_eq!(signal.yellow_duration(), 50);
    assert!(!signal.emergency_lock());
    assert_eq!(signal.center(), Position::new(600.0, 450.0));

    assert_eq!(signal.light(Direction::North), LightColor::Green);
    for d in [Direction::East, Direction::South, Direction::West] {
        assert_eq!(signal.light(d), LightColor::Red);
    }
}

#[test]
fn test_congestion_skips_crossed_and_emergency() {
    let signal = controller();
    let vehicles = vec![
        vehicle(0, Direction::North, false),
        vehicle(1, Direction::North, false),
        vehicle(2, Direction::East, true),
        crossed_vehicle(3, Direction::South, false),
        vehicle(4, Direction::West, false),
    ];

    let counts = signal.congestion(&vehicles);
    assert_eq!(counts.get(Direction::North), 2);
    assert_eq!(counts.get(Direction::East), 0);
    assert_eq!(counts.get(Direction::South), 0);
    assert_eq!(counts.get(Direction::West), 1);
    assert_eq!(counts.total(), 3);
}

#[test]
fn test_choose_next_empty_falls_back_to_north() {
    let mut signal = controller();
    assert_eq!(signal.choose_next(&[]), Direction::North);
    assert_eq!(signal.green_duration(), signal.green_duration_base());
}

#[test]
fn test_choose_next_breaks_ties_in_enumeration_order() {
    let mut signal = controller();
    let vehicles = vec![
        vehicle(0, Direction::West, false),
        vehicle(1, Direction::West, false),
        vehicle(2, Direction::East, false),
        vehicle(3, Direction::East, false),
        vehicle(4, Direction::South, false),
    ];
    assert_eq!(signal.choose_next(&vehicles), Direction::East);
    assert_eq!(signal.green_duration(), 120 + 5 * 2);
}

#[test]
fn test_regular_cycle_timing() {
    let mut signal = controller();

    let (ticks, event) = run_until_transition(&mut signal, &[]);
    assert_eq!(ticks, 121, "green lasts until the timer exceeds the duration");
    assert_eq!(event, SignalEvent::Yellow(Direction::North));
    assert_eq!(signal.phase(), SignalPhase::Yellow);
    assert_eq!(signal.timer(), 0);
    assert_eq!(signal.light(Direction::North), LightColor::Yellow);

    let (ticks, event) = run_until_transition(&mut signal, &[]);
    assert_eq!(ticks, 51);
    assert_eq!(event, SignalEvent::Green(Direction::North));
    assert_eq!(signal.phase(), SignalPhase::Green);
    assert_eq!(signal.timer(), 0);
}

#[test]
fn test_green_duration_tracks_chosen_queue() {
    let mut signal = controller();
    let vehicles = vec![
        vehicle(0, Direction::South, false),
        vehicle(1, Direction::South, false),
        vehicle(2, Direction::South, false),
        vehicle(3, Direction::North, false),
    ];

    run_until_transition(&mut signal, &vehicles);
    let (_, event) = run_until_transition(&mut signal, &vehicles);

    let count = signal.congestion(&vehicles).get(Direction::South);
    assert_eq!(event, SignalEvent::Green(Direction::South));
    assert_eq!(signal.current(), Direction::South);
    assert_eq!(signal.green_duration(), signal.green_duration_base() + 5 * count as u32);
    assert_eq!(signal.green_duration(), 135);
}

#[test]
fn test_preemption_overrides_yellow() {
    let mut signal = controller();
    run_until_transition(&mut signal, &[]);
    for _ in 0..10 {
        signal.update(&[]);
    }
    assert_eq!(signal.phase(), SignalPhase::Yellow);

    let vehicles = vec![vehicle(0, Direction::North, false), vehicle(1, Direction::West, true)];
    let event = signal.update(&vehicles);

    assert_eq!(
        event,
        SignalEvent::Preempted {
            direction: Direction::West,
            engaged: true
        }
    );
    assert_eq!(signal.current(), Direction::West);
    assert_eq!(signal.phase(), SignalPhase::Green);
    assert_eq!(signal.timer(), 0);
    assert!(signal.emergency_lock());

    // Holding while the emergency vehicle is still approaching
    for _ in 0..500 {
        assert_eq!(
            signal.update(&vehicles),
            SignalEvent::Preempted {
                direction: Direction::West,
                engaged: false
            }
        );
        assert_eq!(signal.timer(), 0);
    }
}

#[test]
fn test_preemption_release_resumes_timing() {
    let mut signal = controller();
    signal.update(&[vehicle(0, Direction::East, true)]);
    assert!(signal.emergency_lock());

    let event = signal.update(&[crossed_vehicle(0, Direction::East, true)]);
    assert_eq!(event, SignalEvent::PreemptionCleared);
    assert!(!signal.emergency_lock());
    assert_eq!(signal.current(), Direction::East);
    assert_eq!(signal.phase(), SignalPhase::Green);
    assert_eq!(signal.timer(), 1);

    assert_eq!(signal.update(&[]), SignalEvent::Held);
    assert_eq!(signal.timer(), 2);
}

#[test]
fn test_first_emergency_vehicle_wins() {
    let mut signal = controller();
    let vehicles = vec![
        crossed_vehicle(0, Direction::North, true),
        vehicle(1, Direction::South, true),
        vehicle(2, Direction::East, true),
    ];
    assert_eq!(
        signal.update(&vehicles),
        SignalEvent::Preempted {
            direction: Direction::South,
            engaged: true
        }
    );
    assert_eq!(signal.current(), Direction::South);

    // Order decides, not direction; switching direction engages again
    let reordered = vec![vehicles[2].clone(), vehicles[1].clone()];
    assert_eq!(
        signal.update(&reordered),
        SignalEvent::Preempted {
            direction: Direction::East,
            engaged: true
        }
    );
    assert_eq!(signal.current(), Direction::East);
}

#[test]
fn test_exactly_one_direction_not_red() {
    let mut signal = controller();
    let vehicles = vec![vehicle(0, Direction::West, false), vehicle(1, Direction::East, false)];
    for _ in 0..2_000 {
        signal.update(&vehicles);
        let lit = Direction::ALL
            .iter()
            .filter(|d| signal.light(**d) != LightColor::Red)
            .count();
        assert_eq!(lit, 1);
        assert!(signal.timer() <= signal.green_duration().max(signal.yellow_duration()));
    }
}
