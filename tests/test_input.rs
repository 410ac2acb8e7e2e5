use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use projectile_playground::compute::init_state;
use projectile_playground::entities::*;
use projectile_playground::input::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
}

// ── key mapping ───────────────────────────────────────────────────────────────

#[test]
fn number_keys_select_types() {
    assert_eq!(
        map_key(&press(KeyCode::Char('1'))),
        Some(InputEvent::Select(ProjectileType::Bullet))
    );
    assert_eq!(
        map_key(&press(KeyCode::Char('5'))),
        Some(InputEvent::Select(ProjectileType::Firework))
    );
    assert_eq!(map_key(&press(KeyCode::Char('0'))), None);
    assert_eq!(map_key(&press(KeyCode::Char('9'))), None);
}

#[test]
fn space_fires_and_quit_keys_exit() {
    assert_eq!(map_key(&press(KeyCode::Char(' '))), Some(InputEvent::Fire));
    assert_eq!(map_key(&press(KeyCode::Esc)), Some(InputEvent::Exit));
    assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(InputEvent::Exit));
    assert_eq!(map_key(&press(KeyCode::Char('Q'))), Some(InputEvent::Exit));
    let ctrl_c = KeyEvent::new_with_kind(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
        KeyEventKind::Press,
    );
    assert_eq!(map_key(&ctrl_c), Some(InputEvent::Exit));
    assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
}

#[test]
fn repeats_and_releases_are_ignored() {
    for kind in [KeyEventKind::Repeat, KeyEventKind::Release] {
        let ev = KeyEvent::new_with_kind(KeyCode::Char(' '), KeyModifiers::NONE, kind);
        assert_eq!(map_key(&ev), None);
    }
}

#[test]
fn non_key_events_are_ignored() {
    assert_eq!(map_event(&Event::Resize(80, 24)), None);
    assert_eq!(map_event(&Event::FocusGained), None);
    assert_eq!(
        map_event(&Event::Key(press(KeyCode::Char(' ')))),
        Some(InputEvent::Fire)
    );
}

// ── queue ─────────────────────────────────────────────────────────────────────

#[test]
fn queue_applies_events_in_order() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut queue = InputQueue::new();
    queue.push(InputEvent::Select(ProjectileType::Artillery));
    queue.push(InputEvent::Fire);
    assert_eq!(queue.len(), 2);

    let (state, exit) = queue.drain_into(&init_state(StepMode::SinceLaunch), &mut rng);
    assert!(!exit);
    assert!(queue.is_empty());
    assert_eq!(state.projectile_type, Some(ProjectileType::Artillery));
    assert_eq!(state.state, ProjectileState::Active);
}

#[test]
fn fire_then_select_leaves_shot_idle() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut queue = InputQueue::new();
    queue.push(InputEvent::Fire);
    queue.push(InputEvent::Select(ProjectileType::Laser));
    let (state, _) = queue.drain_into(&init_state(StepMode::SinceLaunch), &mut rng);
    assert_eq!(state.state, ProjectileState::Idle);
}

#[test]
fn exit_stops_the_drain() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut queue = InputQueue::new();
    queue.push(InputEvent::Select(ProjectileType::Bullet));
    queue.push(InputEvent::Exit);
    queue.push(InputEvent::Fire);

    let (state, exit) = queue.drain_into(&init_state(StepMode::SinceLaunch), &mut rng);
    assert!(exit);
    assert!(queue.is_empty());
    assert_eq!(state.projectile_type, Some(ProjectileType::Bullet));
    assert_eq!(state.state, ProjectileState::Idle);
}

#[test]
fn raw_events_are_filtered() {
    let mut queue = InputQueue::new();
    queue.push_raw(&Event::Resize(10, 10));
    queue.push_raw(&Event::Key(KeyEvent::new_with_kind(
        KeyCode::Char('3'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    )));
    assert!(queue.is_empty());
    queue.push_raw(&Event::Key(press(KeyCode::Char('3'))));
    assert_eq!(queue.len(), 1);
}

#[test]
fn apply_event_exit_is_none() {
    let mut rng = StdRng::seed_from_u64(1);
    let s = init_state(StepMode::SinceLaunch);
    assert!(apply_event(&s, InputEvent::Exit, &mut rng).is_none());
    let fired = apply_event(&s, InputEvent::Fire, &mut rng).expect("state");
    assert_eq!(fired.state, ProjectileState::Active);
}
