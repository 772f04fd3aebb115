#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use glam::Vec3;

    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::error::GameError;
    use crate::events::{EventKind, GameEvent};
    use crate::notify::{publish, Dispatch, EventBus, Notification};
    use crate::state::SaveState;
    use crate::types::{SimTime, Transform};

    /// Something a test listener does while handling a delivery.
    #[derive(Clone)]
    enum Reaction {
        Subscribe(u32, EventKind),
        Unsubscribe(u32, EventKind),
        Publish(GameEvent),
    }

    /// Minimal dispatcher: records deliveries and runs scripted reactions.
    #[derive(Default)]
    struct Recorder {
        bus: EventBus<u32>,
        dead: HashSet<u32>,
        log: Vec<(u32, EventKind)>,
        reactions: HashMap<u32, Vec<Reaction>>,
        published: usize,
    }

    impl Dispatch<u32> for Recorder {
        fn bus(&self) -> &EventBus<u32> {
            &self.bus
        }

        fn is_alive(&self, listener: u32) -> bool {
            !self.dead.contains(&listener)
        }

        fn deliver(&mut self, listener: u32, note: &Notification<u32>) {
            self.log.push((listener, note.event.kind()));
            // Reactions fire once so nested publishes terminate.
            let reactions = self.reactions.remove(&listener).unwrap_or_default();
            for reaction in reactions {
                match reaction {
                    Reaction::Subscribe(l, kind) => self.bus.subscribe(l, kind),
                    Reaction::Unsubscribe(l, kind) => self.bus.unsubscribe(l, kind),
                    Reaction::Publish(event) => {
                        publish(self, listener, event);
                    }
                }
            }
        }

        fn on_publish(&mut self, _note: &Notification<u32>) {
            self.published += 1;
        }
    }

    fn delivered_to(log: &[(u32, EventKind)]) -> Vec<u32> {
        log.iter().map(|(l, _)| *l).collect()
    }

    // ---- Event bus ----

    #[test]
    fn test_publish_in_subscription_order() {
        let mut rec = Recorder::default();
        rec.bus.subscribe(3, EventKind::WeaponChange);
        rec.bus.subscribe(1, EventKind::WeaponChange);
        rec.bus.subscribe(2, EventKind::WeaponChange);
        rec.bus.subscribe(9, EventKind::AmmoExpired);

        let n = publish(
            &mut rec,
            0,
            GameEvent::WeaponChange {
                weapon_type: WeaponType::Gun,
            },
        );
        assert_eq!(n, 3);
        assert_eq!(delivered_to(&rec.log), vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicate_subscription_delivers_twice() {
        let mut rec = Recorder::default();
        rec.bus.subscribe(1, EventKind::Strike);
        rec.bus.subscribe(1, EventKind::Strike);
        publish(&mut rec, 0, GameEvent::Strike { damage: 5 });
        assert_eq!(delivered_to(&rec.log), vec![1, 1]);
    }

    #[test]
    fn test_publish_without_listeners_is_noop() {
        let mut rec = Recorder::default();
        let n = publish(&mut rec, 0, GameEvent::PlayerDied);
        assert_eq!(n, 0);
        assert!(rec.log.is_empty());
        assert_eq!(rec.bus.kind_count(), 0);
    }

    #[test]
    fn test_unsubscribe_removes_all_occurrences() {
        let mut bus = EventBus::new();
        bus.subscribe(1u32, EventKind::Chase);
        bus.subscribe(2, EventKind::Chase);
        bus.subscribe(1, EventKind::Chase);
        bus.unsubscribe(1, EventKind::Chase);
        assert_eq!(bus.listeners(EventKind::Chase), &[2]);

        // Absent listener / absent kind: nothing happens.
        bus.unsubscribe(7, EventKind::Chase);
        bus.unsubscribe(7, EventKind::ExitGame);
        assert_eq!(bus.listeners(EventKind::Chase), &[2]);
    }

    #[test]
    fn test_removed_listener_not_delivered() {
        let mut rec = Recorder::default();
        rec.bus.subscribe(1, EventKind::Attack);
        rec.bus.subscribe(2, EventKind::Attack);
        rec.bus.unsubscribe(1, EventKind::Attack);
        publish(&mut rec, 0, GameEvent::Attack);
        assert_eq!(delivered_to(&rec.log), vec![2]);
    }

    #[test]
    fn test_subscribe_during_dispatch_waits_for_next_publish() {
        let mut rec = Recorder::default();
        rec.bus.subscribe(1, EventKind::Patrol);
        rec.bus.subscribe(2, EventKind::Patrol);
        rec.reactions
            .insert(1, vec![Reaction::Subscribe(5, EventKind::Patrol)]);

        publish(&mut rec, 0, GameEvent::Patrol);
        assert_eq!(delivered_to(&rec.log), vec![1, 2]);

        rec.log.clear();
        publish(&mut rec, 0, GameEvent::Patrol);
        assert_eq!(delivered_to(&rec.log), vec![1, 2, 5]);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_keeps_current_round_intact() {
        let mut rec = Recorder::default();
        rec.bus.subscribe(1, EventKind::Chase);
        rec.bus.subscribe(2, EventKind::Chase);
        rec.bus.subscribe(3, EventKind::Chase);
        rec.reactions
            .insert(1, vec![Reaction::Unsubscribe(1, EventKind::Chase)]);

        publish(&mut rec, 0, GameEvent::Chase);
        // Removing itself must not shift 2 out of the iteration.
        assert_eq!(delivered_to(&rec.log), vec![1, 2, 3]);

        rec.log.clear();
        publish(&mut rec, 0, GameEvent::Chase);
        assert_eq!(delivered_to(&rec.log), vec![2, 3]);
    }

    #[test]
    fn test_nested_publish_completes_before_outer_continues() {
        let mut rec = Recorder::default();
        rec.bus.subscribe(1, EventKind::Strike);
        rec.bus.subscribe(2, EventKind::Strike);
        rec.bus.subscribe(10, EventKind::PlayerDamaged);
        rec.reactions.insert(
            1,
            vec![Reaction::Publish(GameEvent::PlayerDamaged {
                amount: 10,
                health: 90,
            })],
        );

        publish(&mut rec, 0, GameEvent::Strike { damage: 10 });
        assert_eq!(
            rec.log,
            vec![
                (1, EventKind::Strike),
                (10, EventKind::PlayerDamaged),
                (2, EventKind::Strike),
            ]
        );
        assert_eq!(rec.published, 2);
    }

    #[test]
    fn test_stale_listener_is_skipped() {
        let mut rec = Recorder::default();
        rec.bus.subscribe(1, EventKind::EnemyDestroyed);
        rec.bus.subscribe(2, EventKind::EnemyDestroyed);
        rec.dead.insert(1);
        let n = publish(
            &mut rec,
            0,
            GameEvent::EnemyDestroyed {
                enemy_type: EnemyType::Drone,
            },
        );
        assert_eq!(n, 1);
        assert_eq!(delivered_to(&rec.log), vec![2]);
    }

    #[test]
    fn test_compact_drops_dead_and_empty_kinds() {
        let mut bus = EventBus::new();
        bus.subscribe(1u32, EventKind::Strike);
        bus.subscribe(2, EventKind::Strike);
        bus.subscribe(3, EventKind::Strike);
        bus.subscribe(2, EventKind::Strike);
        bus.subscribe(2, EventKind::AmmoExpired);

        let removed = bus.compact(|l| l != 2);
        assert_eq!(removed, 3);
        assert_eq!(bus.listeners(EventKind::Strike), &[1, 3]);
        assert_eq!(bus.kind_count(), 1, "AmmoExpired entry should be dropped");

        // Compacting a clean bus is harmless.
        assert_eq!(bus.compact(|_| true), 0);
        bus.clear();
        assert!(bus.is_empty());
    }

    // ---- Vocabulary ----

    #[test]
    fn test_state_entered_kinds() {
        assert_eq!(
            GameEvent::state_entered(EnemyState::Patrol).kind(),
            EventKind::Patrol
        );
        assert_eq!(
            GameEvent::state_entered(EnemyState::Chase).kind(),
            EventKind::Chase
        );
        assert_eq!(
            GameEvent::state_entered(EnemyState::Attack).kind(),
            EventKind::Attack
        );
    }

    #[test]
    fn test_enemy_state_from_index() {
        assert_eq!(EnemyState::try_from(0).unwrap(), EnemyState::Patrol);
        assert_eq!(EnemyState::try_from(2).unwrap(), EnemyState::Attack);
        assert!(matches!(
            EnemyState::try_from(3),
            Err(GameError::UnknownEnemyState(3))
        ));
        assert!(matches!(
            WeaponType::try_from(9),
            Err(GameError::UnknownWeaponType(9))
        ));
    }

    #[test]
    fn test_enemy_state_serde() {
        for v in [EnemyState::Patrol, EnemyState::Chase, EnemyState::Attack] {
            let json = serde_json::to_string(&v).unwrap();
            let back: EnemyState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_command_json_shape() {
        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"Fire"}"#).unwrap();
        assert!(matches!(cmd, PlayerCommand::Fire));

        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"SetInputAllowed","allowed":false}"#).unwrap();
        assert!(matches!(
            cmd,
            PlayerCommand::SetInputAllowed { allowed: false }
        ));
    }

    #[test]
    fn test_save_state_round_trip_is_exact() {
        let mut state = SaveState {
            health: 37,
            cash: 1234.5678,
            collected_gun: true,
            ..Default::default()
        };
        state.set_transform(&Transform {
            position: Vec3::new(1.1, -2.25, 3.333),
            rotation: Vec3::new(0.0, 271.7, 0.1),
            scale: Vec3::new(1.0, 0.5, 2.0),
        });

        let json = serde_json::to_string(&state).unwrap();
        let back: SaveState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
        assert_eq!(back.transform().position.y, -2.25);
        assert!(back.collected(WeaponType::Gun));
        assert!(!back.collected(WeaponType::Punch));
    }

    #[test]
    fn test_transform_forward() {
        let t = Transform::default();
        assert!((t.forward() - Vec3::Z).length() < 1e-6);

        let mut turned = Transform::default();
        turned.rotation.y = 90.0;
        assert!((turned.forward() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..crate::constants::TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-5);
    }
}
