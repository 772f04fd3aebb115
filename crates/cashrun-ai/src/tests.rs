#[cfg(test)]
mod tests {
    use cashrun_core::constants::{DT, PATROL_TIMEOUT_SECS};
    use cashrun_core::enums::{EnemyState, EnemyType};
    use glam::Vec3;

    use crate::behavior::{AttackTask, Behavior, ChaseTask, PatrolTask, Perception, Steering};
    use crate::fsm::{evaluate, EnemyContext};
    use crate::profiles::{get_profile, EnemyProfile};

    /// Records steering calls; sampling returns scripted points in order.
    #[derive(Default)]
    struct ScriptedSteering {
        samples: Vec<Option<Vec3>>,
        sample_calls: usize,
        targets: Vec<Vec3>,
        stops: usize,
    }

    impl Steering for ScriptedSteering {
        fn sample_reachable_point(&mut self, _center: Vec3, _radius: f32) -> Option<Vec3> {
            let point = self.samples.get(self.sample_calls).copied().flatten();
            self.sample_calls += 1;
            point
        }

        fn set_move_target(&mut self, target: Vec3) {
            self.targets.push(target);
        }

        fn stop_movement(&mut self) {
            self.stops += 1;
        }
    }

    fn profile() -> EnemyProfile {
        EnemyProfile {
            chase_radius: 10.0,
            attack_radius: 1.0,
            recovery_delay: 1.0,
            ..get_profile(EnemyType::Drone)
        }
    }

    fn perceive(position: Vec3, player_distance: f32) -> Perception {
        Perception {
            position,
            player_position: position + Vec3::new(player_distance, 0.0, 0.0),
            dt: DT,
        }
    }

    fn next(state: EnemyState, distance: f32) -> Option<EnemyState> {
        let update = evaluate(&EnemyContext {
            state,
            distance_to_player: distance,
            chase_radius: 10.0,
            attack_radius: 1.0,
        });
        update.state_changed.then_some(update.new_state)
    }

    #[test]
    fn test_transition_table() {
        let cases = [
            (EnemyState::Patrol, 20.0, None),
            (EnemyState::Patrol, 10.0, None),
            (EnemyState::Patrol, 9.9, Some(EnemyState::Chase)),
            (EnemyState::Patrol, 0.5, Some(EnemyState::Chase)),
            (EnemyState::Chase, 5.0, None),
            (EnemyState::Chase, 0.5, Some(EnemyState::Attack)),
            (EnemyState::Chase, 10.5, Some(EnemyState::Patrol)),
            (EnemyState::Chase, 10.0, None),
            (EnemyState::Attack, 0.5, None),
            (EnemyState::Attack, 1.0, None),
            (EnemyState::Attack, 3.0, Some(EnemyState::Chase)),
            (EnemyState::Attack, 11.0, Some(EnemyState::Patrol)),
        ];
        for (state, distance, expected) in cases {
            assert_eq!(
                next(state, distance),
                expected,
                "{state:?} at distance {distance}"
            );
        }
    }

    #[test]
    fn test_patrol_never_jumps_to_attack() {
        for distance in [0.0, 0.01, 0.5, 0.99] {
            assert_eq!(next(EnemyState::Patrol, distance), Some(EnemyState::Chase));
        }
    }

    #[test]
    fn test_unchanged_update_keeps_state() {
        let update = evaluate(&EnemyContext {
            state: EnemyState::Chase,
            distance_to_player: 5.0,
            chase_radius: 10.0,
            attack_radius: 1.0,
        });
        assert!(!update.state_changed);
        assert_eq!(update.new_state, EnemyState::Chase);
    }

    #[test]
    fn test_patrol_picks_waypoint_on_first_resume() {
        let mut task = PatrolTask::default();
        let mut steering = ScriptedSteering {
            samples: vec![Some(Vec3::new(5.0, 0.0, 5.0))],
            ..Default::default()
        };
        let resume = task.resume(&profile(), &perceive(Vec3::ZERO, 50.0), &mut steering);

        assert_eq!(resume.transition, None);
        assert_eq!(steering.stops, 1);
        assert_eq!(steering.targets, vec![Vec3::new(5.0, 0.0, 5.0)]);
        assert_eq!(task.waypoint(), Some(Vec3::new(5.0, 0.0, 5.0)));
    }

    #[test]
    fn test_patrol_retries_failed_sample_next_tick() {
        let mut task = PatrolTask::default();
        let mut steering = ScriptedSteering {
            samples: vec![None, Some(Vec3::new(3.0, 0.0, 4.0))],
            ..Default::default()
        };
        task.resume(&profile(), &perceive(Vec3::ZERO, 50.0), &mut steering);
        assert_eq!(task.waypoint(), None);
        assert!(steering.targets.is_empty());

        task.resume(&profile(), &perceive(Vec3::ZERO, 50.0), &mut steering);
        assert_eq!(steering.sample_calls, 2);
        assert_eq!(steering.targets, vec![Vec3::new(3.0, 0.0, 4.0)]);
    }

    #[test]
    fn test_patrol_repicks_on_arrival() {
        let mut task = PatrolTask::default();
        let mut steering = ScriptedSteering {
            samples: vec![Some(Vec3::new(8.0, 0.0, 0.0)), Some(Vec3::new(-8.0, 0.0, 0.0))],
            ..Default::default()
        };
        task.resume(&profile(), &perceive(Vec3::ZERO, 50.0), &mut steering);
        task.resume(&profile(), &perceive(Vec3::new(4.0, 0.0, 0.0), 50.0), &mut steering);
        assert_eq!(steering.sample_calls, 1, "still far from the waypoint");

        task.resume(&profile(), &perceive(Vec3::new(6.5, 0.0, 0.0), 50.0), &mut steering);
        assert_eq!(steering.sample_calls, 2, "within arrival distance");
        assert_eq!(task.waypoint(), Some(Vec3::new(-8.0, 0.0, 0.0)));
    }

    #[test]
    fn test_patrol_abandons_unreachable_waypoint_after_timeout() {
        let mut task = PatrolTask::default();
        let mut steering = ScriptedSteering {
            samples: vec![Some(Vec3::new(9.0, 0.0, 0.0)), Some(Vec3::new(0.0, 0.0, 9.0))],
            ..Default::default()
        };
        let stuck = perceive(Vec3::ZERO, 50.0);
        task.resume(&profile(), &stuck, &mut steering);

        let timeout_ticks = (PATROL_TIMEOUT_SECS / DT) as usize;
        for _ in 0..timeout_ticks - 5 {
            task.resume(&profile(), &stuck, &mut steering);
        }
        assert_eq!(steering.sample_calls, 1);

        for _ in 0..10 {
            task.resume(&profile(), &stuck, &mut steering);
        }
        assert_eq!(steering.sample_calls, 2);
    }

    #[test]
    fn test_patrol_reports_chase_when_player_close() {
        let mut task = PatrolTask::default();
        let mut steering = ScriptedSteering::default();
        let resume = task.resume(&profile(), &perceive(Vec3::ZERO, 4.0), &mut steering);
        assert_eq!(resume.transition, Some(EnemyState::Chase));
        assert!(!resume.strike);
    }

    #[test]
    fn test_chase_follows_live_player_position() {
        let mut task = ChaseTask::default();
        let mut steering = ScriptedSteering::default();
        task.resume(&profile(), &perceive(Vec3::ZERO, 5.0), &mut steering);
        task.resume(&profile(), &perceive(Vec3::ZERO, 6.0), &mut steering);

        assert_eq!(steering.stops, 1);
        assert_eq!(
            steering.targets,
            vec![Vec3::new(5.0, 0.0, 0.0), Vec3::new(6.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_attack_strikes_immediately_then_waits_for_recovery() {
        let profile = profile();
        let mut task = AttackTask::new(profile.recovery_delay);
        let mut steering = ScriptedSteering::default();
        let close = perceive(Vec3::ZERO, 0.5);

        assert!(task.resume(&profile, &close, &mut steering).strike);

        let mut strikes = 0;
        for _ in 0..28 {
            if task.resume(&profile, &close, &mut steering).strike {
                strikes += 1;
            }
        }
        assert_eq!(strikes, 0, "recovery not yet elapsed");

        for _ in 0..3 {
            if task.resume(&profile, &close, &mut steering).strike {
                strikes += 1;
            }
        }
        assert_eq!(strikes, 1);
    }

    #[test]
    fn test_attack_exit_wins_over_strike() {
        let profile = profile();
        let mut task = AttackTask::new(profile.recovery_delay);
        let mut steering = ScriptedSteering::default();
        let resume = task.resume(&profile, &perceive(Vec3::ZERO, 3.0), &mut steering);

        assert_eq!(resume.transition, Some(EnemyState::Chase));
        assert!(!resume.strike);
    }

    #[test]
    fn test_behavior_for_state_matches() {
        let profile = profile();
        for state in [EnemyState::Patrol, EnemyState::Chase, EnemyState::Attack] {
            assert_eq!(Behavior::for_state(state, &profile).state(), state);
        }
    }

    #[test]
    fn test_default_profiles_are_valid() {
        for enemy_type in [EnemyType::Drone, EnemyType::ToughGuy, EnemyType::Boss] {
            let profile = get_profile(enemy_type);
            assert_eq!(profile.enemy_type, enemy_type);
            assert!(profile.validate().is_ok());
            assert!(profile.attack_radius < profile.chase_radius);
        }
    }

    #[test]
    fn test_negative_radius_rejected() {
        let profile = EnemyProfile {
            chase_radius: -1.0,
            ..get_profile(EnemyType::Boss)
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_profile_json_shape() {
        let json = serde_json::to_value(get_profile(EnemyType::ToughGuy)).unwrap();
        assert_eq!(json["enemy_type"], "ToughGuy");
        assert_eq!(json["health"], 200);
    }
}
