#[cfg(test)]
mod cube_tests {
    use proptest::prelude::*;
    use cube_cipher_core::cfb::MOVE_SET;
    use cube_cipher_core::constants::CELL_COUNT;
    use cube_cipher_core::cube::{
        lattice_points, parse_sequence, CubeDriver, CubeError, CubeState, Face, Move, Rotation,
        SensorConfig,
    };

    fn fresh() -> CubeState {
        CubeState::from_seed("cube tests")
    }

    #[test]
    fn test_initial_cube_is_solved() {
        let cube = fresh();
        assert_eq!(cube.cells().len(), CELL_COUNT);
        assert_eq!(lattice_points().count(), CELL_COUNT);
        assert!(cube.is_solved());
        assert!(cube.is_valid_permutation());
        assert_eq!(cube.moves_applied(), 0);
    }

    #[test]
    fn test_facelets_per_cell_kind() {
        let cube = fresh();
        let count = |p| cube.cell_at(p).unwrap().labels().count();
        assert_eq!(count([0, 0, 0]), 0); // core
        assert_eq!(count([0, 1, 0]), 1); // center
        assert_eq!(count([1, 1, 0]), 2); // edge
        assert_eq!(count([1, 1, 1]), 3); // corner
        let total: usize = cube.cells().iter().map(|c| c.labels().count()).sum();
        assert_eq!(total, 54);
    }

    #[test]
    fn test_quarter_turns_are_proper() {
        for mv in Move::ALL {
            let r = mv.rotation();
            assert!(r.is_proper(), "{} is not a proper rotation", mv);
            assert_eq!(r.compose(&mv.inverse().rotation()), Rotation::IDENTITY);
        }
    }

    #[test]
    fn test_move_then_inverse_restores() {
        for mv in Move::ALL {
            let mut cube = fresh();
            cube.apply(mv);
            assert!(!cube.is_solved(), "{} left the cube solved", mv);
            cube.apply(mv.inverse());
            assert!(cube.is_solved(), "{} then {} did not restore", mv, mv.inverse());
        }
    }

    #[test]
    fn test_four_quarter_turns_restore() {
        for mv in Move::ALL {
            let mut cube = fresh();
            cube.apply_sequence(&[mv; 4]);
            assert!(cube.is_solved(), "{}x4 did not restore", mv);
            assert_eq!(cube.moves_applied(), 4);
        }
    }

    #[test]
    fn test_sequence_and_its_reverse_inverse() {
        let moves = parse_sequence("R U R' U' F B' L D2").unwrap_or_default();
        assert!(moves.is_empty(), "D2 is not a quarter-turn generator");

        let moves = parse_sequence("R U R' U' F B' L D").unwrap();
        let mut cube = fresh();
        cube.apply_sequence(&moves);
        assert!(!cube.is_solved());
        let undo: Vec<Move> = moves.iter().rev().map(|m| m.inverse()).collect();
        cube.apply_sequence(&undo);
        assert!(cube.is_solved());
    }

    #[test]
    fn test_notation_round_trip() {
        for mv in Move::ALL {
            assert_eq!(mv.notation().parse::<Move>().unwrap(), mv);
        }
        assert_eq!("X".parse::<Move>(), Err(CubeError::UnknownMove("X".into())));
    }

    #[test]
    fn test_turn_only_moves_its_layer() {
        let mut cube = fresh();
        let before = cube.clone();
        cube.apply(Move::U);
        for (a, b) in before.cells().iter().zip(cube.cells()) {
            if a.position()[1] != 1 {
                assert_eq!(a, b);
            } else {
                assert_eq!(b.position()[1], 1);
            }
        }
    }

    #[test]
    fn test_default_sensor_reads_from_solved() {
        let cube = fresh();
        let reading = cube.sensor().unwrap();
        assert_eq!(reading.cell_home, [1, 1, 1]);
        assert_eq!(reading.face, Face::Up);
        assert_eq!(Some(reading.label), cube.cell_at([1, 1, 1]).unwrap().label(Face::Up));
        assert!(reading.alignment > 0.99);
    }

    #[test]
    fn test_up_turns_keep_up_facelet_at_sensor() {
        for mv in [Move::U, Move::UPrime] {
            let mut cube = fresh();
            cube.apply(mv);
            assert_eq!(cube.sensor().unwrap().face, Face::Up);
        }
    }

    // Every selectable generator brings a different cell under the sensor.
    #[test]
    fn test_selected_moves_change_sensor_cell() {
        for mv in MOVE_SET {
            let mut cube = fresh();
            let before = cube.sensor().unwrap();
            cube.apply(mv);
            let after = cube.sensor().unwrap();
            assert_ne!(before.cell_home, after.cell_home, "{} kept the sensor cell", mv);
        }
    }

    #[test]
    fn test_sensor_fault_on_core() {
        let cube = fresh();
        match cube.read([0, 0, 0], [0, 1, 0]) {
            Err(CubeError::SensorFault { position, .. }) => assert_eq!(position, [0, 0, 0]),
            other => panic!("expected a sensor fault, got {:?}", other),
        }
    }

    #[test]
    fn test_sensor_fault_on_diagonal_direction() {
        let cube = fresh().with_sensor(SensorConfig {
            position: [1, 1, 1],
            direction: [1, 1, 0],
        });
        match cube.sensor() {
            Err(CubeError::SensorFault { best_alignment, .. }) => {
                assert!((best_alignment - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
            }
            other => panic!("expected a sensor fault, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_position_rejected() {
        let cube = fresh();
        assert_eq!(cube.read([2, 0, 0], [0, 1, 0]).unwrap_err(), CubeError::EmptyPosition([2, 0, 0]));
    }

    #[test]
    fn test_driver_reports_sequence() {
        let mut cube = fresh();
        let first = cube.apply_move(Move::R).unwrap();
        let second = cube.apply_move(Move::F).unwrap();
        assert_eq!((first.mv, first.sequence), (Move::R, 1));
        assert_eq!((second.mv, second.sequence), (Move::F, 2));
        assert!(cube.read_sensor().is_ok());
    }

    #[test]
    fn test_reinitialize_returns_to_solved() {
        let mut cube = fresh();
        cube.apply_sequence(&[Move::R, Move::U, Move::F]);
        cube.reinitialize(&cube_cipher_core::crypto::derive_label_permutation("cube tests"));
        assert_eq!(cube, fresh());
    }

    #[test]
    fn test_restore_placements() {
        let mut moved = fresh();
        moved.apply_sequence(&[Move::R, Move::UPrime, Move::B]);

        let mut target = fresh();
        target.restore_placements(&moved.placements()).unwrap();
        assert_eq!(target.cells(), moved.cells());
        assert_eq!(target.sensor().unwrap(), moved.sensor().unwrap());
    }

    #[test]
    fn test_restore_rejects_collisions() {
        let mut cube = fresh();
        let mut placements = cube.placements();
        placements[1].position = placements[0].position;
        assert!(matches!(
            cube.restore_placements(&placements),
            Err(CubeError::InvalidPlacement(_))
        ));
        assert!(cube.is_solved());

        assert!(cube.restore_placements(&placements[..3]).is_err());
    }

    #[test]
    fn test_restore_rejects_reflection() {
        let mut cube = fresh();
        let mut placements = cube.placements();
        placements[0].orientation = [[-1, 0, 0], [0, 1, 0], [0, 0, 1]];
        assert!(cube.restore_placements(&placements).is_err());
    }

    fn any_move() -> impl Strategy<Value = Move> {
        prop::sample::select(Move::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_moves_conserve_labels_and_cells(moves in prop::collection::vec(any_move(), 0..64)) {
            let mut cube = fresh();
            let labels = cube.labels_multiset();
            cube.apply_sequence(&moves);
            prop_assert!(cube.is_valid_permutation());
            prop_assert_eq!(cube.labels_multiset(), labels);
            prop_assert!(cube.sensor().is_ok());
        }
    }
}
