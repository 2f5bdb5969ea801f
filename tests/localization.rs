use prometheus_localization::{
    Hypothesis, LocalizationEngine, Maze, Observation, Orientation, ScriptedObservations,
};

const LOOP_MAZE: [&str; 5] = [
    "#######",
    "#.....#",
    "#.#.#.#",
    "#.....#",
    "#######",
];

fn loop_maze() -> Maze {
    Maze::from_rows(&LOOP_MAZE).unwrap()
}

fn open_room() -> Maze {
    Maze::from_rows(&[
        "#######",
        "#.....#",
        "#.....#",
        "#.....#",
        "#.....#",
        "#.....#",
        "#######",
    ])
    .unwrap()
}

/// Maze-frame window around `(x, y)` with the given centre glyph
fn window_at(maze: &Maze, x: i32, y: i32, center: char) -> Observation {
    let rows: Vec<String> = (-1..=1)
        .map(|dy| {
            (-1..=1)
                .map(|dx| {
                    if dx == 0 && dy == 0 {
                        center
                    } else {
                        maze.cell(x + dx, y + dy).unwrap().to_char()
                    }
                })
                .collect()
        })
        .collect();
    Observation::from_rows(&rows[..]).unwrap()
}

fn pose_window(maze: &Maze, pose: &Hypothesis) -> Observation {
    window_at(maze, pose.x(), pose.y(), pose.heading().glyph())
}

#[test]
fn test_known_heading_converges_to_truth() {
    let maze = loop_maze();
    let mut engine = LocalizationEngine::new(maze.clone());

    engine.observe(window_at(&maze, 2, 1, '>')).unwrap();
    let seeded = engine.snapshot();
    assert_eq!(seeded.count(), 2);
    assert!(seeded.contains(&Hypothesis::new(2, 1, Orientation::Right)));
    assert!(seeded.contains(&Hypothesis::new(4, 1, Orientation::Right)));
    assert_eq!(engine.estimate(), None);

    engine.observe(window_at(&maze, 3, 1, '>')).unwrap();
    assert_eq!(engine.snapshot().count(), 1);
    assert_eq!(
        engine.estimate(),
        Some(Hypothesis::new(3, 1, Orientation::Right))
    );
}

#[test]
fn test_truth_survives_truthful_observations() {
    let maze = loop_maze();
    let path = [
        Hypothesis::new(1, 3, Orientation::Up),
        Hypothesis::new(1, 2, Orientation::Up),
        Hypothesis::new(1, 1, Orientation::Up),
        Hypothesis::new(1, 1, Orientation::Right),
        Hypothesis::new(2, 1, Orientation::Right),
        Hypothesis::new(3, 1, Orientation::Right),
    ];

    let mut engine = LocalizationEngine::new(maze.clone());
    for truth in &path {
        engine.observe(pose_window(&maze, truth)).unwrap();
        assert!(
            engine.snapshot().contains(truth),
            "lost {} after {} observations",
            truth,
            engine.cycles()
        );
    }
    assert_eq!(engine.estimate(), Some(path[path.len() - 1]));
}

#[test]
fn test_empty_set_stays_empty() {
    let maze = loop_maze();
    let mut engine = LocalizationEngine::new(maze.clone());

    // A closed box appears nowhere in the maze
    engine
        .observe(Observation::from_rows(&["###", "#>#", "###"]).unwrap())
        .unwrap();
    assert_eq!(engine.snapshot().count(), 0);

    engine.observe(window_at(&maze, 2, 1, '>')).unwrap();
    assert_eq!(engine.snapshot().count(), 0);
    engine.observe(window_at(&maze, 2, 1, 'v')).unwrap();
    assert_eq!(engine.snapshot().count(), 0);
    engine.observe(window_at(&maze, 2, 1, '*')).unwrap();
    assert_eq!(engine.snapshot().count(), 0);
    assert_eq!(engine.estimate(), None);
}

#[test]
fn test_rotation_in_place_keeps_positions() {
    let maze = loop_maze();
    let mut engine = LocalizationEngine::new(maze.clone());

    engine.observe(window_at(&maze, 2, 1, '>')).unwrap();
    let before = engine.snapshot();

    engine.observe(window_at(&maze, 2, 1, 'v')).unwrap();
    let after = engine.snapshot();

    assert_eq!(after.count(), before.count());
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!((old.x(), old.y()), (new.x(), new.y()));
        assert_eq!(new.heading(), Orientation::Down);
    }
}

#[test]
fn test_snapshot_does_not_alias_live_set() {
    let maze = loop_maze();
    let mut engine = LocalizationEngine::new(maze.clone());
    engine.observe(window_at(&maze, 2, 1, '>')).unwrap();

    let mut snapshot = engine.snapshot();
    snapshot.clear();
    assert!(snapshot.is_empty());
    assert_eq!(engine.snapshot().count(), 2);

    engine.observe(window_at(&maze, 3, 1, '>')).unwrap();
    assert_eq!(
        engine.estimate(),
        Some(Hypothesis::new(3, 1, Orientation::Right))
    );
}

#[test]
fn test_open_room_unknown_then_known_heading() {
    let maze = open_room();
    let mut engine = LocalizationEngine::new(maze.clone());

    // North-west corner, read facing up: open to the right and below
    engine
        .observe(Observation::from_rows(&["###", "#*.", "#.."]).unwrap())
        .unwrap();
    let seeded: Vec<Hypothesis> = engine.snapshot().iter().copied().collect();
    // The same corner shape, rotated, appears in every corner of the room
    assert_eq!(
        seeded,
        vec![
            Hypothesis::new(1, 1, Orientation::Up),
            Hypothesis::new(5, 1, Orientation::Right),
            Hypothesis::new(1, 5, Orientation::Left),
            Hypothesis::new(5, 5, Orientation::Down),
        ]
    );

    // Heading now visible: treated as a turn, every corner now faces right
    engine.observe(window_at(&maze, 1, 1, '>')).unwrap();
    let turned = engine.snapshot();
    assert_eq!(turned.count(), 4);
    assert!(turned.iter().all(|h| h.heading() == Orientation::Right));

    // One step right: the eastern corners walk into the wall, the southern
    // one sees the wrong walls
    engine.observe(window_at(&maze, 2, 1, '>')).unwrap();
    assert_eq!(
        engine.estimate(),
        Some(Hypothesis::new(2, 1, Orientation::Right))
    );
}

#[test]
fn test_unknown_heading_tracks_forward_motion() {
    let maze = loop_maze();
    let mut engine = LocalizationEngine::new(maze.clone());

    // Facing up the robot frame coincides with the maze frame
    engine.observe(window_at(&maze, 1, 3, '*')).unwrap();
    assert!(engine
        .snapshot()
        .contains(&Hypothesis::new(1, 3, Orientation::Up)));

    engine.observe(window_at(&maze, 1, 2, '*')).unwrap();
    assert!(engine
        .snapshot()
        .contains(&Hypothesis::new(1, 2, Orientation::Up)));
}

#[test]
fn test_run_drains_scripted_source() {
    let maze = loop_maze();
    let observations = vec![window_at(&maze, 2, 1, '>'), window_at(&maze, 3, 1, '>')];
    let mut source = ScriptedObservations::new("top_corridor", observations);

    let mut engine = LocalizationEngine::new(maze);
    assert_eq!(engine.run(&mut source).unwrap(), 2);
    assert_eq!(source.remaining(), 0);
    assert_eq!(engine.cycles(), 2);
    assert_eq!(
        engine.estimate(),
        Some(Hypothesis::new(3, 1, Orientation::Right))
    );
}
