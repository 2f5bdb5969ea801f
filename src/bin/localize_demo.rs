use anyhow::Result;
use prometheus_localization::{
    Hypothesis, LocalizationEngine, Maze, Observation, ObservationSource, Orientation,
    ScriptedObservations,
};

const MAZE: [&str; 5] = [
    "#######",
    "#.....#",
    "#.#.#.#",
    "#.....#",
    "#######",
];

/// Window the robot would report at `pose`, with its heading in the centre
fn window_at(maze: &Maze, pose: &Hypothesis) -> Result<Observation> {
    let rows: Vec<String> = (-1..=1)
        .map(|dy| {
            (-1..=1)
                .map(|dx| {
                    if dx == 0 && dy == 0 {
                        pose.heading().glyph()
                    } else {
                        maze.cell(pose.x() + dx, pose.y() + dy)
                            .map(|cell| cell.to_char())
                            .unwrap_or('#')
                    }
                })
                .collect()
        })
        .collect();
    Ok(Observation::from_rows(&rows[..])?)
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Initializing grid localization...");
    let maze = Maze::from_rows(&MAZE)?;
    println!(
        "Maze is {}x{} with {} open cells",
        maze.rows(),
        maze.cols(),
        maze.open_count()
    );

    // Drive up the west corridor, turn right, then along the top
    let path = [
        Hypothesis::new(1, 3, Orientation::Up),
        Hypothesis::new(1, 2, Orientation::Up),
        Hypothesis::new(1, 1, Orientation::Up),
        Hypothesis::new(1, 1, Orientation::Right),
        Hypothesis::new(2, 1, Orientation::Right),
        Hypothesis::new(3, 1, Orientation::Right),
    ];
    let observations = path
        .iter()
        .map(|pose| window_at(&maze, pose))
        .collect::<Result<Vec<_>>>()?;

    let mut engine = LocalizationEngine::new(maze);
    let mut source = ScriptedObservations::new("west_corridor", observations);

    for (step, truth) in path.iter().enumerate() {
        let Some(observation) = source.next_observation()? else {
            break;
        };
        engine.observe(observation)?;

        let snapshot = engine.snapshot();
        println!(
            "Step {}: truth {} -> {} hypotheses",
            step,
            truth,
            snapshot.count()
        );
        for hypothesis in &snapshot {
            println!("    {}", hypothesis);
        }
    }

    match engine.estimate() {
        Some(pose) => println!("Localized at {}", pose),
        None => println!("Not localized yet"),
    }

    Ok(())
}
