//! Localization module
//!
//! A deterministic consistency filter over a grid maze. Every hypothesis is a
//! cell plus a heading; each observation prunes the hypotheses that cannot
//! explain it. Four update rules exist, picked by whether this is the first
//! observation and whether the observation shows the robot's heading.

use super::filters::{NeighborhoodMatcher, SEED_ALIGNMENTS, SHIFT_ALIGNMENTS};
use super::hypotheses::{HypothesisSet, DEFAULT_MAX_HYPOTHESES};
use super::maze::{Maze, OPEN_GLYPH, WALL_GLYPH};
use super::sensors::{Observation, ObservationSource, DEFAULT_NEUTRAL_GLYPH};
use crate::common::{Hypothesis, Orientation};
use crate::error::{LocalizationError, Result};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Localizer parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizerConfig {
    /// Upper bound on hypotheses produced by a single update
    pub max_hypotheses: usize,
    /// Centre glyph meaning "heading not observable"
    pub neutral_glyph: char,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        LocalizerConfig {
            max_hypotheses: DEFAULT_MAX_HYPOTHESES,
            neutral_glyph: DEFAULT_NEUTRAL_GLYPH,
        }
    }
}

impl LocalizerConfig {
    /// Configure the localizer with parameters
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<()> {
        if let Some(&max_hypotheses) = params.get("max_hypotheses") {
            if max_hypotheses < 1.0 || max_hypotheses.fract() != 0.0 {
                return Err(LocalizationError::Config(
                    "max_hypotheses must be a positive integer".to_string(),
                ));
            }
            self.max_hypotheses = max_hypotheses as usize;
        }

        Ok(())
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_hypotheses == 0 {
            return Err(LocalizationError::Config(
                "max_hypotheses must be positive".to_string(),
            ));
        }
        let reserved = [OPEN_GLYPH, WALL_GLYPH, '='];
        if reserved.contains(&self.neutral_glyph)
            || Orientation::from_glyph(self.neutral_glyph).is_some()
        {
            return Err(LocalizationError::Config(format!(
                "Neutral glyph '{}' collides with a maze or heading glyph",
                self.neutral_glyph
            )));
        }
        Ok(())
    }
}

/// The update rule applied for one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRule {
    /// First observation, heading shown
    SeedKnownHeading(Orientation),
    /// First observation, heading hidden
    SeedUnknownHeading,
    /// Later observation, heading shown. `rotated` is set when the centre
    /// glyph changed since the previous observation.
    FilterKnownHeading { heading: Orientation, rotated: bool },
    /// Later observation, heading hidden
    FilterUnknownHeading,
}

impl UpdateRule {
    /// Pick the rule for `current` given the observation before it
    pub fn select(previous: Option<&Observation>, current: &Observation) -> Self {
        match (previous, current.heading()) {
            (None, Some(heading)) => UpdateRule::SeedKnownHeading(heading),
            (None, None) => UpdateRule::SeedUnknownHeading,
            (Some(previous), Some(heading)) => UpdateRule::FilterKnownHeading {
                heading,
                rotated: previous.center() != current.center(),
            },
            (Some(_), None) => UpdateRule::FilterUnknownHeading,
        }
    }
}

/// Grid localization engine
#[derive(Debug, Clone)]
pub struct LocalizationEngine {
    maze: Maze,
    config: LocalizerConfig,
    previous_observation: Option<Observation>,
    current_observation: Option<Observation>,
    hypotheses: HypothesisSet,
    cycles: u64,
}

impl LocalizationEngine {
    /// Create a new engine with default parameters
    pub fn new(maze: Maze) -> Self {
        let config = LocalizerConfig::default();
        LocalizationEngine {
            maze,
            hypotheses: HypothesisSet::with_limit(config.max_hypotheses),
            config,
            previous_observation: None,
            current_observation: None,
            cycles: 0,
        }
    }

    /// Create a new engine with the given parameters
    pub fn with_config(maze: Maze, config: LocalizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(LocalizationEngine {
            maze,
            hypotheses: HypothesisSet::with_limit(config.max_hypotheses),
            config,
            previous_observation: None,
            current_observation: None,
            cycles: 0,
        })
    }

    /// Get the maze being localized in
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Get the active parameters
    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    /// Observations consumed since construction or the last reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Feed a new observation and replace the hypotheses.
    ///
    /// If the update overflows the hypothesis limit the error is returned and
    /// the engine is left with no hypotheses.
    pub fn observe(&mut self, observation: Observation) -> Result<()> {
        self.previous_observation = self.current_observation.replace(observation);
        self.cycles += 1;

        let rule = UpdateRule::select(self.previous_observation.as_ref(), &observation);
        let before = self.hypotheses.count();

        let updated = match rule {
            UpdateRule::SeedKnownHeading(heading) => {
                self.seed_known_heading(&observation, heading)
            }
            UpdateRule::SeedUnknownHeading => self.seed_unknown_heading(&observation),
            UpdateRule::FilterKnownHeading {
                heading,
                rotated: true,
            } => self.rotate_in_place(heading),
            UpdateRule::FilterKnownHeading { rotated: false, .. } => {
                self.advance_known_heading(&observation)
            }
            UpdateRule::FilterUnknownHeading => self.filter_unknown_heading(&observation),
        };

        self.hypotheses.clear();
        match updated {
            Ok(next) => self.hypotheses = next,
            Err(e) => {
                warn!("Cycle {}: {:?} failed: {}", self.cycles, rule, e);
                return Err(e);
            }
        }

        let after = self.hypotheses.count();
        debug!(
            "Cycle {}: {:?} kept {} of {} hypotheses",
            self.cycles, rule, after, before
        );
        if after == 1 && before != 1 {
            info!("Localized at {}", self.hypotheses.get(0));
        } else if after == 0 && before > 0 {
            warn!("Lost track of the robot after {} observations", self.cycles);
        }

        Ok(())
    }

    /// Parse a window with the configured neutral glyph, then observe it
    pub fn observe_rows<S: AsRef<str>>(&mut self, rows: &[S]) -> Result<()> {
        let observation = Observation::parse(rows, self.config.neutral_glyph)?;
        self.observe(observation)
    }

    /// Observe everything a source produces, returning how many windows were used
    pub fn run(&mut self, source: &mut dyn ObservationSource) -> Result<usize> {
        let mut consumed = 0;
        while let Some(observation) = source.next_observation()? {
            self.observe(observation)?;
            consumed += 1;
        }
        debug!(
            "Source '{}' exhausted after {} observations",
            source.name(),
            consumed
        );
        Ok(consumed)
    }

    /// Independent copy of the current hypotheses
    pub fn snapshot(&self) -> HypothesisSet {
        self.hypotheses.clone()
    }

    /// The single remaining hypothesis, once the filter has converged
    pub fn estimate(&self) -> Option<Hypothesis> {
        if self.hypotheses.count() == 1 {
            Some(*self.hypotheses.get(0))
        } else {
            None
        }
    }

    /// Forget all hypotheses and observations; the next observation seeds again
    pub fn reset(&mut self) {
        self.hypotheses.clear();
        self.previous_observation = None;
        self.current_observation = None;
        self.cycles = 0;
    }

    fn empty_set(&self) -> HypothesisSet {
        HypothesisSet::with_limit(self.config.max_hypotheses)
    }

    /// Every open cell whose neighborhood matches the window as seen
    fn seed_known_heading(
        &self,
        observation: &Observation,
        heading: Orientation,
    ) -> Result<HypothesisSet> {
        let matcher = NeighborhoodMatcher::new(&self.maze, observation);
        let mut next = self.empty_set();
        for (x, y) in self.maze.open_cells() {
            if matcher.matches_unrotated(x, y) {
                next.append(Hypothesis::new(x, y, heading))?;
            }
        }
        Ok(next)
    }

    /// Only the centre glyph changed: the robot turned without moving
    fn rotate_in_place(&self, heading: Orientation) -> Result<HypothesisSet> {
        let mut next = self.empty_set();
        for hypothesis in &self.hypotheses {
            next.append(hypothesis.with_heading(heading))?;
        }
        Ok(next)
    }

    /// Heading unchanged: the robot stepped forward one cell
    fn advance_known_heading(&self, observation: &Observation) -> Result<HypothesisSet> {
        let matcher = NeighborhoodMatcher::new(&self.maze, observation);
        let mut next = self.empty_set();
        for hypothesis in &self.hypotheses {
            let moved = hypothesis.advanced();
            if self.maze.is_open(moved.x(), moved.y())
                && matcher.matches_unrotated(moved.x(), moved.y())
            {
                next.append(moved)?;
            }
        }
        Ok(next)
    }

    /// Every open cell under each alignment it matches, up to four per cell.
    ///
    /// Candidates start facing `Up`, the heading whose window needs no
    /// rotation, so each match yields the absolute heading of its alignment.
    fn seed_unknown_heading(&self, observation: &Observation) -> Result<HypothesisSet> {
        let matcher = NeighborhoodMatcher::new(&self.maze, observation);
        let mut next = self.empty_set();
        for (x, y) in self.maze.open_cells() {
            let base = Hypothesis::new(x, y, Orientation::Up);
            for &alignment in &SEED_ALIGNMENTS {
                if let Some(hypothesis) = matcher.reorient(&base, alignment) {
                    next.append(hypothesis)?;
                }
            }
        }
        Ok(next)
    }

    /// Each hypothesis may survive turned in place, moved one step, or both
    fn filter_unknown_heading(&self, observation: &Observation) -> Result<HypothesisSet> {
        let matcher = NeighborhoodMatcher::new(&self.maze, observation);
        let mut next = self.empty_set();
        for hypothesis in &self.hypotheses {
            let in_place: &[Orientation] = match hypothesis.heading() {
                Orientation::Up | Orientation::Down => &[Orientation::Up, Orientation::Down],
                Orientation::Left | Orientation::Right => &[Orientation::Left, Orientation::Right],
            };
            if let Some(turned) = matcher.first_match(hypothesis, in_place) {
                next.append(turned)?;
            }

            let moved = hypothesis.advanced();
            if !self.maze.is_open(moved.x(), moved.y()) {
                continue;
            }
            if let Some(shifted) = matcher.first_match(&moved, &SHIFT_ALIGNMENTS) {
                next.append(shifted)?;
            }
        }
        Ok(next)
    }
}
