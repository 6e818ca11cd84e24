// src/env/grid.rs

//! A deterministic frozen-lake style grid environment.
//!
//! States are cells numbered row-major from the top-left start cell; the goal
//! is the bottom-right (highest-indexed) cell, matching the learner's goal
//! convention. Actions follow the gymnasium ordering: 0 = left, 1 = down,
//! 2 = right, 3 = up. Moves off the edge leave the agent in place. Stepping
//! onto a hole or the goal terminates the episode; only the goal pays reward.

use super::{Environment, Transition};

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Start,
    Frozen,
    Hole,
    Goal,
}

/// Deterministic grid maze (a non-slippery frozen lake).
#[derive(Debug, Clone)]
pub struct GridMaze {
    tiles: Vec<Tile>,
    columns: usize,
    position: usize,
}

impl GridMaze {
    /// Builds a maze from a layout string: one character per cell, rows
    /// separated by whitespace. `S` start, `F` frozen, `H` hole, `G` goal.
    ///
    /// # Panics
    /// Panics if the layout is empty, ragged, contains an unknown character,
    /// or does not end with the goal in the last cell. Layouts are
    /// compile-time fixtures, so malformed input is a programming error.
    pub fn from_layout(layout: &str) -> Self {
        let rows: Vec<&str> = layout.split_whitespace().collect();
        assert!(!rows.is_empty(), "layout must contain at least one row");
        let columns = rows[0].len();
        let mut tiles = Vec::with_capacity(rows.len() * columns);
        for row in &rows {
            assert_eq!(row.len(), columns, "layout rows must have equal length");
            for c in row.chars() {
                tiles.push(match c {
                    'S' => Tile::Start,
                    'F' => Tile::Frozen,
                    'H' => Tile::Hole,
                    'G' => Tile::Goal,
                    other => panic!("unknown layout tile '{}'", other),
                });
            }
        }
        assert_eq!(
            tiles.last(),
            Some(&Tile::Goal),
            "goal must be the highest-indexed cell"
        );
        Self {
            tiles,
            columns,
            position: 0,
        }
    }

    /// The canonical 4x4 frozen-lake layout.
    pub fn frozen_lake_4x4() -> Self {
        Self::from_layout("SFFF FHFH FFFH HFFG")
    }

    /// Current cell index of the agent.
    pub fn position(&self) -> usize {
        self.position
    }

    fn destination(&self, action: usize) -> usize {
        let row = self.position / self.columns;
        let col = self.position % self.columns;
        let rows = self.tiles.len() / self.columns;
        let (new_row, new_col) = match action {
            0 => (row, col.saturating_sub(1)),                  // left
            1 => ((row + 1).min(rows - 1), col),                // down
            2 => (row, (col + 1).min(self.columns - 1)),        // right
            3 => (row.saturating_sub(1), col),                  // up
            _ => (row, col), // out-of-range actions bump in place
        };
        new_row * self.columns + new_col
    }
}

impl Environment for GridMaze {
    fn reset(&mut self) -> usize {
        self.position = 0;
        self.position
    }

    fn step(&mut self, action: usize) -> Transition {
        self.position = self.destination(action);
        let tile = self.tiles[self.position];
        Transition {
            next_state: self.position,
            reward: if tile == Tile::Goal { 1.0 } else { 0.0 },
            terminated: matches!(tile, Tile::Hole | Tile::Goal),
            truncated: false,
        }
    }

    fn observation_space_size(&self) -> usize {
        self.tiles.len()
    }

    fn action_space_size(&self) -> usize {
        4
    }

    fn render(&self) {
        for (i, tile) in self.tiles.iter().enumerate() {
            let c = if i == self.position {
                '*'
            } else {
                match tile {
                    Tile::Start => 'S',
                    Tile::Frozen => 'F',
                    Tile::Hole => 'H',
                    Tile::Goal => 'G',
                }
            };
            print!("{}", c);
            if (i + 1) % self.columns == 0 {
                println!();
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_layout_has_sixteen_states() {
        let maze = GridMaze::frozen_lake_4x4();
        assert_eq!(maze.observation_space_size(), 16);
        assert_eq!(maze.action_space_size(), 4);
    }

    #[test]
    fn edge_bumps_stay_in_place() {
        let mut maze = GridMaze::frozen_lake_4x4();
        maze.reset();
        let t = maze.step(0); // left from the top-left corner
        assert_eq!(t.next_state, 0);
        assert!(!t.terminated);
        let t = maze.step(3); // up from the top-left corner
        assert_eq!(t.next_state, 0);
    }

    #[test]
    fn holes_terminate_without_reward() {
        let mut maze = GridMaze::frozen_lake_4x4();
        maze.reset();
        maze.step(1); // down to 4
        let t = maze.step(2); // right into the hole at 5
        assert_eq!(t.next_state, 5);
        assert!(t.terminated);
        assert_eq!(t.reward, 0.0);
    }

    #[test]
    fn goal_terminates_with_reward() {
        let mut maze = GridMaze::frozen_lake_4x4();
        maze.reset();
        // Path: down, down, right, down, right, right reaches the goal at 15.
        for action in [1, 1, 2, 1, 2] {
            let t = maze.step(action);
            assert!(!t.terminated, "premature termination at {}", t.next_state);
        }
        let t = maze.step(2);
        assert_eq!(t.next_state, 15);
        assert!(t.terminated);
        assert_eq!(t.reward, 1.0);
    }
}
