use glory_maze::model::{Effect, Maze, RandomEvent, Riddle, Room};

/// Builds small mazes for tests, one corridor at a time.
pub struct MazeBuilder {
    maze: Maze,
}

impl MazeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            maze: Maze::named(name),
        }
    }

    pub fn entrance(mut self, id: &str) -> Self {
        self.maze.add_room(Room::entrance(id, format!("Entrance {}", id))).unwrap();
        self
    }

    pub fn treasure(mut self, id: &str) -> Self {
        self.maze.add_room(Room::treasure(id, "Treasure")).unwrap();
        self
    }

    pub fn room(mut self, id: &str) -> Self {
        self.maze.add_room(Room::standard(id, format!("Room {}", id))).unwrap();
        self
    }

    pub fn riddle(mut self, id: &str, correct: usize) -> Self {
        let riddle = Riddle::new(
            format!("Riddle of {}", id),
            vec!["First".to_string(), "Second".to_string(), "Third".to_string()],
            correct,
        );
        self.maze.add_room(Room::riddle(id, "Riddle room", Some(riddle))).unwrap();
        self
    }

    pub fn lever(mut self, id: &str) -> Self {
        self.maze.add_room(Room::lever(id, "Lever room")).unwrap();
        self
    }

    pub fn corridor(mut self, from: &str, to: &str, cost: f64) -> Self {
        self.maze.add_corridor(from, to, cost, None).unwrap();
        self
    }

    pub fn event(mut self, from: &str, to: &str, effect: Effect) -> Self {
        let event = RandomEvent::new(format!("{} event", effect), Some(effect));
        self.maze.add_corridor(from, to, 1.0, Some(event)).unwrap();
        self
    }

    pub fn build(self) -> Maze {
        self.maze
    }
}
