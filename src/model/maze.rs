//! The maze: a weighted, undirected graph of rooms joined by corridors.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use super::corridor::Corridor;
use super::effect::RandomEvent;
use super::room::Room;
use crate::dice::Dice;
use crate::error::{GameError, Result};

/// Cost of a corridor opened by a lever.
const SECRET_PASSAGE_COST: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct Maze {
    name: String,
    rooms: Vec<Room>,
    index: HashMap<String, usize>,
    corridors: Vec<Corridor>,
    /// Corridor indices touching each room, in insertion order.
    adjacency: Vec<Vec<usize>>,
    activated_levers: HashSet<String>,
}

impl Maze {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn add_room(&mut self, room: Room) -> Result<()> {
        if self.index.contains_key(&room.id) {
            return Err(GameError::DuplicateRoom(room.id));
        }
        self.index.insert(room.id.clone(), self.rooms.len());
        self.rooms.push(room);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Join two existing rooms. The corridor works in both directions.
    pub fn add_corridor(
        &mut self,
        from: &str,
        to: &str,
        cost: f64,
        event: Option<RandomEvent>,
    ) -> Result<()> {
        self.push_corridor(Corridor::new(from, to, cost, event))
    }

    fn push_corridor(&mut self, corridor: Corridor) -> Result<()> {
        let a = self.position(&corridor.from)?;
        let b = self.position(&corridor.to)?;
        let idx = self.corridors.len();
        self.corridors.push(corridor);
        self.adjacency[a].push(idx);
        if a != b {
            self.adjacency[b].push(idx);
        }
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GameError::NoSuchRoom(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.index.get(id).map(|&i| &self.rooms[i])
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.rooms[i]),
            None => None,
        }
    }

    /// Rooms in insertion order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Adjacent rooms in corridor insertion order. A room appears once per
    /// corridor joining it to `id`.
    pub fn neighbors(&self, id: &str) -> Vec<&Room> {
        let Some(&i) = self.index.get(id) else {
            return Vec::new();
        };
        self.adjacency[i]
            .iter()
            .filter_map(|&c| self.corridors[c].other_end(id))
            .filter_map(|other| self.room(other))
            .collect()
    }

    /// Adjacent rooms without repeats (ids compared case-insensitively).
    pub fn exits(&self, id: &str) -> Vec<&Room> {
        let mut seen = HashSet::new();
        self.neighbors(id)
            .into_iter()
            .filter(|room| seen.insert(room.id.to_lowercase()))
            .collect()
    }

    /// Find an exit of `current` by id, ignoring case.
    pub fn find_exit(&self, current: &str, target: &str) -> Option<&Room> {
        self.neighbors(current)
            .into_iter()
            .find(|room| room.id.eq_ignore_ascii_case(target.trim()))
    }

    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        self.corridor_between(a, b).is_some()
    }

    /// First corridor joining the two rooms, in either direction.
    pub fn corridor_between(&self, a: &str, b: &str) -> Option<&Corridor> {
        let &i = self.index.get(a)?;
        self.adjacency[i]
            .iter()
            .map(|&c| &self.corridors[c])
            .find(|corridor| corridor.connects(a, b))
    }

    /// First entrance in insertion order.
    pub fn entrance(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.is_entrance())
    }

    pub fn entrances(&self) -> Vec<&Room> {
        self.rooms.iter().filter(|room| room.is_entrance()).collect()
    }

    pub fn treasure_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.is_treasure())
    }

    /// Cheapest route from `start` to `end`, both included.
    ///
    /// Empty when either room is unknown or `end` is unreachable.
    pub fn shortest_path(&self, start: &str, end: &str) -> Vec<&Room> {
        match self.dijkstra(start, end) {
            Some((path, _)) => path.into_iter().map(|i| &self.rooms[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Total cost of the cheapest route, if any.
    pub fn path_cost(&self, start: &str, end: &str) -> Option<f64> {
        self.dijkstra(start, end).map(|(_, cost)| cost)
    }

    fn dijkstra(&self, start: &str, end: &str) -> Option<(Vec<usize>, f64)> {
        let &source = self.index.get(start)?;
        let &target = self.index.get(end)?;

        let mut dist = vec![f64::INFINITY; self.rooms.len()];
        let mut prev: Vec<Option<usize>> = vec![None; self.rooms.len()];
        let mut heap = BinaryHeap::new();

        dist[source] = 0.0;
        heap.push(Frontier {
            cost: 0.0,
            node: source,
        });

        while let Some(Frontier { cost, node }) = heap.pop() {
            if node == target {
                break;
            }
            if cost > dist[node] {
                continue;
            }
            for &c in &self.adjacency[node] {
                let corridor = &self.corridors[c];
                let Some(other) = corridor.other_end(&self.rooms[node].id) else {
                    continue;
                };
                let next = self.index[other];
                let candidate = cost + corridor.cost;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    prev[next] = Some(node);
                    heap.push(Frontier {
                        cost: candidate,
                        node: next,
                    });
                }
            }
        }

        if dist[target].is_infinite() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(p) = prev[current] {
            path.push(p);
            current = p;
        }
        path.reverse();
        Some((path, dist[target]))
    }

    /// Open a corridor from `from` to a random room that is neither `from`
    /// nor already adjacent to it. Returns the id of the room reached.
    pub fn create_secret_passage(&mut self, from: &str, dice: &mut dyn Dice) -> Option<String> {
        if !self.contains(from) {
            return None;
        }
        let candidates: Vec<String> = self
            .rooms
            .iter()
            .filter(|room| room.id != from && !self.is_adjacent(from, &room.id))
            .map(|room| room.id.clone())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let target = candidates[dice.pick(candidates.len())].clone();
        let mut corridor = Corridor::new(from, target.clone(), SECRET_PASSAGE_COST, None);
        corridor.secret = true;
        self.push_corridor(corridor).ok()?;
        Some(target)
    }

    pub fn activate_lever(&mut self, id: &str) {
        self.activated_levers.insert(id.to_string());
    }

    pub fn is_lever_activated(&self, id: &str) -> bool {
        self.activated_levers.contains(id)
    }

    /// Exits formatted for the status line.
    pub fn available_exits_label(&self, room: Option<&str>) -> String {
        let Some(id) = room else {
            return "None".to_string();
        };
        let exits = self.exits(id);
        if exits.is_empty() {
            return "No exits (dead end)".to_string();
        }
        exits.iter().map(|room| format!("{} | ", room.id)).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed so BinaryHeap pops the cheapest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Maze Structure:")?;
        if self.rooms.is_empty() {
            return writeln!(f, "  (empty)");
        }
        for (i, room) in self.rooms.iter().enumerate() {
            write!(f, "  {} <{}>", room, room.tag())?;
            let links: Vec<String> = self.adjacency[i]
                .iter()
                .map(|&c| &self.corridors[c])
                .filter_map(|corridor| {
                    corridor
                        .other_end(&room.id)
                        .map(|other| format!("{}({})", other, corridor.cost))
                })
                .collect();
            if links.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, " -> {}", links.join(", "))?;
            }
        }
        Ok(())
    }
}
