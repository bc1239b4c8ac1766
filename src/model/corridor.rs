use std::fmt;

use super::effect::RandomEvent;

/// Edge of the maze graph. Traversable in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    pub from: String,
    pub to: String,
    pub cost: f64,
    pub event: Option<RandomEvent>,
    /// Opened by a lever during play; never written to map files.
    pub secret: bool,
}

impl Corridor {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        cost: f64,
        event: Option<RandomEvent>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cost,
            event,
            secret: false,
        }
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint.
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --({})--> {}", self.from, self.cost, self.to)?;
        if self.event.is_some() {
            write!(f, " [EVENT]")?;
        }
        if self.secret {
            write!(f, " [SECRET]")?;
        }
        Ok(())
    }
}
