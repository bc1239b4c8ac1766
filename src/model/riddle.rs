/// A multiple-choice question guarding a riddle room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Riddle {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_index: usize,
}

impl Riddle {
    pub fn new(question: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            question: question.into(),
            options,
            correct_index,
        }
    }

    pub fn check_answer(&self, index: usize) -> bool {
        index == self.correct_index
    }

    /// Check a 1-based answer as typed by a player.
    pub fn check_choice(&self, choice: i64) -> bool {
        choice >= 1 && self.check_answer((choice - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn riddle() -> Riddle {
        Riddle::new(
            "Question?",
            vec!["Option A".to_string(), "Option B".to_string()],
            1,
        )
    }

    #[test]
    fn test_check_answer() {
        let r = riddle();
        assert!(r.check_answer(1));
        assert!(!r.check_answer(0));
    }

    #[test]
    fn test_check_choice_is_one_based() {
        let r = riddle();
        assert!(r.check_choice(2));
        assert!(!r.check_choice(1));
        assert!(!r.check_choice(0));
        assert!(!r.check_choice(-1));
    }
}
