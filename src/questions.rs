//! Trivia question bank
//!
//! The bank is a fixed ordered list of questions, cycled modulo its length
//! when the track asks for more levels than the bank holds. Option order is
//! reshuffled independently every time a level is generated.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer tiles per level
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One trivia question with its four answer options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizItem {
    pub prompt: String,
    pub correct: String,
    /// Authored option order; exactly one entry equals `correct`
    pub options: [String; OPTIONS_PER_QUESTION],
}

impl QuizItem {
    pub fn new(prompt: &str, correct: &str, options: [&str; OPTIONS_PER_QUESTION]) -> Self {
        Self {
            prompt: prompt.to_string(),
            correct: correct.to_string(),
            options: options.map(str::to_string),
        }
    }
}

/// Configuration errors caught once at bank construction
#[derive(Debug, Error)]
pub enum QuestionBankError {
    #[error("question bank is empty")]
    Empty,
    #[error("question {index} ({prompt:?}) does not list its correct answer exactly once")]
    BadOptions { index: usize, prompt: String },
}

/// Fixed ordered question list, validated at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    items: Vec<QuizItem>,
}

impl QuestionBank {
    /// Validate and wrap an authored question list.
    ///
    /// A zero-length bank or an item whose options do not contain the correct
    /// answer exactly once is a fatal configuration error, not a runtime one.
    pub fn new(items: Vec<QuizItem>) -> Result<Self, QuestionBankError> {
        if items.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        for (index, item) in items.iter().enumerate() {
            let matches = item.options.iter().filter(|o| **o == item.correct).count();
            if matches != 1 {
                return Err(QuestionBankError::BadOptions {
                    index,
                    prompt: item.prompt.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Question for a level, cycling with wraparound past the end of the bank
    pub fn question(&self, level_index: usize) -> &QuizItem {
        &self.items[level_index % self.items.len()]
    }

    /// Uniformly shuffled copy of a level's options (Fisher-Yates).
    ///
    /// The RNG stream is derived from the run seed and the level index, so
    /// repeated generations of the same level within one run are stable while
    /// different levels sharing a bank item still get independent orders.
    pub fn shuffled_options(
        &self,
        level_index: usize,
        run_seed: u64,
    ) -> [String; OPTIONS_PER_QUESTION] {
        let stream = run_seed ^ (level_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = Pcg32::seed_from_u64(stream);
        let mut options = self.question(level_index).options.clone();
        options.shuffle(&mut rng);
        options
    }
}

impl Default for QuestionBank {
    /// The built-in 15-question bank
    fn default() -> Self {
        Self {
            items: vec![
                QuizItem::new(
                    "What is the capital of France?",
                    "Paris",
                    ["Paris", "London", "Berlin", "Rome"],
                ),
                QuizItem::new(
                    "Which planet is closest to the Sun?",
                    "Mercury",
                    ["Mercury", "Venus", "Earth", "Mars"],
                ),
                QuizItem::new("What is 2 + 2?", "4", ["3", "4", "5", "6"]),
                QuizItem::new(
                    "Who painted the Mona Lisa?",
                    "Leonardo da Vinci",
                    [
                        "Leonardo da Vinci",
                        "Pablo Picasso",
                        "Vincent van Gogh",
                        "Michelangelo",
                    ],
                ),
                QuizItem::new(
                    "What is the largest ocean on Earth?",
                    "Pacific Ocean",
                    [
                        "Atlantic Ocean",
                        "Pacific Ocean",
                        "Indian Ocean",
                        "Arctic Ocean",
                    ],
                ),
                QuizItem::new(
                    "Which gas do plants absorb from the atmosphere?",
                    "Carbon Dioxide",
                    ["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"],
                ),
                QuizItem::new("What is the smallest prime number?", "2", ["1", "2", "3", "5"]),
                QuizItem::new(
                    "Which continent is Egypt located in?",
                    "Africa",
                    ["Asia", "Africa", "Europe", "South America"],
                ),
                QuizItem::new(
                    "What is H2O commonly known as?",
                    "Water",
                    ["Water", "Hydrogen", "Oxygen", "Salt"],
                ),
                QuizItem::new(
                    "How many sides does a triangle have?",
                    "3",
                    ["2", "3", "4", "5"],
                ),
                QuizItem::new(
                    "What year did World War II end?",
                    "1945",
                    ["1943", "1944", "1945", "1946"],
                ),
                QuizItem::new(
                    "Which element has the chemical symbol 'O'?",
                    "Oxygen",
                    ["Gold", "Silver", "Oxygen", "Iron"],
                ),
                QuizItem::new(
                    "What is the fastest land animal?",
                    "Cheetah",
                    ["Lion", "Cheetah", "Horse", "Gazelle"],
                ),
                QuizItem::new("How many continents are there?", "7", ["5", "6", "7", "8"]),
                QuizItem::new(
                    "What is the main ingredient in bread?",
                    "Flour",
                    ["Sugar", "Salt", "Flour", "Water"],
                ),
            ],
        }
    }
}
