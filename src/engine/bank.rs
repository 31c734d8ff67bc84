// src/engine/bank.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{archetype::Archetype, error::EngineError};

/// Nominal points awarded by every option in the built-in bank.
pub const NOMINAL_POINTS: i64 = 3;

/// Highest points a bank option may award.
pub const MAX_POINTS: i64 = 100;

/// One selectable answer. Each option credits exactly one archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: i64,
    pub text: String,
    pub archetype: Archetype,
    pub points: i64,
}

/// A question with one option per archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn option(&self, option_id: i64) -> Option<(usize, &QuizOption)> {
        self.options
            .iter()
            .enumerate()
            .find(|(_, opt)| opt.id == option_id)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.options.len() != Archetype::ALL.len() {
            return Err(EngineError::WrongOptionCount {
                question_id: self.id,
                count: self.options.len(),
                expected: Archetype::ALL.len(),
            });
        }
        // With exactly four options, covering all four archetypes also rules out duplicates.
        for archetype in Archetype::ALL {
            if !self.options.iter().any(|o| o.archetype == archetype) {
                return Err(EngineError::MissingArchetype {
                    question_id: self.id,
                    archetype,
                });
            }
        }
        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].iter().any(|o| o.id == option.id) {
                return Err(EngineError::DuplicateOptionId {
                    question_id: self.id,
                    option_id: option.id,
                });
            }
        }
        if let Some(bad) = self
            .options
            .iter()
            .find(|o| !(1..=MAX_POINTS).contains(&o.points))
        {
            return Err(EngineError::InvalidPoints {
                question_id: self.id,
                option_id: bad.id,
                points: bad.points,
            });
        }
        Ok(())
    }
}

/// The canonical, validated, read-only list of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validates and wraps a list of questions.
    pub fn new(questions: Vec<Question>) -> Result<Self, EngineError> {
        if questions.is_empty() {
            return Err(EngineError::EmptyQuestionBank);
        }
        for question in &questions {
            question.validate()?;
        }
        Ok(Self { questions })
    }

    /// Loads a bank from a JSON array of questions.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let questions: Vec<Question> =
            serde_json::from_str(json).map_err(|e| EngineError::BankSource(e.to_string()))?;
        Self::new(questions)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| EngineError::BankSource(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// The fifteen-question bank shipped with the site.
    pub fn standard() -> Self {
        let questions = STANDARD_QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, (prompt, texts))| Question {
                id: i as i64 + 1,
                prompt: prompt.to_string(),
                options: Archetype::ALL
                    .into_iter()
                    .zip(texts.iter())
                    .enumerate()
                    .map(|(j, (archetype, text))| QuizOption {
                        id: j as i64 + 1,
                        text: text.to_string(),
                        archetype,
                        points: NOMINAL_POINTS,
                    })
                    .collect(),
            })
            .collect();

        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Prompt plus option texts in canonical archetype order.
const STANDARD_QUESTIONS: [(&str, [&str; 4]); 15] = [
    (
        "When you receive unexpected money, what's your first instinct?",
        [
            "Save it immediately for emergencies",
            "Invest it in something with high potential returns",
            "Research the best balanced investment options",
            "Create a detailed plan for how to allocate it",
        ],
    ),
    (
        "How do you feel about taking financial risks?",
        [
            "I prefer to avoid them entirely",
            "The bigger the risk, the bigger the reward",
            "Calculated risks are necessary for growth",
            "I analyze every risk thoroughly before deciding",
        ],
    ),
    (
        "What's your approach to budgeting?",
        [
            "I keep things simple and spend conservatively",
            "Budgets are too restrictive for my lifestyle",
            "I track expenses but allow for flexibility",
            "I have detailed spreadsheets for everything",
        ],
    ),
    (
        "When making a major purchase, you:",
        [
            "Research extensively and often decide not to buy",
            "Go with your gut feeling in the moment",
            "Compare options and make a practical choice",
            "Create a detailed cost-benefit analysis",
        ],
    ),
    (
        "Your ideal investment portfolio would be:",
        [
            "Mostly savings accounts and bonds",
            "High-growth stocks and cryptocurrency",
            "A balanced mix of stocks and bonds",
            "Carefully diversified across multiple asset classes",
        ],
    ),
    (
        "How do you handle financial setbacks?",
        [
            "I become more cautious and conservative",
            "I look for the next big opportunity to recover",
            "I adjust my strategy based on what I learned",
            "I analyze what went wrong and create a recovery plan",
        ],
    ),
    (
        "Your relationship with money is best described as:",
        [
            "A source of security and stability",
            "A tool for exciting opportunities",
            "A means to achieve life goals",
            "A system that requires careful management",
        ],
    ),
    (
        "When friends ask for financial advice, you:",
        [
            "Suggest they be very careful and conservative",
            "Share exciting investment opportunities you've heard about",
            "Give practical, balanced suggestions",
            "Recommend they create a comprehensive financial plan",
        ],
    ),
    (
        "Your emergency fund should be:",
        [
            "As large as possible for maximum security",
            "Minimal - money should be working for you",
            "3-6 months of expenses",
            "Precisely calculated based on your risk profile",
        ],
    ),
    (
        "How do you research investments?",
        [
            "I stick to what I know is safe",
            "I follow trends and hot tips",
            "I read reputable financial sources",
            "I conduct thorough fundamental analysis",
        ],
    ),
    (
        "Your biggest financial fear is:",
        [
            "Losing what I've already saved",
            "Missing out on the next big opportunity",
            "Not having enough for retirement",
            "Making a poorly calculated decision",
        ],
    ),
    (
        "When markets are volatile, you:",
        [
            "Move everything to safer investments",
            "See it as a chance to make big gains",
            "Stay the course with your long-term plan",
            "Rebalance based on your predetermined strategy",
        ],
    ),
    (
        "Your approach to retirement planning is:",
        [
            "Save as much as possible in safe accounts",
            "I'll figure it out when I get closer",
            "Consistent contributions to a 401k and IRA",
            "A detailed plan with multiple scenarios",
        ],
    ),
    (
        "How do you feel about debt?",
        [
            "I avoid it at all costs",
            "Good debt can accelerate wealth building",
            "Some debt is necessary, but should be managed",
            "I optimize debt as part of my overall strategy",
        ],
    ),
    (
        "Your financial role model would be someone who:",
        [
            "Built wealth slowly and safely over time",
            "Made bold moves and struck it rich",
            "Achieved financial independence through discipline",
            "Mastered complex financial strategies",
        ],
    ),
];
