//! Built-in quizzes available before any user-authored data exists.

use std::sync::LazyLock;

use crate::models::{
    question::Question,
    quiz::{Difficulty, QuizRecord, QuizSummary},
};

static BUILTIN_QUIZZES: LazyLock<Vec<QuizRecord>> = LazyLock::new(|| {
    vec![
        quiz(
            1,
            "JavaScript Fundamentals",
            "Test your knowledge of JavaScript basics",
            "Programming",
            10,
            Difficulty::Easy,
            &[
                (
                    "What is the correct way to declare a variable in JavaScript?",
                    ["var x = 5;", "variable x = 5;", "v x = 5;", "declare x = 5;"],
                    "var x = 5;",
                ),
                (
                    "Which method is used to add an element to the end of an array?",
                    ["push()", "pop()", "shift()", "unshift()"],
                    "push()",
                ),
                (
                    "What does === mean in JavaScript?",
                    ["Assignment", "Equality with type coercion", "Strict equality", "Inequality"],
                    "Strict equality",
                ),
                (
                    "Which keyword is used to declare a constant in JavaScript?",
                    ["const", "constant", "let", "var"],
                    "const",
                ),
                (
                    "What is the result of typeof null?",
                    ["\"null\"", "\"object\"", "\"undefined\"", "null"],
                    "\"object\"",
                ),
            ],
        ),
        quiz(
            2,
            "React Concepts",
            "Master React components, hooks, and state management",
            "Programming",
            15,
            Difficulty::Medium,
            &[
                (
                    "What is React?",
                    [
                        "A database",
                        "A JavaScript library for building UIs",
                        "A CSS framework",
                        "A backend framework",
                    ],
                    "A JavaScript library for building UIs",
                ),
                (
                    "Which hook is used to manage state in functional components?",
                    ["useState", "useEffect", "useContext", "useReducer"],
                    "useState",
                ),
                (
                    "What does JSX stand for?",
                    ["JavaScript XML", "Java Syntax Extension", "JavaScript Extension", "JSON XML"],
                    "JavaScript XML",
                ),
                (
                    "How do you pass data from parent to child component?",
                    ["Using state", "Using props", "Using context", "Using refs"],
                    "Using props",
                ),
                (
                    "What is the purpose of useEffect hook?",
                    [
                        "To manage state",
                        "To handle side effects",
                        "To create components",
                        "To handle events",
                    ],
                    "To handle side effects",
                ),
                (
                    "Which method is called after a component is rendered?",
                    ["componentDidMount", "componentWillMount", "componentDidUpdate", "render"],
                    "componentDidMount",
                ),
                (
                    "What is a key prop used for in React?",
                    [
                        "To identify elements uniquely",
                        "To style components",
                        "To pass data",
                        "To handle events",
                    ],
                    "To identify elements uniquely",
                ),
                (
                    "What is Virtual DOM?",
                    [
                        "A real DOM",
                        "A JavaScript representation of DOM",
                        "A CSS concept",
                        "A database",
                    ],
                    "A JavaScript representation of DOM",
                ),
            ],
        ),
        quiz(
            3,
            "General Knowledge",
            "Test your general knowledge across various topics",
            "General",
            20,
            Difficulty::Medium,
            &[
                ("What is the capital of France?", ["London", "Berlin", "Paris", "Madrid"], "Paris"),
                (
                    "Which planet is known as the Red Planet?",
                    ["Venus", "Mars", "Jupiter", "Saturn"],
                    "Mars",
                ),
                (
                    "What is the largest ocean on Earth?",
                    ["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
                    "Pacific Ocean",
                ),
                (
                    "Who painted the Mona Lisa?",
                    ["Vincent van Gogh", "Leonardo da Vinci", "Pablo Picasso", "Michelangelo"],
                    "Leonardo da Vinci",
                ),
                ("What is the smallest prime number?", ["0", "1", "2", "3"], "2"),
                (
                    "Which gas do plants absorb from the atmosphere?",
                    ["Oxygen", "Nitrogen", "Carbon Dioxide", "Hydrogen"],
                    "Carbon Dioxide",
                ),
                ("What is the chemical symbol for gold?", ["Go", "Gd", "Au", "Ag"], "Au"),
                ("How many continents are there?", ["5", "6", "7", "8"], "7"),
                (
                    "What is the longest river in the world?",
                    ["Amazon", "Nile", "Yangtze", "Mississippi"],
                    "Nile",
                ),
                ("Which year did World War II end?", ["1943", "1944", "1945", "1946"], "1945"),
            ],
        ),
        quiz(
            4,
            "Science & Nature",
            "Explore questions about science and nature",
            "Science",
            12,
            Difficulty::Hard,
            &[
                (
                    "What is the speed of light in vacuum?",
                    ["300,000 km/s", "150,000 km/s", "450,000 km/s", "600,000 km/s"],
                    "300,000 km/s",
                ),
                (
                    "What is the hardest natural substance on Earth?",
                    ["Gold", "Diamond", "Platinum", "Iron"],
                    "Diamond",
                ),
                ("How many bones are in the human body?", ["196", "206", "216", "226"], "206"),
                (
                    "What is the most abundant gas in Earth's atmosphere?",
                    ["Oxygen", "Carbon Dioxide", "Nitrogen", "Argon"],
                    "Nitrogen",
                ),
                (
                    "What is the process by which plants make food?",
                    ["Respiration", "Photosynthesis", "Digestion", "Fermentation"],
                    "Photosynthesis",
                ),
                (
                    "What is the smallest unit of matter?",
                    ["Molecule", "Atom", "Electron", "Proton"],
                    "Atom",
                ),
                ("What is the pH of pure water?", ["5", "6", "7", "8"], "7"),
            ],
        ),
        quiz(
            5,
            "History Quiz",
            "Test your historical knowledge",
            "History",
            10,
            Difficulty::Medium,
            &[
                (
                    "In which year did the American Civil War begin?",
                    ["1860", "1861", "1862", "1863"],
                    "1861",
                ),
                (
                    "Who was the first President of the United States?",
                    ["Thomas Jefferson", "George Washington", "John Adams", "Benjamin Franklin"],
                    "George Washington",
                ),
                (
                    "Which empire was ruled by Julius Caesar?",
                    ["Greek Empire", "Roman Empire", "Byzantine Empire", "Ottoman Empire"],
                    "Roman Empire",
                ),
                ("When did World War I begin?", ["1912", "1914", "1916", "1918"], "1914"),
                (
                    "Who wrote \"The Communist Manifesto\"?",
                    ["Vladimir Lenin", "Karl Marx", "Friedrich Engels", "Joseph Stalin"],
                    "Karl Marx",
                ),
                ("In which year did the Berlin Wall fall?", ["1987", "1989", "1991", "1993"], "1989"),
            ],
        ),
        quiz(
            6,
            "Mathematics Basics",
            "Basic math questions for everyone",
            "Mathematics",
            8,
            Difficulty::Easy,
            &[
                ("What is 15 + 27?", ["40", "42", "44", "46"], "42"),
                ("What is 8 × 7?", ["54", "56", "58", "60"], "56"),
                ("What is the square root of 64?", ["6", "7", "8", "9"], "8"),
                ("What is 100 ÷ 4?", ["20", "25", "30", "35"], "25"),
                ("What is 3²?", ["6", "9", "12", "15"], "9"),
            ],
        ),
    ]
});

type SeedQuestion = (&'static str, [&'static str; 4], &'static str);

fn quiz(
    id: i64,
    title: &str,
    description: &str,
    category: &str,
    duration: u32,
    difficulty: Difficulty,
    questions: &[SeedQuestion],
) -> QuizRecord {
    let questions: Vec<Question> = questions
        .iter()
        .zip(1..)
        .map(|(&(text, options, correct), qid)| Question {
            id: qid,
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
        })
        .collect();

    QuizRecord {
        summary: QuizSummary {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            question_count: questions.len(),
            duration,
            difficulty,
        },
        questions,
    }
}

/// The six summaries written to an empty catalog.
pub fn default_catalog() -> Vec<QuizSummary> {
    BUILTIN_QUIZZES.iter().map(|q| q.summary.clone()).collect()
}

pub fn builtin_summary(id: i64) -> Option<QuizSummary> {
    BUILTIN_QUIZZES
        .iter()
        .find(|q| q.id() == id)
        .map(|q| q.summary.clone())
}

pub fn builtin_record(id: i64) -> Option<QuizRecord> {
    BUILTIN_QUIZZES.iter().find(|q| q.id() == id).cloned()
}
