//! Configuration wizard functionality
//!
//! The wizard is split in two. [`build_config`] is a pure function from an
//! ordered list of answers to a [`BundleConfig`]; [`run_wizard`] asks the
//! questions over any reader/writer pair and feeds the answers to it.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Result, anyhow};
use log::debug;

use crate::config::model::{
    BundleConfig, BundleOptions, LanguageSelection, SortMode, parse_author, parse_output_path,
};
use crate::config::serializer::save_response_file;
use crate::errors::{self, generic_error};

/// One question of the wizard, in the order they are asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Output,
    Languages,
    Note,
    Sort,
    RemoveEmptyLines,
    Author,
}

/// Every question, in asking order
pub const QUESTIONS: [Question; 6] = [
    Question::Output,
    Question::Languages,
    Question::Note,
    Question::Sort,
    Question::RemoveEmptyLines,
    Question::Author,
];

impl Question {
    /// Text shown to the user
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::Output => "Where should the bundle be written? (path ending with .txt)",
            Question::Languages => {
                "Which file extensions should be bundled? (e.g. 'py rs', or 'all')"
            }
            Question::Note => "Write the source path above each file? (y/n)",
            Question::Sort => "How should files be ordered? ('abc', 'type', or empty for none)",
            Question::RemoveEmptyLines => "Remove empty lines? (y/n)",
            Question::Author => "Author name for the header (leave empty to skip):",
        }
    }

    /// Records an answer in `options`, rejecting it if it is not valid on its own
    ///
    /// # Errors
    /// Returns the same error the flag path would report for this value
    pub fn apply(&self, answer: &str, options: &mut BundleOptions) -> errors::Result<()> {
        match self {
            Question::Output => {
                parse_output_path(answer)?;
                options.output = Some(answer.trim().to_string());
            }
            Question::Languages => {
                let tokens: Vec<String> = answer
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect();
                LanguageSelection::from_tokens(&tokens)?;
                options.languages = tokens;
            }
            Question::Note => options.note = parse_yes_no(answer)?,
            Question::Sort => {
                answer.parse::<SortMode>()?;
                let sort = answer.trim();
                options.sort = (!sort.is_empty()).then(|| sort.to_string());
            }
            Question::RemoveEmptyLines => options.remove_empty_lines = parse_yes_no(answer)?,
            Question::Author => options.author = parse_author(Some(answer))?,
        }
        Ok(())
    }
}

/// A question together with the user's raw answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question: Question,
    pub value: String,
}

impl Answer {
    pub fn new(question: Question, value: &str) -> Self {
        Answer {
            question,
            value: value.to_string(),
        }
    }
}

/// Builds a configuration from answered questions
///
/// Later answers to the same question replace earlier ones. Questions that
/// were never answered keep their defaults, which makes the result invalid if
/// the output or languages question is missing.
///
/// # Errors
/// Returns the first validation error found
pub fn build_config(answers: &[Answer]) -> errors::Result<BundleConfig> {
    let mut options = BundleOptions::default();
    for answer in answers {
        answer.question.apply(&answer.value, &mut options)?;
    }
    options.validate()
}

/// Parses a yes/no answer; an empty answer means no
pub fn parse_yes_no(answer: &str) -> errors::Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "" | "n" | "no" => Ok(false),
        other => Err(generic_error(&format!("Please answer 'y' or 'n', not '{other}'"))),
    }
}

/// Asks every question over `input`/`output` and builds the configuration
///
/// Invalid answers are reported and the question is asked again.
///
/// # Errors
/// Returns an error if input ends before all questions are answered, or on
/// an I/O failure
pub fn run_wizard<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<BundleConfig> {
    let mut answers = Vec::with_capacity(QUESTIONS.len());

    for question in QUESTIONS {
        loop {
            writeln!(output, "{}", question.prompt())?;
            output.flush()?;

            let answer = read_line(input)?
                .ok_or_else(|| anyhow!("Wizard cancelled: input ended before all questions were answered"))?;

            let mut scratch = BundleOptions::default();
            match question.apply(&answer, &mut scratch) {
                Ok(()) => {
                    debug!("Wizard answer for {question:?}: {answer}");
                    answers.push(Answer::new(question, &answer));
                    break;
                }
                Err(e) => writeln!(output, "{e}")?,
            }
        }
    }

    Ok(build_config(&answers)?)
}

/// Runs the wizard on the console and saves the result as a response file
///
/// # Errors
/// Returns an error if the wizard is cancelled or the response file cannot be written
pub fn create_response_file_with_wizard(response_file: &Path) -> Result<BundleConfig> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    writeln!(output, "Welcome to the File Bundle wizard!")?;
    writeln!(output, "Your answers will be saved to {}.", response_file.display())?;
    writeln!(output, "Press Ctrl+C at any time to cancel.")?;
    writeln!(output)?;

    let config = run_wizard(&mut input, &mut output)?;
    save_response_file(&config, response_file)?;

    writeln!(output)?;
    writeln!(
        output,
        "Saved. Run it again any time with: fbundle @{}",
        response_file.display()
    )?;

    Ok(config)
}

/// Reads one line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
