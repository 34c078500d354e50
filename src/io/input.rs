//! Interactive line input for `add`.

use rustyline::{
    Context, Editor, Helper,
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::{Hint, Hinter},
    history::DefaultHistory,
    validate::Validator,
};

/// Error type for line input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("interrupted")]
    Interrupted,
    #[error("could not read input: {0}")]
    Readline(#[from] ReadlineError),
}

/// Source of one line of raw task text
pub trait LineInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;
}

/// Input markers offered as completions, with their descriptions
static MARKERS: [(&str, &str); 3] = [
    ("@", "Set a deadline. The format is YYYY/M/D"),
    ("#", "Set a tag."),
    ("!", "Set a priority. From 1 to 5"),
];

/// Line editor prompt with completion and hints for the `@`, `#`, `!` markers
pub struct PromptInput {
    editor: Editor<MarkerHelper, DefaultHistory>,
}

impl PromptInput {
    pub fn new() -> Result<Self, InputError> {
        let mut editor = Editor::<MarkerHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(MarkerHelper));
        Ok(PromptInput { editor })
    }
}

impl LineInput for PromptInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        finish_line(self.editor.readline(prompt))
    }
}

/// Ctrl-D gives an empty line; Ctrl-C aborts the command.
fn finish_line(result: rustyline::Result<String>) -> Result<String, InputError> {
    match result {
        Ok(line) => Ok(line),
        Err(ReadlineError::Eof) => Ok(String::new()),
        Err(ReadlineError::Interrupted) => Err(InputError::Interrupted),
        Err(e) => Err(e.into()),
    }
}

struct MarkerHelper;

/// Start of the whitespace-delimited word ending at `pos`
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .rfind(char::is_whitespace)
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

/// Markers whose text starts with `word`
fn matching_markers(word: &str) -> impl Iterator<Item = &'static (&'static str, &'static str)> {
    MARKERS
        .iter()
        .filter(move |(marker, _)| marker.starts_with(word))
}

impl Helper for MarkerHelper {}

impl Completer for MarkerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = word_start(line, pos);
        let candidates = matching_markers(&line[start..pos])
            .map(|(marker, desc)| Pair {
                display: format!("{marker}  {desc}"),
                replacement: marker.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

/// Display-only hint; accepting it inserts nothing
struct MarkerHint(&'static str);

impl Hint for MarkerHint {
    fn display(&self) -> &str {
        self.0
    }

    fn completion(&self) -> Option<&str> {
        None
    }
}

impl Hinter for MarkerHelper {
    type Hint = MarkerHint;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<MarkerHint> {
        if pos < line.len() {
            return None;
        }
        let word = &line[word_start(line, pos)..pos];
        MARKERS
            .iter()
            .find(|(marker, _)| *marker == word)
            .map(|&(_, desc)| MarkerHint(desc))
    }
}

impl Highlighter for MarkerHelper {}

impl Validator for MarkerHelper {}
