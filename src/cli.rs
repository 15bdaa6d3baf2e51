use std::borrow::Cow;
use rustyline::{
    Config as RustyConfig, Editor, error::ReadlineError,
    completion::{Completer, Pair},
    hint::{Hinter, HistoryHinter},
    highlight::Highlighter,
    validate::Validator,
    Helper, history::FileHistory
};
use colored::Colorize;
use soundbio::{GroqClient, GroqError, Lookup, Transport};

const SPECIAL_COMMANDS: [&str; 2] = ["exit", "help"];

struct SoundbioHelper {
    hinter: HistoryHinter,
}

impl Helper for SoundbioHelper {}

impl Completer for SoundbioHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only the bare commands complete; artist names are free text
        let word = &line[..pos];
        if word.contains(' ') {
            return Ok((pos, Vec::new()));
        }
        let candidates: Vec<Pair> = SPECIAL_COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(word))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for SoundbioHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for SoundbioHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.truecolor(128, 128, 128).to_string())
    }
}

impl Validator for SoundbioHelper {}

/// Queries one artist and prints the answer. Only configuration-class errors escape.
pub fn ask<T: Transport>(client: &GroqClient<T>, artist: &str) -> Result<(), GroqError> {
    println!("{}", format!("[Searching] {}", artist).truecolor(128, 128, 128));
    match client.lookup(artist)? {
        Lookup::Found(text) => println!("{}", text.yellow()),
        unavailable => println!("{}", unavailable.into_text().red()),
    }
    Ok(())
}

pub fn run_cli<T: Transport>(client: &GroqClient<T>) -> Result<(), Box<dyn std::error::Error>> {
    let rusty_config = RustyConfig::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl: Editor<SoundbioHelper, FileHistory> = Editor::with_config(rusty_config)?;
    rl.set_helper(Some(SoundbioHelper { hinter: HistoryHinter {} }));

    loop {
        match rl.readline(&"artist> ".green()) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                rl.add_history_entry(input)?;
                match input {
                    "exit" => break,
                    "help" => println!(
                        "{}",
                        "Workflow:\n\
                        - Type an artist name and wait for a short career summary with 3 songs\n\
                        \n\
                        Available commands:\n\
                        - exit: Exit the program\n\
                        - help: Show this help message\n"
                            .blue()
                    ),
                    artist => ask(client, artist)?,
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(Box::new(e)),
        }
    }
    Ok(())
}
