use super::{MenuError, NoteError, Result};

use crate::app::{Theme, View};
use crate::ui::io::IO;
use colored::Colorize;
use log::trace;
use std::io::{self, Write};
use tabled::{Table, settings::Style};

pub struct Cli;

impl Cli {
    /// Prints the prompt marker and reads one raw line, newline included
    ///
    /// # Errors
    ///
    /// Returns `MenuError::EndOfInput` once stdin is exhausted, or an I/O error
    fn read_line() -> Result<String> {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|e| NoteError::Menu(MenuError::StdoutWriteError(e)))?;
        trace!("Flushed stdout");

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .map_err(|e| NoteError::Menu(MenuError::StdinReadError(e)))?;
        if read == 0 {
            return Err(NoteError::Menu(MenuError::EndOfInput));
        }
        trace!("Got input: {}", line.trim_end());
        Ok(line)
    }
}

impl IO for Cli {
    /// Reads a single line of text, trims it, and returns the resulting string.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or reading from stdin fails.
    fn get_input(&self) -> Result<String> {
        let input = Self::read_line()?;
        println!();
        Ok(input.trim().to_string())
    }

    /// Reads a single line of text and strips only the trailing line break.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or reading from stdin fails.
    fn get_line(&self) -> Result<String> {
        let mut input = Self::read_line()?;
        println!();
        let end = input.trim_end_matches(['\n', '\r']).len();
        input.truncate(end);
        Ok(input)
    }

    /// Reads lines from stdin until a line exactly matching `stop_at` (trimmed) is entered,
    /// concatenates the preceding lines and returns them without the final line break.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or reading from stdin fails.
    fn get_input_until(&self, stop_at: &str) -> Result<String> {
        let mut input = String::new();
        loop {
            let line = Self::read_line()?;
            if line.trim() == stop_at {
                break;
            }
            input += &line;
        }
        println!();

        let end = input.trim_end_matches(['\n', '\r']).len();
        input.truncate(end);
        Ok(input)
    }

    /// Displays a numbered menu prompt with the given options.
    fn show_menu(&self, options: &[impl std::fmt::Display]) {
        self.show_title("Choose an option");
        for o in options {
            println!("{o}");
        }
        println!();
    }

    /// Prints a bolded title followed by a blank line.
    fn show_title(&self, title: &str) {
        println!("\n{}\n", title.bold());
    }

    /// Prints plain text to stdout.
    fn show_text(&self, msg: &str) {
        println!("{msg}");
    }

    /// Prints the message in red and blocks until Enter is pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or reading from stdin fails.
    fn show_alert(&self, msg: &str) -> Result<()> {
        println!("\n{} {}", "!".red().bold(), msg.red().bold());
        println!("Press Enter to continue");
        Self::read_line()?;
        println!();
        Ok(())
    }

    /// Renders the current view: draft with character count, search query and
    /// a table of the visible notes. Dark mode swaps table style and colors.
    fn show_view(&self, view: &View<'_>) {
        let heading = " My Notes ";
        match view.theme {
            Theme::Light => println!("\n{}", heading.black().on_white().bold()),
            Theme::Dark => println!("\n{}", heading.bright_white().on_black().bold()),
        }

        if view.draft.is_empty() {
            println!("{}", "Draft: (empty)".dimmed());
        } else {
            println!("Draft:\n{}", view.draft);
        }
        println!("Characters: {}", view.char_count);

        if !view.search.is_empty() {
            println!(
                "Search: \"{}\" ({} of {} shown)",
                view.search,
                view.notes.len(),
                view.total
            );
        }

        if view.notes.is_empty() {
            let msg = if view.total == 0 {
                "No notes yet"
            } else {
                "No notes match the search"
            };
            println!("{}", msg.italic());
            return;
        }

        let mut table = Table::new(view.notes.iter().copied());
        match view.theme {
            Theme::Light => table.with(Style::psql()),
            Theme::Dark => table.with(Style::rounded()),
        };
        println!("{table}");
    }
}
