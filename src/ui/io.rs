use super::{MenuError, NoteError, NoteValidationError, Result};
use crate::app::{ClearRequest, NoteStore, View, ViewState};
use crate::setup::{arguments, logging};
use crate::ui::cli;

use log::{debug, error, info, trace, warn};
use std::fmt;

/// Abstraction for input/output
pub trait IO {
    /// Read a trimmed line of input ending at newline
    fn get_input(&self) -> Result<String>;
    /// Read one line as typed, only the line break removed
    fn get_line(&self) -> Result<String>;
    /// Read multiple lines until a trimmed line equals `stop_at`
    fn get_input_until(&self, stop_at: &str) -> Result<String>;
    /// Display a list of selectable options
    fn show_menu(&self, options: &[impl std::fmt::Display]);
    /// Display a bolded title
    fn show_title(&self, title: &str);
    /// Print a plain text message
    fn show_text(&self, msg: &str);
    /// Show a message and wait until the user acknowledges it
    fn show_alert(&self, msg: &str) -> Result<()>;
    /// Render the draft, search query and visible notes
    fn show_view(&self, view: &View<'_>);
}

/// Actions available in the menu
#[derive(Debug, Clone, Copy)]
pub enum MenuOption {
    Write = 1,
    Save = 2,
    Edit = 3,
    Delete = 4,
    Search = 5,
    ClearAll = 6,
    ToggleTheme = 7,
    List = 8,
}

/// All menu options in display order
pub const ALL_MENU_OPTIONS: [MenuOption; 8] = [
    MenuOption::Write,
    MenuOption::Save,
    MenuOption::Edit,
    MenuOption::Delete,
    MenuOption::Search,
    MenuOption::ClearAll,
    MenuOption::ToggleTheme,
    MenuOption::List,
];

/// Convert a numeric choice into a `MenuOption`
///
/// # Errors
///
/// Returns `Err(())` if the value does not map to a valid variant
impl TryFrom<u8> for MenuOption {
    type Error = ();

    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::Write),
            2 => Ok(Self::Save),
            3 => Ok(Self::Edit),
            4 => Ok(Self::Delete),
            5 => Ok(Self::Search),
            6 => Ok(Self::ClearAll),
            7 => Ok(Self::ToggleTheme),
            8 => Ok(Self::List),
            _ => Err(()),
        }
    }
}

/// Show the option number and label, e.g. `(1) Write note`
impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Write => "Write note",
            Self::Save => "Save note",
            Self::Edit => "Edit note",
            Self::Delete => "Delete note",
            Self::Search => "Search notes",
            Self::ClearAll => "Clear all notes",
            Self::ToggleTheme => "Toggle dark mode",
            Self::List => "List notes",
        };
        write!(f, "({}) {}", *self as u8, label)
    }
}

/// Dispatch chosen `MenuOption` to its handler and return the next state
///
/// # Errors
///
/// Forwards input errors. Note store errors are reported to the user instead
pub fn handle_menu_option(
    io: &impl IO,
    store: &mut NoteStore,
    state: ViewState,
    option: MenuOption,
) -> Result<ViewState> {
    trace!("Handling {option}");
    match option {
        MenuOption::Write => handle_write(io, state),
        MenuOption::Save => handle_save(io, store, state),
        MenuOption::Edit => handle_edit(io, store, state),
        MenuOption::Delete => handle_delete(io, store, state),
        MenuOption::Search => handle_search(io, state),
        MenuOption::ClearAll => handle_clear_all(io, store, state),
        MenuOption::ToggleTheme => Ok(state.toggle_theme()),
        MenuOption::List => Ok(state),
    }
}

/// Initialize logging, parse args, and enter the main menu loop until input ends
///
/// # Errors
///
/// Returns an error if the backend cannot be opened or reading input fails
pub fn run() -> Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    logging::setup_log();
    debug!("Loaded .env: {dotenv_loaded}");

    let (mut store, mut state) = arguments::handle_args()?;
    let io = cli::Cli;
    io.show_view(&state.view(&store));

    loop {
        io.show_menu(&ALL_MENU_OPTIONS);
        let option = match get_menu_input(&io) {
            Ok(option) => option,
            Err(NoteError::Menu(MenuError::EndOfInput)) => {
                info!("End of input, bye");
                return Ok(());
            }
            Err(NoteError::Menu(e @ (MenuError::ParseError(_) | MenuError::InvalidOption(_)))) => {
                error!("{e}");
                continue;
            }
            Err(e) => return Err(e),
        };

        state = match handle_menu_option(&io, &mut store, state, option) {
            Ok(next) => next,
            Err(NoteError::Menu(MenuError::EndOfInput)) => {
                info!("End of input, bye");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        io.show_view(&state.view(&store));
    }
}

/// Try parsing input as `MenuOption` or return an error
///
/// # Errors
///
/// Returns `NoteError::Menu(MenuError::ParseError)` if input is not an integer
/// Returns `NoteError::Menu(MenuError::InvalidOption)` if integer is out of range
pub fn get_menu_input(io: &impl IO) -> Result<MenuOption> {
    let input = io.get_input()?;

    match input.parse::<u8>() {
        Ok(n) => MenuOption::try_from(n).map_err(|()| NoteError::Menu(MenuError::InvalidOption(n))),
        Err(_) => Err(NoteError::Menu(MenuError::ParseError(input))),
    }
}

/// Prompt for a note ID until one parses
fn get_id(io: &impl IO) -> Result<u64> {
    loop {
        io.show_text("ID:");
        let input = io.get_input()?;
        match input.parse::<u64>() {
            Ok(id) => return Ok(id),
            Err(e) => error!("Got invalid ID: {e}"),
        }
    }
}

/// Replace the draft with new multi-line text
fn handle_write(io: &impl IO, state: ViewState) -> Result<ViewState> {
    io.show_title("Write note");
    // Stop when getting a "." alone on a line
    io.show_text("Content (end with '.' on last line):");
    let draft = io.get_input_until(".")?;
    trace!("Got draft: {draft}");
    Ok(state.with_draft(draft))
}

/// Save the draft. Empty drafts are refused with a blocking alert
fn handle_save(io: &impl IO, store: &mut NoteStore, state: ViewState) -> Result<ViewState> {
    let (next, outcome) = state.save(store);
    match outcome {
        Ok(_) => {}
        Err(e @ NoteError::Validation(NoteValidationError::ContentEmpty)) => {
            io.show_alert(&e.to_string())?;
        }
        Err(e) => error!("{e}"),
    }
    Ok(next)
}

/// Pop a note back into the draft
fn handle_edit(io: &impl IO, store: &mut NoteStore, state: ViewState) -> Result<ViewState> {
    io.show_title("Edit note");
    if !state.draft.trim().is_empty() {
        warn!("The current draft will be replaced");
    }

    let id = get_id(io)?;
    let (next, outcome) = state.edit(store, id);
    if let Err(e) = outcome {
        error!("{e}");
    }
    Ok(next)
}

fn handle_delete(io: &impl IO, store: &mut NoteStore, state: ViewState) -> Result<ViewState> {
    io.show_title("Delete note");

    let id = get_id(io)?;
    let (next, outcome) = state.delete(store, id);
    if let Err(e) = outcome {
        error!("{e}");
    }
    Ok(next)
}

/// Set the search query. An empty query shows every note. Surrounding
/// whitespace is part of the query
fn handle_search(io: &impl IO, state: ViewState) -> Result<ViewState> {
    io.show_title("Search notes");
    io.show_text("Query (leave empty to show all):");
    let query = io.get_line()?;
    Ok(state.with_search(query))
}

/// Ask for confirmation, then clear everything on a yes
fn handle_clear_all(io: &impl IO, store: &mut NoteStore, state: ViewState) -> Result<ViewState> {
    let request = ClearRequest::new(store);
    io.show_title("Clear all notes");

    let confirmed = loop {
        io.show_text(&format!(
            "{} ({} note(s)) (y/n):",
            ClearRequest::PROMPT,
            request.note_count()
        ));
        let input = io.get_input()?;
        match input.to_lowercase().as_str() {
            "y" | "yes" => break true,
            "n" | "no" => break false,
            _ => warn!("Invalid input. Please enter 'y' or 'n'"),
        }
    };

    match request.resolve(store, confirmed) {
        Ok(()) if !confirmed => info!("Not deleting any notes"),
        Ok(()) => {}
        Err(e) => error!("{e}"),
    }
    Ok(state)
}
