use crate::models::{AUTHOR_MAX, GENRE_MAX, TITLE_MAX};

/// Actions offered by the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ShowFormat,
    AddEntry,
    AddFromFile,
    ListAll,
    CheckEntry,
    DeleteEntry,
    ListSubset,
}

impl Command {
    /// Menu order; the index of each entry is the number the user types.
    pub const ALL: [Command; 8] = [
        Command::Quit,
        Command::ShowFormat,
        Command::AddEntry,
        Command::AddFromFile,
        Command::ListAll,
        Command::CheckEntry,
        Command::DeleteEntry,
        Command::ListSubset,
    ];

    /// Parse the user's answer to the menu prompt.
    pub fn from_choice(choice: &str) -> Option<Self> {
        let index: usize = choice.trim().parse().ok()?;
        Self::ALL.get(index).copied()
    }

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|command| *command == self)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::Quit => "quit program",
            Command::ShowFormat => "read the formatting rules for adding entries",
            Command::AddEntry => "add a single book entry by manually typing the information",
            Command::AddFromFile => {
                "enter a filename of a file that holds multiple book entries to be added"
            }
            Command::ListAll => "get a full list of books from the database",
            Command::CheckEntry => "check for a single book's presence in the database",
            Command::DeleteEntry => "delete a book from the database",
            Command::ListSubset => "get a specific list of books from the database",
        }
    }
}

pub(crate) const GREETING: &str = "Hello, this is the library book manager!
Here you can update and maintain a database of library books.
Each book has an entry that includes the ISBN, the title, the author, the genre, and the year of publication.";

/// Help text describing the record format accepted by the add commands.
pub(crate) fn format_help() -> String {
    format!(
        "When adding entries to the database they must follow a specific format.
They must be in the form of ISBN/Title/Author/Genre/Year Published.
The ISBN must contain only the digits of the ISBN-13 number for the book
with no hyphens or dashes. The title cannot be longer than {TITLE_MAX}
characters (including spaces). The author cannot be more than {AUTHOR_MAX}
characters (including spaces). The genres can be divided up any way you see
fit just ensure that each book has only one genre which has a name that is
{GENRE_MAX} characters or less. The year must be in yyyy format.
You also may add books by giving the program the name and location of a file,
containing a list of entries in the above format with one entry per line."
    )
}
