//! Numbered console menu driving the artifact service.
//!
//! # Responsibility
//! - Render the menu, read one choice per line and dispatch it.
//! - Collect artifact fields through sequential prompts.
//! - Report failures: one line for domain errors, a full cause chain for
//!   store errors.
//!
//! # Invariants
//! - Only choice 5 (or end of input) ends the loop.
//! - A rejected line is consumed whole before the menu is shown again.

use log::debug;
use museum_core::{
    parse_found_date, parse_quantity, parse_unit_weight, Artifact, ArtifactFields,
    ArtifactParseError, ArtifactRepository, ArtifactService, ErrorKind, ServiceError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

pub const INVALID_NUMBER_MESSAGE: &str = "Invalid input. Please enter a number.";
pub const INVALID_CHOICE_MESSAGE: &str = "Invalid choice.";
pub const DUPLICATE_ID_MESSAGE: &str =
    "An artifact with this id already exists. Please use a different id.";

/// Top-level menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Edit,
    Delete,
    Exit,
}

impl MenuChoice {
    fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(Self::Add),
            2 => Some(Self::List),
            3 => Some(Self::Edit),
            4 => Some(Self::Delete),
            5 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Why a menu line was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInputError {
    NotANumber(String),
    UnknownChoice(i64),
}

/// Parses one menu line into a choice.
pub fn parse_menu_choice(line: &str) -> Result<MenuChoice, MenuInputError> {
    let trimmed = line.trim();
    let number = trimmed
        .parse::<i64>()
        .map_err(|_| MenuInputError::NotANumber(trimmed.to_string()))?;
    MenuChoice::from_number(number).ok_or(MenuInputError::UnknownChoice(number))
}

/// Failure while running one prompt sequence.
#[derive(Debug)]
pub enum PromptError {
    Io(io::Error),
    /// Input closed before the sequence finished.
    EndOfInput,
    Invalid(ArtifactParseError),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::EndOfInput => write!(f, "input closed"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::EndOfInput => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ArtifactParseError> for PromptError {
    fn from(value: ArtifactParseError) -> Self {
        Self::Invalid(value)
    }
}

/// Line-oriented console with separate streams for output and diagnostics.
pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// Reads one line without its terminator; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected, so a
    /// garbled line reaches the parsers as ordinary invalid input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Prints `label` without a newline and reads the answer.
    pub fn prompt(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.read_line()?.ok_or(PromptError::EndOfInput)
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    /// Writes `err` and each of its causes to the diagnostic stream.
    ///
    /// Wrapper layers often repeat their inner message; consecutive
    /// identical lines are printed once.
    pub fn diagnose(&mut self, err: &dyn Error) -> io::Result<()> {
        let mut last = err.to_string();
        writeln!(self.err, "error: {last}")?;
        let mut cause = err.source();
        while let Some(current) = cause {
            let message = current.to_string();
            if message != last {
                writeln!(self.err, "  caused by: {message}")?;
                last = message;
            }
            cause = current.source();
        }
        self.err.flush()
    }

    /// Reports a failed service call according to its kind.
    pub fn report(&mut self, err: &ServiceError) -> io::Result<()> {
        match err.kind() {
            ErrorKind::Domain => self.say(err),
            ErrorKind::Store => self.diagnose(err),
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (R, W, E) {
        (self.input, self.out, self.err)
    }
}

/// Runs the menu until Exit is chosen or input ends.
pub fn run_menu<Repo, R, W, E>(
    console: &mut Console<R, W, E>,
    service: &ArtifactService<Repo>,
) -> io::Result<()>
where
    Repo: ArtifactRepository,
    R: BufRead,
    W: Write,
    E: Write,
{
    loop {
        print_menu(console)?;
        let Some(line) = console.read_line()? else {
            debug!("event=menu_end module=cli status=ok reason=eof");
            return Ok(());
        };

        let choice = match parse_menu_choice(&line) {
            Ok(choice) => choice,
            Err(MenuInputError::NotANumber(text)) => {
                debug!(
                    "event=menu_choice module=cli status=error error_code=not_a_number input_len={}",
                    text.len()
                );
                console.say(INVALID_NUMBER_MESSAGE)?;
                continue;
            }
            Err(MenuInputError::UnknownChoice(number)) => {
                debug!(
                    "event=menu_choice module=cli status=error error_code=unknown_choice choice={number}"
                );
                console.say(INVALID_CHOICE_MESSAGE)?;
                continue;
            }
        };
        debug!("event=menu_choice module=cli status=ok choice={choice:?}");

        let outcome = match choice {
            MenuChoice::Add => add_artifact(console, service),
            MenuChoice::List => list_artifacts(console, service),
            MenuChoice::Edit => edit_artifact(console, service),
            MenuChoice::Delete => delete_artifact(console, service),
            MenuChoice::Exit => {
                console.say("Leaving the inventory.")?;
                return Ok(());
            }
        };

        match outcome {
            Ok(()) => {}
            Err(PromptError::Invalid(err)) => {
                console.say(format!("Invalid input: {err}"))?;
            }
            Err(PromptError::EndOfInput) => {
                debug!("event=menu_end module=cli status=ok reason=eof_in_prompt");
                return Ok(());
            }
            Err(PromptError::Io(err)) => return Err(err),
        }
    }
}

fn print_menu<R: BufRead, W: Write, E: Write>(console: &mut Console<R, W, E>) -> io::Result<()> {
    console.say("\n=== Museum Artifact Inventory ===")?;
    console.say("1. Add artifact")?;
    console.say("2. List all artifacts")?;
    console.say("3. Edit artifact")?;
    console.say("4. Delete artifact")?;
    console.say("5. Exit")?;
    write!(console.out, "Enter choice: ")?;
    console.out.flush()
}

fn add_artifact<Repo, R, W, E>(
    console: &mut Console<R, W, E>,
    service: &ArtifactService<Repo>,
) -> Result<(), PromptError>
where
    Repo: ArtifactRepository,
    R: BufRead,
    W: Write,
    E: Write,
{
    let id = console.prompt("Enter artifact id: ")?;
    if service.is_known_id(&id) {
        console.say(DUPLICATE_ID_MESSAGE)?;
        return Ok(());
    }

    let fields = read_fields(console, "")?;
    match service.add_artifact(&Artifact::new(id, fields)) {
        Ok(()) => console.say("Artifact added.")?,
        Err(err) => console.report(&err)?,
    }
    Ok(())
}

fn list_artifacts<Repo, R, W, E>(
    console: &mut Console<R, W, E>,
    service: &ArtifactService<Repo>,
) -> Result<(), PromptError>
where
    Repo: ArtifactRepository,
    R: BufRead,
    W: Write,
    E: Write,
{
    match service.list_artifacts() {
        Ok(artifacts) => {
            console.say("\nMuseum artifacts:")?;
            for artifact in &artifacts {
                console.say(artifact.listing_line())?;
            }
        }
        Err(err) => console.report(&err)?,
    }
    Ok(())
}

fn edit_artifact<Repo, R, W, E>(
    console: &mut Console<R, W, E>,
    service: &ArtifactService<Repo>,
) -> Result<(), PromptError>
where
    Repo: ArtifactRepository,
    R: BufRead,
    W: Write,
    E: Write,
{
    let id = console.prompt("Enter id of the artifact to edit: ")?;
    let fields = read_fields(console, "new ")?;
    let replacement = Artifact::new(id.as_str(), fields);

    match service.edit_artifact(&id, &replacement) {
        Ok(()) => console.say("Artifact updated.")?,
        Err(err) => console.report(&err)?,
    }
    Ok(())
}

fn delete_artifact<Repo, R, W, E>(
    console: &mut Console<R, W, E>,
    service: &ArtifactService<Repo>,
) -> Result<(), PromptError>
where
    Repo: ArtifactRepository,
    R: BufRead,
    W: Write,
    E: Write,
{
    let id = console.prompt("Enter id of the artifact to delete: ")?;
    match service.remove_artifact(&id) {
        Ok(()) => console.say("Artifact deleted.")?,
        Err(err) => console.report(&err)?,
    }
    Ok(())
}

/// Prompts for the seven mutable fields in storage order.
///
/// `qualifier` is inserted before each field name, e.g. `"new "`.
fn read_fields<R: BufRead, W: Write, E: Write>(
    console: &mut Console<R, W, E>,
    qualifier: &str,
) -> Result<ArtifactFields, PromptError> {
    let name = console.prompt(&format!("Enter {qualifier}name: "))?;
    let category = console.prompt(&format!("Enter {qualifier}category: "))?;
    let origin = console.prompt(&format!("Enter {qualifier}origin: "))?;
    let found_date =
        parse_found_date(&console.prompt(&format!("Enter {qualifier}found date (yyyy-MM-dd): "))?)?;
    let condition = console.prompt(&format!("Enter {qualifier}condition: "))?;
    let quantity = parse_quantity(&console.prompt(&format!("Enter {qualifier}quantity: "))?)?;
    let unit_weight =
        parse_unit_weight(&console.prompt(&format!("Enter {qualifier}unit weight (kg): "))?)?;

    Ok(ArtifactFields {
        name,
        category,
        origin,
        found_date,
        condition,
        quantity,
        unit_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        parse_menu_choice, run_menu, Console, MenuChoice, MenuInputError, INVALID_CHOICE_MESSAGE,
        INVALID_NUMBER_MESSAGE,
    };
    use museum_core::db::open_db_in_memory;
    use museum_core::{ArtifactService, SqliteArtifactRepository};
    use std::io::Cursor;

    struct Transcript {
        out: String,
        err: String,
    }

    fn run_script(script: &str) -> Transcript {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteArtifactRepository::try_new(&conn).unwrap();
        let service = ArtifactService::new(repo);
        run_script_with(&service, script)
    }

    fn run_script_with(
        service: &ArtifactService<SqliteArtifactRepository<'_>>,
        script: &str,
    ) -> Transcript {
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new(), Vec::new());
        run_menu(&mut console, service).unwrap();
        let (_, out, err) = console.into_parts();
        Transcript {
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    const ADD_A1: &str = "1\nA1\nKeris\nWEAPON\nMadura\n2024-03-07\ngood\n3\n2.5\n";

    #[test]
    fn parse_menu_choice_maps_numbers() {
        assert_eq!(parse_menu_choice(" 1 "), Ok(MenuChoice::Add));
        assert_eq!(parse_menu_choice("5"), Ok(MenuChoice::Exit));
        assert_eq!(
            parse_menu_choice("x"),
            Err(MenuInputError::NotANumber("x".to_string()))
        );
        assert_eq!(parse_menu_choice("0"), Err(MenuInputError::UnknownChoice(0)));
    }

    #[test]
    fn non_numeric_choice_redisplays_menu_and_leaves_table_empty() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteArtifactRepository::try_new(&conn).unwrap();
        let service = ArtifactService::new(repo);

        let transcript = run_script_with(&service, "x\n2\n5\n");

        assert!(transcript.out.contains(INVALID_NUMBER_MESSAGE));
        assert_eq!(transcript.out.matches("=== Museum Artifact Inventory ===").count(), 3);
        // Listing header directly followed by the next menu: no rows.
        assert!(transcript
            .out
            .contains("Museum artifacts:\n\n=== Museum Artifact Inventory ==="));
        assert!(service.list_artifacts().unwrap().is_empty());
    }

    #[test]
    fn non_utf8_choice_is_reported_as_invalid_number() {
        let mut console = Console::new(
            Cursor::new(b"\xff\xfe\n5\n".to_vec()),
            Vec::new(),
            Vec::new(),
        );
        let conn = open_db_in_memory().unwrap();
        let service = ArtifactService::new(SqliteArtifactRepository::try_new(&conn).unwrap());

        run_menu(&mut console, &service).unwrap();

        let (_, out, err) = console.into_parts();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(INVALID_NUMBER_MESSAGE));
        assert!(out.contains("Leaving the inventory."));
        assert!(err.is_empty());
    }

    #[test]
    fn non_utf8_quantity_aborts_add_only() {
        let mut script = b"1\nA1\nKeris\nweapon\nMadura\n2024-03-07\ngood\n".to_vec();
        script.extend_from_slice(b"\xff3\n2\n5\n");
        let mut console = Console::new(Cursor::new(script), Vec::new(), Vec::new());
        let conn = open_db_in_memory().unwrap();
        let service = ArtifactService::new(SqliteArtifactRepository::try_new(&conn).unwrap());

        run_menu(&mut console, &service).unwrap();

        let (_, out, _) = console.into_parts();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Invalid input: invalid quantity"));
        assert!(out.contains("Leaving the inventory."));
        assert!(service.list_artifacts().unwrap().is_empty());
    }

    #[test]
    fn out_of_range_choice_is_reported() {
        let transcript = run_script("9\n5\n");
        assert!(transcript.out.contains(INVALID_CHOICE_MESSAGE));
    }

    #[test]
    fn end_of_input_stops_loop() {
        let transcript = run_script("2\n");
        assert_eq!(transcript.out.matches("Enter choice: ").count(), 2);
        assert!(!transcript.out.contains("Leaving the inventory."));
    }

    #[test]
    fn add_then_list_prints_listing_line() {
        let transcript = run_script(&format!("{ADD_A1}2\n5\n"));

        assert!(transcript.out.contains("Artifact added."));
        assert!(transcript.out.contains(
            "Name: KERIS, Category: weapon, Total Weight: 7.5 kg, Found: 07/03/2024"
        ));
        assert!(transcript.err.is_empty());
    }

    #[test]
    fn invalid_date_aborts_add_and_keeps_looping() {
        let transcript = run_script("1\nA1\nKeris\nweapon\nMadura\n07/03/2024\n2\n5\n");

        assert!(transcript.out.contains("Invalid input: invalid date `07/03/2024`"));
        assert!(!transcript.out.contains("Artifact added."));
        assert!(transcript.out.contains("Leaving the inventory."));
    }

    #[test]
    fn duplicate_add_reaches_store_and_prints_diagnostic() {
        let transcript = run_script(&format!("{ADD_A1}{ADD_A1}5\n"));

        assert_eq!(transcript.out.matches("Artifact added.").count(), 1);
        assert!(transcript.err.starts_with("error: "));
        assert!(transcript.out.contains("Leaving the inventory."));
    }

    #[test]
    fn edit_and_delete_unknown_id_print_single_line() {
        let transcript = run_script(
            "3\nZ9\nName\ncat\norigin\n2020-01-01\nok\n1\n1.0\n4\nZ9\n5\n",
        );

        assert_eq!(
            transcript
                .out
                .matches("artifact with id `Z9` was not found")
                .count(),
            2
        );
        assert!(transcript.err.is_empty());
    }

    #[test]
    fn edit_then_delete_existing_artifact() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteArtifactRepository::try_new(&conn).unwrap();
        let service = ArtifactService::new(repo);

        let transcript = run_script_with(
            &service,
            &format!("{ADD_A1}3\nA1\nArca\nStatue\nBali\n1921-11-30\nworn\n2\n40\n2\n4\nA1\n5\n"),
        );

        assert!(transcript.out.contains("Artifact updated."));
        assert!(transcript.out.contains(
            "Name: ARCA, Category: statue, Total Weight: 80.0 kg, Found: 30/11/1921"
        ));
        assert!(transcript.out.contains("Artifact deleted."));
        assert!(service.list_artifacts().unwrap().is_empty());
    }
}
