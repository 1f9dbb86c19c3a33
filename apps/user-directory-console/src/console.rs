//! Line-oriented front end: table on stdout, commands and confirmations on stdin.

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;
use user_directory::{
    ConfirmPrompt, DeleteOutcome, DirectoryController, FormController, FormField, FormMode,
    TableRow, TableView,
};
use user_directory_sdk::Department;

const HELP: &str = "\
Commands:
  list                       re-render the table
  reload                     fetch again from the remote service
  add                        open the form in add mode
  edit <id>                  open the form in edit mode
  set <field> <value...>     field is first | last | email | department
  form                       show the current form
  submit                     submit the form
  cancel                     cancel the form
  delete <id>                delete (asks y/N)
  departments                list the departments
  help                       show this help
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    Add,
    Edit(u64),
    Set { field: FormField, value: String },
    Form,
    Submit,
    Cancel,
    Delete(u64),
    Departments,
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>) -> Result<u64, String> {
    let arg = arg.ok_or_else(|| "missing user id".to_owned())?;
    arg.parse()
        .map_err(|_| format!("'{arg}' is not a valid user id"))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let arg = (!rest.is_empty()).then_some(rest);

        match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "reload" => Ok(Command::Reload),
            "add" => Ok(Command::Add),
            "edit" => parse_id(arg).map(Command::Edit),
            "delete" | "rm" => parse_id(arg).map(Command::Delete),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err("usage: set <field> <value...>".to_owned());
                }
                Ok(Command::Set {
                    field: field.parse()?,
                    value: value.trim().to_owned(),
                })
            }
            "form" => Ok(Command::Form),
            "submit" | "save" => Ok(Command::Submit),
            "cancel" => Ok(Command::Cancel),
            "departments" => Ok(Command::Departments),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

const HEADERS: [&str; 6] = ["ID", "First Name", "Last Name", "Email", "Department", "Actions"];

/// Align rows under the table headers.
#[must_use]
pub fn format_table(rows: &[TableRow]) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.first_name.clone(),
                row.last_name.clone(),
                row.email.clone(),
                row.department.to_string(),
                format!("edit {id} | delete {id}", id = row.id),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |values: &[&str]| -> String {
        values
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    let mut out = vec![line(&HEADERS)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(line(&values));
    }
    if cells.is_empty() {
        out.push("(no users)".to_owned());
    }
    out.join("\n")
}

#[must_use]
pub fn format_form(form: &FormController) -> String {
    let Some(title) = form.title() else {
        return "No form is open.".to_owned();
    };
    let input = form.input();
    let id = input.id.as_ref().map_or_else(String::new, ToString::to_string);
    let mut out = vec![title.to_owned(), format!("  {:<12}{id} (read-only)", "ID")];
    for field in FormField::ALL {
        out.push(format!("  {:<12}{}", field.label(), input.value(field)));
    }
    out.join("\n")
}

fn notify(message: &str) {
    println!("! {message}");
}

/// Prints the table after every store change.
pub struct StdoutTableView;

impl TableView for StdoutTableView {
    fn render(&self, rows: &[TableRow]) {
        println!("{}", format_table(rows));
    }
}

// ============================================================================
// Input
// ============================================================================

/// Input lines shared by the command loop and the confirm prompt.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

/// Asks on stdout and reads the answer from the shared input. Only `y`/`yes` accepts.
pub struct LineConfirm<R> {
    lines: SharedLines<R>,
}

impl<R> LineConfirm<R> {
    #[must_use]
    pub fn new(lines: SharedLines<R>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl<R> ConfirmPrompt for LineConfirm<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        // A failed flush only delays the prompt text.
        std::io::stdout().flush().ok();
        match self.lines.lock().await.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) | Err(_) => false,
        }
    }
}

pub struct Console<R> {
    controller: Arc<DirectoryController>,
    lines: SharedLines<R>,
}

impl<R> Console<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    #[must_use]
    pub fn new(controller: Arc<DirectoryController>, lines: SharedLines<R>) -> Self {
        Self { controller, lines }
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// # Errors
    /// Returns an error if reading input fails.
    pub async fn run(&self) -> anyhow::Result<()> {
        println!("Type 'help' for commands.");
        loop {
            let next = self.lines.lock().await.next_line().await?;
            let Some(line) = next else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(message) => notify(&message),
            }
        }
        tracing::debug!("console loop finished");
        Ok(())
    }

    async fn execute(&self, command: Command) {
        let controller = &self.controller;
        match command {
            Command::List => println!("{}", format_table(&controller.rows())),
            Command::Reload => {
                if let Err(err) = controller.reload().await {
                    notify(err.notice());
                }
            }
            Command::Add => {
                let input = controller.open_for_add();
                tracing::debug!(next_id = ?input.id, "add form opened");
                println!("{}", format_form(&controller.form()));
            }
            Command::Edit(id) => match controller.open_for_edit(id) {
                Ok(_) => println!("{}", format_form(&controller.form())),
                Err(err) => notify(err.notice()),
            },
            Command::Set { field, value } => {
                if let Err(err) = controller.set_field(field, &value) {
                    notify(err.notice());
                }
            }
            Command::Form => println!("{}", format_form(&controller.form())),
            Command::Submit => match controller.submit().await {
                Ok(outcome) => {
                    if let Some(notice) = outcome.notice() {
                        notify(notice);
                    }
                }
                Err(err) => notify(err.notice()),
            },
            Command::Cancel => {
                if controller.form().mode() != FormMode::Closed {
                    controller.cancel();
                    println!("Form cancelled.");
                }
            }
            Command::Delete(id) => match controller.delete(id).await {
                Ok(DeleteOutcome::Declined) => println!("Delete cancelled."),
                Ok(outcome) => {
                    if let Some(notice) = outcome.notice() {
                        notify(notice);
                    }
                }
                Err(err) => notify(err.notice()),
            },
            Command::Departments => {
                let names: Vec<&str> = Department::ALL.into_iter().map(Department::name).collect();
                println!("{}", names.join(", "));
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
    }
}
