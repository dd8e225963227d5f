//! Interactive session: one long-lived `LibrarySession` driven by typed
//! commands, the way the browser page is driven by clicks.

use std::io::{BufRead, Write};

use library_core::{Field, LibrarySession, SessionError, Transport, ViewState};

use crate::commands::confirm;
use crate::render;

const HELP: &str = "\
Commands:
  list          reload and show all books
  add           add a new book
  edit <id>     edit a book
  delete <id>   delete a book
  retry         reload after a failed load
  help          show this help
  quit          leave the shell
";

pub struct Shell<'a> {
    session: LibrarySession,
    transport: &'a dyn Transport,
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
}

impl<'a> Shell<'a> {
    pub fn new(
        session: LibrarySession,
        transport: &'a dyn Transport,
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            session,
            transport,
            input,
            out,
        }
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Library Management System (type `help` for commands)")?;
        self.reload()?;

        while let Some(line) = self.prompt("> ")? {
            let mut words = line.split_whitespace();
            let Some(command) = words.next() else {
                continue;
            };
            match (command, words.next()) {
                ("quit" | "exit", _) => break,
                ("help", _) => write!(self.out, "{HELP}")?,
                ("list" | "ls", _) => self.reload()?,
                ("retry", _) => self.retry()?,
                ("add", _) => {
                    self.session.begin_create();
                    self.form()?;
                }
                ("edit", Some(id)) => match id.parse() {
                    Ok(id) => match self.session.begin_edit_by_id(id) {
                        Ok(()) => self.form()?,
                        Err(SessionError::UnknownBook(_)) => self.unknown_book(id)?,
                        Err(e) => return Err(e.into()),
                    },
                    Err(_) => writeln!(self.out, "Not a book id: {id}")?,
                },
                ("delete" | "rm", Some(id)) => match id.parse() {
                    Ok(id) => self.delete(id)?,
                    Err(_) => writeln!(self.out, "Not a book id: {id}")?,
                },
                _ => writeln!(self.out, "Unknown command. Type `help` for the list.")?,
            }
        }
        Ok(())
    }

    fn reload(&mut self) -> anyhow::Result<()> {
        let request = self.session.mount()?;
        self.session.run(self.transport, request);
        self.show_view()
    }

    fn retry(&mut self) -> anyhow::Result<()> {
        match self.session.retry() {
            Ok(request) => {
                self.session.run(self.transport, request);
                self.show_view()
            }
            Err(SessionError::NotFailed) => {
                writeln!(self.out, "Nothing to retry.")?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Without a loaded list no id can be edited; point at `retry` instead.
    fn unknown_book(&mut self, id: library_core::BookId) -> anyhow::Result<()> {
        match self.session.view() {
            ViewState::Error(message) => {
                writeln!(self.out, "{message}")?;
                writeln!(self.out, "Type `retry` to try again.")?;
            }
            _ => writeln!(self.out, "Book {id} not found.")?,
        }
        Ok(())
    }

    fn show_view(&mut self) -> anyhow::Result<()> {
        write!(self.out, "{}", render::view(self.session.view()))?;
        if matches!(self.session.view(), ViewState::Error(_)) {
            writeln!(self.out, "Type `retry` to try again.")?;
        }
        Ok(())
    }

    /// Fill in and submit the open form until it is saved or abandoned.
    fn form(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "{}", render::form_title(self.session.edit()))?;
        writeln!(self.out, "(Enter keeps the value in brackets, `-` clears it.)")?;
        loop {
            if !self.fill_fields()? {
                self.session.cancel_edit();
                return Ok(());
            }
            match self.session.submit() {
                Ok(request) => {
                    self.session.run(self.transport, request);
                    match self.session.take_notice() {
                        None => {
                            writeln!(self.out, "Book saved.")?;
                            return self.show_view();
                        }
                        Some(notice) => {
                            writeln!(self.out, "{notice}")?;
                            if !confirm(&mut *self.input, &mut *self.out, "Submit again?")? {
                                self.session.cancel_edit();
                                return Ok(());
                            }
                            // Values are intact; resubmit without re-prompting.
                            if self.resubmit()? {
                                return self.show_view();
                            }
                            self.session.cancel_edit();
                            return Ok(());
                        }
                    }
                }
                Err(SessionError::Invalid(errors)) => {
                    write!(self.out, "{}", render::errors(&errors))?;
                    if !confirm(&mut *self.input, &mut *self.out, "Fix and try again?")? {
                        self.session.cancel_edit();
                        return Ok(());
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Keep submitting the unchanged form while the user asks to retry.
    /// Returns whether it was eventually saved.
    fn resubmit(&mut self) -> anyhow::Result<bool> {
        loop {
            let request = self.session.submit()?;
            self.session.run(self.transport, request);
            match self.session.take_notice() {
                None => {
                    writeln!(self.out, "Book saved.")?;
                    return Ok(true);
                }
                Some(notice) => {
                    writeln!(self.out, "{notice}")?;
                    if !confirm(&mut *self.input, &mut *self.out, "Submit again?")? {
                        return Ok(false);
                    }
                }
            }
        }
    }

    /// Prompt for every field. Returns false on end of input.
    fn fill_fields(&mut self) -> anyhow::Result<bool> {
        for field in Field::ALL {
            let current = self.session.edit().draft().map(|d| d.get(field).to_string()).unwrap_or_default();
            let label = match field {
                Field::Title => "Title *",
                Field::Author => "Author *",
                Field::Description => "Description",
            };
            let Some(answer) = self.prompt(&format!("{label} [{current}]: "))? else {
                return Ok(false);
            };
            let value = match answer.trim() {
                "" => continue,
                "-" => String::new(),
                other => other.to_string(),
            };
            if let Some(draft) = self.session.draft_mut() {
                draft.set(field, value);
            }
        }
        Ok(true)
    }

    fn delete(&mut self, id: library_core::BookId) -> anyhow::Result<()> {
        let question = self.session.request_delete(id);
        if !confirm(&mut *self.input, &mut *self.out, question)? {
            self.session.dismiss_delete();
            return Ok(());
        }
        let request = self.session.confirm_delete()?;
        self.session.run(self.transport, request);
        match self.session.take_notice() {
            Some(notice) => writeln!(self.out, "{notice}")?,
            None => {
                writeln!(self.out, "Book deleted.")?;
                self.show_view()?;
            }
        }
        Ok(())
    }

    /// Print `text` and read one line without its newline; `None` at EOF.
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
