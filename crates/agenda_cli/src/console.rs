//! Interactive menu loop over [`ContactService`].
//!
//! # Responsibility
//! - Prompt for raw field values and hand candidates to the service.
//! - Render results and errors as plain text.
//!
//! # Invariants
//! - The secret is never echoed, not even as the "current value" hint.
//! - End of input at any prompt ends the session without touching storage.

use agenda_core::{
    Contact, ContactField, ContactId, ContactPatch, ContactRepository, ContactService, RepoError,
};
use log::debug;
use std::io::{self, BufRead, Write};

/// Whether the menu loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Console<'a, I, O, R>
where
    I: BufRead,
    O: Write,
    R: ContactRepository,
{
    input: I,
    output: O,
    service: &'a ContactService<R>,
}

impl<'a, I, O, R> Console<'a, I, O, R>
where
    I: BufRead,
    O: Write,
    R: ContactRepository,
{
    pub fn new(input: I, output: O, service: &'a ContactService<R>) -> Self {
        Self {
            input,
            output,
            service,
        }
    }

    /// Runs the menu until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            debug!("event=menu_select module=cli option={}", choice.trim());

            let flow = match choice.trim() {
                "1" => self.add_contact()?,
                "2" => self.show_contact_by_id()?,
                "3" => self.list_contacts()?,
                "4" => self.update_contact()?,
                "5" => self.delete_contact()?,
                "6" => self.search_by_name()?,
                "0" => {
                    writeln!(self.output, "\nGoodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "\nInvalid option, please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }

            writeln!(self.output, "\nPress ENTER to continue...")?;
            self.output.flush()?;
            if self.read_line()?.is_none() {
                break;
            }
        }
        self.output.flush()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== CONTACT BOOK ===")?;
        writeln!(self.output, "1. Add contact")?;
        writeln!(self.output, "2. Find contact by ID")?;
        writeln!(self.output, "3. List all contacts")?;
        writeln!(self.output, "4. Update contact")?;
        writeln!(self.output, "5. Delete contact")?;
        writeln!(self.output, "6. Search contact by name")?;
        writeln!(self.output, "0. Exit")?;
        write!(self.output, "\nChoose an option: ")?;
        self.output.flush()
    }

    fn add_contact(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n=== ADD CONTACT ===")?;
        let mut candidate = Contact::default();
        for field in ContactField::ALL {
            let Some(value) = self.prompt(&format!("{}: ", field.label()))? else {
                return Ok(Flow::Exit);
            };
            *candidate.field_mut(field) = value;
        }

        match self.service.create_contact(Some(&candidate)) {
            Ok(created) => writeln!(
                self.output,
                "\nContact added successfully! ID: {}",
                created.id
            )?,
            Err(err) => self.render_error("Could not add contact", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn show_contact_by_id(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n=== FIND CONTACT BY ID ===")?;
        let Some(id) = self.prompt_id("Contact ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(id) = id else {
            return Ok(Flow::Continue);
        };

        match self.service.get_contact(id) {
            Ok(contact) => self.render_details(&contact)?,
            Err(err) => self.render_error("Could not find contact", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn list_contacts(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n=== CONTACT LIST ===")?;
        match self.service.list_contacts() {
            Ok(contacts) if contacts.is_empty() => {
                writeln!(self.output, "No contacts stored.")?;
            }
            Ok(contacts) => {
                self.render_summaries(&contacts)?;
                writeln!(self.output, "\nTotal: {} contact(s)", contacts.len())?;
            }
            Err(err) => self.render_error("Could not list contacts", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn update_contact(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n=== UPDATE CONTACT ===")?;
        let Some(id) = self.prompt_id("ID of the contact to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(id) = id else {
            return Ok(Flow::Continue);
        };

        let current = match self.service.get_contact(id) {
            Ok(contact) => contact,
            Err(err) => {
                self.render_error("Could not find contact", &err)?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(
            self.output,
            "\nEnter the new values (leave blank to keep the current one):"
        )?;
        let mut patch = ContactPatch::new();
        for field in ContactField::ALL {
            let label = if field.is_sensitive() {
                "New secret (leave blank to keep the current one): ".to_string()
            } else {
                format!("{} [{}]: ", field.label(), current.field(field))
            };
            let Some(value) = self.prompt(&label)? else {
                return Ok(Flow::Exit);
            };
            patch.set(field, value);
        }

        if patch.is_noop() {
            writeln!(self.output, "\nNothing to change.")?;
            return Ok(Flow::Continue);
        }

        match self.service.patch_contact(id, &patch) {
            Ok(updated) => {
                writeln!(self.output, "\nContact updated successfully!")?;
                self.render_details(&updated)?;
            }
            Err(err) => self.render_error("Could not update contact", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_contact(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n=== DELETE CONTACT ===")?;
        let Some(id) = self.prompt_id("ID of the contact to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(id) = id else {
            return Ok(Flow::Continue);
        };

        let Some(answer) = self.prompt("Are you sure you want to delete this contact? (y/n): ")?
        else {
            return Ok(Flow::Exit);
        };
        if !is_confirmation(&answer) {
            writeln!(self.output, "Cancelled.")?;
            return Ok(Flow::Continue);
        }

        match self.service.delete_contact(id) {
            Ok(()) => writeln!(self.output, "Contact deleted successfully!")?,
            Err(err) => self.render_error("Could not delete contact", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn search_by_name(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n=== SEARCH CONTACT BY NAME ===")?;
        let Some(query) = self.prompt("Full name to search for: ")? else {
            return Ok(Flow::Exit);
        };
        if query.trim().is_empty() {
            writeln!(self.output, "Search query must not be empty.")?;
            return Ok(Flow::Continue);
        }

        match self.service.search_by_name(query.trim()) {
            Ok(found) => {
                writeln!(self.output, "\nFound {} contact(s):", found.len())?;
                self.render_summaries(&found)?;
            }
            Err(err) => self.render_error("Search failed", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn render_summaries(&mut self, contacts: &[Contact]) -> io::Result<()> {
        for contact in contacts {
            writeln!(self.output, "{}", contact.summary_line())?;
        }
        Ok(())
    }

    fn render_details(&mut self, contact: &Contact) -> io::Result<()> {
        writeln!(self.output, "\n=== CONTACT DETAILS ===")?;
        writeln!(self.output, "ID: {}", contact.id)?;
        for field in ContactField::ALL {
            writeln!(
                self.output,
                "{}: {}",
                field.label(),
                contact.display_value(field)
            )?;
        }
        Ok(())
    }

    fn render_error(&mut self, context: &str, err: &RepoError) -> io::Result<()> {
        match err {
            RepoError::Validation(errors) => {
                writeln!(self.output, "\n{context}: some fields are invalid")?;
                for error in errors.iter() {
                    writeln!(
                        self.output,
                        "  - {}: {}",
                        error.field().label(),
                        error.reasons().join("; ")
                    )?;
                }
                Ok(())
            }
            RepoError::NotFound(_) => writeln!(self.output, "\n{context}: contact not found."),
            RepoError::NilInput => writeln!(self.output, "\n{context}: no contact data given."),
        }
    }

    /// Reads an id. Outer `None` is end of input, inner `None` is a parse
    /// failure that was already reported.
    fn prompt_id(&mut self, label: &str) -> io::Result<Option<Option<ContactId>>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match raw.trim().parse::<ContactId>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                writeln!(self.output, "Invalid ID!")?;
                Ok(Some(None))
            }
        }
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

fn is_confirmation(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}
