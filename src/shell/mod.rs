// Shell layer: turns commands into directory calls and renders the results.
// The directory never prints; everything the user sees is produced here.

pub mod menu;

use crate::config::Command;
use crate::core::{Directory, SaveStatus, Store, Subscriber};
use crate::utils::error::Result;
use crate::utils::validation::{parse_phone_number, validate_name_token};
use serde::Serialize;

/// A directory plus the bookkeeping needed to save once more on exit.
pub struct Session<S: Store> {
    directory: Directory<S>,
    unsaved: bool,
}

#[derive(Debug, Serialize)]
struct ListingEntry<'a> {
    index: usize,
    surname: &'a str,
    name: &'a str,
    phone_numbers: &'a [String],
}

impl<S: Store> Session<S> {
    pub fn new(directory: Directory<S>) -> Self {
        Self {
            directory,
            unsaved: false,
        }
    }

    pub fn directory(&self) -> &Directory<S> {
        &self.directory
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    fn track(&mut self, status: SaveStatus) {
        if let Some(warning) = status.warning() {
            eprintln!("⚠️  {}", warning);
        }
        self.unsaved = !status.is_durable();
    }

    /// Runs one command and returns the text to print.
    pub fn execute(&mut self, command: &Command) -> Result<String> {
        match command {
            Command::Add {
                surname,
                name,
                phone,
            } => {
                validate_name_token("surname", surname)?;
                validate_name_token("name", name)?;
                let phone = parse_phone_number("phone number", phone)?;
                let status = self.directory.add_user(surname, name, &phone);
                self.track(status);
                Ok("Subscriber added successfully.".to_string())
            }
            Command::Delete { surname, name } => {
                let status = self.directory.delete_user(surname, name)?;
                self.track(status);
                Ok("Subscriber deleted successfully.".to_string())
            }
            Command::AddNumber {
                surname,
                name,
                phone,
            } => {
                let phone = parse_phone_number("phone number", phone)?;
                let status = self.directory.add_phone_number(surname, name, &phone)?;
                self.track(status);
                Ok("Phone number added successfully.".to_string())
            }
            Command::RemoveNumber {
                surname,
                name,
                phone,
            } => {
                let phone = parse_phone_number("phone number", phone)?;
                let status = self.directory.remove_phone_number(surname, name, &phone)?;
                self.unsaved = !status.is_durable();
                if let SaveStatus::Failed(e) = &status {
                    eprintln!("⚠️  Change kept in memory but not saved: {}", e);
                }
                Ok("Phone number removed successfully.".to_string())
            }
            Command::Show { surname, name } => {
                let numbers = self.directory.display_phone_numbers(surname, name)?;
                Ok(render_phone_numbers(surname, name, numbers))
            }
            Command::List { json } => {
                let listing = self.directory.display_all()?;
                if *json {
                    render_listing_json(&listing)
                } else {
                    Ok(render_listing(&listing))
                }
            }
            Command::Menu => Ok(String::new()),
        }
    }

    /// Writes the directory if a previous command left changes unsaved.
    pub fn finish(&mut self) -> Result<()> {
        if self.unsaved {
            self.directory.save_to_file()?;
            self.unsaved = false;
            tracing::info!("Pending changes saved on exit");
        }
        Ok(())
    }
}

pub fn render_phone_numbers(surname: &str, name: &str, numbers: &[String]) -> String {
    if numbers.is_empty() {
        return format!("No phone numbers found for {} {}", name, surname);
    }

    let mut output = format!("Phone numbers for {} {}:", name, surname);
    for number in numbers {
        output.push_str("\n- ");
        output.push_str(number);
    }
    output
}

pub fn render_listing(listing: &[(usize, &Subscriber)]) -> String {
    let mut output = String::from("----Telephone Directory----\nList sorted by Surname.");
    for (index, subscriber) in listing {
        output.push_str(&format!(
            "\n\n{}. {} {}",
            index,
            subscriber.surname(),
            subscriber.given_name()
        ));
        for number in subscriber.phone_numbers() {
            output.push_str("\n- ");
            output.push_str(number);
        }
    }
    output
}

fn render_listing_json(listing: &[(usize, &Subscriber)]) -> Result<String> {
    let entries: Vec<ListingEntry> = listing
        .iter()
        .map(|(index, subscriber)| ListingEntry {
            index: *index,
            surname: subscriber.surname(),
            name: subscriber.given_name(),
            phone_numbers: subscriber.phone_numbers(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}
