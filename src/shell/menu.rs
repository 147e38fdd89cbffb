// Interactive menu built on `dialoguer`, mirroring the one-shot subcommands.

use crate::config::Command;
use crate::core::Store;
use crate::shell::Session;
use crate::utils::validation::{parse_phone_number, validate_name_token};
use anyhow::Result;
use dialoguer::{Input, Select};

const MENU_ITEMS: [&str; 7] = [
    "Add a new subscriber",
    "Remove a phone number from a subscriber",
    "Add a phone number to a subscriber",
    "Display a subscriber's phone numbers",
    "Delete a subscriber",
    "Display all subscribers",
    "Exit",
];

/// Source of menu answers. `Terminal` is the real one.
pub trait Prompt {
    fn choice(&mut self, items: &[&str]) -> Result<usize>;
    fn token(&mut self, prompt: &str, field: &'static str) -> Result<String>;
    /// Must only return a positive integer in canonical form.
    fn phone(&mut self, prompt: &str) -> Result<String>;
}

pub struct Terminal;

impl Prompt for Terminal {
    fn choice(&mut self, items: &[&str]) -> Result<usize> {
        Ok(Select::new()
            .with_prompt("---Telephone Directory Menu---")
            .items(items)
            .default(0)
            .interact()?)
    }

    fn token(&mut self, prompt: &str, field: &'static str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .validate_with(move |input: &String| -> std::result::Result<(), String> {
                validate_name_token(field, input).map_err(|e| e.user_friendly_message())
            })
            .interact_text()?;
        Ok(value)
    }

    /// Re-prompts until the input is a positive integer.
    fn phone(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                parse_phone_number("phone number", input)
                    .map(|_| ())
                    .map_err(|_| "Invalid phone number!".to_string())
            })
            .interact_text()?;
        Ok(parse_phone_number("phone number", &value)?)
    }
}

/// Runs the select loop until "Exit", then saves the directory. If input
/// fails first (Ctrl-C, closed stdin) pending changes are still saved before
/// the error is returned.
pub fn run_menu<S: Store, P: Prompt>(session: &mut Session<S>, prompt: &mut P) -> Result<()> {
    match menu_loop(session, prompt) {
        Ok(()) => {
            println!("Exiting program...");
            // exit always rewrites the file, flushing deferred removals
            session.directory().save_to_file()?;
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Menu stopped: {}", e);
            if let Err(save_error) = session.finish() {
                tracing::error!("Could not save pending changes: {}", save_error);
            }
            Err(e)
        }
    }
}

fn menu_loop<S: Store, P: Prompt>(session: &mut Session<S>, prompt: &mut P) -> Result<()> {
    loop {
        let command = match prompt.choice(&MENU_ITEMS)? {
            0 => {
                let (surname, name) = prompt_name(prompt)?;
                let phone = prompt.phone("Enter phone number")?;
                Command::Add {
                    surname,
                    name,
                    phone,
                }
            }
            1 => {
                let (surname, name) = prompt_name(prompt)?;
                let phone = prompt.phone("Enter phone number to remove")?;
                Command::RemoveNumber {
                    surname,
                    name,
                    phone,
                }
            }
            2 => {
                let (surname, name) = prompt_name(prompt)?;
                let phone = prompt.phone("Enter phone number to add")?;
                Command::AddNumber {
                    surname,
                    name,
                    phone,
                }
            }
            3 => {
                let (surname, name) = prompt_name(prompt)?;
                Command::Show { surname, name }
            }
            4 => {
                let (surname, name) = prompt_name(prompt)?;
                Command::Delete { surname, name }
            }
            5 => Command::List { json: false },
            _ => return Ok(()),
        };

        match session.execute(&command) {
            Ok(output) => println!("{}\n", output),
            Err(e) => {
                tracing::debug!("Command {:?} failed: {}", command, e);
                eprintln!("{}\n", e.user_friendly_message());
            }
        }
    }
}

fn prompt_name<P: Prompt>(prompt: &mut P) -> Result<(String, String)> {
    let surname = prompt.token("Enter surname", "surname")?;
    let name = prompt.token("Enter name", "name")?;
    Ok((surname, name))
}
