use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Select, Text};
use std::fs;
use std::path::PathBuf;

use crate::clipboard;
use crate::error::Error;
use crate::generator::{self, ClassSelection};
use crate::models::Credential;
use crate::store::Store;
use crate::strength;

#[derive(Parser)]
#[command(name = "passkeep")]
#[command(about = "Credential manager and password generator")]
#[command(version)]
pub struct Cli {
    /// Backing credential file (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a password and report its strength
    Generate {
        /// Password length
        #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(8..=32))]
        length: u32,

        /// Include uppercase letters
        #[arg(short, long)]
        uppercase: bool,

        /// Include numbers
        #[arg(short, long)]
        numbers: bool,

        /// Include special characters
        #[arg(short, long)]
        special: bool,

        /// Username to save the generated password under
        #[arg(long)]
        username: Option<String>,

        /// Website to save the generated password under
        #[arg(long)]
        website: Option<String>,

        /// Copy the generated password to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Add a credential entry
    Add,

    /// List all entries
    List,

    /// Search entries by username or website
    Search { query: String },

    /// Edit the entry at the given index
    Edit { index: usize },

    /// Remove the entry at the given index
    Remove { index: usize },

    /// Export all entries to a JSON file
    Export { path: PathBuf },

    /// Import entries from a JSON file, replacing the current collection
    Import { path: PathBuf },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut handler = CliHandler::new(cli.file)?;
    handler.dispatch(cli.command)
}

pub struct CliHandler {
    store: Store,
}

impl CliHandler {
    pub fn new(file: Option<PathBuf>) -> Result<Self> {
        let path = match file {
            Some(path) => path,
            None => Store::default_path()?,
        };
        Ok(Self {
            store: Store::open(path),
        })
    }

    pub fn dispatch(&mut self, command: Option<Commands>) -> Result<()> {
        match command {
            Some(Commands::Generate {
                length,
                uppercase,
                numbers,
                special,
                username,
                website,
                copy,
            }) => {
                let selection = ClassSelection {
                    uppercase,
                    numbers,
                    special,
                };
                self.handle_generate(length as usize, selection, username, website, copy)
            }
            Some(Commands::Add) => self.handle_add(),
            Some(Commands::List) => self.handle_list(),
            Some(Commands::Search { query }) => self.handle_search(&query),
            Some(Commands::Edit { index }) => self.handle_edit(index),
            Some(Commands::Remove { index }) => self.handle_remove(index),
            Some(Commands::Export { path }) => self.handle_export(&path),
            Some(Commands::Import { path }) => self.handle_import(&path),
            None => self.handle_interactive(),
        }
    }

    fn handle_generate(
        &mut self,
        length: usize,
        selection: ClassSelection,
        username: Option<String>,
        website: Option<String>,
        copy: bool,
    ) -> Result<()> {
        let password = generator::generate(length, &selection)?;
        let tier = strength::classify(&password);

        println!("Generated Password: {}", password);
        println!("Password Strength: {}", tier);

        match (username, website) {
            (Some(username), Some(website)) => {
                self.store
                    .append(Credential::new(username, website, password.clone()))?;
                println!("Entry saved.");
            }
            (None, None) => {}
            _ => {
                anyhow::bail!("Both --username and --website are required to save the entry");
            }
        }

        if copy {
            copy_to_clipboard(&password);
        }

        Ok(())
    }

    fn handle_add(&mut self) -> Result<()> {
        let username = Text::new("Username:").prompt()?;
        let website = Text::new("Website:").prompt()?;
        let password = Password::new("Password:")
            .with_display_toggle_enabled()
            .without_confirmation()
            .prompt()?;

        self.store
            .append(Credential::new(username, website, password))?;
        println!("Entry added.");

        Ok(())
    }

    fn handle_list(&mut self) -> Result<()> {
        let credentials = self.store.load_all()?;

        if credentials.is_empty() {
            println!("No saved entries.");
            return Ok(());
        }

        print_entries(credentials.iter().enumerate());
        Ok(())
    }

    fn handle_search(&mut self, query: &str) -> Result<()> {
        let matches = self.store.search(query)?;

        if matches.is_empty() {
            println!("No entries match your search.");
            return Ok(());
        }

        print_entries(matches.iter().map(|(i, c)| (*i, c)));
        Ok(())
    }

    fn handle_edit(&mut self, index: usize) -> Result<()> {
        let credentials = self.store.load_all()?;
        let current = credentials.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: credentials.len(),
        })?;

        let username = Text::new("Username:")
            .with_initial_value(&current.username)
            .prompt()?;
        let website = Text::new("Website:")
            .with_initial_value(&current.website)
            .prompt()?;
        let password = Text::new("Password:")
            .with_initial_value(&current.password)
            .prompt()?;

        self.store
            .replace_at(index, Credential::new(username, website, password))?;
        println!("Entry updated.");

        Ok(())
    }

    fn handle_remove(&mut self, index: usize) -> Result<()> {
        let credentials = self.store.load_all()?;
        let current = credentials.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: credentials.len(),
        })?;

        let confirmed = Confirm::new(&format!(
            "Remove entry '{}' ({})?",
            current.username, current.website
        ))
        .with_default(false)
        .prompt()?;

        if confirmed {
            self.store.delete_at(index)?;
            println!("Entry removed.");
        } else {
            println!("Operation cancelled.");
        }

        Ok(())
    }

    fn handle_export(&mut self, path: &PathBuf) -> Result<()> {
        let credentials = self.store.dump_all(path)?;
        println!(
            "Exported {} entries to {}",
            credentials.len(),
            path.display()
        );
        Ok(())
    }

    fn handle_import(&mut self, path: &PathBuf) -> Result<()> {
        let content = fs::read(path).map_err(Error::Io)?;
        let credentials: Vec<Credential> =
            serde_json::from_slice(&content).map_err(|source| Error::Corrupt {
                path: path.clone(),
                source,
            })?;

        self.store.replace_all(&credentials)?;
        println!("Imported {} entries.", credentials.len());
        Ok(())
    }

    fn handle_interactive(&mut self) -> Result<()> {
        loop {
            let options = vec![
                "Generate password",
                "Add entry",
                "List entries",
                "Search entries",
                "Edit entry",
                "Delete entry",
                "Export entries",
                "Import entries",
                "Exit",
            ];

            let selection = Select::new("What would you like to do?", options).prompt()?;

            match selection {
                "Generate password" => self.interactive_generate()?,
                "Add entry" => self.handle_add()?,
                "List entries" => self.handle_list()?,
                "Search entries" => {
                    let query = Text::new("Search query:").prompt()?;
                    self.handle_search(&query)?;
                }
                "Edit entry" => {
                    if let Some(index) = self.select_entry("Select entry to edit:")? {
                        self.handle_edit(index)?;
                    }
                }
                "Delete entry" => {
                    if let Some(index) = self.select_entry("Select entry to delete:")? {
                        self.handle_remove(index)?;
                    }
                }
                "Export entries" => {
                    let path = Text::new("Export to file:").prompt()?;
                    self.handle_export(&PathBuf::from(path))?;
                }
                "Import entries" => {
                    let path = Text::new("Import from file:").prompt()?;
                    self.handle_import(&PathBuf::from(path))?;
                }
                "Exit" => break,
                _ => unreachable!(),
            }
        }

        Ok(())
    }

    fn interactive_generate(&mut self) -> Result<()> {
        let length = Text::new("Password length:")
            .with_default("12")
            .prompt()?
            .parse::<usize>()
            .unwrap_or(12)
            .clamp(8, 32);

        let selection = ClassSelection {
            uppercase: Confirm::new("Include uppercase letters?")
                .with_default(true)
                .prompt()?,
            numbers: Confirm::new("Include numbers?")
                .with_default(true)
                .prompt()?,
            special: Confirm::new("Include special characters?")
                .with_default(true)
                .prompt()?,
        };

        let password = generator::generate(length, &selection)?;
        let tier = strength::classify(&password);
        println!("Generated Password: {}", password);
        println!("Password Strength: {}", tier);

        if Confirm::new("Copy to clipboard?")
            .with_default(false)
            .prompt()?
        {
            copy_to_clipboard(&password);
        }

        if Confirm::new("Save as an entry?")
            .with_default(false)
            .prompt()?
        {
            let username = Text::new("Username:").prompt()?;
            let website = Text::new("Website:").prompt()?;
            self.store
                .append(Credential::new(username, website, password))?;
            println!("Entry saved.");
        }

        Ok(())
    }

    // Entries may be exact duplicates, so the index goes into the label to
    // keep selections unambiguous.
    fn select_entry(&mut self, prompt: &str) -> Result<Option<usize>> {
        let credentials = self.store.load_all()?;
        if credentials.is_empty() {
            println!("No saved entries.");
            return Ok(None);
        }

        let options: Vec<String> = credentials
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {} ({})", i, c.username, c.website))
            .collect();

        let selection = Select::new(prompt, options.clone()).prompt()?;
        let index = options.iter().position(|o| *o == selection).unwrap();

        Ok(Some(index))
    }
}

fn copy_to_clipboard(password: &str) {
    match clipboard::copy(password) {
        Ok(()) => println!("Password copied to clipboard."),
        Err(e) => {
            tracing::error!("clipboard copy failed: {e:#}");
            eprintln!("Failed to copy to clipboard: {e:#}");
        }
    }
}

fn print_entries<'a>(entries: impl Iterator<Item = (usize, &'a Credential)>) {
    println!("{:-<60}", "");
    for (index, credential) in entries {
        println!("[{}] Username: {}", index, credential.username);
        println!("    Website:  {}", credential.website);
        println!("    Password: {}", credential.password);
        println!("{:-<60}", "");
    }
}
