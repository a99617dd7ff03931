//! # Text Menu
//!
//! A keyed menu rendered as a starred banner plus `key:\tlabel` rows.
//!
//! The menu is pure presentation: it renders itself and matches a raw
//! selection against its keys. What a selection *means* is the caller's
//! business; the menu never reaches into the session.

use std::io::{self, BufRead, Write};

use fleamarket_core::{ValidationError, ValidationResult};

/// One selectable row.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    key: String,
    label: String,
    is_exit: bool,
}

impl MenuEntry {
    /// The key the user types to select this row.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// True when selecting this row leaves the menu's screen.
    pub fn is_exit(&self) -> bool {
        self.is_exit
    }
}

/// A titled, keyed menu.
#[derive(Debug, Clone)]
pub struct Menu {
    title: String,
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Starts building a menu with the given banner title.
    pub fn builder(title: &str) -> MenuBuilder {
        MenuBuilder {
            title: title.to_string(),
            entries: Vec::new(),
        }
    }

    /// Renders the banner and the entry rows.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("*** {} ***\n", self.title));
        for entry in &self.entries {
            out.push_str(&format!("{}:\t{}\n", entry.key, entry.label));
        }
        out
    }

    /// Matches a raw selection against the entry keys.
    pub fn select(&self, key: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Prints the menu and reads selections until one matches, re-prompting
    /// on anything else. Returns `None` on end of input.
    pub fn prompt(&self) -> Option<&MenuEntry> {
        print!("{}", self.render());
        loop {
            print!("? ");
            io::stdout().flush().ok();

            let mut line = String::new();
            match io::stdin().lock().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            match self.select(line.trim()) {
                Some(entry) => return Some(entry),
                None => println!("Invalid selection. Please, try again..."),
            }
        }
    }
}

/// Builder enforcing the menu invariants before a menu can exist.
#[derive(Debug)]
pub struct MenuBuilder {
    title: String,
    entries: Vec<MenuEntry>,
}

impl MenuBuilder {
    /// Adds a regular entry.
    pub fn entry(self, key: &str, label: &str) -> Self {
        self.push(key, label, false)
    }

    /// Adds an entry whose selection leaves the screen.
    pub fn exit_entry(self, key: &str, label: &str) -> Self {
        self.push(key, label, true)
    }

    fn push(mut self, key: &str, label: &str, is_exit: bool) -> Self {
        self.entries.push(MenuEntry {
            key: key.to_string(),
            label: label.to_string(),
            is_exit,
        });
        self
    }

    /// Validates and produces the menu.
    ///
    /// ## Invariants
    /// - keys are 1-10 characters from `[0-9A-Za-z_-]` and unique
    /// - labels are 1-1000 characters
    /// - at least one exit entry exists, so every screen can be left
    pub fn build(self) -> ValidationResult<Menu> {
        for entry in &self.entries {
            let key_len = entry.key.chars().count();
            if key_len == 0 || key_len > 10 {
                return Err(ValidationError::OutOfRange {
                    field: "menu key".to_string(),
                    min: 1,
                    max: 10,
                });
            }
            if !entry.key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
                return Err(ValidationError::InvalidFormat {
                    field: "menu key".to_string(),
                    reason: "only letters, digits, underscores and hyphens are allowed".to_string(),
                });
            }
            if entry.label.is_empty() || entry.label.chars().count() > 1000 {
                return Err(ValidationError::OutOfRange {
                    field: "menu label".to_string(),
                    min: 1,
                    max: 1000,
                });
            }
        }

        let mut keys: Vec<&str> = self.entries.iter().map(|e| e.key.as_str()).collect();
        keys.sort_unstable();
        if keys.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(ValidationError::InvalidFormat {
                field: "menu".to_string(),
                reason: "entry keys must be unique".to_string(),
            });
        }

        if !self.entries.iter().any(|entry| entry.is_exit) {
            return Err(ValidationError::Required {
                field: "menu exit entry".to_string(),
            });
        }

        Ok(Menu {
            title: self.title,
            entries: self.entries,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
