//! # Application Screens
//!
//! The sign-in screen and the market screen, driving the session layer with
//! raw user input.
//!
//! ## Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Screen Flow                                     │
//! │                                                                         │
//! │  *** SIGN IN ***                                                       │
//! │   1 Login ────────► Session::login + fetch_all ──► *** FLEA MARKET *** │
//! │   2 Register ─────► register()                      1 Add item         │
//! │   0 Exit                                            2 Remove item      │
//! │                                                     3 Edit item        │
//! │        ▲                                            4 Sort by price    │
//! │        │     connectivity error                     5 Sort by condition│
//! │        └────────────────────────────────────────    6 Sort by brand    │
//! │                                                     0 Logout           │
//! │                                                                         │
//! │  Validation errors re-prompt in place; connectivity errors abort the   │
//! │  market screen back to sign-in.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use tracing::debug;

use fleamarket_client::{
    register, ClientError, ClientResult, Credentials, Registration, RemoteStore, Session,
};
use fleamarket_core::{
    Brand, Category, Condition, Description, Email, Item, Name, Password, Price, Username,
    ValidationResult,
};

use crate::menu::Menu;

const CONNECTION_FAILED: &str = "Failed to connect to the server! Try later!";

/// Reads one trimmed line, `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Prompts until `parse` accepts the input, printing the validation message
/// on each refusal. `None` on end of input.
fn read_field<T>(label: &str, parse: impl Fn(&str) -> ValidationResult<T>) -> Option<T> {
    loop {
        let raw = read_line(&format!("{label}: "))?;
        match parse(&raw) {
            Ok(value) => return Some(value),
            Err(err) => println!("{err}. Please, try again..."),
        }
    }
}

/// Prompts for a 1-based listing position, `Ok(None)` meaning "cancel" (0).
fn read_position(label: &str) -> Option<Option<usize>> {
    loop {
        let raw = read_line(&format!("{label} (0 to cancel): "))?;
        match raw.parse::<usize>() {
            Ok(0) => return Some(None),
            Ok(position) => return Some(Some(position - 1)),
            Err(_) => println!("Please enter a number."),
        }
    }
}

/// Prompts for the six item fields. `None` on end of input.
fn read_item() -> Option<Item> {
    let name = read_field("Name", Name::parse)?;
    let description = read_field("Description", Description::parse)?;
    let condition = read_field(
        "Condition (0 AS_NEW, 1 GOOD_CONDITION, 2 ACCEPTABLE_CONDITION)",
        Condition::parse,
    )?;
    let brand = read_field("Brand", Brand::parse)?;
    let price = read_field("Price", Price::parse)?;
    let category = read_field("Category", Category::parse)?;

    Some(Item::new(name, description, condition, brand, price, category))
}

/// The text-menu application.
pub struct App<S: RemoteStore + Clone> {
    store: S,
    sign_in_menu: Menu,
    market_menu: Menu,
}

/// What a market-screen operation decided about the session.
enum Flow {
    Continue,
    Logout,
    Abort,
}

impl<S: RemoteStore + Clone> App<S> {
    /// Wires the application around a remote store.
    pub fn new(store: S) -> ClientResult<Self> {
        let sign_in_menu = Menu::builder("SIGN IN")
            .entry("1", "Login")
            .entry("2", "Register")
            .exit_entry("0", "Exit")
            .build()?;

        let market_menu = Menu::builder("FLEA MARKET")
            .entry("1", "Add item")
            .entry("2", "Remove item")
            .entry("3", "Edit item")
            .entry("4", "Sort by price")
            .entry("5", "Sort by condition")
            .entry("6", "Sort by brand")
            .exit_entry("0", "Logout")
            .build()?;

        Ok(App {
            store,
            sign_in_menu,
            market_menu,
        })
    }

    /// Runs the sign-in loop until the user exits.
    pub async fn run(&self) -> ClientResult<()> {
        loop {
            let Some(entry) = self.sign_in_menu.prompt() else {
                return Ok(());
            };

            match entry.key() {
                "1" => {
                    if let Some(session) = self.sign_in().await? {
                        self.market_loop(session).await?;
                    }
                }
                "2" => self.register_account().await?,
                _ => {
                    println!("Exited!");
                    return Ok(());
                }
            }
        }
    }

    /// Collects credentials, opens a session and performs the initial fetch.
    ///
    /// Returns `Ok(None)` when the user should stay on the sign-in screen
    /// (refused credentials, unreachable server, end of input).
    async fn sign_in(&self) -> ClientResult<Option<Session<S>>> {
        let Some(username) = read_field("Username", Username::parse) else {
            return Ok(None);
        };
        let Some(password) = read_field("Password", Password::parse) else {
            return Ok(None);
        };

        let credentials = Credentials { username, password };
        let mut session = match Session::login(self.store.clone(), &credentials).await {
            Ok(session) => session,
            Err(ClientError::InvalidCredentials) => {
                println!("This user does not exist!");
                return Ok(None);
            }
            Err(err) if err.is_connectivity() => {
                println!("{CONNECTION_FAILED}");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        println!("login successfully");

        match session.fetch_all().await {
            Ok(count) => debug!(count, "initial fetch complete"),
            Err(err) if err.is_connectivity() => {
                println!("{CONNECTION_FAILED}");
                return Ok(None);
            }
            Err(ClientError::Rejected { status, .. }) => {
                debug!(status, "server refused the item list");
                println!("{CONNECTION_FAILED}");
                return Ok(None);
            }
            Err(ClientError::Contract(reason)) => {
                debug!(%reason, "initial fetch returned malformed records");
                println!("Continuing with an empty list of items...");
            }
            Err(err) => return Err(err),
        }

        Ok(Some(session))
    }

    /// Collects the registration form and submits it.
    async fn register_account(&self) -> ClientResult<()> {
        let Some(username) = read_field("Username", Username::parse) else {
            return Ok(());
        };
        let Some(email) = read_field("E-mail", Email::parse) else {
            return Ok(());
        };
        let Some(password) = read_field("Password", Password::parse) else {
            return Ok(());
        };

        let registration = Registration {
            username,
            email,
            password,
        };

        match register(&self.store, &registration).await {
            Ok(()) => println!("Registration completed!"),
            Err(ClientError::Rejected { errors, .. }) => {
                println!("This user already exists!");
                for (field, message) in errors.messages() {
                    println!("  {field}: {message}");
                }
            }
            Err(err) if err.is_connectivity() => println!("{CONNECTION_FAILED}"),
            Err(err) => return Err(err),
        }

        Ok(())
    }

    /// Runs the market screen until logout or a connectivity abort.
    async fn market_loop(&self, mut session: Session<S>) -> ClientResult<()> {
        loop {
            print_items(&session);
            let Some(entry) = self.market_menu.prompt() else {
                session.logout();
                return Ok(());
            };

            let outcome = match entry.key() {
                "1" => self.add_item(&mut session).await,
                "2" => self.remove_item(&mut session).await,
                "3" => self.edit_item(&mut session).await,
                "4" => {
                    session.sort_by_price();
                    Ok(Flow::Continue)
                }
                "5" => {
                    session.sort_by_condition();
                    Ok(Flow::Continue)
                }
                "6" => {
                    session.sort_by_brand();
                    Ok(Flow::Continue)
                }
                _ => Ok(Flow::Logout),
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Logout) => {
                    session.logout();
                    println!("Bye!");
                    return Ok(());
                }
                Ok(Flow::Abort) => {
                    session.logout();
                    return Ok(());
                }
                Err(err) if err.is_connectivity() => {
                    println!("{CONNECTION_FAILED}");
                    session.logout();
                    return Ok(());
                }
                Err(err) if err.is_recoverable() => println!("{err}"),
                Err(err) => return Err(err),
            }
        }
    }

    async fn add_item(&self, session: &mut Session<S>) -> ClientResult<Flow> {
        let Some(item) = read_item() else {
            return Ok(Flow::Abort);
        };

        session.add(item).await?;
        println!("Item added!");
        Ok(Flow::Continue)
    }

    async fn remove_item(&self, session: &mut Session<S>) -> ClientResult<Flow> {
        let Some(position) = read_position("Index of the item to remove") else {
            return Ok(Flow::Abort);
        };
        let Some(index) = position else {
            println!("Operation cancelled!");
            return Ok(Flow::Continue);
        };

        session.remove(index).await?;
        println!("Item removed!");
        Ok(Flow::Continue)
    }

    async fn edit_item(&self, session: &mut Session<S>) -> ClientResult<Flow> {
        let Some(position) = read_position("Index of the item to edit") else {
            return Ok(Flow::Abort);
        };
        let Some(index) = position else {
            println!("Operation cancelled!");
            return Ok(Flow::Continue);
        };

        // Surface a bad index before asking for six replacement fields.
        session.item(index)?;

        let Some(new_item) = read_item() else {
            return Ok(Flow::Abort);
        };

        session.edit(index, new_item).await?;
        println!("Item edited!");
        Ok(Flow::Continue)
    }
}

/// Prints the listing as aligned columns plus the total price.
fn print_items<S: RemoteStore>(session: &Session<S>) {
    if session.is_empty() {
        println!("\nNo items in the listing.\n");
        return;
    }

    println!();
    println!(
        "{:<5} {:<30} {:<20} {:<22} {:>14} {:<30} {}",
        "#", "NAME", "BRAND", "CONDITION", "PRICE", "CATEGORY", "DESCRIPTION"
    );
    for (position, item) in session.iter().enumerate() {
        println!(
            "{:<5} {:<30} {:<20} {:<22} {:>14} {:<30} {}",
            position + 1,
            item.name,
            item.brand,
            item.condition.label(),
            item.price.to_string(),
            item.category,
            item.description
        );
    }

    let total = session
        .iter()
        .try_fold(Price::zero(), |sum, item| sum.add(item.price));
    if let Ok(total) = total {
        println!("{:>94}", format!("Total: {total}"));
    }
    println!();
}
