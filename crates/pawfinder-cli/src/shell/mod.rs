//! Interactive browsing shell.

mod command;
mod helper;

use std::collections::BTreeSet;

use anyhow::{Result, anyhow};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use pawfinder_application::{PageDirection, SearchOutcome};
use pawfinder_core::{Dog, DogId, Location, PawError};
use pawfinder_infrastructure::PawPaths;

use crate::app::{App, cached_locations};
use crate::render;
use command::{BreedEdit, ShellCommand};
use helper::ShellHelper;

/// Filters being edited; nothing is searched until `apply`.
#[derive(Debug, Default)]
struct Draft {
    breeds: BTreeSet<String>,
    age_min: Option<u32>,
    age_max: Option<u32>,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    app: App,
    draft: Draft,
}

impl Shell {
    pub fn new(app: App) -> Self {
        Self {
            app,
            draft: Draft::default(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut rl: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
        rl.set_helper(Some(ShellHelper::new()));

        let history = PawPaths::history_file().ok();
        if let Some(path) = &history {
            let _ = rl.load_history(path);
        }

        println!("{}", "=== Pawfinder ===".bright_magenta().bold());
        println!(
            "{}",
            "Type 'login EMAIL NAME' to start, 'help' for commands, or 'quit' to exit."
                .bright_black()
        );
        println!();

        loop {
            let prompt = match self.app.auth.current().await {
                Some(session) => format!("{}> ", session.name),
                None => ">> ".to_string(),
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    let command = match command::parse(trimmed) {
                        Ok(command) => command,
                        Err(message) => {
                            println!("{}", message.yellow());
                            continue;
                        }
                    };

                    let refresh_breeds = matches!(command, ShellCommand::Login { .. });
                    match self.execute(command).await {
                        Ok(Flow::Quit) => {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                        Ok(Flow::Continue) => {}
                        Err(e) => render::print_error(&e),
                    }

                    if refresh_breeds
                        && self.app.auth.is_authenticated().await
                        && let Ok(breeds) = self.app.search.breeds().await
                        && let Some(helper) = rl.helper_mut()
                    {
                        helper.set_breeds(breeds);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "CTRL-D detected. Exiting...".bright_green());
                    break;
                }
                Err(err) => {
                    eprintln!("{}", format!("Error: {:?}", err).red());
                    break;
                }
            }
        }

        if let Some(path) = &history {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = rl.save_history(path) {
                tracing::warn!("Failed to save history: {}", e);
            }
        }
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        let result = self.dispatch(command).await;
        if let Err(e) = &result
            && let Some(paw) = e.downcast_ref::<PawError>()
        {
            self.app.note_error(paw).await;
            if paw.is_not_authenticated() {
                println!("{}", "Session expired. Please log in again.".yellow());
            }
        }
        result
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Login { email, name } => {
                let session = self.app.auth.login(&name, &email).await?;
                println!("{}", format!("Welcome, {}!", session.name).bright_green());
                self.settled(self.app.search.resume().await?).await;
            }
            ShellCommand::Logout => {
                self.app.auth.logout().await?;
                self.app.search.suspend().await;
                println!("{}", "Logged out.".bright_green());
            }
            ShellCommand::Breeds(query) => {
                self.app.auth.require().await?;
                let breeds = match query {
                    Some(query) => self.app.search.breeds_matching(&query).await?,
                    None => self.app.search.breeds().await?,
                };
                for breed in &breeds {
                    let mark = if self.draft.breeds.contains(breed) { "*" } else { " " };
                    println!("{mark} {breed}");
                }
                println!("{}", format!("{} breeds", breeds.len()).bright_black());
            }
            ShellCommand::Breed(edit) => self.edit_breeds(edit).await?,
            ShellCommand::Age { min, max } => {
                self.draft.age_min = min;
                self.draft.age_max = max;
                self.print_draft();
            }
            ShellCommand::Zip(zip_codes) => {
                self.app.auth.require().await?;
                let outcome = self.app.search.restrict_zip_codes(zip_codes).await?;
                self.settled(outcome).await;
            }
            ShellCommand::Apply => {
                self.app.auth.require().await?;
                let outcome = self
                    .app
                    .search
                    .apply_filters(
                        self.draft.breeds.iter().cloned(),
                        self.draft.age_min,
                        self.draft.age_max,
                    )
                    .await?;
                self.settled(outcome).await;
            }
            ShellCommand::Reset => {
                self.app.auth.require().await?;
                self.draft = Draft::default();
                let outcome = self.app.search.reset_filters().await?;
                self.settled(outcome).await;
            }
            ShellCommand::Sort(order) => {
                self.app.auth.require().await?;
                let outcome = self
                    .app
                    .search
                    .change_sort_order(order.field, order.direction)
                    .await?;
                self.settled(outcome).await;
            }
            ShellCommand::Size(size) => {
                self.app.auth.require().await?;
                let outcome = self.app.search.change_page_size(size).await?;
                self.settled(outcome).await;
            }
            ShellCommand::Next => self.page(PageDirection::Next).await?,
            ShellCommand::Prev => self.page(PageDirection::Prev).await?,
            ShellCommand::Show => self.show().await,
            ShellCommand::Fav(target) => {
                let dog = self.dog_on_page(&target).await?;
                let name = dog.name.clone();
                if self.app.favorites.add(dog).await {
                    println!("{}", format!("♥ {} added to favorites", name).bright_green());
                    let favorites = self.app.favorites.snapshot().await;
                    self.app.matcher.prefetch_locations(&favorites);
                } else {
                    println!("{}", format!("{} is already a favorite", name).bright_black());
                }
            }
            ShellCommand::Unfav(target) => {
                let id = match self.dog_on_page(&target).await {
                    Ok(dog) => dog.id,
                    Err(_) => DogId::new(target),
                };
                if self.app.favorites.remove(&id).await {
                    println!("{}", format!("Removed {} from favorites", id).bright_green());
                } else {
                    println!("{}", format!("{} is not a favorite", id).yellow());
                }
            }
            ShellCommand::Favs => self.show_favorites().await,
            ShellCommand::Match => {
                self.app.auth.require().await?;
                let favorites = self.app.favorites.snapshot().await;
                let dog = self.app.matcher.find_match(&favorites).await?;
                let location = self.location_of(&dog.zip_code).await;
                println!("{}", "It's a match!".bright_magenta().bold());
                println!("{}", render::dog_line(1, &dog, true, location.as_ref()));
                println!("{}", dog.image_url.bright_black());
            }
            ShellCommand::Loc(zip) => {
                self.app.auth.require().await?;
                match self.location_of(&zip).await {
                    Some(location) => println!(
                        "{} {} ({}) {:.4}, {:.4}",
                        location.zip_code.bold(),
                        location.display_name(),
                        location.county,
                        location.latitude,
                        location.longitude
                    ),
                    None => println!("{}", format!("No location known for {zip}").yellow()),
                }
            }
            ShellCommand::Help => println!("{}", command::help_text()),
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn edit_breeds(&mut self, edit: BreedEdit) -> Result<()> {
        match edit {
            BreedEdit::Add(name) => {
                self.app.auth.require().await?;
                let known = self.app.search.breeds().await?;
                let Some(breed) = known.into_iter().find(|b| b.eq_ignore_ascii_case(&name)) else {
                    return Err(anyhow!("unknown breed '{name}', see 'breeds {name}'"));
                };
                self.draft.breeds.insert(breed);
            }
            BreedEdit::Remove(name) => {
                self.draft.breeds.retain(|b| !b.eq_ignore_ascii_case(&name));
            }
            BreedEdit::Clear => self.draft.breeds.clear(),
        }
        self.print_draft();
        Ok(())
    }

    async fn page(&self, direction: PageDirection) -> Result<()> {
        self.app.auth.require().await?;
        match self.app.search.change_page(direction).await? {
            SearchOutcome::Unchanged => {
                let edge = match direction {
                    PageDirection::Next => "Already on the last page.",
                    PageDirection::Prev => "Already on the first page.",
                };
                println!("{}", edge.bright_black());
            }
            outcome => self.settled(outcome).await,
        }
        Ok(())
    }

    async fn settled(&self, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::Committed(_) => self.show().await,
            SearchOutcome::Superseded => tracing::debug!("search superseded"),
            SearchOutcome::Unchanged => {}
        }
    }

    async fn show(&self) {
        let session = self.app.search.snapshot().await;
        let locations = cached_locations(&self.app.locations, session.resolved_dogs()).await;
        let favorites = self.app.favorites.snapshot().await;

        render::print_page(
            &session,
            |dog| favorites.contains(&dog.id),
            |dog| locations.get(&dog.zip_code).cloned(),
        );
    }

    async fn show_favorites(&self) {
        let favorites = self.app.favorites.snapshot().await;
        if favorites.is_empty() {
            println!("{}", "No favorites yet. Use 'fav N' on a page.".bright_black());
            return;
        }
        self.app.matcher.prefetch_locations(&favorites);
        let locations = cached_locations(&self.app.locations, favorites.iter()).await;
        for (i, dog) in favorites.iter().enumerate() {
            let location = locations.get(&dog.zip_code);
            println!("{}", render::dog_line(i + 1, dog, true, location));
        }
    }

    /// A dog on the current page, by 1-based position or by id.
    async fn dog_on_page(&self, target: &str) -> Result<Dog> {
        let session = self.app.search.snapshot().await;
        let dogs = session.resolved_dogs();
        let by_position = target
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| dogs.get(i));
        by_position
            .or_else(|| dogs.iter().find(|dog| dog.id.as_str() == target))
            .cloned()
            .ok_or_else(|| anyhow!("no dog '{target}' on the current page"))
    }

    async fn location_of(&self, zip_code: &str) -> Option<Location> {
        if let Err(e) = self.app.locations.ensure(&[zip_code.to_string()]).await {
            tracing::debug!("Location lookup failed: {}", e);
        }
        self.app.locations.get(zip_code).await
    }

    fn print_draft(&self) {
        let breeds = if self.draft.breeds.is_empty() {
            "any".to_string()
        } else {
            self.draft.breeds.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        let bound = |b: Option<u32>| b.map_or("-".to_string(), |v| v.to_string());
        println!(
            "{}",
            format!(
                "Draft: breeds {} | age {}..{} ('apply' to search)",
                breeds,
                bound(self.draft.age_min),
                bound(self.draft.age_max)
            )
            .bright_black()
        );
    }
}
