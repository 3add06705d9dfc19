use anyhow::Result;
use colored::Colorize;

use pawfinder_core::DogId;

use crate::app::App;

/// Fetches the given dogs, favorites them all and asks for a match.
pub async fn run(app: &App, ids: Vec<String>) -> Result<()> {
    let ids: Vec<DogId> = ids.into_iter().map(DogId::new).collect();
    let dogs = if ids.is_empty() {
        Vec::new()
    } else {
        app.catalog.fetch_dogs(&ids).await?
    };
    for dog in dogs {
        app.favorites.add(dog).await;
    }

    let favorites = app.favorites.snapshot().await;
    let dog = app.matcher.find_match(&favorites).await?;
    println!("{}", "It's a match!".bright_magenta().bold());
    println!("{} ({}), {}", dog.name.bold(), dog.breed, dog.age_label());
    println!("{}", dog.image_url);
    Ok(())
}
