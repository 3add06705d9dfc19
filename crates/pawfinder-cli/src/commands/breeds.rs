use anyhow::Result;
use colored::Colorize;

use crate::app::App;

pub async fn run(app: &App, query: Option<&str>) -> Result<()> {
    let breeds = match query {
        Some(query) => app.search.breeds_matching(query).await?,
        None => app.search.breeds().await?,
    };
    for breed in &breeds {
        println!("{breed}");
    }
    eprintln!("{}", format!("{} breeds", breeds.len()).bright_black());
    Ok(())
}
