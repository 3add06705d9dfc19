use anyhow::{Result, bail};

use pawfinder_application::{PageDirection, SearchOutcome};
use pawfinder_core::search::FilterState;

use crate::app::{App, cached_locations};
use crate::render;

/// Filters and paging for a one-shot search. Sort and page size come from
/// the session the app was built with.
pub struct SearchArgs {
    pub breeds: Vec<String>,
    pub zip_codes: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub page: u32,
}

/// Runs the search, then follows `next` cursors up to the requested page.
pub async fn run(app: &App, args: SearchArgs) -> Result<()> {
    let search = &app.search;
    let sort = search.snapshot().await.intended_filters().sort;
    let filters = FilterState::new(args.breeds, args.age_min, args.age_max, sort)?
        .with_zip_codes(args.zip_codes);
    search.replace_filters(filters).await?;

    for _ in 1..args.page.max(1) {
        if search.change_page(PageDirection::Next).await? == SearchOutcome::Unchanged {
            bail!(
                "only {} page(s) available",
                search.snapshot().await.current_page()
            );
        }
    }

    let session = search.snapshot().await;
    let locations = cached_locations(&app.locations, session.resolved_dogs()).await;

    render::print_page(&session, |_| false, |dog| locations.get(&dog.zip_code).cloned());
    Ok(())
}
