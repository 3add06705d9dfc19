//! Terminal output helpers.

use colored::Colorize;

use pawfinder_application::{SearchSession, SearchStatus};
use pawfinder_core::search::PaginationInfo;
use pawfinder_core::{Dog, Location};

pub fn dog_line(index: usize, dog: &Dog, favorite: bool, location: Option<&Location>) -> String {
    let marker = if favorite { "♥".red().to_string() } else { " ".to_string() };
    let place = location
        .map(Location::display_name)
        .unwrap_or_else(|| dog.zip_code.clone());
    format!(
        "{marker} {:>3}. {} {} {} {}",
        index,
        dog.name.bold(),
        format!("({})", dog.breed).bright_cyan(),
        dog.age_label(),
        format!("- {place} [{}]", dog.id).bright_black(),
    )
}

pub fn pagination_line(info: &PaginationInfo) -> String {
    let mut line = format!(
        "Page {} of {} ({} dogs)",
        info.current_page, info.total_pages, info.total_results
    );
    let mut moves = Vec::new();
    if info.has_prev {
        moves.push("prev");
    }
    if info.has_next {
        moves.push("next");
    }
    if !moves.is_empty() {
        line.push_str(&format!(" | {}", moves.join(", ")));
    }
    line
}

/// Prints the page held by `session`. `is_favorite` and `location` decorate
/// each dog.
pub fn print_page<F, L>(session: &SearchSession, is_favorite: F, location: L)
where
    F: Fn(&Dog) -> bool,
    L: Fn(&Dog) -> Option<Location>,
{
    if let SearchStatus::Failed { message } = session.status() {
        println!("{}", message.red());
    }

    let Some(info) = session.pagination() else {
        if !session.has_searched_once() {
            println!("{}", "No search yet. Type 'apply' to start browsing.".bright_black());
        }
        return;
    };

    println!(
        "{}",
        format!(
            "Sort: {} | {} per page",
            session.sort_order().label(),
            session.page_size()
        )
        .bright_black()
    );
    if session.resolved_dogs().is_empty() {
        println!("{}", "No dogs match these filters.".yellow());
    }
    for (i, dog) in session.resolved_dogs().iter().enumerate() {
        println!("{}", dog_line(i + 1, dog, is_favorite(dog), location(dog).as_ref()));
    }
    println!("{}", pagination_line(&info).bright_magenta());
}

pub fn print_error(error: &anyhow::Error) {
    eprintln!("{}", format!("Error: {}", error).red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawfinder_core::search::PageResult;

    #[test]
    fn pagination_line_lists_available_moves() {
        let result = PageResult {
            result_ids: Vec::new(),
            total_matches: 100,
            next_cursor: Some("from=24".to_string()),
            prev_cursor: None,
        };
        let line = pagination_line(&PaginationInfo::derive(&result, 24, 1));
        assert_eq!(line, "Page 1 of 5 (100 dogs) | next");
    }

    #[test]
    fn dog_line_prefers_location_name() {
        colored::control::set_override(false);
        let dog = Dog {
            id: "d1".into(),
            name: "Rex".to_string(),
            breed: "Akita".to_string(),
            age_years: 1,
            zip_code: "10001".to_string(),
            image_url: String::new(),
        };
        let location = Location {
            zip_code: "10001".to_string(),
            latitude: 40.7,
            longitude: -74.0,
            city: "New York".to_string(),
            state: "NY".to_string(),
            county: "New York".to_string(),
        };

        let line = dog_line(3, &dog, false, Some(&location));
        assert!(line.contains("Rex (Akita) 1 year - New York, NY [d1]"));
        assert!(dog_line(3, &dog, false, None).contains("- 10001 [d1]"));
    }
}
