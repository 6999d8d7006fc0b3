use std::fmt;

use inquire::{Confirm, InquireError, Select, Text};
use weatherdash_core::{
    CITIES, ChartView, Config, DashboardView, DetailView, FilterState, ForecastDay, ForecastSource,
};

use crate::{cli::remember_city, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    OpenDay,
    Search,
    MinTemp,
    ClearFilters,
    ChangeCity,
    Trend,
    Comparison,
    Quit,
}

impl Action {
    const ALL: [Action; 8] = [
        Action::OpenDay,
        Action::Search,
        Action::MinTemp,
        Action::ClearFilters,
        Action::ChangeCity,
        Action::Trend,
        Action::Comparison,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::OpenDay => "Open a day",
            Action::Search => "Search",
            Action::MinTemp => "Set min temp",
            Action::ClearFilters => "Clear filters",
            Action::ChangeCity => "Change city",
            Action::Trend => "Temp trend",
            Action::Comparison => "Temp comparison",
            Action::Quit => "Quit",
        })
    }
}

/// A forecast card as a prompt option.
struct Card<'a>(&'a ForecastDay);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.0;
        write!(
            f,
            "{} {} – {}, {}°C",
            day.weekday().unwrap_or_default(),
            day.datetime,
            day.weather.description,
            day.temp
        )
    }
}

/// `Ok(None)` when the user backed out of a prompt.
fn optional<T>(res: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Prompt loop over the dashboard. Filters are applied to the forecast
/// already in memory; only a city change fetches again.
pub async fn run(config: &mut Config, source: &dyn ForecastSource) -> anyhow::Result<()> {
    let mut view = DashboardView::load(source, config.selected_city(), FilterState::default()).await;

    loop {
        print!("{}", render::dashboard(&view));
        println!();

        let Some(action) = optional(Select::new("What next?", Action::ALL.to_vec()).prompt())?
        else {
            break;
        };

        match action {
            Action::Quit => break,
            Action::OpenDay => {
                let filtered = view.filtered();
                if filtered.is_empty() {
                    println!("No forecast cards to open.");
                    continue;
                }

                let cards: Vec<Card<'_>> = filtered.into_iter().map(Card).collect();
                let Some(card) = optional(Select::new("Day:", cards).prompt())? else {
                    continue;
                };
                let day = card.0.clone();

                let hourly = optional(
                    Confirm::new("Fetch the hourly breakdown?").with_default(false).prompt(),
                )?
                .unwrap_or(false);

                let detail = DetailView::load(source, day, &view.city, hourly).await;
                println!();
                print!("{}", render::detail(&detail));
                println!();
            }
            Action::Search => {
                let search =
                    optional(Text::new("Search:").with_initial_value(&view.filter.search).prompt())?;
                if let Some(search) = search {
                    view.filter.search = search;
                }
            }
            Action::MinTemp => {
                let current = view.filter.min_temp.map(|t| t.to_string()).unwrap_or_default();
                let Some(text) = optional(
                    Text::new("Min temp:")
                        .with_initial_value(&current)
                        .with_help_message("blank to clear")
                        .prompt(),
                )?
                else {
                    continue;
                };

                match FilterState::parse_min_temp(&text) {
                    Ok(min) => view.filter.min_temp = min,
                    Err(err) => println!("error: {err}"),
                }
            }
            Action::ClearFilters => view.filter = FilterState::default(),
            Action::ChangeCity => {
                let start = CITIES.iter().position(|c| *c == view.city).unwrap_or(0);
                let Some(city) = optional(
                    Select::new("City:", CITIES.to_vec()).with_starting_cursor(start).prompt(),
                )?
                else {
                    continue;
                };

                remember_city(config, city)?;
                view = DashboardView::load(source, city, FilterState::default()).await;
            }
            Action::Trend => {
                let chart = ChartView::trend(source, &view.city).await;
                print!("{}", render::chart(&chart));
                println!();
            }
            Action::Comparison => {
                let chart = ChartView::comparison(source, &view.city).await;
                print!("{}", render::chart(&chart));
                println!();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_label_includes_weekday_and_temp() {
        let day = ForecastDay::new("2024-05-03", 25.0, "Clear sky");
        assert_eq!(Card(&day).to_string(), "Friday 2024-05-03 – Clear sky, 25°C");
    }

    #[test]
    fn canceled_prompt_is_none() {
        let res: Result<u8, InquireError> = Err(InquireError::OperationCanceled);
        assert!(optional(res).unwrap().is_none());
    }

    #[test]
    fn every_action_has_a_label() {
        for action in Action::ALL {
            assert!(!action.to_string().is_empty());
        }
    }
}
