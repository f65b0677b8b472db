use anyhow::Result;
use dashboard_core::{Dashboard, DashboardView, WeatherProvider};
use inquire::{InquireError, Select, Text};
use std::{fmt, path::PathBuf};
use tracing::warn;

use crate::{charts::ChartBoard, render};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    AddCity,
    ToggleUnit(&'static str),
    DeleteCity,
    PreviousPage,
    NextPage,
    SaveCharts,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddCity => f.write_str("Add City"),
            Action::ToggleUnit(label) => write!(f, "Toggle {label}"),
            Action::DeleteCity => f.write_str("Delete"),
            Action::PreviousPage => f.write_str("<  previous page"),
            Action::NextPage => f.write_str(">  next page"),
            Action::SaveCharts => f.write_str("Save charts"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

/// Menu entries that make sense for the current frame.
fn actions(view: &DashboardView, can_save: bool) -> Vec<Action> {
    let mut out = vec![Action::AddCity, Action::ToggleUnit(view.toggle_label)];
    if !view.cards.is_empty() {
        out.push(Action::DeleteCity);
    }
    if view.controls.visible && !view.controls.previous_disabled {
        out.push(Action::PreviousPage);
    }
    if view.controls.visible && !view.controls.next_disabled {
        out.push(Action::NextPage);
    }
    if can_save && !view.cards.is_empty() {
        out.push(Action::SaveCharts);
    }
    out.push(Action::Quit);
    out
}

/// `None` when the user backed out of the prompt.
fn cancelled<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub async fn run<P: WeatherProvider>(
    mut dashboard: Dashboard<P>,
    chart_dir: Option<PathBuf>,
) -> Result<()> {
    let mut charts = ChartBoard::default();

    loop {
        charts.sync(&dashboard).await;
        let view = dashboard.view();
        println!("{}", render::dashboard(&view, &charts));

        let choice = Select::new("Action:", actions(&view, chart_dir.is_some())).prompt();
        let Some(action) = cancelled(choice)? else {
            break;
        };

        match action {
            Action::AddCity => {
                let Some(name) =
                    cancelled(Text::new("City:").with_placeholder("Enter City Name").prompt())?
                else {
                    continue;
                };
                dashboard.set_search(name.trim());
                println!("Loading...");
                dashboard.add_city().await;
            }
            Action::ToggleUnit(_) => {
                dashboard.toggle_unit();
            }
            Action::DeleteCity => {
                let names: Vec<String> = view.cards.iter().map(|c| c.name.clone()).collect();
                if let Some(name) = cancelled(Select::new("Delete which city?", names).prompt())? {
                    dashboard.delete_city(&name);
                }
            }
            Action::PreviousPage => dashboard.previous_page(),
            Action::NextPage => dashboard.next_page(),
            Action::SaveCharts => {
                if let Some(dir) = &chart_dir {
                    match charts.write_svgs(&dashboard, dir) {
                        Ok(paths) => {
                            for path in paths {
                                println!("Saved chart {}", path.display());
                            }
                        }
                        Err(err) => warn!(error = %err, "failed to save charts"),
                    }
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{CardView, PageControls, RecordId, TemperatureUnit};

    fn view(cards: usize, controls: PageControls) -> DashboardView {
        let mut list = dashboard_core::CityList::new();
        let cards = (0..cards)
            .map(|i| {
                let id: RecordId = list.push(Default::default());
                CardView {
                    id,
                    name: format!("City {i}"),
                    description: "clear sky".into(),
                    temperature: "10.00°C".into(),
                    humidity: "50".into(),
                    wind_speed: "1".into(),
                }
            })
            .collect();
        DashboardView {
            loading: false,
            search: String::new(),
            unit: TemperatureUnit::Celsius,
            toggle_label: "Fahrenheit",
            cards,
            controls,
            current_page: 1,
            page_count: 1,
            total: 0,
        }
    }

    #[test]
    fn empty_dashboard_offers_add_toggle_quit() {
        let hidden = PageControls {
            visible: false,
            previous_disabled: true,
            next_disabled: true,
        };
        assert_eq!(
            actions(&view(0, hidden), true),
            vec![Action::AddCity, Action::ToggleUnit("Fahrenheit"), Action::Quit]
        );
    }

    #[test]
    fn paging_actions_follow_controls() {
        let first_page = PageControls {
            visible: true,
            previous_disabled: true,
            next_disabled: false,
        };
        let acts = actions(&view(3, first_page), false);
        assert!(acts.contains(&Action::DeleteCity));
        assert!(acts.contains(&Action::NextPage));
        assert!(!acts.contains(&Action::PreviousPage));
        assert!(!acts.contains(&Action::SaveCharts));
    }

    #[test]
    fn toggle_label_names_target_unit() {
        assert_eq!(Action::ToggleUnit("Celsius").to_string(), "Toggle Celsius");
    }

    #[test]
    fn cancel_maps_to_none() {
        let r: Result<Option<u8>> = cancelled(Err(InquireError::OperationCanceled));
        assert!(r.unwrap().is_none());
    }
}
