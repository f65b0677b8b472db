use dashboard_core::{DashboardView, TemperatureSeries, chart::DATASET_LABEL};
use std::fmt::{self, Write};

use crate::charts::ChartBoard;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Text rendering of one dashboard frame.
pub fn dashboard(view: &DashboardView, charts: &ChartBoard) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, view, charts);
    out
}

fn write_dashboard(out: &mut impl Write, view: &DashboardView, charts: &ChartBoard) -> fmt::Result {
    writeln!(out, "=== Weather Dashboard ({}) ===", view.unit.suffix())?;

    if view.loading {
        return writeln!(out, "Loading...");
    }

    if view.cards.is_empty() {
        writeln!(out, "No cities yet.")?;
    }

    for card in &view.cards {
        writeln!(out)?;
        writeln!(out, "{}", card.name)?;
        writeln!(out, "  Feels like - {}", card.description)?;
        writeln!(out, "  Temp - {}", card.temperature)?;
        if let Some(chart) = charts.get(card.id) {
            writeln!(out, "  {DATASET_LABEL} {}", sparkline(chart.series()))?;
        }
        writeln!(out, "  Humidity - {}", card.humidity)?;
        writeln!(out, "  Wind Speed - {}", card.wind_speed)?;
    }

    if view.controls.visible {
        let prev = if view.controls.previous_disabled { " " } else { "<" };
        let next = if view.controls.next_disabled { " " } else { ">" };
        writeln!(out)?;
        writeln!(out, "[{prev}] page {}/{} [{next}]", view.current_page, view.page_count)?;
    }

    Ok(())
}

/// One block character per sample, scaled between the series' min and max.
pub fn sparkline(series: &TemperatureSeries) -> String {
    let (Some(min), Some(max)) = (series.min(), series.max()) else {
        return "(no data)".to_string();
    };
    let span = max - min;

    series
        .samples
        .iter()
        .map(|v| {
            if !v.is_finite() {
                return ' ';
            }
            let level = if span > 0.0 {
                ((v - min) / span * (BARS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{PageControls, TemperatureUnit};

    fn view() -> DashboardView {
        DashboardView {
            loading: false,
            search: String::new(),
            unit: TemperatureUnit::Celsius,
            toggle_label: "Fahrenheit",
            cards: Vec::new(),
            controls: PageControls {
                visible: false,
                previous_disabled: true,
                next_disabled: true,
            },
            current_page: 1,
            page_count: 0,
            total: 0,
        }
    }

    #[test]
    fn sparkline_spans_all_levels() {
        let series = TemperatureSeries {
            samples: (0..8).map(f64::from).collect(),
        };
        assert_eq!(sparkline(&series), "▁▂▃▄▅▆▇█");
    }

    #[test]
    fn sparkline_flat_and_empty() {
        let flat = TemperatureSeries {
            samples: vec![3.0; 4],
        };
        assert_eq!(sparkline(&flat), "▁▁▁▁");
        assert_eq!(sparkline(&TemperatureSeries::default()), "(no data)");
    }

    #[test]
    fn sparkline_leaves_gap_for_missing_hour() {
        let series = TemperatureSeries {
            samples: vec![0.0, f64::NAN, 7.0],
        };
        assert_eq!(sparkline(&series), "▁ █");
    }

    #[test]
    fn card_lists_every_reading() {
        let mut v = view();
        let mut list = dashboard_core::CityList::new();
        v.cards.push(dashboard_core::CardView {
            id: list.push(Default::default()),
            name: "London".into(),
            description: "light rain".into(),
            temperature: "12.00°C".into(),
            humidity: "72".into(),
            wind_speed: "4.6".into(),
        });

        let out = dashboard(&v, &ChartBoard::default());
        assert!(out.starts_with("=== Weather Dashboard (°C) ==="));
        assert!(out.contains("London\n  Feels like - light rain\n  Temp - 12.00°C\n"));
        assert!(out.contains("  Humidity - 72\n  Wind Speed - 4.6\n"));
        assert!(!out.contains("No cities yet."));
    }

    #[test]
    fn loading_hides_cards() {
        let mut v = view();
        v.loading = true;
        let out = dashboard(&v, &ChartBoard::default());
        assert!(out.contains("Loading..."));
        assert!(!out.contains("No cities yet."));
    }

    #[test]
    fn pagination_shown_only_when_visible() {
        let mut v = view();
        assert!(!dashboard(&v, &ChartBoard::default()).contains("page"));

        v.controls = PageControls {
            visible: true,
            previous_disabled: true,
            next_disabled: false,
        };
        v.page_count = 3;
        let out = dashboard(&v, &ChartBoard::default());
        assert!(out.contains("[ ] page 1/3 [>]"));
    }
}
