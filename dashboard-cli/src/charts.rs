use anyhow::{Context, Result};
use dashboard_core::{Dashboard, HistoryChart, RecordId, SvgCanvas, WeatherProvider};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

/// History charts for the cards on the current page, one per record.
#[derive(Default)]
pub struct ChartBoard {
    charts: HashMap<RecordId, HistoryChart<SvgCanvas>>,
}

impl ChartBoard {
    /// Mount charts for newly visible cards and drop charts for cards that
    /// left the page. Dropping a chart destroys its instance.
    pub async fn sync<P: WeatherProvider>(&mut self, dashboard: &Dashboard<P>) {
        let visible = dashboard.current_page_entries();

        self.charts.retain(|id, _| visible.iter().any(|entry| entry.id == *id));

        for entry in visible {
            let chart = self
                .charts
                .entry(entry.id)
                .or_insert_with(|| HistoryChart::new(SvgCanvas::new()));
            chart.sync(dashboard.provider(), entry.id, &entry.record).await;
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&HistoryChart<SvgCanvas>> {
        self.charts.get(&id)
    }

    /// Write the live chart of each visible card to `dir/<city>.svg`.
    /// A repeated city name gets a `-2`, `-3`, ... suffix.
    pub fn write_svgs<P: WeatherProvider>(
        &self,
        dashboard: &Dashboard<P>,
        dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create chart directory: {}", dir.display()))?;

        let mut used = HashSet::new();
        let mut written = Vec::new();
        for entry in dashboard.current_page_entries() {
            let Some(svg) = self.get(entry.id).and_then(|c| c.canvas().svg()) else {
                continue;
            };
            let stem = unique_stem(&file_stem(&entry.record.name), &mut used);
            let path = dir.join(format!("{stem}.svg"));
            fs::write(&path, svg)
                .with_context(|| format!("Failed to write chart: {}", path.display()))?;
            written.push(path);
        }
        Ok(written)
    }
}

fn unique_stem(stem: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = stem.to_string();
    let mut n = 1;
    while !used.insert(candidate.clone()) {
        n += 1;
        candidate = format!("{stem}-{n}");
    }
    candidate
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() { "city".to_string() } else { stem }
}
