//! 24-hour temperature history chart attached to one dashboard card.
//!
//! A [`HistoryChart`] owns its canvas and at most one live chart instance.
//! Every series change destroys the previous instance before the next one is
//! created, and dropping the chart destroys whatever is still live.

use plotters::prelude::*;
use tracing::{debug, error, warn};

use crate::{
    model::{Coordinates, SERIES_LEN, TemperatureSeries, WeatherRecord},
    provider::WeatherProvider,
    store::RecordId,
};

pub const CHART_WIDTH: u32 = 200;
pub const CHART_HEIGHT: u32 = 150;
pub const DATASET_LABEL: &str = "Temperature (°C)";
const LINE_COLOR: RGBColor = RGBColor(75, 192, 192);

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Everything needed to draw one line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub dataset_label: &'static str,
    pub width: u32,
    pub height: u32,
    pub y_begins_at_zero: bool,
}

impl ChartSpec {
    pub fn for_series(series: &TemperatureSeries) -> Self {
        Self {
            labels: hour_labels(),
            data: series.samples.clone(),
            dataset_label: DATASET_LABEL,
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            y_begins_at_zero: true,
        }
    }

    /// Labeled points; a label without a sample pairs with `None`.
    pub fn points(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), self.data.get(i).copied()))
    }

    fn y_range(&self) -> (f64, f64) {
        let finite = || self.data.iter().copied().filter(|v| v.is_finite());
        let mut lo = finite().fold(f64::INFINITY, f64::min);
        let mut hi = finite().fold(f64::NEG_INFINITY, f64::max);
        if self.y_begins_at_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return (0.0, 1.0);
        }
        if (hi - lo).abs() < f64::EPSILON {
            hi = lo + 1.0;
        }
        (lo, hi)
    }
}

/// "23h ago" .. "0h ago", oldest first to match sample order.
pub fn hour_labels() -> Vec<String> {
    (0..SERIES_LEN).rev().map(|n| format!("{n}h ago")).collect()
}

/// A drawing surface that charts are created on and destroyed from.
pub trait ChartCanvas {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> Result<Self::Handle, ChartError>;

    fn destroy(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgChartHandle(u64);

/// In-memory SVG canvas backed by plotters.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    next_handle: u64,
    live: Option<(SvgChartHandle, String)>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the live chart, if any.
    pub fn svg(&self) -> Option<&str> {
        self.live.as_ref().map(|(_, svg)| svg.as_str())
    }
}

impl ChartCanvas for SvgCanvas {
    type Handle = SvgChartHandle;

    fn create(&mut self, spec: &ChartSpec) -> Result<SvgChartHandle, ChartError> {
        let svg = render_svg(spec)?;
        let handle = SvgChartHandle(self.next_handle);
        self.next_handle += 1;
        self.live = Some((handle, svg));
        Ok(handle)
    }

    fn destroy(&mut self, handle: SvgChartHandle) {
        if self.live.as_ref().is_some_and(|(h, _)| *h == handle) {
            self.live = None;
        }
    }
}

fn render_svg(spec: &ChartSpec) -> Result<String, ChartError> {
    let plot_err = |e: &dyn std::fmt::Display| ChartError::Render(e.to_string());

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| plot_err(&e))?;

        let (y_min, y_max) = spec.y_range();
        let x_max = spec.labels.len().saturating_sub(1).max(1);

        let mut chart = ChartBuilder::on(&root)
            .margin(4)
            .x_label_area_size(18)
            .y_label_area_size(28)
            .build_cartesian_2d(0..x_max, y_min..y_max)
            .map_err(|e| plot_err(&e))?;

        let labels = &spec.labels;
        chart
            .configure_mesh()
            .x_labels(4)
            .y_labels(5)
            .x_label_formatter(&|x| labels.get(*x).cloned().unwrap_or_default())
            .label_style(("sans-serif", 8))
            .draw()
            .map_err(|e| plot_err(&e))?;

        chart
            .draw_series(LineSeries::new(
                spec.data
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite()),
                LINE_COLOR.stroke_width(2),
            ))
            .map_err(|e| plot_err(&e))?
            .label(spec.dataset_label);

        root.present().map_err(|e| plot_err(&e))?;
    }
    Ok(svg)
}

/// History chart for one card.
pub struct HistoryChart<C: ChartCanvas> {
    canvas: C,
    source: Option<RecordId>,
    series: TemperatureSeries,
    instance: Option<C::Handle>,
}

impl<C: ChartCanvas> HistoryChart<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            source: None,
            series: TemperatureSeries::default(),
            instance: None,
        }
    }

    pub fn source(&self) -> Option<RecordId> {
        self.source
    }

    pub fn series(&self) -> &TemperatureSeries {
        &self.series
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn is_live(&self) -> bool {
        self.instance.is_some()
    }

    /// Point the chart at a new record. Draws an empty chart and returns the
    /// coordinates to fetch history for, or `None` when nothing changed.
    pub fn begin(&mut self, id: RecordId, record: &WeatherRecord) -> Option<Option<Coordinates>> {
        if self.source == Some(id) {
            return None;
        }
        self.source = Some(id);
        self.set_series(TemperatureSeries::default());
        Some(record.coord)
    }

    /// Install a fetched series. Results for a record the chart no longer
    /// shows are dropped and `false` is returned.
    pub fn apply(&mut self, id: RecordId, series: TemperatureSeries) -> bool {
        if self.source != Some(id) {
            debug!(%id, "discarding history for a record no longer shown");
            return false;
        }
        self.set_series(series);
        true
    }

    /// Refetch and redraw if `record` differs from the one currently shown.
    /// Fetch failures are logged and leave the series empty.
    pub async fn sync<P>(&mut self, provider: &P, id: RecordId, record: &WeatherRecord)
    where
        P: WeatherProvider + ?Sized,
    {
        let Some(coord) = self.begin(id, record) else {
            return;
        };

        let Some(coord) = coord else {
            warn!(name = %record.name, "record has no coordinates; history left empty");
            return;
        };

        match provider.fetch_historical_series(coord).await {
            Ok(series) => {
                self.apply(id, series);
            }
            Err(err) => {
                error!(name = %record.name, error = %err, "error fetching historical weather data");
            }
        }
    }

    fn set_series(&mut self, series: TemperatureSeries) {
        self.series = series;

        if let Some(previous) = self.instance.take() {
            self.canvas.destroy(previous);
        }

        match self.canvas.create(&ChartSpec::for_series(&self.series)) {
            Ok(handle) => self.instance = Some(handle),
            Err(err) => error!(error = %err, "failed to draw history chart"),
        }
    }
}

impl<C: ChartCanvas> Drop for HistoryChart<C> {
    fn drop(&mut self) {
        if let Some(handle) = self.instance.take() {
            self.canvas.destroy(handle);
        }
    }
}
