//! Chart data for the dashboard and reports pages.
//!
//! A [`ChartSpec`] is what the chart surface draws; it knows nothing about
//! pixels beyond the normalised geometry helpers used by the SVG renderer.

use crate::format::{CurrencyCode, Locale, format_currency_lossy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Doughnut,
    Line,
}

/// An RGBA colour as `(r, g, b, alpha)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

impl Rgba {
    #[must_use]
    pub fn css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, self.3)
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }
}

const PRIMARY: Rgba = Rgba(13, 110, 253, 0.5);
const SALES: Rgba = Rgba(54, 162, 235, 0.2);
const COMMISSION: Rgba = Rgba(255, 99, 132, 0.2);

const CATEGORY_PALETTE: [Rgba; 6] = [
    Rgba(255, 99, 132, 0.7),
    Rgba(54, 162, 235, 0.7),
    Rgba(255, 206, 86, 0.7),
    Rgba(75, 192, 192, 0.7),
    Rgba(153, 102, 255, 0.7),
    Rgba(255, 159, 64, 0.7),
];

/// pending, confirmed, shipped, delivered, cancelled
const STATUS_PALETTE: [Rgba; 5] = [
    Rgba(255, 206, 86, 0.7),
    Rgba(54, 162, 235, 0.7),
    Rgba(75, 192, 192, 0.7),
    Rgba(40, 167, 69, 0.7),
    Rgba(220, 53, 69, 0.7),
];

/// How values are spelled out in tooltips and axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueUnit {
    Currency,
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: Option<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Rgba>,
    #[serde(default)]
    pub fill: bool,
}

impl Dataset {
    #[must_use]
    pub fn color_at(&self, i: usize) -> Rgba {
        if self.colors.is_empty() {
            PRIMARY
        } else {
            self.colors[i % self.colors.len()]
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().copied().filter(|v| v.is_finite()).sum()
    }
}

/// A chart bound to a container element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub container_id: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub unit: ValueUnit,
    /// Bumped on every data update so the surface knows to redraw.
    #[serde(default)]
    pub revision: u64,
}

impl ChartSpec {
    /// A single-dataset chart of the given kind.
    #[must_use]
    pub fn new(
        container_id: &str,
        kind: ChartKind,
        values: Vec<f64>,
        labels: Vec<String>,
        dataset_label: Option<&str>,
    ) -> Self {
        let colors = match kind {
            ChartKind::Bar => vec![PRIMARY],
            ChartKind::Line => vec![SALES],
            ChartKind::Pie | ChartKind::Doughnut => CATEGORY_PALETTE.to_vec(),
        };
        Self {
            container_id: container_id.to_string(),
            kind,
            labels,
            datasets: vec![Dataset {
                label: dataset_label.map(str::to_string),
                values,
                colors,
                fill: matches!(kind, ChartKind::Line),
            }],
            unit: ValueUnit::Currency,
            revision: 0,
        }
    }

    /// Monthly sales as bars.
    #[must_use]
    pub fn sales_bar(
        container_id: &str,
        values: Vec<f64>,
        labels: Vec<String>,
        dataset_label: Option<&str>,
    ) -> Self {
        Self::new(
            container_id,
            ChartKind::Bar,
            values,
            labels,
            Some(dataset_label.unwrap_or("Monthly Sales")),
        )
    }

    /// Sales split by product category.
    #[must_use]
    pub fn category_pie(container_id: &str, values: Vec<f64>, labels: Vec<String>) -> Self {
        Self::new(container_id, ChartKind::Pie, values, labels, None)
    }

    /// Order counts by status, with the fixed status palette.
    #[must_use]
    pub fn status_doughnut(container_id: &str, values: Vec<f64>, labels: Vec<String>) -> Self {
        let mut spec = Self::new(container_id, ChartKind::Doughnut, values, labels, None);
        spec.datasets[0].colors = STATUS_PALETTE.to_vec();
        spec.unit = ValueUnit::Count;
        spec
    }

    /// Sales and commission trend lines over the same labels.
    #[must_use]
    pub fn commission_line(
        container_id: &str,
        sales: Vec<f64>,
        commission: Vec<f64>,
        labels: Vec<String>,
    ) -> Self {
        let mut spec = Self::new(container_id, ChartKind::Line, sales, labels, Some("Sales"));
        spec.datasets.push(Dataset {
            label: Some("Commission".to_string()),
            values: commission,
            colors: vec![COMMISSION],
            fill: true,
        });
        spec
    }

    /// Replace the first dataset's values (and the labels when given) and
    /// request a redraw.
    pub fn update_chart_data(&mut self, values: Vec<f64>, labels: Option<Vec<String>>) {
        match self.datasets.first_mut() {
            Some(first) => first.values = values,
            None => self.datasets.push(Dataset {
                label: None,
                values,
                colors: vec![PRIMARY],
                fill: false,
            }),
        }
        if let Some(labels) = labels {
            self.labels = labels;
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Largest finite value across datasets, never below zero (axes begin at zero).
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Tooltip text for point `i` of dataset `d`.
    #[must_use]
    pub fn tooltip(&self, d: usize, i: usize, locale: Locale, currency: &CurrencyCode) -> String {
        let Some(dataset) = self.datasets.get(d) else {
            return String::new();
        };
        let value = dataset.values.get(i).copied().unwrap_or(0.0);
        let rendered = match self.unit {
            ValueUnit::Currency => format_currency_lossy(value, locale, currency),
            ValueUnit::Count => format!("{value}"),
        };
        match self.kind {
            ChartKind::Pie | ChartKind::Doughnut => {
                let label = self.labels.get(i).map_or("", String::as_str);
                let pct = share_percent(value, dataset.sum());
                match self.unit {
                    ValueUnit::Currency => format!("{label}: {pct}% ({rendered})"),
                    ValueUnit::Count => format!("{label}: {pct}% ({rendered} orders)"),
                }
            }
            ChartKind::Bar | ChartKind::Line => {
                let label = dataset.label.as_deref().unwrap_or("");
                format!("{label}: {rendered}")
            }
        }
    }

    /// Bars as fractions of the plot area: `(x, y, width, height)` in `0.0..=1.0`,
    /// `y` measured from the top.
    #[must_use]
    pub fn bar_geometry(&self) -> Vec<(f64, f64, f64, f64)> {
        let Some(dataset) = self.datasets.first() else {
            return Vec::new();
        };
        let count = dataset.values.len();
        if count == 0 {
            return Vec::new();
        }
        let max = self.max_value();
        let slot = 1.0 / count_to_f64(count);
        let width = slot * 0.7;
        dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let h = if max > 0.0 && v.is_finite() { (v / max).max(0.0) } else { 0.0 };
                let x = slot * count_to_f64(i) + (slot - width) / 2.0;
                (x, 1.0 - h, width, h)
            })
            .collect()
    }

    /// Pie/doughnut slices as `(start, end)` angles in radians, clockwise from 12 o'clock.
    #[must_use]
    pub fn slice_angles(&self) -> Vec<(f64, f64)> {
        let Some(dataset) = self.datasets.first() else {
            return Vec::new();
        };
        let total = dataset.sum();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut start = 0.0;
        dataset
            .values
            .iter()
            .map(|v| {
                let share = if v.is_finite() { v.max(0.0) / total } else { 0.0 };
                let end = start + share * std::f64::consts::TAU;
                let slice = (start, end);
                start = end;
                slice
            })
            .collect()
    }

    /// Line points for dataset `d` as `(x, y)` fractions, `y` from the top.
    #[must_use]
    pub fn line_points(&self, d: usize) -> Vec<(f64, f64)> {
        let Some(dataset) = self.datasets.get(d) else {
            return Vec::new();
        };
        let max = self.max_value();
        let count = dataset.values.len();
        let step = if count > 1 { 1.0 / count_to_f64(count - 1) } else { 0.0 };
        dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let y = if max > 0.0 && v.is_finite() { v / max } else { 0.0 };
                (step * count_to_f64(i), 1.0 - y)
            })
            .collect()
    }
}

/// Percentage of `total` taken by `value`, rounded to a whole number.
#[must_use]
pub fn share_percent(value: f64, total: f64) -> i64 {
    if total <= 0.0 || !value.is_finite() || !total.is_finite() {
        return 0;
    }
    crate::numbers::f64_to_hundredths(value / total).unwrap_or(0)
}

fn count_to_f64(n: usize) -> f64 {
    crate::numbers::i64_to_f64(i64::try_from(n).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn update_replaces_first_dataset_and_bumps_revision() {
        let mut chart = ChartSpec::sales_bar("sales", vec![1.0, 2.0], labels(&["Jan", "Feb"]), None);
        chart.update_chart_data(vec![5.0, 6.0, 7.0], Some(labels(&["Mar", "Apr", "May"])));
        assert_eq!(chart.datasets[0].values, vec![5.0, 6.0, 7.0]);
        assert_eq!(chart.labels.len(), 3);
        assert_eq!(chart.revision, 1);

        chart.update_chart_data(vec![1.0], None);
        assert_eq!(chart.labels.len(), 3);
        assert_eq!(chart.revision, 2);
        assert_eq!(chart.datasets[0].label.as_deref(), Some("Monthly Sales"));
    }

    #[test]
    fn commission_line_has_two_filled_datasets() {
        let chart = ChartSpec::commission_line(
            "trend",
            vec![100.0, 200.0],
            vec![5.0, 10.0],
            labels(&["Q1", "Q2"]),
        );
        assert_eq!(chart.datasets.len(), 2);
        assert!(chart.datasets.iter().all(|d| d.fill));
        assert_eq!(chart.datasets[1].label.as_deref(), Some("Commission"));
    }

    #[test]
    fn pie_tooltips_show_rounded_share() {
        let chart = ChartSpec::category_pie("cat", vec![1.0, 2.0], labels(&["Tools", "Parts"]));
        let tip = chart.tooltip(0, 1, Locale::EnUs, &CurrencyCode::eur());
        assert_eq!(tip, "Parts: 67% (€2.00)");
        let status = ChartSpec::status_doughnut("st", vec![3.0, 1.0], labels(&["pending", "shipped"]));
        assert_eq!(
            status.tooltip(0, 0, Locale::EnUs, &CurrencyCode::eur()),
            "pending: 75% (3 orders)"
        );
        assert_eq!(status.datasets[0].color_at(4), STATUS_PALETTE[4]);
    }

    #[test]
    fn geometry_is_normalised() {
        let chart = ChartSpec::sales_bar("s", vec![50.0, 100.0], labels(&["a", "b"]), None);
        let bars = chart.bar_geometry();
        assert_eq!(bars.len(), 2);
        assert!((bars[1].3 - 1.0).abs() < f64::EPSILON);
        assert!((bars[0].3 - 0.5).abs() < f64::EPSILON);

        let pie = ChartSpec::category_pie("p", vec![1.0, 1.0], labels(&["x", "y"]));
        let slices = pie.slice_angles();
        assert!((slices[1].1 - std::f64::consts::TAU).abs() < 1e-9);

        let empty = ChartSpec::category_pie("p", vec![0.0], labels(&["x"]));
        assert!(empty.slice_angles().is_empty());
    }

    #[test]
    fn share_percent_handles_degenerate_totals() {
        assert_eq!(share_percent(1.0, 0.0), 0);
        assert_eq!(share_percent(f64::NAN, 3.0), 0);
        assert_eq!(share_percent(1.0, 3.0), 33);
    }
}
