//! Chart Plotter Module
//! Turns a funding summary into chart specifications and draws them with egui_plot.

use crate::stats::{format_amount, FundingSummary, ValueCount};
use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use thiserror::Error;

/// Color palette, one per chart in build order
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No chartable data in the dataset")]
    NothingToPlot,
}

/// Chart payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// `(year, total)` points joined by a line.
    Trend(Vec<[f64; 2]>),
    /// Horizontal bars, first entry drawn on top.
    Ranking(Vec<(String, f64)>),
}

/// Everything needed to draw one chart window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: Color32,
    pub body: ChartBody,
}

/// Builds and draws funding charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Build the fixed chart sequence, skipping charts whose column is absent or has no values.
    pub fn build_charts(summary: &FundingSummary) -> Result<Vec<ChartSpec>, ChartError> {
        let mut charts = Vec::new();

        if let Some(totals) = summary.yearly_totals.as_ref().filter(|t| !t.is_empty()) {
            let points = totals
                .iter()
                .map(|t| [t.year as f64, t.total])
                .collect();
            charts.push(ChartSpec {
                title: "Funding Trends Over Time".to_string(),
                x_label: "Year".to_string(),
                y_label: "Total Funding (USD)".to_string(),
                color: PALETTE[0],
                body: ChartBody::Trend(points),
            });
        }

        let rankings = [
            (
                &summary.top_sectors,
                "Top 5 Sectors by Startup Count",
                "Number of Startups",
                "Sector",
            ),
            (
                &summary.top_cities,
                "Top 5 Cities by Startup Count",
                "Number of Startups",
                "City",
            ),
            (
                &summary.top_startups,
                "Top 5 Startups by Funding Count",
                "Number of Fundings",
                "Startup",
            ),
            (
                &summary.top_investors,
                "Top 5 Active Investors",
                "Number of Investments",
                "Investor",
            ),
            (
                &summary.investment_types,
                "Investment Type Distribution",
                "Count",
                "Investment Type",
            ),
        ];

        for (counts, title, x_label, y_label) in rankings {
            let Some(counts) = counts.as_ref().filter(|c| !c.is_empty()) else {
                log::debug!("Skipping chart '{}': no data", title);
                continue;
            };
            charts.push(ChartSpec {
                title: title.to_string(),
                x_label: x_label.to_string(),
                y_label: y_label.to_string(),
                color: PALETTE[charts.len() % PALETTE.len()],
                body: ChartBody::Ranking(Self::ranking_bars(counts)),
            });
        }

        if charts.is_empty() {
            return Err(ChartError::NothingToPlot);
        }
        Ok(charts)
    }

    fn ranking_bars(counts: &[ValueCount]) -> Vec<(String, f64)> {
        counts
            .iter()
            .map(|vc| (vc.value.clone(), vc.count as f64))
            .collect()
    }

    /// Draw one chart into the given UI.
    pub fn draw_chart(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
        match &spec.body {
            ChartBody::Trend(points) => Self::draw_trend(ui, id, spec, points),
            ChartBody::Ranking(bars) => Self::draw_ranking(ui, id, spec, bars),
        }
    }

    /// Line chart with point markers
    fn draw_trend(ui: &mut egui::Ui, id: &str, spec: &ChartSpec, points: &[[f64; 2]]) {
        Plot::new(id)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract().abs() < 1e-9 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(|mark, _range| format_amount(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(spec.color)
                        .width(2.0)
                        .name(&spec.title),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(spec.color),
                );
            });
    }

    /// Horizontal bar chart, largest value on top
    fn draw_ranking(ui: &mut egui::Ui, id: &str, spec: &ChartSpec, bars: &[(String, f64)]) {
        let n = bars.len();
        let labels: Vec<String> = bars.iter().rev().map(|(label, _)| label.clone()).collect();

        let elems: Vec<Bar> = bars
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::new((n - 1 - i) as f64, *value)
                    .name(label)
                    .fill(spec.color.gamma_multiply(0.8))
            })
            .collect();

        Plot::new(id)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_scroll(false)
            .include_x(0.0)
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-9 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(elems)
                        .horizontal()
                        .width(0.6)
                        .color(spec.color),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::YearTotal;
    use pretty_assertions::assert_eq;

    fn vc(value: &str, count: usize) -> ValueCount {
        ValueCount {
            value: value.to_string(),
            count,
        }
    }

    #[test]
    fn test_build_charts_fixed_order() {
        let summary = FundingSummary {
            yearly_totals: Some(vec![YearTotal {
                year: 2019,
                total: 10.0,
            }]),
            top_sectors: Some(vec![vc("Tech", 3)]),
            top_cities: Some(vec![vc("Mumbai", 2)]),
            top_startups: Some(vec![vc("Acme", 1)]),
            top_investors: Some(vec![vc("Accel", 1)]),
            investment_types: Some(vec![vc("Seed", 4)]),
            amount_stats: None,
        };

        let titles: Vec<String> = ChartPlotter::build_charts(&summary)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Funding Trends Over Time",
                "Top 5 Sectors by Startup Count",
                "Top 5 Cities by Startup Count",
                "Top 5 Startups by Funding Count",
                "Top 5 Active Investors",
                "Investment Type Distribution",
            ]
        );
    }

    #[test]
    fn test_absent_columns_are_skipped() {
        let summary = FundingSummary {
            top_cities: Some(vec![vc("Mumbai", 2), vc("Pune", 1)]),
            ..Default::default()
        };
        let charts = ChartPlotter::build_charts(&summary).unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(
            charts[0].body,
            ChartBody::Ranking(vec![("Mumbai".to_string(), 2.0), ("Pune".to_string(), 1.0)])
        );
    }

    #[test]
    fn test_trend_points_use_years() {
        let summary = FundingSummary {
            yearly_totals: Some(vec![
                YearTotal { year: 2019, total: 5.0 },
                YearTotal { year: 2020, total: 7.5 },
            ]),
            ..Default::default()
        };
        let charts = ChartPlotter::build_charts(&summary).unwrap();
        assert_eq!(charts[0].body, ChartBody::Trend(vec![[2019.0, 5.0], [2020.0, 7.5]]));
    }

    #[test]
    fn test_empty_summaries_are_skipped() {
        let summary = FundingSummary {
            yearly_totals: Some(vec![]),
            top_investors: Some(vec![]),
            top_cities: Some(vec![vc("Mumbai", 1)]),
            ..Default::default()
        };
        let titles: Vec<String> = ChartPlotter::build_charts(&summary)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Top 5 Cities by Startup Count"]);
    }

    #[test]
    fn test_only_empty_summaries_is_nothing_to_plot() {
        let summary = FundingSummary {
            yearly_totals: Some(vec![]),
            top_sectors: Some(vec![]),
            ..Default::default()
        };
        let err = ChartPlotter::build_charts(&summary).unwrap_err();
        assert!(matches!(err, ChartError::NothingToPlot));
    }

    #[test]
    fn test_nothing_to_plot() {
        let err = ChartPlotter::build_charts(&FundingSummary::default()).unwrap_err();
        assert!(matches!(err, ChartError::NothingToPlot));
    }
}
