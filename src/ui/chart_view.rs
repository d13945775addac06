//! Draws hosted chart content into a terminal panel.

use chrono::DateTime;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph};
use ratatui::Frame;

use crate::chart::{DrawMode, Fill, Series};

use super::host::{DrawnChart, HostedContent};
use super::theme::Theme;

/// Render one panel: border, title, and whatever the host currently holds
/// for the panel's render target.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    content: Option<&HostedContent>,
    theme: &Theme,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(theme.highlight)
    } else {
        Style::default().fg(theme.border)
    };
    let title_style = if focused { theme.focused } else { Style::default() };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", title), title_style));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < 2 || inner.height < 2 {
        return;
    }

    match content {
        None => {
            let placeholder = Paragraph::new("no data").alignment(Alignment::Center);
            frame.render_widget(placeholder, inner);
        }
        Some(HostedContent::Loading) => {
            let spinner = Paragraph::new("loading…")
                .style(theme.loading)
                .alignment(Alignment::Center);
            frame.render_widget(spinner, inner);
        }
        Some(HostedContent::Chart(chart)) => render_chart(frame, inner, chart, theme),
    }
}

fn render_chart(frame: &mut Frame, area: Rect, chart: &DrawnChart, theme: &Theme) {
    let Some(first) = chart.series.first() else {
        return;
    };
    match first.style.mode {
        DrawMode::Pie => render_pie(frame, area, first, theme),
        DrawMode::Bars => render_bars(frame, area, first, theme),
        DrawMode::Lines => render_lines(frame, area, chart, theme),
    }
}

/// Used/free pies map naturally onto a ratio gauge.
fn render_pie(frame: &mut Frame, area: Rect, series: &Series, theme: &Theme) {
    let used = series
        .points
        .iter()
        .find(|p| p.x == "Used")
        .map(|p| p.y)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.highlight))
        .ratio(used)
        .label(format!("{:.0}% used", used * 100.0));
    frame.render_widget(gauge, area);
}

fn render_bars(frame: &mut Frame, area: Rect, series: &Series, theme: &Theme) {
    let bars: Vec<(&str, u64)> = series
        .points
        .iter()
        .map(|p| (p.x.as_str(), p.y.max(0.0).round() as u64))
        .collect();

    let chart = BarChart::default()
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.highlight))
        .data(&bars);
    frame.render_widget(chart, area);
}

fn render_lines(frame: &mut Frame, area: Rect, chart: &DrawnChart, theme: &Theme) {
    // Stacked series plot cumulatively; everything else plots as-is.
    let mut plotted: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    let mut stack_totals: Vec<f64> = Vec::new();

    for series in &chart.series {
        let mut points = Vec::with_capacity(series.points.len());
        for (i, point) in series.points.iter().enumerate() {
            let Some(x) = parse_x(&point.x) else { continue };
            let y = if series.style.stack_group.is_some() {
                if stack_totals.len() <= i {
                    stack_totals.resize(i + 1, 0.0);
                }
                stack_totals[i] += point.y;
                stack_totals[i]
            } else {
                point.y
            };
            points.push((x, y));
        }
        plotted.push((series.name.clone(), points));
    }

    let xs: Vec<f64> = plotted.iter().flat_map(|(_, p)| p.iter().map(|(x, _)| *x)).collect();
    let ys: Vec<f64> = plotted.iter().flat_map(|(_, p)| p.iter().map(|(_, y)| *y)).collect();
    if xs.is_empty() {
        let placeholder = Paragraph::new("no samples").alignment(Alignment::Center);
        frame.render_widget(placeholder, area);
        return;
    }

    let x_min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut y_min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut y_max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Zero-filled areas read wrong unless the zero line is visible.
    if chart.series.iter().any(|s| s.style.fill == Fill::ToZero) {
        y_min = y_min.min(0.0);
        y_max = y_max.max(0.0);
    }
    if (y_max - y_min).abs() < f64::EPSILON {
        y_max = y_min + 1.0;
    }

    let datasets: Vec<Dataset> = plotted
        .iter()
        .enumerate()
        .map(|(i, (name, points))| {
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.series_color(i)))
                .data(points)
        })
        .collect();

    let x_labels = vec![
        Span::raw(format_time(x_min)),
        Span::raw(format_time((x_min + x_max) / 2.0)),
        Span::raw(format_time(x_max)),
    ];
    let y_labels = vec![
        Span::raw(format!("{:.1}", y_min)),
        Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.1}", y_max)),
    ];

    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels(x_labels)
                .style(Style::default().fg(theme.border)),
        )
        .y_axis(
            Axis::default()
                .title(chart.layout.y_axis.title.clone())
                .bounds([y_min, y_max])
                .labels(y_labels)
                .style(Style::default().fg(theme.border)),
        );
    frame.render_widget(widget, area);
}

/// Parse a plotted x label back to epoch seconds.
pub(crate) fn parse_x(label: &str) -> Option<f64> {
    DateTime::parse_from_rfc3339(label)
        .ok()
        .map(|d| d.timestamp() as f64)
}

fn format_time(epoch: f64) -> String {
    match DateTime::from_timestamp(epoch as i64, 0) {
        Some(d) => d.format("%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_labels_round_trip_through_epoch_seconds() {
        let x = parse_x("2023-06-01T12:00:00.000Z").unwrap();
        assert_eq!(format_time(x), "06-01 12:00");
        assert!(parse_x("not a time").is_none());
    }
}
