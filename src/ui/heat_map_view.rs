use chrono::Datelike;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::heat_map::{ActivityKind, HeatBucket, Intensity};
use crate::ui::theme::Theme;

const WEEK: usize = 7;

pub fn glyph(intensity: Intensity) -> char {
    match intensity {
        Intensity::None => '·',
        Intensity::Low => '░',
        Intensity::Medium => '▒',
        Intensity::High => '█',
    }
}

fn title(kind: ActivityKind, buckets: &[HeatBucket]) -> String {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    let label = match kind {
        ActivityKind::Tasks => "Tasks completed",
        ActivityKind::Habits => "Habit check-ins",
    };
    format!("{} · last {} days · {} total", label, buckets.len(), total)
}

/// Styled rows for a terminal frontend: a title, one row per week (oldest
/// first), then a legend. The newest cell is underlined.
pub fn heat_map_lines(kind: ActivityKind, buckets: &[HeatBucket], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title(kind, buckets),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    ))];

    let newest = buckets.last().map(|b| b.date);

    for week in buckets.chunks(WEEK) {
        let mut spans = Vec::with_capacity(WEEK + 1);
        if let Some(first) = week.first() {
            spans.push(Span::styled(
                format!("{:02}/{:02} ", first.date.month(), first.date.day()),
                Style::default().fg(theme.weekday_header),
            ));
        }
        for bucket in week {
            let mut style = Style::default().fg(theme.heat_color(bucket.intensity()));
            if Some(bucket.date) == newest {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!(" {} ", glyph(bucket.intensity())), style));
        }
        lines.push(Line::from(spans));
    }

    let mut legend = vec![Span::raw("less ")];
    for intensity in [Intensity::None, Intensity::Low, Intensity::Medium, Intensity::High] {
        legend.push(Span::styled(
            format!("{} ", glyph(intensity)),
            Style::default().fg(theme.heat_color(intensity)),
        ));
    }
    legend.push(Span::raw("more"));
    lines.push(Line::from(legend));

    lines
}

pub fn heat_map_text(kind: ActivityKind, buckets: &[HeatBucket]) -> String {
    let mut lines = vec![title(kind, buckets), String::new()];

    for week in buckets.chunks(WEEK) {
        let Some(first) = week.first() else { continue };
        let cells: String = week
            .iter()
            .map(|b| format!(" {} ", glyph(b.intensity())))
            .collect();
        lines.push(format!("{:02}/{:02} {}", first.date.month(), first.date.day(), cells));
    }

    lines.push(String::new());
    lines.push(format!(
        "less {} {} {} {} more",
        glyph(Intensity::None),
        glyph(Intensity::Low),
        glyph(Intensity::Medium),
        glyph(Intensity::High)
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heat_map::build_heat_map;
    use chrono::NaiveDate;

    fn buckets_with_today_count(count: usize) -> Vec<HeatBucket> {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut buckets = build_heat_map(ActivityKind::Tasks, &[], &[], today);
        if let Some(last) = buckets.last_mut() {
            last.count = count;
        }
        buckets
    }

    #[test]
    fn lines_have_title_six_weeks_and_legend() {
        let lines = heat_map_lines(ActivityKind::Tasks, &buckets_with_today_count(0), &Theme::default());

        assert_eq!(lines.len(), 1 + 6 + 1);
        for week in &lines[1..7] {
            assert_eq!(week.spans.len(), 1 + 7);
        }
    }

    #[test]
    fn newest_cell_is_underlined_and_colored_by_intensity() {
        let theme = Theme::default();
        let lines = heat_map_lines(ActivityKind::Tasks, &buckets_with_today_count(2), &theme);

        let today_cell = lines[6].spans.last().unwrap();

        assert_eq!(today_cell.style.fg, Some(theme.heat_color(Intensity::Medium)));
        assert!(today_cell.style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(today_cell.content, " ▒ ");
    }

    #[test]
    fn text_rendering_shows_rows_and_total() {
        let text = heat_map_text(ActivityKind::Habits, &buckets_with_today_count(5));

        assert!(text.starts_with("Habit check-ins · last 42 days · 5 total"));
        assert_eq!(text.lines().filter(|l| l.contains('/')).count(), 6);
        assert!(text.lines().any(|l| l.starts_with("03/04") && l.ends_with(" █ ")));
    }

    #[test]
    fn glyphs_grow_with_intensity() {
        assert_eq!(glyph(Intensity::from_count(0)), '·');
        assert_eq!(glyph(Intensity::from_count(7)), '█');
    }
}
