//! Overview tab: headline cards, queue health and resource gauges.

use kubejob_lib::model::Metrics;
use kubejob_lib::model::QueuePressure;
use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Rgb;
use kubejob_ui::Style;
use kubejob_ui::Theme;
use kubejob_ui::components::modal::draw_frame;

/// Unacknowledged count that fills the bar.
const UNACKED_SCALE: f64 = 200.0;
/// Queue depth that fills the pressure bar.
const QUEUE_SCALE: f64 = 20_000.0;
/// Resource usage above this percentage is drawn as critical.
const RESOURCE_ALERT: f64 = 80.0;

const CARD_HEIGHT: u16 = 5;

/// Fraction of `max` covered by `value`, clamped to `0.0..=1.0`.
pub fn ratio(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

/// Groups digits in thousands: `12500` → `12,500`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn pressure_color(pressure: QueuePressure, theme: &Theme) -> Rgb {
    match pressure {
        QueuePressure::Normal => theme.success,
        QueuePressure::High => theme.warning,
        QueuePressure::Critical => theme.danger,
    }
}

fn resource_color(percent: f64, theme: &Theme) -> Rgb {
    if percent > RESOURCE_ALERT {
        theme.danger
    } else {
        theme.accent
    }
}

fn draw_bar(buf: &mut Buffer, x: u16, y: u16, width: u16, fill: f64, color: Rgb, theme: &Theme) {
    let filled = (fill * width as f64).round() as u16;
    for i in 0..width {
        let (ch, style) = if i < filled {
            ("█", Style::new(color, theme.surface))
        } else {
            ("░", Style::new(theme.surface_alt, theme.surface))
        };
        buf.put_str(x + i, y, ch, 1, style);
    }
}

fn draw_card(buf: &mut Buffer, area: Rect, title: &str, value: &str, unit: &str, theme: &Theme) {
    let inner = draw_frame(buf, area, title, theme);
    if inner.height == 0 {
        return;
    }
    let surface = theme.surface();
    buf.put_str(inner.x + 1, inner.y + 1, value, inner.width.saturating_sub(2), surface.bold());
    if inner.height > 2 {
        buf.put_str(inner.x + 1, inner.y + 2, unit, inner.width.saturating_sub(2), surface.fg(theme.muted));
    }
}

/// A labelled bar: label left, reading right, bar underneath.
struct Gauge<'a> {
    label: &'a str,
    reading: String,
    fill: f64,
    color: Rgb,
}

impl Gauge<'_> {
    fn draw(&self, buf: &mut Buffer, inner: Rect, dy: u16, theme: &Theme) {
        if dy + 1 >= inner.height {
            return;
        }
        let surface = theme.surface();
        let width = inner.width.saturating_sub(2);
        buf.put_str(inner.x + 1, inner.y + dy, self.label, width, surface.fg(theme.muted));
        let reading_width = kubejob_ui::text::display_width(&self.reading) as u16;
        if reading_width < width {
            buf.put_str(
                inner.x + 1 + width - reading_width,
                inner.y + dy,
                &self.reading,
                reading_width,
                surface.fg(self.color).bold(),
            );
        }
        draw_bar(buf, inner.x + 1, inner.y + dy + 1, width, self.fill, self.color, theme);
    }
}

pub fn render(buf: &mut Buffer, area: Rect, metrics: &Metrics, theme: &Theme) {
    let (cards, rest) = area.split_top(CARD_HEIGHT);
    let cards = cards.columns(4, 1);
    let throughput = metrics.throughput.to_string();
    let latency = format!("{:.0}", metrics.avg_latency);
    let active = format!("{}/{}", metrics.active_jobs, metrics.max_jobs);
    let consumed = group_thousands(metrics.total_consumed);
    let content = [
        ("Throughput", throughput.as_str(), "msgs/min"),
        ("Avg Latency", latency.as_str(), "ms"),
        ("Active Jobs", active.as_str(), "running / capacity"),
        ("Total Consumed", consumed.as_str(), "messages"),
    ];
    for (card, (title, value, unit)) in cards.iter().zip(content) {
        draw_card(buf, *card, title, value, unit, theme);
    }

    let (_, rest) = rest.split_top(1);
    let panels = rest.columns(2, 1);
    let [queue, resources] = panels.as_slice() else {
        return;
    };

    let inner = draw_frame(buf, *queue, "Queue Health", theme);
    let pressure = metrics.queue_pressure();
    buf.put_str(
        inner.x + 1,
        inner.y,
        &format!("Pending: {}", group_thousands(metrics.queue_depth)),
        inner.width.saturating_sub(2),
        theme.surface().bold(),
    );
    Gauge {
        label: "Unacknowledged",
        reading: metrics.unacked.to_string(),
        fill: ratio(metrics.unacked as f64, UNACKED_SCALE),
        color: theme.info,
    }
    .draw(buf, inner, 2, theme);
    Gauge {
        label: "Queue Pressure",
        reading: pressure.label().to_string(),
        fill: ratio(metrics.queue_depth as f64, QUEUE_SCALE),
        color: pressure_color(pressure, theme),
    }
    .draw(buf, inner, 5, theme);

    let inner = draw_frame(buf, *resources, "Resources", theme);
    if !metrics.status_msg.is_empty() {
        buf.put_str(
            inner.x + 1,
            inner.y,
            &metrics.status_msg,
            inner.width.saturating_sub(2),
            theme.surface().fg(theme.muted).italic(),
        );
    }
    for (dy, label, percent) in [(2, "CPU", metrics.cpu_percent), (5, "RAM", metrics.memory_percent)] {
        Gauge {
            label,
            reading: format!("{:.1}%", percent),
            fill: ratio(percent, 100.0),
            color: resource_color(percent, theme),
        }
        .draw(buf, inner, dy, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_clamps() {
        assert_eq!(ratio(50.0, 200.0), 0.25);
        assert_eq!(ratio(500.0, 200.0), 1.0);
        assert_eq!(ratio(-3.0, 200.0), 0.0);
        assert_eq!(ratio(1.0, 0.0), 0.0);
        assert_eq!(ratio(f64::NAN, 100.0), 0.0);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(12500), "12,500");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_resource_alert_threshold() {
        let theme = Theme::DEFAULT;
        assert_eq!(resource_color(80.0, &theme), theme.accent);
        assert_eq!(resource_color(80.5, &theme), theme.danger);
    }

    #[test]
    fn test_renders_cards_and_gauges() {
        let metrics = Metrics {
            queue_depth: 6200,
            unacked: 12,
            active_jobs: 3,
            max_jobs: 40,
            throughput: 33,
            memory_percent: 91.0,
            ..Default::default()
        };
        let mut buf = Buffer::new(100, 20);
        let area = buf.area();
        render(&mut buf, area, &metrics, &Theme::DEFAULT);

        let screen: Vec<String> = (0..20).map(|y| buf.row_text(y)).collect();
        let screen = screen.join("\n");
        assert!(screen.contains("Throughput"));
        assert!(screen.contains("3/40"));
        assert!(screen.contains("Pending: 6,200"));
        assert!(screen.contains("High"));
        assert!(screen.contains("91.0%"));
    }
}
