//! Cluster Info tab: nodes, pod inventory and recent events.

use kubejob_lib::model::ClusterEvent;
use kubejob_lib::model::ClusterInfo;
use kubejob_lib::model::Node;
use kubejob_lib::model::Pod;
use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Style;
use kubejob_ui::Theme;
use kubejob_ui::Tone;
use kubejob_ui::components::modal::draw_frame;
use kubejob_ui::components::table::CellContent;
use kubejob_ui::components::table::Column;
use kubejob_ui::components::table::Table;
use kubejob_ui::components::table::TableRow;
use kubejob_ui::components::table::Value;

use super::draw_centered;

pub const LOADING_CLUSTER_TEXT: &str = "Loading cluster info...";
pub const NO_EVENTS_TEXT: &str = "No recent events";

const NODE_CARD_WIDTH: u16 = 34;
const NODE_CARD_HEIGHT: u16 = 6;
const EVENTS_WIDTH: u16 = 48;

/// A pod as a table row.
#[derive(Debug, Clone)]
pub struct PodRow(pub Pod);

impl TableRow for PodRow {
    fn field(&self, key: &str) -> Value {
        let pod = &self.0;
        match key {
            "name" => Value::from(&pod.name),
            "status" => Value::from(pod.status.as_deref()),
            "restarts" => Value::from(pod.restarts),
            "ip" => Value::from(pod.ip.as_deref()),
            "node" => Value::from(pod.node.as_deref()),
            _ => Value::Null,
        }
    }
}

pub fn pod_status_tone(status: Option<&str>) -> Tone {
    match status {
        Some("Running") => Tone::Success,
        Some("Pending") => Tone::Warning,
        Some("Failed") | Some("Unknown") => Tone::Danger,
        Some("Succeeded") => Tone::Info,
        _ => Tone::Muted,
    }
}

pub fn pod_columns() -> Vec<Column<PodRow>> {
    vec![
        Column::new("name", "Name").width(240),
        Column::new("status", "Status").width(120).render(|row: &PodRow| {
            let status = row.0.status.as_deref();
            CellContent::styled(format!("● {}", status.unwrap_or("-")), pod_status_tone(status))
        }),
        Column::new("restarts", "Restarts").width(80).render(|row: &PodRow| {
            let tone = if row.0.restarts > 0 { Tone::Warning } else { Tone::Default };
            CellContent::styled(row.0.restarts.to_string(), tone)
        }),
        Column::new("ip", "IP")
            .width(120)
            .render(|row: &PodRow| CellContent::text(row.0.ip.as_deref().unwrap_or("-"))),
        Column::new("node", "Node")
            .width(140)
            .render(|row: &PodRow| CellContent::text(row.0.node.as_deref().unwrap_or("-"))),
    ]
}

pub struct ClusterView {
    info: Option<ClusterInfo>,
    pods: Table<PodRow>,
}

impl Default for ClusterView {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterView {
    pub fn new() -> Self {
        Self {
            info: None,
            pods: Table::new(pod_columns()).empty_text("No pods"),
        }
    }

    pub fn pods(&self) -> &Table<PodRow> {
        &self.pods
    }

    pub fn pods_mut(&mut self) -> &mut Table<PodRow> {
        &mut self.pods
    }

    pub fn set_info(&mut self, info: ClusterInfo) {
        self.pods
            .set_rows(info.pods.iter().cloned().map(PodRow).collect());
        self.info = Some(info);
    }

    /// Ends the loading state after a failed fetch. A snapshot already on
    /// screen stays; otherwise the view shows empty lists.
    pub fn fetch_failed(&mut self) {
        if self.info.is_none() {
            self.info = Some(ClusterInfo::default());
        }
    }

    pub fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        let Some(info) = &self.info else {
            draw_centered(buf, area, LOADING_CLUSTER_TEXT, theme.muted());
            return;
        };

        let mut rest = area;
        if let Some(error) = &info.error {
            let (banner, below) = rest.split_top(2);
            let style = Style::new(theme.background, theme.danger).bold();
            buf.fill(banner.row(0), style);
            buf.put_str(
                banner.x + 1,
                banner.y,
                &format!("Cluster API unavailable: {}", error),
                banner.width.saturating_sub(2),
                style,
            );
            rest = below;
        }

        if !info.nodes.is_empty() {
            let (nodes, below) = rest.split_top(NODE_CARD_HEIGHT + 1);
            draw_nodes(buf, nodes, &info.nodes, theme);
            rest = below;
        }

        let events_width = EVENTS_WIDTH.min(rest.width / 2);
        let (pods, events) = rest.split_left(rest.width.saturating_sub(events_width));
        draw_events(buf, events.shrink(0, 0, 0, 1), &info.events, theme);
        self.pods.render(buf, pods, theme);
    }
}

fn draw_nodes(buf: &mut Buffer, area: Rect, nodes: &[Node], theme: &Theme) {
    let mut x = area.x;
    for node in nodes {
        if x + NODE_CARD_WIDTH > area.right() {
            break;
        }
        let card = Rect::new(x, area.y, NODE_CARD_WIDTH, NODE_CARD_HEIGHT);
        let inner = draw_frame(buf, card, &node.name, theme);
        let surface = theme.surface();
        let (status_tone, status) = if node.is_ready() {
            (Tone::Success, "● Ready".to_string())
        } else {
            (Tone::Danger, format!("● {}", node.status))
        };
        let width = inner.width.saturating_sub(2);
        buf.put_str(inner.x + 1, inner.y, &status, width, surface.fg(theme.tone(status_tone)).bold());
        let lines = [
            format!("OS: {}", node.os.as_deref().unwrap_or("-")),
            format!(
                "CPU: {}  Mem: {}",
                node.cpu.as_deref().unwrap_or("-"),
                node.memory.as_deref().unwrap_or("-")
            ),
            format!("Kernel: {}", node.kernel.as_deref().unwrap_or("-")),
        ];
        for (i, line) in lines.iter().enumerate() {
            buf.put_str(inner.x + 1, inner.y + 1 + i as u16, line, width, surface.fg(theme.muted));
        }
        x += NODE_CARD_WIDTH + 1;
    }
}

fn draw_events(buf: &mut Buffer, area: Rect, events: &[ClusterEvent], theme: &Theme) {
    let inner = draw_frame(buf, area, "Recent Events", theme);
    if inner.is_empty() {
        return;
    }
    if events.is_empty() {
        draw_centered(buf, inner, NO_EVENTS_TEXT, theme.surface().fg(theme.muted));
        return;
    }

    let width = inner.width.saturating_sub(2);
    let surface = theme.surface();
    let mut y = inner.y;
    for event in events {
        if y + 1 >= inner.bottom() {
            break;
        }
        let tone = if event.is_warning() { Tone::Warning } else { Tone::Info };
        let heading = format!(
            "{} · {}",
            event.reason.as_deref().unwrap_or("-"),
            event.time.as_deref().unwrap_or("-")
        );
        buf.put_str(inner.x + 1, y, &heading, width, surface.fg(theme.tone(tone)).bold());
        let detail = match &event.object {
            Some(object) => format!("{} ({})", event.message.as_deref().unwrap_or(""), object),
            None => event.message.clone().unwrap_or_default(),
        };
        buf.put_str(inner.x + 1, y + 1, &detail, width, surface.fg(theme.muted));
        y += 3;
    }
}
