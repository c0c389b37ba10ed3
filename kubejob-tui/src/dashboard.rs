//! The signed-in dashboard: tabs, their pollers and the modals on top.

use std::future::Future;
use std::time::Duration;

use kubejob_lib::ScalerClient;
use kubejob_lib::api::DEFAULT_AUDIT_LIMIT;
use kubejob_lib::model::Stats;
use kubejob_lib::poll::Subscription;
use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Theme;
use kubejob_ui::components::Component;
use kubejob_ui::components::EventResult;
use kubejob_ui::components::log_view::LogViewEvent;
use kubejob_ui::components::table::Table;
use kubejob_ui::components::table::TableEvent;
use kubejob_ui::event::Input;
use kubejob_ui::event::Key;
use kubejob_ui::event::KeyCombo;
use log::debug;
use log::info;
use log::warn;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::DashboardConfig;
use crate::message::Message;
use crate::views::Tab;
use crate::views::audit::AuditView;
use crate::views::audit_detail::AuditDetail;
use crate::views::cluster::ClusterView;
use crate::views::draw_centered;
use crate::views::header::Header;
use crate::views::jobs::JobRow;
use crate::views::jobs::LOGS_ACTION;
use crate::views::jobs::jobs_table;
use crate::views::log_viewer::JobLogs;
use crate::views::overview;

pub const LOADING_PLATFORM_TEXT: &str = "Loading Platform...";

const FOOTER_HINT: &str =
    " 1-4 tabs · r refresh · c columns · Enter/l open · Ctrl+L logout · Ctrl+Q quit";

/// What the app must do after the dashboard handled an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Logout,
}

pub struct Dashboard {
    client: ScalerClient,
    config: DashboardConfig,
    tx: UnboundedSender<Message>,
    epoch: u64,
    user: Option<String>,
    tab: Tab,
    header: Header,
    stats: Option<Stats>,
    jobs: Table<JobRow>,
    audit: AuditView,
    cluster: ClusterView,
    job_logs: Option<JobLogs>,
    detail: Option<AuditDetail>,
    stats_feed: Option<Subscription>,
    tab_feed: Option<Subscription>,
}

impl Dashboard {
    /// Starts the global stats poller. `stats` is the snapshot fetched by
    /// the login probe, if any.
    pub fn new(
        client: ScalerClient,
        config: DashboardConfig,
        tx: UnboundedSender<Message>,
        epoch: u64,
        stats: Option<Stats>,
    ) -> Self {
        let user = client.credential().and_then(|c| c.username());
        let mut dashboard = Self {
            client,
            config,
            tx,
            epoch,
            user,
            tab: Tab::default(),
            header: Header::default(),
            stats: None,
            jobs: jobs_table(),
            audit: AuditView::new(),
            cluster: ClusterView::new(),
            job_logs: None,
            detail: None,
            stats_feed: None,
            tab_feed: None,
        };
        if let Some(stats) = stats {
            dashboard.apply_stats(stats);
        }
        dashboard.stats_feed = Some(dashboard.poll(
            "stats",
            dashboard.config.stats_interval,
            |client| async move { client.stats().await },
            |epoch, result| Message::Stats { epoch, result },
        ));
        dashboard
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn audit(&self) -> &AuditView {
        &self.audit
    }

    /// Spawns an interval poller whose results come back tagged with this
    /// session's epoch.
    fn poll<T, F, Fut, W>(&self, name: &str, period: Duration, fetch: F, wrap: W) -> Subscription
    where
        F: Fn(ScalerClient) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        W: Fn(u64, T) -> Message + Send + 'static,
    {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let epoch = self.epoch;
        Subscription::interval(
            name,
            period,
            move || fetch(client.clone()),
            move |result| tx.send(wrap(epoch, result)).is_ok(),
        )
    }

    // -------------------------------------------------------------------------
    // Tabs and feeds
    // -------------------------------------------------------------------------

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.tab == tab {
            return;
        }
        debug!("switching to tab {:?}", tab);
        self.end_resizes();
        self.tab = tab;
        self.restart_tab_feed();
    }

    /// (Re)starts the poller of the current tab; the first fetch is immediate.
    pub fn restart_tab_feed(&mut self) {
        if let Some(previous) = self.tab_feed.take() {
            previous.cancel();
        }
        self.tab_feed = match self.tab {
            Tab::Audit => Some(self.poll(
                "audit",
                self.config.audit_interval,
                |client| async move { client.audit(DEFAULT_AUDIT_LIMIT).await },
                |epoch, result| Message::Audit { epoch, result },
            )),
            Tab::Cluster => Some(self.poll(
                "cluster",
                self.config.cluster_interval,
                |client| async move { client.cluster_info().await },
                |epoch, result| Message::Cluster { epoch, result },
            )),
            Tab::Overview | Tab::Jobs => None,
        };
    }

    pub fn open_job_logs(&mut self, job: &str) {
        info!("opening logs for {}", job);
        self.job_logs = Some(JobLogs::new(job));
        self.restart_log_feed();
    }

    /// Restarts the job log poller for the viewer's current job and range.
    fn restart_log_feed(&mut self) {
        let Some((job, range)) = self
            .job_logs
            .as_ref()
            .map(|logs| (logs.view().job().to_string(), logs.view().time_range()))
        else {
            return;
        };

        let fetch_job = job.clone();
        let minutes = range.minutes();
        let feed = self.poll(
            &format!("logs:{}", job),
            self.config.logs_interval,
            move |client| {
                let job = fetch_job.clone();
                async move { client.job_logs(&job, minutes).await }
            },
            move |epoch, result| Message::JobLogs {
                epoch,
                job: job.clone(),
                range,
                result,
            },
        );
        if let Some(logs) = self.job_logs.as_mut() {
            logs.replace_feed(feed);
        }
    }

    pub fn open_audit_detail(&mut self, index: usize) {
        let Some(record) = self.audit.record(index).cloned() else {
            return;
        };
        let mut detail = AuditDetail::new(record);

        if let Some(path) = detail.record().log_file().map(str::to_string) {
            let client = self.client.clone();
            let tx = self.tx.clone();
            let epoch = self.epoch;
            let record_id = detail.record().id;
            detail.attach_fetch(Subscription::once(
                format!("audit-log:{}", record_id),
                async move { client.audit_log(&path).await },
                move |result| {
                    let _ = tx.send(Message::AuditLog {
                        epoch,
                        record_id,
                        result,
                    });
                },
            ));
        }
        self.detail = Some(detail);
    }

    /// Cancels every poller and closes the modals.
    pub fn shutdown(&mut self) {
        info!("stopping dashboard feeds");
        for feed in [self.stats_feed.take(), self.tab_feed.take()].into_iter().flatten() {
            feed.cancel();
        }
        self.job_logs = None;
        self.detail = None;
    }

    /// Names of the pollers currently running.
    pub fn active_feeds(&self) -> Vec<&str> {
        [self.stats_feed.as_ref(), self.tab_feed.as_ref()]
            .into_iter()
            .flatten()
            .map(Subscription::name)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    fn apply_stats(&mut self, stats: Stats) {
        self.jobs
            .set_rows(stats.jobs.iter().cloned().map(JobRow).collect());
        self.stats = Some(stats);
    }

    /// Applies a fetch result. Errors other than 401 (handled by the app)
    /// leave the previous data on screen.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Stats { result, .. } => match result {
                Ok(stats) => self.apply_stats(stats),
                Err(err) => warn!("stats fetch failed: {}", err),
            },
            Message::Audit { result, .. } => match result {
                Ok(records) => self.audit.set_records(records),
                Err(err) => {
                    warn!("audit fetch failed: {}", err);
                    self.audit.fetch_failed();
                }
            },
            Message::Cluster { result, .. } => match result {
                Ok(info) => self.cluster.set_info(info),
                Err(err) => {
                    warn!("cluster fetch failed: {}", err);
                    self.cluster.fetch_failed();
                }
            },
            Message::JobLogs {
                job, range, result, ..
            } => {
                let Some(logs) = self.job_logs.as_mut().filter(|l| l.accepts(&job, range)) else {
                    debug!("dropping logs for closed or changed viewer ({})", job);
                    return;
                };
                match result {
                    Ok(text) => logs.view_mut().set_logs(text),
                    Err(err) => {
                        warn!("log fetch for {} failed: {}", job, err);
                        logs.view_mut().fetch_failed();
                    }
                }
            }
            Message::AuditLog {
                record_id, result, ..
            } => {
                let Some(detail) = self
                    .detail
                    .as_mut()
                    .filter(|d| d.record().id == record_id)
                else {
                    return;
                };
                detail.set_log(result.map_err(|err| err.to_string()));
            }
            Message::Login { .. } => {}
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    fn active_table(&mut self) -> Option<&mut dyn Component> {
        match self.tab {
            Tab::Overview => None,
            Tab::Jobs => Some(&mut self.jobs),
            Tab::Audit => Some(self.audit.table_mut()),
            Tab::Cluster => Some(self.cluster.pods_mut()),
        }
    }

    /// Ends any resize drag, on every tab.
    fn end_resizes(&mut self) {
        self.jobs.end_resize();
        self.audit.table_mut().end_resize();
        self.cluster.pods_mut().end_resize();
    }

    fn table_config_open(&self) -> bool {
        match self.tab {
            Tab::Overview => false,
            Tab::Jobs => self.jobs.is_config_open(),
            Tab::Audit => self.audit.table().is_config_open(),
            Tab::Cluster => self.cluster.pods().is_config_open(),
        }
    }

    pub fn handle_input(&mut self, input: Input) -> DashboardAction {
        // A release ends a resize drag wherever it lands, modals included.
        let modal_open = self.detail.is_some() || self.job_logs.is_some();
        if modal_open && matches!(input, Input::Release { .. }) {
            self.end_resizes();
        }

        if let Some(detail) = self.detail.as_mut() {
            match input {
                Input::Key(key) => {
                    detail.on_key(&key);
                }
                Input::Press { x, y } => {
                    detail.on_press(x, y);
                }
                Input::Scroll {
                    direction, amount, ..
                } => {
                    detail.on_scroll(direction, amount);
                }
                _ => {}
            }
            if detail.is_closed() {
                self.detail = None;
            }
            return DashboardAction::None;
        }

        if let Some(logs) = self.job_logs.as_mut() {
            let view = logs.view_mut();
            match input {
                Input::Key(key) => {
                    view.on_key(&key);
                }
                Input::Press { x, y } => {
                    view.on_press(x, y);
                }
                Input::Scroll {
                    direction, amount, ..
                } => {
                    view.on_scroll(direction, amount);
                }
                _ => {}
            }
            self.drain_log_view_events();
            return DashboardAction::None;
        }

        let action = match input {
            Input::Key(key) => self.on_key(&key),
            Input::Press { x, y } => self.on_press(x, y),
            Input::Drag { x, y } => {
                if let Some(table) = self.active_table() {
                    table.on_drag(x, y);
                }
                DashboardAction::None
            }
            Input::Release { x, y } => {
                if let Some(table) = self.active_table() {
                    table.on_release(x, y);
                }
                self.end_resizes();
                DashboardAction::None
            }
            Input::Scroll {
                direction, amount, ..
            } => {
                if let Some(table) = self.active_table() {
                    table.on_scroll(direction, amount);
                }
                DashboardAction::None
            }
            Input::Resize { .. } => DashboardAction::None,
        };
        self.drain_table_events();
        action
    }

    fn on_key(&mut self, key: &KeyCombo) -> DashboardAction {
        if !self.table_config_open() && !key.modifiers.ctrl && !key.modifiers.alt {
            if let Key::Char(c) = key.key {
                if let Some(tab) = Tab::from_digit(c) {
                    self.switch_tab(tab);
                    return DashboardAction::None;
                }
                if c == 'r' {
                    self.restart_tab_feed();
                    return DashboardAction::None;
                }
            }
        }

        let handled = self
            .active_table()
            .map(|table| table.on_key(key))
            .unwrap_or(EventResult::Ignored);

        if !handled.is_handled()
            && self.tab == Tab::Jobs
            && (key.key == Key::Enter || key.is_char('l'))
        {
            self.open_selected_job_logs();
        }
        DashboardAction::None
    }

    fn on_press(&mut self, x: u16, y: u16) -> DashboardAction {
        if !self.table_config_open() {
            if let Some(tab) = self.header.tab_at(x, y) {
                self.switch_tab(tab);
                return DashboardAction::None;
            }
            if self.header.is_logout(x, y) {
                return DashboardAction::Logout;
            }
        }
        if let Some(table) = self.active_table() {
            table.on_press(x, y);
        }
        DashboardAction::None
    }

    fn open_selected_job_logs(&mut self) {
        let Some(name) = self
            .jobs
            .cursor_row()
            .and_then(|index| self.jobs.rows().get(index))
            .map(|row| row.0.name.clone())
        else {
            return;
        };
        self.open_job_logs(&name);
    }

    fn drain_table_events(&mut self) {
        for event in self.jobs.drain_events() {
            if let TableEvent::Action { index, id } = event {
                let name = self.jobs.rows().get(index).map(|row| row.0.name.clone());
                if let (LOGS_ACTION, Some(name)) = (id.as_str(), name) {
                    self.open_job_logs(&name);
                }
            }
        }

        for event in self.audit.table_mut().drain_events() {
            if let TableEvent::RowActivated { index } = event {
                self.open_audit_detail(index);
            }
        }

        // Pod rows have no activation; keep the queue empty.
        self.cluster.pods_mut().drain_events();
    }

    fn drain_log_view_events(&mut self) {
        let Some(logs) = self.job_logs.as_mut() else {
            return;
        };
        for event in logs.view_mut().drain_events() {
            match event {
                LogViewEvent::Close => {
                    self.job_logs = None;
                    return;
                }
                LogViewEvent::TimeRangeChanged(range) => {
                    debug!("log range changed to {:?}", range);
                    self.restart_log_feed();
                    return;
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn render(&mut self, buf: &mut Buffer, theme: &Theme) {
        let screen = buf.area();
        buf.fill(screen, theme.base());

        let status = self
            .stats
            .as_ref()
            .map(|s| s.metrics.status_msg.clone())
            .unwrap_or_default();
        let (header, rest) = screen.split_top(2);
        self.header
            .render(buf, header, self.tab, &status, self.user.as_deref(), theme);

        let body = Rect::new(rest.x + 1, rest.y + 1, rest.width.saturating_sub(2), rest.height.saturating_sub(2));
        let footer = rest.row(rest.height.saturating_sub(1));
        buf.put_str(footer.x, footer.y, FOOTER_HINT, footer.width, theme.muted());

        match (&self.stats, self.tab) {
            (None, _) => draw_centered(buf, body, LOADING_PLATFORM_TEXT, theme.muted()),
            (Some(stats), Tab::Overview) => overview::render(buf, body, &stats.metrics, theme),
            (Some(_), Tab::Jobs) => self.jobs.render(buf, body, theme),
            (Some(_), Tab::Audit) => self.audit.render(buf, body, theme),
            (Some(_), Tab::Cluster) => self.cluster.render(buf, body, theme),
        }

        if let Some(logs) = self.job_logs.as_mut() {
            logs.render(buf, theme);
        }
        if let Some(detail) = self.detail.as_mut() {
            detail.render(buf, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use kubejob_lib::error::ApiError;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;
    use crate::views::audit::LOADING_AUDIT_TEXT;
    use crate::views::cluster::LOADING_CLUSTER_TEXT;

    fn dashboard() -> (Dashboard, UnboundedReceiver<Message>) {
        let config = DashboardConfig {
            scaler_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = config.client().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (Dashboard::new(client, config, tx, 1, None), rx)
    }

    fn key(c: char) -> Input {
        Input::Key(KeyCombo::key(Key::Char(c)))
    }

    fn screen(dashboard: &mut Dashboard) -> String {
        let mut buf = Buffer::new(140, 30);
        dashboard.render(&mut buf, &Theme::DEFAULT);
        (0..buf.height())
            .map(|y| buf.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_release_after_tab_switch_ends_resize() {
        let (mut d, _rx) = dashboard();
        d.switch_tab(Tab::Jobs);
        assert!(d.jobs.begin_resize("name", 100));

        d.handle_input(key('3'));
        d.handle_input(Input::Release { x: 60, y: 10 });
        d.handle_input(key('2'));
        d.handle_input(Input::Drag { x: 80, y: 10 });

        assert_eq!(d.tab(), Tab::Jobs);
        assert!(!d.jobs.is_resizing());
        assert_eq!(d.jobs.effective_width("name"), Some(240));
    }

    #[tokio::test]
    async fn test_tab_switch_ends_resize() {
        let (mut d, _rx) = dashboard();
        d.switch_tab(Tab::Jobs);
        assert!(d.jobs.begin_resize("name", 100));

        d.switch_tab(Tab::Cluster);

        assert!(!d.jobs.is_resizing());
    }

    #[tokio::test]
    async fn test_release_under_modal_ends_resize() {
        let (mut d, _rx) = dashboard();
        d.switch_tab(Tab::Jobs);
        assert!(d.jobs.begin_resize("name", 100));
        d.open_job_logs("worker-a");

        d.handle_input(Input::Release { x: 60, y: 10 });

        assert!(!d.jobs.is_resizing());
    }

    #[tokio::test]
    async fn test_failed_audit_fetch_clears_loading() {
        let (mut d, _rx) = dashboard();
        d.apply_stats(Stats::default());
        d.switch_tab(Tab::Audit);
        assert!(screen(&mut d).contains(LOADING_AUDIT_TEXT));

        d.apply(Message::Audit {
            epoch: 1,
            result: Err(ApiError::http(500, "boom")),
        });

        assert!(d.audit().is_loaded());
        assert!(!screen(&mut d).contains(LOADING_AUDIT_TEXT));
    }

    #[tokio::test]
    async fn test_failed_cluster_fetch_clears_loading() {
        let (mut d, _rx) = dashboard();
        d.apply_stats(Stats::default());
        d.switch_tab(Tab::Cluster);
        assert!(screen(&mut d).contains(LOADING_CLUSTER_TEXT));

        d.apply(Message::Cluster {
            epoch: 1,
            result: Err(ApiError::http(503, "down")),
        });

        assert!(!screen(&mut d).contains(LOADING_CLUSTER_TEXT));
    }
}
