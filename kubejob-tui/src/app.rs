//! Top-level application state.
//!
//! The app is either on the login screen or on the dashboard. Every
//! transition between the two bumps the session epoch, so results from
//! pollers of an earlier session are recognised and dropped.

use kubejob_lib::ScalerClient;
use kubejob_lib::error::LoginError;
use kubejob_lib::model::Stats;
use kubejob_lib::poll::Subscription;
use kubejob_ui::Buffer;
use kubejob_ui::Theme;
use kubejob_ui::components::Component;
use kubejob_ui::event::Input;
use log::error;
use log::info;
use log::trace;
use log::warn;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::dashboard::DashboardAction;
use crate::message::Message;
use crate::session::SessionStore;
use crate::views::alert::Alert;
use crate::views::login::LoginView;
use crate::views::login::Submission;

struct LoginScreen {
    view: LoginView,
    attempt: Option<Subscription>,
}

impl LoginScreen {
    fn new() -> Self {
        Self {
            view: LoginView::new(),
            attempt: None,
        }
    }
}

enum Screen {
    Login(LoginScreen),
    Dashboard(Box<Dashboard>),
}

pub struct App {
    config: DashboardConfig,
    session: SessionStore,
    tx: UnboundedSender<Message>,
    theme: Theme,
    epoch: u64,
    screen: Screen,
    alert: Option<Alert>,
    should_quit: bool,
}

impl App {
    pub fn new(config: DashboardConfig, session: SessionStore, tx: UnboundedSender<Message>) -> Self {
        Self {
            config,
            session,
            tx,
            theme: Theme::DEFAULT,
            epoch: 0,
            screen: Screen::Login(LoginScreen::new()),
            alert: None,
            should_quit: false,
        }
    }

    /// Enters the dashboard straight away if a credential was stored by an
    /// earlier run. The credential is not re-verified.
    pub async fn restore_session(&mut self) {
        match self.session.restore().await {
            Ok(Some(client)) => self.enter_dashboard(client, None),
            Ok(None) => info!("no stored session"),
            Err(err) => error!("failed to read stored session: {}", err),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.screen, Screen::Dashboard(_))
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.screen {
            Screen::Dashboard(dashboard) => Some(&**dashboard),
            Screen::Login(_) => None,
        }
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_ref().map(Alert::message)
    }

    fn enter_dashboard(&mut self, client: ScalerClient, stats: Option<Stats>) {
        self.epoch += 1;
        info!("entering dashboard (session {})", self.epoch);
        let dashboard = Dashboard::new(client, self.config.clone(), self.tx.clone(), self.epoch, stats);
        self.screen = Screen::Dashboard(Box::new(dashboard));
    }

    /// Drops the credential everywhere and returns to the login screen.
    pub async fn logout(&mut self) {
        if let Screen::Dashboard(dashboard) = &mut self.screen {
            info!("logging out; stopping {:?}", dashboard.active_feeds());
            dashboard.shutdown();
        }
        if let Err(err) = self.session.clear().await {
            error!("failed to clear stored credential: {}", err);
        }
        self.epoch += 1;
        self.screen = Screen::Login(LoginScreen::new());
    }

    fn submit_login(&mut self, submission: Submission) {
        let Screen::Login(login) = &mut self.screen else {
            return;
        };
        if submission.username.is_empty() || submission.password.is_empty() {
            self.alert = Some(Alert::new(LoginError::MissingFields.to_string()));
            return;
        }

        login.view.set_pending(true);
        let client = self.session.anonymous().clone();
        let tx = self.tx.clone();
        let epoch = self.epoch;
        login.attempt = Some(Subscription::once(
            "login",
            async move {
                client
                    .login(&submission.username, &submission.password)
                    .await
            },
            move |result| {
                let _ = tx.send(Message::Login { epoch, result });
            },
        ));
    }

    async fn finish_login(&mut self, result: Result<(ScalerClient, Stats), LoginError>) {
        let Screen::Login(login) = &mut self.screen else {
            return;
        };
        login.attempt = None;
        login.view.set_pending(false);

        match result {
            Ok((client, stats)) => {
                if let Err(err) = self.session.save(&client).await {
                    error!("failed to persist credential: {}", err);
                }
                self.enter_dashboard(client, Some(stats));
            }
            Err(err) => {
                warn!("login failed: {}", err);
                login.view.reset_password();
                self.alert = Some(Alert::new(err.to_string()));
            }
        }
    }

    /// Applies a background result.
    pub async fn handle_message(&mut self, message: Message) {
        if message.epoch() != self.epoch {
            trace!(
                "dropping stale {} result (session {}, now {})",
                message.source(),
                message.epoch(),
                self.epoch
            );
            return;
        }

        if let Message::Login { result, .. } = message {
            self.finish_login(result).await;
            return;
        }

        let unauthorized = message.fetch_error().is_some_and(|err| err.is_unauthorized());
        if unauthorized && self.is_authenticated() {
            warn!("{} fetch was rejected with 401; forcing logout", message.source());
            self.logout().await;
            return;
        }

        if let Screen::Dashboard(dashboard) = &mut self.screen {
            dashboard.apply(message);
        }
    }

    pub async fn handle_input(&mut self, input: Input) {
        if matches!(input, Input::Key(key) if key.is_ctrl('q')) {
            self.should_quit = true;
            return;
        }

        if let Some(alert) = self.alert.as_mut() {
            match input {
                Input::Key(key) => {
                    alert.on_key(&key);
                }
                Input::Press { x, y } => {
                    alert.on_press(x, y);
                }
                _ => {}
            }
            if alert.is_dismissed() {
                self.alert = None;
            }
            return;
        }

        let mut submission = None;
        let logout = match &mut self.screen {
            Screen::Login(login) => {
                match input {
                    Input::Key(key) => {
                        login.view.on_key(&key);
                    }
                    Input::Press { x, y } => {
                        login.view.on_press(x, y);
                    }
                    _ => {}
                }
                submission = login.view.take_submission();
                false
            }
            Screen::Dashboard(dashboard) => {
                let logout_key = matches!(input, Input::Key(key) if key.is_ctrl('l'));
                logout_key || dashboard.handle_input(input) == DashboardAction::Logout
            }
        };

        if logout {
            self.logout().await;
        } else if let Some(submission) = submission {
            self.submit_login(submission);
        }
    }

    pub fn render(&mut self, buf: &mut Buffer) {
        let theme = self.theme;
        match &mut self.screen {
            Screen::Login(login) => {
                let area = buf.area();
                login.view.render(buf, area, &theme);
            }
            Screen::Dashboard(dashboard) => dashboard.render(buf, &theme),
        }
        if let Some(alert) = self.alert.as_mut() {
            alert.render(buf, &theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use kubejob_lib::auth::Credential;
    use kubejob_lib::error::ApiError;
    use kubejob_lib::model::AuditRecord;
    use kubejob_ui::components::log_view::TimeRange;
    use kubejob_ui::event::Key;
    use kubejob_ui::event::KeyCombo;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;
    use crate::settings::AUTH_TOKEN_KEY;
    use crate::settings::SettingsProvider;
    use crate::views::Tab;

    /// An app whose pollers point at a port nothing listens on.
    fn app() -> (App, SettingsProvider, UnboundedReceiver<Message>) {
        let config = DashboardConfig {
            scaler_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let settings = SettingsProvider::in_memory();
        let client = config.client().unwrap();
        let session = SessionStore::new(settings.clone(), client);
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(config, session, tx), settings, rx)
    }

    async fn signed_in() -> (App, SettingsProvider, UnboundedReceiver<Message>) {
        let (mut app, settings, rx) = app();
        let token = Credential::from_login("admin", "admin").token().to_string();
        settings.set(AUTH_TOKEN_KEY, &token).await.unwrap();
        app.restore_session().await;
        assert!(app.is_authenticated());
        (app, settings, rx)
    }

    fn unauthorized() -> ApiError {
        ApiError::http(401, "Unauthorized")
    }

    async fn stored_token(settings: &SettingsProvider) -> Option<String> {
        settings.get(AUTH_TOKEN_KEY).await.unwrap()
    }

    #[tokio::test]
    async fn test_starts_on_login_without_stored_credential() {
        let (mut app, _settings, _rx) = app();
        app.restore_session().await;
        assert!(!app.is_authenticated());
    }

    #[tokio::test]
    async fn test_restored_session_waits_for_first_stats() {
        let (app, _settings, _rx) = signed_in().await;
        let dashboard = app.dashboard().unwrap();
        assert!(dashboard.stats().is_none());
        assert_eq!(dashboard.active_feeds(), vec!["stats"]);

        let mut app = app;
        let mut buf = Buffer::new(100, 30);
        app.render(&mut buf);
        let screen: String = (0..30).map(|y| buf.row_text(y)).collect();
        assert!(screen.contains(crate::dashboard::LOADING_PLATFORM_TEXT));
    }

    #[tokio::test]
    async fn test_unauthorized_audit_forces_logout() {
        let (mut app, settings, _rx) = signed_in().await;

        let epoch = app.epoch();
        app.handle_message(Message::Audit {
            epoch,
            result: Err(unauthorized()),
        })
        .await;

        assert!(!app.is_authenticated());
        assert_eq!(stored_token(&settings).await, None);
    }

    #[tokio::test]
    async fn test_unauthorized_from_any_poller_forces_logout() {
        let failures: [fn(u64) -> Message; 4] = [
            |epoch| Message::Stats {
                epoch,
                result: Err(unauthorized()),
            },
            |epoch| Message::Cluster {
                epoch,
                result: Err(unauthorized()),
            },
            |epoch| Message::JobLogs {
                epoch,
                job: "worker-a".into(),
                range: TimeRange::All,
                result: Err(unauthorized()),
            },
            |epoch| Message::AuditLog {
                epoch,
                record_id: 7,
                result: Err(unauthorized()),
            },
        ];

        for failure in failures {
            let (mut app, settings, _rx) = signed_in().await;
            let epoch = app.epoch();
            app.handle_message(failure(epoch)).await;

            assert!(!app.is_authenticated());
            assert_eq!(stored_token(&settings).await, None);
        }
    }

    #[tokio::test]
    async fn test_other_failures_keep_session_and_data() {
        let (mut app, settings, _rx) = signed_in().await;
        let epoch = app.epoch();

        let stats = Stats::default();
        app.handle_message(Message::Stats {
            epoch,
            result: Ok(stats.clone()),
        })
        .await;
        app.handle_message(Message::Stats {
            epoch,
            result: Err(ApiError::http(500, "boom")),
        })
        .await;

        assert!(app.is_authenticated());
        assert_eq!(app.dashboard().unwrap().stats(), Some(&stats));
        assert!(stored_token(&settings).await.is_some());
    }

    #[tokio::test]
    async fn test_stale_session_results_are_dropped() {
        let (mut app, _settings, _rx) = signed_in().await;
        let stale = app.epoch() - 1;

        app.handle_message(Message::Stats {
            epoch: stale,
            result: Err(unauthorized()),
        })
        .await;
        app.handle_message(Message::Audit {
            epoch: stale,
            result: Ok(vec![AuditRecord::default()]),
        })
        .await;

        assert!(app.is_authenticated());
        assert!(!app.dashboard().unwrap().audit().is_loaded());
    }

    #[tokio::test]
    async fn test_successful_login_persists_credential() {
        let (mut app, settings, _rx) = app();
        let client = app
            .session
            .anonymous()
            .with_credential(Credential::from_login("admin", "admin"));

        let epoch = app.epoch();
        app.handle_message(Message::Login {
            epoch,
            result: Ok((client, Stats::default())),
        })
        .await;

        assert!(app.is_authenticated());
        assert!(app.dashboard().unwrap().stats().is_some());
        assert_eq!(
            stored_token(&settings).await.as_deref(),
            Some("YWRtaW46YWRtaW4=")
        );
    }

    #[tokio::test]
    async fn test_empty_fields_alert_locally() {
        let (mut app, _settings, _rx) = app();

        app.handle_input(Input::Key(KeyCombo::key(Key::Enter))).await;

        assert_eq!(app.alert(), Some("Please enter both username and password"));
        assert!(!app.is_authenticated());

        app.handle_input(Input::Key(KeyCombo::key(Key::Enter))).await;
        assert_eq!(app.alert(), None);
    }

    #[tokio::test]
    async fn test_rejected_login_shows_alert() {
        let (mut app, _settings, _rx) = app();
        let epoch = app.epoch();

        app.handle_message(Message::Login {
            epoch,
            result: Err(LoginError::Rejected(unauthorized())),
        })
        .await;

        assert_eq!(app.alert(), Some("Invalid credentials / API unavailable"));
        assert!(!app.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_key_clears_session() {
        let (mut app, settings, _rx) = signed_in().await;

        app.handle_input(Input::Key(KeyCombo::key(Key::Char('l')).ctrl()))
            .await;

        assert!(!app.is_authenticated());
        assert_eq!(stored_token(&settings).await, None);
    }

    #[tokio::test]
    async fn test_tab_keys_switch_feeds() {
        let (mut app, _settings, _rx) = signed_in().await;

        app.handle_input(Input::Key(KeyCombo::key(Key::Char('3')))).await;
        let dashboard = app.dashboard().unwrap();
        assert_eq!(dashboard.tab(), Tab::Audit);
        assert_eq!(dashboard.active_feeds(), vec!["stats", "audit"]);

        app.handle_input(Input::Key(KeyCombo::key(Key::Char('1')))).await;
        assert_eq!(app.dashboard().unwrap().active_feeds(), vec!["stats"]);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let (mut app, _settings, _rx) = app();
        app.handle_input(Input::Key(KeyCombo::key(Key::Char('q')).ctrl()))
            .await;
        assert!(app.should_quit());
    }
}
