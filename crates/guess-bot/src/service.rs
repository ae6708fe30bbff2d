//! Game service
//!
//! Applies engine transitions to the session store and owns the restart
//! timers. Every transition for a user runs under the store lock; delivery
//! of messages happens after the lock is released.

use crate::error::Result;
use crate::game::{Action, GameRules, SessionChange, TimerDirective, Transition, engine};
use crate::session::{RestartTimer, SessionStore, SessionsGuard};
use bot_platform::MessagingPlatform;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Runs the guessing game for every user
#[derive(Clone)]
pub struct GameService {
    store: SessionStore,
    platform: Arc<dyn MessagingPlatform>,
    rules: Arc<GameRules>,
    restart_delay: Duration,
}

impl GameService {
    /// Create a new service
    pub fn new(
        store: SessionStore,
        platform: Arc<dyn MessagingPlatform>,
        rules: GameRules,
        restart_delay: Duration,
    ) -> Self {
        Self {
            store,
            platform,
            rules: Arc::new(rules),
            restart_delay,
        }
    }

    /// Session store backing this service
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Outbound messaging platform
    pub fn platform(&self) -> &Arc<dyn MessagingPlatform> {
        &self.platform
    }

    /// Game parameters
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Feed one text message from a user to the game
    ///
    /// Returns the messages to send back on the reply channel. Must be
    /// called from within a tokio runtime, since a win schedules a timer.
    pub fn handle_text(&self, user_id: &str, text: &str) -> Result<Action> {
        let mut sessions = self.store.write()?;
        let transition = engine::step(&self.rules, sessions.get(user_id), text);

        debug!(
            user_id = %user_id,
            command = transition.command.description(),
            "Handling message"
        );

        Ok(self.apply(&mut sessions, user_id, transition))
    }

    fn apply(
        &self,
        sessions: &mut SessionsGuard<'_>,
        user_id: &str,
        transition: Transition,
    ) -> Action {
        let Transition {
            change,
            action,
            timer,
            ..
        } = transition;

        match change {
            SessionChange::Unchanged => {}
            SessionChange::Started(session) => {
                info!(user_id = %user_id, "Game started");
                sessions.start(user_id, session);
            }
            SessionChange::Updated(session) => {
                sessions.update(user_id, session);
            }
            SessionChange::Ended => {
                if let Some(session) = sessions.remove(user_id) {
                    info!(
                        user_id = %user_id,
                        guesses = session.guess_count,
                        duration_secs = session.elapsed(Utc::now()).num_seconds(),
                        "Game ended"
                    );
                }
            }
        }

        match timer {
            TimerDirective::Keep => {}
            TimerDirective::Cancel => {
                sessions.disarm_timer(user_id);
            }
            TimerDirective::Schedule => {
                let timer_id = self.store.next_timer_id();
                let fire = self.clone().fire_restart(user_id.to_string(), timer_id);
                let restart = RestartTimer::schedule(timer_id, self.restart_delay, fire);
                debug!(
                    user_id = %user_id,
                    timer_id,
                    delay_secs = self.restart_delay.as_secs(),
                    "Restart scheduled"
                );
                sessions.arm_timer(user_id, restart);
            }
        }

        action
    }

    /// Timer body: restart the game and push the opening messages
    async fn fire_restart(self, user_id: String, timer_id: u64) {
        let texts = match self.claim_restart(&user_id, timer_id) {
            Ok(Some(texts)) => texts,
            Ok(None) => {
                debug!(user_id = %user_id, timer_id, "Restart no longer due");
                return;
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Restart failed");
                return;
            }
        };

        info!(user_id = %user_id, "Game restarted automatically");

        if let Err(e) = self.platform.push_message(&user_id, &texts).await {
            error!(
                user_id = %user_id,
                platform = self.platform.name(),
                error = %e,
                "Failed to push restart messages"
            );
        }
    }

    fn claim_restart(&self, user_id: &str, timer_id: u64) -> Result<Option<Vec<String>>> {
        let mut sessions = self.store.write()?;
        if !sessions.claim_timer(user_id, timer_id) {
            return Ok(None);
        }

        let transition = engine::restart_due(&self.rules, sessions.get(user_id));
        match self.apply(&mut sessions, user_id, transition) {
            Action::Send(texts) => Ok(Some(texts)),
            Action::Silent => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Delivery, RecordingPlatform};

    const DELAY: Duration = Duration::from_secs(10);

    fn service() -> (GameService, Arc<RecordingPlatform>) {
        let platform = Arc::new(RecordingPlatform::new());
        let service = GameService::new(
            SessionStore::new(),
            platform.clone(),
            GameRules::default(),
            DELAY,
        );
        (service, platform)
    }

    fn texts(action: Action) -> Vec<String> {
        match action {
            Action::Send(texts) => texts,
            Action::Silent => panic!("Expected messages, got silence"),
        }
    }

    #[tokio::test]
    async fn test_start_and_answer() {
        let (service, _) = service();

        let opening = texts(service.handle_text("U1", "start").unwrap());
        assert_eq!(opening.len(), 2);
        assert_eq!(opening[1], "500");

        let reply = texts(service.handle_text("U1", "Over").unwrap());
        assert_eq!(reply, vec!["250".to_string()]);

        let session = service.store().get("U1").unwrap();
        assert_eq!(session.upper_bound, 499);
        assert_eq!(session.guess_count, 1);
    }

    #[tokio::test]
    async fn test_no_session_ignored() {
        let (service, _) = service();

        assert_eq!(service.handle_text("U1", "Over").unwrap(), Action::Silent);
        assert_eq!(service.handle_text("U1", "終了").unwrap(), Action::Silent);
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn test_end_twice() {
        let (service, _) = service();
        service.handle_text("U1", "start").unwrap();

        let farewell = texts(service.handle_text("U1", "もう終わりにする").unwrap());
        assert_eq!(farewell, vec![service.rules().farewell()]);
        assert!(service.store().get("U1").is_none());

        assert_eq!(service.handle_text("U1", "終了").unwrap(), Action::Silent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_win_restarts_after_delay() {
        let (service, platform) = service();
        service.handle_text("U1", "start").unwrap();
        service.handle_text("U1", "Under").unwrap();

        assert_eq!(service.handle_text("U1", "クリア!").unwrap(), Action::Silent);
        assert!(service.store().get("U1").unwrap().awaiting_restart);

        tokio::time::sleep(DELAY - Duration::from_secs(1)).await;
        assert!(platform.deliveries().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;

        let deliveries = platform.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(
            deliveries[0],
            Delivery::Push {
                user_id: "U1".to_string(),
                texts: vec![service.rules().greeting(), "500".to_string()],
            }
        );

        let session = service.store().get("U1").unwrap();
        assert!(!session.awaiting_restart);
        assert_eq!(session.lower_bound, 1);
        assert_eq!(session.upper_bound, 1000);
        assert_eq!(session.last_guess, Some(500));
        assert_eq!(session.guess_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_cancels_restart() {
        let (service, platform) = service();
        service.handle_text("U1", "start").unwrap();
        service.handle_text("U1", "クリア").unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(service.handle_text("U1", "まだ?").unwrap(), Action::Silent);

        tokio::time::sleep(DELAY * 2).await;
        assert!(platform.deliveries().is_empty());

        let session = service.store().get("U1").unwrap();
        assert!(!session.awaiting_restart);
        assert_eq!(service.store().write().unwrap().timer_id("U1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_awaiting_cancels_restart() {
        let (service, platform) = service();
        service.handle_text("U1", "start").unwrap();
        service.handle_text("U1", "Over").unwrap();
        service.handle_text("U1", "クリア").unwrap();

        let opening = texts(service.handle_text("U1", "START").unwrap());
        assert_eq!(opening[1], "500");

        tokio::time::sleep(DELAY * 2).await;
        assert!(platform.deliveries().is_empty());
        assert!(!service.store().get("U1").unwrap().awaiting_restart);
    }

    #[tokio::test(start_paused = true)]
    async fn test_push_failure_keeps_restarted_session() {
        let (service, platform) = service();
        platform.fail_pushes();
        service.handle_text("U1", "start").unwrap();
        service.handle_text("U1", "クリア").unwrap();

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;

        assert!(platform.deliveries().is_empty());
        let session = service.store().get("U1").unwrap();
        assert!(!session.awaiting_restart);
        assert_eq!(session.last_guess, Some(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_users_are_independent() {
        let (service, platform) = service();
        service.handle_text("U1", "start").unwrap();
        service.handle_text("U2", "start").unwrap();
        service.handle_text("U1", "クリア").unwrap();
        service.handle_text("U2", "Under").unwrap();

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;

        let deliveries = platform.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert!(matches!(&deliveries[0], Delivery::Push { user_id, .. } if user_id == "U1"));
        assert_eq!(service.store().get("U2").unwrap().last_guess, Some(750));
    }
}
