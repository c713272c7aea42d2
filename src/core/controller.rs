//! Sleep session lifecycle: start, stop, rate, clear.
//!
//! Every store call runs on the blocking pool and the outcome is published
//! through `watch` channels, so any number of observers can follow `state`,
//! `tonight`, the full history and one-shot navigation signals.
//!
//! Actions take `&mut self`; a read-modify-write on a record happens inside a
//! single blocking task that holds the store lock for its whole duration.

use crate::db::store::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::quality::SleepQuality;
use crate::models::sleep_night::SleepNight;
use crate::utils::time::Clock;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No night is being tracked.
    Idle,
    /// Tracking in progress for this night.
    Open(SleepNight),
    /// Tracking stopped, waiting for a rating of the night with this id.
    ClosedUnrated(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Ask the user to rate the night with this id.
    ToQuality(i64),
    /// Rating done, go back to the tracker.
    ToTracker,
}

pub struct SessionController<S: SessionStore> {
    store: Arc<Mutex<S>>,
    clock: Arc<dyn Clock>,
    state: watch::Sender<SessionState>,
    tonight: watch::Sender<Option<SleepNight>>,
    nights: watch::Sender<Vec<SleepNight>>,
    navigation: watch::Sender<Option<Navigation>>,
}

impl<S: SessionStore> SessionController<S> {
    /// Build a controller and recover the session slot from the store:
    /// an open night resumes in `Open`, anything else starts `Idle`.
    pub async fn new(store: S, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let store = Arc::new(Mutex::new(store));

        let (open, nights) = run_blocking(&store, |s| Ok((s.get_open()?, s.get_all()?))).await?;

        let state = match &open {
            Some(night) => {
                tracing::debug!(id = night.id, "resuming open night");
                SessionState::Open(night.clone())
            }
            None => SessionState::Idle,
        };

        Ok(Self {
            store,
            clock,
            state: watch::channel(state).0,
            tonight: watch::channel(open).0,
            nights: watch::channel(nights).0,
            navigation: watch::channel(None).0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn tonight(&self) -> Option<SleepNight> {
        self.tonight.borrow().clone()
    }

    pub fn nights(&self) -> Vec<SleepNight> {
        self.nights.borrow().clone()
    }

    pub fn navigation(&self) -> Option<Navigation> {
        *self.navigation.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn subscribe_tonight(&self) -> watch::Receiver<Option<SleepNight>> {
        self.tonight.subscribe()
    }

    pub fn subscribe_nights(&self) -> watch::Receiver<Vec<SleepNight>> {
        self.nights.subscribe()
    }

    pub fn subscribe_navigation(&self) -> watch::Receiver<Option<Navigation>> {
        self.navigation.subscribe()
    }

    /// Observers call this once they have acted on a navigation signal.
    pub fn done_navigating(&self) {
        self.navigation.send_replace(None);
    }

    /// Start tracking tonight. While a night is already open this is a no-op
    /// returning that night.
    pub async fn start_tracking(&mut self) -> AppResult<SleepNight> {
        if let SessionState::Open(night) = self.state() {
            tracing::debug!(id = night.id, "start ignored: night already open");
            return Ok(night);
        }

        let now = self.clock.now_millis();
        let (tonight, nights) = self
            .with_store(move |s| {
                // Never leave two open nights behind, even if the slot was stale.
                if let Some(open) = s.get_open()? {
                    return Ok((open, s.get_all()?));
                }

                let id = s.insert(&SleepNight::open_at(now))?;
                s.audit("start", &format!("night #{id}"), "Sleep tracking started");

                let tonight = s.get_open()?.ok_or(AppError::NotFound(id))?;
                Ok((tonight, s.get_all()?))
            })
            .await?;

        tracing::info!(id = tonight.id, "sleep tracking started");

        self.tonight.send_replace(Some(tonight.clone()));
        self.nights.send_replace(nights);
        self.state.send_replace(SessionState::Open(tonight.clone()));
        self.navigation.send_replace(None);

        Ok(tonight)
    }

    /// Close the open night. Returns `None` (and does nothing) when idle, or
    /// when the night was already closed through another handle on the store.
    pub async fn stop_tracking(&mut self) -> AppResult<Option<SleepNight>> {
        let open = match self.state() {
            SessionState::Open(night) => night,
            _ => {
                tracing::debug!("stop ignored: no open night");
                return Ok(None);
            }
        };

        let id = open.id;
        let now = self.clock.now_millis();
        let result = self
            .with_store(move |s| {
                let mut night = s.get(id)?.ok_or(AppError::NotFound(id))?;
                // closed elsewhere since the slot was loaded: a finalized night is never rewritten
                if !night.is_open() {
                    return Ok((None, s.get_all()?));
                }
                // end must differ from start, otherwise the night would still read as open
                night.end_time_millis = now.max(night.start_time_millis + 1);
                s.update(&night)?;
                s.audit("stop", &format!("night #{id}"), "Sleep tracking stopped");
                Ok((Some(night), s.get_all()?))
            })
            .await;

        let (closed, nights) = match result {
            Ok(v) => v,
            Err(e) => return Err(self.reset_on_missing(e).await),
        };

        let Some(closed) = closed else {
            tracing::debug!(id, "stop ignored: night already closed");
            self.tonight.send_replace(None);
            self.nights.send_replace(nights);
            self.state.send_replace(SessionState::Idle);
            return Ok(None);
        };

        tracing::info!(id, duration_ms = closed.duration_millis(), "sleep tracking stopped");

        self.tonight.send_replace(None);
        self.nights.send_replace(nights);
        self.state.send_replace(SessionState::ClosedUnrated(id));
        self.navigation.send_replace(Some(Navigation::ToQuality(id)));

        Ok(Some(closed))
    }

    /// Rate the night that was just stopped.
    pub async fn rate(&mut self, quality: i32) -> AppResult<SleepNight> {
        let id = match self.state() {
            SessionState::ClosedUnrated(id) => id,
            _ => {
                return Err(AppError::Validation(
                    "no stopped night is waiting for a rating".to_string(),
                ));
            }
        };
        self.rate_night(id, quality).await
    }

    /// Rate a specific night. The rating is validated before anything is
    /// written; open nights and nights that already carry a rating are refused.
    pub async fn rate_night(&mut self, id: i64, quality: i32) -> AppResult<SleepNight> {
        let quality = SleepQuality::parse(quality)?;

        let result = self
            .with_store(move |s| {
                let mut night = s.get(id)?.ok_or(AppError::NotFound(id))?;

                if night.is_open() {
                    return Err(AppError::Validation(format!(
                        "night #{id} is still being tracked"
                    )));
                }
                if night.is_rated() {
                    return Err(AppError::Validation(format!(
                        "night #{id} is already rated"
                    )));
                }

                night.sleep_quality = quality.value();
                s.update(&night)?;
                s.audit(
                    "rate",
                    &format!("night #{id}"),
                    &format!("Rated {} ({})", quality.value(), quality.label()),
                );
                Ok((night, s.get_all()?))
            })
            .await;

        let (rated, nights) = match result {
            Ok(v) => v,
            Err(e) => return Err(self.reset_on_missing(e).await),
        };

        tracing::info!(id, quality = rated.sleep_quality, "night rated");

        self.nights.send_replace(nights);
        if matches!(self.state(), SessionState::ClosedUnrated(_)) {
            self.state.send_replace(SessionState::Idle);
        }
        self.navigation.send_replace(Some(Navigation::ToTracker));

        Ok(rated)
    }

    /// Delete every night and return to `Idle`.
    pub async fn clear_all(&mut self) -> AppResult<()> {
        let nights = self
            .with_store(|s| {
                s.clear()?;
                s.audit("clear", "sleep_nights", "All nights deleted");
                s.get_all()
            })
            .await?;

        tracing::info!("all nights cleared");

        self.tonight.send_replace(None);
        self.nights.send_replace(nights);
        self.state.send_replace(SessionState::Idle);
        self.navigation.send_replace(None);

        Ok(())
    }

    /// Most recent closed night still waiting for a rating.
    pub async fn latest_unrated(&self) -> AppResult<Option<SleepNight>> {
        self.with_store(|s| s.latest_unrated()).await
    }

    /// Re-read the history from the store and publish it.
    pub async fn refresh(&self) -> AppResult<Vec<SleepNight>> {
        let nights = self.with_store(|s| s.get_all()).await?;
        self.nights.send_replace(nights.clone());
        Ok(nights)
    }

    /// A record vanished under us: drop back to `Idle` and surface the error.
    /// Only a slot that points at the missing id is reset.
    async fn reset_on_missing(&self, err: AppError) -> AppError {
        let AppError::NotFound(id) = err else {
            return err;
        };

        let targets_missing = match self.state() {
            SessionState::Open(night) => night.id == id,
            SessionState::ClosedUnrated(pending) => pending == id,
            SessionState::Idle => false,
        };

        if targets_missing {
            tracing::warn!(id, "night disappeared, resetting session");
            self.tonight.send_replace(None);
            self.state.send_replace(SessionState::Idle);
            if let Ok(nights) = self.with_store(|s| s.get_all()).await {
                self.nights.send_replace(nights);
            }
        }
        err
    }

    async fn with_store<T, F>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut S) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking(&self.store, func).await
    }
}

async fn run_blocking<S, T, F>(store: &Arc<Mutex<S>>, func: F) -> AppResult<T>
where
    S: SessionStore,
    F: FnOnce(&mut S) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || {
        let mut guard = store
            .lock()
            .map_err(|_| AppError::Task("session store lock poisoned".to_string()))?;
        func(&mut *guard)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::SqliteStore;
    use crate::utils::time::ManualClock;

    async fn controller(clock: Arc<ManualClock>) -> SessionController<SqliteStore> {
        let store = SqliteStore::in_memory().unwrap();
        SessionController::new(store, clock).await.unwrap()
    }

    #[tokio::test]
    async fn full_night_lifecycle() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        assert_eq!(ctl.state(), SessionState::Idle);

        let tonight = ctl.start_tracking().await.unwrap();
        assert_eq!(tonight.start_time_millis, 1_000);
        assert_eq!(tonight.end_time_millis, 1_000);
        assert_eq!(ctl.tonight(), Some(tonight.clone()));

        clock.set(5_000);
        let closed = ctl.stop_tracking().await.unwrap().unwrap();
        assert_eq!(closed.id, tonight.id);
        assert_eq!(closed.start_time_millis, 1_000);
        assert_eq!(closed.end_time_millis, 5_000);
        assert_eq!(closed.sleep_quality, -1);
        assert_eq!(ctl.state(), SessionState::ClosedUnrated(tonight.id));
        assert_eq!(ctl.navigation(), Some(Navigation::ToQuality(tonight.id)));

        let rated = ctl.rate(3).await.unwrap();
        assert_eq!(rated.sleep_quality, 3);
        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(ctl.navigation(), Some(Navigation::ToTracker));
        assert_eq!(ctl.nights(), vec![rated]);

        ctl.done_navigating();
        assert_eq!(ctl.navigation(), None);
    }

    #[tokio::test]
    async fn every_valid_rating_closes_the_night_forward_in_time() {
        for q in 0..=5 {
            let clock = Arc::new(ManualClock::new(10_000));
            let mut ctl = controller(clock.clone()).await;
            ctl.start_tracking().await.unwrap();
            // same instant: end still has to move past start
            ctl.stop_tracking().await.unwrap();
            let night = ctl.rate(q).await.unwrap();
            assert!(night.end_time_millis > night.start_time_millis);
            assert_eq!(night.sleep_quality, q);
        }
    }

    #[tokio::test]
    async fn start_twice_keeps_a_single_open_night() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;

        let first = ctl.start_tracking().await.unwrap();
        clock.advance(60_000);
        let second = ctl.start_tracking().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(ctl.nights().len(), 1);
    }

    #[tokio::test]
    async fn stop_while_idle_is_a_no_op() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock).await;

        assert_eq!(ctl.stop_tracking().await.unwrap(), None);
        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(ctl.navigation(), None);
    }

    #[tokio::test]
    async fn out_of_range_rating_leaves_record_untouched() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        let night = ctl.start_tracking().await.unwrap();
        clock.set(5_000);
        ctl.stop_tracking().await.unwrap();

        for bad in [-1, 6, 42] {
            assert!(matches!(ctl.rate(bad).await, Err(AppError::Validation(_))));
        }

        assert_eq!(ctl.state(), SessionState::ClosedUnrated(night.id));
        let stored = ctl.refresh().await.unwrap();
        assert_eq!(stored[0].sleep_quality, -1);
    }

    #[tokio::test]
    async fn clear_all_empties_history_and_goes_idle() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        ctl.start_tracking().await.unwrap();
        clock.set(2_000);
        ctl.stop_tracking().await.unwrap();
        ctl.start_tracking().await.unwrap();

        ctl.clear_all().await.unwrap();

        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(ctl.tonight(), None);
        assert!(ctl.refresh().await.unwrap().is_empty());
        // idempotent
        ctl.clear_all().await.unwrap();
    }

    #[tokio::test]
    async fn restart_resumes_the_open_night() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut store = SqliteStore::in_memory().unwrap();
        let id = store.insert(&SleepNight::open_at(1_000)).unwrap();

        let mut ctl = SessionController::new(store, clock.clone()).await.unwrap();
        assert!(matches!(ctl.state(), SessionState::Open(ref n) if n.id == id));

        clock.set(5_000);
        let closed = ctl.stop_tracking().await.unwrap().unwrap();
        assert_eq!(closed.id, id);
        assert_eq!(closed.end_time_millis, 5_000);
    }

    #[tokio::test]
    async fn missing_night_resets_to_idle() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        ctl.start_tracking().await.unwrap();
        clock.set(5_000);
        let closed = ctl.stop_tracking().await.unwrap().unwrap();

        // wipe the row behind the controller's back
        ctl.with_store(|s| s.clear()).await.unwrap();

        assert!(matches!(ctl.rate(2).await, Err(AppError::NotFound(id)) if id == closed.id));
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn rated_nights_cannot_be_rated_again() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        ctl.start_tracking().await.unwrap();
        clock.set(5_000);
        let closed = ctl.stop_tracking().await.unwrap().unwrap();
        ctl.rate(4).await.unwrap();

        assert!(matches!(
            ctl.rate_night(closed.id, 1).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(ctl.refresh().await.unwrap()[0].sleep_quality, 4);
    }

    #[tokio::test]
    async fn open_night_cannot_be_rated() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock).await;
        let night = ctl.start_tracking().await.unwrap();

        assert!(matches!(
            ctl.rate_night(night.id, 3).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(ctl.state(), SessionState::Open(_)));
    }

    #[tokio::test]
    async fn observers_see_published_state() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        let mut state_rx = ctl.subscribe_state();
        let mut nav_rx = ctl.subscribe_navigation();

        ctl.start_tracking().await.unwrap();
        assert!(state_rx.has_changed().unwrap());
        assert!(matches!(*state_rx.borrow_and_update(), SessionState::Open(_)));

        clock.set(9_000);
        let closed = ctl.stop_tracking().await.unwrap().unwrap();
        nav_rx.changed().await.unwrap();
        assert_eq!(*nav_rx.borrow(), Some(Navigation::ToQuality(closed.id)));
    }

    #[tokio::test]
    async fn stale_controller_does_not_rewrite_a_closed_night() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nights.sqlite");
        let db = db.to_str().unwrap();
        let clock = Arc::new(ManualClock::new(1_000));

        let mut first =
            SessionController::new(SqliteStore::open(db).unwrap(), clock.clone()).await.unwrap();
        let night = first.start_tracking().await.unwrap();
        let mut second =
            SessionController::new(SqliteStore::open(db).unwrap(), clock.clone()).await.unwrap();
        assert!(matches!(second.state(), SessionState::Open(ref n) if n.id == night.id));

        clock.set(5_000);
        first.stop_tracking().await.unwrap();
        first.rate(3).await.unwrap();

        clock.set(99_000);
        assert_eq!(second.stop_tracking().await.unwrap(), None);
        assert_eq!(second.state(), SessionState::Idle);
        assert_eq!(second.tonight(), None);
        assert_eq!(second.navigation(), None);

        let stored = second.refresh().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].end_time_millis, 5_000);
        assert_eq!(stored[0].sleep_quality, 3);
    }

    #[tokio::test]
    async fn starting_a_new_night_drops_the_pending_rating_prompt() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        ctl.start_tracking().await.unwrap();
        clock.set(5_000);
        let closed = ctl.stop_tracking().await.unwrap().unwrap();
        assert_eq!(ctl.navigation(), Some(Navigation::ToQuality(closed.id)));

        clock.set(90_000);
        let next = ctl.start_tracking().await.unwrap();
        assert_ne!(next.id, closed.id);
        assert_eq!(ctl.state(), SessionState::Open(next));
        assert_eq!(ctl.navigation(), None);
    }

    #[tokio::test]
    async fn latest_unrated_finds_the_stopped_night() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut ctl = controller(clock.clone()).await;
        ctl.start_tracking().await.unwrap();
        clock.set(3_000);
        let closed = ctl.stop_tracking().await.unwrap().unwrap();

        let pending = ctl.latest_unrated().await.unwrap().unwrap();
        assert_eq!(pending.id, closed.id);
    }
}
