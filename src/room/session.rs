//! Session-level data shared across rooms and menus.
//!
//! [`SessionContext`] is handed to the room when it is built and handed back
//! by [`Room::into_session`](crate::room::Room::into_session); nothing here
//! is global.

use super::Modality;
use crate::task::TaskReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

/// Record of one play-through of a modality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub id: Uuid,
    pub player: String,
    pub modality: Modality,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Time spent playing, paused time excluded
    pub duration: Duration,
    pub completed: bool,
    pub tasks: Vec<TaskReport>,
}

impl PlayerSession {
    fn new(player: &str, modality: Modality) -> Self {
        Self {
            id: Uuid::new_v4(),
            player: player.to_string(),
            modality,
            started_at: Utc::now(),
            finished_at: None,
            duration: Duration::ZERO,
            completed: false,
            tasks: Vec::new(),
        }
    }
}

/// Player identity, completion flags and session records.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub player: String,
    press_solved: bool,
    pinch_slide_solved: bool,
    sessions: Vec<PlayerSession>,
    active: Option<PlayerSession>,
}

impl SessionContext {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            ..Self::default()
        }
    }

    pub fn is_solved(&self, modality: Modality) -> bool {
        match modality {
            Modality::Press => self.press_solved,
            Modality::PinchSlide => self.pinch_slide_solved,
        }
    }

    /// Modalities the player has not completed yet, in menu order.
    pub fn open_modalities(&self) -> Vec<Modality> {
        Modality::ALL
            .into_iter()
            .filter(|modality| !self.is_solved(*modality))
            .collect()
    }

    /// The session currently being played, if any.
    pub fn active(&self) -> Option<&PlayerSession> {
        self.active.as_ref()
    }

    /// Finished and abandoned sessions, oldest first.
    pub fn sessions(&self) -> &[PlayerSession] {
        &self.sessions
    }

    pub(crate) fn mark_solved(&mut self, modality: Modality) {
        match modality {
            Modality::Press => self.press_solved = true,
            Modality::PinchSlide => self.pinch_slide_solved = true,
        }
    }

    /// Allocate a fresh session record and start its timer.
    pub(crate) fn begin(&mut self, modality: Modality) {
        if self.active.is_some() {
            warn!(player = %self.player, "new session started over an unfinished one");
            self.abandon();
        }
        self.active = Some(PlayerSession::new(&self.player, modality));
    }

    pub(crate) fn tick(&mut self, delta: Duration) {
        if let Some(session) = self.active.as_mut() {
            session.duration += delta;
        }
    }

    pub(crate) fn record_tasks(&mut self, reports: Vec<TaskReport>) {
        if let Some(session) = self.active.as_mut() {
            session.tasks = reports;
        }
    }

    /// Close the active session as completed and archive it.
    pub(crate) fn finish(&mut self) -> Option<&PlayerSession> {
        let mut session = self.active.take()?;
        session.completed = true;
        session.finished_at = Some(Utc::now());
        self.sessions.push(session);
        self.sessions.last()
    }

    /// Close the active session without completing it.
    pub(crate) fn abandon(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.finished_at = Some(Utc::now());
            self.sessions.push(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_offers_every_modality() {
        let session = SessionContext::new("ada");
        assert_eq!(
            session.open_modalities(),
            vec![Modality::Press, Modality::PinchSlide]
        );
        assert!(session.active().is_none());
    }

    #[test]
    fn solved_modalities_leave_the_menu() {
        let mut session = SessionContext::new("ada");
        session.mark_solved(Modality::Press);

        assert!(session.is_solved(Modality::Press));
        assert!(!session.is_solved(Modality::PinchSlide));
        assert_eq!(session.open_modalities(), vec![Modality::PinchSlide]);
    }

    #[test]
    fn begin_tick_finish_archives_completed_session() {
        let mut session = SessionContext::new("ada");
        session.begin(Modality::PinchSlide);
        session.tick(Duration::from_secs(2));
        session.tick(Duration::from_secs(3));

        let finished = session.finish().unwrap().clone();

        assert!(finished.completed);
        assert!(finished.finished_at.is_some());
        assert_eq!(finished.duration, Duration::from_secs(5));
        assert_eq!(finished.player, "ada");
        assert!(session.active().is_none());
        assert_eq!(session.sessions().len(), 1);
    }

    #[test]
    fn beginning_twice_abandons_the_first() {
        let mut session = SessionContext::new("ada");
        session.begin(Modality::Press);
        session.begin(Modality::Press);

        assert_eq!(session.sessions().len(), 1);
        assert!(!session.sessions()[0].completed);
        assert!(session.active().is_some());
    }

    #[test]
    fn finish_without_active_session_is_none() {
        let mut session = SessionContext::new("ada");
        assert!(session.finish().is_none());
    }

    #[test]
    fn session_serializes_correctly() {
        let mut session = SessionContext::new("ada");
        session.begin(Modality::Press);
        session.finish();

        let json = serde_json::to_string(&session).unwrap();
        let back: SessionContext = serde_json::from_str(&json).unwrap();

        assert_eq!(back.sessions(), session.sessions());
    }
}
