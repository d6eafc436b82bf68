//! Collaborators the room calls out to.
//!
//! Rendering, menus and storage belong to the host application. The room
//! only tells the host *when* something has to happen.

use super::session::PlayerSession;
use super::Modality;
use std::cell::RefCell;
use std::rc::Rc;

/// Outbound calls made by the room's state hooks.
pub trait RoomHost {
    /// Offer the modalities that have not been completed yet.
    fn refresh_menu(&mut self, open: &[Modality]);

    /// Update the solved-count label.
    fn show_progress(&mut self, solved: usize, total: usize);

    /// Persist the world anchors of every placed task.
    fn persist_anchors(&mut self);

    /// Store the player's session record.
    fn save_session(&mut self, session: &PlayerSession);

    /// Leave gameplay and go back to the application's home screen.
    fn return_home(&mut self);
}

/// One call received by a [`RecordingHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    MenuRefreshed(Vec<Modality>),
    Progress { solved: usize, total: usize },
    AnchorsPersisted,
    SessionSaved(PlayerSession),
    ReturnedHome,
}

/// Host that records every call. Clones share the same log, so one clone can
/// be handed to the room and another kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    events: Rc<RefCell<Vec<HostEvent>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// Events other than per-tick progress updates.
    pub fn milestones(&self) -> Vec<HostEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| !matches!(event, HostEvent::Progress { .. }))
            .cloned()
            .collect()
    }

    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            HostEvent::Progress { solved, total } => Some((*solved, *total)),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl RoomHost for RecordingHost {
    fn refresh_menu(&mut self, open: &[Modality]) {
        self.push(HostEvent::MenuRefreshed(open.to_vec()));
    }

    fn show_progress(&mut self, solved: usize, total: usize) {
        self.push(HostEvent::Progress { solved, total });
    }

    fn persist_anchors(&mut self) {
        self.push(HostEvent::AnchorsPersisted);
    }

    fn save_session(&mut self, session: &PlayerSession) {
        self.push(HostEvent::SessionSaved(session.clone()));
    }

    fn return_home(&mut self) {
        self.push(HostEvent::ReturnedHome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let host = RecordingHost::new();
        let mut handed_out = host.clone();

        handed_out.persist_anchors();
        handed_out.show_progress(1, 3);
        handed_out.return_home();

        assert_eq!(host.events().len(), 3);
        assert_eq!(
            host.milestones(),
            vec![HostEvent::AnchorsPersisted, HostEvent::ReturnedHome]
        );
        assert_eq!(host.last_progress(), Some((1, 3)));

        host.clear();
        assert!(handed_out.events().is_empty());
    }
}
