//! Snapshot history for the drawing session

use tracing::{debug, warn};

use super::DrawingSession;

impl DrawingSession {
    /// Record the current buffer before a gesture changes it
    pub(crate) fn push_snapshot(&mut self) {
        if let Some(surface) = self.surface.as_ref() {
            self.history.push(surface.snapshot());
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Restore the buffer to the state before the most recent gesture.
    ///
    /// Any gesture in progress is abandoned and a pending prune is cancelled.
    /// Returns true if a snapshot was restored.
    pub fn undo(&mut self) -> bool {
        if self.surface.is_none() {
            return false;
        }
        self.cancel_pending_prune();
        if self.stroke.take().is_some() {
            debug!("undo: dropping gesture in progress");
        }
        let Some(snapshot) = self.history.pop() else {
            debug!("undo: no entries available");
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if !surface.restore(&snapshot) {
            warn!(
                "undo: snapshot is {}x{} but buffer is {}x{}, ignoring",
                snapshot.width(),
                snapshot.height(),
                surface.width,
                surface.height
            );
            return false;
        }
        debug!("undo: restored, {} entries left", self.history.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{cut_session, drag, write_session};
    use crate::types::StrokePoint;

    #[test]
    fn test_undo_restores_each_gesture() {
        let mut session = cut_session(100.0);
        let initial = session.surface().unwrap().snapshot();
        let mut states = vec![initial.clone()];
        let strokes: [&[(f64, f64)]; 3] = [
            &[(20.0, 20.0), (30.0, 25.0), (40.0, 30.0), (50.0, 35.0)],
            &[(70.0, 20.0), (70.0, 35.0), (70.0, 50.0)],
            &[(20.0, 80.0), (35.0, 80.0), (50.0, 80.0), (65.0, 80.0)],
        ];
        let mut t = 0.0;
        for stroke in strokes {
            t = drag(&mut session, stroke, t) + 100.0;
            // let each prune land before the next snapshot
            session.poll(t);
            states.push(session.surface().unwrap().snapshot());
        }
        assert_eq!(session.history_len(), 3);

        states.pop();
        for expected in states.iter().rev() {
            assert!(session.undo());
            assert_eq!(&session.surface().unwrap().snapshot(), expected);
        }
        assert_eq!(session.surface().unwrap().snapshot(), initial);
        assert!(!session.can_undo());
        // one more is a no-op
        assert!(!session.undo());
        assert_eq!(session.surface().unwrap().snapshot(), initial);
    }

    #[test]
    fn test_undo_cancels_pending_prune() {
        let mut session = cut_session(100.0);
        drag(&mut session, &[(20.0, 50.0), (40.0, 50.0), (60.0, 50.0)], 0.0);
        assert!(session.is_processing());
        session.undo();
        assert!(!session.is_processing());
        assert!(session.poll(1000.0).is_none());
    }

    #[test]
    fn test_undo_mid_gesture_drops_it() {
        let mut session = write_session();
        let before = session.surface().unwrap().snapshot();
        session.pointer_down(StrokePoint::new(50.0, 50.0, 0.0));
        session.pointer_move(StrokePoint::new(80.0, 50.0, 16.0));
        assert!(session.undo());
        assert!(!session.is_drawing());
        assert_eq!(session.surface().unwrap().snapshot(), before);

        // later moves paint nothing
        session.pointer_move(StrokePoint::new(120.0, 50.0, 32.0));
        assert_eq!(session.surface().unwrap().snapshot(), before);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = write_session();
        for i in 0..15 {
            let y = 10.0 + i as f64 * 5.0;
            drag(&mut session, &[(20.0, y), (40.0, y)], i as f64 * 100.0);
        }
        assert_eq!(session.history_len(), 10);
    }
}
