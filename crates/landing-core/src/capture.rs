#![forbid(unsafe_code)]

//! Deterministic pointer/touch capture for swipe gestures.
//!
//! This module turns platform pointer lifecycle signals (touch start/move/end,
//! pointer down/move/up/cancel) into [`DragSignal`] values while enforcing:
//! - one active pointer at a time,
//! - only the activation button starts a drag for mouse-like pointers, and
//! - a structured log record for every dispatch, forwarded or ignored.
//!
//! The capture does not interpret movement. Whether a gesture is a horizontal
//! swipe or a page scroll is decided by the carousel, which calls
//! [`PointerCapture::release`] when it abandons a drag.

use tracing::trace;

/// Pointer position in CSS pixels, relative to any fixed origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Button reported with a pointer-down. Touch contacts report `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Drag lifecycle signal forwarded to the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSignal {
    Start(PointerPosition),
    Move(PointerPosition),
    End,
    Cancel,
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Release,
}

/// Deterministic reason why an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureIgnoredReason {
    ButtonNotAllowed,
    ActivePointerInProgress,
    NoActivePointer,
    PointerMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Forwarded,
    Released,
    Ignored(CaptureIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureLogEntry {
    pub phase: CapturePhase,
    /// Sequence number, assigned only to forwarded signals.
    pub sequence: Option<u64>,
    pub pointer_id: Option<i32>,
    pub position: Option<PointerPosition>,
    pub outcome: CaptureOutcome,
}

/// Result of one lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureDispatch {
    pub signal: Option<DragSignal>,
    pub log: CaptureLogEntry,
}

impl CaptureDispatch {
    fn ignored(
        phase: CapturePhase,
        reason: CaptureIgnoredReason,
        pointer_id: Option<i32>,
        position: Option<PointerPosition>,
    ) -> Self {
        trace!(?phase, ?reason, ?pointer_id, "pointer signal ignored");
        Self {
            signal: None,
            log: CaptureLogEntry {
                phase,
                sequence: None,
                pointer_id,
                position,
                outcome: CaptureOutcome::Ignored(reason),
            },
        }
    }

    /// Whether a drag signal was produced.
    #[must_use]
    pub const fn is_forwarded(&self) -> bool {
        self.signal.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePointer {
    pointer_id: i32,
    last_position: PointerPosition,
}

/// Single-pointer capture state.
#[derive(Debug, Clone)]
pub struct PointerCapture {
    activation_button: PointerButton,
    active: Option<ActivePointer>,
    next_sequence: u64,
}

impl Default for PointerCapture {
    fn default() -> Self {
        Self::new(PointerButton::Primary)
    }
}

impl PointerCapture {
    #[must_use]
    pub const fn new(activation_button: PointerButton) -> Self {
        Self {
            activation_button,
            active: None,
            next_sequence: 1,
        }
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<i32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Last position seen for the active pointer.
    #[must_use]
    pub fn last_position(&self) -> Option<PointerPosition> {
        self.active.map(|active| active.last_position)
    }

    /// Handle a pointer-down / touch-start.
    pub fn pointer_down(
        &mut self,
        pointer_id: i32,
        button: PointerButton,
        position: PointerPosition,
    ) -> CaptureDispatch {
        if button != self.activation_button {
            return CaptureDispatch::ignored(
                CapturePhase::PointerDown,
                CaptureIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                Some(position),
            );
        }
        if self.active.is_some() {
            return CaptureDispatch::ignored(
                CapturePhase::PointerDown,
                CaptureIgnoredReason::ActivePointerInProgress,
                Some(pointer_id),
                Some(position),
            );
        }
        self.active = Some(ActivePointer {
            pointer_id,
            last_position: position,
        });
        self.forward(
            CapturePhase::PointerDown,
            pointer_id,
            Some(position),
            DragSignal::Start(position),
        )
    }

    /// Handle a pointer-move / touch-move for the active pointer.
    pub fn pointer_move(&mut self, pointer_id: i32, position: PointerPosition) -> CaptureDispatch {
        let Some(mut active) = self.active else {
            return CaptureDispatch::ignored(
                CapturePhase::PointerMove,
                CaptureIgnoredReason::NoActivePointer,
                Some(pointer_id),
                Some(position),
            );
        };
        if active.pointer_id != pointer_id {
            return CaptureDispatch::ignored(
                CapturePhase::PointerMove,
                CaptureIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(position),
            );
        }
        active.last_position = position;
        self.active = Some(active);
        self.forward(
            CapturePhase::PointerMove,
            pointer_id,
            Some(position),
            DragSignal::Move(position),
        )
    }

    /// Handle a pointer-up / touch-end and clear the active pointer.
    pub fn pointer_up(&mut self, pointer_id: i32) -> CaptureDispatch {
        let Some(active) = self.active else {
            return CaptureDispatch::ignored(
                CapturePhase::PointerUp,
                CaptureIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
            );
        };
        if active.pointer_id != pointer_id {
            return CaptureDispatch::ignored(
                CapturePhase::PointerUp,
                CaptureIgnoredReason::PointerMismatch,
                Some(pointer_id),
                None,
            );
        }
        self.active = None;
        self.forward(
            CapturePhase::PointerUp,
            pointer_id,
            Some(active.last_position),
            DragSignal::End,
        )
    }

    /// Handle a platform cancel (touchcancel, pointercancel, blur).
    ///
    /// `None` cancels whatever pointer is active.
    pub fn pointer_cancel(&mut self, pointer_id: Option<i32>) -> CaptureDispatch {
        let Some(active) = self.active else {
            return CaptureDispatch::ignored(
                CapturePhase::PointerCancel,
                CaptureIgnoredReason::NoActivePointer,
                pointer_id,
                None,
            );
        };
        if pointer_id.is_some_and(|id| id != active.pointer_id) {
            return CaptureDispatch::ignored(
                CapturePhase::PointerCancel,
                CaptureIgnoredReason::PointerMismatch,
                pointer_id,
                None,
            );
        }
        self.active = None;
        self.forward(
            CapturePhase::PointerCancel,
            active.pointer_id,
            Some(active.last_position),
            DragSignal::Cancel,
        )
    }

    /// Drop the active pointer without emitting a signal.
    ///
    /// Used when the consumer has already resolved the gesture itself, e.g.
    /// the carousel reclassifying a swipe as a page scroll.
    pub fn release(&mut self) -> CaptureDispatch {
        match self.active.take() {
            Some(active) => CaptureDispatch {
                signal: None,
                log: CaptureLogEntry {
                    phase: CapturePhase::Release,
                    sequence: None,
                    pointer_id: Some(active.pointer_id),
                    position: Some(active.last_position),
                    outcome: CaptureOutcome::Released,
                },
            },
            None => CaptureDispatch::ignored(
                CapturePhase::Release,
                CaptureIgnoredReason::NoActivePointer,
                None,
                None,
            ),
        }
    }

    fn forward(
        &mut self,
        phase: CapturePhase,
        pointer_id: i32,
        position: Option<PointerPosition>,
        signal: DragSignal,
    ) -> CaptureDispatch {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        trace!(?phase, sequence, pointer_id, "pointer signal forwarded");
        CaptureDispatch {
            signal: Some(signal),
            log: CaptureLogEntry {
                phase,
                sequence: Some(sequence),
                pointer_id: Some(pointer_id),
                position,
                outcome: CaptureOutcome::Forwarded,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn pos(x: f64, y: f64) -> PointerPosition {
        PointerPosition::new(x, y)
    }

    #[test]
    fn pointer_down_starts_drag_and_records_pointer() {
        let mut capture = PointerCapture::default();
        let dispatch = capture.pointer_down(7, PointerButton::Primary, pos(10.0, 20.0));
        assert_eq!(dispatch.signal, Some(DragSignal::Start(pos(10.0, 20.0))));
        assert_eq!(dispatch.log.sequence, Some(1));
        assert_eq!(dispatch.log.outcome, CaptureOutcome::Forwarded);
        assert_eq!(capture.active_pointer_id(), Some(7));
    }

    #[test]
    fn non_activation_button_is_ignored() {
        let mut capture = PointerCapture::default();
        let dispatch = capture.pointer_down(1, PointerButton::Secondary, pos(0.0, 0.0));
        assert_eq!(dispatch.signal, None);
        assert_eq!(
            dispatch.log.outcome,
            CaptureOutcome::Ignored(CaptureIgnoredReason::ButtonNotAllowed)
        );
        assert_eq!(capture.active_pointer_id(), None);
    }

    #[test]
    fn second_pointer_is_ignored_while_one_is_active() {
        let mut capture = PointerCapture::default();
        capture.pointer_down(1, PointerButton::Primary, pos(0.0, 0.0));
        let dispatch = capture.pointer_down(2, PointerButton::Primary, pos(5.0, 5.0));
        assert_eq!(
            dispatch.log.outcome,
            CaptureOutcome::Ignored(CaptureIgnoredReason::ActivePointerInProgress)
        );

        let moved = capture.pointer_move(2, pos(50.0, 0.0));
        assert_eq!(
            moved.log.outcome,
            CaptureOutcome::Ignored(CaptureIgnoredReason::PointerMismatch)
        );
        assert_eq!(capture.last_position(), Some(pos(0.0, 0.0)));
    }

    #[test]
    fn up_clears_active_and_sequences_increase() {
        let mut capture = PointerCapture::default();
        capture.pointer_down(3, PointerButton::Primary, pos(0.0, 0.0));
        let moved = capture.pointer_move(3, pos(-40.0, 2.0));
        let up = capture.pointer_up(3);
        assert_eq!(moved.log.sequence, Some(2));
        assert_eq!(up.log.sequence, Some(3));
        assert_eq!(up.signal, Some(DragSignal::End));
        assert_eq!(up.log.position, Some(pos(-40.0, 2.0)));
        assert_eq!(capture.active_pointer_id(), None);
    }

    #[test]
    fn move_without_active_pointer_is_ignored() {
        let mut capture = PointerCapture::default();
        let dispatch = capture.pointer_move(1, pos(1.0, 1.0));
        assert!(!dispatch.is_forwarded());
        assert_eq!(
            dispatch.log.outcome,
            CaptureOutcome::Ignored(CaptureIgnoredReason::NoActivePointer)
        );
    }

    #[test]
    fn cancel_with_any_pointer_emits_cancel() {
        let mut capture = PointerCapture::default();
        capture.pointer_down(9, PointerButton::Primary, pos(0.0, 0.0));
        assert_eq!(
            capture.pointer_cancel(Some(4)).log.outcome,
            CaptureOutcome::Ignored(CaptureIgnoredReason::PointerMismatch)
        );
        let dispatch = capture.pointer_cancel(None);
        assert_eq!(dispatch.signal, Some(DragSignal::Cancel));
        assert_eq!(dispatch.log.pointer_id, Some(9));
        assert_eq!(capture.active_pointer_id(), None);
    }

    #[test]
    fn release_drops_pointer_silently() {
        let mut capture = PointerCapture::default();
        capture.pointer_down(1, PointerButton::Primary, pos(0.0, 0.0));
        let released = capture.release();
        assert_eq!(released.signal, None);
        assert_eq!(released.log.outcome, CaptureOutcome::Released);
        assert_eq!(
            capture.pointer_up(1).log.outcome,
            CaptureOutcome::Ignored(CaptureIgnoredReason::NoActivePointer)
        );
    }

    #[traced_test]
    #[test]
    fn dispatches_are_traced() {
        let mut capture = PointerCapture::default();
        let _ = capture.pointer_down(1, PointerButton::Primary, pos(0.0, 0.0));
        let _ = capture.pointer_down(2, PointerButton::Primary, pos(5.0, 0.0));
        assert!(logs_contain("pointer signal forwarded"));
        assert!(logs_contain("pointer signal ignored"));
        assert!(logs_contain("ActivePointerInProgress"));
    }
}
