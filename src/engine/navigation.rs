//! Serialized command execution.
//!
//! Exactly one command may be in flight at a time. The model is
//! single-threaded and cooperative, so the lock is a plain boolean: a
//! command arriving while another runs (e.g. from a facade callback
//! re-entering the engine) is dropped with a diagnostic log, never
//! queued.

use web_time::Instant;

use super::{MovieCommand, MovieEngine};
use crate::input::KeyAction;

impl MovieEngine {
    /// Execute a navigation command and publish the resulting state.
    ///
    /// Returns when the resulting view update has settled. Invalid
    /// parameters and commands arriving while another is in flight are
    /// silently dropped (with a debug log); this method never fails
    /// toward the caller.
    pub fn execute(&mut self, command: MovieCommand) {
        if self.in_flight {
            log::debug!("{command:?} dropped: a command is already in flight");
            return;
        }
        self.in_flight = true;
        self.run(command);
        self.in_flight = false;
    }

    /// Recovery path: clear the serialization and render guards after a
    /// facade misbehaved badly enough to leave them set.
    pub fn force_unlock(&mut self) {
        if self.in_flight || self.render_in_progress {
            log::warn!("force-unlocking navigation guards");
        }
        self.in_flight = false;
        self.render_in_progress = false;
    }

    /// Resolve a key string through the configured bindings and
    /// dispatch the bound action. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(action) = self.options.keybindings.lookup(key) else {
            return false;
        };
        match action {
            KeyAction::StepForward => self.execute(MovieCommand::Forward),
            KeyAction::StepBackward => self.execute(MovieCommand::Backward),
            KeyAction::JumpToNextAnchor => {
                self.execute(MovieCommand::NextAnchor);
            }
            KeyAction::JumpToPreviousAnchor => {
                self.execute(MovieCommand::PrevAnchor);
            }
            KeyAction::TogglePlayback => {
                self.toggle_playback(Instant::now());
            }
            KeyAction::GoToStart => {
                self.execute(MovieCommand::GoToPosition { index: 0 });
            }
            KeyAction::GoToEnd => {
                let last = self.index.tree_count() - 1;
                self.execute(MovieCommand::GoToPosition { index: last });
            }
            KeyAction::FitTimeline => self.fit_timeline(),
        }
        true
    }

    /// Single dispatch for every command variant.
    fn run(&mut self, command: MovieCommand) {
        let here = self.playhead.current_index;
        let target = match command {
            MovieCommand::Forward => self.index.next_position(here),
            MovieCommand::Backward => self.index.previous_position(here),
            MovieCommand::ManualNext => {
                self.clock.pause();
                self.index.next_position(here)
            }
            MovieCommand::ManualPrev => {
                self.clock.pause();
                self.index.previous_position(here)
            }
            MovieCommand::NextAnchor => self.index.next_anchor_index(here),
            MovieCommand::PrevAnchor => {
                self.index.previous_anchor_index(here)
            }
            MovieCommand::GoToPosition { index } => {
                if index >= self.index.tree_count() {
                    log::debug!("GoToPosition({index}) out of range, dropped");
                    return;
                }
                index
            }
            MovieCommand::HandleDrag { index } => {
                index.min(self.index.tree_count() - 1)
            }
            MovieCommand::GoToTransition { transition } => {
                if transition >= self.index.transition_count() {
                    log::debug!(
                        "GoToTransition({transition}) out of range, dropped"
                    );
                    return;
                }
                self.index.anchor_indices()[transition]
            }
            MovieCommand::SetStickyPosition { transition } => {
                if transition >= self.index.transition_count() {
                    log::debug!(
                        "SetStickyPosition({transition}) out of range, dropped"
                    );
                    return;
                }
                self.playhead.sticky_chart_position = Some(transition);
                here
            }
        };

        if command.clears_sticky() {
            self.playhead.sticky_chart_position = None;
        }
        self.playhead.current_index = target;
        self.publish_update(command.is_micro_step());
    }
}

#[cfg(test)]
mod tests {
    use super::super::recording;
    use super::*;
    use crate::engine::Facades;
    use crate::movie::fixtures;
    use crate::options::Options;

    fn engine() -> MovieEngine {
        MovieEngine::new(
            fixtures::three_anchor_movie(),
            Options::default(),
            Facades::noop(),
        )
        .unwrap()
    }

    #[test]
    fn forward_clamps_at_the_last_tree() {
        let mut engine = engine();
        let mut visited = vec![engine.current_index()];
        for _ in 0..6 {
            engine.execute(MovieCommand::Forward);
            visited.push(engine.current_index());
        }
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 4, 4]);
    }

    #[test]
    fn backward_clamps_at_the_first_tree() {
        let mut engine = engine();
        engine.execute(MovieCommand::Backward);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn prev_anchor_from_an_anchor_skips_to_the_previous_one() {
        let mut engine = engine();
        engine.execute(MovieCommand::GoToPosition { index: 3 });
        engine.execute(MovieCommand::SetStickyPosition { transition: 1 });
        engine.execute(MovieCommand::PrevAnchor);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.sticky_chart_position(), None);
    }

    #[test]
    fn anchor_jumps_walk_the_anchor_list() {
        let mut engine = engine();
        engine.execute(MovieCommand::NextAnchor);
        assert_eq!(engine.current_index(), 3);
        engine.execute(MovieCommand::NextAnchor);
        assert_eq!(engine.current_index(), 4);
        engine.execute(MovieCommand::NextAnchor);
        assert_eq!(engine.current_index(), 4);
    }

    #[test]
    fn go_to_position_rejects_out_of_range() {
        let mut engine = engine();
        engine.execute(MovieCommand::GoToPosition { index: 2 });
        engine.execute(MovieCommand::GoToPosition { index: 99 });
        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn handle_drag_clamps_instead_of_dropping() {
        let mut engine = engine();
        engine.execute(MovieCommand::HandleDrag { index: 99 });
        assert_eq!(engine.current_index(), 4);
    }

    #[test]
    fn go_to_transition_preserves_sticky() {
        let mut engine = engine();
        engine.execute(MovieCommand::SetStickyPosition { transition: 1 });
        assert_eq!(engine.sticky_chart_position(), Some(1));
        engine.execute(MovieCommand::GoToTransition { transition: 1 });
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.sticky_chart_position(), Some(1));
    }

    #[test]
    fn other_navigation_clears_sticky() {
        let mut engine = engine();
        engine.execute(MovieCommand::SetStickyPosition { transition: 0 });
        engine.execute(MovieCommand::Forward);
        assert_eq!(engine.sticky_chart_position(), None);
    }

    #[test]
    fn sticky_rejects_out_of_range_transitions() {
        let mut engine = engine();
        engine.execute(MovieCommand::SetStickyPosition { transition: 9 });
        assert_eq!(engine.sticky_chart_position(), None);
    }

    #[test]
    fn in_flight_commands_are_dropped_without_state_change() {
        let mut engine = engine();
        engine.in_flight = true;
        engine.execute(MovieCommand::Forward);
        assert_eq!(engine.current_index(), 0);
        engine.force_unlock();
        engine.execute(MovieCommand::Forward);
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn manual_steps_pause_playback() {
        let mut engine = engine();
        engine.toggle_playback(Instant::now());
        assert!(engine.is_playing());
        engine.execute(MovieCommand::ManualNext);
        assert!(!engine.is_playing());
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn key_bindings_drive_commands() {
        let mut engine = engine();
        assert!(engine.handle_key("ArrowRight"));
        assert_eq!(engine.current_index(), 1);
        assert!(engine.handle_key("Shift+ArrowRight"));
        assert_eq!(engine.current_index(), 3);
        assert!(engine.handle_key("Shift+ArrowLeft"));
        assert_eq!(engine.current_index(), 0);
        assert!(engine.handle_key("End"));
        assert_eq!(engine.current_index(), 4);
        assert!(engine.handle_key("Home"));
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.handle_key("KeyZ"));
    }

    #[test]
    fn publish_order_is_renderer_chart_msa_scrubber() {
        let (facades, log) = recording::facades();
        let mut engine = MovieEngine::new(
            fixtures::three_anchor_movie(),
            Options::default(),
            facades,
        )
        .unwrap();
        engine.execute(MovieCommand::Forward);

        let calls = log.calls.borrow();
        assert_eq!(calls.len(), 4);
        assert!(matches!(calls[0], recording::Call::Render { .. }));
        assert!(matches!(calls[1], recording::Call::Chart { .. }));
        assert!(matches!(calls[2], recording::Call::Msa { .. }));
        assert!(matches!(calls[3], recording::Call::Scrubber { .. }));
    }

    #[test]
    fn micro_steps_skip_auto_center() {
        let (facades, log) = recording::facades();
        let mut engine = MovieEngine::new(
            fixtures::three_anchor_movie(),
            Options::default(),
            facades,
        )
        .unwrap();
        engine.execute(MovieCommand::Forward);
        engine.execute(MovieCommand::NextAnchor);

        let calls = log.calls.borrow();
        let skips: Vec<bool> = calls
            .iter()
            .filter_map(|c| match c {
                recording::Call::Render {
                    skip_auto_center, ..
                } => Some(*skip_auto_center),
                _ => None,
            })
            .collect();
        assert_eq!(skips, vec![true, false]);
    }
}
