//! The movie engine: owner of all live state and the single writer of
//! the current position.
//!
//! Composes the pure lookup tables ([`TransitionIndex`]), the time
//! model ([`Timeline`] and friends) and the external facades. Position
//! changes arrive as [`MovieCommand`]s through [`MovieEngine::execute`];
//! scrubbing bypasses the command path and previews interpolated frames
//! directly, committing only on release.

mod command;
pub mod facades;
mod navigation;
mod playback;
mod publish;
mod queries;

pub use command::MovieCommand;
pub use facades::{
    ChartKind, ChartUpdate, DistanceChart, Facades, InterpolationFrame,
    MsaPanel, MsaWindowUpdate, RenderUpdate, ScrubberUpdate, ScrubberView,
    TreeRenderer,
};
use web_time::Duration;

use crate::error::PhylocineError;
use crate::index::TransitionIndex;
use crate::movie::MovieData;
use crate::msa::MsaWindowModel;
use crate::options::Options;
use crate::timeline::{
    PlaybackClock, ScrubSession, Timeline, TimelineViewport,
};

/// Mutable playhead state owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct Playhead {
    /// Current position in the flat tree sequence.
    pub current_index: usize,
    /// Position rendered before the current one, for transition-type
    /// detection; `None` until the first update has been published.
    pub previous_index: Option<usize>,
    /// Most recent user-pinned chart position; cleared by most
    /// navigation.
    pub sticky_chart_position: Option<usize>,
    /// Progress of the playhead at the last update or scrub release.
    pub last_progress: f64,
}

/// Coordinates navigation, timing and view updates for one movie.
pub struct MovieEngine {
    data: MovieData,
    index: TransitionIndex,
    timeline: Timeline,
    viewport: TimelineViewport,
    clock: PlaybackClock,
    scrub: ScrubSession,
    msa_model: MsaWindowModel,
    options: Options,
    facades: Facades,
    playhead: Playhead,
    active_chart: ChartKind,
    /// Serialization guard: at most one command may be in flight.
    in_flight: bool,
    /// Re-entrancy guard around the facade fan-out.
    render_in_progress: bool,
}

impl MovieEngine {
    /// Build an engine for a validated movie.
    ///
    /// The sequence invariants are enforced here; a malformed payload
    /// is rejected with [`PhylocineError::InvalidMovie`] and the engine
    /// never starts.
    pub fn new(
        data: MovieData,
        options: Options,
        facades: Facades,
    ) -> Result<Self, PhylocineError> {
        let index = TransitionIndex::new(&data)?;
        let timeline = Timeline::with_anchor_dwell(
            &index,
            options.playback.anchor_dwell,
        );
        let viewport = TimelineViewport::new(timeline.total_duration());

        let mut clock = PlaybackClock::new(Duration::from_millis(
            options.playback.base_step_ms,
        ));
        clock.set_speed(options.playback.speed);
        clock.set_looping(options.playback.looping);

        let msa_model =
            MsaWindowModel::new(&data.msa, index.anchor_indices().len());

        log::debug!(
            "movie engine ready: {} trees, {} transitions",
            index.tree_count(),
            index.transition_count()
        );

        Ok(Self {
            data,
            index,
            timeline,
            viewport,
            clock,
            scrub: ScrubSession::new(),
            msa_model,
            options,
            facades,
            playhead: Playhead::default(),
            active_chart: ChartKind::default(),
            in_flight: false,
            render_in_progress: false,
        })
    }

    /// Replace the mounted facade set, e.g. when views are re-created.
    pub fn set_facades(&mut self, facades: Facades) {
        self.facades = facades;
    }

    /// Select which chart series the cursor addresses.
    pub fn set_active_chart(&mut self, kind: ChartKind) {
        self.active_chart = kind;
    }
}

impl std::fmt::Debug for MovieEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieEngine")
            .field("tree_count", &self.index.tree_count())
            .field("current_index", &self.playhead.current_index)
            .field("playing", &self.clock.is_playing())
            .field("scrubbing", &self.scrub.is_active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! Facades that record every update, shared by the engine suites.

    use std::cell::RefCell;
    use std::rc::Rc;

    use super::facades::{
        ChartUpdate, DistanceChart, Facades, InterpolationFrame, MsaPanel,
        MsaWindowUpdate, RenderUpdate, ScrubberUpdate, ScrubberView,
        TreeRenderer,
    };
    use crate::error::PhylocineError;

    /// One recorded facade call, in fan-out order.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Render {
            skip_auto_center: bool,
            highlight_len: usize,
        },
        Interpolate {
            frac: f64,
        },
        Chart {
            cursor: usize,
            sticky: Option<usize>,
        },
        Msa {
            start: usize,
            end: usize,
            tree_index: usize,
        },
        Scrubber {
            progress: f64,
        },
    }

    /// Shared log of facade calls plus a failure switch.
    #[derive(Debug, Default)]
    pub(crate) struct Log {
        pub(crate) calls: RefCell<Vec<Call>>,
        pub(crate) fail_renderer: RefCell<bool>,
    }

    struct Recorder {
        log: Rc<Log>,
    }

    impl TreeRenderer for Recorder {
        fn update(
            &mut self,
            update: &RenderUpdate<'_>,
        ) -> Result<(), PhylocineError> {
            if *self.log.fail_renderer.borrow() {
                return Err(PhylocineError::Facade(
                    "renderer exploded".to_owned(),
                ));
            }
            self.log.calls.borrow_mut().push(Call::Render {
                skip_auto_center: update.skip_auto_center,
                highlight_len: update.highlight.len(),
            });
            Ok(())
        }

        fn render_interpolated_frame(
            &mut self,
            frame: &InterpolationFrame<'_>,
        ) -> Result<(), PhylocineError> {
            self.log
                .calls
                .borrow_mut()
                .push(Call::Interpolate { frac: frame.frac });
            Ok(())
        }
    }

    impl DistanceChart for Recorder {
        fn update(
            &mut self,
            update: &ChartUpdate<'_>,
        ) -> Result<(), PhylocineError> {
            self.log.calls.borrow_mut().push(Call::Chart {
                cursor: update.cursor,
                sticky: update.sticky,
            });
            Ok(())
        }
    }

    impl MsaPanel for Recorder {
        fn sync_window(
            &mut self,
            update: &MsaWindowUpdate<'_>,
        ) -> Result<(), PhylocineError> {
            self.log.calls.borrow_mut().push(Call::Msa {
                start: update.window.start,
                end: update.window.end,
                tree_index: update.tree_index,
            });
            Ok(())
        }
    }

    impl ScrubberView for Recorder {
        fn update(
            &mut self,
            update: &ScrubberUpdate,
        ) -> Result<(), PhylocineError> {
            self.log.calls.borrow_mut().push(Call::Scrubber {
                progress: update.progress,
            });
            Ok(())
        }
    }

    /// A facade set whose every member appends to the shared log.
    pub(crate) fn facades() -> (Facades, Rc<Log>) {
        let log = Rc::new(Log::default());
        let facades = Facades {
            renderer: Box::new(Recorder { log: Rc::clone(&log) }),
            chart: Box::new(Recorder { log: Rc::clone(&log) }),
            msa: Box::new(Recorder { log: Rc::clone(&log) }),
            scrubber: Box::new(Recorder { log: Rc::clone(&log) }),
        };
        (facades, log)
    }
}
