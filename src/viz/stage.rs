//! The chart area and its play loop.
//!
//! The stage is the single rendering target. It holds at most one live
//! visualization and the animation handle driving it. Every mount or clear
//! cancels the handle before the old visualization is dropped, so no loop
//! outlives the puzzle that started it.

use super::{Visualization, build};
use crate::error::VizError;
use crate::model::VizKind;

/// Cancellable per-frame loop. While playing, each frame runs one step and
/// the UI schedules the next repaint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle {
    playing: bool,
    frames: u64,
}

impl AnimationHandle {
    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    /// Stops the loop and forgets its frame count.
    pub fn cancel(&mut self) {
        self.playing = false;
        self.frames = 0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Claims the next frame. False when paused or cancelled.
    pub fn next_frame(&mut self) -> bool {
        if self.playing {
            self.frames += 1;
        }
        self.playing
    }
}

pub enum StageState {
    /// Nothing mounted: the puzzle is still locked.
    Empty,
    Live(Box<dyn Visualization>),
    /// Building failed; the message is shown where the chart would be.
    Failed(String),
}

pub struct Stage {
    state: StageState,
    animation: AnimationHandle,
    mounts: u64,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            state: StageState::Empty,
            animation: AnimationHandle::default(),
            mounts: 0,
        }
    }
}

impl Stage {
    pub fn mount(&mut self, kind: VizKind, seed: u64) {
        self.mount_with(|| build(kind, seed));
    }

    /// Cancels whatever is running, then shows the factory's result. A
    /// factory error ends up inline as [`StageState::Failed`].
    pub fn mount_with<F>(&mut self, factory: F)
    where
        F: FnOnce() -> Result<Box<dyn Visualization>, VizError>,
    {
        self.clear();
        self.mounts += 1;
        log::debug!("mount #{} on this stage", self.mounts);
        self.state = match factory() {
            Ok(viz) => StageState::Live(viz),
            Err(e) => {
                log::error!("visualization failed: {e}");
                StageState::Failed(format!("Error creating visualization: {e}"))
            }
        };
    }

    pub fn clear(&mut self) {
        if self.animation.is_playing() {
            log::debug!("cancelling animation after {} frames", self.animation.frames());
        }
        self.animation.cancel();
        self.state = StageState::Empty;
    }

    pub fn state(&self) -> &StageState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StageState {
        &mut self.state
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, StageState::Empty)
    }

    #[cfg(test)]
    pub(crate) fn mounts(&self) -> u64 {
        self.mounts
    }

    pub fn animation(&self) -> &AnimationHandle {
        &self.animation
    }

    pub fn can_play(&self) -> bool {
        matches!(&self.state, StageState::Live(viz) if viz.animated())
    }

    /// Play/pause. Returns the new playing state; only animated visualizations play.
    pub fn toggle_play(&mut self) -> bool {
        if !self.can_play() {
            self.animation.cancel();
            return false;
        }
        self.animation.toggle()
    }

    /// Runs one frame if playing. True when the caller should repaint again.
    pub fn tick(&mut self) -> bool {
        if !self.animation.next_frame() {
            return false;
        }
        match &mut self.state {
            StageState::Live(viz) if viz.animated() => {
                viz.step();
                true
            }
            _ => {
                self.animation.cancel();
                false
            }
        }
    }
}
