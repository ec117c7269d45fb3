//! Pointer gesture recognition
//!
//! One raw pointer stream carries three possible intents: swipe back from
//! the screen edge, pull down to refresh, and long-press to start
//! selecting. The recognizer is a pure state machine over (x, y, time)
//! samples, so every disambiguation rule is testable without a terminal.
//! Guards are evaluated in a fixed order and at most one gesture fires
//! per stroke.

use std::time::Duration;

/// Tunable thresholds, in whatever coordinate units the samples use
#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// Strokes must start within this distance of the left edge to count
    /// as a back swipe
    pub edge_margin: f32,
    /// Minimum rightward travel for a back swipe
    pub swipe_min_dx: f32,
    /// Slower horizontal strokes are just drags
    pub swipe_max_duration: Duration,
    /// Damped pull offset at which a release commits a refresh
    pub pull_trigger: f32,
    /// Ceiling on the damped pull offset
    pub pull_max: f32,
    /// Hold time before a long-press fires
    pub long_press: Duration,
    /// Movement within this radius still counts as holding still
    pub jitter_radius: f32,
}

impl Default for GestureConfig {
    /// Pixel-oriented thresholds
    fn default() -> Self {
        GestureConfig {
            edge_margin: 40.0,
            swipe_min_dx: 100.0,
            swipe_max_duration: Duration::from_millis(500),
            pull_trigger: 100.0,
            pull_max: 140.0,
            long_press: Duration::from_millis(800),
            jitter_radius: 12.0,
        }
    }
}

impl GestureConfig {
    /// Thresholds rescaled for terminal cells (roughly 8x16 px each)
    pub fn for_cells() -> Self {
        GestureConfig {
            edge_margin: 4.0,
            swipe_min_dx: 12.0,
            swipe_max_duration: Duration::from_millis(500),
            pull_trigger: 6.0,
            pull_max: 9.0,
            long_press: Duration::from_millis(800),
            jitter_radius: 1.0,
        }
    }
}

/// Listing state sampled when a stroke begins
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureContext {
    /// List is scrolled all the way up
    pub at_top: bool,
    /// Multi-select mode is active
    pub selection_mode: bool,
    /// A refresh is already in flight
    pub refreshing: bool,
    /// Visible row index under the pointer, if any
    pub over_item: Option<usize>,
}

/// Intent distilled from a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Edge swipe committed: navigate up one level
    Back,
    /// Pull released at or past the trigger
    RefreshRequested,
    /// Pull indicator moved; `armed` flips exactly on threshold crossings
    PullChanged { offset: f32, armed: bool },
    /// Pull released (or abandoned) below the trigger
    PullCancelled,
    /// Held still long enough: begin selection at this row
    LongPress { index: usize },
    /// Plain tap on a row
    Tap { index: usize },
}

#[derive(Debug, Clone, Copy)]
struct StrokeState {
    origin: (f32, f32),
    started: Duration,
    ctx: GestureContext,
    moved: bool,
    pulling: bool,
    pull_armed: bool,
    long_press_fired: bool,
}

/// Resistance curve for the pull indicator: the first stretch tracks the
/// finger closely, then growth tapers off toward the cap
fn damped_pull(dy: f32, config: &GestureConfig) -> f32 {
    if dy <= 0.0 {
        return 0.0;
    }
    (2.0 * dy.powf(0.8)).min(config.pull_max)
}

#[derive(Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    stroke: Option<StrokeState>,
    last_dy: f32,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        GestureRecognizer {
            config,
            stroke: None,
            last_dy: 0.0,
        }
    }

    /// Current damped pull offset, for rendering the indicator
    pub fn pull_offset(&self) -> f32 {
        match &self.stroke {
            Some(s) if s.pulling => damped_pull(self.last_dy, &self.config),
            _ => 0.0,
        }
    }

    /// Begin a stroke; the listing context is frozen for its duration
    pub fn pointer_down(&mut self, x: f32, y: f32, t: Duration, ctx: GestureContext) {
        self.last_dy = 0.0;
        self.stroke = Some(StrokeState {
            origin: (x, y),
            started: t,
            ctx,
            moved: false,
            pulling: false,
            pull_armed: false,
            long_press_fired: false,
        });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, _t: Duration) -> Option<GestureEvent> {
        let config = self.config;
        let stroke = self.stroke.as_mut()?;
        if stroke.long_press_fired {
            return None;
        }

        let dx = x - stroke.origin.0;
        let dy = y - stroke.origin.1;
        self.last_dy = dy;
        if (dx * dx + dy * dy).sqrt() > config.jitter_radius {
            stroke.moved = true;
        }

        let pull_allowed =
            stroke.ctx.at_top && !stroke.ctx.selection_mode && !stroke.ctx.refreshing;
        if !stroke.pulling && pull_allowed && dy > config.jitter_radius && dy > dx.abs() {
            stroke.pulling = true;
        }

        if stroke.pulling {
            let offset = damped_pull(dy, &config);
            let armed = offset >= config.pull_trigger;
            stroke.pull_armed = armed;
            return Some(GestureEvent::PullChanged { offset, armed });
        }
        None
    }

    /// End a stroke and resolve what, if anything, it meant
    pub fn pointer_up(&mut self, x: f32, y: f32, t: Duration) -> Option<GestureEvent> {
        let config = self.config;
        let stroke = self.stroke.take()?;
        self.last_dy = 0.0;

        if stroke.long_press_fired {
            // Swallow the release so it cannot double as a tap
            return None;
        }

        if stroke.pulling {
            let dy = y - stroke.origin.1;
            return if damped_pull(dy, &config) >= config.pull_trigger {
                Some(GestureEvent::RefreshRequested)
            } else {
                Some(GestureEvent::PullCancelled)
            };
        }

        let dx = x - stroke.origin.0;
        let dy_abs = (y - stroke.origin.1).abs();
        let within_time = t.saturating_sub(stroke.started) <= config.swipe_max_duration;
        if !stroke.ctx.selection_mode
            && stroke.origin.0 <= config.edge_margin
            && dx >= config.swipe_min_dx
            && dx > 2.0 * dy_abs
            && within_time
        {
            return Some(GestureEvent::Back);
        }

        if !stroke.moved {
            if let Some(index) = stroke.ctx.over_item {
                return Some(GestureEvent::Tap { index });
            }
        }
        None
    }

    /// Drive the long-press timer; called from the event loop tick
    pub fn poll(&mut self, now: Duration) -> Option<GestureEvent> {
        let config = self.config;
        let stroke = self.stroke.as_mut()?;
        if stroke.long_press_fired || stroke.moved || stroke.pulling {
            return None;
        }
        let index = stroke.ctx.over_item?;
        if now.saturating_sub(stroke.started) >= config.long_press {
            stroke.long_press_fired = true;
            return Some(GestureEvent::LongPress { index });
        }
        None
    }

    /// Abandon the stroke (focus loss, screen change)
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        self.last_dy = 0.0;
        let stroke = self.stroke.take()?;
        if stroke.pulling && !stroke.long_press_fired {
            return Some(GestureEvent::PullCancelled);
        }
        None
    }
}
