//! Small animation state machines shared by the HUD widgets.
//!
//! All of them advance in frame units (`dt = 1.0` is one 60 Hz frame) and only ever
//! depend on their own previous value and the current target.

/// Gap under which a tween snaps to its target.
pub const SNAP_EPSILON: f32 = 0.5;

/// Displayed value chasing a target value.
///
/// Each tick closes `rate * dt` of the remaining gap, capped at the whole gap so it never
/// overshoots, and snaps once the gap falls under the epsilon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub display: f32,
    pub target: f32,
    pub rate: f32,
    pub epsilon: f32,
}

impl Tween {
    pub fn new(value: f32, rate: f32) -> Self {
        Self {
            display: value,
            target: value,
            rate,
            epsilon: SNAP_EPSILON,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to `value`.
    pub fn reset(&mut self, value: f32) {
        self.display = value;
        self.target = value;
    }

    pub fn tick(&mut self, dt: f32) {
        let gap = self.target - self.display;
        if gap.abs() > self.epsilon {
            let factor = (self.rate * dt).clamp(0.0, 1.0);
            let next = self.display + gap * factor;
            // Large values can run out of float precision before reaching the epsilon.
            self.display = if factor > 0.0 && next == self.display {
                self.target
            } else {
                next
            };
        } else {
            self.display = self.target;
        }
    }

    pub fn settled(&self) -> bool {
        self.display == self.target
    }
}

/// Countdown that drives a blinking alpha while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlashTimer {
    remaining: f32,
    duration: f32,
}

impl FlashTimer {
    /// Starts (or restarts) the countdown.
    pub fn arm(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
        self.duration = duration.max(0.0);
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Remaining share of the countdown, 1 right after arming.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            self.remaining / self.duration
        } else {
            0.0
        }
    }

    /// `0.5 + sin(remaining * frequency) * 0.5` while running, 1 once finished.
    pub fn alpha(&self, frequency: f32) -> f32 {
        if self.remaining > 0.0 {
            flicker(self.remaining, frequency)
        } else {
            1.0
        }
    }
}

/// Sine blink in [0,1].
pub fn flicker(time: f32, frequency: f32) -> f32 {
    0.5 + (time * frequency).sin() * 0.5
}

/// Scale that jumps up on a hit and eases back to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    scale: Tween,
}

impl Pulse {
    pub fn new(rate: f32) -> Self {
        Self {
            scale: Tween::new(1.0, rate).with_epsilon(0.001),
        }
    }

    pub fn kick(&mut self, scale: f32) {
        self.scale.display = scale;
        self.scale.target = 1.0;
    }

    pub fn tick(&mut self, dt: f32) {
        self.scale.tick(dt);
    }

    pub fn scale(&self) -> f32 {
        self.scale.display
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(0.15)
    }
}

/// Visibility in [0,1] that moves linearly toward shown or hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fade {
    value: f32,
    shown: bool,
}

impl Fade {
    pub fn show(&mut self) {
        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn tick(&mut self, dt: f32, speed: f32) {
        let step = speed * dt;
        self.value = if self.shown {
            (self.value + step).min(1.0)
        } else {
            (self.value - step).max(0.0)
        };
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_visible(&self) -> bool {
        self.value > 0.0
    }
}

/// Hue that keeps turning.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RainbowCycle {
    hue: f32,
}

impl RainbowCycle {
    pub fn tick(&mut self, dt: f32, degrees_per_frame: f32) {
        self.hue = (self.hue + degrees_per_frame * dt).rem_euclid(360.0);
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn color(&self) -> [f32; 4] {
        crate::models::theme::colors::hsl(self.hue, 1.0, 0.6)
    }
}

/// One-shot action that fires after a delay unless cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<T> {
    pending: Option<(f32, T)>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deferred<T> {
    /// Schedules `payload`, replacing whatever was pending.
    pub fn schedule(&mut self, delay: f32, payload: T) {
        self.pending = Some((delay.max(0.0), payload));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advances the delay and hands back the payload on the tick it expires.
    pub fn tick(&mut self, dt: f32) -> Option<T> {
        let (remaining, _) = self.pending.as_mut()?;
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.pending.take().map(|(_, payload)| payload)
        } else {
            None
        }
    }
}
