//! Animation Driver
//!
//! Two ways of moving the offset: a fixed-duration linear tween (exit) and a
//! damped spring (reset). Both are stepped with an elapsed time in
//! milliseconds so the host decides where time comes from.

use crate::config::SpringConfig;
use crate::geometry::Offset;

/// Integration step for the spring, in seconds
const SPRING_STEP_S: f64 = 0.001;
/// Lowest stiffness a spring runs with; zero would never pull the card back
const MIN_STIFFNESS: f64 = 1.0;
/// A spring still moving after this long snaps to its target
const MAX_SPRING_MS: f64 = 5_000.0;

/// Linear time-based interpolation between two offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Offset,
    to: Offset,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Tween {
    pub fn new(from: Offset, to: Offset, duration_ms: f64) -> Self {
        Self { from, to, duration_ms, elapsed_ms: 0.0 }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn value(&self) -> Offset {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.elapsed_ms / self.duration_ms)
    }

    pub fn step(&mut self, dt_ms: f64) -> Offset {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms.max(0.0));
        self.value()
    }
}

/// Damped spring pulling an offset toward a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    position: Offset,
    velocity: Offset,
    target: Offset,
    elapsed_ms: f64,
    at_rest: bool,
}

impl Spring {
    pub fn new(config: SpringConfig, from: Offset, target: Offset) -> Self {
        let config = SpringConfig {
            stiffness: config.stiffness.max(MIN_STIFFNESS),
            damping: config.damping.max(0.0),
            ..config
        };
        let mut spring = Self {
            config,
            position: from,
            velocity: Offset::ZERO,
            target,
            elapsed_ms: 0.0,
            at_rest: false,
        };
        spring.at_rest = spring.settled();
        if spring.at_rest {
            spring.position = target;
        }
        spring
    }

    pub fn value(&self) -> Offset {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.at_rest
    }

    fn settled(&self) -> bool {
        (self.position - self.target).length() <= self.config.rest_displacement
            && self.velocity.length() <= self.config.rest_speed
    }

    fn come_to_rest(&mut self) {
        self.position = self.target;
        self.velocity = Offset::ZERO;
        self.at_rest = true;
    }

    /// Semi-implicit Euler in fixed sub-steps; snaps to the target once
    /// both displacement and speed fall under the rest thresholds, or once
    /// it has run for `MAX_SPRING_MS`
    pub fn step(&mut self, dt_ms: f64) -> Offset {
        if self.at_rest {
            return self.position;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let mass = if self.config.mass > 0.0 { self.config.mass } else { 1.0 };
        let mut remaining = dt_ms.max(0.0) / 1000.0;
        while remaining > 0.0 {
            let h = remaining.min(SPRING_STEP_S);
            let spring_force = (self.target - self.position) * self.config.stiffness;
            let damping_force = self.velocity * -self.config.damping;
            self.velocity = self.velocity + (spring_force + damping_force) * (h / mass);
            self.position = self.position + self.velocity * h;
            remaining -= h;

            if self.settled() {
                self.come_to_rest();
                break;
            }
        }
        if !self.at_rest && self.elapsed_ms >= MAX_SPRING_MS {
            self.come_to_rest();
        }
        self.position
    }
}

/// The animation currently driving the offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    Tween(Tween),
    Spring(Spring),
}

impl Animation {
    /// Advance by `dt_ms`; returns the new offset and whether it finished
    pub fn step(&mut self, dt_ms: f64) -> (Offset, bool) {
        match self {
            Animation::Tween(tween) => {
                let value = tween.step(dt_ms);
                (value, tween.is_finished())
            }
            Animation::Spring(spring) => {
                let value = spring.step(dt_ms);
                (value, spring.is_finished())
            }
        }
    }
}
