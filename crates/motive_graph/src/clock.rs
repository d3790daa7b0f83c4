// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-paced scheduling for time-varying nodes.
//!
//! One scheduler drives the whole graph: each tick advances a virtual
//! clock and recomputes only the nodes whose kind is time-varying,
//! which re-triggers push propagation through their dependents. There
//! is no queue or backpressure; a tick is O(1) work per live node.

use crate::graph::{EvalContext, Graph};
use crate::target::TargetStore;
use std::time::Instant;

/// Nominal frame rate of the animation clock
pub const NOMINAL_RATE_HZ: f64 = 60.0;

/// Drives periodic re-evaluation of time-varying nodes
#[derive(Debug)]
pub struct Scheduler {
    now: f64,
    frame_dt: f64,
    last_instant: Option<Instant>,
}

impl Scheduler {
    /// Create a scheduler at the nominal 60 Hz cadence
    pub fn new() -> Self {
        Self::with_rate(NOMINAL_RATE_HZ)
    }

    /// Create a scheduler with a custom frame rate
    pub fn with_rate(rate_hz: f64) -> Self {
        Self {
            now: 0.0,
            frame_dt: 1.0 / rate_hz,
            last_instant: None,
        }
    }

    /// Current time on the animation clock, in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the clock by `dt` seconds and tick the graph once.
    /// This is the driven/simulated entry point.
    pub fn advance(&mut self, dt: f64, graph: &mut Graph, targets: &mut dyn TargetStore) {
        self.now += dt;
        let mut cx = EvalContext::new(targets, self.now);
        graph.tick(&mut cx);
    }

    /// Advance by exactly one nominal frame
    pub fn step(&mut self, graph: &mut Graph, targets: &mut dyn TargetStore) {
        self.advance(self.frame_dt, graph, targets);
    }

    /// Advance by the wall-clock time elapsed since the previous call.
    /// First call ticks with a zero delta to establish the baseline.
    pub fn step_real_time(&mut self, graph: &mut Graph, targets: &mut dyn TargetStore) {
        let instant = Instant::now();
        let dt = self
            .last_instant
            .map_or(0.0, |last| instant.duration_since(last).as_secs_f64());
        self.last_instant = Some(instant);
        self.advance(dt, graph, targets);
    }

    /// Build an evaluation context at the scheduler's current time,
    /// for graph edits between ticks
    pub fn context<'a>(&self, targets: &'a mut dyn TargetStore) -> EvalContext<'a> {
        EvalContext::new(targets, self.now)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
