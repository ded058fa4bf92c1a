//! Early-stopping conditions.
//!
//! A [`StopCondition`] is polled at the top of each generation with a
//! read-only [`EngineView`]. Conditions may keep internal state (stall
//! counters), which is why the composite combinators evaluate **every**
//! member on every call instead of short-circuiting.
use crate::engine::EngineView;

pub trait StopCondition {
    /// Returns `true` when the run should stop before the next generation.
    fn stop(&mut self, view: &EngineView<'_>) -> bool;
}

/// Stops when **all** members want to stop. Every member is evaluated on
/// every call so stateful members keep counting.
pub struct And {
    parts: Vec<Box<dyn StopCondition>>,
}

impl And {
    pub fn new(parts: Vec<Box<dyn StopCondition>>) -> Self {
        Self { parts }
    }
}

impl StopCondition for And {
    fn stop(&mut self, view: &EngineView<'_>) -> bool {
        let mut all = true;
        for part in self.parts.iter_mut() {
            let stop = part.stop(view);
            all = all && stop;
        }
        all
    }
}

/// Stops when **any** member wants to stop. Every member is evaluated on
/// every call so stateful members keep counting.
pub struct Or {
    parts: Vec<Box<dyn StopCondition>>,
}

impl Or {
    pub fn new(parts: Vec<Box<dyn StopCondition>>) -> Self {
        Self { parts }
    }
}

impl StopCondition for Or {
    fn stop(&mut self, view: &EngineView<'_>) -> bool {
        let mut any = false;
        for part in self.parts.iter_mut() {
            let stop = part.stop(view);
            any = any || stop;
        }
        any
    }
}

/// Stops once the fitness-evaluation counter reaches `limit`.
#[derive(Debug, Clone)]
pub struct MaxFitnessEvals {
    limit: usize,
}

impl MaxFitnessEvals {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl StopCondition for MaxFitnessEvals {
    fn stop(&mut self, view: &EngineView<'_>) -> bool {
        view.evaluations >= self.limit
    }
}

/// Stops once the best first-objective fitness reaches `threshold`.
#[derive(Debug, Clone)]
pub struct FitnessValueReached {
    threshold: f64,
}

impl FitnessValueReached {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl StopCondition for FitnessValueReached {
    fn stop(&mut self, view: &EngineView<'_>) -> bool {
        view.best_fitness()
            .is_some_and(|best| best >= self.threshold)
    }
}

/// Stops when the best first-objective fitness has not improved by more than
/// `delta` for `patience` consecutive generations.
#[derive(Debug, Clone)]
pub struct BestFitnessStall {
    patience: usize,
    delta: f64,
    best: Option<f64>,
    stalled: usize,
}

impl BestFitnessStall {
    pub fn new(patience: usize, delta: f64) -> Self {
        Self {
            patience,
            delta,
            best: None,
            stalled: 0,
        }
    }
}

impl StopCondition for BestFitnessStall {
    fn stop(&mut self, view: &EngineView<'_>) -> bool {
        let Some(current) = view.best_fitness() else {
            return false;
        };
        match self.best {
            Some(best) if current <= best + self.delta => {
                self.stalled += 1;
                self.best = Some(best.max(current));
            }
            _ => {
                self.best = Some(self.best.map_or(current, |b| b.max(current)));
                self.stalled = 0;
            }
        }
        self.stalled >= self.patience
    }
}
