//! Per-generation population statistics.
//!
//! The engine only reports the best fitness after each generation. The
//! mean score of the population is rebuilt here from the evaluations the
//! engine requests: the initial population is evaluated in full, and every
//! later generation evaluates only its offspring, while the top
//! `elites` of the previous population carry over unevaluated.

/// Population layout the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationShape {
    /// Individuals per generation.
    pub population: usize,
    /// Individuals copied unchanged into the next generation.
    pub elites: usize,
}

/// Collects scores between generation callbacks.
#[derive(Debug, Default)]
pub(crate) struct PopulationStats {
    shape: Option<PopulationShape>,
    /// Scores evaluated since the last flush.
    pending: Vec<f64>,
    /// Scores of the current population, best first.
    current: Vec<f64>,
    /// Mean score per generation (index 0 = initial population).
    averages: Vec<f64>,
}

impl PopulationStats {
    pub(crate) fn new(shape: Option<PopulationShape>) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, score: f64) {
        if self.shape.is_some() {
            self.pending.push(score);
        }
    }

    /// Closes one generation.
    pub(crate) fn flush(&mut self) {
        let Some(shape) = self.shape else {
            return;
        };
        self.flush_initial(shape);

        let mut population: Vec<f64> = self.current.iter().take(shape.elites).copied().collect();
        population.append(&mut self.pending);
        self.push_population(population);
    }

    /// Mean scores so far, resetting the collector.
    pub(crate) fn take_averages(&mut self) -> Vec<f64> {
        if let Some(shape) = self.shape {
            self.flush_initial(shape);
        }
        let averages = std::mem::take(&mut self.averages);
        *self = Self::new(self.shape);
        averages
    }

    /// The first `population` evaluations belong to the initial population.
    fn flush_initial(&mut self, shape: PopulationShape) {
        if !self.averages.is_empty() || self.pending.len() < shape.population {
            return;
        }
        let rest = self.pending.split_off(shape.population);
        let initial = std::mem::replace(&mut self.pending, rest);
        self.push_population(initial);
    }

    fn push_population(&mut self, mut scores: Vec<f64>) {
        if scores.is_empty() {
            return;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        self.averages.push(mean);
        scores.sort_by(|a, b| b.total_cmp(a));
        self.current = scores;
    }
}
