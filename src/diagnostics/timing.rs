use serde::Serialize;
use std::time::Instant;

/// Wall-clock time spent in one named stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Per-stage timings of one registration, learning or lookup call.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: &'static str, elapsed_ms: f64) {
        self.stages.push(StageTiming { label, elapsed_ms });
    }

    /// Elapsed time of the first stage called `label`.
    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Records consecutive stages into a [`TimingBreakdown`].
pub(crate) struct StageClock {
    start: Instant,
    lap: Instant,
    breakdown: TimingBreakdown,
}

impl StageClock {
    pub(crate) fn start() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            lap: now,
            breakdown: TimingBreakdown::default(),
        }
    }

    /// Closes the running stage under `label` and starts the next one.
    pub(crate) fn lap(&mut self, label: &'static str) {
        let now = Instant::now();
        let elapsed_ms = (now - self.lap).as_secs_f64() * 1000.0;
        self.breakdown.push(label, elapsed_ms);
        self.lap = now;
    }

    pub(crate) fn finish(mut self) -> TimingBreakdown {
        self.breakdown.total_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        self.breakdown
    }
}
