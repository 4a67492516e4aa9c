use metrics_exporter_prometheus::PrometheusHandle;
use price_insight::workflows::prediction::{RandomSource, SeededRandom, ThreadRandom};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Random source picked at startup: seeded when `APP_RANDOM_SEED`/`--seed` is set.
#[derive(Debug)]
pub(crate) enum ServiceRandom {
    Seeded(SeededRandom),
    Thread(ThreadRandom),
}

impl ServiceRandom {
    pub(crate) fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(SeededRandom::new(seed)),
            None => Self::Thread(ThreadRandom),
        }
    }
}

impl RandomSource for ServiceRandom {
    fn next_unit(&self) -> f64 {
        match self {
            ServiceRandom::Seeded(random) => random.next_unit(),
            ServiceRandom::Thread(random) => random.next_unit(),
        }
    }
}
