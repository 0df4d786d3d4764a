//! Run every configured tile set, one independent job at a time.

use std::path::{Path, PathBuf};

use crate::assemble::{assemble, Layout};
use crate::error::AssembleError;
use crate::store::ImageStore;
use crate::tileset::StitchConfig;

#[derive(Debug)]
pub struct Outcome {
    pub name: String,
    pub result: Result<PathBuf, AssembleError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize { self.outcomes.len() }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &AssembleError)> + '_ {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }

    pub fn all_succeeded(&self) -> bool { self.succeeded() == self.total() }
}

/// Assemble every tile set in `config` from `dir`. A failing set is logged
/// and recorded; the remaining sets are still attempted.
pub fn run_batch<S: ImageStore + ?Sized>(store: &S, dir: &Path, config: &StitchConfig) -> BatchReport {
    run_with(store, dir, config, |_| {})
}

/// Like [`run_batch`], calling `on_outcome` as soon as each set finishes.
pub fn run_with<S, F>(store: &S, dir: &Path, config: &StitchConfig, mut on_outcome: F) -> BatchReport
where
    S: ImageStore + ?Sized,
    F: FnMut(&Outcome),
{
    let layout: Layout = config.layout();
    let mut report = BatchReport::default();
    for set in &config.tile_sets {
        let result = assemble(store, dir, set, &layout);
        if let Err(e) = &result {
            log::warn!("skipping {}: {}", set.name, e);
        }
        let outcome = Outcome { name: set.name.clone(), result };
        on_outcome(&outcome);
        report.outcomes.push(outcome);
    }
    log::info!("assembled {}/{} maps", report.succeeded(), report.total());
    report
}
