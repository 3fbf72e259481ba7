//! Chunked similarity scan over the shared note cache.
//!
//! # Responsibility
//! - Score candidates by text similarity plus a creation-time bonus.
//! - Drop candidates hidden by hoisting and penalize archived ones.
//! - Sort by coefficient and bound the result list.
//!
//! # Invariants
//! - The source note is never its own candidate.
//! - Acceptance uses a strict `>` threshold, checked before the archived
//!   penalty; penalized candidates are not re-filtered.
//! - A read guard is held for one chunk at a time and released before yielding,
//!   so writers may change the cache between chunks.

use crate::cache::note_cache::{NoteCache, SharedNoteCache};
use crate::context::hoist::HoistContext;
use crate::dates::{format_utc_date_time, parse_utc_date_time};
use crate::model::note::{Note, NoteId};
use crate::service::archive_service::is_note_path_archived;
use crate::service::path_service::find_some_path;
use crate::similarity::text::{DiceCoefficient, TextSimilarity};
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Tunables for one similarity scan. Defaults reproduce the reference scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityOptions {
    /// Half-width of the creation-time bonus window, in seconds.
    pub window_secs: i64,
    /// Half-width of the "same import burst" exclusion window, in seconds.
    pub exclusion_secs: i64,
    /// Added to the coefficient inside the window and outside the exclusion.
    pub time_bonus: f64,
    /// Subtracted from accepted candidates whose resolved path is archived.
    pub archived_penalty: f64,
    /// Candidates need a coefficient strictly above this value.
    pub min_coefficient: f64,
    /// Result lists longer than this are cut to `max_results`.
    pub truncate_trigger: usize,
    pub max_results: usize,
    /// Candidates scored between two yields to the runtime.
    pub yield_every: usize,
    /// Clamp final coefficients into `[0, 1]`.
    pub clamp_coefficients: bool,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            window_secs: 1800,
            exclusion_secs: 5,
            time_bonus: 0.3,
            archived_penalty: 0.2,
            min_coefficient: 0.5,
            truncate_trigger: 50,
            max_results: 200,
            yield_every: 200,
            clamp_coefficients: false,
        }
    }
}

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult {
    pub coeff: f64,
    pub note_path: Vec<NoteId>,
    pub note_id: NoteId,
}

/// Errors from cancellable scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    /// Scan stopped at a yield point because its token was cancelled.
    Cancelled { processed: usize },
}

impl Display for SimilarityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled { processed } => {
                write!(f, "similarity scan cancelled after {processed} candidates")
            }
        }
    }
}

impl Error for SimilarityError {}

#[derive(Debug, Clone, Copy)]
struct CreationWindow {
    min: DateTime<Utc>,
    min_excluded: DateTime<Utc>,
    max_excluded: DateTime<Utc>,
    max: DateTime<Utc>,
}

impl CreationWindow {
    /// Returns `None` when the configured widths overflow the date range.
    fn around(created: DateTime<Utc>, options: &SimilarityOptions) -> Option<Self> {
        let window = TimeDelta::try_seconds(options.window_secs)?;
        let exclusion = TimeDelta::try_seconds(options.exclusion_secs)?;
        Some(Self {
            min: created.checked_sub_signed(window)?,
            min_excluded: created.checked_sub_signed(exclusion)?,
            max_excluded: created.checked_add_signed(exclusion)?,
            max: created.checked_add_signed(window)?,
        })
    }

    fn earns_bonus(&self, created: DateTime<Utc>) -> bool {
        created >= self.min
            && created <= self.max
            && (created < self.min_excluded || created > self.max_excluded)
    }
}

struct ScanSource {
    flat_text: String,
    window: Option<CreationWindow>,
}

/// Similar-note finder over a shared cache.
pub struct SimilarityEngine<S: TextSimilarity = DiceCoefficient> {
    cache: SharedNoteCache,
    scorer: S,
    options: SimilarityOptions,
}

impl SimilarityEngine<DiceCoefficient> {
    /// Creates an engine with the default Dice scorer and default options.
    pub fn new(cache: SharedNoteCache) -> Self {
        Self::with_scorer(cache, DiceCoefficient)
    }
}

impl<S: TextSimilarity> SimilarityEngine<S> {
    pub fn with_scorer(cache: SharedNoteCache, scorer: S) -> Self {
        Self {
            cache,
            scorer,
            options: SimilarityOptions::default(),
        }
    }

    /// Replaces scan options.
    pub fn with_options(mut self, options: SimilarityOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SimilarityOptions {
        &self.options
    }

    /// Finds notes similar to `note_id`, best match first.
    ///
    /// Returns an empty list when the source note is not cached.
    pub async fn find_similar_notes(
        &self,
        note_id: &str,
        hoist: &HoistContext,
    ) -> Vec<SimilarityResult> {
        match self.scan(note_id, hoist, None).await {
            Ok(results) => results,
            Err(SimilarityError::Cancelled { .. }) => Vec::new(),
        }
    }

    /// Same as [`Self::find_similar_notes`], checking `token` at every yield point.
    pub async fn find_similar_notes_cancellable(
        &self,
        note_id: &str,
        hoist: &HoistContext,
        token: &CancellationToken,
    ) -> Result<Vec<SimilarityResult>, SimilarityError> {
        self.scan(note_id, hoist, Some(token)).await
    }

    async fn scan(
        &self,
        note_id: &str,
        hoist: &HoistContext,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<SimilarityResult>, SimilarityError> {
        let started_at = Instant::now();

        let (source, candidate_ids) = {
            let cache = self.cache.read().await;
            let Some(note) = cache.note(note_id) else {
                debug!("event=similar_notes module=similarity status=not_found note_id={note_id}");
                return Ok(Vec::new());
            };
            let mut candidate_ids = cache.note_ids();
            candidate_ids.retain(|id| *id != note.note_id);
            (self.scan_source(note), candidate_ids)
        };

        info!(
            "event=similar_notes module=similarity status=start note_id={} candidates={}",
            note_id,
            candidate_ids.len()
        );

        let mut results = Vec::new();
        let mut processed = 0usize;

        for chunk in candidate_ids.chunks(self.options.yield_every.max(1)) {
            {
                let cache = self.cache.read().await;
                for candidate_id in chunk {
                    // Removed since the scan started.
                    let Some(candidate) = cache.note(candidate_id) else {
                        continue;
                    };
                    if let Some(result) = self.evaluate(&cache, hoist, &source, candidate) {
                        results.push(result);
                    }
                    processed += 1;
                }
            }

            if token.is_some_and(CancellationToken::is_cancelled) {
                info!(
                    "event=similar_notes module=similarity status=cancelled note_id={} processed={} duration_ms={}",
                    note_id,
                    processed,
                    started_at.elapsed().as_millis()
                );
                return Err(SimilarityError::Cancelled { processed });
            }
            tokio::task::yield_now().await;
        }

        results.sort_by(|a, b| b.coeff.partial_cmp(&a.coeff).unwrap_or(Ordering::Equal));
        if results.len() > self.options.truncate_trigger {
            results.truncate(self.options.max_results);
        }

        info!(
            "event=similar_notes module=similarity status=ok note_id={} processed={} results={} duration_ms={}",
            note_id,
            processed,
            results.len(),
            started_at.elapsed().as_millis()
        );

        Ok(results)
    }

    fn scan_source(&self, note: &Note) -> ScanSource {
        let window = match parse_utc_date_time(&note.utc_date_created) {
            Some(created) => match CreationWindow::around(created, &self.options) {
                Some(window) => {
                    debug!(
                        "event=similar_notes module=similarity status=window note_id={} min={} max={}",
                        note.note_id,
                        format_utc_date_time(window.min),
                        format_utc_date_time(window.max)
                    );
                    Some(window)
                }
                None => {
                    warn!(
                        "event=similar_notes module=similarity status=window_overflow note_id={} window_secs={} exclusion_secs={}",
                        note.note_id, self.options.window_secs, self.options.exclusion_secs
                    );
                    None
                }
            },
            None => {
                warn!(
                    "event=similar_notes module=similarity status=invalid_date note_id={}",
                    note.note_id
                );
                None
            }
        };

        ScanSource {
            flat_text: note.flat_text.clone(),
            window,
        }
    }

    fn evaluate(
        &self,
        cache: &NoteCache,
        hoist: &HoistContext,
        source: &ScanSource,
        candidate: &Note,
    ) -> Option<SimilarityResult> {
        let mut coeff = self
            .scorer
            .similarity(&source.flat_text, &candidate.flat_text);

        let earns_bonus = source.window.is_some_and(|window| {
            parse_utc_date_time(&candidate.utc_date_created)
                .is_some_and(|created| window.earns_bonus(created))
        });
        if earns_bonus {
            coeff += self.options.time_bonus;
        }

        // NaN never passes the threshold.
        if coeff.is_nan() || coeff <= self.options.min_coefficient {
            return None;
        }

        // Hidden by hoisting.
        let note_path = find_some_path(cache, hoist, &candidate.note_id)?;

        if is_note_path_archived(cache, &note_path) {
            coeff -= self.options.archived_penalty;
        }
        if self.options.clamp_coefficients {
            coeff = coeff.clamp(0.0, 1.0);
        }

        Some(SimilarityResult {
            coeff,
            note_path,
            note_id: candidate.note_id.clone(),
        })
    }
}
