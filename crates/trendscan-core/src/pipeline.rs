//! Batch passes over the universe: per-instrument momentum, the
//! cross-sectional ranking barrier, and the staged screening funnel.
//!
//! The momentum pass fans instruments out across scoped worker threads;
//! workers share nothing but the store handle and write disjoint rows.
//! Ranking runs strictly after the workers join, because percentile
//! grades are only defined over a complete score snapshot.

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::momentum::compute_indicators;
use crate::ranking::rank_universe;
use crate::store::{Candidate, DailySnapshot, PriceSeriesStore};
use crate::template::{matches_trend_template, ScreenParams};
use crate::{Instrument, StoreError, Symbol, TradingDate};

/// Default worker count for the momentum pass.
pub const DEFAULT_WORKERS: usize = 4;

/// Which rows of each instrument the momentum pass persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumScope {
    /// Recompute and persist every observation row.
    FullHistory,
    /// Recompute over the full history but persist only the newest row.
    /// This is the incremental daily pass.
    LatestOnly,
}

/// One instrument that could not be processed. The pass carries on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentFailure {
    pub ticker: Symbol,
    pub reason: String,
}

/// Outcome summary of one momentum pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub total_instruments: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub rows_written: usize,
    pub failures: Vec<InstrumentFailure>,
    pub elapsed_ms: u64,
}

/// Outcome summary of one ranking pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub date: TradingDate,
    pub ranked: usize,
}

/// Combined output of the composed momentum → rank → screen run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub momentum: BatchReport,
    pub ranking: Option<RankingReport>,
    pub candidates: Vec<Candidate>,
}

enum PassOutcome {
    Updated(usize),
    Skipped,
    Failed(InstrumentFailure),
}

/// Recompute derived indicator fields for every active instrument.
///
/// Per-instrument failures (contract violations, backend write errors)
/// are collected into the report; they never halt the pass. Only a
/// failure to enumerate the universe aborts.
pub fn run_momentum_pass<S>(
    store: &S,
    scope: MomentumScope,
    workers: usize,
) -> Result<BatchReport, StoreError>
where
    S: PriceSeriesStore + ?Sized,
{
    let started = Instant::now();
    let run_id = Uuid::new_v4();
    let instruments = store.instruments()?;
    let workers = workers.clamp(1, instruments.len().max(1));
    info!(
        %run_id,
        total = instruments.len(),
        workers,
        ?scope,
        "starting momentum pass"
    );

    let outcomes: Mutex<Vec<PassOutcome>> = Mutex::new(Vec::with_capacity(instruments.len()));
    let chunk_size = instruments.len().div_ceil(workers).max(1);

    thread::scope(|runner| {
        for chunk in instruments.chunks(chunk_size) {
            let outcomes = &outcomes;
            runner.spawn(move || {
                for instrument in chunk {
                    let outcome = process_instrument(store, instrument, scope);
                    outcomes
                        .lock()
                        .expect("momentum outcome mutex poisoned")
                        .push(outcome);
                }
            });
        }
    });

    let mut report = BatchReport {
        run_id,
        total_instruments: instruments.len(),
        succeeded: 0,
        skipped: 0,
        failed: 0,
        rows_written: 0,
        failures: Vec::new(),
        elapsed_ms: 0,
    };
    for outcome in outcomes
        .into_inner()
        .expect("momentum outcome mutex poisoned")
    {
        match outcome {
            PassOutcome::Updated(rows) => {
                report.succeeded += 1;
                report.rows_written += rows;
            }
            PassOutcome::Skipped => report.skipped += 1,
            PassOutcome::Failed(failure) => {
                report.failed += 1;
                report.failures.push(failure);
            }
        }
    }
    // Worker interleaving is nondeterministic; the report should not be.
    report.failures.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    report.elapsed_ms = started.elapsed().as_millis() as u64;

    info!(
        %run_id,
        succeeded = report.succeeded,
        skipped = report.skipped,
        failed = report.failed,
        rows = report.rows_written,
        elapsed_ms = report.elapsed_ms,
        "momentum pass complete"
    );
    Ok(report)
}

fn process_instrument<S>(store: &S, instrument: &Instrument, scope: MomentumScope) -> PassOutcome
where
    S: PriceSeriesStore + ?Sized,
{
    let ticker = &instrument.ticker;
    let history = match store.price_history(ticker) {
        Ok(history) => history,
        Err(error) => {
            return PassOutcome::Failed(InstrumentFailure {
                ticker: ticker.clone(),
                reason: error.to_string(),
            })
        }
    };
    if history.is_empty() {
        debug!(%ticker, "no observations, skipping");
        return PassOutcome::Skipped;
    }

    let rows = match compute_indicators(&history) {
        Ok(rows) => rows,
        Err(error) => {
            warn!(%ticker, %error, "history violates the ordering contract");
            return PassOutcome::Failed(InstrumentFailure {
                ticker: ticker.clone(),
                reason: error.to_string(),
            });
        }
    };

    let rows_to_write = match scope {
        MomentumScope::FullHistory => rows.as_slice(),
        MomentumScope::LatestOnly => {
            let Some(last) = rows.last() else {
                return PassOutcome::Skipped;
            };
            std::slice::from_ref(last)
        }
    };

    match store.upsert_indicators(ticker, rows_to_write) {
        Ok(written) => {
            debug!(%ticker, written, "indicators updated");
            PassOutcome::Updated(written)
        }
        Err(error) => PassOutcome::Failed(InstrumentFailure {
            ticker: ticker.clone(),
            reason: error.to_string(),
        }),
    }
}

/// Rank the whole universe's composite scores for one date and persist
/// rank/grade. Collect-then-rank, two phases; must only run once the
/// momentum passes for the date have committed.
pub fn run_ranking_pass<S>(store: &S, date: TradingDate) -> Result<RankingReport, StoreError>
where
    S: PriceSeriesStore + ?Sized,
{
    let scores = store.momentum_scores_on(date)?;
    if scores.is_empty() {
        warn!(%date, "no momentum scores on date, nothing to rank");
        return Ok(RankingReport { date, ranked: 0 });
    }

    let assignments = rank_universe(scores);
    let ranked = store.upsert_rankings(date, &assignments)?;
    info!(%date, ranked, "ranking pass committed");
    Ok(RankingReport { date, ranked })
}

/// The staged funnel: cheap per-instrument predicates, then (only when
/// survivors exist and the date is unranked) the ranking barrier, then
/// the grade threshold.
pub fn run_screen<S>(
    store: &S,
    date: TradingDate,
    params: &ScreenParams,
) -> Result<Vec<Candidate>, StoreError>
where
    S: PriceSeriesStore + ?Sized,
{
    params.validate()?;

    let snapshots = store.snapshots_on(date)?;
    let universe = snapshots.len();
    let survivors: Vec<DailySnapshot> = snapshots
        .into_iter()
        .filter(|snapshot| matches_trend_template(snapshot, params.min_price))
        .collect();
    debug!(%date, universe, survivors = survivors.len(), "stage 1 complete");

    if survivors.is_empty() {
        return Ok(Vec::new());
    }

    let grades = resolve_grades(store, date, &survivors)?;

    let mut candidates: Vec<Candidate> = survivors
        .into_iter()
        .filter_map(|snapshot| {
            let rs_grade = *grades.get(&snapshot.ticker)?;
            if rs_grade >= params.min_grade {
                Some(Candidate {
                    ticker: snapshot.ticker,
                    name: snapshot.name,
                    close: snapshot.close,
                    rs_grade,
                })
            } else {
                None
            }
        })
        .collect();
    candidates.sort_by(|a, b| {
        b.rs_grade
            .total_cmp(&a.rs_grade)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    if let Some(limit) = params.limit {
        candidates.truncate(limit);
    }

    info!(%date, candidates = candidates.len(), "screen complete");
    Ok(candidates)
}

/// Stage 2: reuse persisted grades when the date is already ranked,
/// otherwise rank the ENTIRE scored universe first. Ranking only the
/// stage-1 survivors would bias every percentile and is not an option.
fn resolve_grades<S>(
    store: &S,
    date: TradingDate,
    survivors: &[DailySnapshot],
) -> Result<HashMap<Symbol, f64>, StoreError>
where
    S: PriceSeriesStore + ?Sized,
{
    if store.has_rankings(date)? {
        return Ok(survivors
            .iter()
            .filter_map(|snapshot| snapshot.rs_grade.map(|grade| (snapshot.ticker.clone(), grade)))
            .collect());
    }

    debug!(%date, "rankings absent, running ranking pass");
    run_ranking_pass(store, date)?;
    let refreshed = store.snapshots_on(date)?;
    Ok(refreshed
        .into_iter()
        .filter_map(|snapshot| snapshot.rs_grade.map(|grade| (snapshot.ticker, grade)))
        .collect())
}

/// Composed convenience run: momentum over the universe, ranking on the
/// latest observation date, then the screen.
pub fn run_analysis<S>(
    store: &S,
    params: &ScreenParams,
    scope: MomentumScope,
    workers: usize,
) -> Result<AnalysisReport, StoreError>
where
    S: PriceSeriesStore + ?Sized,
{
    let momentum = run_momentum_pass(store, scope, workers)?;

    let Some(date) = store.latest_date()? else {
        warn!("no price data loaded, skipping ranking and screen");
        return Ok(AnalysisReport {
            momentum,
            ranking: None,
            candidates: Vec::new(),
        });
    };

    let ranking = run_ranking_pass(store, date)?;
    let candidates = run_screen(store, date, params)?;
    Ok(AnalysisReport {
        momentum,
        ranking: Some(ranking),
        candidates,
    })
}
