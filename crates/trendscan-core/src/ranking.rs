//! Cross-sectional ranking of composite momentum scores.
//!
//! This is the engine's only cross-instrument operation. It works on a
//! complete snapshot of the universe's scores for one date, never
//! incrementally: percentile grades are undefined over a partial set.

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// One instrument's composite momentum score on the evaluation date.
/// Instruments without a score never enter the ranking input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumScore {
    pub ticker: Symbol,
    pub rs_momentum: f64,
}

/// Rank and percentile grade assigned to one instrument for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankAssignment {
    pub ticker: Symbol,
    pub rs_rank: u32,
    pub rs_grade: f64,
}

/// Rank a complete score set: rank 1 is the strongest momentum, ties are
/// broken by ticker ascending so output is a deterministic total order.
/// Idempotent: unchanged scores always produce identical assignments.
pub fn rank_universe(mut scores: Vec<MomentumScore>) -> Vec<RankAssignment> {
    scores.sort_by(|a, b| {
        b.rs_momentum
            .total_cmp(&a.rs_momentum)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });

    let universe = scores.len();
    scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| {
            let rs_rank = index as u32 + 1;
            RankAssignment {
                ticker: score.ticker,
                rs_rank,
                rs_grade: percentile_grade(rs_rank, universe),
            }
        })
        .collect()
}

/// Percentile grade in [0, 100]: rank 1 maps to 100, rank N to 0.
/// A single-instrument universe grades 100.
pub fn percentile_grade(rank: u32, universe: usize) -> f64 {
    if universe <= 1 {
        return 100.0;
    }
    100.0 * (1.0 - (f64::from(rank) - 1.0) / (universe as f64 - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(ticker: &str, rs_momentum: f64) -> MomentumScore {
        MomentumScore {
            ticker: Symbol::parse(ticker).expect("ticker"),
            rs_momentum,
        }
    }

    #[test]
    fn ranks_descending_with_grade_endpoints() {
        let ranked = rank_universe(vec![
            score("005930", 10.0),
            score("000660", 30.0),
            score("035420", 20.0),
        ]);

        let order: Vec<(&str, u32)> = ranked
            .iter()
            .map(|a| (a.ticker.as_str(), a.rs_rank))
            .collect();
        assert_eq!(
            order,
            vec![("000660", 1), ("035420", 2), ("005930", 3)]
        );
        assert_eq!(ranked[0].rs_grade, 100.0);
        assert_eq!(ranked[1].rs_grade, 50.0);
        assert_eq!(ranked[2].rs_grade, 0.0);
    }

    #[test]
    fn single_instrument_grades_100() {
        let ranked = rank_universe(vec![score("005930", -4.2)]);
        assert_eq!(ranked[0].rs_rank, 1);
        assert_eq!(ranked[0].rs_grade, 100.0);
    }

    #[test]
    fn ties_break_on_ticker_ascending() {
        let first = rank_universe(vec![score("035420", 15.0), score("000660", 15.0)]);
        let second = rank_universe(vec![score("000660", 15.0), score("035420", 15.0)]);

        assert_eq!(first, second);
        assert_eq!(first[0].ticker.as_str(), "000660");
        assert_eq!(first[0].rs_rank, 1);
        assert_eq!(first[1].rs_rank, 2);
    }

    #[test]
    fn ranks_are_a_permutation_of_one_to_n() {
        let ranked = rank_universe(vec![
            score("A", 5.0),
            score("B", -1.0),
            score("C", 9.0),
            score("D", 2.5),
        ]);
        let mut ranks: Vec<u32> = ranked.iter().map(|a| a.rs_rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn reranking_unchanged_scores_is_idempotent() {
        let scores = vec![score("A", 5.0), score("B", -1.0), score("C", 9.0)];
        assert_eq!(rank_universe(scores.clone()), rank_universe(scores));
    }
}
