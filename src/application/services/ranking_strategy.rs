//! # Ranking Strategy
//!
//! Strategies for ranking carrier quotes.
//!
//! This module provides the [`RankingStrategy`] trait, the production
//! [`CheapestFirst`] strategy, and the free functions the facade uses to
//! turn a batch of [`CarrierOutcome`]s into a top-K list.
//!
//! Every strategy sorts stably: quotes that compare equal keep the order in
//! which they were discovered (carrier order first, then the carrier's own
//! tier order).
//!
//! Prices are compared by amount alone. Adapters reject rates quoted in any
//! currency other than the request's, so a batch never mixes currencies.

use crate::domain::entities::{CarrierFailure, CarrierOutcome, Quote};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A quote with its position in the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedQuote {
    /// The quote being ranked.
    pub quote: Quote,
    /// The rank (1 = best).
    pub rank: usize,
}

impl RankedQuote {
    /// Creates a new ranked quote.
    #[must_use]
    pub fn new(quote: Quote, rank: usize) -> Self {
        Self { quote, rank }
    }

    /// Returns true if this quote is the best (rank 1).
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RankedQuote(#{} {})", self.rank, self.quote)
    }
}

/// Trait for ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks the given quotes, best first.
    ///
    /// Implementations must be stable: quotes the strategy considers equal
    /// keep their input order.
    fn rank(&self, quotes: &[Quote]) -> Vec<RankedQuote>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

fn rank_by<F>(quotes: &[Quote], compare: F) -> Vec<RankedQuote>
where
    F: Fn(&Quote, &Quote) -> Ordering,
{
    let mut sorted: Vec<&Quote> = quotes.iter().collect();
    // `sort_by` is stable
    sorted.sort_by(|a, b| compare(a, b));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, quote)| RankedQuote::new(quote.clone(), i + 1))
        .collect()
}

fn by_price(a: &Quote, b: &Quote) -> Ordering {
    a.total_price().amount().cmp(&b.total_price().amount())
}

/// Lowest total price first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestFirst;

impl CheapestFirst {
    /// Creates a new cheapest-first strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for CheapestFirst {
    fn rank(&self, quotes: &[Quote]) -> Vec<RankedQuote> {
        rank_by(quotes, by_price)
    }

    fn name(&self) -> &'static str {
        "CheapestFirst"
    }
}

/// Fewest business days first, then lowest price.
///
/// Quotes without a business-day estimate sort after every quote that has
/// one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastestDelivery;

impl FastestDelivery {
    /// Creates a new fastest-delivery strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for FastestDelivery {
    fn rank(&self, quotes: &[Quote]) -> Vec<RankedQuote> {
        let days = |q: &Quote| q.delivery_window().and_then(|w| w.business_days);
        rank_by(quotes, |a, b| match (days(a), days(b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| by_price(a, b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => by_price(a, b),
        })
    }

    fn name(&self) -> &'static str {
        "FastestDelivery"
    }
}

/// Selects a ranking strategy by name in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKind {
    /// [`CheapestFirst`].
    #[default]
    Cheapest,
    /// [`FastestDelivery`].
    Fastest,
}

impl RankingKind {
    /// Returns the strategy this kind names.
    #[must_use]
    pub fn strategy(self) -> Box<dyn RankingStrategy> {
        match self {
            Self::Cheapest => Box::new(CheapestFirst),
            Self::Fastest => Box::new(FastestDelivery),
        }
    }
}

impl FromStr for RankingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cheapest" => Ok(Self::Cheapest),
            "fastest" => Ok(Self::Fastest),
            other => Err(format!("unknown ranking strategy: {}", other)),
        }
    }
}

/// Collects every quote from successful outcomes, in discovery order.
#[must_use]
pub fn flatten_quotes(outcomes: &[CarrierOutcome]) -> Vec<Quote> {
    outcomes
        .iter()
        .flat_map(|outcome| outcome.quote_list().iter().cloned())
        .collect()
}

/// Collects the failures, in carrier order.
#[must_use]
pub fn failures(outcomes: &[CarrierOutcome]) -> Vec<CarrierFailure> {
    outcomes
        .iter()
        .filter_map(CarrierOutcome::as_failure)
        .cloned()
        .collect()
}

/// Ranks all surviving quotes with `strategy` and keeps the best `k`.
#[must_use]
pub fn rank_with(
    strategy: &dyn RankingStrategy,
    outcomes: &[CarrierOutcome],
    k: usize,
) -> Vec<RankedQuote> {
    let mut ranked = strategy.rank(&flatten_quotes(outcomes));
    ranked.truncate(k);
    ranked
}

/// Returns the `k` cheapest quotes across all successful outcomes.
///
/// An empty result is not an error here; the facade decides what an empty
/// ranking means.
#[must_use]
pub fn rank(outcomes: &[CarrierOutcome], k: usize) -> Vec<Quote> {
    rank_with(&CheapestFirst, outcomes, k)
        .into_iter()
        .map(|ranked| ranked.quote)
        .collect()
}
