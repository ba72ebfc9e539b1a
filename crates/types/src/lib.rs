// crates/types/src/lib.rs
//! Shared domain types for the eunlg pipeline.
//!
//! Everything that crosses a crate boundary lives here: raw
//! observations as loaded from the dataset caches, the messages the
//! extractor derives from them, and the document plan handed to the
//! realizer.

pub mod period;

pub use period::{ParsePeriodError, TimePeriod, TimeRange};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a statistical table: one variable, for one
/// location, at one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub dataset: String,
    pub location: String,
    pub variable: String,
    pub period: TimePeriod,
    pub value: f64,
    pub unit: String,
}

/// The kind of claim a message makes about its observation.
///
/// Ordering follows extraction order within a variable group and is
/// used only as a stable tie-break key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactKind {
    Value,
    Rank,
    Trend,
    Comparison,
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FactKind::Value => "value",
            FactKind::Rank => "rank",
            FactKind::Trend => "trend",
            FactKind::Comparison => "comparison",
        };
        write!(f, "{name}")
    }
}

/// Kind-specific payload of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Metrics {
    /// A plain reading of the observation, with how unusual it looks
    /// against its peer group (0.0 = typical, larger = more unusual).
    Value { value: f64, outlierness: f64 },
    /// Position among peer locations for the same variable and period.
    /// `position` is a dense rank counted from the top, 1-based.
    Rank { position: u32, of: u32 },
    /// Change between the earliest and latest reading of a variable.
    Trend {
        from: f64,
        to: f64,
        change_pct: f64,
    },
    /// The observation against the mean of its peer group.
    Comparison {
        value: f64,
        reference: f64,
        delta: f64,
    },
}

impl Metrics {
    pub fn kind(&self) -> FactKind {
        match self {
            Metrics::Value { .. } => FactKind::Value,
            Metrics::Rank { .. } => FactKind::Rank,
            Metrics::Trend { .. } => FactKind::Trend,
            Metrics::Comparison { .. } => FactKind::Comparison,
        }
    }
}

/// One potential news fact, derived from (and traceable to) raw
/// observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub dataset: String,
    pub location: String,
    pub variable: String,
    /// Period the claim is about. For trends this is the latest period
    /// covered.
    pub period: TimePeriod,
    pub metrics: Metrics,
    /// Key selecting the surface template, e.g. `"trend-rise"`.
    pub text_key: String,
    /// Observations the claim was derived from.
    pub provenance: Vec<Observation>,
}

impl Message {
    pub fn kind(&self) -> FactKind {
        self.metrics.kind()
    }
}

/// A message with its interestingness score and extraction sequence
/// number attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMessage {
    pub message: Message,
    pub score: f64,
    /// Position in extraction order; the stable tie-break for equal
    /// scores.
    pub seq: usize,
}

/// Role of a section within a document plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionRole {
    Headline,
    Body,
}

/// An ordered run of messages under one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub role: SectionRole,
    pub messages: Vec<ScoredMessage>,
}

/// The planner's output: a headline section holding the single
/// top-scored message and a body section holding the rest in
/// descending score order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPlan {
    pub headline: Section,
    pub body: Section,
}

impl DocumentPlan {
    pub fn new(headline: ScoredMessage, body: Vec<ScoredMessage>) -> Self {
        Self {
            headline: Section {
                role: SectionRole::Headline,
                messages: vec![headline],
            },
            body: Section {
                role: SectionRole::Body,
                messages: body,
            },
        }
    }

    /// The headline message, if the plan has one.
    pub fn headline_message(&self) -> Option<&ScoredMessage> {
        self.headline.messages.first()
    }

    pub fn body_messages(&self) -> &[ScoredMessage] {
        &self.body.messages
    }
}

/// Per-kind multipliers applied on top of the base interestingness
/// terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub value: f64,
    pub rank: f64,
    pub trend: f64,
    pub comparison: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            value: 1.0,
            rank: 1.5,
            trend: 10.0,
            comparison: 2.0,
        }
    }
}

impl ScoreWeights {
    pub fn for_kind(&self, kind: FactKind) -> f64 {
        match kind {
            FactKind::Value => self.value,
            FactKind::Rank => self.rank,
            FactKind::Trend => self.trend,
            FactKind::Comparison => self.comparison,
        }
    }
}
