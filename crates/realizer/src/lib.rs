// crates/realizer/src/lib.rs
//! Template-based surface realization of document plans.
//!
//! The realizer owns the built-in language packs and renders a plan
//! into a header line plus a body paragraph. It is intentionally dumb:
//! no grammar, no aggregation, just template lookup and variable
//! substitution in plan order.

pub mod packs;
pub mod template;

pub use packs::{LanguagePack, LANGUAGE_PACKS};
pub use template::{render_template, Template};

use std::collections::HashMap;

use thiserror::Error;

use eunlg_types::{DocumentPlan, Message, Metrics, ScoredMessage};

/// Errors raised while realizing a plan
#[derive(Debug, Error)]
pub enum RealizeError {
    #[error("Unsupported language '{language}'")]
    UnsupportedLanguage { language: String },

    #[error("No {language} template for {fact_kind} fact '{text_key}'")]
    MissingTemplate {
        language: String,
        fact_kind: String,
        text_key: String,
    },
}

/// A realized news report.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizedReport {
    pub header: String,
    pub body: String,
}

/// Which surface register to render a message in.
enum Register {
    Headline,
    Body,
}

/// Turns document plans into natural-language text.
pub struct Realizer {
    packs: &'static [LanguagePack],
}

impl Realizer {
    pub fn new() -> Self {
        Self {
            packs: LANGUAGE_PACKS,
        }
    }

    /// Supported language codes, in pack order.
    pub fn languages(&self) -> Vec<String> {
        self.packs.iter().map(|p| p.language.to_string()).collect()
    }

    /// Whether `language` can realize facts from `dataset`.
    pub fn supports(&self, language: &str, dataset: &str) -> bool {
        self.packs
            .iter()
            .any(|p| p.language == language && p.supports(dataset))
    }

    /// Datasets realizable in `language`.
    pub fn datasets_for(&self, language: &str) -> Result<Vec<String>, RealizeError> {
        let pack = self.pack(language)?;
        Ok(pack.datasets.iter().map(|d| d.to_string()).collect())
    }

    /// Realize a whole plan: the headline message in headline register,
    /// body messages as sentences joined in plan order.
    pub fn realize(
        &self,
        plan: &DocumentPlan,
        language: &str,
    ) -> Result<RealizedReport, RealizeError> {
        let pack = self.pack(language)?;
        let header = match plan.headline_message() {
            Some(message) => render_message(pack, message, Register::Headline)?,
            None => String::new(),
        };
        let sentences = plan
            .body_messages()
            .iter()
            .map(|message| render_message(pack, message, Register::Body))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RealizedReport {
            header,
            body: sentences.join(" "),
        })
    }

    fn pack(&self, language: &str) -> Result<&LanguagePack, RealizeError> {
        self.packs
            .iter()
            .find(|p| p.language == language)
            .ok_or_else(|| RealizeError::UnsupportedLanguage {
                language: language.to_string(),
            })
    }
}

impl Default for Realizer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_message(
    pack: &LanguagePack,
    scored: &ScoredMessage,
    register: Register,
) -> Result<String, RealizeError> {
    let message = &scored.message;
    let template = pack
        .template(message.kind(), &message.text_key)
        .ok_or_else(|| RealizeError::MissingTemplate {
            language: pack.language.to_string(),
            fact_kind: message.kind().to_string(),
            text_key: message.text_key.clone(),
        })?;
    let text = match register {
        Register::Headline => template.headline,
        Register::Body => template.body,
    };
    Ok(render_template(text, &template_vars(pack, message)))
}

/// Variables available to the templates for one message.
///
/// Directional quantities (trend change, comparison delta) are passed
/// as magnitudes; the direction lives in the text key.
fn template_vars(pack: &LanguagePack, message: &Message) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    vars.insert("location", pack.location_name(&message.location).to_string());
    vars.insert("variable", pack.variable_name(&message.variable).to_string());
    vars.insert("period", message.period.to_string());
    vars.insert(
        "unit",
        message
            .provenance
            .first()
            .map(|o| o.unit.clone())
            .unwrap_or_default(),
    );
    match &message.metrics {
        Metrics::Value { value, .. } => {
            vars.insert("value", value.to_string());
        }
        Metrics::Rank { position, of } => {
            vars.insert("position", position.to_string());
            vars.insert("of", of.to_string());
        }
        Metrics::Trend {
            from,
            to,
            change_pct,
        } => {
            vars.insert("from", from.to_string());
            vars.insert("to", to.to_string());
            vars.insert("change_pct", change_pct.abs().to_string());
            let from_period = message
                .provenance
                .first()
                .map(|o| o.period.to_string())
                .unwrap_or_else(|| message.period.to_string());
            vars.insert("from_period", from_period);
        }
        Metrics::Comparison {
            value,
            reference,
            delta,
        } => {
            vars.insert("value", value.to_string());
            vars.insert("reference", reference.to_string());
            vars.insert("delta", delta.abs().to_string());
        }
    }
    vars
}
