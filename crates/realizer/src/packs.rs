// crates/realizer/src/packs.rs
//! Built-in language packs: surface templates plus location and
//! variable lexicons.
//!
//! English and Finnish cover every dataset; the German pack carries
//! consumer-price templates only. Lexicon misses fall back to the raw
//! code so an unknown country or variable never aborts realization.

use eunlg_types::FactKind;

use crate::template::Template;

/// Templates and lexicons for one output language.
pub struct LanguagePack {
    /// ISO 639-1 code, lowercase.
    pub language: &'static str,
    /// Datasets this pack has vocabulary for.
    pub datasets: &'static [&'static str],
    pub templates: &'static [Template],
    pub locations: &'static [(&'static str, &'static str)],
    pub variables: &'static [(&'static str, &'static str)],
}

impl LanguagePack {
    pub fn template(&self, kind: FactKind, text_key: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|t| t.kind == kind && t.text_key == text_key)
    }

    pub fn supports(&self, dataset: &str) -> bool {
        self.datasets.contains(&dataset)
    }

    /// Human name for a location code, or the code itself.
    pub fn location_name<'a>(&self, code: &'a str) -> &'a str {
        self.locations
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
            .unwrap_or(code)
    }

    /// Human name for a variable code, or the code itself.
    pub fn variable_name<'a>(&self, code: &'a str) -> &'a str {
        self.variables
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
            .unwrap_or(code)
    }
}

pub static LANGUAGE_PACKS: &[LanguagePack] = &[
    // ========================================================================
    // English
    // ========================================================================
    LanguagePack {
        language: "en",
        datasets: &["cphi", "health_cost", "health_funding"],
        templates: &[
            Template {
                kind: FactKind::Value,
                text_key: "value",
                headline: "{location}: {variable} at {value:.1} {unit}",
                body: "In {period}, {variable} in {location} stood at {value:.1} {unit}.",
            },
            Template {
                kind: FactKind::Rank,
                text_key: "rank",
                headline: "{location} ranks {position} of {of} in {variable}",
                body: "{location} ranked {position} out of {of} countries for {variable} in {period}.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-rise",
                headline: "{variable} in {location} up {change_pct:.1} per cent",
                body: "Between {from_period} and {period}, {variable} in {location} rose from {from:.1} to {to:.1} {unit}, a change of {change_pct:.1} per cent.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-fall",
                headline: "{variable} in {location} down {change_pct:.1} per cent",
                body: "Between {from_period} and {period}, {variable} in {location} fell from {from:.1} to {to:.1} {unit}, a change of {change_pct:.1} per cent.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-flat",
                headline: "{variable} in {location} unchanged",
                body: "Between {from_period} and {period}, {variable} in {location} held steady at {to:.1} {unit}.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-above",
                headline: "{location} above average in {variable}",
                body: "In {period}, {variable} in {location} was {delta:.1} {unit} above the group average of {reference:.1}.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-below",
                headline: "{location} below average in {variable}",
                body: "In {period}, {variable} in {location} was {delta:.1} {unit} below the group average of {reference:.1}.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-equal",
                headline: "{location} on par with the average in {variable}",
                body: "In {period}, {variable} in {location} matched the group average of {reference:.1} {unit}.",
            },
        ],
        locations: &[
            ("AT", "Austria"),
            ("BE", "Belgium"),
            ("DE", "Germany"),
            ("DK", "Denmark"),
            ("EE", "Estonia"),
            ("ES", "Spain"),
            ("FI", "Finland"),
            ("FR", "France"),
            ("IT", "Italy"),
            ("NL", "the Netherlands"),
            ("SE", "Sweden"),
        ],
        variables: &[
            ("hicp2015", "the harmonised consumer price index (2015 = 100)"),
            ("rt1", "consumer price inflation over the previous period"),
            ("rt12", "consumer price inflation over twelve months"),
            ("tot_hc", "total healthcare expenditure"),
            ("hc_per_capita", "healthcare expenditure per inhabitant"),
            ("hf_gov", "the government share of health funding"),
            ("hf_priv", "the private share of health funding"),
            ("hf_hh", "the household share of health funding"),
        ],
    },
    // ========================================================================
    // Finnish
    // ========================================================================
    LanguagePack {
        language: "fi",
        datasets: &["cphi", "health_cost", "health_funding"],
        templates: &[
            Template {
                kind: FactKind::Value,
                text_key: "value",
                headline: "{location}: {variable} tasolla {value:.1} {unit}",
                body: "Jaksolla {period} {variable} oli alueella {location} {value:.1} {unit}.",
            },
            Template {
                kind: FactKind::Rank,
                text_key: "rank",
                headline: "{location} sijalla {position}/{of}: {variable}",
                body: "{location} oli jaksolla {period} sijalla {position} kaikkiaan {of} maan joukossa mittarilla {variable}.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-rise",
                headline: "{variable} nousi {change_pct:.1} prosenttia: {location}",
                body: "Jaksosta {from_period} jaksoon {period} {variable} nousi alueella {location} arvosta {from:.1} arvoon {to:.1} {unit} eli {change_pct:.1} prosenttia.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-fall",
                headline: "{variable} laski {change_pct:.1} prosenttia: {location}",
                body: "Jaksosta {from_period} jaksoon {period} {variable} laski alueella {location} arvosta {from:.1} arvoon {to:.1} {unit} eli {change_pct:.1} prosenttia.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-flat",
                headline: "{variable} ennallaan: {location}",
                body: "Jaksosta {from_period} jaksoon {period} {variable} pysyi alueella {location} ennallaan tasolla {to:.1} {unit}.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-above",
                headline: "{location} keskiarvon yläpuolella: {variable}",
                body: "Jaksolla {period} {variable} oli alueella {location} {delta:.1} {unit} vertailuryhmän keskiarvon {reference:.1} yläpuolella.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-below",
                headline: "{location} keskiarvon alapuolella: {variable}",
                body: "Jaksolla {period} {variable} oli alueella {location} {delta:.1} {unit} vertailuryhmän keskiarvon {reference:.1} alapuolella.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-equal",
                headline: "{location} keskiarvon tasolla: {variable}",
                body: "Jaksolla {period} {variable} oli alueella {location} täsmälleen vertailuryhmän keskiarvon {reference:.1} {unit} tasolla.",
            },
        ],
        locations: &[
            ("AT", "Itävalta"),
            ("BE", "Belgia"),
            ("DE", "Saksa"),
            ("DK", "Tanska"),
            ("EE", "Viro"),
            ("ES", "Espanja"),
            ("FI", "Suomi"),
            ("FR", "Ranska"),
            ("IT", "Italia"),
            ("NL", "Alankomaat"),
            ("SE", "Ruotsi"),
        ],
        variables: &[
            ("hicp2015", "yhdenmukaistettu kuluttajahintaindeksi (2015 = 100)"),
            ("rt1", "kuluttajahintojen muutos edellisestä jaksosta"),
            ("rt12", "kuluttajahintojen muutos kahdessatoista kuukaudessa"),
            ("tot_hc", "terveydenhuollon kokonaismenot"),
            ("hc_per_capita", "terveydenhuollon menot asukasta kohden"),
            ("hf_gov", "julkisen rahoituksen osuus terveysmenoista"),
            ("hf_priv", "yksityisen rahoituksen osuus terveysmenoista"),
            ("hf_hh", "kotitalouksien osuus terveysmenoista"),
        ],
    },
    // ========================================================================
    // German (consumer prices only)
    // ========================================================================
    LanguagePack {
        language: "de",
        datasets: &["cphi"],
        templates: &[
            Template {
                kind: FactKind::Value,
                text_key: "value",
                headline: "{location}: {variable} bei {value:.1} {unit}",
                body: "Im Zeitraum {period} lag {variable} in {location} bei {value:.1} {unit}.",
            },
            Template {
                kind: FactKind::Rank,
                text_key: "rank",
                headline: "{location} auf Platz {position} von {of}: {variable}",
                body: "{location} lag im Zeitraum {period} bei {variable} auf Platz {position} von {of} Ländern.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-rise",
                headline: "{variable} in {location} um {change_pct:.1} Prozent gestiegen",
                body: "Zwischen {from_period} und {period} stieg {variable} in {location} von {from:.1} auf {to:.1} {unit}, ein Plus von {change_pct:.1} Prozent.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-fall",
                headline: "{variable} in {location} um {change_pct:.1} Prozent gesunken",
                body: "Zwischen {from_period} und {period} sank {variable} in {location} von {from:.1} auf {to:.1} {unit}, ein Minus von {change_pct:.1} Prozent.",
            },
            Template {
                kind: FactKind::Trend,
                text_key: "trend-flat",
                headline: "{variable} in {location} unverändert",
                body: "Zwischen {from_period} und {period} blieb {variable} in {location} unverändert bei {to:.1} {unit}.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-above",
                headline: "{location} über dem Durchschnitt: {variable}",
                body: "Im Zeitraum {period} lag {variable} in {location} {delta:.1} {unit} über dem Gruppendurchschnitt von {reference:.1}.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-below",
                headline: "{location} unter dem Durchschnitt: {variable}",
                body: "Im Zeitraum {period} lag {variable} in {location} {delta:.1} {unit} unter dem Gruppendurchschnitt von {reference:.1}.",
            },
            Template {
                kind: FactKind::Comparison,
                text_key: "comp-equal",
                headline: "{location} genau im Durchschnitt: {variable}",
                body: "Im Zeitraum {period} entsprach {variable} in {location} genau dem Gruppendurchschnitt von {reference:.1} {unit}.",
            },
        ],
        locations: &[
            ("AT", "Österreich"),
            ("BE", "Belgien"),
            ("DE", "Deutschland"),
            ("DK", "Dänemark"),
            ("EE", "Estland"),
            ("ES", "Spanien"),
            ("FI", "Finnland"),
            ("FR", "Frankreich"),
            ("IT", "Italien"),
            ("NL", "die Niederlande"),
            ("SE", "Schweden"),
        ],
        variables: &[
            ("hicp2015", "der harmonisierte Verbraucherpreisindex (2015 = 100)"),
            ("rt1", "die Teuerung gegenüber der Vorperiode"),
            ("rt12", "die Teuerung über zwölf Monate"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Every (kind, text key) pair the extractor can emit.
    const REQUIRED: [(FactKind, &str); 8] = [
        (FactKind::Value, "value"),
        (FactKind::Rank, "rank"),
        (FactKind::Trend, "trend-rise"),
        (FactKind::Trend, "trend-fall"),
        (FactKind::Trend, "trend-flat"),
        (FactKind::Comparison, "comp-above"),
        (FactKind::Comparison, "comp-below"),
        (FactKind::Comparison, "comp-equal"),
    ];

    #[test]
    fn test_every_pack_covers_every_text_key() {
        for pack in LANGUAGE_PACKS {
            for (kind, key) in REQUIRED {
                assert!(
                    pack.template(kind, key).is_some(),
                    "pack '{}' missing template for {kind}/{key}",
                    pack.language
                );
            }
        }
    }

    #[test]
    fn test_template_lookup_requires_matching_kind() {
        let pack = &LANGUAGE_PACKS[0];
        assert!(pack.template(FactKind::Value, "rank").is_none());
        assert!(pack.template(FactKind::Rank, "rank").is_some());
    }

    #[test]
    fn test_languages_are_unique() {
        let mut codes: Vec<&str> = LANGUAGE_PACKS.iter().map(|p| p.language).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn test_german_pack_is_cphi_only() {
        let de = LANGUAGE_PACKS
            .iter()
            .find(|p| p.language == "de")
            .unwrap();
        assert_eq!(de.datasets, ["cphi"].as_slice());
        assert!(de.supports("cphi"));
        assert!(!de.supports("health_cost"));
    }

    #[test]
    fn test_lexicon_fallback_to_raw_code() {
        let en = &LANGUAGE_PACKS[0];
        assert_eq!(en.location_name("FI"), "Finland");
        assert_eq!(en.location_name("XX"), "XX");
        assert_eq!(en.variable_name("hicp2015"), "the harmonised consumer price index (2015 = 100)");
        assert_eq!(en.variable_name("mystery"), "mystery");
    }
}
