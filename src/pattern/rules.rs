//! Pattern generalization rules.
//!
//! Masked patterns still differ in incidental structure: the same card
//! notification renders its amount as `{NUM} {NUM},{NUM} KZT` or
//! `{NUM}.{NUM} KZT` depending on locale, parcel notices arrive with and
//! without their truncated tails, and so on. Generalization folds those
//! variants together.
//!
//! The engine is an ordered rule list with two behaviors:
//!
//! - [`Rule::Exact`] — matches the *entire* pattern; on match its rewrite
//!   replaces the whole pattern and evaluation stops (first match wins).
//!   These encode the known message families whose shape is too irregular
//!   for incremental rewriting.
//! - [`Rule::Rewrite`] / [`Rule::RewriteWith`] — substitution passes applied
//!   unconditionally to the running pattern; evaluation continues to the
//!   next rule.
//!
//! Priority is the list position. All exact rules come before the rewrite
//! passes, and the passes run in a fixed order (datetime folding before
//! money folding before `{NUM}` run collapsing) because later passes consume
//! the output of earlier ones.

use regex::{Captures, Regex};

/// One generalization rule.
pub enum Rule {
    /// Full-pattern match; the rewrite replaces everything and evaluation
    /// stops.
    Exact {
        matcher: Regex,
        rewrite: &'static str,
    },
    /// Substitution applied wherever the matcher occurs.
    Rewrite {
        matcher: Regex,
        rewrite: &'static str,
    },
    /// Substitution with a computed replacement.
    RewriteWith {
        matcher: Regex,
        rewrite: fn(&Captures<'_>) -> String,
    },
}

impl Rule {
    fn exact(pattern: &str, rewrite: &'static str) -> Self {
        Rule::Exact {
            matcher: Regex::new(&format!("^(?:{pattern})$")).unwrap(),
            rewrite,
        }
    }

    fn rewrite(pattern: &str, rewrite: &'static str) -> Self {
        Rule::Rewrite {
            matcher: Regex::new(pattern).unwrap(),
            rewrite,
        }
    }

    fn rewrite_with(pattern: &str, rewrite: fn(&Captures<'_>) -> String) -> Self {
        Rule::RewriteWith {
            matcher: Regex::new(pattern).unwrap(),
            rewrite,
        }
    }
}

/// Sign-preserving money fold: `{NUM} {NUM},{NUM} KZT` → `{MONEY} {CURR}`.
fn fold_money(caps: &Captures<'_>) -> String {
    let sign = if caps[0].starts_with('-') { "-" } else { "" };
    format!("{sign}{{MONEY}} {{CURR}}")
}

/// The generalization rule table.
///
/// # Example
///
/// ```rust
/// use smstitch::pattern::RuleSet;
///
/// let rules = RuleSet::new();
/// assert_eq!(
///     rules.generalize("k: {NUM} {NUM}.{NUM} KZT"),
///     "k: {MONEY} KZT"
/// );
/// ```
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Builds the standard rule table.
    pub fn new() -> Self {
        let rules = vec![
            // --- Exact message families, first match wins -----------------
            // card top-up notification, comma decimals
            Rule::exact(
                r"kh: \{NUM\} \{NUM\},\{NUM\} KZT\.Karta:\{NUM\}\*\*\{NUM\}\.Qaldyq/ostatok:\{NUM\},\{NUM\} KZT",
                "kh: {MONEY} KZT. Karta: {NUM}**{NUM}. Qaldyq/ostatok: {MONEY} KZT",
            ),
            // short card notification, dot decimals
            Rule::exact(r"k: \{NUM\} \{NUM\}\.\{NUM\} KZT", "k: {MONEY} KZT"),
            // transfer confirmation code
            Rule::exact(
                r"KODTY ESHKIMGE AITPANYZ/NIKOMU NE GOVORITE KOD\.Audarym/Perevod: \(\{NUM\} \{NUM\}\.\{NUM\} KZT\)\.Kod:\{NUM\}",
                "KODTY ESHKIMGE AITPANYZ/NIKOMU NE GOVORITE KOD.Audarym/Perevod: ({MONEY}).Kod:{NUM}",
            ),
            // full bilingual parcel notice
            Rule::exact(
                r"Sizge \{CODE\} salemdemesi keldi\.Salemdeme kody \{CODE\} Saqtau merzimi \{NUM\} kun\..*?Vam postupila posylka \{CODE\}",
                "Sizge {CODE} salemdemesi keldi. Salemdeme kody {CODE} Saqtau merzimi {NUM} kun. Vam postupila posylka {CODE}",
            ),
            // parcel code rendered as a dashed compound
            Rule::exact(
                r"\{CODE\}\.Kod posylki [A-Za-z0-9]+-\{NUM\}-\{NUM\}\. Srok hranenia \{NUM\} dney\. Uznat dopolnitelnuyu informaciu mozhete na post\.kz\.",
                "{CODE}.Kod posylki {CODE}. Srok hranenia {NUM} dney. Uznat dopolnitelnuyu informaciu mozhete na post.kz.",
            ),
            // parcel notice with a truncated or missing Russian tail
            Rule::exact(
                r"Sizge \{CODE\} salemdemesi keldi\.Salemdeme kody \{CODE\} Saqtau merzimi \{NUM\} kun\. Qosymsha aqparatty post\.kz - ten bile alasyz\.Vam postupila posylka(?: [A-Za-z0-9]*)?",
                "Sizge {CODE} salemdemesi keldi. Salemdeme kody {CODE} Saqtau merzimi {NUM} kun. Qosymsha aqparatty post.kz - ten bile alasyz. Vam postupila posylka {CODE}",
            ),
            // parcel notice pointing at a tracking link
            Rule::exact(
                r"Sizge salemdeme keldi\. Saqtau merzimi \{NUM\} kun\. / Vam prishla posylka\. Srok hranenia \{NUM\} dney\. Tolygyraq/Detali:? ?\{TRACK_URL\}",
                "Sizge salemdeme keldi. Saqtau merzimi {NUM} kun. / Vam prishla posylka. Srok hranenia {NUM} dney. Tolygyraq/Detali: {TRACK_URL}",
            ),
            // cash withdrawal / cancelled withdrawal, multi-currency
            Rule::exact(
                r"\{TIME\} qolma-qol aqshany sheship aly(?:ndy| oryndalmady)/ otmena snyatiya nalichnykh: \{(?:NUM|MONEY)\}(?: \{NUM\})*(?:\.\{NUM\})? (?:KZT|UZS|USD)\. Karta:\{NUM\}\*\*\{NUM\}\. Qaldyq/ostatok: \{(?:NUM|MONEY)\}(?: \{NUM\})*(?:\.\{NUM\})? (?:KZT|UZS|USD)",
                "{TIME} qolma-qol aqsha sheship alyndy/otmena snyatiya nalichnykh: {MONEY} {CURR}. Karta:{NUM}**{NUM}. Qaldyq/ostatok: {MONEY} {CURR}",
            ),
            // account credit notice
            Rule::exact(
                r"\*\{NUM\} shott?a \{NUM\} KZT soma alyndy\.(.*?)Ostatok \{NUM\} KZT",
                "*{NUM} shotqa {NUM} KZT soma alyndy. Qaldygy {NUM} KZT/ Postuplenie na schet *{NUM} Summa {NUM} KZT. Ostatok {NUM} KZT",
            ),
            // phone-number transfer, KZT only
            Rule::exact(
                r"\{TIME\} telefon nomiri arqyly audarym kelip tusti/ postupil perevod po nomeru telefona: \{(?:NUM|MONEY)\}(?:\.\{NUM\})? KZT\. K\*\*\{NUM\}\. Qaldyq/ostatok: \{(?:NUM|MONEY)\}(?:\.\{NUM\})? KZT",
                "{TIME} telefon nomiri arqyly audarym kelip tusti/ postupil perevod po nomeru telefona: {MONEY} KZT. K**{NUM}. Qaldyq/ostatok: {MONEY} KZT",
            ),
            // parcel code collapsed to a bare number
            Rule::exact(
                r"\{CODE\}\.Kod posylki [-A-Za-z0-9]*\{NUM\}\. Srok hranenia \{NUM\} dney\. Uznat dopolnitelnuyu informaciu mozhete na post\.kz\.",
                "{CODE}.Kod posylki {CODE}. Srok hranenia {NUM} dney. Uznat dopolnitelnuyu informaciu mozhete na post.kz.",
            ),
            // phone-number transfer, extended currency list
            Rule::exact(
                r"\{TIME\} telefon nomiri arqyly audarym kelip tusti/ postupil perevod po nomeru telefona: \{(?:NUM|MONEY)\}(?:\.\{NUM\})? (?:KZT|USD|EUR|UZS)\. K\*\*\{NUM\}\. Qaldyq/ostatok: \{(?:NUM|MONEY)\}(?:\.\{NUM\})? (?:KZT|USD|EUR|UZS)",
                "{TIME} telefon nomiri arqyly audarym kelip tusti/ postupil perevod po nomeru telefona: {MONEY} {CURR}. K**{NUM}. Qaldyq/ostatok: {MONEY} {CURR}",
            ),
            // short-prefix parcel code left unmasked by the code pass
            Rule::exact(
                r"\d+[A-Z]{2}\.Kod posylki -\{NUM\}\. Srok hranenia \{NUM\} dney\. Uznat dopolnitelnuyu informaciu mozhete na post\.kz\.",
                "{CODE}.Kod posylki -{NUM}. Srok hranenia {NUM} dney. Uznat dopolnitelnuyu informaciu mozhete na post.kz.",
            ),
            // --- Unconditional rewrite passes -----------------------------
            // anything before ".Kod posylki" is a (possibly garbled) code
            Rule::rewrite(r"^.*?\.Kod posylki", "{CODE}.Kod posylki"),
            // date + time markers fold to one datetime marker
            Rule::rewrite(r"\{NUM\}-\{NUM\}-\{NUM\} \{TIME\}", "{DATETIME}"),
            // grouped amounts with a currency code fold to money
            Rule::rewrite_with(
                r"-?\{NUM\}(?:[ ,]\{NUM\})*(?:[.,]\{NUM\})? [A-Z]{3}\b",
                fold_money,
            ),
            // tracking paths (current and legacy numbered form) and bare
            // URLs are all tracking links here
            Rule::rewrite(r"/t/\{(?:\d+_)?TRACK\}", "{TRACK_URL}"),
            Rule::rewrite(r"\{URL\}", "{TRACK_URL}"),
            // legacy numbered code markers from older report files
            Rule::rewrite(r"\{\d+_CODE\}", "{CODE}"),
            // runs of {NUM} carry no extra structure
            Rule::rewrite(r"(?:\{NUM\}\s*){2,}", "{NUM} "),
            // a stray {NUM} directly before money is part of the amount
            Rule::rewrite(r"\{NUM\}[\u{A0}\s]+\{MONEY\}", "{MONEY}"),
            // spacing normalization
            Rule::rewrite(r"\s*([:/])\s*", "$1"),
            Rule::rewrite(r"\s{2,}", " "),
        ];
        Self { rules }
    }

    /// Applies the rule table to a masked pattern.
    pub fn generalize(&self, pattern: &str) -> String {
        let mut current = pattern.to_string();
        for rule in &self.rules {
            match rule {
                Rule::Exact { matcher, rewrite } => {
                    if matcher.is_match(&current) {
                        return (*rewrite).to_string();
                    }
                }
                Rule::Rewrite { matcher, rewrite } => {
                    current = matcher.replace_all(&current, *rewrite).into_owned();
                }
                Rule::RewriteWith { matcher, rewrite } => {
                    current = matcher
                        .replace_all(&current, |caps: &Captures<'_>| rewrite(caps))
                        .into_owned();
                }
            }
        }
        current.trim().to_string()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
