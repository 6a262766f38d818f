//! Validation rules for the brand record.
//!
//! A fixed rule table evaluated wholesale on every call: rules are pure
//! predicates over the record, keyed by the step scope they gate. Callers
//! decide whether to block navigation based on whether the returned mapping
//! is empty.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::record::{BrandRecord, Field, PostingFrequency};

/// Named subset of rules applicable to a step or to final submission.
///
/// `FinalSubmit` is a superset: it runs every step rule plus the
/// submit-only rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScope {
    CompanyInfo,
    ContentStrategy,
    FinalSubmit,
}

impl ValidationScope {
    /// Whether rules registered under `rule_scope` run when validating
    /// at this scope.
    pub fn covers(&self, rule_scope: ValidationScope) -> bool {
        *self == rule_scope || matches!(self, Self::FinalSubmit)
    }
}

impl std::fmt::Display for ValidationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CompanyInfo => "company_info",
            Self::ContentStrategy => "content_strategy",
            Self::FinalSubmit => "final_submit",
        };
        write!(f, "{s}")
    }
}

/// Field-keyed validation messages.
///
/// Ordered by field declaration order so summaries render stably.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    by_field: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// Record a message for a field, replacing any prior one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.by_field.insert(field, message.into());
    }

    /// Drop the message for a field, if any.
    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.by_field.remove(&field)
    }

    /// The message recorded for a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.by_field.get(&field).map(String::as_str)
    }

    /// Whether a field has a recorded message.
    pub fn contains(&self, field: Field) -> bool {
        self.by_field.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.by_field.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn clear(&mut self) {
        self.by_field.clear();
    }
}

/// A single validation rule: a pure predicate that must hold for one field.
struct Rule {
    field: Field,
    scope: ValidationScope,
    message: &'static str,
    /// Returns `true` when the record satisfies the rule.
    check: Box<dyn Fn(&BrandRecord) -> bool + Send + Sync>,
}

/// Compiled rule table, built once and evaluated wholesale per call.
///
/// Validation never mutates the record and holds no per-record state, so a
/// rule implicated by a *different* field's change (e.g. the custom-schedule
/// text after the frequency switches to `Custom`) is always re-evaluated.
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    pub fn new() -> Self {
        use ValidationScope::*;

        let hex_color = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
        let primary_hex = hex_color.clone();
        let secondary_hex = hex_color;

        let rules = vec![
            Rule {
                field: Field::Name,
                scope: CompanyInfo,
                message: "Name is required",
                check: Box::new(|r| !r.name.trim().is_empty()),
            },
            Rule {
                field: Field::Industry,
                scope: CompanyInfo,
                message: "Industry is required",
                check: Box::new(|r| !r.industry.trim().is_empty()),
            },
            Rule {
                field: Field::Description,
                scope: CompanyInfo,
                message: "Description is required",
                check: Box::new(|r| !r.description.trim().is_empty()),
            },
            Rule {
                field: Field::Website,
                scope: CompanyInfo,
                message: "Enter a valid http:// or https:// URL",
                check: Box::new(|r| r.website.is_empty() || is_http_url(&r.website)),
            },
            Rule {
                field: Field::PrimaryColor,
                scope: CompanyInfo,
                message: "Primary color must be a hex value like #6366F1",
                check: Box::new(move |r| primary_hex.is_match(&r.primary_color)),
            },
            Rule {
                field: Field::SecondaryColor,
                scope: CompanyInfo,
                message: "Secondary color must be a hex value like #EC4899",
                check: Box::new(move |r| secondary_hex.is_match(&r.secondary_color)),
            },
            Rule {
                field: Field::RecommendedContentTypes,
                scope: ContentStrategy,
                message: "Select at least one content type",
                check: Box::new(|r| !r.recommended_content_types.is_empty()),
            },
            Rule {
                field: Field::PostingTimes,
                scope: ContentStrategy,
                message: "Select at least one posting time",
                check: Box::new(|r| !r.posting_times.is_empty()),
            },
            Rule {
                field: Field::MarketingGoals,
                scope: ContentStrategy,
                message: "Select at least one marketing goal",
                check: Box::new(|r| !r.marketing_goals.is_empty()),
            },
            // Submit-only: intermediate steps accept a Custom frequency
            // without the free-text schedule.
            Rule {
                field: Field::CustomFrequency,
                scope: FinalSubmit,
                message: "Describe your custom posting schedule",
                check: Box::new(|r| {
                    r.posting_frequency != PostingFrequency::Custom
                        || !r.custom_frequency.trim().is_empty()
                }),
            },
        ];

        Self { rules }
    }

    /// Evaluate every rule covered by `scope` against `record`.
    ///
    /// Returns an empty mapping when all covered rules pass.
    pub fn validate(&self, record: &BrandRecord, scope: ValidationScope) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for rule in &self.rules {
            if !scope.covers(rule.scope) {
                continue;
            }
            if !(rule.check)(record) {
                debug!(field = %rule.field, scope = %scope, "validation rule failed");
                errors.insert(rule.field, rule.message);
            }
        }
        errors
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a string parses as an absolute http/https URL.
fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A record that passes every rule at every scope.
    fn valid_record() -> BrandRecord {
        BrandRecord {
            name: "Acme Coffee".into(),
            description: "Small-batch roastery".into(),
            industry: "Food & Beverage".into(),
            website: "https://acme.coffee".into(),
            recommended_content_types: vec!["Blog".into()],
            posting_times: vec!["Morning".into()],
            marketing_goals: vec!["Brand Awareness".into()],
            ..Default::default()
        }
    }

    #[test]
    fn valid_record_passes_all_scopes() {
        let validator = Validator::new();
        let record = valid_record();
        for scope in [
            ValidationScope::CompanyInfo,
            ValidationScope::ContentStrategy,
            ValidationScope::FinalSubmit,
        ] {
            let errors = validator.validate(&record, scope);
            assert!(errors.is_empty(), "unexpected errors at {scope}: {errors:?}");
        }
    }

    #[test]
    fn empty_name_flagged_but_filled_industry_is_not() {
        let validator = Validator::new();
        let record = BrandRecord {
            industry: "Tech".into(),
            ..Default::default()
        };
        let errors = validator.validate(&record, ValidationScope::FinalSubmit);
        assert!(errors.get(Field::Name).unwrap().contains("required"));
        assert!(!errors.contains(Field::Industry));
    }

    #[test]
    fn custom_frequency_requires_text_at_final_submit_only() {
        let validator = Validator::new();
        let mut record = valid_record();
        record.posting_frequency = PostingFrequency::Custom;
        record.custom_frequency = String::new();

        // The content step lets a bare Custom selection through.
        let step_errors = validator.validate(&record, ValidationScope::ContentStrategy);
        assert!(!step_errors.contains(Field::CustomFrequency));

        let submit_errors = validator.validate(&record, ValidationScope::FinalSubmit);
        assert!(submit_errors.contains(Field::CustomFrequency));

        // Wholesale recompute picks up the correction on the next call.
        record.custom_frequency = "Every Tuesday".into();
        let submit_errors = validator.validate(&record, ValidationScope::FinalSubmit);
        assert!(!submit_errors.contains(Field::CustomFrequency));
    }

    #[test]
    fn website_must_be_http_or_https() {
        let validator = Validator::new();
        let mut record = valid_record();

        record.website = "not-a-url".into();
        let errors = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(errors.contains(Field::Website));

        record.website = "ftp://example.com".into();
        let errors = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(errors.contains(Field::Website));

        record.website = "https://example.com".into();
        let errors = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(!errors.contains(Field::Website));

        // Website is optional; empty is fine.
        record.website = String::new();
        let errors = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(!errors.contains(Field::Website));
    }

    #[test]
    fn colors_must_be_six_digit_hex() {
        let validator = Validator::new();
        let mut record = valid_record();

        // Defaults are well-formed.
        let errors = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(!errors.contains(Field::PrimaryColor));
        assert!(!errors.contains(Field::SecondaryColor));

        record.primary_color = "blue".into();
        record.secondary_color = "#FFF".into();
        let errors = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(errors.contains(Field::PrimaryColor));
        assert!(errors.contains(Field::SecondaryColor));
    }

    #[test]
    fn scopes_partition_the_rules() {
        let validator = Validator::new();
        let record = BrandRecord::default();

        // Company scope ignores content-strategy fields.
        let company = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(company.contains(Field::Name));
        assert!(!company.contains(Field::MarketingGoals));

        // Content scope ignores company fields.
        let content = validator.validate(&record, ValidationScope::ContentStrategy);
        assert!(!content.contains(Field::Name));
        assert!(content.contains(Field::RecommendedContentTypes));
        assert!(content.contains(Field::PostingTimes));
        assert!(content.contains(Field::MarketingGoals));

        // Final submit covers both.
        let submit = validator.validate(&record, ValidationScope::FinalSubmit);
        assert!(submit.contains(Field::Name));
        assert!(submit.contains(Field::MarketingGoals));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let validator = Validator::new();
        let mut record = valid_record();
        record.name = "   ".into();
        let errors = validator.validate(&record, ValidationScope::CompanyInfo);
        assert!(errors.contains(Field::Name));
    }

    #[test]
    fn validation_is_stateless() {
        let validator = Validator::new();
        let record = BrandRecord::default();
        let first = validator.validate(&record, ValidationScope::FinalSubmit);
        let second = validator.validate(&record, ValidationScope::FinalSubmit);
        assert_eq!(first, second);
    }

    #[test]
    fn scope_covers() {
        use ValidationScope::*;
        assert!(CompanyInfo.covers(CompanyInfo));
        assert!(!CompanyInfo.covers(ContentStrategy));
        assert!(!ContentStrategy.covers(FinalSubmit));
        assert!(FinalSubmit.covers(CompanyInfo));
        assert!(FinalSubmit.covers(ContentStrategy));
        assert!(FinalSubmit.covers(FinalSubmit));
    }

    #[test]
    fn errors_serialize_with_wire_field_names() {
        let mut errors = ValidationErrors::default();
        errors.insert(Field::Name, "Name is required");
        errors.insert(Field::CustomFrequency, "Describe your custom posting schedule");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"], "Name is required");
        assert_eq!(json["customFrequency"], "Describe your custom posting schedule");
    }

    #[test]
    fn errors_insert_remove() {
        let mut errors = ValidationErrors::default();
        assert!(errors.is_empty());

        errors.insert(Field::Website, "bad url");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Website), Some("bad url"));

        assert_eq!(errors.remove(Field::Website), Some("bad url".to_string()));
        assert!(errors.is_empty());
        assert!(errors.remove(Field::Website).is_none());
    }
}
