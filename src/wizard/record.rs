//! Brand record and patch types — the aggregate built across wizard steps.

use serde::{Deserialize, Serialize};

/// Social network a brand account can live on.
///
/// Closed set: the form adds at most one account per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    LinkedIn,
    TikTok,
    YouTube,
    Pinterest,
}

impl SocialPlatform {
    /// All platforms, in the order the form offers them.
    pub const ALL: [SocialPlatform; 7] = [
        Self::Facebook,
        Self::Instagram,
        Self::Twitter,
        Self::LinkedIn,
        Self::TikTok,
        Self::YouTube,
        Self::Pinterest,
    ];
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::TikTok => "TikTok",
            Self::YouTube => "YouTube",
            Self::Pinterest => "Pinterest",
        };
        write!(f, "{s}")
    }
}

/// One linked social account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub platform: SocialPlatform,
    pub url: String,
}

/// How often the brand plans to post.
///
/// `Custom` requires a free-text description in `BrandRecord::custom_frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingFrequency {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl Default for PostingFrequency {
    fn default() -> Self {
        Self::Weekly
    }
}

impl std::fmt::Display for PostingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Custom => "Custom",
        };
        write!(f, "{s}")
    }
}

/// Field identity for the brand record.
///
/// Used as the key for validation errors and for error-on-edit clearing.
/// `Display` yields the wire name (camelCase), matching the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Description,
    Industry,
    Website,
    Logo,
    PrimaryColor,
    SecondaryColor,
    ContentTone,
    TargetAudience,
    SocialMediaAccounts,
    SuggestedTopics,
    RecommendedContentTypes,
    PostingFrequency,
    CustomFrequency,
    PostingTimes,
    MarketingGoals,
    Hashtags,
}

impl Field {
    /// The camelCase wire name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Industry => "industry",
            Self::Website => "website",
            Self::Logo => "logo",
            Self::PrimaryColor => "primaryColor",
            Self::SecondaryColor => "secondaryColor",
            Self::ContentTone => "contentTone",
            Self::TargetAudience => "targetAudience",
            Self::SocialMediaAccounts => "socialMediaAccounts",
            Self::SuggestedTopics => "suggestedTopics",
            Self::RecommendedContentTypes => "recommendedContentTypes",
            Self::PostingFrequency => "postingFrequency",
            Self::CustomFrequency => "customFrequency",
            Self::PostingTimes => "postingTimes",
            Self::MarketingGoals => "marketingGoals",
            Self::Hashtags => "hashtags",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The brand being assembled across the wizard steps.
///
/// Serialized to the draft store and the submission API as plain JSON with
/// camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandRecord {
    pub name: String,
    pub description: String,
    pub industry: String,
    /// Company website. Empty string means not provided; when present it
    /// must parse as an http/https URL.
    pub website: String,
    /// Logo as a data URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub content_tone: Vec<String>,
    pub target_audience: Vec<String>,
    pub social_media_accounts: Vec<SocialAccount>,
    pub suggested_topics: Vec<String>,
    pub recommended_content_types: Vec<String>,
    pub posting_frequency: PostingFrequency,
    /// Free-text schedule, required when `posting_frequency` is `Custom`.
    pub custom_frequency: String,
    pub posting_times: Vec<String>,
    pub marketing_goals: Vec<String>,
    pub hashtags: Vec<String>,
}

impl Default for BrandRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            industry: String::new(),
            website: String::new(),
            logo: None,
            primary_color: "#6366F1".to_string(),
            secondary_color: "#EC4899".to_string(),
            content_tone: Vec::new(),
            target_audience: Vec::new(),
            social_media_accounts: Vec::new(),
            suggested_topics: Vec::new(),
            recommended_content_types: Vec::new(),
            posting_frequency: PostingFrequency::default(),
            custom_frequency: String::new(),
            posting_times: Vec::new(),
            marketing_goals: Vec::new(),
            hashtags: Vec::new(),
        }
    }
}

impl BrandRecord {
    /// First platform without an account yet, in form order.
    pub fn next_unused_platform(&self) -> Option<SocialPlatform> {
        SocialPlatform::ALL
            .into_iter()
            .find(|p| !self.has_platform(*p))
    }

    /// Whether an account for `platform` already exists.
    pub fn has_platform(&self, platform: SocialPlatform) -> bool {
        self.social_media_accounts
            .iter()
            .any(|a| a.platform == platform)
    }
}

/// Partial update to a [`BrandRecord`].
///
/// Fields left as `None` are untouched. Built with struct-update syntax:
///
/// ```
/// # use brand_wizard::wizard::RecordPatch;
/// let patch = RecordPatch {
///     name: Some("Acme".into()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    /// `Some(None)` clears the logo.
    pub logo: Option<Option<String>>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub content_tone: Option<Vec<String>>,
    pub target_audience: Option<Vec<String>>,
    pub social_media_accounts: Option<Vec<SocialAccount>>,
    pub suggested_topics: Option<Vec<String>>,
    pub recommended_content_types: Option<Vec<String>>,
    pub posting_frequency: Option<PostingFrequency>,
    pub custom_frequency: Option<String>,
    pub posting_times: Option<Vec<String>>,
    pub marketing_goals: Option<Vec<String>>,
    pub hashtags: Option<Vec<String>>,
}

impl RecordPatch {
    /// Fields this patch touches, in declaration order.
    pub fn touched(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(Field::Name);
        }
        if self.description.is_some() {
            fields.push(Field::Description);
        }
        if self.industry.is_some() {
            fields.push(Field::Industry);
        }
        if self.website.is_some() {
            fields.push(Field::Website);
        }
        if self.logo.is_some() {
            fields.push(Field::Logo);
        }
        if self.primary_color.is_some() {
            fields.push(Field::PrimaryColor);
        }
        if self.secondary_color.is_some() {
            fields.push(Field::SecondaryColor);
        }
        if self.content_tone.is_some() {
            fields.push(Field::ContentTone);
        }
        if self.target_audience.is_some() {
            fields.push(Field::TargetAudience);
        }
        if self.social_media_accounts.is_some() {
            fields.push(Field::SocialMediaAccounts);
        }
        if self.suggested_topics.is_some() {
            fields.push(Field::SuggestedTopics);
        }
        if self.recommended_content_types.is_some() {
            fields.push(Field::RecommendedContentTypes);
        }
        if self.posting_frequency.is_some() {
            fields.push(Field::PostingFrequency);
        }
        if self.custom_frequency.is_some() {
            fields.push(Field::CustomFrequency);
        }
        if self.posting_times.is_some() {
            fields.push(Field::PostingTimes);
        }
        if self.marketing_goals.is_some() {
            fields.push(Field::MarketingGoals);
        }
        if self.hashtags.is_some() {
            fields.push(Field::Hashtags);
        }
        fields
    }

    /// Whether the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        self.touched().is_empty()
    }

    /// Merge this patch into `record`, consuming the patch.
    ///
    /// Fields not named by the patch keep their prior value.
    pub fn apply_to(self, record: &mut BrandRecord) {
        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.description {
            record.description = v;
        }
        if let Some(v) = self.industry {
            record.industry = v;
        }
        if let Some(v) = self.website {
            record.website = v;
        }
        if let Some(v) = self.logo {
            record.logo = v;
        }
        if let Some(v) = self.primary_color {
            record.primary_color = v;
        }
        if let Some(v) = self.secondary_color {
            record.secondary_color = v;
        }
        if let Some(v) = self.content_tone {
            record.content_tone = v;
        }
        if let Some(v) = self.target_audience {
            record.target_audience = v;
        }
        if let Some(v) = self.social_media_accounts {
            record.social_media_accounts = v;
        }
        if let Some(v) = self.suggested_topics {
            record.suggested_topics = v;
        }
        if let Some(v) = self.recommended_content_types {
            record.recommended_content_types = v;
        }
        if let Some(v) = self.posting_frequency {
            record.posting_frequency = v;
        }
        if let Some(v) = self.custom_frequency {
            record.custom_frequency = v;
        }
        if let Some(v) = self.posting_times {
            record.posting_times = v;
        }
        if let Some(v) = self.marketing_goals {
            record.marketing_goals = v;
        }
        if let Some(v) = self.hashtags {
            record.hashtags = v;
        }
    }
}

/// Keys used in the durable draft store.
pub mod storage_keys {
    /// Key for the JSON-serialized draft record.
    pub const DRAFT: &str = "lastBrandFormData";
    /// Key for the failed-submission flag.
    pub const FAILED_FLAG: &str = "brandFormError";
    /// Value stored under [`FAILED_FLAG`] while a failed draft exists.
    pub const FAILED_VALUE: &str = "true";
}
