//! Website analysis collaborator — suggests brand content settings.
//!
//! The wizard only sees the `SiteAnalyzer` trait. `SimulatedAnalyzer` stands
//! in for a real crawler: it keys canned suggestion pools off the stated
//! industry and samples a few entries per call, so repeated runs feel alive
//! without any network traffic.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::AnalyzeError;

/// Suggestions produced by analyzing a brand's website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalysis {
    pub content_tone: Vec<String>,
    pub target_audience: Vec<String>,
    pub suggested_topics: Vec<String>,
    pub hashtags: Vec<String>,
}

/// Produces content suggestions from a website address and industry.
#[async_trait]
pub trait SiteAnalyzer: Send + Sync {
    async fn analyze(&self, website: &str, industry: &str) -> Result<SiteAnalysis, AnalyzeError>;
}

/// Canned suggestion pools for one family of industries.
struct IndustryProfile {
    /// Lowercase substrings matched against the stated industry.
    keywords: &'static [&'static str],
    tones: &'static [&'static str],
    audiences: &'static [&'static str],
    topics: &'static [&'static str],
    hashtags: &'static [&'static str],
}

static PROFILES: &[IndustryProfile] = &[
    IndustryProfile {
        keywords: &["food", "restaurant", "coffee", "beverage", "bakery"],
        tones: &["Warm", "Inviting", "Playful", "Artisanal"],
        audiences: &["Local foodies", "Busy professionals", "Weekend brunchers", "Families"],
        topics: &[
            "Behind the scenes in the kitchen",
            "Seasonal menu highlights",
            "Meet the makers",
            "Sourcing and ingredients",
            "Customer favorites",
        ],
        hashtags: &["#foodie", "#eatlocal", "#freshdaily", "#supportlocal"],
    },
    IndustryProfile {
        keywords: &["tech", "software", "saas", "it", "developer"],
        tones: &["Confident", "Clear", "Forward-looking", "Approachable"],
        audiences: &["Startup founders", "Engineering teams", "Product managers", "IT leads"],
        topics: &[
            "Product deep dives",
            "Customer success stories",
            "Industry trend commentary",
            "Tips and best practices",
            "Release announcements",
        ],
        hashtags: &["#saas", "#buildinpublic", "#devtools", "#productivity"],
    },
    IndustryProfile {
        keywords: &["fashion", "apparel", "clothing", "retail", "boutique"],
        tones: &["Bold", "Aspirational", "Trend-aware", "Expressive"],
        audiences: &["Style-conscious shoppers", "Young professionals", "Gift buyers", "Collectors"],
        topics: &[
            "New arrivals",
            "Styling guides",
            "Behind the brand",
            "Sustainability stories",
            "Customer looks",
        ],
        hashtags: &["#ootd", "#newcollection", "#styleinspo", "#shopsmall"],
    },
    IndustryProfile {
        keywords: &["fitness", "health", "wellness", "gym", "yoga"],
        tones: &["Motivating", "Supportive", "Energetic", "Grounded"],
        audiences: &["Beginners", "Regulars chasing goals", "Remote workers", "Athletes"],
        topics: &[
            "Quick workout ideas",
            "Member transformations",
            "Recovery and rest",
            "Nutrition basics",
            "Class previews",
        ],
        hashtags: &["#fitfam", "#wellnessjourney", "#trainhard", "#selfcare"],
    },
];

/// Fallback pools when no industry keyword matches.
static GENERAL: IndustryProfile = IndustryProfile {
    keywords: &[],
    tones: &["Professional", "Friendly", "Trustworthy", "Modern"],
    audiences: &["New customers", "Returning customers", "Industry peers", "Local community"],
    topics: &[
        "What we do and why",
        "Customer spotlights",
        "Team introductions",
        "How-to guides",
        "Company milestones",
    ],
    hashtags: &["#smallbusiness", "#growth", "#community", "#behindthescenes"],
};

/// Offline `SiteAnalyzer` backed by the canned profiles above.
#[derive(Debug, Default)]
pub struct SimulatedAnalyzer;

impl SimulatedAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn profile_for(industry: &str) -> &'static IndustryProfile {
        let needle = industry.to_lowercase();
        PROFILES
            .iter()
            .find(|p| p.keywords.iter().any(|k| needle.contains(k)))
            .unwrap_or(&GENERAL)
    }
}

#[async_trait]
impl SiteAnalyzer for SimulatedAnalyzer {
    async fn analyze(&self, website: &str, industry: &str) -> Result<SiteAnalysis, AnalyzeError> {
        let url = Url::parse(website).map_err(|e| AnalyzeError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AnalyzeError::InvalidUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        let profile = Self::profile_for(industry);
        let mut rng = rand::thread_rng();

        let mut hashtags = pick(&mut rng, profile.hashtags, 3);
        if let Some(tag) = domain_hashtag(&url) {
            hashtags.insert(0, tag);
        }

        let analysis = SiteAnalysis {
            content_tone: pick(&mut rng, profile.tones, 3),
            target_audience: pick(&mut rng, profile.audiences, 3),
            suggested_topics: pick(&mut rng, profile.topics, 4),
            hashtags,
        };
        debug!(host = url.host_str().unwrap_or(""), industry, "simulated analysis complete");
        Ok(analysis)
    }
}

/// Sample up to `n` distinct entries from `pool`.
fn pick<R: Rng>(rng: &mut R, pool: &[&str], n: usize) -> Vec<String> {
    pool.choose_multiple(rng, n.min(pool.len()))
        .map(|s| s.to_string())
        .collect()
}

/// Hashtag derived from the site's domain, e.g. `https://www.acme.coffee`
/// becomes `#acme`.
fn domain_hashtag(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let name: String = host
        .split('.')
        .next()?
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(format!("#{}", name.to_lowercase()))
    }
}
