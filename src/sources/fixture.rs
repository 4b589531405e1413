use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::RadarError;
use crate::sources::{SignalBundle, SignalSource};
use crate::{Ad, Cluster, ClusterExample, ClusterType, Gap, GapType, MediaType, Mention};

const DEFAULT_AD_COUNT: usize = 24;
const DEFAULT_MENTION_COUNT: usize = 40;

const ADVERTISERS: &[&str] = &[
    "LedgerLoop", "InvoiceNinja", "PaperTrail", "Billwise", "QuickTally", "SnapBooks",
];
const MEDIA: &[&str] = &["text", "image", "video", "carousel"];
const HOOKS: &[&str] = &[
    "Automate every invoice in minutes",
    "Stop chasing late payments",
    "Bookkeeping built for freelancers",
    "Get paid twice as fast",
    "Your accountant will thank you",
];
const SUBREDDITS: &[&str] = &["freelance", "smallbusiness", "Entrepreneur", "Bookkeeping"];
const TITLES: &[&str] = &[
    "How do I automate my invoicing?",
    "Frustrated with bank sync breaking every week",
    "Wish there was a cheaper alternative to QuickBooks",
    "I built a tiny invoice tracker",
    "Thoughts on switching accounting tools",
    "Tired of manual expense categorization",
];
const OBJECTIONS: &[&str] = &["bank sync breaks", "pricing too expensive", "confusing setup"];
const FEATURES: &[&str] = &["recurring invoices", "multi currency support", "receipt scanning"];
const ANGLES: &[&str] = &["save time", "get paid faster"];

/// Deterministic synthetic signals for demos and tests. The same seed and
/// `as_of` always produce the same bundle.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    seed: u64,
    as_of: DateTime<Utc>,
    ad_count: usize,
    mention_count: usize,
}

impl FixtureSource {
    pub fn new(seed: u64, as_of: DateTime<Utc>) -> Self {
        Self {
            seed,
            as_of,
            ad_count: DEFAULT_AD_COUNT,
            mention_count: DEFAULT_MENTION_COUNT,
        }
    }

    pub fn with_counts(mut self, ad_count: usize, mention_count: usize) -> Self {
        self.ad_count = ad_count;
        self.mention_count = mention_count;
        self
    }

    pub fn generate(&self) -> SignalBundle {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let ads: Vec<Ad> = (0..self.ad_count)
            .map(|idx| self.sample_ad(&mut rng, idx))
            .collect();
        let mentions: Vec<Mention> = (0..self.mention_count)
            .map(|idx| self.sample_mention(&mut rng, idx))
            .collect();

        let mut clusters = Vec::new();
        for (labels, cluster_type) in [
            (ANGLES, ClusterType::Angle),
            (OBJECTIONS, ClusterType::Objection),
            (FEATURES, ClusterType::Feature),
        ] {
            for label in labels {
                clusters.push(sample_cluster(&mut rng, cluster_type, label, &mentions));
            }
        }

        let gaps = self.sample_gaps(&mut rng, &ads, &mentions);

        SignalBundle {
            ads,
            mentions,
            clusters,
            gaps,
        }
    }

    fn sample_ad(&self, rng: &mut StdRng, idx: usize) -> Ad {
        let advertiser = ADVERTISERS[rng.gen_range(0..ADVERTISERS.len())];
        let hook = HOOKS[rng.gen_range(0..HOOKS.len())];
        let media = MEDIA[rng.gen_range(0..MEDIA.len())];
        // Roughly one ad in eight was collected without a first-seen date.
        let first_seen = if rng.gen::<f64>() < 0.125 {
            None
        } else {
            Some(self.as_of - Duration::days(rng.gen_range(0..120)))
        };

        Ad {
            id: Some(format!("fixture_ad_{}", idx)),
            source: (if rng.gen::<bool>() { "meta" } else { "google" }).to_string(),
            advertiser_name: advertiser.to_string(),
            creative_text: format!("{} with {}.", hook, advertiser),
            first_seen,
            is_active: rng.gen::<f64>() < 0.8,
            media_type: MediaType::from_str(media).unwrap_or_default(),
        }
    }

    fn sample_mention(&self, rng: &mut StdRng, idx: usize) -> Mention {
        let title = TITLES[rng.gen_range(0..TITLES.len())];
        let objection = OBJECTIONS[rng.gen_range(0..OBJECTIONS.len())];
        Mention {
            id: Some(format!("fixture_mention_{}", idx)),
            subreddit: SUBREDDITS[rng.gen_range(0..SUBREDDITS.len())].to_string(),
            title: title.to_string(),
            body: format!("Honestly the {} problem is the worst part.", objection),
            score: rng.gen_range(0..800),
            num_comments: rng.gen_range(0..120),
            posted_at: Some(self.as_of - Duration::hours(rng.gen_range(1..24 * 60))),
        }
    }

    fn sample_gaps(&self, rng: &mut StdRng, ads: &[Ad], mentions: &[Mention]) -> Vec<Gap> {
        let gap_types = [GapType::Product, GapType::Pricing, GapType::Trust];
        gap_types
            .iter()
            .enumerate()
            .map(|(idx, gap_type)| {
                let objection = OBJECTIONS[idx % OBJECTIONS.len()];
                let evidence_ads = pick_ids(rng, ads.iter().map(Ad::effective_id).collect(), 3);
                let evidence_reddit =
                    pick_ids(rng, mentions.iter().map(Mention::effective_id).collect(), 4);
                Gap {
                    id: format!("fixture_gap_{}", idx),
                    gap_type: *gap_type,
                    title: format!("Unaddressed {}", objection),
                    problem: format!("Users repeatedly report {}", objection),
                    evidence_ads,
                    evidence_reddit,
                    recommendation: "Lead creative with the fix for this complaint".to_string(),
                    opportunity_score: 0.0,
                    confidence: 0.0,
                }
            })
            .collect()
    }
}

impl SignalSource for FixtureSource {
    fn label(&self) -> String {
        format!("fixture:{}", self.seed)
    }

    fn load(&self) -> Result<SignalBundle, RadarError> {
        Ok(self.generate())
    }
}

fn sample_cluster(
    rng: &mut StdRng,
    cluster_type: ClusterType,
    label: &str,
    mentions: &[Mention],
) -> Cluster {
    let examples = mentions
        .iter()
        .filter(|mention| mention.body.contains(label))
        .take(3)
        .map(|mention| ClusterExample {
            id: mention.effective_id(),
            snippet: mention.body.clone(),
        })
        .collect();

    Cluster {
        cluster_type,
        label: label.to_string(),
        examples,
        frequency: rng.gen_range(1..30),
        intensity: Some(rng.gen_range(0.2..1.0)),
    }
}

fn pick_ids(rng: &mut StdRng, ids: Vec<String>, max: usize) -> Vec<String> {
    if ids.is_empty() {
        return Vec::new();
    }
    let count = rng.gen_range(0..=max);
    (0..count)
        .map(|_| ids[rng.gen_range(0..ids.len())].clone())
        .collect()
}
