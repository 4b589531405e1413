use chrono::{DateTime, Duration, TimeZone, Utc};
use demand_radar::scoring::{LongevityConfig, LongevityScorer, ScoringEngine};
use demand_radar::{
    calculate_confidence_score, calculate_dissatisfaction_score, calculate_longevity_score,
    calculate_misalignment_score, calculate_opportunity_score, calculate_saturation_score,
    calculate_scores, Ad, Cluster, ClusterExample, ClusterType, Gap, GapType, Mention,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
}

fn ad(advertiser: &str, text: &str, age_days: i64) -> Ad {
    Ad::new(advertiser, text).first_seen(now() - Duration::days(age_days))
}

fn gap(evidence_ads: &[&str], evidence_reddit: &[&str]) -> Gap {
    Gap {
        id: "gap_1".to_string(),
        gap_type: GapType::Product,
        title: "Bank sync".to_string(),
        problem: "Sync keeps breaking".to_string(),
        evidence_ads: evidence_ads.iter().map(|id| id.to_string()).collect(),
        evidence_reddit: evidence_reddit.iter().map(|id| id.to_string()).collect(),
        recommendation: String::new(),
        opportunity_score: 0.0,
        confidence: 0.0,
    }
}

#[test]
fn empty_inputs_score_zero() {
    assert_eq!(calculate_saturation_score(&[], &[]), 0.0);
    assert_eq!(calculate_longevity_score(&[]), 0.0);
    assert_eq!(calculate_dissatisfaction_score(&[], &[]), 0.0);
    assert_eq!(calculate_misalignment_score(&[], &[]), 0.0);
    assert_eq!(calculate_confidence_score(&[], &[], &[]), 0.0);

    let scores = calculate_scores(&[], &[], &[], &[]);
    assert_eq!(scores.opportunity, 0.0);
}

#[test]
fn opportunity_weights_and_clamping() {
    assert!((calculate_opportunity_score(100.0, 100.0, 100.0, 0.0) - 100.0).abs() < 1e-9);
    assert_eq!(calculate_opportunity_score(0.0, 0.0, 0.0, 100.0), 0.0);
    assert!((calculate_opportunity_score(100.0, 0.0, 0.0, 0.0) - 35.0).abs() < 1e-9);
    assert!((calculate_opportunity_score(0.0, 0.0, 100.0, 0.0) - 30.0).abs() < 1e-9);
    assert!((calculate_opportunity_score(60.0, 60.0, 60.0, 40.0) - 54.0).abs() < 1e-9);
}

#[test]
fn saturation_grows_with_distinct_advertisers() {
    let few = vec![ad("LedgerLoop", "Invoice faster", 3), ad("ledgerloop ", "Invoice faster", 3)];
    let many = vec![
        ad("LedgerLoop", "Invoice faster", 3),
        ad("PaperTrail", "Invoice faster", 3),
        ad("Billwise", "Invoice faster", 3),
    ];
    let low = calculate_saturation_score(&few, &[]);
    let high = calculate_saturation_score(&many, &[]);
    assert!(low > 0.0);
    assert!(high > low);
}

#[test]
fn saturation_rewards_stronger_angle_repetition() {
    let ads = vec![ad("LedgerLoop", "Invoice faster", 3), ad("PaperTrail", "Save time", 3)];
    let weak = vec![Cluster::new(ClusterType::Angle, "save time", 2, 0.1)];
    let strong = vec![Cluster::new(ClusterType::Angle, "save time", 20, 0.9)];
    let objection_only = vec![Cluster::new(ClusterType::Objection, "save time", 20, 0.9)];

    let weak_score = calculate_saturation_score(&ads, &weak);
    let strong_score = calculate_saturation_score(&ads, &strong);
    assert!(strong_score > weak_score);
    assert_eq!(
        calculate_saturation_score(&ads, &objection_only),
        calculate_saturation_score(&ads, &[])
    );
}

#[test]
fn longevity_is_driven_by_the_oldest_ad() {
    let engine = ScoringEngine::default();
    let oldest_only = vec![ad("LedgerLoop", "Invoice faster", 45)];
    let with_newer = vec![
        ad("LedgerLoop", "Invoice faster", 45),
        ad("PaperTrail", "New hook", 1),
        Ad::new("Billwise", "Undated creative"),
    ];

    let alone = engine.longevity(&oldest_only, now());
    let mixed = engine.longevity(&with_newer, now());
    assert!(alone > 0.0 && alone < 100.0);
    assert!((alone - mixed).abs() < 1e-9);
}

#[test]
fn longevity_ignores_missing_and_future_dates() {
    let engine = ScoringEngine::default();
    let undated = vec![Ad::new("LedgerLoop", "Invoice faster")];
    let future =
        vec![Ad::new("LedgerLoop", "Invoice faster").first_seen(now() + Duration::days(4))];
    assert_eq!(engine.longevity(&undated, now()), 0.0);
    assert_eq!(engine.longevity(&future, now()), 0.0);
}

#[test]
fn longevity_scale_sets_the_curve() {
    let scorer = LongevityScorer::new(LongevityConfig { scale_days: 30.0 });
    let at_scale = scorer.score_for_age(30.0);
    assert!((at_scale - 100.0 * (1.0 - (-1.0_f64).exp())).abs() < 1e-9);
    assert!(scorer.score_for_age(365.0) <= 100.0);
}

#[test]
fn top_level_longevity_reads_the_clock() {
    let first_seen = Utc::now() - Duration::days(30);
    let ads = vec![Ad::new("LedgerLoop", "Invoice faster").first_seen(first_seen)];
    let score = calculate_longevity_score(&ads);
    assert!(score > 60.0 && score < 65.0);
}

#[test]
fn dissatisfaction_needs_objection_clusters() {
    let mentions = vec![Mention::new("Bank sync broke again", "Third time this month", 400)];
    let features = vec![Cluster::new(ClusterType::Feature, "receipt scanning", 12, 0.9)];
    assert_eq!(calculate_dissatisfaction_score(&mentions, &features), 0.0);

    let objections = vec![Cluster::new(ClusterType::Objection, "bank sync breaks", 12, 0.9)];
    assert!(calculate_dissatisfaction_score(&mentions, &objections) > 0.0);
}

#[test]
fn dissatisfaction_weighs_upvoted_discussion_higher() {
    let objections = vec![Cluster::new(ClusterType::Objection, "bank sync breaks", 8, 0.7)];
    let quiet = vec![Mention::new("Bank sync broke", "", 2)];
    let loud = vec![Mention::new("Bank sync broke", "", 900)];

    let quiet_score = calculate_dissatisfaction_score(&quiet, &objections);
    let loud_score = calculate_dissatisfaction_score(&loud, &objections);
    assert!(loud_score > quiet_score);
}

fn mention_with_id(id: &str, score: i64) -> Mention {
    let mut mention = Mention::new("Bank sync broke", "", score);
    mention.id = Some(id.to_string());
    mention
}

fn linked_objection(example_ids: &[&str]) -> Cluster {
    let mut cluster = Cluster::new(ClusterType::Objection, "bank sync breaks", 8, 0.7);
    cluster.examples = example_ids
        .iter()
        .map(|id| ClusterExample {
            id: id.to_string(),
            snippet: "sync broke".to_string(),
        })
        .collect();
    cluster
}

#[test]
fn unrelated_mentions_do_not_dilute_linked_objections() {
    let clusters = vec![linked_objection(&["m_hot"])];
    let linked_only = vec![mention_with_id("m_hot", 900)];
    let with_noise = vec![
        mention_with_id("m_hot", 900),
        mention_with_id("m_cold_1", 1),
        mention_with_id("m_cold_2", 0),
    ];

    let focused = calculate_dissatisfaction_score(&linked_only, &clusters);
    let noisy = calculate_dissatisfaction_score(&with_noise, &clusters);
    assert!(focused > 0.0);
    assert_eq!(focused, noisy);
}

#[test]
fn objections_follow_their_own_mentions_upvotes() {
    let mentions = vec![mention_with_id("m_hot", 900), mention_with_id("m_cold", 3)];
    let hot = calculate_dissatisfaction_score(&mentions, &[linked_objection(&["m_hot"])]);
    let cold = calculate_dissatisfaction_score(&mentions, &[linked_objection(&["m_cold"])]);
    let unresolved = calculate_dissatisfaction_score(&mentions, &[linked_objection(&["m_gone"])]);

    assert!(hot > unresolved);
    assert!(unresolved > cold);
}

#[test]
fn malformed_clusters_contribute_nothing() {
    let mentions = vec![Mention::new("Bank sync broke", "", 50)];
    let negative = vec![Cluster::new(ClusterType::Objection, "bank sync breaks", -10, 0.9)];
    let mut missing_intensity = Cluster::new(ClusterType::Objection, "bank sync breaks", 10, 0.0);
    missing_intensity.intensity = None;
    let nan_intensity = vec![Cluster::new(
        ClusterType::Objection,
        "bank sync breaks",
        10,
        f64::NAN,
    )];

    assert_eq!(calculate_dissatisfaction_score(&mentions, &negative), 0.0);
    assert_eq!(calculate_dissatisfaction_score(&mentions, &[missing_intensity]), 0.0);
    assert_eq!(calculate_dissatisfaction_score(&mentions, &nan_intensity), 0.0);
}

#[test]
fn misalignment_counts_demand_the_ads_ignore() {
    let ads = vec![ad("LedgerLoop", "Recurring invoices made simple", 3)];
    let clusters = vec![
        Cluster::new(ClusterType::Feature, "recurring invoice", 10, 1.0),
        Cluster::new(ClusterType::Objection, "bank sync breaks", 10, 1.0),
        Cluster::new(ClusterType::Angle, "bank sync breaks", 50, 1.0),
    ];

    let score = calculate_misalignment_score(&ads, &clusters);
    assert!((score - 50.0).abs() < 1e-9);
}

#[test]
fn misalignment_is_total_without_ad_copy() {
    let clusters = vec![Cluster::new(ClusterType::Objection, "confusing setup", 4, 0.5)];
    assert!((calculate_misalignment_score(&[], &clusters) - 100.0).abs() < 1e-9);
}

#[test]
fn confidence_rises_with_volume_and_evidence() {
    let ads: Vec<Ad> = (0..10)
        .map(|idx| {
            let mut ad = ad("LedgerLoop", "Invoice faster", 3);
            ad.id = Some(format!("ad_{}", idx));
            ad
        })
        .collect();
    let mentions: Vec<Mention> = (0..10)
        .map(|idx| {
            let mut mention = Mention::new("Bank sync broke", "", 10);
            mention.id = Some(format!("m_{}", idx));
            mention
        })
        .collect();

    let volume_only = calculate_confidence_score(&ads, &mentions, &[]);
    let single_source = calculate_confidence_score(&ads, &mentions, &[gap(&["ad_1"], &[])]);
    let cross_source =
        calculate_confidence_score(&ads, &mentions, &[gap(&["ad_1", "ad_2"], &["m_1", "m_2"])]);
    let unresolved =
        calculate_confidence_score(&ads, &mentions, &[gap(&["ad_x", "ad_y"], &["m_x", "m_y"])]);

    assert!(volume_only > 0.0 && volume_only < 1.0);
    assert!(single_source > volume_only);
    assert!(cross_source > single_source);
    assert!(cross_source > unresolved);
    assert!(calculate_confidence_score(&ads[..2], &mentions[..2], &[]) < volume_only);
}

#[test]
fn engine_score_set_stays_in_range() {
    let engine = ScoringEngine::default();
    let ads = vec![
        ad("LedgerLoop", "Recurring invoices made simple", 120),
        ad("PaperTrail", "Get paid faster", 10),
    ];
    let mentions = vec![
        Mention::new("Bank sync broke", "Third time this month", 800),
        Mention::new("Confusing setup", "", -5),
    ];
    let clusters = vec![
        Cluster::new(ClusterType::Angle, "get paid faster", 30, 0.8),
        Cluster::new(ClusterType::Objection, "bank sync breaks", 40, 1.0),
        Cluster::new(ClusterType::Feature, "multi currency support", 15, 0.6),
    ];
    let gaps = vec![gap(&["ad_1"], &["m_1"])];

    let scores = engine.score(&ads, &mentions, &clusters, &gaps, now());
    for value in [
        scores.saturation,
        scores.longevity,
        scores.dissatisfaction,
        scores.misalignment,
        scores.opportunity,
    ] {
        assert!((0.0..=100.0).contains(&value));
    }
    assert!((0.0..=1.0).contains(&scores.confidence));
    assert_eq!(
        scores.opportunity,
        calculate_opportunity_score(
            scores.longevity,
            scores.dissatisfaction,
            scores.misalignment,
            scores.saturation
        )
    );
    assert_eq!(scores, engine.score(&ads, &mentions, &clusters, &gaps, now()));
}
