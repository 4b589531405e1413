use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use demand_radar::sources::{FileSource, FixtureSource, SignalBundle, SignalSource};
use demand_radar::{Ad, ClusterType, MediaType, Mention, RadarError};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("demand-radar-{}-{}", std::process::id(), name))
}

#[test]
fn fixtures_are_deterministic_per_seed() {
    let as_of = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let first = serde_json::to_string(&FixtureSource::new(42, as_of).generate()).unwrap();
    let second = serde_json::to_string(&FixtureSource::new(42, as_of).generate()).unwrap();
    let other = serde_json::to_string(&FixtureSource::new(43, as_of).generate()).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn fixture_shape_follows_counts() {
    let as_of = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let source = FixtureSource::new(5, as_of).with_counts(10, 15);
    let bundle = source.load().unwrap();

    assert_eq!(bundle.ads.len(), 10);
    assert_eq!(bundle.mentions.len(), 15);
    assert_eq!(bundle.gaps.len(), 3);
    assert!(bundle
        .clusters
        .iter()
        .any(|cluster| cluster.cluster_type == ClusterType::Objection));
    assert!(bundle
        .ads
        .iter()
        .all(|ad| ad.first_seen.map_or(true, |seen| seen <= as_of)));
    assert_eq!(source.label(), "fixture:5");
}

#[test]
fn fixture_gap_evidence_points_at_generated_items() {
    let as_of = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let bundle = FixtureSource::new(9, as_of).generate();
    let ad_ids: HashSet<String> = bundle.ads.iter().map(Ad::effective_id).collect();
    let mention_ids: HashSet<String> = bundle.mentions.iter().map(Mention::effective_id).collect();

    for gap in &bundle.gaps {
        assert!(gap.evidence_ads.iter().all(|id| ad_ids.contains(id)));
        assert!(gap.evidence_reddit.iter().all(|id| mention_ids.contains(id)));
    }
}

#[test]
fn file_source_reads_sparse_json() {
    let path = temp_path("bundle.json");
    std::fs::write(
        &path,
        r#"{
            "ads": [
                {"advertiser_name": "LedgerLoop", "creative_text": "Invoice faster", "media_type": "video"},
                {"id": "ad_2", "advertiser_name": "PaperTrail", "first_seen": "2026-08-01T00:00:00Z", "is_active": false}
            ],
            "mentions": [{"title": "Bank sync broke", "score": 120}],
            "clusters": [{"cluster_type": "objection", "label": "bank sync breaks", "frequency": 9}]
        }"#,
    )
    .unwrap();

    let source = FileSource::new(&path);
    let bundle = source.load();
    std::fs::remove_file(&path).unwrap();
    let bundle: SignalBundle = bundle.unwrap();

    assert_eq!(bundle.ads.len(), 2);
    assert!(bundle.ads[0].is_active);
    assert_eq!(bundle.ads[0].media_type, MediaType::Video);
    assert!(bundle.ads[0].effective_id().starts_with("ad_"));
    assert!(!bundle.ads[1].is_active);
    assert_eq!(bundle.ads[1].effective_id(), "ad_2");
    assert_eq!(bundle.clusters[0].intensity(), 0.0);
    assert!(bundle.gaps.is_empty());
    assert!(!bundle.is_empty());
}

#[test]
fn file_source_surfaces_errors() {
    let missing = FileSource::new(temp_path("missing.json"));
    assert!(matches!(missing.load(), Err(RadarError::Io { .. })));

    let empty_path = temp_path("empty.json");
    std::fs::write(&empty_path, "  \n").unwrap();
    let empty = FileSource::new(&empty_path).load();
    std::fs::remove_file(&empty_path).unwrap();
    assert!(matches!(empty, Err(RadarError::InvalidInput(_))));

    let broken_path = temp_path("broken.json");
    std::fs::write(&broken_path, "{\"ads\": [").unwrap();
    let broken = FileSource::new(&broken_path).load();
    std::fs::remove_file(&broken_path).unwrap();
    assert!(matches!(broken, Err(RadarError::Json(_))));
}

#[test]
fn content_ids_are_stable() {
    let first = Ad::new("LedgerLoop", "Invoice faster");
    let second = Ad::new("LedgerLoop", "Invoice faster");
    let different = Ad::new("LedgerLoop", "Invoice slower");
    assert_eq!(first.effective_id(), second.effective_id());
    assert_ne!(first.effective_id(), different.effective_id());

    assert_eq!(MediaType::from_str("Reel"), Some(MediaType::Video));
    assert_eq!(MediaType::from_str("hologram"), None);
    assert_eq!(MediaType::Carousel.label(), "carousel");
}
