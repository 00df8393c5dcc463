use scout::core::{Item, ItemKind};
use scout::search::{PARALLEL_THRESHOLD, RankQuery, Ranker};
use scout::test_utils::fixtures::{agent, skill};

#[test]
fn partial_and_exact_terms_both_match() {
    let items = vec![Item::Agent(agent(
        "a1",
        "CryptoBot",
        "automated trading assistant",
    ))];
    let results = Ranker::default().rank(&items, &RankQuery::new("crypto trading"));

    assert_eq!(results.len(), 1);
    assert!(results[0].score > 0.0);
    assert_eq!(results[0].matched_terms, vec!["crypto*", "trading"]);
}

#[test]
fn empty_query_returns_nothing() {
    let items = vec![Item::Agent(agent("a1", "CryptoBot", "trading"))];
    assert!(Ranker::default().rank(&items, &RankQuery::new("")).is_empty());
    assert!(Ranker::default().rank(&items, &RankQuery::new("  ")).is_empty());
    assert!(Ranker::default().rank(&items, &RankQuery::new("ai ml")).is_empty());
}

#[test]
fn stars_raise_skill_score() {
    let mut starred = skill("s1", "Notes", "note taking helper", &[]);
    starred.stats.stars = 100;
    let plain = skill("s2", "Notes", "note taking helper", &[]);
    let items = vec![Item::Skill(plain), Item::Skill(starred)];

    let results = Ranker::default().rank(&items, &RankQuery::new("notes"));
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].item.id(), "s1");
    assert!(results[0].score > results[1].score);
}

#[test]
fn active_agent_outranks_idle_twin() {
    let idle = agent("a1", "Helper", "calendar assistant");
    let mut active = agent("a2", "Helper", "calendar assistant");
    active.is_active = true;
    let items = vec![Item::Agent(idle), Item::Agent(active)];

    let results = Ranker::default().rank(&items, &RankQuery::new("calendar"));
    assert_eq!(results[0].item.id(), "a2");
    let ratio = results[0].score / results[1].score;
    assert!((ratio - 1.2).abs() < 1e-9);
}

#[test]
fn agent_filter_over_skills_is_empty() {
    let items = vec![
        Item::Skill(skill("s1", "Wallet", "crypto wallet", &["crypto"])),
        Item::Skill(skill("s2", "Swap", "crypto swap", &[])),
    ];
    let query = RankQuery::new("crypto").with_kind(Some(ItemKind::Agent));
    assert!(Ranker::default().rank(&items, &query).is_empty());
}

#[test]
fn ties_keep_collection_order() {
    let items = vec![
        Item::Skill(skill("s1", "Alpha", "music mixer", &[])),
        Item::Skill(skill("s2", "Beta", "music mixer", &[])),
        Item::Skill(skill("s3", "Gamma", "music mixer", &[])),
    ];
    let ids: Vec<&str> = Ranker::default()
        .rank(&items, &RankQuery::new("mixer"))
        .iter()
        .map(|r| r.item.id())
        .collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);
}

#[test]
fn large_collection_parallel_matches_sequential() {
    let items: Vec<Item> = (0..PARALLEL_THRESHOLD + 10)
        .map(|i| {
            let mut s = skill(
                &format!("s{i}"),
                "Scraper",
                if i % 3 == 0 { "browser scraping" } else { "data report" },
                &[],
            );
            s.stats.downloads = (i % 17) as u64 * 100;
            Item::Skill(s)
        })
        .collect();
    let query = RankQuery::new("browser data").with_limit(50);

    let parallel: Vec<(&str, f64)> = Ranker::default()
        .rank(&items, &query)
        .iter()
        .map(|r| (r.item.id(), r.score))
        .collect();
    let sequential: Vec<(&str, f64)> = Ranker::default()
        .parallel(false)
        .rank(&items, &query)
        .iter()
        .map(|r| (r.item.id(), r.score))
        .collect();
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 50);
}
