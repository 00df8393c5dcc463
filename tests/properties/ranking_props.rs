use proptest::prelude::*;
use proptest::sample::select;

use scout::core::{Item, ItemKind};
use scout::search::{RankQuery, Ranker, Scorer, tokenize};
use scout::test_utils::fixtures::{agent, skill};

const WORDS: &[&str] = &[
    "crypto", "trading", "browser", "wallet", "agent", "data", "music", "deploy", "helper", "bot",
];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(select(WORDS), 0..6).prop_map(|words| words.join(" "))
}

#[derive(Debug, Clone)]
enum Shape {
    Agent {
        name: String,
        description: String,
        karma: i64,
        active: bool,
    },
    Skill {
        name: String,
        description: String,
        tags: Vec<&'static str>,
        downloads: u64,
        stars: u64,
    },
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        (text(), text(), -100i64..10_000, any::<bool>()).prop_map(
            |(name, description, karma, active)| Shape::Agent {
                name,
                description,
                karma,
                active,
            }
        ),
        (
            text(),
            text(),
            prop::collection::vec(select(WORDS), 0..3),
            0u64..100_000,
            0u64..500
        )
            .prop_map(|(name, description, tags, downloads, stars)| Shape::Skill {
                name,
                description,
                tags,
                downloads,
                stars,
            }),
    ]
}

fn build(shapes: Vec<Shape>) -> Vec<Item> {
    shapes
        .into_iter()
        .enumerate()
        .map(|(i, shape)| {
            let id = format!("i{i}");
            match shape {
                Shape::Agent {
                    name,
                    description,
                    karma,
                    active,
                } => {
                    let mut a = agent(&id, &name, &description);
                    a.karma = karma;
                    a.is_active = active;
                    Item::Agent(a)
                }
                Shape::Skill {
                    name,
                    description,
                    tags,
                    downloads,
                    stars,
                } => {
                    let mut s = skill(&id, &name, &description, &tags);
                    s.stats.downloads = downloads;
                    s.stats.stars = stars;
                    Item::Skill(s)
                }
            }
        })
        .collect()
}

fn collection() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(shape(), 0..40).prop_map(build)
}

fn kind() -> impl Strategy<Value = Option<ItemKind>> {
    prop_oneof![
        Just(None),
        Just(Some(ItemKind::Agent)),
        Just(Some(ItemKind::Skill)),
    ]
}

proptest! {
    #[test]
    fn test_ranking_is_deterministic(items in collection(), query in text()) {
        let ranker = Ranker::default();
        let query = RankQuery::new(query);
        let first: Vec<(String, f64)> = ranker
            .rank_all(&items, &query)
            .iter()
            .map(|r| (r.item.id().to_string(), r.score))
            .collect();
        let second: Vec<(String, f64)> = ranker
            .rank_all(&items, &query)
            .iter()
            .map(|r| (r.item.id().to_string(), r.score))
            .collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_scores_non_increasing(items in collection(), query in text()) {
        let results = Ranker::default().rank_all(&items, &RankQuery::new(query));
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_limit_respected(items in collection(), query in text(), limit in 1usize..15) {
        let ranker = Ranker::default();
        let query = RankQuery::new(query).with_limit(limit);
        let all = ranker.rank_all(&items, &query);
        let top = ranker.rank(&items, &query);
        prop_assert_eq!(top.len(), limit.min(all.len()));
    }

    #[test]
    fn test_zero_scores_excluded(items in collection(), query in text()) {
        for result in Ranker::default().rank_all(&items, &RankQuery::new(query)) {
            prop_assert!(result.score > 0.0);
            prop_assert!(!result.matched_terms.is_empty());
        }
    }

    #[test]
    fn test_kind_filter_respected(items in collection(), query in text(), kind in kind()) {
        let query = RankQuery::new(query).with_kind(kind);
        for result in Ranker::default().rank_all(&items, &query) {
            if let Some(kind) = kind {
                prop_assert_eq!(result.item.kind(), kind);
            }
        }
    }

    #[test]
    fn test_skill_filter_respected(items in collection(), query in text()) {
        let query = RankQuery::new(query).with_skills(vec!["trading".to_string()]);
        for result in Ranker::default().rank_all(&items, &query) {
            prop_assert!(result.skills.iter().any(|s| s == "trading"));
        }
    }

    #[test]
    fn test_extra_occurrence_never_lowers_score(
        name in text(),
        description in text(),
        query in text(),
        word in select(WORDS),
    ) {
        let scorer = Scorer::default();
        let query_tokens = tokenize(&query);
        let before = Item::Agent(agent("a", &name, &description));
        let after = Item::Agent(agent("a", &name, &format!("{description} {word}")));

        let score_of = |item: &Item| {
            scorer
                .score(item, &tokenize(&item.search_text()), &query_tokens)
                .score
        };
        prop_assert!(score_of(&after) >= score_of(&before));
    }
}
