use crate::games::Game;
use crate::sensitivity::{NewsItem, Sentiment};
use std::time::{Duration, Instant};
use tracing::debug;

/// Supplies labeled community posts for a game, optionally narrowed to one mode.
pub trait SentimentSource {
    fn fetch(&self, game: Game, mode: Option<&str>) -> Vec<NewsItem>;
}

type Post = (&'static str, Sentiment, &'static str);

/// Curated posts shipped with the tool.
pub struct BuiltinNewsFeed {
    max_items: usize,
}

impl Default for BuiltinNewsFeed {
    fn default() -> Self {
        Self { max_items: 7 }
    }
}

impl BuiltinNewsFeed {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }

    fn posts(game: Game) -> Vec<(&'static str, Vec<Post>)> {
        use Sentiment::*;
        match game {
            Game::BloodStrike => vec![
                (
                    "Battle Royale",
                    vec![
                        ("New BR map update improves loot spawns!", Positive, "2025-05-25"),
                        ("BR mode lag issues reported on low-end devices", Negative, "2025-05-24"),
                        ("Community loves the new BR weapon balance", Positive, "2025-05-23"),
                    ],
                ),
                (
                    "Team Deathmatch",
                    vec![
                        ("TDM now has faster respawns!", Positive, "2025-05-25"),
                        ("TDM matchmaking needs improvement", Negative, "2025-05-24"),
                    ],
                ),
            ],
            Game::FreeFire => vec![
                (
                    "Battle Royale",
                    vec![
                        ("BR ranked mode gets new rewards!", Positive, "2025-05-25"),
                        ("BR mode hitreg issues persist", Negative, "2025-05-24"),
                        ("New BR character skills are OP", Positive, "2025-05-23"),
                    ],
                ),
                (
                    "Clash Squad",
                    vec![
                        ("Clash Squad meta favors snipers", Neutral, "2025-05-25"),
                        ("Clash Squad map rotation updated", Positive, "2025-05-24"),
                    ],
                ),
            ],
            Game::CallOfDutyMobile => vec![
                (
                    "Battle Royale",
                    vec![
                        ("BR mode gets Black Ops 6 integration", Positive, "2025-05-25"),
                        ("BR server issues during peak hours", Negative, "2025-05-24"),
                    ],
                ),
                (
                    "Multiplayer",
                    vec![
                        ("New MP maps are a hit!", Positive, "2025-05-25"),
                        ("MP aim assist needs tweaking", Negative, "2025-05-24"),
                    ],
                ),
            ],
            Game::DeltaForce => vec![
                (
                    "Havoc Warfare",
                    vec![
                        ("Havoc Warfare mode adds artillery strikes", Positive, "2025-05-25"),
                        ("Havoc Warfare balance issues with vehicles", Negative, "2025-05-24"),
                        ("Community praises Havoc Warfare operators", Positive, "2025-05-23"),
                    ],
                ),
                (
                    "Black Hawk Down",
                    vec![
                        ("Solo mode added to Black Hawk Down!", Positive, "2025-05-22"),
                        ("Black Hawk Down campaign pacing too slow", Negative, "2025-05-21"),
                    ],
                ),
            ],
            Game::PubgMobile => vec![
                (
                    "Classic Royale",
                    vec![
                        ("Classic mode gets new anti-cheat measures", Positive, "2025-05-25"),
                        ("Classic Royale lag in high-ping regions", Negative, "2025-05-24"),
                        ("New Classic Royale skins released", Positive, "2025-05-23"),
                    ],
                ),
                (
                    "Team Deathmatch",
                    vec![
                        ("TDM mode now has faster pacing", Positive, "2025-05-25"),
                        ("TDM weapon balance needs work", Negative, "2025-05-24"),
                    ],
                ),
            ],
        }
    }
}

impl SentimentSource for BuiltinNewsFeed {
    /// An unknown or missing mode falls back to every post for the game.
    fn fetch(&self, game: Game, mode: Option<&str>) -> Vec<NewsItem> {
        let groups = Self::posts(game);
        let for_mode = mode.and_then(|m| {
            groups
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(m.trim()))
                .map(|(_, posts)| posts.clone())
        });
        let selected: Vec<Post> = match for_mode {
            Some(posts) => posts,
            None => groups.into_iter().flat_map(|(_, posts)| posts).collect(),
        };

        selected
            .into_iter()
            .take(self.max_items)
            .map(|(text, sentiment, ts)| NewsItem::new(text, sentiment, ts))
            .collect()
    }
}

/// Presents items in order until `budget` has elapsed. Only the presented items are returned,
/// so sentiment is computed over what the player actually saw.
pub fn present_items<F>(items: Vec<NewsItem>, budget: Duration, mut on_item: F) -> Vec<NewsItem>
where
    F: FnMut(usize, &NewsItem),
{
    let start = Instant::now();
    let mut shown = Vec::with_capacity(items.len());
    for item in items {
        if start.elapsed() > budget {
            debug!("News budget of {:?} exhausted after {} items", budget, shown.len());
            break;
        }
        on_item(shown.len(), &item);
        shown.push(item);
    }
    shown
}
