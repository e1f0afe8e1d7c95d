//! Score and badge engine
//!
//! Pure state transitions for the block-clicking game. The engine hands back
//! notification events; it never renders anything itself.

use crate::core::{BadgeCategory, Block};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Base award for the first click on any block.
pub const BASE_CLICK_POINTS: u64 = 10;
/// Extra points when the clicked block carries a badge category.
pub const BADGE_BLOCK_BONUS: u64 = 50;
/// Extra points when the clicked block has at least this many transactions.
pub const BUSY_BLOCK_BONUS: u64 = 20;
pub const BUSY_BLOCK_TX_THRESHOLD: usize = 4;
/// Transactions above this value add floor(10 x value) points.
pub const LARGE_VALUE_THRESHOLD: f64 = 1.0;

/// Presentation kind of an engine event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// Event description handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Notification {
        Notification {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Notification {
        Notification {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Notification {
        Notification {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Result of a click, keyed by block number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Awarded { points: u64 },
    AlreadyClicked,
}

/// Result of evaluating a badge-worthy block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeOutcome {
    Earned(BadgeCategory),
    AlreadyEarned(BadgeCategory),
}

/// Score counter, earned badges, and the set of already-credited blocks.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    score: u64,
    badges: HashSet<BadgeCategory>,
    clicked_blocks: HashSet<u64>,
}

impl ScoreBoard {
    pub fn new() -> ScoreBoard {
        ScoreBoard::default()
    }

    pub fn get_score(&self) -> u64 {
        self.score
    }

    pub fn get_badges(&self) -> Vec<BadgeCategory> {
        BadgeCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.badges.contains(c))
            .collect()
    }

    pub fn has_badge(&self, category: BadgeCategory) -> bool {
        self.badges.contains(&category)
    }

    pub fn has_clicked(&self, block_number: u64) -> bool {
        self.clicked_blocks.contains(&block_number)
    }

    /// Award points for a block click. Fires once per block number; repeat
    /// clicks are a no-op with their own notification.
    pub fn click(&mut self, block: &Block) -> (ClickOutcome, Notification) {
        let number = block.get_number();
        if !self.clicked_blocks.insert(number) {
            return (
                ClickOutcome::AlreadyClicked,
                Notification::info(format!(
                    "Block #{number} already clicked! No points awarded."
                )),
            );
        }

        let mut points = BASE_CLICK_POINTS;
        let mut bonus_reason = String::new();

        if block.get_badge_category().is_some() {
            points += BADGE_BLOCK_BONUS;
            bonus_reason.push_str(" +50 bonus for badge-worthy block!");
        }

        if block.tx_count() >= BUSY_BLOCK_TX_THRESHOLD {
            points += BUSY_BLOCK_BONUS;
            bonus_reason.push_str(" +20 for busy block!");
        }

        let max_value = block.max_transaction_value();
        if max_value > LARGE_VALUE_THRESHOLD {
            let bonus = (max_value * 10.0).floor() as u64;
            points += bonus;
            bonus_reason.push_str(&format!(" +{bonus} for large transaction!"));
        }

        self.score += points;
        (
            ClickOutcome::Awarded { points },
            Notification::success(format!("+{points} points! Block #{number}{bonus_reason}")),
        )
    }

    /// Idempotent badge award, independent of the score award. Returns None
    /// for blocks without a badge category.
    pub fn award_badge(&mut self, block: &Block) -> Option<(BadgeOutcome, Notification)> {
        let category = block.get_badge_category()?;
        let number = block.get_number();

        if self.badges.insert(category) {
            Some((
                BadgeOutcome::Earned(category),
                Notification::success(format!(
                    "Badge earned: {}! Block #{number} - {}",
                    category.label(),
                    category.description()
                )),
            ))
        } else {
            Some((
                BadgeOutcome::AlreadyEarned(category),
                Notification::info(format!(
                    "Block #{number} was badge-worthy! But you already have this badge."
                )),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::synthesizer::synthesize_with_category;
    use crate::core::{Transaction, TxStatus};

    fn plain_block(number: u64, values: &[&str]) -> Block {
        let txs = values
            .iter()
            .map(|v| {
                Transaction::new(
                    "0xaa".to_string(),
                    "0xfrom".to_string(),
                    Some("0xto".to_string()),
                    v.to_string(),
                    TxStatus::Success,
                )
            })
            .collect();
        Block::new(number, "0xabc".to_string(), 0, txs)
    }

    #[test]
    fn test_base_award() {
        let mut board = ScoreBoard::new();
        let block = plain_block(5, &["0.100"]);
        let (outcome, notification) = board.click(&block);
        assert_eq!(outcome, ClickOutcome::Awarded { points: 10 });
        assert_eq!(board.get_score(), 10);
        assert_eq!(notification.kind, NotificationKind::Success);
    }

    #[test]
    fn test_repeat_click_is_a_no_op() {
        let mut board = ScoreBoard::new();
        let block = plain_block(5, &["0.100"]);
        board.click(&block);
        let (outcome, notification) = board.click(&block);
        assert_eq!(outcome, ClickOutcome::AlreadyClicked);
        assert_eq!(board.get_score(), 10);
        assert_eq!(notification.kind, NotificationKind::Info);
        assert!(notification.message.contains("already clicked"));
    }

    #[test]
    fn test_all_bonuses_stack() {
        let mut board = ScoreBoard::new();
        // Badge + 4 txs + max value 2.5: 10 + 50 + 20 + 25
        let block =
            plain_block(9, &["0.100", "0.200", "0.300", "2.500"]).with_badge(BadgeCategory::Whale);
        let (outcome, _) = board.click(&block);
        assert_eq!(outcome, ClickOutcome::Awarded { points: 105 });
        assert_eq!(board.get_score(), 105);
    }

    #[test]
    fn test_large_value_bonus_floors() {
        let mut board = ScoreBoard::new();
        let block = plain_block(9, &["1.990"]);
        // 10 base + floor(19.9)
        let (outcome, _) = board.click(&block);
        assert_eq!(outcome, ClickOutcome::Awarded { points: 29 });
    }

    #[test]
    fn test_value_at_threshold_earns_no_bonus() {
        let mut board = ScoreBoard::new();
        let block = plain_block(9, &["1.000"]);
        let (outcome, _) = board.click(&block);
        assert_eq!(outcome, ClickOutcome::Awarded { points: 10 });
    }

    #[test]
    fn test_badge_awarded_once_score_awarded_per_block() {
        let mut board = ScoreBoard::new();
        let first = synthesize_with_category(100, Some(BadgeCategory::Whale));
        let second = synthesize_with_category(101, Some(BadgeCategory::Whale));

        let (first_click, _) = board.click(&first);
        let (first_badge, n1) = board.award_badge(&first).unwrap();
        assert!(matches!(first_click, ClickOutcome::Awarded { .. }));
        assert_eq!(first_badge, BadgeOutcome::Earned(BadgeCategory::Whale));
        assert_eq!(n1.kind, NotificationKind::Success);

        let score_after_first = board.get_score();
        let (second_click, _) = board.click(&second);
        let (second_badge, n2) = board.award_badge(&second).unwrap();
        // Second distinct block still earns its own score...
        assert!(matches!(second_click, ClickOutcome::Awarded { .. }));
        assert!(board.get_score() > score_after_first);
        // ...but the badge set gains whale exactly once
        assert_eq!(second_badge, BadgeOutcome::AlreadyEarned(BadgeCategory::Whale));
        assert_eq!(n2.kind, NotificationKind::Info);
        assert_eq!(board.get_badges(), vec![BadgeCategory::Whale]);
    }

    #[test]
    fn test_plain_block_awards_no_badge() {
        let mut board = ScoreBoard::new();
        let block = plain_block(5, &["0.100"]);
        assert!(board.award_badge(&block).is_none());
        assert!(board.get_badges().is_empty());
    }
}
