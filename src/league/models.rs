//! Data models for the weekly league

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// League tiers in promotion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeagueTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl LeagueTier {
    pub const ALL: [LeagueTier; 5] = [
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
        Self::Diamond,
    ];

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "silver" => Self::Silver,
            "gold" => Self::Gold,
            "platinum" => Self::Platinum,
            "diamond" => Self::Diamond,
            _ => Self::Bronze,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Diamond => "diamond",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_bottom(&self) -> bool {
        *self == Self::Bronze
    }

    pub fn is_top(&self) -> bool {
        *self == Self::Diamond
    }

    /// Next tier up (saturating at diamond)
    pub fn promoted(&self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Next tier down (saturating at bronze)
    pub fn demoted(&self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    /// Static configuration for this tier
    pub fn info(&self) -> LeagueTierInfo {
        match self {
            Self::Bronze => LeagueTierInfo {
                min_xp: 0,
                promotion_top_percent: 20,
                demotion_bottom_percent: 0,
            },
            Self::Silver => LeagueTierInfo {
                min_xp: 1_000,
                promotion_top_percent: 10,
                demotion_bottom_percent: 10,
            },
            Self::Gold => LeagueTierInfo {
                min_xp: 3_000,
                promotion_top_percent: 10,
                demotion_bottom_percent: 10,
            },
            Self::Platinum => LeagueTierInfo {
                min_xp: 6_000,
                promotion_top_percent: 10,
                demotion_bottom_percent: 15,
            },
            Self::Diamond => LeagueTierInfo {
                min_xp: 10_000,
                promotion_top_percent: 0,
                demotion_bottom_percent: 15,
            },
        }
    }
}

/// Static per-tier configuration
///
/// The bottom tier has `demotion_bottom_percent == 0` (never demotes) and
/// the top tier has `promotion_top_percent == 0` (never promotes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueTierInfo {
    pub min_xp: u32,
    pub promotion_top_percent: u32,
    pub demotion_bottom_percent: u32,
}

impl LeagueTierInfo {
    /// Highest rank still inside the promotion band (0 = unreachable)
    pub fn promotion_zone(&self, cohort_size: usize) -> u32 {
        ceil_percent(cohort_size, self.promotion_top_percent)
    }

    /// Lowest rank inside the demotion band (`cohort_size + 1` = unreachable)
    pub fn demotion_zone(&self, cohort_size: usize) -> u32 {
        if self.demotion_bottom_percent == 0 {
            return cohort_size as u32 + 1;
        }
        cohort_size as u32 - ceil_percent(cohort_size, self.demotion_bottom_percent)
    }
}

fn ceil_percent(n: usize, percent: u32) -> u32 {
    ((n as u32 * percent) + 99) / 100
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueParticipant {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub weekly_xp: u32,
    pub total_xp: u32,
    pub league: LeagueTier,
    /// Dense 1-based rank, recomputed after every XP change
    pub rank: u32,
    pub streak: u32,
    #[serde(default)]
    pub is_current_user: bool,
}

/// One week's leaderboard for a tier cohort
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyLeague {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub tier: LeagueTier,
    /// Always sorted descending by weekly XP, ranks dense 1..N
    pub participants: Vec<LeagueParticipant>,
    pub my_rank: u32,
    pub promotion_zone: u32,
    pub demotion_zone: u32,
}

impl WeeklyLeague {
    pub fn new(
        tier: LeagueTier,
        week_start: DateTime<Utc>,
        week_end: DateTime<Utc>,
        participants: Vec<LeagueParticipant>,
    ) -> Self {
        let info = tier.info();
        let size = participants.len();
        let mut league = Self {
            week_start,
            week_end,
            tier,
            participants,
            my_rank: 0,
            promotion_zone: info.promotion_zone(size),
            demotion_zone: info.demotion_zone(size),
        };
        league.sort_and_rank();
        league
    }

    /// Re-sort descending by weekly XP and reassign dense ranks
    ///
    /// The sort is stable, so ties keep their prior relative order.
    pub fn sort_and_rank(&mut self) {
        self.participants
            .sort_by(|a, b| b.weekly_xp.cmp(&a.weekly_xp));
        for (i, p) in self.participants.iter_mut().enumerate() {
            p.rank = i as u32 + 1;
            if p.is_current_user {
                self.my_rank = p.rank;
            }
        }
    }

    pub fn current_user(&self) -> Option<&LeagueParticipant> {
        self.participants.iter().find(|p| p.is_current_user)
    }

    pub(crate) fn current_user_mut(&mut self) -> Option<&mut LeagueParticipant> {
        self.participants.iter_mut().find(|p| p.is_current_user)
    }
}

/// How a week ended for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeekOutcome {
    Promotion,
    Demotion,
    Stay,
}

/// Reward granted at week end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekReward {
    pub gems: u32,
    pub bonus_xp: u32,
}

impl WeekReward {
    /// Reward table keyed by the just-ended week's tier and outcome
    ///
    /// Promotion rewards scale with tier, stay rewards are flat, demotion
    /// grants nothing.
    pub fn for_outcome(tier: LeagueTier, outcome: WeekOutcome) -> Self {
        let idx = tier.index() as u32;
        match outcome {
            WeekOutcome::Promotion => Self {
                gems: 100 + 50 * idx,
                bonus_xp: 50 + 25 * idx,
            },
            WeekOutcome::Stay => Self {
                gems: 20,
                bonus_xp: 0,
            },
            WeekOutcome::Demotion => Self::default(),
        }
    }
}

/// Archived result of one completed week
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueHistoryEntry {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub tier: LeagueTier,
    pub rank: u32,
    pub weekly_xp: u32,
    pub outcome: WeekOutcome,
    pub reward: WeekReward,
}

/// Mid-week classification of the user's position, for UI hinting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromotionStatus {
    /// Inside the promotion band
    Promotion,
    /// Within three ranks of the promotion cutoff
    Safe,
    Stay,
    /// Inside the demotion band
    Demotion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering_and_edges() {
        assert!(LeagueTier::Bronze < LeagueTier::Diamond);
        assert_eq!(LeagueTier::Bronze.demoted(), LeagueTier::Bronze);
        assert_eq!(LeagueTier::Diamond.promoted(), LeagueTier::Diamond);
        assert_eq!(LeagueTier::Silver.promoted(), LeagueTier::Gold);
        assert_eq!(LeagueTier::Silver.demoted(), LeagueTier::Bronze);
    }

    #[test]
    fn test_tier_parse_roundtrip() {
        for tier in LeagueTier::ALL {
            assert_eq!(LeagueTier::parse(tier.as_str()), tier);
        }
        assert_eq!(LeagueTier::parse("unknown"), LeagueTier::Bronze);
    }

    #[test]
    fn test_silver_zones_match_ten_percent_cutoffs() {
        // Silver is 10% up, 10% down: with 30 participants the top 3 promote
        // and ranks 27..30 fall in the demotion band
        let info = LeagueTier::Silver.info();
        assert_eq!(info.promotion_zone(30), 3);
        assert_eq!(info.demotion_zone(30), 27);
    }

    #[test]
    fn test_edge_tiers_have_unreachable_zones() {
        assert_eq!(LeagueTier::Diamond.info().promotion_zone(30), 0);
        assert_eq!(LeagueTier::Bronze.info().demotion_zone(30), 31);
    }

    #[test]
    fn test_mid_tiers_keep_zones_apart() {
        for tier in [LeagueTier::Silver, LeagueTier::Gold, LeagueTier::Platinum] {
            let info = tier.info();
            assert!(
                info.promotion_zone(30) < info.demotion_zone(30),
                "{} zones overlap",
                tier.as_str()
            );
        }
    }

    #[test]
    fn test_min_xp_increases_with_tier() {
        let mut last = None;
        for tier in LeagueTier::ALL {
            let min_xp = tier.info().min_xp;
            if let Some(prev) = last {
                assert!(min_xp > prev);
            }
            last = Some(min_xp);
        }
    }

    #[test]
    fn test_reward_table_shape() {
        let promo_bronze = WeekReward::for_outcome(LeagueTier::Bronze, WeekOutcome::Promotion);
        let promo_plat = WeekReward::for_outcome(LeagueTier::Platinum, WeekOutcome::Promotion);
        assert!(promo_plat.gems > promo_bronze.gems);
        assert!(promo_plat.bonus_xp > promo_bronze.bonus_xp);

        let stay_silver = WeekReward::for_outcome(LeagueTier::Silver, WeekOutcome::Stay);
        let stay_gold = WeekReward::for_outcome(LeagueTier::Gold, WeekOutcome::Stay);
        assert_eq!(stay_silver, stay_gold);

        let demoted = WeekReward::for_outcome(LeagueTier::Gold, WeekOutcome::Demotion);
        assert_eq!(demoted, WeekReward::default());
    }

    #[test]
    fn test_stable_sort_preserves_tie_order() {
        let now = Utc::now();
        let make = |id: &str, xp: u32| LeagueParticipant {
            id: id.to_string(),
            name: id.to_string(),
            avatar: "🦊".to_string(),
            weekly_xp: xp,
            total_xp: 0,
            league: LeagueTier::Bronze,
            rank: 0,
            streak: 0,
            is_current_user: false,
        };

        let league = WeeklyLeague::new(
            LeagueTier::Bronze,
            now,
            now,
            vec![make("a", 50), make("b", 50), make("c", 100)],
        );

        let ids: Vec<&str> = league.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        let ranks: Vec<u32> = league.participants.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
