//! Synthetic cohort generation
//!
//! The leaderboard is local: every week the engine fabricates a cohort of
//! peers from fixed name and avatar pools, with randomized weekly XP and
//! streaks scaled to the tier. Generation runs on the engine's `ChaCha8Rng`
//! so seeded engines produce identical cohorts.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use super::models::{LeagueParticipant, LeagueTier};

const PEER_NAMES: [&str; 40] = [
    "Aoi", "Haru", "Yuki", "Sora", "Ren", "Mei", "Kaito", "Hana", "Riku", "Sakura", "Emma",
    "Liam", "Noah", "Mia", "Lucas", "Nina", "Leo", "Ivy", "Oscar", "Ruby", "Felix", "Luna",
    "Theo", "Cleo", "Milo", "Iris", "Hugo", "Nora", "Jade", "Kai", "Tara", "Finn", "Zoe",
    "Axel", "Lily", "Remy", "Elsa", "Otis", "Vera", "Juno",
];

const PEER_AVATARS: [&str; 12] = [
    "🦊", "🐱", "🐼", "🦉", "🐸", "🐨", "🦝", "🐯", "🐰", "🦁", "🐻", "🐙",
];

/// Generate `count` synthetic peers for a tier cohort
///
/// Names are sampled without replacement so a cohort never shows duplicates;
/// `count` must not exceed the name pool.
pub fn generate_peers<R: Rng>(
    rng: &mut R,
    tier: LeagueTier,
    count: usize,
) -> Vec<LeagueParticipant> {
    let info = tier.info();
    let xp_ceiling = 400 + 150 * tier.index() as u32;

    PEER_NAMES
        .choose_multiple(rng, count)
        .map(|name| {
            let avatar = PEER_AVATARS.choose(rng).copied().unwrap_or("🦊");
            LeagueParticipant {
                id: Uuid::new_v4().to_string(),
                name: (*name).to_string(),
                avatar: avatar.to_string(),
                weekly_xp: rng.gen_range(0..=xp_ceiling),
                total_xp: info.min_xp + rng.gen_range(0..4_000),
                league: tier,
                rank: 0,
                streak: rng.gen_range(0..=60),
                is_current_user: false,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_generates_requested_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let peers = generate_peers(&mut rng, LeagueTier::Silver, 29);
        assert_eq!(peers.len(), 29);
        assert!(peers.iter().all(|p| !p.is_current_user));
        assert!(peers.iter().all(|p| p.league == LeagueTier::Silver));
    }

    #[test]
    fn test_names_are_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let peers = generate_peers(&mut rng, LeagueTier::Bronze, 29);

        let mut names: Vec<&str> = peers.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 29);
    }

    #[test]
    fn test_same_seed_same_cohort() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);

        let peers_a = generate_peers(&mut a, LeagueTier::Gold, 10);
        let peers_b = generate_peers(&mut b, LeagueTier::Gold, 10);

        let xp_a: Vec<u32> = peers_a.iter().map(|p| p.weekly_xp).collect();
        let xp_b: Vec<u32> = peers_b.iter().map(|p| p.weekly_xp).collect();
        assert_eq!(xp_a, xp_b);
    }

    #[test]
    fn test_total_xp_respects_tier_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let min_xp = LeagueTier::Platinum.info().min_xp;
        let peers = generate_peers(&mut rng, LeagueTier::Platinum, 29);
        assert!(peers.iter().all(|p| p.total_xp >= min_xp));
    }
}
