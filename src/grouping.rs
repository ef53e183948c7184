// 🎲 Group Generator - shuffle a roster, split it into groups of 2-3
//
// Sizing rule (N = roster size):
//   0      → no groups
//   1..=3  → one group of N
//   4      → [2, 2]
//   5      → [3, 2]
//   N >= 6 → by N % 3: 0 → all 3s, 1 → [2, 2, 3, ...], 2 → [2, 3, ...]
//
// The small cases are kept as-is rather than folded into the mod-3 rule.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::member::Member;
use crate::roster::RosterId;

/// One generated group, in shuffle order
pub type Group = Vec<Member>;

/// Text shown for a roster with nothing to group
pub const EMPTY_GROUPS_MESSAGE: &str = "No members to group.";

// ============================================================================
// SHUFFLE
// ============================================================================

/// Fisher-Yates: walk from the last index down to 1, swapping each slot
/// with a uniformly chosen index in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

// ============================================================================
// SIZE PLAN
// ============================================================================

/// Group sizes, in emission order, for a roster of `n` members
pub fn group_sizes(n: usize) -> Vec<usize> {
    match n {
        0 => Vec::new(),
        1..=3 => vec![n],
        4 => vec![2, 2],
        5 => vec![3, 2],
        _ => {
            let mut sizes = match n % 3 {
                1 => vec![2, 2],
                2 => vec![2],
                _ => Vec::new(),
            };
            let head: usize = sizes.iter().sum();
            sizes.extend(std::iter::repeat(3).take((n - head) / 3));
            sizes
        }
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Shuffle a copy of `members` and split it according to [`group_sizes`]
pub fn generate_groups<R: Rng + ?Sized>(members: &[Member], rng: &mut R) -> Vec<Group> {
    let mut shuffled = members.to_vec();
    shuffle(&mut shuffled, rng);

    let mut rest = shuffled.into_iter();
    group_sizes(members.len())
        .into_iter()
        .map(|size| rest.by_ref().take(size).collect())
        .collect()
}

/// Groups for both rosters, taken from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub groups_a: Vec<Group>,
    pub groups_b: Vec<Group>,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn groups(&self, roster: RosterId) -> &[Group] {
        match roster {
            RosterId::A => &self.groups_a,
            RosterId::B => &self.groups_b,
        }
    }
}

/// Group each roster independently
pub fn generate<R: Rng + ?Sized>(
    roster_a: &[Member],
    roster_b: &[Member],
    rng: &mut R,
) -> GenerationResult {
    let groups_a = generate_groups(roster_a, rng);
    let groups_b = generate_groups(roster_b, rng);

    info!(
        members_a = roster_a.len(),
        groups_a = groups_a.len(),
        members_b = roster_b.len(),
        groups_b = groups_b.len(),
        "groups generated"
    );

    GenerationResult {
        groups_a,
        groups_b,
        generated_at: Utc::now(),
    }
}

/// Plain-text rendering of one roster's groups ("Group 1", "Group 2", ...)
pub fn format_groups(title: &str, groups: &[Group]) -> String {
    let mut out = format!("{} Results\n", title);

    if groups.is_empty() {
        out.push_str("  ");
        out.push_str(EMPTY_GROUPS_MESSAGE);
        out.push('\n');
        return out;
    }

    for (index, group) in groups.iter().enumerate() {
        out.push_str(&format!("  Group {}\n", index + 1));
        for member in group {
            out.push_str(&format!("    - {}\n", member.name));
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    fn members(n: usize) -> Vec<Member> {
        (0..n)
            .map(|i| Member::new(&format!("Member {}", i)).unwrap())
            .collect()
    }

    fn sizes(groups: &[Group]) -> Vec<usize> {
        groups.iter().map(|g| g.len()).collect()
    }

    #[test]
    fn test_group_sizes_small() {
        assert_eq!(group_sizes(0), Vec::<usize>::new());
        assert_eq!(group_sizes(1), vec![1]);
        assert_eq!(group_sizes(2), vec![2]);
        assert_eq!(group_sizes(3), vec![3]);
        assert_eq!(group_sizes(4), vec![2, 2]);
        assert_eq!(group_sizes(5), vec![3, 2]);
    }

    #[test]
    fn test_group_sizes_mod_three() {
        assert_eq!(group_sizes(6), vec![3, 3]);
        assert_eq!(group_sizes(7), vec![2, 2, 3]);
        assert_eq!(group_sizes(8), vec![2, 3, 3]);
        assert_eq!(group_sizes(9), vec![3, 3, 3]);
        assert_eq!(group_sizes(10), vec![2, 2, 3, 3]);
        assert_eq!(group_sizes(11), vec![2, 3, 3, 3]);
    }

    #[test]
    fn test_group_sizes_properties() {
        for n in 0..200 {
            let plan = group_sizes(n);
            assert_eq!(plan.iter().sum::<usize>(), n, "n = {}", n);

            if n <= 3 {
                assert!(plan.iter().all(|&s| (1..=3).contains(&s)), "n = {}", n);
            } else {
                assert!(plan.iter().all(|&s| s == 2 || s == 3), "n = {}", n);
                assert!(plan.iter().filter(|&&s| s == 2).count() <= 2, "n = {}", n);
            }
        }
    }

    #[test]
    fn test_generate_empty() {
        let mut rng = ChaCha20Rng::from_seed([1; 32]);
        assert!(generate_groups(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_generate_partitions_input() {
        let mut rng = ChaCha20Rng::from_seed([1; 32]);

        for n in 0..40 {
            let input = members(n);
            let groups = generate_groups(&input, &mut rng);

            assert_eq!(sizes(&groups), group_sizes(n));

            let flat: Vec<&str> = groups.iter().flatten().map(|m| m.id.as_str()).collect();
            let unique: HashSet<&str> = flat.iter().copied().collect();
            let expected: HashSet<&str> = input.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(flat.len(), n);
            assert_eq!(unique, expected);
        }
    }

    #[test]
    fn test_seven_members_always_two_two_three() {
        let input = members(7);
        let mut rng = ChaCha20Rng::from_seed([7; 32]);

        for _ in 0..100 {
            let groups = generate_groups(&input, &mut rng);
            assert_eq!(sizes(&groups), vec![2, 2, 3]);
        }
    }

    #[test]
    fn test_generation_does_not_touch_input_order() {
        let input = members(9);
        let before = input.clone();
        let mut rng = ChaCha20Rng::from_seed([3; 32]);

        generate_groups(&input, &mut rng);
        assert_eq!(input, before);
    }

    #[test]
    fn test_same_seed_same_groups() {
        let input = members(10);
        let first = generate_groups(&input, &mut ChaCha20Rng::from_seed([9; 32]));
        let second = generate_groups(&input, &mut ChaCha20Rng::from_seed([9; 32]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        // 3! = 6 orderings; each should turn up over enough draws
        let mut rng = ChaCha20Rng::from_seed([5; 32]);
        let mut counts = std::collections::HashMap::new();

        for _ in 0..6000 {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0usize) += 1;
        }

        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((800..1200).contains(count), "skewed count {}", count);
        }
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = ChaCha20Rng::from_seed([2; 32]);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);

        let mut single = [42];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, [42]);
    }

    #[test]
    fn test_generate_both_rosters() {
        let mut rng = ChaCha20Rng::from_seed([4; 32]);
        let result = generate(&members(5), &[], &mut rng);

        assert_eq!(sizes(result.groups(RosterId::A)), vec![3, 2]);
        assert!(result.groups(RosterId::B).is_empty());
    }

    #[test]
    fn test_format_groups_empty() {
        let text = format_groups("Team B", &[]);
        assert!(text.contains("Team B Results"));
        assert!(text.contains(EMPTY_GROUPS_MESSAGE));
    }

    #[test]
    fn test_format_groups_numbered() {
        let mut rng = ChaCha20Rng::from_seed([6; 32]);
        let groups = generate_groups(&members(4), &mut rng);
        let text = format_groups("Team A", &groups);

        assert!(text.contains("Group 1"));
        assert!(text.contains("Group 2"));
        assert!(!text.contains("Group 3"));
        assert_eq!(text.matches("    - ").count(), 4);
    }
}
