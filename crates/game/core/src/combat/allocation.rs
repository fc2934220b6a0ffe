//! Greedy, weakest-first distribution of attack points over enemies.
//!
//! Regular enemies are taken in ascending effective armor, each consuming
//! exactly its armor. Bosses come last and absorb everything still available
//! once their armor is met. Nothing is spent on a target it cannot beat.

use crate::state::EnemyId;

/// What the allocator needs to know about one enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Target {
    pub id: EnemyId,
    /// Effective armor, already adjusted for effects and resistances.
    pub armor: u32,
    pub boss: bool,
    /// Only the siege pool may be spent on it.
    pub fortified: bool,
}

/// Attack points available for allocation.
///
/// In the ranged phase `ranged` and `siege` are the two pools. A melee attack
/// is a single pool placed in `siege`, which every target accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pools {
    pub ranged: u32,
    pub siege: u32,
}

impl Pools {
    pub fn melee(attack: u32) -> Self {
        Self {
            ranged: 0,
            siege: attack,
        }
    }

    fn available(&self, fortified: bool) -> u32 {
        if fortified {
            self.siege
        } else {
            self.ranged + self.siege
        }
    }

    /// Spends ranged points first, then siege.
    fn spend(&mut self, amount: u32, fortified: bool) {
        let from_ranged = if fortified { 0 } else { amount.min(self.ranged) };
        self.ranged -= from_ranged;
        self.siege -= amount - from_ranged;
    }

    pub fn total(&self) -> u32 {
        self.ranged + self.siege
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Hit {
    /// A regular enemy whose armor was met.
    Defeat { id: EnemyId, spent: u32 },
    /// A boss whose armor was met; `damage` comes off its health.
    BossDamage { id: EnemyId, damage: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Allocation {
    pub hits: Vec<Hit>,
    pub left: Pools,
}

pub(crate) fn allocate(mut targets: Vec<Target>, mut pools: Pools) -> Allocation {
    targets.sort_by_key(|target| (target.boss, target.armor));

    let mut hits = Vec::new();
    for target in targets {
        let available = pools.available(target.fortified);
        if available == 0 || available < target.armor {
            continue;
        }
        if target.boss {
            pools.spend(available, target.fortified);
            hits.push(Hit::BossDamage {
                id: target.id,
                damage: available,
            });
        } else {
            pools.spend(target.armor, target.fortified);
            hits.push(Hit::Defeat {
                id: target.id,
                spent: target.armor,
            });
        }
    }

    Allocation { hits, left: pools }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular(id: u32, armor: u32, fortified: bool) -> Target {
        Target {
            id: EnemyId(id),
            armor,
            boss: false,
            fortified,
        }
    }

    #[test]
    fn weakest_enemies_fall_first() {
        let targets = vec![regular(1, 5, false), regular(2, 3, false), regular(3, 4, false)];

        let allocation = allocate(targets, Pools::melee(8));

        assert_eq!(
            allocation.hits,
            vec![
                Hit::Defeat {
                    id: EnemyId(2),
                    spent: 3
                },
                Hit::Defeat {
                    id: EnemyId(3),
                    spent: 4
                },
            ]
        );
        assert_eq!(allocation.left.total(), 1);
    }

    #[test]
    fn fortified_only_accepts_siege() {
        let targets = vec![regular(1, 3, true)];

        let ranged_only = allocate(
            targets.clone(),
            Pools {
                ranged: 10,
                siege: 0,
            },
        );
        assert!(ranged_only.hits.is_empty());
        assert_eq!(ranged_only.left.ranged, 10);

        let with_siege = allocate(
            targets,
            Pools {
                ranged: 10,
                siege: 3,
            },
        );
        assert_eq!(with_siege.hits.len(), 1);
        assert_eq!(
            with_siege.left,
            Pools {
                ranged: 10,
                siege: 0
            }
        );
    }

    #[test]
    fn ranged_spent_before_siege() {
        let allocation = allocate(
            vec![regular(1, 4, false), regular(2, 2, true)],
            Pools {
                ranged: 3,
                siege: 3,
            },
        );

        // Fortified armor 2 sorts first and takes siege 2; the other takes
        // ranged 3 plus the last siege point.
        assert_eq!(allocation.hits.len(), 2);
        assert_eq!(allocation.left.total(), 0);
    }

    #[test]
    fn boss_absorbs_leftover_after_regulars() {
        let boss = Target {
            id: EnemyId(9),
            armor: 2,
            boss: true,
            fortified: false,
        };
        let allocation = allocate(vec![boss, regular(1, 3, false)], Pools::melee(10));

        assert_eq!(
            allocation.hits,
            vec![
                Hit::Defeat {
                    id: EnemyId(1),
                    spent: 3
                },
                Hit::BossDamage {
                    id: EnemyId(9),
                    damage: 7
                },
            ]
        );
        assert_eq!(allocation.left.total(), 0);
    }
}
