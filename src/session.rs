// 🧭 Session - the state the front ends drive
//
// Rosters + the open generation result (if any) + the RNG.
// Each method is one synchronous transition.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::grouping::{generate, GenerationResult};
use crate::roster::{RosterId, RosterStore};

pub struct Session {
    store: RosterStore,
    result: Option<GenerationResult>,
    rng: StdRng,
}

impl Session {
    /// Empty session with an OS-seeded RNG
    pub fn new() -> Self {
        Self::with_store(RosterStore::new(), None)
    }

    /// Empty session honoring `[shuffle] seed`
    pub fn from_config(config: &Config) -> Self {
        Self::with_store(RosterStore::new(), config.shuffle.seed)
    }

    pub fn with_store(store: RosterStore, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!(seed, "using fixed shuffle seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Self {
            store,
            result: None,
            rng,
        }
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Mutable access for bulk loading (CSV import)
    pub fn store_mut(&mut self) -> &mut RosterStore {
        &mut self.store
    }

    pub fn add(&mut self, roster: RosterId, raw_name: &str) -> Option<String> {
        self.store.add(roster, raw_name)
    }

    pub fn remove(&mut self, roster: RosterId, member_id: &str) -> bool {
        self.store.remove(roster, member_id)
    }

    pub fn move_member(&mut self, source: RosterId, dest: RosterId, member_id: &str) -> bool {
        self.store.move_member(source, dest, member_id)
    }

    /// Group both rosters and keep the result open, replacing any previous one
    pub fn generate(&mut self) -> &GenerationResult {
        let result = generate(
            self.store.roster(RosterId::A).members(),
            self.store.roster(RosterId::B).members(),
            &mut self.rng,
        );
        self.result.insert(result)
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Discard the open result; rosters are untouched
    pub fn close_result(&mut self) -> bool {
        let was_open = self.result.take().is_some();
        if was_open {
            debug!("generation result closed");
        }
        was_open
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Session {
        Session::with_store(RosterStore::new(), Some(11))
    }

    #[test]
    fn test_generate_opens_result() {
        let mut session = seeded();
        for name in ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay", "Gus"] {
            session.add(RosterId::A, name);
        }
        session.add(RosterId::B, "Hal");

        let result = session.generate();
        assert_eq!(result.groups_a.len(), 3);
        assert_eq!(result.groups_b.len(), 1);
        assert!(session.result().is_some());
    }

    #[test]
    fn test_close_result_keeps_rosters() {
        let mut session = seeded();
        session.add(RosterId::A, "Ann");
        session.add(RosterId::B, "Ben");
        session.generate();

        assert!(session.close_result());
        assert!(session.result().is_none());
        assert!(!session.close_result());
        assert_eq!(session.store().total_len(), 2);
    }

    #[test]
    fn test_result_is_a_snapshot() {
        let mut session = seeded();
        let ann = session.add(RosterId::A, "Ann").unwrap();
        session.add(RosterId::A, "Ben");
        session.generate();

        session.move_member(RosterId::A, RosterId::B, &ann);

        let result = session.result().unwrap();
        assert_eq!(result.groups_a.iter().flatten().count(), 2);
        assert!(result.groups_b.is_empty());
    }

    #[test]
    fn test_generate_on_empty_rosters() {
        let mut session = seeded();
        let result = session.generate();
        assert!(result.groups_a.is_empty());
        assert!(result.groups_b.is_empty());
    }

    #[test]
    fn test_seed_from_config() {
        let mut config = Config::default();
        config.shuffle.seed = Some(99);

        let mut first = Session::from_config(&config);
        let mut second = Session::from_config(&config);
        for session in [&mut first, &mut second] {
            for name in ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"] {
                session.add(RosterId::A, name);
            }
        }

        let order = |s: &mut Session| -> Vec<String> {
            s.generate()
                .groups_a
                .iter()
                .flatten()
                .map(|m| m.name.clone())
                .collect()
        };
        assert_eq!(order(&mut first), order(&mut second));
    }
}
