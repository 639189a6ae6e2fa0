use std::collections::HashSet;
use std::fmt;

use avl_strmap::AvlTree;
use avl_strmap_util::{Fuzzer, KeyStream};
use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::error::HarnessError;

/// Candidates drawn per fresh key before giving up on a saturated key space.
const MAX_KEY_ATTEMPTS: usize = 10_000;

/// Outcome of a fuzz run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessReport {
    pub seed: u64,
    pub inserts: usize,
    pub deletes: usize,
    pub heights_ok: bool,
    pub balanced_ok: bool,
    pub ordered_ok: bool,
    /// Walked node count and tracked length both match the tracked keys.
    pub count_ok: bool,
    /// Tracked keys whose lookup returned the value last written for them.
    pub correct: usize,
    pub tracked: usize,
}

impl HarnessReport {
    pub fn passed(&self) -> bool {
        self.heights_ok
            && self.balanced_ok
            && self.ordered_ok
            && self.count_ok
            && self.correct == self.tracked
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

impl fmt::Display for HarnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed: {:#x}", self.seed)?;
        writeln!(f, "Operations: {} inserts, {} deletes", self.inserts, self.deletes)?;
        writeln!(f, "Height label correctness: {}", verdict(self.heights_ok))?;
        writeln!(f, "AVL balance correctness: {}", verdict(self.balanced_ok))?;
        writeln!(f, "BST correctness: {}", verdict(self.ordered_ok))?;
        writeln!(f, "Node count: {}", verdict(self.count_ok))?;
        write!(f, "Value correctness: {}/{}", self.correct, self.tracked)
    }
}

/// Fuzz state: the tree under test plus the keys it should hold.
///
/// `keys[i]` maps to value `i`; a deleted slot is refilled by the next
/// insert, so every tracked key is expected to be live.
pub struct Harness {
    config: HarnessConfig,
    fuzzer: Fuzzer,
    stream: KeyStream,
    tree: AvlTree<u64>,
    keys: Vec<String>,
    live: HashSet<String>,
    inserts: usize,
    deletes: usize,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        Ok(Self {
            fuzzer: Fuzzer::new(Some(config.seed)),
            stream: KeyStream::new(config.key_size),
            tree: AvlTree::with_config(config.tree),
            keys: Vec::with_capacity(config.population + config.operations),
            live: HashSet::new(),
            inserts: 0,
            deletes: 0,
            config,
        })
    }

    pub fn tree(&self) -> &AvlTree<u64> {
        &self.tree
    }

    /// Draws keys until one is not currently stored.
    fn fresh_key(&mut self) -> Result<String, HarnessError> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = self.stream.advance(&mut self.fuzzer);
            if !self.live.contains(&key) {
                return Ok(key);
            }
        }
        Err(HarnessError::KeySpaceExhausted {
            width: self.stream.width(),
            attempts: MAX_KEY_ATTEMPTS,
        })
    }

    fn check(&self) -> Result<(), HarnessError> {
        if self.config.check_every_op {
            self.tree
                .check_invariants()
                .map_err(|violation| HarnessError::Invariant {
                    op: self.inserts + self.deletes,
                    violation,
                })?;
        }
        Ok(())
    }

    fn insert_at(&mut self, slot: usize) -> Result<(), HarnessError> {
        let key = self.fresh_key()?;
        self.tree.insert(&key, slot as u64)?;
        self.inserts += 1;
        debug!(%key, slot, "inserted");
        self.live.insert(key.clone());
        if slot == self.keys.len() {
            self.keys.push(key);
        } else {
            self.keys[slot] = key;
        }
        self.check()
    }

    fn delete_at(&mut self, slot: usize) -> Result<(), HarnessError> {
        let key = &self.keys[slot];
        let found = self.tree.remove(key)?;
        if found != Some(slot as u64) {
            return Err(HarnessError::DeleteMismatch {
                op: self.inserts + self.deletes,
                key: key.clone(),
                expected: slot as u64,
                found,
            });
        }
        self.live.remove(key);
        self.deletes += 1;
        debug!(%key, slot, "deleted");
        self.check()
    }

    pub fn populate(&mut self) -> Result<(), HarnessError> {
        info!(nodes = self.config.population, "populating tree");
        for _ in 0..self.config.population {
            self.insert_at(self.keys.len())?;
        }
        Ok(())
    }

    /// Each round deletes a random tracked key with the configured
    /// probability, then inserts a fresh key into the freed slot (or a new
    /// slot when nothing was deleted).
    pub fn mix(&mut self) -> Result<(), HarnessError> {
        info!(rounds = self.config.operations, "performing random deletes/inserts");
        for _ in 0..self.config.operations {
            let mut slot = self.keys.len();
            if !self.keys.is_empty() && self.fuzzer.random_bool(self.config.delete_probability) {
                slot = self.fuzzer.random_index(self.keys.len());
                self.delete_at(slot)?;
            }
            self.insert_at(slot)?;
        }
        Ok(())
    }

    pub fn report(&self) -> Result<HarnessReport, HarnessError> {
        let mut correct = 0;
        for (i, key) in self.keys.iter().enumerate() {
            if self.tree.get(key)? == Some(&(i as u64)) {
                correct += 1;
            }
        }
        let tracked = self.keys.len();
        Ok(HarnessReport {
            seed: self.config.seed,
            inserts: self.inserts,
            deletes: self.deletes,
            heights_ok: self.tree.heights_are_consistent(),
            balanced_ok: self.tree.is_height_balanced(),
            ordered_ok: self.tree.is_ordered_correctly(),
            count_ok: self.tree.count_nodes() == tracked && self.tree.len() == tracked,
            correct,
            tracked,
        })
    }
}

/// Populates, mixes and verifies a tree as described by `config`.
pub fn run(config: &HarnessConfig) -> Result<HarnessReport, HarnessError> {
    let mut harness = Harness::new(config.clone())?;
    harness.populate()?;
    harness.mix()?;
    let report = harness.report()?;
    info!(passed = report.passed(), "verification finished");
    Ok(report)
}
