use soroban_sdk::{Env, Vec, U256};

use crate::{sentinel, TreeError};

/// Fixed-size ring buffer of recent roots.
///
/// `cursor` points at the most recently written slot. Unwritten slots hold the
/// zero sentinel, which `contains` never reports as known.
#[derive(Clone, Debug)]
pub struct RootHistory {
    roots: Vec<U256>,
    cursor: u32,
    recorded: u32,
}

impl RootHistory {
    /// Empty history of `size` slots.
    pub fn new(env: &Env, size: u32) -> Result<Self, TreeError> {
        if size == 0 {
            return Err(TreeError::InvalidHistorySize);
        }
        let mut roots = Vec::new(env);
        for _ in 0..size {
            roots.push_back(sentinel(env));
        }
        Ok(Self {
            roots,
            cursor: 0,
            recorded: 0,
        })
    }

    /// History whose slot 0 already holds `root`, cursor on slot 0.
    pub fn seeded(env: &Env, size: u32, root: U256) -> Result<Self, TreeError> {
        let mut history = Self::new(env, size)?;
        history.roots.set(0, root);
        history.recorded = 1;
        Ok(history)
    }

    pub fn from_parts(roots: Vec<U256>, cursor: u32, recorded: u32) -> Result<Self, TreeError> {
        if roots.is_empty() || cursor >= roots.len() || recorded > roots.len() {
            return Err(TreeError::CorruptState);
        }
        Ok(Self {
            roots,
            cursor,
            recorded,
        })
    }

    pub fn record(&mut self, root: U256) {
        let next = (self.cursor + 1) % self.roots.len();
        self.roots.set(next, root);
        self.cursor = next;
        if self.recorded < self.roots.len() {
            self.recorded += 1;
        }
    }

    pub fn current(&self) -> Result<U256, TreeError> {
        if self.recorded == 0 {
            return Err(TreeError::EmptyHistory);
        }
        self.slot(self.cursor)
    }

    pub fn contains(&self, candidate: &U256) -> bool {
        if candidate == &sentinel(self.roots.env()) {
            return false;
        }
        self.roots.iter().any(|root| &root == candidate)
    }

    pub fn slot(&self, index: u32) -> Result<U256, TreeError> {
        self.roots.get(index).ok_or(TreeError::LevelOutOfRange)
    }

    pub fn size(&self) -> u32 {
        self.roots.len()
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Number of slots holding a recorded root, saturating at `size`.
    pub fn recorded(&self) -> u32 {
        self.recorded
    }

    pub fn to_vec(&self) -> Vec<U256> {
        self.roots.clone()
    }
}
