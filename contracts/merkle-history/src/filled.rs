use soroban_sdk::{Vec, U256};

use crate::{TreeError, ZeroTable};

/// Left node waiting for its right sibling, one slot per level below the root.
///
/// A slot starts out as the empty subtree for its level and is overwritten
/// each time an insertion passes through that level as a left child.
#[derive(Clone, Debug)]
pub struct FilledSubtrees {
    nodes: Vec<U256>,
}

impl FilledSubtrees {
    pub fn new(zeros: &ZeroTable) -> Self {
        let mut nodes = zeros.to_vec();
        // the root level never waits for a sibling
        nodes.pop_back();
        Self { nodes }
    }

    pub fn from_vec(nodes: Vec<U256>) -> Self {
        Self { nodes }
    }

    pub fn get(&self, level: u32) -> Result<U256, TreeError> {
        self.nodes.get(level).ok_or(TreeError::LevelOutOfRange)
    }

    pub fn set(&mut self, level: u32, value: U256) -> Result<(), TreeError> {
        if level >= self.nodes.len() {
            return Err(TreeError::LevelOutOfRange);
        }
        self.nodes.set(level, value);
        Ok(())
    }

    pub fn len(&self) -> u32 {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_vec(&self) -> Vec<U256> {
        self.nodes.clone()
    }
}
