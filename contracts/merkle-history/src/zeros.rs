use soroban_sdk::{Env, Vec, U256};

use crate::{HashProvider, TreeError};

/// Hash of an all-empty subtree at every level.
///
/// `zeros[0]` is the empty leaf and `zeros[l] = hash(zeros[l-1], zeros[l-1])`,
/// so `zeros[levels]` is the root of a tree with no leaves inserted.
#[derive(Clone, Debug)]
pub struct ZeroTable {
    zeros: Vec<U256>,
}

impl ZeroTable {
    pub fn build<H: HashProvider>(env: &Env, levels: u32, zero_leaf: U256, hasher: &H) -> Self {
        let mut zeros = Vec::new(env);
        let mut current = zero_leaf;
        zeros.push_back(current.clone());

        for _ in 0..levels {
            current = hasher.hash(&current, &current);
            zeros.push_back(current.clone());
        }

        Self { zeros }
    }

    /// Rebuild from a stored table. Needs at least the leaf level.
    pub fn from_vec(zeros: Vec<U256>) -> Result<Self, TreeError> {
        if zeros.is_empty() {
            return Err(TreeError::CorruptState);
        }
        Ok(Self { zeros })
    }

    pub fn at(&self, level: u32) -> Result<U256, TreeError> {
        self.zeros.get(level).ok_or(TreeError::LevelOutOfRange)
    }

    pub fn levels(&self) -> u32 {
        self.zeros.len() - 1
    }

    /// Root of the empty tree.
    pub fn empty_root(&self) -> U256 {
        // from_vec and build both guarantee a non-empty table
        self.zeros.get_unchecked(self.levels())
    }

    pub fn to_vec(&self) -> Vec<U256> {
        self.zeros.clone()
    }
}
