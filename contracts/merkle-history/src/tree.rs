use soroban_sdk::{contracttype, Env, Vec, U256};

use crate::{
    zero_value, FilledSubtrees, HashProvider, RootHistory, TreeError, ZeroTable, MAX_LEVELS,
    ROOT_HISTORY_SIZE,
};

/// Construction parameters for [`IncrementalTree`].
#[derive(Clone, Debug)]
pub struct TreeParams {
    pub levels: u32,
    /// Empty leaf; `ZERO_VALUE` when unset
    pub zero_leaf: Option<U256>,
    pub root_history_size: u32,
}

impl TreeParams {
    pub fn new(levels: u32) -> Self {
        Self {
            levels,
            zero_leaf: None,
            root_history_size: ROOT_HISTORY_SIZE,
        }
    }

    pub fn with_zero_leaf(mut self, zero_leaf: U256) -> Self {
        self.zero_leaf = Some(zero_leaf);
        self
    }

    pub fn with_root_history_size(mut self, size: u32) -> Self {
        self.root_history_size = size;
        self
    }
}

/// Everything needed to resume a tree. Leaves are not retained.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeState {
    pub levels: u32,
    pub next_index: u32,
    pub zeros: Vec<U256>,
    pub filled_subtrees: Vec<U256>,
    pub roots: Vec<U256>,
    pub current_root_index: u32,
    pub roots_recorded: u32,
}

/// Append-only Merkle tree that remembers its last few roots.
///
/// All mutation goes through [`IncrementalTree::insert`], which validates its
/// input before touching any state.
pub struct IncrementalTree<H: HashProvider> {
    env: Env,
    hasher: H,
    levels: u32,
    next_index: u32,
    zeros: ZeroTable,
    filled: FilledSubtrees,
    history: RootHistory,
}

impl<H: HashProvider> IncrementalTree<H> {
    pub fn new(env: &Env, levels: u32, hasher: H) -> Result<Self, TreeError> {
        Self::with_params(env, TreeParams::new(levels), hasher)
    }

    pub fn with_params(env: &Env, params: TreeParams, hasher: H) -> Result<Self, TreeError> {
        if params.levels == 0 || params.levels > MAX_LEVELS {
            return Err(TreeError::InvalidHeight);
        }
        if params.root_history_size == 0 {
            return Err(TreeError::InvalidHistorySize);
        }

        let zero_leaf = params.zero_leaf.unwrap_or_else(|| zero_value(env));
        if zero_leaf >= hasher.field_size() {
            return Err(TreeError::LeafOutOfField);
        }

        let zeros = ZeroTable::build(env, params.levels, zero_leaf, &hasher);
        let filled = FilledSubtrees::new(&zeros);
        // slot 0 starts out as the empty-tree root, so a fresh tree has a current root
        let history = RootHistory::seeded(env, params.root_history_size, zeros.empty_root())?;

        Ok(Self {
            env: env.clone(),
            hasher,
            levels: params.levels,
            next_index: 0,
            zeros,
            filled,
            history,
        })
    }

    /// Resume from a snapshot taken with [`IncrementalTree::to_state`].
    pub fn from_state(env: &Env, state: TreeState, hasher: H) -> Result<Self, TreeError> {
        if state.levels == 0 || state.levels > MAX_LEVELS {
            return Err(TreeError::CorruptState);
        }
        let zeros = ZeroTable::from_vec(state.zeros)?;
        if zeros.levels() != state.levels
            || state.filled_subtrees.len() != state.levels
            || state.next_index > (1u32 << state.levels)
        {
            return Err(TreeError::CorruptState);
        }
        let filled = FilledSubtrees::from_vec(state.filled_subtrees);
        let history =
            RootHistory::from_parts(state.roots, state.current_root_index, state.roots_recorded)?;

        Ok(Self {
            env: env.clone(),
            hasher,
            levels: state.levels,
            next_index: state.next_index,
            zeros,
            filled,
            history,
        })
    }

    pub fn to_state(&self) -> TreeState {
        TreeState {
            levels: self.levels,
            next_index: self.next_index,
            zeros: self.zeros.to_vec(),
            filled_subtrees: self.filled.to_vec(),
            roots: self.history.to_vec(),
            current_root_index: self.history.cursor(),
            roots_recorded: self.history.recorded(),
        }
    }

    /// Append `leaf` at the next free index and return that index.
    pub fn insert(&mut self, leaf: U256) -> Result<u32, TreeError> {
        if self.is_full() {
            return Err(TreeError::TreeFull);
        }
        if leaf >= self.hasher.field_size() {
            return Err(TreeError::LeafOutOfField);
        }

        let index = self.next_index;
        let mut filled = self.filled.clone();
        let mut current_index = index;
        let mut current_hash = leaf;

        for level in 0..self.levels {
            if current_index % 2 == 0 {
                // Left child: becomes the pending sibling, right side still empty
                filled.set(level, current_hash.clone())?;
                let zero = self.zeros.at(level)?;
                current_hash = self.hasher.hash(&current_hash, &zero);
            } else {
                // Right child: pair with the cached left sibling
                let left = filled.get(level)?;
                current_hash = self.hasher.hash(&left, &current_hash);
            }
            current_index /= 2;
        }

        self.filled = filled;
        self.history.record(current_hash);
        self.next_index = index + 1;

        Ok(index)
    }

    pub fn current_root(&self) -> Result<U256, TreeError> {
        self.history.current()
    }

    pub fn is_known_root(&self, root: &U256) -> bool {
        self.history.contains(root)
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn capacity(&self) -> u32 {
        1u32 << self.levels
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn is_full(&self) -> bool {
        self.next_index == self.capacity()
    }

    pub fn zero_value_at_level(&self, level: u32) -> Result<U256, TreeError> {
        self.zeros.at(level)
    }

    pub fn filled_subtree_at_level(&self, level: u32) -> Result<U256, TreeError> {
        self.filled.get(level)
    }

    pub fn root_history_size(&self) -> u32 {
        self.history.size()
    }

    pub fn current_root_index(&self) -> u32 {
        self.history.cursor()
    }

    pub fn root_at(&self, slot: u32) -> Result<U256, TreeError> {
        self.history.slot(slot)
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn env(&self) -> &Env {
        &self.env
    }
}
