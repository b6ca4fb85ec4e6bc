//! # Merkle Tree With History Contract
//!
//! On-chain commitment accumulator for shielded claims. The owner (normally
//! the contract holding the notes) appends commitments; anyone can read the
//! current root and check whether a proof's root is still within the history
//! window.
//!
//! The hash function lives in a separate contract whose address is fixed at
//! deployment, so the tree never changes hashing rules after its first root.

#![no_std]
use merkle_history::{
    from_fixed_bytes, to_fixed_bytes, HashProvider, IncrementalTree, TreeError, TreeState,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, Address, BytesN, Env, U256,
};

mod hasher;

pub use hasher::ContractHasher;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,     // -> Address allowed to insert
    Hasher,    // -> hasher contract Address
    FieldSize, // -> hasher field size, cached at deployment
    State,     // -> TreeState
}

// Typed Events
#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct TreeInitEvent {
    pub levels: u32,
    pub root_history_size: u32,
    pub empty_root: U256,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct LeafInsertedEvent {
    #[topic]
    pub index: u32,
    pub leaf: U256,
    pub new_root: U256,
}

#[contract]
pub struct MerkleTreeWithHistory;

#[contractimpl]
impl MerkleTreeWithHistory {
    /// Constructor: build the empty tree of depth `levels` hashed by `hasher`
    pub fn __constructor(env: Env, owner: Address, levels: u32, hasher: Address) {
        let provider = ContractHasher::connect(&env, hasher.clone());
        let field_size = provider.field_size();
        let tree = IncrementalTree::new(&env, levels, provider)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        let empty_root = tree
            .current_root()
            .unwrap_or_else(|err| panic_with_error!(&env, err));

        let storage = env.storage().instance();
        storage.set(&DataKey::Owner, &owner);
        storage.set(&DataKey::Hasher, &hasher);
        storage.set(&DataKey::FieldSize, &field_size);
        storage.set(&DataKey::State, &tree.to_state());

        TreeInitEvent {
            levels,
            root_history_size: tree.root_history_size(),
            empty_root,
        }
        .publish(&env);
    }

    /// Append a commitment; returns its leaf index
    pub fn insert(env: Env, leaf: U256) -> Result<u32, TreeError> {
        Self::owner(env.clone())?.require_auth();

        let mut tree = Self::load(&env)?;
        let index = tree.insert(leaf.clone())?;
        let new_root = tree.current_root()?;
        env.storage().instance().set(&DataKey::State, &tree.to_state());

        LeafInsertedEvent {
            index,
            leaf,
            new_root,
        }
        .publish(&env);

        Ok(index)
    }

    /// Insert a 32-byte big-endian commitment
    pub fn insert_bytes(env: Env, leaf: BytesN<32>) -> Result<u32, TreeError> {
        let value = from_fixed_bytes(&env, &leaf);
        Self::insert(env, value)
    }

    /// Most recent root
    pub fn get_last_root(env: Env) -> Result<U256, TreeError> {
        Self::load(&env)?.current_root()
    }

    /// Most recent root as 32 big-endian bytes
    pub fn last_root_bytes(env: Env) -> Result<BytesN<32>, TreeError> {
        let root = Self::get_last_root(env.clone())?;
        Ok(to_fixed_bytes(&env, &root))
    }

    /// Check if a root is within the history window. Zero is never known.
    pub fn is_known_root(env: Env, root: U256) -> bool {
        match Self::load(&env) {
            Ok(tree) => tree.is_known_root(&root),
            Err(_) => false,
        }
    }

    pub fn levels(env: Env) -> Result<u32, TreeError> {
        Ok(Self::state(&env)?.levels)
    }

    pub fn capacity(env: Env) -> Result<u32, TreeError> {
        Ok(Self::load(&env)?.capacity())
    }

    pub fn next_index(env: Env) -> Result<u32, TreeError> {
        Ok(Self::state(&env)?.next_index)
    }

    /// Empty-leaf value the tree was built with
    pub fn zero_value(env: Env) -> Result<U256, TreeError> {
        Self::load(&env)?.zero_value_at_level(0)
    }

    /// Empty-subtree hash at `level` (0 = leaf, `levels` = empty root)
    pub fn zeros(env: Env, level: u32) -> Result<U256, TreeError> {
        Self::load(&env)?.zero_value_at_level(level)
    }

    /// Pending left sibling at `level`
    pub fn filled_subtrees(env: Env, level: u32) -> Result<U256, TreeError> {
        Self::load(&env)?.filled_subtree_at_level(level)
    }

    /// Raw history slot
    pub fn roots(env: Env, slot: u32) -> Result<U256, TreeError> {
        Self::load(&env)?.root_at(slot)
    }

    pub fn current_root_index(env: Env) -> Result<u32, TreeError> {
        Ok(Self::state(&env)?.current_root_index)
    }

    pub fn root_history_size(env: Env) -> Result<u32, TreeError> {
        Ok(Self::state(&env)?.roots.len())
    }

    pub fn hasher(env: Env) -> Result<Address, TreeError> {
        env.storage()
            .instance()
            .get(&DataKey::Hasher)
            .ok_or(TreeError::NotInitialized)
    }

    pub fn owner(env: Env) -> Result<Address, TreeError> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(TreeError::NotInitialized)
    }

    // Internal: stored snapshot
    fn state(env: &Env) -> Result<TreeState, TreeError> {
        env.storage()
            .instance()
            .get(&DataKey::State)
            .ok_or(TreeError::NotInitialized)
    }

    // Internal: resume the tree with the stored hasher wiring
    fn load(env: &Env) -> Result<IncrementalTree<ContractHasher>, TreeError> {
        let hasher = Self::hasher(env.clone())?;
        let field_size: U256 = env
            .storage()
            .instance()
            .get(&DataKey::FieldSize)
            .ok_or(TreeError::NotInitialized)?;
        let provider = ContractHasher::new(env, hasher, field_size);
        IncrementalTree::from_state(env, Self::state(env)?, provider)
    }
}
