//! # Merkle Tree With History
//!
//! Append-only, fixed-depth incremental Merkle tree that keeps a bounded
//! window of recent roots. Shared by the tree contract and the hasher
//! contract; holds no storage of its own.
//!
//! ## Algorithm
//! Leaves fill the tree strictly left to right, so at most one node per level
//! is ever a left child waiting for its sibling. Caching that node per level
//! (`FilledSubtrees`) plus the hash of an empty subtree per level (`ZeroTable`)
//! is enough to compute the new root in `levels` hash calls.
//!
//! ## Root history
//! Proofs are generated off-chain against whatever root the prover saw. The
//! last [`ROOT_HISTORY_SIZE`] roots stay valid so a proof survives a bounded
//! number of concurrent insertions. The zero value is never a known root.
//!
//! ## Field elements
//! Leaves and roots are `U256` values reduced modulo the hash function's field.
//! For BN254 Poseidon that is the scalar field order
//! r = 21888242871839275222246405745257275088548364400416034343698204186575808495617

#![no_std]

use soroban_sdk::{contracterror, Bytes, Env, U256};

pub mod encoding;
pub mod filled;
pub mod hasher;
pub mod history;
pub mod tree;
pub mod zeros;

pub use encoding::{from_fixed_bytes, to_fixed_bytes, FIELD_BYTES};
pub use filled::FilledSubtrees;
pub use hasher::{Bn254Poseidon, HashProvider};
pub use history::RootHistory;
pub use tree::{IncrementalTree, TreeParams, TreeState};
pub use zeros::ZeroTable;

/// Largest supported depth. Keeps `capacity = 2^levels` within a `u32`.
pub const MAX_LEVELS: u32 = 31;

/// Number of recent roots accepted by `is_known_root`.
pub const ROOT_HISTORY_SIZE: u32 = 30;

/// Default empty leaf: keccak256("tornado") mod r, big-endian.
/// 21663839004416932945382355908790599225266501822907911457504978515578255421292
pub const ZERO_VALUE: [u8; 32] = [
    0x2f, 0xe5, 0x4c, 0x60, 0xd3, 0xac, 0xab, 0xf3, 0x34, 0x3a, 0x35, 0xb6, 0xeb, 0xa1, 0x5d, 0xb4,
    0x82, 0x1b, 0x34, 0x0f, 0x76, 0xe7, 0x41, 0xe2, 0x24, 0x96, 0x85, 0xed, 0x48, 0x99, 0xaf, 0x6c,
];

/// BN254 scalar field modulus (Fr) in big-endian bytes
pub const BN254_FR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TreeError {
    /// Depth is zero or above `MAX_LEVELS`
    InvalidHeight = 1,
    /// Every leaf slot is taken; terminal for this tree
    TreeFull = 2,
    /// No root was ever recorded
    EmptyHistory = 3,
    /// Value is not below the hasher's field size
    LeafOutOfField = 4,
    /// Root history must hold at least one root
    InvalidHistorySize = 5,
    /// Level or history slot past the end of its table
    LevelOutOfRange = 6,
    /// Contract state has not been written yet
    NotInitialized = 7,
    /// Stored state does not describe a valid tree
    CorruptState = 8,
}

/// The default empty-leaf value as a field element.
pub fn zero_value(env: &Env) -> U256 {
    U256::from_be_bytes(env, &Bytes::from_array(env, &ZERO_VALUE))
}

/// BN254 scalar field order r.
pub fn bn254_field_size(env: &Env) -> U256 {
    U256::from_be_bytes(env, &Bytes::from_array(env, &BN254_FR_MODULUS))
}

/// The reserved value of a never-written root slot.
pub(crate) fn sentinel(env: &Env) -> U256 {
    U256::from_u32(env, 0)
}
