//! # Poseidon Hasher Contract
//!
//! Standalone two-to-one hash for Merkle trees, deployed once and referenced
//! by address. Wraps the Soroban BN254 Poseidon host function with circomlib
//! parameters so on-chain roots match the proving circuits.

#![no_std]
use merkle_history::{bn254_field_size, Bn254Poseidon, HashProvider, TreeError};
use soroban_sdk::{contract, contractimpl, panic_with_error, Env, U256};

#[contract]
pub struct PoseidonHasher;

#[contractimpl]
impl PoseidonHasher {
    /// Poseidon(left, right). Both inputs must be reduced field elements.
    pub fn hash(env: Env, left: U256, right: U256) -> U256 {
        let field_size = bn254_field_size(&env);
        if left >= field_size || right >= field_size {
            panic_with_error!(&env, TreeError::LeafOutOfField);
        }
        Bn254Poseidon::new(&env).hash(&left, &right)
    }

    /// BN254 scalar field order r
    pub fn field_size(env: Env) -> U256 {
        bn254_field_size(&env)
    }
}
