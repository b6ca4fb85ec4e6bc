use soroban_sdk::{vec, Env, Symbol, U256};

use crate::bn254_field_size;

/// Two-to-one hash over a prime field.
///
/// Order matters: `hash(a, b)` and `hash(b, a)` are different nodes.
pub trait HashProvider {
    fn hash(&self, left: &U256, right: &U256) -> U256;

    /// Exclusive upper bound for values accepted as leaves.
    fn field_size(&self) -> U256;
}

impl<H: HashProvider + ?Sized> HashProvider for &H {
    fn hash(&self, left: &U256, right: &U256) -> U256 {
        (**self).hash(left, right)
    }

    fn field_size(&self) -> U256 {
        (**self).field_size()
    }
}

/// Poseidon over BN254 through the Soroban host function (circomlib parameters).
#[derive(Clone)]
pub struct Bn254Poseidon {
    env: Env,
}

impl Bn254Poseidon {
    pub fn new(env: &Env) -> Self {
        Self { env: env.clone() }
    }
}

impl HashProvider for Bn254Poseidon {
    fn hash(&self, left: &U256, right: &U256) -> U256 {
        let field = Symbol::new(&self.env, "BN254");
        let inputs = vec![&self.env, left.clone(), right.clone()];
        self.env.crypto().poseidon_hash(&inputs, field)
    }

    fn field_size(&self) -> U256 {
        bn254_field_size(&self.env)
    }
}
