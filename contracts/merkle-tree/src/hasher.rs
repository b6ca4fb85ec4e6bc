use merkle_history::HashProvider;
use soroban_sdk::{symbol_short, vec, Address, Env, IntoVal, Symbol, U256};

/// Hash capability backed by a deployed hasher contract.
///
/// The contract must expose `hash(left, right) -> U256` and
/// `field_size() -> U256`.
pub struct ContractHasher {
    env: Env,
    contract: Address,
    field_size: U256,
}

impl ContractHasher {
    /// Query the hasher once for its field size.
    pub fn connect(env: &Env, contract: Address) -> Self {
        let field_size: U256 =
            env.invoke_contract(&contract, &Symbol::new(env, "field_size"), vec![env]);
        Self::new(env, contract, field_size)
    }

    pub fn new(env: &Env, contract: Address, field_size: U256) -> Self {
        Self {
            env: env.clone(),
            contract,
            field_size,
        }
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }
}

impl HashProvider for ContractHasher {
    fn hash(&self, left: &U256, right: &U256) -> U256 {
        self.env.invoke_contract(
            &self.contract,
            &symbol_short!("hash"),
            vec![
                &self.env,
                left.clone().into_val(&self.env),
                right.clone().into_val(&self.env),
            ],
        )
    }

    fn field_size(&self) -> U256 {
        self.field_size.clone()
    }
}
