#![no_std]

// Integration test crate - all code is test-only

#[cfg(test)]
mod tests {
    extern crate std;
    use num_bigint::BigUint;
    use soroban_sdk::{testutils::Address as _, Address, Env, U256};
    use std::string::String;
    use std::vec::Vec as StdVec;

    // Import actual contract clients
    use merkle_history::TreeError;
    use merkle_tree::MerkleTreeWithHistoryClient;
    use poseidon_hasher::PoseidonHasherClient;

    const MERKLE_TREE_HEIGHT: u32 = 20;

    /// keccak256("tornado") mod r
    const ZERO_VALUE_DECIMAL: &str =
        "21663839004416932945382355908790599225266501822907911457504978515578255421292";

    /// Hasher plus one tree wired to it
    struct TreeSystem {
        env: Env,
        owner: Address,
        hasher: Address,
        tree: Address,
    }

    impl TreeSystem {
        fn new(levels: u32) -> Self {
            let env = Env::default();
            env.mock_all_auths();
            // Every insert costs `levels` cross-contract Poseidon calls
            env.cost_estimate().budget().reset_unlimited();

            let owner = Address::generate(&env);
            let hasher = env.register(poseidon_hasher::PoseidonHasher, ());
            let tree = env.register(
                merkle_tree::MerkleTreeWithHistory,
                (owner.clone(), levels, hasher.clone()),
            );

            Self {
                env,
                owner,
                hasher,
                tree,
            }
        }

        fn deploy_tree(&self, levels: u32) -> Address {
            self.env.register(
                merkle_tree::MerkleTreeWithHistory,
                (self.owner.clone(), levels, self.hasher.clone()),
            )
        }

        fn tree_client(&self) -> MerkleTreeWithHistoryClient {
            MerkleTreeWithHistoryClient::new(&self.env, &self.tree)
        }

        fn hasher_client(&self) -> PoseidonHasherClient {
            PoseidonHasherClient::new(&self.env, &self.hasher)
        }

        fn leaf(&self, value: u32) -> U256 {
            U256::from_u32(&self.env, value)
        }
    }

    /// Off-chain tree rebuilt from all leaves on every `root()` call
    struct ReferenceTree<'a> {
        hasher: PoseidonHasherClient<'a>,
        levels: u32,
        zero: U256,
        leaves: StdVec<U256>,
    }

    impl<'a> ReferenceTree<'a> {
        fn new(hasher: PoseidonHasherClient<'a>, levels: u32, zero: U256) -> Self {
            Self {
                hasher,
                levels,
                zero,
                leaves: StdVec::new(),
            }
        }

        fn insert(&mut self, leaf: U256) {
            self.leaves.push(leaf);
        }

        fn root(&self) -> U256 {
            let mut zero = self.zero.clone();
            let mut layer = self.leaves.clone();
            for _ in 0..self.levels {
                let mut next = StdVec::new();
                for pair in layer.chunks(2) {
                    let right = pair.get(1).cloned().unwrap_or_else(|| zero.clone());
                    next.push(self.hasher.hash(&pair[0], &right));
                }
                zero = self.hasher.hash(&zero, &zero);
                layer = next;
            }
            layer.first().cloned().unwrap_or(zero)
        }
    }

    /// 0x-prefixed, 32-byte, zero-padded hex of a field element
    fn to_fixed_hex(value: &U256) -> String {
        let mut bytes = [0u8; 32];
        value.to_be_bytes().copy_into_slice(&mut bytes);
        let mut out = String::from("0x");
        out.push_str(&hex::encode(bytes));
        out
    }

    fn decimal_to_fixed_hex(decimal: &str) -> String {
        let value = BigUint::parse_bytes(decimal.as_bytes(), 10).expect("invalid decimal");
        std::format!("0x{:0>64}", value.to_str_radix(16))
    }

    #[test]
    fn test_deploys_with_hasher_wired() {
        let system = TreeSystem::new(MERKLE_TREE_HEIGHT);

        assert_eq!(system.tree_client().hasher(), system.hasher);
        assert_eq!(system.tree_client().levels(), MERKLE_TREE_HEIGHT);
        assert_eq!(system.tree_client().next_index(), 0);
    }

    #[test]
    fn test_initializes_zero_subtrees() {
        let system = TreeSystem::new(MERKLE_TREE_HEIGHT);
        let tree = system.tree_client();

        let zero_value = tree.zero_value();
        assert_eq!(to_fixed_hex(&zero_value), decimal_to_fixed_hex(ZERO_VALUE_DECIMAL));
        assert_eq!(to_fixed_hex(&tree.filled_subtrees(&0)), to_fixed_hex(&zero_value));
        assert_eq!(to_fixed_hex(&tree.zeros(&0)), to_fixed_hex(&zero_value));
    }

    #[test]
    fn test_insert_matches_reference_after_each_leaf() {
        let system = TreeSystem::new(MERKLE_TREE_HEIGHT);
        let tree = system.tree_client();
        let mut reference =
            ReferenceTree::new(system.hasher_client(), MERKLE_TREE_HEIGHT, tree.zero_value());

        for i in 1..4u32 {
            tree.insert(&system.leaf(i));
            reference.insert(system.leaf(i));

            let root_from_contract = tree.get_last_root();
            assert_eq!(
                to_fixed_hex(&reference.root()),
                to_fixed_hex(&root_from_contract),
                "failed at index {}",
                i
            );
        }
    }

    #[test]
    fn test_rejects_insert_when_tree_is_full() {
        let system = TreeSystem::new(MERKLE_TREE_HEIGHT);
        let levels = 3u32;
        let small = system.deploy_tree(levels);
        let client = MerkleTreeWithHistoryClient::new(&system.env, &small);

        for i in 0..(1u32 << levels) {
            assert_eq!(client.insert(&system.leaf(i + 42)), i);
        }
        let root_when_full = client.get_last_root();

        assert_eq!(
            client.try_insert(&system.leaf(1337)),
            Err(Ok(TreeError::TreeFull))
        );
        assert_eq!(client.next_index(), 1u32 << levels);
        assert_eq!(client.get_last_root(), root_when_full);
    }

    #[test]
    fn test_stale_root_stays_valid_within_window() {
        let system = TreeSystem::new(10);
        let tree = system.tree_client();

        tree.insert(&system.leaf(7));
        let proof_root = tree.get_last_root();

        // Other users keep inserting while the proof is generated
        for i in 0..10u32 {
            tree.insert(&system.leaf(100 + i));
        }

        assert_ne!(tree.get_last_root(), proof_root);
        assert!(tree.is_known_root(&proof_root));
        assert!(!tree.is_known_root(&U256::from_u32(&system.env, 0)));
    }

    #[test]
    fn test_trees_sharing_a_hasher_are_independent() {
        let system = TreeSystem::new(8);
        let other = system.deploy_tree(8);
        let first = system.tree_client();
        let second = MerkleTreeWithHistoryClient::new(&system.env, &other);

        assert_eq!(first.get_last_root(), second.get_last_root());

        first.insert(&system.leaf(1));
        assert_ne!(first.get_last_root(), second.get_last_root());
        assert!(!second.is_known_root(&first.get_last_root()));

        second.insert(&system.leaf(1));
        assert_eq!(first.get_last_root(), second.get_last_root());
    }

    #[test]
    fn test_fixed_bytes_boundary_matches_fixed_hex() {
        let system = TreeSystem::new(4);
        let tree = system.tree_client();

        tree.insert(&system.leaf(0xabcd));
        let root = tree.get_last_root();
        let bytes = tree.last_root_bytes();

        assert_eq!(
            std::format!("0x{}", hex::encode(bytes.to_array())),
            to_fixed_hex(&root)
        );
        assert_eq!(to_fixed_hex(&system.leaf(1)).len(), 66);
    }
}
