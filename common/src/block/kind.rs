//! Block type classification: proof-of-work or proof-of-stake.
use crate::block::Height;
use crate::params::Params;

/// Heights of the mainnet blocks that were staked before stake-only blocks
/// were enforced. Inclusive ranges. This is chain history, not a formula.
const MAINNET_STAKE_HEIGHTS: &[(Height, Height)] = &[
    (455, 479),
    (481, 489),
    (492, 492),
    (501, 501),
    (691, 691),
    (702, 703),
    (721, 721),
    (806, 811),
    (876, 876),
    (889, 889),
    (907, 907),
    (913, 914),
    (916, 929),
    (931, 931),
    (933, 942),
    (945, 947),
    (949, 960),
    (962, 962),
    (969, 969),
    (991, 991),
];

/// The kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Proof-of-work block.
    Work,
    /// Proof-of-stake block.
    Stake,
}

impl BlockKind {
    /// The kind a block at the given height must have, outside the hybrid era.
    pub fn at_height(height: Height, params: &Params) -> Self {
        if is_proof_of_stake(height, params) {
            Self::Stake
        } else {
            Self::Work
        }
    }

}

#[cfg(feature = "quickcheck")]
impl quickcheck::Arbitrary for BlockKind {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        if <bool as quickcheck::Arbitrary>::arbitrary(g) {
            Self::Stake
        } else {
            Self::Work
        }
    }
}

/// Check whether the block at the given height is a proof-of-stake block.
///
/// ```
/// use ion_common::block::is_proof_of_stake;
/// use ion_common::network::Network;
///
/// let params = Network::Mainnet.params();
///
/// assert!(is_proof_of_stake(455, &params));
/// assert!(!is_proof_of_stake(480, &params));
/// assert!(is_proof_of_stake(params.pos_start_height, &params));
/// assert!(!is_proof_of_stake(300, &Network::Testnet.params()));
/// ```
pub fn is_proof_of_stake(height: Height, params: &Params) -> bool {
    if height >= params.pos_start_height {
        return true;
    }
    if !params.is_mainnet() {
        return false;
    }
    MAINNET_STAKE_HEIGHTS
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&height))
}
