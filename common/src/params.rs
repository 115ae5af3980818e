//! Consensus parameters governing difficulty retargeting.
//!
//! Parameters are fixed per network and passed explicitly to every consensus
//! function. Custom test networks can be derived from a preset by changing
//! the public fields.
use crate::block::{BlockTime, Height, Target, TimeOffset, U256};
use crate::network::Network;

const MAX: u64 = u64::MAX;

/// `0x000fffff...`: easiest work target before the hybrid era.
const POW_LIMIT: Target = U256([MAX, MAX, MAX, 0x000f_ffff_ffff_ffff]);
/// `0x00000fff...`: easiest stake target.
const POS_LIMIT: Target = U256([MAX, MAX, MAX, 0x0000_0fff_ffff_ffff]);
/// `0x0000ffff...`: easiest work target of the hybrid era.
const HYBRID_POW_LIMIT: Target = U256([MAX, MAX, MAX, 0x0000_ffff_ffff_ffff]);
/// `0x7fffffff...`: regtest targets, satisfied by almost any hash.
const REGTEST_LIMIT: Target = U256([MAX, MAX, MAX, 0x7fff_ffff_ffff_ffff]);

/// Consensus parameters of a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// Network these parameters belong to.
    pub network: Network,
    /// Timestamp of the genesis block.
    pub genesis_time: BlockTime,

    /// Easiest target allowed for work blocks before the hybrid era.
    pub pow_limit: Target,
    /// Easiest target allowed for stake blocks.
    pub pos_limit: Target,
    /// Easiest target allowed for work blocks in the hybrid era.
    pub hybrid_pow_limit: Target,

    /// Work block spacing, in seconds.
    pub pow_target_spacing: TimeOffset,
    /// Stake block spacing, in seconds.
    pub pos_target_spacing: TimeOffset,
    /// Block spacing targeted by the Midas algorithm.
    pub pos_target_spacing_midas: TimeOffset,
    /// Schedule deviation at which Midas stops blending intervals.
    pub pos_target_timespan_midas: TimeOffset,
    /// Work block spacing in the hybrid era.
    pub hybrid_pow_target_spacing: TimeOffset,
    /// Stake block spacing in the hybrid era.
    pub hybrid_pos_target_spacing: TimeOffset,

    /// First height retargeted by Midas.
    pub midas_start_height: Height,
    /// First height retargeted by Dark Gravity Wave.
    pub dgw_start_height: Height,
    /// First height at which every block is a stake block.
    pub pos_start_height: Height,
    /// First height of the hybrid PoW/PoS era.
    pub pos_pow_start_height: Height,

    /// Never retarget: every block carries its parent's target.
    pub no_pow_retargeting: bool,
    /// Allow minimum-difficulty blocks when the chain stalls.
    pub allow_min_difficulty_blocks: bool,
    /// Number of leading blocks always mined at the work limit.
    pub minimum_difficulty_blocks: Height,
}

impl Params {
    /// Get the consensus parameters of the given network.
    pub fn new(network: Network) -> Self {
        match network {
            Network::Mainnet => Self {
                network,
                genesis_time: 1_486_045_800,
                pow_limit: POW_LIMIT,
                pos_limit: POS_LIMIT,
                hybrid_pow_limit: HYBRID_POW_LIMIT,
                pow_target_spacing: 60,
                pos_target_spacing: 64,
                pos_target_spacing_midas: 64,
                pos_target_timespan_midas: 16 * 60,
                hybrid_pow_target_spacing: 120,
                hybrid_pos_target_spacing: 120,
                midas_start_height: 1_000,
                dgw_start_height: 500_000,
                pos_start_height: 1_001,
                pos_pow_start_height: 1_100_000,
                no_pow_retargeting: false,
                allow_min_difficulty_blocks: false,
                minimum_difficulty_blocks: 0,
            },
            Network::Testnet => Self {
                network,
                genesis_time: 1_486_046_000,
                pow_limit: POW_LIMIT,
                pos_limit: POS_LIMIT,
                hybrid_pow_limit: HYBRID_POW_LIMIT,
                pow_target_spacing: 60,
                pos_target_spacing: 64,
                pos_target_spacing_midas: 64,
                pos_target_timespan_midas: 16 * 60,
                hybrid_pow_target_spacing: 120,
                hybrid_pos_target_spacing: 120,
                midas_start_height: 100,
                dgw_start_height: 200,
                pos_start_height: 400,
                pos_pow_start_height: 600,
                no_pow_retargeting: false,
                allow_min_difficulty_blocks: true,
                minimum_difficulty_blocks: 0,
            },
            Network::Devnet => Self {
                network,
                genesis_time: 1_517_541_975,
                pow_limit: POW_LIMIT,
                pos_limit: POS_LIMIT,
                hybrid_pow_limit: HYBRID_POW_LIMIT,
                pow_target_spacing: 60,
                pos_target_spacing: 64,
                pos_target_spacing_midas: 64,
                pos_target_timespan_midas: 16 * 60,
                hybrid_pow_target_spacing: 120,
                hybrid_pos_target_spacing: 120,
                midas_start_height: 100,
                dgw_start_height: 200,
                pos_start_height: 300,
                pos_pow_start_height: 400,
                no_pow_retargeting: false,
                allow_min_difficulty_blocks: true,
                minimum_difficulty_blocks: 50,
            },
            Network::Regtest => Self {
                network,
                genesis_time: 1_296_688_602,
                pow_limit: REGTEST_LIMIT,
                pos_limit: REGTEST_LIMIT,
                hybrid_pow_limit: REGTEST_LIMIT,
                pow_target_spacing: 60,
                pos_target_spacing: 64,
                pos_target_spacing_midas: 64,
                pos_target_timespan_midas: 16 * 60,
                hybrid_pow_target_spacing: 120,
                hybrid_pos_target_spacing: 120,
                midas_start_height: 100,
                dgw_start_height: 200,
                pos_start_height: 300,
                pos_pow_start_height: 400,
                no_pow_retargeting: true,
                allow_min_difficulty_blocks: true,
                minimum_difficulty_blocks: 0,
            },
        }
    }

    /// Whether these are mainnet parameters.
    pub fn is_mainnet(&self) -> bool {
        self.network == Network::Mainnet
    }
}
