use alloy_provider::DynProvider;

// TODO: MevCommitMiddleware.json is rebuilt from the contract's public interface,
// swap in the published `contracts-abi/abi/MevCommitMiddleware.abi` once it is vendored here
pub mod mev_commit_middleware {
    alloy_sol_macro::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug, PartialEq, Eq)]
        MevCommitMiddleware,
        "./src/contracts/abi/MevCommitMiddleware.json"
    );
}

pub mod reward_distributor {
    alloy_sol_macro::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug, PartialEq, Eq)]
        RewardDistributor,
        "./src/contracts/abi/RewardDistributor.json"
    );
}

pub use mev_commit_middleware::{
    Checkpoints::{Checkpoint160 as CheckpointsCheckpoint160, Trace160 as CheckpointsTrace160},
    MevCommitMiddleware,
    TimestampOccurrence::Occurrence as TimestampOccurrenceOccurrence,
};
pub use reward_distributor::{
    IRewardDistributor::Distribution as IRewardDistributorDistribution, RewardDistributor,
};

pub type MevCommitMiddlewareT = MevCommitMiddleware::MevCommitMiddlewareInstance<DynProvider>;

pub type RewardDistributorT = RewardDistributor::RewardDistributorInstance<DynProvider>;

pub type MevCommitMiddlewareError = MevCommitMiddleware::MevCommitMiddlewareErrors;

pub type RewardDistributorError = RewardDistributor::RewardDistributorErrors;

/// Every log the middleware can emit, decodable with `SolEventInterface::decode_log`
pub type MevCommitMiddlewareEvent = MevCommitMiddleware::MevCommitMiddlewareEvents;

/// Every log the reward distributor can emit, decodable with `SolEventInterface::decode_log`
pub type RewardDistributorEvent = RewardDistributor::RewardDistributorEvents;

pub fn decode_middleware_error(err: alloy_contract::Error) -> Option<MevCommitMiddlewareError> {
    err.as_decoded_interface_error::<MevCommitMiddlewareError>()
}

pub fn decode_reward_distributor_error(
    err: alloy_contract::Error,
) -> Option<RewardDistributorError> {
    err.as_decoded_interface_error::<RewardDistributorError>()
}
