use alloy_primitives::Address;
use alloy_provider::DynProvider;
use mev_commit_bindings::{
    AbiContract, KnownContract, MevCommitMiddleware, MevCommitMiddlewareT, RewardDistributor,
    RewardDistributorT,
};

use super::{EvmQueryClient, EvmSigningClient};

impl EvmSigningClient {
    pub fn mev_commit_middleware(&self, address: Address) -> MevCommitMiddlewareT {
        MevCommitMiddleware::new(address, self.provider.clone())
    }

    pub fn reward_distributor(&self, address: Address) -> RewardDistributorT {
        RewardDistributor::new(address, self.provider.clone())
    }

    pub fn abi_contract(
        &self,
        contract: KnownContract,
        address: Address,
    ) -> AbiContract<DynProvider> {
        AbiContract::new(contract, address, self.provider.clone())
    }
}

impl EvmQueryClient {
    pub fn mev_commit_middleware(&self, address: Address) -> MevCommitMiddlewareT {
        MevCommitMiddleware::new(address, self.provider.clone())
    }

    pub fn reward_distributor(&self, address: Address) -> RewardDistributorT {
        RewardDistributor::new(address, self.provider.clone())
    }

    pub fn abi_contract(
        &self,
        contract: KnownContract,
        address: Address,
    ) -> AbiContract<DynProvider> {
        AbiContract::new(contract, address, self.provider.clone())
    }
}
