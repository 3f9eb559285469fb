use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;

alloy_sol_types::sol! {
    /// The one entry point of the new provider registry that the migration calls.
    /// The owner registers on behalf of `provider`, staking the attached value.
    interface IProviderRegistryMigration {
        function delegateRegisterAndStake(address provider, bytes[] calldata blsPublicKeys) external payable;
    }
}

pub use IProviderRegistryMigration::delegateRegisterAndStakeCall;

/// Call data registering `provider` with a single BLS key
pub fn delegate_register_and_stake(provider: Address, bls_public_key: Bytes) -> Bytes {
    delegateRegisterAndStakeCall {
        provider,
        blsPublicKeys: vec![bls_public_key],
    }
    .abi_encode()
    .into()
}
