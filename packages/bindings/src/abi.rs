use std::{str::FromStr, sync::LazyLock};

use alloy_json_abi::JsonAbi;

use crate::BindingError;

const MEV_COMMIT_MIDDLEWARE_ABI: &str = include_str!("contracts/abi/MevCommitMiddleware.json");
const REWARD_DISTRIBUTOR_ABI: &str = include_str!("contracts/abi/RewardDistributor.json");

// the same files already went through `sol!` at compile time
static MEV_COMMIT_MIDDLEWARE: LazyLock<JsonAbi> = LazyLock::new(|| {
    serde_json::from_str(MEV_COMMIT_MIDDLEWARE_ABI).expect("embedded MevCommitMiddleware ABI")
});
static REWARD_DISTRIBUTOR: LazyLock<JsonAbi> = LazyLock::new(|| {
    serde_json::from_str(REWARD_DISTRIBUTOR_ABI).expect("embedded RewardDistributor ABI")
});

/// The contracts whose ABI ships with this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownContract {
    MevCommitMiddleware,
    RewardDistributor,
}

impl KnownContract {
    pub const ALL: [KnownContract; 2] = [
        KnownContract::MevCommitMiddleware,
        KnownContract::RewardDistributor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            KnownContract::MevCommitMiddleware => "MevCommitMiddleware",
            KnownContract::RewardDistributor => "RewardDistributor",
        }
    }

    /// The raw ABI JSON, exactly as embedded
    pub fn abi_json(&self) -> &'static str {
        match self {
            KnownContract::MevCommitMiddleware => MEV_COMMIT_MIDDLEWARE_ABI,
            KnownContract::RewardDistributor => REWARD_DISTRIBUTOR_ABI,
        }
    }

    pub fn abi(&self) -> &'static JsonAbi {
        match self {
            KnownContract::MevCommitMiddleware => &MEV_COMMIT_MIDDLEWARE,
            KnownContract::RewardDistributor => &REWARD_DISTRIBUTOR,
        }
    }
}

impl std::fmt::Display for KnownContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KnownContract {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|contract| contract.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BindingError::UnknownContract(s.to_string()))
    }
}
