use alloy_network::TransactionBuilder;
use alloy_node_bindings::{Anvil, AnvilInstance};
use alloy_primitives::{address, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer::Signer;
use mev_commit_bindings::KnownContract;
use utils::{
    credential::Credential,
    error::EvmClientError,
    evm_client::{EvmQueryClient, EvmSigningClient},
    init_tracing_tests,
};

#[tokio::test]
async fn query_client_chain_id() {
    init_tracing_tests();
    let anvil = Anvil::new().spawn();

    let client = EvmQueryClient::new(anvil.endpoint().parse().unwrap())
        .await
        .unwrap();

    assert_eq!(client.chain_id().await.unwrap(), anvil.chain_id());
}

#[tokio::test]
async fn query_client_over_websocket() {
    init_tracing_tests();
    let anvil = Anvil::new().spawn();

    let client = EvmQueryClient::new(anvil.ws_endpoint().parse().unwrap())
        .await
        .unwrap();

    assert_eq!(client.chain_id().await.unwrap(), anvil.chain_id());
}

fn private_key(anvil: &AnvilInstance, index: usize) -> Credential {
    Credential::new(const_hex::encode_prefixed(anvil.keys()[index].to_bytes()))
}

#[tokio::test]
async fn signing_client_sign_message() {
    init_tracing_tests();
    let anvil = Anvil::new().spawn();

    let client = EvmSigningClient::new(anvil.endpoint().parse().unwrap(), &private_key(&anvil, 0))
        .await
        .unwrap();

    assert_eq!(client.address(), anvil.addresses()[0]);

    let message = b"hello world";
    let signature = client.signer.sign_message(message).await.unwrap();

    let recovered_address = signature.recover_address_from_msg(&message[..]).unwrap();

    assert_eq!(recovered_address, client.address());
}

#[tokio::test]
async fn signing_client_sends_value() {
    init_tracing_tests();
    let anvil = Anvil::new().spawn();

    let client = EvmSigningClient::new(anvil.endpoint().parse().unwrap(), &private_key(&anvil, 1))
        .await
        .unwrap();

    assert_eq!(client.address(), anvil.addresses()[1]);

    let recipient = address!("000000000000000000000000000000000000dEaD");
    let tx = TransactionRequest::default()
        .with_to(recipient)
        .with_value(U256::from(1_000u64));

    let receipt = client
        .provider
        .send_transaction(tx)
        .await
        .unwrap()
        .get_receipt()
        .await
        .unwrap();

    assert!(receipt.status());
    assert_eq!(receipt.from, client.address());
    assert_eq!(
        client.provider.get_balance(recipient).await.unwrap(),
        U256::from(1_000u64)
    );
}

#[tokio::test]
async fn signing_client_rejects_malformed_key() {
    init_tracing_tests();

    // nothing listens here, the key is rejected before any connection
    let err = EvmSigningClient::new(
        "ws://127.0.0.1:1".parse().unwrap(),
        &Credential::new("test test test test test test test test test test test junk".to_string()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, EvmClientError::InvalidPrivateKey(_)));
}

#[tokio::test]
async fn contract_handles_without_code() {
    init_tracing_tests();
    let anvil = Anvil::new().spawn();

    let client = EvmQueryClient::new(anvil.endpoint().parse().unwrap())
        .await
        .unwrap();

    // nothing is deployed there, so calls fail to decode rather than panic
    let empty = address!("0000000000000000000000000000000000001234");

    assert!(client
        .reward_distributor(empty)
        .owner()
        .call()
        .await
        .is_err());

    assert!(client
        .mev_commit_middleware(empty)
        .owner()
        .call()
        .await
        .is_err());

    let contract = client.abi_contract(KnownContract::MevCommitMiddleware, empty);
    assert_eq!(contract.address(), empty);
    assert!(contract.call("owner", &[]).await.is_err());
}
