use anyhow::Result;
use clap::Parser;
use providers_register::{
    args::CliArgs,
    chain::EvmRegistrationChain,
    config::Config,
    error::RegisterError,
    events::load_events,
    registrar::Registrar,
    OWNER_PRIVATE_KEY_ENV,
};
use utils::{
    config::{ConfigBuilder, ConfigExt},
    credential::Credential,
    error::EvmClientError,
    evm_client::{EvmEndpoint, EvmSigningClient},
};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config: Config = match ConfigBuilder::new(args).build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.logging().init() {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    let credential = Credential::from_env(OWNER_PRIVATE_KEY_ENV)
        .ok_or(RegisterError::MissingPrivateKey(OWNER_PRIVATE_KEY_ENV))?;

    let endpoint: EvmEndpoint = config.rpc_endpoint.parse()?;

    // a malformed key fails here, before anything touches the network
    let client = EvmSigningClient::new(endpoint, &credential)
        .await
        .map_err(|e| match e {
            EvmClientError::InvalidPrivateKey(_) => RegisterError::PrivateKey(e),
            source => RegisterError::Connect {
                endpoint: config.rpc_endpoint.clone(),
                source,
            },
        })?;

    tracing::info!("Owner Address: {}", client.address());

    let events = load_events(&config.events_file)?;

    let registrar = Registrar::new(
        EvmRegistrationChain::new(client.provider.clone()),
        client.signer.clone(),
        config.registrar_config(),
    );

    let outcomes = registrar.run(&events).await?;

    if config.dry_run {
        println!(
            "Dry run complete, {} registrations signed and not sent.",
            outcomes.len()
        );
    } else {
        println!("All providers have been registered in the new contract.");
    }

    Ok(())
}
