//! vaultlist - todo list client backed by a contract-gated remote vault

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultlist::{
    cipher::{ChaChaCipher, Cipher, NoCipher},
    config::{Args, Command},
    identity::IdentityStore,
    keys::DeviceKey,
    registrar::{GatewayRegistrar, IdentityRegistrar, MockRegistrar},
    session::{Session, SessionConfig, SessionPhase},
    vault::{MemoryVault, RemoteVault, VaultStore},
    ItemState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vaultlist={log_level},warn").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("vaultlist starting");
    info!("Vault: {}", args.vault_url);
    info!("Gateway: {}", args.gateway_url);
    info!("Todo directory: {}", args.todo_dir);
    info!(
        "Mode: {}",
        if args.dev_mode { "DEV (in-memory)" } else { "REMOTE" }
    );

    let key = match &args.device_key {
        Some(hex_key) => DeviceKey::from_hex(hex_key)?,
        None => {
            // Dev mode only; validate() requires a key otherwise.
            warn!("no device key configured, generating a throwaway key");
            DeviceKey::generate()
        }
    };

    let cipher: Arc<dyn Cipher> = if args.encrypt_items {
        info!("item encryption enabled");
        Arc::new(ChaChaCipher::new(&key.derive_cipher_key()))
    } else {
        Arc::new(NoCipher)
    };

    let (registrar, vault): (Arc<dyn IdentityRegistrar>, Arc<dyn VaultStore>) = if args.dev_mode {
        warn!("dev mode: using in-memory registrar and vault, state is not durable");
        (
            Arc::new(MockRegistrar::default()),
            Arc::new(MemoryVault::new()),
        )
    } else {
        let key = Arc::new(key);
        (
            Arc::new(GatewayRegistrar::new(&args.gateway_url, key.public_hex())),
            Arc::new(RemoteVault::new(&args.vault_url, key)),
        )
    };

    let data_dir = args.data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let session = Session::new(
        SessionConfig {
            todo_dir: args.todo_dir.clone(),
            expiry_check: args.expiry_check,
            ..SessionConfig::default()
        },
        registrar,
        vault,
        cipher,
        IdentityStore::new(&data_dir),
    );

    match &args.command {
        Command::Reset => {
            session.reset().await?;
            println!("Identity discarded. The next run starts from cold start.");
            return Ok(());
        }
        Command::Status => {
            let record = session.identity()?;
            println!("Phase: {}", session.phase());
            match &record.address {
                Some(address) => println!("Contract: {address}"),
                None => println!("Contract: not deployed (cold start)"),
            }
            println!("Vault ready: {}", record.vault_ready);
            return Ok(());
        }
        _ => {}
    }

    if let Err(e) = session.bootstrap().await {
        error!("bootstrap failed: {}", e);
        std::process::exit(1);
    }

    if session.phase() == SessionPhase::Expired {
        println!("Todo list has been deleted. Run again to create a new one.");
        return Ok(());
    }

    match args.command {
        Command::List => print_items(&session).await,
        Command::Add { title } => {
            let item = session.add(title).await?;
            println!("Added {}", item.id);
            print_items(&session).await;
        }
        Command::Toggle { id } => {
            let item = session.toggle(&id).await?;
            println!(
                "{} is now {}",
                item.id,
                match item.content.state {
                    ItemState::Active => "active",
                    ItemState::Completed => "completed",
                    ItemState::Deleted => "deleted",
                }
            );
        }
        Command::Delete { id } => {
            session.delete(&id).await?;
            println!("Deleted {id}");
        }
        Command::Status | Command::Reset => unreachable!("handled before bootstrap"),
    }

    Ok(())
}

async fn print_items(session: &Session) {
    let items = session.items().await;
    if items.is_empty() {
        println!("No todo items.");
        return;
    }
    for item in items {
        let mark = match item.content.state {
            ItemState::Completed => "x",
            _ => " ",
        };
        println!("[{mark}] {}  {}", item.id, item.content.title);
    }
}
