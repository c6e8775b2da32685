//! Ledger automation runner.
//!
//! One invocation runs one workflow: read contract state, decide, sign,
//! broadcast, re-read. Workflows are selected by subcommand; contracts are
//! referred to by their logical names and resolved through the configured
//! address sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ledger_runner::config::load_config;
use ledger_runner::contracts::payload::QueryMsg;
use ledger_runner::ledger::tx::Coin;
use ledger_runner::observability::logging::init_logging;
use ledger_runner::workflow::{DecisionPolicy, Probe, Session, Verify, Workflow};

#[derive(Parser)]
#[command(name = "ledger-runner")]
#[command(about = "Read-modify-verify automation against a contract ledger", long_about = None)]
struct Cli {
    /// Path to the runner configuration file.
    #[arg(short, long, default_value = "runner.toml")]
    config: PathBuf,

    /// Override the configured network.
    #[arg(short, long)]
    network: Option<String>,

    /// Identity that signs the transaction.
    #[arg(short, long, default_value = "admin")]
    signer: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push a new price to the oracle contract
    PushPrice {
        #[arg(long, default_value = "oracle")]
        contract: String,
        #[arg(long)]
        price: u64,
    },
    /// Top up the swap contract's token balance to a ceiling
    TopUp {
        #[arg(long, default_value = "cw20_token")]
        token: String,
        #[arg(long, default_value = "swap")]
        swap: String,
        #[arg(long)]
        ceiling: u128,
    },
    /// Mint tokens; the recipient defaults to the signer
    Mint {
        #[arg(long, default_value = "cw20_token")]
        token: String,
        #[arg(long)]
        recipient: Option<String>,
        #[arg(long)]
        amount: u128,
    },
    /// Burn tokens from the signer's balance
    Burn {
        #[arg(long, default_value = "cw20_token")]
        token: String,
        #[arg(long)]
        amount: u128,
    },
    /// Transfer tokens to another identity or address
    Transfer {
        #[arg(long, default_value = "cw20_token")]
        token: String,
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        amount: u128,
    },
    /// Buy from the swap contract with attached native funds
    Buy {
        #[arg(long, default_value = "swap")]
        swap: String,
        #[arg(long, default_value = "cw20_token")]
        token: String,
        #[arg(long)]
        amount: u128,
    },
    /// Withdraw native funds from the swap contract
    Withdraw {
        #[arg(long, default_value = "swap")]
        swap: String,
        #[arg(long)]
        amount: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(network) = cli.network {
        config.network = network;
    }
    let fee_denom = config.ledger.fee_denom.clone();

    let session = Session::connect(&config).await?;
    let workflow = build_workflow(&session, &cli.signer, &fee_denom, cli.command)?;

    let report = workflow.run(&session).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_workflow(
    session: &Session,
    signer: &str,
    fee_denom: &str,
    command: Commands,
) -> Result<Workflow, Box<dyn std::error::Error>> {
    let workflow = match command {
        Commands::PushPrice { contract, price } => Workflow {
            signer: signer.to_string(),
            target: contract.clone(),
            probe: Probe {
                contract,
                query: QueryMsg::QueryPrice {},
            },
            policy: DecisionPolicy::PushPrice { price },
            verify: Verify::SkipOnRejection,
            verify_probe: None,
        },

        Commands::TopUp { token, swap, ceiling } => {
            let swap_address = session.resolve(&swap)?.to_string();
            Workflow {
                signer: signer.to_string(),
                target: token.clone(),
                probe: Probe {
                    contract: token,
                    query: QueryMsg::Balance {
                        address: swap_address.clone(),
                    },
                },
                policy: DecisionPolicy::TopUp {
                    recipient: swap_address,
                    ceiling,
                },
                verify: Verify::SkipOnRejection,
                verify_probe: None,
            }
        }

        Commands::Mint {
            token,
            recipient,
            amount,
        } => {
            let recipient = match recipient {
                Some(r) => account_address(session, &r),
                None => session.identity_address(signer)?.to_string(),
            };
            Workflow {
                signer: signer.to_string(),
                target: token.clone(),
                probe: Probe {
                    contract: token.clone(),
                    query: QueryMsg::Minter {},
                },
                policy: DecisionPolicy::Mint {
                    recipient: recipient.clone(),
                    amount,
                },
                verify: Verify::SkipOnRejection,
                verify_probe: Some(Probe {
                    contract: token,
                    query: QueryMsg::Balance { address: recipient },
                }),
            }
        }

        Commands::Burn { token, amount } => {
            let sender = session.identity_address(signer)?.to_string();
            Workflow {
                signer: signer.to_string(),
                target: token.clone(),
                probe: Probe {
                    contract: token,
                    query: QueryMsg::Balance { address: sender },
                },
                policy: DecisionPolicy::Burn { amount },
                verify: Verify::SkipOnRejection,
                verify_probe: None,
            }
        }

        Commands::Transfer {
            token,
            recipient,
            amount,
        } => {
            let recipient = account_address(session, &recipient);
            Workflow {
                signer: signer.to_string(),
                target: token.clone(),
                probe: Probe {
                    contract: token,
                    query: QueryMsg::Balance {
                        address: recipient.clone(),
                    },
                },
                policy: DecisionPolicy::Transfer { recipient, amount },
                verify: Verify::SkipOnRejection,
                verify_probe: None,
            }
        }

        Commands::Buy { swap, token, amount } => {
            let buyer = session.identity_address(signer)?.to_string();
            Workflow {
                signer: signer.to_string(),
                target: swap,
                probe: Probe {
                    contract: token,
                    query: QueryMsg::Balance { address: buyer },
                },
                policy: DecisionPolicy::Buy {
                    funds: vec![Coin::new(fee_denom, amount)],
                },
                verify: Verify::SkipOnRejection,
                verify_probe: None,
            }
        }

        Commands::Withdraw { swap, amount } => Workflow {
            signer: signer.to_string(),
            target: swap.clone(),
            probe: Probe {
                contract: swap,
                query: QueryMsg::QueryPrice {},
            },
            policy: DecisionPolicy::Withdraw { amount },
            // The swap contract's withdrawable balance is not exposed
            // through a read we issue, so there is nothing to re-observe.
            verify: Verify::Never,
            verify_probe: None,
        },
    };
    Ok(workflow)
}

/// Resolve a recipient given either an identity name from the key table or
/// a literal account address.
fn account_address(session: &Session, name_or_address: &str) -> String {
    session
        .identity_address(name_or_address)
        .map(str::to_string)
        .unwrap_or_else(|_| name_or_address.to_string())
}
