//! Walletcard CLI - render cards and walk through actions against the demo provider
//!
//!   walletcard wallets                          → supported wallet ids
//!   walletcard render <wallet> [--session ...]  → card view for a session snapshot
//!   walletcard demo <wallet> [actions...]       → run actions, print toasts + views
//!
//! Session input:
//!   --session '<json>'   inline snapshot
//!   --session @file.json snapshot from file
//!
//! Output format:
//!   --json     Output raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;
use walletcard::config::load_dotenv;
use walletcard::logging::init_logging;
use walletcard::{
    Action, ActionOutcome, Balance, CallKind, CardConfig, CardView, DemoProvider, Network, SessionHandle, SessionSnapshot,
    ToastFeed, WalletCard, WalletId,
};

fn main() {
    load_dotenv(Path::new(".env"));

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);
    init_logging(opts.verbose);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("walletcard {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("wallets") => cmd_wallets(),
        Some("render") => cmd_render(&opts),
        Some("demo") => cmd_demo(&opts),
        Some(cmd) => Err(format!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = !opts.json && (opts.pretty || std::io::stdout().is_terminal());
    let render = |value: &Value| {
        let out = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
        out.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    };

    match result {
        Ok(output) => println!("{}", render(&output)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": e})));
            std::process::exit(1);
        }
    }
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    wallet: Option<String>,
    actions: Vec<String>,
    session: Option<String>,
    config: Option<String>,
    balance: Option<u64>,
    network: Option<String>,
    missing: Vec<String>,
    fail: Vec<String>,
    json: bool,
    pretty: bool,
    verbose: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            let next = args.get(i + 1).cloned();
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--verbose" | "-v" => opts.verbose = true,
                "--session" | "-s" if next.is_some() => {
                    opts.session = next;
                    i += 1;
                }
                "--config" | "-c" if next.is_some() => {
                    opts.config = next;
                    i += 1;
                }
                "--balance" | "-b" if next.is_some() => {
                    opts.balance = next.and_then(|v| v.parse().ok());
                    i += 1;
                }
                "--network" | "-n" if next.is_some() => {
                    opts.network = next;
                    i += 1;
                }
                "--missing" if next.is_some() => {
                    opts.missing.extend(split_list(next.as_deref().unwrap_or_default()));
                    i += 1;
                }
                // --fail <call>=<message>: the demo provider rejects that call once
                "--fail" if next.is_some() => {
                    opts.fail.extend(next);
                    i += 1;
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {}
            }
            i += 1;
        }

        let mut positional = positional.into_iter();
        opts.command = positional.next();
        opts.wallet = positional.next();
        opts.actions = positional.collect();

        if opts.balance.is_none() {
            opts.balance = env::var("WALLETCARD_DEMO_BALANCE").ok().and_then(|v| v.parse().ok());
        }
        if opts.network.is_none() {
            opts.network = env::var("WALLETCARD_NETWORK").ok().filter(|s| !s.is_empty());
        }

        opts
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

fn print_usage() {
    println!(
        r#"walletcard - Bitcoin browser wallet cards

USAGE:
    walletcard <command> [wallet] [actions...] [options]

COMMANDS:
    wallets                 List supported wallets
    render <wallet>         Print the card view for a session snapshot
    demo <wallet> [actions] Run actions against the demo provider

ACTIONS:
    connect, disconnect, toggle, send, sign-message, sign-psbt, switch-network

OPTIONS:
    --session, -s <json|@file>  Session snapshot (render)
    --config, -c <file>         Card config JSON (explorer_url, toast_capacity)
    --balance, -b <sats>        Demo wallet balance (env: WALLETCARD_DEMO_BALANCE, default 2000)
    --network, -n <net>         mainnet|testnet (env: WALLETCARD_NETWORK)
    --missing <ids>             Wallets the demo pretends are not installed
    --fail <call>=<message>     Demo provider rejects <call> once (e.g. connect="User rejected")
    --json                      Raw JSON output
    --pretty                    Pretty-print JSON
    --verbose, -v               Debug logs on stderr (env: RUST_LOG, WALLETCARD_LOG_FORMAT)
    --version, -V               Print version

EXAMPLES:
    walletcard render unisat --session '{{"active_provider":"unisat","capabilities":{{"unisat":true}}}}'
    walletcard demo xverse connect send sign-message switch-network
    walletcard demo oyl connect send --balance 1000
"#
    );
}

fn load_card_config(opts: &ParsedArgs) -> Result<CardConfig, String> {
    let config = match &opts.config {
        Some(path) => CardConfig::from_file(Path::new(path)),
        None => CardConfig::from_env(),
    };
    config.map_err(|e| e.to_string())
}

fn parse_wallet(opts: &ParsedArgs) -> Result<WalletId, String> {
    let raw = opts.wallet.as_deref().ok_or("Wallet required: unisat|oyl|leather|xverse")?;
    raw.parse().map_err(|e: walletcard::CardError| e.to_string())
}

fn parse_network(opts: &ParsedArgs) -> Result<Network, String> {
    match opts.network.as_deref() {
        Some(raw) => raw.parse().map_err(|e: walletcard::CardError| e.to_string()),
        None => Ok(Network::default()),
    }
}

fn parse_call_kind(raw: &str) -> Result<CallKind, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "connect" => Ok(CallKind::Connect),
        "disconnect" => Ok(CallKind::Disconnect),
        "send" | "send_payment" => Ok(CallKind::SendPayment),
        "sign_message" => Ok(CallKind::SignMessage),
        "sign_psbt" => Ok(CallKind::SignPsbt),
        "switch_network" => Ok(CallKind::SwitchNetwork),
        _ => Err(format!("Unknown provider call: {}", raw)),
    }
}

fn cmd_wallets() -> Result<Value, String> {
    Ok(json!(WalletId::ALL.iter().map(|w| json!({"id": w.as_str(), "title": w.title()})).collect::<Vec<_>>()))
}

fn cmd_render(opts: &ParsedArgs) -> Result<Value, String> {
    let wallet = parse_wallet(opts)?;
    let snapshot: SessionSnapshot = match opts.session.as_deref() {
        Some(raw) => {
            let text = match raw.strip_prefix('@') {
                Some(path) => std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?,
                None => raw.to_string(),
            };
            serde_json::from_str(&text).map_err(|e| format!("Invalid session JSON: {}", e))?
        }
        None => SessionSnapshot::default(),
    };
    serde_json::to_value(CardView::render(wallet, &snapshot)).map_err(|e| e.to_string())
}

fn cmd_demo(opts: &ParsedArgs) -> Result<Value, String> {
    let wallet = parse_wallet(opts)?;
    let network = parse_network(opts)?;
    let config = load_card_config(opts)?;
    let actions = opts
        .actions
        .iter()
        .map(|a| a.parse::<Action>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut snapshot = SessionSnapshot { network, capabilities: walletcard::Capabilities::all(), ..Default::default() };
    for raw in &opts.missing {
        let missing: WalletId = raw.parse().map_err(|e: walletcard::CardError| e.to_string())?;
        snapshot.capabilities.set(missing, false);
    }

    let session = SessionHandle::new(snapshot);
    let provider = Arc::new(DemoProvider::new(session.clone(), Balance::new(opts.balance.unwrap_or(2_000), 0)));
    for entry in &opts.fail {
        let (call, message) = entry.split_once('=').unwrap_or((entry.as_str(), "Rejected by demo provider"));
        provider.fail_next(parse_call_kind(call)?, message.trim_matches('"'));
    }

    let feed = Arc::new(ToastFeed::new(config.toast_capacity));
    let mut toasts = feed.subscribe();
    let signatures: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = signatures.clone();
    let card = WalletCard::new(
        wallet,
        session,
        provider.clone(),
        feed,
        Arc::new(move |sig: String| sink.lock().unwrap_or_else(|p| p.into_inner()).push(sig)),
    )
    .with_config(config);

    let rt = tokio::runtime::Runtime::new().map_err(|e| format!("Runtime: {}", e))?;
    let mut steps = Vec::new();
    for action in actions {
        debug!(action = action.as_str(), "demo step");
        let outcome = rt.block_on(card.dispatch(action));
        let mut shown = Vec::new();
        while let Ok(toast) = toasts.try_recv() {
            shown.push(toast);
        }
        steps.push(json!({
            "action": action.as_str(),
            "outcome": outcome_json(&outcome),
            "toasts": shown,
            "view": card.render(),
        }));
    }

    let signatures = signatures.lock().unwrap_or_else(|p| p.into_inner()).clone();
    let initial = if steps.is_empty() { json!(card.render()) } else { Value::Null };
    Ok(json!({
        "wallet": wallet.as_str(),
        "initial": initial,
        "steps": steps,
        "signatures": signatures,
        "provider_calls": provider.calls(),
    }))
}

fn outcome_json(outcome: &ActionOutcome) -> Value {
    match outcome {
        ActionOutcome::Done(value) => json!({"status": "done", "value": value}),
        ActionOutcome::Ignored => json!({"status": "ignored"}),
        ActionOutcome::Failed(err) => json!({"status": "failed", "error": err.to_string()}),
    }
}
