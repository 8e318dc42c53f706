use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use routemind::{
    domain::{
        apply_payment_with, calculate_vat, next_status, quote, validate_complaint_items,
        AuditLevel, ComplaintItem, PaymentMethod, RateSource, RateTable, ShipmentStatus,
    },
    infra::{
        api::ApiClient,
        cache::{default_cache_path, load_rate_cache, save_rate_cache, RateTableCache},
    },
    util::{
        logging,
        persistence::{
            load_audit_log, load_session, load_settings, save_audit_log, save_session,
            save_settings,
        },
        today_iso,
        version::{version_label, APP_NAME},
    },
};

#[derive(Parser)]
#[command(name = "routemind", version, about = "RouteMind logistics rules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a shipment
    Quote {
        #[arg(long)]
        destination: String,
        #[arg(long, default_value_t = 0.0)]
        weight: f64,
        #[arg(long, default_value_t = 0.0)]
        volume: f64,
        /// JSON rate table; defaults to the cached table
        #[arg(long)]
        rates: Option<PathBuf>,
    },
    /// Show VAT and tax-inclusive amount for a pre-tax amount
    Vat { amount_ht: f64 },
    /// Show the status that follows the given one
    NextStatus { status: String },
    /// Validate a JSON array of complaint items
    ValidateComplaint { file: PathBuf },
    /// Sign in and store the token pair for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ROUTEMIND_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token pair
    Logout,
    /// Record a payment against an invoice on the backend
    Pay {
        #[arg(long)]
        invoice: String,
        #[arg(long)]
        amount: f64,
        /// cash, check, card or transfer
        #[arg(long, default_value = "transfer")]
        method: String,
        /// Payment date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Fetch the destination rate table from the backend and cache it
    SyncRates,
    /// Show or update settings
    Config {
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Show the most recent audit entries
    Audit {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quote {
            destination,
            weight,
            volume,
            rates,
        } => run_quote(&destination, weight, volume, rates),
        Commands::Vat { amount_ht } => {
            let vat = calculate_vat(amount_ht);
            println!("HT {amount_ht:.2}  TVA {:.2}  TTC {:.2}", vat.tva, vat.amount_ttc);
            Ok(())
        }
        Commands::NextStatus { status } => run_next_status(&status),
        Commands::ValidateComplaint { file } => run_validate_complaint(file),
        Commands::Login { email, password } => run_login(&email, &password).await,
        Commands::Logout => run_logout(),
        Commands::Pay {
            invoice,
            amount,
            method,
            date,
        } => run_pay(&invoice, amount, &method, date).await,
        Commands::SyncRates => run_sync_rates().await,
        Commands::Config { api_url } => run_config(api_url),
        Commands::Audit { limit } => run_audit(limit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_quote(destination: &str, weight: f64, volume: f64, rates: Option<PathBuf>) -> CliResult {
    let table = match rates {
        Some(path) => serde_json::from_str::<RateTable>(&fs::read_to_string(path)?)?,
        None => {
            load_rate_cache(&default_cache_path(), load_settings().rate_cache_ttl())
                .map(|cache| cache.rate_table())
                .unwrap_or_default()
        }
    };

    let quote = quote(destination, weight, volume, &table);
    let rule = match &quote.source {
        RateSource::Table(id) => format!("rate #{id}"),
        RateSource::Fallback => "fallback rate (destination not in table)".to_string(),
    };
    println!("{}: {:.2} via {rule}", quote.destination, quote.price);
    Ok(())
}

fn run_next_status(raw: &str) -> CliResult {
    let status = ShipmentStatus::parse(raw).ok_or_else(|| format!("unknown status: {raw}"))?;
    match next_status(status) {
        Some(next) => println!("{} -> {}", status.label(), next.label()),
        None => println!("{} is terminal", status.label()),
    }
    Ok(())
}

fn run_validate_complaint(file: PathBuf) -> CliResult {
    let items: Vec<ComplaintItem> = serde_json::from_str(&fs::read_to_string(file)?)?;
    let validation = validate_complaint_items(&items);
    if validation.is_valid {
        println!("{} item(s) OK", items.len());
        return Ok(());
    }
    for error in &validation.errors {
        println!("- {error}");
    }
    Err(format!("{} problem(s) found", validation.errors.len()).into())
}

async fn run_login(email: &str, password: &str) -> CliResult {
    let settings = load_settings();
    let client = ApiClient::new(&settings.effective_api_url())?;
    let result = client.login(email, password).await;

    let mut audit = load_audit_log();
    let (level, outcome) = match &result {
        Ok(_) => (AuditLevel::Security, "ok"),
        Err(_) => (AuditLevel::Warning, "rejected"),
    };
    audit.record(
        "auth.login",
        level,
        Some(email),
        Some(serde_json::json!({ "outcome": outcome })),
    );
    save_audit_log(&audit)?;

    save_session(&result?)?;
    println!("signed in as {email}");
    Ok(())
}

fn run_logout() -> CliResult {
    save_session(&Default::default())?;
    let mut audit = load_audit_log();
    audit.record("auth.logout", AuditLevel::Security, None, None);
    save_audit_log(&audit)?;
    println!("signed out");
    Ok(())
}

async fn run_pay(invoice_id: &str, amount: f64, method: &str, date: Option<String>) -> CliResult {
    let method =
        PaymentMethod::parse(method).ok_or_else(|| format!("unknown payment method: {method}"))?;
    let settings = load_settings();
    let client = ApiClient::new(&settings.effective_api_url())?.with_session(load_session());

    let result = async {
        let invoices = client.invoices().await?;
        let invoice = invoices
            .iter()
            .find(|inv| inv.id == invoice_id)
            .ok_or_else(|| format!("unknown invoice: {invoice_id}"))?;
        let outcome = apply_payment_with(
            invoice,
            amount,
            method,
            date.unwrap_or_else(today_iso),
            settings.default_currency,
        );
        let payment = client.create_payment(&outcome.payment).await?;
        let invoice = client.update_invoice(&outcome.invoice).await?;
        Ok::<_, Box<dyn std::error::Error>>((payment, invoice))
    }
    .await;
    save_session(&client.session().await)?;

    let mut audit = load_audit_log();
    let (payment, invoice) = match result {
        Ok(done) => done,
        Err(err) => {
            audit.record(
                "payment.create",
                AuditLevel::Error,
                None,
                Some(serde_json::json!({ "invoice": invoice_id, "error": err.to_string() })),
            );
            save_audit_log(&audit)?;
            return Err(err);
        }
    };
    audit.record(
        "payment.create",
        AuditLevel::Info,
        None,
        Some(serde_json::json!({
            "invoice": invoice.id,
            "payment": payment.id,
            "amount": payment.amount,
        })),
    );
    save_audit_log(&audit)?;
    println!(
        "payment {} of {:.2} {:?}: invoice {} now {:?}, {:.2} outstanding",
        payment.id,
        payment.amount,
        payment.currency,
        invoice.id,
        invoice.status,
        invoice.outstanding_balance
    );
    Ok(())
}

async fn run_sync_rates() -> CliResult {
    let settings = load_settings();
    let client = ApiClient::new(&settings.effective_api_url())?.with_session(load_session());
    let payload = client.destination_rates().await;
    // Tokens may have been rotated even when the request itself failed.
    save_session(&client.session().await)?;

    let mut audit = load_audit_log();
    let payload = match payload {
        Ok(payload) => payload,
        Err(err) => {
            audit.record(
                "rates.sync",
                AuditLevel::Error,
                None,
                Some(serde_json::json!({ "error": err.to_string() })),
            );
            save_audit_log(&audit)?;
            return Err(err.into());
        }
    };

    let cache = RateTableCache::new(payload.data.rates().to_vec());
    save_rate_cache(&default_cache_path(), &cache)?;
    audit.record(
        "rates.sync",
        AuditLevel::Info,
        None,
        Some(serde_json::json!({ "rates": cache.rates.len() })),
    );
    save_audit_log(&audit)?;
    println!("{} destination rate(s) cached", cache.rates.len());
    Ok(())
}

fn run_config(api_url: Option<String>) -> CliResult {
    let mut settings = load_settings();
    if let Some(url) = api_url {
        settings.api_base_url = url.clone();
        save_settings(&settings)?;

        let mut audit = load_audit_log();
        audit.record(
            "settings.update",
            AuditLevel::Security,
            None,
            Some(serde_json::json!({ "api_base_url": url })),
        );
        save_audit_log(&audit)?;
    }
    println!("{APP_NAME} {}", version_label());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn run_audit(limit: usize) -> CliResult {
    let audit = load_audit_log();
    if audit.is_empty() {
        println!("no audit entries");
        return Ok(());
    }
    for entry in audit.recent(limit) {
        println!("{} [{:?}] {}", entry.time, entry.level, entry.action);
    }
    Ok(())
}
