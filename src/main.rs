//! mana-order - CLI for browsing the menu and building WhatsApp orders.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mana_order_rs::clock::parse_local_datetime;
use mana_order_rs::schedule::unavailable_message;
use mana_order_rs::{
    format_price, load_configured_catalog, load_order_request, AvailabilityGate, Catalog, Clock,
    DeliveryForm, DeliveryMode, FixedClock, OpenStatusWatcher, ReplayOutcome, ScheduleFlow,
    StoreConfig, Storefront, SystemClock, TimeSlot, ViaCepClient,
};

/// Browse the Maná Lanches menu and build WhatsApp orders.
#[derive(Parser, Debug)]
#[command(name = "mana-order")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Store configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories, or the items of one category
    Menu {
        /// Category key, e.g. "artesanais"
        #[arg(long)]
        category: Option<String>,
    },

    /// Replay an order file and print the WhatsApp message and link
    Order {
        /// Order request (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Override the file's delivery mode (retirada or entrega)
        #[arg(short, long)]
        mode: Option<DeliveryMode>,

        /// Pretend the current time is this (HH:MM or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,

        /// Output the cart and totals as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the time slots still available today
    Slots {
        /// Pretend the current time is this (HH:MM or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,
    },

    /// Build a scheduling request for a slot today
    Schedule {
        /// Slot to request, e.g. 20:30
        #[arg(short, long)]
        slot: TimeSlot,

        /// Pretend the current time is this (HH:MM or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,
    },

    /// Look up a postal code in the delivery area
    Cep {
        /// Postal code (CEP)
        postal_code: String,

        /// Street number to attach to the address
        #[arg(short, long)]
        number: Option<String>,
    },

    /// Show whether the store is open
    Status {
        /// Keep polling and print every change
        #[arg(short, long)]
        watch: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => StoreConfig::default(),
    };

    if config.open_hour >= config.close_hour {
        warn!(
            "Opening hour {} is not before closing hour {}; the store will never open",
            config.open_hour, config.close_hour
        );
    }

    match args.command {
        Command::Menu { category } => {
            let catalog = load_configured_catalog(&config)?;
            print_menu(&catalog, category.as_deref())
        }
        Command::Order {
            file,
            mode,
            at,
            json,
        } => {
            let catalog = load_configured_catalog(&config)?;
            let clock = resolve_clock(at.as_deref())?;
            run_order(catalog, config, clock, &file, mode, json)
        }
        Command::Slots { at } => {
            let now = resolve_clock(at.as_deref())?.now();
            let flow = ScheduleFlow::open(&config, now);
            if flow.is_unavailable() {
                println!("{}", unavailable_message(&config));
            } else {
                for slot in flow.slots() {
                    println!("{}", slot);
                }
            }
            Ok(())
        }
        Command::Schedule { slot, at } => {
            let now = resolve_clock(at.as_deref())?.now();
            let mut flow = ScheduleFlow::open(&config, now);
            if flow.is_unavailable() {
                println!("{}", unavailable_message(&config));
                anyhow::bail!("No slots left today");
            }
            flow.select(slot)?;
            let link = flow.submit(now.date(), &config)?;
            println!("{}", link.message);
            println!("{}", link);
            Ok(())
        }
        Command::Cep {
            postal_code,
            number,
        } => {
            let client = ViaCepClient::new(config.lookup_base_url.clone());
            let mut form = DeliveryForm::new(config.allowed_city.clone());
            form.set_postal_code(postal_code);
            if let Some(number) = number {
                form.set_number(number);
            }
            match form.lookup(&client) {
                Ok(address) => {
                    println!("Rua:    {}", address.street);
                    println!("Bairro: {}", address.neighborhood);
                    println!("Cidade: {}", address.city);
                    if !address.number.is_empty() {
                        println!("Número: {}", address.number);
                    }
                    Ok(())
                }
                Err(err) => {
                    error!("{}", err);
                    anyhow::bail!(err.user_message())
                }
            }
        }
        Command::Status { watch } => run_status(&config, watch),
    }
}

/// A fixed clock for `--at`, otherwise the local clock.
fn resolve_clock(at: Option<&str>) -> Result<Box<dyn Clock>> {
    match at {
        Some(value) => {
            let today = SystemClock.now().date();
            let instant = parse_local_datetime(value, today)?;
            info!("Using {} as the current time", instant.format("%Y-%m-%d %H:%M"));
            Ok(Box::new(FixedClock(instant)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

fn print_menu(catalog: &Catalog, category: Option<&str>) -> Result<()> {
    let Some(category) = category else {
        for category in &catalog.categories {
            let count = catalog.items_in_category(&category.id).count();
            println!("{:<12} {} ({} item(s))", category.id, category.name, count);
        }
        return Ok(());
    };

    let heading = catalog
        .find_category(category)
        .with_context(|| format!("Unknown category '{}'", category))?;
    println!("{}", heading.name);

    for item in catalog.items_in_category(category) {
        println!();
        println!("[{}] {}  {}", item.id, item.name, format_price(item.display_price()));
        if !item.description.is_empty() {
            println!("    {}", item.description);
        }
        for size in item.sizes() {
            println!("    tamanho {:<8} {}", size.size, format_price(size.price));
        }
        for topping in item.toppings() {
            println!("    + {:<22} {}", topping.name, format_price(topping.price));
        }
        for addon in &item.addons {
            println!("    + {:<22} {}", addon.name, format_price(addon.price));
        }
    }
    Ok(())
}

fn run_order(
    catalog: Catalog,
    config: StoreConfig,
    clock: Box<dyn Clock>,
    file: &Path,
    mode: Option<DeliveryMode>,
    json: bool,
) -> Result<()> {
    let mut request = load_order_request(file)
        .with_context(|| format!("Failed to read order {}", file.display()))?;
    if let Some(mode) = mode {
        request.mode = mode;
    }

    let lookup_base_url = config.lookup_base_url.clone();
    let mut shop = Storefront::new(catalog, config, clock);
    info!("{}", shop.status_banner());

    match shop.replay(&request) {
        Ok(ReplayOutcome::Committed(lines)) => {
            info!("Committed {} line(s)", lines.len());
        }
        Ok(ReplayOutcome::ScheduleRequired(flow)) => {
            warn!("Store is closed; orders must be scheduled");
            if flow.is_unavailable() {
                println!("{}", unavailable_message(shop.config()));
            } else {
                let slots: Vec<String> = flow.slots().iter().map(ToString::to_string).collect();
                println!("Horários disponíveis: {}", slots.join(", "));
                println!("{}", shop.submit_schedule(&flow)?);
            }
            return Ok(());
        }
        Err(err) => {
            error!("{}", err);
            anyhow::bail!(err.user_message());
        }
    }

    if shop.cart().delivery_mode().is_delivery() && request.postal_code.is_some() {
        let client = ViaCepClient::new(lookup_base_url);
        if let Err(err) = shop.lookup_address(&client) {
            warn!("{}", err.user_message());
        }
    }

    if json {
        let output = serde_json::json!({
            "items": shop.cart().items(),
            "delivery_mode": shop.cart().delivery_mode(),
            "totals": shop.totals(),
            "address": shop.delivery().address(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let link = shop.submit_order().map_err(|err| anyhow::anyhow!(err.user_message()))?;
    println!("{}", link.message);
    println!();
    println!("{}", link);
    Ok(())
}

fn run_status(config: &StoreConfig, watch: bool) -> Result<()> {
    let gate = AvailabilityGate::from_config(config);

    if !watch {
        let status = gate.status_at(SystemClock.now());
        println!("{}", gate.banner(status));
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let _watcher = OpenStatusWatcher::spawn(SystemClock, gate, config.poll_interval(), tx)
        .context("Failed to start status watcher")?;

    for status in rx {
        println!("{}", gate.banner(status));
    }
    Ok(())
}
