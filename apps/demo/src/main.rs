mod config;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use panel_core::{DemoPage, PanelServices, SimulatedScheduler};
use serde_json::json;
use shared::{
    domain::{DeliveryId, PanelTab, SlotId},
    protocol::PanelEvent,
};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "smartdeliver-demo", about = "Drive the SmartDeliver panels from a terminal")]
struct Cli {
    /// Print views and events as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    /// Config file; defaults to ./smartdeliver.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load recommendations, pick a window and schedule it.
    Schedule {
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Window id; the best-ranked window when omitted.
        #[arg(long)]
        slot: Option<String>,
        /// Make the scheduling backend reject the commit.
        #[arg(long)]
        fail_commit: bool,
    },
    /// Show active deliveries and one delivery's detail.
    Track {
        #[arg(long)]
        delivery: Option<String>,
    },
    /// Show the analytics dashboard.
    Analytics,
    /// Schedule, then visit the tracking and analytics tabs.
    Walkthrough,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let out = Output { json: cli.json };
    match cli.command {
        Command::Schedule {
            customer,
            address,
            slot,
            fail_commit,
        } => {
            let mut services = services(&settings);
            if fail_commit {
                services = services.with_scheduling(Arc::new(SimulatedScheduler::failing(
                    "scheduling backend rejected the window",
                )));
            }
            let customer = customer.unwrap_or_else(|| settings.customer_name.clone());
            let address = address.unwrap_or_else(|| settings.customer_address.clone());
            schedule(&out, services, &customer, &address, slot.as_deref()).await?;
        }
        Command::Track { delivery } => {
            let mut page = DemoPage::mount_at(services(&settings), PanelTab::Tracking);
            track(&out, &mut page, delivery.as_deref())?;
        }
        Command::Analytics => {
            let page = DemoPage::mount_at(services(&settings), PanelTab::Analytics);
            analytics(&out, &page)?;
        }
        Command::Walkthrough => walkthrough(&out, &settings).await?,
    }

    Ok(())
}

fn services(settings: &Settings) -> PanelServices {
    let mut services = PanelServices::simulated(settings.timings());
    services.event_capacity = settings.event_capacity;
    services
}

struct Output {
    json: bool,
}

impl Output {
    fn emit(&self, value: serde_json::Value, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }

    fn events(&self, rx: &mut broadcast::Receiver<PanelEvent>) -> Result<()> {
        let events = DemoPage::drain_events(rx);
        self.emit(json!({ "events": &events }), || {
            events
                .iter()
                .map(|event| format!("- {}\n", render::event(event)))
                .collect()
        })
    }
}

async fn schedule(
    out: &Output,
    services: PanelServices,
    customer: &str,
    address: &str,
    slot: Option<&str>,
) -> Result<()> {
    let mut page = DemoPage::mount(services);
    let mut rx = page.subscribe();
    schedule_on(out, &mut page, &mut rx, customer, address, slot).await
}

async fn schedule_on(
    out: &Output,
    page: &mut DemoPage,
    rx: &mut broadcast::Receiver<PanelEvent>,
    customer: &str,
    address: &str,
    slot: Option<&str>,
) -> Result<()> {
    let scheduler = page
        .scheduler()
        .context("scheduler tab is not mounted")?;
    scheduler.set_customer_name(customer);
    scheduler.set_address(address);

    let view = scheduler.view();
    out.emit(json!({ "scheduler": &view }), || render::scheduler(&view))?;

    let slots = match scheduler.recommendations().await {
        Ok(slots) => slots,
        Err(err) => {
            out.events(rx)?;
            return Err(err).context("cannot schedule without delivery windows");
        }
    };
    let slot_id = match slot {
        Some(id) => SlotId::from(id),
        None => slots
            .first()
            .map(|slot| slot.id.clone())
            .context("no delivery windows offered")?,
    };
    scheduler.select_slot(&slot_id)?;
    let view = scheduler.view();
    out.emit(json!({ "scheduler": &view }), || render::scheduler(&view))?;

    scheduler.submit()?;
    info!(slot = %slot_id, "submission started");
    let outcome = scheduler.submission_settled().await;
    out.events(rx)?;
    if let Some(outcome) = outcome {
        out.emit(json!({ "outcome": &outcome }), || {
            format!("{}\n", render::submission(&outcome))
        })?;
    }
    Ok(())
}

fn track(out: &Output, page: &mut DemoPage, delivery: Option<&str>) -> Result<()> {
    let tracking = page.tracking().context("tracking tab is not mounted")?;
    if let Some(id) = delivery {
        tracking.select_delivery(&DeliveryId::from(id))?;
    }
    let rows = tracking.rows();
    let detail = tracking.detail().clone();
    out.emit(json!({ "deliveries": &rows, "detail": &detail }), || {
        format!("{}\n{}", render::deliveries(&rows), render::detail(&detail))
    })
}

fn analytics(out: &Output, page: &DemoPage) -> Result<()> {
    let view = page
        .analytics()
        .context("analytics tab is not mounted")?
        .view();
    out.emit(json!({ "analytics": &view }), || render::analytics(&view))
}

async fn walkthrough(out: &Output, settings: &Settings) -> Result<()> {
    let mut page = DemoPage::mount(services(settings));
    let mut rx = page.subscribe();

    schedule_on(
        out,
        &mut page,
        &mut rx,
        &settings.customer_name,
        &settings.customer_address,
        Some("3"),
    )
    .await?;

    page.select_tab(PanelTab::Tracking);
    track(out, &mut page, Some("DEL002"))?;

    page.select_tab(PanelTab::Analytics);
    analytics(out, &page)?;

    out.events(&mut rx)
}
