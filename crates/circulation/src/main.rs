//! Runs a scripted session at the circulation desk: a late return, a reservation that is
//! handed off to its member, and a cancelled reservation.
//!
//! Needs `LOAN_PERIOD_DAYS` and `FEE_PER_LATE_DAY`, from the environment or a `.env` file.

use chrono::NaiveDate;
use circulation::config::CirculationConfig;
use circulation::directory::InMemoryDirectory;
use circulation::lifecycle::{setup_tracing, CirculationDesk};
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info, Instrument};

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, String> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("invalid date {year}-{month}-{day}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = CirculationConfig::from_env()?;
    info!("Starting circulation desk");

    let directory = Arc::new(InMemoryDirectory::with_entries(
        ["alice", "bob"],
        ["dune", "emma"],
    ));
    let desk = CirculationDesk::new(config, directory);

    // Alice borrows Dune; Bob reserves it while it is out
    let span = tracing::info_span!("lending");
    let borrowing = async {
        let borrowing = desk.check_out("alice", "dune", date(2024, 1, 10)?).await?;
        info!(number = %borrowing.number(), due = %borrowing.due_date(), "Checked out");
        let reservation = desk.reserve("bob", "dune", date(2024, 1, 12)?).await?;
        info!(number = %reservation.number(), "Reserved");
        Ok::<_, Box<dyn Error>>(borrowing)
    }
    .instrument(span)
    .await?;

    // Alice returns late; Bob is next in line and picks the book up
    let span = tracing::info_span!("handoff");
    async {
        let outcome = desk.return_book(borrowing.id(), date(2024, 2, 1)?).await?;
        info!(late_fee = outcome.borrowing.late_fee(), "Returned");

        if let Some(next) = outcome.next_reservation {
            let handoff = desk.claim_reservation(next.id(), date(2024, 2, 2)?).await?;
            info!(
                reservation = %handoff.reservation.number(),
                borrowing = %handoff.borrowing.number(),
                "Handed off"
            );
        }
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(span)
    .await?;

    // Alice reserves Emma and changes her mind
    let reservation = desk.reserve("alice", "emma", date(2024, 2, 3)?).await?;
    desk.cancel_reservation(reservation.id()).await?;
    match desk.claim_reservation(reservation.id(), date(2024, 2, 4)?).await {
        Ok(_) => error!("Cancelled reservation was claimed"),
        Err(e) => info!(error = %e, "Claim refused as expected"),
    }

    // Unknown members are turned away
    if let Err(e) = desk.check_out("mallory", "emma", date(2024, 2, 5)?).await {
        info!(error = %e, "Check-out refused");
    }

    desk.shutdown().await?;
    info!("Session complete");
    Ok(())
}
