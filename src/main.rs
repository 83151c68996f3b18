use anyhow::Context;
use hotel_reservation::{
    logging::setup_tracing, AppConfig, Dispatcher, Shell, SimulatedPayment, Store,
};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(db_path = %config.db_path.display(), "starting hotel reservation manager");

    let store = Store::new(&config.db_path);
    let hotel = store.load_or_create();
    let payment = SimulatedPayment::new(&config.payment);

    let dispatcher = Dispatcher::new(hotel, store, Box::new(payment));
    let shell = Shell::new(BufReader::new(tokio::io::stdin()), std::io::stdout(), dispatcher);

    shell.run().await.context("terminal I/O failed")?;
    Ok(())
}
