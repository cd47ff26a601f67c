#[tokio::main]
async fn main() {
    if let Err(e) = barber_booking::run().await {
        eprintln!("barber-booking failed to start: {}", e);
        std::process::exit(1);
    }
}
