#[tokio::main]
async fn main() {
    if let Err(e) = medreport_lib::run().await {
        eprintln!("medreport: {e}");
        std::process::exit(1);
    }
}
