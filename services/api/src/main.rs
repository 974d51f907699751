use agency_ats_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("agency-ats error: {err}");
        std::process::exit(1);
    }
}
