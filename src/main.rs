#[tokio::main]
async fn main() {
    readly::start_server().await;
}
