#[tokio::main]
async fn main() {
    cardiowell::run().await;
}
