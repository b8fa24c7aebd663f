#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lingodeck_backend::run().await
}
