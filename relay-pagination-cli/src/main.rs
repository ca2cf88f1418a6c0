use relay_pagination_cli::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
