use anyhow::Result;
use tag_balance::lsp::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    serve().await
}
