use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    activity_cli::main_entry().await
}
