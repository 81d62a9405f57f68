//! nscheck - audit DNS zones against their live delegations

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    nscheck_cli::run().await
}
