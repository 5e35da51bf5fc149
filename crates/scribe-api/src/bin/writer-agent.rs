use scribe_api::{serve, Role};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    serve(Role::Writer).await
}
