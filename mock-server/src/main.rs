use quorum_mock_server::Account;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let port = env_or("PORT", "3000");
    let username = env_or("MOCK_QUORUM_USERNAME", "mockValidUsername");
    let api_key = env_or("MOCK_QUORUM_API_KEY", "mockValidApiKey");

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    quorum_mock_server::run(listener, Account::new(username, api_key)).await
}
