use mock_server::Credentials;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let defaults = Credentials::default();
    let credentials = Credentials {
        account: std::env::var("MOCK_ACCOUNT").unwrap_or(defaults.account),
        passwd: std::env::var("MOCK_PASSWD").unwrap_or(defaults.passwd),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, account = %credentials.account, "listening");
    mock_server::run_with(listener, credentials).await
}
