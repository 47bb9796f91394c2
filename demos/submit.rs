use premailer_client::{Client, Error, SslMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("premailer_client=debug")),
        )
        .init();

    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://dialect.ca/premailer-tests/base.html".to_string());

    let mut client = Client::new()?;
    client
        .options_mut()
        .url(source)
        .set_link_query_string("utm_source=premailer")
        .set_remove_comments(true);

    let Some(response) = client.submit().await?.response() else {
        return Ok(());
    };

    println!(
        "status={:?} message={:?} version={:?}",
        response.status(),
        response.message(),
        response.version()
    );

    if !response.is_success() {
        return Ok(());
    }

    for (name, value) in response.options() {
        println!("option {name} = {value}");
    }

    println!("--- html ---\n{}", response.get_html(SslMode::Verify).await?);
    println!("--- text ---\n{}", response.get_text(SslMode::Verify).await?);

    Ok(())
}
