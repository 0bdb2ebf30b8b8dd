//! Example walking both identity paths against the built-in providers
//!
//! This example demonstrates:
//! 1. Building provider configurations (environment with fallbacks)
//! 2. Starting a login and handing the CSRF state to the caller
//! 3. Completing the callback path
//! 4. The direct access-token path

use idfed_oauth2::{HttpSettings, OAuth2Provider, ProviderAdapter, amazon, microsoft};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let microsoft_config = microsoft::from_env().unwrap_or_else(|_| {
        microsoft::config(
            "your-microsoft-client-id".to_string(),
            "your-microsoft-client-secret".to_string(),
            "http://localhost:8000/auth/microsoft/callback".to_string(),
        )
    });

    let amazon_config = amazon::from_env().unwrap_or_else(|_| {
        amazon::config(
            "your-amazon-client-id".to_string(),
            "your-amazon-client-secret".to_string(),
            "http://localhost:8000/auth/amazon/callback".to_string(),
        )
    });

    let settings = HttpSettings::default();
    let provider = OAuth2Provider::new(microsoft_config, &settings)?;

    println!("Identity Federation Example");
    println!("===========================");

    // Step 1: Begin login.
    println!(
        "\n1. Beginning login with {} (scopes: {})...",
        provider.provider_id(),
        provider.config().scopes.join(" ")
    );

    let redirect = provider.begin_login();
    println!("Redirect the user to: {}", redirect.redirect_url);
    println!("Store this CSRF state in the session cookie: {}", redirect.csrf_state);

    // Step 2: Complete the callback. In a real application `received_state`
    // and `code` come from the provider's redirect back to you, and the
    // stored state comes out of the cookie.
    println!("\n2. Simulating the callback...");

    match provider
        .complete_login(&redirect.csrf_state, &redirect.csrf_state, "simulated-code")
        .await
    {
        Ok(payload) => {
            println!(
                "Identity payload: {} bytes from {}",
                payload.body.len(),
                payload.provider_id
            );
            println!("Hand these bytes to your user store for get-or-create.");
        }
        Err(e) => {
            println!("Login failed: {e}");
            println!("(Expected without real credentials and a real authorization code.)");
        }
    }

    // Step 3: The direct path, for callers that already hold an access token
    // (e.g. a mobile client that ran the flow natively).
    println!("\n3. Direct access-token path with amazon...");

    let amazon_provider = OAuth2Provider::new(amazon_config, &settings)?;
    match amazon_provider
        .fetch_identity_by_token("pre-obtained-access-token")
        .await
    {
        Ok(payload) => println!("Identity payload: {} bytes", payload.body.len()),
        Err(e) => println!("Fetch failed: {e} (expected without a real token)"),
    }

    Ok(())
}
