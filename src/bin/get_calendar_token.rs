use weekplan::components::google_calendar::token::{
    StoredToken, TokenManager, TokenResponse, CALENDAR_SCOPE, TOKEN_URL,
};
use weekplan::config::Config;
use weekplan::error::{other_error, PlannerResult};

const REDIRECT_URI: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await?;
    Ok(())
}

async fn run() -> PlannerResult<()> {
    // Load configuration
    let config = Config::load()?;
    let token_manager = TokenManager::new(&config);

    // Generate random state for security
    let state = uuid::Uuid::new_v4().to_string();

    let mut auth_url = url::Url::parse("https://accounts.google.com/o/oauth2/v2/auth")
        .map_err(|e| other_error(&format!("Failed to parse URL: {}", e)))?;
    auth_url
        .query_pairs_mut()
        .append_pair("client_id", &config.google_client_id)
        .append_pair("redirect_uri", REDIRECT_URI)
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("scope", CALENDAR_SCOPE)
        .append_pair("state", &state);

    // Open browser for authorization
    println!("Opening browser for Google Calendar authorization...");
    if webbrowser::open(auth_url.as_str()).is_err() {
        println!("Could not open a browser, visit this URL instead:\n{}", auth_url);
    }

    // Start local server to receive the callback
    let server = tiny_http::Server::http("127.0.0.1:8080")
        .map_err(|e| other_error(&format!("Failed to start callback server: {}", e)))?;
    println!("Waiting for authorization callback...");

    let request = server.recv()?;
    let callback = url::Url::parse(&format!("{}{}", REDIRECT_URI, request.url()))
        .map_err(|e| other_error(&format!("Invalid callback URL: {}", e)))?;

    let param = |name: &str| {
        callback
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if param("state").as_deref() != Some(state.as_str()) {
        return Err(other_error("State mismatch in authorization callback"));
    }
    let code = param("code").ok_or_else(|| other_error("No authorization code found in callback"))?;

    // Exchange code for tokens
    let client = reqwest::Client::new();
    let response = client
        .post(TOKEN_URL)
        .form(&[
            ("client_id", config.google_client_id.as_str()),
            ("client_secret", config.google_client_secret.as_str()),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(other_error(&format!("Failed to get token: {}", error_text)));
    }

    let token_data: TokenResponse = response.json().await?;
    token_manager
        .set_token(StoredToken::from_response(token_data, None))
        .await?;

    // Send success response to browser
    let response =
        tiny_http::Response::from_string("Authorization successful! You can close this window.");
    request.respond(response)?;

    println!("Token successfully saved to {}!", config.token_file);

    Ok(())
}
