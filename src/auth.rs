use crate::configuration::Configuration;
use crate::format::{Formattable, FormattingError, OutputFormat};
use crate::http_utils::USER_AGENT;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Authentication failed: HTTP {status} {message}")]
    AuthFailed {
        status: reqwest::StatusCode,
        message: String,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: String,
}

impl Formattable for TokenResponse {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                if options.with_headers {
                    wtr.write_record(["ACCESS_TOKEN", "EXPIRES_IN", "TOKEN_TYPE"])?;
                }
                wtr.write_record([
                    self.access_token.as_str(),
                    self.expires_in.to_string().as_str(),
                    self.token_type.as_str(),
                ])?;
                Ok(String::from_utf8(wtr.into_inner()?)?)
            }
            OutputFormat::Text(_) => Ok(self.access_token.clone()),
            OutputFormat::Tree(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}

/// OAuth 2.0 client credentials flow against the APS authentication service
pub struct AuthClient {
    token_url: Url,
    scope: String,
    timeout: u64,
    client_id: String,
    client_secret: String,
}

impl AuthClient {
    pub fn new(client_id: String, client_secret: String, configuration: &Configuration) -> Self {
        Self {
            token_url: configuration.auth_url().clone(),
            scope: configuration.scope().to_string(),
            timeout: configuration.timeout(),
            client_id,
            client_secret,
        }
    }

    pub async fn get_access_token(&self) -> Result<String, AuthError> {
        Ok(self.request_token().await?.access_token)
    }

    pub async fn request_token(&self) -> Result<TokenResponse, AuthError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(self.timeout))
            .build()?;

        tracing::debug!("Authenticating with token URL: {}", &self.token_url);
        tracing::debug!("Client ID: {}", &self.client_id);

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ];

        let response = client
            .post(self.token_url.clone())
            .form(&params)
            .send()
            .await?;

        tracing::debug!("Authentication response status: {}", response.status());

        if response.status().is_success() {
            let token_response = response.json::<TokenResponse>().await?;
            tracing::debug!(
                "Authentication successful, token expires in {} seconds",
                token_response.expires_in
            );
            return Ok(token_response);
        }

        let status = response.status();
        let error_body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to read error response body: {}", e);
                "Unable to read error response body".to_string()
            }
        };

        tracing::error!(
            "Authentication request failed with status {}: {}",
            status,
            &error_body
        );

        Err(AuthError::AuthFailed {
            status,
            message: describe_oauth_error(&error_body),
        })
    }
}

/// Turn an OAuth error body into a readable message, falling back to the raw body
fn describe_oauth_error(error_body: &str) -> String {
    let error_json = match serde_json::from_str::<serde_json::Value>(error_body) {
        Ok(error_json) => error_json,
        Err(json_err) => {
            tracing::warn!(
                "Failed to parse error response as JSON: {}. Raw error: {}",
                json_err,
                error_body
            );
            return error_body.to_string();
        }
    };

    let Some(error_str) = error_json.get("error").and_then(|v| v.as_str()) else {
        return error_body.to_string();
    };

    let error_description = error_json
        .get("error_description")
        .and_then(|v| v.as_str())
        .map(|desc| format!(" - {}", desc))
        .unwrap_or_default();

    match error_str {
        "invalid_client" => format!(
            "Invalid client credentials{}. Please check your client ID and secret.",
            error_description
        ),
        "invalid_scope" => format!(
            "Invalid scope{}. Check the scope in the configuration file.",
            error_description
        ),
        "unauthorized_client" => format!(
            "Unauthorized client{}. The client is not authorized to use this authorization grant type.",
            error_description
        ),
        "invalid_request" => format!(
            "Invalid request{}. The request is missing required parameters or contains invalid parameters.",
            error_description
        ),
        _ => format!("{}{}", error_str, error_description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormatOptions;

    #[test]
    fn test_describe_invalid_client() {
        let body = r#"{"error": "invalid_client", "error_description": "The client credentials are invalid."}"#;
        let message = describe_oauth_error(body);
        assert!(message.starts_with("Invalid client credentials - The client credentials are invalid."));
    }

    #[test]
    fn test_describe_unknown_error_code() {
        let body = r#"{"error": "temporarily_unavailable"}"#;
        assert_eq!(describe_oauth_error(body), "temporarily_unavailable");
    }

    #[test]
    fn test_describe_non_json_body() {
        assert_eq!(describe_oauth_error("<html>Bad Gateway</html>"), "<html>Bad Gateway</html>");
        assert_eq!(describe_oauth_error(r#"{"message": "x"}"#), r#"{"message": "x"}"#);
    }

    #[test]
    fn test_token_response_decoding_and_text_format() {
        let json = r#"{"access_token": "abc.def", "token_type": "Bearer", "expires_in": 3599}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.expires_in, 3599);
        let text = token
            .format(&OutputFormat::Text(OutputFormatOptions::default()))
            .unwrap();
        assert_eq!(text, "abc.def");
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "auth_url: http://127.0.0.1:9/authentication/v2/token\ntimeout: 2\n",
        )
        .unwrap();
        let configuration = Configuration::load_from_file(&path).unwrap();

        let client = AuthClient::new("id".to_string(), "secret".to_string(), &configuration);
        assert!(matches!(
            client.get_access_token().await,
            Err(AuthError::HttpError(_))
        ));
    }
}
