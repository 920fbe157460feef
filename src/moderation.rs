pub mod access_token;
pub mod image;
pub mod text;

pub const DEFAULT_BASE_ADDRESS: &str = "http://a.resok.cn";

fn base_address_default() -> String {
    DEFAULT_BASE_ADDRESS.to_string()
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "base_address_default")]
    pub base_address: String,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_address: base_address_default(),
            timeout_secs: None,
        }
    }
}

impl std::str::FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response not as expected ({0})")]
    Status(reqwest::StatusCode),

    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Client for the content moderation service.
///
/// Holds nothing but the base address and a connection pool, so a single
/// instance (or its clones) can be shared freely across tasks.
#[derive(Clone, Debug)]
pub struct Client {
    client: reqwest::Client,
    base_address: String,
}

impl Client {
    /// Creates a client against `base_address`, or [`DEFAULT_BASE_ADDRESS`] when none is given.
    pub fn new(base_address: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_address: base_address.unwrap_or(DEFAULT_BASE_ADDRESS).to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder = reqwest::ClientBuilder::new();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_address: config.base_address.clone(),
        })
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_address.trim_end_matches('/'), path)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let resp = req.send().await.map_err(|e| e.without_url())?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            log::debug!("unexpected status {} from {}", status, resp.url().path());
            return Err(Error::Status(status));
        }

        Ok(resp)
    }

    async fn do_get(&self, path: &str) -> Result<reqwest::Response, Error> {
        log::debug!("GET /{}", path);
        self.send(self.client.get(self.url(path))).await
    }

    async fn do_json_request<Req>(&self, path: &str, req: &Req) -> Result<reqwest::Response, Error>
    where
        Req: serde::Serialize,
    {
        log::debug!("POST /{}", path);
        self.send(self.client.post(self.url(path)).json(req)).await
    }

    async fn do_multipart_request(&self, path: &str, form: reqwest::multipart::Form) -> Result<reqwest::Response, Error> {
        log::debug!("POST /{} (multipart)", path);
        self.send(self.client.post(self.url(path)).multipart(form)).await
    }

    pub async fn access_token(&self, app_id: &str) -> Result<access_token::AccessToken, Error> {
        let resp = self.do_get(&format!("access_token/{}", app_id)).await?;
        decode(resp).await
    }

    pub async fn refresh_access_token(&self, app_id: &str) -> Result<(), Error> {
        self.do_get(&format!("reset_access_token/{}", app_id)).await?;
        Ok(())
    }

    /// Returns `true` only when the service answers 200.
    ///
    /// Transport failures and rejections are both reported as `false`.
    pub async fn text_security_check(&self, text: &str) -> bool {
        match self.do_json_request("hit_text", &text::CheckRequest::new(text)).await {
            Ok(_) => true,
            Err(e) => {
                log::debug!("text check failed: {}", e);
                false
            }
        }
    }

    /// Uploads the file at `path` under its base name.
    pub async fn image_security_check_from_path(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<image::ModerationResult, Error> {
        let upload = image::Upload::from_path(path).await?;
        self.upload(upload).await
    }

    pub async fn image_security_check_from_url(&self, url: &str) -> Result<image::ModerationResult, Error> {
        let resp = self.do_json_request("img_check_url", &image::UrlCheckRequest::new(url)).await?;
        decode(resp).await
    }

    /// Uploads `content` under `file_name` without touching the filesystem.
    pub async fn image_security_check_from_bytes(
        &self,
        content: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
    ) -> Result<image::ModerationResult, Error> {
        self.upload(image::Upload::new(file_name, content)).await
    }

    async fn upload(&self, upload: image::Upload) -> Result<image::ModerationResult, Error> {
        let form = upload.into_form()?;
        let resp = self.do_multipart_request("img_check", form).await?;
        decode(resp).await
    }
}

async fn decode<T>(resp: reqwest::Response) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
{
    let body = resp.bytes().await.map_err(|e| e.without_url())?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = Client::new(Some("http://localhost:8080"));
        assert_eq!(client.url("hit_text"), "http://localhost:8080/hit_text");
    }

    #[test]
    fn url_ignores_trailing_slash() {
        let client = Client::new(Some("http://localhost:8080/"));
        assert_eq!(client.url("access_token/abc"), "http://localhost:8080/access_token/abc");
    }

    #[test]
    fn new_defaults_base_address() {
        assert_eq!(Client::new(None).base_address(), DEFAULT_BASE_ADDRESS);
    }

    #[test]
    fn config_from_empty_toml() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_from_toml() {
        let config: Config = "base_address = \"http://127.0.0.1:9000\"\ntimeout_secs = 5\n".parse().unwrap();
        assert_eq!(config.base_address, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_secs, Some(5));

        let client = Client::from_config(&config).unwrap();
        assert_eq!(client.base_address(), "http://127.0.0.1:9000");
    }

    #[test]
    fn status_error_message() {
        let e = Error::Status(reqwest::StatusCode::FORBIDDEN);
        assert_eq!(e.to_string(), "response not as expected (403 Forbidden)");
    }
}
