#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
pub struct AccessToken {
    pub token: String,
}
