use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Contact form fields. Scalars other than strings are accepted and turned
/// into text; `false`, `0` and `null` count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactRequest {
    /// Sender name
    #[serde(deserialize_with = "scalar_text")]
    pub name: Option<String>,
    /// Sender email address
    #[serde(deserialize_with = "scalar_text")]
    pub email: Option<String>,
    /// Budget code (`vitrine`, `ecommerce`, `app`, `custom` or free-form)
    #[serde(deserialize_with = "scalar_text")]
    pub budget: Option<String>,
    /// Message body
    #[serde(deserialize_with = "scalar_text")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Int(0) | Self::Bool(false) => None,
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) if f == 0.0 || f.is_nan() => None,
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(true) => Some("true".to_string()),
        }
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the process started
    pub uptime: f64,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}
