//! HMAC 署名付きトークンのエンコード/デコード。

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;

use crate::claims::Claims;
use crate::config::TokenConfig;

/// CodecError はトークンのエンコード・デコードに関するエラーを表す。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token encoding failed: {0}")]
    Encode(String),

    #[error("invalid codec configuration: {0}")]
    InvalidConfig(String),
}

/// TokenCodec は共有シークレットでトークンを署名・検証する。
///
/// 署名検証は Claim を読む前に行われ、有効期限は `now >= exp + leeway` で失効と判定する。
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_secs: i64,
}

impl TokenCodec {
    /// HMAC 系アルゴリズム（HS256 / HS384 / HS512）のみ受け付ける。
    pub fn new(secret: &[u8], algorithm: Algorithm, leeway_secs: u64) -> Result<Self, CodecError> {
        if secret.is_empty() {
            return Err(CodecError::InvalidConfig("signing secret is empty".into()));
        }
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(CodecError::InvalidConfig(format!(
                "unsupported algorithm: {:?}",
                algorithm
            )));
        }
        let leeway_secs = i64::try_from(leeway_secs)
            .map_err(|_| CodecError::InvalidConfig("leeway is too large".into()))?;

        let mut validation = Validation::new(algorithm);
        // exp は decode_at で厳密に判定する
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            leeway_secs,
        })
    }

    /// TokenConfig から TokenCodec を生成する。
    pub fn from_config(cfg: &TokenConfig) -> Result<Self, CodecError> {
        let algorithm: Algorithm = cfg
            .algorithm
            .parse()
            .map_err(|_| CodecError::InvalidConfig(format!("unknown algorithm: {}", cfg.algorithm)))?;
        Self::new(
            cfg.secret.expose_secret().as_bytes(),
            algorithm,
            cfg.leeway_secs,
        )
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Claims を署名付きトークン文字列にエンコードする。
    pub fn encode(&self, claims: &Claims) -> Result<String, CodecError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// 現在時刻でトークンをデコード・検証する。
    pub fn decode(&self, token: &str) -> Result<Claims, CodecError> {
        self.decode_at(token, chrono::Utc::now().timestamp())
    }

    /// 指定時刻 `now`（Unix 秒）でトークンをデコード・検証する。
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, CodecError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    CodecError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => CodecError::Expired,
                _ => CodecError::Malformed(e.to_string()),
            }
        })?;
        let claims = data.claims;

        if claims.subject_id().is_none() {
            return Err(CodecError::Malformed(format!(
                "subject is not an integer id: {}",
                claims.sub
            )));
        }

        if now >= claims.exp.saturating_add(self.leeway_secs) {
            return Err(CodecError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}
