//! テスト: トークン発行 → 検証 → 認可の一連の流れ

#[cfg(test)]
mod tests {
    use crate::claims::{Claims, IdentityContext};
    use crate::codec::{CodecError, TokenCodec};
    use crate::config::TokenConfig;
    use crate::issuer::TokenIssuer;
    use crate::rbac::{authorize, OwnerScope, Requirement};
    use crate::role::Role;
    use crate::verifier::{AuthError, TokenVerifier};
    use chrono::Duration;
    use std::sync::Arc;

    const TEST_SECRET: &str = "integration-test-secret";

    fn setup(ttl_minutes: i64) -> (TokenIssuer, TokenVerifier) {
        let codec = Arc::new(TokenCodec::from_config(&TokenConfig::new(TEST_SECRET)).unwrap());
        (
            TokenIssuer::new(codec.clone(), Duration::minutes(ttl_minutes)),
            TokenVerifier::new(codec),
        )
    }

    /// トークンの署名部 1 文字を別の文字に置き換える。
    fn tamper_signature(token: &str) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        let idx = chars.len() / 2;
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", head, chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let (issuer, verifier) = setup(60);

        let token = issuer.issue(7, Role::Owner).unwrap();
        let ctx = verifier.verify(&token).unwrap();

        assert_eq!(ctx, IdentityContext::new(7, Role::Owner));
    }

    #[test]
    fn test_every_role_round_trips() {
        let (issuer, verifier) = setup(60);

        for role in Role::ALL {
            let token = issuer.issue(100, role).unwrap();
            assert_eq!(verifier.verify(&token).unwrap().role, role);
        }
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (issuer, verifier) = setup(60);
        let token = issuer.issue(7, Role::Tenant).unwrap();

        let result = verifier.verify(&tamper_signature(&token));
        assert_eq!(
            result,
            Err(AuthError::InvalidToken(CodecError::InvalidSignature))
        );
    }

    #[test]
    fn test_swapped_payload_rejected() {
        // TENANT トークンの署名に ADMIN の payload を組み合わせても通らない
        let (issuer, verifier) = setup(60);
        let tenant = issuer.issue(7, Role::Tenant).unwrap();
        let admin = issuer.issue(7, Role::Admin).unwrap();

        let tenant_parts: Vec<&str> = tenant.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let forged = format!("{}.{}.{}", tenant_parts[0], admin_parts[1], tenant_parts[2]);

        assert_eq!(
            verifier.verify(&forged),
            Err(AuthError::InvalidToken(CodecError::InvalidSignature))
        );
    }

    #[test]
    fn test_verify_is_idempotent() {
        let (issuer, verifier) = setup(60);
        let token = issuer.issue(11, Role::User).unwrap();

        let first = verifier.verify(&token);
        let second = verifier.verify(&token);
        assert_eq!(first, second);
        assert!(first.is_ok());
    }

    #[test]
    fn test_zero_ttl_token_is_expired() {
        let (issuer, verifier) = setup(0);
        let token = issuer.issue(1, Role::Owner).unwrap();

        assert_eq!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken(CodecError::Expired))
        );
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let (issuer, _) = setup(60);
        let other_codec = Arc::new(TokenCodec::from_config(&TokenConfig::new("another-secret")).unwrap());
        let other_verifier = TokenVerifier::new(other_codec);

        let token = issuer.issue(5, Role::Owner).unwrap();
        assert!(other_verifier.verify(&token).unwrap_err().is_unauthenticated());
    }

    #[test]
    fn test_verify_is_expiry_bounded() {
        let codec = Arc::new(TokenCodec::from_config(&TokenConfig::new(TEST_SECRET)).unwrap());
        let verifier = TokenVerifier::new(codec.clone());
        let token = codec
            .encode(&Claims::new(3, Role::Tenant, 1_000, 2_000))
            .unwrap();

        assert!(verifier.verify_at(&token, 1_999).is_ok());
        assert_eq!(
            verifier.verify_at(&token, 2_000),
            Err(AuthError::InvalidToken(CodecError::Expired))
        );
    }

    #[test]
    fn test_verified_context_drives_authorization() {
        let (issuer, verifier) = setup(60);
        let owner = verifier.verify(&issuer.issue(10, Role::Owner).unwrap()).unwrap();
        let tenant = verifier.verify(&issuer.issue(20, Role::Tenant).unwrap()).unwrap();

        let create_property = Requirement::AnyRole(&[Role::Owner]);
        assert!(authorize(&owner, &create_property).is_ok());
        assert_eq!(
            authorize(&tenant, &create_property),
            Err(AuthError::PermissionDenied)
        );

        assert!(authorize(&owner, &Requirement::Owner(10)).is_ok());
        assert!(authorize(&tenant, &Requirement::Owner(10)).is_err());

        let scope = OwnerScope::of(&owner);
        assert!(scope.includes(10));
        assert!(!scope.includes(20));
    }
}
