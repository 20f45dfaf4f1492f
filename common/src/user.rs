use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_BARBER: &str = "BARBER";

/// Account as the gateway reports it. Roles are open-ended strings on the
/// wire; the known ones are the constants above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_barber(&self) -> bool {
        self.role == ROLE_BARBER
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response to both login and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_helpers_match_wire_strings() {
        let mut user = User {
            id: "u-1".into(),
            name: "Otavio".into(),
            email: "otavio@example.com".into(),
            role: ROLE_ADMIN.into(),
        };
        assert!(user.is_admin());
        assert!(!user.is_barber());

        user.role = ROLE_BARBER.into();
        assert!(user.is_barber());

        user.role = "CLIENT".into();
        assert!(!user.is_admin() && !user.is_barber());
    }

    #[test]
    fn auth_payload_shapes() {
        let creds = Credentials {
            email: "a@b.com".into(),
            password: "secret".into(),
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["password"], "secret");

        let response = r#"{
            "token": "jwt-token",
            "user": {"id": "u-1", "name": "Ana", "email": "ana@b.com", "role": "BARBER"}
        }"#;
        let auth: AuthResponse = serde_json::from_str(response).unwrap();
        assert_eq!(auth.token, "jwt-token");
        assert!(auth.user.is_barber());
    }
}
