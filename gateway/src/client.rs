use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use shear_common::appointment::{AppointmentRecord, NewAppointment};
use shear_common::summary::{BarberSummary, DailySummary, RangeSummary};
use shear_common::user::{AuthResponse, Credentials, Registration, User};

use crate::error::{classify, GatewayError};

/// Typed client for the remote appointment gateway.
///
/// Attaches the bearer token to every request when one is set. The gateway
/// owns all data; this client never caches.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let mut request = self.http.get(self.endpoint(path)).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(GatewayError::Transport)?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let mut request = self.http.post(self.endpoint(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(GatewayError::Transport)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify(status.as_u16(), &body);
            tracing::warn!("gateway error: {err}");
            return Err(err);
        }
        response.json().await.map_err(GatewayError::Decode)
    }

    // ── Appointments ────────────────────────────────────────────────────

    /// GET /appointments
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentRecord>, GatewayError> {
        self.get_json("/appointments", &[]).await
    }

    /// POST /appointments. The gateway assigns `id` and `barberName`.
    pub async fn create_appointment(
        &self,
        new: &NewAppointment,
    ) -> Result<AppointmentRecord, GatewayError> {
        self.post_json("/appointments", new).await
    }

    /// GET /appointments/{barberId}
    pub async fn list_by_barber(
        &self,
        barber_id: &str,
    ) -> Result<Vec<AppointmentRecord>, GatewayError> {
        self.get_json(&format!("/appointments/{barber_id}"), &[]).await
    }

    /// GET /appointments/summary?date=YYYY-MM-DD
    pub async fn summary_by_date(&self, date: NaiveDate) -> Result<DailySummary, GatewayError> {
        self.get_json("/appointments/summary", &[("date", date.to_string())])
            .await
    }

    /// GET /appointments/summary-range?start=&end=
    pub async fn summary_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangeSummary, GatewayError> {
        self.get_json(
            "/appointments/summary-range",
            &[("start", start.to_string()), ("end", end.to_string())],
        )
        .await
    }

    /// GET /appointments/summary-by-barber?start=&end=
    pub async fn summary_by_barber(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BarberSummary>, GatewayError> {
        self.get_json(
            "/appointments/summary-by-barber",
            &[("start", start.to_string()), ("end", end.to_string())],
        )
        .await
    }

    /// GET /appointments/next?limit=
    pub async fn next_appointments(
        &self,
        limit: u32,
    ) -> Result<Vec<AppointmentRecord>, GatewayError> {
        self.get_json("/appointments/next", &[("limit", limit.to_string())])
            .await
    }

    // ── Auth & users ────────────────────────────────────────────────────

    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, GatewayError> {
        self.post_json("/auth/login", credentials).await
    }

    /// POST /auth/register
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, GatewayError> {
        self.post_json("/auth/register", registration).await
    }

    /// GET /users/
    pub async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        self.get_json("/users/", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_regardless_of_slashes() {
        let client = GatewayClient::new("http://localhost:3333");
        assert_eq!(
            client.endpoint("/appointments"),
            "http://localhost:3333/appointments"
        );

        let trailing = GatewayClient::new("http://localhost:3333/");
        assert_eq!(
            trailing.endpoint("appointments/next"),
            "http://localhost:3333/appointments/next"
        );
        assert_eq!(trailing.endpoint("/users/"), "http://localhost:3333/users/");
    }

    #[test]
    fn date_query_params_use_iso_days() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(date.to_string(), "2024-03-04");
    }

    #[test]
    fn token_is_configurable_after_login() {
        let mut client = GatewayClient::new("http://localhost:3333");
        assert!(client.token.is_none());
        client.set_token(Some("jwt".into()));
        assert_eq!(client.token.as_deref(), Some("jwt"));
        client.set_token(None);
        assert!(client.token.is_none());

        let built = GatewayClient::new("http://localhost:3333").with_token("jwt");
        assert_eq!(built.token.as_deref(), Some("jwt"));
    }
}
