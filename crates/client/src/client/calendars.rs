//! Calendar API operations.

use super::CalderaClient;
use crate::error::Result;
use caldera_core::calendar::{Calendar, CalendarsResponse};

impl CalderaClient {
    /// List the calendars of the authenticated account.
    pub fn list_calendars(&self) -> Result<Vec<Calendar>> {
        let response: CalendarsResponse = self.get_json(&self.url("/v1/calendars")?, Vec::new())?;
        Ok(response.calendars)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{client_for, ScriptedTransport};
    use reqwest::Method;

    #[test]
    fn test_list_calendars() {
        let transport = ScriptedTransport::new().respond(
            200,
            r#"{"calendars":[{
                "provider_name": "google",
                "profile_id": "pro_1",
                "profile_name": "example@caldera.io",
                "calendar_id": "cal_1",
                "calendar_name": "Work",
                "calendar_primary": true
            }]}"#,
        );
        let client = client_for(&transport, "uk");

        let calendars = client.list_calendars().unwrap();

        assert_eq!(calendars.len(), 1);
        assert_eq!(calendars[0].calendar_id, "cal_1");
        assert!(calendars[0].calendar_primary);
        assert!(!calendars[0].calendar_readonly);

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::GET);
        assert_eq!(sent[0].url, "https://api-uk.caldera.io/v1/calendars");
        assert!(sent[0].body.is_none());
    }
}
