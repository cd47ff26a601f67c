use crate::domain::models::service::PriceInput;
use serde::Deserialize;

// Fields are optional so that absent input gets our own 400 message. Bodies
// that fail to parse are rejected through `AppJson`.

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub name: Option<String>,
    pub schema_name: Option<String>,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: Option<String>,
    pub price: Option<PriceInput>,
}

#[derive(Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(rename = "serviceId")]
    pub service_id: Option<String>,
    #[serde(rename = "appointmentTime")]
    pub appointment_time: Option<String>,
}

/// Trims and drops empty strings.
pub fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_filters_blank_values() {
        assert_eq!(present(Some("  Al ".into())), Some("Al".into()));
        assert_eq!(present(Some("   ".into())), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_booking_uses_camel_case_keys() {
        let req: BookAppointmentRequest =
            serde_json::from_str(r#"{"serviceId":"s1","appointmentTime":"2025-03-01T10:30"}"#).unwrap();
        assert_eq!(req.service_id.as_deref(), Some("s1"));
        assert_eq!(req.appointment_time.as_deref(), Some("2025-03-01T10:30"));
    }
}
