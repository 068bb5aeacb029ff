//! Uniform result envelope returned by every endpoint.
//!
//! The envelope carries the procedure's explicit success flag, a message that
//! is never empty, and the optional mapped payload. On the wire the flag is
//! named `value` and `data` is always present, `null` when absent.

use serde::{Deserialize, Serialize};

use super::procedure::OutputStatus;

/// Language used for messages substituted by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageLocale {
    #[default]
    En,
    Es,
}

/// Messages the service substitutes when the procedure supplies none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCatalog {
    pub success: &'static str,
    pub no_message: &'static str,
    pub credentials_incorrect: &'static str,
    pub account_inactive: &'static str,
}

const EN: MessageCatalog = MessageCatalog {
    success: "Operation succeeded.",
    no_message: "Operation returned no message.",
    credentials_incorrect: "Incorrect email or password.",
    account_inactive: "The account is inactive.",
};

const ES: MessageCatalog = MessageCatalog {
    success: "Operación exitosa.",
    no_message: "Operación sin mensaje.",
    credentials_incorrect: "Correo o contraseña incorrectos.",
    account_inactive: "La cuenta está inactiva.",
};

impl MessageLocale {
    /// Message table for this locale.
    #[must_use]
    pub fn catalog(self) -> &'static MessageCatalog {
        match self {
            Self::En => &EN,
            Self::Es => &ES,
        }
    }
}

/// Error returned when a locale tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported message locale '{0}'; expected en|es")]
pub struct UnknownLocale(pub String);

impl std::str::FromStr for MessageLocale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "es" | "es-mx" | "es-es" => Ok(Self::Es),
            other => Err(UnknownLocale(other.to_owned())),
        }
    }
}

/// Result wrapper `{ value, message, data }`.
///
/// # Examples
/// ```
/// use clinica_backend::domain::{Envelope, MessageLocale, OutputStatus};
///
/// let status = OutputStatus::new(true, None);
/// let envelope: Envelope<u8> = Envelope::from_status(status, None, MessageLocale::En.catalog());
/// assert!(envelope.success());
/// assert_eq!(envelope.message(), "Operation succeeded.");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "value")]
    success: bool,
    message: String,
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Assemble an envelope from a procedure's output status.
    ///
    /// Blank messages are replaced by the catalogue default keyed off the
    /// success flag.
    pub fn from_status(status: OutputStatus, data: Option<T>, catalog: &MessageCatalog) -> Self {
        let OutputStatus { success, message } = status;
        let message = match message {
            Some(text) if !text.trim().is_empty() => text,
            _ if success => catalog.success.to_owned(),
            _ => catalog.no_message.to_owned(),
        };
        Self {
            success,
            message,
            data,
        }
    }

    /// Successful envelope carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failed envelope without a payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Transform the payload while keeping the flag and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(true, None, "Operation succeeded.")]
    #[case(false, None, "Operation returned no message.")]
    #[case(true, Some("   "), "Operation succeeded.")]
    #[case(false, Some(""), "Operation returned no message.")]
    #[case(false, Some("Cédula duplicada"), "Cédula duplicada")]
    fn substitutes_default_messages(
        #[case] success: bool,
        #[case] message: Option<&str>,
        #[case] expected: &str,
    ) {
        let status = OutputStatus::new(success, message.map(str::to_owned));
        let envelope: Envelope<()> = Envelope::from_status(status, None, MessageLocale::En.catalog());
        assert_eq!(envelope.success(), success);
        assert_eq!(envelope.message(), expected);
    }

    #[rstest]
    fn spanish_defaults() {
        let catalog = MessageLocale::Es.catalog();
        let ok: Envelope<()> = Envelope::from_status(OutputStatus::new(true, None), None, catalog);
        let failed: Envelope<()> =
            Envelope::from_status(OutputStatus::new(false, None), None, catalog);
        assert_eq!(ok.message(), "Operación exitosa.");
        assert_eq!(failed.message(), "Operación sin mensaje.");
    }

    #[rstest]
    fn success_flag_ignores_payload_presence() {
        let envelope = Envelope::from_status(
            OutputStatus::new(false, Some("sin permisos".into())),
            Some(7),
            MessageLocale::En.catalog(),
        );
        assert!(!envelope.success());
        assert_eq!(envelope.data(), Some(&7));
    }

    #[rstest]
    fn serialises_wire_shape_with_null_data() {
        let envelope: Envelope<u32> = Envelope::failure("nope");
        let value = serde_json::to_value(&envelope).expect("serialise envelope");
        assert_eq!(value, json!({"value": false, "message": "nope", "data": null}));
    }

    #[rstest]
    #[case("en", MessageLocale::En)]
    #[case("ES", MessageLocale::Es)]
    #[case(" es-MX ", MessageLocale::Es)]
    fn parses_locales(#[case] raw: &str, #[case] expected: MessageLocale) {
        assert_eq!(raw.parse::<MessageLocale>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_locale() {
        assert!("fr".parse::<MessageLocale>().is_err());
    }
}
