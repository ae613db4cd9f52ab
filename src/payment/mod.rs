//! UPI deep-link construction and scanned-QR parsing.
//!
//! The deep link is an outbound string handed to an external payment app;
//! this crate never parses a response from it. Scanned QR payloads are
//! parsed only far enough to recover the payee.

use crate::errors::{CoreError, Result};

const UPI_SCHEME: &str = "upi://pay";

/// Parameters of an outbound UPI payment.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Virtual payment address, e.g. `merchant@okbank`.
    pub payee_address: String,
    pub payee_name: Option<String>,
    pub amount: f64,
    pub note: Option<String>,
}

impl PaymentRequest {
    pub fn new(payee_address: impl Into<String>, amount: f64) -> Self {
        Self {
            payee_address: payee_address.into(),
            payee_name: None,
            amount,
            note: None,
        }
    }

    pub fn with_payee_name(mut self, name: impl Into<String>) -> Self {
        self.payee_name = Some(name.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Builds the `upi://pay` deep link with percent-encoded parameters.
    pub fn deep_link(&self) -> String {
        let mut link = format!(
            "{}?pa={}",
            UPI_SCHEME,
            urlencoding::encode(&self.payee_address)
        );
        if let Some(name) = &self.payee_name {
            link.push_str("&pn=");
            link.push_str(&urlencoding::encode(name));
        }
        link.push_str(&format!("&am={:.2}", self.amount));
        if let Some(note) = &self.note {
            link.push_str("&tn=");
            link.push_str(&urlencoding::encode(note));
        }
        link.push_str("&cu=INR");
        link
    }
}

/// Payee details recovered from a scanned UPI QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedPayee {
    pub address: String,
    pub name: Option<String>,
}

/// Parses a scanned QR payload of the form `upi://pay?pa=...&pn=...`.
/// Anything that is not a UPI payment code is an integration failure the
/// caller can surface and retry; local state is never touched.
pub fn parse_qr(raw: &str) -> Result<ScannedPayee> {
    let rest = raw
        .trim()
        .strip_prefix(UPI_SCHEME)
        .ok_or_else(|| CoreError::Integration("scanned code is not a UPI payment QR".into()))?;
    let query = rest.strip_prefix('?').unwrap_or(rest);

    let mut address = None;
    let mut name = None;
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "pa" => address = Some(decode(value)?),
            "pn" => name = Some(decode(value)?),
            _ => {}
        }
    }

    let address = address
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CoreError::Integration("UPI QR is missing the payee address".into()))?;
    Ok(ScannedPayee {
        address,
        name: name.filter(|value| !value.is_empty()),
    })
}

fn decode(value: &str) -> Result<String> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| CoreError::Integration(format!("undecodable UPI parameter: {err}")))
}
