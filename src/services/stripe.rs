use std::collections::HashMap;

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const API_BASE: &str = "https://api.stripe.com/v1";

// Reject signed payloads older than this; webhook verification must fail
// fast, never retry.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Stateless Stripe REST client. Credentials are injected at construction;
/// the client holds no mutable state and is cheap to clone into `AppState`.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    secret_key: String,
}

/// One display line of a checkout session, re-derived from catalog prices.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub name: String,
    // surcharge-inclusive minor units
    pub unit_amount: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct CheckoutParams {
    pub lines: Vec<CheckoutLine>,
    pub success_url: String,
    pub cancel_url: String,
    pub order_id: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutSession {
    pub id: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionList {
    pub data: Vec<CheckoutSession>,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            http: Client::new(),
            secret_key,
        }
    }

    fn has_key(&self) -> bool {
        !self.secret_key.trim().is_empty()
    }

    pub async fn create_checkout_session(
        &self,
        params: &CheckoutParams,
    ) -> Result<CheckoutSession, String> {
        if !self.has_key() {
            return Err("STRIPE_SECRET_KEY is missing in .env".to_string());
        }

        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("success_url".into(), params.success_url.clone()),
            ("cancel_url".into(), params.cancel_url.clone()),
            ("metadata[order_id]".into(), params.order_id.clone()),
            ("metadata[user_id]".into(), params.user_id.clone()),
        ];

        for (i, line) in params.lines.iter().enumerate() {
            form.push((
                format!("line_items[{i}][price_data][currency]"),
                "usd".into(),
            ));
            form.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                line.name.clone(),
            ));
            form.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                line.unit_amount.to_string(),
            ));
            form.push((format!("line_items[{i}][quantity]"), line.quantity.to_string()));
        }

        let res = self
            .http
            .post(format!("{API_BASE}/checkout/sessions"))
            .basic_auth(&self.secret_key, Some(""))
            .form(&form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("Stripe session create failed: {status} {body}"));
        }

        res.json::<CheckoutSession>().await.map_err(|e| e.to_string())
    }

    /// Resolve the checkout session(s) created for a payment intent; used by
    /// webhook reconciliation to map a gateway charge back to an order.
    pub async fn list_sessions_for_intent(
        &self,
        payment_intent: &str,
    ) -> Result<SessionList, String> {
        if !self.has_key() {
            return Err("STRIPE_SECRET_KEY is missing in .env".to_string());
        }

        let res = self
            .http
            .get(format!("{API_BASE}/checkout/sessions"))
            .basic_auth(&self.secret_key, Some(""))
            .query(&[("payment_intent", payment_intent)])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("Stripe session list failed: {status} {body}"));
        }

        res.json::<SessionList>().await.map_err(|e| e.to_string())
    }
}

/// Verify a `Stripe-Signature` header (`t=<ts>,v1=<hex hmac>`) against the
/// raw request body using the shared webhook secret.
pub fn verify_signature(payload: &[u8], sig_header: &str, secret: &str) -> bool {
    verify_signature_at(payload, sig_header, secret, chrono::Utc::now().timestamp())
}

fn verify_signature_at(payload: &[u8], sig_header: &str, secret: &str, now: i64) -> bool {
    if secret.is_empty() {
        return false;
    }

    let mut ts = "";
    let mut v1 = "";
    for part in sig_header.split(',') {
        let mut it = part.trim().splitn(2, '=');
        match (it.next(), it.next()) {
            (Some("t"), Some(val)) => ts = val,
            (Some("v1"), Some(val)) => v1 = val,
            _ => {}
        }
    }
    if ts.is_empty() || v1.is_empty() {
        return false;
    }

    let Ok(ts_i) = ts.parse::<i64>() else {
        return false;
    };
    if (now - ts_i).unsigned_abs() > SIGNATURE_TOLERANCE_SECS as u64 {
        return false;
    }

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(ts.as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = hex::encode(mac.finalize().into_bytes());

    constant_time_eq(&expected, v1)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut res = 0u8;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes()) {
        res |= x ^ y;
    }
    res == 0
}

/// Build a header a test (or the gateway) would send for `payload` at `ts`.
#[cfg(test)]
pub fn sign_for_test(payload: &[u8], secret: &str, ts: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{ts}.").as_bytes());
    mac.update(payload);
    format!("t={ts},v1={}", hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    #[test]
    fn accepts_a_correctly_signed_payload() {
        let body = br#"{"type":"payment_intent.succeeded"}"#;
        let header = sign_for_test(body, SECRET, 1_700_000_000);
        assert!(verify_signature_at(body, &header, SECRET, 1_700_000_000));
    }

    #[test]
    fn rejects_a_tampered_payload() {
        let body = br#"{"type":"payment_intent.succeeded"}"#;
        let header = sign_for_test(body, SECRET, 1_700_000_000);
        let tampered = br#"{"type":"payment_intent.payment_failed"}"#;
        assert!(!verify_signature_at(tampered, &header, SECRET, 1_700_000_000));
    }

    #[test]
    fn rejects_wrong_secret_and_garbage_headers() {
        let body = b"{}";
        let header = sign_for_test(body, "whsec_other", 1_700_000_000);
        assert!(!verify_signature_at(body, &header, SECRET, 1_700_000_000));
        assert!(!verify_signature_at(body, "not-a-signature", SECRET, 1_700_000_000));
        assert!(!verify_signature_at(body, "t=,v1=", SECRET, 1_700_000_000));
    }

    #[test]
    fn rejects_a_stale_timestamp() {
        let body = b"{}";
        let header = sign_for_test(body, SECRET, 1_700_000_000);
        assert!(!verify_signature_at(
            body,
            &header,
            SECRET,
            1_700_000_000 + SIGNATURE_TOLERANCE_SECS + 1
        ));
    }
}
