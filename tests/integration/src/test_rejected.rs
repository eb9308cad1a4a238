//! Requests that do not carry a valid signature are rejected.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use paysign_http::{ListParams, Operation, build_signed_request};
    use serde_json::json;

    use crate::{
        TEST_MERCHANT, TEST_SECRET, base_url, credentials, sandbox_client, start_sandbox,
        test_credentials,
    };

    #[tokio::test]
    async fn test_should_reject_wrong_secret() {
        let addr = start_sandbox().await;
        let client = sandbox_client(addr, credentials("c2VjcmV0", TEST_MERCHANT));

        let response = client
            .list_payment_links(ListParams::default())
            .await
            .unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.body["status"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_should_reject_foreign_merchant() {
        let addr = start_sandbox().await;
        let client = sandbox_client(addr, credentials(TEST_SECRET, "another_merchant"));

        let response = client.get_invoice("inv-1").await.unwrap();

        assert_eq!(response.status, 401);
        assert!(
            response.body["reason"]
                .as_str()
                .unwrap()
                .contains("another_merchant")
        );
    }

    #[tokio::test]
    async fn test_should_reject_unsigned_request() {
        let addr = start_sandbox().await;

        let response = reqwest::get(format!("http://{addr}/ipl/v2/payment-links"))
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn test_should_reject_body_replaced_after_signing() {
        let addr = start_sandbox().await;
        let mut request = build_signed_request(
            &test_credentials(),
            &base_url(addr),
            &Operation::CreateInvoice,
            Some(&json!({ "amount": "10.00" })),
        )
        .unwrap();
        *request.body_mut() = Bytes::from_static(br#"{"amount":"99.00"}"#);

        let request = reqwest::Request::try_from(request).unwrap();
        let response = reqwest::Client::new().execute(request).await.unwrap();

        assert_eq!(response.status(), 401);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["reason"].as_str().unwrap().contains("Digest"));
    }

    #[tokio::test]
    async fn test_should_reject_unsupported_method() {
        let addr = start_sandbox().await;

        let response = reqwest::Client::new()
            .delete(format!("http://{addr}/ipl/v2/payment-links/1"))
            .header(
                "signature",
                r#"keyid="k", algorithm="HmacSHA256", headers="host v-c-date request-target v-c-merchant-id", signature="c2ln""#,
            )
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 405);
    }
}
