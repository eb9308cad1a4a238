//! Correctly signed requests are accepted.

#[cfg(test)]
mod tests {
    use paysign_http::{ListParams, Operation};
    use serde_json::json;

    use crate::{TEST_KEY_ID, TEST_MERCHANT, sandbox_client, start_sandbox, test_credentials};

    #[tokio::test]
    async fn test_should_authorize_create_payment_link() {
        let addr = start_sandbox().await;
        let client = sandbox_client(addr, test_credentials());

        let body = json!({
            "processingInformation": { "linkType": "PURCHASE", "requestPhone": false },
            "purchaseInformation": { "purchaseNumber": "PO-1001" },
            "orderInformation": {
                "amountDetails": { "totalAmount": "25.00", "currency": "USD" },
                "lineItems": [{ "productName": "Widget", "quantity": 1, "unitPrice": "25.00" }]
            }
        });
        let response = client.create_payment_link(&body).await.unwrap();

        assert_eq!(response.status, 200, "body: {}", response.body);
        assert_eq!(response.body["status"], "AUTHORIZED");
        assert_eq!(response.body["keyId"], TEST_KEY_ID);
        assert_eq!(response.body["merchantId"], TEST_MERCHANT);
        assert_eq!(response.body["method"], "POST");
        assert_eq!(response.body["resource"], "/ipl/v2/payment-links");
    }

    #[tokio::test]
    async fn test_should_authorize_list_with_signed_query() {
        let addr = start_sandbox().await;
        let client = sandbox_client(addr, test_credentials());

        let response = client
            .list_invoices(ListParams {
                offset: 10,
                limit: 5,
                status: Some("DRAFT".to_owned()),
            })
            .await
            .unwrap();

        assert!(response.is_success(), "body: {}", response.body);
        assert_eq!(response.body["method"], "GET");
        assert_eq!(
            response.body["resource"],
            "/invoicing/v2/invoices?offset=10&limit=5&status=DRAFT"
        );
    }

    #[tokio::test]
    async fn test_should_authorize_patch_update() {
        let addr = start_sandbox().await;
        let client = sandbox_client(addr, test_credentials());

        let response = client
            .update_payment_link("7000000000000000", &json!({ "status": "INACTIVE" }))
            .await
            .unwrap();

        assert!(response.is_success(), "body: {}", response.body);
        assert_eq!(response.body["method"], "PATCH");
    }

    #[tokio::test]
    async fn test_should_authorize_every_operation() {
        let addr = start_sandbox().await;
        let client = sandbox_client(addr, test_credentials());
        let body = json!({ "customerInformation": { "name": "Ada" } });

        let operations = [
            (Operation::CreatePaymentLink, Some(&body)),
            (Operation::ListPaymentLinks(ListParams::default()), None),
            (Operation::GetPaymentLink { id: "pl-1".to_owned() }, None),
            (Operation::UpdatePaymentLink { id: "pl-1".to_owned() }, Some(&body)),
            (Operation::CreateInvoice, Some(&body)),
            (Operation::ListInvoices(ListParams::default()), None),
            (Operation::GetInvoice { id: "inv 1".to_owned() }, None),
            (Operation::SendInvoice { id: "inv-1".to_owned() }, None),
            (Operation::CancelInvoice { id: "inv-1".to_owned() }, None),
        ];

        for (operation, body) in &operations {
            let response = client.execute(operation, *body).await.unwrap();
            assert_eq!(
                response.status,
                200,
                "{} rejected: {}",
                operation.name(),
                response.body
            );
            assert_eq!(response.body["resource"], operation.resource());
        }
    }

    #[tokio::test]
    async fn test_should_tag_each_response_with_correlation_id() {
        let addr = start_sandbox().await;
        let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();

        assert_eq!(response.status(), 200);
        let id = response.headers()[paysign_sandbox::CORRELATION_ID_HEADER]
            .to_str()
            .unwrap()
            .to_owned();
        assert!(uuid::Uuid::parse_str(&id).is_ok());

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "UP");
    }
}
