//! Defines the endpoint for updating an existing transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{
        Transaction, TransactionInput, input::accept_json, service::update_transaction,
        state::TransactionState,
    },
};

/// A route handler for overwriting the fields of a transaction.
///
/// The ID is taken as a raw string so that a malformed ID is reported as a
/// validation error rather than a routing failure. A malformed ID is reported
/// ahead of a malformed body.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    transaction_id.parse::<TransactionId>()?;
    let input = accept_json(payload)?;
    let transaction = update_transaction(&state.store, &transaction_id, input)?;

    tracing::info!("updated transaction {}", transaction.id);

    Ok(Json(transaction))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::StatusCode,
        routing::{get, put},
    };
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::get_test_state,
        transaction::{
            create_endpoint::create_transaction_endpoint,
            list_endpoint::list_transactions_endpoint,
        },
    };

    use super::edit_transaction_endpoint;

    fn get_test_server() -> TestServer {
        let app = Router::new()
            .route(
                endpoints::TRANSACTIONS,
                get(list_transactions_endpoint).post(create_transaction_endpoint),
            )
            .route(endpoints::TRANSACTION, put(edit_transaction_endpoint))
            .with_state(get_test_state());

        TestServer::try_new(app).expect("Could not create test server.")
    }

    async fn create(server: &TestServer) -> Value {
        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({"amount": 10, "date": "2024-01-15", "description": "Before"}))
            .await
            .json::<Value>()
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let server = get_test_server();
        let created = create(&server).await;

        let response = server
            .put("/transactions/1")
            .json(&json!({"amount": 20.5, "date": "2024-02-01", "description": "After"}))
            .await;

        response.assert_status(StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["id"], created["id"]);
        assert_eq!(body["createdAt"], created["createdAt"]);
        assert_eq!(body["amount"], 20.5);
        assert_eq!(body["date"], "2024-02-01T00:00:00Z");
        assert_eq!(body["description"], "After");
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let server = get_test_server();

        let response = server
            .put("/transactions/not-an-id")
            .json(&json!({"amount": 1, "date": "2024-02-01", "description": "x"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["field"], "id");
    }

    #[tokio::test]
    async fn malformed_id_is_reported_before_malformed_body() {
        let server = get_test_server();

        let response = server
            .put("/transactions/not-an-id")
            .content_type("application/json")
            .text("{bad")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["field"], "id");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let server = get_test_server();
        create(&server).await;

        let response = server
            .put("/transactions/1")
            .content_type("application/json")
            .text("{bad")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["field"], "body");
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let server = get_test_server();

        let response = server
            .put("/transactions/99")
            .json(&json!({"amount": 1, "date": "2024-02-01", "description": "x"}))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "Transaction not found"}));
    }

    #[tokio::test]
    async fn invalid_field_leaves_transaction_unchanged() {
        let server = get_test_server();
        let created = create(&server).await;

        server
            .put("/transactions/1")
            .json(&json!({"amount": 1, "date": "yesterday", "description": "x"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let body = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
        assert_eq!(body[0], created);
    }
}
