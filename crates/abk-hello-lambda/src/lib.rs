//! AWS Lambda handler acknowledging device hello requests.
//!
//! Reads `{deviceUuid, txId}` from the query string (GET) or JSON body (other
//! methods), validates it, and answers `{"msg": "ok", "txId": ...}` with 200 or
//! `{"msg": "error", "txId": ...}` with 403.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, error, info, info_span};

use abk_hello_shared::{
    init_tracing, recover_tx_id, ApiGatewayResponse, HelloEvent, HelloRequest, HelloStatus,
    LoggingConfig, ResponseBody, ValidationError,
};

/// Configuration fixed at process start and handed to the handler.
///
/// The logging section is applied once by [`run`] through `init_tracing`; the
/// handler only records the configured level on each invocation span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerConfig {
    pub logging: LoggingConfig,
}

impl HandlerConfig {
    /// Read configuration from the Lambda environment.
    pub fn from_env() -> Self {
        Self {
            logging: LoggingConfig::from_env(),
        }
    }
}

/// Stateless per-invocation handler.
#[derive(Debug, Clone, Default)]
pub struct HelloHandler {
    config: HandlerConfig,
}

impl HelloHandler {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Lambda entry point. Input faults become 403 responses, never `Err`.
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
        let request_id = event.context.request_id.clone();

        debug!(
            request_id = %request_id,
            function_arn = %event.context.invoked_function_arn,
            deadline_ms = event.context.deadline,
            "invocation context"
        );

        Ok(self.respond(&event.payload, &request_id))
    }

    /// Build the response for one raw event payload.
    pub fn respond(&self, payload: &Value, request_id: &str) -> ApiGatewayResponse {
        let span = info_span!(
            "hello_invocation",
            request_id = %request_id,
            log_level = %self.config.logging.level
        );
        let _guard = span.enter();

        info!(request_id = %request_id, event = %payload, "handling hello request");

        let (status, body) = match parse_request(payload) {
            Ok(request) => {
                debug!(
                    request_id = %request_id,
                    device_uuid = %request.device_uuid,
                    tx_id = %request.tx_id,
                    "request validated"
                );
                (HelloStatus::Ok, ResponseBody::ok(request.tx_id))
            }
            Err(e) => {
                error!(
                    request_id = %request_id,
                    error = %e,
                    error_kind = e.kind(),
                    property = e.property().unwrap_or_default(),
                    "request rejected"
                );
                (HelloStatus::Forbidden, ResponseBody::error(recover_tx_id(payload)))
            }
        };

        let response = ApiGatewayResponse::new(status, &body);

        info!(
            request_id = %request_id,
            status_code = response.status_code,
            body = %response.body,
            "hello request handled"
        );

        response
    }
}

/// Extract and validate the request carried by a raw event payload.
pub fn parse_request(payload: &Value) -> Result<HelloRequest, ValidationError> {
    let event = HelloEvent::from_payload(payload)?;
    let input = event.extract_input()?;
    HelloRequest::from_raw(&input)
}

/// Entry point used by the Lambda binary.
pub async fn run() -> Result<(), Error> {
    let config = HandlerConfig::from_env();
    init_tracing(&config.logging);

    info!(level = %config.logging.level, "starting hello lambda");

    let handler = HelloHandler::new(config);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler.handle(event).await
    }))
    .await
}
