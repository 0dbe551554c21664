//! AWS Lambda function acknowledging device hello requests.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    abk_hello_lambda::run().await
}
