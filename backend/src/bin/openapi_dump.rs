//! Print the OpenAPI document as pretty JSON on stdout.

use std::process::ExitCode;

use social_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("failed to serialise OpenAPI document: {error}");
            ExitCode::FAILURE
        }
    }
}
