//! Dump the OpenAPI document as JSON on stdout.

use backend::ApiDoc;
use utoipa::OpenApi;

fn main() {
    println!("{}", ApiDoc::openapi().to_json().unwrap());
}
