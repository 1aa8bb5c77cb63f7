//! Print the registry's OpenAPI document as pretty JSON.

use utoipa::OpenApi;
use voter_registry::ApiDoc;

fn main() -> Result<(), serde_json::Error> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
