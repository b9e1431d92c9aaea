//! Write the OpenAPI document as pretty JSON to standard output.

use std::io::{self, Write};

use parking::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|err| io::Error::other(format!("serialise OpenAPI document: {err}")))?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.write_all(b"\n")
}
