//! Print the signature of the reference request used by the test suite.

use geocoord::{canonical_message, ApiSigner, Parameters};

fn main() -> geocoord::Result<()> {
    let signer = ApiSigner::from_hex(&"00".repeat(32))?;

    let mut params = Parameters::new();
    params
        .append("à", "val1")
        .append("à", "val2")
        .insert("b", "à")
        .insert("sig", "gisà");

    print!("{}", canonical_message("POST", "/foo/bar", &params).replace("\r\n", "\n"));
    println!("{}", signer.sign("POST", "/foo/bar", &params));
    Ok(())
}
