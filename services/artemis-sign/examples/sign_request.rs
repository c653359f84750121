use artemis_core::{Context, Result, SignRequest};
use artemis_sign::{Credential, RequestSigner};

/// Prints the canonical string and the headers produced for a request.
#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let cred = Credential::new("24341259", "M5llsRpDovRZcB3WkhTk");
    let signer = RequestSigner::new();

    let build = || {
        http::Request::get(
            "https://open8200.hikvision.com/artemis/api/common/v1/remoteControlUnitRestService/findControlUnitPage?size=10&start=0",
        )
        .header("x-ca-timestamp", "1544367183633")
        .body(())
        .map(|req| req.into_parts().0)
    };

    let (string_to_sign, _) = signer.build_string_to_sign(&mut build()?, None, &cred)?;
    println!("string to sign:\n{string_to_sign}\n");

    let mut req = build()?;
    signer
        .sign_request(&Context::new(), &mut req, None, Some(&cred))
        .await?;
    for (name, value) in &req.headers {
        println!("{name}: {value:?}");
    }
    Ok(())
}
