//! Interactive access token prompt.

use dialoguer::Password;

/// Ask for a GitHub access token without echoing it.
pub fn prompt_token() -> anyhow::Result<String> {
    println!(
        "raise will now fork the template repo to your account. \
         Please provide a GitHub access token."
    );

    let token = Password::new()
        .with_prompt("access_token")
        .interact()
        .map_err(|e| anyhow::anyhow!("reading access token: {}", e))?;

    Ok(token.trim().to_string())
}
