use super::constant::{COMPROMISE_WARNING, EMAIL_FOOTER};

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Generates a standalone HTML document for a verification code email.
///
/// The document contains:
/// 1. A header naming the purpose of the mail.
/// 2. A sentence naming the recipient address.
/// 3. The verification code in brackets, displayed prominently.
/// 4. The account compromise warning and a footer.
///
/// # Arguments
///
/// * `recipient` - Email address the code was requested for. Escaped before embedding.
/// * `code` - The verification code to embed.
pub fn generate_verification_email_html(recipient: &str, code: &str) -> String {
    let recipient = escape_html(recipient);
    let code = escape_html(code);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Verification Code</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;">
    <div style="color: #191919; max-width: 500px;">
        <div style="background-color: #4f85f6; color: #ffffff; text-align: center; padding: 20px 0;">
            <h1 style="font-weight: 400;">Verification Code</h1>
        </div>
        <div style="background-color: #f4f4f4; padding: 1rem 2rem;">
            <p>Dear user,</p>
            <p>We've received a request to sign in to your account using e-mail {recipient}. Please verify your account using the code below.</p>
            <p style="font-weight: 700; text-align: center; font-size: 48px; letter-spacing: 1.5px;">[{code}]</p>
            <div style="color: #191919; font-size: 11px;">
                <p>{COMPROMISE_WARNING}</p>
            </div>
        </div>
        <div style="color: #191919; text-align: center; font-size: 11px;">
            <p>{EMAIL_FOOTER}</p>
        </div>
    </div>
</body>
</html>
"#
    )
}

/// Plain-text counterpart of [`generate_verification_email_html`].
pub fn generate_verification_email_text(code: &str) -> String {
    format!("Please verify your account using this code: {code}. {COMPROMISE_WARNING}")
}
