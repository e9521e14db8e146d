use taskdeck::Result;
use taskdeck::api::Client;
use taskdeck::core::form::LoginForm;

use crate::cli::LoginArgs;

/// Returns whether the user ended up signed in.
pub async fn login(client: &Client, args: LoginArgs) -> Result<bool> {
    let credentials = LoginForm {
        email: args.email,
        password: args.password,
    }
    .validate()?;

    let response = client.session().login(&credentials).await?;
    match response.data.filter(|_| response.success) {
        Some(data) if !data.token.is_empty() => {
            println!("Signed in as {} <{}>", data.user.name, data.user.email);
            Ok(true)
        }
        _ => {
            let message = if response.message.is_empty() {
                "Login failed. Please check your credentials."
            } else {
                response.message.as_str()
            };
            eprintln!("{}", message);
            Ok(false)
        }
    }
}

pub fn logout(client: &Client) -> Result<()> {
    client.session().logout()?;
    println!("Signed out.");
    Ok(())
}

pub fn status(client: &Client) {
    let tokens = client.tokens();
    if tokens.is_authenticated() {
        match tokens.expires_at() {
            Some(expires) => println!(
                "Signed in to {} (session expires {})",
                client.http.base_url(),
                expires.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
            ),
            None => println!("Signed in to {}", client.http.base_url()),
        }
    } else {
        println!("Not signed in.");
    }
}
