use crate::commands::common::CliContext;
use crate::error::CliError;

pub async fn run_login(context: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let auth = context.auth_service()?;
    auth.login(email, password).await?;
    println!("Signed in as {}", email.trim());
    Ok(())
}

pub async fn run_register(
    context: &CliContext,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    let auth = context.auth_service()?;
    let confirmation = auth.register(email, password).await?;
    match confirmation.message {
        Some(message) => println!("{message}"),
        None => println!("Account created for {}", email.trim()),
    }
    println!("Sign in with `notas login --email {}`", email.trim());
    Ok(())
}

pub fn run_logout(context: &CliContext) -> Result<(), CliError> {
    let auth = context.auth_service()?;
    auth.logout()?;
    println!("Signed out");
    Ok(())
}

pub fn run_status(context: &CliContext) -> Result<(), CliError> {
    let gateway = match context.gateway() {
        Ok(gateway) => gateway,
        Err(CliError::NotConfigured) => {
            println!("The API is not configured.");
            return Ok(());
        }
        Err(error) => return Err(error),
    };

    println!("API: {}", gateway.config().api_base_url);
    if gateway.session().is_authenticated()? {
        println!("Signed in.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}
