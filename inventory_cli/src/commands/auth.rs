//! The `login` and `logout` subcommands.

use anyhow::Result;
use clap::Args;
use inventory_lib::validation;

use super::Context;

#[derive(Args)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn login(args: &LoginArgs, ctx: &Context) -> Result<()> {
    let (username, password) = validation::validate_login(&args.username, &args.password)?;
    let session = ctx.client.login(&username, &password).await?;
    eprintln!("Signed in as {} ({})", session.username, session.role);
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.client.logout();
    eprintln!("Signed out");
    Ok(())
}
