//! Issue-token command - mints a JWT the server will accept

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};

#[derive(Debug, Args)]
pub struct IssueTokenArgs {
    /// Account ID placed in the `sub` claim
    #[arg(long)]
    pub sub: String,

    /// Email placed in the `email` claim
    #[arg(long)]
    pub email: String,

    /// Lifetime in hours, defaults to auth.token_expiration_hours
    #[arg(long)]
    pub hours: Option<u64>,
}

pub fn run(args: IssueTokenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let token = issue(&config, &args)?;

    println!("{}", token);
    Ok(())
}

fn issue(config: &AppConfig, args: &IssueTokenArgs) -> anyhow::Result<String> {
    let mut jwt_config = JwtConfig::from(&config.auth);

    if let Some(hours) = args.hours {
        jwt_config.expiration_hours = hours;
    }

    Ok(JwtService::new(jwt_config).generate(&args.sub, &args.email)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies_with_configured_secret() {
        let config = AppConfig::default();
        let args = IssueTokenArgs {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            hours: Some(1),
        };

        let token = issue(&config, &args).unwrap();
        let claims = JwtService::new(JwtConfig::from(&config.auth))
            .validate(&token)
            .unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.exp - claims.iat, 3600);
    }
}
