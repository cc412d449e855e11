use reqwest::Url;

use crate::utils::cli::Args;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_url: Url,
    pub service_role_key: String,
    pub bucket: String,
}

impl Config {
    /// Validates the parsed arguments, collecting every problem instead of
    /// stopping at the first one.
    pub fn from_args(args: &Args) -> Result<Config, Vec<String>> {
        let mut validation_errors = Vec::new();

        let storage_url = match Url::parse(&args.storage_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
            Ok(url) => {
                validation_errors.push(format!(
                    "SUPABASE_URL `{}` must use http or https, got `{}`",
                    args.storage_url,
                    url.scheme(),
                ));
                None
            }
            Err(e) => {
                validation_errors.push(format!(
                    "SUPABASE_URL `{}` is not a valid url: {e}",
                    args.storage_url,
                ));
                None
            }
        };

        if args.service_role_key.trim().is_empty() {
            validation_errors.push("SUPABASE_SERVICE_ROLE_KEY must not be empty".to_string());
        }

        if args.bucket.is_empty() || args.bucket.contains('/') {
            validation_errors.push(format!(
                "PROOFS_BUCKET `{}` must be a single non-empty path segment",
                args.bucket,
            ));
        }

        match storage_url {
            Some(storage_url) if validation_errors.is_empty() => Ok(Config {
                host: args.host.clone(),
                port: args.port,
                storage_url,
                service_role_key: args.service_role_key.clone(),
                bucket: args.bucket.clone(),
            }),
            _ => Err(validation_errors),
        }
    }
}
